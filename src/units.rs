//! Typed lengths. Layout happens in millimetres ([Mm]) measured from the top-left
//! corner of the page; PDF content streams and font sizes use points ([Pt]).

use derive_more::{Add, AddAssign, Deref, Display, Div, From, Into, Mul, MulAssign, Sub, SubAssign, Sum};

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// A length in millimetres
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Sum,
    Deref,
    Display,
    From,
    Into,
)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

/// A length in PostScript points (1/72 inch). Font sizes are always expressed in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Sum,
    Deref,
    Display,
    From,
    Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

impl Mm {
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// The larger of two lengths
    pub fn max(self, other: Mm) -> Mm {
        Mm(self.0.max(other.0))
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Self {
        Mm(pt.0 / POINTS_PER_MM)
    }
}

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * POINTS_PER_MM)
    }
}
