use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("no tags were supplied to lay out")]
    /// The tag collection was empty; nothing is laid out and no document is produced
    EmptyInput,

    #[error("page geometry is invalid: {0}")]
    /// The supplied [PageGeometry](crate::PageGeometry) cannot produce a usable grid
    InvalidGeometry(String),

    #[error("code payload template is unusable: {0}")]
    /// The payload template would not produce an absolute URL
    InvalidTemplate(String),

    #[error("no label item matches placement `{0}`")]
    /// A placement was handed to the renderer without its matching label item
    MissingItem(String),

    #[error("text metrics are unavailable: {0}")]
    /// Text could not be measured, so no trustworthy layout can be computed
    MetricsUnavailable(String),

    #[error("failed to generate code image: {0}")]
    /// The scannable code for a tag could not be generated or encoded
    CodeImage(String),

    #[error("rendered document is malformed: {0}")]
    /// The assembled PDF failed its structural self-check
    MalformedOutput(&'static str),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    Font(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [LabelError], for callers that map failures onto
/// distinct user-facing responses
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was unusable
    Input,
    /// A text or image backend failed
    Resource,
    /// The rendering backend produced a corrupt document
    Integrity,
}

impl LabelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabelError::EmptyInput
            | LabelError::InvalidGeometry(_)
            | LabelError::InvalidTemplate(_)
            | LabelError::MissingItem(_) => ErrorKind::Input,
            LabelError::MetricsUnavailable(_)
            | LabelError::CodeImage(_)
            | LabelError::Font(_)
            | LabelError::Io(_) => ErrorKind::Resource,
            LabelError::MalformedOutput(_) => ErrorKind::Integrity,
        }
    }
}

impl From<qrcode::types::QrError> for LabelError {
    fn from(e: qrcode::types::QrError) -> Self {
        LabelError::CodeImage(e.to_string())
    }
}
