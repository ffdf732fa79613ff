//! Scannable codes printed at the bottom of every label.

use crate::LabelError;
use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};

/// Placeholder replaced by the tag identifier in a payload template
pub const ID_PLACEHOLDER: &str = "{id}";

/// Renders a payload into a greyscale raster held in memory
pub trait CodeGenerator: Send + Sync {
    /// Generate an image encoding `payload`, approximately `size_px` pixels square
    fn generate(&self, payload: &str, size_px: u32) -> Result<GrayImage, LabelError>;
}

/// Build the payload for a tag by substituting its identifier into `template`.
/// Templates without a `{id}` placeholder get the identifier appended as a final
/// path segment.
pub fn payload_for(template: &str, id: &str) -> String {
    if template.contains(ID_PLACEHOLDER) {
        template.replace(ID_PLACEHOLDER, id)
    } else if template.ends_with('/') {
        format!("{template}{id}")
    } else {
        format!("{template}/{id}")
    }
}

/// Check that `template` yields absolute URLs: a scheme followed by `://` and a
/// non-empty host. A code without a host leads nowhere once scanned.
pub fn validate_template(template: &str) -> Result<(), LabelError> {
    let invalid =
        |reason: &str| Err(LabelError::InvalidTemplate(format!("{template:?} {reason}")));

    let Some((scheme, rest)) = template.split_once("://") else {
        return invalid("has no scheme");
    };
    let scheme_ok = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !scheme_ok {
        return invalid("has no valid scheme");
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.starts_with(ID_PLACEHOLDER) {
        return invalid("has no host");
    }
    Ok(())
}

/// QR codes, drawn with whole-pixel modules
#[derive(Debug, Clone)]
pub struct QrCodeGenerator {
    pub ec_level: EcLevel,
    /// Width of the light border, in modules
    pub quiet_zone: u32,
}

impl Default for QrCodeGenerator {
    fn default() -> Self {
        QrCodeGenerator {
            ec_level: EcLevel::M,
            quiet_zone: 4,
        }
    }
}

impl QrCodeGenerator {
    pub fn with_ec_level(mut self, ec_level: EcLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    pub fn with_quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone = modules;
        self
    }
}

impl CodeGenerator for QrCodeGenerator {
    fn generate(&self, payload: &str, size_px: u32) -> Result<GrayImage, LabelError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ec_level)?;
        let modules = code.width() as u32;
        let colours = code.to_colors();

        let span = modules + 2 * self.quiet_zone;
        let scale = (size_px / span).max(1);
        let side = span * scale;

        let quiet = self.quiet_zone;
        let image = GrayImage::from_fn(side, side, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            let module_range = quiet..quiet + modules;
            let inside = module_range.contains(&mx) && module_range.contains(&my);
            let dark = inside
                && colours[((my - quiet) * modules + (mx - quiet)) as usize] == Color::Dark;
            if dark {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });

        log::trace!(
            "generated {modules}x{modules} module code as {side}px image for {payload:?}"
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_identifier_into_template() {
        assert_eq!(
            payload_for("https://moves.example/tag/{id}", "t-42"),
            "https://moves.example/tag/t-42"
        );
        assert_eq!(
            payload_for("https://moves.example/tag", "t-42"),
            "https://moves.example/tag/t-42"
        );
        assert_eq!(
            payload_for("https://moves.example/tag/", "t-42"),
            "https://moves.example/tag/t-42"
        );
    }

    #[test]
    fn templates_need_a_scheme_and_host() {
        assert!(validate_template("https://moves.example/tag/{id}").is_ok());
        assert!(validate_template("http://192.168.2.17:5173/tag").is_ok());

        let unusable = [
            "/tag/{id}",
            "moves.example/tag/{id}",
            "https:///tag/{id}",
            "://x/{id}",
        ];
        for template in unusable {
            let err = validate_template(template).unwrap_err();
            assert!(matches!(err, LabelError::InvalidTemplate(_)), "{template}");
        }
    }

    #[test]
    fn qr_image_is_square_with_a_light_border() {
        let image = QrCodeGenerator::default()
            .generate("https://moves.example/tag/abc", 186)
            .unwrap();
        assert_eq!(image.width(), image.height());
        assert!(image.width() <= 186);
        assert_eq!(image.get_pixel(0, 0), &Luma([255u8]));
    }

    #[test]
    fn finder_pattern_starts_after_the_quiet_zone() {
        // one byte fits a 21 module code; 29 modules with the border, 2px each
        let image = QrCodeGenerator::default().generate("x", 58).unwrap();
        assert_eq!(image.width(), 58);
        assert_eq!(image.get_pixel(7, 7), &Luma([255u8]));
        assert_eq!(image.get_pixel(8, 8), &Luma([0u8]));
    }

    #[test]
    fn tiny_targets_still_get_one_pixel_per_module() {
        let image = QrCodeGenerator::default().generate("x", 1).unwrap();
        // version 1 code: 21 modules plus two 4-module quiet zones
        assert_eq!(image.width(), 29);
    }

    #[test]
    fn oversized_payload_is_a_code_image_error() {
        let payload = "x".repeat(8000);
        let err = QrCodeGenerator::default().generate(&payload, 186).unwrap_err();
        assert!(matches!(err, LabelError::CodeImage(_)));
    }
}
