use crate::geometry::PageGeometry;
use crate::metrics::TextMetrics;
use crate::units::*;
use crate::LabelError;

fn measure(metrics: &dyn TextMetrics, text: &str, size: Pt) -> Result<Mm, LabelError> {
    let width = metrics.text_width(text, size)?;
    if !width.is_finite() || width < Mm(0.0) {
        return Err(LabelError::MetricsUnavailable(format!(
            "measured width of {text:?} at {size} is {width}"
        )));
    }
    Ok(width)
}

/// Breaks text into lines on whitespace. Each word is measured together with a
/// trailing space; a word that would push the running width past `max_width`
/// starts a new line. Words are never split, so a word wider than `max_width`
/// overflows its line.
///
/// The first line may come back empty when the very first word is already too
/// wide. That line still counts towards the height of the text, which keeps
/// height estimates on the generous side.
pub fn wrap_words(
    metrics: &dyn TextMetrics,
    text: &str,
    max_width: Mm,
    size: Pt,
) -> Result<Vec<String>, LabelError> {
    let space = measure(metrics, " ", size)?;

    let mut lines: Vec<String> = vec![String::new()];
    let mut line_width = Mm(0.0);
    for word in text.split_whitespace() {
        let word_width = measure(metrics, word, size)? + space;
        if line_width + word_width > max_width {
            lines.push(String::new());
            line_width = word_width;
        } else {
            line_width += word_width;
        }

        if let Some(line) = lines.last_mut() {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
    }

    Ok(lines)
}

/// Finds the largest font size, stepping down from `max_size` by `step`, at which
/// `text` set on a single line is no wider than `max_width`. Text that is too wide
/// even at `min_size` is given `min_size` and allowed to overflow.
pub fn fit_font_size(
    metrics: &dyn TextMetrics,
    text: &str,
    max_width: Mm,
    max_size: Pt,
    min_size: Pt,
    step: Pt,
) -> Result<Pt, LabelError> {
    if max_size <= min_size || step <= Pt(0.0) {
        return Ok(min_size);
    }

    // candidates are derived from the step count rather than by repeated
    // subtraction, so the same inputs always visit the same sizes
    let steps = ((*max_size - *min_size) / *step).floor() as usize;
    for i in 0..=steps {
        let size = max_size - step * i as f32;
        if measure(metrics, text, size)? <= max_width {
            return Ok(size);
        }
    }
    Ok(min_size)
}

/// Total height of a container `container_width` wide: wrapped label text at
/// `font_size`, the square code image, and padding above the text, between text
/// and code, and below the code.
pub fn estimate_height(
    metrics: &dyn TextMetrics,
    text: &str,
    container_width: Mm,
    font_size: Pt,
    geometry: &PageGeometry,
) -> Result<Mm, LabelError> {
    let text_width = container_width - geometry.padding * 2.0;
    let lines = wrap_words(metrics, text, text_width, font_size)?.len();
    let text_height = Mm(lines as f32 * *font_size * geometry.line_height);
    let code_size = container_width - geometry.padding * 2.0 - geometry.code_gutter;

    let height = text_height + code_size + geometry.padding * 3.0;
    if !height.is_finite() || height <= Mm(0.0) {
        return Err(LabelError::MetricsUnavailable(format!(
            "estimated container height for {text:?} is {height}"
        )));
    }
    Ok(height)
}
