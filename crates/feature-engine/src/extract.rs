//! Numeric Text Extraction

use regex::Regex;
use std::sync::OnceLock;

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid"))
}

/// Extract the first decimal number embedded in `text`.
///
/// `"20.0 kmpl"` gives `Some(20.0)`, `"1197 CC"` gives `Some(1197.0)`.
/// Absent input, empty input, or text without digits gives `None`; unit
/// suffixes and any trailing text are ignored.
pub fn extract_number(text: Option<&str>) -> Option<f64> {
    let text = text?;
    let token = number_pattern().find(text)?;
    token.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}
