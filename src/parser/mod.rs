pub mod film;
pub mod review;

use scraper::ElementRef;

/// Text content of an element: child text nodes trimmed, empty ones
/// dropped, the rest joined with single spaces.
pub fn text_of(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for part in element.text() {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(trimmed);
    }
    out
}

/// An attribute value, trimmed, if the element carries it.
pub fn attr_of(element: ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(|v| v.trim().to_string())
}

/// Parse a comma-decimal rating ("4,5") into a float. Only the first
/// comma is swapped for a dot, matching the site's pt-BR formatting.
pub fn parse_comma_decimal(text: &str) -> Option<f64> {
    text.trim().replacen(',', ".", 1).parse().ok()
}
