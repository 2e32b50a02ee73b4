/// Escape the LaTeX-significant characters in free text.
///
/// Covers the five characters that break table rows when left raw:
/// `& % _ # $`. Applied to requirement text, verdict reasons, and proposal
/// names — never to markup the renderer itself emits.
pub fn latex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("\\&"),
            '%' => escaped.push_str("\\%"),
            '_' => escaped.push_str("\\_"),
            '#' => escaped.push_str("\\#"),
            '$' => escaped.push_str("\\$"),
            _ => escaped.push(c),
        }
    }
    escaped
}
