/// Turns a display caption such as `"P/E in %"` into a snake_case field name
/// (`"p_e_in_percent"`).
///
/// `%` becomes `percent`, every run of other non-alphanumeric characters
/// becomes a single `_`, and a leading `52w` is rewritten to `ttm` so the
/// 52-week captions line up with the distance fields of the same page.
pub fn normalize(display: &str) -> Option<String> {
    let mut line = String::with_capacity(display.len());

    for ch in display.trim().to_lowercase().chars() {
        if ch == '%' {
            line.push_str("percent");
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            line.push(ch);
        } else if !line.ends_with('_') {
            line.push('_');
        }
    }

    let line = line.strip_prefix('_').unwrap_or(&line);
    let line = line.strip_suffix('_').unwrap_or(line);

    if line.is_empty() {
        return None;
    }

    match line.strip_prefix("52w") {
        Some(rest) => Some(format!("ttm{}", rest)),
        None => Some(line.to_string()),
    }
}
