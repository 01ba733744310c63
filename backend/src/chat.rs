//! Chat line sanitising

/// Lines this long (after escaping and trimming) are dropped
pub const MAX_CHAT_LEN: usize = 256;

/// HTML-escapes and trims a chat line. `None` when nothing is left or the
/// line is too long to relay.
pub fn sanitize(raw: &str) -> Option<String> {
    let escaped = escape_html(raw);
    let line = escaped.trim();
    if line.is_empty() || line.chars().count() >= MAX_CHAT_LEN {
        return None;
    }
    Some(line.to_string())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
