/// Extract `href` targets ending in `extension` from an HTML directory index.
///
/// Document order is kept. Attribute names are matched case-insensitively; values may be
/// double-quoted, single-quoted or bare.
pub fn extract_links(html: &str, extension: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let mut out = Vec::new();
    let mut cursor = 0;
    while let Some(pos) = lower[cursor..].find("href") {
        let mut i = cursor + pos + "href".len();
        cursor = i;
        i = skip_ws(html, i);
        if !html[i..].starts_with('=') {
            continue;
        }
        i = skip_ws(html, i + 1);
        let Some((value, consumed)) = attr_value(&html[i..]) else {
            continue;
        };
        cursor = i + consumed;
        if value.ends_with(extension) {
            out.push(value.to_string());
        }
    }
    out
}

fn skip_ws(s: &str, mut i: usize) -> usize {
    let bytes = s.as_bytes();
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Attribute value at the start of `rest` and the number of bytes it spans, quotes included.
fn attr_value(rest: &str) -> Option<(&str, usize)> {
    let first = rest.chars().next()?;
    if first == '"' || first == '\'' {
        let end = rest[1..].find(first)?;
        return Some((&rest[1..1 + end], end + 2));
    }
    let end = rest
        .find(|c: char| c.is_ascii_whitespace() || c == '>')
        .unwrap_or(rest.len());
    Some((&rest[..end], end))
}

#[cfg(test)]
#[path = "../../tests/unit/source/listing.rs"]
mod tests;
