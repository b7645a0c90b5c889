/// Escape text for HTML bodies and attributes.
///
/// Braces are escaped too so a substituted value can never form a new
/// placeholder token.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape plain text and keep its line breaks.
pub(crate) fn text_to_html(raw: &str) -> String {
    escape(raw).replace("\r\n", "\n").replace('\n', "<br>\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_braces() {
        assert_eq!(
            escape("<b>A & B</b> {{x}}"),
            "&lt;b&gt;A &amp; B&lt;/b&gt; &#123;&#123;x&#125;&#125;"
        );
    }

    #[test]
    fn keeps_line_breaks() {
        assert_eq!(text_to_html("a\nb"), "a<br>\nb");
    }
}
