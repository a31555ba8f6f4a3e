//! Minimal server-side page rendering.

use rocket::response::content::RawHtml;

pub fn escape(text: &str) -> String {
    let mut ret = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => ret.push_str("&amp;"),
            '<' => ret.push_str("&lt;"),
            '>' => ret.push_str("&gt;"),
            '"' => ret.push_str("&quot;"),
            '\'' => ret.push_str("&#x27;"),
            c => ret.push(c),
        }
    }
    ret
}

/// Wraps `body` in the common layout, `body` must already be escaped.
pub fn page(title: &str, body: &str) -> RawHtml<String> {
    RawHtml(format!(
        "<!DOCTYPE html>\n\
        <html lang=\"en\">\
        <head>\
        <meta charset=\"utf-8\">\
        <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
        <title>{}</title>\
        </head>\
        <body>{body}</body>\
        </html>",
        escape(title),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;",
        );
    }

    #[test]
    fn page_escapes_title_only() {
        let RawHtml(html) = page("<t>", "<p>body</p>");
        assert!(html.contains("<title>&lt;t&gt;</title>"));
        assert!(html.contains("<body><p>body</p></body>"));
    }
}
