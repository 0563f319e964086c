use ammonia::Builder;
use comrak::{markdown_to_html, Options};
use std::collections::HashSet;

/// Render paragraph Markdown to sanitized HTML.
///
/// Article paragraphs are edited by staff, but their text still passes through
/// ammonia before it reaches a page.
pub fn render_markdown(raw: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.superscript = true;
    options.render.unsafe_ = true; // ammonia sanitizes below

    let html = markdown_to_html(raw, &options);
    sanitize_html(&html)
}

/// Render a code paragraph verbatim inside `<pre><code>`, tagging the
/// language for client-side highlighting.
pub fn render_code_block(code: &str, language: &str) -> String {
    let body = html_escape::encode_text(code);
    let language: String = language
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect();

    if language.is_empty() {
        format!("<pre><code>{body}</code></pre>")
    } else {
        format!("<pre><code class=\"language-{language}\">{body}</code></pre>")
    }
}

fn sanitize_html(html: &str) -> String {
    let extra_tags: HashSet<&str> = [
        "h2", "h3", "h4", "pre", "code", "blockquote", "hr", "table", "thead", "tbody", "tr",
        "th", "td", "img", "del", "s", "sup", "sub",
    ]
    .iter()
    .copied()
    .collect();

    let url_schemes: HashSet<&str> = ["http", "https", "mailto"].iter().copied().collect();

    let mut builder = Builder::default();
    builder.add_tags(&extra_tags);

    builder.add_tag_attributes("a", &["href", "title"]);
    builder.add_tag_attributes("img", &["src", "alt", "title"]);
    builder.add_tag_attributes("code", &["class"]);
    builder.add_tag_attributes("td", &["align"]);
    builder.add_tag_attributes("th", &["align"]);

    builder.url_schemes(url_schemes);
    builder.link_rel(Some("noopener noreferrer"));

    builder.clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_markdown_rendering() {
        let html = render_markdown("Bu **kalın** ve *italik* bir metin.");
        assert!(html.contains("<strong>kalın</strong>"));
        assert!(html.contains("<em>italik</em>"));
    }

    #[test]
    fn quote_rendering() {
        let html = render_markdown("> Söz uçar, yazı kalır.");
        assert!(html.contains("<blockquote>"));
    }

    #[test]
    fn xss_script_tag_removed() {
        let html = render_markdown("<script>alert('xss')</script>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn xss_javascript_url_removed() {
        let html = render_markdown("[tıkla](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn xss_event_handler_removed() {
        let html = render_markdown("<img src=x onerror=alert(1)>");
        assert!(!html.contains("onerror"));
    }

    #[test]
    fn empty_input() {
        assert!(render_markdown("").trim().is_empty());
    }

    #[test]
    fn code_block_is_escaped() {
        let html = render_code_block("if a < b { println!(\"<x>\") }", "rust");
        assert!(html.starts_with("<pre><code class=\"language-rust\">"));
        assert!(html.contains("a &lt; b"));
        assert!(!html.contains("<x>"));
    }

    #[test]
    fn code_block_language_is_filtered() {
        let html = render_code_block("x", "py\" onclick=\"evil");
        assert!(html.contains("class=\"language-pyonclickevil\""));
        assert!(!html.contains("onclick=\""));
    }

    #[test]
    fn code_block_without_language() {
        assert_eq!(render_code_block("x", ""), "<pre><code>x</code></pre>");
    }
}
