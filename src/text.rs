//! Plain-text extraction for bill documents.
//!
//! Congress.gov serves bill text as HTML, usually a single `<pre>` block
//! inside `<body>`. The summarizer gets the text only.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

pub fn looks_like_html(content: &str) -> bool {
    content.trim_start().starts_with('<')
}

/// Text of the document's `<body>`, tags stripped.
pub fn extract_body_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&BODY_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>())
}

/// Trims every line and drops blank ones.
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(trimmed);
        }
    }

    result
}

/// Reduces HTML bill documents to their body text. Anything else is
/// already the bill text and comes back untouched.
pub fn normalize_bill_text(content: &str) -> String {
    if looks_like_html(content) {
        if let Some(body) = extract_body_text(content) {
            return collapse_whitespace(&body);
        }
    }
    content.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_is_reduced_to_body_text() {
        let html = "<html><head><title>H.R. 1</title></head><body><pre>\n\
                    118th CONGRESS\n\n   1st Session\n<b>H. R. 1</b>\n</pre></body></html>";

        assert_eq!(normalize_bill_text(html), "118th CONGRESS\n1st Session\nH. R. 1");
    }

    #[test]
    fn plain_text_passes_through_unchanged() {
        let text = "SEC. 1.\n\n    (a) In general.--Text.\n";
        assert_eq!(normalize_bill_text(text), text);
    }

    #[test]
    fn collapse_whitespace_drops_blank_lines() {
        let text = "  SECTION 1. SHORT TITLE.\n\n\tThis Act may be cited as the Test Act.  \n";
        assert_eq!(
            collapse_whitespace(text),
            "SECTION 1. SHORT TITLE.\nThis Act may be cited as the Test Act."
        );
    }

    #[test]
    fn detects_markup() {
        assert!(looks_like_html("  <html><body>x</body></html>"));
        assert!(!looks_like_html("A BILL to amend title 5"));
    }
}
