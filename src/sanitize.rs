//! Allow-list HTML sanitization for model- and user-supplied content.
//!
//! Plain Markdown passes through untouched; embedded markup is reduced to a
//! fixed allow-list of formatting tags before anything is rendered into an
//! HTML report.

use std::collections::{HashMap, HashSet};

/// Clean content against the allow-list policy: headers, text formatting,
/// lists, code, tables, and links restricted to href/title.
pub fn sanitize_markup(content: &str) -> String {
    let tags = HashSet::from([
        "h1", "h2", "h3", "h4", "h5", "h6", // headers
        "p", "br", "hr", // paragraphs and breaks
        "strong", "b", "em", "i", "u", "s", // text formatting
        "ul", "ol", "li", // lists
        "blockquote", "pre", "code", // code and quotes
        "table", "thead", "tbody", "tr", "th", "td", // tables
        "a", // links, attributes restricted below
    ]);

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", HashSet::from(["href", "title"]));
    tag_attributes.insert("code", HashSet::from(["class"]));
    tag_attributes.insert("pre", HashSet::from(["class"]));

    ammonia::Builder::default()
        .tags(tags)
        .tag_attributes(tag_attributes)
        .link_rel(Some("nofollow"))
        .clean(content)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_script_tags() {
        let cleaned = sanitize_markup("hello <script>alert('x')</script> world");
        assert!(!cleaned.contains("<script>"));
        assert!(cleaned.contains("hello"));
        assert!(cleaned.contains("world"));
    }

    #[test]
    fn test_keeps_formatting_tags() {
        let cleaned = sanitize_markup("<strong>bold</strong> and <em>italic</em>");
        assert!(cleaned.contains("<strong>bold</strong>"));
        assert!(cleaned.contains("<em>italic</em>"));
    }

    #[test]
    fn test_links_get_nofollow_and_lose_extras() {
        let cleaned = sanitize_markup("<a href=\"https://example.com\" onclick=\"evil()\">x</a>");
        assert!(cleaned.contains("href=\"https://example.com\""));
        assert!(cleaned.contains("nofollow"));
        assert!(!cleaned.contains("onclick"));
    }
}
