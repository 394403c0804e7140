use std::fmt;

/// A structural address for finding a UI element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Element id attribute
    Id(String),
    /// Anchor with this exact visible text (whitespace-normalized)
    LinkText(String),
    /// XPath expression
    XPath(String),
    /// CSS selector
    Css(String),
}

/// What the locator lowers to for the CDP search endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Query {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn link_text(text: impl Into<String>) -> Self {
        Locator::LinkText(text.into())
    }

    pub fn xpath(xpath: impl Into<String>) -> Self {
        Locator::XPath(xpath.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub(crate) fn as_query(&self) -> Query {
        match self {
            Locator::Id(id) => Query::XPath(format!("//*[@id={}]", xpath_literal(id))),
            Locator::LinkText(text) => Query::XPath(format!(
                "//a[normalize-space(.)={}]",
                xpath_literal(text)
            )),
            Locator::XPath(xpath) => Query::XPath(xpath.clone()),
            Locator::Css(selector) => Query::Css(selector.clone()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "id={}", id),
            Locator::LinkText(text) => write!(f, "link text={}", text),
            Locator::XPath(xpath) => write!(f, "xpath={}", xpath),
            Locator::Css(selector) => write!(f, "css={}", selector),
        }
    }
}

/// Quote a string as an XPath literal. XPath 1.0 has no escape syntax, so
/// text containing both quote kinds needs a concat() expression.
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{}'", text)
    } else if !text.contains('"') {
        format!("\"{}\"", text)
    } else {
        let parts: Vec<String> = text
            .split('\'')
            .map(|part| format!("'{}'", part))
            .collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_lowers_to_xpath() {
        assert_eq!(
            Locator::id("sso_username").as_query(),
            Query::XPath("//*[@id='sso_username']".to_string())
        );
    }

    #[test]
    fn test_link_text_lowers_to_anchor_xpath() {
        assert_eq!(
            Locator::link_text("Recent Timecards").as_query(),
            Query::XPath("//a[normalize-space(.)='Recent Timecards']".to_string())
        );
    }

    #[test]
    fn test_css_passes_through() {
        assert_eq!(
            Locator::css("input#x").as_query(),
            Query::Css("input#x".to_string())
        );
    }

    #[test]
    fn test_xpath_literal_with_apostrophe() {
        assert_eq!(xpath_literal("O'Brien"), "\"O'Brien\"");
    }

    #[test]
    fn test_xpath_literal_with_both_quotes() {
        assert_eq!(
            xpath_literal(r#"a'b"c"#),
            r#"concat('a', "'", 'b"c')"#
        );
    }
}
