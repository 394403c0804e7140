use crate::Result;

/// A point-in-time read of session state that wait predicates evaluate
/// against. Predicates never touch the live page directly, which keeps
/// them pure and lets `wait_until` take one snapshot per poll.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    /// Current URL; `None` when the page is mid-navigation and the URL
    /// could not be read
    pub url: Option<String>,
}

impl PageSnapshot {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// A condition evaluated repeatedly by `Session::wait_until`. Must be a
/// pure read of the snapshot.
pub trait Condition: Send + Sync {
    fn evaluate(&self, page: &PageSnapshot) -> Result<bool>;

    /// Short description used in timeout errors and logs
    fn describe(&self) -> String;
}

/// True iff the current URL exactly equals a member of the set (not a
/// prefix or substring match)
pub struct UrlIsOneOf {
    urls: Vec<String>,
}

impl UrlIsOneOf {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

impl Condition for UrlIsOneOf {
    fn evaluate(&self, page: &PageSnapshot) -> Result<bool> {
        match &page.url {
            Some(url) => Ok(self.urls.iter().any(|candidate| candidate == url)),
            None => Ok(false),
        }
    }

    fn describe(&self) -> String {
        format!("url to be one of [{}]", self.urls.join(", "))
    }
}

/// True iff the current URL starts with the given prefix
pub struct UrlStartsWith {
    prefix: String,
}

impl UrlStartsWith {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Condition for UrlStartsWith {
    fn evaluate(&self, page: &PageSnapshot) -> Result<bool> {
        match &page.url {
            Some(url) => Ok(url.starts_with(&self.prefix)),
            None => Ok(false),
        }
    }

    fn describe(&self) -> String {
        format!("url to start with {}", self.prefix)
    }
}

/// True iff the current URL contains the given fragment
pub struct UrlContains {
    fragment: String,
}

impl UrlContains {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl Condition for UrlContains {
    fn evaluate(&self, page: &PageSnapshot) -> Result<bool> {
        match &page.url {
            Some(url) => Ok(url.contains(&self.fragment)),
            None => Ok(false),
        }
    }

    fn describe(&self) -> String {
        format!("url to contain {}", self.fragment)
    }
}

/// Logical OR over conditions: evaluates left to right, short-circuits on
/// the first truthy result, and treats an evaluation error from one
/// condition as falsy rather than propagating it
pub struct AnyOf {
    conditions: Vec<Box<dyn Condition>>,
}

impl AnyOf {
    pub fn new(conditions: Vec<Box<dyn Condition>>) -> Self {
        Self { conditions }
    }
}

impl Condition for AnyOf {
    fn evaluate(&self, page: &PageSnapshot) -> Result<bool> {
        for condition in &self.conditions {
            match condition.evaluate(page) {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(e) => {
                    tracing::debug!("Condition \"{}\" errored, treating as false: {}", condition.describe(), e);
                }
            }
        }
        Ok(false)
    }

    fn describe(&self) -> String {
        let descriptions: Vec<String> = self
            .conditions
            .iter()
            .map(|condition| condition.describe())
            .collect();
        format!("any of [{}]", descriptions.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct Always(bool);

    impl Condition for Always {
        fn evaluate(&self, _page: &PageSnapshot) -> Result<bool> {
            Ok(self.0)
        }

        fn describe(&self) -> String {
            format!("always {}", self.0)
        }
    }

    struct Fails;

    impl Condition for Fails {
        fn evaluate(&self, _page: &PageSnapshot) -> Result<bool> {
            Err(Error::Browser("boom".to_string()))
        }

        fn describe(&self) -> String {
            "fails".to_string()
        }
    }

    #[test]
    fn test_url_is_one_of_exact_match() {
        let condition = UrlIsOneOf::new(["https://a.example/x", "https://b.example/y"]);
        assert!(condition
            .evaluate(&PageSnapshot::with_url("https://a.example/x"))
            .unwrap());
        assert!(condition
            .evaluate(&PageSnapshot::with_url("https://b.example/y"))
            .unwrap());
    }

    #[test]
    fn test_url_is_one_of_rejects_substring() {
        let condition = UrlIsOneOf::new(["https://a.example/x"]);
        assert!(!condition
            .evaluate(&PageSnapshot::with_url("https://a.example/x?param=1"))
            .unwrap());
        assert!(!condition
            .evaluate(&PageSnapshot::with_url("https://evil.example/https://a.example/x"))
            .unwrap());
    }

    #[test]
    fn test_url_is_one_of_false_without_url() {
        let condition = UrlIsOneOf::new(["https://a.example/x"]);
        assert!(!condition.evaluate(&PageSnapshot::default()).unwrap());
    }

    #[test]
    fn test_url_starts_with() {
        let condition = UrlStartsWith::new("https://a.example/OA.jsp");
        assert!(condition
            .evaluate(&PageSnapshot::with_url("https://a.example/OA.jsp?page=1"))
            .unwrap());
        assert!(!condition
            .evaluate(&PageSnapshot::with_url("https://a.example/RF.jsp"))
            .unwrap());
    }

    #[test]
    fn test_url_contains() {
        let condition = UrlContains::new("_rc=HXCTIMECARD");
        assert!(condition
            .evaluate(&PageSnapshot::with_url("https://a.example/OA.jsp?_rc=HXCTIMECARD&x=1"))
            .unwrap());
        assert!(!condition
            .evaluate(&PageSnapshot::with_url("https://a.example/OA.jsp"))
            .unwrap());
    }

    #[test]
    fn test_any_of_short_circuits_on_first_true() {
        let condition = AnyOf::new(vec![Box::new(Always(false)), Box::new(Always(true))]);
        assert!(condition.evaluate(&PageSnapshot::default()).unwrap());
    }

    #[test]
    fn test_any_of_all_false() {
        let condition = AnyOf::new(vec![Box::new(Always(false)), Box::new(Always(false))]);
        assert!(!condition.evaluate(&PageSnapshot::default()).unwrap());
    }

    #[test]
    fn test_any_of_error_does_not_mask_later_conditions() {
        let condition = AnyOf::new(vec![Box::new(Fails), Box::new(Always(true))]);
        assert!(condition.evaluate(&PageSnapshot::default()).unwrap());
    }

    #[test]
    fn test_any_of_empty_is_false() {
        let condition = AnyOf::new(vec![]);
        assert!(!condition.evaluate(&PageSnapshot::default()).unwrap());
    }
}
