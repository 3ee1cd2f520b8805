// Locators - Typed, immutable element tables for page objects
//
// Each page object enumerates its elements as an enum implementing
// `PageElement` and builds a `LocatorMap` from a static table at
// construction. Construction rejects duplicate keys, missing keys and
// selectors that are obviously malformed, so lookups afterwards are
// infallible.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Selector engine a locator string is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// CSS, including Playwright extensions such as `:has-text()`
    Css,
    /// XPath (`//…`, `(//…)` or `xpath=` prefixed)
    XPath,
}

/// A validated locator expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    raw: &'static str,
    kind: SelectorKind,
}

impl Selector {
    /// Parses a selector, detecting its engine and checking bracket balance.
    pub fn parse(raw: &'static str) -> std::result::Result<Self, String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("selector is empty".to_string());
        }

        let kind = if trimmed.starts_with("//")
            || trimmed.starts_with("(//")
            || trimmed.starts_with("xpath=")
        {
            SelectorKind::XPath
        } else {
            SelectorKind::Css
        };

        check_balanced(trimmed)?;
        Ok(Self { raw, kind })
    }

    pub fn as_str(&self) -> &'static str {
        self.raw
    }

    pub fn kind(&self) -> SelectorKind {
        self.kind
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

// Brackets must nest and quotes must close; characters inside quotes are
// literal.
fn check_balanced(selector: &str) -> std::result::Result<(), String> {
    let mut stack: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in selector.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '[' | '(' => stack.push(c),
            ']' | ')' => {
                let open = if c == ']' { '[' } else { '(' };
                if stack.pop() != Some(open) {
                    return Err(format!("unbalanced '{}'", c));
                }
            }
            _ => {}
        }
    }

    if let Some(q) = quote {
        return Err(format!("unterminated {} quote", q));
    }
    if let Some(open) = stack.pop() {
        return Err(format!("unclosed '{}'", open));
    }
    Ok(())
}

/// Semantic element key of one page object.
pub trait PageElement: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Page object name, used in errors and logs.
    const PAGE: &'static str;

    /// Every element of the page; each must appear in the locator table exactly once.
    const ALL: &'static [Self];
}

/// Immutable element → selector mapping for a single page object.
#[derive(Debug, Clone)]
pub struct LocatorMap<K: PageElement> {
    entries: HashMap<K, Selector>,
}

impl<K: PageElement> LocatorMap<K> {
    /// Builds and validates the map from a static table.
    pub fn new(table: &[(K, &'static str)]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(table.len());

        for &(key, raw) in table {
            let selector = Selector::parse(raw).map_err(|reason| Error::InvalidLocator {
                page: K::PAGE,
                key: format!("{:?}", key),
                reason,
            })?;

            if entries.insert(key, selector).is_some() {
                return Err(Error::InvalidLocator {
                    page: K::PAGE,
                    key: format!("{:?}", key),
                    reason: "declared more than once".to_string(),
                });
            }
        }

        if let Some(missing) = K::ALL.iter().find(|k| !entries.contains_key(*k)) {
            return Err(Error::InvalidLocator {
                page: K::PAGE,
                key: format!("{:?}", missing),
                reason: "no selector declared".to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Selector string for `key`.
    pub fn get(&self, key: K) -> &'static str {
        // `new` guarantees every key of `K::ALL` is present.
        self.entries[&key].as_str()
    }

    pub fn selector(&self, key: K) -> &Selector {
        &self.entries[&key]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Demo {
        Header,
        Button,
    }

    impl PageElement for Demo {
        const PAGE: &'static str = "DemoPage";
        const ALL: &'static [Self] = &[Demo::Header, Demo::Button];
    }

    #[test]
    fn test_selector_kind_detection() {
        let css = Selector::parse("div.product-details input#quantity").unwrap();
        assert_eq!(css.kind(), SelectorKind::Css);

        let xpath = Selector::parse("//h2[text()=\"All Products\"]").unwrap();
        assert_eq!(xpath.kind(), SelectorKind::XPath);

        let prefixed = Selector::parse("xpath=//div").unwrap();
        assert_eq!(prefixed.kind(), SelectorKind::XPath);
    }

    #[test]
    fn test_selector_balance_checks() {
        assert!(Selector::parse("p:has-text(\"Category:\")").is_ok());
        assert!(Selector::parse("a[title='a]b']").is_ok());
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("   ").is_err());
        assert_eq!(
            Selector::parse("input[id=\"x\"").unwrap_err(),
            "unclosed '['"
        );
        assert_eq!(Selector::parse("div)").unwrap_err(), "unbalanced ')'");
        assert_eq!(
            Selector::parse("a[href=\"/x]").unwrap_err(),
            "unterminated \" quote"
        );
    }

    #[test]
    fn test_locator_map_lookup() {
        let map = LocatorMap::new(&[(Demo::Header, "h2"), (Demo::Button, "button#go")]).unwrap();
        assert_eq!(map.get(Demo::Header), "h2");
        assert_eq!(map.get(Demo::Button), "button#go");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_locator_map_rejects_duplicates() {
        let err = LocatorMap::new(&[
            (Demo::Header, "h2"),
            (Demo::Button, "button"),
            (Demo::Header, "h3"),
        ])
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid locator DemoPage.Header: declared more than once"
        );
    }

    #[test]
    fn test_locator_map_rejects_missing_key() {
        let err = LocatorMap::new(&[(Demo::Header, "h2")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid locator DemoPage.Button: no selector declared"
        );
    }

    #[test]
    fn test_locator_map_rejects_malformed_selector() {
        let err = LocatorMap::new(&[(Demo::Header, "h2[("), (Demo::Button, "button")]).unwrap_err();
        assert!(matches!(err, Error::InvalidLocator { key, .. } if key == "Header"));
    }
}
