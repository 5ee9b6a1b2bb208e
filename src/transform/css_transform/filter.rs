use regex::Regex;
use std::sync::LazyLock;

use crate::errors::{ConfigError, ConfigResult};

static SCHEME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?-u:\w)+://").expect("scheme pattern is valid")
});

/// Decides which `@import` targets get rewritten into `:import` rules.
pub trait ImportFilter {
    /// `true` rewrites the import, `false` leaves the `@import` in place.
    fn accepts(&self, url: &str) -> bool;
}

impl<F> ImportFilter for F
where
    F: Fn(&str) -> bool,
{
    fn accepts(&self, url: &str) -> bool {
        self(url)
    }
}

/// Rejects absolute (`scheme://…`) and protocol-relative (`//…`) URLs,
/// which point outside the local module graph.
pub fn default_filter(url: &str) -> bool {
    !SCHEME_PREFIX.is_match(url) && !url.starts_with("//")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFilter;

impl ImportFilter for DefaultFilter {
    fn accepts(&self, url: &str) -> bool {
        default_filter(url)
    }
}

/// Leaves every URL matching one of its patterns as a native `@import`.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    exclude: Vec<Regex>,
}

impl PatternFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> ConfigResult<Self> {
        let exclude = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| ConfigError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { exclude })
    }
}

impl ImportFilter for PatternFilter {
    fn accepts(&self, url: &str) -> bool {
        !self.exclude.iter().any(|re| re.is_match(url))
    }
}
