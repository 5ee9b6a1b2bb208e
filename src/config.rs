use serde::Deserialize;

use crate::errors::ConfigResult;
use crate::transform::css_transform::{ImportOptions, ImportSyntax, PatternFilter};

/// File-based configuration, e.g.
///
/// ```toml
/// syntax = "default-import"
/// exclude = ["^https?://", "^//"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub syntax: ImportSyntax,
    /// URLs matching any of these patterns stay native `@import`s.
    /// Replaces the default filter when set.
    pub exclude: Option<Vec<String>>,
}

impl Config {
    pub fn from_toml_str(config_str: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(config_str)?)
    }

    pub fn to_options(&self) -> ConfigResult<ImportOptions> {
        let options = ImportOptions::new().with_syntax(self.syntax);
        match &self.exclude {
            Some(patterns) => Ok(options.with_import_filter(PatternFilter::new(patterns.as_slice())?)),
            None => Ok(options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.syntax, ImportSyntax::EmptyRule);
        assert!(config.exclude.is_none());

        let options = config.to_options().unwrap();
        assert!(options.accepts("a.css"));
        assert!(!options.accepts("http://a.css"));
    }

    #[test]
    fn exclude_patterns_replace_default_filter() {
        let config = Config::from_toml_str(
            r#"
            syntax = "default-import"
            exclude = ["^vendor/"]
            "#,
        )
        .unwrap();

        let options = config.to_options().unwrap();
        assert_eq!(options.syntax(), ImportSyntax::DefaultImport);
        assert!(options.accepts("http://a.css"));
        assert!(!options.accepts("vendor/a.css"));
    }

    #[test]
    fn reject_unknown_syntax() {
        let err = Config::from_toml_str(r#"syntax = "at-rule""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn reject_invalid_pattern() {
        let config = Config::from_toml_str(r#"exclude = ["[a-"]"#).unwrap();
        assert!(matches!(config.to_options(), Err(ConfigError::Pattern { .. })));
    }
}
