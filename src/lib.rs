//! Rewrites top-level CSS `@import` rules into ICSS `:import(...)` rules.
//!
//! ```
//! use icss_import::{ImportOptions, transform_from_string};
//!
//! let output = transform_from_string("@import \"foo.css\" screen;\n.foo {}", &ImportOptions::new()).unwrap();
//! assert_eq!(output.css, ":import(\"foo.css\" screen) {}\n.foo {}");
//! assert!(output.warnings.is_empty());
//! ```

pub mod config;
pub mod css;
mod errors;
mod transform;

pub use config::Config;
pub use errors::{ConfigError, ConfigResult, TransformError, TransformResult};
pub use transform::css::{TransformOutput, transform_from_string, transform_root};
pub use transform::css_transform::{
    DefaultFilter, ImportFilter, ImportKey, ImportMap, ImportMatch, ImportOptions, ImportReplacer,
    ImportSyntax, ParamToken, ParsedImport, PatternFilter, UNTERMINATED_IMPORT_MESSAGE, Warning,
    WarningKind, WarningNode, create_icss_rules, default_filter, parse_import_params, scan_imports,
    stringify, tokenize,
};
