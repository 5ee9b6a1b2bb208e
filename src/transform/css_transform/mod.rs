mod filter;
mod icss_rules;
mod import_params;
mod import_replacer;
mod warning;

pub use filter::{DefaultFilter, ImportFilter, PatternFilter, default_filter};
pub use icss_rules::{ImportKey, ImportMap, ImportSyntax, create_icss_rules};
pub use import_params::{ParamToken, ParsedImport, parse_import_params, stringify, tokenize};
pub use import_replacer::{ImportMatch, ImportOptions, ImportReplacer, scan_imports};
pub use warning::{UNTERMINATED_IMPORT_MESSAGE, Warning, WarningKind, WarningNode};
