use std::fmt;

use crate::css::{AtRule, Position};

pub const UNTERMINATED_IMPORT_MESSAGE: &str = "It looks like you didn't end your @import statement correctly. Child nodes are attached to it.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// An `@import` owns a block, usually because its `;` is missing.
    UnterminatedImport,
    /// No usable URL leads the `@import` params.
    UnresolvableUri,
}

/// The at-rule a warning points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningNode {
    /// Index among the root's children when the pass started.
    pub index: usize,
    /// The at-rule printed on its own.
    pub text: String,
    pub source: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
    pub node: WarningNode,
}

impl Warning {
    pub(crate) fn new(kind: WarningKind, index: usize, at_rule: &AtRule) -> Self {
        let text = at_rule.to_string();
        let message = match kind {
            WarningKind::UnterminatedImport => UNTERMINATED_IMPORT_MESSAGE.to_string(),
            WarningKind::UnresolvableUri => format!("Unable to find uri in '{text}'"),
        };
        Self {
            kind,
            message,
            node: WarningNode {
                index,
                text,
                source: at_rule.source,
            },
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.source {
            Some(Position { line, column }) => write!(f, "{line}:{column}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}
