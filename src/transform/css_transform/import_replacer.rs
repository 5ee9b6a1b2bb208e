use std::fmt;

use crate::css::{Node, Root};
use crate::transform::css_transform::{
    ImportFilter, ImportKey, ImportMap, ImportSyntax, Warning, WarningKind, create_icss_rules,
    default_filter, parse_import_params,
};

/// Options for one import rewrite pass.
#[derive(Default)]
pub struct ImportOptions {
    filter: Option<Box<dyn ImportFilter>>,
    syntax: ImportSyntax,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default filter with `filter`.
    pub fn with_filter<F>(self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.with_import_filter(filter)
    }

    pub fn with_import_filter<I: ImportFilter + 'static>(mut self, filter: I) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn with_syntax(mut self, syntax: ImportSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn syntax(&self) -> ImportSyntax {
        self.syntax
    }

    pub fn accepts(&self, url: &str) -> bool {
        match &self.filter {
            Some(filter) => filter.accepts(url),
            None => default_filter(url),
        }
    }
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("custom_filter", &self.filter.is_some())
            .field("syntax", &self.syntax)
            .finish()
    }
}

/// An `@import` at-rule found while scanning, identified by the index of
/// the top-level node that is or contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportMatch {
    pub index: usize,
    pub top_level: bool,
}

/// Lists every `@import` (any name casing, any depth) in document order.
pub fn scan_imports(root: &Root) -> Vec<ImportMatch> {
    let mut matches = Vec::new();
    for (index, node) in root.nodes.iter().enumerate() {
        if is_import(node) {
            matches.push(ImportMatch {
                index,
                top_level: true,
            });
        }
        if let Some(children) = node.children() {
            scan_nested(children, index, &mut matches);
        }
    }
    matches
}

fn scan_nested(nodes: &[Node], index: usize, matches: &mut Vec<ImportMatch>) {
    for node in nodes {
        if is_import(node) {
            matches.push(ImportMatch {
                index,
                top_level: false,
            });
        }
        if let Some(children) = node.children() {
            scan_nested(children, index, matches);
        }
    }
}

fn is_import(node: &Node) -> bool {
    node.as_at_rule()
        .is_some_and(|at_rule| at_rule.is_named("import"))
}

/// Rewrites top-level `@import` rules of a stylesheet into `:import` rules.
pub struct ImportReplacer<'a> {
    options: &'a ImportOptions,
}

impl<'a> ImportReplacer<'a> {
    pub fn new(options: &'a ImportOptions) -> Self {
        Self { options }
    }

    pub fn build(&self, root: &mut Root) -> Vec<Warning> {
        let matches = scan_imports(root);

        let mut warnings = Vec::new();
        let mut imports = ImportMap::new();
        let mut removed = Vec::new();

        for ImportMatch { index, top_level } in matches {
            // Only top-level imports are convertible.
            if !top_level {
                continue;
            }
            let Some(at_rule) = root.nodes.get(index).and_then(Node::as_at_rule) else {
                continue;
            };

            if at_rule.nodes.is_some() {
                warnings.push(Warning::new(WarningKind::UnterminatedImport, index, at_rule));
                continue;
            }
            let Some(parsed) = parse_import_params(&at_rule.params) else {
                warnings.push(Warning::new(WarningKind::UnresolvableUri, index, at_rule));
                continue;
            };
            if !self.options.accepts(&parsed.url) {
                tracing::trace!(url = %parsed.url, "keeping @import");
                continue;
            }

            tracing::debug!(url = %parsed.url, media = %parsed.media, "rewriting @import");
            removed.push(index);
            imports.insert(ImportKey::new(parsed.url, &parsed.media), Vec::new());
        }

        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        root.remove_nodes(&removed);
        if imports.is_empty() {
            return warnings;
        }
        root.prepend(create_icss_rules(&imports, self.options.syntax()));
        warnings
    }
}
