//! Building `:import(...)` rules.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use crate::css::{Declaration, Node, Rule};

/// Which ICSS dialect the emitted `:import` rules follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportSyntax {
    /// `:import("a.css" screen) {}`
    #[default]
    EmptyRule,
    /// `:import('a.css') { import: default screen }`
    DefaultImport,
}

/// Identity of one rewritten import: the URL and its lowercased media text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportKey {
    url: String,
    media: String,
}

impl ImportKey {
    pub fn new(url: impl Into<String>, media: &str) -> Self {
        Self {
            url: url.into(),
            media: media.to_lowercase(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn media(&self) -> &str {
        &self.media
    }
}

/// `"a.css"` or `"a.css" screen`.
impl fmt::Display for ImportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.url)?;
        if !self.media.is_empty() {
            write!(f, " {}", self.media)?;
        }
        Ok(())
    }
}

/// Ordered import set. Each key keeps the position of its first insertion.
#[derive(Debug, Clone, Default)]
pub struct ImportMap {
    entries: Vec<(ImportKey, Vec<(String, String)>)>,
    index: HashMap<ImportKey, usize>,
}

impl ImportMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` with its `(local, remote)` aliases, overwriting the
    /// aliases of an existing entry in place.
    pub fn insert(&mut self, key: ImportKey, aliases: Vec<(String, String)>) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = aliases,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, aliases));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ImportKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ImportKey, &[(String, String)])> {
        self.entries
            .iter()
            .map(|(key, aliases)| (key, aliases.as_slice()))
    }
}

fn alias_declarations(aliases: &[(String, String)]) -> Vec<Node> {
    let last = aliases.len().saturating_sub(1);
    aliases
        .iter()
        .enumerate()
        .map(|(i, (local, remote))| {
            let mut decl = Declaration::new(local.as_str(), remote.as_str());
            decl.raws.before = "\n  ".to_string();
            decl.raws.semicolon = i != last;
            Node::Decl(decl)
        })
        .collect()
}

fn empty_rule(key: &ImportKey, aliases: &[(String, String)]) -> Rule {
    let mut rule = Rule::new(format!(":import({key})"));
    rule.nodes = alias_declarations(aliases);
    if !rule.nodes.is_empty() {
        rule.raws.after = "\n".to_string();
    }
    rule
}

fn default_import_rule(key: &ImportKey, aliases: &[(String, String)]) -> Rule {
    let mut rule = Rule::new(format!(":import('{}')", key.url()));

    let value = if key.media().is_empty() {
        "default".to_string()
    } else {
        format!("default {}", key.media())
    };
    let mut import = Declaration::new("import", value);
    import.raws.before = " ".to_string();

    if aliases.is_empty() {
        rule.nodes.push(Node::Decl(import));
        rule.raws.after = " ".to_string();
    } else {
        import.raws.before = "\n  ".to_string();
        import.raws.semicolon = true;
        rule.nodes.push(Node::Decl(import));
        rule.nodes.extend(alias_declarations(aliases));
        rule.raws.after = "\n".to_string();
    }
    rule
}

/// One `:import` rule per entry of `imports`, in map order.
pub fn create_icss_rules(imports: &ImportMap, syntax: ImportSyntax) -> Vec<Node> {
    imports
        .iter()
        .map(|(key, aliases)| {
            let rule = match syntax {
                ImportSyntax::EmptyRule => empty_rule(key, aliases),
                ImportSyntax::DefaultImport => default_import_rule(key, aliases),
            };
            Node::Rule(rule)
        })
        .collect()
}
