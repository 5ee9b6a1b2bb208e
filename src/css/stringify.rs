use std::fmt::{self, Display, Formatter};

use super::node::{AtRule, Comment, Declaration, Node, Root, Rule};

// A node prints without its `before` text and without its terminating `;`;
// both belong to the enclosing block.

fn write_nodes(f: &mut Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for node in nodes {
        let raws = node.raws();
        f.write_str(&raws.before)?;
        write!(f, "{node}")?;
        if raws.semicolon {
            f.write_str(";")?;
        }
    }
    Ok(())
}

fn write_block(f: &mut Formatter<'_>, nodes: &[Node], after: &str) -> fmt::Result {
    f.write_str("{")?;
    write_nodes(f, nodes)?;
    f.write_str(after)?;
    f.write_str("}")
}

impl Display for Root {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes)?;
        f.write_str(&self.raws.after)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::AtRule(node) => node.fmt(f),
            Node::Rule(node) => node.fmt(f),
            Node::Decl(node) => node.fmt(f),
            Node::Comment(node) => node.fmt(f),
        }
    }
}

impl AtRule {
    /// The params as written, unless they were changed after parsing.
    fn raw_params(&self) -> &str {
        match &self.raws.params {
            Some(raw) if raw.value == self.params => &raw.raw,
            _ => &self.params,
        }
    }
}

impl Display for AtRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{}{}{}{}",
            self.name,
            self.raws.after_name,
            self.raw_params(),
            self.raws.between
        )?;
        match &self.nodes {
            Some(nodes) => write_block(f, nodes, &self.raws.after),
            None => Ok(()),
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)?;
        f.write_str(&self.raws.between)?;
        write_block(f, &self.nodes, &self.raws.after)
    }
}

impl Display for Declaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.prop, self.raws.between, self.value, self.raws.after
        )
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "/*{}*/", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::node::{RawValue, Raws};

    #[test]
    fn prints_generated_rule() {
        let rule = Rule::new(r#":import("a.css")"#);
        assert_eq!(rule.to_string(), r#":import("a.css") {}"#);
    }

    #[test]
    fn at_rule_prints_without_semicolon() {
        let mut at_rule = AtRule::new("import", "'a.css'");
        at_rule.raws.semicolon = true;
        assert_eq!(at_rule.to_string(), "@import 'a.css'");

        let root = Root {
            nodes: vec![Node::AtRule(at_rule)],
            raws: Raws {
                after: "\n".to_string(),
                ..Default::default()
            },
        };
        assert_eq!(root.to_string(), "@import 'a.css';\n");
    }

    #[test]
    fn prints_declarations_inside_block() {
        let mut decl = Declaration::new("import", "default");
        decl.raws.before = " ".to_string();
        let mut rule = Rule::new(":import('a.css')");
        rule.nodes.push(Node::Decl(decl));
        rule.raws.after = " ".to_string();

        assert_eq!(rule.to_string(), ":import('a.css') { import: default }");
    }

    #[test]
    fn at_rule_prints_raw_params_until_changed() {
        let mut at_rule = AtRule::new("import", "'a.css'  screen");
        at_rule.raws.params = Some(RawValue {
            value: "'a.css'  screen".to_string(),
            raw: "'a.css' /* c */ screen".to_string(),
        });
        assert_eq!(at_rule.to_string(), "@import 'a.css' /* c */ screen");

        at_rule.params = "'b.css'".to_string();
        assert_eq!(at_rule.to_string(), "@import 'b.css'");
    }
}
