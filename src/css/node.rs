/// Whitespace and punctuation around a node, kept so untouched input
/// prints back byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raws {
    /// Text between the previous sibling (or the block opening) and this node.
    pub before: String,
    /// At-rules only: whitespace between the name and the params.
    pub after_name: String,
    /// At-rule: text after the params. Rule: text before `{`.
    /// Declaration: the `:` with its surrounding whitespace.
    pub between: String,
    /// Blocks: text before the closing `}`. Declarations: whitespace
    /// between the value and the `;`.
    pub after: String,
    /// The statement was terminated by its own `;`.
    pub semicolon: bool,
    /// At-rules only: the params as written, when comments were dropped
    /// from the parsed value.
    pub params: Option<RawValue>,
}

/// A cleaned value next to the source text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub value: String,
    pub raw: String,
}

/// 1-based line and column of a node's first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    AtRule(AtRule),
    Rule(Rule),
    Decl(Declaration),
    Comment(Comment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    /// `Some` as soon as the at-rule owns a `{}` block, even an empty one.
    pub nodes: Option<Vec<Node>>,
    pub raws: Raws,
    pub source: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub raws: Raws,
    pub source: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub raws: Raws,
    pub source: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment body without the `/*` and `*/` delimiters.
    pub text: String,
    pub raws: Raws,
    pub source: Option<Position>,
}

/// The stylesheet root. Owns every top-level node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
    pub nodes: Vec<Node>,
    pub raws: Raws,
}

impl AtRule {
    pub fn new(name: impl Into<String>, params: impl Into<String>) -> Self {
        let params = params.into();
        let after_name = if params.is_empty() { "" } else { " " };
        Self {
            name: name.into(),
            params,
            nodes: None,
            raws: Raws {
                after_name: after_name.to_string(),
                ..Default::default()
            },
            source: None,
        }
    }

    /// True when the name is `name`, ignoring ASCII case.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            nodes: Vec::new(),
            raws: Raws {
                between: " ".to_string(),
                ..Default::default()
            },
            source: None,
        }
    }
}

impl Declaration {
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            raws: Raws {
                between: ": ".to_string(),
                ..Default::default()
            },
            source: None,
        }
    }
}

impl Node {
    pub fn raws(&self) -> &Raws {
        match self {
            Node::AtRule(node) => &node.raws,
            Node::Rule(node) => &node.raws,
            Node::Decl(node) => &node.raws,
            Node::Comment(node) => &node.raws,
        }
    }

    pub fn raws_mut(&mut self) -> &mut Raws {
        match self {
            Node::AtRule(node) => &mut node.raws,
            Node::Rule(node) => &mut node.raws,
            Node::Decl(node) => &mut node.raws,
            Node::Comment(node) => &mut node.raws,
        }
    }

    pub fn source(&self) -> Option<Position> {
        match self {
            Node::AtRule(node) => node.source,
            Node::Rule(node) => node.source,
            Node::Decl(node) => node.source,
            Node::Comment(node) => node.source,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            Node::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    /// Child nodes, if this node owns a block.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::AtRule(node) => node.nodes.as_deref(),
            Node::Rule(node) => Some(&node.nodes),
            Node::Decl(_) | Node::Comment(_) => None,
        }
    }
}

impl Root {
    /// Removes the top-level nodes at `indices`, which must be ascending.
    ///
    /// When the first node goes away, its `before` text moves to the node
    /// that becomes first, so the document's leading text is not lost.
    pub fn remove_nodes(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let leading = self
            .nodes
            .first()
            .map(|node| node.raws().before.clone())
            .unwrap_or_default();
        let first_removed = indices.first() == Some(&0);

        let mut pending = indices.iter().copied().peekable();
        let mut index = 0;
        self.nodes.retain(|_| {
            let remove = pending.next_if_eq(&index).is_some();
            index += 1;
            !remove
        });

        if first_removed {
            if let Some(first) = self.nodes.first_mut() {
                first.raws_mut().before = leading;
            }
        }
    }

    /// Inserts `nodes` ahead of every existing top-level node, one per line.
    pub fn prepend(&mut self, mut nodes: Vec<Node>) {
        if nodes.is_empty() {
            return;
        }
        let leading = self
            .nodes
            .first_mut()
            .map(|first| std::mem::replace(&mut first.raws_mut().before, "\n".to_string()))
            .unwrap_or_default();

        for (i, node) in nodes.iter_mut().enumerate() {
            node.raws_mut().before = if i == 0 {
                leading.clone()
            } else {
                "\n".to_string()
            };
        }
        self.nodes.splice(0..0, nodes);
    }
}
