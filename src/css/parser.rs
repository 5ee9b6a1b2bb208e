//! Lossless stylesheet parser.
//!
//! The `cssparser` tokenizer does the lexing (strings, escapes, comments,
//! balanced `()`/`[]` groups); this module groups its tokens into
//! statements and blocks and keeps every byte of whitespace in [`Raws`] so
//! that an unmodified tree prints back to exactly the source text.

use cssparser::{ParseError, ParseErrorKind, Parser, ParserInput, SourceLocation, SourcePosition, Token};
use std::mem::take;
use thiserror::Error;

use super::node::{AtRule, Comment, Declaration, Node, Position, RawValue, Raws, Root, Rule};
use crate::errors::{TransformError, TransformResult};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Unexpected '}}'")]
    UnexpectedCloseBrace,
    #[error("Unknown word '{0}'")]
    UnknownWord(String),
}

type BlockResult<'i, T> = Result<T, ParseError<'i, SyntaxError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    Block,
    End,
}

/// Where a statement stops and, if any, where its first top-level `:` sits.
struct Statement {
    end: SourcePosition,
    colon: Option<(SourcePosition, SourcePosition)>,
    terminator: Terminator,
}

/// Parses a whole stylesheet into a [`Root`].
pub fn parse_stylesheet(css: &str) -> TransformResult<Root> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let (nodes, after) = parse_block(&mut parser).map_err(|e| {
        let message = match e.kind {
            ParseErrorKind::Custom(error) => error.to_string(),
            ParseErrorKind::Basic(kind) => format!("{:?}", kind),
        };
        TransformError::CssParse {
            message,
            line: e.location.line + 1,
            column: e.location.column,
        }
    })?;

    tracing::debug!(nodes = nodes.len(), "parsed stylesheet");
    Ok(Root {
        nodes,
        raws: Raws {
            after,
            ..Default::default()
        },
    })
}

fn position(location: SourceLocation) -> Option<Position> {
    Some(Position {
        line: location.line + 1,
        column: location.column,
    })
}

fn syntax_error<'i>(error: SyntaxError, location: SourceLocation) -> ParseError<'i, SyntaxError> {
    ParseError {
        kind: ParseErrorKind::Custom(error),
        location,
    }
}

fn split_leading_ws(text: &str) -> (String, &str) {
    let rest = text.trim_start();
    (text[..text.len() - rest.len()].to_string(), rest)
}

fn split_trailing_ws(text: &str) -> (String, String) {
    let kept = text.trim_end();
    (kept.to_string(), text[kept.len()..].to_string())
}

/// Parses the children of the root or of a `{}` block.
/// Returns the nodes and the text left after the last one.
fn parse_block<'i>(parser: &mut Parser<'i, '_>) -> BlockResult<'i, (Vec<Node>, String)> {
    let mut nodes = Vec::new();
    let mut before = String::new();

    loop {
        let state = parser.state();
        let start = parser.position();
        let location = parser.current_source_location();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            // Stray semicolons are kept as plain text so they print back.
            Token::WhiteSpace(_) | Token::Semicolon => before.push_str(parser.slice_from(start)),
            Token::Comment(text) => nodes.push(Node::Comment(Comment {
                text: text.to_string(),
                raws: Raws {
                    before: take(&mut before),
                    ..Default::default()
                },
                source: position(location),
            })),
            Token::CloseCurlyBracket => {
                return Err(syntax_error(SyntaxError::UnexpectedCloseBrace, location));
            }
            Token::AtKeyword(name) => {
                let mut at_rule = parse_at_rule(parser, name.to_string())?;
                at_rule.raws.before = take(&mut before);
                at_rule.source = position(location);
                nodes.push(Node::AtRule(at_rule));
            }
            _ => {
                parser.reset(&state);
                let mut node = parse_rule_or_decl(parser)?;
                node.raws_mut().before = take(&mut before);
                nodes.push(node);
            }
        }
    }

    Ok((nodes, before))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PieceKind {
    Space,
    Comment,
    Other,
}

/// An at-rule prelude split the way it is stored on the node.
struct Prelude {
    after_name: String,
    params: String,
    raw_params: Option<RawValue>,
    between: String,
}

fn prelude_pieces(prelude: &str) -> Vec<(PieceKind, &str)> {
    let mut input = ParserInput::new(prelude);
    let mut parser = Parser::new(&mut input);
    let mut pieces = Vec::new();
    loop {
        let start = parser.position();
        let (kind, opens_block) = match parser.next_including_whitespace_and_comments() {
            Ok(Token::WhiteSpace(_)) => (PieceKind::Space, false),
            Ok(Token::Comment(_)) => (PieceKind::Comment, false),
            Ok(
                Token::Function(_)
                | Token::ParenthesisBlock
                | Token::SquareBracketBlock
                | Token::CurlyBracketBlock,
            ) => (PieceKind::Other, true),
            Ok(_) => (PieceKind::Other, false),
            Err(_) => break,
        };
        // A group is one piece, comments inside it included.
        if opens_block {
            let _ = parser.parse_nested_block(|block| {
                while block.next_including_whitespace_and_comments().is_ok() {}
                Ok::<_, ParseError<'_, ()>>(())
            });
        }
        pieces.push((kind, parser.slice_from(start)));
    }
    pieces
}

fn concat(pieces: &[(PieceKind, &str)]) -> String {
    pieces.iter().map(|(_, text)| *text).collect()
}

/// Whitespace and comments at either end of the prelude go to the raws.
/// Inside the params, a comment touching whitespace is dropped from the
/// value and the untouched text is kept as the raw params.
fn split_prelude(prelude: &str) -> Prelude {
    let pieces = prelude_pieces(prelude);
    let end = pieces
        .iter()
        .rposition(|(kind, _)| *kind == PieceKind::Other)
        .map_or(0, |i| i + 1);
    let start = pieces[..end]
        .iter()
        .position(|(kind, _)| *kind == PieceKind::Other)
        .unwrap_or(end);
    let middle = &pieces[start..end];

    let mut params = String::new();
    let mut clean = true;
    for (i, (kind, text)) in middle.iter().enumerate() {
        if *kind != PieceKind::Comment {
            params.push_str(text);
            continue;
        }
        // Both ends of `middle` are `Other`, so a comment always has neighbours.
        let prev = i.checked_sub(1).map(|j| middle[j].0);
        let next = middle.get(i + 1).map(|piece| piece.0);
        let touches_space = prev == Some(PieceKind::Space) || next == Some(PieceKind::Space);
        if touches_space || params.ends_with(',') {
            clean = false;
        } else {
            params.push_str(text);
        }
    }

    let raw_params = (!clean).then(|| RawValue {
        value: params.clone(),
        raw: concat(middle),
    });
    Prelude {
        after_name: concat(&pieces[..start]),
        params,
        raw_params,
        between: concat(&pieces[end..]),
    }
}

fn scan_statement<'i>(parser: &mut Parser<'i, '_>) -> BlockResult<'i, Statement> {
    let mut colon = None;
    loop {
        let position = parser.position();
        let location = parser.current_source_location();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => {
                return Ok(Statement {
                    end: position,
                    colon,
                    terminator: Terminator::End,
                });
            }
        };
        match token {
            Token::Semicolon => {
                return Ok(Statement {
                    end: position,
                    colon,
                    terminator: Terminator::Semicolon,
                });
            }
            Token::CurlyBracketBlock => {
                return Ok(Statement {
                    end: position,
                    colon,
                    terminator: Terminator::Block,
                });
            }
            Token::CloseCurlyBracket => {
                return Err(syntax_error(SyntaxError::UnexpectedCloseBrace, location));
            }
            Token::Colon if colon.is_none() => colon = Some((position, parser.position())),
            _ => {}
        }
    }
}

fn parse_at_rule<'i>(parser: &mut Parser<'i, '_>, name: String) -> BlockResult<'i, AtRule> {
    let prelude_start = parser.position();
    let statement = scan_statement(parser)?;

    let prelude = split_prelude(parser.slice(prelude_start..statement.end));
    let mut raws = Raws {
        after_name: prelude.after_name,
        between: prelude.between,
        params: prelude.raw_params,
        semicolon: statement.terminator == Terminator::Semicolon,
        ..Default::default()
    };

    let nodes = if statement.terminator == Terminator::Block {
        let (nodes, after) = parser.parse_nested_block(|block| parse_block(block))?;
        raws.after = after;
        Some(nodes)
    } else {
        None
    };

    Ok(AtRule {
        name,
        params: prelude.params,
        nodes,
        raws,
        source: None,
    })
}

fn parse_rule_or_decl<'i>(parser: &mut Parser<'i, '_>) -> BlockResult<'i, Node> {
    let start = parser.position();
    let location = parser.current_source_location();
    let statement = scan_statement(parser)?;
    let text = parser.slice(start..statement.end);

    if statement.terminator == Terminator::Block {
        let (selector, between) = split_trailing_ws(text);
        let (nodes, after) = parser.parse_nested_block(|block| parse_block(block))?;
        return Ok(Node::Rule(Rule {
            selector,
            nodes,
            raws: Raws {
                between,
                after,
                ..Default::default()
            },
            source: position(location),
        }));
    }

    let colon = match statement.colon {
        Some(colon) => colon,
        None => {
            return Err(syntax_error(
                SyntaxError::UnknownWord(text.trim().to_string()),
                location,
            ));
        }
    };

    let (prop, prop_ws) = split_trailing_ws(parser.slice(start..colon.0));
    let (value_ws, rest) = split_leading_ws(parser.slice(colon.1..statement.end));
    let (value, after) = split_trailing_ws(rest);

    Ok(Node::Decl(Declaration {
        prop,
        value,
        raws: Raws {
            between: format!("{prop_ws}:{value_ws}"),
            after,
            semicolon: statement.terminator == Terminator::Semicolon,
            ..Default::default()
        },
        source: position(location),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(css: &str) {
        let root = parse_stylesheet(css).unwrap();
        assert_eq!(root.to_string(), css);
    }

    #[test]
    fn parse_import_statement() {
        let root = parse_stylesheet("@IMPORT   'a.css'  screen ;\n").unwrap();

        assert_eq!(root.nodes.len(), 1);
        let at_rule = root.nodes[0].as_at_rule().unwrap();
        assert_eq!(at_rule.name, "IMPORT");
        assert_eq!(at_rule.params, "'a.css'  screen");
        assert_eq!(at_rule.raws.after_name, "   ");
        assert_eq!(at_rule.raws.between, " ");
        assert!(at_rule.raws.semicolon);
        assert!(at_rule.nodes.is_none());
        assert_eq!(root.raws.after, "\n");
    }

    #[test]
    fn parse_at_rule_without_semicolon_takes_block() {
        let root = parse_stylesheet("@import url('http://') :root{}").unwrap();
        let at_rule = root.nodes[0].as_at_rule().unwrap();

        assert_eq!(at_rule.params, "url('http://') :root");
        assert_eq!(at_rule.nodes.as_deref(), Some(&[][..]));
    }

    #[test]
    fn parse_nested_rules_and_declarations() {
        let root = parse_stylesheet(".foo {\n  color: red;\n  @import 'path.css';\n}\n").unwrap();
        let Node::Rule(rule) = &root.nodes[0] else {
            panic!("expected a rule");
        };

        assert_eq!(rule.selector, ".foo");
        assert_eq!(rule.nodes.len(), 2);
        let Node::Decl(decl) = &rule.nodes[0] else {
            panic!("expected a declaration");
        };
        assert_eq!(decl.prop, "color");
        assert_eq!(decl.value, "red");
        assert!(rule.nodes[1].as_at_rule().is_some());
    }

    #[test]
    fn records_source_positions() {
        let root = parse_stylesheet("a {}\n  @import 'b.css';").unwrap();

        assert_eq!(root.nodes[0].source(), Some(Position { line: 1, column: 1 }));
        assert_eq!(root.nodes[1].source(), Some(Position { line: 2, column: 3 }));
    }

    #[test]
    fn round_trips_source_text() {
        round_trip("");
        round_trip("\n\n  ");
        round_trip("@import url( spaces.css ) print, screen and (min-width: 25em);\n.foo {}\n");
        round_trip("/* head */\n@charset \"utf-8\";\n.a:hover , .b { color : red ; margin:0 }\n");
        round_trip("@media screen {\n  .a { background: url(x;y.png) }\n}\n");
        round_trip("@import-normalize;\n@import-normalize url();\n");
        round_trip(".a { b: c; };\n");
        round_trip("@import 'a.css'");
        round_trip("@import /* x */ 'a.css' /* c */ screen /* y */ ;\n");
        round_trip("@import /* only a comment */;\n@import ;\n");
        round_trip("@media /* a */ (min-width: /* b */ 1px) /* c */ {}\n");
    }

    #[test]
    fn reject_stray_close_brace() {
        let err = parse_stylesheet("a {}\n}").unwrap_err();
        assert!(matches!(
            err,
            TransformError::CssParse { line: 2, column: 1, .. }
        ));
    }

    #[test]
    fn parse_top_level_declaration() {
        let root = parse_stylesheet("@import 'a.css';\ncolor : red;\n").unwrap();
        let Node::Decl(decl) = &root.nodes[1] else {
            panic!("expected a declaration");
        };

        assert_eq!(decl.prop, "color");
        assert_eq!(decl.value, "red");
        assert_eq!(decl.raws.between, " : ");
    }

    #[test]
    fn reject_top_level_unknown_word() {
        let err = parse_stylesheet("foo bar;").unwrap_err();
        assert!(err.to_string().contains("Unknown word 'foo bar'"));
    }

    #[test]
    fn comments_around_params_move_to_raws() {
        let root = parse_stylesheet("@import /* x */ 'a.css' /* c */ screen /* y */;").unwrap();
        let at_rule = root.nodes[0].as_at_rule().unwrap();

        assert_eq!(at_rule.raws.after_name, " /* x */ ");
        assert_eq!(at_rule.params, "'a.css'  screen");
        assert_eq!(at_rule.raws.between, " /* y */");
        assert_eq!(
            at_rule.raws.params,
            Some(RawValue {
                value: "'a.css'  screen".to_string(),
                raw: "'a.css' /* c */ screen".to_string(),
            })
        );
    }

    #[test]
    fn groups_stay_whole_in_params() {
        let root = parse_stylesheet("@import 'a.css' (min-width: 1px) ;").unwrap();
        let at_rule = root.nodes[0].as_at_rule().unwrap();

        assert_eq!(at_rule.params, "'a.css' (min-width: 1px)");
        assert_eq!(at_rule.raws.between, " ");
    }

    #[test]
    fn comments_between_words_stay_in_params() {
        let root = parse_stylesheet("@import 'a.css'/* c */screen;").unwrap();
        let at_rule = root.nodes[0].as_at_rule().unwrap();

        assert_eq!(at_rule.params, "'a.css'/* c */screen");
        assert!(at_rule.raws.params.is_none());
    }

    #[test]
    fn reject_declaration_without_colon() {
        assert!(parse_stylesheet(".a { color red; }").is_err());
    }
}
