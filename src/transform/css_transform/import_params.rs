//! Tokenizing and reading `@import` parameter text.

use cssparser::{ParseError, Parser, ParserInput, Token};

/// One structural token of an at-rule's parameter text.
///
/// Every variant keeps its exact source text so a token sequence can be
/// printed back with [`stringify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamToken {
    /// A quoted string; `value` is unquoted and unescaped.
    String { value: String, raw: String },
    /// `name(args)`. Parenthesised groups have an empty name.
    Function {
        name: String,
        args: Vec<ParamToken>,
        raw: String,
    },
    Word(String),
    Space(String),
    Other(String),
}

/// The target and media text of one `@import`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    pub url: String,
    pub media: String,
}

impl ParamToken {
    pub fn raw(&self) -> &str {
        match self {
            ParamToken::String { raw, .. } | ParamToken::Function { raw, .. } => raw,
            ParamToken::Word(raw) | ParamToken::Space(raw) | ParamToken::Other(raw) => raw,
        }
    }
}

pub fn stringify(tokens: &[ParamToken]) -> String {
    tokens.iter().map(ParamToken::raw).collect()
}

pub fn tokenize(params: &str) -> Vec<ParamToken> {
    let mut input = ParserInput::new(params);
    let mut parser = Parser::new(&mut input);
    collect_tokens(&mut parser)
}

fn collect_tokens<'i>(parser: &mut Parser<'i, '_>) -> Vec<ParamToken> {
    let mut tokens = Vec::new();
    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        let token = match token {
            Token::WhiteSpace(_) => ParamToken::Space(parser.slice_from(start).to_string()),
            Token::QuotedString(value) => ParamToken::String {
                value: value.to_string(),
                raw: parser.slice_from(start).to_string(),
            },
            // `url(foo.css)`: the tokenizer already stripped the padding.
            Token::UnquotedUrl(value) => {
                let raw = parser.slice_from(start);
                let name = raw.split('(').next().unwrap_or_default();
                let args = if value.is_empty() {
                    Vec::new()
                } else {
                    vec![ParamToken::Word(value.to_string())]
                };
                ParamToken::Function {
                    name: name.trim_start().to_string(),
                    args,
                    raw: raw.to_string(),
                }
            }
            // `url(foo bar.css)`: unquoted whitespace makes a bad url token.
            Token::BadUrl(_) => {
                let raw = parser.slice_from(start);
                let (name, inner) = raw.split_once('(').unwrap_or((raw, ""));
                let inner = inner.strip_suffix(')').unwrap_or(inner).trim();
                let args = if inner.is_empty() {
                    Vec::new()
                } else {
                    vec![ParamToken::Word(inner.to_string())]
                };
                ParamToken::Function {
                    name: name.trim_start().to_string(),
                    args,
                    raw: raw.to_string(),
                }
            }
            Token::Function(name) => nested_function(parser, name.to_string(), start),
            Token::ParenthesisBlock => nested_function(parser, String::new(), start),
            Token::Ident(_)
            | Token::AtKeyword(_)
            | Token::Hash(_)
            | Token::IDHash(_)
            | Token::Number { .. }
            | Token::Percentage { .. }
            | Token::Dimension { .. } => ParamToken::Word(parser.slice_from(start).to_string()),
            _ => ParamToken::Other(parser.slice_from(start).to_string()),
        };
        tokens.push(token);
    }
    tokens
}

fn nested_function<'i>(
    parser: &mut Parser<'i, '_>,
    name: String,
    start: cssparser::SourcePosition,
) -> ParamToken {
    let args = parser
        .parse_nested_block(|block| Ok::<_, ParseError<'i, ()>>(collect_tokens(block)))
        .unwrap_or_default();
    ParamToken::Function {
        name,
        args: trim_spaces(args),
        raw: parser.slice_from(start).to_string(),
    }
}

fn trim_spaces(mut tokens: Vec<ParamToken>) -> Vec<ParamToken> {
    while matches!(tokens.last(), Some(ParamToken::Space(_))) {
        tokens.pop();
    }
    let leading = tokens
        .iter()
        .take_while(|token| matches!(token, ParamToken::Space(_)))
        .count();
    tokens.drain(..leading);
    tokens
}

fn url_of(token: &ParamToken) -> String {
    match token {
        ParamToken::Function { name, args, .. } if name.eq_ignore_ascii_case("url") => {
            match args.first() {
                Some(ParamToken::String { value, .. }) => value.clone(),
                _ => stringify(args),
            }
        }
        ParamToken::String { value, .. } => value.clone(),
        _ => String::new(),
    }
}

/// Reads the import target and the trailing media text out of `@import`
/// params. Returns `None` when no usable URL leads the params.
pub fn parse_import_params(params: &str) -> Option<ParsedImport> {
    let tokens = tokenize(params.trim());
    let (first, rest) = tokens.split_first()?;

    let url = url_of(first);
    if url.trim().is_empty() {
        return None;
    }

    Some(ParsedImport {
        url,
        media: stringify(rest).trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(url: &str, media: &str) -> Option<ParsedImport> {
        Some(ParsedImport {
            url: url.to_string(),
            media: media.to_string(),
        })
    }

    #[test]
    fn quoted_string_imports() {
        assert_eq!(parse_import_params(r#""foo.css""#), parsed("foo.css", ""));
        assert_eq!(parse_import_params("'bar.css'"), parsed("bar.css", ""));
        assert_eq!(parse_import_params(r#""foobar.css"screen"#), parsed("foobar.css", "screen"));
    }

    #[test]
    fn url_function_imports() {
        assert_eq!(parse_import_params("url(baz.css)"), parsed("baz.css", ""));
        assert_eq!(parse_import_params(r#"url("foobar.css")"#), parsed("foobar.css", ""));
        assert_eq!(parse_import_params("URL('FOO.css')"), parsed("FOO.css", ""));
        assert_eq!(parse_import_params("url(   spaces.css   )"), parsed("spaces.css", ""));
        assert_eq!(parse_import_params("url( 'padded.css' )"), parsed("padded.css", ""));
        assert_eq!(
            parse_import_params("url('other-query.css?foo=1&bar=1#hash')"),
            parsed("other-query.css?foo=1&bar=1#hash", "")
        );
    }

    #[test]
    fn bad_url_keeps_inner_text() {
        assert_eq!(parse_import_params("url(foo bar.css)"), parsed("foo bar.css", ""));
        assert_eq!(
            parse_import_params("url( foo bar.css ) print"),
            parsed("foo bar.css", "print")
        );
    }

    #[test]
    fn media_text_is_kept_verbatim() {
        assert_eq!(
            parse_import_params("url('foobarbaz.css') print, screen and (min-width: 25em)"),
            parsed("foobarbaz.css", "print, screen and (min-width: 25em)")
        );
        assert_eq!(
            parse_import_params("url('other.css') (min-width: 100px)"),
            parsed("other.css", "(min-width: 100px)")
        );
        assert_eq!(parse_import_params(r#""foo.css" SCREEN"#), parsed("foo.css", "SCREEN"));
    }

    #[test]
    fn unusable_urls() {
        for params in ["foo-bar", "", "''", r#""""#, r#"" ""#, "url()", "url('')", r#"url("")"#] {
            assert_eq!(parse_import_params(params), None, "params: {params}");
        }
    }

    #[test]
    fn tokenize_separates_leading_function() {
        let tokens = tokenize("url(a.css) screen");

        assert!(matches!(&tokens[0], ParamToken::Function { name, .. } if name == "url"));
        assert!(matches!(&tokens[1], ParamToken::Space(_)));
        assert_eq!(tokens[2], ParamToken::Word("screen".to_string()));
        assert_eq!(stringify(&tokens), "url(a.css) screen");
    }

    #[test]
    fn parenthesised_groups_are_nameless_functions() {
        let tokens = tokenize("(min-width: 25em)");
        let ParamToken::Function { name, args, raw } = &tokens[0] else {
            panic!("expected a function token");
        };

        assert_eq!(name, "");
        assert_eq!(raw, "(min-width: 25em)");
        assert_eq!(stringify(args), "min-width: 25em");
    }
}
