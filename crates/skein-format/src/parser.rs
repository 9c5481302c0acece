use crate::ast::{Document, Field, FieldValue, Scalar, Span};
use crate::diagnostics::Diagnostic;
use crate::lexer::Token;

/// Parse a token stream into a [`Document`].
///
/// The grammar is a flat field list: `ident ':' scalar`, `ident '{' fields '}'`,
/// or the colon-block form `ident ':' '{' fields '}'`. Unexpected tokens are
/// reported and skipped so one bad field does not hide the rest of the file
/// from the editor.
pub fn parse(tokens: &[(Token, Span)]) -> (Document, Vec<Diagnostic>) {
    let mut parser = Parser {
        tokens,
        pos: 0,
        diagnostics: Vec::new(),
    };
    let fields = parser.fields(None);
    (Document { fields }, parser.diagnostics)
}

struct Parser<'t> {
    tokens: &'t [(Token, Span)],
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn bump(&mut self) -> Option<&'t (Token, Span)> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Span of the current token, or an empty span at end of input.
    fn here(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, span)) => span.clone(),
            None => {
                let end = self.tokens.last().map(|(_, s)| s.end).unwrap_or(0);
                end..end
            }
        }
    }

    fn prev_end(&self) -> usize {
        if self.pos == 0 {
            0
        } else {
            self.tokens[self.pos - 1].1.end
        }
    }

    /// Parse fields until end of input, or until the `}` closing `open_brace`.
    fn fields(&mut self, open_brace: Option<Span>) -> Vec<Field> {
        let mut fields = Vec::new();
        loop {
            match self.peek() {
                None => {
                    if let Some(span) = open_brace {
                        self.diagnostics.push(
                            Diagnostic::error(span, "unclosed block (missing '}')")
                                .with_label("opened here"),
                        );
                    }
                    break;
                }
                Some(Token::RBrace) => {
                    let span = self.here();
                    self.bump();
                    if open_brace.is_some() {
                        break;
                    }
                    self.diagnostics
                        .push(Diagnostic::error(span, "unmatched '}'"));
                }
                Some(Token::Ident(_)) => {
                    if let Some(field) = self.field() {
                        fields.push(field);
                    }
                }
                Some(other) => {
                    let span = self.here();
                    self.diagnostics.push(Diagnostic::error(
                        span,
                        format!("expected field name, found {other}"),
                    ));
                    self.bump();
                }
            }
        }
        fields
    }

    fn field(&mut self) -> Option<Field> {
        let (name, start) = match self.bump() {
            Some((Token::Ident(name), span)) => (name.clone(), span.clone()),
            _ => return None,
        };

        match self.peek() {
            Some(Token::Colon) => {
                self.bump();
                self.value(name, start)
            }
            Some(Token::LBrace) => {
                let open = self.here();
                self.bump();
                let children = self.fields(Some(open));
                Some(Field {
                    name,
                    value: FieldValue::Message(children),
                    span: start.start..self.prev_end(),
                })
            }
            _ => {
                let span = self.here();
                self.diagnostics.push(Diagnostic::error(
                    span,
                    format!("expected ':' or '{{' after \"{name}\""),
                ));
                None
            }
        }
    }

    fn value(&mut self, name: String, start: Span) -> Option<Field> {
        let value = match self.peek() {
            Some(Token::LBrace) => {
                let open = self.here();
                self.bump();
                FieldValue::Message(self.fields(Some(open)))
            }
            Some(Token::Str(s)) => {
                let s = s.clone();
                self.bump();
                FieldValue::Scalar(Scalar::Str(s))
            }
            Some(Token::Number(n)) => {
                let n = n.clone();
                self.bump();
                FieldValue::Scalar(Scalar::Number(n))
            }
            Some(Token::Ident(w)) => {
                let w = w.clone();
                self.bump();
                FieldValue::Scalar(Scalar::Word(w))
            }
            _ => {
                let span = self.here();
                self.diagnostics.push(Diagnostic::error(
                    span,
                    format!("expected value after \"{name}:\""),
                ));
                return None;
            }
        };
        Some(Field {
            name,
            value,
            span: start.start..self.prev_end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast;
    use crate::lexer::lex;

    fn parse_str(source: &str) -> (Document, Vec<Diagnostic>) {
        let (tokens, lex_errors) = lex(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        parse(&tokens)
    }

    #[test]
    fn parse_scalar_and_message() {
        let (doc, diags) = parse_str("name: \"main\"\ninstances {\n  id: \"hero\"\n}");
        assert!(diags.is_empty(), "diags: {diags:?}");
        assert_eq!(doc.fields.len(), 2);
        assert_eq!(ast::find_str(&doc.fields, "name"), Some("main"));

        let children = doc.fields[1].children().unwrap();
        assert_eq!(ast::find_str(children, "id"), Some("hero"));
    }

    #[test]
    fn parse_colon_block_form() {
        let (doc, diags) = parse_str("data: {\n  id: \"x\"\n}");
        assert!(diags.is_empty());
        assert!(doc.fields[0].children().is_some());
    }

    #[test]
    fn parse_nested_blocks() {
        let source = "embedded_instances {\n  id: \"camera\"\n  data {\n    components {\n      id: \"follow\"\n    }\n  }\n}";
        let (doc, diags) = parse_str(source);
        assert!(diags.is_empty());
        let outer = doc.fields[0].children().unwrap();
        let data = outer[1].children().unwrap();
        let component = data[0].children().unwrap();
        assert_eq!(ast::find_str(component, "id"), Some("follow"));
    }

    #[test]
    fn parse_word_scalar() {
        let (doc, diags) = parse_str("type: sprite");
        assert!(diags.is_empty());
        assert_eq!(doc.fields[0].as_text(), Some("sprite"));
    }

    #[test]
    fn unclosed_block_is_reported() {
        let (doc, diags) = parse_str("instances {\n  id: \"hero\"");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("unclosed block"));
        // The partial field list is still produced.
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.fields[0].children().map(<[Field]>::len), Some(1));
    }

    #[test]
    fn unmatched_close_is_reported_and_skipped() {
        let (doc, diags) = parse_str("}\nname: \"main\"");
        assert_eq!(diags.len(), 1);
        assert_eq!(doc.fields.len(), 1);
    }

    #[test]
    fn stray_tokens_are_reported_and_skipped() {
        let (doc, diags) = parse_str(": {\nname: \"main\"\n}");
        // ':' then '{' have no field name; 'name' still parses, the trailing
        // '}' is unmatched.
        assert_eq!(diags.len(), 3);
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(ast::find_str(&doc.fields, "name"), Some("main"));
    }

    #[test]
    fn field_span_covers_value() {
        let source = "name: \"main\"";
        let (doc, _) = parse_str(source);
        assert_eq!(doc.fields[0].span, 0..source.len());
    }
}
