use crate::{
    ast::{
        expressions::BUILTIN_OPERATORS,
        statements::{Function, Item, OperatorKind, Prototype},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Keyword, TokenKind},
};

use super::{expr::parse_expr, parser::Parser};

const MIN_PRECEDENCE: i32 = 1;
const MAX_PRECEDENCE: i32 = 100;

/// prototype ::= identifier '(' identifier* ')'
///           ::= 'unary' op '(' identifier ')'
///           ::= 'binary' op number? '(' identifier identifier ')'
pub fn parse_prototype(parser: &mut Parser<'_>) -> Result<Prototype, Error> {
    let token = *parser.current_token();
    let position = token.position;

    let kind = match token.keyword {
        Some(Keyword::Unary) => OperatorKind::Unary,
        Some(Keyword::Binary) => OperatorKind::Binary,
        _ if token.kind == TokenKind::Identifier => OperatorKind::None,
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: String::from("function name in prototype"),
                    found: token.to_string(),
                },
                position,
            ))
        }
    };
    parser.advance();

    let mut operator = None;
    let mut precedence = None;
    if kind != OperatorKind::None {
        let op_position = parser.get_position();
        let op = parse_operator_char(parser)?;

        if kind == OperatorKind::Binary {
            if BUILTIN_OPERATORS.contains(&op) {
                return Err(Error::new(
                    ErrorImpl::BuiltinOperator {
                        operator: op.to_string(),
                    },
                    op_position,
                ));
            }
            if parser.current_token_kind() == TokenKind::Number {
                precedence = Some(parse_precedence(parser)?);
            }
        }
        operator = Some(op);
    }

    parser.expect(TokenKind::LeftParen, "(")?;
    let mut params = vec![];
    while parser.current_token_kind() == TokenKind::Identifier {
        params.push(parser.advance().lexeme.to_string());
    }
    parser.expect(TokenKind::RightParen, ")")?;

    match (kind, operator) {
        (OperatorKind::None, _) | (_, None) => Ok(Prototype::new(token.lexeme, params, position)),
        (kind, Some(op)) => {
            let expected = if kind == OperatorKind::Unary { 1 } else { 2 };
            if params.len() != expected {
                return Err(Error::new(
                    ErrorImpl::InvalidOperandCount {
                        operator: op.to_string(),
                        expected,
                        received: params.len(),
                    },
                    position,
                ));
            }

            Ok(Prototype::operator(kind, op, params, precedence, position))
        }
    }
}

fn parse_operator_char(parser: &mut Parser<'_>) -> Result<char, Error> {
    let token = *parser.current_token();

    // `=` is reserved for assignment
    match token.operator() {
        Some(op) if token.kind != TokenKind::Equal => {
            parser.advance();
            Ok(op)
        }
        _ => Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from("operator"),
                found: token.to_string(),
            },
            token.position,
        )),
    }
}

fn parse_precedence(parser: &mut Parser<'_>) -> Result<i32, Error> {
    let token = parser.advance();

    match token.lexeme.parse::<i32>() {
        Ok(value) if (MIN_PRECEDENCE..=MAX_PRECEDENCE).contains(&value) => Ok(value),
        _ => Err(Error::new(
            ErrorImpl::InvalidPrecedence {
                value: token.lexeme.to_string(),
            },
            token.position,
        )),
    }
}

/// definition ::= 'def' prototype expression
///
/// The prototype is registered before the body is parsed, so the body can
/// already use a freshly declared operator.
pub fn parse_definition(parser: &mut Parser<'_>) -> Result<Item, Error> {
    parser.advance();

    let prototype = parse_prototype(parser)?;
    parser.register_prototype(&prototype)?;
    let body = parse_expr(parser)?;

    Ok(Item::Definition(Function {
        prototype,
        body: vec![body],
    }))
}

/// external ::= 'extern' prototype
pub fn parse_extern(parser: &mut Parser<'_>) -> Result<Item, Error> {
    parser.advance();

    let prototype = parse_prototype(parser)?;
    parser.register_prototype(&prototype)?;

    Ok(Item::Extern(prototype))
}

/// toplevelexpr ::= expression
pub fn parse_top_level_expr(parser: &mut Parser<'_>) -> Result<Item, Error> {
    let position = parser.get_position();
    let body = parse_expr(parser)?;

    let name = match parser.previous_token() {
        Some(token) if token.is_identifier("main") => "main",
        _ => "",
    };

    Ok(Item::Expression(Function {
        prototype: Prototype::new(name, vec![], position),
        body: vec![body],
    }))
}
