use crate::{
    ast::expressions::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Keyword, Token, TokenKind},
    Position,
};

use super::{lookups::LookupKey, parser::Parser};

/// expression ::= unary binoprhs
pub fn parse_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let lhs = parse_unary(parser)?;
    parse_bin_op_rhs(parser, 0, lhs)
}

pub fn unexpected_token(token: &Token<'_>) -> Error {
    if token.kind == TokenKind::Unexpected {
        Error::new(
            ErrorImpl::UnrecognisedToken {
                token: token.lexeme.to_string(),
            },
            token.position,
        )
    } else {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.to_string(),
            },
            token.position,
        )
    }
}

pub fn parse_primary(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let handler = parser
        .get_nud_lookup()
        .get(&LookupKey::from(parser.current_token()))
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => Err(unexpected_token(parser.current_token())),
    }
}

/// unary ::= primary | op unary
pub fn parse_unary(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let token = *parser.current_token();

    match token.operator() {
        Some(op) if token.kind != TokenKind::Equal => {
            parser.advance();
            let operand = parse_unary(parser)?;
            Ok(Expr::unary(op, operand))
        }
        _ => parse_primary(parser),
    }
}

/// binoprhs ::= (op unary)*
///
/// Consumes operators binding at least as tightly as `min_precedence`.
pub fn parse_bin_op_rhs(
    parser: &mut Parser<'_>,
    min_precedence: i32,
    lhs: Expr,
) -> Result<Expr, Error> {
    let mut lhs = lhs;

    loop {
        let precedence = parser.token_precedence();
        if precedence < min_precedence {
            return Ok(lhs);
        }

        let operator = parser.advance();
        let op = operator
            .operator()
            .ok_or_else(|| unexpected_token(&operator))?;

        let mut rhs = parse_unary(parser)?;

        // `=` absorbs an equal-precedence tail, which makes it right-associative
        let next_precedence = parser.token_precedence();
        if precedence < next_precedence || (op == '=' && precedence == next_precedence) {
            let absorb_from = if op == '=' { precedence } else { precedence + 1 };
            rhs = parse_bin_op_rhs(parser, absorb_from, rhs)?;
        }

        lhs = combine(op, lhs, rhs, operator.position)?;
    }
}

fn combine(op: char, lhs: Expr, rhs: Expr, position: Position) -> Result<Expr, Error> {
    if op != '=' {
        return Ok(Expr::binary(op, lhs, rhs));
    }

    match lhs {
        Expr::Variable(target) => Ok(Expr::assign(&target, rhs)),
        _ => Err(Error::new(ErrorImpl::InvalidAssignmentTarget, position)),
    }
}

/// numberexpr ::= number
pub fn parse_number_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let token = *parser.current_token();

    match token.lexeme.parse::<f64>() {
        Ok(value) => {
            parser.advance();
            Ok(Expr::Number(value))
        }
        Err(_) => Err(Error::new(
            ErrorImpl::NumberParseError {
                token: token.lexeme.to_string(),
            },
            token.position,
        )),
    }
}

/// parenexpr ::= '(' expression ')'
///
/// A missing `)` is reported where the inner expression ends, not at
/// whatever token (possibly `End` lines later) stands in its place.
pub fn parse_paren_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser)?;

    if parser.current_token_kind() != TokenKind::RightParen {
        let position = parser
            .previous_token()
            .map_or_else(|| parser.get_position(), |token| token.position);

        return Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from(")"),
                found: parser.current_token().to_string(),
            },
            position,
        ));
    }
    parser.advance();

    Ok(expr)
}

/// identifierexpr ::= identifier | identifier '(' (expression (',' expression)*)? ')'
pub fn parse_identifier_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let name = parser.advance().lexeme.to_string();

    if parser.current_token_kind() != TokenKind::LeftParen {
        return Ok(Expr::Variable(name));
    }
    parser.advance();

    let mut args = vec![];
    if parser.current_token_kind() != TokenKind::RightParen {
        loop {
            args.push(parse_expr(parser)?);

            if parser.current_token_kind() == TokenKind::RightParen {
                break;
            }
            if parser.current_token_kind() != TokenKind::Comma {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: parser.current_token().to_string(),
                        message: String::from("expected ')' or ',' in argument list"),
                    },
                    parser.get_position(),
                ));
            }
            parser.advance();
        }
    }
    parser.advance();

    Ok(Expr::call(&name, args))
}

/// ifexpr ::= 'if' expression 'then' expression 'else' expression
pub fn parse_if_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.advance();

    let condition = parse_expr(parser)?;
    parser.expect_keyword(Keyword::Then)?;
    let then_body = parse_expr(parser)?;
    parser.expect_keyword(Keyword::Else)?;
    let else_body = parse_expr(parser)?;

    Ok(Expr::If {
        condition: Box::new(condition),
        then_body: vec![then_body],
        else_body: vec![else_body],
    })
}

/// forexpr ::= 'for' identifier '=' expression ',' expression (',' expression)? 'in' expression
pub fn parse_for_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.advance();

    let var = parser
        .expect(TokenKind::Identifier, "identifier")?
        .lexeme
        .to_string();
    parser.expect(TokenKind::Equal, "=")?;
    let start = parse_expr(parser)?;
    parser.expect(TokenKind::Comma, ",")?;
    let end = parse_expr(parser)?;

    let step = if parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        Some(Box::new(parse_expr(parser)?))
    } else {
        None
    };

    parser.expect_keyword(Keyword::In)?;
    let body = parse_expr(parser)?;

    Ok(Expr::For {
        var,
        start: Box::new(start),
        end: Box::new(end),
        step,
        body: vec![body],
    })
}

/// varexpr ::= 'var' identifier ('=' expression)? (',' identifier ('=' expression)?)* 'in' expression
pub fn parse_var_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.advance();

    let mut bindings = vec![];
    loop {
        let name = parser
            .expect(TokenKind::Identifier, "identifier")?
            .lexeme
            .to_string();

        let initializer = if parser.current_token_kind() == TokenKind::Equal {
            parser.advance();
            Some(parse_expr(parser)?)
        } else {
            None
        };
        bindings.push((name, initializer));

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect_keyword(Keyword::In)?;
    let body = parse_expr(parser)?;

    Ok(Expr::Var {
        bindings,
        body: Box::new(body),
    })
}
