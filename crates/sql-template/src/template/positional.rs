//! Named-to-positional placeholder rewriting
//!
//! Drivers such as sqlx bind by position. The resolved SQL is scanned once;
//! each `@name` (MySQL) or `:name` (Oracle) outside quotes and comments is
//! replaced by the dialect's positional placeholder and its value appended.
//!
//! Lexing follows the dialect: MySQL honors backslash escapes in string
//! literals, `#` line comments, and treats `--` as a comment only when
//! whitespace follows. Oracle has none of these.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

use crate::dialect::Dialect;
use crate::error::{TemplateError, TemplateResult};
use crate::params::Parameters;

/// Resolved SQL ready for a positional driver
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalQuery {
    pub sql: String,
    pub values: Vec<Value>,
    pub dialect: Dialect,
}

pub(crate) fn to_positional(
    sql: &str,
    parameters: &Parameters,
    dialect: Dialect,
) -> TemplateResult<PositionalQuery> {
    let prefix = dialect.parameter_prefix();
    let mut out = String::with_capacity(sql.len());
    let mut values = Vec::new();
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' | '`' => {
                let backslash_escapes = dialect.is_mysql() && c != '`';
                copy_quoted(c, &mut chars, &mut out, backslash_escapes)
            }
            '-' if starts_dash_comment(&chars, dialect) => {
                copy_until(&mut chars, &mut out, c, "\n")
            }
            '#' if dialect.is_mysql() => copy_until(&mut chars, &mut out, c, "\n"),
            '/' if chars.peek() == Some(&'*') => copy_until(&mut chars, &mut out, c, "*/"),
            _ if c == prefix => {
                // `@@session_var` and `::type` casts are not parameters
                if chars.peek() == Some(&prefix) {
                    out.push(c);
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                    continue;
                }
                if !chars.peek().is_some_and(|n| is_ident_start(*n)) {
                    out.push(c);
                    continue;
                }

                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if !is_ident_char(n) {
                        break;
                    }
                    name.push(n);
                    chars.next();
                }

                let value = parameters
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| TemplateError::MissingParameter { name: name.clone() })?;
                values.push(value);
                out.push_str(&dialect.positional_placeholder(values.len()));
            }
            _ => out.push(c),
        }
    }

    Ok(PositionalQuery {
        sql: out,
        values,
        dialect,
    })
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether the `-` just consumed opens a `--` line comment
///
/// MySQL needs whitespace (or the end of input) after the second dash, so
/// `a--@b` stays an expression.
fn starts_dash_comment(chars: &Peekable<Chars<'_>>, dialect: Dialect) -> bool {
    let mut ahead = chars.clone();
    if ahead.next() != Some('-') {
        return false;
    }
    match dialect {
        Dialect::MySql => ahead.next().map_or(true, char::is_whitespace),
        Dialect::Oracle => true,
    }
}

/// Copy a quoted literal or identifier verbatim, honoring doubled quotes
/// and, when enabled, backslash escapes
fn copy_quoted(
    quote: char,
    chars: &mut Peekable<Chars<'_>>,
    out: &mut String,
    backslash_escapes: bool,
) {
    out.push(quote);
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\\' && backslash_escapes {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else if c == quote {
            if chars.peek() == Some(&quote) {
                if let Some(doubled) = chars.next() {
                    out.push(doubled);
                }
            } else {
                return;
            }
        }
    }
}

fn copy_until(chars: &mut Peekable<Chars<'_>>, out: &mut String, first: char, terminator: &str) {
    out.push(first);
    while let Some(c) = chars.next() {
        out.push(c);
        if out.ends_with(terminator) {
            return;
        }
    }
}
