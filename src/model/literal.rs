//! Literal values carried by triple objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vocab::xsd;
use super::Iri;
use crate::{Error, Result};

/// Datatype of a literal.
///
/// Numeric and boolean literals render bare in wikitext; strings render quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    String,
    Integer,
    Decimal,
    Boolean,
}

impl LiteralKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralKind::String => "STRING",
            LiteralKind::Integer => "INTEGER",
            LiteralKind::Decimal => "DECIMAL",
            LiteralKind::Boolean => "BOOLEAN",
        }
    }

    pub fn datatype(&self) -> Iri {
        Iri::new_unchecked(match self {
            LiteralKind::String => xsd::STRING,
            LiteralKind::Integer => xsd::INTEGER,
            LiteralKind::Decimal => xsd::DECIMAL,
            LiteralKind::Boolean => xsd::BOOLEAN,
        })
    }

    /// Whether literals of this kind are written without quotes.
    pub fn is_bare(&self) -> bool {
        !matches!(self, LiteralKind::String)
    }

    /// Check `lexical` against this kind's lexical space.
    fn accepts(&self, lexical: &str) -> bool {
        match self {
            LiteralKind::String => true,
            LiteralKind::Integer => is_integer(lexical),
            LiteralKind::Decimal => is_decimal(lexical),
            LiteralKind::Boolean => matches!(lexical, "true" | "false"),
        }
    }
}

/// A typed literal: lexical form plus datatype.
///
/// Equality is structural on the lexical form, so `42` and `042` are
/// distinct integers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: String,
    kind: LiteralKind,
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Self { lexical: value.into(), kind: LiteralKind::String }
    }

    pub fn integer(value: i64) -> Self {
        Self { lexical: value.to_string(), kind: LiteralKind::Integer }
    }

    pub fn boolean(value: bool) -> Self {
        Self { lexical: value.to_string(), kind: LiteralKind::Boolean }
    }

    pub fn decimal(lexical: impl Into<String>) -> Result<Self> {
        Self::typed(lexical, LiteralKind::Decimal)
    }

    /// Build a literal of `kind`, rejecting lexical forms outside its space.
    pub fn typed(lexical: impl Into<String>, kind: LiteralKind) -> Result<Self> {
        let lexical = lexical.into();
        if !kind.accepts(&lexical) {
            return Err(Error::InvalidDataError(format!(
                "'{lexical}' is not a valid {} literal",
                kind.type_name()
            )));
        }
        Ok(Self { lexical, kind })
    }

    /// Classify an unquoted wikitext token that is not a link.
    pub fn from_bare_token(token: &str) -> Self {
        let kind = if is_integer(token) {
            LiteralKind::Integer
        } else if is_decimal(token) {
            LiteralKind::Decimal
        } else if matches!(token, "true" | "false") {
            LiteralKind::Boolean
        } else {
            LiteralKind::String
        };
        Self { lexical: token.to_string(), kind }
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    pub fn datatype(&self) -> Iri {
        self.kind.datatype()
    }
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(&['+', '-'][..]).unwrap_or(s)
}

fn is_integer(s: &str) -> bool {
    let digits = strip_sign(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(s: &str) -> bool {
    let Some((int, frac)) = strip_sign(s).split_once('.') else {
        return false;
    };
    int.bytes().all(|b| b.is_ascii_digit())
        && !frac.is_empty()
        && frac.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Literal { fn from(v: bool) -> Self { Literal::boolean(v) } }
impl From<i32> for Literal { fn from(v: i32) -> Self { Literal::integer(v as i64) } }
impl From<i64> for Literal { fn from(v: i64) -> Self { Literal::integer(v) } }
impl From<String> for Literal { fn from(v: String) -> Self { Literal::string(v) } }
impl From<&str> for Literal { fn from(v: &str) -> Self { Literal::string(v) } }

// ============================================================================
// Display (N-Triples form)
// ============================================================================

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"")?;
        for c in self.lexical.chars() {
            match c {
                '"' => write!(f, "\\\"")?,
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                '\t' => write!(f, "\\t")?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "\"")?;
        match self.kind {
            LiteralKind::String => Ok(()),
            kind => write!(f, "^^{}", kind.datatype()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_token_classification() {
        assert_eq!(Literal::from_bare_token("42").kind(), LiteralKind::Integer);
        assert_eq!(Literal::from_bare_token("-7").kind(), LiteralKind::Integer);
        assert_eq!(Literal::from_bare_token("4.2").kind(), LiteralKind::Decimal);
        assert_eq!(Literal::from_bare_token(".5").kind(), LiteralKind::Decimal);
        assert_eq!(Literal::from_bare_token("true").kind(), LiteralKind::Boolean);
        assert_eq!(Literal::from_bare_token("abc").kind(), LiteralKind::String);
        assert_eq!(Literal::from_bare_token("4.").kind(), LiteralKind::String);
        assert_eq!(Literal::from_bare_token("+").kind(), LiteralKind::String);
    }

    #[test]
    fn test_typed_rejects_bad_lexical() {
        assert!(Literal::typed("abc", LiteralKind::Integer).is_err());
        assert!(Literal::typed("yes", LiteralKind::Boolean).is_err());
        assert!(Literal::decimal("1.25").is_ok());
    }

    #[test]
    fn test_lexical_equality() {
        assert_ne!(Literal::from_bare_token("042"), Literal::integer(42));
        assert_eq!(Literal::from_bare_token("42"), Literal::integer(42));
        assert_ne!(Literal::string("42"), Literal::integer(42));
    }

    #[test]
    fn test_ntriples_display() {
        assert_eq!(Literal::string("a \"b\"").to_string(), "\"a \\\"b\\\"\"");
        assert_eq!(
            Literal::integer(3).to_string(),
            "\"3\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }
}
