//! Type expressions, the textual form of a [`TypeSignature`].
//!
//! ```text
//! ty     := ident ( '<' ty ( ',' ty )* '>' )?
//! ident  := [A-Za-z_][A-Za-z0-9_.]*
//! ```
//!
//! Primitive and container keywords win over registered names, so a struct
//! called `string` is unreachable from an expression.
pub use super::MAX_NESTING_DEPTH;
use super::{Container, ContainerKind, NamedKind, NamedRef, Primitive, TypeSignature};
use crate::error::{Error, Result};

/// Parse `expr`, asking `resolve` what kind of entity a bare name denotes.
/// Names `resolve` doesn't know yield [`Error::UnknownType`].
pub fn parse_type<F>(expr: &str, resolve: F) -> Result<TypeSignature>
where
    F: Fn(&str) -> Option<NamedKind>,
{
    let mut p = Parser { src: expr, pos: 0, resolve: &resolve };
    let sig = p.ty(0)?;
    p.skip_ws();
    if p.pos != expr.len() {
        return Err(p.error("unexpected trailing input"));
    }
    Ok(sig)
}

struct Parser<'a, F> {
    src: &'a str,
    pos: usize,
    resolve: &'a F,
}

impl<'a, F> Parser<'a, F>
where
    F: Fn(&str) -> Option<NamedKind>,
{
    fn ty(&mut self, depth: usize) -> Result<TypeSignature> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Error::TooDeep { limit: MAX_NESTING_DEPTH });
        }
        self.skip_ws();
        let start = self.pos;
        let ident = self.ident()?;
        self.skip_ws();

        let params = if self.peek() == Some(b'<') {
            self.pos += 1;
            Some(self.params(depth)?)
        } else {
            None
        };

        if let Some(kind) = ContainerKind::from_keyword(ident) {
            let params = params.unwrap_or_default();
            return Container::new(kind, params).map(TypeSignature::Container);
        }
        if params.is_some() {
            self.pos = start;
            return Err(self.error(&format!("`{ident}` does not take type parameters")));
        }
        if let Some(p) = Primitive::from_keyword(ident) {
            return Ok(TypeSignature::Primitive(p));
        }
        match (self.resolve)(ident) {
            Some(kind) => NamedRef::new(ident, kind).map(TypeSignature::Named),
            None => Err(Error::UnknownType(ident.to_string())),
        }
    }

    /// Comma separated list after an opening `<`, consuming the closing `>`.
    fn params(&mut self, depth: usize) -> Result<Vec<TypeSignature>> {
        let mut out = Vec::new();
        loop {
            out.push(self.ty(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some(_) => return Err(self.error("expected `,` or `>`")),
                None => return Err(self.error("unclosed `<`")),
            }
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        let bytes = self.src.as_bytes();
        let start = self.pos;
        while let Some(&b) = bytes.get(self.pos) {
            let ok = if self.pos == start {
                b.is_ascii_alphabetic() || b == b'_'
            } else {
                b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
            };
            if !ok {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected a type name"));
        }
        Ok(&self.src[start..self.pos])
    }

    fn skip_ws(&mut self) {
        let bytes = self.src.as_bytes();
        while bytes.get(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn error(&self, message: &str) -> Error {
        Error::Parse {
            expr: self.src.to_string(),
            offset: self.pos,
            message: message.to_string(),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
