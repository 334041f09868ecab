//! Import of compiled page bundle scripts.
//!
//! Older builds of the site shipped each page as a script of the form
//! `webpackJsonp([id],{n:function(n,s){n.exports={...}}})`. The object literal
//! assigned to `exports` holds the same data as a JSON page bundle, written as
//! minified JavaScript: bare keys, single-quoted strings, `!0`/`!1` for booleans.
//! This module reads that literal and converts it to [`PageBundle`]s.

use std::{
    fs,
    path::{Path, PathBuf},
};

use nanceio_core::{PageBundle, SlugError, content::normalize_slug};
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name prefix of compiled page bundles.
pub const LEGACY_PREFIX: &str = "path---";

/// Legacy import errors.
#[derive(Debug, Error)]
pub enum LegacyError {
    /// The script has no `exports=` assignment.
    #[error("no exports assignment found")]
    MissingExports,

    /// The object literal could not be read.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// The literal does not have the page bundle shape.
    #[error("unexpected bundle shape: {0}")]
    Shape(#[from] serde_json::Error),

    /// The bundle has no usable slug.
    #[error("invalid slug: {0}")]
    Slug(#[from] SlugError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for legacy import operations.
pub type Result<T> = std::result::Result<T, LegacyError>;

/// Parse a compiled page bundle script.
pub fn parse_legacy_bundle(source: &str) -> Result<PageBundle> {
    let start = find_exports(source).ok_or(LegacyError::MissingExports)?;
    let (value, consumed) = parse_js_literal(&source[start..]).map_err(|e| match e {
        LegacyError::Syntax { offset, message } => LegacyError::Syntax {
            offset: offset + start,
            message,
        },
        other => other,
    })?;

    debug!(start, consumed, "read exports literal");
    Ok(serde_json::from_value(value)?)
}

/// Parse one JavaScript literal value at the start of `source`.
///
/// Returns the value and the number of bytes consumed.
pub fn parse_js_literal(source: &str) -> Result<(Value, usize)> {
    let mut reader = LiteralReader::new(source);
    reader.skip_whitespace();
    let value = reader.parse_value()?;
    Ok((value, reader.pos))
}

/// Convert every compiled bundle in `src_dir` into a JSON bundle in `dest_dir`.
///
/// Returns the number of bundles written. Files that fail to convert are
/// logged and skipped.
pub fn import_dir(src_dir: &Path, dest_dir: &Path) -> Result<usize> {
    info!(src = %src_dir.display(), dest = %dest_dir.display(), "importing compiled bundles");
    fs::create_dir_all(dest_dir)?;

    let mut sources: Vec<PathBuf> = fs::read_dir(src_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_legacy_bundle(path))
        .collect();
    sources.sort();

    let mut count = 0;
    for path in &sources {
        match import_file(path, dest_dir) {
            Ok(output) => {
                debug!(from = %path.display(), to = %output.display(), "imported bundle");
                count += 1;
            }
            Err(e) => warn!(path = %path.display(), error = %e, "failed to import bundle"),
        }
    }

    info!(count, found = sources.len(), "import complete");
    Ok(count)
}

/// Convert one compiled bundle, returning the path of the written JSON file.
pub fn import_file(path: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let source = fs::read_to_string(path)?;
    let bundle = parse_legacy_bundle(&source)?;

    let slug = normalize_slug(&bundle.path_context.slug)?;
    let file_name = format!("{}.json", slug.trim_matches('/').replace('/', "-"));
    let output = dest_dir.join(file_name);

    fs::write(&output, serde_json::to_string_pretty(&bundle)?)?;
    Ok(output)
}

fn is_legacy_bundle(path: &Path) -> bool {
    path.is_file()
        && path.extension().is_some_and(|ext| ext == "js")
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with(LEGACY_PREFIX))
}

/// Byte offset of the value assigned to `exports`.
fn find_exports(source: &str) -> Option<usize> {
    for (idx, keyword) in source.match_indices("exports") {
        let rest = &source[idx + keyword.len()..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with('=') && !trimmed.starts_with("==") {
            let after_eq = &trimmed[1..];
            let value_start = source.len() - after_eq.trim_start().len();
            return Some(value_start);
        }
    }
    None
}

struct LiteralReader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LiteralReader<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> LegacyError {
        LegacyError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn expect(&mut self, want: char) -> Result<()> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{want}', found '{c}'"))),
            None => Err(self.error(format!("expected '{want}', found end of input"))),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(quote @ ('"' | '\'')) => Ok(Value::String(self.parse_string(quote)?)),
            Some('!') => self.parse_negation(),
            Some(c) if c == '-' || c == '.' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if is_ident_start(c) => {
                let ident = self.parse_identifier();
                match ident {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    other => Err(self.error(format!("unsupported identifier '{other}'"))),
                }
            }
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.expect('{')?;
        let mut map = Map::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            self.expect(':')?;
            self.skip_whitespace();
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote),
            Some(c) if is_ident_start(c) || c.is_ascii_digit() => {
                let start = self.pos;
                while self.peek().is_some_and(is_ident_part) {
                    self.bump();
                }
                Ok(self.src[start..self.pos].to_string())
            }
            Some(c) => Err(self.error(format!("invalid object key start '{c}'"))),
            None => Err(self.error("unterminated object")),
        }
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(c) => return Err(self.error(format!("expected ',' or ']', found '{c}'"))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_negation(&mut self) -> Result<Value> {
        self.expect('!')?;
        match self.bump() {
            Some('0') => Ok(Value::Bool(true)),
            Some('1') => Ok(Value::Bool(false)),
            _ => Err(self.error("only !0 and !1 are supported")),
        }
    }

    fn parse_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_part) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            self.bump();
        }

        let text = &self.src[start..self.pos];
        if let Ok(int) = text.parse::<i64>() {
            return Ok(Value::Number(int.into()));
        }

        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| LegacyError::Syntax {
                offset: start,
                message: format!("invalid number '{text}'"),
            })
    }

    fn parse_string(&mut self, quote: char) -> Result<String> {
        self.expect(quote)?;
        let mut out = String::new();

        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.parse_escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        match self.bump() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('x') => {
                let code = self.parse_hex(2)?;
                out.push(char::from_u32(code).ok_or_else(|| self.error("invalid \\x escape"))?);
            }
            Some('u') => {
                let c = self.parse_unicode_escape()?;
                out.push(c);
            }
            // Line continuation.
            Some('\n') => {}
            Some('\r') => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            Some(c) => out.push(c),
            None => return Err(self.error("unterminated escape")),
        }
        Ok(())
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let high = self.parse_hex(4)?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or_else(|| self.error("invalid \\u escape"));
        }

        // Surrogate pair.
        if !self.src[self.pos..].starts_with("\\u") {
            return Err(self.error("unpaired surrogate"));
        }
        self.pos += 2;
        let low = self.parse_hex(4)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(self.error("invalid low surrogate"));
        }

        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or_else(|| self.error("invalid surrogate pair"))
    }

    fn parse_hex(&mut self, digits: usize) -> Result<u32> {
        let end = self.pos + digits;
        let hex = self
            .src
            .get(self.pos..end)
            .ok_or_else(|| self.error("truncated hex escape"))?;
        let code =
            u32::from_str_radix(hex, 16).map_err(|_| self.error(format!("invalid hex '{hex}'")))?;
        self.pos = end;
        Ok(code)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
