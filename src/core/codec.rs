//! CSV codec for secret records.
//!
//! A record is `name<delimiter>value`. Names are written verbatim; values are
//! quoted RFC-4180 style when they contain the delimiter, a double quote or a
//! line break. Decoding is quote-aware, so a quoted value may span several
//! physical lines.

use crate::core::constants::DEFAULT_DELIMITER;
use crate::core::domain::SecretRecord;
use crate::error::{ConfigError, DecodeError, Result};

const QUOTE: char = '"';

/// Encodes and decodes secret records with a single delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    delimiter: char,
}

impl Codec {
    /// Create a codec for `delimiter`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidDelimiter` for a quote or line break.
    pub fn new(delimiter: char) -> Result<Self> {
        if matches!(delimiter, QUOTE | '\n' | '\r') {
            return Err(ConfigError::InvalidDelimiter(delimiter.to_string()).into());
        }
        Ok(Self { delimiter })
    }

    /// Parse a delimiter given as text (config file or CLI flag).
    ///
    /// `\t` and `tab` are accepted as spellings of the tab character.
    pub fn parse(delimiter: &str) -> Result<Self> {
        let ch = match delimiter {
            "\\t" | "tab" => '\t',
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => ch,
                    _ => return Err(ConfigError::InvalidDelimiter(other.to_string()).into()),
                }
            }
        };
        Self::new(ch)
    }

    /// The delimiter in use.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Encode a name/value pair as one record, without a line terminator.
    pub fn encode(&self, name: &str, value: &str) -> String {
        let mut line = String::with_capacity(name.len() + value.len() + 3);
        line.push_str(name);
        line.push(self.delimiter);

        if self.needs_quotes(value) {
            line.push(QUOTE);
            for ch in value.chars() {
                if ch == QUOTE {
                    line.push(QUOTE);
                }
                line.push(ch);
            }
            line.push(QUOTE);
        } else {
            line.push_str(value);
        }

        line
    }

    /// Decode one record into a secret.
    ///
    /// `line` is the 1-based line the record starts on, used for error
    /// reporting.
    ///
    /// # Errors
    ///
    /// Returns a `DecodeError` when the delimiter is missing, the trimmed name
    /// is empty, a quoted value is not closed, or the value is blank.
    pub fn decode(
        &self,
        record: &str,
        line: usize,
    ) -> std::result::Result<SecretRecord, DecodeError> {
        let record = record.strip_suffix('\r').unwrap_or(record);

        let (name, raw) = record
            .split_once(self.delimiter)
            .ok_or(DecodeError::MissingDelimiter { line })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(DecodeError::EmptyName { line });
        }

        let value = if raw.trim_start().starts_with(QUOTE) {
            unquote(raw.trim()).ok_or_else(|| DecodeError::UnterminatedQuote {
                line,
                name: name.to_string(),
            })?
        } else {
            raw.to_string()
        };

        if value.trim().is_empty() {
            return Err(DecodeError::EmptyValue {
                line,
                name: name.to_string(),
            });
        }

        Ok(SecretRecord::new(name, value))
    }

    /// Split file content into records.
    ///
    /// Yields `(line_number, record)` pairs. Blank lines and `#` comment lines
    /// are skipped. A record whose quoted value is still open at the end of a
    /// line continues on the next one. A quote that never closes yields just
    /// its own line, which then fails to decode.
    pub fn records<'a>(&self, content: &'a str) -> Records<'a> {
        Records {
            content,
            pos: 0,
            line: 0,
            delimiter: self.delimiter,
        }
    }

    fn needs_quotes(&self, value: &str) -> bool {
        value
            .chars()
            .any(|ch| ch == self.delimiter || matches!(ch, QUOTE | '\n' | '\r'))
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Iterator over the records of a CSV document.
///
/// Created by [`Codec::records`].
#[derive(Debug)]
pub struct Records<'a> {
    content: &'a str,
    pos: usize,
    line: usize,
    delimiter: char,
}

impl<'a> Records<'a> {
    /// Advance past the next physical line, returning its byte range
    /// without the `\n`.
    fn next_line(&mut self) -> (usize, usize) {
        let start = self.pos;
        self.line += 1;
        match self.content[start..].find('\n') {
            Some(offset) => {
                self.pos = start + offset + 1;
                (start, start + offset)
            }
            None => {
                self.pos = self.content.len();
                (start, self.content.len())
            }
        }
    }

    fn opens_quote(&self, line: &str) -> bool {
        let Some((_, raw)) = line.split_once(self.delimiter) else {
            return false;
        };
        match raw.trim_start().strip_prefix(QUOTE) {
            Some(rest) => !closes_quote(rest),
            None => false,
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.content.len() {
            let first = self.line + 1;
            let (start, mut end) = self.next_line();
            let text = &self.content[start..end];

            let trimmed = text.trim_start();
            if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if self.opens_quote(text) {
                let (resume_pos, resume_line, opening_end) = (self.pos, self.line, end);
                let mut closed = false;
                while self.pos < self.content.len() {
                    let (line_start, line_end) = self.next_line();
                    end = line_end;
                    if closes_quote(&self.content[line_start..line_end]) {
                        closed = true;
                        break;
                    }
                }

                // An unclosed quote is a record of its own; the lines after
                // it are read normally.
                if !closed {
                    self.pos = resume_pos;
                    self.line = resume_line;
                    end = opening_end;
                }
            }

            let record = &self.content[start..end];
            return Some((first, record.strip_suffix('\r').unwrap_or(record)));
        }
        None
    }
}

/// Whether `text`, read from inside a quoted field, contains the closing quote.
fn closes_quote(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == QUOTE {
            if chars.peek() == Some(&QUOTE) {
                chars.next();
            } else {
                return true;
            }
        }
    }
    false
}

/// Strip the surrounding quotes of a field and collapse doubled quotes.
///
/// Returns `None` unless the closing quote is the last character.
fn unquote(field: &str) -> Option<String> {
    let inner = field.strip_prefix(QUOTE)?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != QUOTE {
            out.push(ch);
            continue;
        }
        if chars.peek() == Some(&QUOTE) {
            chars.next();
            out.push(QUOTE);
        } else {
            return chars.next().is_none().then_some(out);
        }
    }

    None
}
