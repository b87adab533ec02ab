//! Single-line field tokenizer.
//!
//! A line never contains a line terminator, so a quoted field cannot span
//! lines. An unterminated quote runs to the end of the line.

use crate::dialect::{Dialect, Quote};

/// Position of the scanner relative to quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    /// Not inside a quoted section.
    Outside,
    /// Inside a quoted section; delimiters are literal.
    InQuoted,
    /// Just saw a quote while quoted: either an escaped quote or the close.
    QuotePending,
}

/// Splits lines into fields according to a [`Dialect`].
///
/// # Example
///
/// ```
/// use csv_rows::Tokenizer;
///
/// let tokenizer = Tokenizer::new();
/// assert_eq!(tokenizer.split(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
///
/// let naive = Tokenizer::naive();
/// assert_eq!(naive.split(r#"a,"b,c",d"#), vec!["a", "\"b", "c\"", "d"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    dialect: Dialect,
}

impl Tokenizer {
    /// Comma-delimited tokenizer honoring double-quoted fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-delimited tokenizer with quoting disabled.
    pub fn naive() -> Self {
        Self::with_dialect(Dialect::naive())
    }

    pub const fn with_dialect(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Set the field delimiter.
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.dialect.delimiter = delimiter;
        self
    }

    /// Set the quote character, or disable quoting with [`Quote::None`].
    pub fn quote(&mut self, quote: Quote) -> &mut Self {
        self.dialect.quote = quote;
        self
    }

    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Split a line into fields.
    ///
    /// Always returns at least one field; the empty line yields `[""]`.
    pub fn split(&self, line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        self.split_into(line, &mut fields);
        fields
    }

    /// Split a line into `fields`, clearing it first.
    ///
    /// Delimiter and quote are matched as raw bytes. With ASCII delimiter
    /// and quote every field is valid UTF-8; a non-ASCII byte can cut a
    /// multi-byte character, and such fields are decoded lossily.
    pub fn split_into(&self, line: &str, fields: &mut Vec<String>) {
        fields.clear();
        let line = line.as_bytes();
        // Upper bound on field count for either mode.
        fields.reserve(bytecount::count(line, self.dialect.delimiter) + 1);

        match self.dialect.quote.char() {
            None => split_naive(line, self.dialect.delimiter, fields),
            Some(q) => split_quoted(line, self.dialect.delimiter, q, fields),
        }
    }
}

/// Split a line with the default dialect: comma-delimited, double-quoted.
pub fn split_line(line: &str) -> Vec<String> {
    Tokenizer::new().split(line)
}

fn field_string(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn split_naive(line: &[u8], delimiter: u8, fields: &mut Vec<String>) {
    fields.extend(
        line.split(|&b| b == delimiter)
            .map(|field| field_string(field.to_vec())),
    );
}

fn split_quoted(line: &[u8], delimiter: u8, quote: u8, fields: &mut Vec<String>) {
    let mut current_field = Vec::new();
    let mut state = FieldState::Outside;

    for &b in line {
        state = match state {
            FieldState::Outside if b == delimiter => {
                fields.push(field_string(std::mem::take(&mut current_field)));
                FieldState::Outside
            }
            FieldState::Outside if b == quote => FieldState::InQuoted,
            FieldState::Outside => {
                current_field.push(b);
                FieldState::Outside
            }
            FieldState::InQuoted if b == quote => FieldState::QuotePending,
            FieldState::InQuoted => {
                current_field.push(b);
                FieldState::InQuoted
            }
            // Doubled quote inside a quoted section.
            FieldState::QuotePending if b == quote => {
                current_field.push(quote);
                FieldState::InQuoted
            }
            FieldState::QuotePending if b == delimiter => {
                fields.push(field_string(std::mem::take(&mut current_field)));
                FieldState::Outside
            }
            // Text after a closing quote is kept literally.
            FieldState::QuotePending => {
                current_field.push(b);
                FieldState::Outside
            }
        };
    }

    fields.push(field_string(current_field));
}
