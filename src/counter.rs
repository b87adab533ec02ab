//! Row counter builder and count methods.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use foldhash::{HashMap, HashMapExt};
use tracing::{debug, info, trace};

use crate::dialect::{Dialect, Quote};
use crate::encoding::{decode_line, detect_and_transcode, has_utf8_bom, skip_bom};
use crate::error::{Result, RowCountError};
use crate::lines::Lines;
use crate::tokenizer::Tokenizer;

/// Outcome of counting the rows of one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowCount {
    /// Number of non-empty lines after the header.
    pub rows: usize,
    /// Number of empty lines after the header.
    pub blank_lines: usize,
    /// Header fields, split with the counter's dialect.
    pub header: Vec<String>,
    /// Values of the requested column, one per counted row.
    pub values: Option<Vec<String>>,
}

/// Counts the data rows of a CSV input.
///
/// The first line is the header. Every later line that is non-empty after
/// stripping a trailing `\r` is a row.
///
/// # Example
///
/// ```
/// use csv_rows::RowCounter;
///
/// let counter = RowCounter::new();
/// let count = counter.count_bytes(b"h1,h2\nrow1\n\nrow2\n").unwrap();
///
/// assert_eq!(count.rows, 2);
/// assert_eq!(count.blank_lines, 1);
/// assert_eq!(count.header, vec!["h1", "h2"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RowCounter {
    /// Dialect used to split the header and extracted rows.
    dialect: Dialect,
    /// Column whose values are collected, if any.
    column: Option<String>,
}

impl RowCounter {
    /// Create a new RowCounter with default settings.
    pub fn new() -> Self {
        Self::default()
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

    /// Collect the values of the named column while counting.
    pub fn column<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.column = Some(name.into());
        self
    }

    /// Count the rows of the CSV file at the given path.
    pub fn count_path<P: AsRef<Path>>(&self, path: P) -> Result<RowCount> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RowCountError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened input");

        let mut data = Vec::new();
        std::io::BufReader::new(file)
            .read_to_end(&mut data)
            .map_err(|source| RowCountError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(bytes = data.len(), "read input");
        self.count_bytes(&data)
    }

    /// Count the rows of CSV data from a reader.
    pub fn count_reader<R: Read>(&self, mut reader: R) -> Result<RowCount> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        debug!(bytes = data.len(), "read input");
        self.count_bytes(&data)
    }

    /// Count the rows of CSV data from bytes.
    pub fn count_bytes(&self, data: &[u8]) -> Result<RowCount> {
        let (data, _) = detect_and_transcode(data);
        if has_utf8_bom(&data) {
            debug!("skipping UTF-8 BOM");
        }
        self.count_lines(Lines::new(skip_bom(&data)))
    }

    fn count_lines(&self, mut lines: Lines<'_>) -> Result<RowCount> {
        let tokenizer = Tokenizer::with_dialect(self.dialect);
        debug!(
            delimiter = %(self.dialect.delimiter as char),
            quote = %self.dialect.quote,
            "tokenizing with dialect"
        );

        let header_line = lines.next().ok_or(RowCountError::EmptyData)?;
        let header = tokenizer.split(&decode_line(header_line));
        debug!(fields = ?header, "header");

        let mut extractor = self
            .column
            .as_deref()
            .map(|name| ColumnExtractor::new(&header, name, tokenizer))
            .transpose()?;

        let mut count = RowCount::default();
        for (i, line) in lines.enumerate() {
            if line.is_empty() {
                trace!(line = i + 2, "blank line skipped");
                count.blank_lines += 1;
                continue;
            }
            count.rows += 1;
            if let Some(extractor) = extractor.as_mut() {
                extractor.push(line);
            }
        }

        info!(rows = count.rows, blank_lines = count.blank_lines, "counted rows");
        count.header = header;
        count.values = extractor.map(|e| e.values);
        Ok(count)
    }
}

/// Collects one column's values from data lines.
struct ColumnExtractor {
    index: usize,
    tokenizer: Tokenizer,
    fields: Vec<String>,
    values: Vec<String>,
}

impl ColumnExtractor {
    fn new(header: &[String], name: &str, tokenizer: Tokenizer) -> Result<Self> {
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(header.len());
        for (i, field) in header.iter().enumerate() {
            // First occurrence wins for duplicate names.
            positions.entry(field.as_str()).or_insert(i);
        }

        let index = *positions
            .get(name)
            .ok_or_else(|| RowCountError::ColumnNotFound(name.to_string()))?;
        debug!(column = name, index, "extracting column");

        Ok(Self {
            index,
            tokenizer,
            fields: Vec::with_capacity(header.len()),
            values: Vec::new(),
        })
    }

    fn push(&mut self, line: &[u8]) {
        self.tokenizer.split_into(&decode_line(line), &mut self.fields);
        let value = self
            .fields
            .get_mut(self.index)
            .map(std::mem::take)
            .unwrap_or_default();
        self.values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_builder() {
        let mut counter = RowCounter::new();
        counter.delimiter(b';').quote(Quote::None).column("id");

        assert_eq!(counter.dialect, Dialect::new(b';', Quote::None));
        assert_eq!(counter.column.as_deref(), Some("id"));
    }

    #[test]
    fn test_header_and_blank_line() {
        let count = RowCounter::new()
            .count_bytes(b"h1,h2\nrow1\n\nrow2\n")
            .unwrap();

        assert_eq!(count.rows, 2);
        assert_eq!(count.blank_lines, 1);
        assert_eq!(count.header, vec!["h1", "h2"]);
        assert_eq!(count.values, None);
    }

    #[test]
    fn test_header_only() {
        let count = RowCounter::new().count_bytes(b"h1,h2").unwrap();
        assert_eq!(count.rows, 0);

        let count = RowCounter::new().count_bytes(b"h1,h2\n").unwrap();
        assert_eq!(count.rows, 0);
        assert_eq!(count.blank_lines, 0);
    }

    #[test]
    fn test_empty_input() {
        let result = RowCounter::new().count_bytes(b"");
        assert!(matches!(result, Err(RowCountError::EmptyData)));
    }

    #[test]
    fn test_blank_header_is_still_a_header() {
        let count = RowCounter::new().count_bytes(b"\nrow\n").unwrap();
        assert_eq!(count.rows, 1);
        assert_eq!(count.header, vec![""]);
    }

    #[test]
    fn test_crlf_lines() {
        let count = RowCounter::new()
            .count_bytes(b"a,b\r\n1,2\r\n\r\n3,4\r\n")
            .unwrap();
        assert_eq!(count.rows, 2);
        assert_eq!(count.blank_lines, 1);
        assert_eq!(count.header, vec!["a", "b"]);
    }

    #[test]
    fn test_whitespace_line_counts() {
        let count = RowCounter::new().count_bytes(b"h\n \n").unwrap();
        assert_eq!(count.rows, 1);
    }

    #[test]
    fn test_bom_is_not_part_of_header() {
        let mut data = b"\xEF\xBB\xBF".to_vec();
        data.extend_from_slice(b"id,name\n1,a\n");
        let count = RowCounter::new().count_bytes(&data).unwrap();
        assert_eq!(count.header, vec!["id", "name"]);
        assert_eq!(count.rows, 1);
    }

    #[test]
    fn test_column_values() {
        let mut counter = RowCounter::new();
        counter.column("name");
        let count = counter
            .count_bytes(b"id,name\n1,\"Smith, J\"\n\n2,Lee\n3\n")
            .unwrap();

        assert_eq!(count.rows, 3);
        assert_eq!(
            count.values,
            Some(vec!["Smith, J".to_string(), "Lee".to_string(), String::new()])
        );
    }

    #[test]
    fn test_duplicate_column_first_wins() {
        let mut counter = RowCounter::new();
        counter.column("x");
        let count = counter.count_bytes(b"x,x\n1,2\n").unwrap();
        assert_eq!(count.values, Some(vec!["1".to_string()]));
    }

    #[test]
    fn test_column_not_found() {
        let mut counter = RowCounter::new();
        counter.column("missing");
        let result = counter.count_bytes(b"a,b\n1,2\n");
        assert!(matches!(result, Err(RowCountError::ColumnNotFound(name)) if name == "missing"));
    }

    #[test]
    fn test_naive_column_values() {
        let mut counter = RowCounter::new();
        counter.quote(Quote::None).column("b");
        let count = counter.count_bytes(b"a,b\n\"x,y\",z\n").unwrap();
        assert_eq!(count.values, Some(vec!["y\"".to_string()]));
    }
}
