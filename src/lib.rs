//! csv-rows: count the data rows of a CSV file
//!
//! The first line of the input is a header. Every later line that is not
//! empty (after stripping a trailing carriage return) counts as a row.
//!
//! # Quick Start
//!
//! ```no_run
//! use csv_rows::RowCounter;
//!
//! let counter = RowCounter::new();
//! let count = counter.count_path("data.csv").unwrap();
//!
//! println!("rows: {}", count.rows);
//! println!("header: {:?}", count.header);
//! ```
//!
//! # Tokenizing Lines
//!
//! Lines are split into fields by a single-pass [`Tokenizer`]. With
//! [`Quote::None`] every delimiter splits, so a line with N delimiters has
//! N+1 fields. With a quote character, delimiters inside quotes are literal
//! and a doubled quote stands for one quote character.
//!
//! ```
//! use csv_rows::{Quote, Tokenizer, split_line};
//!
//! assert_eq!(split_line(r#"a,"b ""c""",d"#), vec!["a", r#"b "c""#, "d"]);
//!
//! let mut tokenizer = Tokenizer::new();
//! tokenizer.delimiter(b'|').quote(Quote::None);
//! assert_eq!(tokenizer.split("x||y"), vec!["x", "", "y"]);
//! ```
//!
//! # Column Values
//!
//! A counter can also collect one column by header name:
//!
//! ```
//! use csv_rows::RowCounter;
//!
//! let mut counter = RowCounter::new();
//! counter.column("city");
//!
//! let count = counter.count_bytes(b"name,city\nAlice,NYC\nBob,LA\n").unwrap();
//! assert_eq!(count.values, Some(vec!["NYC".to_string(), "LA".to_string()]));
//! ```

mod counter;
mod dialect;
mod encoding;
mod error;
mod lines;
mod tokenizer;

pub use counter::{RowCount, RowCounter};
pub use dialect::{Dialect, Quote};
pub use error::{Result, RowCountError};
pub use tokenizer::{Tokenizer, split_line};
