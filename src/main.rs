//! csv-rows CLI - count data rows in a CSV file

use clap::Parser;
use clap::error::ErrorKind;
use csv_rows::{Quote, RowCount, RowCountError, RowCounter};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Count the data rows of a CSV file.
///
/// The first line is treated as the header. Every later non-empty line
/// counts as one row.
#[derive(Parser, Debug)]
#[command(name = "csv-rows")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file
    file: PathBuf,

    /// Column name (only consulted with --values)
    column: String,

    /// Field delimiter (single ASCII character)
    #[arg(short = 'd', long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Split fields on every delimiter, ignoring quotes
    #[arg(long)]
    no_quoting: bool,

    /// Print the values of COLUMN as CSV instead of the row count
    #[arg(long)]
    values: bool,

    /// Log more detail to stderr (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Exit codes for each way the program can end.
mod exit {
    pub const USAGE: u8 = 1;
    pub const IO: u8 = 2;
    pub const EMPTY: u8 = 3;
    pub const COLUMN: u8 = 4;
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(exit::USAGE),
            };
        }
    };

    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(args: &Args) -> csv_rows::Result<()> {
    let mut counter = RowCounter::new();
    counter.delimiter(args.delimiter);
    if args.no_quoting {
        counter.quote(Quote::None);
    }
    if args.values {
        counter.column(args.column.as_str());
    }

    let count = counter.count_path(&args.file)?;

    if args.values {
        print_values(&args.column, &count)
    } else {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "rows: {}", count.rows)?;
        stdout.flush()?;
        Ok(())
    }
}

fn print_values(column: &str, count: &RowCount) -> csv_rows::Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    writer.write_record([column])?;
    for value in count.values.iter().flatten() {
        writer.write_record([value])?;
    }
    writer.flush()?;
    Ok(())
}

fn exit_code(error: &RowCountError) -> u8 {
    match error {
        RowCountError::Open { .. }
        | RowCountError::Read { .. }
        | RowCountError::Io(_)
        | RowCountError::Csv(_) => exit::IO,
        RowCountError::EmptyData => exit::EMPTY,
        RowCountError::ColumnNotFound(_) => exit::COLUMN,
    }
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
    }
}

fn init_tracing(verbose: u8) {
    let env_filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("csv_rows=debug"),
        _ => EnvFilter::new("csv_rows=trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("§").is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&RowCountError::EmptyData), 3);
        assert_eq!(exit_code(&RowCountError::ColumnNotFound("x".into())), 4);
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(
            exit_code(&RowCountError::Open {
                path: PathBuf::from("x.csv"),
                source: io_err,
            }),
            2
        );
        let read_err = io::Error::other("is a directory");
        assert_eq!(
            exit_code(&RowCountError::Read {
                path: PathBuf::from("dir"),
                source: read_err,
            }),
            2
        );
    }

    #[test]
    fn test_args_require_file_and_column() {
        let err = Args::try_parse_from(["csv-rows", "data.csv"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let args = Args::try_parse_from(["csv-rows", "data.csv", "name", "-d", ";"]).unwrap();
        assert_eq!(args.delimiter, b';');
        assert!(!args.values);
    }
}
