use std::{fs::File, io, path::Path, path::PathBuf, str::FromStr};

use csv::StringRecord;
use log::{debug, warn};
use logos::Logos;
use miette::Diagnostic;
use thiserror::Error;
use time::Date;

pub mod format;
pub mod stats;
pub mod summary;

pub use format::{convert_date, convert_f_to_c, format_temperature, parse_f_to_c, DateError};
pub use stats::{calculate_mean, find_max, find_min, EmptyInputError, Extremum};
pub use summary::{generate_daily_summary, generate_summary, Overview};

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t]+")] // Ignore blanks around the number
enum Token {
    #[regex(r"[+-]?[0-9]+")]
    Integer,
    #[regex(r"[+-]?([0-9]+\.[0-9]*|\.[0-9]+)")]
    Decimal,
}

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum NumberError {
    #[error("`{0}` is not a number")]
    #[diagnostic(code(weather::number::invalid))]
    Invalid(String),
    #[error("`{0}` is not an integer")]
    #[diagnostic(code(weather::number::not_integer))]
    NotInteger(String),
}

/// Lex `s` as exactly one number, returning its kind and the matched text.
fn lex_number(s: &str) -> Result<(Token, &str), NumberError> {
    let mut lexer = Token::lexer(s);
    let token = match lexer.next() {
        Some(Ok(token)) => token,
        _ => return Err(NumberError::Invalid(s.to_string())),
    };
    let slice = lexer.slice();
    match lexer.next() {
        None => Ok((token, slice)),
        Some(_) => Err(NumberError::Invalid(s.to_string())),
    }
}

fn parse_integer(s: &str) -> Result<i32, NumberError> {
    match lex_number(s)? {
        (Token::Integer, digits) => digits
            .parse()
            .map_err(|_| NumberError::Invalid(s.to_string())),
        (Token::Decimal, _) => Err(NumberError::NotInteger(s.to_string())),
    }
}

/// A temperature in degrees Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Fahrenheit(pub f64);

impl Fahrenheit {
    /// Unrounded conversion to degrees Celsius.
    pub fn to_celsius(self) -> f64 {
        (self.0 - 32.0) * 5.0 / 9.0
    }
}

impl From<f64> for Fahrenheit {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<i32> for Fahrenheit {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl FromStr for Fahrenheit {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, number) = lex_number(s)?;
        number
            .parse()
            .map(Self)
            .map_err(|_| NumberError::Invalid(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRecord {
    /// ISO-8601 date, kept as written in the source.
    pub date: String,
    pub min_temp_f: i32,
    pub max_temp_f: i32,
}

const COLUMNS: [&str; 3] = ["date", "min_temp_f", "max_temp_f"];

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum RecordError {
    #[error("line {line}: expected {} fields, found {found}", COLUMNS.len())]
    #[diagnostic(code(weather::record::field_count))]
    FieldCount { line: u64, found: usize },
    #[error("line {line}: bad `{column}` value")]
    #[diagnostic(code(weather::record::number))]
    Number {
        line: u64,
        column: &'static str,
        #[source]
        source: NumberError,
    },
}

impl WeatherRecord {
    /// Build a record out of one csv row. Every field is mandatory and the two
    /// temperatures must be integers.
    pub fn from_record(record: &StringRecord) -> Result<Self, RecordError> {
        let line = record.position().map_or(0, |position| position.line());
        if record.len() != COLUMNS.len() {
            return Err(RecordError::FieldCount {
                line,
                found: record.len(),
            });
        }

        let temperature = |index: usize| {
            parse_integer(&record[index]).map_err(|source| RecordError::Number {
                line,
                column: COLUMNS[index],
                source,
            })
        };

        Ok(Self {
            date: record[0].to_string(),
            min_temp_f: temperature(1)?,
            max_temp_f: temperature(2)?,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Could not open `{}`", .path.display())]
    #[diagnostic(code(weather::io))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    #[diagnostic(code(weather::csv))]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Date(#[from] DateError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Empty(#[from] EmptyInputError),
}

/// Read every record of a csv file. The first row is a header and is skipped.
pub fn load_data_from_csv(path: impl AsRef<Path>) -> Result<Vec<WeatherRecord>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = load_data_from_reader(file)?;
    debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_data_from_reader(reader: impl io::Read) -> Result<Vec<WeatherRecord>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        // Field counts are checked per row so the error names the line.
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.records() {
        // Blank lines never reach here, the csv reader drops them.
        records.push(WeatherRecord::from_record(&row?)?);
    }

    warn_if_unordered(&records);
    Ok(records)
}

fn warn_if_unordered(records: &[WeatherRecord]) {
    let mut previous: Option<Date> = None;
    for record in records {
        let Ok(date) = format::parse_iso_date(&record.date) else {
            continue;
        };
        if previous.is_some_and(|previous| previous >= date) {
            warn!("days are not ordered: {} comes after a later day", record.date);
            return;
        }
        previous = Some(date);
    }
}
