//! # Error reporting for reading of data files
//!
//! Describes the problems encountered while reading and parsing a file of numbers.
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::io;

/// A `LoadError` is created when an error was encountered during IO or parsing.
///
/// It is the highest error in the io error hierarchy.
#[derive(Debug)]
pub enum LoadError {
    /// The file to read isn't found, or the reading of file couldn't start or was interrupted.
    IO(io::Error),
    /// A token in the file could not be parsed into a number.
    Parse(ParseError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::IO(error) => error.fmt(f),
            LoadError::Parse(error) => error.fmt(f),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::IO(error) => Some(error),
            LoadError::Parse(error) => Some(error),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(error: io::Error) -> Self {
        LoadError::IO(error)
    }
}

impl From<ParseError> for LoadError {
    fn from(error: ParseError) -> Self {
        LoadError::Parse(error)
    }
}

/// A `ParseError` describes the first token that could not be read as a number.
///
/// Parsing stops at that token. The values before it were read successfully and their count is
/// reported, so that the caller can tell how far into the file the problem is.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseError {
    description: String,
    location: FileLocation,
    parsed: usize,
}

/// Line number (starting at 1) and contents of the token that caused an error.
pub type FileLocation = (u64, String);

impl ParseError {
    /// Create a new `ParseError`.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong at the moment of creation.
    /// * `location`: Line number and text of the offending token.
    /// * `parsed`: Number of values that were read successfully before this token.
    pub fn new(description: impl Into<String>, location: FileLocation, parsed: usize) -> Self {
        Self { description: description.into(), location, parsed, }
    }

    /// The offending token.
    pub fn token(&self) -> &str {
        &self.location.1
    }

    /// Line on which the offending token was found, counting from 1.
    pub fn line_number(&self) -> u64 {
        self.location.0
    }

    /// Number of values that were read successfully.
    pub fn parsed(&self) -> usize {
        self.parsed
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ParseError: {} (token \"{}\" on line {}, after {} values)",
            self.description, self.location.1, self.location.0, self.parsed,
        )
    }
}

impl Error for ParseError {}
