use std::ffi::OsString;

use thiserror::Error;

/// Represents a failure while scanning the command line or assigning options.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A token was found where a switch or option name was expected.
    #[error("the parameter '{0}' is not allowed in this context, switch or parameter name expected")]
    NotAnOption(String),
    /// A non-boolean abbreviation was given without a value.
    #[error("missing value for parameter '{0}'")]
    MissingValue(String),
    /// The registry does not know an option of that name.
    #[error("no option with the name '{0}' exists")]
    UnknownOption(String),
    /// The registry refused the value for the option's type.
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue {
        name: String,
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    /// A token is not valid unicode.
    #[error("argument is invalid unicode: {0:?}")]
    InvalidUnicode(OsString),
    /// An option or synonym was registered twice.
    #[error("an option with the name '{0}' already exists")]
    DuplicateOption(String),
    /// A token failed hard and was skipped by the scanner.
    #[error("on processing option '{arg}': {source}")]
    Processing {
        arg: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotAnOption(_) => ErrorKind::NotAnOption,
            Error::MissingValue(_) => ErrorKind::MissingValue,
            Error::UnknownOption(_) => ErrorKind::UnknownOption,
            Error::InvalidValue { .. } => ErrorKind::InvalidValue,
            Error::InvalidUnicode(_) => ErrorKind::InvalidUnicode,
            Error::DuplicateOption(_) => ErrorKind::DuplicateOption,
            Error::Processing { .. } => ErrorKind::Processing,
        }
    }

    /// Returns the option name this error is about, if there is one.
    pub fn option_name(&self) -> Option<&str> {
        match self {
            Error::MissingValue(name)
            | Error::UnknownOption(name)
            | Error::DuplicateOption(name)
            | Error::InvalidValue { name, .. } => Some(name),
            Error::Processing { source, .. } => source.option_name(),
            Error::NotAnOption(_) | Error::InvalidUnicode(_) => None,
        }
    }
}

/// The kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// See [`Error::NotAnOption`].
    NotAnOption,
    /// See [`Error::MissingValue`].
    MissingValue,
    /// See [`Error::UnknownOption`].
    UnknownOption,
    /// See [`Error::InvalidValue`].
    InvalidValue,
    /// See [`Error::InvalidUnicode`].
    InvalidUnicode,
    /// See [`Error::DuplicateOption`].
    DuplicateOption,
    /// See [`Error::Processing`].
    Processing,
}
