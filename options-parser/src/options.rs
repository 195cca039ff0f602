use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// The collaborator the [`Parser`](crate::Parser) writes into.
///
/// A registry knows which option names exist, whether an option is a
/// boolean switch, and how to turn a string into the option's typed value.
/// Abbreviations are plain one character names, it is up to the registry to
/// map them onto their long counterparts (see [`Options::add_synonym`]).
pub trait Registry {
    /// Is the named option a boolean switch?
    ///
    /// Fails with [`Error::UnknownOption`] if there is no such option.
    fn is_bool(&self, name: &str) -> Result<bool, Error>;

    /// Assigns a value given as string to the named option.
    fn set(&mut self, name: &str, value: &str) -> Result<(), Error>;
}

impl<R: Registry + ?Sized> Registry for &mut R {
    fn is_bool(&self, name: &str) -> Result<bool, Error> {
        (**self).is_bool(name)
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), Error> {
        (**self).set(name, value)
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Path(PathBuf),
}

impl Value {
    /// Returns a human readable name of the value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Path(_) => "path",
        }
    }

    /// Parses a string into a value of the same type as `self`.
    fn parse_like(&self, s: &str) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            Value::Bool(_) => Value::Bool(parse_bool(s)?),
            Value::Int(_) => Value::Int(s.parse()?),
            Value::Float(_) => Value::Float(s.parse()?),
            Value::String(_) => Value::String(s.to_string()),
            Value::Path(_) => Value::Path(PathBuf::from(s)),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Value {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::String(value)
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Value {
        Value::Path(value)
    }
}

/// Error for strings that do not spell a boolean.
#[derive(Debug, thiserror::Error)]
#[error("expected one of true/false, yes/no, on/off, t/f, x, 1/0")]
pub struct ParseBoolError;

fn parse_bool(s: &str) -> Result<bool, ParseBoolError> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "t" | "x" | "1" => Ok(true),
        "false" | "no" | "off" | "f" | "0" => Ok(false),
        _ => Err(ParseBoolError),
    }
}

#[derive(Debug)]
struct Entry {
    name: String,
    value: Value,
    default: Value,
    set: bool,
    description: Option<String>,
}

/// A container of typed options addressed by name or synonym.
///
/// Every option is registered with a default value which also fixes its
/// type.  Assignments through [`Registry::set`] are parsed according to
/// that type, later assignments replace earlier ones.
#[derive(Debug, Default)]
pub struct Options {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Options {
    /// Creates an empty container.
    pub fn new() -> Options {
        Options::default()
    }

    /// Registers a new option with its default value.
    pub fn add<V: Into<Value>>(&mut self, name: &str, default: V) -> Result<(), Error> {
        if self.index.contains_key(name) {
            return Err(Error::DuplicateOption(name.to_string()));
        }
        let default = default.into();
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(Entry {
            name: name.to_string(),
            value: default.clone(),
            default,
            set: false,
            description: None,
        });
        Ok(())
    }

    /// Makes `synonym` refer to the already registered option `name`.
    ///
    /// This is how abbreviations are wired up: `add_synonym("verbose", "v")`.
    pub fn add_synonym(&mut self, name: &str, synonym: &str) -> Result<(), Error> {
        let idx = self.lookup(name)?;
        if self.index.contains_key(synonym) {
            return Err(Error::DuplicateOption(synonym.to_string()));
        }
        self.index.insert(synonym.to_string(), idx);
        Ok(())
    }

    /// Attaches a description to an option.
    pub fn add_description(&mut self, name: &str, description: &str) -> Result<(), Error> {
        let idx = self.lookup(name)?;
        self.entries[idx].description = Some(description.to_string());
        Ok(())
    }

    /// Returns the description of an option.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.entry(name)?.description.as_deref()
    }

    /// Returns the current value of an option.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entry(name).map(|entry| &entry.value)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_path(&self, name: &str) -> Option<&Path> {
        match self.get(name)? {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    /// Was the option assigned since registration (or the last reset)?
    pub fn is_set(&self, name: &str) -> bool {
        self.entry(name).map_or(false, |entry| entry.set)
    }

    /// Does the option still hold its default value?
    pub fn is_default(&self, name: &str) -> bool {
        self.entry(name)
            .map_or(false, |entry| entry.value == entry.default)
    }

    /// Iterates over the primary names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Puts every option back to its default value.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.value = entry.default.clone();
            entry.set = false;
        }
    }

    fn lookup(&self, name: &str) -> Result<usize, Error> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownOption(name.to_string()))
    }

    fn entry(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }
}

impl Registry for Options {
    fn is_bool(&self, name: &str) -> Result<bool, Error> {
        let idx = self.lookup(name)?;
        Ok(matches!(self.entries[idx].default, Value::Bool(_)))
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let idx = self.lookup(name)?;
        let entry = &mut self.entries[idx];
        entry.value = entry
            .default
            .parse_like(value)
            .map_err(|source| Error::InvalidValue {
                name: name.to_string(),
                value: value.to_string(),
                source,
            })?;
        entry.set = true;
        Ok(())
    }
}
