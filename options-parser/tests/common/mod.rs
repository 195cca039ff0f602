use std::collections::HashSet;

use options_parser::{Error, Registry};

/// A registry that accepts everything it knows and records assignments.
#[derive(Debug, Default)]
pub struct Recorder {
    booleans: HashSet<String>,
    values: HashSet<String>,
    pub assignments: Vec<(String, String)>,
}

impl Recorder {
    pub fn new(booleans: &[&str], values: &[&str]) -> Recorder {
        Recorder {
            booleans: booleans.iter().map(|x| x.to_string()).collect(),
            values: values.iter().map(|x| x.to_string()).collect(),
            assignments: Vec::new(),
        }
    }

    pub fn assigned(&self) -> Vec<(&str, &str)> {
        self.assignments
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

impl Registry for Recorder {
    fn is_bool(&self, name: &str) -> Result<bool, Error> {
        if self.booleans.contains(name) {
            Ok(true)
        } else if self.values.contains(name) {
            Ok(false)
        } else {
            Err(Error::UnknownOption(name.to_string()))
        }
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), Error> {
        if !self.booleans.contains(name) && !self.values.contains(name) {
            return Err(Error::UnknownOption(name.to_string()));
        }
        self.assignments.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

/// The registry most tests run against.
pub fn recorder() -> Recorder {
    Recorder::new(
        &["verbose", "quiet", "v", "q", "a", "b"],
        &["file", "name", "c", "f", "x", "end"],
    )
}
