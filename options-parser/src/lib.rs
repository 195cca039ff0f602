//! This crate implements the command line scanner of a simulation tool.  It
//! walks the command line once, left to right, and forwards every option it
//! finds as a `name = value` assignment into an options [`Registry`].
//!
//! The scanner itself knows nothing about the options.  Whether a switch is a
//! boolean flag, what type a value has and which abbreviation belongs to
//! which long option is the registry's business.  [`Options`] is a ready to
//! use typed registry, but anything implementing [`Registry`] works.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use options_parser::{Error, Options, Parser};
//!
//! fn main() -> Result<(), Error> {
//!     let mut options = Options::new();
//!     options.add("configuration-file", PathBuf::new())?;
//!     options.add_synonym("configuration-file", "c")?;
//!     options.add("verbose", false)?;
//!     options.add_synonym("verbose", "v")?;
//!     options.add("end", 3600i64)?;
//!     options.add_synonym("end", "e")?;
//!
//!     let ok = Parser::new(&mut options).parse(["sim", "-ve", "7200", "--verbose=false"]);
//!     assert!(ok);
//!     assert_eq!(options.get_int("end"), Some(7200));
//!     assert_eq!(options.get_bool("verbose"), Some(false));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Grammar
//!
//! | Form                          | Example               | Assigns                 |
//! |-------------------------------|-----------------------|-------------------------|
//! | long option with `=`          | `--file=x.txt`        | `file = x.txt`          |
//! | long boolean switch           | `--verbose`           | `verbose = true`        |
//! | long option, separate value   | `--file x.txt`        | `file = x.txt`          |
//! | bundled boolean abbreviations | `-vq`                 | `v = true`, `q = true`  |
//! | abbreviation, inline value    | `-fx.txt`, `-f=x.txt` | `f = x.txt`             |
//! | abbreviation, separate value  | `-f x.txt`            | `f = x.txt`             |
//! | sole positional argument      | `config.xml`          | `c = config.xml`        |
//!
//! A long boolean switch only takes the next argument as its value if that
//! argument does not start with `-`, so `--verbose --end 10` works as
//! expected while `--verbose false` assigns `false`.  The same holds for a
//! boolean abbreviation that is the last character of its argument.
//!
//! Within a bundle of abbreviations every boolean switch is set to `true`
//! until the first non-boolean switch is found.  That one takes the rest of
//! the argument as its value (one leading `=` is stripped) or, if nothing
//! follows it, the next argument.
//!
//! # Error Handling
//!
//! The scanner never stops at the first problem.  Every problem is handed
//! to a [`Report`] sink (by default [`LogReport`] which writes through the
//! `log` crate), the overall result is marked as failed and scanning goes
//! on.  Problems that prevent interpreting an argument at all (for instance
//! an abbreviation the registry does not know) are wrapped into
//! [`Error::Processing`] and the offending argument is skipped.  That way a
//! single run reports everything that is wrong with a command line.
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

mod error;
mod options;

pub use crate::error::{Error, ErrorKind};
pub use crate::options::{Options, ParseBoolError, Registry, Value};

/// The option a lone positional argument is assigned to by default.
pub const DEFAULT_CONFIG_OPTION: &str = "c";

/// A sink for problems found while scanning.
pub trait Report {
    /// Receives a single problem.
    fn report(&mut self, err: Error);
}

/// Reports problems through [`log::error!`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReport;

impl Report for LogReport {
    fn report(&mut self, err: Error) {
        log::error!("{}", err);
    }
}

impl Report for Vec<Error> {
    fn report(&mut self, err: Error) {
        self.push(err);
    }
}

impl<T: Report + ?Sized> Report for &mut T {
    fn report(&mut self, err: Error) {
        (**self).report(err)
    }
}

/// Scans a command line into a [`Registry`].
///
/// The parser borrows the registry for its lifetime and writes into it
/// strictly in command line order, so an option given twice ends up with
/// whatever the registry makes of the second assignment.
pub struct Parser<'a, R: Registry + ?Sized> {
    registry: &'a mut R,
    reporter: Box<dyn Report + 'a>,
    prog: Option<OsString>,
    config_option: Option<String>,
    ok: bool,
}

impl<R: Registry + ?Sized> fmt::Debug for Parser<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("prog", &self.prog)
            .field("config_option", &self.config_option)
            .field("ok", &self.ok)
            .finish()
    }
}

impl<'a, R: Registry + ?Sized> Parser<'a, R> {
    /// Creates a parser writing into the given registry.
    ///
    /// Problems are reported through [`LogReport`] until another sink is
    /// installed with [`with_reporter`](Self::with_reporter).
    pub fn new(registry: &'a mut R) -> Parser<'a, R> {
        Parser {
            registry,
            reporter: Box::new(LogReport),
            prog: None,
            config_option: Some(DEFAULT_CONFIG_OPTION.to_string()),
            ok: true,
        }
    }

    /// Replaces the sink problems are reported to.
    pub fn with_reporter<S: Report + 'a>(mut self, reporter: S) -> Parser<'a, R> {
        self.reporter = Box::new(reporter);
        self
    }

    /// Sets the option that receives a lone positional argument.
    pub fn config_option(mut self, name: &str) -> Parser<'a, R> {
        self.config_option = Some(name.to_string());
        self
    }

    /// Treats a lone positional argument like any other stray argument.
    pub fn disable_config_shortcut(mut self) -> Parser<'a, R> {
        self.config_option = None;
        self
    }

    /// Returns the normalized program name (first argument).
    ///
    /// Only available after [`parse`](Self::parse) or
    /// [`parse_env`](Self::parse_env).  This will only have the file name
    /// portion of the first argument if it was passed as full path.
    pub fn prog(&self) -> &str {
        self.raw_prog()
            .map(Path::new)
            .and_then(|x| x.file_name())
            .and_then(|x| x.to_str())
            .unwrap_or_default()
    }

    /// Returns the raw first argument.
    pub fn raw_prog(&self) -> Option<&OsStr> {
        self.prog.as_deref()
    }

    /// Did everything so far go through without problems?
    pub fn ok(&self) -> bool {
        self.ok
    }

    /// Scans the command line of the current process.
    pub fn parse_env(&mut self) -> bool {
        self.parse(std::env::args_os())
    }

    /// Scans a full command line.
    ///
    /// The first argument must be the name of the program, it is not
    /// scanned.  Returns `true` if every argument was turned into a valid
    /// assignment.
    pub fn parse<I, S>(&mut self, argv: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        self.prog = argv.next();
        let args: Vec<OsString> = argv.collect();
        self.scan(&args)
    }

    /// Scans just the arguments, without a program name in front.
    pub fn parse_args<I, S>(&mut self, args: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        self.scan(&args)
    }

    fn scan(&mut self, args: &[OsString]) -> bool {
        self.ok = true;

        if let ([only], Some(name)) = (args, self.config_option.clone()) {
            if !starts_with_dash(only) {
                match os_str_to_str(only) {
                    Ok(value) => {
                        self.assign(&name, value);
                    }
                    Err(err) => self.fail(processing_error(only, err)),
                }
                return self.ok;
            }
        }

        let mut idx = 0;
        while idx < args.len() {
            let next = args.get(idx + 1).map(OsString::as_os_str);
            match self.check(&args[idx], next) {
                Ok(consumed) => idx += consumed,
                Err(err) => {
                    self.fail(processing_error(&args[idx], err));
                    idx += 1;
                }
            }
        }
        self.ok
    }

    /// Processes a single argument, with the following one as lookahead.
    ///
    /// Returns how many arguments were consumed (1 or 2).  Rejected
    /// assignments and stray arguments are reported and clear the
    /// [`ok`](Self::ok) flag without failing.  An `Err` means the argument
    /// could not be interpreted at all, [`parse`](Self::parse) reports it and
    /// skips exactly that one argument.
    pub fn check(&mut self, arg: &OsStr, next: Option<&OsStr>) -> Result<usize, Error> {
        let arg = os_str_to_str(arg)?;
        log::trace!("checking {:?} (next: {:?})", arg, next);

        if !arg.starts_with('-') {
            self.fail(Error::NotAnOption(arg.to_string()));
            return Ok(1);
        }

        match arg.strip_prefix("--") {
            Some(long) => self.check_long(long, next),
            None => self.check_abbreviations(&arg[1..], next),
        }
    }

    fn check_long(&mut self, name: &str, next: Option<&OsStr>) -> Result<usize, Error> {
        if let Some((name, value)) = name.split_once('=') {
            self.assign(name, value);
            return Ok(1);
        }

        // a boolean switch does not swallow a following option
        let value = match next {
            Some(value) if self.registry.is_bool(name)? && starts_with_dash(value) => None,
            next => next,
        };
        match value {
            Some(value) => {
                self.assign(name, os_str_to_str(value)?);
                Ok(2)
            }
            None => {
                self.assign(name, "true");
                Ok(1)
            }
        }
    }

    fn check_abbreviations(&mut self, switches: &str, next: Option<&OsStr>) -> Result<usize, Error> {
        for (pos, switch) in switches.char_indices() {
            let name = switch.to_string();
            let rest = &switches[pos + switch.len_utf8()..];

            if self.registry.is_bool(&name)? {
                match next {
                    Some(value) if rest.is_empty() && !starts_with_dash(value) => {
                        self.assign(&name, os_str_to_str(value)?);
                        return Ok(2);
                    }
                    _ => {
                        self.assign(&name, "true");
                    }
                }
            } else {
                // the first non-boolean switch ends the bundle
                return match next {
                    Some(value) if rest.is_empty() => {
                        self.assign(&name, os_str_to_str(value)?);
                        Ok(2)
                    }
                    _ => {
                        self.process_non_boolean_single_switch(switch, rest);
                        Ok(1)
                    }
                };
            }
        }

        // only boolean switches in this argument
        Ok(1)
    }

    /// Assigns the value packed into the same argument as its switch
    /// (`-fvalue` or `-f=value`).
    fn process_non_boolean_single_switch(&mut self, switch: char, rest: &str) -> bool {
        let value = rest.strip_prefix('=').unwrap_or(rest);
        if value.is_empty() {
            self.fail(Error::MissingValue(switch.to_string()));
            return false;
        }
        self.assign(&switch.to_string(), value)
    }

    fn assign(&mut self, name: &str, value: &str) -> bool {
        match self.registry.set(name, value) {
            Ok(()) => {
                log::debug!("set option {:?} to {:?}", name, value);
                true
            }
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    fn fail(&mut self, err: Error) {
        self.ok = false;
        self.reporter.report(err);
    }
}

/// Scans a full command line (program name first) into `registry`,
/// reporting problems through [`LogReport`].
pub fn parse<R, I, S>(registry: &mut R, argv: I) -> bool
where
    R: Registry + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    Parser::new(registry).parse(argv)
}

fn processing_error(arg: &OsStr, source: Error) -> Error {
    Error::Processing {
        arg: arg.to_string_lossy().into_owned(),
        source: Box::new(source),
    }
}

fn starts_with_dash(s: &OsStr) -> bool {
    s.as_encoded_bytes().first() == Some(&b'-')
}

fn os_str_to_str(s: &OsStr) -> Result<&str, Error> {
    s.to_str()
        .ok_or_else(|| Error::InvalidUnicode(s.to_owned()))
}
