//! Scans the command line of a small traffic simulation and prints the
//! resulting settings.
//!
//! Try `cargo run --example simulation -- -v --end 3600 -n net.xml` or set
//! `RUST_LOG=debug` to see every assignment.
use std::path::PathBuf;

use options_parser::{Error, Options, Parser};

fn build_options() -> Result<Options, Error> {
    let mut options = Options::new();
    options.add("configuration-file", PathBuf::new())?;
    options.add_synonym("configuration-file", "c")?;
    options.add_description("configuration-file", "Loads the named config on startup")?;
    options.add("net-file", PathBuf::new())?;
    options.add_synonym("net-file", "n")?;
    options.add_description("net-file", "Load road network description from FILE")?;
    options.add("begin", 0i64)?;
    options.add_synonym("begin", "b")?;
    options.add_description("begin", "Defines the begin time; the simulation starts then")?;
    options.add("end", -1i64)?;
    options.add_synonym("end", "e")?;
    options.add_description("end", "Defines the end time; the simulation ends then")?;
    options.add("step-length", 1.0f64)?;
    options.add_description("step-length", "Defines the step duration in seconds")?;
    options.add("verbose", false)?;
    options.add_synonym("verbose", "v")?;
    options.add_description("verbose", "Switches to verbose output")?;
    options.add("help", false)?;
    options.add_synonym("help", "?")?;
    options.add_description("help", "Prints this screen")?;
    Ok(options)
}

fn print_help(options: &Options) {
    println!("USAGE:\n    simulation [OPTIONS] | simulation CONFIG\n\nOPTIONS:");
    for name in options.names() {
        let default = options
            .get(name)
            .map(ToString::to_string)
            .unwrap_or_default();
        println!(
            "    --{:<20} {} [{}]",
            name,
            options.description(name).unwrap_or_default(),
            default
        );
    }
}

fn main() {
    env_logger::init();

    let mut options = match build_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    if !Parser::new(&mut options).parse_env() {
        eprintln!("error: invalid command line, see --help");
        std::process::exit(1);
    }

    if options.get_bool("help") == Some(true) {
        print_help(&options);
        return;
    }

    for name in options.names() {
        if options.is_set(name) {
            if let Some(value) = options.get(name) {
                println!("{} = {}", name, value);
            }
        }
    }
}
