mod common;

use std::ffi::OsStr;

use common::{recorder, Recorder};
use options_parser::{Error, Parser};

fn scan(registry: &mut Recorder, args: &[&str]) -> (bool, Vec<Error>) {
    let mut errors = Vec::new();
    let ok = Parser::new(registry)
        .with_reporter(&mut errors)
        .parse_args(args.iter().copied());
    (ok, errors)
}

fn check(registry: &mut Recorder, arg: &str, next: Option<&str>) -> Result<usize, Error> {
    Parser::new(registry)
        .with_reporter(Vec::new())
        .check(OsStr::new(arg), next.map(OsStr::new))
}

#[test]
fn test_sole_positional_is_config() {
    let mut registry = recorder();
    let (ok, errors) = scan(&mut registry, &["scenario.sumocfg"]);
    assert!(ok);
    assert!(errors.is_empty());
    assert_eq!(registry.assigned(), vec![("c", "scenario.sumocfg")]);
}

#[test]
fn test_sole_positional_custom_option() {
    let mut registry = recorder();
    let ok = Parser::new(&mut registry)
        .config_option("file")
        .with_reporter(Vec::new())
        .parse_args(["net.xml"]);
    assert!(ok);
    assert_eq!(registry.assigned(), vec![("file", "net.xml")]);
}

#[test]
fn test_program_name_is_skipped() {
    let mut registry = recorder();
    let mut parser = Parser::new(&mut registry);
    assert!(parser.parse(["/usr/local/bin/sim", "--verbose"]));
    assert_eq!(parser.prog(), "sim");
    assert_eq!(parser.raw_prog(), Some(OsStr::new("/usr/local/bin/sim")));
    drop(parser);
    assert_eq!(registry.assigned(), vec![("verbose", "true")]);
}

#[test]
fn test_program_name_only() {
    let mut registry = recorder();
    assert!(Parser::new(&mut registry).parse(["sim"]));
    assert!(registry.assigned().is_empty());
}

#[test]
fn test_long_equals_and_spaced_agree() {
    let mut with_equals = recorder();
    let mut spaced = recorder();
    assert!(scan(&mut with_equals, &["--file=x.txt", "--name=Bob"]).0);
    assert!(scan(&mut spaced, &["--file", "x.txt", "--name", "Bob"]).0);
    assert_eq!(with_equals.assigned(), spaced.assigned());
    assert_eq!(
        spaced.assigned(),
        vec![("file", "x.txt"), ("name", "Bob")]
    );
}

#[test]
fn test_long_equals_splits_once() {
    let mut registry = recorder();
    assert!(scan(&mut registry, &["--name=a=b", "--file="]).0);
    assert_eq!(registry.assigned(), vec![("name", "a=b"), ("file", "")]);
}

#[test]
fn test_long_boolean() -> Result<(), Error> {
    let mut registry = recorder();
    assert!(scan(&mut registry, &["--verbose", "--quiet"]).0);
    assert_eq!(
        registry.assigned(),
        vec![("verbose", "true"), ("quiet", "true")]
    );

    let mut registry = recorder();
    assert_eq!(check(&mut registry, "--verbose", None)?, 1);
    assert_eq!(check(&mut registry, "--verbose", Some("--file"))?, 1);
    assert_eq!(check(&mut registry, "--verbose", Some("false"))?, 2);
    assert_eq!(
        registry.assigned(),
        vec![
            ("verbose", "true"),
            ("verbose", "true"),
            ("verbose", "false")
        ]
    );

    Ok(())
}

#[test]
fn test_long_value_may_look_like_option() -> Result<(), Error> {
    let mut registry = recorder();
    assert_eq!(check(&mut registry, "--name", Some("-5"))?, 2);
    assert_eq!(registry.assigned(), vec![("name", "-5")]);

    Ok(())
}

#[test]
fn test_long_value_without_lookahead() {
    let mut registry = recorder();
    assert!(scan(&mut registry, &["--file"]).0);
    assert_eq!(registry.assigned(), vec![("file", "true")]);
}

#[test]
fn test_bundled_booleans() -> Result<(), Error> {
    let mut registry = recorder();
    assert_eq!(check(&mut registry, "-ab", Some("--file"))?, 1);
    assert_eq!(registry.assigned(), vec![("a", "true"), ("b", "true")]);

    let mut registry = recorder();
    assert_eq!(check(&mut registry, "-vqa", Some("x.txt"))?, 2);
    assert_eq!(
        registry.assigned(),
        vec![("v", "true"), ("q", "true"), ("a", "x.txt")]
    );

    Ok(())
}

#[test]
fn test_abbreviation_value_forms() -> Result<(), Error> {
    let mut registry = recorder();
    assert_eq!(check(&mut registry, "-fvalue", Some("next"))?, 1);
    assert_eq!(check(&mut registry, "-f=value", Some("next"))?, 1);
    assert_eq!(check(&mut registry, "-f", Some("value"))?, 2);
    assert_eq!(check(&mut registry, "-fvalue", None)?, 1);
    assert_eq!(
        registry.assigned(),
        vec![
            ("f", "value"),
            ("f", "value"),
            ("f", "value"),
            ("f", "value")
        ]
    );

    Ok(())
}

#[test]
fn test_abbreviation_strips_single_equal_sign() {
    let mut registry = recorder();
    assert!(scan(&mut registry, &["-f==x", "-x=-3"]).0);
    assert_eq!(registry.assigned(), vec![("f", "=x"), ("x", "-3")]);
}

#[test]
fn test_abbreviation_spaced_value_may_look_like_option() {
    let mut registry = recorder();
    assert!(scan(&mut registry, &["-x", "-3", "-v"]).0);
    assert_eq!(registry.assigned(), vec![("x", "-3"), ("v", "true")]);
}

#[test]
fn test_boolean_then_value_switch() -> Result<(), Error> {
    let mut registry = recorder();
    assert_eq!(check(&mut registry, "-vf", Some("out.txt"))?, 2);
    assert_eq!(registry.assigned(), vec![("v", "true"), ("f", "out.txt")]);

    Ok(())
}

#[test]
fn test_value_switch_takes_rest_of_bundle() -> Result<(), Error> {
    let mut registry = recorder();
    assert_eq!(check(&mut registry, "-vfq", Some("out.txt"))?, 1);
    assert_eq!(registry.assigned(), vec![("v", "true"), ("f", "q")]);

    Ok(())
}

#[test]
fn test_trailing_boolean_abbreviation() -> Result<(), Error> {
    let mut registry = recorder();
    assert_eq!(check(&mut registry, "-v", Some("no"))?, 2);
    assert_eq!(check(&mut registry, "-q", Some("-v"))?, 1);
    assert_eq!(check(&mut registry, "-q", None)?, 1);
    assert_eq!(
        registry.assigned(),
        vec![("v", "no"), ("q", "true"), ("q", "true")]
    );

    Ok(())
}

#[test]
fn test_lone_dash() {
    let mut registry = recorder();
    assert!(scan(&mut registry, &["-", "--verbose"]).0);
    assert_eq!(registry.assigned(), vec![("verbose", "true")]);
}

#[test]
fn test_mixed_command_line() {
    let mut registry = Recorder::new(&["c", "verbose"], &["name", "x"]);
    let (ok, errors) = scan(&mut registry, &["-c", "--verbose", "--name=Bob", "-x", "5"]);
    assert!(ok);
    assert!(errors.is_empty());
    assert_eq!(
        registry.assigned(),
        vec![
            ("c", "true"),
            ("verbose", "true"),
            ("name", "Bob"),
            ("x", "5")
        ]
    );
}

#[test]
fn test_value_abbreviation_swallows_next_option() {
    let mut registry = recorder();
    assert!(scan(&mut registry, &["-c", "--verbose", "--name=Bob"]).0);
    assert_eq!(
        registry.assigned(),
        vec![("c", "--verbose"), ("name", "Bob")]
    );
}

#[test]
fn test_assignments_keep_order() {
    let mut registry = recorder();
    assert!(scan(&mut registry, &["-f", "a", "--file=b", "-fc"]).0);
    assert_eq!(
        registry.assigned(),
        vec![("f", "a"), ("file", "b"), ("f", "c")]
    );
}

#[test]
fn test_free_function() {
    let mut registry = recorder();
    assert!(options_parser::parse(
        &mut registry,
        ["sim", "--end", "100", "-vq"]
    ));
    assert_eq!(
        registry.assigned(),
        vec![("end", "100"), ("v", "true"), ("q", "true")]
    );
}
