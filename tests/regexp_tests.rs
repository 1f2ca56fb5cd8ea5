use pyrite::options::{EcmaVersion, OptionsBuilder};
use pyrite::parse;

fn accepts(pattern: &str) {
    let source = format!("var re = {};", pattern);
    if let Err(err) = parse(&source, OptionsBuilder::new().build()) {
        panic!("expected {} to be accepted, got: {}", pattern, err);
    }
}

fn rejects(pattern: &str) -> String {
    let source = format!("var re = {};", pattern);
    match parse(&source, OptionsBuilder::new().build()) {
        Ok(_) => panic!("expected {} to be rejected", pattern),
        Err(err) => format!("{}", err),
    }
}

fn rejects_at(pattern: &str, version: EcmaVersion) -> String {
    let source = format!("var re = {};", pattern);
    match parse(&source, OptionsBuilder::new().ecma_version(version).build()) {
        Ok(_) => panic!("expected {} to be rejected at {:?}", pattern, version),
        Err(err) => format!("{}", err),
    }
}

fn accepts_at(pattern: &str, version: EcmaVersion) {
    let source = format!("var re = {};", pattern);
    if let Err(err) = parse(&source, OptionsBuilder::new().ecma_version(version).build()) {
        panic!("expected {} to be accepted at {:?}, got: {}", pattern, version, err);
    }
}

#[test]
fn test_basic_patterns_accepted() {
    accepts("/a/");
    accepts("/ab+c/gi");
    accepts("/[a-z0-9]+/i");
    accepts("/a|b|/");
    accepts("/(x)(?:y)/");
    accepts("/a{2}b{1,}c{1,3}/");
    accepts("/a*?b+?c??/");
    accepts("/\\d\\D\\s\\S\\w\\W/");
    accepts("/\\n\\t\\x41\\u0041\\0/");
    accepts("/[\\b]/");
    accepts("/^ab$/m");
    accepts("/\\b\\B/");
    accepts("/a.c/s");
}

#[test]
fn test_lookaround() {
    accepts("/(?=x)(?!y)/");
    accepts("/(?<=a)b/");
    accepts("/(?<!a)b/");

    // Lookbehind requires ES2018
    rejects_at("/(?<=a)b/u", EcmaVersion::E8);
}

#[test]
fn test_unicode_mode_escapes() {
    accepts("/\\u{1F600}/u");
    accepts("/\\uD83D\\uDE00/u");
    accepts("/a\\/b/");

    // Identity escapes are restricted in unicode mode
    rejects("/\\a/u");
    accepts("/\\a/");
}

#[test]
fn test_quantifier_bounds() {
    let message = rejects("/a{3,2}/u");
    assert!(
        message.contains("numbers out of order in {} quantifier"),
        "unexpected message: {}",
        message
    );

    rejects("/x{2,1}/");
    accepts("/x{2,2}/");

    // Without the u flag a lone brace is a literal character
    accepts("/a{/");
    rejects("/a{/u");
}

#[test]
fn test_nothing_to_repeat() {
    let message = rejects("/+a/");
    assert!(message.contains("Nothing to repeat"), "unexpected message: {}", message);

    rejects("/a|*/");
    rejects("/{2}/u");
}

#[test]
fn test_group_errors() {
    let message = rejects("/(a/");
    assert!(message.contains("Unterminated group"), "unexpected message: {}", message);

    let message = rejects("/a)/");
    assert!(message.contains("Unmatched ')'"), "unexpected message: {}", message);

    let message = rejects("/[z-a]/");
    assert!(
        message.contains("Range out of order in character class"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_named_groups() {
    accepts("/(?<name>x)\\k<name>/");
    accepts("/(?<first>a)(?<second>b)/");

    let message = rejects("/(?<name>x)\\k<missing>/");
    assert!(
        message.contains("Invalid named capture referenced"),
        "unexpected message: {}",
        message
    );

    let message = rejects("/\\k<missing>/u");
    assert!(
        message.contains("Invalid named capture referenced"),
        "unexpected message: {}",
        message
    );

    // Without named groups and without the u flag, \k is a literal escape
    accepts("/\\k<missing>/");

    let message = rejects("/(?<dup>a)(?<dup>b)/");
    assert!(
        message.contains("Duplicate capture group name"),
        "unexpected message: {}",
        message
    );
}

#[test]
fn test_backreferences() {
    accepts("/(a)\\1/");
    accepts("/\\1(a)/u");

    // A numbered reference beyond the group count is invalid in unicode mode
    rejects("/(a)\\2/u");
    // Outside unicode mode it falls back to an octal escape
    accepts("/(a)\\2/");
}

#[test]
fn test_unicode_property_escapes() {
    accepts("/\\p{Script=Greek}/u");
    accepts("/\\p{General_Category=Letter}/u");
    accepts("/\\p{Letter}/u");
    accepts("/\\p{Lu}/u");
    accepts("/\\P{Alphabetic}/u");
    accepts("/\\p{ID_Start}/u");

    // Property escapes arrived in ES2018
    rejects_at("/\\p{Script=Greek}/u", EcmaVersion::E8);
    accepts_at("/\\p{Script=Greek}/u", EcmaVersion::E9);

    let message = rejects("/\\p{NotAProperty}/u");
    assert!(message.contains("Invalid property name"), "unexpected message: {}", message);

    let message = rejects("/\\p{Script=NotAScript}/u");
    assert!(message.contains("Invalid property value"), "unexpected message: {}", message);

    // Outside unicode mode \p is an identity escape
    accepts("/\\p{Anything}/");
}

#[test]
fn test_flags() {
    let message = rejects("/a/gg");
    assert!(
        message.contains("Duplicate regular expression flag"),
        "unexpected message: {}",
        message
    );

    let message = rejects("/a/q");
    assert!(
        message.contains("Invalid regular expression flag"),
        "unexpected message: {}",
        message
    );

    // Newer flags are rejected by older editions
    rejects_at("/a/u", EcmaVersion::E5);
    rejects_at("/a/s", EcmaVersion::E8);
    accepts_at("/a/s", EcmaVersion::E9);
}

#[test]
fn test_unterminated_literals() {
    let message = rejects("/abc");
    assert!(
        message.contains("Unterminated regular expression"),
        "unexpected message: {}",
        message
    );

    // An unclosed class swallows the would-be terminator
    rejects("/[a/");
}

#[test]
fn test_class_escapes() {
    accepts("/[\\d-x]/");
    // A class escape cannot bound a range in unicode mode
    rejects("/[\\d-x]/u");
    accepts("/[\\-]/u");
    accepts("/[a\\-z]/u");
}

#[test]
fn test_error_position_is_literal_start() {
    let source = "var re =\n/a{3,2}/u;";
    let err = parse(source, OptionsBuilder::new().build()).unwrap_err();
    // Reported at the start of the literal: line 2, column 0
    let message = format!("{}", err);
    assert!(message.ends_with("(2:0)"), "unexpected message: {}", message);
}
