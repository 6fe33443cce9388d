use pretty_assertions::assert_eq;

use rox::diagnostic::{Diagnostic, Location};
use rox::error::{LoxError, Stage};
use rox::output::CapturedOutput;
use rox::parser::ParserConfig;
use rox::session::Session;

fn first_error(source: &str) -> LoxError {
    let mut session = Session::new(Box::new(CapturedOutput::new()), ParserConfig::default());

    session
        .run(source)
        .expect_err("expected the program to fail")
        .remove(0)
}

#[test]
fn test_locate_first_line() {
    let location = Location::locate("var x = 1;", 4);

    assert_eq!(location.line, 1);
    assert_eq!(location.column, 4);
    assert_eq!(location.line_text, "var x = 1;");
}

#[test]
fn test_locate_later_line() {
    let source = "print 1;\r\nprint 2;\nprint 3;";
    let location = Location::locate(source, source.find('3').unwrap());

    assert_eq!(location.line, 3);
    assert_eq!(location.column, 6);
    assert_eq!(location.line_text, "print 3;");

    let crlf = Location::locate(source, source.find('2').unwrap());
    assert_eq!(crlf.line, 2);
    assert_eq!(crlf.line_text, "print 2;");
}

#[test]
fn test_locate_end_of_input() {
    let source = "print 1\n";
    let location = Location::locate(source, source.len());

    assert_eq!(location.line, 2);
    assert_eq!(location.column, 0);
    assert_eq!(location.line_text, "");
}

#[test]
fn test_column_counts_characters() {
    let location = Location::locate("\"é\" $", 5);

    assert_eq!(location.column, 4);
}

#[test]
fn test_runtime_error_rendering() {
    let source = "var a = 1;\nprint -\"x\";";
    let error = first_error(source);

    assert_eq!(
        Diagnostic::new(source, &error).to_string(),
        "[line 2] Runtime Error: Operand must be a number.\nprint -\"x\";\n      ^"
    );
}

#[test]
fn test_parse_error_rendering() {
    let source = "print (1;";
    let error = first_error(source);

    let diagnostic = Diagnostic::new(source, &error);

    assert_eq!(diagnostic.stage, Stage::Parser);
    assert_eq!(
        diagnostic.to_string(),
        "[line 1] Parser Error: Expect ')' after expression.\nprint (1;\n        ^"
    );
}

#[test]
fn test_scanner_error_rendering() {
    let source = "print 1;\n  @";
    let error = first_error(source);

    assert_eq!(
        Diagnostic::new(source, &error).to_string(),
        "[line 2] Scanner Error: Unexpected character.\n  @\n  ^"
    );
}

#[test]
fn test_error_without_location() {
    let error = LoxError::Internal("escaped".into());

    assert_eq!(
        Diagnostic::new("", &error).to_string(),
        "Runtime Error: Internal error: escaped"
    );
}
