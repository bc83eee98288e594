//! End-to-end expression evaluation through the public parse entry point.

use std::io;

use bmath::parser::parse::{Context, ParseError};

fn quiet_context() -> Context {
    Context::with_sink(128, Box::new(io::sink()))
}

fn eval(input: &str) -> Result<u64, ParseError> {
    quiet_context().parse(input)
}

fn check(cases: &[(&str, u64)]) {
    for (input, expected) in cases {
        assert_eq!(eval(input), Ok(*expected), "for expression {:?}", input);
    }
}

fn check_invalid(inputs: &[&str]) {
    for input in inputs {
        assert_eq!(
            eval(input),
            Err(ParseError::Invalid),
            "for expression {:?}",
            input
        );
    }
}

#[test]
fn test_basic_validation() {
    assert_eq!(eval(""), Err(ParseError::NothingToParse));

    let too_long = "1".repeat(129);
    assert_eq!(
        quiet_context().parse(&too_long),
        Err(ParseError::ExpressionTooLong)
    );

    check_invalid(&[
        ".!@#$`.,<>?/\\;:'\"[]{}=_",
        "1.0",
        "1 || 3",
        "2 % 0",
        "2 / 0",
        "   ",
    ]);

    assert_eq!(eval("\t\n    1 "), Ok(1));
}

#[test]
fn test_factors() {
    check(&[
        // a bare hex prefix evaluates to zero
        ("0x", 0),
        ("(1)", 1),
        ("1", 1),
        ("0x1", 1),
        ("(0xa)", 10),
        ("~(0)", u64::MAX),
    ]);
}

#[test]
fn test_binary_operators() {
    check(&[
        ("1 | 2", 3),
        ("2 & 2", 2),
        ("1 & 2", 0),
        ("3 ^ 2", 1),
        ("1 << 3", 8),
        ("8 >> 1", 4),
        ("~0", u64::MAX),
        ("2 * 1", 2),
        ("7 / 2", 3),
        ("2 % 2", 0),
        ("5 % 3", 2),
        ("1+1", 2),
        ("1-1", 0),
    ]);
}

#[test]
fn test_precedence() {
    check(&[
        // & binds tighter than ^ binds tighter than |
        ("1 & 2 ^ 3 | 4", 1 & 2 ^ 3 | 4),
        ("2 + 3 * 4", 14),
        ("6 / 2 - 1", 2),
        // additive binds tighter than shift
        ("1 << 1 + 1", 4),
        ("4 & 1 << 2", 4),
        ("2 ^ 3 & 1", 3),
        ("(1 | 2) * 2", 6),
    ]);
}

#[test]
fn test_unary_prefixes() {
    check(&[
        ("-1", u64::MAX),
        ("+5", 5),
        ("- - 2", 2),
        // the operator nearest the operand applies first
        ("~-16", 15),
        ("-~16", 17),
        ("~~~~~~~~~~16", 16),
        ("1 - -1", 2),
    ]);
}

#[test]
fn test_prefix_depth_limit() {
    // ten prefix operators are accepted, an eleventh is not
    assert_eq!(eval("~~~~~~~~~~16"), Ok(16));
    assert_eq!(eval("~~~~~~~~~~~16"), Err(ParseError::Invalid));
    assert_eq!(eval("+-+-+-+-+-~16"), Err(ParseError::Invalid));
}

#[test]
fn test_hex_round_trip() {
    assert_eq!(eval("0x14"), eval("20"));
    assert_eq!(eval("0Xf0"), Ok(240));
    assert_eq!(eval("0xF0"), Ok(240));
    assert_eq!(eval("0xffffffffffffffff"), Ok(u64::MAX));
    assert_eq!(eval("0x12345678123456781"), Err(ParseError::Invalid));
}

#[test]
fn test_wraparound_arithmetic() {
    check(&[
        ("0 - 1", u64::MAX),
        ("0xffffffffffffffff + 1", 0),
        ("0xffffffffffffffff * 2", u64::MAX - 1),
    ]);
}

#[test]
fn test_builtin_calls() {
    check(&[
        ("align(7,8)", 8),
        ("align(8,8)", 8),
        ("align_down(9, 8)", 8),
        ("mask(2)", 0xffff),
        ("mask()", 0),
        ("bswap(0xabcd)", 0xcdab),
        ("popcnt(0xff)", 8),
        ("ctz(8)", 3),
        ("ctz(0)", 0),
        ("clz(1, 8)", 63),
        // arguments are full expressions, calls nest
        ("align(mask(1), 16)", 256),
        ("1 + popcnt(2 | 1)", 3),
        ("popcnt(mask(8))", 64),
    ]);
}

#[test]
fn test_builtin_errors() {
    check_invalid(&[
        "align(1)",
        "align()",
        "mask(9)",
        "mask(1, 2)",
        "clz(1, 9)",
        "clz(1, 0)",
        // an eighth argument does not fit the call frame
        "popcnt(1,2,3,4,5,6,7,8)",
    ]);
}

#[test]
fn test_identifier_errors() {
    check_invalid(&[
        "foo",
        "foo(1)",
        // calling a variable is a parse error
        "$x(1)",
        // a bare '$' names nothing
        "$ + 1",
    ]);
}

#[test]
fn test_unmatched_parens() {
    check_invalid(&["(1", "align(1,2", "()"]);
}

#[test]
fn test_idempotence() {
    let mut ctx = quiet_context();
    let first = ctx.parse("3 * 7 + 2");
    let second = ctx.parse("3 * 7 + 2");
    assert_eq!(first, Ok(23));
    assert_eq!(first, second);
}
