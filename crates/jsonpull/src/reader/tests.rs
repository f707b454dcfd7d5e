use rstest::rstest;

use crate::{Error, JsonReader, SyntaxError, Token};

fn reader(input: &str) -> JsonReader<&[u8]> {
    JsonReader::new(input.as_bytes())
}

#[test]
fn empty_array() {
    let mut r = reader("[]");
    assert_eq!(r.peek().unwrap(), Token::BeginArray);
    r.begin_array().unwrap();
    assert!(!r.has_next());
    r.end_array().unwrap();
    assert_eq!(r.peek().unwrap(), Token::EndDocument);
}

#[test]
fn array_of_values() {
    let mut r = reader(" [ null , true , -2, \"string\" ] ");
    r.begin_array().unwrap();
    assert!(r.has_next());
    r.next_null().unwrap();
    assert!(r.has_next());
    assert!(r.next_bool().unwrap());
    assert_eq!(r.next_i32().unwrap(), -2);
    assert_eq!(r.next_string().unwrap(), "string");
    assert!(!r.has_next());
    r.end_array().unwrap();
}

#[test]
fn unclosed_array_is_early_eof() {
    let mut r = reader(" [");
    assert!(matches!(
        r.begin_array(),
        Err(Error::Syntax(SyntaxError::UnexpectedEndOfInput))
    ));
}

#[test]
fn begin_array_on_object_is_state_error() {
    let mut r = reader("{}");
    assert!(matches!(r.begin_array(), Err(Error::IllegalState(_))));
}

#[test]
fn premature_end_array_is_state_error() {
    let mut r = reader("[null]");
    r.begin_array().unwrap();
    assert!(matches!(r.end_array(), Err(Error::IllegalState(_))));
}

#[test]
fn empty_object() {
    let mut r = reader("{}");
    assert_eq!(r.peek().unwrap(), Token::BeginObject);
    r.begin_object().unwrap();
    assert!(!r.has_next());
    r.end_object().unwrap();
}

#[test]
fn object_of_members() {
    let mut r = reader(r#"{"null":null,"boolean":true,"int":0,"float":-0.5,"string":"value"}"#);
    r.begin_object().unwrap();
    assert!(r.has_next());
    assert_eq!(r.next_name().unwrap(), "null");
    r.next_null().unwrap();
    assert!(r.has_next());
    assert_eq!(r.next_name().unwrap(), "boolean");
    assert!(r.next_bool().unwrap());
    assert_eq!(r.next_name().unwrap(), "int");
    assert_eq!(r.next_i64().unwrap(), 0);
    assert_eq!(r.next_name().unwrap(), "float");
    assert!((r.next_f64().unwrap() - -0.5).abs() < f64::EPSILON);
    assert_eq!(r.next_name().unwrap(), "string");
    assert_eq!(r.next_string().unwrap(), "value");
    assert!(!r.has_next());
    r.end_object().unwrap();
}

#[test]
fn begin_object_on_array_is_state_error() {
    let mut r = reader("[]");
    assert!(matches!(r.begin_object(), Err(Error::IllegalState(_))));
}

#[test]
fn premature_end_object_is_state_error() {
    let mut r = reader(r#"{"a":null}"#);
    r.begin_object().unwrap();
    assert!(matches!(r.end_object(), Err(Error::IllegalState(_))));
}

#[test]
fn nested_containers() {
    let mut r = reader(r#"{"array":[{}]}"#);
    r.begin_object().unwrap();
    assert_eq!(r.next_name().unwrap(), "array");
    r.begin_array().unwrap();
    r.begin_object().unwrap();
    r.end_object().unwrap();
    r.end_array().unwrap();
    r.end_object().unwrap();
    assert_eq!(r.peek().unwrap(), Token::EndDocument);
}

#[test]
fn skip_every_other_element() {
    let mut r = reader(r#"[null,null,false,null,1,null,"string",null,{"array":[{}]},null,[[],[]],null]"#);
    r.begin_array().unwrap();
    for _ in 0..6 {
        r.skip_value().unwrap();
        r.next_null().unwrap();
    }
    r.end_array().unwrap();
}

#[test]
fn skip_leaves_cursor_at_next_sibling() {
    let mut r = reader("[1,[2,3],4]");
    r.begin_array().unwrap();
    assert_eq!(r.next_i64().unwrap(), 1);
    r.skip_value().unwrap();
    assert_eq!(r.next_i64().unwrap(), 4);
    assert!(!r.has_next());
    r.end_array().unwrap();
}

#[test]
fn skip_of_pending_name_is_state_error() {
    let mut r = reader(r#"{"name":"value"}"#);
    r.begin_object().unwrap();
    assert!(matches!(r.skip_value(), Err(Error::IllegalState(_))));
}

#[test]
fn skip_before_container_close_is_state_error() {
    let mut r = reader("{}");
    r.begin_object().unwrap();
    assert!(matches!(r.skip_value(), Err(Error::IllegalState(_))));
}

#[test]
fn skip_of_truncated_container_is_early_eof() {
    let mut r = reader("[[1,2");
    r.begin_array().unwrap();
    assert!(matches!(
        r.skip_value(),
        Err(Error::Syntax(SyntaxError::UnexpectedEndOfInput))
    ));
}

#[test]
fn surrogate_pair_combines() {
    let mut r = reader(r#""\uD834\uDD1E""#);
    assert_eq!(r.next_string().unwrap(), "\u{1d11e}");
}

#[rstest]
#[case::low_before_high(r#""\uDD1E\uD834""#)]
#[case::lone_high(r#""\uD834""#)]
#[case::high_then_quote_escape(r#""\uD834\"""#)]
#[case::high_then_high(r#""\uD834\uD834""#)]
fn unpaired_surrogates_are_rejected(#[case] input: &str) {
    let mut r = reader(input);
    assert!(matches!(
        r.next_string(),
        Err(Error::Syntax(SyntaxError::UnpairedSurrogate(_)))
    ));
}

#[rstest]
#[case::bad_hex_in_high(r#""\uD83x\uDD1E""#)]
#[case::bad_hex_in_low(r#""\uD834\uDD1x""#)]
fn bad_escape_digits_are_rejected(#[case] input: &str) {
    let mut r = reader(input);
    assert!(matches!(
        r.next_string(),
        Err(Error::Syntax(SyntaxError::InvalidUnicodeEscape))
    ));
}

#[test]
fn raw_control_byte_in_string_is_rejected() {
    let mut r = reader("\"\x08\"");
    assert!(matches!(
        r.next_string(),
        Err(Error::Syntax(SyntaxError::ControlCharacter))
    ));
}

#[test]
fn quote_after_string_is_rejected() {
    let mut r = reader("\"\"\"");
    assert!(matches!(
        r.next_string(),
        Err(Error::Syntax(SyntaxError::InvalidCharacter('"')))
    ));
}

#[test]
fn unknown_escape_is_rejected() {
    let mut r = reader(r#""\x""#);
    assert!(matches!(
        r.next_string(),
        Err(Error::Syntax(SyntaxError::InvalidEscape('x')))
    ));
}

#[test]
fn null_literal() {
    let mut r = reader("null");
    r.next_null().unwrap();
    assert!(matches!(r.next_null(), Err(Error::IllegalState(_))));
}

#[rstest]
#[case::wrong_case("NULL")]
#[case::wrong_tail("nulL")]
#[case::trailing_junk("nullx")]
#[case::true_junk("truex")]
fn malformed_literals_are_rejected(#[case] input: &str) {
    let mut r = reader(input);
    assert!(matches!(r.next_null(), Err(Error::Syntax(_))));
}

#[test]
fn empty_input_is_end_document() {
    let mut r = reader("");
    assert_eq!(r.peek().unwrap(), Token::EndDocument);
}

#[test]
fn whitespace_only_input_is_end_document() {
    let mut r = reader(" \t\r\n ");
    assert_eq!(r.peek().unwrap(), Token::EndDocument);
}

#[rstest]
#[case::bare_quote("\"")]
#[case::dangling_escape("\"\\")]
#[case::short_escape_window("\"\\u00")]
fn truncated_string_is_early_eof(#[case] input: &str) {
    let mut r = reader(input);
    assert!(matches!(
        r.next_string(),
        Err(Error::Syntax(SyntaxError::UnexpectedEndOfInput))
    ));
}

#[test]
fn booleans_in_array() {
    let mut r = reader("[true,false]");
    r.begin_array().unwrap();
    assert!(r.next_bool().unwrap());
    assert!(!r.next_bool().unwrap());
    r.end_array().unwrap();
}

#[test]
fn bool_accessor_on_array_is_state_error() {
    let mut r = reader("[true,false]");
    assert!(matches!(r.next_bool(), Err(Error::IllegalState(_))));
}

#[test]
fn numbers_in_array() {
    let mut r = reader("[0,1,-1,0.5,0.25]");
    r.begin_array().unwrap();
    assert_eq!(r.next_i64().unwrap(), 0);
    assert_eq!(r.next_u8().unwrap(), 1);
    assert_eq!(r.next_i64().unwrap(), -1);
    assert!((r.next_f32().unwrap() - 0.5).abs() < f32::EPSILON);
    assert!((r.next_f64().unwrap() - 0.25).abs() < f64::EPSILON);
    r.end_array().unwrap();
}

#[rstest]
#[case("0", 0.0)]
#[case("-0", 0.0)]
#[case("0.5", 0.5)]
#[case("1e10", 1e10)]
#[case("1E+10", 1e10)]
#[case("1e+1", 10.0)]
#[case("1e01", 10.0)]
#[case("-12.75e-1", -1.275)]
fn number_grammar_accepts(#[case] input: &str, #[case] expected: f64) {
    let mut r = reader(input);
    assert!((r.next_f64().unwrap() - expected).abs() < f64::EPSILON);
}

#[rstest]
#[case::leading_zero("01")]
#[case::double_leading_zero("001")]
#[case::signed_leading_zero("-01")]
#[case::trailing_point("1.")]
#[case::leading_point(".1")]
#[case::bare_exponent("1e")]
#[case::double_point("0..")]
#[case::double_exponent("1ee")]
#[case::double_sign("1e++")]
#[case::sign_without_exponent("1+")]
#[case::double_minus("--1")]
#[case::bare_minus("-")]
#[case::minus_comma("-,")]
#[case::point_without_int("-.5")]
#[case::junk_after_digit("1x")]
fn number_grammar_rejects(#[case] input: &str) {
    let mut r = reader(input);
    assert!(matches!(r.next_f64(), Err(Error::Syntax(_))), "{input}");
}

#[test]
fn number_reads_back_as_text() {
    let mut r = reader("-12.5e3");
    assert_eq!(r.next_string().unwrap(), "-12.5e3");
}

#[test]
fn numeric_string_parses_as_number() {
    let mut r = reader(r#""42""#);
    assert_eq!(r.next_i64().unwrap(), 42);
}

#[test]
fn fraction_through_integer_accessor() {
    let mut r = reader("1.5");
    assert!(matches!(r.next_i64(), Err(Error::InvalidNumber(_))));
}

#[test]
fn overflow_of_narrow_accessor() {
    let mut r = reader("300");
    assert!(matches!(r.next_u8(), Err(Error::InvalidNumber(_))));
}

#[test]
fn negative_through_unsigned_accessor() {
    let mut r = reader("-1");
    assert!(matches!(r.next_u64(), Err(Error::InvalidNumber(_))));
}

#[test]
fn literal_is_not_a_number() {
    let mut r = reader("null");
    assert!(matches!(r.next_i64(), Err(Error::IllegalState(_))));
    let mut r = reader("null");
    assert!(matches!(r.next_f64(), Err(Error::IllegalState(_))));
}

#[test]
fn string_escapes_decode() {
    let mut r = reader(r#""\\\"\b\t\f\r\n\/\u0001""#);
    assert_eq!(r.next_string().unwrap(), "\\\"\u{8}\t\u{c}\r\n/\u{1}");
}

#[test]
fn string_is_not_a_name() {
    let mut r = reader(r#""text""#);
    assert!(matches!(r.next_name(), Err(Error::IllegalState(_))));
}

#[test]
fn literal_is_not_a_string() {
    let mut r = reader("null");
    assert!(matches!(r.next_string(), Err(Error::IllegalState(_))));
}

#[test]
fn peek_does_not_consume() {
    let mut r = reader("true");
    assert_eq!(r.peek().unwrap(), Token::Boolean);
    assert_eq!(r.peek().unwrap(), Token::Boolean);
    assert!(r.next_bool().unwrap());
}

#[test]
fn rejected_accessor_leaves_token_pending() {
    let mut r = reader(r#"{"a":1}"#);
    r.begin_object().unwrap();
    assert!(r.next_i64().is_err());
    assert_eq!(r.next_name().unwrap(), "a");
    assert_eq!(r.next_i64().unwrap(), 1);
    r.end_object().unwrap();
}

#[test]
fn back_to_back_top_level_values() {
    let mut r = reader("1 2");
    assert_eq!(r.next_i64().unwrap(), 1);
    assert_eq!(r.next_i64().unwrap(), 2);
    assert_eq!(r.peek().unwrap(), Token::EndDocument);
}

#[test]
fn back_to_back_top_level_containers() {
    let mut r = reader("{} [null]");
    r.begin_object().unwrap();
    r.end_object().unwrap();
    r.begin_array().unwrap();
    r.next_null().unwrap();
    r.end_array().unwrap();
    assert_eq!(r.peek().unwrap(), Token::EndDocument);
}

#[test]
fn names_survive_escaping() {
    let mut r = reader(r#"{"a\nb":1}"#);
    r.begin_object().unwrap();
    assert_eq!(r.next_name().unwrap(), "a\nb");
    assert_eq!(r.next_i64().unwrap(), 1);
    r.end_object().unwrap();
}

#[test]
fn deeply_nested_arrays() {
    let depth = 64;
    let input = "[".repeat(depth) + &"]".repeat(depth);
    let mut r = reader(&input);
    for _ in 0..depth {
        r.begin_array().unwrap();
    }
    for _ in 0..depth {
        r.end_array().unwrap();
    }
    assert_eq!(r.peek().unwrap(), Token::EndDocument);
}
