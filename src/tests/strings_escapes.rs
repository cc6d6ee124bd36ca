use super::*;

fn opts() -> Options {
    Options::default()
}

#[test]
fn known_escapes_pass_through() {
    let input = "{'a': 'line\\nbreak \\t tab \\\\ slash'}";
    let out = crate::repair_to_string(input, &opts()).unwrap();
    assert_eq!(out, "{\"a\": \"line\\nbreak \\t tab \\\\ slash\"}");
}

#[test]
fn unicode_escape_with_full_hex_passes_through() {
    let out = crate::repair_to_string("{'a': '\\u00e9'}", &opts()).unwrap();
    assert_eq!(out, "{\"a\": \"\\u00e9\"}");
}

#[test]
fn unknown_escape_keeps_backslash_literal() {
    let out = crate::repair_to_string("{'a': '\\x'}", &opts()).unwrap();
    assert_eq!(out, "{\"a\": \"\\\\x\"}");
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["a"], "\\x");
}

#[test]
fn trailing_backslash_at_end_of_input_is_dropped() {
    let out = crate::repair_to_string("{\"a\": \"b\\", &opts()).unwrap();
    assert_eq!(out, r#"{"a": "b"}"#);
}

#[test]
fn raw_newline_inside_string_is_escaped() {
    let out = crate::repair_to_string("{'a': 'two\nlines'}", &opts()).unwrap();
    assert_eq!(out, "{\"a\": \"two\\nlines\"}");
}

#[test]
fn double_quote_inside_single_quoted_string_is_escaped() {
    let out = crate::repair_to_string("{'a': 'say \"hi\"'}", &opts()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["a"], "say \"hi\"");
}

#[test]
fn smart_quotes_delimit_keys_and_values() {
    let out = crate::repair_to_string("{\u{201C}key\u{201D}: \u{201C}value\u{201D}}", &opts()).unwrap();
    assert_eq!(out, r#"{"key": "value"}"#);
}

#[test]
fn smart_single_quotes_delimit_values() {
    let out = crate::repair_to_string("{'a': \u{2018}x\u{2019}}", &opts()).unwrap();
    assert_eq!(out, r#"{"a": "x"}"#);
}

#[test]
fn non_ascii_content_is_preserved_verbatim() {
    let out = crate::repair_to_string("{'city': 'Zürich 東京'}", &opts()).unwrap();
    assert_eq!(out, "{\"city\": \"Zürich 東京\"}");
}

#[test]
fn ensure_ascii_false_unescapes_unicode() {
    let o = Options {
        ensure_ascii: false,
        ..Default::default()
    };
    let out = crate::repair_to_string("{'a': '\\u00e9'}", &o).unwrap();
    assert_eq!(out, "{\"a\":\"é\"}");
}
