use super::*;

fn omit_empty() -> Options {
    Options {
        omit_empty_values: true,
        ..Default::default()
    }
}

fn omit_incomplete() -> Options {
    Options {
        omit_incomplete_strings: true,
        ..Default::default()
    }
}

#[test]
fn missing_value_before_comma_drops_key() {
    let out = crate::repair_to_string(r#"{"a": 1, "b": , "c": 2}"#, &omit_empty()).unwrap();
    assert_eq!(out, r#"{"a": 1, "c": 2}"#);
}

#[test]
fn dropping_the_first_member_leaves_no_leading_comma() {
    let out = crate::repair_to_string(r#"{"a": , "b": 1}"#, &omit_empty()).unwrap();
    assert_eq!(out, r#"{"b": 1}"#);
}

#[test]
fn sole_key_with_missing_value_leaves_empty_object() {
    let out = crate::repair_to_string(r#"{"a": }"#, &omit_empty()).unwrap();
    assert_eq!(out, "{}");
}

#[test]
fn bare_key_at_end_of_input_drops_key() {
    let out = crate::repair_to_string(r#"{"a": 1, "b""#, &omit_empty()).unwrap();
    assert_eq!(out, r#"{"a": 1}"#);
}

#[test]
fn truncated_keyword_drops_key() {
    let out = crate::repair_to_string(r#"{"a": 1, "b": fal"#, &omit_empty()).unwrap();
    assert_eq!(out, r#"{"a": 1}"#);
}

#[test]
fn without_omit_empty_missing_values_become_empty_strings() {
    let out = crate::repair_to_string(r#"{"a": 1, "b": , "c": 2}"#, &Options::default()).unwrap();
    assert_eq!(out, r#"{"a": 1, "b": "", "c": 2}"#);
}

#[test]
fn incomplete_string_value_drops_key() {
    let out = crate::repair_to_string(r#"{"a": 1, "b": "cut"#, &omit_incomplete()).unwrap();
    assert_eq!(out, r#"{"a": 1}"#);
}

#[test]
fn sole_incomplete_string_leaves_empty_object() {
    let out = crate::repair_to_string(r#"{"a": "cut"#, &omit_incomplete()).unwrap();
    assert_eq!(out, "{}");
}

#[test]
fn incomplete_key_string_is_not_dropped_by_omit_incomplete() {
    // the flag only covers object values; a cut-off key closes normally
    let out = crate::repair_to_string(r#"{"ab"#, &omit_incomplete()).unwrap();
    assert_eq!(out, r#"{"ab":""}"#);
}

#[test]
fn incomplete_array_string_still_closes() {
    let out = crate::repair_to_string(r#"["keep me"#, &omit_incomplete()).unwrap();
    assert_eq!(out, r#"["keep me"]"#);
}

#[test]
fn both_flags_together() {
    let o = Options {
        omit_empty_values: true,
        omit_incomplete_strings: true,
        ..Default::default()
    };
    let out = crate::repair_to_string(r#"{"a": , "b": "cut"#, &o).unwrap();
    assert_eq!(out, "{}");
}
