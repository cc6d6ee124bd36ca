use super::*;

fn opts() -> Options {
    Options::default()
}

#[test]
fn object_is_pulled_out_of_prose() {
    let input = r#"Sure! Here is your JSON: {"a": 1} hope it helps"#;
    let out = crate::repair_to_string(input, &opts()).unwrap();
    assert_eq!(out, r#"{"a": 1}"#);
}

#[test]
fn largest_valid_object_wins() {
    let input = r#"{"a": 1} {"a": 1, "b": 2}"#;
    let out = crate::repair_to_string(input, &opts()).unwrap();
    assert_eq!(out, r#"{"a": 1, "b": 2}"#);
}

#[test]
fn braces_inside_strings_do_not_confuse_matching() {
    let input = r#"junk {"a": "}"} junk"#;
    let out = crate::repair_to_string(input, &opts()).unwrap();
    assert_eq!(out, r#"{"a": "}"}"#);
}

#[test]
fn first_valid_array_is_used_when_no_object_validates() {
    let input = "no object here, but [1, 2, 3] works and [4] too";
    let out = crate::repair_to_string(input, &opts()).unwrap();
    assert_eq!(out, "[1, 2, 3]");
}

#[test]
fn invalid_containers_fall_through_to_the_engine() {
    let input = "answer: {'a': 1} done";
    let out = crate::repair_to_string(input, &opts()).unwrap();
    assert_eq!(out, r#"{"a": 1}"#);
}

#[test]
fn escaped_quote_does_not_end_string_scanning() {
    let input = r#"x {"a": "he said \"}\""} y"#;
    let out = crate::repair_to_string(input, &opts()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["a"], "he said \"}\"");
}
