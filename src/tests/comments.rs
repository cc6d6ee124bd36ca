use super::*;

fn opts() -> Options {
    Options::default()
}

#[test]
fn line_comment_is_stripped() {
    let out = crate::repair_to_string("{\"a\": 1, // note\n\"b\": 2}", &opts()).unwrap();
    assert_eq!(out, r#"{"a": 1, "b": 2}"#);
}

#[test]
fn block_comment_between_tokens_is_bridged() {
    let out = crate::repair_to_string(r#"{"a":/*c*/1}"#, &opts()).unwrap();
    assert_eq!(out, r#"{"a": 1}"#);
}

#[test]
fn block_comment_between_spaces_drops_one_space() {
    let out = crate::repair_to_string(r#"{"a": /*c*/ 1}"#, &opts()).unwrap();
    assert_eq!(out, r#"{"a": 1}"#);
}

#[test]
fn unterminated_block_comment_runs_to_end() {
    let out = crate::repair_to_string("{\"a\": 1} /* dangling", &opts()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["a"], 1);
}

#[test]
fn comment_markers_inside_strings_are_content() {
    let input = "{'a': '// not a comment', 'b': '/* neither */'}";
    let out = crate::repair_to_string(input, &opts()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["a"], "// not a comment");
    assert_eq!(v["b"], "/* neither */");
}

#[test]
fn url_in_single_quoted_string_is_content() {
    let out = crate::repair_to_string("{'link': 'http://example.com/x'}", &opts()).unwrap();
    assert_eq!(out, r#"{"link": "http://example.com/x"}"#);
}

#[test]
fn comment_after_url_is_still_stripped() {
    let input = "{link: https://example.com // real comment\n}";
    let out = crate::repair_to_string(input, &opts()).unwrap();
    assert_eq!(out, r#"{"link": "https://example.com"}"#);
}

#[test]
fn input_of_only_comments_repairs_to_empty() {
    let out = crate::repair_to_string("// nothing\n/* here */", &opts()).unwrap();
    assert_eq!(out, "");
}
