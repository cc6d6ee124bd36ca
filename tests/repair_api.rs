use jsonmend::{Options, RepairErrorKind, repair_to_string, repair_to_value, repair_to_writer};

#[test]
fn llm_answer_with_prose_and_fence() {
    let input = "Of course! Here is the data you asked for:\n\n```json\n{\n  \"city\": \"Zürich\",\n  \"population\": 447000,\n}\n```\nLet me know if you need anything else.";
    let v = repair_to_value(input, &Options::default()).unwrap();
    assert_eq!(v["city"], "Zürich");
    assert_eq!(v["population"], 447000);
}

#[test]
fn streaming_cutoff_mid_reply() {
    let input = "{\"summary\": \"The meeting covered three topics\", \"topics\": [\"budget\", \"hir";
    let out = repair_to_string(input, &Options::default()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["summary"], "The meeting covered three topics");
    assert_eq!(v["topics"][0], "budget");
    assert_eq!(v["topics"][1], "hir");
}

#[test]
fn hand_typed_config_with_comments() {
    let input = "{\n  // server settings\n  host: 'localhost',\n  port: 8080,\n  tls: False,\n}";
    let v = repair_to_value(input, &Options::default()).unwrap();
    assert_eq!(v["host"], "localhost");
    assert_eq!(v["port"], 8080);
    assert_eq!(v["tls"], false);
}

#[test]
fn writer_and_string_agree() {
    let input = "{'a': [1, 2,]}";
    let opts = Options::default();
    let s = repair_to_string(input, &opts).unwrap();
    let mut buf = Vec::new();
    repair_to_writer(input, &opts, &mut buf).unwrap();
    assert_eq!(s.as_bytes(), buf.as_slice());
}

#[test]
fn decode_error_kind_is_parse() {
    let err = repair_to_value("plain prose, no json", &Options::default()).unwrap_err();
    assert!(matches!(err.kind, RepairErrorKind::Parse(_)));
}

#[test]
fn options_are_plain_data() {
    // independent calls with independent options run side by side
    let a = Options {
        omit_empty_values: true,
        ..Default::default()
    };
    let b = Options::default();
    let h1 = std::thread::spawn(move || repair_to_string("{\"x\": }", &a).unwrap());
    let h2 = std::thread::spawn(move || repair_to_string("{\"x\": }", &b).unwrap());
    assert_eq!(h1.join().unwrap(), "{}");
    assert_eq!(h2.join().unwrap(), "{\"x\": \"\"}");
}
