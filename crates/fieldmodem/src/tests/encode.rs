use rstest::rstest;

use crate::{
    EncodeError, Field, Map, ScanBuffer, Value, blob_record, blob_text, decode_field,
    decode_record, encode_field, encode_object,
};

fn map(entries: &[(&str, Value)]) -> Map {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

#[test]
fn numbers_become_int_fields() {
    let encoded = encode_object(&map(&[("width", Value::Number(640.0))])).unwrap();
    assert_eq!(encoded, b":i width 640\n");
}

#[test]
fn strings_become_blob_fields() {
    let encoded = encode_object(&map(&[("body", Value::from("hello"))])).unwrap();
    assert_eq!(encoded, b":b body 5\nhello\n");
}

#[test]
fn booleans_become_json_text_blobs() {
    let encoded = encode_object(&map(&[("flag", Value::Boolean(true))])).unwrap();
    assert_eq!(encoded, b":b flag 4\ntrue\n");
}

#[test]
fn arrays_become_json_text_blobs() {
    let value = Value::Array(vec![Value::Number(1.0), Value::from("a")]);
    let encoded = encode_object(&map(&[("list", value)])).unwrap();
    assert_eq!(encoded, b":b list 7\n[1,\"a\"]\n");
}

#[test]
fn nested_objects_embed_a_sub_record() {
    let inner = map(&[("a", Value::Number(1.0))]);
    let encoded = encode_object(&map(&[("inner", Value::Object(inner))])).unwrap();
    assert_eq!(encoded, b":b inner 7\n:i a 1\n\n");

    let record = decode_record(&encoded).unwrap();
    let sub = blob_record(record.get("inner").unwrap().first()).unwrap();
    assert_eq!(sub.get("a").unwrap().first().as_int(), Some(1));
}

#[test]
fn unencodable_nested_objects_fall_back_to_json_text() {
    let inner = map(&[("a", Value::Null)]);
    let encoded = encode_object(&map(&[("inner", Value::Object(inner))])).unwrap();
    assert_eq!(encoded, b":b inner 10\n{\"a\":null}\n");

    let record = decode_record(&encoded).unwrap();
    let text = blob_text(record.get("inner").unwrap().first()).unwrap();
    assert_eq!(text, "{\"a\":null}");
}

#[rstest]
#[case::floor(2.7, b":i n 2\n".as_slice())]
#[case::whole_negative(-5.0, b":i n 5\n".as_slice())]
#[case::floored_negative(-2.5, b":i n 3\n".as_slice())]
#[case::zero(0.0, b":i n 0\n".as_slice())]
fn numbers_are_floored_and_unsigned(#[case] input: f64, #[case] expected: &[u8]) {
    let encoded = encode_object(&map(&[("n", Value::Number(input))])).unwrap();
    assert_eq!(encoded, expected);
}

#[test]
fn top_level_null_is_fatal() {
    let error = encode_object(&map(&[("gone", Value::Null)])).unwrap_err();
    assert_eq!(error, EncodeError::NullValue { key: "gone".into() });
}

#[rstest]
#[case::nan(f64::NAN)]
#[case::infinity(f64::INFINITY)]
#[case::neg_infinity(f64::NEG_INFINITY)]
fn non_finite_numbers_are_fatal(#[case] input: f64) {
    let error = encode_object(&map(&[("n", Value::Number(input))])).unwrap_err();
    assert!(matches!(error, EncodeError::NonFiniteNumber { key, .. } if key == "n"));
}

#[rstest]
#[case::empty("")]
#[case::space("a b")]
#[case::control("a\tb")]
#[case::non_ascii("café")]
fn keys_outside_the_name_charset_are_fatal(#[case] key: &str) {
    let error = encode_object(&map(&[(key, Value::Number(1.0))])).unwrap_err();
    assert_eq!(error, EncodeError::InvalidName { key: key.into() });
}

#[test]
fn fields_are_emitted_in_map_iteration_order() {
    let encoded = encode_object(&map(&[
        ("z", Value::Number(1.0)),
        ("a", Value::Number(2.0)),
    ]))
    .unwrap();
    assert_eq!(encoded, b":i z 1\n:i a 2\n");
}

#[rstest]
#[case::int(Field::Int { name: "n".into(), value: u64::MAX })]
#[case::blob(Field::Blob { name: "raw".into(), value: b"a\nb\x00".to_vec() })]
#[case::empty_blob(Field::Blob { name: "empty".into(), value: Vec::new() })]
fn encode_field_inverts_decode_field(#[case] field: Field) {
    let mut wire = Vec::new();
    encode_field(&field, &mut wire);
    let mut buf = ScanBuffer::from_bytes(wire);
    assert_eq!(decode_field(&mut buf).unwrap(), field);
}

#[test]
fn json_fallback_text_is_valid_json() {
    let inner = map(&[("flag", Value::Boolean(false)), ("gone", Value::Null)]);
    let value = Value::Array(vec![
        Value::Object(inner),
        Value::from("quote \" and \\ slash"),
        Value::Number(3.0),
    ]);
    let parsed: serde_json::Value = serde_json::from_str(&value.to_string()).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([{"flag": false, "gone": null}, "quote \" and \\ slash", 3.0])
    );
}
