use super::Item;

use aws_sdk_dynamodb::{primitives::Blob, types::AttributeValue};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub fn into_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(v) => AttributeValue::Bool(v),
        Value::Number(v) => AttributeValue::N(v.to_string()),
        Value::String(v) => AttributeValue::S(v),
        Value::Array(v) => AttributeValue::L(v.into_iter().map(into_attribute).collect()),
        Value::Object(v) => AttributeValue::M(into_attributes(v)),
    }
}

pub fn from_attribute(value: AttributeValue) -> Value {
    match value {
        AttributeValue::B(v) => Value::String(into_str(v)),
        AttributeValue::Bool(v) => Value::Bool(v),
        AttributeValue::Bs(v) => Value::Array(v.into_iter().map(into_str).map(Value::String).collect()),
        AttributeValue::L(v) => Value::Array(v.into_iter().map(from_attribute).collect()),
        AttributeValue::M(v) => Value::Object(from_attributes(v)),
        AttributeValue::N(v) => into_number(v),
        AttributeValue::Ns(v) => Value::Array(v.into_iter().map(into_number).collect()),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::S(v) => Value::String(v),
        AttributeValue::Ss(v) => Value::Array(v.into_iter().map(Value::String).collect()),
        _ => Value::Null,
    }
}

pub fn into_attributes(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter()
        .map(|(key, val)| (key, into_attribute(val)))
        .collect()
}

pub fn from_attributes(item: HashMap<String, AttributeValue>) -> Item {
    item.into_iter()
        .map(|(key, val)| (key, from_attribute(val)))
        .collect::<Map<String, Value>>()
}

fn into_str(blob: Blob) -> String {
    String::from_utf8_lossy(&blob.into_inner()).into_owned()
}

// Numbers outside what serde_json can represent are kept as their string form.
fn into_number(n: String) -> Value {
    match serde_json::from_str::<Value>(&n) {
        Ok(value @ Value::Number(_)) => value,
        _ => Value::String(n),
    }
}
