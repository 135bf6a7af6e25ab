//! One module per HTTP method on the table's resource. Every handler catches
//! its own errors and turns them into a [`Reply`]; nothing is carried between
//! requests.

pub mod create;
pub mod delete;
pub mod read;
pub mod update;

use crate::{error::Result, store::Item};

use serde_json::Value;
use std::collections::HashMap;

pub use read::Strategy;

pub type Params = HashMap<String, String>;

fn parse_item(body: &str) -> Result<Item> {
    let value: Value = serde_json::from_str(body)?;
    Ok(serde_json::from_value(value)?)
}

// Absent and empty parameters are treated alike.
fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
