use super::{expression::Expression, Item};

use serde_json::Value;

pub const START_DATE: &str = "StartDate";
pub const END_DATE: &str = "EndDate";

/// Exact match on a key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEquals {
    pub attribute: String,
    pub value: String,
}

impl KeyEquals {
    pub fn new<A: Into<String>, V: Into<String>>(attribute: A, value: V) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        item.get(&self.attribute).and_then(Value::as_str) == Some(self.value.as_str())
    }

    pub fn render(&self, expr: &mut Expression) -> String {
        let name = expr.name(&self.attribute);
        let value = expr.value(self.value.as_str());
        format!("{name} = {value}")
    }
}

/// Prefix match on the sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginsWith {
    pub attribute: String,
    pub prefix: String,
}

impl BeginsWith {
    pub fn new<A: Into<String>, P: Into<String>>(attribute: A, prefix: P) -> Self {
        Self {
            attribute: attribute.into(),
            prefix: prefix.into(),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        item.get(&self.attribute)
            .and_then(Value::as_str)
            .map(|v| v.starts_with(self.prefix.as_str()))
            .unwrap_or(false)
    }

    pub fn render(&self, expr: &mut Expression) -> String {
        let name = expr.name(&self.attribute);
        let value = expr.value(self.prefix.as_str());
        format!("begins_with({name}, {value})")
    }
}

/// Matches items whose `StartDate` or `EndDate` contains the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSubstring {
    pub value: String,
}

impl DateSubstring {
    pub fn new<V: Into<String>>(value: V) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        [START_DATE, END_DATE]
            .iter()
            .any(|attribute| item.get(*attribute).map(|v| contains(v, &self.value)).unwrap_or(false))
    }

    pub fn render(&self, expr: &mut Expression) -> String {
        let start = expr.name(START_DATE);
        let end = expr.name(END_DATE);
        let value = expr.value(self.value.as_str());
        format!("(contains({start}, {value}) OR contains({end}, {value}))")
    }
}

// `contains` semantics: substring for strings, membership for lists and sets.
fn contains(attribute: &Value, operand: &str) -> bool {
    match attribute {
        Value::String(s) => s.contains(operand),
        Value::Array(values) => values.iter().any(|v| v.as_str() == Some(operand)),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub index_name: Option<String>,
    pub key: KeyEquals,
    pub sort: Option<BeginsWith>,
    pub filter: Option<DateSubstring>,
}

impl Query {
    pub fn new(key: KeyEquals) -> Self {
        Self {
            index_name: None,
            key,
            sort: None,
            filter: None,
        }
    }

    pub fn index<S: Into<String>>(self, index_name: S) -> Self {
        Self {
            index_name: Some(index_name.into()),
            ..self
        }
    }

    pub fn sort(self, sort: Option<BeginsWith>) -> Self {
        Self { sort, ..self }
    }

    pub fn filter(self, filter: Option<DateSubstring>) -> Self {
        Self { filter, ..self }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.key.matches(item)
            && self.sort.as_ref().map(|s| s.matches(item)).unwrap_or(true)
            && self.filter.as_ref().map(|f| f.matches(item)).unwrap_or(true)
    }

    pub fn key_condition(&self, expr: &mut Expression) -> String {
        let key = self.key.render(expr);
        match self.sort.as_ref() {
            Some(sort) => format!("{key} AND {}", sort.render(expr)),
            None => key,
        }
    }

    pub fn filter_expression(&self, expr: &mut Expression) -> Option<String> {
        self.filter.as_ref().map(|f| f.render(expr))
    }
}
