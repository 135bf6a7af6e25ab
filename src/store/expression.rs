use serde_json::Value;
use std::collections::HashMap;

/// Placeholder names and values shared by the key condition and the filter of
/// a single request.
#[derive(Debug, Default)]
pub struct Expression {
    names: HashMap<String, String>,
    values: HashMap<String, Value>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the `#` placeholder for `attribute`, reusing an existing one.
    pub fn name(&mut self, attribute: &str) -> String {
        if let Some((placeholder, _)) = self.names.iter().find(|(_, a)| a.as_str() == attribute) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), attribute.to_string());
        placeholder
    }

    pub fn value<V: Into<Value>>(&mut self, value: V) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value.into());
        placeholder
    }

    #[cfg(test)]
    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }

    #[cfg(test)]
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    pub fn into_parts(self) -> (HashMap<String, String>, HashMap<String, Value>) {
        (self.names, self.values)
    }
}
