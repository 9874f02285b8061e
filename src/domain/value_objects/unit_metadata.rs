use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PAGE_NUMBER_KEY: &str = "page_number";

/// String-keyed, string-valued attributes attached to a document unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitMetadata {
    properties: HashMap<String, String>,
}

impl UnitMetadata {
    pub fn new() -> Self {
        Self {
            properties: HashMap::new(),
        }
    }

    pub fn for_page(page_index: usize) -> Self {
        Self::new().with_property(PAGE_NUMBER_KEY.to_string(), page_index.to_string())
    }

    pub fn with_property(mut self, key: String, value: String) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn page_number(&self) -> Option<&str> {
        self.get_property(PAGE_NUMBER_KEY)
    }
}
