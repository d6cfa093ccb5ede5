use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

static ASSIGNMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)\s*=\s*["']([^"']+)["']"#).unwrap());

static VALUE_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^value\s*=\s*").unwrap());

/// String assignments found anywhere in one file.
///
/// Scope is the whole file: `name = "value"` in any class or method is
/// visible to every lookup. The first assignment of a name wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VariableTable {
    values: HashMap<String, String>,
}

impl VariableTable {
    pub fn from_text(text: &str) -> Self {
        let mut values = HashMap::new();
        for caps in ASSIGNMENT_REGEX.captures_iter(text) {
            values
                .entry(caps[1].to_string())
                .or_insert_with(|| caps[2].to_string());
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Resolve the argument of an annotation such as `@Select(SQL)` or
    /// `@Select(value = SQL)`.
    pub fn resolve_reference(&self, argument: &str) -> Option<&str> {
        let name = VALUE_PREFIX_REGEX.replace(argument.trim(), "");
        self.get(name.trim())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
