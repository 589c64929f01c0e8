//! Completed-task records and published-path extraction.
//!
//! A [`TaskRecord`] is the read-only outcome state of one completed unit of a
//! data-movement job. An upstream publisher documents the filesystem paths it
//! wrote under a well-known property key; this module reads those paths back
//! out and unions them across a batch.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome state of one completed task, carrying free-form string properties.
///
/// Opaque to the registration pipeline beyond the published-paths property;
/// records are never mutated by this crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl TaskRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties(properties: HashMap<String, Value>) -> Self {
        Self { properties }
    }

    /// Set a property, returning the record for chained construction.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Read a property as a list of strings.
    ///
    /// Accepts either a comma-separated string (`"/a,/b"`) or a JSON array of
    /// strings. A missing key, an empty value, or a value of any other shape
    /// yields an empty list — a single misconfigured task must not abort the
    /// whole batch.
    pub fn prop_as_list(&self, key: &str) -> Vec<String> {
        match self.properties.get(key) {
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Union the published paths recorded across a batch of task records.
///
/// Records missing the property contribute nothing. The result is a pure set
/// union: insensitive to record order, with duplicates across records
/// collapsed.
pub fn unique_published_paths<'a, I>(records: I, paths_key: &str) -> HashSet<String>
where
    I: IntoIterator<Item = &'a TaskRecord>,
{
    let mut paths = HashSet::new();
    for record in records {
        if record.contains(paths_key) {
            paths.extend(record.prop_as_list(paths_key));
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &str = "publisher.dirs";

    fn record_with_paths(value: Value) -> TaskRecord {
        TaskRecord::new().with_property(KEY, value)
    }

    #[test]
    fn comma_separated_string_parses_to_list() {
        let record = record_with_paths(json!("/data/a, /data/b ,/data/c"));
        assert_eq!(
            record.prop_as_list(KEY),
            vec!["/data/a", "/data/b", "/data/c"]
        );
    }

    #[test]
    fn json_array_parses_to_list() {
        let record = record_with_paths(json!(["/data/a", "/data/b"]));
        assert_eq!(record.prop_as_list(KEY), vec!["/data/a", "/data/b"]);
    }

    #[test]
    fn missing_key_yields_empty_list() {
        let record = TaskRecord::new();
        assert!(record.prop_as_list(KEY).is_empty());
    }

    #[test]
    fn malformed_value_yields_empty_list() {
        assert!(record_with_paths(json!(42)).prop_as_list(KEY).is_empty());
        assert!(record_with_paths(json!({"nested": true}))
            .prop_as_list(KEY)
            .is_empty());
        assert!(record_with_paths(json!("")).prop_as_list(KEY).is_empty());
    }

    #[test]
    fn non_string_array_elements_are_skipped() {
        let record = record_with_paths(json!(["/data/a", 7, null, "/data/b"]));
        assert_eq!(record.prop_as_list(KEY), vec!["/data/a", "/data/b"]);
    }

    #[test]
    fn unions_paths_across_records_with_duplicates_collapsed() {
        let records = vec![
            record_with_paths(json!("/a")),
            record_with_paths(json!("/a,/b")),
            TaskRecord::new(),
        ];
        let paths = unique_published_paths(&records, KEY);
        assert_eq!(
            paths,
            HashSet::from(["/a".to_string(), "/b".to_string()])
        );
    }

    #[test]
    fn union_is_insensitive_to_record_order() {
        let a = record_with_paths(json!("/x,/y"));
        let b = record_with_paths(json!(["/y", "/z"]));
        let forward = unique_published_paths([&a, &b], KEY);
        let reverse = unique_published_paths([&b, &a], KEY);
        assert_eq!(forward, reverse);
    }
}
