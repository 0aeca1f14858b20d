//! Flattening of structured settings into flat key/value pairs
//!
//! - scalar: `key = value`
//! - multi-value: `key = v1,v2,v3` (no escaping of embedded commas)
//! - field set: `key.<n>.<field> = value` for every field of the n-th group
//!   (1-based), followed by `key = 1,2,...,n`

use crate::contract::{
    FlatSetting, RemoteSetting, SettingRecord, SettingValue, SettingsSink, SyncError,
};

/// Separator used to join multi-values and field set indices
pub const VALUES_SEPARATOR: &str = ",";

impl RemoteSetting {
    /// Resolve the value shape of a decoded setting
    pub fn into_record(self) -> Result<SettingRecord, SyncError> {
        match self.value {
            Some(value) => Ok(SettingRecord {
                key: self.key,
                value,
            }),
            None => Err(SyncError::UnrecognizedValueShape { key: self.key }),
        }
    }
}

/// Flatten a record into the pairs it stands for, in emission order
pub fn flatten(record: &SettingRecord) -> Vec<FlatSetting> {
    let key = &record.key;
    match &record.value {
        SettingValue::Scalar(value) => vec![FlatSetting::new(key, value)],
        SettingValue::Multi(values) => vec![FlatSetting::new(key, values.join(VALUES_SEPARATOR))],
        SettingValue::FieldSet(groups) => {
            let mut pairs = Vec::new();
            let mut ids = Vec::with_capacity(groups.len());
            for (index, group) in groups.iter().enumerate() {
                let id = (index + 1).to_string();
                for (field, value) in group {
                    pairs.push(FlatSetting::new(format!("{key}.{id}.{field}"), value));
                }
                ids.push(id);
            }
            pairs.push(FlatSetting::new(key, ids.join(VALUES_SEPARATOR)));
            pairs
        }
    }
}

/// Flatten a record into a sink; returns the number of pairs delivered
pub fn flatten_into(record: &SettingRecord, sink: &mut dyn SettingsSink) -> usize {
    let pairs = flatten(record);
    let delivered = pairs.len();
    for FlatSetting { key, value } in pairs {
        sink.put(key, value);
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::FieldGroup;
    use std::collections::{BTreeMap, HashMap};

    fn group(fields: &[(&str, &str)]) -> FieldGroup {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn as_map(pairs: Vec<FlatSetting>) -> BTreeMap<String, String> {
        pairs.into_iter().map(|p| (p.key, p.value)).collect()
    }

    #[test]
    fn test_scalar() {
        let pairs = flatten(&SettingRecord::scalar("sonar.foo", "bar"));
        assert_eq!(pairs, vec![FlatSetting::new("sonar.foo", "bar")]);
    }

    #[test]
    fn test_multi_value_is_joined() {
        let pairs = flatten(&SettingRecord::multi("K", ["x", "y", "z"]));
        assert_eq!(pairs, vec![FlatSetting::new("K", "x,y,z")]);
    }

    #[test]
    fn test_multi_value_embedded_separator_is_not_escaped() {
        let pairs = flatten(&SettingRecord::multi("K", ["a,b", "c"]));
        assert_eq!(pairs, vec![FlatSetting::new("K", "a,b,c")]);
    }

    #[test]
    fn test_empty_multi_value() {
        let pairs = flatten(&SettingRecord::multi("K", Vec::<String>::new()));
        assert_eq!(pairs, vec![FlatSetting::new("K", "")]);
    }

    #[test]
    fn test_field_set() {
        let record = SettingRecord::field_set("K", vec![group(&[("a", "1")]), group(&[("a", "2")])]);

        let map = as_map(flatten(&record));
        let expected: BTreeMap<String, String> = [("K.1.a", "1"), ("K.2.a", "2"), ("K", "1,2")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(map, expected);
    }

    #[test]
    fn test_field_set_preserves_declared_order() {
        let record = SettingRecord::field_set(
            "sonar.issue.ignore.multicriteria",
            vec![
                group(&[("ruleKey", "java:S100"), ("resourceKey", "**/*.java")]),
                group(&[("resourceKey", "**/gen/**"), ("ruleKey", "*")]),
                group(&[("ruleKey", "java:S1234")]),
            ],
        );

        let keys: Vec<String> = flatten(&record).into_iter().map(|p| p.key).collect();
        assert_eq!(
            keys,
            vec![
                "sonar.issue.ignore.multicriteria.1.ruleKey",
                "sonar.issue.ignore.multicriteria.1.resourceKey",
                "sonar.issue.ignore.multicriteria.2.resourceKey",
                "sonar.issue.ignore.multicriteria.2.ruleKey",
                "sonar.issue.ignore.multicriteria.3.ruleKey",
                "sonar.issue.ignore.multicriteria",
            ]
        );
    }

    #[test]
    fn test_empty_field_set_emits_empty_index_list() {
        let pairs = flatten(&SettingRecord::field_set("K", Vec::new()));
        assert_eq!(pairs, vec![FlatSetting::new("K", "")]);
    }

    #[test]
    fn test_flatten_is_repeatable() {
        let record = SettingRecord::field_set(
            "K",
            vec![group(&[("b", "2"), ("a", "1")]), group(&[("c", "3")])],
        );
        assert_eq!(flatten(&record), flatten(&record));
    }

    #[test]
    fn test_flatten_into_sink() {
        let mut sink: BTreeMap<String, String> = BTreeMap::new();
        assert_eq!(flatten_into(&SettingRecord::multi("K", ["x", "y"]), &mut sink), 1);
        assert_eq!(flatten_into(&SettingRecord::scalar("L", "v"), &mut sink), 1);
        assert_eq!(sink.get("K").map(String::as_str), Some("x,y"));
        assert_eq!(sink.get("L").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_flatten_into_hash_map_sink() {
        let record = SettingRecord::field_set("K", vec![group(&[("a", "1"), ("b", "2")])]);

        let mut sink: HashMap<String, String> = HashMap::new();
        assert_eq!(flatten_into(&record, &mut sink), 3);
        assert_eq!(sink.get("K.1.a").map(String::as_str), Some("1"));
        assert_eq!(sink.get("K.1.b").map(String::as_str), Some("2"));
        assert_eq!(sink.get("K").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_into_record_without_value_shape() {
        let setting = RemoteSetting {
            key: "sonar.broken".to_string(),
            inherited: false,
            value: None,
        };
        assert_eq!(
            setting.into_record(),
            Err(SyncError::UnrecognizedValueShape {
                key: "sonar.broken".to_string()
            })
        );
    }
}
