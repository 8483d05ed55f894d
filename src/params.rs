use std::cmp::Ordering;

use serde_json::Value;

use crate::encoding::percent_encode_strict;

/// Structured request data as it is laid out on the query string.
///
/// Magento reads nested filters from bracketed keys
/// (`searchCriteria[filterGroups][0][filters][0][field]=sku`), so request
/// data is kept as a tree until it is flattened right before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Scalar(String),
    Map(Vec<(String, Param)>),
    List(Vec<Param>),
}

impl Param {
    /// Converts a JSON value into a parameter tree.
    ///
    /// Returns `None` for `null`; `null` members of objects and arrays are
    /// dropped, booleans become `1` / `0`.
    pub fn from_json(value: Value) -> Option<Param> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Param::Scalar(if b { "1" } else { "0" }.to_string())),
            Value::Number(n) => Some(Param::Scalar(n.to_string())),
            Value::String(s) => Some(Param::Scalar(s)),
            Value::Array(items) => Some(Param::List(
                items.into_iter().filter_map(Param::from_json).collect(),
            )),
            Value::Object(members) => Some(Param::Map(
                members
                    .into_iter()
                    .filter_map(|(k, v)| Param::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }

    /// Sorts every mapping in the tree by key, at every depth.
    ///
    /// Keys are ordered by [`compare_keys`]. Lists keep their element order;
    /// their elements are sorted in turn.
    pub fn sort_recursively(self) -> Param {
        match self {
            Param::Scalar(s) => Param::Scalar(s),
            Param::Map(entries) => {
                let mut entries = entries
                    .into_iter()
                    .map(|(k, v)| (k, v.sort_recursively()))
                    .collect::<Vec<(String, Param)>>();
                entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
                Param::Map(entries)
            }
            Param::List(items) => {
                Param::List(items.into_iter().map(Param::sort_recursively).collect())
            }
        }
    }

    /// `true` for a mapping or list without entries and for an empty scalar.
    pub fn is_empty(&self) -> bool {
        match self {
            Param::Scalar(s) => s.is_empty(),
            Param::Map(entries) => entries.is_empty(),
            Param::List(items) => items.is_empty(),
        }
    }

    /// Flattens the tree into `key=value` pairs, in tree order.
    ///
    /// Nested keys are written as `parent[child]`, list members as
    /// `parent[index]`. A bare top-level scalar has no key and yields nothing.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        flatten_into(None, self, &mut pairs);
        pairs
    }
}

fn flatten_into(prefix: Option<&str>, param: &Param, pairs: &mut Vec<(String, String)>) {
    let child_key = |key: &str| match prefix {
        Some(p) => format!("{}[{}]", p, key),
        None => key.to_string(),
    };
    match param {
        Param::Scalar(value) => {
            if let Some(key) = prefix {
                pairs.push((key.to_string(), value.clone()));
            }
        }
        Param::Map(entries) => {
            for (key, value) in entries {
                flatten_into(Some(&child_key(key)), value, pairs);
            }
        }
        Param::List(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten_into(Some(&child_key(&index.to_string())), value, pairs);
            }
        }
    }
}

/// Orders flattened keys the way the tree is walked.
///
/// `parent[child][0]` is compared segment by segment. Two list indices
/// compare numerically, so `[2]` comes before `[10]`; any other pair of
/// segments compares by its encoded bytes. A key sorts before the keys
/// nested below it.
pub(crate) fn compare_keys(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => match compare_segments(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

fn segments(key: &str) -> impl Iterator<Item = &str> {
    key.split('[').map(|s| s.trim_end_matches(']'))
}

fn is_index(segment: &str) -> bool {
    !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'))
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    if is_index(a) && is_index(b) {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    } else {
        percent_encode_strict(a).cmp(&percent_encode_strict(b))
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Scalar(s.to_string())
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::Scalar(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(entries: Vec<(&str, Param)>) -> Param {
        Param::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn keys(param: &Param) -> Vec<&str> {
        match param {
            Param::Map(entries) => entries.iter().map(|(k, _)| k.as_str()).collect(),
            _ => vec![],
        }
    }

    #[test]
    fn sorts_every_depth() {
        let param = map(vec![
            ("b", "1".into()),
            ("a", map(vec![("d", "2".into()), ("c", "3".into())])),
        ])
        .sort_recursively();

        assert_eq!(keys(&param), vec!["a", "b"]);
        if let Param::Map(entries) = &param {
            assert_eq!(keys(&entries[0].1), vec!["c", "d"]);
        } else {
            panic!("top level must stay a mapping");
        }
    }

    #[test]
    fn sorts_maps_inside_lists() {
        let param = Param::List(vec![
            map(vec![("z", "1".into()), ("y", "2".into())]),
            map(vec![("b", "3".into()), ("a", "4".into())]),
        ])
        .sort_recursively();

        match param {
            Param::List(items) => {
                assert_eq!(keys(&items[0]), vec!["y", "z"]);
                assert_eq!(keys(&items[1]), vec!["a", "b"]);
            }
            _ => panic!("list must stay a list"),
        }
    }

    #[test]
    fn sort_is_independent_of_input_order() {
        let first = map(vec![
            ("x", map(vec![("q", "1".into()), ("p", "2".into())])),
            ("w", "3".into()),
        ]);
        let second = map(vec![
            ("w", "3".into()),
            ("x", map(vec![("p", "2".into()), ("q", "1".into())])),
        ]);
        assert_eq!(first.sort_recursively(), second.sort_recursively());
    }

    #[test]
    fn flattens_search_criteria() {
        let param = Param::from_json(json!({
            "searchCriteria": {
                "pageSize": 10,
                "currentPage": 2,
                "filterGroups": [
                    { "filters": [ { "field": "sku", "value": "ABC%", "condition_type": "like" } ] }
                ]
            }
        }))
        .unwrap()
        .sort_recursively();

        assert_eq!(
            param.flatten(),
            vec![
                ("searchCriteria[currentPage]".to_string(), "2".to_string()),
                (
                    "searchCriteria[filterGroups][0][filters][0][condition_type]".to_string(),
                    "like".to_string()
                ),
                (
                    "searchCriteria[filterGroups][0][filters][0][field]".to_string(),
                    "sku".to_string()
                ),
                (
                    "searchCriteria[filterGroups][0][filters][0][value]".to_string(),
                    "ABC%".to_string()
                ),
                ("searchCriteria[pageSize]".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn list_indices_keep_numeric_order() {
        let param = Param::from_json(json!({
            "items": (0..12).map(|i| i.to_string()).collect::<Vec<String>>()
        }))
        .unwrap()
        .sort_recursively();

        let mut keys = param
            .flatten()
            .into_iter()
            .map(|(k, _)| k)
            .collect::<Vec<String>>();
        assert_eq!(keys[2], "items[2]");
        assert_eq!(keys[10], "items[10]");

        let flattened = keys.clone();
        keys.sort_by(|a, b| compare_keys(a, b));
        assert_eq!(keys, flattened);
    }

    #[test]
    fn compares_keys_by_segment() {
        assert_eq!(compare_keys("a[2]", "a[10]"), Ordering::Less);
        assert_eq!(compare_keys("a[10][x]", "a[2][y]"), Ordering::Greater);
        assert_eq!(compare_keys("a", "a[0]"), Ordering::Less);
        assert_eq!(compare_keys("a[b]", "a1"), Ordering::Less);
        assert_eq!(compare_keys("oauth_nonce", "searchCriteria[pageSize]"), Ordering::Less);
        assert_eq!(compare_keys("x[10]", "x[9z]"), Ordering::Less);
        assert_eq!(compare_keys("k", "k"), Ordering::Equal);
    }

    #[test]
    fn numeric_map_keys_sort_like_indices() {
        let param = map(vec![("10", "a".into()), ("2", "b".into()), ("1", "c".into())])
            .sort_recursively();
        assert_eq!(keys(&param), vec!["1", "2", "10"]);
    }

    #[test]
    fn json_scalars() {
        let param = Param::from_json(json!({
            "enabled": true,
            "disabled": false,
            "missing": null,
            "price": 9.5,
            "name": "Tee ~ shirt"
        }))
        .unwrap();

        let mut pairs = param.flatten();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("disabled".to_string(), "0".to_string()),
                ("enabled".to_string(), "1".to_string()),
                ("name".to_string(), "Tee ~ shirt".to_string()),
                ("price".to_string(), "9.5".to_string()),
            ]
        );
        assert_eq!(Param::from_json(Value::Null), None);
    }

    #[test]
    fn emptiness() {
        assert!(Param::from_json(json!({})).unwrap().is_empty());
        assert!(Param::from_json(json!([])).unwrap().is_empty());
        assert!(!Param::from_json(json!({"searchCriteria": "all"}))
            .unwrap()
            .is_empty());
        assert!(Param::from("top").flatten().is_empty());
    }
}
