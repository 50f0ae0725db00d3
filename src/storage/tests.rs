// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use crate::StorageError;
use serde_json::json;

fn str_value(s: &str) -> Value {
    Value::string(s)
}

fn left_fixture() -> Storage {
    Storage::from_list([("a", str_value("a1")), ("c", str_value("c1"))])
}

fn right_fixture() -> Storage {
    Storage::from_list([("a", str_value("a2")), ("b2", str_value("b2"))])
}

fn config_fixture() -> Storage {
    Storage::from_list([
        ("config.item.a", Value::string("alpha")),
        ("config.item.b", Value::float(1.5)),
        ("config.item.c", Value::int(3)),
        ("config.enabled", Value::bool(true)),
        ("config.extra", Value::json(json!({"tags": ["x", "y"]}))),
        ("name", Value::string("demo")),
    ])
}

// ===== Construction Tests =====

#[test]
fn test_empty_storage() {
    let storage = Storage::empty();
    assert!(storage.is_empty());
    assert_eq!(storage.len(), 0);
    assert_eq!(storage, Storage::new());
    assert_eq!(storage.keys().count(), 0);
}

#[test]
fn test_singleton() {
    let storage = Storage::singleton("key", Value::int(1));
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.get("key"), Some(&Value::int(1)));
}

#[test]
fn test_from_list_sorts_keys() {
    let storage = Storage::from_list([("foo", Value::empty()), ("bar", Value::empty())]);
    assert_eq!(storage.keys().collect::<Vec<_>>(), ["bar", "foo"]);
}

#[test]
fn test_from_list_last_duplicate_wins() {
    let storage = Storage::from_list([
        ("k", Value::int(1)),
        ("a", Value::int(0)),
        ("k", Value::int(2)),
    ]);
    assert_eq!(storage.len(), 2);
    assert_eq!(storage.get_int("k"), Some(2));
    assert_eq!(
        storage.to_list(),
        vec![("a".to_string(), Value::int(0)), ("k".to_string(), Value::int(2))]
    );
}

#[test]
fn test_collect_matches_from_list() {
    let pairs = vec![("b", Value::int(2)), ("a", Value::int(1))];
    let collected: Storage = pairs.clone().into_iter().collect();
    assert_eq!(collected, Storage::from_list(pairs));
}

// ===== Update Tests =====

#[test]
fn test_insert_adds_in_order() {
    let storage = Storage::empty()
        .insert("m", Value::int(1))
        .insert("a", Value::int(2))
        .insert("z", Value::int(3));
    assert_eq!(storage.keys().collect::<Vec<_>>(), ["a", "m", "z"]);
}

#[test]
fn test_insert_replaces_existing() {
    let storage = Storage::singleton("k", Value::int(1)).insert("k", Value::string("two"));
    assert_eq!(storage.len(), 1);
    assert_eq!(storage.get("k"), Some(&Value::string("two")));
}

#[test]
fn test_insert_leaves_clone_untouched() {
    let original = left_fixture();
    let updated = original.clone().insert("b", str_value("b1"));

    assert_eq!(original.len(), 2);
    assert!(!original.contains_key("b"));
    assert_eq!(updated.len(), 3);
}

#[test]
fn test_remove() {
    let storage = left_fixture().remove("a");
    assert!(!storage.contains_key("a"));
    assert_eq!(storage.keys().collect::<Vec<_>>(), ["c"]);
}

#[test]
fn test_remove_absent_is_noop() {
    let storage = left_fixture();
    assert_eq!(storage.clone().remove("missing"), storage);
}

#[test]
fn test_update_sets_and_removes() {
    let storage = Storage::singleton("count", Value::int(1));

    let bumped = storage.clone().update("count", |current| {
        current.and_then(|v| v.as_int()).map(|n| Value::int(n + 1))
    });
    assert_eq!(bumped.get_int("count"), Some(2));

    let created = storage.clone().update("other", |current| {
        assert!(current.is_none());
        Some(Value::bool(true))
    });
    assert_eq!(created.len(), 2);

    let removed = storage.update("count", |_| None);
    assert!(removed.is_empty());
}

#[test]
fn test_extend_keeps_order() {
    let mut storage = Storage::singleton("b", Value::int(2));
    storage.extend([("c", Value::int(3)), ("a", Value::int(1)), ("b", Value::int(20))]);
    assert_eq!(storage.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(storage.get_int("b"), Some(20));
}

// ===== Access Tests =====

#[test]
fn test_typed_getters() {
    let storage = config_fixture();

    assert_eq!(storage.get_string("config.item.a"), Some("alpha"));
    assert_eq!(storage.get_float("config.item.b"), Some(1.5));
    assert_eq!(storage.get_int("config.item.c"), Some(3));
    assert_eq!(storage.get_bool("config.enabled"), Some(true));
    assert_eq!(storage.get_json("config.extra"), Some(&json!({"tags": ["x", "y"]})));
}

#[test]
fn test_typed_getters_do_not_coerce() {
    let storage = config_fixture();

    assert_eq!(storage.get_float("config.item.a"), None);
    assert_eq!(storage.get_float("config.item.c"), None);
    assert_eq!(storage.get_int("config.item.b"), None);
    assert_eq!(storage.get_bool("config.item.a"), None);
    assert_eq!(storage.get_string("config.extra"), None);
    assert_eq!(storage.get_json("config.item.a"), None);
    assert_eq!(storage.get_string("missing"), None);
}

#[test]
fn test_get_string_lossy() {
    let storage = config_fixture();

    assert_eq!(storage.get_string_lossy("config.item.b"), "1.5");
    assert_eq!(storage.get_string_lossy("config.item.a"), "alpha");
    assert_eq!(storage.get_string_lossy("config.item.c"), "3");
    assert_eq!(storage.get_string_lossy("config.enabled"), "true");
    assert_eq!(storage.get_string_lossy("config.extra"), r#"{"tags":["x","y"]}"#);
    assert_eq!(storage.get_string_lossy("missing"), "");
}

#[test]
fn test_get_as() {
    let storage = config_fixture();

    let item: String = storage.get_as("config.item.a").expect("string value");
    assert_eq!(item, "alpha");

    let err = storage.get_as::<i64>("config.item.b").unwrap_err();
    assert!(matches!(
        err,
        StorageError::TypeError { key: Some(ref key), code: Some(403), .. } if key == "config.item.b"
    ));
    assert!(err.to_string().starts_with("[STORAGE] Type Error at 'config.item.b'"));

    let missing = storage.get_as::<bool>("nope").unwrap_err();
    assert!(matches!(missing, StorageError::KeyNotFound { code: Some(304), .. }));
}

#[test]
fn test_get_optional() {
    let storage = config_fixture().insert("unset", Value::empty());

    assert_eq!(storage.get_optional::<i64>("config.item.c"), Ok(Some(3)));
    assert_eq!(storage.get_optional::<i64>("missing"), Ok(None));
    assert_eq!(storage.get_optional::<i64>("unset"), Ok(None));
    assert_eq!(Storage::empty().get_optional::<String>("anything"), Ok(None));

    let err = storage.get_optional::<i64>("config.item.b").unwrap_err();
    assert!(matches!(err, StorageError::TypeError { code: Some(403), .. }));
}

#[test]
fn test_get_or() {
    let storage = config_fixture();
    assert_eq!(storage.get_or("config.item.c", 0i64), 3);
    assert_eq!(storage.get_or("config.item.b", 0i64), 0);
    assert_eq!(storage.get_or("missing", false), false);
}

#[test]
fn test_values_align_with_keys() {
    let storage = config_fixture();
    let keys: Vec<&str> = storage.keys().collect();
    let values: Vec<&Value> = storage.values().collect();

    assert_eq!(keys.len(), values.len());
    for (key, value) in keys.iter().zip(values) {
        assert_eq!(storage.get(key), Some(value));
    }
    assert_eq!(
        keys,
        [
            "config.enabled",
            "config.extra",
            "config.item.a",
            "config.item.b",
            "config.item.c",
            "name",
        ]
    );
}

#[test]
fn test_iter_is_ascending() {
    let storage = config_fixture();
    let from_iter: Vec<(&str, &Value)> = (&storage).into_iter().collect();
    let listed = storage.to_list();

    assert_eq!(from_iter.len(), listed.len());
    for ((k, v), (lk, lv)) in from_iter.iter().zip(&listed) {
        assert_eq!(*k, lk.as_str());
        assert_eq!(*v, lv);
    }
    assert_eq!(storage.iter().next_back().map(|(k, _)| k), Some("name"));
}

#[test]
fn test_namespaces() {
    let storage = Storage::from_list([
        ("a.x", Value::int(1)),
        ("a-b", Value::int(2)),
        ("a.y", Value::int(3)),
        ("b", Value::int(4)),
    ]);
    assert_eq!(storage.namespaces(), vec!["a", "a-b", "b"]);
}

#[test]
fn test_section() {
    let item = config_fixture().section("config.item");
    assert_eq!(item.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(item.get_float("b"), Some(1.5));
    assert!(config_fixture().section("nothing").is_empty());
}

#[test]
fn test_filter_keys() {
    let storage = config_fixture();

    let items = storage.filter_keys(r"^config\.item\.").expect("valid pattern");
    assert_eq!(items.len(), 3);

    let err = storage.filter_keys("config.(").unwrap_err();
    assert!(matches!(err, StorageError::PatternError { code: Some(460), .. }));
}

#[test]
fn test_filter_and_map_values() {
    let storage = config_fixture();

    let strings = storage.filter(|_, v| v.as_string().is_some());
    assert_eq!(strings.keys().collect::<Vec<_>>(), ["config.item.a", "name"]);

    let rendered = strings.map_values(|k, v| Value::string(format!("{}={}", k, v)));
    assert_eq!(rendered.get_string("name"), Some("name=demo"));
}

// ===== Combination Tests =====

#[test]
fn test_union_is_left_biased() {
    let expected = Storage::from_list([
        ("a", str_value("a1")),
        ("b2", str_value("b2")),
        ("c", str_value("c1")),
    ]);
    assert_eq!(left_fixture().union(&right_fixture()), expected);
}

#[test]
fn test_intersect_is_left_biased() {
    let expected = Storage::from_list([("a", str_value("a1"))]);
    assert_eq!(left_fixture().intersect(&right_fixture()), expected);
}

#[test]
fn test_diff() {
    let expected = Storage::from_list([("c", str_value("c1"))]);
    assert_eq!(left_fixture().diff(&right_fixture()), expected);
    assert_eq!(
        right_fixture().diff(&left_fixture()),
        Storage::from_list([("b2", str_value("b2"))])
    );
}

#[test]
fn test_combinations_with_empty() {
    let a = left_fixture();
    let empty = Storage::empty();

    assert_eq!(a.union(&empty), a);
    assert_eq!(empty.union(&a), a);
    assert!(a.intersect(&empty).is_empty());
    assert_eq!(a.diff(&empty), a);
    assert!(empty.diff(&a).is_empty());
}

#[test]
fn test_merge_visits_keys_in_order() {
    let seen = left_fixture().merge(
        &right_fixture(),
        Vec::new(),
        |k, v, mut acc| {
            acc.push(format!("left {} {}", k, v));
            acc
        },
        |k, l, r, mut acc| {
            acc.push(format!("both {} {} {}", k, l, r));
            acc
        },
        |k, v, mut acc| {
            acc.push(format!("right {} {}", k, v));
            acc
        },
    );

    assert_eq!(seen, ["both a a1 a2", "right b2 b2", "left c c1"]);
}

#[test]
fn test_unions_first_layer_wins() {
    let layers = vec![
        Storage::singleton("port", Value::int(1)),
        Storage::from_list([("port", Value::int(2)), ("host", str_value("h"))]),
        Storage::from_list([("port", Value::int(3)), ("debug", Value::bool(false))]),
    ];

    let merged = Storage::unions(layers);
    assert_eq!(merged.keys().collect::<Vec<_>>(), ["debug", "host", "port"]);
    assert_eq!(merged.get_int("port"), Some(1));
    assert!(Storage::unions(Vec::new()).is_empty());
}

// ===== Serde Tests =====

#[test]
fn test_serialize_in_key_order() {
    let storage = Storage::from_list([("b", Value::int(1)), ("a", Value::bool(true))]);
    let text = serde_json::to_string(&storage).unwrap();
    assert_eq!(
        text,
        r#"{"a":{"type":"bool","value":true},"b":{"type":"int","value":1}}"#
    );

    let back: Storage = serde_json::from_str(&text).unwrap();
    assert_eq!(back, storage);
    assert_eq!(back.keys().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn test_serialize_non_finite_floats() {
    let storage = Storage::from_list([
        ("nan", Value::float(f64::NAN)),
        ("neg", Value::float(f64::NEG_INFINITY)),
        ("pos", Value::float(f64::INFINITY)),
        ("plain", Value::float(2.0)),
    ]);
    let text = serde_json::to_string(&storage).unwrap();
    assert!(text.contains(r#""nan":{"type":"float","value":"NaN"}"#));
    assert!(text.contains(r#""neg":{"type":"float","value":"-inf"}"#));
    assert!(text.contains(r#""plain":{"type":"float","value":2.0}"#));

    let back: Storage = serde_json::from_str(&text).unwrap();
    assert!(back.get_float("nan").is_some_and(f64::is_nan));
    assert_eq!(back.get_float("neg"), Some(f64::NEG_INFINITY));
    assert_eq!(back.get_float("pos"), Some(f64::INFINITY));
    assert_eq!(back.get_float("plain"), Some(2.0));
}

#[test]
fn test_deserialize_rejects_unknown_float_text() {
    let result: Result<Storage, _> = serde_json::from_str(r#"{"x":{"type":"float","value":"many"}}"#);
    assert!(result.is_err());
}
