#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// End-to-end binding tests
///
/// This test suite covers:
/// - URL construction from partial updates
/// - Preservation of unrelated keys and of key positions
/// - Removal, idempotence, and the no-mutation guarantee
/// - Write/read symmetry between `create_url` and `evaluate`
/// - Memoized evaluation identity
use serde_json::json;
use std::sync::Arc;
use uqs::{Binder, EvalCache, Field, QueryPairs, Schema, Update, split_target};

fn item_schema() -> Schema {
    Schema::builder()
        .field(Field::integer("count").min(0).fallback(0))
        .field(Field::text("q").fallback(""))
        .field(Field::flag("debug").fallback(false))
        .field(Field::json("filters").fallback(json!({})))
        .build()
        .unwrap()
}

#[test]
fn test_create_url_preserves_unrelated_keys() {
    let schema = item_schema();
    let query = QueryPairs::parse("hello=world");
    let update = Update::new().set("count", 1);
    assert_eq!(
        schema.create_url("/items", &query, &update),
        "/items?hello=world&count=1"
    );
}

#[test]
fn test_create_url_updates_in_place() {
    let schema = item_schema();
    let query = QueryPairs::parse("count=1&hello=world");
    let update = Update::new().set("count", 2);
    assert_eq!(
        schema.create_url("/items", &query, &update),
        "/items?count=2&hello=world"
    );
}

#[test]
fn test_create_url_overwrites_instead_of_duplicating() {
    let schema = item_schema();
    let query = QueryPairs::parse("count=1");
    let url = schema.create_url("/items", &query, &Update::new().set("count", 2));
    assert_eq!(url, "/items?count=2");
    assert_eq!(url.matches("count=").count(), 1);
}

#[test]
fn test_create_url_collapses_existing_duplicates_of_updated_key() {
    let schema = item_schema();
    let query = QueryPairs::parse("count=1&q=a&count=9");
    let url = schema.create_url("/items", &query, &Update::new().set("count", 2));
    assert_eq!(url, "/items?count=2&q=a");
}

#[test]
fn test_create_url_is_idempotent() {
    let schema = item_schema();
    let query = QueryPairs::parse("a=1&count=3");
    let update = Update::new().set("count", 4).set("q", "rust");
    let first = schema.create_url("/items", &query, &update);
    let second = schema.create_url("/items", &query, &update);
    assert_eq!(first, second);
}

#[test]
fn test_create_url_does_not_mutate_inputs() {
    let schema = item_schema();
    let query = QueryPairs::parse("count=1&hello=world");
    let before = query.clone();
    let update = Update::new().set("count", 2).clear("hello");
    let _ = schema.create_url("/items", &query, &update);
    assert_eq!(query, before);
}

#[test]
fn test_create_url_empty_update_keeps_query() {
    let schema = item_schema();
    let query = QueryPairs::parse("a=1&b=2");
    assert_eq!(
        schema.create_url("/items", &query, &Update::new()),
        "/items?a=1&b=2"
    );
}

#[test]
fn test_create_url_bare_path_when_query_is_empty() {
    let schema = item_schema();
    assert_eq!(
        schema.create_url("/items", &QueryPairs::new(), &Update::new()),
        "/items"
    );
}

#[test]
fn test_create_url_clear_removes_key() {
    let schema = item_schema();
    let query = QueryPairs::parse("hello=world&count=1");
    let update = Update::new().clear("count");
    assert_eq!(
        schema.create_url("/items", &query, &update),
        "/items?hello=world"
    );
}

#[test]
fn test_create_url_clearing_last_key_yields_bare_path() {
    let schema = item_schema();
    let query = QueryPairs::parse("count=1");
    assert_eq!(
        schema.create_url("/items", &query, &Update::new().clear("count")),
        "/items"
    );
}

#[test]
fn test_create_url_clear_missing_key_is_noop() {
    let schema = item_schema();
    let query = QueryPairs::parse("a=1");
    assert_eq!(
        schema.create_url("/items", &query, &Update::new().clear("zzz")),
        "/items?a=1"
    );
}

#[test]
fn test_create_url_text_values_travel_bare() {
    let schema = item_schema();
    let update = Update::new().set("q", "rust lang");
    assert_eq!(
        schema.create_url("/search", &QueryPairs::new(), &update),
        "/search?q=rust+lang"
    );
}

#[test]
fn test_create_url_numbers_and_flags_as_literals() {
    let schema = item_schema();
    let update = Update::new().set("count", 7).set("debug", true);
    assert_eq!(
        schema.create_url("/items", &QueryPairs::new(), &update),
        "/items?count=7&debug=true"
    );
}

#[test]
fn test_create_url_json_values_as_json_text() {
    let schema = item_schema();
    let update = Update::new().set("filters", json!({"brand": "acme"}));
    assert_eq!(
        schema.create_url("/items", &QueryPairs::new(), &update),
        "/items?filters=%7B%22brand%22%3A%22acme%22%7D"
    );
}

#[test]
fn test_create_url_json_string_stays_readable() {
    // A string in a JSON field is written as quoted JSON text, so reading
    // it back yields the same string instead of a re-quoted one
    let schema = Schema::builder()
        .field(Field::json("mode").fallback(json!("plain")))
        .build()
        .unwrap();
    let url = schema.create_url("/view", &QueryPairs::new(), &Update::new().set("mode", "fancy"));
    assert_eq!(url, "/view?mode=%22fancy%22");

    let (_, query, _) = split_target(&url);
    let state = schema.evaluate(&QueryPairs::parse(query.unwrap())).unwrap();
    assert_eq!(state.text("mode"), Some("fancy"));
}

#[test]
fn test_create_url_kind_mismatch_degrades_on_read() {
    // A value that does not match its field's kind still serializes, but
    // reads back as the fallback like any other invalid input
    let schema = item_schema();
    let url = schema.create_url("/items", &QueryPairs::new(), &Update::new().set("count", "x"));
    assert_eq!(url, "/items?count=x");

    let (_, raw_query, _) = split_target(&url);
    let state = schema.evaluate(&QueryPairs::parse(raw_query.unwrap())).unwrap();
    assert_eq!(state.integer("count"), Some(0));
}

#[test]
fn test_create_url_undeclared_key_shaped_by_value() {
    let schema = item_schema();
    let update = Update::new().set("theme", "dark").set("extra", json!([1, 2]));
    assert_eq!(
        schema.create_url("/items", &QueryPairs::new(), &update),
        "/items?theme=dark&extra=%5B1%2C2%5D"
    );
}

#[test]
fn test_round_trip_through_evaluate() {
    let schema = item_schema();
    let query = QueryPairs::parse("q=vintage&unrelated=keep");
    let update = Update::new()
        .set("count", 42)
        .set("debug", true)
        .set("filters", json!({"price": {"max": 100}}));

    let url = schema.create_url("/shop", &query, &update);
    let (path, raw_query, _) = split_target(&url);
    assert_eq!(path, "/shop");

    let next = QueryPairs::parse(raw_query.unwrap());
    assert_eq!(next.get("unrelated"), Some("keep"));

    let state = schema.evaluate(&next).unwrap();
    assert_eq!(state.integer("count"), Some(42));
    assert_eq!(state.text("q"), Some("vintage"));
    assert_eq!(state.flag("debug"), Some(true));
    assert_eq!(state.get("filters"), Some(&json!({"price": {"max": 100}})));
}

#[test]
fn test_binder_state_is_memoized_by_identity() {
    let mut binder = Binder::new(item_schema());
    let query = QueryPairs::parse("count=5");

    let first = binder.state(&query).unwrap();
    let second = binder.state(&query).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let other = binder.state(&QueryPairs::parse("count=6")).unwrap();
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(other.integer("count"), Some(6));
}

#[test]
fn test_binder_recomputes_after_query_changes_back() {
    // Single-slot memo: switching away evicts the old entry
    let mut binder = Binder::new(item_schema());
    let query = QueryPairs::parse("count=5");

    let first = binder.state(&query).unwrap();
    let _ = binder.state(&QueryPairs::parse("count=6")).unwrap();
    let third = binder.state(&query).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(*first, *third);
}

#[test]
fn test_eval_cache_keyed_by_schema_fingerprint() {
    let narrow = Schema::builder()
        .field(Field::integer("count").fallback(0))
        .build()
        .unwrap();
    let wide = Schema::builder()
        .field(Field::integer("count").fallback(7))
        .build()
        .unwrap();

    let mut cache = EvalCache::new();
    let query = QueryPairs::parse("");
    let first = cache.evaluate(&narrow, &query).unwrap();
    let second = cache.evaluate(&wide, &query).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.integer("count"), Some(0));
    assert_eq!(second.integer("count"), Some(7));
}

#[test]
fn test_eval_cache_distinguishes_regrouped_declarations() {
    // The allowed values concatenate to the same bytes; the schemas must
    // still get distinct cache entries
    let grouped = Schema::builder()
        .field(Field::text("sort").one_of(["ab", "c", "z"]).fallback("z"))
        .build()
        .unwrap();
    let regrouped = Schema::builder()
        .field(Field::text("sort").one_of(["a", "bc", "z"]).fallback("z"))
        .build()
        .unwrap();
    assert_ne!(grouped.fingerprint(), regrouped.fingerprint());

    let mut cache = EvalCache::new();
    let query = QueryPairs::parse("sort=ab");
    let accepted = cache.evaluate(&grouped, &query).unwrap();
    assert_eq!(accepted.text("sort"), Some("ab"));

    // "ab" is not an allowed value of the regrouped schema, so its state
    // must be recomputed, not served from the other schema's slot
    let degraded = cache.evaluate(&regrouped, &query).unwrap();
    assert!(!Arc::ptr_eq(&accepted, &degraded));
    assert_eq!(degraded.text("sort"), Some("z"));
}

#[test]
fn test_eval_cache_does_not_cache_errors() {
    let schema = Schema::builder()
        .field(Field::integer("id"))
        .build()
        .unwrap();
    let mut cache = EvalCache::new();

    assert!(cache.evaluate(&schema, &QueryPairs::parse("")).is_err());
    assert!(cache.evaluate(&schema, &QueryPairs::parse("")).is_err());

    let good = QueryPairs::parse("id=3");
    let first = cache.evaluate(&schema, &good).unwrap();

    // A later failure leaves the cached entry in place
    assert!(cache.evaluate(&schema, &QueryPairs::parse("id=x")).is_err());
    let second = cache.evaluate(&schema, &good).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_binder_create_url_delegates_to_schema() {
    let binder = Binder::new(item_schema());
    let query = QueryPairs::parse("q=a");
    let update = Update::new().set("count", 2);
    assert_eq!(
        binder.create_url("/items", &query, &update),
        binder.schema().create_url("/items", &query, &update)
    );
}

#[test]
fn test_host_supplied_pairs() {
    // Routers that hand over decoded pairs skip the string parse
    let mut binder = Binder::new(item_schema());
    let query = QueryPairs::from_pairs([("count", "8"), ("q", "boots")]);
    let state = binder.state(&query).unwrap();
    assert_eq!(state.integer("count"), Some(8));
    assert_eq!(state.text("q"), Some("boots"));
}

#[test]
fn test_update_from_iterator() {
    let update: Update = [
        ("count".to_string(), json!(3)),
        ("q".to_string(), json!("hat")),
    ]
    .into_iter()
    .collect();
    let schema = item_schema();
    assert_eq!(
        schema.create_url("/items", &QueryPairs::new(), &update),
        "/items?count=3&q=hat"
    );
}
