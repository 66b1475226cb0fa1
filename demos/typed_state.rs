/// Deserialize bound state into a plain struct and feed edits back into a
/// URL, round-tripping through a memoized binder.
use serde::Deserialize;
use serde_json::json;
use uqs::{Binder, Field, QueryPairs, Schema, Update, split_target};

#[derive(Debug, Deserialize)]
struct ShopQuery {
    page: i64,
    sort: String,
    filters: serde_json::Value,
}

fn main() -> uqs::Result<()> {
    let schema = Schema::builder()
        .field(Field::integer("page").min(1).fallback(1))
        .field(Field::text("sort").one_of(["asc", "desc"]).fallback("asc"))
        .field(Field::json("filters").fallback(json!({})))
        .build()?;
    let mut binder = Binder::new(schema);

    let query = QueryPairs::parse("page=2&sort=desc");
    let state = binder.state(&query)?;
    let shop: ShopQuery = state.decode()?;
    println!("decoded: {shop:?}");

    // Same query, same state: the memo hands back the identical allocation
    let again = binder.state(&query)?;
    println!("memo hit: {}", std::sync::Arc::ptr_eq(&state, &again));

    // JSON fields travel as compact JSON text
    let url = binder.create_url(
        "/shop",
        &query,
        &Update::new().set("filters", json!({"brand": "acme"})),
    );
    println!("url: {url}");

    // And come back out as structured values
    let (_, raw_query, _) = split_target(&url);
    let next = QueryPairs::parse(raw_query.unwrap_or(""));
    let state = binder.state(&next)?;
    println!("filters: {}", state.get("filters").unwrap_or(&json!(null)));

    Ok(())
}
