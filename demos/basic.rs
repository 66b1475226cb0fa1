/// Query state walkthrough: declare a schema, evaluate a query, build
/// updated URLs.
use uqs::{Field, QueryPairs, Schema, Update};

fn main() -> uqs::Result<()> {
    let schema = Schema::builder()
        .field(Field::integer("page").min(1).fallback(1))
        .field(Field::text("q").max_len(100).fallback(""))
        .field(Field::flag("debug").fallback(false))
        .build()?;

    // page=0 violates the minimum, so it degrades to the fallback;
    // theme is not declared and stays out of the state
    let query = QueryPairs::parse("q=crates&page=0&theme=dark");
    let state = schema.evaluate(&query)?;
    println!("page:  {:?}", state.integer("page"));
    println!("q:     {:?}", state.text("q"));
    println!("debug: {:?}", state.flag("debug"));

    // Updates merge into the current query; unrelated keys survive
    let next = schema.create_url("/search", &query, &Update::new().set("page", 2));
    println!("next:  {next}");

    // Null removes a key; an emptied query drops the `?` entirely
    let cleared = schema.create_url(
        "/search",
        &QueryPairs::parse("q=crates"),
        &Update::new().clear("q"),
    );
    println!("bare:  {cleared}");

    Ok(())
}
