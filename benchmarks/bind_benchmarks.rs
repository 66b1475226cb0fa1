#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::expect_used,
    clippy::print_stdout
)]

/// Comparison benchmarks: uqs query parsing vs the url crate's
/// form_urlencoded, plus schema evaluation and URL construction
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

use uqs::{EvalCache, Field, QueryPairs, Schema, Update};

// Rust url crate (re-exports the form_urlencoded parser)
use url::form_urlencoded;

const SIMPLE_QUERY: &str = "page=3&q=rust";
const COMPLEX_QUERY: &str =
    "page=3&q=vintage+camera+lens&debug=1&sort=desc&filters=%7B%22brand%22%3A%22acme%22%2C%22price%22%3A%7B%22max%22%3A100%7D%7D&utm_source=newsletter&session=a1b2c3";

fn shop_schema() -> Schema {
    Schema::builder()
        .field(Field::integer("page").min(1).fallback(1))
        .field(Field::text("q").max_len(200).fallback(""))
        .field(Field::flag("debug").fallback(false))
        .field(Field::text("sort").one_of(["asc", "desc"]).fallback("asc"))
        .field(Field::json("filters").fallback(json!({})))
        .build()
        .unwrap()
}

fn bench_parse_query_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_query");

    group.bench_function("uqs_simple", |b| {
        b.iter(|| QueryPairs::parse(black_box(SIMPLE_QUERY)));
    });

    group.bench_function("url_crate_simple", |b| {
        b.iter(|| {
            form_urlencoded::parse(black_box(SIMPLE_QUERY).as_bytes())
                .collect::<Vec<_>>()
        });
    });

    group.bench_function("uqs_complex", |b| {
        b.iter(|| QueryPairs::parse(black_box(COMPLEX_QUERY)));
    });

    group.bench_function("url_crate_complex", |b| {
        b.iter(|| {
            form_urlencoded::parse(black_box(COMPLEX_QUERY).as_bytes())
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

fn bench_serialize_query_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_query");
    let pairs = QueryPairs::parse(COMPLEX_QUERY);

    group.bench_function("uqs", |b| {
        b.iter(|| black_box(&pairs).to_string());
    });

    group.bench_function("url_crate", |b| {
        b.iter(|| {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (key, value) in black_box(&pairs).iter() {
                serializer.append_pair(key, value);
            }
            serializer.finish()
        });
    });

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let schema = shop_schema();
    let query = QueryPairs::parse(COMPLEX_QUERY);

    group.bench_function("cold", |b| {
        b.iter(|| schema.evaluate(black_box(&query)).unwrap());
    });

    group.bench_function("memoized", |b| {
        let mut cache = EvalCache::new();
        b.iter(|| cache.evaluate(black_box(&schema), black_box(&query)).unwrap());
    });

    group.finish();
}

fn bench_create_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_url");
    let schema = shop_schema();
    let query = QueryPairs::parse(COMPLEX_QUERY);
    let small_update = Update::new().set("page", 4);
    let large_update = Update::new()
        .set("page", 1)
        .set("q", "vintage camera body")
        .set("filters", json!({"brand": "lumo", "price": {"max": 250}}))
        .clear("session");

    group.bench_function("single_field", |b| {
        b.iter(|| schema.create_url("/shop", black_box(&query), black_box(&small_update)));
    });

    group.bench_function("multi_field", |b| {
        b.iter(|| schema.create_url("/shop", black_box(&query), black_box(&large_update)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_query_all,
    bench_serialize_query_all,
    bench_evaluate,
    bench_create_url
);

criterion_main!(benches);
