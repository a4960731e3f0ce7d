//! Benchmarks for rate resolution and cost aggregation.
//!
//! The resolver runs once per message row on every dashboard page load, so
//! its per-call cost matters at listing sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokenlens::analytics::CostEngine;
use tokenlens::pricing::{multiplier, resolve, RateQuery, RateTable, TokenClass};
use tokenlens::store::MessageRecord;

fn bench_resolve(c: &mut Criterion) {
    let table = RateTable::default_table();
    let mut group = c.benchmark_group("resolve");

    for name in [
        "gpt-4o",                      // exact hit
        "claude-3-5-sonnet-20240620",  // substring hit
        "gpt-4-0613",                  // legacy alias
        "totally-unknown-model",       // full-table miss
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| resolve(&table, black_box(name)));
        });
    }
    group.finish();
}

fn bench_multiplier(c: &mut Criterion) {
    let table = RateTable::default_table();
    c.bench_function("multiplier/for_model", |b| {
        b.iter(|| {
            multiplier(
                &table,
                RateQuery::ForModel {
                    model: black_box("gpt-4o-mini"),
                    endpoint: None,
                    class: TokenClass::Completion,
                },
            )
        });
    });
}

fn conversation(messages: usize) -> Vec<MessageRecord> {
    (0..messages)
        .map(|i| MessageRecord {
            message_id: format!("m{i}"),
            parent_message_id: (i > 0).then(|| format!("m{}", i - 1)),
            conversation_id: "c1".to_string(),
            is_user_authored: i % 2 == 0,
            model: (i % 2 == 1).then(|| "gpt-4o".to_string()),
            token_count: Some(250),
            ..MessageRecord::default()
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let engine = CostEngine::new(Arc::new(RateTable::default_table()));
    let mut group = c.benchmark_group("aggregate");

    for size in [10usize, 100, 1000] {
        let messages = conversation(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, m| {
            b.iter(|| engine.aggregate(black_box(m)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_multiplier, bench_aggregate);
criterion_main!(benches);
