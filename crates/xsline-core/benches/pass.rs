use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::sync::Arc;
use xsline_core::{
    Document, ShiftExt, ShiftRef, StLambda, TrDefault, TrJoined, Train, TrainRef, Xsline,
    XslineConfig,
};

fn counter_train(len: usize) -> TrainRef<ShiftRef> {
    let start: TrainRef<ShiftRef> = Arc::new(TrDefault::new());
    (0..len).fold(start, |train, i| {
        train.with(
            StLambda::named(format!("inc-{}", i), |_, doc| {
                let n = doc.as_value()["n"].as_u64().unwrap_or(0);
                Ok(Document::new(json!({ "n": n + 1 })))
            })
            .into_ref(),
        )
    })
}

fn bench_pass(c: &mut Criterion) {
    let quiet = XslineConfig {
        diagnostics: false,
        trace_shifts: false,
    };

    let flat = Xsline::new(counter_train(100)).with_config(quiet.clone());
    c.bench_function("pass_flat_100", |b| {
        b.iter(|| flat.pass(black_box(Document::new(json!({ "n": 0 })))).unwrap())
    });

    let joined = Xsline::new(TrJoined::new(vec![counter_train(50), counter_train(50)]))
        .with_config(quiet);
    c.bench_function("pass_joined_2x50", |b| {
        b.iter(|| joined.pass(black_box(Document::new(json!({ "n": 0 })))).unwrap())
    });
}

criterion_group!(benches, bench_pass);
criterion_main!(benches);
