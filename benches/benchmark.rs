use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use chrono::{Duration, Utc};
use polls::model::{NewChoice, NewQuestion};
use polls::persist::{PersistenceMode, Persistor};
use polls::query::{get_results, latest_questions};
use polls::store::{ChoiceStore, QuestionStore};

fn seeded(questions: i64) -> Persistor {
    let store = Persistor::open(PersistenceMode::InMemory).unwrap();
    let now = Utc::now();
    for n in 0..questions {
        // every tenth question is still in the future
        let offset = if n % 10 == 0 { Duration::hours(n + 1) } else { -Duration::hours(n) };
        let question = store
            .create_question(NewQuestion::new(format!("question {n}"), now + offset))
            .unwrap();
        for c in 0..3 {
            store.create_choice(NewChoice::new(question.id(), format!("choice {c}"))).unwrap();
        }
    }
    store
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let now = Utc::now();
    for size in [10, 1_000, 10_000] {
        let store = seeded(size);
        c.bench_function(&format!("latest {size}"), |b| {
            b.iter(|| latest_questions(black_box(&store), now, None).unwrap())
        });
        c.bench_function(&format!("latest 25 of {size}"), |b| {
            b.iter(|| latest_questions(black_box(&store), now, Some(25)).unwrap())
        });
        let visible = latest_questions(&store, now, Some(1)).unwrap();
        let id = visible[0].id();
        c.bench_function(&format!("results {size}"), |b| {
            b.iter(|| get_results(black_box(&store), id, now).unwrap())
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
