use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tsuzuri_core::engine::Engine;
use tsuzuri_core::segmenter::segmentize;
use tsuzuri_core::syllable_table::default_table;

const BENCH_WORD: &str = "shinkansennojikokuhyouwokakuninshite、kippuwokaimashita。";

fn bench_segmentize(c: &mut Criterion) {
    c.bench_function("segmenter/long_sentence", |b| {
        b.iter(|| black_box(segmentize(default_table(), black_box(BENCH_WORD))));
    });
}

fn bench_type_word(c: &mut Criterion) {
    c.bench_function("engine/type_word_correctly", |b| {
        b.iter(|| {
            let mut engine = Engine::new("shinkansen");
            for key in "sinnkannsenn".chars() {
                black_box(engine.input(key));
            }
            black_box(engine.is_complete())
        });
    });
}

fn bench_miss_and_backspace(c: &mut Criterion) {
    let mut engine = Engine::new("chikatetsu");
    c.bench_function("engine/miss_then_backspace", |b| {
        b.iter(|| {
            black_box(engine.input('x'));
            black_box(engine.backspace());
        });
    });
}

fn bench_nasal_expansion(c: &mut Criterion) {
    let mut engine = Engine::new("kanji");
    for key in "kan".chars() {
        engine.input(key);
    }
    c.bench_function("engine/expand_then_undo", |b| {
        b.iter(|| {
            black_box(engine.input('n'));
            black_box(engine.backspace());
            black_box(engine.input('n'));
        });
    });
}

criterion_group!(
    benches,
    bench_segmentize,
    bench_type_word,
    bench_miss_and_backspace,
    bench_nasal_expansion
);
criterion_main!(benches);
