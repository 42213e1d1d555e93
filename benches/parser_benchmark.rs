use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quizgenius::models::Difficulty;
use quizgenius::parser::parse_generated_quiz;
use std::fmt::Write;

/// Build a well-formed flat blob with `count` four-option questions.
fn build_blob(count: u32) -> String {
    let mut blob = String::from("{");
    for i in 1..=count {
        if i > 1 {
            blob.push(',');
        }
        write!(
            blob,
            "\"question{i}\":\"Question number {i}?\",\
             \"answer{i}_1\":\"alpha\",\"answer{i}_2\":\"bravo\",\
             \"answer{i}_3\":\"charlie\",\"answer{i}_4\":\"delta\",\
             \"correct_answer{i}\":\"charlie\""
        )
        .unwrap();
    }
    blob.push('}');
    blob
}

fn benchmark_parse(c: &mut Criterion) {
    let ten = build_blob(10);

    // Same blob, but every stated answer is missing from its options so
    // the repair path runs for each question.
    let mut ten_repair = build_blob(10);
    for i in 1..=10 {
        ten_repair = ten_repair.replace(
            &format!("\"correct_answer{i}\":\"charlie\""),
            &format!("\"correct_answer{i}\":\"echo\""),
        );
    }

    let mut group = c.benchmark_group("parse_generated_quiz");

    group.bench_function("ten_questions_clean", |b| {
        b.iter(|| parse_generated_quiz(black_box(&ten), "Benchmark", Difficulty::Medium, 10))
    });

    group.bench_function("ten_questions_repair_path", |b| {
        b.iter(|| {
            parse_generated_quiz(black_box(&ten_repair), "Benchmark", Difficulty::Medium, 10)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_parse);
criterion_main!(benches);
