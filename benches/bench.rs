// Criterion benchmarks for Resume Ranker

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use resume_ranker::core::{normalize, ResumeRanker, TfidfVectorizer};
use resume_ranker::models::{DocumentFormat, DocumentReference};

const SKILLS: &[&str] = &[
    "rust", "python", "kubernetes", "postgres", "react", "terraform", "kafka", "spark",
    "django", "typescript", "golang", "aws", "docker", "linux", "graphql", "redis",
];

fn create_resume(id: usize) -> String {
    let mut text = format!("Candidate #{id}: experienced engineer, {} years.\n", id % 15);
    for k in 0..40 {
        text.push_str(SKILLS[(id * 7 + k * 3) % SKILLS.len()]);
        text.push_str(if k % 5 == 0 { ", " } else { " " });
    }
    text
}

const JOB_DESCRIPTION: &str =
    "Senior backend engineer: Rust or Go, PostgreSQL, Kafka, Kubernetes on AWS. Python a plus.";

fn bench_normalize(c: &mut Criterion) {
    let raw = create_resume(42).repeat(50);
    c.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box(&raw)));
    });
}

fn bench_fit_transform(c: &mut Criterion) {
    let vectorizer = TfidfVectorizer::default();
    let mut group = c.benchmark_group("fit_transform");

    for count in [10, 50, 100, 500].iter() {
        let mut corpus = vec![normalize(JOB_DESCRIPTION)];
        corpus.extend((0..*count).map(|i| normalize(&create_resume(i))));

        group.bench_with_input(BenchmarkId::from_parameter(count), &corpus, |b, corpus| {
            b.iter(|| vectorizer.fit_transform(black_box(corpus.as_slice())));
        });
    }

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = ResumeRanker::with_defaults();
    let mut group = c.benchmark_group("ranking");

    for count in [10, 100, 500].iter() {
        let documents: Vec<DocumentReference> = (0..*count)
            .map(|i| {
                DocumentReference::from_bytes(
                    format!("{i}.txt"),
                    create_resume(i).into_bytes(),
                    DocumentFormat::PlainText,
                )
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &documents, |b, documents| {
            b.iter(|| ranker.rank(black_box(JOB_DESCRIPTION), black_box(documents)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_fit_transform, bench_ranking);
criterion_main!(benches);
