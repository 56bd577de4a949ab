use criterion::{black_box, criterion_group, criterion_main, Criterion};
use deb822_lossless::FileElement;

fn parse_deb822_benchmark(c: &mut Criterion) {
    let control_data =
        std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/bench/Sources"))
            .expect("Could not read control file");

    c.bench_function("parse", |b| {
        b.iter(|| {
            let file = FileElement::parse(black_box(&control_data)).unwrap();
            black_box(file.iter_paragraphs().count());
        });
    });
}

criterion_group!(benches, parse_deb822_benchmark);
criterion_main!(benches);
