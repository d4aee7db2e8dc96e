use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use huffpack::{compress, decompress};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn text_payload() -> Vec<u8> {
    let paragraph = b"It is a truth universally acknowledged, that a single man in \
        possession of a good fortune, must be in want of a wife. ";
    paragraph.iter().cycle().take(64 * 1024).copied().collect()
}

fn random_payload() -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..64 * 1024).map(|_| rng.gen()).collect()
}

fn bench_compress(c: &mut Criterion) {
    let text = text_payload();
    let random = random_payload();

    let mut group = c.benchmark_group("compress");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("text_64k", |b| b.iter(|| compress(black_box(&text))));
    group.bench_function("random_64k", |b| b.iter(|| compress(black_box(&random))));
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let packed_text = compress(&text_payload());
    let packed_random = compress(&random_payload());

    let mut group = c.benchmark_group("decompress");
    group.bench_function("text_64k", |b| {
        b.iter(|| decompress(black_box(&packed_text)).unwrap())
    });
    group.bench_function("random_64k", |b| {
        b.iter(|| decompress(black_box(&packed_random)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
