//! ラティス形式のデコードとエンコードのベンチマーク
//!
//! 複数文からなるラティスを1文ずつデコードし、その後JSON・XMLへ
//! エンコードする速度を計測します。

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kakariuke::{Sentence, decode_sentence, encode_json, encode_xml};

const CORPUS: &str = include_str!("./resources/corpus.lattice");
const REPEAT: usize = 200;

fn bench_decode(c: &mut Criterion) {
    let sentences: Vec<&str> = CORPUS.split_inclusive("EOS\n").collect();
    let lattices: Vec<&str> = sentences
        .iter()
        .copied()
        .cycle()
        .take(sentences.len() * REPEAT)
        .collect();
    let total_bytes: usize = lattices.iter().map(|l| l.len()).sum();

    let mut group = c.benchmark_group("Lattice");
    group.throughput(Throughput::Bytes(total_bytes as u64));
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    group.bench_function(BenchmarkId::new("Decode", "Corpus"), |b| {
        b.iter(|| {
            for lattice in &lattices {
                criterion::black_box(decode_sentence(lattice));
            }
        });
    });

    let decoded: Vec<Sentence> = lattices.iter().map(|l| Sentence::from_lattice(l)).collect();

    group.bench_function(BenchmarkId::new("EncodeJson", "Corpus"), |b| {
        b.iter(|| {
            for sentence in &decoded {
                criterion::black_box(encode_json(sentence));
            }
        });
    });

    group.bench_function(BenchmarkId::new("EncodeXml", "Corpus"), |b| {
        b.iter(|| {
            for sentence in &decoded {
                criterion::black_box(encode_xml(sentence));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
