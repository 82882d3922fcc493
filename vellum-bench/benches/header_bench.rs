//! Header encoding/decoding benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vellum_format::{version, Header, HeaderCodec};

fn bench_header_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_encode");

    for max_version_len in [8, 16, 64] {
        let codec = HeaderCodec::new("1.0.0", max_version_len).unwrap();
        let header = codec.new_header(4096);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(max_version_len),
            &header,
            |b, header| {
                b.iter(|| black_box(codec.encode(header).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_header_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_decode");
    let codec = HeaderCodec::default();

    // Headers from newer writers carry fields this codec skips.
    for trailing in [0u64, 64, 4096] {
        let header = Header {
            version: "1.0.0".to_string(),
            header_size: codec.header_size() + trailing,
            data_size: 0,
        };
        let mut encoded = codec.encode(&header).unwrap().to_vec();
        encoded.resize(encoded.len() + trailing as usize, 0);

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("trailing_bytes", trailing),
            &encoded,
            |b, encoded| {
                b.iter(|| black_box(codec.decode(&mut &encoded[..]).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_version_tag(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_tag");
    let tag = version::encode("1.0.0", 16).unwrap();

    group.bench_function("encode", |b| {
        b.iter(|| black_box(version::encode(black_box("1.0.0"), 16).unwrap()));
    });
    group.bench_function("decode", |b| {
        b.iter(|| black_box(version::decode(black_box(&tag))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_header_encode,
    bench_header_decode,
    bench_version_tag,
);

criterion_main!(benches);
