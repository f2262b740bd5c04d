use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use web3_rlp::{decode_all, decode_item, encode_item, RlpItem};

/// A legacy-transaction shaped item.
fn create_transaction_item(nonce: u64) -> RlpItem {
    RlpItem::from_items(vec![
        RlpItem::from_uint(nonce),
        RlpItem::from_uint(20_000_000_000),
        RlpItem::from_uint(21_000),
        RlpItem::from_bytes(vec![0x35u8; 20]),
        RlpItem::from_uint(1_000_000_000_000_000_000),
        RlpItem::from_bytes(vec![0xabu8; 68]),
        RlpItem::from_uint(37),
        RlpItem::from_bytes(vec![0x28u8; 32]),
        RlpItem::from_bytes(vec![0x67u8; 32]),
    ])
}

fn create_nested_item(depth: usize) -> RlpItem {
    let mut item = RlpItem::from_text("leaf");
    for _ in 0..depth {
        item = RlpItem::from_items(vec![item, RlpItem::from_uint(depth as u64)]);
    }
    item
}

/// Benchmark encoding of transaction lists
fn bench_encode_transactions(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_transactions");
    group.measurement_time(Duration::from_secs(10));

    for count in &[1, 100, 1000] {
        let block = RlpItem::from_items((0..*count).map(create_transaction_item));
        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &block, |b, block| {
            b.iter(|| encode_item(black_box(block)));
        });
    }

    group.finish();
}

/// Benchmark decoding of transaction lists
fn bench_decode_transactions(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_transactions");
    group.measurement_time(Duration::from_secs(10));

    for count in &[1, 100, 1000] {
        let encoded = encode_item(&RlpItem::from_items((0..*count).map(create_transaction_item)));
        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &encoded, |b, encoded| {
            b.iter(|| decode_item(black_box(encoded)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark back-to-back decoding
fn bench_decode_stream(c: &mut Criterion) {
    let mut buffer = Vec::new();
    for nonce in 0..500 {
        buffer.extend_from_slice(&encode_item(&create_transaction_item(nonce)));
    }

    c.bench_function("decode_stream_500", |b| {
        b.iter(|| decode_all(black_box(&buffer)).unwrap());
    });
}

/// Benchmark deep nesting
fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested");

    for depth in &[8, 64, 256] {
        let item = create_nested_item(*depth);
        let encoded = encode_item(&item);
        group.bench_with_input(BenchmarkId::new("encode", depth), &item, |b, item| {
            b.iter(|| encode_item(black_box(item)));
        });
        group.bench_with_input(BenchmarkId::new("decode", depth), &encoded, |b, encoded| {
            b.iter(|| decode_item(black_box(encoded)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark long byte strings
fn bench_large_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_strings");

    for size in &[56usize, 1024, 1024 * 1024] {
        let item = RlpItem::from_bytes(vec![0x5au8; *size]);
        let encoded = encode_item(&item);
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &item, |b, item| {
            b.iter(|| encode_item(black_box(item)));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, encoded| {
            b.iter(|| decode_item(black_box(encoded)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_transactions,
    bench_decode_transactions,
    bench_decode_stream,
    bench_nested,
    bench_large_strings
);
criterion_main!(benches);
