// Throughput benchmarks for the fragment codec and the secret splitter,
// in the style of the protocol-level criterion benches this crate's demo
// harness is modeled after.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use medvault_fec::{Fragment, FragmentCodec, ThresholdSecretSplitter};

fn sample(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragment_codec/encode");

    for &len in &[4 * 1024, 64 * 1024, 1024 * 1024] {
        let codec = FragmentCodec::new(8, 4).unwrap();
        let data = sample(len);

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| codec.encode(data).unwrap());
        });
    }

    group.finish();
}

fn bench_decode_no_erasures(c: &mut Criterion) {
    let codec = FragmentCodec::new(8, 4).unwrap();
    let data = sample(256 * 1024);
    let fragments = codec.encode(&data).unwrap();

    c.bench_function("fragment_codec/decode_no_erasures", |b| {
        b.iter(|| {
            let received: Vec<Option<Fragment>> = fragments.iter().cloned().map(Some).collect();
            codec.decode(received).unwrap()
        });
    });
}

fn bench_decode_single_erasure(c: &mut Criterion) {
    let codec = FragmentCodec::new(8, 4).unwrap();
    let data = sample(256 * 1024);
    let fragments = codec.encode(&data).unwrap();

    c.bench_function("fragment_codec/decode_single_erasure", |b| {
        b.iter(|| {
            let mut received: Vec<Option<Fragment>> = fragments.iter().cloned().map(Some).collect();
            received[0] = None;
            codec.decode(received).unwrap()
        });
    });
}

fn bench_decode_max_erasures(c: &mut Criterion) {
    let codec = FragmentCodec::new(8, 4).unwrap();
    let data = sample(256 * 1024);
    let fragments = codec.encode(&data).unwrap();

    c.bench_function("fragment_codec/decode_max_erasures", |b| {
        b.iter(|| {
            let mut received: Vec<Option<Fragment>> = fragments.iter().cloned().map(Some).collect();
            for slot in 0..4 {
                received[slot] = None;
            }
            codec.decode(received).unwrap()
        });
    });
}

fn bench_split_and_reconstruct(c: &mut Criterion) {
    let splitter = ThresholdSecretSplitter::new(5, 9).unwrap();
    let secret = [0x37u8; 32];

    c.bench_function("secret_splitter/split", |b| {
        b.iter(|| splitter.split(&secret).unwrap());
    });

    let shares = splitter.split(&secret).unwrap();
    c.bench_function("secret_splitter/reconstruct", |b| {
        b.iter(|| splitter.reconstruct_with_len(&shares[..5], secret.len()).unwrap());
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode_no_erasures,
    bench_decode_single_erasure,
    bench_decode_max_erasures,
    bench_split_and_reconstruct,
);
criterion_main!(benches);
