use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_cbc::Aes128Cbc;
use aes_core::{encrypt_block, expand_key, Aes128Key};

fn bench_block(c: &mut Criterion) {
    let key = Aes128Key::from([0u8; 16]);
    let round_keys = expand_key(&key);
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);

    let mut group = c.benchmark_group("block");
    group.bench_function("expand_key", |b| b.iter(|| expand_key(&key)));
    group.bench_function("encrypt_block", |b| {
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        b.iter(|| encrypt_block(&block, &round_keys));
    });
    group.finish();
}

fn bench_cbc(c: &mut Criterion) {
    let session = Aes128Cbc::new(&Aes128Key::from([1u8; 16]), &[2u8; 16]);
    let mut rng = ChaCha20Rng::from_seed([4u8; 32]);

    let mut group = c.benchmark_group("cbc");
    for size in [64usize, 1024, 16 * 1024] {
        let mut msg = vec![0u8; size];
        rng.fill_bytes(&mut msg);
        let ct = session.encrypt(&msg);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encrypt", size), &msg, |b, msg| {
            b.iter(|| session.encrypt(msg));
        });
        group.bench_with_input(BenchmarkId::new("decrypt", size), &ct, |b, ct| {
            b.iter(|| session.decrypt(ct));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_block, bench_cbc);
criterion_main!(benches);
