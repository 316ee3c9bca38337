use criterion::{criterion_group, criterion_main, Criterion};
use ecurve::{curve_by_name, BigUint, Point};

use rand::rngs::OsRng;
use rand::{Rng, RngCore};

fn random_scalar<R: RngCore>(rng: &mut R, n: &BigUint) -> BigUint {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    BigUint::from_bytes_be(&bytes) % n
}

fn bench_point_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_mul");

    let mut rng = OsRng;
    let curve = curve_by_name("secp256k1").unwrap();
    let generator_g = curve.generator();
    let generator_h = generator_g.multiply(&random_scalar(&mut rng, curve.n()));

    let n = 50_usize;
    let random_scalars: Vec<BigUint> = (0..n)
        .map(|_| random_scalar(&mut rng, curve.n()))
        .collect();
    let encoded: Vec<Vec<u8>> = random_scalars
        .iter()
        .map(|k| generator_g.multiply(k).to_encoded(true))
        .collect();

    group.bench_function("single_mul", |b| {
        let i = rng.gen_range(0..n);
        b.iter(|| generator_g.multiply(&random_scalars[i]))
    });

    group.bench_function("ladder_mul", |b| {
        let i = rng.gen_range(0..n);
        b.iter(|| generator_g.multiply_ladder(&random_scalars[i], 256))
    });

    group.bench_function("double_mul", |b| {
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        b.iter(|| generator_g.multiply_two(&random_scalars[i], &generator_h, &random_scalars[j]))
    });

    group.bench_function("decode_compressed", |b| {
        let i = rng.gen_range(0..n);
        b.iter(|| Point::decode(curve, &encoded[i]))
    });

    group.finish();
}

criterion_group!(benches, bench_point_mul);
criterion_main!(benches);
