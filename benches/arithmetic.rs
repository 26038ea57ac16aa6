#[macro_use]
extern crate criterion;
extern crate cryptography_utils;

mod bench {
    use criterion::Criterion;
    use cryptography_utils::arithmetic::traits::{Modulo, Samplable};
    use cryptography_utils::BigInt;

    pub fn bench_mod_pow_2048(c: &mut Criterion) {
        let modulus = BigInt::sample(2048).unwrap();
        let base = BigInt::sample_below(&modulus).unwrap();
        let exponent = BigInt::sample_below(&modulus).unwrap();
        c.bench_function("mod_pow 2048", move |b| {
            b.iter(|| BigInt::mod_pow(&base, &exponent, &modulus).unwrap())
        });
    }

    pub fn bench_mod_inv_512(c: &mut Criterion) {
        let modulus = BigInt::sample_prime(512).unwrap();
        let value = BigInt::sample_below(&modulus).unwrap();
        c.bench_function("mod_inv 512-bit prime", move |b| {
            b.iter(|| value.mod_inv(&modulus).unwrap())
        });
    }

    pub fn bench_sample_prime_512(c: &mut Criterion) {
        c.bench_function("sample_prime 512", move |b| {
            b.iter(|| BigInt::sample_prime(512).unwrap())
        });
    }

    criterion_group! {
    name = arithmetic;
    config = Criterion::default().sample_size(10);
    targets = self::bench_mod_pow_2048, self::bench_mod_inv_512, self::bench_sample_prime_512}
}

criterion_main!(bench::arithmetic);
