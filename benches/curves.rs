#[macro_use]
extern crate criterion;
extern crate cryptography_utils;

mod bench {
    use criterion::Criterion;
    use cryptography_utils::arithmetic::traits::Samplable;
    use cryptography_utils::elliptic::curves::get_curve_params;
    use cryptography_utils::{BigInt, CurveId, Point};

    fn bench_scalar_mul(c: &mut Criterion, curve: CurveId, label: &str) {
        let n = &get_curve_params(curve).n;
        let g = Point::generator(curve);
        let k = BigInt::sample_below(n).unwrap();
        c.bench_function(label, move |b| b.iter(|| g.scalar_mul(&k).unwrap()));
    }

    pub fn bench_scalar_mul_secp256k1(c: &mut Criterion) {
        bench_scalar_mul(c, CurveId::Secp256k1, "scalar_mul secp256k1");
    }

    pub fn bench_scalar_mul_p256(c: &mut Criterion) {
        bench_scalar_mul(c, CurveId::P256, "scalar_mul p256");
    }

    pub fn bench_scalar_mul_ed25519_base(c: &mut Criterion) {
        bench_scalar_mul(c, CurveId::Ed25519, "scalar_mul ed25519 base point");
    }

    pub fn bench_compressed_decode(c: &mut Criterion) {
        let n = &get_curve_params(CurveId::Secp256k1).n;
        let k = BigInt::sample_below(n).unwrap();
        let point = Point::generator(CurveId::Secp256k1).scalar_mul(&k).unwrap();
        let encoded = point.encode_compressed().unwrap();
        c.bench_function("decode_compressed secp256k1", move |b| {
            b.iter(|| Point::decode_compressed(&encoded, CurveId::Secp256k1).unwrap())
        });
    }

    criterion_group! {
    name = curves;
    config = Criterion::default().sample_size(10);
    targets = self::bench_scalar_mul_secp256k1, self::bench_scalar_mul_p256, self::bench_scalar_mul_ed25519_base, self::bench_compressed_decode}
}

criterion_main!(bench::curves);
