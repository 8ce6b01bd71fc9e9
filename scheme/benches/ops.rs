use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use num_complex::Complex64;
use sampling::source::Source;
use scheme::{Ciphertext, Parameters, ParametersLiteral, Scheme, SecretKey, Width};

fn setup(log_n: usize) -> (Scheme, Ciphertext, Ciphertext) {
    let params: Parameters = Parameters::new(&ParametersLiteral {
        log_n,
        log_q: 300,
        log_p: 40,
        max_level: 4,
        ..Default::default()
    })
    .unwrap();
    let mut source_xs: Source = Source::new([0u8; 32]);
    let mut source_xa: Source = Source::new([1u8; 32]);
    let mut source_xe: Source = Source::new([2u8; 32]);
    let sk: SecretKey = SecretKey::generate(&params, &mut source_xs);
    let scheme: Scheme = Scheme::new(params, &sk, &mut source_xa, &mut source_xe);
    let values: Vec<Complex64> = (0..1 << log_n)
        .map(|i| Complex64::new(source_xs.next_f64(-1.0, 1.0), i as f64 / (1 << log_n) as f64))
        .collect();
    let a: Ciphertext = scheme
        .encrypt_all(&values, 40, &mut source_xa, &mut source_xe)
        .unwrap();
    let b: Ciphertext = scheme
        .encrypt_all(&values, 40, &mut source_xa, &mut source_xe)
        .unwrap();
    (scheme, a, b)
}

pub fn bench_mult_and_mod_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("mult_and_mod_switch");

    fn runner(log_n: usize) -> impl FnMut() {
        let (scheme, a, b) = setup(log_n);
        move || {
            black_box(scheme.mult_and_mod_switch(&a, &b, Width::Level).unwrap());
        }
    }

    for log_n in [4, 5, 6] {
        let id: BenchmarkId = BenchmarkId::from_parameter(format!("n: {}", 1 << log_n));
        let mut runner = runner(log_n);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

pub fn bench_encrypt_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt_decrypt_const");

    fn runner(log_n: usize) -> impl FnMut() {
        let params: Parameters = Parameters::new(&ParametersLiteral {
            log_n,
            ..Default::default()
        })
        .unwrap();
        let mut source_xs: Source = Source::new([0u8; 32]);
        let mut source_xa: Source = Source::new([1u8; 32]);
        let mut source_xe: Source = Source::new([2u8; 32]);
        let sk: SecretKey = SecretKey::generate(&params, &mut source_xs);
        let scheme: Scheme = Scheme::new(params, &sk, &mut source_xa, &mut source_xe);
        move || {
            let ct: Ciphertext = scheme
                .encrypt_const(Complex64::new(0.5, 0.5), 30, &mut source_xa, &mut source_xe)
                .unwrap();
            black_box(scheme.decrypt_const(&sk, &ct).unwrap());
        }
    }

    for log_n in [4, 5, 6] {
        let id: BenchmarkId = BenchmarkId::from_parameter(format!("n: {}", 1 << log_n));
        let mut runner = runner(log_n);
        group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
    }

    group.finish();
}

criterion_group!(benches, bench_mult_and_mod_switch, bench_encrypt_decrypt);
criterion_main!(benches);
