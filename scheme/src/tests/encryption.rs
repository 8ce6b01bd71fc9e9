use num_complex::Complex64;
use sampling::source::Source;

use super::{TestContext, assert_close, random_values};
use crate::{ciphertext::Ciphertext, error::Error, level::Width};

#[test]
fn test_encrypt_const_then_add_const() {
    let mut ctx: TestContext = TestContext::new(3, 300, 30, 3);
    let tolerance: f64 = (-20f64).exp2();

    let ct: Ciphertext = ctx.scheme.encrypt_const(
        Complex64::new(3.5, 2.1),
        30,
        &mut ctx.source_xa,
        &mut ctx.source_xe,
    )
    .unwrap();
    assert_eq!(ct.level(), 1);
    assert_eq!(ct.log_scale(), 30);
    let have: Complex64 = ctx.scheme.decrypt_const(&ctx.sk, &ct).unwrap();
    assert_close(&[have], &[Complex64::new(3.5, 2.1)], tolerance);

    let ct: Ciphertext = ctx
        .scheme
        .add_const(&ct, Complex64::new(1.0, 0.0), Width::Level)
        .unwrap();
    assert_eq!(ct.level(), 1);
    let have: Complex64 = ctx.scheme.decrypt_const(&ctx.sk, &ct).unwrap();
    assert_close(&[have], &[Complex64::new(4.5, 2.1)], tolerance);
}

#[test]
fn test_encrypt_decrypt_slots() {
    let mut ctx: TestContext = TestContext::standard();
    let mut source: Source = Source::new([3u8; 32]);
    [1usize, 2, 8, 16, 32].iter().for_each(|slots| {
        let values: Vec<Complex64> = random_values(*slots, &mut source);
        let ct: Ciphertext = ctx
            .scheme
            .encrypt(&values, 40, &mut ctx.source_xa, &mut ctx.source_xe)
            .unwrap();
        let have: Vec<Complex64> = ctx.scheme.decrypt(&ctx.sk, &ct, *slots).unwrap();
        assert_close(&have, &values, 1e-6);
    });
}

#[test]
fn test_encrypt_decrypt_all() {
    let mut ctx: TestContext = TestContext::standard();
    let mut source: Source = Source::new([4u8; 32]);
    let values: Vec<Complex64> = random_values(32, &mut source);
    let ct: Ciphertext = ctx
        .scheme
        .encrypt_all(&values, 40, &mut ctx.source_xa, &mut ctx.source_xe)
        .unwrap();
    assert_close(&ctx.scheme.decrypt_all(&ctx.sk, &ct).unwrap(), &values, 1e-6);
}

#[test]
fn test_encryption_is_randomized() {
    let mut ctx: TestContext = TestContext::standard();
    let value: Complex64 = Complex64::new(0.25, -0.5);
    let a: Ciphertext = ctx
        .scheme
        .encrypt_const(value, 40, &mut ctx.source_xa, &mut ctx.source_xe)
        .unwrap();
    let b: Ciphertext = ctx
        .scheme
        .encrypt_const(value, 40, &mut ctx.source_xa, &mut ctx.source_xe)
        .unwrap();
    assert_ne!(a.c1(), b.c1());
    assert_close(
        &[
            ctx.scheme.decrypt_const(&ctx.sk, &a).unwrap(),
            ctx.scheme.decrypt_const(&ctx.sk, &b).unwrap(),
        ],
        &[value, value],
        1e-7,
    );
}

#[test]
fn test_plaintext_overflow() {
    let mut ctx: TestContext = TestContext::standard();
    let one: Complex64 = Complex64::new(1.0, 0.0);
    [(298usize, 299usize), (310, 311)].iter().for_each(|(log_scale, log_bound)| {
        assert_eq!(
            ctx.scheme
                .encrypt_const(one, *log_scale, &mut ctx.source_xa, &mut ctx.source_xe)
                .unwrap_err(),
            Error::PlaintextOverflow {
                log_bound: *log_bound,
                log_q: 300
            }
        );
    });

    // Largest scale leaving room for the noise.
    let ct: Ciphertext = ctx
        .scheme
        .encrypt_const(one, 297, &mut ctx.source_xa, &mut ctx.source_xe)
        .unwrap();
    assert_close(&[ctx.scheme.decrypt_const(&ctx.sk, &ct).unwrap()], &[one], 1e-7);
}

#[test]
fn test_invalid_slot_count() {
    let mut ctx: TestContext = TestContext::standard();
    let values: Vec<Complex64> = vec![Complex64::new(1.0, 0.0); 3];
    assert_eq!(
        ctx.scheme
            .encrypt(&values, 40, &mut ctx.source_xa, &mut ctx.source_xe)
            .unwrap_err(),
        Error::InvalidSlotCount { slots: 3, n: 32 }
    );
    assert_eq!(
        ctx.scheme
            .encrypt_all(&values[..2], 40, &mut ctx.source_xa, &mut ctx.source_xe)
            .unwrap_err(),
        Error::InvalidSlotCount { slots: 2, n: 32 }
    );

    let ct: Ciphertext = ctx.scheme.encrypt_const(
        Complex64::new(1.0, 0.0),
        40,
        &mut ctx.source_xa,
        &mut ctx.source_xe,
    )
    .unwrap();
    [0usize, 5, 64].iter().for_each(|slots| {
        assert_eq!(
            ctx.scheme.decrypt(&ctx.sk, &ct, *slots).unwrap_err(),
            Error::InvalidSlotCount { slots: *slots, n: 32 }
        );
    });
}

#[test]
fn test_decrypt_batch_preserves_order() {
    let mut ctx: TestContext = TestContext::standard();
    let values: Vec<Complex64> = (0..6).map(|i| Complex64::new(i as f64, -(i as f64) / 2.0)).collect();
    let cts: Vec<Ciphertext> = values
        .iter()
        .map(|v| {
            ctx.scheme
                .encrypt_const(*v, 40, &mut ctx.source_xa, &mut ctx.source_xe)
                .unwrap()
        })
        .collect();
    let have: Vec<Complex64> = ctx.scheme.decrypt_batch(&ctx.sk, &cts).unwrap();
    assert_close(&have, &values, 1e-7);
    assert!(ctx.scheme.decrypt_batch(&ctx.sk, &[]).unwrap().is_empty());
}

#[test]
fn test_display() {
    let mut ctx: TestContext = TestContext::new(3, 300, 30, 3);
    let ct: Ciphertext = ctx.scheme.encrypt_const(
        Complex64::new(1.0, 0.0),
        30,
        &mut ctx.source_xa,
        &mut ctx.source_xe,
    )
    .unwrap();
    assert_eq!(format!("{}", ct), "Cipher: c0 = 8, c1 = 8, level = 1");
    let ct: Ciphertext = ctx.scheme.mod_embed(&ct).unwrap();
    assert_eq!(format!("{}", ct), "Cipher: c0 = 8, c1 = 8, level = 2");
}
