//! Parity tests between the dispatched and scalar bulk memory paths.
//!
//! Whatever path `archprim::mem` dispatches to on this machine, the result
//! must be byte-identical with the scalar reference for every length,
//! including the awkward tails around word and chunk boundaries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use archprim::mem;

/// Lengths straddling every boundary that matters: empty, sub-word, exactly
/// one word, one byte past, a cache line, a line plus one, and large.
const LENGTHS: &[usize] = &[0, 1, 7, 8, 9, 64, 65, 1000, 4096];

fn random_buffer(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.random::<u8>()).collect()
}

#[test]
fn copy_parity_across_lengths() {
    let mut rng = StdRng::seed_from_u64(42);

    for &len in LENGTHS {
        let src = random_buffer(&mut rng, len);

        let mut dispatched = vec![0u8; len];
        mem::bulk_copy(&mut dispatched, &src);

        let mut reference = vec![0u8; len];
        mem::scalar::copy(&mut reference, &src);

        assert_eq!(dispatched, reference, "len {len}");
        assert_eq!(dispatched, src, "len {len}");
    }
}

#[test]
fn fill_parity_across_lengths() {
    let mut rng = StdRng::seed_from_u64(43);

    for &len in LENGTHS {
        let value: u8 = rng.random();

        let mut dispatched = vec![0u8; len];
        mem::bulk_fill(&mut dispatched, value);

        let mut reference = vec![0u8; len];
        mem::scalar::fill(&mut reference, value);

        assert_eq!(dispatched, reference, "len {len} value {value}");
        assert!(dispatched.iter().all(|&b| b == value), "len {len}");
    }
}

#[test]
fn xor_parity_across_lengths() {
    let mut rng = StdRng::seed_from_u64(44);

    for &len in LENGTHS {
        let src = random_buffer(&mut rng, len);
        let base = random_buffer(&mut rng, len);

        let mut dispatched = base.clone();
        mem::bulk_xor(&mut dispatched, &src);

        let mut reference = base.clone();
        mem::scalar::xor(&mut reference, &src);

        assert_eq!(dispatched, reference, "len {len}");

        // And the plain byte-loop definition.
        let expected: Vec<u8> = base.iter().zip(src.iter()).map(|(a, b)| a ^ b).collect();
        assert_eq!(dispatched, expected, "len {len}");
    }
}

#[test]
fn fill_words_parity() {
    let mut rng = StdRng::seed_from_u64(45);

    for &len in &[0usize, 1, 7, 8, 9, 64, 65, 513] {
        let value: u64 = rng.random();

        let mut unrolled = vec![0u64; len];
        mem::fill_words(&mut unrolled, value);

        let reference = vec![value; len];
        assert_eq!(unrolled, reference, "len {len}");
    }
}

#[test]
fn compare_reflexivity_across_lengths() {
    let mut rng = StdRng::seed_from_u64(46);

    for &len in LENGTHS {
        let buf = random_buffer(&mut rng, len);
        assert_eq!(mem::bulk_compare(&buf, &buf), 0, "len {len}");
        assert_eq!(mem::scalar::compare(&buf, &buf), 0, "len {len}");
    }
}

#[test]
fn compare_sign_contract_at_random_positions() {
    let mut rng = StdRng::seed_from_u64(47);

    for &len in &[1usize, 8, 9, 64, 65, 1000, 4096] {
        for _ in 0..32 {
            let a = random_buffer(&mut rng, len);
            let mut b = a.clone();

            let index = rng.random_range(0..len);
            // Force a difference at `index`, leaving earlier bytes equal.
            b[index] = b[index].wrapping_add(rng.random_range(1..=255u8));

            let expected = (a[index] as i32 - b[index] as i32).signum();
            assert_eq!(
                mem::bulk_compare(&a, &b).signum(),
                expected,
                "len {len} index {index}"
            );
            assert_eq!(
                mem::scalar::compare(&a, &b).signum(),
                expected,
                "len {len} index {index}"
            );
        }
    }
}

#[test]
fn compare_reports_first_difference_not_later_ones() {
    // Earlier differences must win over any number of later ones.
    let a = vec![9u8; 128];
    let mut b = a.clone();
    b[3] = 200; // a[3] < b[3]  =>  negative
    for byte in b.iter_mut().skip(64) {
        *byte = 0; // later differences with the opposite sign
    }

    assert!(mem::bulk_compare(&a, &b) < 0);
    assert!(mem::bulk_compare(&b, &a) > 0);
    assert!(mem::scalar::compare(&a, &b) < 0);
}

#[test]
fn vector_width_is_consistent_with_dispatch() {
    // Whatever caps reports, the dispatched operations above already agreed
    // with scalar; here we just pin the advertised widths.
    let width = archprim::caps::vector_width();
    assert!(matches!(width, 8 | 16 | 32), "width {width}");
    if !archprim::caps::has_vector() {
        assert_eq!(width, archprim::caps::SCALAR_WIDTH);
    }
}
