//! Equivalence tests between the dispatched and scalar bit primitives.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use archprim::bits;

#[test]
fn popcount_matches_reference_over_many_values() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);

    for value in [0u64, u64::MAX, 1, 0x8000_0000_0000_0000] {
        assert_eq!(bits::popcount64(value), bits::scalar::popcount64(value));
    }

    for _ in 0..10_000 {
        let value: u64 = rng.random();
        assert_eq!(
            bits::popcount64(value),
            bits::scalar::popcount64(value),
            "value {value:#x}"
        );
    }
}

#[test]
fn trailing_zeros_zero_is_pinned_to_width() {
    // The hardware-undefined input, fixed by contract to the operand width.
    assert_eq!(bits::trailing_zeros64(0), 64);
    assert_eq!(bits::scalar::trailing_zeros64(0), 64);
}

proptest! {
    #[test]
    fn rotate32_paths_agree(x in any::<u32>(), r in any::<u32>()) {
        prop_assert_eq!(bits::rotate_right32(x, r), bits::scalar::rotate_right32(x, r));
    }

    #[test]
    fn rotate64_paths_agree(x in any::<u64>(), r in any::<u32>()) {
        prop_assert_eq!(bits::rotate_right64(x, r), bits::scalar::rotate_right64(x, r));
    }

    #[test]
    fn rotate32_inverse_property(x in any::<u32>(), r in 1u32..32) {
        prop_assert_eq!(bits::rotate_right32(bits::rotate_right32(x, r), 32 - r), x);
    }

    #[test]
    fn rotate_by_zero_is_identity(x in any::<u64>()) {
        prop_assert_eq!(bits::rotate_right64(x, 0), x);
        prop_assert_eq!(bits::rotate_right32(x as u32, 0), x as u32);
    }

    #[test]
    fn popcount_paths_agree(x in any::<u64>()) {
        prop_assert_eq!(bits::popcount64(x), bits::scalar::popcount64(x));
    }

    #[test]
    fn popcount_complement_sums_to_width(x in any::<u64>()) {
        prop_assert_eq!(bits::popcount64(x) + bits::popcount64(!x), 64);
    }

    #[test]
    fn trailing_zeros_paths_agree(x in 1u64..) {
        prop_assert_eq!(bits::trailing_zeros64(x), bits::scalar::trailing_zeros64(x));
    }

    #[test]
    fn trailing_zeros_names_a_set_bit(x in 1u64..) {
        let n = bits::trailing_zeros64(x);
        prop_assert!(n < 64);
        prop_assert_eq!(x >> n & 1, 1);
        // Everything below is zero.
        if n > 0 {
            prop_assert_eq!(x & ((1u64 << n) - 1), 0);
        }
    }

    #[test]
    fn add_zero_extend_paths_agree(a in any::<u64>(), b in any::<u64>()) {
        let sum = bits::add_zero_extend32(a, b);
        prop_assert_eq!(sum, bits::scalar::add_zero_extend32(a, b));
        // Result is always a zero-extended 32-bit value.
        prop_assert!(sum <= u32::MAX as u64);
    }

    #[test]
    fn add_zero_extend_ignores_high_halves(a in any::<u64>(), b in any::<u64>(), hi in any::<u32>()) {
        let with_hi = (a & 0xFFFF_FFFF) | ((hi as u64) << 32);
        prop_assert_eq!(
            bits::add_zero_extend32(with_hi, b),
            bits::add_zero_extend32(a & 0xFFFF_FFFF, b)
        );
    }
}
