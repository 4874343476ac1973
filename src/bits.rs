//! Bit and arithmetic primitives: rotate, popcount, count-trailing-zeros and
//! the 32-bit zero-extending add.
//!
//! The top-level functions are the dispatched forms: on hardware with the
//! bit-manipulation extensions they compile to single instructions (the std
//! integer methods lower to `ror`/`popcnt`/`tzcnt` and friends when the
//! target features are enabled), and to short branch-free sequences
//! otherwise. The [`scalar`] submodule carries explicit shift-and-mask
//! reference implementations; both forms are bit-for-bit equivalent on every
//! input, which the tests pin down.
//!
//! # Edge cases
//!
//! - Rotation amounts are masked into `[0, width)` defensively; `r = 0` is
//!   the identity, and `r >= width` behaves as `r % width` rather than
//!   wrapping silently into undefined territory.
//! - `trailing_zeros64(0)` has no hardware-defined answer on every ISA; both
//!   forms here pin it to 64 (the operand width) so the paths agree.

/// Rotates `x` right by `r` bits (32-bit). `r` is masked to `[0, 32)`.
#[inline(always)]
pub fn rotate_right32(x: u32, r: u32) -> u32 {
    x.rotate_right(r & 31)
}

/// Rotates `x` right by `r` bits (64-bit). `r` is masked to `[0, 64)`.
#[inline(always)]
pub fn rotate_right64(x: u64, r: u32) -> u64 {
    x.rotate_right(r & 63)
}

/// Number of set bits in `x`.
#[inline(always)]
pub fn popcount64(x: u64) -> u32 {
    x.count_ones()
}

/// Number of trailing zero bits in `x`; 64 when `x == 0`.
#[inline(always)]
pub fn trailing_zeros64(x: u64) -> u32 {
    x.trailing_zeros()
}

/// Zero-extending 32-bit add: both operands are truncated to 32 bits, added
/// with wrap-around, and the 32-bit sum is zero-extended to 64 bits.
///
/// Truncation happens *before* the add, so the carry out of bit 31 is
/// discarded identically on every path.
#[inline(always)]
pub fn add_zero_extend32(a: u64, b: u64) -> u64 {
    (a as u32).wrapping_add(b as u32) as u64
}

/// Reference implementations built from shifts, masks and adds only.
///
/// These exist so the dispatched forms above have something to be checked
/// against that does not itself rely on the instructions under test.
pub mod scalar {
    /// Two-shift 32-bit rotate; `r` masked to `[0, 32)`, `r = 0` identity.
    #[inline]
    pub fn rotate_right32(x: u32, r: u32) -> u32 {
        let r = r & 31;
        if r == 0 {
            x
        } else {
            (x >> r) | (x << (32 - r))
        }
    }

    /// Two-shift 64-bit rotate; `r` masked to `[0, 64)`, `r = 0` identity.
    #[inline]
    pub fn rotate_right64(x: u64, r: u32) -> u64 {
        let r = r & 63;
        if r == 0 {
            x
        } else {
            (x >> r) | (x << (64 - r))
        }
    }

    /// SWAR population count: pairwise sums widening to byte lanes, then a
    /// multiply to horizontally add the eight lane counts.
    #[inline]
    pub fn popcount64(mut x: u64) -> u32 {
        x -= (x >> 1) & 0x5555_5555_5555_5555;
        x = (x & 0x3333_3333_3333_3333) + ((x >> 2) & 0x3333_3333_3333_3333);
        x = (x + (x >> 4)) & 0x0F0F_0F0F_0F0F_0F0F;
        (x.wrapping_mul(0x0101_0101_0101_0101) >> 56) as u32
    }

    /// Shift-loop count of trailing zeros; 64 when `x == 0`.
    #[inline]
    pub fn trailing_zeros64(mut x: u64) -> u32 {
        if x == 0 {
            return 64;
        }
        let mut n = 0;
        while x & 1 == 0 {
            x >>= 1;
            n += 1;
        }
        n
    }

    /// Truncate-then-add zero-extending 32-bit add, spelled out with masks.
    #[inline]
    pub fn add_zero_extend32(a: u64, b: u64) -> u64 {
        ((a & 0xFFFF_FFFF) + (b & 0xFFFF_FFFF)) & 0xFFFF_FFFF
    }
}
