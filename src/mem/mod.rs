//! Bulk memory primitives: copy, fill, xor and compare over byte ranges.
//!
//! Every operation exists in two forms with identical observable behavior:
//!
//! - an accelerated form (`avx2` on x86_64, `neon` on aarch64) that
//!   processes one maximum-width vector chunk per iteration and hands any
//!   tail shorter than a chunk to the scalar form;
//! - a scalar form ([`scalar`]) that processes 8-byte words, with 8-way loop
//!   unrolling for fill and read-prefetch four cache lines ahead for copy.
//!
//! The public functions here dispatch between the two: the accelerated
//! module is compiled only when `build.rs` detected the matching feature on
//! the build host, and is entered only when [`crate::caps`] confirms the
//! running host agrees. That check is one branch per call, taken before the
//! inner loop, so hot loops are branch-free either way.
//!
//! # Preconditions
//!
//! Two-buffer operations require equal lengths and panic otherwise, the only
//! check these functions perform. The inner kernels assume the slices are
//! valid for their full length; safe callers get that from the borrow
//! checker for free.

pub mod scalar;

#[cfg(avx2)]
pub mod avx2;

#[cfg(neon)]
pub mod neon;

/// Cache line size assumed by the prefetch logic, in bytes.
pub const CACHE_LINE: usize = 64;

/// Issues a read-prefetch hint for the cache line containing `addr`.
///
/// Purely advisory: no observable effect beyond timing, never faults, and
/// compiles to nothing on architectures without a stable prefetch
/// instruction.
#[inline(always)]
pub fn prefetch_read(addr: *const u8) {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        use core::arch::x86_64::{_mm_prefetch, _MM_HINT_T0};
        _mm_prefetch(addr as *const i8, _MM_HINT_T0);
    }

    #[cfg(not(target_arch = "x86_64"))]
    let _ = addr;
}

/// Copies `src` into `dst`.
///
/// The buffers must not overlap (guaranteed by the borrow rules) and must be
/// the same length.
///
/// # Panics
///
/// Panics if `dst.len() != src.len()`.
#[inline]
pub fn bulk_copy(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len(), "Buffers must be the same length");

    #[cfg(avx2)]
    {
        if crate::caps::has_vector() {
            unsafe { avx2::copy(dst, src) };
            return;
        }
    }

    #[cfg(neon)]
    {
        if crate::caps::has_vector() {
            unsafe { neon::copy(dst, src) };
            return;
        }
    }

    scalar::copy(dst, src);
}

/// Fills `dst` with the byte `value`.
#[inline]
pub fn bulk_fill(dst: &mut [u8], value: u8) {
    #[cfg(avx2)]
    {
        if crate::caps::has_vector() {
            unsafe { avx2::fill(dst, value) };
            return;
        }
    }

    #[cfg(neon)]
    {
        if crate::caps::has_vector() {
            unsafe { neon::fill(dst, value) };
            return;
        }
    }

    scalar::fill(dst, value);
}

/// Fills a slice of 64-bit words with `value`, the word-granular form the
/// dataset builder uses for item initialization.
#[inline]
pub fn fill_words(dst: &mut [u64], value: u64) {
    scalar::fill_words(dst, value);
}

/// XORs `src` into `dst` in place: `dst[i] ^= src[i]`.
///
/// # Panics
///
/// Panics if `dst.len() != src.len()`.
#[inline]
pub fn bulk_xor(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len(), "Buffers must be the same length");

    #[cfg(avx2)]
    {
        if crate::caps::has_vector() {
            unsafe { avx2::xor(dst, src) };
            return;
        }
    }

    #[cfg(neon)]
    {
        if crate::caps::has_vector() {
            unsafe { neon::xor(dst, src) };
            return;
        }
    }

    scalar::xor(dst, src);
}

/// Compares `a` and `b` byte-by-byte in address order.
///
/// Returns 0 when the ranges are equal; otherwise a value whose *sign*
/// equals the sign of `a[i] as i32 - b[i] as i32` at the first differing
/// index `i`. Only the sign is part of the contract.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
#[inline]
pub fn bulk_compare(a: &[u8], b: &[u8]) -> i32 {
    assert_eq!(a.len(), b.len(), "Buffers must be the same length");

    #[cfg(avx2)]
    {
        if crate::caps::has_vector() {
            return unsafe { avx2::compare(a, b) };
        }
    }

    #[cfg(neon)]
    {
        if crate::caps::has_vector() {
            return unsafe { neon::compare(a, b) };
        }
    }

    scalar::compare(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_round_trips_small_buffers() {
        let src: Vec<u8> = (0u8..=255).collect();
        let mut dst = vec![0u8; src.len()];
        bulk_copy(&mut dst, &src);
        assert_eq!(dst, src);
    }

    #[test]
    fn fill_is_uniform() {
        let mut buf = vec![0u8; 1000];
        bulk_fill(&mut buf, 0xA5);
        assert!(buf.iter().all(|&b| b == 0xA5));
    }

    #[test]
    fn xor_with_self_zeroes() {
        let src: Vec<u8> = (0u8..100).collect();
        let mut dst = src.clone();
        bulk_xor(&mut dst, &src);
        assert!(dst.iter().all(|&b| b == 0));
    }

    #[test]
    fn compare_is_reflexive() {
        let buf: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
        assert_eq!(bulk_compare(&buf, &buf), 0);
    }

    #[test]
    fn empty_ranges_are_fine() {
        let mut empty: [u8; 0] = [];
        bulk_copy(&mut empty, &[]);
        bulk_fill(&mut empty, 0xFF);
        bulk_xor(&mut empty, &[]);
        assert_eq!(bulk_compare(&[], &[]), 0);
        let mut words: [u64; 0] = [];
        fill_words(&mut words, 7);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn copy_rejects_mismatched_lengths() {
        let mut dst = [0u8; 4];
        bulk_copy(&mut dst, &[1, 2, 3]);
    }
}
