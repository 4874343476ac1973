//! AVX2 implementations of the bulk memory primitives.
//!
//! Each kernel processes one 256-bit (32-byte) chunk per iteration and hands
//! the tail shorter than a chunk to [`super::scalar`], so results are
//! byte-identical with the scalar path for every length.
//!
//! This module is compiled only when `build.rs` found AVX2 on the build host
//! and emitted the `avx2` cfg flag; [`super`] additionally consults
//! [`crate::caps`] before calling in, so the pairing rule from the crate
//! docs holds.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::scalar;

/// Bytes one AVX2 chunk processes.
pub const CHUNK: usize = 32;

/// Copies `src` into `dst` in 32-byte chunks.
///
/// # Safety
///
/// The caller must ensure the host supports AVX2 and that both slices have
/// the same length.
#[target_feature(enable = "avx2")]
pub unsafe fn copy(dst: &mut [u8], src: &[u8]) {
    let chunks = dst.len() / CHUNK;
    let s = src.as_ptr();
    let d = dst.as_mut_ptr();

    for i in 0..chunks {
        let v = _mm256_loadu_si256(s.add(i * CHUNK) as *const __m256i);
        _mm256_storeu_si256(d.add(i * CHUNK) as *mut __m256i, v);
    }

    let done = chunks * CHUNK;
    scalar::copy(&mut dst[done..], &src[done..]);
}

/// Fills `dst` with `value` in 32-byte chunks.
///
/// # Safety
///
/// The caller must ensure the host supports AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn fill(dst: &mut [u8], value: u8) {
    let chunks = dst.len() / CHUNK;
    let d = dst.as_mut_ptr();
    let splat = _mm256_set1_epi8(value as i8);

    for i in 0..chunks {
        _mm256_storeu_si256(d.add(i * CHUNK) as *mut __m256i, splat);
    }

    let done = chunks * CHUNK;
    scalar::fill(&mut dst[done..], value);
}

/// XORs `src` into `dst` in 32-byte chunks.
///
/// # Safety
///
/// The caller must ensure the host supports AVX2 and that both slices have
/// the same length.
#[target_feature(enable = "avx2")]
pub unsafe fn xor(dst: &mut [u8], src: &[u8]) {
    let chunks = dst.len() / CHUNK;
    let s = src.as_ptr();
    let d = dst.as_mut_ptr();

    for i in 0..chunks {
        let a = _mm256_loadu_si256(d.add(i * CHUNK) as *const __m256i);
        let b = _mm256_loadu_si256(s.add(i * CHUNK) as *const __m256i);
        _mm256_storeu_si256(d.add(i * CHUNK) as *mut __m256i, _mm256_xor_si256(a, b));
    }

    let done = chunks * CHUNK;
    scalar::xor(&mut dst[done..], &src[done..]);
}

/// Compares `a` and `b` in 32-byte chunks, rescanning a mismatching chunk
/// bytewise so the first-difference contract matches the scalar path.
///
/// # Safety
///
/// The caller must ensure the host supports AVX2 and that both slices have
/// the same length.
#[target_feature(enable = "avx2")]
pub unsafe fn compare(a: &[u8], b: &[u8]) -> i32 {
    let chunks = a.len() / CHUNK;
    let ap = a.as_ptr();
    let bp = b.as_ptr();

    for i in 0..chunks {
        let va = _mm256_loadu_si256(ap.add(i * CHUNK) as *const __m256i);
        let vb = _mm256_loadu_si256(bp.add(i * CHUNK) as *const __m256i);
        let eq = _mm256_cmpeq_epi8(va, vb);

        if _mm256_movemask_epi8(eq) != -1 {
            let off = i * CHUNK;
            return scalar::compare(&a[off..off + CHUNK], &b[off..off + CHUNK]);
        }
    }

    let done = chunks * CHUNK;
    scalar::compare(&a[done..], &b[done..])
}
