//! NEON implementations of the bulk memory primitives.
//!
//! Each kernel processes one 128-bit (16-byte) chunk per iteration and hands
//! the tail shorter than a chunk to [`super::scalar`], so results are
//! byte-identical with the scalar path for every length.
//!
//! Compiled only when `build.rs` emitted the `neon` cfg flag; entered only
//! after [`crate::caps`] confirms the running host.

#[cfg(target_arch = "aarch64")]
use core::arch::aarch64::*;

use super::scalar;

/// Bytes one NEON chunk processes.
pub const CHUNK: usize = 16;

/// Copies `src` into `dst` in 16-byte chunks.
///
/// # Safety
///
/// The caller must ensure the host supports NEON and that both slices have
/// the same length.
#[target_feature(enable = "neon")]
pub unsafe fn copy(dst: &mut [u8], src: &[u8]) {
    let chunks = dst.len() / CHUNK;
    let s = src.as_ptr();
    let d = dst.as_mut_ptr();

    for i in 0..chunks {
        let v = vld1q_u8(s.add(i * CHUNK));
        vst1q_u8(d.add(i * CHUNK), v);
    }

    let done = chunks * CHUNK;
    scalar::copy(&mut dst[done..], &src[done..]);
}

/// Fills `dst` with `value` in 16-byte chunks.
///
/// # Safety
///
/// The caller must ensure the host supports NEON.
#[target_feature(enable = "neon")]
pub unsafe fn fill(dst: &mut [u8], value: u8) {
    let chunks = dst.len() / CHUNK;
    let d = dst.as_mut_ptr();
    let splat = vdupq_n_u8(value);

    for i in 0..chunks {
        vst1q_u8(d.add(i * CHUNK), splat);
    }

    let done = chunks * CHUNK;
    scalar::fill(&mut dst[done..], value);
}

/// XORs `src` into `dst` in 16-byte chunks.
///
/// # Safety
///
/// The caller must ensure the host supports NEON and that both slices have
/// the same length.
#[target_feature(enable = "neon")]
pub unsafe fn xor(dst: &mut [u8], src: &[u8]) {
    let chunks = dst.len() / CHUNK;
    let s = src.as_ptr();
    let d = dst.as_mut_ptr();

    for i in 0..chunks {
        let a = vld1q_u8(d.add(i * CHUNK));
        let b = vld1q_u8(s.add(i * CHUNK));
        vst1q_u8(d.add(i * CHUNK), veorq_u8(a, b));
    }

    let done = chunks * CHUNK;
    scalar::xor(&mut dst[done..], &src[done..]);
}

/// Compares `a` and `b` in 16-byte chunks, rescanning a mismatching chunk
/// bytewise so the first-difference contract matches the scalar path.
///
/// # Safety
///
/// The caller must ensure the host supports NEON and that both slices have
/// the same length.
#[target_feature(enable = "neon")]
pub unsafe fn compare(a: &[u8], b: &[u8]) -> i32 {
    let chunks = a.len() / CHUNK;
    let ap = a.as_ptr();
    let bp = b.as_ptr();

    for i in 0..chunks {
        let va = vld1q_u8(ap.add(i * CHUNK));
        let vb = vld1q_u8(bp.add(i * CHUNK));
        let eq = vceqq_u8(va, vb);

        // All-equal lanes are 0xFF; any smaller minimum means a mismatch.
        if vminvq_u8(eq) != 0xFF {
            let off = i * CHUNK;
            return scalar::compare(&a[off..off + CHUNK], &b[off..off + CHUNK]);
        }
    }

    let done = chunks * CHUNK;
    scalar::compare(&a[done..], &b[done..])
}
