//! Scalar implementations of the bulk memory primitives.
//!
//! These are the reference semantics: every accelerated path must produce
//! byte-identical results. They are also the fallback on hosts without a
//! usable vector unit, so they are tuned rather than naive — 8-byte word
//! accesses throughout, 8-way unrolled fill, and read-prefetch running
//! [`PREFETCH_LINES`] cache lines ahead of the copy cursor.
//!
//! Word accesses use unaligned loads/stores; byte slices carry no alignment
//! guarantee and the penalty on current x86_64 and aarch64 cores is nil for
//! this access pattern.

use super::{prefetch_read, CACHE_LINE};

/// How far ahead of the copy cursor read-prefetch runs, in cache lines.
///
/// Tuned for the generic bulk copy. The dataset-item copy in
/// [`crate::sched`] uses its own, shorter distance for its streaming
/// pattern.
pub const PREFETCH_LINES: usize = 4;

const WORD: usize = 8;

/// Copies `src` into `dst`, one cache line at a time with prefetch ahead.
///
/// # Panics
///
/// Panics if `dst.len() != src.len()`.
pub fn copy(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len(), "Buffers must be the same length");

    let len = dst.len();
    let lines = len / CACHE_LINE;
    let s = src.as_ptr();
    let d = dst.as_mut_ptr();

    for line in 0..lines {
        if line + PREFETCH_LINES < lines {
            prefetch_read(unsafe { s.add((line + PREFETCH_LINES) * CACHE_LINE) });
        }

        // One cache line as eight 64-bit words.
        unsafe {
            let sp = s.add(line * CACHE_LINE) as *const u64;
            let dp = d.add(line * CACHE_LINE) as *mut u64;
            for word in 0..CACHE_LINE / WORD {
                dp.add(word).write_unaligned(sp.add(word).read_unaligned());
            }
        }
    }

    let done = lines * CACHE_LINE;
    dst[done..].copy_from_slice(&src[done..]);
}

/// Fills `dst` with the byte `value` using 8-way unrolled word stores.
pub fn fill(dst: &mut [u8], value: u8) {
    let word = u64::from_ne_bytes([value; WORD]);
    let words = dst.len() / WORD;
    let p = dst.as_mut_ptr() as *mut u64;

    let mut i = 0;
    while i + 8 <= words {
        unsafe {
            p.add(i).write_unaligned(word);
            p.add(i + 1).write_unaligned(word);
            p.add(i + 2).write_unaligned(word);
            p.add(i + 3).write_unaligned(word);
            p.add(i + 4).write_unaligned(word);
            p.add(i + 5).write_unaligned(word);
            p.add(i + 6).write_unaligned(word);
            p.add(i + 7).write_unaligned(word);
        }
        i += 8;
    }
    while i < words {
        unsafe { p.add(i).write_unaligned(word) };
        i += 1;
    }

    for byte in &mut dst[words * WORD..] {
        *byte = value;
    }
}

/// Fills a 64-bit word slice with `value`, 8-way unrolled for instruction
/// level parallelism.
pub fn fill_words(dst: &mut [u64], value: u64) {
    let mut i = 0;
    while i + 8 <= dst.len() {
        dst[i] = value;
        dst[i + 1] = value;
        dst[i + 2] = value;
        dst[i + 3] = value;
        dst[i + 4] = value;
        dst[i + 5] = value;
        dst[i + 6] = value;
        dst[i + 7] = value;
        i += 8;
    }
    while i < dst.len() {
        dst[i] = value;
        i += 1;
    }
}

/// XORs `src` into `dst` in place, word at a time.
///
/// # Panics
///
/// Panics if `dst.len() != src.len()`.
pub fn xor(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len(), "Buffers must be the same length");

    let words = dst.len() / WORD;
    let s = src.as_ptr() as *const u64;
    let d = dst.as_mut_ptr() as *mut u64;

    for i in 0..words {
        unsafe {
            let x = d.add(i).read_unaligned() ^ s.add(i).read_unaligned();
            d.add(i).write_unaligned(x);
        }
    }

    for i in words * WORD..dst.len() {
        dst[i] ^= src[i];
    }
}

/// Compares `a` and `b` in address order, short-circuiting at the first
/// differing word and rescanning that word bytewise for the exact position.
///
/// Returns 0 for equal ranges, otherwise `a[i] as i32 - b[i] as i32` for the
/// first differing index `i`.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
pub fn compare(a: &[u8], b: &[u8]) -> i32 {
    assert_eq!(a.len(), b.len(), "Buffers must be the same length");

    let words = a.len() / WORD;
    let ap = a.as_ptr() as *const u64;
    let bp = b.as_ptr() as *const u64;

    for i in 0..words {
        let (x, y) = unsafe { (ap.add(i).read_unaligned(), bp.add(i).read_unaligned()) };
        if x != y {
            let off = i * WORD;
            return byte_compare(&a[off..off + WORD], &b[off..off + WORD]);
        }
    }

    byte_compare(&a[words * WORD..], &b[words * WORD..])
}

fn byte_compare(a: &[u8], b: &[u8]) -> i32 {
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x != y {
            return x as i32 - y as i32;
        }
    }
    0
}
