//! Thread-count and core-affinity advice for the dataset builder, plus
//! prefetch helpers tuned for its access pattern.
//!
//! This module only advises. It never creates, pins or joins a thread; the
//! external thread pool owns all lifecycles and merely asks here how many
//! workers to start and which core each should prefer. The advice is
//! recomputed from the current online-processor count on every call and is
//! never cached or persisted.

use crate::mem::{prefetch_read, CACHE_LINE};

/// Recommended worker count for a CPU-bound bulk fill on `available`
/// logical processors: three quarters of them, at least one.
///
/// The reserved quarter keeps the OS and the other process threads (network,
/// timers) responsive while the fill saturates memory bandwidth.
#[inline]
pub fn recommended_thread_count(available: usize) -> usize {
    let recommended = available * 3 / 4;
    recommended.max(1)
}

/// Deterministic round-robin core for worker `thread_id` on a machine with
/// `online_processors` cores. A zero processor count is clamped to one, so
/// the answer is always a valid index.
#[inline]
pub fn core_index(thread_id: usize, online_processors: usize) -> usize {
    thread_id % online_processors.max(1)
}

/// Number of logical processors currently online.
#[inline]
pub fn online_processors() -> usize {
    num_cpus::get()
}

/// Walks `item` in cache-line strides, issuing one read-prefetch per line.
///
/// Called on the next dataset item while the current one is being hashed;
/// purely a timing hint, no observable effect.
#[inline]
pub fn prefetch_item(item: &[u8]) {
    let base = item.as_ptr();
    let mut offset = 0;
    while offset < item.len() {
        prefetch_read(unsafe { base.add(offset) });
        offset += CACHE_LINE;
    }
}

/// Copies one dataset item with prefetch running a single 64-byte group
/// ahead of the store cursor.
///
/// This distance is tuned separately from the generic
/// [`crate::mem::bulk_copy`] path (which runs four lines ahead): item copies
/// are short and immediately consumed, so a long prefetch lead would evict
/// its own working set.
///
/// # Panics
///
/// Panics if `dst.len() != src.len()`.
pub fn copy_with_prefetch(dst: &mut [u8], src: &[u8]) {
    assert_eq!(dst.len(), src.len(), "Buffers must be the same length");

    let len = dst.len();
    let groups = len / CACHE_LINE;
    let s = src.as_ptr();
    let d = dst.as_mut_ptr();

    for group in 0..groups {
        if group + 1 < groups {
            prefetch_read(unsafe { s.add((group + 1) * CACHE_LINE) });
        }

        unsafe {
            let sp = s.add(group * CACHE_LINE) as *const u64;
            let dp = d.add(group * CACHE_LINE) as *mut u64;
            dp.write_unaligned(sp.read_unaligned());
            dp.add(1).write_unaligned(sp.add(1).read_unaligned());
            dp.add(2).write_unaligned(sp.add(2).read_unaligned());
            dp.add(3).write_unaligned(sp.add(3).read_unaligned());
            dp.add(4).write_unaligned(sp.add(4).read_unaligned());
            dp.add(5).write_unaligned(sp.add(5).read_unaligned());
            dp.add(6).write_unaligned(sp.add(6).read_unaligned());
            dp.add(7).write_unaligned(sp.add(7).read_unaligned());
        }
    }

    let done = groups * CACHE_LINE;
    dst[done..].copy_from_slice(&src[done..]);
}
