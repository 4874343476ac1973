//! Memory ordering fences and the 64-bit atomic word used for lock-free
//! thread coordination during dataset initialization.
//!
//! # Fence mapping
//!
//! The dataset builder was written against hardware fence flavors
//! (`fence rw,rw`, `fence r,r`, `fence w,w`, `fence rw,w`, ...). Rust
//! exposes the C++11 ordering model instead, so each flavor maps onto the
//! weakest `std::sync::atomic::fence` ordering that implies it:
//!
//! | operation             | hardware flavor | Rust fence |
//! |-----------------------|-----------------|------------|
//! | [`full_fence`]        | `rw,rw`         | `SeqCst`   |
//! | [`load_fence`]        | `r,r`           | `Acquire`  |
//! | [`store_fence`]       | `w,w`           | `Release`  |
//! | [`acquire_fence`]     | `r,rw`          | `Acquire`  |
//! | [`release_fence`]     | `rw,w`          | `Release`  |
//! | [`store_order_fence`] | `rw,w` (TSO)    | `Release`  |
//!
//! A mapped fence may be stronger than the hardware flavor it stands in for,
//! never weaker.
//!
//! # The handshake
//!
//! The one concurrency contract this layer offers is the classic
//! acquire/release publish:
//!
//! ```
//! use std::sync::Arc;
//! use archprim::sync::{SyncWord, cpu_pause};
//!
//! let ready = Arc::new(SyncWord::new(0));
//!
//! // producer: write the data with plain stores, then release-store a flag
//! let flag = Arc::clone(&ready);
//! let producer = std::thread::spawn(move || {
//!     // ... fill the shared region ...
//!     flag.store(1);
//! });
//!
//! // consumer: acquire-load the flag, spinning politely, then read the data
//! while ready.load() == 0 {
//!     cpu_pause();
//! }
//! producer.join().unwrap();
//! ```
//!
//! Everything the producer wrote before the release-store is visible to the
//! consumer after its acquire-load observes the flag.

use std::sync::atomic::{fence, AtomicU64, Ordering};

/// Full barrier: all prior loads and stores complete before any later ones.
#[inline(always)]
pub fn full_fence() {
    fence(Ordering::SeqCst);
}

/// Load barrier: prior loads are ordered before later operations.
#[inline(always)]
pub fn load_fence() {
    fence(Ordering::Acquire);
}

/// Store barrier: prior stores are ordered before later stores.
#[inline(always)]
pub fn store_fence() {
    fence(Ordering::Release);
}

/// Acquire barrier, the load half of the handshake.
#[inline(always)]
pub fn acquire_fence() {
    fence(Ordering::Acquire);
}

/// Release barrier, the store half of the handshake.
#[inline(always)]
pub fn release_fence() {
    fence(Ordering::Release);
}

/// Store-ordered barrier (the total-store-order flavor): prior loads and
/// stores are ordered before later stores.
#[inline(always)]
pub fn store_order_fence() {
    fence(Ordering::Release);
}

/// Contention-reduction hint for spin-wait loops.
///
/// Carries no ordering guarantee and has no observable effect beyond timing;
/// it exists so a consumer polling a [`SyncWord`] does not starve the
/// sibling hyperthread doing the real work.
#[inline(always)]
pub fn cpu_pause() {
    std::hint::spin_loop();
}

/// A naturally aligned 64-bit word shared between threads.
///
/// All mutation goes through atomic read-modify-write operations, so no
/// reader ever observes a torn value and no concurrent increment is lost.
/// Wrapping [`AtomicU64`] discharges the alignment precondition by
/// construction: the type cannot be placed at a misaligned address in safe
/// code.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct SyncWord(AtomicU64);

impl SyncWord {
    /// Creates a word holding `value`.
    #[inline]
    pub const fn new(value: u64) -> Self {
        SyncWord(AtomicU64::new(value))
    }

    /// Acquire-load: observes the most recent release-ordered store visible
    /// to this thread, along with everything that preceded it.
    #[inline(always)]
    pub fn load(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Release-store: publishes everything this thread wrote before it.
    #[inline(always)]
    pub fn store(&self, value: u64) {
        self.0.store(value, Ordering::Release);
    }

    /// Atomically replaces the word with `value`, returning the previous
    /// value. Full read-modify-write atomicity.
    #[inline(always)]
    pub fn exchange(&self, value: u64) -> u64 {
        self.0.swap(value, Ordering::AcqRel)
    }

    /// Atomically adds `value` (wrapping), returning the previous value.
    /// No concurrent caller can observe a lost update.
    #[inline(always)]
    pub fn fetch_add(&self, value: u64) -> u64 {
        self.0.fetch_add(value, Ordering::AcqRel)
    }
}
