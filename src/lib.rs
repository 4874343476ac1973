//! CPU capability detection and dual-path (accelerated / scalar) primitives
//! for multi-threaded dataset initialization.
//!
//! This crate is the architecture abstraction layer underneath a
//! proof-of-work dataset builder: a workload that fills a multi-gigabyte
//! memory region from many cooperating threads and wants every last bit of
//! memory bandwidth the host CPU offers.
//!
//! It provides four things:
//!
//! - [`caps`]: one-time detection of the CPU features that matter here
//!   (vector unit, bit-manipulation extensions, AES/SHA instruction sets).
//! - [`mem`] and [`bits`]: bulk memory and bit/arithmetic primitives, each
//!   with an accelerated and a scalar implementation that produce
//!   byte-identical results.
//! - [`sync`]: the fences and 64-bit atomic operations worker threads use to
//!   publish and observe progress without a lock.
//! - [`sched`]: thread-count and core-affinity advice plus prefetch helpers
//!   tuned for the dataset-fill access pattern, and [`cipher`], a software
//!   substitution-table round for hosts without AES instructions.
//!
//! # Dispatch model
//!
//! Accelerated code is selected twice, by two independent signals:
//!
//! 1. **Build time** — `build.rs` probes the build host and emits a private
//!    cfg flag (`avx2`, `neon` or `fallback`) that decides which accelerated
//!    module is compiled into the binary at all.
//! 2. **Run time** — [`caps::caps`] re-probes the machine the binary actually
//!    runs on. An accelerated path executes only when both signals agree;
//!    otherwise every call takes the scalar path, which is always present.
//!
//! The runtime check is a single branch per bulk call, never a branch inside
//! a hot loop.
//!
//! # Contract
//!
//! Every function in this crate is a total, synchronous, non-allocating
//! operation over caller-supplied data. Nothing here spawns threads, blocks,
//! or performs I/O, with one exception: the first call to [`caps::caps`]
//! reads the host's feature listing, and any failure there degrades to
//! "no features" rather than an error.

pub mod bits;
pub mod caps;
pub mod cipher;
pub mod mem;
pub mod sched;
pub mod sync;
