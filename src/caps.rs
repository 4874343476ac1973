//! One-time CPU capability detection.
//!
//! Two independent signals decide whether an accelerated code path may run:
//!
//! 1. **Compile-time flags** — `cfg!(target_feature = "...")` conjunctions
//!    plus the cfg flags emitted by `build.rs`. These gate which accelerated
//!    code *exists* in the binary.
//! 2. **Runtime probe** — a best-effort read of the host's textual feature
//!    listing (`/proc/cpuinfo` on Linux, `sysctl -a` on macOS), searched for
//!    the relevant feature tokens. This gates whether compiled-in code is
//!    *safe to execute* on the machine at hand.
//!
//! A capability reports `true` only when both signals agree. A binary built
//! for a feature its host does not actually have therefore falls back to the
//! scalar paths instead of faulting on an illegal instruction.
//!
//! The probe runs once per process and is cached. It can never fail: any I/O
//! or parse problem degrades to "no features supported", because a wrong
//! "unsupported" answer only costs performance while a wrong "supported"
//! answer costs a SIGILL.

use std::sync::OnceLock;

/// Chunk width of the scalar fallback paths, in bytes (one 64-bit word).
pub const SCALAR_WIDTH: usize = 8;

/// The capability flags this layer cares about, computed once per process.
///
/// Immutable after detection; queried by value. `Default` is the fail-safe
/// answer: every feature off, scalar vector width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapFlags {
    /// AES instruction extension usable (AES-NI on x86_64, the `aes`
    /// extension on aarch64).
    pub aes: bool,
    /// SHA instruction extension usable (SHA-NI on x86_64, `sha2` on
    /// aarch64).
    pub sha: bool,
    /// Bit-manipulation extensions usable. On x86_64 this requires BMI1,
    /// BMI2 *and* POPCNT simultaneously; aarch64 carries the equivalent
    /// operations in its baseline ISA.
    pub bit_manip: bool,
    /// A vector unit both compiled in and present on the host.
    pub vector: bool,
    /// Bytes one vector chunk processes, or [`SCALAR_WIDTH`] when `vector`
    /// is false.
    pub vector_width: usize,
}

impl Default for CapFlags {
    fn default() -> Self {
        CapFlags {
            aes: false,
            sha: false,
            bit_manip: false,
            vector: false,
            vector_width: SCALAR_WIDTH,
        }
    }
}

/// What the runtime feature listing reported. All-false when the listing is
/// missing or unparseable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Probe {
    aes: bool,
    sha: bool,
    bit_manip: bool,
    vector: bool,
}

static CAPS: OnceLock<CapFlags> = OnceLock::new();

/// Detected capabilities of the current host, computed on first call and
/// cached for the life of the process. Never fails.
#[inline]
pub fn caps() -> CapFlags {
    *CAPS.get_or_init(detect)
}

/// True when hardware AES rounds may be used instead of [`crate::cipher`].
#[inline]
pub fn has_aes() -> bool {
    caps().aes
}

/// True when hardware SHA compression may be used.
#[inline]
pub fn has_sha() -> bool {
    caps().sha
}

/// True when hardware rotate/popcount/ctz may be assumed single-instruction.
#[inline]
pub fn has_bit_manip() -> bool {
    caps().bit_manip
}

/// True when the accelerated bulk-memory paths are live.
#[inline]
pub fn has_vector() -> bool {
    caps().vector
}

/// Bytes per vector chunk ([`SCALAR_WIDTH`] on scalar-only hosts).
#[inline]
pub fn vector_width() -> usize {
    caps().vector_width
}

fn detect() -> CapFlags {
    let compiled = compiled_flags();

    let probe = match read_feature_listing() {
        Some(listing) => parse_feature_listing(&listing),
        None => {
            log::warn!("CPU feature listing unavailable; assuming no accelerated features");
            Probe::default()
        }
    };

    let flags = combine(compiled, probe);
    log::debug!(
        "CPU capabilities: aes={} sha={} bit_manip={} vector={} vector_width={}",
        flags.aes,
        flags.sha,
        flags.bit_manip,
        flags.vector,
        flags.vector_width
    );
    flags
}

/// The compile-time half of the pairing: which features this binary was
/// built to use.
fn compiled_flags() -> CapFlags {
    let vector = cfg!(any(avx2, neon));

    CapFlags {
        aes: cfg!(all(target_arch = "x86_64", target_feature = "aes"))
            || cfg!(all(target_arch = "aarch64", target_feature = "aes")),
        sha: cfg!(all(target_arch = "x86_64", target_feature = "sha"))
            || cfg!(all(target_arch = "aarch64", target_feature = "sha2")),
        bit_manip: cfg!(all(
            target_arch = "x86_64",
            target_feature = "bmi1",
            target_feature = "bmi2",
            target_feature = "popcnt"
        )) || cfg!(target_arch = "aarch64"),
        vector,
        vector_width: compiled_vector_width(),
    }
}

fn compiled_vector_width() -> usize {
    if cfg!(avx2) {
        32
    } else if cfg!(neon) {
        16
    } else {
        SCALAR_WIDTH
    }
}

/// Reads the platform's textual feature descriptor. `None` on any failure.
fn read_feature_listing() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/cpuinfo").ok()
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("sysctl")
            .args(["-a"])
            .output()
            .ok()
            .map(|output| String::from_utf8_lossy(&output.stdout).into_owned())
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

/// Token search over the feature listing. Defensive by construction: an
/// absent or garbled listing simply matches no tokens.
fn parse_feature_listing(listing: &str) -> Probe {
    let contents = listing.to_lowercase();

    if cfg!(target_os = "macos") {
        return Probe {
            aes: contents.contains("hw.optional.aes: 1")
                || contents.contains("hw.optional.arm.feat_aes: 1"),
            sha: contents.contains("hw.optional.arm.feat_sha256: 1"),
            bit_manip: contents.contains("hw.optional.bmi1: 1")
                && contents.contains("hw.optional.bmi2: 1")
                || cfg!(target_arch = "aarch64"),
            vector: contents.contains("hw.optional.avx2_0: 1")
                || contents.contains("hw.optional.neon: 1"),
        };
    }

    if cfg!(target_arch = "aarch64") {
        Probe {
            aes: contents.contains("aes"),
            sha: contents.contains("sha2"),
            // rbit/clz/cnt are baseline on aarch64
            bit_manip: true,
            vector: contents.contains("asimd") || contents.contains("neon"),
        }
    } else {
        Probe {
            aes: contents.contains("aes"),
            sha: contents.contains("sha_ni"),
            bit_manip: contents.contains("bmi1")
                && contents.contains("bmi2")
                && contents.contains("popcnt"),
            vector: contents.contains("avx2"),
        }
    }
}

/// Both signals must agree before a capability is reported usable.
fn combine(compiled: CapFlags, probe: Probe) -> CapFlags {
    let vector = compiled.vector && probe.vector;

    CapFlags {
        aes: compiled.aes && probe.aes,
        sha: compiled.sha && probe.sha,
        bit_manip: compiled.bit_manip && probe.bit_manip,
        vector,
        vector_width: if vector {
            compiled.vector_width
        } else {
            SCALAR_WIDTH
        },
    }
}
