//! Centralized configuration values shared across the Ruby metamodel crates.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// SIGIL CONSTANTS
// =============================================================================

/// Length of the `$` sigil on global variable tokens.
///
/// Older parser versions expose `$stdout` where newer ones expose `stdout`.
///
/// # Examples
/// ```
/// use config::constants::GLOBAL_VAR_SIGIL_LEN;
/// assert_eq!(&"$stdout"[GLOBAL_VAR_SIGIL_LEN..], "stdout");
/// ```
pub const GLOBAL_VAR_SIGIL_LEN: usize = 1;

/// Length of the `@@` sigil on class variable tokens.
///
/// # Examples
/// ```
/// use config::constants::CLASS_VAR_SIGIL_LEN;
/// assert_eq!(&"@@count"[CLASS_VAR_SIGIL_LEN..], "count");
/// ```
pub const CLASS_VAR_SIGIL_LEN: usize = 2;

/// Length of the `@` sigil on instance variable tokens.
///
/// # Examples
/// ```
/// use config::constants::INSTANCE_VAR_SIGIL_LEN;
/// assert_eq!(&"@name"[INSTANCE_VAR_SIGIL_LEN..], "name");
/// ```
pub const INSTANCE_VAR_SIGIL_LEN: usize = 1;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Environment variable the command-line front end reads to enable
/// permissive handling of unknown raw nodes.
///
/// # Examples
/// ```
/// use config::constants::SKIP_UNKNOWN_NODES_ENV;
/// assert!(SKIP_UNKNOWN_NODES_ENV.starts_with("RUBYMM_"));
/// ```
pub const SKIP_UNKNOWN_NODES_ENV: &str = "RUBYMM_SKIP_UNKNOWN_NODES";

/// Environment variable holding the log filter for the command-line front end.
/// Falls back to `RUST_LOG` when unset.
///
/// # Examples
/// ```
/// use config::constants::LOG_FILTER_ENV;
/// assert_eq!(LOG_FILTER_ENV, "RUBYMM_LOG");
/// ```
pub const LOG_FILTER_ENV: &str = "RUBYMM_LOG";

// =============================================================================
// UNKNOWN NODE POLICY
// =============================================================================

/// What the transformer does with a raw node kind it has no case for.
///
/// # Examples
/// ```
/// use config::constants::UnknownNodePolicy;
/// assert_eq!(UnknownNodePolicy::default(), UnknownNodePolicy::Strict);
/// assert!(UnknownNodePolicy::Permissive.skips_unknown());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownNodePolicy {
    /// Abort the run with an unrecognized-node error.
    #[default]
    Strict,
    /// Log a warning, record a diagnostic and leave a gap in the model.
    Permissive,
}

impl UnknownNodePolicy {
    /// Returns true when unknown nodes are skipped rather than raised.
    #[inline]
    pub fn skips_unknown(self) -> bool {
        matches!(self, UnknownNodePolicy::Permissive)
    }
}

impl From<bool> for UnknownNodePolicy {
    /// Maps a "skip unknown nodes" switch onto a policy.
    fn from(skip_unknown: bool) -> Self {
        if skip_unknown {
            UnknownNodePolicy::Permissive
        } else {
            UnknownNodePolicy::Strict
        }
    }
}

impl fmt::Display for UnknownNodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownNodePolicy::Strict => write!(f, "strict"),
            UnknownNodePolicy::Permissive => write!(f, "permissive"),
        }
    }
}

// =============================================================================
// TRANSFORM CONFIG
// =============================================================================

/// Immutable snapshot of the settings a transformation run reads.
///
/// The snapshot is passed by reference into the transformer, so runs that
/// need different policies simply hold different snapshots.
///
/// # Examples
/// ```
/// use config::constants::{TransformConfig, UnknownNodePolicy};
/// let config = TransformConfig::default().with_unknown_nodes(UnknownNodePolicy::Permissive);
/// assert_eq!(config, TransformConfig::permissive());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformConfig {
    /// Handling of raw node kinds without a transformation case.
    pub unknown_nodes: UnknownNodePolicy,
}

impl TransformConfig {
    /// Configuration that raises on unknown raw nodes.
    pub fn strict() -> Self {
        Self {
            unknown_nodes: UnknownNodePolicy::Strict,
        }
    }

    /// Configuration that skips unknown raw nodes with a warning.
    pub fn permissive() -> Self {
        Self {
            unknown_nodes: UnknownNodePolicy::Permissive,
        }
    }

    /// Returns a copy with the given unknown-node policy.
    pub fn with_unknown_nodes(mut self, policy: UnknownNodePolicy) -> Self {
        self.unknown_nodes = policy;
        self
    }
}

impl fmt::Display for TransformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown_nodes={}", self.unknown_nodes)
    }
}
