//! # Config Crate
//!
//! Centralized configuration for the Ruby metamodel transformation.
//! Sigil lengths and the unknown-node policy are defined here so the raw-tree
//! crate, the transformer and the command-line front end agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{TransformConfig, UnknownNodePolicy, CLASS_VAR_SIGIL_LEN};
//!
//! // Strict is the default: unknown raw nodes abort the run
//! let config = TransformConfig::default();
//! assert_eq!(config.unknown_nodes, UnknownNodePolicy::Strict);
//!
//! // `@@count` carries a two character sigil
//! assert_eq!(&"@@count"[CLASS_VAR_SIGIL_LEN..], "count");
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Immutable Snapshots**: A run reads its configuration, never mutates it
//! - **Explicit Threading**: No process-wide mutable switches

pub mod constants;
