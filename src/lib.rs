#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(
    test,
    allow(
        clippy::float_cmp,
        clippy::uninlined_format_args,
        clippy::cast_precision_loss
    )
)]
#![allow(clippy::module_name_repetitions)]
//
// Documentation lints: small self-documenting functions don't need extensive docs.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

//! Rewrites beat description JSON files in place, rescaling every note's
//! MIDI `velocity` (an integer in 0–127) to a float in [0.0, 1.0].
//!
//! The whole crate is one linear pipeline: existence guard → optional `.bak`
//! backup → parse → depth-first search for `"notes"` sequences → per-note
//! velocity rewrite → tab-indented atomic overwrite of the original path.
//! See [`run`] for the entry point.

/// The beatnorm crate version (matches `Cargo.toml`).
pub const BEATNORM_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod backup;
pub mod error;
pub mod locate;
pub mod pipeline;
pub mod rewrite;

pub use backup::create_backup;
pub use error::{NormalizeError, Result};
pub use locate::KeyValues;
pub use pipeline::{NormalizeOptions, RunReport, run};
pub use rewrite::{NormalizeStats, normalize_tree, rewrite_note};
