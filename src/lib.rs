// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Free-look ("noclip") camera navigation with shareable location paths.
//!
//! A [`camera::NavigationController`] turns pointer and keyboard input into
//! a clamped orientation and frame-rate independent flight. Whenever motion
//! settles, a [`sync::StateSyncBridge`] writes the pose into the visible
//! location as `/noclip/{org}.{asset}@x,y,z,pitch,yaw`, and
//! [`location::decode`] turns such a path back into a starting pose.
//!
//! # Key entry points
//!
//! - [`camera`] - pose math, the navigation controller and its event channel
//! - [`location`] - the path codec and its quantisation rules
//! - [`sync`] - mirroring settled poses into a [`sync::LocationHistory`]
//! - [`session`] - routing, map manifests and initial placement
//! - [`options::Options`] - navigation tuning, key bindings and hosts (TOML)
//!
//! The `web` feature adds DOM-backed host and history implementations and
//! a `start` entry point for wasm builds.

pub mod camera;
pub mod error;
pub mod input;
pub mod location;
pub mod options;
pub mod session;
pub mod sync;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use error::NoclipError;
