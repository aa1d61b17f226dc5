//! Shared test utilities for the dirmirror workspace.
//!
//! This crate provides standardised temporary directory fixtures so every
//! crate's tests build source and destination trees the same way. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder and the [`MirrorPair`] source/output layout

pub mod tree;

pub use tree::{MirrorPair, TestTree};
