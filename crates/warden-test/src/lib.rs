//! Warden Test - Shared test utilities for the Warden crates.
//!
//! This crate provides mock host capabilities and fixtures used across the
//! workspace as a dev-dependency.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! warden-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use warden_test::{MockHost, MockSurface, SurfaceResponse};
//!
//! let surface = MockSurface::new().with_response(SurfaceResponse::choose("Yes"));
//! let host = MockHost::new().with_surface(surface);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
