//! # Outlet Shared Library
//!
//! This crate contains the value model, codec helpers and configuration used
//! by the Outlet output adapters.
//!
//! ## Module Organization
//!
//! - `models`: Values a wrapped function can return (`RawValue` and friends)
//! - `codec`: Base64 data URLs, PNG and WAV encoding
//! - `config`: Configuration management

pub mod codec;
pub mod config;
pub mod models;

/// Current version of the Outlet shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
