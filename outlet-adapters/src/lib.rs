//! # Outlet Adapters
//!
//! Output adapters that turn the values a wrapped function returns into
//! wire values a UI client can display, and rebuild transmitted values into
//! artifacts on disk.
//!
//! ## Modules
//!
//! - `adapters`: the `OutputAdapter` trait, the ten adapter kinds and the
//!   alias registry
//!
//! ## Example
//!
//! ```
//! use outlet_adapters::adapters::{create_adapter, OutputAdapter};
//! use outlet_shared::models::RawValue;
//!
//! let adapter = create_adapter("number").unwrap();
//! let wire = adapter.postprocess(RawValue::from(3.5)).unwrap();
//! assert_eq!(wire, "3.5");
//! ```

pub mod adapters;
