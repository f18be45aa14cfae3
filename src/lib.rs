//! Type-schema model for API documentation.
//!
//! Build [`docs::StructInfo`]s out of [`ir::TypeSignature`]s, ask each struct
//! which named types it references, and let [`registry::SchemaRegistry`] chase
//! those references to a complete, sorted set for the docs renderer.
pub mod cli;
pub mod closure;
pub mod config_loaded;
pub mod docs;
pub mod error;
pub mod ir;
pub mod registry;
pub mod render;
pub mod schema_de;

pub use error::{Error, Result};
