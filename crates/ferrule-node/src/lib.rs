//! Node description schema types.
//!
//! A node declares its configuration surface as a list of typed properties.
//! The host renders these, evaluates any per-record expressions, and hands
//! resolved values back through a parameter source. `validate_values` covers
//! the schema-side checks (required fields, enum membership, numeric ranges)
//! so node cores can assume well-typed input.

mod description;
mod error;
mod validate;

pub use description::{
  CollectionGroup, CredentialRequirement, DisplayOptions, NodeDescription, NodeProperty,
  PropertyKind, PropertyOption, TypeOptions,
};
pub use error::SchemaError;
pub use validate::validate_values;
