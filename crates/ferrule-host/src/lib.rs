//! Host-provided capabilities.
//!
//! Everything a node needs from its surrounding runtime is injected at call
//! time: resolved parameter values come through a [`ParameterSource`] and the
//! run-level execution policy through [`RunPolicy`]. Nodes never reach into
//! ambient host state, which keeps them testable without a running host.

mod error;
mod policy;
mod source;

pub use error::ParamError;
pub use policy::RunPolicy;
pub use source::{ParameterSource, Parameters, StaticParameterSource};
