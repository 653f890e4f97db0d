//! AWS plumbing for the ECS node.
//!
//! A credential bundle plus a lightweight SigV4-signed HTTP client for the
//! ECS control plane. ECS speaks the AWS JSON 1.1 protocol: every operation
//! is a POST to the regional endpoint with an `X-Amz-Target` header naming
//! the action, and both request and response bodies are plain JSON.

mod client;
mod credentials;
mod error;

pub use client::{EcsApi, EcsClient};
pub use credentials::Credentials;
pub use error::AwsError;
