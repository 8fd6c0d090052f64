//! Core components for presigning S3 uploads.
//!
//! This crate holds the primitives shared by the s3presign services: the
//! error type, hashing and time helpers, the environment abstraction used to
//! load static configuration, and the credential trait.
//!
//! ## Overview
//!
//! - **Context**: A container holding the [`Env`] implementation used to read configuration
//! - **Traits**: [`SigningCredential`] for validating credentials before a signer is built
//! - **Error**: [`Error`] and [`ErrorKind`], reported once at construction time
//!
//! ## Example
//!
//! ```
//! use s3presign_core::{Context, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("AWS_REGION".to_string(), "eu-west-1".to_string())]),
//! });
//!
//! assert_eq!(ctx.env_var("AWS_REGION").as_deref(), Some("eu-west-1"));
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: SHA256 and HMAC-SHA256 helpers
//! - [`time`]: UTC instants and the SigV4 date formats
//! - [`utils`]: Data redaction for `Debug` output

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, NoopEnv, OsEnv, StaticEnv};

mod api;
pub use api::SigningCredential;

mod error;
pub use error::{Error, ErrorKind, Result};
