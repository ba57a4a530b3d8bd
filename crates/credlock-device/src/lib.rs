// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Boundary glue between callers holding raw credential bytes and the
//! verifier on the far side of the Credlock trust boundary.
//!
//! The caller side ([`BoundaryClient`]) frames raw byte spans into wire
//! messages and hands the serialized bytes to a [`Transport`]. The verifier
//! side ([`BoundaryService`]) parses those bytes, drives the external
//! [`CredentialEngine`], and serializes the reply. [`LoopbackTransport`]
//! wires the two together in-process for deployments without a hardware
//! backend.

mod client;
mod engine;
mod service;

pub use client::{BoundaryClient, DeviceError, Transport};
pub use engine::CredentialEngine;
pub use service::{BoundaryService, LoopbackTransport};
