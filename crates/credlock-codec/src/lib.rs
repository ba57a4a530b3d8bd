// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Provide wire types and codec primitives for the Credlock trust boundary.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Credlock wire types and codec primitives shared by both sides of the
//! enrollment/verification trust boundary.
//!
//! This crate is the only code in the boundary layer that touches untrusted
//! bytes directly. Decoding computes exact field bounds, rejects malformed
//! lengths, and never reads outside the supplied input. Buffers holding raw
//! secret material are zeroed before their storage is released.

mod buffer;
mod message;
mod wire;

pub use buffer::{OpaqueBuffer, SecretBuffer};
pub use message::{
    EnrollRequest, EnrollRequestBody, EnrollResponse, EnrollResponseBody, ErrorCode, Message,
    MessageBody, PrincipalId, VerifyRequest, VerifyRequestBody, VerifyResponse, VerifyResponseBody,
};
pub use wire::{DecodeError, Reader};
