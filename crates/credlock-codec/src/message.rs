// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Encode and decode enrollment and verification boundary messages.
// Author: Lukas Bower

//! Message envelope and the four concrete message variants.
//!
//! Every message shares the same framing: a little-endian `u32` status code
//! and, only when the status is [`ErrorCode::Ok`], a `u32` principal
//! identifier followed by the body's length-prefixed fields in a fixed order.
//! A non-`Ok` status serializes to exactly four bytes, whatever body state
//! the in-memory value holds.
//!
//! The variant set is closed: each body implements [`MessageBody`] and the
//! expected variant is selected at compile time through [`Message`]'s type
//! parameter. The wire carries no variant tag; the receiver knows which
//! message it is waiting for.

use crate::buffer::{OpaqueBuffer, SecretBuffer};
use crate::wire::{self, DecodeError, Reader};

/// Status carried in every message envelope.
///
/// The taxonomy is deliberately coarse: truncation, bad lengths, and nested
/// field failures are all reported to the peer as `Invalid`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorCode {
    /// The message carries a principal identifier and body.
    #[default]
    Ok = 0,
    /// The request was rejected or the payload was malformed.
    Invalid = 1,
}

impl ErrorCode {
    /// Map a raw wire status to the two-valued taxonomy.
    ///
    /// Unknown nonzero codes collapse to `Invalid`; the codec never emits
    /// them itself.
    #[must_use]
    pub fn from_wire(value: u32) -> Self {
        match value {
            0 => Self::Ok,
            _ => Self::Invalid,
        }
    }

    /// Raw wire representation of the status.
    #[must_use]
    pub fn to_wire(self) -> u32 {
        self as u32
    }
}

impl From<DecodeError> for ErrorCode {
    fn from(_: DecodeError) -> Self {
        Self::Invalid
    }
}

/// Numeric identifier of the account a message concerns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PrincipalId(u32);

impl PrincipalId {
    /// Create a principal identifier from the supplied raw value.
    #[must_use]
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Access the raw identifier value.
    #[must_use]
    pub fn into_raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PrincipalId {
    fn from(value: u32) -> Self {
        Self::from_raw(value)
    }
}

/// Body-specific framing hooks implemented by each message variant.
///
/// The envelope drives these; bodies only concatenate and split their
/// declared fields through the length-prefixed field codec.
pub trait MessageBody: Default {
    /// Encoded length of the body's fields in bytes.
    fn encoded_len(&self) -> usize;

    /// Append the body's fields to `out` in their declared order.
    fn encode(&self, out: &mut Vec<u8>);

    /// Decode the body's fields from `reader` in their declared order.
    ///
    /// Fails on the first field that cannot be decoded; no partially
    /// populated body is ever returned.
    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError>;
}

/// Envelope shared by every message variant.
#[derive(Debug, Default)]
pub struct Message<B> {
    /// Status of the exchange this message reports.
    pub error: ErrorCode,
    /// Principal the message concerns. Meaningful only when `error` is `Ok`.
    pub principal: PrincipalId,
    /// Variant-specific fields. Serialized only when `error` is `Ok`.
    pub body: B,
}

impl<B: MessageBody> Message<B> {
    /// Build an `Ok` message for `principal` carrying `body`.
    #[must_use]
    pub fn new(principal: impl Into<PrincipalId>, body: B) -> Self {
        Self {
            error: ErrorCode::Ok,
            principal: principal.into(),
            body,
        }
    }

    /// Build an error reply. It serializes to the four-byte status alone.
    #[must_use]
    pub fn error_reply(error: ErrorCode) -> Self {
        Self {
            error,
            principal: PrincipalId::default(),
            body: B::default(),
        }
    }

    /// Exact size of the serialized form in bytes.
    #[must_use]
    pub fn serialized_len(&self) -> usize {
        if self.error == ErrorCode::Ok {
            8 + self.body.encoded_len()
        } else {
            4
        }
    }

    /// Serialize into a flat byte vector owned by the caller.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        out.extend_from_slice(&self.error.to_wire().to_le_bytes());
        if self.error != ErrorCode::Ok {
            return out;
        }
        out.extend_from_slice(&self.principal.into_raw().to_le_bytes());
        self.body.encode(&mut out);
        out
    }

    /// Parse a message from untrusted bytes.
    ///
    /// A non-`Ok` status short-circuits: the result carries that status with
    /// a default body, and no bytes past the status are touched. Bytes
    /// trailing a fully decoded body are ignored.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::new(bytes);
        let error = ErrorCode::from_wire(reader.read_u32()?);
        if error != ErrorCode::Ok {
            return Ok(Self::error_reply(error));
        }
        let principal = PrincipalId::from_raw(reader.read_u32()?);
        let body = B::decode(&mut reader)?;
        Ok(Self {
            error: ErrorCode::Ok,
            principal,
            body,
        })
    }
}

/// Fields carried by an enrollment request.
///
/// The current handle and current password travel together: both present on
/// re-enrollment, both absent (zero-length) on first enrollment.
#[derive(Debug, Default)]
pub struct EnrollRequestBody {
    /// Password the caller wants enrolled.
    pub provided_password: SecretBuffer,
    /// Handle from the previous enrollment, absent on first enrollment.
    pub current_password_handle: OpaqueBuffer,
    /// Password matching the current handle, absent on first enrollment.
    pub current_password: SecretBuffer,
}

impl MessageBody for EnrollRequestBody {
    fn encoded_len(&self) -> usize {
        wire::field_wire_len(self.provided_password.as_bytes())
            + wire::field_wire_len(self.current_password_handle.as_bytes())
            + wire::field_wire_len(self.current_password.as_bytes())
    }

    fn encode(&self, out: &mut Vec<u8>) {
        wire::put_field(out, self.provided_password.as_bytes());
        wire::put_field(out, self.current_password_handle.as_bytes());
        wire::put_field(out, self.current_password.as_bytes());
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let provided_password = SecretBuffer::new(wire::get_field(reader)?);
        let current_password_handle = OpaqueBuffer::new(wire::get_field(reader)?);
        let current_password = SecretBuffer::new(wire::get_field(reader)?);
        Ok(Self {
            provided_password,
            current_password_handle,
            current_password,
        })
    }
}

/// Fields carried by an enrollment response.
#[derive(Debug, Default)]
pub struct EnrollResponseBody {
    /// Handle derived by the engine for the newly enrolled password.
    pub enrolled_password_handle: OpaqueBuffer,
}

impl MessageBody for EnrollResponseBody {
    fn encoded_len(&self) -> usize {
        wire::field_wire_len(self.enrolled_password_handle.as_bytes())
    }

    fn encode(&self, out: &mut Vec<u8>) {
        wire::put_field(out, self.enrolled_password_handle.as_bytes());
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let enrolled_password_handle = OpaqueBuffer::new(wire::get_field(reader)?);
        Ok(Self {
            enrolled_password_handle,
        })
    }
}

/// Fields carried by a verification request.
#[derive(Debug, Default)]
pub struct VerifyRequestBody {
    /// Handle returned by a previous enrollment.
    pub password_handle: OpaqueBuffer,
    /// Password the caller presents for verification.
    pub provided_password: SecretBuffer,
}

impl MessageBody for VerifyRequestBody {
    fn encoded_len(&self) -> usize {
        wire::field_wire_len(self.password_handle.as_bytes())
            + wire::field_wire_len(self.provided_password.as_bytes())
    }

    fn encode(&self, out: &mut Vec<u8>) {
        wire::put_field(out, self.password_handle.as_bytes());
        wire::put_field(out, self.provided_password.as_bytes());
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let password_handle = OpaqueBuffer::new(wire::get_field(reader)?);
        let provided_password = SecretBuffer::new(wire::get_field(reader)?);
        Ok(Self {
            password_handle,
            provided_password,
        })
    }
}

/// Fields carried by a verification response.
#[derive(Debug, Default)]
pub struct VerifyResponseBody {
    /// Token attesting that the presented password matched.
    pub verification_token: OpaqueBuffer,
}

impl MessageBody for VerifyResponseBody {
    fn encoded_len(&self) -> usize {
        wire::field_wire_len(self.verification_token.as_bytes())
    }

    fn encode(&self, out: &mut Vec<u8>) {
        wire::put_field(out, self.verification_token.as_bytes());
    }

    fn decode(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let verification_token = OpaqueBuffer::new(wire::get_field(reader)?);
        Ok(Self { verification_token })
    }
}

/// Request to enroll a password for a principal.
pub type EnrollRequest = Message<EnrollRequestBody>;

/// Reply to an enrollment request.
pub type EnrollResponse = Message<EnrollResponseBody>;

/// Request to verify a password against an enrolled handle.
pub type VerifyRequest = Message<VerifyRequestBody>;

/// Reply to a verification request.
pub type VerifyResponse = Message<VerifyResponseBody>;
