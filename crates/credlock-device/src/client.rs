// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Caller-side boundary device for enrollment and verification.
// Author: Lukas Bower

//! Caller-side device that frames raw credential bytes into wire messages.

use credlock_codec::{
    DecodeError, EnrollRequestBody, EnrollResponse, ErrorCode, Message, OpaqueBuffer, PrincipalId,
    SecretBuffer, VerifyRequestBody, VerifyResponse,
};

/// Failures surfaced to callers of the boundary device.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeviceError {
    /// A required argument was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The transport failed to deliver the request or reply.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The reply bytes could not be parsed.
    #[error("malformed reply")]
    MalformedReply(#[from] DecodeError),
    /// The verifier rejected the request.
    #[error("request rejected by the verifier")]
    Rejected,
}

/// Carries serialized messages across the trust boundary and back.
///
/// One method per boundary entry point: the wire format carries no variant
/// tag, so the endpoint is selected by the call, not by the bytes.
pub trait Transport {
    /// Deliver a serialized enrollment request and return the serialized
    /// reply.
    fn enroll(&mut self, request: Vec<u8>) -> Result<Vec<u8>, DeviceError>;

    /// Deliver a serialized verification request and return the serialized
    /// reply.
    fn verify(&mut self, request: Vec<u8>) -> Result<Vec<u8>, DeviceError>;
}

/// Caller-side device holding the transport to the verifier.
pub struct BoundaryClient<T> {
    transport: T,
}

impl<T: Transport> BoundaryClient<T> {
    /// Build a client over the supplied transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Enroll `desired_password` for `principal`, returning the enrolled
    /// password handle. The caller owns the returned bytes.
    ///
    /// On re-enrollment the caller supplies the current handle and the
    /// current password. The two travel together: if either is missing or
    /// empty, both are dropped and the request becomes a first-time
    /// enrollment.
    pub fn enroll(
        &mut self,
        principal: impl Into<PrincipalId>,
        current_password_handle: Option<&[u8]>,
        current_password: Option<&[u8]>,
        desired_password: &[u8],
    ) -> Result<Vec<u8>, DeviceError> {
        if desired_password.is_empty() {
            return Err(DeviceError::InvalidArgument(
                "desired password must not be empty",
            ));
        }
        let (handle, current) = match (current_password_handle, current_password) {
            (Some(handle), Some(current)) if !handle.is_empty() && !current.is_empty() => {
                (handle, current)
            }
            _ => (&[][..], &[][..]),
        };

        let principal = principal.into();
        let request = Message::new(
            principal,
            EnrollRequestBody {
                provided_password: SecretBuffer::copy_of(desired_password),
                current_password_handle: OpaqueBuffer::copy_of(handle),
                current_password: SecretBuffer::copy_of(current),
            },
        );
        let reply = self.transport.enroll(request.serialize())?;

        let mut response = EnrollResponse::deserialize(&reply)?;
        if response.error != ErrorCode::Ok {
            log::warn!("enrollment rejected for principal {}", principal.into_raw());
            return Err(DeviceError::Rejected);
        }
        Ok(response.body.enrolled_password_handle.take_bytes())
    }

    /// Verify `provided_password` against `enrolled_password_handle` for
    /// `principal`, returning the verification token. The caller owns the
    /// returned bytes.
    pub fn verify(
        &mut self,
        principal: impl Into<PrincipalId>,
        enrolled_password_handle: &[u8],
        provided_password: &[u8],
    ) -> Result<Vec<u8>, DeviceError> {
        let principal = principal.into();
        let request = Message::new(
            principal,
            VerifyRequestBody {
                password_handle: OpaqueBuffer::copy_of(enrolled_password_handle),
                provided_password: SecretBuffer::copy_of(provided_password),
            },
        );
        let reply = self.transport.verify(request.serialize())?;

        let mut response = VerifyResponse::deserialize(&reply)?;
        if response.error != ErrorCode::Ok {
            log::warn!(
                "verification rejected for principal {}",
                principal.into_raw()
            );
            return Err(DeviceError::Rejected);
        }
        Ok(response.body.verification_token.take_bytes())
    }
}
