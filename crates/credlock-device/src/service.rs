// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Decode boundary requests, drive the engine, encode replies.
// Author: Lukas Bower

//! Verifier-side dispatch for serialized boundary requests.

use credlock_codec::{EnrollRequest, EnrollResponse, ErrorCode, VerifyRequest, VerifyResponse};

use crate::client::{DeviceError, Transport};
use crate::engine::CredentialEngine;

/// Serves serialized enroll/verify requests on the verifier side of the
/// boundary.
///
/// Malformed input is answered with a serialized four-byte `Invalid` reply;
/// no input crashes the service.
pub struct BoundaryService<E> {
    engine: E,
}

impl<E: CredentialEngine> BoundaryService<E> {
    /// Wrap the supplied engine.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Handle a serialized enrollment request, returning the serialized
    /// reply.
    pub fn handle_enroll(&mut self, wire: &[u8]) -> Vec<u8> {
        let request = match EnrollRequest::deserialize(wire) {
            Ok(request) if request.error == ErrorCode::Ok => request,
            Ok(request) => {
                log::warn!("enroll request arrived carrying status {:?}", request.error);
                return EnrollResponse::error_reply(ErrorCode::Invalid).serialize();
            }
            Err(err) => {
                log::warn!("malformed enroll request ({} bytes): {err}", wire.len());
                return EnrollResponse::error_reply(ErrorCode::Invalid).serialize();
            }
        };
        log::debug!(
            "enroll request for principal {}",
            request.principal.into_raw()
        );
        self.engine.enroll(&request).serialize()
    }

    /// Handle a serialized verification request, returning the serialized
    /// reply.
    pub fn handle_verify(&mut self, wire: &[u8]) -> Vec<u8> {
        let request = match VerifyRequest::deserialize(wire) {
            Ok(request) if request.error == ErrorCode::Ok => request,
            Ok(request) => {
                log::warn!("verify request arrived carrying status {:?}", request.error);
                return VerifyResponse::error_reply(ErrorCode::Invalid).serialize();
            }
            Err(err) => {
                log::warn!("malformed verify request ({} bytes): {err}", wire.len());
                return VerifyResponse::error_reply(ErrorCode::Invalid).serialize();
            }
        };
        log::debug!(
            "verify request for principal {}",
            request.principal.into_raw()
        );
        self.engine.verify(&request).serialize()
    }
}

/// In-process transport that dispatches straight into a [`BoundaryService`].
///
/// Used when both sides of the boundary live in the same address space, the
/// way a software-only verifier deploys.
pub struct LoopbackTransport<E> {
    service: BoundaryService<E>,
}

impl<E: CredentialEngine> LoopbackTransport<E> {
    /// Build a loopback transport around the supplied engine.
    pub fn new(engine: E) -> Self {
        Self {
            service: BoundaryService::new(engine),
        }
    }
}

impl<E: CredentialEngine> Transport for LoopbackTransport<E> {
    fn enroll(&mut self, request: Vec<u8>) -> Result<Vec<u8>, DeviceError> {
        Ok(self.service.handle_enroll(&request))
    }

    fn verify(&mut self, request: Vec<u8>) -> Result<Vec<u8>, DeviceError> {
        Ok(self.service.handle_verify(&request))
    }
}
