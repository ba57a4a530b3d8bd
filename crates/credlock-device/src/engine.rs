// Author: Lukas Bower
// Purpose: Interface to the credential engine that derives handles and tokens.

//! Interface to the external credential engine.

use credlock_codec::{EnrollRequest, EnrollResponse, VerifyRequest, VerifyResponse};

/// Cryptographic engine that derives password handles and verification
/// tokens.
///
/// Implementations own the hashing algorithm, handle persistence, and any
/// throttling policy; the boundary layer only moves validated buffers in and
/// out. Engines report failure by returning an error reply, never by
/// panicking. Implementations are not required to be thread-safe; callers
/// serialize concurrent invocations.
pub trait CredentialEngine {
    /// Derive a password handle for the enrollment request.
    fn enroll(&mut self, request: &EnrollRequest) -> EnrollResponse;

    /// Check the provided password against the enrolled handle.
    fn verify(&mut self, request: &VerifyRequest) -> VerifyResponse;
}
