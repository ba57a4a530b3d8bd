// Author: Lukas Bower
// Purpose: Owned byte buffers for wire fields, with wiping for secret material.

//! Owned buffers carried by Credlock messages.
//!
//! [`OpaqueBuffer`] holds derived artifacts (password handles, verification
//! tokens). [`SecretBuffer`] holds raw secret material and zeroes its storage
//! before release, both on drop and on explicit wipe. Neither type implements
//! `Clone`: copying a buffer is always a deliberate `copy_of` call, never an
//! implicit one.
//!
//! An empty buffer is the representation of an absent optional field. It owns
//! no backing storage and round-trips through the codec as a zero-length
//! field.

use core::fmt;
use core::mem;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Owned bytes for a derived artifact such as a password handle or token.
///
/// Empty means the field is absent.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OpaqueBuffer {
    data: Vec<u8>,
}

impl OpaqueBuffer {
    /// Take ownership of the supplied bytes.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Copy the supplied bytes into a fresh buffer.
    #[must_use]
    pub fn copy_of(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
        }
    }

    /// Length of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Transfer the backing storage out, leaving the buffer empty.
    ///
    /// The caller owns the returned bytes and is responsible for their
    /// eventual release.
    #[must_use]
    pub fn take_bytes(&mut self) -> Vec<u8> {
        mem::take(&mut self.data)
    }
}

impl From<Vec<u8>> for OpaqueBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

/// Owned bytes holding raw secret material such as a plaintext password.
///
/// Storage is overwritten with zeros before release: on drop, and on
/// [`Zeroize::zeroize`]. Transferring the bytes out with
/// [`SecretBuffer::take_bytes`] moves the wiping obligation to the caller.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretBuffer {
    data: Vec<u8>,
}

impl SecretBuffer {
    /// Take ownership of the supplied bytes.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Copy the supplied bytes into a fresh buffer.
    ///
    /// The source bytes remain the caller's responsibility.
    #[must_use]
    pub fn copy_of(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
        }
    }

    /// Length of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Transfer the backing storage out, leaving the buffer empty.
    ///
    /// The returned bytes are not wiped; the caller takes over the secret
    /// lifecycle along with ownership.
    #[must_use]
    pub fn take_bytes(&mut self) -> Vec<u8> {
        mem::take(&mut self.data)
    }
}

// Secret contents stay out of logs and panic messages.
impl fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("len", &self.data.len())
            .finish()
    }
}
