// Author: Lukas Bower
#![forbid(unsafe_code)]

//! Fuzz-style regression tests: no byte sequence may panic the decoders or
//! make them read outside the supplied input.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use credlock_codec::{
    EnrollRequest, EnrollRequestBody, EnrollResponse, EnrollResponseBody, ErrorCode, Message,
    MessageBody, OpaqueBuffer, SecretBuffer, VerifyRequest, VerifyRequestBody, VerifyResponse,
    VerifyResponseBody,
};

fn iterations() -> usize {
    std::env::var("CREDLOCK_FUZZ_ITERS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(512)
}

#[test]
fn fuzz_decode_mutated_frames() {
    let mut rng = StdRng::seed_from_u64(0xC0DEC0DE_u64);
    for _ in 0..iterations() {
        fuzz_variant(&mut rng, random_enroll_request);
        fuzz_variant(&mut rng, random_enroll_response);
        fuzz_variant(&mut rng, random_verify_request);
        fuzz_variant(&mut rng, random_verify_response);
    }
}

#[test]
fn fuzz_decode_random_garbage() {
    let mut rng = StdRng::seed_from_u64(0xBADC0FFE_u64);
    for _ in 0..iterations() {
        let mut garbage = vec![0u8; rng.gen_range(0..256)];
        rng.fill_bytes(&mut garbage);
        assert_no_panic::<EnrollRequestBody>(&garbage);
        assert_no_panic::<EnrollResponseBody>(&garbage);
        assert_no_panic::<VerifyRequestBody>(&garbage);
        assert_no_panic::<VerifyResponseBody>(&garbage);
    }
}

#[test]
fn fuzz_decode_every_suffix_of_a_valid_frame() {
    let mut rng = StdRng::seed_from_u64(0x5EED_u64);
    let frame = random_enroll_request(&mut rng).serialize();
    for start in 0..=frame.len() {
        assert_no_panic::<EnrollRequestBody>(&frame[start..]);
        assert_no_panic::<EnrollResponseBody>(&frame[start..]);
        assert_no_panic::<VerifyRequestBody>(&frame[start..]);
        assert_no_panic::<VerifyResponseBody>(&frame[start..]);
    }
}

#[test]
fn fuzz_single_byte_corruption_stays_in_bounds() {
    let mut rng = StdRng::seed_from_u64(0xFACE_u64);
    for _ in 0..iterations() {
        let mut frame = random_verify_request(&mut rng).serialize();
        let offset = rng.gen_range(0..frame.len());
        frame[offset] = rng.gen();
        // Either a clean decode with self-consistent lengths or an error;
        // never a panic or an out-of-bounds read.
        if let Ok(decoded) =
            catch_unwind(AssertUnwindSafe(|| VerifyRequest::deserialize(&frame)))
                .expect("decoder panicked on corrupted frame")
        {
            if decoded.error == ErrorCode::Ok {
                let fields = decoded.body.password_handle.len()
                    + decoded.body.provided_password.len();
                assert!(8 + 8 + fields <= frame.len());
            }
        }
    }
}

fn fuzz_variant<B: MessageBody>(
    rng: &mut StdRng,
    random_message: impl Fn(&mut StdRng) -> Message<B>,
) {
    let mut frame = random_message(rng).serialize();
    mutate_frame(rng, &mut frame);
    assert_no_panic::<B>(&frame);
}

fn assert_no_panic<B: MessageBody>(bytes: &[u8]) {
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = Message::<B>::deserialize(bytes);
    }));
    assert!(result.is_ok(), "decoder panicked on {} bytes", bytes.len());
}

fn mutate_frame<R: Rng>(rng: &mut R, frame: &mut Vec<u8>) {
    match rng.gen_range(0..4) {
        0 => {
            // Rewrite a length or status word with an arbitrary value.
            if frame.len() >= 4 {
                let offset = rng.gen_range(0..=frame.len() - 4);
                let word: u32 = rng.gen();
                frame[offset..offset + 4].copy_from_slice(&word.to_le_bytes());
            }
        }
        1 => {
            let new_len = rng.gen_range(0..=frame.len());
            frame.truncate(new_len);
        }
        2 => {
            let tail_len = rng.gen_range(1..32);
            let mut tail = vec![0u8; tail_len];
            rng.fill_bytes(&mut tail);
            frame.extend_from_slice(&tail);
        }
        _ => {
            if !frame.is_empty() {
                let offset = rng.gen_range(0..frame.len());
                frame[offset] ^= rng.gen_range(1..=0xFF);
            }
        }
    }
}

fn random_bytes<R: Rng>(rng: &mut R, max_len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; rng.gen_range(0..=max_len)];
    rng.fill_bytes(&mut bytes);
    bytes
}

fn random_enroll_request(rng: &mut StdRng) -> EnrollRequest {
    let reenroll = rng.gen_bool(0.5);
    EnrollRequest::new(
        rng.gen::<u32>(),
        EnrollRequestBody {
            provided_password: SecretBuffer::new(random_bytes(rng, 128)),
            current_password_handle: if reenroll {
                OpaqueBuffer::new(random_bytes(rng, 64))
            } else {
                OpaqueBuffer::default()
            },
            current_password: if reenroll {
                SecretBuffer::new(random_bytes(rng, 64))
            } else {
                SecretBuffer::default()
            },
        },
    )
}

fn random_enroll_response(rng: &mut StdRng) -> EnrollResponse {
    EnrollResponse::new(
        rng.gen::<u32>(),
        EnrollResponseBody {
            enrolled_password_handle: OpaqueBuffer::new(random_bytes(rng, 128)),
        },
    )
}

fn random_verify_request(rng: &mut StdRng) -> VerifyRequest {
    VerifyRequest::new(
        rng.gen::<u32>(),
        VerifyRequestBody {
            password_handle: OpaqueBuffer::new(random_bytes(rng, 128)),
            provided_password: SecretBuffer::new(random_bytes(rng, 128)),
        },
    )
}

fn random_verify_response(rng: &mut StdRng) -> VerifyResponse {
    VerifyResponse::new(
        rng.gen::<u32>(),
        VerifyResponseBody {
            verification_token: OpaqueBuffer::new(random_bytes(rng, 128)),
        },
    )
}
