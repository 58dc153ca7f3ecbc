//! VAPID key pair generation.
//!
//! Prints a fresh ES256 key pair in the base64url form the server expects
//! in `VAPID_PRIVATE_KEY` / `VAPID_PUBLIC_KEY`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use thiserror::Error;
use web_push::VapidSignatureBuilder;

/// Errors that can occur while generating keys.
#[derive(Debug, Error)]
pub enum VapidError {
    #[error("Key generation failed: {0}")]
    WebPush(#[from] web_push::WebPushError),
}

/// Generated VAPID key pair, both halves base64url without padding.
pub struct VapidKeys {
    pub private_key: String,
    pub public_key: String,
}

/// Generate an ES256 key pair for VAPID signing.
///
/// Random 32-byte scalars are not all valid P-256 private keys, so
/// candidates are drawn until the signature builder accepts one.
///
/// # Errors
///
/// Returns an error if the public key cannot be derived.
pub fn generate_keys() -> Result<VapidKeys, VapidError> {
    let mut key_bytes = [0u8; 32];
    let mut last_error = None;

    for _ in 0..128 {
        rand::rng().fill_bytes(&mut key_bytes);
        let private_key = URL_SAFE_NO_PAD.encode(key_bytes);

        match VapidSignatureBuilder::from_base64_no_sub(&private_key, web_push::URL_SAFE_NO_PAD) {
            Ok(builder) => {
                let public_key = URL_SAFE_NO_PAD.encode(builder.get_public_key());
                return Ok(VapidKeys {
                    private_key,
                    public_key,
                });
            }
            Err(error) => last_error = Some(error),
        }
    }

    // 128 consecutive invalid scalars means something other than bad luck.
    Err(VapidError::WebPush(
        last_error.unwrap_or(web_push::WebPushError::Unspecified),
    ))
}

/// Generate and print a VAPID key pair.
///
/// # Errors
///
/// Returns an error if key generation fails.
pub fn run() -> Result<(), VapidError> {
    let keys = generate_keys()?;

    #[allow(clippy::print_stdout)]
    {
        println!("VAPID_PRIVATE_KEY={}", keys.private_key);
        println!("VAPID_PUBLIC_KEY={}", keys.public_key);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_round_trip_through_the_builder() {
        let keys = generate_keys().expect("key generation");

        let builder =
            VapidSignatureBuilder::from_base64_no_sub(&keys.private_key, web_push::URL_SAFE_NO_PAD)
                .expect("generated private key parses");
        assert_eq!(
            URL_SAFE_NO_PAD.encode(builder.get_public_key()),
            keys.public_key
        );
    }
}
