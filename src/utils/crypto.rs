use ring::digest::{Context, SHA256};
use ring::rand::SystemRandom;
use ring::signature::{EcdsaKeyPair, ECDSA_P256_SHA256_FIXED, ECDSA_P256_SHA256_FIXED_SIGNING};

use crate::error::{LedgerError, Result};

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

pub fn new_key_pair() -> Result<Vec<u8>> {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &rng)
        .map_err(|e| LedgerError::Crypto(format!("Failed to generate ECDSA key pair: {e}")))?
        .as_ref()
        .to_vec();
    Ok(pkcs8)
}

pub fn ecdsa_p256_sha256_sign_digest(pkcs8: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let rng = SystemRandom::new();
    let key_pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8, &rng)
        .map_err(|e| LedgerError::Crypto(format!("Failed to create key pair from PKCS8: {e}")))?;
    let signature = key_pair
        .sign(&rng, message)
        .map_err(|e| LedgerError::Crypto(format!("Failed to sign message: {e}")))?
        .as_ref()
        .to_vec();
    Ok(signature)
}

/// Pure check: true iff `signature` over `message` verifies under `public_key`.
/// Malformed keys or signatures simply fail verification.
pub fn ecdsa_p256_sha256_sign_verify(public_key: &[u8], signature: &[u8], message: &[u8]) -> bool {
    let peer_public_key =
        ring::signature::UnparsedPublicKey::new(&ECDSA_P256_SHA256_FIXED, public_key);
    peer_public_key.verify(message, signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring::signature::KeyPair;

    fn public_key_of(pkcs8: &[u8]) -> Vec<u8> {
        let rng = SystemRandom::new();
        EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8, &rng)
            .unwrap()
            .public_key()
            .as_ref()
            .to_vec()
    }

    #[test]
    fn test_sha256_known_vector() {
        let digest = sha256_digest(b"hello world");
        assert_eq!(
            data_encoding::HEXLOWER.encode(&digest),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let pkcs8 = new_key_pair().unwrap();
        let public_key = public_key_of(&pkcs8);
        let signature = ecdsa_p256_sha256_sign_digest(&pkcs8, b"spend output 0").unwrap();

        assert!(ecdsa_p256_sha256_sign_verify(
            &public_key,
            &signature,
            b"spend output 0"
        ));
        assert!(!ecdsa_p256_sha256_sign_verify(
            &public_key,
            &signature,
            b"spend output 1"
        ));
    }

    #[test]
    fn test_verify_rejects_other_key_and_garbage() {
        let signer = new_key_pair().unwrap();
        let other = public_key_of(&new_key_pair().unwrap());
        let signature = ecdsa_p256_sha256_sign_digest(&signer, b"message").unwrap();

        assert!(!ecdsa_p256_sha256_sign_verify(&other, &signature, b"message"));
        assert!(!ecdsa_p256_sha256_sign_verify(&[], &signature, b"message"));
        assert!(!ecdsa_p256_sha256_sign_verify(&other, &[0u8; 3], b"message"));
    }

    #[test]
    fn test_sign_with_invalid_pkcs8_fails() {
        let result = ecdsa_p256_sha256_sign_digest(b"not a key", b"message");
        assert!(matches!(result, Err(LedgerError::Crypto(_))));
    }
}
