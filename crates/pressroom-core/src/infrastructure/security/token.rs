//! Ed25519-signed token generation
//!
//! Tokens are `base64url(payload).base64url(signature)` where the
//! payload is the JSON-serialized claims and the signature is a
//! detached Ed25519 signature over the payload bytes.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::application::ports::{TokenClaims, TokenGenerator};
use crate::error::{Error, Result};

/// Size of Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Size of Ed25519 private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Ed25519 implementation of the token signing port
pub struct Ed25519TokenGenerator {
    signing_key: SigningKey,
}

impl Ed25519TokenGenerator {
    /// Generate a new random signing key pair
    pub fn generate() -> Self {
        let mut secret_bytes = [0u8; PRIVATE_KEY_SIZE];
        OsRng.fill_bytes(&mut secret_bytes);
        let signing_key = SigningKey::from_bytes(&secret_bytes);
        Self { signing_key }
    }

    /// Create a generator from raw private key bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(Error::Crypto(format!(
                "invalid key length: expected {}, got {}",
                PRIVATE_KEY_SIZE,
                bytes.len()
            )));
        }

        let mut key_bytes = [0u8; PRIVATE_KEY_SIZE];
        key_bytes.copy_from_slice(bytes);
        Ok(Self {
            signing_key: SigningKey::from_bytes(&key_bytes),
        })
    }

    /// Export the private key bytes (use carefully!)
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.signing_key.to_bytes()
    }

    /// Verify a token and decode its claims
    pub fn decode(&self, token: &str) -> Result<TokenClaims> {
        let (payload_b64, signature_b64) = token
            .split_once('.')
            .ok_or_else(|| Error::Crypto("malformed token".into()))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|e| Error::Crypto(format!("malformed token payload: {e}")))?;
        let signature_bytes = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|e| Error::Crypto(format!("malformed token signature: {e}")))?;

        if signature_bytes.len() != SIGNATURE_SIZE {
            return Err(Error::Crypto(format!(
                "invalid signature length: expected {}, got {}",
                SIGNATURE_SIZE,
                signature_bytes.len()
            )));
        }
        let sig_bytes: [u8; SIGNATURE_SIZE] = signature_bytes
            .try_into()
            .map_err(|_| Error::Crypto("invalid signature length".into()))?;
        let signature = Signature::from_bytes(&sig_bytes);

        self.signing_key
            .verifying_key()
            .verify(&payload, &signature)
            .map_err(|_| Error::Crypto("token verification failed".into()))?;

        serde_json::from_slice(&payload)
            .map_err(|e| Error::Crypto(format!("malformed token claims: {e}")))
    }
}

impl TokenGenerator for Ed25519TokenGenerator {
    fn generate(&self, claims: &TokenClaims) -> Result<String> {
        let payload =
            serde_json::to_vec(claims).map_err(|e| Error::Crypto(e.to_string()))?;
        let signature = self.signing_key.sign(&payload);

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature.to_bytes())
        ))
    }
}
