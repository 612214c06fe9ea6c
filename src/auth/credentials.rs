//! Credential codec
//!
//! Derives salted, iterated password digests and verifies plaintext
//! candidates against them. The digest format is self-describing:
//!
//! ```text
//! base64(salt):iterations:key_size:base64(derived_key)
//! ```
//!
//! Verification re-derives from the parameters embedded in the digest, so
//! records written under older parameter choices keep verifying after the
//! configured defaults change.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::CredentialError;

/// Number of colon-delimited fields in a well-formed digest.
const DIGEST_FIELDS: usize = 4;

/// Tunable parameters for digest derivation.
///
/// These only affect newly derived digests; stored digests carry their own
/// parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialParams {
    /// Random salt length in bytes.
    pub salt_size: usize,
    /// PBKDF2 rounds. Intentionally slow; runs on the connection's own task.
    pub iterations: u32,
    /// Derived key length in bytes.
    pub key_size: usize,
}

impl Default for CredentialParams {
    fn default() -> Self {
        Self {
            salt_size: 16,
            iterations: 10_000,
            key_size: 16,
        }
    }
}

/// Derives a digest for `plain_password` with a fresh random salt.
pub fn derive(plain_password: &str, params: &CredentialParams) -> String {
    let mut salt = vec![0u8; params.salt_size];
    OsRng.fill_bytes(&mut salt);

    let mut key = vec![0u8; params.key_size];
    pbkdf2_hmac::<Sha256>(
        plain_password.as_bytes(),
        &salt,
        params.iterations,
        &mut key,
    );

    format!(
        "{}:{}:{}:{}",
        BASE64.encode(&salt),
        params.iterations,
        params.key_size,
        BASE64.encode(&key)
    )
}

/// Verifies `plain_password` against a stored digest.
///
/// Returns `Ok(false)` for a wrong password and `Err(Malformed)` for a
/// digest that cannot be parsed; the two must stay distinguishable so
/// callers can report corrupt records instead of blaming the user.
pub fn verify(digest: &str, plain_password: &str) -> Result<bool, CredentialError> {
    let fields: Vec<&str> = digest.split(':').collect();
    if fields.len() != DIGEST_FIELDS {
        return Err(CredentialError::Malformed(format!(
            "expected {} fields, found {}",
            DIGEST_FIELDS,
            fields.len()
        )));
    }

    let salt = BASE64
        .decode(fields[0])
        .map_err(|e| CredentialError::Malformed(format!("invalid salt encoding: {}", e)))?;

    let iterations: u32 = fields[1]
        .parse()
        .map_err(|_| CredentialError::Malformed(format!("invalid iteration count: {}", fields[1])))?;
    if iterations == 0 {
        return Err(CredentialError::Malformed("iteration count is zero".into()));
    }

    let key_size: usize = fields[2]
        .parse()
        .map_err(|_| CredentialError::Malformed(format!("invalid key size: {}", fields[2])))?;
    if key_size == 0 {
        return Err(CredentialError::Malformed("key size is zero".into()));
    }

    let stored_key = BASE64
        .decode(fields[3])
        .map_err(|e| CredentialError::Malformed(format!("invalid key encoding: {}", e)))?;
    if stored_key.len() != key_size {
        return Err(CredentialError::Malformed(format!(
            "key length {} does not match declared size {}",
            stored_key.len(),
            key_size
        )));
    }

    let mut candidate = vec![0u8; key_size];
    pbkdf2_hmac::<Sha256>(plain_password.as_bytes(), &salt, iterations, &mut candidate);

    // Constant-time comparison; lengths are equal by the check above.
    Ok(candidate.ct_eq(&stored_key).into())
}
