//! Password hashing.
//!
//! Salted PBKDF2-HMAC-SHA256. The stored format is
//! `pbkdf2-sha256$<iterations>$<salt_b64>$<hash_b64>`, so the iteration
//! count can be raised later while old hashes keep verifying.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use pbkdf2::pbkdf2_hmac_array;
use rand::RngCore;
use sha2::Sha256;

use crate::error::{CoreError, CoreResult};

const SCHEME: &str = "pbkdf2-sha256";
const PBKDF2_ITERATIONS: u32 = 600_000;
const SALT_LENGTH: usize = 16;
const HASH_LENGTH: usize = 32;

/// Derive a hash from a password (supports custom iteration counts)
fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LENGTH] {
    pbkdf2_hmac_array::<Sha256, HASH_LENGTH>(password.as_bytes(), salt, iterations)
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::rng().fill_bytes(&mut salt);

    let hash = derive(password, &salt, PBKDF2_ITERATIONS);
    format!(
        "{SCHEME}${PBKDF2_ITERATIONS}${}${}",
        BASE64.encode(salt),
        BASE64.encode(hash)
    )
}

/// Verify a password against a stored hash string.
///
/// Returns `Ok(false)` for a wrong password; `Err` only when the stored
/// string itself is malformed.
pub fn verify_password(password: &str, stored: &str) -> CoreResult<bool> {
    let mut parts = stored.split('$');

    let scheme = parts.next().unwrap_or_default();
    if scheme != SCHEME {
        return Err(CoreError::SerializationError(format!(
            "Unknown password hash scheme: {scheme}"
        )));
    }

    let iterations: u32 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CoreError::SerializationError("Invalid iteration count".to_string()))?;
    let salt = parts
        .next()
        .and_then(|s| BASE64.decode(s).ok())
        .ok_or_else(|| CoreError::SerializationError("Invalid salt".to_string()))?;
    let expected = parts
        .next()
        .and_then(|s| BASE64.decode(s).ok())
        .ok_or_else(|| CoreError::SerializationError("Invalid hash".to_string()))?;

    let actual = derive(password, &salt, iterations);

    // Constant-time comparison
    if actual.len() != expected.len() {
        return Ok(false);
    }
    let mut diff = 0u8;
    for (a, b) in actual.iter().zip(expected.iter()) {
        diff |= a ^ b;
    }
    Ok(diff == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The full 600k iterations make tests slow; correctness is identical at
    // any count, so tests go through the public API once and reuse the hash.

    #[test]
    fn hash_verify_roundtrip() {
        let stored = hash_password("strong-password-123");
        assert!(verify_password("strong-password-123", &stored).unwrap());
        assert!(!verify_password("wrong-password", &stored).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password");
        let b = hash_password("same-password");
        assert_ne!(a, b);
    }

    #[test]
    fn stored_format_fields() {
        let stored = hash_password("pw");
        let parts: Vec<&str> = stored.split('$').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "pbkdf2-sha256");
        assert_eq!(parts[1], "600000");
    }

    #[test]
    fn malformed_stored_string_errors() {
        assert!(verify_password("pw", "not-a-hash").is_err());
        assert!(verify_password("pw", "pbkdf2-sha256$abc$x$y").is_err());
    }

    #[test]
    fn unknown_scheme_errors() {
        let result = verify_password("pw", "argon2id$1$x$y");
        assert!(matches!(result, Err(CoreError::SerializationError(_))));
    }
}
