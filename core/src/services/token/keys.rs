//! Signing key material and JWKS publication.
//!
//! The key pair is provisioned out-of-band before the service starts
//! (`scripts/generate_keys.sh`). The private key signs outbound access
//! tokens; the JWKS document carries every currently trusted public key,
//! each tagged with its key identifier, so verifiers keep validating old
//! tokens during a rotation window.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::EncodingKey;

use crate::errors::{DomainError, TokenError};

use super::key_store::KeySource;

/// Holder of the current signing key and the distributable public key set
#[derive(Clone)]
pub struct KeyProvider {
    encoding_key: EncodingKey,
    kid: String,
    jwk_set: JwkSet,
}

impl std::fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyProvider")
            .field("kid", &self.kid)
            .field("published_keys", &self.jwk_set.keys.len())
            .finish()
    }
}

impl KeyProvider {
    /// Loads key material from disk at startup
    ///
    /// Any failure here is a provisioning error and must abort startup;
    /// signing cannot proceed without the private key, and verification
    /// cannot proceed without a published key set containing `kid`.
    pub fn from_files<P: AsRef<Path>>(
        private_key_path: P,
        jwks_path: P,
        kid: &str,
    ) -> Result<Self, DomainError> {
        let private_pem = fs::read(private_key_path.as_ref()).map_err(|e| {
            TokenError::KeyMaterial {
                message: format!(
                    "failed to read private key {}: {}",
                    private_key_path.as_ref().display(),
                    e
                ),
            }
        })?;

        let jwks_json = fs::read_to_string(jwks_path.as_ref()).map_err(|e| {
            TokenError::KeyMaterial {
                message: format!(
                    "failed to read JWKS document {}: {}",
                    jwks_path.as_ref().display(),
                    e
                ),
            }
        })?;

        Self::from_pem_and_jwks(&private_pem, &jwks_json, kid)
    }

    /// Builds a provider from in-memory key material (used by tests)
    pub fn from_pem_and_jwks(
        private_pem: &[u8],
        jwks_json: &str,
        kid: &str,
    ) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem).map_err(|e| {
            TokenError::KeyMaterial {
                message: format!("invalid RSA private key: {}", e),
            }
        })?;

        let jwk_set: JwkSet = serde_json::from_str(jwks_json).map_err(|e| {
            TokenError::KeyMaterial {
                message: format!("invalid JWKS document: {}", e),
            }
        })?;

        // The signing key must be discoverable by verifiers
        if jwk_set.find(kid).is_none() {
            return Err(TokenError::KeyMaterial {
                message: format!("JWKS document does not contain signing key id {}", kid),
            }
            .into());
        }

        Ok(Self {
            encoding_key,
            kid: kid.to_string(),
            jwk_set,
        })
    }

    /// Current private key for outbound signing
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Key identifier embedded in token headers
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// All currently trusted public keys
    pub fn jwk_set(&self) -> &JwkSet {
        &self.jwk_set
    }
}

#[async_trait]
impl KeySource for KeyProvider {
    async fn fetch_keys(&self) -> Result<JwkSet, DomainError> {
        Ok(self.jwk_set.clone())
    }
}
