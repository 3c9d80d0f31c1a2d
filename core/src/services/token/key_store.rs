//! Verifier-side public key lookup with caching and fetch rate limiting.
//!
//! Access token verification resolves a decoding key by the `kid` in the
//! token header. Resolved keys are cached for a bounded TTL, and refreshes
//! of the underlying key set are rate limited so a burst of tokens with
//! unknown key identifiers cannot amplify into unbounded fetches.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::entities::token::AccessClaims;
use crate::errors::{DomainError, TokenError};

/// Source of the trusted public key set
///
/// [`super::KeyProvider`] implements this for in-process wiring; a remote
/// JWKS fetcher can implement it equally without the store noticing.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Returns the full trusted key set
    async fn fetch_keys(&self) -> Result<JwkSet, DomainError>;
}

/// Tuning knobs for [`CachedKeyStore`]
#[derive(Debug, Clone)]
pub struct KeyStoreConfig {
    /// How long a resolved key stays cached
    pub cache_ttl: Duration,
    /// Length of the fetch rate-limit window
    pub rate_limit_window: Duration,
    /// Maximum key set fetches per window
    pub max_fetches_per_window: u32,
}

impl Default for KeyStoreConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(600),
            rate_limit_window: Duration::from_secs(60),
            max_fetches_per_window: 10,
        }
    }
}

struct CachedKey {
    key: DecodingKey,
    inserted_at: Instant,
}

struct CacheState {
    keys: HashMap<String, CachedKey>,
    window_start: Instant,
    fetches_in_window: u32,
}

/// Caching, rate-limited resolver of decoding keys by key identifier
pub struct CachedKeyStore {
    source: Arc<dyn KeySource>,
    config: KeyStoreConfig,
    state: RwLock<CacheState>,
}

impl CachedKeyStore {
    /// Creates a store over a key source with default tuning
    pub fn new(source: Arc<dyn KeySource>) -> Self {
        Self::with_config(source, KeyStoreConfig::default())
    }

    /// Creates a store with explicit tuning
    pub fn with_config(source: Arc<dyn KeySource>, config: KeyStoreConfig) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(CacheState {
                keys: HashMap::new(),
                window_start: Instant::now(),
                fetches_in_window: 0,
            }),
        }
    }

    /// Resolves the decoding key for a key identifier
    ///
    /// Serves from cache when fresh; otherwise refreshes the key set from
    /// the source, subject to the fetch rate limit. An identifier absent
    /// from the refreshed set is an invalid token, not a server fault.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, DomainError> {
        {
            let state = self.state.read().await;
            if let Some(cached) = state.keys.get(kid) {
                if cached.inserted_at.elapsed() < self.config.cache_ttl {
                    return Ok(cached.key.clone());
                }
            }
        }

        let mut state = self.state.write().await;

        // Another task may have refreshed while we waited for the lock
        if let Some(cached) = state.keys.get(kid) {
            if cached.inserted_at.elapsed() < self.config.cache_ttl {
                return Ok(cached.key.clone());
            }
        }

        if state.window_start.elapsed() >= self.config.rate_limit_window {
            state.window_start = Instant::now();
            state.fetches_in_window = 0;
        }

        if state.fetches_in_window >= self.config.max_fetches_per_window {
            warn!(kid, "key fetch rate limit reached, rejecting lookup");
            return Err(TokenError::Invalid.into());
        }

        state.fetches_in_window += 1;
        let jwk_set = self.source.fetch_keys().await?;
        debug!(keys = jwk_set.keys.len(), "refreshed trusted key set");

        let now = Instant::now();
        state.keys.clear();
        for jwk in &jwk_set.keys {
            let Some(key_id) = jwk.common.key_id.clone() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    state.keys.insert(
                        key_id,
                        CachedKey {
                            key,
                            inserted_at: now,
                        },
                    );
                }
                Err(e) => warn!(kid = %key_id, "skipping unusable JWK: {}", e),
            }
        }

        state
            .keys
            .get(kid)
            .map(|cached| cached.key.clone())
            .ok_or_else(|| TokenError::Invalid.into())
    }

    /// Verifies an RS256 access token end to end
    ///
    /// Reads the `kid` from the JOSE header, resolves the matching public
    /// key, and validates signature, expiry, and issuer. Fully stateless
    /// with respect to the token store.
    pub async fn verify_access_token(
        &self,
        token: &str,
        issuer: &str,
    ) -> Result<AccessClaims, DomainError> {
        let header = decode_header(token).map_err(|_| TokenError::Invalid)?;
        if header.alg != Algorithm::RS256 {
            return Err(TokenError::Invalid.into());
        }
        let kid = header.kid.ok_or(TokenError::Invalid)?;

        let key = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let token_data = decode::<AccessClaims>(token, &key, &validation).map_err(|e| {
            if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                TokenError::Expired
            } else {
                TokenError::Invalid
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for CachedKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedKeyStore")
            .field("config", &self.config)
            .finish()
    }
}
