//! Authorization-code redemption at the token endpoint.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::keys::KeyManager;
use crate::params::PendingAuthorizationState;
use crate::storage::{AuthorizationCodeStore, SessionStore};
use crate::token::{self, RefreshTokenClaims, SessionTokenClaims};
use crate::types::Session;

/// Body of a `POST /token` request, accepted as JSON or form encoding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub grant_type: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub redirect_uri: String,
}

/// The minted token set.
///
/// `access_token` and `id_token` are currently the same signed token; the
/// claims cover both roles and relying parties in the wild read whichever
/// field their library prefers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub id_token: String,
    pub refresh_token: String,
}

/// Redeems an authorization code for a token set.
///
/// The code is consumed before any further checks, so a second redemption
/// attempt fails even when the first one errors later in the pipeline.
/// The audience comes from the pending state serialized into the code at
/// consent time, not from the request body.
pub async fn exchange_code(
    codes: &dyn AuthorizationCodeStore,
    sessions: &dyn SessionStore,
    keys: &KeyManager,
    config: &AuthConfig,
    request: &TokenRequest,
) -> Result<TokenResponse, AuthError> {
    let Some(code) = codes.remove(&request.code).await? else {
        return Err(AuthError::InvalidAuthorizationCode);
    };

    let now = OffsetDateTime::now_utc();
    if code.is_expired(now) {
        tracing::info!(user_id = %code.user_id, "rejected expired authorization code");
        return Err(AuthError::InvalidAuthorizationCode);
    }

    let pending = PendingAuthorizationState::from_query(&code.oidc_params)?;
    let key = keys.current_key(now).await?;

    let session = Session::new(&code.user_id);
    sessions.save(&session).await?;

    let ttl = config.exchange_token_ttl();
    let claims =
        SessionTokenClaims::for_session(&config.issuer, &pending.client_id, &session, now, ttl);
    let signed = token::sign(&key, &claims)?;

    let refresh_claims = RefreshTokenClaims::for_session(
        &config.issuer,
        &pending.client_id,
        &session,
        now + ttl,
        config.refresh_token_tail(),
    );
    let refresh_token = token::sign(&key, &refresh_claims)?;

    tracing::info!(
        user_id = %code.user_id,
        client_id = %pending.client_id,
        sid = %session.session_id,
        "redeemed authorization code"
    );

    Ok(TokenResponse {
        access_token: signed.clone(),
        token_type: "Bearer".to_string(),
        expires_in: ttl.whole_seconds(),
        id_token: signed,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::AuthResult;
    use crate::keys::SigningKey;
    use crate::storage::KeyStore;
    use crate::types::AuthorizationCode;

    #[derive(Default)]
    struct MapCodeStore {
        codes: Mutex<HashMap<String, AuthorizationCode>>,
    }

    #[async_trait]
    impl AuthorizationCodeStore for MapCodeStore {
        async fn save(&self, code: &AuthorizationCode) -> AuthResult<()> {
            self.codes.lock().unwrap().insert(code.code.clone(), code.clone());
            Ok(())
        }

        async fn get(&self, code: &str) -> AuthResult<Option<AuthorizationCode>> {
            Ok(self.codes.lock().unwrap().get(code).cloned())
        }

        async fn remove(&self, code: &str) -> AuthResult<Option<AuthorizationCode>> {
            Ok(self.codes.lock().unwrap().remove(code))
        }
    }

    #[derive(Default)]
    struct MapSessionStore {
        sessions: Mutex<HashMap<(String, String), Session>>,
    }

    #[async_trait]
    impl SessionStore for MapSessionStore {
        async fn save(&self, session: &Session) -> AuthResult<()> {
            self.sessions.lock().unwrap().insert(
                (session.session_id.clone(), session.user_id.clone()),
                session.clone(),
            );
            Ok(())
        }

        async fn load(&self, session_id: &str, user_id: &str) -> AuthResult<Option<Session>> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .get(&(session_id.to_string(), user_id.to_string()))
                .cloned())
        }

        async fn list_for_user(&self, user_id: &str) -> AuthResult<Vec<Session>> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct VecKeyStore {
        keys: Mutex<Vec<SigningKey>>,
    }

    #[async_trait]
    impl KeyStore for VecKeyStore {
        async fn list_kids(&self) -> AuthResult<Vec<String>> {
            Ok(self.keys.lock().unwrap().iter().map(|k| k.kid.clone()).collect())
        }

        async fn get(&self, kid: &str) -> AuthResult<Option<SigningKey>> {
            Ok(self.keys.lock().unwrap().iter().find(|k| k.kid == kid).cloned())
        }

        async fn save(&self, key: &SigningKey) -> AuthResult<()> {
            self.keys.lock().unwrap().push(key.clone());
            Ok(())
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig::default()
    }

    // Seeds a pre-generated 2048-bit key so tests never pay for RSA
    // key generation.
    async fn key_manager(config: &AuthConfig) -> KeyManager {
        let now = OffsetDateTime::now_utc();
        let store = VecKeyStore::default();
        store
            .save(&SigningKey {
                kid: "fixture".to_string(),
                kty: "RSA".to_string(),
                private_pem: include_str!("../../tests/fixtures/rsa2048_a.pem").to_string(),
                not_before: now - time::Duration::hours(1),
                expiry: now + time::Duration::days(30),
            })
            .await
            .unwrap();
        KeyManager::new(Arc::new(store), config)
    }

    fn pending_query() -> String {
        PendingAuthorizationState {
            response_type: "code".into(),
            client_id: "my-app".into(),
            scope: "openid".into(),
            redirect_uri: "https://app.example.com/callback".into(),
            state: String::new(),
            nonce: String::new(),
        }
        .to_query()
        .unwrap()
    }

    #[tokio::test]
    async fn test_exchange_mints_token_set() {
        let config = test_config();
        let codes = MapCodeStore::default();
        let sessions = MapSessionStore::default();
        let keys = key_manager(&config).await;

        let code = AuthorizationCode::new("alice", pending_query());
        codes.save(&code).await.unwrap();

        let request = TokenRequest {
            code: code.code.clone(),
            grant_type: "authorization_code".into(),
            client_id: "my-app".into(),
            redirect_uri: "https://app.example.com/callback".into(),
        };
        let response = exchange_code(&codes, &sessions, &keys, &config, &request)
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 3 * 3600);
        assert_eq!(response.access_token, response.id_token);

        let kid = token::peek_kid(&response.id_token).unwrap();
        let key = keys.get(&kid).await.unwrap().unwrap();
        let claims: SessionTokenClaims = token::verify(&key, &response.id_token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.aud, "my-app");
        assert_eq!(claims.iss, config.issuer);

        let refresh: RefreshTokenClaims = token::verify(&key, &response.refresh_token).unwrap();
        assert_eq!(refresh.sid, claims.sid);

        // the session backing the sid was persisted
        let session = sessions.load(&claims.sid, "alice").await.unwrap().unwrap();
        assert_eq!(session.refresh_code, refresh.refresh_code);
    }

    #[tokio::test]
    async fn test_codes_are_single_use() {
        let config = test_config();
        let codes = MapCodeStore::default();
        let sessions = MapSessionStore::default();
        let keys = key_manager(&config).await;

        let code = AuthorizationCode::new("alice", pending_query());
        codes.save(&code).await.unwrap();
        let request = TokenRequest {
            code: code.code.clone(),
            ..TokenRequest::default()
        };

        exchange_code(&codes, &sessions, &keys, &config, &request)
            .await
            .unwrap();
        let err = exchange_code(&codes, &sessions, &keys, &config, &request)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidAuthorizationCode));
    }

    #[tokio::test]
    async fn test_concurrent_redemptions_mint_one_token_set() {
        let config = Arc::new(test_config());
        let codes = Arc::new(MapCodeStore::default());
        let sessions = Arc::new(MapSessionStore::default());
        let keys = Arc::new(key_manager(&config).await);

        let code = AuthorizationCode::new("alice", pending_query());
        codes.save(&code).await.unwrap();
        let request = TokenRequest {
            code: code.code.clone(),
            ..TokenRequest::default()
        };

        let mut tasks = Vec::new();
        for _ in 0..2 {
            let (config, codes, sessions, keys) = (
                Arc::clone(&config),
                Arc::clone(&codes),
                Arc::clone(&sessions),
                Arc::clone(&keys),
            );
            let request = request.clone();
            tasks.push(tokio::spawn(async move {
                exchange_code(&*codes, &*sessions, &keys, &config, &request).await
            }));
        }

        let mut minted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                minted += 1;
            }
        }
        assert_eq!(minted, 1);
    }

    #[tokio::test]
    async fn test_unknown_code_rejected() {
        let config = test_config();
        let codes = MapCodeStore::default();
        let sessions = MapSessionStore::default();
        let keys = key_manager(&config).await;

        let request = TokenRequest {
            code: "no-such-code".into(),
            ..TokenRequest::default()
        };
        let err = exchange_code(&codes, &sessions, &keys, &config, &request)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidAuthorizationCode));
    }

    #[tokio::test]
    async fn test_expired_code_rejected_and_consumed() {
        let config = test_config();
        let codes = MapCodeStore::default();
        let sessions = MapSessionStore::default();
        let keys = key_manager(&config).await;

        let mut code = AuthorizationCode::new("alice", pending_query());
        code.expiry = Some(OffsetDateTime::now_utc() - time::Duration::minutes(1));
        codes.save(&code).await.unwrap();

        let request = TokenRequest {
            code: code.code.clone(),
            ..TokenRequest::default()
        };
        let err = exchange_code(&codes, &sessions, &keys, &config, &request)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidAuthorizationCode));
        assert!(codes.get(&code.code).await.unwrap().is_none());
    }
}
