//! HTTP client for the hosted row store.
//!
//! Handles JWT authentication, token refresh on 401, and the row-level
//! CRUD endpoints. Uses reqwest with JSON serialization.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::session::{Identity, Session};
use crate::store::{RemoteStore, SelectQuery, Table};
use async_trait::async_trait;
use chainsensor_types::UserId;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// State shared across client clones.
struct AuthState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    /// Monotonically increasing counter bumped on every successful refresh.
    /// Used to detect when a concurrent refresh has already updated tokens.
    refresh_generation: u64,
}

/// HTTP client for the ChainSensor hosted store.
///
/// Auth endpoints live under `/auth/v1`, row endpoints under `/rest/v1`.
/// Row reads use `{column}=eq.{value}` equality filters plus `order` and
/// `limit` query parameters.
pub struct RestClient {
    client: Client,
    config: StoreConfig,
    session: Session,
    auth: Arc<RwLock<AuthState>>,
    /// Serializes refresh operations to prevent rotation race conditions.
    /// Without this, concurrent 401s all read the same old refresh token;
    /// the server rotates on the first call, and subsequent calls fail.
    refresh_lock: Arc<tokio::sync::Mutex<()>>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    email: String,
}

impl RestClient {
    pub fn new(config: StoreConfig, session: Session) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            session,
            auth: Arc::new(RwLock::new(AuthState {
                access_token: None,
                refresh_token: None,
                refresh_generation: 0,
            })),
            refresh_lock: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    /// The session handle this client installs identities into.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sets tokens directly (for restoring a saved session).
    pub async fn set_tokens(&self, access_token: String, refresh_token: String, identity: Identity) {
        let mut auth = self.auth.write().await;
        auth.access_token = Some(access_token);
        auth.refresh_token = Some(refresh_token);
        self.session.set(identity);
    }

    pub async fn is_authenticated(&self) -> bool {
        self.auth.read().await.access_token.is_some()
    }

    // ── Auth ──

    pub async fn sign_up(&self, email: &str, password: &str) -> StoreResult<Identity> {
        self.token_request("/auth/v1/signup", email, password).await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Identity> {
        self.token_request("/auth/v1/login", email, password).await
    }

    async fn token_request(&self, path: &str, email: &str, password: &str) -> StoreResult<Identity> {
        let url = format!("{}{path}", self.config.api_base_url);
        let resp: TokenResponse = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| StoreError::AuthFailed(e.to_string()))?
            .json()
            .await?;

        let identity = Identity {
            user_id: UserId::from_string(resp.user.id),
            email: resp.user.email,
        };

        {
            let mut auth = self.auth.write().await;
            auth.access_token = Some(resp.access_token);
            auth.refresh_token = Some(resp.refresh_token);
        }
        self.session.set(identity.clone());
        Ok(identity)
    }

    /// Drops tokens and the session identity.
    pub async fn sign_out(&self) {
        let mut auth = self.auth.write().await;
        auth.access_token = None;
        auth.refresh_token = None;
        self.session.clear();
    }

    pub async fn refresh_access_token(&self) -> StoreResult<String> {
        // Capture the generation before acquiring the lock so we can
        // detect if a concurrent refresh already completed.
        let pre_gen = self.auth.read().await.refresh_generation;

        // Serialize all refresh operations — only one HTTP refresh at a time.
        let _guard = self.refresh_lock.lock().await;

        // Double-check: if the generation advanced while we waited,
        // a concurrent refresh already succeeded. Use its token.
        {
            let auth = self.auth.read().await;
            if auth.refresh_generation > pre_gen {
                return auth.access_token.clone().ok_or(StoreError::AuthRequired);
            }
        }

        let refresh_token = {
            let auth = self.auth.read().await;
            auth.refresh_token.clone().ok_or(StoreError::AuthRequired)?
        };

        let url = format!("{}/auth/v1/refresh", self.config.api_base_url);
        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.config.api_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED
            || resp.status() == reqwest::StatusCode::FORBIDDEN
        {
            // Refresh token is expired/revoked — clear the stale session
            self.sign_out().await;
            return Err(StoreError::AuthFailed(
                "token refresh failed: session expired, re-authentication required".to_string(),
            ));
        }

        let resp: TokenResponse = resp
            .error_for_status()
            .map_err(|e| StoreError::AuthFailed(format!("token refresh failed: {e}")))?
            .json()
            .await?;

        let mut auth = self.auth.write().await;
        auth.access_token = Some(resp.access_token.clone());
        auth.refresh_token = Some(resp.refresh_token);
        auth.refresh_generation += 1;

        Ok(resp.access_token)
    }

    async fn get_token(&self) -> StoreResult<String> {
        self.auth
            .read()
            .await
            .access_token
            .clone()
            .ok_or(StoreError::AuthRequired)
    }

    fn row_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.config.api_base_url, table.as_str())
    }

    /// Makes an authenticated row request, retrying once after a token
    /// refresh on 401.
    async fn send_row_request(
        &self,
        method: reqwest::Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        prefer: Option<&'static str>,
    ) -> StoreResult<reqwest::Response> {
        let token = self.get_token().await?;
        let resp = self
            .row_request(method.clone(), url, query, body, prefer, &token)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            debug!("401 on {method} {url}, refreshing token");
            let new_token = self.refresh_access_token().await?;
            return Ok(self
                .row_request(method, url, query, body, prefer, &new_token)
                .send()
                .await?);
        }

        Ok(resp)
    }

    fn row_request(
        &self,
        method: reqwest::Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        prefer: Option<&'static str>,
        token: &str,
    ) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
            .query(query);
        if let Some(prefer) = prefer {
            req = req.header("Prefer", prefer);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        req
    }
}

#[async_trait]
impl RemoteStore for RestClient {
    async fn select(
        &self,
        table: Table,
        owner: &UserId,
        query: SelectQuery,
    ) -> StoreResult<Vec<Value>> {
        let mut params = vec![("user_id", format!("eq.{owner}"))];
        if let Some(column) = query.order_desc_by {
            params.push(("order", format!("{column}.desc")));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }

        let resp = self
            .send_row_request(reqwest::Method::GET, &self.row_url(table), &params, None, None)
            .await?
            .error_for_status()
            .map_err(|e| StoreError::Api(e.to_string()))?;

        Ok(resp.json().await?)
    }

    async fn insert(&self, table: Table, row: Value) -> StoreResult<Value> {
        let resp = self
            .send_row_request(
                reqwest::Method::POST,
                &self.row_url(table),
                &[],
                Some(&row),
                Some("return=representation"),
            )
            .await?
            .error_for_status()
            .map_err(|e| StoreError::Api(e.to_string()))?;

        // The store returns the inserted rows as an array.
        let mut rows: Vec<Value> = resp.json().await?;
        if rows.is_empty() {
            return Err(StoreError::Api(format!(
                "insert into {table} returned no representation"
            )));
        }
        Ok(rows.swap_remove(0))
    }

    async fn update(
        &self,
        table: Table,
        owner: &UserId,
        id: &str,
        patch: Value,
    ) -> StoreResult<()> {
        let params = [
            ("id", format!("eq.{id}")),
            ("user_id", format!("eq.{owner}")),
        ];
        self.send_row_request(
            reqwest::Method::PATCH,
            &self.row_url(table),
            &params,
            Some(&patch),
            None,
        )
        .await?
        .error_for_status()
        .map_err(|e| StoreError::Api(e.to_string()))?;
        Ok(())
    }

    async fn delete(&self, table: Table, owner: &UserId, id: &str) -> StoreResult<()> {
        let params = [
            ("id", format!("eq.{id}")),
            ("user_id", format!("eq.{owner}")),
        ];
        self.send_row_request(reqwest::Method::DELETE, &self.row_url(table), &params, None, None)
            .await?
            .error_for_status()
            .map_err(|e| StoreError::Api(e.to_string()))?;
        Ok(())
    }
}
