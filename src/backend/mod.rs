//! HTTP client for the hosted backend.
//!
//! The store lives behind a PostgREST-style REST interface: named tables
//! under `/rest/v1/{table}` with equality filters, ordering and limits in
//! the query string, plus server-side procedures under `/rest/v1/rpc/{name}`.
//! This module owns the wire protocol and the translation of backend error
//! bodies into the [`DataError`] taxonomy; the model modules build on it.

mod error;

pub use error::{DataError, classify};

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY` from the environment.
    /// Returns `None` when either is missing or empty; the caller decides
    /// how loudly to complain.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SUPABASE_URL").ok().filter(|v| !v.is_empty());
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .ok()
            .filter(|v| !v.is_empty());
        match (url, anon_key) {
            (Some(url), Some(anon_key)) => Some(Self {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            _ => None,
        }
    }
}

/// Client for the hosted store.
///
/// Constructed once in `main` and injected into handlers as shared state;
/// data-access functions take it by reference, so tests can point one at a
/// stub server. An unconfigured client still serves pages — every data call
/// just fails with [`DataError::Configuration`] instead of crashing.
#[derive(Debug, Clone)]
pub struct Backend {
    http: reqwest::Client,
    config: Option<BackendConfig>,
}

impl Backend {
    pub fn new(config: Option<BackendConfig>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn config(&self) -> Result<&BackendConfig, DataError> {
        self.config.as_ref().ok_or_else(|| {
            DataError::Configuration(
                "The backend is not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY."
                    .to_string(),
            )
        })
    }

    /// Start a read against `table`.
    pub fn select(&self, table: &str) -> Query<'_> {
        Query::new(self, table, Verb::Select)
    }

    /// Start an update of the rows matched by the builder's `eq` filters.
    pub fn update<T: Serialize>(&self, table: &str, patch: &T) -> Query<'_> {
        let body = serde_json::to_value(patch).unwrap_or(serde_json::Value::Null);
        Query::new(self, table, Verb::Update(body))
    }

    /// Insert one row and return the stored representation.
    pub async fn insert<T, R>(&self, table: &str, row: &T) -> Result<Vec<R>, DataError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let cfg = self.config()?;
        let request = self
            .http
            .post(format!("{}/rest/v1/{}", cfg.url, table))
            .header("apikey", &cfg.anon_key)
            .bearer_auth(&cfg.anon_key)
            .header("Prefer", "return=representation")
            .json(row);
        execute(request).await
    }

    /// Call a server-side procedure and decode its JSON result.
    pub async fn rpc<P, R>(&self, name: &str, params: &P) -> Result<R, DataError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let cfg = self.config()?;
        let request = self
            .http
            .post(format!("{}/rest/v1/rpc/{}", cfg.url, name))
            .header("apikey", &cfg.anon_key)
            .bearer_auth(&cfg.anon_key)
            .json(params);
        execute(request).await
    }
}

enum Verb {
    Select,
    Update(serde_json::Value),
}

/// One pending table operation: equality filters, optional ordering and an
/// optional row limit, in PostgREST's query-string dialect.
pub struct Query<'a> {
    backend: &'a Backend,
    table: String,
    verb: Verb,
    params: Vec<(String, String)>,
}

impl<'a> Query<'a> {
    fn new(backend: &'a Backend, table: &str, verb: Verb) -> Self {
        Self {
            backend,
            table: table.to_string(),
            verb,
            params: Vec::new(),
        }
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.params
            .push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    /// Run the operation and decode the returned rows.
    pub async fn fetch<R: DeserializeOwned>(self) -> Result<Vec<R>, DataError> {
        let cfg = self.backend.config()?;
        let url = format!("{}/rest/v1/{}", cfg.url, self.table);
        let request = match &self.verb {
            Verb::Select => self.backend.http.request(Method::GET, &url),
            Verb::Update(body) => self
                .backend
                .http
                .request(Method::PATCH, &url)
                .header("Prefer", "return=representation")
                .json(body),
        };
        let request = request
            .header("apikey", &cfg.anon_key)
            .bearer_auth(&cfg.anon_key)
            .query(&self.params);
        execute(request).await
    }
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

async fn execute<R: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<R, DataError> {
    let response = request.send().await.map_err(|e| {
        log::error!("Backend unreachable: {e}");
        DataError::Unknown(format!("Backend unreachable: {e}"))
    })?;

    let status = response.status();
    if status.is_success() {
        return response.json::<R>().await.map_err(|e| {
            log::error!("Backend returned an undecodable body: {e}");
            DataError::Unknown(format!("Undecodable backend response: {e}"))
        });
    }

    let body = response.text().await.unwrap_or_default();
    log::error!("Backend returned {status}: {body}");
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => Err(classify(
            parsed.code.as_deref().unwrap_or(""),
            parsed.message.as_deref().unwrap_or(""),
        )),
        Err(_) => Err(DataError::Unknown(format!(
            "Backend returned {status}"
        ))),
    }
}
