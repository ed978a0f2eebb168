use std::time::Instant;

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::RaindropError;
use crate::domain::args::SearchBookmarksArgs;
use crate::domain::{CollectionList, CreatedRaindrop, NewRaindrop, RaindropList};
use crate::infra::config::RaindropConfig;
use crate::infra::http::headers::add_standard_headers;
use crate::infra::runtime::limits::make_http_client;

/// Client for the three Raindrop REST endpoints the tools use. Each method
/// issues exactly one request.
#[derive(Clone)]
pub struct RaindropRemote {
    base: String,
    http: Client,
    token: Option<String>,
}

impl RaindropRemote {
    pub fn new(base: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base: base.into(),
            http: Client::new(),
            token,
        }
    }

    pub fn from_config(cfg: &RaindropConfig) -> Result<Self, RaindropError> {
        let http = make_http_client(cfg)
            .map_err(|e| RaindropError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base: cfg.base_url.clone(),
            http,
            token: cfg.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// `POST /raindrop`
    pub async fn create_raindrop(&self, body: &NewRaindrop) -> Result<CreatedRaindrop, RaindropError> {
        self.request(Method::POST, "/raindrop", "/raindrop", &[], Some(body))
            .await
    }

    /// `GET /raindrops/{collectionId}?search=...`
    pub async fn search_raindrops(
        &self,
        args: &SearchBookmarksArgs,
    ) -> Result<RaindropList, RaindropError> {
        let endpoint = format!("/raindrops/{}", args.collection_id());
        self.request::<_, ()>(
            Method::GET,
            &endpoint,
            "/raindrops",
            &args.query_pairs(),
            None,
        )
        .await
    }

    /// `GET /collections`
    pub async fn list_collections(&self) -> Result<CollectionList, RaindropError> {
        self.request::<_, ()>(Method::GET, "/collections", "/collections", &[], None)
            .await
    }

    async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        metric_label: &'static str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<T, RaindropError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        // Checked per call so a server without a token still starts and lists tools.
        let token = self.token.as_deref().ok_or_else(RaindropError::missing_token)?;

        let url = format!("{}{}", self.base.trim_end_matches('/'), endpoint);
        let (mut builder, rid) = add_standard_headers(self.http.request(method.clone(), &url), token, None);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        tracing::debug!(%method, endpoint = %url, request_id = %rid, "raindrop request");

        let start = Instant::now();
        let res = Self::send(builder).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        crate::infra::logging::record_call(metric_label, elapsed_ms, res.is_ok());
        if let Err(e) = &res {
            tracing::warn!(%method, endpoint = %url, request_id = %rid, error = %e, "raindrop request failed");
        }
        res
    }

    async fn send<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> Result<T, RaindropError> {
        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RaindropError::upstream(status));
        }
        Ok(resp.json::<T>().await?)
    }
}
