//! HTTP boundary.
//!
//! [`Transport`] is the seam the session store and pager collaborate with;
//! [`HttpTransport`] is the production implementation. It owns the cookie jar
//! (the backend keeps both JWTs in httpOnly cookies), stamps a request id on
//! every call, and classifies every failure into [`ApiError`] exactly once so
//! callers never branch on raw status codes.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::model::{Apartment, ApartmentDraft, Identity, Page, PageLocator};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit credentials. `Ok(())` means the server installed session cookies.
    async fn login(&self, email: &str, password: &str) -> ApiResult<()>;

    /// Renew the access credential from the refresh credential.
    async fn refresh(&self) -> ApiResult<()>;

    /// Ask who the current session belongs to.
    async fn fetch_identity(&self) -> ApiResult<Identity>;

    /// Revoke the server-side session.
    async fn logout(&self) -> ApiResult<()>;

    /// Fetch the page at an opaque locator, echoed back verbatim.
    async fn fetch_page(&self, locator: &PageLocator) -> ApiResult<Page>;

    async fn fetch_apartment(&self, slug: &str) -> ApiResult<Apartment>;
    async fn create_apartment(&self, draft: &ApartmentDraft) -> ApiResult<Apartment>;
    async fn update_apartment(&self, slug: &str, draft: &ApartmentDraft) -> ApiResult<Apartment>;
    async fn delete_apartment(&self, slug: &str) -> ApiResult<()>;
}

pub struct HttpTransport {
    base: Url,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        // A trailing slash keeps Url::join from replacing the last path
        // segment of the API prefix.
        let mut raw = config.base_url.trim().to_string();
        if raw.is_empty() {
            return Err(ApiError::InvalidBaseUrl { url: config.base_url.clone() });
        }
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)
            .map_err(|_| ApiError::InvalidBaseUrl { url: config.base_url.clone() })?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::transport(e.to_string()))?;
        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|_| ApiError::InvalidBaseUrl { url: path.to_string() })
    }

    /// Resolve a locator: an absolute server URL is used as-is, a relative
    /// path resolves against the base. `next` and `previous` both go through
    /// here, symmetrically.
    fn resolve(&self, locator: &PageLocator) -> ApiResult<Url> {
        match Url::parse(locator.as_str()) {
            Ok(absolute) => Ok(absolute),
            Err(_) => self.endpoint(locator.as_str()),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<(StatusCode, Vec<u8>)> {
        let request = request.header(REQUEST_ID_HEADER, request_id());
        let response = request.send().await.map_err(|e| ApiError::transport(e.to_string()))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| ApiError::transport(e.to_string()))?;
        Ok((status, body.to_vec()))
    }

    /// Shared classification for authenticated JSON endpoints: 401/403 means
    /// the cookie is gone or stale, anything else non-success is classified by
    /// its body.
    async fn request_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let (status, body) = self.send(request).await?;
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::decode(e.to_string()))
    }

    async fn request_unit(&self, request: reqwest::RequestBuilder) -> ApiResult<()> {
        let (status, body) = self.send(request).await?;
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        debug!(target: "arenda::transport", "POST auth/login/");
        let url = self.endpoint("auth/login/")?;
        let payload = serde_json::json!({ "email": email, "password": password });
        let (status, body) = self.send(self.http.post(url).json(&payload)).await?;
        match status.as_u16() {
            s if status.is_success() => {
                debug!(target: "arenda::transport", "login accepted ({s})");
                Ok(())
            }
            400 | 401 => Err(ApiError::InvalidCredentials),
            s => Err(ApiError::from_response(s, &body)),
        }
    }

    async fn refresh(&self) -> ApiResult<()> {
        debug!(target: "arenda::transport", "POST auth/refresh/");
        let url = self.endpoint("auth/refresh/")?;
        let (status, _) = self.send(self.http.post(url).json(&serde_json::json!({}))).await?;
        if status.is_success() {
            Ok(())
        } else {
            // Any rejection means the refresh credential no longer works.
            Err(ApiError::SessionExpired)
        }
    }

    async fn fetch_identity(&self) -> ApiResult<Identity> {
        debug!(target: "arenda::transport", "GET auth/me/");
        let url = self.endpoint("auth/me/")?;
        self.request_json(self.http.get(url)).await
    }

    async fn logout(&self) -> ApiResult<()> {
        debug!(target: "arenda::transport", "POST auth/logout/");
        let url = self.endpoint("auth/logout/")?;
        self.request_unit(self.http.post(url).json(&serde_json::json!({}))).await
    }

    async fn fetch_page(&self, locator: &PageLocator) -> ApiResult<Page> {
        let url = self.resolve(locator)?;
        debug!(target: "arenda::transport", "GET {url}");
        self.request_json(self.http.get(url)).await
    }

    async fn fetch_apartment(&self, slug: &str) -> ApiResult<Apartment> {
        let url = self.endpoint(&format!("apartments/{}/", slug.trim()))?;
        debug!(target: "arenda::transport", "GET {url}");
        self.request_json(self.http.get(url)).await
    }

    async fn create_apartment(&self, draft: &ApartmentDraft) -> ApiResult<Apartment> {
        debug!(target: "arenda::transport", "POST apartments/");
        let url = self.endpoint("apartments/")?;
        self.request_json(self.http.post(url).json(draft)).await
    }

    async fn update_apartment(&self, slug: &str, draft: &ApartmentDraft) -> ApiResult<Apartment> {
        let url = self.endpoint(&format!("apartments/{}/", slug.trim()))?;
        debug!(target: "arenda::transport", "PUT {url}");
        self.request_json(self.http.put(url).json(draft)).await
    }

    async fn delete_apartment(&self, slug: &str) -> ApiResult<()> {
        let url = self.endpoint(&format!("apartments/{}/", slug.trim()))?;
        debug!(target: "arenda::transport", "DELETE {url}");
        self.request_unit(self.http.delete(url)).await
    }
}

fn request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}
