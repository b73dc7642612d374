//! Low-level JSON-over-HTTP client shared by all repositories

use std::time::Duration;

use reqwest::{
    header::CONTENT_TYPE, multipart::Form, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::{ApiConfig, AuthConfig},
    error::{AppError, AppResult},
    models::Page,
};

const TOTAL_COUNT_HEADER: &str = "x-total-count";
const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(api: &ApiConfig, auth: &AuthConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(api.user_agent.as_str())
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        let mut base_url = api.base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            token: auth.token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        let builder = self.http.request(method, self.url(path));
        match self.token {
            Some(ref token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, resource: &str) -> AppResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("{} answered {}: {}", resource, status, body);
        Err(AppError::from_status(status, &body, resource))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET returning a single JSON document
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self
            .send(self.request(Method::GET, path).query(query), path)
            .await?;
        Self::decode(response).await
    }

    /// GET where both 404 and an empty body mean "nothing there"
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Option<T>> {
        let response = match self
            .send(self.request(Method::GET, path).query(query), path)
            .await
        {
            Ok(response) => response,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.text().await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }

    /// GET a JSON array, reading the total from `X-Total-Count` when present
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Page<T>> {
        let response = self
            .send(self.request(Method::GET, path).query(query), path)
            .await?;

        let total = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let items: Vec<T> = Self::decode(response).await?;

        Ok(Page {
            total_items: total.unwrap_or(items.len() as u64),
            items,
        })
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body), path)
            .await?;
        Self::decode(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::PUT, path).json(body), path)
            .await?;
        Self::decode(response).await
    }

    pub async fn patch_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let builder = self
            .request(Method::PATCH, path)
            .header(CONTENT_TYPE, MERGE_PATCH_JSON)
            .body(payload);
        let response = self.send(builder, path).await?;
        Self::decode(response).await
    }

    /// POST a multipart form, returning the raw response text
    pub async fn post_multipart(&self, path: &str, form: Form) -> AppResult<String> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form), path)
            .await?;
        Ok(response.text().await?)
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.send(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }
}

/// Cache-busting query parameter appended to list requests
pub fn cache_buster() -> (&'static str, String) {
    ("cacheBuster", chrono::Utc::now().timestamp_millis().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let api = ApiConfig {
            base_url: "http://library.local:8080".to_string(),
            ..Default::default()
        };
        let client = ApiClient::new(&api, &AuthConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://library.local:8080/");
        assert_eq!(client.url("/api/books"), "http://library.local:8080/api/books");
        assert_eq!(client.url("api/books"), "http://library.local:8080/api/books");
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let auth = AuthConfig { token: Some(String::new()) };
        let client = ApiClient::new(&ApiConfig::default(), &auth).unwrap();
        assert!(client.token.is_none());
    }
}
