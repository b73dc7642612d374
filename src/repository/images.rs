//! Cover image upload to the backend object store

use reqwest::multipart::{Form, Part};

use super::client::ApiClient;
use crate::error::{AppError, AppResult};

const UPLOAD_PATH: &str = "api/images/upload";

#[derive(Clone)]
pub struct ImageStore {
    client: ApiClient,
}

impl ImageStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload one image as the `file` part and return its public URL
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> AppResult<String> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let body = self.client.post_multipart(UPLOAD_PATH, form).await?;

        match image_url(&body) {
            Some(url) => {
                tracing::info!("Uploaded {} to {}", file_name, url);
                Ok(url)
            }
            None => {
                tracing::error!("Upload of {} returned no image URL", file_name);
                Err(AppError::Internal(format!(
                    "upload of {} returned no image URL",
                    file_name
                )))
            }
        }
    }
}

/// The backend answers with the bare URL, sometimes JSON-quoted
fn image_url(body: &str) -> Option<String> {
    let body = body.trim();
    let url = match serde_json::from_str::<String>(body) {
        Ok(url) => url,
        Err(_) => body.to_string(),
    };
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}
