use super::{BookmarkDestination, ClientError};
use crate::domain::transfer::{AttachTagsResult, Bookmark, NewBookmark};
use crate::infrastructure::config::KarakeepConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct AttachTagsRequest<'a> {
    tags: Vec<TagRef<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TagRef<'a> {
    tag_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct AttachTagsResponse {
    #[serde(default)]
    attached: Vec<String>,
}

impl From<AttachTagsResponse> for AttachTagsResult {
    fn from(response: AttachTagsResponse) -> Self {
        Self {
            attached_tag_ids: response.attached,
        }
    }
}

/// Karakeep REST client authenticated with a bearer API key
pub struct KarakeepClient {
    endpoint: reqwest::Url,
    api_key: String,
    http_client: reqwest::Client,
}

impl KarakeepClient {
    /// Validate the endpoint and build the HTTP client; no request is sent
    pub fn new(config: &KarakeepConfig) -> Result<Self, ClientError> {
        let mut endpoint = reqwest::Url::parse(config.endpoint.trim()).map_err(|e| {
            ClientError::Api(format!("invalid Karakeep endpoint {:?}: {}", config.endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(ClientError::Api(format!(
                "Karakeep endpoint {:?} cannot be used as a base URL",
                config.endpoint
            )));
        }
        // Url::join drops the last segment unless the path ends with '/'
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        if !config.verify_ssl {
            tracing::warn!("TLS certificate verification disabled for Karakeep");
        }

        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| ClientError::Api(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn url(&self, path: &str) -> Result<reqwest::Url, ClientError> {
        self.endpoint
            .join(path)
            .map_err(|e| ClientError::Api(format!("invalid Karakeep path {:?}: {}", path, e)))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        tracing::debug!(url = %url, "Calling Karakeep API");

        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, &error_text));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl BookmarkDestination for KarakeepClient {
    async fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<Bookmark, ClientError> {
        self.post_json("bookmarks", bookmark).await
    }

    async fn attach_tags(
        &self,
        bookmark_id: &str,
        tag_names: &[&str],
    ) -> Result<AttachTagsResult, ClientError> {
        let path = format!("bookmarks/{}/tags", urlencoding::encode(bookmark_id));
        let request = AttachTagsRequest {
            tags: tag_names.iter().map(|&tag_name| TagRef { tag_name }).collect(),
        };
        let response: AttachTagsResponse = self.post_json(&path, &request).await?;
        Ok(response.into())
    }
}
