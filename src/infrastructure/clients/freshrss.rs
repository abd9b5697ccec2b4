use super::{ClientError, SavedItemSource};
use crate::domain::transfer::{MarkAs, SavedItem};
use crate::infrastructure::config::FreshRssConfig;
use async_trait::async_trait;
use md5::{Digest, Md5};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

const FEVER_PATH: &str = "/api/fever.php";

/// Fever refuses `with_ids` lists longer than this
const MAX_IDS_PER_REQUEST: usize = 50;

/// Fever response envelope; every reply carries the `auth` flag
#[derive(Debug, Deserialize)]
struct FeverResponse<T> {
    #[serde(default)]
    auth: u8,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Deserialize)]
struct Empty {}

#[derive(Debug, Deserialize)]
struct SavedItemIds {
    #[serde(default)]
    saved_item_ids: String,
}

#[derive(Debug, Deserialize)]
struct Items {
    #[serde(default)]
    items: Vec<FeverItem>,
}

#[derive(Debug, Deserialize)]
struct FeverItem {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
}

impl From<FeverItem> for SavedItem {
    fn from(item: FeverItem) -> Self {
        Self {
            id: item.id,
            url: item.url,
            title: item.title,
        }
    }
}

/// FreshRSS returns ids as strings, other Fever servers as numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}

/// Fever API key: md5 of `username:password`, lowercase hex
pub fn fever_api_key(username: &str, password: &str) -> String {
    let digest = Md5::digest(format!("{}:{}", username, password).as_bytes());
    format!("{:x}", digest)
}

/// Resolve the Fever endpoint from a FreshRSS base URL
pub fn fever_endpoint(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.ends_with("fever.php") {
        host.to_string()
    } else {
        format!("{}{}", host, FEVER_PATH)
    }
}

/// Split the comma-separated id list Fever returns, dropping blanks
fn parse_id_list(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// FreshRSS client speaking the Fever API
pub struct FreshRssClient {
    endpoint: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl FreshRssClient {
    pub fn new(config: &FreshRssConfig) -> Self {
        Self {
            endpoint: fever_endpoint(&config.host),
            api_key: fever_api_key(&config.username, &config.password),
            http_client: reqwest::Client::new(),
        }
    }

    /// Build the client and verify the credentials with a bare `?api` call
    pub async fn connect(config: &FreshRssConfig) -> Result<Self, ClientError> {
        let client = Self::new(config);
        client.call::<Empty>("").await?;
        tracing::debug!(endpoint = %client.endpoint, "FreshRSS credentials accepted");
        Ok(client)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `?api<query>` with the API key and decode the envelope
    async fn call<T: DeserializeOwned>(&self, query: &str) -> Result<T, ClientError> {
        let url = format!("{}?api{}", self.endpoint, query);
        tracing::debug!(url = %url, "Calling Fever API");

        let response = self
            .http_client
            .post(&url)
            .form(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_status(status, &error_text));
        }

        let envelope: FeverResponse<T> = response.json().await?;
        if envelope.auth != 1 {
            return Err(ClientError::Authentication(
                "FreshRSS rejected the Fever API credentials".to_string(),
            ));
        }

        Ok(envelope.body)
    }
}

#[async_trait]
impl SavedItemSource for FreshRssClient {
    async fn get_saved_items(&self) -> Result<Vec<SavedItem>, ClientError> {
        let ids = parse_id_list(&self.call::<SavedItemIds>("&saved_item_ids").await?.saved_item_ids);
        tracing::debug!(count = ids.len(), "Fetched saved item ids");

        let mut saved = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            let query = format!("&items&with_ids={}", chunk.join(","));
            let items = self.call::<Items>(&query).await?.items;
            saved.extend(items.into_iter().map(SavedItem::from));
        }

        Ok(saved)
    }

    async fn set_mark(&self, mark: MarkAs, item_id: &str) -> Result<(), ClientError> {
        let query = format!(
            "&mark=item&as={}&id={}",
            mark.as_str(),
            urlencoding::encode(item_id)
        );
        self.call::<Empty>(&query).await?;
        Ok(())
    }
}
