//! Croissant dataset manifest fetcher for the Hugging Face dataset hub
//!
//! Performs one GET to `{endpoint}/api/datasets/{dataset}/croissant`,
//! authenticated with the locally stored hub token when one exists, and
//! parses the JSON-LD body into a [`Manifest`]. Record sets declared by the
//! manifest are enumerated through [`Manifest::records`].

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Default dataset hub
pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// FinSearchComp dataset id on the hub
pub const DEFAULT_DATASET: &str = "ByteSeedXpert/FinSearchComp";

/// Record set name used by hub-generated Croissant manifests
pub const DEFAULT_RECORD_SET: &str = "default";

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dataset hub returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Manifest decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

//==============================================================================
// Credentials
//==============================================================================

/// Hub access token resolved from local stored credentials
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubCredentials {
    token: Option<String>,
}

impl HubCredentials {
    /// No token, requests go out unauthenticated
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Resolve the token from the process environment and the token file
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve the token using `lookup` for environment variables
    ///
    /// Order: `HF_TOKEN`, `HUGGING_FACE_HUB_TOKEN`, the file at
    /// `HF_TOKEN_PATH`, `$HF_HOME/token`, `~/.cache/huggingface/token`.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |value: String| {
            let trimmed = value.trim().to_string();
            (!trimmed.is_empty()).then_some(trimmed)
        };

        for key in ["HF_TOKEN", "HUGGING_FACE_HUB_TOKEN"] {
            if let Some(token) = lookup(key).and_then(non_empty) {
                debug!(source = key, "using hub token from environment");
                return Self::with_token(token);
            }
        }

        let token = Self::token_path(&lookup).and_then(|path| {
            let token = fs::read_to_string(&path).ok().and_then(non_empty);
            if token.is_some() {
                debug!(path = %path.display(), "using hub token from file");
            }
            token
        });

        Self { token }
    }

    fn token_path<F>(lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("HF_TOKEN_PATH") {
            return Some(PathBuf::from(path));
        }
        if let Some(home) = lookup("HF_HOME") {
            return Some(PathBuf::from(home).join("token"));
        }
        lookup("HOME")
            .or_else(|| lookup("USERPROFILE"))
            .map(|home| PathBuf::from(home).join(".cache/huggingface/token"))
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Attach the bearer header when a token is present
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

//==============================================================================
// Croissant Manifest
//==============================================================================

/// A file or file set distributed with the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "contentUrl", default)]
    pub content_url: Option<String>,
    #[serde(rename = "encodingFormat", default)]
    pub encoding_format: Option<String>,
}

/// One field of a record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// A single type IRI or a list of them
    #[serde(rename = "dataType", default)]
    pub data_type: Option<serde_json::Value>,
}

impl Field {
    /// Field name without its `record_set/` prefix
    pub fn short_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Declared data types (e.g. `sc:Text`)
    pub fn data_types(&self) -> Vec<&str> {
        match &self.data_type {
            Some(serde_json::Value::String(s)) => vec![s.as_str()],
            Some(serde_json::Value::Array(items)) => {
                items.iter().filter_map(|v| v.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// A named collection of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "field", default)]
    pub fields: Vec<Field>,
}

impl RecordSet {
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.id.as_deref() == Some(name)
    }
}

/// Croissant dataset description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// A single license string or a list of them
    #[serde(default)]
    pub license: Option<serde_json::Value>,
    #[serde(default)]
    pub distribution: Vec<FileObject>,
    #[serde(rename = "recordSet", default)]
    pub record_sets: Vec<RecordSet>,
}

impl Manifest {
    pub fn from_json(body: &str) -> ManifestResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// The record set with the given name or `@id`
    pub fn records(&self, name: &str) -> Option<&RecordSet> {
        self.record_sets.iter().find(|set| set.matches(name))
    }

    pub fn record_set_names(&self) -> Vec<&str> {
        self.record_sets.iter().map(|set| set.name.as_str()).collect()
    }
}

//==============================================================================
// Client
//==============================================================================

/// Dataset hub settings
#[derive(Debug, Clone)]
pub struct ManifestConfig {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!("finsearch-xlsx/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Fetches Croissant manifests from the dataset hub
pub struct ManifestClient {
    client: Client,
    config: ManifestConfig,
    credentials: HubCredentials,
}

impl ManifestClient {
    pub fn new(config: ManifestConfig, credentials: HubCredentials) -> ManifestResult<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    /// Croissant endpoint URL for a dataset id (`owner/name`)
    pub fn croissant_url(&self, dataset: &str) -> String {
        format!(
            "{}/api/datasets/{}/croissant",
            self.config.endpoint.trim_end_matches('/'),
            dataset
        )
    }

    /// Fetch and parse the manifest of `dataset`
    pub async fn fetch(&self, dataset: &str) -> ManifestResult<Manifest> {
        let url = self.croissant_url(dataset);
        debug!(
            url = %url,
            authenticated = self.credentials.token().is_some(),
            "fetching dataset manifest"
        );

        let request = self.credentials.authorize(self.client.get(&url));
        let response = request.send().await?;

        let status = response.status();
        debug!(status = %status, "dataset hub response");
        if !status.is_success() {
            return Err(ManifestError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Manifest::from_json(&body)
    }
}
