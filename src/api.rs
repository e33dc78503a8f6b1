use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// An embedding index as the backend reports it.
///
/// Only `id` is guaranteed; the backend is free to omit the rest in list
/// responses, so they default rather than fail the whole decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub geographic: String,
    /// Whether the backend appends a generated summary to each content
    /// chunk at indexing time.
    #[serde(default)]
    pub is_append_summary_to_chunk: bool,
}

/// A file embedded under an index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedFile {
    pub id: i64,
    #[serde(default)]
    pub doc_ref_id: String,
    /// Whatever else the backend attaches (filename, timestamps, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Body of the create-index request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIndexRequest {
    pub name: String,
    pub category: String,
    pub geographic: String,
    #[serde(rename = "is_append_summary_to_chunk", default)]
    pub append_summary_to_chunk: bool,
}

impl CreateIndexRequest {
    /// Summary appending is off unless explicitly enabled.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        geographic: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            geographic: geographic.into(),
            append_summary_to_chunk: false,
        }
    }

    pub fn append_summary_to_chunk(mut self, enabled: bool) -> Self {
        self.append_summary_to_chunk = enabled;
        self
    }
}

/// The operations of the remote embedding-index service.
///
/// Every method is one fire-and-wait HTTP request: no retries, no timeouts,
/// no ordering between concurrent calls. Ids are passed through to the
/// backend unchecked; it is the one that knows whether they exist.
#[async_trait]
pub trait EmbeddingApi: Send + Sync {
    /// Creates a new index and returns the full created object.
    async fn create_index(&self, request: CreateIndexRequest) -> Result<Index, ClientError>;

    /// Lists the caller's indexes.
    async fn list_indexes(&self) -> Result<Vec<Index>, ClientError>;

    /// Lists public indexes.
    async fn list_public_indexes(&self) -> Result<Vec<Index>, ClientError>;

    /// Lists the files embedded under an index.
    async fn list_files(&self, index_id: i64) -> Result<Vec<EmbeddedFile>, ClientError>;

    /// Uploads a file to be embedded under an index.
    ///
    /// The contents are sent as-is; no type or size validation happens here.
    async fn upload_file(
        &self,
        index_id: i64,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<Value, ClientError>;

    /// Deletes an embedded document from an index.
    async fn delete_file(
        &self,
        index_id: i64,
        file_id: i64,
        doc_ref_id: &str,
    ) -> Result<Value, ClientError>;

    /// Asks a natural-language question against an index's embedded chunks.
    ///
    /// The ranked-chunk result shape belongs to the backend and is returned
    /// unprocessed.
    async fn query_ranked_chunks(
        &self,
        index_id: i64,
        question: &str,
    ) -> Result<Value, ClientError>;
}
