use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{multipart, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::api::{CreateIndexRequest, EmbeddedFile, EmbeddingApi, Index};
use crate::auth::TokenProvider;
use crate::error::ClientError;

/// Envelope the backend wraps list responses in.
#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default)]
    results: Vec<T>,
}

/// HTTP client for the remote embedding-index service. Clones are reference
/// counted and share the connection pool.
#[derive(Clone)]
pub struct EmbeddingIndexClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<dyn TokenProvider>,
}

impl EmbeddingIndexClient {
    /// `base_url` is the service root, with or without a trailing slash.
    pub fn new(base_url: &str, token: impl TokenProvider + 'static) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(token),
        }
    }

    /// Starts a request with the headers every operation shares. The bearer
    /// token is read from the provider here, once per request.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        debug!("{method} {url}");
        self.http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .bearer_auth(self.token.bearer_token())
    }
}

/// Decodes a response into the documented result shape.
///
/// A non-success status becomes an `Api` error carrying the error body's
/// `detail` field. A success body that fails to decode is a `Parse` error.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Pulls the `detail` field out of an error body. An unparsable body or a
/// body without the field yields `None`; the raw body is kept in the logs.
fn error_detail(body: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(err) => err.get("detail").cloned(),
        Err(e) => {
            debug!("error body is not JSON ({e}): {body}");
            None
        }
    }
}

#[async_trait]
impl EmbeddingApi for EmbeddingIndexClient {
    async fn create_index(&self, request: CreateIndexRequest) -> Result<Index, ClientError> {
        let response = self
            .request(Method::POST, "/embedding/index/")
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    async fn list_indexes(&self) -> Result<Vec<Index>, ClientError> {
        let response = self.request(Method::GET, "/embedding/index/").send().await?;
        let envelope: ListEnvelope<Index> = decode(response).await?;
        Ok(envelope.results)
    }

    async fn list_public_indexes(&self) -> Result<Vec<Index>, ClientError> {
        let response = self
            .request(Method::GET, "/embedding/index/")
            .query(&[("public", "true")])
            .send()
            .await?;
        let envelope: ListEnvelope<Index> = decode(response).await?;
        Ok(envelope.results)
    }

    async fn list_files(&self, index_id: i64) -> Result<Vec<EmbeddedFile>, ClientError> {
        let response = self
            .request(Method::GET, &format!("/embedding/index/{index_id}/files"))
            .send()
            .await?;
        let envelope: ListEnvelope<EmbeddedFile> = decode(response).await?;
        Ok(envelope.results)
    }

    async fn upload_file(
        &self,
        index_id: i64,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<Value, ClientError> {
        // Multipart body; reqwest sets the boundary content type, the
        // backend rejects an explicit JSON one here.
        let form = multipart::Form::new()
            .text("org_index_id", index_id.to_string())
            .part(
                "files",
                multipart::Part::bytes(contents).file_name(file_name.to_string()),
            );

        let response = self
            .request(Method::POST, "/embedding/index-file")
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_file(
        &self,
        index_id: i64,
        file_id: i64,
        doc_ref_id: &str,
    ) -> Result<Value, ClientError> {
        let response = self
            .request(Method::POST, "/embedding/delete-doc")
            .json(&json!({
                "org_index_id": index_id,
                "file_id": file_id,
                "doc_ref_id": doc_ref_id,
            }))
            .send()
            .await?;
        decode(response).await
    }

    async fn query_ranked_chunks(
        &self,
        index_id: i64,
        question: &str,
    ) -> Result<Value, ClientError> {
        let response = self
            .request(Method::POST, "/embedding/query-ranked-chunk")
            .json(&json!({
                "org_index_id": index_id,
                "question": question,
            }))
            .send()
            .await?;
        decode(response).await
    }
}
