pub mod api;
pub mod auth;
pub mod client;
pub mod error;

pub use api::{CreateIndexRequest, EmbeddedFile, EmbeddingApi, Index};
pub use auth::{EnvToken, StaticToken, TokenProvider};
pub use client::EmbeddingIndexClient;
pub use error::ClientError;
