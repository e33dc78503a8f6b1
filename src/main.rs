use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hatto_embedding::{CreateIndexRequest, EmbeddingApi, EmbeddingIndexClient, EnvToken};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new embedding index
    CreateIndex {
        name: String,
        category: String,
        geographic: String,
        /// Append a generated summary to each chunk at indexing time
        #[arg(long)]
        append_summary: bool,
    },
    /// List embedding indexes
    List {
        /// List public indexes instead of your own
        #[arg(long)]
        public: bool,
    },
    /// List the files embedded under an index
    Files { index_id: i64 },
    /// Upload a file to be embedded under an index
    Upload { index_id: i64, path: PathBuf },
    /// Delete an embedded document from an index
    Delete {
        index_id: i64,
        file_id: i64,
        doc_ref_id: String,
    },
    /// Ask a question against an index's embedded chunks
    Query { index_id: i64, question: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if dotenv::dotenv().is_err() {
        warn!("didn't load a .env file")
    }

    let args = Cli::parse();

    let base_url = std::env::var("HATTO_API_URL").context("HATTO_API_URL env variable not set")?;
    let client: Box<dyn EmbeddingApi> = Box::new(EmbeddingIndexClient::new(
        &base_url,
        EnvToken("HATTO_API_TOKEN".into()),
    ));

    match args.command {
        Commands::CreateIndex {
            name,
            category,
            geographic,
            append_summary,
        } => {
            let request = CreateIndexRequest::new(name, category, geographic)
                .append_summary_to_chunk(append_summary);
            let index = client.create_index(request).await?;
            println!("{}", serde_json::to_string_pretty(&index)?);
        }
        Commands::List { public } => {
            let indexes = if public {
                client.list_public_indexes().await?
            } else {
                client.list_indexes().await?
            };
            println!("{}", serde_json::to_string_pretty(&indexes)?);
        }
        Commands::Files { index_id } => {
            let files = client.list_files(index_id).await?;
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
        Commands::Upload { index_id, path } => {
            let contents = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("upload path has no usable file name")?;

            let result = client.upload_file(index_id, file_name, contents).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Delete {
            index_id,
            file_id,
            doc_ref_id,
        } => {
            let result = client.delete_file(index_id, file_id, &doc_ref_id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Query { index_id, question } => {
            let result = client.query_ranked_chunks(index_id, &question).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
