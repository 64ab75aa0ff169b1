use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use common::utils::config::get_config;
use ingestion_pipeline::{utils::pdf_extraction::extract_pdf_pages, IngestionPipeline};
use retrieval_pipeline::QueryPipeline;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(about = "Ingest PDF documents into a vector index and query them")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract, chunk, embed, and store a PDF document
    Ingest {
        /// Path to the PDF file
        file: PathBuf,
        /// Document name to store records under; defaults to the file name
        #[arg(long)]
        name: Option<String>,
    },
    /// Search stored documents with a free-text query
    Query {
        /// Query text
        text: String,
        /// Number of results to return
        #[arg(long)]
        top_k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = get_config()?;

    match cli.command {
        Command::Ingest { file, name } => {
            let document_name = match name {
                Some(name) => name,
                None => file
                    .file_name()
                    .map(|file_name| file_name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "document.pdf".to_string()),
            };

            info!(document = %document_name, "starting ingestion");

            let pdf_bytes = tokio::fs::read(&file).await?;
            let pages = extract_pdf_pages(pdf_bytes).await?;

            let pipeline = IngestionPipeline::new(&config);
            let outcome = pipeline.ingest(pages, &document_name).await?;

            println!(
                "Successfully processed \"{document_name}\" and stored {} chunks",
                outcome.chunk_count
            );
        }
        Command::Query { text, top_k } => {
            let pipeline = QueryPipeline::new(&config);
            let matches = pipeline.query(&text, top_k).await?;

            if matches.is_empty() {
                println!("No relevant documents found.");
                return Ok(());
            }

            for search_match in &matches {
                println!("Relevance score: {:.1}%", search_match.score * 100.0);
                println!("Source: {}", search_match.metadata.filename);
                println!("Content: {}", search_match.metadata.text);
                println!();
            }
            println!("Found {} relevant results", matches.len());
        }
    }

    Ok(())
}
