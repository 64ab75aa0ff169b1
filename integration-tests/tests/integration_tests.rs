
use httpmock::prelude::*;
use ingestion_pipeline::IngestionPipeline;
use retrieval_pipeline::QueryPipeline;

use common::error::AppError;
use test_utils::{mock_config, sample_pages};

#[tokio::test]
async fn ingest_then_query_round_trip() {
    let server = MockServer::start_async().await;

    let embed_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/embed")
                .header("authorization", "Bearer integration-token");
            then.status(200).json_body(serde_json::json!([[0.1, 0.9]]));
        })
        .await;

    // Both chunks embed to the same mocked vector, so the upsert body is
    // fully deterministic and can be pinned exactly.
    let upsert_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/vectors/upsert")
                .header("api-key", "integration-key")
                .json_body(serde_json::json!({
                    "vectors": [
                        {
                            "id": "report.pdf_chunk_0",
                            "values": [0.1, 0.9],
                            "metadata": {
                                "text": "The first page covers the budget.",
                                "filename": "report.pdf",
                                "chunk_index": 0
                            }
                        },
                        {
                            "id": "report.pdf_chunk_1",
                            "values": [0.1, 0.9],
                            "metadata": {
                                "text": "The second page covers the timeline.",
                                "filename": "report.pdf",
                                "chunk_index": 1
                            }
                        }
                    ],
                    "namespace": "pdf-documents"
                }));
            then.status(200)
                .json_body(serde_json::json!({ "upsertedCount": 2 }));
        })
        .await;

    let config = mock_config(&server);
    let outcome = IngestionPipeline::new(&config)
        .ingest(sample_pages(), "report.pdf")
        .await
        .expect("ingestion succeeds");

    assert_eq!(outcome.chunk_count, 2);
    assert_eq!(embed_mock.hits_async().await, 2);
    upsert_mock.assert_async().await;

    let search_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/query")
                .json_body(serde_json::json!({
                    "vector": [0.1, 0.9],
                    "topK": 5,
                    "includeMetadata": true,
                    "namespace": "pdf-documents"
                }));
            then.status(200).json_body(serde_json::json!({
                "matches": [
                    {
                        "score": 0.93,
                        "metadata": {
                            "text": "The first page covers the budget.",
                            "filename": "report.pdf",
                            "chunk_index": 0
                        }
                    }
                ]
            }));
        })
        .await;

    let matches = QueryPipeline::new(&config)
        .query("what is the budget?", None)
        .await
        .expect("query succeeds");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].metadata.filename, "report.pdf");
    assert_eq!(matches[0].metadata.chunk_index, 0);
    search_mock.assert_async().await;

    // One embedding call per chunk plus one for the query.
    assert_eq!(embed_mock.hits_async().await, 3);
}

#[tokio::test]
async fn failed_upsert_surfaces_after_all_chunks_embed() {
    let server = MockServer::start_async().await;

    let embed_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/embed");
            then.status(200).json_body(serde_json::json!([[0.2, 0.8]]));
        })
        .await;

    let upsert_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/vectors/upsert");
            then.status(500).body("index unavailable");
        })
        .await;

    let config = mock_config(&server);
    let err = IngestionPipeline::new(&config)
        .ingest(sample_pages(), "report.pdf")
        .await
        .expect_err("failed upsert must fail the run");

    match err {
        AppError::RemoteService { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "index unavailable");
        }
        other => panic!("expected remote service error, got {other:?}"),
    }

    assert_eq!(embed_mock.hits_async().await, 2);
    assert_eq!(upsert_mock.hits_async().await, 1);
}

#[tokio::test]
async fn failed_embedding_prevents_any_upsert() {
    let server = MockServer::start_async().await;

    let embed_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/embed");
            then.status(429).body("rate limit exceeded");
        })
        .await;

    let upsert_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/vectors/upsert");
            then.status(200).json_body(serde_json::json!({}));
        })
        .await;

    let config = mock_config(&server);
    let err = IngestionPipeline::new(&config)
        .ingest(sample_pages(), "report.pdf")
        .await
        .expect_err("embedding failure must abort");

    match err {
        AppError::RemoteService { status, .. } => assert_eq!(status, 429),
        other => panic!("expected remote service error, got {other:?}"),
    }

    // The first embedding call fails, so no further embeds and no upsert.
    assert_eq!(embed_mock.hits_async().await, 1);
    assert_eq!(upsert_mock.hits_async().await, 0);
}
