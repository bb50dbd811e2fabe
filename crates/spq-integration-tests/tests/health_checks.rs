//! Integration tests for the liveness probe

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{FailingQueue, MockQueue, RunningServer};
use spq_api::create_router;
use spq_core::Ports;
use std::sync::Arc;
use tower::ServiceExt;

/// Verify that health endpoint returns 200 with no queue attached
#[tokio::test]
async fn test_health_endpoint_returns_200_without_queue() {
    // Arrange
    let app = create_router(Ports::default());
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}

/// Verify that health does not consult the queue backend
#[tokio::test]
async fn test_health_endpoint_does_not_touch_queue() {
    // Arrange
    let queue = Arc::new(MockQueue::with_items(&["a"]));
    let app = create_router(Ports::with_queue(queue.clone()));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(queue.fetch_calls(), 0);
    assert_eq!(queue.len(), 1);
}

/// Verify that a failing backend does not affect liveness
#[tokio::test]
async fn test_health_endpoint_returns_200_when_queue_is_broken() {
    // Arrange
    let app = create_router(Ports::with_queue(Arc::new(FailingQueue::broken())));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}

/// Verify the probe over a real socket
#[tokio::test]
async fn test_health_endpoint_over_tcp() {
    // Arrange
    let server = RunningServer::start(Ports::default()).await;

    // Act
    let response = reqwest::get(server.url("/health")).await.unwrap();

    // Assert
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.bytes().await.unwrap().is_empty());

    server.shutdown().await.unwrap();
}

/// Verify that HEAD is answered like GET
#[tokio::test]
async fn test_health_endpoint_answers_head() {
    // Arrange
    let app = create_router(Ports::default());
    let request = Request::builder()
        .method("HEAD")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    // Act
    let response = app.oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}
