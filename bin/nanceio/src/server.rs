//! Static file server for the built site

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

/// Name of the page served for unknown paths.
pub const NOT_FOUND_PAGE: &str = "404.html";

/// Create the router serving `output_dir`, with the 404 page as fallback.
pub fn create_router(output_dir: &Path) -> Router {
    let not_found = ServeFile::new(output_dir.join(NOT_FOUND_PAGE));
    Router::new().fallback_service(ServeDir::new(output_dir).not_found_service(not_found))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        fs::create_dir(dir.path().join("post")).unwrap();
        fs::write(dir.path().join("post/index.html"), "<h1>post</h1>").unwrap();
        fs::write(dir.path().join(NOT_FOUND_PAGE), "<h1>Not Found</h1>").unwrap();
        dir
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_serves_directory_index() {
        let dir = site();

        let (status, body) = get(create_router(dir.path()), "/post/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>post</h1>");
    }

    #[tokio::test]
    async fn test_unknown_path_serves_not_found_page() {
        let dir = site();

        let (status, body) = get(create_router(dir.path()), "/missing/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "<h1>Not Found</h1>");
    }
}
