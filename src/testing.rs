//! Mock product endpoint for tests.

use axum::Router;
use tokio::net::TcpListener;

pub const PRODUCT_PATH: &str = "/api/products/product.json";

/// Serve `router` on an ephemeral local port and return the product URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}{}", addr, PRODUCT_PATH)
}

/// A URL on a port nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, PRODUCT_PATH)
}
