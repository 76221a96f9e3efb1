use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info};

/// 请求日志中间件
pub async fn request_logging_middleware(request: Request<Body>, next: Next<Body>) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start_time = Instant::now();

    debug!("{} {}", method, uri);

    let response = next.run(request).await;

    info!(
        "{} {} {} - {}ms",
        method,
        response.status().as_u16(),
        uri,
        start_time.elapsed().as_millis()
    );

    response
}
