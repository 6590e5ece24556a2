use axum::body::to_bytes;
use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::shared::config;
use crate::shared::format::format_size;

/// Console line per HTTP request: local time, duration, response size,
/// status, method, path. Time is printed in the ranking calendar's offset.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let timestamp = Utc::now().with_timezone(&config::get().ranking.utc_offset());
    let status = parts.status.as_u16();

    // Buffer the body to learn its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            println!(
                "\x1b[33m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
                timestamp.format("%H:%M:%S"),
                start.elapsed().as_millis(),
                "error",
                status,
                method,
                path
            );
            tracing::warn!("Failed to buffer response body of {}: {}", path, e);
            return Response::from_parts(parts, Body::default());
        }
    };

    // cyan for success, yellow otherwise
    let color_code = if parts.status.is_success() { "36" } else { "33" };

    println!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
        color_code,
        timestamp.format("%H:%M:%S"),
        start.elapsed().as_millis(),
        format_size(bytes.len()),
        status,
        method,
        path
    );

    Response::from_parts(parts, Body::from(bytes))
}
