use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware для логирования HTTP запросов
///
/// Пишет в лог метод, путь, статус, длительность и размер ответа.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Читаем тело ответа, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(
                %method,
                %path,
                status = parts.status.as_u16(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "failed to read response body: {}",
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    tracing::info!(
        %method,
        %path,
        status = parts.status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        size = bytes.len(),
        "request"
    );

    Response::from_parts(parts, Body::from(bytes))
}
