/*
 * Responsibility
 * - GET /health (liveness; bypasses the edge function dispatcher)
 */
pub async fn health() -> &'static str {
    "ok"
}
