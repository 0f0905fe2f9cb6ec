/// GET /healthz - Liveness check, plain-text `ok`
pub async fn healthz() -> &'static str {
    "ok"
}
