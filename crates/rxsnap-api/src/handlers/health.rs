//! Liveness probe; also the target of the keepalive pinger.

pub async fn healthz() -> &'static str {
    "ok"
}
