use tracing::error;
use uuid::Uuid;

pub const ERROR_ID_HEADER: &str = "x-error-id";

/// Logs an unexpected server error under a fresh event id, which is
/// returned so it can be echoed to the client in [`ERROR_ID_HEADER`].
///
/// Non-5xx statuses and 503 (database unavailable, already reported by the
/// pool layer) are not captured.
pub fn capture_unexpected_5xx(
    path: &str,
    method: &str,
    status: u16,
    request_id: &str,
) -> Option<Uuid> {
    if !(500..=599).contains(&status) || status == 503 {
        return None;
    }

    let event_id = Uuid::new_v4();
    error!(
        event_id = %event_id,
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status,
        "unexpected server error"
    );
    Some(event_id)
}
