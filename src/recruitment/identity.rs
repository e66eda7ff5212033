use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::domain::{StaffRef, UserId};

/// Header carrying the numeric staff id, set by the authenticating proxy.
pub const STAFF_ID_HEADER: &str = "x-staff-id";
/// Header carrying the staff display name. UTF-8 values are accepted.
pub const STAFF_NAME_HEADER: &str = "x-staff-name";

/// The staff member performing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser(pub StaffRef);

impl ActingUser {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let id = header_text(headers, STAFF_ID_HEADER)?.parse::<u64>().ok()?;
        let username = header_text(headers, STAFF_NAME_HEADER)?;
        Some(Self(StaffRef::new(UserId(id), username)))
    }
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or_else(|| {
            let payload = json!({
                "error": format!(
                    "missing or invalid staff identity ({STAFF_ID_HEADER}, {STAFF_NAME_HEADER})"
                ),
            });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_identity_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(STAFF_ID_HEADER, HeaderValue::from_static("42"));
        headers.insert(
            STAFF_NAME_HEADER,
            HeaderValue::from_bytes("王面试官".as_bytes()).expect("utf-8 header"),
        );

        let ActingUser(staff) = ActingUser::from_headers(&headers).expect("identity present");
        assert_eq!(staff, StaffRef::new(UserId(42), "王面试官"));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let mut headers = HeaderMap::new();
        headers.insert(STAFF_ID_HEADER, HeaderValue::from_static("admin"));
        headers.insert(STAFF_NAME_HEADER, HeaderValue::from_static("admin"));

        assert!(ActingUser::from_headers(&headers).is_none());
    }
}
