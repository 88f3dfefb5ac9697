//! Assertions for the two error shapes the API produces: RFC 7807 problem
//! details for handler errors, and the bearer gate's plain-text 401.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, CONTENT_TYPE};
use actix_web::http::StatusCode;
use serde::Deserialize;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";
const TRACE_ID_HEADER: &str = "x-trace-id";

/// The backend's problem body. Unknown fields are rejected so a renamed
/// field fails loudly.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Check status, content type, code and optional detail fragment, and that
/// the body's `trace_id` equals the `x-trace-id` header. Returns the body.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status);

    let content_type = header_str(headers, CONTENT_TYPE.as_str());
    assert!(
        content_type.starts_with(PROBLEM_CONTENT_TYPE),
        "expected {PROBLEM_CONTENT_TYPE}, got {content_type:?}"
    );

    let problem: ProblemDetailsLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "body is not problem details ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(
        problem.type_,
        format!("urn:api-starter:error:{}", expected_code.to_lowercase())
    );
    assert!(!problem.title.is_empty());

    let trace_header = header_str(headers, TRACE_ID_HEADER);
    assert!(!trace_header.is_empty(), "{TRACE_ID_HEADER} header missing");
    assert_eq!(problem.trace_id, trace_header);

    if let Some(fragment) = expected_detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "detail {:?} should contain {fragment:?}",
            problem.detail
        );
    }

    problem
}

/// [`assert_problem_details_from_parts`] over a whole `ServiceResponse`.
pub async fn assert_problem_details_from_service_response<B>(
    resp: ServiceResponse<B>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike
where
    B: MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    )
}

/// The bearer gate's rejection: 401, `text/plain`, exactly `expected_message`.
pub async fn assert_plain_unauthorized<B>(resp: ServiceResponse<B>, expected_message: &str)
where
    B: MessageBody,
{
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let content_type = header_str(resp.headers(), CONTENT_TYPE.as_str()).to_owned();
    assert!(
        content_type.starts_with("text/plain"),
        "bearer gate 401 should be text/plain, got {content_type:?}"
    );

    let body = actix_web::test::read_body(resp).await;
    assert_eq!(String::from_utf8_lossy(&body), expected_message);
}
