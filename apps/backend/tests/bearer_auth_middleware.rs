mod support;

use std::time::{Duration, SystemTime};

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use api_starter::auth::{Claims, JwtTokens, TokenKind, TokenProvider};
use api_starter::extractors::VerifiedClaims;
use api_starter::middleware::BearerAuth;
use api_starter::state::security_config::SecurityConfig;
use backend_test_support::problem_details::assert_plain_unauthorized;
use support::{bearer, create_test_app, test_security, test_state_with_tokens, CountingTokens};

async fn echo_claims(claims: VerifiedClaims) -> HttpResponse {
    HttpResponse::Ok().json(claims.into_inner())
}

fn echo_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/protected")
            .wrap(BearerAuth)
            .route("/echo", web::get().to(echo_claims)),
    )
    .route("/open/echo", web::get().to(echo_claims));
}

#[actix_web::test]
async fn rejections_before_verification_never_reach_the_verifier(
) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = CountingTokens::new();
    let state = test_state_with_tokens(tokens.clone()).await?;
    let app = create_test_app(state).with_routes(echo_routes).build().await;

    let cases: [(Option<&str>, &str); 4] = [
        (None, "Authorization header required"),
        (Some(""), "Authorization header required"),
        (Some("Basic abc"), "Invalid authorization header format"),
        (Some("Bearer "), "Token required"),
    ];

    for (header, expected) in cases {
        let mut req = test::TestRequest::get().uri("/protected/echo");
        if let Some(value) = header {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_plain_unauthorized(resp, expected).await;
    }

    assert_eq!(tokens.verify_calls(), 0);

    let req = test::TestRequest::get()
        .uri("/protected/echo")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_plain_unauthorized(resp, "Invalid or expired token").await;

    assert_eq!(tokens.verify_calls(), 1);
    Ok(())
}

#[actix_web::test]
async fn valid_token_reaches_handler_with_unchanged_claims(
) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = CountingTokens::new();
    let state = test_state_with_tokens(tokens.clone()).await?;
    let app = create_test_app(state).with_routes(echo_routes).build().await;

    let now = SystemTime::now();
    let token = tokens.generate(TokenKind::Access, now)?;
    let expected = JwtTokens::new(test_security()).verify(&token, now)?;

    let req = test::TestRequest::get()
        .uri("/protected/echo")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-trace-id"));

    let seen: Claims = test::read_body_json(resp).await;
    assert_eq!(seen, expected);
    assert_eq!(tokens.verify_calls(), 1);
    Ok(())
}

#[actix_web::test]
async fn refresh_tokens_are_accepted_too() -> Result<(), Box<dyn std::error::Error>> {
    let tokens = CountingTokens::new();
    let state = test_state_with_tokens(tokens.clone()).await?;
    let app = create_test_app(state).with_routes(echo_routes).build().await;

    let token = tokens.generate(TokenKind::Refresh, SystemTime::now())?;
    let req = test::TestRequest::get()
        .uri("/protected/echo")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let seen: Claims = test::read_body_json(resp).await;
    assert_eq!(seen.typ, TokenKind::Refresh);
    Ok(())
}

#[actix_web::test]
async fn expired_and_foreign_tokens_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let tokens = CountingTokens::new();
    let state = test_state_with_tokens(tokens.clone()).await?;
    let app = create_test_app(state).with_routes(echo_routes).build().await;

    let two_hours_ago = SystemTime::now() - Duration::from_secs(2 * 3600);
    let expired = tokens.generate(TokenKind::Access, two_hours_ago)?;
    let foreign = JwtTokens::new(SecurityConfig::new("some-other-secret"))
        .generate(TokenKind::Access, SystemTime::now())?;

    for token in [expired, foreign] {
        let req = test::TestRequest::get()
            .uri("/protected/echo")
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_plain_unauthorized(resp, "Invalid or expired token").await;
    }

    assert_eq!(tokens.verify_calls(), 2);
    Ok(())
}

#[actix_web::test]
async fn rejection_still_carries_a_trace_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_with_tokens(CountingTokens::new()).await?;
    let app = create_test_app(state).with_routes(echo_routes).build().await;

    let req = test::TestRequest::get()
        .uri("/protected/echo")
        .insert_header(("x-request-id", "client-req-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("x-trace-id").unwrap(), "client-req-42");
    Ok(())
}

#[actix_web::test]
async fn claims_extractor_outside_the_gate_is_a_problem_401(
) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = CountingTokens::new();
    let state = test_state_with_tokens(tokens.clone()).await?;
    let app = create_test_app(state).with_routes(echo_routes).build().await;

    let token = tokens.generate(TokenKind::Access, SystemTime::now())?;
    let req = test::TestRequest::get()
        .uri("/open/echo")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("www-authenticate").unwrap(), "Bearer");
    assert_eq!(tokens.verify_calls(), 0);
    Ok(())
}
