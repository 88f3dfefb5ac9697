mod support;

use std::time::SystemTime;

use actix_web::http::StatusCode;
use actix_web::test;
use api_starter::auth::{TokenKind, TokenProvider};
use api_starter::routes::labubu::LabubuResponse;
use backend_test_support::problem_details::{
    assert_plain_unauthorized, assert_problem_details_from_service_response,
};
use serde_json::json;
use support::{bearer, create_test_app, test_state, test_state_without_db, CountingTokens};

fn access_token(state: &api_starter::AppState) -> String {
    state.auth.login().expect("login").access_token
}

#[actix_web::test]
async fn create_then_list_returns_both_in_id_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = access_token(&state);
    let app = create_test_app(state).with_prod_routes().build().await;

    let mut created = Vec::new();
    for text in ["a", "b"] {
        let req = test::TestRequest::post()
            .uri("/labubu")
            .insert_header(bearer(&token))
            .set_json(json!({ "text": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: LabubuResponse = test::read_body_json(resp).await;
        assert_eq!(body.text, text);
        created.push(body);
    }
    assert_ne!(created[0].id, created[1].id);

    let req = test::TestRequest::get()
        .uri("/labubu")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let listed: Vec<LabubuResponse> = test::read_body_json(resp).await;
    assert_eq!(listed, created);
    assert!(listed[0].id < listed[1].id);
    Ok(())
}

#[actix_web::test]
async fn get_by_id_finds_created_labubu() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = access_token(&state);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/labubu")
        .insert_header(bearer(&token))
        .set_json(json!({ "text": "pink one" }))
        .to_request();
    let created: LabubuResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri(&format!("/labubu/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let fetched: LabubuResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(fetched, created);
    Ok(())
}

#[actix_web::test]
async fn list_starts_empty() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = access_token(&state);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/labubu")
        .insert_header(bearer(&token))
        .to_request();
    let listed: Vec<LabubuResponse> = test::call_and_read_body_json(&app, req).await;

    assert!(listed.is_empty());
    Ok(())
}

#[actix_web::test]
async fn empty_or_blank_text_is_a_validation_problem() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = access_token(&state);
    let app = create_test_app(state).with_prod_routes().build().await;

    for text in ["", "   "] {
        let req = test::TestRequest::post()
            .uri("/labubu")
            .insert_header(bearer(&token))
            .set_json(json!({ "text": text }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "VALIDATION_ERROR",
            StatusCode::BAD_REQUEST,
            Some("text must not be empty"),
        )
        .await;
    }

    // nothing was stored by the failed attempts
    let req = test::TestRequest::get()
        .uri("/labubu")
        .insert_header(bearer(&token))
        .to_request();
    let listed: Vec<LabubuResponse> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());
    Ok(())
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request_problem() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = access_token(&state);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/labubu")
        .insert_header(bearer(&token))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"text\":")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None)
        .await;
    Ok(())
}

#[actix_web::test]
async fn missing_id_is_not_found_and_bad_id_is_bad_request(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let token = access_token(&state);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/labubu/424242")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "LABUBU_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("424242"),
    )
    .await;

    for bad in ["abc", "0", "-1"] {
        let req = test::TestRequest::get()
            .uri(&format!("/labubu/{bad}"))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "INVALID_LABUBU_ID",
            StatusCode::BAD_REQUEST,
            None,
        )
        .await;
    }
    Ok(())
}

#[actix_web::test]
async fn every_labubu_route_requires_a_token() -> Result<(), Box<dyn std::error::Error>> {
    let tokens = CountingTokens::new();
    let state = support::test_state_with_tokens(tokens.clone()).await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let requests = [
        test::TestRequest::post()
            .uri("/labubu")
            .set_json(json!({ "text": "x" })),
        test::TestRequest::get().uri("/labubu"),
        test::TestRequest::get().uri("/labubu/1"),
    ];

    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_plain_unauthorized(resp, "Authorization header required").await;
    }
    assert_eq!(tokens.verify_calls(), 0);

    // a refresh token opens the same doors
    let refresh = tokens.generate(TokenKind::Refresh, SystemTime::now())?;
    let req = test::TestRequest::get()
        .uri("/labubu")
        .insert_header(bearer(&refresh))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn without_a_database_storage_routes_are_unavailable(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state_without_db().await?;
    let token = access_token(&state);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/labubu")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("retry-after").unwrap(), "1");
    assert_problem_details_from_service_response(
        resp,
        "DB_UNAVAILABLE",
        StatusCode::SERVICE_UNAVAILABLE,
        None,
    )
    .await;
    Ok(())
}
