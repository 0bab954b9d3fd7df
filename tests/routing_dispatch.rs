// tests/routing_dispatch.rs
//
// Routing correctness: each of the five article path shapes dispatches to
// the intended handler, and the `{pk}` segment is extracted and passed
// through to it.
use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt as _;

mod support;

/// 5 つのパス形状がそれぞれ意図したハンドラへ振り分けられることを確認する
#[tokio::test]
async fn five_path_shapes_dispatch_to_their_handlers() {
    let (app, repo) = support::make_test_router();

    // create: POST /create/
    let resp = app
        .clone()
        .oneshot(support::json_request(
            "POST",
            "/api/v1/articles/create/",
            &json!({"title": "First post", "body": "hello world", "publish": true}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = support::response_json(resp).await;
    let pk = created["id"].as_i64().unwrap();
    assert_eq!(repo.len(), 1);

    // list: GET /
    let resp = app
        .clone()
        .oneshot(support::empty_request("GET", "/api/v1/articles/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let listing = support::response_json(resp).await;
    assert_eq!(listing["items"].as_array().unwrap().len(), 1);
    assert_eq!(listing["items"][0]["id"].as_i64().unwrap(), pk);

    // detail: GET /{pk} — the captured pk reaches the handler
    let resp = app
        .clone()
        .oneshot(support::empty_request(
            "GET",
            &format!("/api/v1/articles/{pk}"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let detail = support::response_json(resp).await;
    assert_eq!(detail["id"].as_i64().unwrap(), pk);
    assert_eq!(detail["title"], "First post");

    // update: PUT /{pk}/update/
    let resp = app
        .clone()
        .oneshot(support::json_request(
            "PUT",
            &format!("/api/v1/articles/{pk}/update/"),
            &json!({"title": "Renamed post"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = support::response_json(resp).await;
    assert_eq!(updated["title"], "Renamed post");
    assert_eq!(repo.get(pk).unwrap().title.as_str(), "Renamed post");

    // delete: DELETE /{pk}/delete/
    let resp = app
        .clone()
        .oneshot(support::empty_request(
            "DELETE",
            &format!("/api/v1/articles/{pk}/delete/"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = support::response_json(resp).await;
    assert_eq!(body["status"], "deleted");
    assert_eq!(repo.len(), 0);
}

/// 静的セグメント `/create/` が `{pk}` キャプチャより優先されることを確認する
#[tokio::test]
async fn static_create_segment_wins_over_pk_capture() {
    let (app, _repo) = support::make_test_router();

    // GET on /create/ must hit the create route (405: POST only), not the
    // detail handler with pk == "create".
    let resp = app
        .oneshot(support::empty_request("GET", "/api/v1/articles/create/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// 数値でない pk は 400 で拒否されることを確認する
#[tokio::test]
async fn non_numeric_pk_is_rejected_before_the_handler() {
    let (app, _repo) = support::make_test_router();

    let resp = app
        .oneshot(support::empty_request("GET", "/api/v1/articles/not-a-pk"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

/// 存在しない pk は 404 を返すことを確認する
#[tokio::test]
async fn unknown_pk_returns_404() {
    let (app, _repo) = support::make_test_router();

    for req in [
        support::empty_request("GET", "/api/v1/articles/999"),
        support::json_request(
            "PUT",
            "/api/v1/articles/999/update/",
            &json!({"title": "x"}),
        ),
        support::empty_request("DELETE", "/api/v1/articles/999/delete/"),
    ] {
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = support::response_json(resp).await;
        assert_eq!(body["error"], "Not Found");
    }
}

/// ルートに登録されていないメソッドは 405 になることを確認する
#[tokio::test]
async fn unregistered_methods_are_rejected() {
    let (app, _repo) = support::make_test_router();

    let resp = app
        .clone()
        .oneshot(support::json_request(
            "POST",
            "/api/v1/articles/7",
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let resp = app
        .oneshot(support::empty_request("PUT", "/api/v1/articles/"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// ヘルスチェックが 200 を返すことを確認する
#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (app, _repo) = support::make_test_router();

    let resp = app
        .oneshot(support::empty_request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = support::response_json(resp).await;
    assert_eq!(body["status"], "ok");
}
