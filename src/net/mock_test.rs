use super::*;
use futures::executor::block_on;
use serde_json::json;

fn send(request: HttpRequest) -> HttpResponse {
    block_on(MockTransport.send(request)).expect("mock always responds")
}

fn body(resp: &HttpResponse) -> Value {
    resp.json_body().expect("json body")
}

#[test]
fn login_issues_mock_token() {
    let request = HttpRequest::post("/api/user/login")
        .with_json_body(&json!({ "username": "amy", "password": "password1" }))
        .expect("serializable");
    let resp = send(request);
    assert_eq!(resp.status, 200);
    let body = body(&resp);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["access_token"], MOCK_TOKEN);
    assert_eq!(body["data"]["token_type"], "bearer");
    assert!(body.get("timestamp").is_some());
}

#[test]
fn login_with_blank_credentials_is_unauthorized() {
    let request = HttpRequest::post("/api/user/login")
        .with_json_body(&json!({ "username": " ", "password": "" }))
        .expect("serializable");
    let resp = send(request);
    assert_eq!(resp.status, 401);
    assert_eq!(body(&resp)["message"], "invalid username or password");
}

#[test]
fn login_without_body_is_bad_request() {
    assert_eq!(send(HttpRequest::post("/api/user/login")).status, 400);
}

#[test]
fn profile_requires_mock_token() {
    let ok = send(HttpRequest::get("/api/user/profile").with_header("Authorization", "Bearer mock-token"));
    assert_eq!(ok.status, 200);
    assert_eq!(body(&ok)["data"]["username"], "demo");

    let stale = send(HttpRequest::get("/api/user/profile").with_header("Authorization", "Bearer stale"));
    assert_eq!(stale.status, 401);
    assert_eq!(body(&stale)["code"], 401);
    assert_eq!(body(&stale)["message"], "invalid or expired token");

    assert_eq!(send(HttpRequest::get("/api/user/profile")).status, 401);
}

#[test]
fn register_echoes_submitted_user() {
    let request = HttpRequest::post("/api/user/register")
        .with_json_body(&json!({
            "username": "amy",
            "password": "password1",
            "email": "amy@example.com",
            "bio": "hi"
        }))
        .expect("serializable");
    let resp = send(request);
    let body = body(&resp);
    assert_eq!(body["data"]["username"], "amy");
    assert_eq!(body["data"]["email"], "amy@example.com");
    assert_eq!(body["data"]["bio"], "hi");
}

#[test]
fn unknown_route_is_not_found() {
    let resp = send(HttpRequest::get("/api/tasks?page=1"));
    assert_eq!(resp.status, 404);
    assert_eq!(body(&resp)["message"], "not found");
}

#[test]
fn query_string_is_ignored_when_routing() {
    let resp = send(HttpRequest::get("/api/user/profile?fresh=1").with_header("authorization", "Bearer mock-token"));
    assert_eq!(resp.status, 200);
}
