use std::sync::{Arc, Mutex};

use axum::http::StatusCode as HttpStatus;
use reqwest::StatusCode;
use serde_json::{json, Value};

use advance_api::{
    build_api, ApiOptions, BootstrapError, Endpoint, HandlerError, ModuleDescriptor,
};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(options: ApiOptions) -> Self {
        // Same router as the binary, bound to an ephemeral port.
        let app = build_api(options).expect("bootstrap failed").into_router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn route_listing(client: &reqwest::Client, server: &TestServer) -> Vec<Value> {
    let body: Value = client
        .get(server.url("/api/docs/routes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["data"].as_array().cloned().unwrap_or_default()
}

fn users_and_orders() -> ApiOptions {
    let orders: Arc<Mutex<Vec<Value>>> = Arc::default();

    ApiOptions::new().setup(move |kit| {
        let kit = kit.clone();
        Ok(vec![
            ModuleDescriptor::declarative(
                "/users",
                vec![
                    Endpoint::get("/", |_req, res| async move {
                        Ok(res.success(json!([{ "id": 1, "name": "Ada" }])))
                    }),
                    Endpoint::get("/:id", |req, res| async move {
                        let id = req.param("id").unwrap_or_default().to_string();
                        Ok(res.success(json!({ "id": id })))
                    }),
                ],
            ),
            ModuleDescriptor::imperative("/orders", move |router| {
                router.post("/", move |req, res| {
                    let orders = orders.clone();
                    let kit = kit.clone();
                    async move {
                        let body: Value = req.json()?;
                        let order = json!({ "id": kit.uuid(), "item": body["item"] });
                        orders.lock().unwrap().push(order.clone());
                        Ok(res.success(order))
                    }
                })?;
                Ok(())
            }),
        ])
    })
}

#[tokio::test]
async fn liveness_reports_status_version_and_time() {
    let server = TestServer::spawn(ApiOptions::new().version("2.3.4")).await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/advance-api-test")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["version"], "2.3.4");
    assert_eq!(body["data"]["message"], "Advance API is working!");

    let time = body["data"]["time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
    assert!(time.ends_with('Z'));
}

#[tokio::test]
async fn docs_page_and_json_listing_agree() {
    let server = TestServer::spawn(users_and_orders()).await;
    let client = reqwest::Client::new();

    let listing: Value = client
        .get(server.url("/api/docs/routes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let routes = listing["data"].as_array().unwrap();
    assert_eq!(routes.len(), 6);
    assert_eq!(routes[0]["method"], "GET");
    assert_eq!(routes[0]["path"], "/api/advance-api-test");
    assert_eq!(routes[5]["method"], "POST");
    assert_eq!(routes[5]["path"], "/api/orders");
    assert_eq!(routes[5]["module"], "imperative");

    let res = client.get(server.url("/api/docs")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/html")));

    let page = res.text().await.unwrap();
    assert_eq!(page.matches("<tr class=\"route\">").count(), routes.len());
    assert!(page.contains("6 routes"));
    assert!(page.contains("/api/users/:id"));
}

#[tokio::test]
async fn declarative_module_serves_list_and_params() {
    let server = TestServer::spawn(users_and_orders()).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(server.url("/api/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "code": 200, "data": [{ "id": 1, "name": "Ada" }], "message": "success" }));

    let body: Value = client
        .get(server.url("/api/users/42"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["id"], "42");
}

#[tokio::test]
async fn imperative_module_accepts_json_body() {
    let server = TestServer::spawn(users_and_orders()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/orders"))
        .json(&json!({ "item": "book" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["item"], "book");
    assert!(uuid::Uuid::parse_str(body["data"]["id"].as_str().unwrap()).is_ok());

    // Wrong verb on a registered path.
    let res = client.get(server.url("/api/orders")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn malformed_json_is_rejected_with_400() {
    let server = TestServer::spawn(users_and_orders()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/orders"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["code"], 400);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn without_setup_only_builtins_exist() {
    let server = TestServer::spawn(ApiOptions::new()).await;
    let client = reqwest::Client::new();

    let listing: Value = client
        .get(server.url("/api/docs/routes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["data"].as_array().unwrap().len(), 3);

    let res = client.get(server.url("/api/users")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn handler_failures_become_generic_500() {
    let options = ApiOptions::new().setup(|_kit| {
        Ok(ModuleDescriptor::declarative(
            "/fail",
            vec![
                Endpoint::get("/error", |_req, _res| async move {
                    Err(HandlerError::internal(anyhow::anyhow!("database password=hunter2")))
                }),
                Endpoint::get("/panic", |_req, _res| async move {
                    if true {
                        panic!("boom");
                    }
                    Err(HandlerError::rejected(HttpStatus::BAD_REQUEST, "unreachable"))
                }),
                Endpoint::get("/custom", |_req, res| async move {
                    Ok(res.error_with_code("quota exceeded", 429))
                }),
            ],
        ))
    });
    let server = TestServer::spawn(options).await;
    let client = reqwest::Client::new();

    let before = route_listing(&client, &server).await;
    assert_eq!(before.len(), 6);

    for path in ["/api/fail/error", "/api/fail/panic"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        let text = res.text().await.unwrap();
        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body["code"], 500);
        assert_eq!(body["message"], "Internal Server Error");
        assert!(!text.contains("hunter2"));
    }

    let res = client.get(server.url("/api/fail/custom")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "quota exceeded");

    // The server keeps answering after a panic, and nothing was registered
    // or dropped along the way.
    let res = client.get(server.url("/api/advance-api-test")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(route_listing(&client, &server).await, before);
}

#[tokio::test]
async fn unsupported_verb_is_documented_but_not_routed() {
    let options = ApiOptions::new().setup(|_kit| {
        Ok(ModuleDescriptor::declarative(
            "/profiles",
            vec![
                Endpoint::get("/:id", |_req, res| async move { Ok(res.success(())) }),
                Endpoint::new("patch", "/:id", |_req, res| async move { Ok(res.success(())) })
                    .describe("partial update"),
            ],
        ))
    });
    let server = TestServer::spawn(options).await;
    let client = reqwest::Client::new();

    let routes = route_listing(&client, &server).await;
    let patch = routes
        .iter()
        .find(|r| r["method"] == "PATCH")
        .expect("PATCH entry missing from the listing");
    assert_eq!(patch["path"], "/api/profiles/:id");
    assert_eq!(patch["description"], "partial update");

    let page = client
        .get(server.url("/api/docs"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(">PATCH</td>"));
    assert!(page.contains("partial update"));

    let res = client
        .patch(server.url("/api/profiles/7"))
        .send()
        .await
        .unwrap();
    assert!(
        matches!(res.status(), StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED),
        "unexpected status {}",
        res.status()
    );

    let res = client.get(server.url("/api/profiles/7")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn prefix_and_global_base_shape_external_paths() {
    let options = ApiOptions::new().prefix("/svc/").base("v1").setup(|kit| {
        kit.define_routes(
            "/ping",
            vec![Endpoint::get("/", |_req, res| async move { Ok(res.success("pong")) })],
        )?;
        Ok(Vec::<ModuleDescriptor>::new())
    });
    let server = TestServer::spawn(options).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(server.url("/svc/v1/ping"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"], "pong");

    let res = client.get(server.url("/svc/advance-api-test")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(server.url("/api/advance-api-test")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let server = TestServer::spawn(ApiOptions::new()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/api/advance-api-test"))
        .header("origin", "http://example.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[test]
fn failing_module_build_aborts_bootstrap() {
    let err = build_api(ApiOptions::new().setup(|_kit| {
        Ok(ModuleDescriptor::imperative("/broken", |_router| {
            anyhow::bail!("upstream unavailable")
        }))
    }))
    .unwrap_err();

    assert!(matches!(err, BootstrapError::ModuleBuild { ref base, .. } if base == "/broken"));
}

#[tokio::test]
async fn url_encoded_form_bodies_are_parsed() {
    #[derive(serde::Deserialize)]
    struct Signup {
        email: String,
    }

    let options = ApiOptions::new().setup(|_kit| {
        Ok(ModuleDescriptor::declarative(
            "/signup",
            vec![Endpoint::post("/", |req, res| async move {
                let signup: Signup = req.form()?;
                Ok(res.success(json!({ "email": signup.email })))
            })],
        ))
    });
    let server = TestServer::spawn(options).await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/signup"))
        .form(&[("email", "ada@example.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["email"], "ada@example.com");

    let res = client
        .post(server.url("/api/signup"))
        .form(&[("name", "ada")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
