//! End-to-end tests over a real listener.

use std::time::Duration;

use reqwest::{header, Method, StatusCode};

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_route_table_over_http() {
    let client = client();
    for strategy in common::STRATEGIES {
        let (addr, shutdown) = common::start_server(strategy).await;

        for &(m, path, status, body) in common::CASES {
            let method = Method::from_bytes(m.as_bytes()).unwrap();
            let res = client
                .request(method.clone(), format!("http://{}{}", addr, path))
                .send()
                .await
                .expect("server unreachable");

            assert_eq!(res.status().as_u16(), status, "{} {} ({})", m, path, strategy);
            let text = res.text().await.unwrap();
            if method == Method::HEAD {
                assert!(text.is_empty(), "HEAD {} returned a body", path);
            } else {
                assert_eq!(text, body, "{} {} ({})", m, path, strategy);
            }
        }

        shutdown.trigger();
    }
}

#[tokio::test]
async fn test_head_matches_get_content_length() {
    let client = client();
    let (addr, shutdown) = common::start_server(common::STRATEGIES[0]).await;

    for path in ["/", "/contact", "/api/widgets", "/foo/admin", "/foo%20bar"] {
        let url = format!("http://{}{}", addr, path);
        let get = client.get(&url).send().await.unwrap();
        let head = client.head(&url).send().await.unwrap();

        assert_eq!(get.status(), StatusCode::OK, "GET {}", path);
        assert_eq!(head.status(), StatusCode::OK, "HEAD {}", path);
        let get_len = get.headers()[header::CONTENT_LENGTH].clone();
        assert_eq!(head.headers()[header::CONTENT_LENGTH], get_len, "{}", path);
        assert_eq!(
            head.headers()[header::CONTENT_TYPE],
            get.headers()[header::CONTENT_TYPE]
        );

        let body = get.text().await.unwrap();
        assert_eq!(get_len.to_str().unwrap(), body.len().to_string());
        assert!(head.text().await.unwrap().is_empty());
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_method_not_allowed_sets_allow() {
    let (addr, shutdown) = common::start_server(common::STRATEGIES[1]).await;
    let client = client();

    let res = client
        .put(format!("http://{}/api/widgets", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[header::ALLOW], "GET, POST");

    let res = client
        .post(format!("http://{}/", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()[header::ALLOW], "GET");

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_generated_and_propagated() {
    let (addr, shutdown) = common::start_server(common::STRATEGIES[0]).await;
    let client = client();

    let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
    let generated = res.headers().get("x-request-id").expect("request id missing");
    assert!(!generated.is_empty());

    let res = client
        .get(format!("http://{}/contact", addr))
        .header("x-request-id", "given-id")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "given-id");
    assert_eq!(res.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");

    shutdown.trigger();
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let (addr, shutdown) = common::start_server(common::STRATEGIES[0]).await;
    let client = client();
    let url = format!("http://{}/api/widgets/foo/parts/42/delete", addr);

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let res = client.post(&url).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        bodies.push(res.text().await.unwrap());
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0], "apiDeleteWidgetPart foo 42\n");

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let (addr, shutdown) = common::start_server(common::STRATEGIES[0]).await;
    let client = reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap();

    let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(client.get(format!("http://{}/", addr)).send().await.is_err());
}
