//! End-to-end routing tests over a real socket.

use reqwest::StatusCode;
use serde_json::Value;
use site_router::config::{RouteConfig, RouteTarget};
use site_router::routing::MatchKind;

mod common;

use common::{client, start_site, test_config, ADMIN_KEY};

#[tokio::test]
async fn test_root_catch_all_answers_ok() {
    let site = start_site(test_config()).await;
    let client = client();

    for path in ["/", "/health", "/nonexistent/path", "/admin"] {
        let res = client.get(site.url(path)).send().await.expect("site unreachable");
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        assert!(res.headers().contains_key("x-request-id"));
        assert_eq!(res.text().await.unwrap(), "OK");
    }

    let res = client.post(site.url("/some/form")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    site.stop().await;
}

#[tokio::test]
async fn test_admin_paths_never_reach_health() {
    let site = start_site(test_config()).await;
    let client = client();

    let res = client.get(site.url("/admin/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(site.url("/admin/status"))
        .bearer_auth(ADMIN_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "operational");

    let res = client
        .post(site.url("/admin/login"))
        .bearer_auth(ADMIN_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(site.url("/admin/missing"))
        .bearer_auth(ADMIN_KEY)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    site.stop().await;
}

#[tokio::test]
async fn test_admin_lists_route_table() {
    let site = start_site(test_config()).await;

    let routes: Vec<RouteConfig> = client()
        .get(site.url("/admin/routes"))
        .bearer_auth(ADMIN_KEY)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(routes, RouteConfig::default_table());

    site.stop().await;
}

#[tokio::test]
async fn test_disabled_admin_falls_through_to_health() {
    let mut config = test_config();
    config.admin.enabled = false;
    let site = start_site(config).await;

    let res = client().get(site.url("/admin/login")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "OK");

    site.stop().await;
}

#[tokio::test]
async fn test_unmatched_path_is_404_without_catch_all() {
    let mut config = test_config();
    config.routes = vec![
        RouteConfig::new("admin", "/admin/", MatchKind::Prefix, RouteTarget::Admin),
        RouteConfig::new("ping", "/ping", MatchKind::Exact, RouteTarget::Health),
    ];
    let site = start_site(config).await;
    let client = client();

    let res = client.get(site.url("/ping")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(site.url("/nonexistent/path")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    site.stop().await;
}

#[tokio::test]
async fn test_json_health_probe() {
    let site = start_site(test_config()).await;

    let body: Value = client()
        .get(site.url("/"))
        .header("accept", "application/json")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok" }));

    site.stop().await;
}

#[tokio::test]
async fn test_concurrent_requests_route_consistently() {
    let site = start_site(test_config()).await;
    let client = client();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let (url, expect) = if i % 2 == 0 {
            (site.url("/admin/status"), StatusCode::UNAUTHORIZED)
        } else {
            (site.url(&format!("/page/{}", i)), StatusCode::OK)
        };
        tasks.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            assert_eq!(res.status(), expect);
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    site.stop().await;
}

#[tokio::test]
async fn test_cors_preflight_for_configured_origin() {
    let mut config = test_config();
    config.security.cors_allowed_origins = vec!["http://localhost:3000".into()];
    let site = start_site(config).await;

    let res = client()
        .request(reqwest::Method::OPTIONS, site.url("/admin/login"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:3000"
    );
    assert_eq!(res.headers()["access-control-allow-credentials"], "true");

    site.stop().await;
}
