use std::time::Duration;

use sandledger_api::types::Ship;
use sandledger_api::{Client, ClientConfig, Error, ListQuery, Paginator};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Answers every request with one record and a `next` link to the following
/// page number, forever.
struct EndlessPages {
    base: String,
}

impl Respond for EndlessPages {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let n: u64 = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "n")
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);
        ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"n": n}],
            "next": format!("{}?n={}", self.base, n + 1),
        }))
    }
}

#[tokio::test]
async fn bare_array_is_returned_after_one_request() {
    let mock_server = MockServer::start().await;
    let body = json!([{"id": 3}, {"id": 1}, {"id": 2}]);

    Mock::given(method("GET"))
        .and(path("/api/projects/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let records = client
        .fetch_all::<ListQuery>("projects/", None)
        .await
        .unwrap();

    assert_eq!(records, body.as_array().unwrap().clone());
}

#[tokio::test]
async fn two_pages_are_concatenated_in_order() {
    let mock_server = MockServer::start().await;
    // Deliberately outside the configured base address.
    let page2 = format!("{}/elsewhere/incomes-page-2?cursor=abc", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/incomes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": ["a", "b"],
            "next": page2,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/elsewhere/incomes-page-2"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": ["c", "d"],
            "next": null,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let records = client
        .fetch_all::<ListQuery>("incomes/", None)
        .await
        .unwrap();

    assert_eq!(records, vec![json!("a"), json!("b"), json!("c"), json!("d")]);
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn query_is_sent_on_the_first_request_only() {
    let mock_server = MockServer::start().await;
    let page2 = format!("{}/api/incomes/?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/incomes/"))
        .and(query_param("ship", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1}],
            "next": page2,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/incomes/"))
        .and(query_param("page", "2"))
        .and(query_param_is_missing("ship"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 2}],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let query = ListQuery::new().with_param("ship", "2");
    let records = client.fetch_all("incomes/", Some(&query)).await.unwrap();

    assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[tokio::test]
async fn missing_records_field_contributes_nothing() {
    let mock_server = MockServer::start().await;
    let page2 = format!("{}/api/assets/?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/assets/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "next": page2,
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/assets/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 8}],
            "next": null,
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let records = client
        .fetch_all::<ListQuery>("assets/", None)
        .await
        .unwrap();

    assert_eq!(records, vec![json!({"id": 8})]);
}

#[tokio::test]
async fn envelope_without_records_or_next_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ships/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "nothing here"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let records = client.fetch_all::<ListQuery>("ships/", None).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn bare_list_on_a_follow_up_page_ends_the_chain() {
    let mock_server = MockServer::start().await;
    let page2 = format!("{}/api/ships/?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/ships/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"id": 1, "name": "MV Padma"}],
            "next": page2,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/ships/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "name": "MV Meghna"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let ships: Vec<Ship> = Paginator::new(&client)
        .fetch_all_as::<Ship, ListQuery>("ships/", None)
        .await
        .unwrap();

    assert_eq!(ships.len(), 2);
    assert_eq!(ships[0].name, "MV Padma");
    assert_eq!(ships[1].name, "MV Meghna");
}

#[tokio::test]
async fn second_page_timeout_fails_the_whole_call() {
    let mock_server = MockServer::start().await;
    let page2 = format!("{}/api/incomes/?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/incomes/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": ["a", "b"],
            "next": page2,
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/incomes/"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"results": ["c"], "next": null}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new(api_base(&mock_server)).with_timeout(Duration::from_millis(200));
    let client = Client::new(config).unwrap();
    let result = client.fetch_all::<ListQuery>("incomes/", None).await;

    let err = result.unwrap_err();
    assert!(err.is_timeout(), "expected a timeout, got {:?}", err);
}

#[tokio::test]
async fn second_page_server_error_fails_the_whole_call() {
    let mock_server = MockServer::start().await;
    let page2 = format!("{}/api/incomes/?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/incomes/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": ["a", "b"],
            "next": page2,
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/incomes/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let result = client.fetch_all::<ListQuery>("incomes/", None).await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 502, .. })));
}

#[tokio::test]
async fn invalid_continuation_reference_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/incomes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": ["a"],
            "next": "/api/incomes/?page=2",
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let result = client.fetch_all::<ListQuery>("incomes/", None).await;
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[tokio::test]
async fn endless_next_links_keep_the_loop_running() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/feed/", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/feed/"))
        .respond_with(EndlessPages { base })
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let outcome = tokio::time::timeout(
        Duration::from_millis(500),
        client.fetch_all::<ListQuery>("feed/", None),
    )
    .await;

    assert!(outcome.is_err(), "aggregator returned on its own");
    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests.len() > 3, "only {} requests were made", requests.len());
}

#[tokio::test]
async fn page_budget_stops_an_endless_chain() {
    let mock_server = MockServer::start().await;
    let base = format!("{}/api/feed/", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/feed/"))
        .respond_with(EndlessPages { base })
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let result = Paginator::new(&client)
        .with_max_pages(3)
        .fetch_all::<ListQuery>("feed/", None)
        .await;

    assert!(matches!(
        result,
        Err(Error::PaginationNotTerminated { pages: 3 })
    ));
}

#[tokio::test]
async fn page_budget_is_not_an_error_when_the_chain_ends_in_time() {
    let mock_server = MockServer::start().await;
    let page2 = format!("{}/api/ships/?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/ships/"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [1],
            "next": page2,
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/ships/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [2],
            "next": null,
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&api_base(&mock_server)).unwrap();
    let records = Paginator::new(&client)
        .with_max_pages(2)
        .fetch_all::<ListQuery>("ships/", None)
        .await
        .unwrap();
    assert_eq!(records, vec![json!(1), json!(2)]);
}
