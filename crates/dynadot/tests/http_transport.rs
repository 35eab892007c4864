use std::time::Duration;

use dynadot::{DynadotClient, HttpTransport};
use httpmock::prelude::*;
use registrar::{ClientConfig, CommandName, CommandRequest, Endpoint, FailureKind};
use serde_json::json;

fn client(server: &MockServer, deadline: Duration) -> DynadotClient {
    let config = ClientConfig::new(Some("test-key".into()), Endpoint::Sandbox)
        .unwrap()
        .with_deadline(deadline)
        .unwrap()
        .with_base_url(server.url("/api3.json"));
    DynadotClient::new(config).unwrap()
}

fn command(name: &str) -> CommandName {
    CommandName::new(name).unwrap()
}

#[tokio::test]
async fn success_returns_full_body_and_sends_expected_query() {
    let server = MockServer::start_async().await;
    let body = json!({
        "SearchResponse": {
            "ResponseCode": 0,
            "SearchResults": [
                {"DomainName": "example.com", "Available": "yes"},
                {"DomainName": "example.net", "Available": "no"}
            ]
        }
    });
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api3.json")
                .query_param("key", "test-key")
                .query_param("command", "search")
                .query_param("domain0", "example.com")
                .query_param("domain1", "example.net")
                .query_param("show_price", "1");
            then.status(200).json_body(body.clone());
        })
        .await;

    let request = CommandRequest::new(command("search"))
        .list_param("domain", ["example.com", "example.net"])
        .param("show_price", "1")
        .param("currency", "");
    let response = client(&server, Duration::from_secs(5))
        .invoke(request)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.get("SearchResponse"), Some(&body["SearchResponse"]));
    assert_eq!(response.into_value(), body);
}

#[tokio::test]
async fn default_transport_identifies_itself() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).header_exists("user-agent").matches(|req| {
                req.headers
                    .as_ref()
                    .into_iter()
                    .flatten()
                    .any(|(name, value)| {
                        name.eq_ignore_ascii_case("user-agent") && value.starts_with("dynadot-tools/")
                    })
            });
            then.status(200).json_body(json!({"AccountInfoResponse": {"ResponseCode": 0}}));
        })
        .await;

    client(&server, Duration::from_secs(5))
        .invoke(CommandRequest::new(command("account_info")))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn caller_supplied_reqwest_client_is_used() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .header("x-tenant", "acme")
                .query_param("command", "get_account_balance");
            then.status(200)
                .json_body(json!({"GetAccountBalanceResponse": {"ResponseCode": 0}}));
        })
        .await;

    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert("x-tenant", reqwest::header::HeaderValue::from_static("acme"));
    let http = reqwest::Client::builder().default_headers(headers).build().unwrap();

    let config = ClientConfig::new(Some("test-key".into()), Endpoint::Sandbox)
        .unwrap()
        .with_base_url(server.url("/api3.json"));
    let client = DynadotClient::with_transport(config, HttpTransport::from_client(http));

    assert_eq!(client.config().base_url(), server.url("/api3.json"));
    client
        .invoke(CommandRequest::new(command("get_account_balance")))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn application_error_inside_200() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).query_param("command", "register");
            then.status(200)
                .json_body(json!({"RegisterResponse": {"ResponseCode": -1, "Error": "bad domain"}}));
        })
        .await;

    let err = client(&server, Duration::from_secs(5))
        .invoke(CommandRequest::new(command("register")).param("domain", "bad"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Application);
    assert_eq!(err.to_string(), "bad domain");
}

#[tokio::test]
async fn non_2xx_is_transport_even_with_json_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(500)
                .json_body(json!({"SearchResponse": {"ResponseCode": 0}}));
        })
        .await;

    let err = client(&server, Duration::from_secs(5))
        .invoke(CommandRequest::new(command("search")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert_eq!(err.to_string(), "500 Internal Server Error");
}

#[tokio::test]
async fn malformed_body_is_transport() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client(&server, Duration::from_secs(5))
        .invoke(CommandRequest::new(command("account_info")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200)
                .json_body(json!({"SearchResponse": {"ResponseCode": 0}}))
                .delay(Duration::from_secs(5));
        })
        .await;

    let err = client(&server, Duration::from_millis(200))
        .invoke(CommandRequest::new(command("search")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Timeout);
    assert_eq!(err.to_string(), "search timed out after 200ms");
}

#[tokio::test]
async fn connection_failure_is_transport_and_hides_credential() {
    let config = ClientConfig::new(Some("very-secret-key".into()), Endpoint::Sandbox)
        .unwrap()
        .with_base_url("http://127.0.0.1:9/api3.json");
    let client = DynadotClient::new(config).unwrap();

    let err = client
        .invoke(CommandRequest::new(command("search")))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(!err.to_string().contains("very-secret-key"));
}

#[tokio::test]
async fn concurrent_commands_get_their_own_responses() {
    let server = MockServer::start_async().await;
    let info = server
        .mock_async(|when, then| {
            when.method(GET).query_param("command", "domain_info");
            then.status(200)
                .json_body(json!({"DomainInfoResponse": {"ResponseCode": 0, "Name": "info"}}))
                .delay(Duration::from_millis(50));
        })
        .await;
    let balance = server
        .mock_async(|when, then| {
            when.method(GET).query_param("command", "get_account_balance");
            then.status(200)
                .json_body(json!({"GetAccountBalanceResponse": {"ResponseCode": 0, "Name": "balance"}}));
        })
        .await;

    let client = client(&server, Duration::from_secs(5));
    let (a, b) = tokio::join!(
        client.invoke(CommandRequest::new(command("domain_info")).param("domain", "x.com")),
        client.invoke(CommandRequest::new(command("get_account_balance"))),
    );

    assert_eq!(a.unwrap().payload().unwrap()["Name"], "info");
    assert_eq!(b.unwrap().payload().unwrap()["Name"], "balance");
    info.assert_async().await;
    balance.assert_async().await;
}
