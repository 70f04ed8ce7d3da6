use chainsensor_store::{
    RemoteStore, RestClient, SelectQuery, Session, StoreConfig, StoreError, Table,
};
use chainsensor_types::UserId;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer) -> RestClient {
    let config = StoreConfig {
        api_base_url: server.uri(),
        api_key: "test-key".into(),
        request_timeout_secs: 5,
    };
    RestClient::new(config, Session::new()).unwrap()
}

fn token_response() -> serde_json::Value {
    serde_json::json!({
        "access_token": "at-1",
        "refresh_token": "rt-1",
        "user": { "id": "u-1", "email": "test@example.com" }
    })
}

async fn signed_in_client(server: &MockServer) -> RestClient {
    Mock::given(method("POST"))
        .and(path("/auth/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(server)
        .await;
    let client = setup(server);
    client.sign_in("test@example.com", "password").await.unwrap();
    client
}

// --- Auth ---

#[tokio::test]
async fn not_authenticated_initially() {
    let server = MockServer::start().await;
    let client = setup(&server);
    assert!(!client.is_authenticated().await);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn sign_in_installs_identity() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    assert!(client.is_authenticated().await);
    assert_eq!(client.session().user_id(), Some(UserId::from("u-1")));
    assert_eq!(
        client.session().identity().unwrap().email,
        "test@example.com"
    );
}

#[tokio::test]
async fn sign_in_bad_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    let result = client.sign_in("bad@example.com", "wrong").await;
    assert!(matches!(result.unwrap_err(), StoreError::AuthFailed(_)));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn sign_up_installs_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    let identity = client.sign_up("test@example.com", "password").await.unwrap();
    assert_eq!(identity.user_id, UserId::from("u-1"));
}

#[tokio::test]
async fn restored_tokens_authenticate_row_reads() {
    let server = MockServer::start().await;
    let client = setup(&server);
    client
        .set_tokens(
            "at-restored".into(),
            "rt-restored".into(),
            chainsensor_store::Identity {
                user_id: UserId::from("u-1"),
                email: "test@example.com".into(),
            },
        )
        .await;
    assert!(client.is_authenticated().await);

    Mock::given(method("GET"))
        .and(path("/rest/v1/datasets"))
        .and(header("Authorization", "Bearer at-restored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client
        .select(Table::Datasets, &UserId::from("u-1"), SelectQuery::newest_first())
        .await
        .unwrap();
}

#[tokio::test]
async fn sign_out_clears_session() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    client.sign_out().await;
    assert!(!client.is_authenticated().await);
    assert!(!client.session().is_authenticated());
}

// --- Row reads ---

#[tokio::test]
async fn select_scopes_orders_and_limits() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/activities"))
        .and(query_param("user_id", "eq.u-1"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "10"))
        .and(header("apikey", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "id": "a-1" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let rows = client
        .select(
            Table::Activities,
            &UserId::from("u-1"),
            SelectQuery::newest_first().with_limit(10),
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "a-1");
}

#[tokio::test]
async fn select_without_token_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = setup(&server);
    let result = client
        .select(Table::Datasets, &UserId::from("u-1"), SelectQuery::newest_first())
        .await;
    assert!(matches!(result.unwrap_err(), StoreError::AuthRequired));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// --- Row writes ---

#[tokio::test]
async fn insert_returns_stored_row() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/datasets"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([
            { "id": "d-1", "user_id": "u-1", "name": "sales.csv" }
        ])))
        .mount(&server)
        .await;

    let stored = client
        .insert(
            Table::Datasets,
            serde_json::json!({ "user_id": "u-1", "name": "sales.csv" }),
        )
        .await
        .unwrap();
    assert_eq!(stored["id"], "d-1");
}

#[tokio::test]
async fn insert_without_representation_is_an_error() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/datasets"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let result = client
        .insert(Table::Datasets, serde_json::json!({ "user_id": "u-1" }))
        .await;
    assert!(matches!(result.unwrap_err(), StoreError::Api(_)));
}

#[tokio::test]
async fn update_patches_by_id_and_owner() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/sensors"))
        .and(query_param("id", "eq.s-1"))
        .and(query_param("user_id", "eq.u-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update(
            Table::Sensors,
            &UserId::from("u-1"),
            "s-1",
            serde_json::json!({ "status": "inactive" }),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_is_scoped_by_owner() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/datasets"))
        .and(query_param("id", "eq.d-1"))
        .and(query_param("user_id", "eq.u-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete(Table::Datasets, &UserId::from("u-1"), "d-1")
        .await
        .unwrap();
}

// --- Token refresh ---

#[tokio::test]
async fn retries_once_after_refresh_on_401() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    // First data call is rejected, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/rest/v1/datasets"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "at-2",
            "refresh_token": "rt-2",
            "user": { "id": "u-1", "email": "test@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let rows = client
        .select(Table::Datasets, &UserId::from("u-1"), SelectQuery::newest_first())
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn revoked_refresh_token_signs_out() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.refresh_access_token().await;
    assert!(matches!(result.unwrap_err(), StoreError::AuthFailed(_)));
    assert!(!client.is_authenticated().await);
    assert!(!client.session().is_authenticated());
}
