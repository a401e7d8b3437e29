//! `TodosApi` over reqwest against the live mock server.
//!
//! # Design
//! Each test binds the mock server to a random port inside the test's own
//! runtime, then drives the accessor over real HTTP.

use todos_core::{
    ApiError, ClientConfig, HttpTransport, NewTodo, ReqwestExchange, Todo, TodoPatch, TodosApi,
    TransportError,
};

type HttpApi = TodosApi<HttpTransport<ReqwestExchange>>;

fn accessor(config: &ClientConfig) -> HttpApi {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    TodosApi::over_http(config, client)
}

async fn start(seed: Vec<todos_mock_server::Todo>) -> HttpApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(todos_mock_server::run_with(listener, seed));
    accessor(&ClientConfig::new(&format!("http://{addr}")))
}

fn seed(id: u64, user_id: u64, title: &str) -> todos_mock_server::Todo {
    todos_mock_server::Todo {
        id,
        user_id,
        title: title.to_string(),
        completed: false,
    }
}

#[tokio::test]
async fn get_todos_returns_owned_todos() {
    let api = start(vec![seed(1, 1606, "x"), seed(2, 99, "not ours")]).await;

    let todos = api.get_todos().await.unwrap();
    assert_eq!(
        todos,
        vec![Todo {
            id: 1,
            user_id: Some(1606),
            title: Some("x".to_string()),
            completed: Some(false),
            ..Todo::default()
        }]
    );
}

#[tokio::test]
async fn post_todo_returns_assigned_id() {
    let api = start(vec![seed(41, 1606, "seed")]).await;

    let created = api.post_todo(&NewTodo::new(1606, "y")).await.unwrap();
    assert_eq!(
        created,
        Todo {
            id: 42,
            user_id: Some(1606),
            title: Some("y".to_string()),
            completed: Some(false),
            ..Todo::default()
        }
    );
}

#[tokio::test]
async fn patch_todo_returns_server_view() {
    let api = start(vec![seed(42, 1606, "y")]).await;

    let updated = api.patch_todo(&TodoPatch::completed(true), 42).await.unwrap();
    assert_eq!(updated.id, 42);
    assert_eq!(updated.title.as_deref(), Some("y"));
    assert_eq!(updated.completed, Some(true));
}

#[tokio::test]
async fn lifecycle() {
    let api = start(Vec::new()).await;
    assert!(api.get_todos().await.unwrap().is_empty());

    let created = api.post_todo(&NewTodo::new(1606, "Integration test")).await.unwrap();

    let updated = api.patch_todo(&TodoPatch::title("Renamed"), created.id).await.unwrap();
    assert_eq!(updated.title.as_deref(), Some("Renamed"));
    assert_eq!(api.get_todos().await.unwrap(), vec![updated]);

    api.delete_todo(created.id).await.unwrap();
    assert!(api.get_todos().await.unwrap().is_empty());

    let err = api.delete_todo(created.id).await.unwrap_err();
    assert!(matches!(err, TransportError::Api(ApiError::NotFound)));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = accessor(&ClientConfig::new(&format!("http://{addr}")));
    let err = api.get_todos().await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn over_http_scopes_to_configured_owner() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(todos_mock_server::run_with(
        listener,
        vec![seed(1, 1606, "default owner"), seed(2, 7, "other owner")],
    ));

    let config = ClientConfig::new(&format!("http://{addr}/")).with_owner(7);
    let api = accessor(&config);
    assert_eq!(api.owner(), 7);
    assert_eq!(api.transport().base_url(), format!("http://{addr}"));

    let todos = api.get_todos().await.unwrap();
    let ids: Vec<u64> = todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2]);
}
