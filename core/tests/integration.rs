//! Full CRUD lifecycle against a live server.
//!
//! # Design
//! Starts the server (in-memory storage) on a random port, then exercises
//! every client operation over real HTTP using ureq.

use todo_core::{ApiError, CreateTodo, HttpMethod, HttpResponse, TodoClient, UpdateTodo};
use todo_server::AppState;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// ureq's status-code-as-error behavior is disabled so 4xx/5xx responses
/// come back as data and the core client interprets them.
fn execute(req: todo_core::HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers,
        body,
    }
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, AppState::in_memory()).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let addr = start_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    // Step 1: list, should be empty.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create a todo.
    let create_input = CreateTodo {
        title: "Integration test".to_string(),
        completed: false,
        order: Some(1),
    };
    let req = client.build_create_todo(&create_input).unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    let todo = created.todo;
    assert_eq!(todo.title, "Integration test");
    assert!(!todo.completed);
    assert_eq!(todo.order, Some(1));
    assert_eq!(
        created.location.as_deref(),
        Some(format!("http://{addr}/todos/{}", todo.id).as_str())
    );
    let id = todo.id.clone();

    // Step 3: get the created todo.
    let fetched = client.parse_get_todo(execute(client.build_get_todo(&id))).unwrap();
    assert_eq!(fetched, todo);

    // Step 4: patch completed only.
    let update_input = UpdateTodo {
        completed: Some(true),
        ..UpdateTodo::default()
    };
    let req = client.build_update_todo(&id, &update_input).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.title, "Integration test");
    assert_eq!(updated.order, Some(1));
    assert!(updated.completed);

    // Step 5: patch title only.
    let update_input = UpdateTodo {
        title: Some("Updated title".to_string()),
        ..UpdateTodo::default()
    };
    let req = client.build_update_todo(&id, &update_input).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.title, "Updated title");
    assert!(updated.completed);

    // Step 6: delete.
    client.parse_delete_todo(execute(client.build_delete_todo(&id))).unwrap();

    // Step 7: get after delete, should be NotFound with the server's message.
    let err = client.parse_get_todo(execute(client.build_get_todo(&id))).unwrap_err();
    assert!(
        matches!(err, ApiError::NotFound(ref msg) if *msg == format!("Todo with id: '{id}' not found"))
    );

    // Step 8: delete again, should be NotFound.
    let err = client.parse_delete_todo(execute(client.build_delete_todo(&id))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn create_without_title_is_bad_request() {
    let addr = start_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    let req = todo_core::HttpRequest {
        method: HttpMethod::Post,
        path: format!("http://{addr}/todos"),
        headers: Vec::new(),
        body: Some(r#"{"completed":true}"#.to_string()),
    };
    let err = client.parse_create_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[test]
fn delete_all_empties_the_list() {
    let addr = start_server();
    let client = TodoClient::new(&format!("http://{addr}"));

    for title in ["one", "two", "three"] {
        let input = CreateTodo {
            title: title.to_string(),
            completed: false,
            order: None,
        };
        let req = client.build_create_todo(&input).unwrap();
        client.parse_create_todo(execute(req)).unwrap();
    }
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert_eq!(todos.len(), 3);

    client
        .parse_delete_all_todos(execute(client.build_delete_all_todos()))
        .unwrap();

    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list after delete all");
}
