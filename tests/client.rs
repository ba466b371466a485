#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use reqwest::header::{HeaderValue, CONTENT_TYPE};
    use reqwest::Method;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tarefas::api::{Gateway, GatewayError, STATISTICS_PATH};
    use tarefas::db::db::Db;
    use tarefas::libs::cache::TaskCache;
    use tarefas::libs::envelope::ApiResponse;
    use tarefas::libs::service::TaskService;
    use tarefas::libs::task::{CreateTaskRequest, TaskStats, UpdateTaskRequest};
    use tarefas::server::routes::create_router;
    use tarefas::server::state::AppState;
    use tarefas::ui::App;
    use tokio::net::TcpListener;

    /// Serves `app` on an ephemeral port and returns its base URL.
    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", address)
    }

    async fn task_server() -> String {
        let state = AppState::new(TaskService::new(Db::in_memory().unwrap().conn), false);
        serve(create_router(state, &["*".to_string()])).await
    }

    fn request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest { title: title.to_string() }
    }

    #[tokio::test]
    async fn test_cache_follows_confirmed_mutations() {
        let cache = TaskCache::new(Gateway::new(task_server().await));
        let mut updates = cache.subscribe();

        assert!(cache.load().await.unwrap().is_empty());

        let first = cache.create(&request("Primeira")).await.unwrap().unwrap();
        let second = cache.create(&request("Segunda")).await.unwrap().unwrap();
        assert!(updates.has_changed().unwrap());
        let titles: Vec<String> = updates.borrow_and_update().iter().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["Segunda".to_string(), "Primeira".to_string()]);

        let toggled = cache.toggle(first.id, true).await.unwrap().unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.title, "Primeira");

        let changes = UpdateTaskRequest {
            title: Some("Segunda revisada".to_string()),
            priority: Some(4),
            ..Default::default()
        };
        let updated = cache.update(second.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.priority, 4);

        cache.delete(first.id).await.unwrap();
        let tasks = cache.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Segunda revisada");

        let reloaded = cache.load().await.unwrap();
        assert_eq!(reloaded, tasks);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_cache_unchanged() {
        let cache = TaskCache::new(Gateway::new(task_server().await));
        cache.create(&request("Fica")).await.unwrap();
        let before = cache.tasks();
        let mut updates = cache.subscribe();

        let error = cache.delete(999_999).await.unwrap_err();
        assert_eq!(error.to_string(), "Código: 404, Mensagem: Not Found");
        assert_eq!(cache.tasks(), before);
        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_update_of_uncached_task_returns_none() {
        let base_url = task_server().await;
        let writer = TaskCache::new(Gateway::new(base_url.clone()));
        let task = writer.create(&request("Só no servidor")).await.unwrap().unwrap();

        let reader = TaskCache::new(Gateway::new(base_url));
        assert!(reader.toggle(task.id, true).await.unwrap().is_none());
        assert!(reader.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_statistics_envelope_decodes() {
        let base_url = task_server().await;
        let cache = TaskCache::new(Gateway::new(base_url.clone()));
        let task = cache.create(&request("Contar")).await.unwrap().unwrap();
        cache.create(&request("Pendente")).await.unwrap();
        cache.toggle(task.id, true).await.unwrap();

        let response: ApiResponse<TaskStats> = Gateway::new(base_url).get(STATISTICS_PATH).await.unwrap();
        assert!(response.success);
        assert!(response.pagination.is_none());
        let stats = response.data.unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.percent_complete, 50.0);
    }

    #[tokio::test]
    async fn test_transport_error_from_closed_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let gateway = Gateway::new(format!("http://{}", address));
        let error = gateway.get::<Value>("/api/tarefas").await.unwrap_err();
        assert!(matches!(error, GatewayError::Transport(_)));
        assert!(error.to_string().starts_with("Erro: "));
    }

    async fn flaky(State(calls): State<Arc<AtomicUsize>>) -> (StatusCode, Json<Value>) {
        if calls.fetch_add(1, Ordering::SeqCst) == 0 {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"success": false})))
        } else {
            (StatusCode::OK, Json(json!({"success": true, "data": []})))
        }
    }

    async fn always_fails(State(calls): State<Arc<AtomicUsize>>) -> StatusCode {
        calls.fetch_add(1, Ordering::SeqCst);
        StatusCode::SERVICE_UNAVAILABLE
    }

    #[tokio::test]
    async fn test_reads_are_retried_once_and_writes_are_not() {
        let reads = Arc::new(AtomicUsize::new(0));
        let writes = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/read", get(flaky).with_state(reads.clone()))
            .route("/write", get(always_fails).post(always_fails).with_state(writes.clone()));
        let gateway = Gateway::new(serve(app).await);

        let value: Value = gateway.get("/read").await.unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(reads.load(Ordering::SeqCst), 2);

        let error = gateway.post::<_, Value>("/write", &json!({})).await.unwrap_err();
        assert_eq!(error.to_string(), "Código: 503, Mensagem: Service Unavailable");
        assert_eq!(writes.load(Ordering::SeqCst), 1);

        gateway.get::<Value>("/write").await.unwrap_err();
        assert_eq!(writes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_status_error() {
        let app = Router::new().route("/plain", get(|| async { "not json" }));
        let gateway = Gateway::new(serve(app).await);

        let error = gateway.get::<Value>("/plain").await.unwrap_err();
        let GatewayError::Status { status, status_text } = error else {
            panic!("expected status error");
        };
        assert_eq!(status, 200);
        assert!(!status_text.is_empty());
    }

    async fn echo_content_type(headers: HeaderMap) -> Json<Value> {
        let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_string);
        Json(json!({ "content_type": content_type }))
    }

    #[tokio::test]
    async fn test_json_content_type_only_with_body() {
        let app = Router::new().route("/echo", get(echo_content_type).post(echo_content_type));
        let gateway = Gateway::new(format!("{}/", serve(app).await));

        let value: Value = gateway.get("/echo").await.unwrap();
        assert!(value["content_type"].is_null());

        let value: Value = gateway.post("/echo", &json!({"a": 1})).await.unwrap();
        assert_eq!(value["content_type"], "application/json");

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        let value: Value = gateway
            .send(Method::POST, "/echo", headers, Some(b"hello".to_vec()))
            .await
            .unwrap();
        assert_eq!(value["content_type"], "text/plain");
    }

    #[tokio::test]
    async fn test_create_without_id_reloads_list() {
        let listed = json!({
            "success": true,
            "data": [{
                "id": 7,
                "title": "Do servidor",
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            }]
        });
        let app = Router::new().route(
            "/api/tarefas",
            get(move || {
                let listed = listed.clone();
                async move { Json(listed) }
            })
            .post(|| async { Json(json!({"success": true, "data": {"title": "Sem id"}})) }),
        );
        let cache = TaskCache::new(Gateway::new(serve(app).await));

        assert!(cache.create(&request("Sem id")).await.unwrap().is_none());
        let tasks = cache.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 7);
    }

    #[tokio::test]
    async fn test_unsuccessful_list_envelope_empties_cache() {
        let app = Router::new().route(
            "/api/tarefas",
            get(|| async { Json(json!({"success": false, "message": "Erro ao listar tarefas"})) }),
        );
        let cache = TaskCache::new(Gateway::new(serve(app).await));

        assert!(cache.load().await.unwrap().is_empty());
        assert!(cache.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_app_flow_and_status_messages() {
        let mut app = App::new(TaskCache::new(Gateway::new(task_server().await)));

        assert!(app.load_tasks().await);
        assert_eq!(app.take_status().as_deref(), Some("Carregadas 0 tarefas"));
        assert!(app.status().is_none());

        assert!(app.submit_title("  Comprar leite  ").await.unwrap());
        assert_eq!(app.status(), Some("Tarefa \"Comprar leite\" adicionada com sucesso"));

        assert!(!app.submit_title("ab").await.unwrap());
        assert!(app.submit_title("").await.is_err());
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.list().len(), 1);

        let id = app.tasks()[0].id;
        assert!(app.toggle_task(id).await);
        assert_eq!(app.take_status().as_deref(), Some("Tarefa concluída"));
        assert!(app.tasks()[0].completed);

        assert!(app.toggle_task(id).await);
        assert_eq!(app.take_status().as_deref(), Some("Tarefa marcada como não concluída"));

        assert!(!app.toggle_task(id + 100).await);
        assert_eq!(app.take_status(), Some(format!("Tarefa {} não está na lista", id + 100)));

        assert!(!app.on_remove_task(id + 100).await);
        assert_eq!(app.take_status().as_deref(), Some("Erro ao remover tarefa"));
        assert_eq!(app.tasks().len(), 1);

        assert!(app.on_remove_task(id).await);
        assert_eq!(app.take_status().as_deref(), Some("Tarefa removida com sucesso"));
        assert!(app.list().is_empty());
        assert!(app.list().render().contains("Nenhuma tarefa encontrada"));
    }

    #[tokio::test]
    async fn test_app_reports_unreachable_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let mut app = App::new(TaskCache::new(Gateway::new(format!("http://{}", address))));
        assert!(!app.load_tasks().await);
        assert!(!app.is_loading());
        assert_eq!(app.take_status().as_deref(), Some("Erro ao carregar tarefas"));
    }
}
