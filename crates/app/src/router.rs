use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;

use todo_application::{
    system_clock, Clock, TodoItemCommands, TodoItemQueries, TodoListCommands, TodoListQueries,
};
use todo_infra::{EmailService, FileService, NotificationService};
use todo_storage::Database;

use crate::{files, items, lists, telemetry};

#[derive(Clone)]
pub struct AppState {
    metrics: PrometheusHandle,
    storage: Database,
    clock: Clock,
    item_commands: TodoItemCommands,
    item_queries: TodoItemQueries,
    list_commands: TodoListCommands,
    list_queries: TodoListQueries,
    notifications: NotificationService,
    files: FileService,
}

impl AppState {
    pub fn new(metrics: PrometheusHandle, storage: Database, files: FileService) -> Self {
        let clock = system_clock();
        Self {
            metrics,
            item_commands: TodoItemCommands::new(&storage, clock.clone()),
            item_queries: TodoItemQueries::new(&storage),
            list_commands: TodoListCommands::new(storage.clone(), clock.clone()),
            list_queries: TodoListQueries::new(&storage, clock.clone()),
            notifications: NotificationService::new(EmailService::new()),
            files,
            storage,
            clock,
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.item_commands = TodoItemCommands::new(&self.storage, clock.clone());
        self.list_commands = TodoListCommands::new(self.storage.clone(), clock.clone());
        self.list_queries = TodoListQueries::new(&self.storage, clock.clone());
        self.clock = clock;
        self
    }

    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn item_commands(&self) -> &TodoItemCommands {
        &self.item_commands
    }

    pub fn item_queries(&self) -> &TodoItemQueries {
        &self.item_queries
    }

    pub fn list_commands(&self) -> &TodoListCommands {
        &self.list_commands
    }

    pub fn list_queries(&self) -> &TodoListQueries {
        &self.list_queries
    }

    pub fn notifications(&self) -> &NotificationService {
        &self.notifications
    }

    pub fn files(&self) -> &FileService {
        &self.files
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .route(
            "/api/todo-items",
            get(items::list_items).post(items::create_item),
        )
        .route(
            "/api/todo-items/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/api/todo-items/:id/start", post(items::start_item))
        .route("/api/todo-items/:id/complete", post(items::complete_item))
        .route("/api/todo-items/:id/cancel", post(items::cancel_item))
        .route("/api/todo-items/:id/reopen", post(items::reopen_item))
        .route("/api/todo-items/:id/priority", patch(items::set_item_priority))
        .route(
            "/api/todo-items/:id/due-date",
            patch(items::extend_item_due_date),
        )
        .route(
            "/api/todo-lists",
            get(lists::list_lists).post(lists::create_list),
        )
        .route(
            "/api/todo-lists/:id",
            get(lists::get_list)
                .put(lists::update_list)
                .delete(lists::delete_list),
        )
        .route("/api/todo-lists/:id/archive", post(lists::archive_list))
        .route("/api/todo-lists/:id/restore", post(lists::restore_list))
        .route("/api/todo-lists/:id/items", post(lists::add_list_item))
        .route(
            "/api/todo-lists/:id/items/:item_id",
            delete(lists::remove_list_item),
        )
        .route("/api/files/:name", put(files::upload).get(files::download))
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = telemetry::render_metrics(state.metrics());
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
        .body(Body::from(body))
        .unwrap()
}
