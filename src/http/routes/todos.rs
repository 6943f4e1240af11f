use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::{
    application::todo_service::TodoService,
    domain::todo::{CreateTodo, SortOrder, Todo, TodoId, UpdateOutcome, UpdateTodo},
    error::AppError,
    http::types::{ListQuery, MessageBody, UpdateResponse},
};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos::<S>).post(create_todo::<S>))
        .route("/api/todos/:id", get(get_todo::<S>).patch(update_todo::<S>).delete(delete_todo::<S>))
        // matchit rejects differing parameter names at the same position, so the
        // start date shares the `:id` slot.
        .route("/api/todos/:id/:end_date", get(list_todos_between::<S>))
        .with_state(state)
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>, Query(query): Query<ListQuery>) -> Result<Json<Vec<Todo>>, AppError> {
    let sort = query.sort.as_deref().and_then(SortOrder::from_query);
    Ok(Json(state.service.list(sort).await?))
}

async fn list_todos_between<S: TodoService>(State(state): State<AppState<S>>, Path((start_date, end_date)): Path<(String, String)>) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(state.service.list_between(start_date, end_date).await?))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(raw_id): Path<String>) -> Result<Json<Todo>, AppError> {
    let todo = match TodoId::parse(&raw_id) {
        Some(id) => state.service.get(id).await?,
        None => None,
    };
    todo.map(Json).ok_or_else(|| not_found(&raw_id))
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, Json(payload): Json<CreateTodo>) -> Result<Json<TodoId>, AppError> {
    Ok(Json(state.service.create(payload).await?))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(raw_id): Path<String>) -> Result<Json<MessageBody>, AppError> {
    let deleted = match TodoId::parse(&raw_id) {
        Some(id) => state.service.delete(id).await?,
        None => false,
    };
    if deleted {
        Ok(Json(MessageBody { msg: "The item has been deleted.".into() }))
    } else {
        Err(not_found(&raw_id))
    }
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, Path(raw_id): Path<String>, Json(payload): Json<UpdateTodo>) -> Result<Json<UpdateResponse>, AppError> {
    let Some(id) = TodoId::parse(&raw_id) else { return Err(not_found(&raw_id)) };
    match state.service.update(id, payload).await? {
        UpdateOutcome::Updated(result) => Ok(Json(UpdateResponse { msg: "Todo item updated successfully.", result })),
        UpdateOutcome::NotFound => Err(not_found(&raw_id)),
        UpdateOutcome::NoFields => Err(AppError::BadRequest(
            "Please provide at least one field to update: title, description, priority, or date.".into(),
        )),
    }
}

fn not_found(raw_id: &str) -> AppError { AppError::NotFound(format!("Todo item with ID {raw_id} not found.")) }
