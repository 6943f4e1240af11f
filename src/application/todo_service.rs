use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, SortOrder, Todo, TodoId, UpdateOutcome, UpdateTodo};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> Result<TodoId>;
    async fn get(&self, id: TodoId) -> Result<Option<Todo>>;
    async fn list(&self, sort: Option<SortOrder>) -> Result<Vec<Todo>>;
    async fn list_between(&self, start: String, end: String) -> Result<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<UpdateOutcome>;
    /// `false` when no row had this id.
    async fn delete(&self, id: TodoId) -> Result<bool>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }

    pub fn repository(&self) -> &R { &self.repo }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: CreateTodo) -> Result<TodoId> {
        let id = self.repo.create(input).await?;
        tracing::debug!(id = id.0, "todo created");
        Ok(id)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> { self.repo.get(id).await }

    async fn list(&self, sort: Option<SortOrder>) -> Result<Vec<Todo>> { self.repo.list(sort).await }

    async fn list_between(&self, start: String, end: String) -> Result<Vec<Todo>> {
        self.repo.list_between(start, end).await
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<UpdateOutcome> {
        let Some(existing) = self.repo.get(id).await? else { return Ok(UpdateOutcome::NotFound) };
        if input.is_empty() {
            return Ok(UpdateOutcome::NoFields);
        }
        let merged = existing.apply(input);
        let result = self.repo.update(&merged).await?;
        Ok(UpdateOutcome::Updated(result))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let result = self.repo.delete(id).await?;
        tracing::debug!(id = id.0, changes = result.changes, "todo delete");
        Ok(result.changes > 0)
    }
}
