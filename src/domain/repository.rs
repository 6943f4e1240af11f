use async_trait::async_trait;
use super::todo::{CreateTodo, SortOrder, Todo, TodoId, WriteResult};

#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: CreateTodo) -> anyhow::Result<TodoId>;
    async fn get(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    async fn list(&self, sort: Option<SortOrder>) -> anyhow::Result<Vec<Todo>>;
    /// Inclusive, lexical comparison on `date`, ordered by `date`.
    async fn list_between(&self, start: String, end: String) -> anyhow::Result<Vec<Todo>>;
    /// Writes all four fields of `todo` to the row with its id.
    async fn update(&self, todo: &Todo) -> anyhow::Result<WriteResult>;
    async fn delete(&self, id: TodoId) -> anyhow::Result<WriteResult>;
}
