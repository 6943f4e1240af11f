use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{CreateTodo, SortOrder, Todo, TodoId, WriteResult},
};

// DATETIME has numeric affinity, so digit-only dates are stored as INTEGER.
const SELECT_TODOS: &str = "SELECT id, title, description, priority, CAST(date AS TEXT) AS date FROM todos";

/// Single shared handle onto the `todos` table.
#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    /// Opens the database file (created when missing) behind one long-lived
    /// connection. `sqlite::memory:` databases survive as long as the pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url {database_url}"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .with_context(|| format!("opening {database_url}"))?;
        Ok(Self { pool: Arc::new(pool) })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                priority TEXT NOT NULL,
                date DATETIME NOT NULL
            )",
        )
        .execute(&*self.pool)
        .await
        .context("creating todos table")?;
        tracing::info!("todos table ready");
        Ok(())
    }

    async fn create(&self, input: CreateTodo) -> Result<TodoId> {
        // RETURNING keeps the id tied to this statement rather than a later lookup.
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO todos (title, description, priority, date)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.priority)
        .bind(&input.date)
        .fetch_one(&*self.pool)
        .await?;
        Ok(TodoId(id))
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query(&format!("{SELECT_TODOS} WHERE id = ?1"))
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_todo).transpose()
    }

    async fn list(&self, sort: Option<SortOrder>) -> Result<Vec<Todo>> {
        let order = match sort {
            Some(SortOrder::Asc) => "title ASC",
            Some(SortOrder::Desc) => "title DESC",
            None => "id",
        };
        let rows = sqlx::query(&format!("{SELECT_TODOS} ORDER BY {order}"))
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn list_between(&self, start: String, end: String) -> Result<Vec<Todo>> {
        let rows = sqlx::query(&format!("{SELECT_TODOS} WHERE todos.date BETWEEN ?1 AND ?2 ORDER BY todos.date"))
            .bind(start)
            .bind(end)
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_todo).collect()
    }

    async fn update(&self, todo: &Todo) -> Result<WriteResult> {
        let result = sqlx::query("UPDATE todos SET title = ?2, description = ?3, priority = ?4, date = ?5 WHERE id = ?1")
            .bind(todo.id.0)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(&todo.priority)
            .bind(&todo.date)
            .execute(&*self.pool)
            .await?;
        Ok(WriteResult { changes: result.rows_affected() })
    }

    async fn delete(&self, id: TodoId) -> Result<WriteResult> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(WriteResult { changes: result.rows_affected() })
    }
}

fn row_to_todo(row: SqliteRow) -> Result<Todo> {
    Ok(Todo {
        id: TodoId(row.try_get("id")?),
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        priority: row.try_get("priority")?,
        date: row.try_get("date")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteTodoRepository {
        let repo = SqliteTodoRepository::connect("sqlite::memory:").await.unwrap();
        repo.init().await.unwrap();
        repo
    }

    fn input(title: &str, date: &str) -> CreateTodo {
        CreateTodo { title: title.into(), description: "desc".into(), priority: "normal".into(), date: date.into() }
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let repo = repo().await;
        repo.init().await.unwrap();
        assert!(repo.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let repo = repo().await;
        let first = repo.create(input("a", "2024-01-01")).await.unwrap();
        let second = repo.create(input("b", "2024-01-02")).await.unwrap();
        assert!(first.0 > 0);
        assert!(second.0 > first.0);
    }

    #[tokio::test]
    async fn list_defaults_to_insertion_order() {
        let repo = repo().await;
        for title in ["pear", "apple", "fig"] {
            repo.create(input(title, "2024-01-01")).await.unwrap();
        }
        let titles: Vec<String> = repo.list(None).await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["pear", "apple", "fig"]);
        let titles: Vec<String> = repo.list(Some(SortOrder::Desc)).await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["pear", "fig", "apple"]);
    }

    #[tokio::test]
    async fn numeric_dates_read_back_as_text() {
        let repo = repo().await;
        let id = repo.create(input("epoch", "1700000000")).await.unwrap();
        repo.create(input("decimal", "2024.5")).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap().unwrap().date, "1700000000");
        let dates: Vec<String> = repo.list(None).await.unwrap().into_iter().map(|t| t.date).collect();
        assert_eq!(dates, ["1700000000", "2024.5"]);
    }

    #[tokio::test]
    async fn update_and_delete_report_changes() {
        let repo = repo().await;
        let id = repo.create(input("a", "2024-01-01")).await.unwrap();
        let mut todo = repo.get(id).await.unwrap().unwrap();
        todo.priority = "high".into();
        assert_eq!(repo.update(&todo).await.unwrap().changes, 1);
        assert_eq!(repo.get(id).await.unwrap().unwrap().priority, "high");
        assert_eq!(repo.delete(id).await.unwrap().changes, 1);
        assert_eq!(repo.delete(id).await.unwrap().changes, 0);
        assert!(repo.get(id).await.unwrap().is_none());
    }
}
