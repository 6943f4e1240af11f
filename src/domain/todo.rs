use serde::{Deserialize, Serialize};

/// Storage-assigned rowid of a todo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Reads the leading integer of a path segment, ignoring trailing text
    /// (`"5abc"` is 5, `"4.2"` is 4). Segments without one match no row.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim_start();
        let sign_len = usize::from(s.starts_with(['+', '-']));
        let digits = s[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        s[..sign_len + digits].trim_start_matches('+').parse().ok().map(Self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub priority: String,
    /// Kept as the client sent it; range queries compare it lexically.
    pub date: String,
}

impl Todo {
    /// Overlays every field present in `patch`, empty strings included.
    pub fn apply(mut self, patch: UpdateTodo) -> Self {
        if let Some(title) = patch.title { self.title = title; }
        if let Some(description) = patch.description { self.description = description; }
        if let Some(priority) = patch.priority { self.priority = priority; }
        if let Some(date) = patch.date { self.date = date; }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub date: Option<String>,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.priority.is_none() && self.date.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder { Asc, Desc }

impl SortOrder {
    /// Only the exact values `asc` and `desc` select an order.
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Rows touched by a single write statement.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct WriteResult {
    pub changes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(WriteResult),
    NotFound,
    NoFields,
}
