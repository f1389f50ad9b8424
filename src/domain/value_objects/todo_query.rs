//! Lookup criteria and list-query parameters for todos.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::entities::Todo;

/// A uniqueness-qualified lookup key selecting at most one todo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TodoCriterion {
    Id(i64),
    Title(String),
}

impl TodoCriterion {
    /// Check whether a todo is the one this criterion names.
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Self::Id(id) => todo.id == *id,
            Self::Title(title) => todo.title == *title,
        }
    }
}

impl std::fmt::Display for TodoCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={}", id),
            Self::Title(title) => write!(f, "title={:?}", title),
        }
    }
}

/// Row filter for list queries. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Case-insensitive substring match on title
    pub title_contains: Option<String>,

    /// Exact match on the completion flag
    pub completed: Option<bool>,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        if let Some(needle) = &self.title_contains {
            if !todo.title.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(completed) = self.completed {
            if todo.completed != completed {
                return false;
            }
        }
        true
    }
}

/// Sortable todo columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoOrderField {
    #[default]
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
}

impl TodoOrderField {
    /// Column name in the `todos` table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Ordering for list queries. The id column always breaks ties in the
/// same direction, so every ordering is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TodoOrder {
    pub field: TodoOrderField,
    pub direction: SortDirection,
}

impl TodoOrder {
    pub fn new(field: TodoOrderField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Compare two todos under this ordering.
    pub fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        let primary = match self.field {
            TodoOrderField::Id => Ordering::Equal,
            TodoOrderField::Title => a.title.cmp(&b.title),
            TodoOrderField::CreatedAt => a.created_at.cmp(&b.created_at),
            TodoOrderField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        let ordering = primary.then_with(|| a.id.cmp(&b.id));

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Parameters for listing todos.
///
/// Evaluation order: cursor (inclusive start), filter, order, skip, take.
/// The cursor is resolved against all records, so it may name a row the
/// filter excludes. A cursor that names no record yields an empty page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoQuery {
    pub skip: Option<u32>,
    pub take: Option<u32>,
    pub cursor: Option<TodoCriterion>,
    pub filter: TodoFilter,
    pub order_by: TodoOrder,
}

impl TodoQuery {
    /// Evaluate this query against an in-memory collection.
    pub fn apply<'a, I>(&self, todos: I) -> Vec<Todo>
    where
        I: IntoIterator<Item = &'a Todo>,
    {
        let all: Vec<&Todo> = todos.into_iter().collect();

        // The cursor row anchors the page even when the filter excludes it.
        let anchor = match &self.cursor {
            Some(cursor) => match all.iter().find(|todo| cursor.matches(todo)) {
                Some(todo) => Some(*todo),
                None => return Vec::new(),
            },
            None => None,
        };

        let mut rows: Vec<&Todo> = all
            .into_iter()
            .filter(|todo| self.filter.matches(todo))
            .filter(|todo| match anchor {
                Some(anchor) => self.order_by.compare(todo, anchor) != Ordering::Less,
                None => true,
            })
            .collect();
        rows.sort_by(|a, b| self.order_by.compare(a, b));

        let take = self.take.map(|t| t as usize).unwrap_or(usize::MAX);

        rows.into_iter()
            .skip(self.skip.unwrap_or(0) as usize)
            .take(take)
            .cloned()
            .collect()
    }
}
