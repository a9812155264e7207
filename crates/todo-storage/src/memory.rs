use async_trait::async_trait;
use dashmap::DashMap;
use todo_core::repository::{Result, TodoRepository};
use todo_core::{Todo, TodoFields, TodoId};

/// In-memory implementation of [`TodoRepository`] using DashMap.
///
/// DashMap shards its locks, so requests touching different todos do not
/// block each other. Identifiers are freshly minted ObjectIds, which sort in
/// creation order; `list` relies on that to return insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    storage: DashMap<TodoId, TodoFields>,
}

impl InMemoryRepository {
    /// Creates a new, empty repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<Todo>> {
        let mut todos: Vec<Todo> = self
            .storage
            .iter()
            .map(|entry| Todo::new(*entry.key(), entry.value().clone()))
            .collect();
        todos.sort_by_key(|todo| todo.id);
        Ok(todos)
    }

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>> {
        Ok(self
            .storage
            .get(id)
            .map(|fields| Todo::new(*id, fields.clone())))
    }

    async fn insert(&self, fields: TodoFields) -> Result<TodoId> {
        let id = TodoId::generate();
        self.storage.insert(id, fields);
        Ok(id)
    }

    async fn update(&self, id: &TodoId, fields: TodoFields) -> Result<bool> {
        let Some(mut current) = self.storage.get_mut(id) else {
            return Ok(false);
        };
        current.apply(fields);
        Ok(true)
    }

    async fn delete(&self, id: &TodoId) -> Result<bool> {
        Ok(self.storage.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn fields(value: serde_json::Value) -> TodoFields {
        TodoFields::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryRepository::new();

        let id = repo.insert(fields(json!({"title": "buy milk"}))).await.unwrap();

        let todo = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(todo.id, id);
        assert_eq!(todo.fields.get("title"), Some(&json!("buy milk")));
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get(&TodoId::generate()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn list_empty() {
        let repo = InMemoryRepository::new();

        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_returns_insertion_order() {
        let repo = InMemoryRepository::with_capacity(8);

        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(repo.insert(fields(json!({"n": i}))).await.unwrap());
        }

        let listed: Vec<TodoId> = repo.list().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn update_sets_present_fields_only() {
        let repo = InMemoryRepository::new();
        let id = repo
            .insert(fields(json!({"title": "buy milk", "done": false})))
            .await
            .unwrap();

        assert!(repo.update(&id, fields(json!({"done": true}))).await.unwrap());

        let todo = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(todo.fields.get("title"), Some(&json!("buy milk")));
        assert_eq!(todo.fields.get("done"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn update_with_no_fields_is_a_noop() {
        let repo = InMemoryRepository::new();
        let id = repo.insert(fields(json!({"title": "t"}))).await.unwrap();

        assert!(repo.update(&id, TodoFields::default()).await.unwrap());
        assert_eq!(repo.get(&id).await.unwrap().unwrap().fields.len(), 1);
    }

    #[tokio::test]
    async fn update_nonexistent() {
        let repo = InMemoryRepository::new();

        let updated = repo
            .update(&TodoId::generate(), fields(json!({"title": "t"})))
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn delete_existing() {
        let repo = InMemoryRepository::new();
        let id = repo.insert(fields(json!({"title": "t"}))).await.unwrap();

        assert!(repo.delete(&id).await.unwrap());
        assert!(repo.get(&id).await.unwrap().is_none());
        assert!(!repo.delete(&id).await.unwrap());
    }

    #[tokio::test]
    async fn concurrent_inserts() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(fields(json!({"n": i}))).await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 10);
        assert_eq!(repo.list().await.unwrap().len(), 10);
    }
}
