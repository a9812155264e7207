use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection};
use serde_json::Value;
use todo_core::repository::{Result, TodoRepository};
use todo_core::todo::ID_FIELD;
use todo_core::{StorageError, Todo, TodoFields, TodoId};
use tracing::{debug, info};
use typed_builder::TypedBuilder;

pub const DEFAULT_DATABASE: &str = "todos";
pub const DEFAULT_COLLECTION: &str = "todos";

/// Connection settings for [`MongoRepository`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct MongoConfig {
    #[builder(setter(into))]
    uri: String,
    #[builder(default = DEFAULT_DATABASE.to_string(), setter(into))]
    database: String,
    #[builder(default = DEFAULT_COLLECTION.to_string(), setter(into))]
    collection: String,
}

/// MongoDB implementation of the repository contract.
///
/// Todos live as raw documents in a single collection. `_id` is a native
/// ObjectId assigned by the server on insert; every other key is a caller
/// field. Updates use `$set`, so absent fields are left untouched.
#[derive(Debug, Clone)]
pub struct MongoRepository {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

impl MongoRepository {
    /// Creates a repository from an existing client.
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let handle = client.database(database).collection::<Document>(collection);
        Self {
            client,
            database: database.to_string(),
            collection: handle,
        }
    }

    /// Creates a repository by opening a new MongoDB client.
    ///
    /// The driver connects lazily; use [`TodoRepository::ping`] to check
    /// that the server is actually reachable.
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(map_mongo_error)?;

        info!(
            database = %config.database,
            collection = %config.collection,
            "opened mongodb client"
        );

        Ok(Self::new(client, &config.database, &config.collection))
    }
}

fn id_filter(id: &TodoId) -> Document {
    doc! { "_id": id.object_id() }
}

fn fields_to_document(fields: TodoFields) -> Result<Document> {
    bson::to_document(&fields.into_inner())
        .map_err(|e| StorageError::InvalidData(format!("todo fields are not storable: {e}")))
}

fn document_to_todo(mut document: Document) -> Result<Todo> {
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => TodoId::from(oid),
        Some(other) => {
            return Err(StorageError::InvalidData(format!(
                "document has a non-ObjectId '{ID_FIELD}': {other}"
            )))
        }
        None => {
            return Err(StorageError::InvalidData(format!(
                "document is missing '{ID_FIELD}'"
            )))
        }
    };

    let fields = match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => TodoFields::new(map)
            .map_err(|e| StorageError::InvalidData(format!("document {id}: {e}")))?,
        other => {
            return Err(StorageError::InvalidData(format!(
                "document {id} did not convert to a JSON object: {other}"
            )))
        }
    };

    Ok(Todo::new(id, fields))
}

fn map_mongo_error(err: mongodb::error::Error) -> StorageError {
    let message = err.to_string();

    match *err.kind {
        ErrorKind::Io(ref io) if io.kind() == std::io::ErrorKind::TimedOut => {
            StorageError::Timeout(message)
        }
        ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Authentication { .. }
        | ErrorKind::Io(_) => StorageError::Unavailable(message),
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            StorageError::InvalidData(message)
        }
        ErrorKind::InvalidArgument { .. } | ErrorKind::Command(_) | ErrorKind::Write(_) => {
            StorageError::Query(message)
        }
        _ => StorageError::Operation(message),
    }
}

#[async_trait]
impl TodoRepository for MongoRepository {
    async fn list(&self) -> Result<Vec<Todo>> {
        let documents: Vec<Document> = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(map_mongo_error)?
            .try_collect()
            .await
            .map_err(map_mongo_error)?;

        documents.into_iter().map(document_to_todo).collect()
    }

    async fn get(&self, id: &TodoId) -> Result<Option<Todo>> {
        self.collection
            .find_one(id_filter(id))
            .await
            .map_err(map_mongo_error)?
            .map(document_to_todo)
            .transpose()
    }

    async fn insert(&self, fields: TodoFields) -> Result<TodoId> {
        let document = fields_to_document(fields)?;

        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(TodoId::from(oid)),
            other => Err(StorageError::InvalidData(format!(
                "server assigned a non-ObjectId '{ID_FIELD}': {other}"
            ))),
        }
    }

    async fn update(&self, id: &TodoId, fields: TodoFields) -> Result<bool> {
        // An empty `$set` is a server error; with nothing to set the update
        // reduces to an existence check.
        if fields.is_empty() {
            let count = self
                .collection
                .count_documents(id_filter(id))
                .await
                .map_err(map_mongo_error)?;
            return Ok(count > 0);
        }

        let update = doc! { "$set": fields_to_document(fields)? };

        let result = self
            .collection
            .update_one(id_filter(id), update)
            .await
            .map_err(map_mongo_error)?;

        debug!(
            id = %id,
            matched = result.matched_count,
            modified = result.modified_count,
            "updated todo"
        );

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &TodoId) -> Result<bool> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(map_mongo_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("closed mongodb client");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn config_defaults() {
        let config = MongoConfig::builder().uri("mongodb://localhost:27017").build();
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
    }

    #[test]
    fn fields_convert_to_document() {
        let fields = TodoFields::try_from(json!({"title": "buy milk", "done": false, "n": 3}))
            .unwrap();
        let document = fields_to_document(fields).unwrap();

        assert_eq!(document.get_str("title").unwrap(), "buy milk");
        assert!(!document.get_bool("done").unwrap());
        assert_eq!(document.get_i64("n").unwrap(), 3);
    }

    #[test]
    fn document_converts_to_todo() {
        let oid = ObjectId::new();
        let document = doc! { "_id": oid, "title": "buy milk", "tags": ["home"] };

        let todo = document_to_todo(document).unwrap();

        assert_eq!(todo.id.object_id(), oid);
        assert_eq!(todo.fields.get("title"), Some(&json!("buy milk")));
        assert_eq!(todo.fields.get("tags"), Some(&json!(["home"])));
        assert!(todo.fields.get("_id").is_none());
    }

    #[test]
    fn document_without_object_id_is_invalid() {
        let err = document_to_todo(doc! { "_id": "plain", "title": "t" }).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));

        let err = document_to_todo(doc! { "title": "t" }).unwrap_err();
        assert!(matches!(err, StorageError::InvalidData(_)));
    }
}
