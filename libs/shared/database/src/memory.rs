use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::store::{Document, DocumentStore, Filter, StoreError, StoredDocument};

/// Reserved field holding the identifier of each stored document.
pub const ID_FIELD: &str = "_id";

#[derive(Default)]
struct Collections {
    documents: HashMap<String, Vec<Document>>,
    unique_indexes: HashMap<String, Vec<Vec<String>>>,
}

/// In-process document store. Unique indexes are checked under the same
/// write lock as the insert, so check and write are a single step.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.inner
            .read()
            .await
            .documents
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

fn index_key(document: &Document, fields: &[String]) -> Option<Vec<String>> {
    fields
        .iter()
        .map(|field| match document.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.to_string()),
        })
        .collect()
}

fn find_violation<'a>(
    existing: &[Document],
    document: &Document,
    indexes: &'a [Vec<String>],
) -> Option<&'a [String]> {
    indexes.iter().find_map(|fields| {
        let key = index_key(document, fields)?;
        existing
            .iter()
            .any(|other| index_key(other, fields).as_ref() == Some(&key))
            .then_some(fields.as_slice())
    })
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, mut document: Document) -> Result<String, StoreError> {
        if document.remove(ID_FIELD).is_some() {
            warn!("Ignoring caller-supplied '{}' on insert into {}", ID_FIELD, collection);
        }

        let mut inner = self.inner.write().await;
        let Collections { documents, unique_indexes } = &mut *inner;

        let existing = documents.entry(collection.to_string()).or_default();
        let indexes = unique_indexes.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        if let Some(fields) = find_violation(existing, &document, indexes) {
            debug!("Rejecting insert into {}: duplicate ({})", collection, fields.join(", "));
            return Err(StoreError::UniqueViolation {
                collection: collection.to_string(),
                detail: format!("a document with the same ({}) already exists", fields.join(", ")),
            });
        }

        let id = Uuid::new_v4().to_string();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
        existing.push(document);

        debug!("Inserted document {} into {}", id, collection);
        Ok(id)
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, StoreError> {
        let inner = self.inner.read().await;

        let Some(documents) = inner.documents.get(collection) else {
            return Ok(Vec::new());
        };

        documents
            .iter()
            .filter(|document| filter.matches(document))
            .map(|document| StoredDocument::from_raw(collection, document.clone(), ID_FIELD))
            .collect()
    }

    async fn ensure_unique_index(&self, collection: &str, fields: &[&str]) -> Result<(), StoreError> {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();

        let mut inner = self.inner.write().await;

        if let Some(documents) = inner.documents.get(collection) {
            let mut seen = HashSet::new();
            for document in documents {
                if let Some(key) = index_key(document, &fields) {
                    if !seen.insert(key) {
                        return Err(StoreError::UniqueViolation {
                            collection: collection.to_string(),
                            detail: format!("existing documents share ({})", fields.join(", ")),
                        });
                    }
                }
            }
        }

        let indexes = inner.unique_indexes.entry(collection.to_string()).or_default();
        if !indexes.contains(&fields) {
            debug!("Registered unique index on {} ({})", collection, fields.join(", "));
            indexes.push(fields);
        }

        Ok(())
    }

    async fn collections(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        let mut names: Vec<String> = inner.documents.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
