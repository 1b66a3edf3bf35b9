use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use shared_models::error::AppError;

/// A stored record: a flat JSON object.
pub type Document = Map<String, Value>;

pub type SharedStore = Arc<dyn DocumentStore>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Unique constraint violated in '{collection}': {detail}")]
    UniqueViolation { collection: String, detail: String },

    #[error("Store rejected request ({status}): {message}")]
    Response { status: u16, message: String },

    #[error("Malformed document in '{collection}': {message}")]
    Decode { collection: String, message: String },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => AppError::ServiceUnavailable(err.to_string()),
            StoreError::UniqueViolation { .. } => AppError::Conflict(err.to_string()),
            StoreError::Response { .. } | StoreError::Decode { .. } => {
                AppError::Database(err.to_string())
            }
        }
    }
}

/// Exact-match conditions over top-level string fields. An empty filter
/// matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<String>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    /// Adds the condition only when a non-empty value was supplied, so an
    /// absent or blank query parameter means "no filter".
    pub fn eq_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.eq(field, value),
            _ => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            document
                .get(field)
                .and_then(Value::as_str)
                .map(|actual| actual == expected)
                .unwrap_or(false)
        })
    }
}

/// A document as returned by a store, with its store-assigned identifier
/// split out of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Document,
}

impl StoredDocument {
    /// Pulls the identifier out of `id_field`, removing it from the body.
    pub fn from_raw(collection: &str, mut raw: Document, id_field: &str) -> Result<Self, StoreError> {
        let id = match raw.remove(id_field) {
            Some(Value::String(id)) => id,
            Some(Value::Null) | None => {
                return Err(StoreError::Decode {
                    collection: collection.to_string(),
                    message: format!("missing identifier field '{}'", id_field),
                });
            }
            Some(other) => other.to_string(),
        };

        Ok(Self { id, fields: raw })
    }

    /// The public shape: body fields plus the identifier as a string `id`.
    pub fn into_public(self) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        Value::Object(fields)
    }

    pub fn decode<T: DeserializeOwned>(self, collection: &str) -> Result<T, StoreError> {
        serde_json::from_value(self.into_public()).map_err(|e| StoreError::Decode {
            collection: collection.to_string(),
            message: e.to_string(),
        })
    }
}

pub fn to_document<T: Serialize>(collection: &str, value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(other) => Err(StoreError::Decode {
            collection: collection.to_string(),
            message: format!("expected an object, got {}", other),
        }),
        Err(e) => Err(StoreError::Decode {
            collection: collection.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Insert and filtered-read over named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Inserts one document and returns its newly assigned identifier.
    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    /// Returns every document matching `filter`, in store iteration order.
    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, StoreError>;

    /// Declares that no two documents in `collection` may agree on all of
    /// `fields`. Later inserts breaking it fail with `UniqueViolation`.
    async fn ensure_unique_index(&self, collection: &str, fields: &[&str]) -> Result<(), StoreError>;

    async fn collections(&self) -> Result<Vec<String>, StoreError>;
}
