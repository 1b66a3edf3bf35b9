use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::store::{Document, DocumentStore, Filter, StoreError, StoredDocument};

/// Identifier column of every booking table.
pub const ID_FIELD: &str = "id";

/// PostgreSQL SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Document store backed by a Supabase project's PostgREST API.
/// Each collection is a table; uniqueness is enforced by table constraints.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&self.anon_key)
            .map_err(|_| StoreError::Unavailable("Supabase API key is not a valid header value".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.anon_key))
            .map_err(|_| StoreError::Unavailable("Supabase API key is not a valid header value".to_string()))?;

        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, StoreError>
    where T: DeserializeOwned {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T, StoreError>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut headers = self.get_headers()?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url)
            .headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await.map_err(|e| {
            error!("Supabase request to {} failed: {}", url, e);
            StoreError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("API error ({}): {}", status, error_text);
            return Err(classify_error(path, status, &error_text));
        }

        response.json::<T>().await.map_err(|e| StoreError::Decode {
            collection: path.to_string(),
            message: e.to_string(),
        })
    }
}

fn table_path(collection: &str) -> String {
    format!("/rest/v1/{}", collection)
}

fn query_path(collection: &str, filter: &Filter) -> String {
    let mut path = format!("{}?select=*", table_path(collection));
    for (field, value) in filter.conditions() {
        path.push_str(&format!(
            "&{}=eq.{}",
            urlencoding::encode(field),
            urlencoding::encode(value)
        ));
    }
    path
}

fn classify_error(path: &str, status: StatusCode, body: &str) -> StoreError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let code = parsed.as_ref().and_then(|v| v.get("code")).and_then(Value::as_str);
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(body)
        .to_string();

    if status == StatusCode::CONFLICT || code == Some(UNIQUE_VIOLATION) {
        let collection = path
            .trim_start_matches("/rest/v1/")
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();
        return StoreError::UniqueViolation { collection, detail: message };
    }

    match status.as_u16() {
        502 | 503 | 504 => StoreError::Unavailable(message),
        other => StoreError::Response { status: other, message },
    }
}

#[async_trait]
impl DocumentStore for SupabaseClient {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        debug!("Inserting document into {}", collection);

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let rows: Vec<Document> = self.request_with_headers(
            Method::POST,
            &table_path(collection),
            Some(Value::Object(document)),
            Some(headers),
        ).await?;

        let row = rows.into_iter().next().ok_or_else(|| StoreError::Decode {
            collection: collection.to_string(),
            message: "insert returned no rows".to_string(),
        })?;

        let stored = StoredDocument::from_raw(collection, row, ID_FIELD)?;
        debug!("Inserted document {} into {}", stored.id, collection);
        Ok(stored.id)
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<StoredDocument>, StoreError> {
        let rows: Vec<Document> = self.request(
            Method::GET,
            &query_path(collection, filter),
            None,
        ).await?;

        rows.into_iter()
            .map(|row| StoredDocument::from_raw(collection, row, ID_FIELD))
            .collect()
    }

    async fn ensure_unique_index(&self, collection: &str, fields: &[&str]) -> Result<(), StoreError> {
        // PostgREST cannot create constraints; the table migration owns them.
        info!(
            "Expecting UNIQUE ({}) on table {} from the database schema",
            fields.join(", "),
            collection
        );
        Ok(())
    }

    async fn collections(&self) -> Result<Vec<String>, StoreError> {
        let openapi: Value = self.request(Method::GET, "/rest/v1/", None).await?;

        let mut names: Vec<String> = openapi
            .get("paths")
            .and_then(Value::as_object)
            .map(|paths| {
                paths
                    .keys()
                    .map(|path| path.trim_start_matches('/'))
                    .filter(|name| !name.is_empty() && !name.starts_with("rpc/"))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        names.sort();
        Ok(names)
    }
}
