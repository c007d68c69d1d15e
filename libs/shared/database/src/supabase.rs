use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

use crate::store::{
    ensure_id, DeleteResult, DocumentStore, Filter, InsertOneResult, StoreError, UpdateResult,
};

/// Document store backed by the Supabase REST API. Each collection is a table
/// and filters become `column=eq.value` query parameters.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self, prefer: Option<&'static str>) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&self.anon_key)
            .map_err(|e| StoreError::Configuration(e.to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.anon_key))
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(prefer) = prefer {
            headers.insert("Prefer", HeaderValue::from_static(prefer));
        }

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str,
                            prefer: Option<&'static str>, body: Option<Value>)
                            -> Result<T, StoreError>
    where T: DeserializeOwned {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let headers = self.get_headers(prefer)?;

        let mut req = self.client.request(method, &url)
            .headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("API error ({}): {}", status, error_text);

            return Err(StoreError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    fn table_path(collection: &str, filter: &Filter, limit: Option<usize>) -> String {
        let mut params: Vec<String> = filter
            .conditions()
            .iter()
            .map(|(field, value)| match value {
                Value::Null => format!("{}=is.null", urlencoding::encode(field)),
                Value::String(text) => format!(
                    "{}=eq.{}",
                    urlencoding::encode(field),
                    urlencoding::encode(text)
                ),
                other => format!(
                    "{}=eq.{}",
                    urlencoding::encode(field),
                    urlencoding::encode(&other.to_string())
                ),
            })
            .collect();

        if let Some(limit) = limit {
            params.push(format!("limit={}", limit));
        }

        if params.is_empty() {
            format!("/rest/v1/{}", collection)
        } else {
            format!("/rest/v1/{}?{}", collection, params.join("&"))
        }
    }
}

#[async_trait]
impl DocumentStore for SupabaseClient {
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let path = Self::table_path(collection, filter, None);
        self.request(Method::GET, &path, None, None).await
    }

    async fn find_one(&self, collection: &str, filter: &Filter)
        -> Result<Option<Value>, StoreError> {
        let path = Self::table_path(collection, filter, Some(1));
        let rows: Vec<Value> = self.request(Method::GET, &path, None, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_one(&self, collection: &str, mut document: Value)
        -> Result<InsertOneResult, StoreError> {
        let inserted_id = ensure_id(&mut document)?;
        let path = format!("/rest/v1/{}", collection);

        let _rows: Vec<Value> = self
            .request(Method::POST, &path, Some("return=representation"), Some(document))
            .await?;

        debug!("Inserted {} into {}", inserted_id, collection);
        Ok(InsertOneResult { acknowledged: true, inserted_id })
    }

    async fn update_one(&self, collection: &str, filter: &Filter, changes: Value)
        -> Result<UpdateResult, StoreError> {
        if !changes.is_object() {
            return Err(StoreError::NotAnObject);
        }

        let path = Self::table_path(collection, filter, None);
        let rows: Vec<Value> = self
            .request(Method::PATCH, &path, Some("return=representation"), Some(changes))
            .await?;

        let count = rows.len() as u64;
        Ok(UpdateResult { acknowledged: true, matched_count: count, modified_count: count })
    }

    // Removes every row the filter selects; callers filter on `_id`.
    async fn delete_one(&self, collection: &str, filter: &Filter)
        -> Result<DeleteResult, StoreError> {
        let path = Self::table_path(collection, filter, None);
        let rows: Vec<Value> = self
            .request(Method::DELETE, &path, Some("return=representation"), None)
            .await?;

        Ok(DeleteResult { acknowledged: true, deleted_count: rows.len() as u64 })
    }
}
