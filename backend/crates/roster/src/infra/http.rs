//! HTTP Resource Client
//!
//! CRUD over one `/api/*` collection through the shared `ApiClient`.

use std::marker::PhantomData;
use std::sync::Arc;

use http::StatusCode;
use kernel::envelope::ApiEnvelope;
use kernel::id::Id;
use platform::client::{ApiClient, ApiRequest, ApiResponse};
use platform::error::ClientError;
use platform::query_cache::QueryCache;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::config::RosterConfig;
use crate::application::query::ListQuery;
use crate::domain::resource::{Page, Resource};
use crate::error::{RosterError, RosterResult};

/// Client for the collection of `R`
pub struct ResourceClient<R> {
    client: ApiClient,
    cache: QueryCache,
    config: Arc<RosterConfig>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            cache: self.cache.clone(),
            config: self.config.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(client: ApiClient, cache: QueryCache, config: Arc<RosterConfig>) -> Self {
        Self {
            client,
            cache,
            config,
            _resource: PhantomData,
        }
    }

    /// One page of the collection
    pub async fn list(&self, query: &ListQuery) -> RosterResult<Page<R>> {
        let pairs = query.to_pairs(&self.config);
        let key = QueryCache::key(R::COLLECTION, &pairs);
        if let Some(page) = self.cached::<Page<R>>(&key) {
            return Ok(page);
        }

        let request = pairs
            .iter()
            .fold(ApiRequest::get(R::COLLECTION), |request, (k, v)| {
                request.query(k.as_str(), v)
            });
        let response = self.client.send(&request).await?;
        let envelope: ApiEnvelope<Vec<R>> = response.json()?;
        let pagination = envelope.pagination;
        let items = unwrap_envelope(envelope, R::NAME)?;

        let page = Page { items, pagination };
        tracing::debug!(resource = R::NAME, count = page.len(), "Listed records");
        self.store(key, &page);
        Ok(page)
    }

    pub async fn get(&self, id: Id<R::Marker>) -> RosterResult<R> {
        let path = R::item_path(id);
        if let Some(record) = self.cached::<R>(&path) {
            return Ok(record);
        }

        let response = self
            .client
            .send(&ApiRequest::get(path.as_str()))
            .await
            .map_err(|e| not_found_or(e, R::NAME, id.value()))?;
        let record: R = unwrap_envelope(response.json()?, R::NAME)?;

        self.store(path, &record);
        Ok(record)
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> RosterResult<R> {
        let request = ApiRequest::post(R::COLLECTION).json(body)?;
        let response = self.client.send(&request).await?;
        let record: R = unwrap_envelope(response.json()?, R::NAME)?;

        self.invalidate();
        tracing::info!(resource = R::NAME, id = %record.id(), "Record created");
        Ok(record)
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: Id<R::Marker>,
        body: &B,
    ) -> RosterResult<R> {
        let request = ApiRequest::put(R::item_path(id)).json(body)?;
        let response = self
            .client
            .send(&request)
            .await
            .map_err(|e| not_found_or(e, R::NAME, id.value()))?;
        let record: R = unwrap_envelope(response.json()?, R::NAME)?;

        self.invalidate();
        tracing::info!(resource = R::NAME, id = %id, "Record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: Id<R::Marker>) -> RosterResult<()> {
        let response = self
            .client
            .send(&ApiRequest::delete(R::item_path(id)))
            .await
            .map_err(|e| not_found_or(e, R::NAME, id.value()))?;
        ensure_success(&response)?;

        self.invalidate();
        tracing::info!(resource = R::NAME, id = %id, "Record deleted");
        Ok(())
    }

    fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.config.cache_reads {
            return None;
        }
        let hit = self.cache.get(key);
        if hit.is_some() {
            tracing::debug!(key = %key, "Query cache hit");
        }
        hit
    }

    fn store<T: Serialize>(&self, key: String, value: &T) {
        if self.config.cache_reads {
            self.cache.insert(key, value);
        }
    }

    fn invalidate(&self) {
        let dropped = self.cache.invalidate_prefix(R::COLLECTION);
        tracing::debug!(resource = R::NAME, dropped = dropped, "Collection cache invalidated");
    }
}

/// Payload of a successful envelope
fn unwrap_envelope<T>(envelope: ApiEnvelope<T>, resource: &'static str) -> RosterResult<T> {
    if !envelope.success {
        return Err(RosterError::Unsuccessful {
            message: envelope.message,
        });
    }
    envelope.data.ok_or(RosterError::MissingData(resource))
}

/// Deletes may answer 204 or an envelope with no data
fn ensure_success(response: &ApiResponse) -> RosterResult<()> {
    if response.bytes().is_empty() {
        return Ok(());
    }
    let envelope: ApiEnvelope<serde_json::Value> = response.json()?;
    if envelope.success {
        Ok(())
    } else {
        Err(RosterError::Unsuccessful {
            message: envelope.message,
        })
    }
}

fn not_found_or(err: ClientError, resource: &'static str, id: i64) -> RosterError {
    match err.status() {
        Some(StatusCode::NOT_FOUND) => RosterError::NotFound { resource, id },
        _ => RosterError::Client(err),
    }
}
