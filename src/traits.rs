use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreResult;

/// The `KvStore` trait is the only collaborator the set engine needs: an opaque
/// key-value store with a read and a write.
///
/// # Methods
///
/// - `get`: Fetch the stored bytes for `key`, or `None` when the key is absent.
/// - `put`: Store `value` under `key`. Writing `None` is how a key is deleted.
///
/// Both calls may suspend until the backend resolves them. Implementations must be
/// safe to call from multiple tasks; no compare-and-swap is required, so two writers
/// on the same key race and the later `put` wins.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    async fn put(&self, key: &str, value: Option<Vec<u8>>) -> StoreResult<()>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Option<Vec<u8>>) -> StoreResult<()> {
        (**self).put(key, value).await
    }
}
