//! 内存 KV 存储实现
//!
//! 使用 HashMap 保存不透明的字节值，用于测试和单机场景。
//! 写入 `None` 即删除键。

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, trace};

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

#[derive(Serialize, Deserialize)]
struct SnapshotData {
    entries: HashMap<String, Vec<u8>>,
}

/// 内存存储实现
#[derive(Clone, Default)]
pub struct MemoryKv {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// 键值对数量
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// 创建快照数据
    pub fn create_snapshot(&self) -> StoreResult<Vec<u8>> {
        let snap = SnapshotData {
            entries: self.data.read().clone(),
        };
        bincode::serialize(&snap)
            .map_err(|e| StoreError::Internal(format!("Failed to serialize snapshot: {}", e)))
    }

    /// 从快照数据恢复，覆盖当前全部内容
    pub fn restore_from_snapshot(&self, snapshot: &[u8]) -> StoreResult<()> {
        let snap: SnapshotData = bincode::deserialize(snapshot)
            .map_err(|e| StoreError::Internal(format!("Failed to deserialize snapshot: {}", e)))?;

        let mut data = self.data.write();
        *data = snap.entries;
        info!("Restored memory kv from snapshot, {} keys", data.len());
        Ok(())
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let value = self.data.read().get(key).cloned();
        trace!("GET {:?} -> {} bytes", key, value.as_ref().map_or(0, Vec::len));
        Ok(value)
    }

    async fn put(&self, key: &str, value: Option<Vec<u8>>) -> StoreResult<()> {
        let mut data = self.data.write();
        match value {
            Some(bytes) => {
                trace!("PUT {:?} <- {} bytes", key, bytes.len());
                data.insert(key.to_string(), bytes);
            }
            None => {
                trace!("PUT {:?} <- absent", key);
                data.remove(key);
            }
        }
        Ok(())
    }
}
