use async_trait::async_trait;
use kvset::{KvStore, MemoryKv, StoreError, StoreResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

// --- 可注入故障并统计访问次数的存储 ---
#[derive(Clone, Default)]
pub struct FlakyKv {
    inner: MemoryKv,
    fail_gets: Arc<AtomicBool>,
    fail_puts: Arc<AtomicBool>,
    gets: Arc<AtomicUsize>,
    puts: Arc<AtomicUsize>,
}

impl FlakyKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryKv {
        &self.inner
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// (get 次数, put 次数)
    pub fn calls(&self) -> (usize, usize) {
        (
            self.gets.load(Ordering::SeqCst),
            self.puts.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl KvStore for FlakyKv {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("get {} refused", key)));
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Option<Vec<u8>>) -> StoreResult<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("put {} refused", key)));
        }
        self.inner.put(key, value).await
    }
}

// --- 每次访问前让出执行权的存储，用于复现并发读-改-写竞争 ---
#[derive(Clone, Default)]
pub struct YieldingKv {
    inner: MemoryKv,
}

impl YieldingKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for YieldingKv {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Option<Vec<u8>>) -> StoreResult<()> {
        tokio::task::yield_now().await;
        self.inner.put(key, value).await
    }
}
