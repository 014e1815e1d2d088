//! 基于 KV 存储的集合与有序集合
//!
//! 底层存储只提供 `get`/`put`，本 crate 把 Redis 风格的集合语义编码为不透明的存储值，
//! 并通过读-改-写实现集合代数、排名访问和修改操作。
//!
//! # 支持的操作
//! - 普通集合: SADD, SREM, SCARD, SMEMBERS, SISMEMBER
//! - 多键: SINTER, SUNION, SUNIONSTORE, SDIFF, DEL
//! - 有序集合: ZADD, ZREM, ZCARD, ZRANGE, ZREVRANGE, ZSCORE, ZINCRBY
//!
//! # 示例
//! ```rust
//! use kvset::{MemoryKv, SetEngine};
//!
//! # async fn demo() -> kvset::SetResult<()> {
//! let engine = SetEngine::new(MemoryKv::new());
//! engine.zadd("board", 2.0, "two").await?;
//! engine.zadd("board", 1.0, "one").await?;
//! assert_eq!(
//!     engine.smembers("board").await?,
//!     Some(vec!["one".into(), "two".into()])
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod mock;
pub mod operation;
pub mod scored;
pub mod traits;
pub mod types;

pub use config::{RemovalReply, SetEngineConfig};
pub use encoding::SetValue;
pub use engine::SetEngine;
pub use error::{SetError, SetResult, StoreError, StoreResult};
pub use mock::memory_kv::MemoryKv;
pub use operation::{Reply, SetOperation};
pub use traits::KvStore;
pub use types::{Element, Members, ScoredMember, ZScore};
