//! 集合操作的命令形式
//!
//! 命令可以用 bincode 序列化后写入日志或转发，再由 [`SetEngine::apply`] 执行。

use serde::{Deserialize, Serialize};

use crate::engine::SetEngine;
use crate::error::SetResult;
use crate::traits::KvStore;
use crate::types::{Element, Members, ZScore};

/// 集合操作类型
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SetOperation {
    // ==================== 普通集合 ====================
    /// SADD key member [member ...]
    SAdd { key: String, members: Members },
    /// SREM key member [member ...]
    SRem { key: String, members: Members },
    /// SCARD key
    SCard { key: String },
    /// SMEMBERS key
    SMembers { key: String },
    /// SISMEMBER key member
    SIsMember { key: String, member: Element },
    /// SINTER key [key ...]
    SInter { keys: Vec<String> },
    /// SUNION key [key ...]
    SUnion { keys: Vec<String> },
    /// SUNIONSTORE destination key [key ...]
    SUnionStore { key: String, keys: Vec<String> },
    /// SDIFF key [key ...]
    SDiff { keys: Vec<String> },

    // ==================== 有序集合 ====================
    /// ZADD key score member
    ZAdd { key: String, score: f64, member: Element },
    /// ZREM key member [member ...]
    ZRem { key: String, members: Members },
    /// ZCARD key
    ZCard { key: String },
    /// ZRANGE key start stop
    ZRange { key: String, start: i64, stop: i64 },
    /// ZREVRANGE key start stop
    ZRevRange { key: String, start: i64, stop: i64 },
    /// ZSCORE key member
    ZScore { key: String, member: Element },
    /// ZINCRBY key increment member
    ZIncrBy { key: String, delta: f64, member: Element },

    // ==================== 通用操作 ====================
    /// DEL key [key ...]
    Del { keys: Vec<String> },
}

impl SetOperation {
    /// 是否会写入存储
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            SetOperation::SAdd { .. }
                | SetOperation::SRem { .. }
                | SetOperation::SUnionStore { .. }
                | SetOperation::ZAdd { .. }
                | SetOperation::ZRem { .. }
                | SetOperation::ZIncrBy { .. }
                | SetOperation::Del { .. }
        )
    }

    pub fn encode(&self) -> SetResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> SetResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// 操作结果
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// 键不存在
    Nil,
    /// 键存在但成员不存在（ZSCORE）
    Null,
    Integer(i64),
    Score(f64),
    Members(Vec<Element>),
}

impl From<Option<usize>> for Reply {
    fn from(value: Option<usize>) -> Self {
        value.map_or(Reply::Nil, |n| Reply::Integer(n as i64))
    }
}

impl From<Option<Vec<Element>>> for Reply {
    fn from(value: Option<Vec<Element>>) -> Self {
        value.map_or(Reply::Nil, Reply::Members)
    }
}

impl From<ZScore> for Reply {
    fn from(value: ZScore) -> Self {
        match value {
            ZScore::NoKey => Reply::Nil,
            ZScore::NoMember => Reply::Null,
            ZScore::Score(s) => Reply::Score(s),
        }
    }
}

impl<S: KvStore> SetEngine<S> {
    /// 执行一条命令
    pub async fn apply(&self, op: SetOperation) -> SetResult<Reply> {
        let reply: Reply = match op {
            SetOperation::SAdd { key, members } => {
                Reply::Integer(self.sadd(&key, members).await? as i64)
            }
            SetOperation::SRem { key, members } => Reply::Integer(self.srem(&key, members).await?),
            SetOperation::SCard { key } => self.scard(&key).await?.into(),
            SetOperation::SMembers { key } => self.smembers(&key).await?.into(),
            SetOperation::SIsMember { key, member } => {
                Reply::Integer(self.sismembers(&key, member).await?)
            }
            SetOperation::SInter { keys } => Reply::Members(self.sinter(&keys[..]).await?),
            SetOperation::SUnion { keys } => Reply::Members(self.sunion(&keys[..]).await?),
            SetOperation::SUnionStore { key, keys } => {
                Reply::Integer(self.sunionstore(&key, &keys[..]).await? as i64)
            }
            SetOperation::SDiff { keys } => Reply::Members(self.sdiff(&keys[..]).await?),
            SetOperation::ZAdd { key, score, member } => {
                Reply::Integer(self.zadd(&key, score, member).await? as i64)
            }
            SetOperation::ZRem { key, members } => Reply::Integer(self.zrem(&key, members).await?),
            SetOperation::ZCard { key } => self.zcard(&key).await?.into(),
            SetOperation::ZRange { key, start, stop } => {
                self.zrange(&key, start, stop).await?.into()
            }
            SetOperation::ZRevRange { key, start, stop } => {
                self.zrevrange(&key, start, stop).await?.into()
            }
            SetOperation::ZScore { key, member } => self.zscore(&key, member).await?.into(),
            SetOperation::ZIncrBy { key, delta, member } => {
                Reply::Score(self.zincrby(&key, delta, member).await?)
            }
            SetOperation::Del { keys } => Reply::Integer(self.del(&keys[..]).await? as i64),
        };
        Ok(reply)
    }
}
