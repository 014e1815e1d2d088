//! 集合引擎
//!
//! 在只提供 `get`/`put` 的 KV 存储之上实现 Redis 风格的普通集合与有序集合。
//! 每个操作的流程都是：校验参数 → 读取编码值 → 计算新值 → 写回（可选）→ 返回结果。
//!
//! 引擎本身不加锁：同一个键上的并发写入是读-改-写竞争，后写入者覆盖先写入者。
//! 需要更强保证的调用方应在存储层提供 CAS 或按键互斥。

use tracing::{debug, warn};

use crate::config::{RemovalReply, SetEngineConfig};
use crate::encoding::{SetValue, decode_slot};
use crate::error::{SetError, SetResult, log_failure};
use crate::scored::{self, sort_by_score};
use crate::traits::KvStore;
use crate::types::{Element, Members, ScoredMember, ZScore};

/// 集合引擎，持有存储引用和静态配置，不保存其他状态
#[derive(Debug, Clone)]
pub struct SetEngine<S> {
    store: S,
    config: SetEngineConfig,
}

fn check_key(key: &str) -> SetResult<()> {
    if key.is_empty() {
        return Err(SetError::invalid("key should be a non-empty string"));
    }
    Ok(())
}

fn check_keys<K: AsRef<str>>(keys: &[K]) -> SetResult<()> {
    keys.iter().try_for_each(|k| check_key(k.as_ref()))
}

/// 取出有序集合成员；空的普通集合视为空的有序集合
fn expect_scored(value: SetValue) -> SetResult<Vec<ScoredMember>> {
    match value {
        SetValue::Scored(members) => Ok(members),
        SetValue::Plain(items) if items.is_empty() => Ok(Vec::new()),
        SetValue::Plain(_) => Err(SetError::mismatch("the set should be scored")),
    }
}

/// 取出普通集合元素；空的有序集合视为空的普通集合
fn expect_plain(value: SetValue) -> SetResult<Vec<Element>> {
    match value {
        SetValue::Plain(items) => Ok(items),
        SetValue::Scored(members) if members.is_empty() => Ok(Vec::new()),
        SetValue::Scored(_) => Err(SetError::mismatch("the set is scored")),
    }
}

impl<S: KvStore> SetEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, SetEngineConfig::default())
    }

    pub fn with_config(store: S, config: SetEngineConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SetEngineConfig {
        &self.config
    }

    fn check_score(&self, score: f64) -> SetResult<()> {
        if self.config.reject_nan_scores && score.is_nan() {
            return Err(SetError::invalid("score should be a number"));
        }
        Ok(())
    }

    async fn load(&self, key: &str) -> SetResult<Option<SetValue>> {
        let raw = self.store.get(key).await?;
        decode_slot(raw)
    }

    async fn save(&self, key: &str, value: &SetValue) -> SetResult<()> {
        let bytes = value.encode()?;
        self.store.put(key, Some(bytes)).await?;
        Ok(())
    }

    /// 按键顺序依次读取，不存在的键贡献空集合
    async fn load_elements<K: AsRef<str>>(&self, keys: &[K]) -> SetResult<Vec<Vec<Element>>> {
        check_keys(keys)?;
        let mut sets = Vec::with_capacity(keys.len());
        for key in keys {
            let elements = self
                .load(key.as_ref())
                .await?
                .map(SetValue::into_elements)
                .unwrap_or_default();
            sets.push(elements);
        }
        Ok(sets)
    }

    fn removal_reply(&self, remaining: usize, requested: usize, removed: usize) -> i64 {
        match self.config.removal_reply {
            RemovalReply::Legacy => remaining as i64 - requested as i64,
            RemovalReply::Removed => removed as i64,
        }
    }

    // ==================== 普通集合 ====================

    /// SADD: 追加元素（不去重），返回追加的数量
    pub async fn sadd(&self, key: &str, value: impl Into<Members>) -> SetResult<usize> {
        let value = value.into();
        let result: SetResult<usize> = async {
            check_key(key)?;
            let mut items = match self.load(key).await? {
                Some(existing) => expect_plain(existing)?,
                None => Vec::new(),
            };
            let count = value.len();
            items.extend(value.into_vec());
            self.save(key, &SetValue::Plain(items)).await?;
            debug!("SADD {:?} appended {} members", key, count);
            Ok(count)
        }
        .await;
        log_failure(result, "SADD", key)
    }

    /// SREM: 删除所有与给定值相等的元素
    ///
    /// 默认返回 `删除后的长度 - 请求删除的数量`，见 [`RemovalReply`]。
    pub async fn srem(&self, key: &str, value: impl Into<Members>) -> SetResult<i64> {
        let value = value.into();
        let result: SetResult<i64> = async {
            check_key(key)?;
            let Some(existing) = self.load(key).await? else {
                return Ok(0);
            };
            let mut items = expect_plain(existing)?;
            let before = items.len();
            let targets = value.as_slice();
            items.retain(|e| !targets.contains(e));

            let removed = before - items.len();
            let reply = self.removal_reply(items.len(), value.len(), removed);
            self.save(key, &SetValue::Plain(items)).await?;
            debug!("SREM {:?} removed {} members", key, removed);
            Ok(reply)
        }
        .await;
        log_failure(result, "SREM", key)
    }

    /// SCARD: 集合大小，键不存在返回 `None`
    pub async fn scard(&self, key: &str) -> SetResult<Option<usize>> {
        let result: SetResult<Option<usize>> = async {
            check_key(key)?;
            Ok(self.load(key).await?.map(|v| v.len()))
        }
        .await;
        log_failure(result, "SCARD", key)
    }

    /// SMEMBERS: 全部元素；有序集合按分数升序投影为裸元素
    pub async fn smembers(&self, key: &str) -> SetResult<Option<Vec<Element>>> {
        let result: SetResult<Option<Vec<Element>>> = async {
            check_key(key)?;
            Ok(self.load(key).await?.map(SetValue::into_elements))
        }
        .await;
        log_failure(result, "SMEMBERS", key)
    }

    /// SISMEMBER: 存在返回 1，否则（包括键不存在）返回 0
    pub async fn sismembers(&self, key: &str, ele: impl Into<Element>) -> SetResult<i64> {
        let ele = ele.into();
        let result: SetResult<i64> = async {
            check_key(key)?;
            let found = self
                .load(key)
                .await?
                .is_some_and(|value| value.contains(&ele));
            Ok(found as i64)
        }
        .await;
        log_failure(result, "SISMEMBER", key)
    }

    // ==================== 多键操作 ====================

    /// SINTER: 交集，保持第一个集合中的顺序
    pub async fn sinter<K: AsRef<str>>(&self, keys: &[K]) -> SetResult<Vec<Element>> {
        let sets = self.load_elements(keys).await?;
        let out = scored::intersection(sets);
        debug!("SINTER over {} keys -> {} members", keys.len(), out.len());
        Ok(out)
    }

    /// SUNION: 并集，按遇到顺序
    pub async fn sunion<K: AsRef<str>>(&self, keys: &[K]) -> SetResult<Vec<Element>> {
        let sets = self.load_elements(keys).await?;
        let out = scored::union(sets);
        debug!("SUNION over {} keys -> {} members", keys.len(), out.len());
        Ok(out)
    }

    /// SUNIONSTORE: 将并集作为普通集合写入 `key`，返回其大小
    pub async fn sunionstore<K: AsRef<str>>(&self, key: &str, keys: &[K]) -> SetResult<usize> {
        let result: SetResult<usize> = async {
            check_key(key)?;
            let union = scored::union(self.load_elements(keys).await?);
            let len = union.len();
            self.save(key, &SetValue::Plain(union)).await?;
            debug!("SUNIONSTORE {:?} stored {} members", key, len);
            Ok(len)
        }
        .await;
        log_failure(result, "SUNIONSTORE", key)
    }

    /// SDIFF: 第一个集合中不属于其余集合的元素
    pub async fn sdiff<K: AsRef<str>>(&self, keys: &[K]) -> SetResult<Vec<Element>> {
        let sets = self.load_elements(keys).await?;
        let out = scored::difference(sets);
        debug!("SDIFF over {} keys -> {} members", keys.len(), out.len());
        Ok(out)
    }

    /// DEL: 写入缺失标记删除键，返回处理的键数量
    ///
    /// 所有键在写入前统一校验；删除不存在的键不是错误。
    pub async fn del<K: AsRef<str>>(&self, keys: &[K]) -> SetResult<usize> {
        check_keys(keys)?;
        for key in keys {
            let key = key.as_ref();
            if let Err(e) = self.store.put(key, None).await {
                warn!("DEL {:?} failed: {}", key, e);
                return Err(e.into());
            }
        }
        debug!("DEL {} keys", keys.len());
        Ok(keys.len())
    }

    // ==================== 有序集合 ====================

    /// ZADD: 追加 `(value, score)` 并按分数重新排序，始终返回 1
    pub async fn zadd(&self, key: &str, score: f64, value: impl Into<Element>) -> SetResult<usize> {
        let value = value.into();
        let result: SetResult<usize> = async {
            check_key(key)?;
            self.check_score(score)?;
            let mut members = match self.load(key).await? {
                Some(existing) => expect_scored(existing)?,
                None => Vec::new(),
            };
            members.push(ScoredMember { value, score });
            sort_by_score(&mut members);
            self.save(key, &SetValue::Scored(members)).await?;
            debug!("ZADD {:?} score {}", key, score);
            Ok(1)
        }
        .await;
        log_failure(result, "ZADD", key)
    }

    /// ZREM: 按成员值删除；要求键保存的是有序集合
    pub async fn zrem(&self, key: &str, value: impl Into<Members>) -> SetResult<i64> {
        let value = value.into();
        let result: SetResult<i64> = async {
            check_key(key)?;
            let Some(existing) = self.load(key).await? else {
                return Ok(0);
            };
            let SetValue::Scored(mut members) = existing else {
                return Err(SetError::mismatch("the set should be scored"));
            };
            let before = members.len();
            let targets = value.as_slice();
            members.retain(|m| !targets.contains(&m.value));

            let removed = before - members.len();
            let reply = self.removal_reply(members.len(), value.len(), removed);
            self.save(key, &SetValue::Scored(members)).await?;
            debug!("ZREM {:?} removed {} members", key, removed);
            Ok(reply)
        }
        .await;
        log_failure(result, "ZREM", key)
    }

    /// ZCARD: 有序集合大小，键不存在返回 `None`
    pub async fn zcard(&self, key: &str) -> SetResult<Option<usize>> {
        let result: SetResult<Option<usize>> = async {
            check_key(key)?;
            match self.load(key).await? {
                Some(existing) => Ok(Some(expect_scored(existing)?.len())),
                None => Ok(None),
            }
        }
        .await;
        log_failure(result, "ZCARD", key)
    }

    /// ZRANGE: 分数升序下 `[start, stop)` 的切片，负下标从末尾计数
    pub async fn zrange(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> SetResult<Option<Vec<Element>>> {
        let result: SetResult<Option<Vec<Element>>> = async {
            check_key(key)?;
            let Some(existing) = self.load(key).await? else {
                return Ok(None);
            };
            let mut members = expect_scored(existing)?;
            let range = scored::slice_range(members.len(), start, stop);
            Ok(Some(members.drain(range).map(|m| m.value).collect()))
        }
        .await;
        log_failure(result, "ZRANGE", key)
    }

    /// ZREVRANGE: 分数降序下 `[start, stop)` 的切片
    ///
    /// 反转只作用于本次读取解码出的副本，不影响存储中的值。
    pub async fn zrevrange(
        &self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> SetResult<Option<Vec<Element>>> {
        let result: SetResult<Option<Vec<Element>>> = async {
            check_key(key)?;
            let Some(existing) = self.load(key).await? else {
                return Ok(None);
            };
            let mut members = expect_scored(existing)?;
            members.reverse();
            let range = scored::slice_range(members.len(), start, stop);
            Ok(Some(members.drain(range).map(|m| m.value).collect()))
        }
        .await;
        log_failure(result, "ZREVRANGE", key)
    }

    /// ZSCORE: 第一个匹配成员的分数
    pub async fn zscore(&self, key: &str, ele: impl Into<Element>) -> SetResult<ZScore> {
        let ele = ele.into();
        let result: SetResult<ZScore> = async {
            check_key(key)?;
            let Some(existing) = self.load(key).await? else {
                return Ok(ZScore::NoKey);
            };
            let members = expect_scored(existing)?;
            Ok(scored::find_score(&members, &ele).map_or(ZScore::NoMember, ZScore::Score))
        }
        .await;
        log_failure(result, "ZSCORE", key)
    }

    /// ZINCRBY: 给第一个匹配成员的分数加上 `score`，返回新分数
    ///
    /// 键不存在时等同于 `zadd(key, score, ele)`；成员不存在时以 `score` 为分数加入。
    pub async fn zincrby(&self, key: &str, score: f64, ele: impl Into<Element>) -> SetResult<f64> {
        let ele = ele.into();
        let result: SetResult<f64> = async {
            check_key(key)?;
            self.check_score(score)?;
            let mut members = match self.load(key).await? {
                Some(existing) => expect_scored(existing)?,
                None => Vec::new(),
            };

            let new_score = match members.iter_mut().find(|m| m.value == ele) {
                Some(member) => {
                    let updated = member.score + score;
                    self.check_score(updated)?;
                    member.score = updated;
                    updated
                }
                None => {
                    members.push(ScoredMember { value: ele, score });
                    score
                }
            };

            sort_by_score(&mut members);
            self.save(key, &SetValue::Scored(members)).await?;
            debug!("ZINCRBY {:?} by {} -> {}", key, score, new_score);
            Ok(new_score)
        }
        .await;
        log_failure(result, "ZINCRBY", key)
    }
}
