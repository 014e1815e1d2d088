//! 集合值在 KV 存储中的编码
//!
//! 每个键只保存一种形态：普通集合或有序集合。键不存在（或已删除）
//! 在存储边界上表示为 `None`，不占用任何编码。

use serde::{Deserialize, Serialize};

use crate::error::SetResult;
use crate::types::{Element, ScoredMember};

/// 存储值的逻辑形态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetValue {
    /// 按插入顺序保存，允许重复
    Plain(Vec<Element>),
    /// 始终按分数升序保存
    Scored(Vec<ScoredMember>),
}

impl SetValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SetValue::Plain(_) => "set",
            SetValue::Scored(_) => "zset",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SetValue::Plain(items) => items.len(),
            SetValue::Scored(members) => members.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, SetValue::Scored(_))
    }

    /// 投影为裸元素序列；有序集合保持分数升序
    pub fn into_elements(self) -> Vec<Element> {
        match self {
            SetValue::Plain(items) => items,
            SetValue::Scored(members) => members.into_iter().map(|m| m.value).collect(),
        }
    }

    pub fn contains(&self, ele: &Element) -> bool {
        match self {
            SetValue::Plain(items) => items.iter().any(|e| e == ele),
            SetValue::Scored(members) => members.iter().any(|m| &m.value == ele),
        }
    }

    pub fn encode(&self) -> SetResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> SetResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// 将存储中读出的原始值解码；`None` 表示键不存在
pub fn decode_slot(raw: Option<Vec<u8>>) -> SetResult<Option<SetValue>> {
    raw.as_deref().map(SetValue::decode).transpose()
}
