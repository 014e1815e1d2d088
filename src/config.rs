use serde::{Deserialize, Serialize};

/// SREM/ZREM 返回值的计算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReply {
    /// 兼容旧行为：`删除后的长度 - 请求删除的数量`，可能为负数
    #[default]
    Legacy,
    /// 实际删除的条目数
    Removed,
}

/// 集合引擎的静态配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetEngineConfig {
    pub removal_reply: RemovalReply,
    /// 拒绝 NaN 分数以及结果为 NaN 的自增
    pub reject_nan_scores: bool,
}

impl Default for SetEngineConfig {
    fn default() -> Self {
        Self {
            removal_reply: RemovalReply::Legacy,
            reject_nan_scores: true,
        }
    }
}
