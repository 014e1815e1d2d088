//! 集合代数与有序集合辅助函数
//!
//! 所有函数都保持遇到顺序（从左到右扫描输入时第一次出现的顺序），
//! 元素比较使用 `Element` 的相等语义，因此只需要线性扫描而不需要哈希。

use std::ops::Range;

use crate::types::{Element, ScoredMember};

/// 按分数升序稳定排序，分数相同的成员保持原有相对顺序
pub fn sort_by_score(members: &mut [ScoredMember]) {
    members.sort_by(|a, b| a.score.total_cmp(&b.score));
}

/// 去重，保留第一次出现的位置
pub fn dedup_by_value(items: impl IntoIterator<Item = Element>) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// 并集：按遇到顺序去重
pub fn union(sets: Vec<Vec<Element>>) -> Vec<Element> {
    dedup_by_value(sets.into_iter().flatten())
}

/// 交集：第一个集合中（去重后）同时出现在其余所有集合中的元素
pub fn intersection(sets: Vec<Vec<Element>>) -> Vec<Element> {
    let mut iter = sets.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let rest: Vec<Vec<Element>> = iter.collect();

    dedup_by_value(first)
        .into_iter()
        .filter(|ele| rest.iter().all(|set| set.contains(ele)))
        .collect()
}

/// 差集：第一个集合中不出现在其余任何集合中的元素
///
/// 第一个集合中的重复元素原样保留。
pub fn difference(sets: Vec<Vec<Element>>) -> Vec<Element> {
    let mut iter = sets.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let rest: Vec<Vec<Element>> = iter.collect();

    first
        .into_iter()
        .filter(|ele| !rest.iter().any(|set| set.contains(ele)))
        .collect()
}

/// 查找元素的分数，线性扫描，返回第一个匹配
pub fn find_score(members: &[ScoredMember], ele: &Element) -> Option<f64> {
    members.iter().find(|m| &m.value == ele).map(|m| m.score)
}

/// 将 `[start, stop)` 按切片语义规范化到 `0..len`
///
/// 负数从末尾开始计数，越界的下标被截断，`start >= stop` 时结果为空。
pub fn slice_range(len: usize, start: i64, stop: i64) -> Range<usize> {
    let clamp = |idx: i64| -> usize {
        if idx < 0 {
            let from_end = len as i64 + idx;
            from_end.max(0) as usize
        } else {
            (idx as u64).min(len as u64) as usize
        }
    };

    let (start, stop) = (clamp(start), clamp(stop));
    if start >= stop { start..start } else { start..stop }
}
