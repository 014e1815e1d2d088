use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};

/// 集合元素
///
/// 基本类型（`Null`/`Bool`/`Number`/`Str`）按值比较，复合类型（`List`/`Map`）
/// 逐字段深度比较，基本类型与复合类型之间永不相等。`NaN` 不等于任何元素。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Element>),
    Map(BTreeMap<String, Element>),
}

impl Element {
    pub fn is_composite(&self) -> bool {
        matches!(self, Element::List(_) | Element::Map(_))
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Null => write!(f, "null"),
            Element::Bool(b) => write!(f, "{}", b),
            Element::Number(n) => write!(f, "{}", n),
            Element::Str(s) => write!(f, "{:?}", s),
            Element::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Element::Map(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{:?}:{}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element::Str(value.to_string())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Element::Str(value)
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Element::Bool(value)
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Element::Number(value)
    }
}

impl From<i32> for Element {
    fn from(value: i32) -> Self {
        Element::Number(value as f64)
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Element::Number(value as f64)
    }
}

impl From<u64> for Element {
    fn from(value: u64) -> Self {
        Element::Number(value as f64)
    }
}

impl<T: Into<Element>> From<Vec<T>> for Element {
    fn from(value: Vec<T>) -> Self {
        Element::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Element {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Element::Null,
            Value::Bool(b) => Element::Bool(b),
            // serde_json 的数字总能表示为 f64（可能损失精度）
            Value::Number(n) => Element::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Element::Str(s),
            Value::Array(items) => Element::List(items.into_iter().map(Element::from).collect()),
            Value::Object(fields) => Element::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Element::from(v)))
                    .collect(),
            ),
        }
    }
}

/// 有序集合中的一个成员
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMember {
    pub value: Element,
    pub score: f64,
}

impl ScoredMember {
    pub fn new(value: impl Into<Element>, score: f64) -> Self {
        Self {
            value: value.into(),
            score,
        }
    }
}

/// 单个元素或元素序列
///
/// `sadd`/`srem`/`zrem` 的返回值取决于调用方传入的是哪一种。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Members {
    One(Element),
    Many(Vec<Element>),
}

impl Members {
    pub fn len(&self) -> usize {
        match self {
            Members::One(_) => 1,
            Members::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[Element] {
        match self {
            Members::One(item) => std::slice::from_ref(item),
            Members::Many(items) => items,
        }
    }

    pub fn into_vec(self) -> Vec<Element> {
        match self {
            Members::One(item) => vec![item],
            Members::Many(items) => items,
        }
    }
}

impl From<Element> for Members {
    fn from(value: Element) -> Self {
        Members::One(value)
    }
}

impl From<&str> for Members {
    fn from(value: &str) -> Self {
        Members::One(value.into())
    }
}

impl From<String> for Members {
    fn from(value: String) -> Self {
        Members::One(value.into())
    }
}

impl From<i64> for Members {
    fn from(value: i64) -> Self {
        Members::One(value.into())
    }
}

impl From<i32> for Members {
    fn from(value: i32) -> Self {
        Members::One(value.into())
    }
}

impl From<f64> for Members {
    fn from(value: f64) -> Self {
        Members::One(value.into())
    }
}

impl From<bool> for Members {
    fn from(value: bool) -> Self {
        Members::One(value.into())
    }
}

impl From<serde_json::Value> for Members {
    fn from(value: serde_json::Value) -> Self {
        Members::One(value.into())
    }
}

impl<T: Into<Element>> From<Vec<T>> for Members {
    fn from(value: Vec<T>) -> Self {
        Members::Many(value.into_iter().map(Into::into).collect())
    }
}

/// ZSCORE 的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZScore {
    /// 键不存在
    NoKey,
    /// 键存在但元素不在集合中
    NoMember,
    Score(f64),
}

impl ZScore {
    pub fn score(self) -> Option<f64> {
        match self {
            ZScore::Score(s) => Some(s),
            _ => None,
        }
    }
}
