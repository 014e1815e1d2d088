use thiserror::Error;
use tracing::{debug, error, warn};

/// 顶层错误类型
#[derive(Debug, Error)]
pub enum SetError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("WRONGTYPE {0}")]
    TypeMismatch(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("corrupted value: {0}")]
    Codec(String),
}

/// 底层 KV 存储错误，原样透传给调用方
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type SetResult<T> = Result<T, SetError>;

impl SetError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SetError::InvalidArgument(msg.into())
    }

    pub(crate) fn mismatch(msg: impl Into<String>) -> Self {
        SetError::TypeMismatch(msg.into())
    }
}

impl From<bincode::Error> for SetError {
    fn from(e: bincode::Error) -> Self {
        SetError::Codec(e.to_string())
    }
}

// === 统一错误处理机制 ===
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Fatal,       // 存储已损坏或不可用
    Recoverable, // 调用方可以重试
    Ignorable,   // 调用方参数问题，仅需记录
}

pub trait ErrorHandler {
    fn severity(&self) -> ErrorSeverity;
}

impl ErrorHandler for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::Io(_) => ErrorSeverity::Fatal,
            StoreError::Unavailable(_) => ErrorSeverity::Recoverable,
            StoreError::Internal(_) => ErrorSeverity::Fatal,
        }
    }
}

impl ErrorHandler for SetError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SetError::InvalidArgument(_) => ErrorSeverity::Ignorable,
            SetError::TypeMismatch(_) => ErrorSeverity::Ignorable,
            SetError::Store(e) => e.severity(),
            SetError::Codec(_) => ErrorSeverity::Fatal,
        }
    }
}

/// 按严重程度记录失败的操作，然后原样返回结果
pub(crate) fn log_failure<T>(result: SetResult<T>, operation: &str, key: &str) -> SetResult<T> {
    if let Err(e) = &result {
        match e.severity() {
            ErrorSeverity::Fatal => error!("[FATAL] {} on {:?} failed: {}", operation, key, e),
            ErrorSeverity::Recoverable => {
                warn!("[RECOVERABLE] {} on {:?} failed: {}", operation, key, e)
            }
            ErrorSeverity::Ignorable => debug!("{} on {:?} rejected: {}", operation, key, e),
        }
    }
    result
}
