// src/error.rs - 编码核心的错误类型

/// 编码失败的原因，都是调用方输入的问题，重试无意义
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("输入无效: {0}")]
    InvalidInput(String),

    #[error("不支持的加密类型: {0}")]
    UnsupportedSecurityType(String),
}

impl EncodeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        EncodeError::InvalidInput(msg.into())
    }
}
