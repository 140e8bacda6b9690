use std::collections::HashMap;
use thiserror::Error;

/// 字段名 -> 错误消息
///
/// 只包含当前校验失败的字段，不会出现空消息。
pub type ErrorMap = HashMap<String, String>;

/// 校验错误
///
/// 供提交路径使用 `?` 传播；表单内联展示仍以 `FormSession::errors` 为准。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{} field(s) failed validation", .0.len())]
    FieldErrors(ErrorMap),
}

impl ValidationError {
    pub fn field_errors(&self) -> &ErrorMap {
        match self {
            Self::FieldErrors(errors) => errors,
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// 单个字段的校验失败类型
///
/// 外部（服务端）错误不在此列，它们通过 `FormSession::set_error` 直接写入错误表。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFailure {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidFormat,
    Custom(String),
}

impl FieldFailure {
    /// 以字段标签渲染错误消息
    pub fn message(&self, label: &str) -> String {
        match self {
            Self::Required => format!("{} is required", label),
            Self::TooShort { min } => format!("{} must be at least {} characters", label, min),
            Self::TooLong { max } => format!("{} must be no more than {} characters", label, max),
            Self::InvalidFormat => format!("{} format is invalid", label),
            Self::Custom(message) => message.clone(),
        }
    }
}

/// 规则构建 / 配置错误
#[derive(Debug, Error)]
pub enum RuleConfigError {
    #[error("Unknown rule preset '{0}'")]
    UnknownPreset(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Field '{field}' has min_length {min} greater than max_length {max}")]
    InvalidLengthBounds { field: String, min: usize, max: usize },

    #[error("Unknown form '{0}'")]
    UnknownForm(String),
}
