use std::path::PathBuf;
use thiserror::Error;

/// 核心错误类型
///
/// 配置加载与日志初始化阶段的错误。业务层（表单提交等）统一使用
/// anyhow::Result，通过 .context() 补充上下文。
///
/// # 示例
///
/// ```rust,ignore
/// use anyhow::Context;
///
/// let config = AppConfig::load(&path)
///     .with_context(|| format!("Failed to load forms config '{}'", path.display()))?;
/// ```
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config value for '{key}': {value}")]
    InvalidValue { key: String, value: String },

    #[error("Failed to initialize logging: {0}")]
    LoggingInitFailed(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub use anyhow::Result;
