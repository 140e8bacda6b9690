// ledgerly-core: 表单校验工作区的公共基础设施
//
// 提供：
// - 日志初始化（tracing-subscriber）
// - TOML 配置与环境变量覆盖
// - 统一的错误类型

pub mod config;
pub mod error;
pub mod logging;

pub use config::{
    AppConfig, FieldRuleSpec, FieldRuleTable, FormSpecs, LabelStyle, ValidationSettings,
    DEFAULT_ENV_PREFIX,
};
pub use error::{CoreError, CoreResult, Result};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
