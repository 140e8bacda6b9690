//! 应用配置
//!
//! 配置文件为 TOML，结构如下：
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [validation]
//! label_style = "capitalize"
//!
//! [forms.client]
//! firstName = "required"
//! pincode = "pincode"
//! gstin = { pattern = "^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$" }
//! ```
//!
//! 环境变量优先于文件，键名映射规则：`label.style` -> `LEDGERLY_LABEL_STYLE`。

use crate::error::{CoreError, CoreResult};
use crate::logging::LoggingConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 默认环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "LEDGERLY_";

/// 可以通过环境变量覆盖的配置键
pub const OVERRIDABLE_KEYS: &[&str] = &["log.level", "log.format", "log.filter", "label.style"];

/// 错误消息中字段名的展示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// 仅首字母大写，其余保持不变：`firstName` -> `FirstName`
    #[default]
    Capitalize,
    /// 首字母大写，其余小写：`firstName` -> `Firstname`
    Sentence,
}

impl FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "capitalize" => Ok(LabelStyle::Capitalize),
            "sentence" => Ok(LabelStyle::Sentence),
            _ => Err(format!("Invalid label style: {}", s)),
        }
    }
}

/// `[validation]` 段
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// 未配置时沿用调用方已有的设置
    pub label_style: Option<LabelStyle>,
}

/// 单个字段的规则配置
///
/// 可以直接写预设名（`email = "email"`），也可以写成表。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldRuleSpec {
    Preset(String),
    Detailed(FieldRuleTable),
}

/// 表形式的字段规则，未写的项保持预设（或空规则）的取值
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldRuleTable {
    pub preset: Option<String>,
    pub required: Option<bool>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
}

/// 表单名 -> (字段名 -> 规则)
pub type FormSpecs = BTreeMap<String, BTreeMap<String, FieldRuleSpec>>;

/// 应用配置根
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub validation: ValidationSettings,
    pub forms: FormSpecs,
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded config from {:?} ({} form definitions)",
            path,
            config.forms.len()
        );
        Ok(config)
    }

    /// 从字符串解析 TOML 配置
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 使用进程环境变量覆盖配置
    pub fn apply_env(&mut self, prefix: &str) -> CoreResult<()> {
        if let Some(rust_log) = std::env::var_os("RUST_LOG") {
            self.logging.filter = Some(os_to_string("log.filter", rust_log)?);
        }
        let vars = prefixed_vars(prefix, std::env::vars_os())?;
        self.apply_overrides(prefix, vars)
    }

    /// 使用给定的 (变量名, 值) 覆盖配置
    ///
    /// 只处理 `OVERRIDABLE_KEYS` 中的键，其余变量忽略。
    pub fn apply_overrides<I>(&mut self, prefix: &str, vars: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = env_to_key(prefix, &name) else {
                continue;
            };
            if OVERRIDABLE_KEYS.contains(&key.as_str()) {
                tracing::debug!("Config '{}' overridden by environment variable {}", key, name);
                self.set(&key, &value)?;
            }
        }
        Ok(())
    }

    /// 按键设置单个配置项
    pub fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        let invalid = || CoreError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "log.level" => self.logging.level = value.parse().map_err(|_| invalid())?,
            "log.format" => self.logging.format = value.parse().map_err(|_| invalid())?,
            "log.filter" => self.logging.filter = Some(value.to_string()),
            "label.style" => {
                self.validation.label_style = Some(value.parse().map_err(|_| invalid())?)
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }
}

/// 筛出能覆盖配置的环境变量
///
/// 只保留映射到 `OVERRIDABLE_KEYS` 的变量，其余（包括非 UTF-8 的）直接跳过；
/// 可覆盖的变量值不是 UTF-8 时报错。
pub fn prefixed_vars<I>(prefix: &str, vars: I) -> CoreResult<Vec<(String, String)>>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut selected = Vec::new();
    for (name, value) in vars {
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(key) = env_to_key(prefix, name) else {
            continue;
        };
        if !OVERRIDABLE_KEYS.contains(&key.as_str()) {
            continue;
        }
        let value = os_to_string(&key, value)?;
        selected.push((name.to_string(), value));
    }
    Ok(selected)
}

fn os_to_string(key: &str, value: OsString) -> CoreResult<String> {
    value.into_string().map_err(|raw| CoreError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string_lossy().into_owned(),
    })
}

/// 环境变量名转配置键，前缀不匹配时返回 None
/// 例如: LEDGERLY_LOG_LEVEL -> log.level
pub fn env_to_key(prefix: &str, env_key: &str) -> Option<String> {
    env_key
        .strip_prefix(prefix)
        .map(|stripped| stripped.to_lowercase().replace('_', "."))
}
