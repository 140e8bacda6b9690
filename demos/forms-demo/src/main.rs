//! 表单校验演示
//!
//! ```text
//! forms-demo list                        列出全部表单
//! forms-demo sample <form>               打印一份合法的示例 JSON
//! forms-demo validate <form> [values.json] [--server-error field=message ...]
//! ```
//!
//! 值袋从文件读取，省略时读标准输入。`--server-error` 模拟提交后服务端
//! 返回的字段错误（例如邮箱已注册）。

mod cli;
mod models;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Cmd};
use ledgerly_core::{AppConfig, DEFAULT_ENV_PREFIX};
use ledgerly_validator::{FieldValue, FormRegistry, ValueBag};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "forms.toml";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config()?;
    config.logging.init()?;

    let mut registry = FormRegistry::discover();
    registry
        .apply_config(&config)
        .context("Invalid form rules in configuration")?;

    match cli.cmd {
        Cmd::List => list_forms(&registry),
        Cmd::Sample { form } => {
            let values = models::sample_values(&form)
                .ok_or_else(|| anyhow!("No sample for form '{}'", form))?;
            println!("{}", serde_json::to_string_pretty(&sorted(&values))?);
        }
        Cmd::Validate {
            form,
            values,
            server_errors,
        } => {
            if !validate(&registry, &form, values.as_deref(), server_errors)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let path = std::env::var_os("LEDGERLY_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let mut config = if path.exists() {
        AppConfig::load(&path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?
    } else {
        AppConfig::default()
    };

    config.apply_env(DEFAULT_ENV_PREFIX)?;
    Ok(config)
}

fn list_forms(registry: &FormRegistry) {
    for name in registry.names() {
        let rules = registry.get(name).map_or(0, |r| r.len());
        println!("{:<16} {} field rule(s)", name, rules);
    }
}

fn validate(
    registry: &FormRegistry,
    form: &str,
    input: Option<&Path>,
    server_errors: Vec<(String, String)>,
) -> Result<bool> {
    let values = read_values(input)?;
    let mut session = registry.session(form)?;

    session.validate_all(&values);
    session.apply_server_errors(server_errors);

    if session.is_valid() {
        tracing::info!("Form '{}' passed validation", form);
        println!("Form '{}' is valid", form);
    } else {
        tracing::warn!("Form '{}' has {} invalid field(s)", form, session.errors().len());
        let errors: BTreeMap<_, _> = session.errors().iter().collect();
        println!("{}", serde_json::to_string_pretty(&errors)?);
    }

    Ok(session.is_valid())
}

fn read_values(input: Option<&Path>) -> Result<ValueBag> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read values from '{}'", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read values from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&content)
        .context("Form values must be a JSON object of strings, numbers, booleans or nulls")
}

fn sorted(values: &ValueBag) -> BTreeMap<&String, &FieldValue> {
    values.iter().collect()
}
