//! 表单注册表
//!
//! 汇总两类来源的规则集：
//! - 编译期通过 `#[form(name = "...")]` 提交的表单模型
//! - 配置文件 `[forms.<name>]` 中定义的字段规则
//!
//! 配置中的字段覆盖同名字段，表单不存在时新建。

use crate::error::RuleConfigError;
use crate::model::registered_forms;
use crate::presets::Preset;
use crate::rule::{Rule, RuleSet};
use crate::session::FormSession;
use ledgerly_core::{AppConfig, FieldRuleSpec, LabelStyle};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    forms: BTreeMap<String, RuleSet>,
    label_style: LabelStyle,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载所有编译期注册的表单
    pub fn discover() -> Self {
        let mut registry = Self::new();
        for registration in registered_forms() {
            tracing::debug!("Discovered form: {}", registration.name);
            if registry.register(registration.name, (registration.rules)()).is_some() {
                tracing::warn!("Form '{}' registered more than once", registration.name);
            }
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, rules: RuleSet) -> Option<RuleSet> {
        self.forms.insert(name.into(), rules)
    }

    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    /// 应用配置：标签风格与 `[forms.*]` 定义
    ///
    /// 所有表单规则都构建成功后才写入注册表，出错时注册表保持不变。
    /// 配置未指定标签风格时保留当前设置。
    pub fn apply_config(&mut self, config: &AppConfig) -> Result<(), RuleConfigError> {
        let mut configured_forms = BTreeMap::new();
        for (form, fields) in &config.forms {
            let mut configured = RuleSet::new();
            for (field, spec) in fields {
                let rule = rule_from_spec(spec)?;
                rule.check_bounds(field)?;
                configured.insert(field.clone(), rule);
            }
            configured_forms.insert(form.clone(), configured);
        }

        if let Some(style) = config.validation.label_style {
            self.label_style = style;
        }
        for (form, configured) in configured_forms {
            tracing::info!("Form '{}' configured with {} field rule(s)", form, configured.len());
            self.forms.entry(form).or_default().merge(configured);
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RuleSet> {
        self.forms.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forms.contains_key(name)
    }

    /// 已注册的表单名（按字母序）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.forms.keys().map(String::as_str)
    }

    /// 为指定表单新建校验会话
    pub fn session(&self, name: &str) -> Result<FormSession, RuleConfigError> {
        let rules = self
            .forms
            .get(name)
            .ok_or_else(|| RuleConfigError::UnknownForm(name.to_string()))?;
        Ok(FormSession::new(rules.clone()).with_label_style(self.label_style))
    }
}

/// 配置项转规则
///
/// 表形式时先取预设（如有），再用显式写出的项覆盖。
pub fn rule_from_spec(spec: &FieldRuleSpec) -> Result<Rule, RuleConfigError> {
    match spec {
        FieldRuleSpec::Preset(name) => Ok(name.parse::<Preset>()?.rule()),
        FieldRuleSpec::Detailed(table) => {
            let mut rule = match &table.preset {
                Some(name) => name.parse::<Preset>()?.rule(),
                None => Rule::new(),
            };
            if let Some(required) = table.required {
                rule.required = required;
            }
            if let Some(min) = table.min_length {
                rule.min_length = Some(min);
            }
            if let Some(max) = table.max_length {
                rule.max_length = Some(max);
            }
            if let Some(pattern) = &table.pattern {
                rule = rule.pattern(pattern)?;
            }
            Ok(rule)
        }
    }
}
