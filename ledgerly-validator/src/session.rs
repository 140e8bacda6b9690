//! 表单校验会话
//!
//! 每个表单实例持有一个会话：固定的规则集加上可变的错误表。
//! 会话只在 UI 事件里同步调用，不做 I/O。

use crate::error::{ErrorMap, ValidationError, ValidationResult};
use crate::rule::RuleSet;
use crate::validator::FieldValidator;
use crate::value::{FieldValue, ValueBag};
use ledgerly_core::LabelStyle;

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    rules: RuleSet,
    validator: FieldValidator,
    errors: ErrorMap,
}

impl FormSession {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            validator: FieldValidator::default(),
            errors: ErrorMap::new(),
        }
    }

    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.validator = FieldValidator::new(style);
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// 校验单个字段，不修改错误表
    pub fn validate_field(&self, field: &str, value: Option<&FieldValue>) -> Option<String> {
        self.validator.validate(field, value, self.rules.get(field))
    }

    /// 校验规则集中的全部字段并整体替换错误表
    ///
    /// 值袋中没有规则的字段被忽略。返回 true 表示全部通过。
    pub fn validate_all(&mut self, values: &ValueBag) -> bool {
        let errors: ErrorMap = self
            .rules
            .fields()
            .filter_map(|field| {
                self.validate_field(field, values.get(field))
                    .map(|message| (field.to_string(), message))
            })
            .collect();

        tracing::debug!(
            fields = self.rules.len(),
            failed = errors.len(),
            "Form validation finished"
        );

        self.errors = errors;
        self.errors.is_empty()
    }

    /// 与 `validate_all` 相同，失败时返回全部字段错误，便于提交路径使用 `?`
    pub fn check(&mut self, values: &ValueBag) -> ValidationResult<()> {
        if self.validate_all(values) {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(self.errors.clone()))
        }
    }

    /// 字段变更时调用：重新校验该字段并更新它在错误表中的状态
    pub fn touch(&mut self, field: &str, value: Option<&FieldValue>) -> Option<&str> {
        match self.validate_field(field, value) {
            Some(message) => {
                self.errors.insert(field.to_string(), message);
            }
            None => {
                self.errors.remove(field);
            }
        }
        self.error(field)
    }

    pub fn clear_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn clear_all_errors(&mut self) {
        self.errors.clear();
    }

    /// 表单重置
    pub fn reset(&mut self) {
        self.clear_all_errors();
    }

    /// 强制设置错误（例如服务端返回“邮箱已注册”）
    ///
    /// 空消息等同于清除该字段的错误。
    pub fn set_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        if message.is_empty() {
            self.errors.remove(&field);
        } else {
            self.errors.insert(field, message);
        }
    }

    /// 批量写入服务端返回的字段错误
    pub fn apply_server_errors<I, K, V>(&mut self, errors: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (field, message) in errors {
            self.set_error(field, message);
        }
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// 错误表为空即有效；每次调用都从错误表计算
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
