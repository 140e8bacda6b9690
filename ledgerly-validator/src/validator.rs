use crate::error::{FieldFailure, ValidationResult};
use crate::rule::Rule;
use crate::value::FieldValue;
use ledgerly_core::LabelStyle;

/// 验证器 trait
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// 字段名转错误消息中的标签
///
/// `Capitalize` 只把首字符转大写；`Sentence` 额外把其余字符转小写。
pub fn field_label(field: &str, style: LabelStyle) -> String {
    let mut chars = field.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut label = String::with_capacity(field.len());
            label.extend(first.to_uppercase());
            match style {
                LabelStyle::Capitalize => label.push_str(chars.as_str()),
                LabelStyle::Sentence => label.extend(chars.flat_map(char::to_lowercase)),
            }
            label
        }
    }
}

/// 字段校验器
///
/// 检查顺序：必填 -> 空值短路 -> 最小长度 -> 最大长度 -> 正则 -> 自定义。
/// 第一个失败即返回。
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator {
    label_style: LabelStyle,
}

impl FieldValidator {
    pub fn new(label_style: LabelStyle) -> Self {
        Self { label_style }
    }

    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    /// 按规则检查一个值，`None` 表示字段缺失
    pub fn check(&self, value: Option<&FieldValue>, rule: &Rule) -> Result<(), FieldFailure> {
        if rule.required && value.map_or(true, FieldValue::is_blank) {
            return Err(FieldFailure::Required);
        }

        // 非必填且为空：后续检查全部跳过
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(()),
        };

        if let FieldValue::Text(text) = value {
            let len = text.chars().count();

            if let Some(min) = rule.min_length {
                if len < min {
                    return Err(FieldFailure::TooShort { min });
                }
            }

            if let Some(max) = rule.max_length {
                if len > max {
                    return Err(FieldFailure::TooLong { max });
                }
            }

            if let Some(pattern) = &rule.pattern {
                if !pattern.is_match(text) {
                    return Err(FieldFailure::InvalidFormat);
                }
            }
        }

        if let Some(custom) = rule.custom {
            if let Some(message) = custom(value).filter(|m| !m.is_empty()) {
                return Err(FieldFailure::Custom(message));
            }
        }

        Ok(())
    }

    /// 校验单个字段，返回错误消息；没有规则的字段总是通过
    pub fn validate(
        &self,
        field: &str,
        value: Option<&FieldValue>,
        rule: Option<&Rule>,
    ) -> Option<String> {
        let rule = rule?;
        match self.check(value, rule) {
            Ok(()) => None,
            Err(failure) => {
                let message = failure.message(&field_label(field, self.label_style));
                tracing::trace!(field, %message, "Field validation failed");
                Some(message)
            }
        }
    }
}

/// 使用默认标签风格校验单个字段
pub fn validate_field(field: &str, value: Option<&FieldValue>, rule: Option<&Rule>) -> Option<String> {
    FieldValidator::default().validate(field, value, rule)
}
