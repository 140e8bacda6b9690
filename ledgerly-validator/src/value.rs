//! 表单字段值

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 表单字段的当前值
///
/// 字段缺失（前端的 `undefined`）不在这里表示，而是值袋中没有这个键。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// `Null` 或空字符串
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// `Null`、空字符串或只含空白的字符串
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 数值解释：数字原样返回，字符串按十进制解析；非有限值视为非数字
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }

    /// 纯数字串：ASCII 数字组成的文本，或非负整数
    pub fn as_digits(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
                Some(s.clone())
            }
            FieldValue::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
                Some(format!("{:.0}", n))
            }
            _ => None,
        }
    }
}

/// 表单值袋：字段名 -> 当前值，由各页面持有，校验引擎只读
pub type ValueBag = HashMap<String, FieldValue>;

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    FieldValue::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// 构造 `ValueBag`
///
/// ```
/// use ledgerly_validator::{form_values, FieldValue};
///
/// let values = form_values! { "firstName" => "Jane", "gstRate" => 18 };
/// assert_eq!(values["gstRate"], FieldValue::Number(18.0));
/// ```
#[macro_export]
macro_rules! form_values {
    () => {
        $crate::ValueBag::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut values = $crate::ValueBag::new();
        $(
            values.insert(::std::string::String::from($field), $crate::FieldValue::from($value));
        )+
        values
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from("  ").is_empty());
        assert!(FieldValue::from("  ").is_blank());
        assert!(!FieldValue::from(0).is_blank());
        assert!(!FieldValue::from(false).is_blank());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(FieldValue::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(FieldValue::from(-3).as_number(), Some(-3.0));
        assert_eq!(FieldValue::from("12abc").as_number(), None);
        assert_eq!(FieldValue::from("inf").as_number(), None);
        assert_eq!(FieldValue::from(true).as_number(), None);
    }

    #[test]
    fn test_as_digits() {
        assert_eq!(FieldValue::from("0560102").as_digits().as_deref(), Some("0560102"));
        assert_eq!(FieldValue::from(560102).as_digits().as_deref(), Some("560102"));
        assert_eq!(FieldValue::from("56 01").as_digits(), None);
        assert_eq!(FieldValue::from(1.5).as_digits(), None);
        assert_eq!(FieldValue::from(-4).as_digits(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(7u32)), FieldValue::Number(7.0));
    }

    #[test]
    fn test_deserialize_json_bag() {
        let values: ValueBag = serde_json::from_str(
            r#"{"firstName": "Jane", "gstRate": 18, "isActive": true, "notes": null}"#,
        )
        .unwrap();

        assert_eq!(values["firstName"], FieldValue::from("Jane"));
        assert_eq!(values["gstRate"], FieldValue::Number(18.0));
        assert_eq!(values["isActive"], FieldValue::Bool(true));
        assert_eq!(values["notes"], FieldValue::Null);
    }

    #[test]
    fn test_nested_json_is_rejected() {
        let result: Result<ValueBag, _> = serde_json::from_str(r#"{"tags": ["a", "b"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_form_values_macro() {
        let values = form_values! { "firstName" => "Jane", "pincode" => "560102" };
        assert_eq!(values.len(), 2);
        assert_eq!(values["pincode"], FieldValue::from("560102"));
        assert!(form_values!().is_empty());
    }
}
