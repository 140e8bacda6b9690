//! 预设规则
//!
//! 页面按名字引用这些规则，不各自重复写正则。
//!
//! | 名称 | 约束 |
//! |---|---|
//! | `required` | 必填 |
//! | `email` | 必填 + 邮箱格式 |
//! | `phone` | 必填 + 纯数字，至少 10 位 |
//! | `optionalPhone` | 同 `phone`，非必填 |
//! | `pincode` | 必填 + 恰好 6 位数字 |
//! | `amount` | 非必填，数值且 >= 0 |
//! | `percentage` | 非必填，数值且在 0..=100 |

use crate::error::RuleConfigError;
use crate::rule::Rule;
use crate::value::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const DIGITS_PATTERN: &str = r"^[0-9]+$";

pub const PHONE_MIN_DIGITS: usize = 10;
pub const PINCODE_DIGITS: usize = 6;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));
static DIGITS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(DIGITS_PATTERN).expect("DIGITS_PATTERN is a valid regex"));

/// 预设名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Required,
    Email,
    Phone,
    OptionalPhone,
    Pincode,
    Amount,
    Percentage,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Required,
        Preset::Email,
        Preset::Phone,
        Preset::OptionalPhone,
        Preset::Pincode,
        Preset::Amount,
        Preset::Percentage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Required => "required",
            Preset::Email => "email",
            Preset::Phone => "phone",
            Preset::OptionalPhone => "optionalPhone",
            Preset::Pincode => "pincode",
            Preset::Amount => "amount",
            Preset::Percentage => "percentage",
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Preset::Required => required(),
            Preset::Email => email(),
            Preset::Phone => phone(),
            Preset::OptionalPhone => optional_phone(),
            Preset::Pincode => pincode(),
            Preset::Amount => amount(),
            Preset::Percentage => percentage(),
        }
    }
}

impl FromStr for Preset {
    type Err = RuleConfigError;

    /// 接受 camelCase 与 snake_case 两种写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Preset::Required),
            "email" => Ok(Preset::Email),
            "phone" => Ok(Preset::Phone),
            "optionalPhone" | "optional_phone" => Ok(Preset::OptionalPhone),
            "pincode" => Ok(Preset::Pincode),
            "amount" => Ok(Preset::Amount),
            "percentage" => Ok(Preset::Percentage),
            _ => Err(RuleConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn required() -> Rule {
    Rule::required()
}

pub fn email() -> Rule {
    Rule::required().regex(EMAIL_REGEX.clone())
}

pub fn phone() -> Rule {
    Rule::required()
        .regex(DIGITS_REGEX.clone())
        .custom(check_phone_digits)
}

pub fn optional_phone() -> Rule {
    phone().optional()
}

pub fn pincode() -> Rule {
    Rule::required()
        .regex(DIGITS_REGEX.clone())
        .custom(check_pincode_digits)
}

pub fn amount() -> Rule {
    Rule::new().custom(check_amount)
}

pub fn percentage() -> Rule {
    Rule::new().custom(check_percentage)
}

// 文本值已被 DIGITS_REGEX 过滤，这里主要处理数字类型的值
fn check_phone_digits(value: &FieldValue) -> Option<String> {
    match value.as_digits() {
        None => Some("Phone number must contain only digits".to_string()),
        Some(digits) if digits.len() < PHONE_MIN_DIGITS => Some(format!(
            "Phone number must be at least {} digits",
            PHONE_MIN_DIGITS
        )),
        Some(_) => None,
    }
}

fn check_pincode_digits(value: &FieldValue) -> Option<String> {
    match value.as_digits() {
        None => Some("Pincode must contain only digits".to_string()),
        Some(digits) if digits.len() != PINCODE_DIGITS => {
            Some(format!("Pincode must be exactly {} digits", PINCODE_DIGITS))
        }
        Some(_) => None,
    }
}

fn check_amount(value: &FieldValue) -> Option<String> {
    match value.as_number() {
        None => Some("Amount must be a valid number".to_string()),
        Some(n) if n < 0.0 => Some("Amount cannot be negative".to_string()),
        Some(_) => None,
    }
}

fn check_percentage(value: &FieldValue) -> Option<String> {
    match value.as_number() {
        None => Some("Percentage must be a valid number".to_string()),
        Some(n) if !(0.0..=100.0).contains(&n) => {
            Some("Percentage must be between 0 and 100".to_string())
        }
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate_field;

    fn check(field: &str, preset: Preset, value: impl Into<FieldValue>) -> Option<String> {
        validate_field(field, Some(&value.into()), Some(&preset.rule()))
    }

    #[test]
    fn test_cached_patterns_compile() {
        assert!(EMAIL_REGEX.is_match("a@b.com"));
        assert!(DIGITS_REGEX.is_match("560102"));
        assert!(!DIGITS_REGEX.is_match("５６０１０２"));
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!("optional_phone".parse::<Preset>().unwrap(), Preset::OptionalPhone);
        assert!(matches!(
            "gstin".parse::<Preset>(),
            Err(RuleConfigError::UnknownPreset(ref name)) if name == "gstin"
        ));
    }

    #[test]
    fn test_email() {
        assert_eq!(check("email", Preset::Email, "a@b.com"), None);
        assert_eq!(check("email", Preset::Email, "a@b").as_deref(), Some("Email format is invalid"));
        assert_eq!(
            check("email", Preset::Email, "a b@c.com").as_deref(),
            Some("Email format is invalid")
        );
        assert_eq!(check("email", Preset::Email, "").as_deref(), Some("Email is required"));
    }

    #[test]
    fn test_phone() {
        assert_eq!(check("phone", Preset::Phone, "9876543210"), None);
        assert_eq!(check("phone", Preset::Phone, "919876543210"), None);
        assert_eq!(
            check("phone", Preset::Phone, "98765").as_deref(),
            Some("Phone number must be at least 10 digits")
        );
        assert_eq!(
            check("phone", Preset::Phone, "98765-43210").as_deref(),
            Some("Phone format is invalid")
        );
        assert_eq!(check("phone", Preset::Phone, 9876543210u64), None);
    }

    #[test]
    fn test_optional_phone() {
        assert_eq!(check("alternatePhone", Preset::OptionalPhone, ""), None);
        assert_eq!(validate_field("alternatePhone", None, Some(&optional_phone())), None);
        assert_eq!(
            check("alternatePhone", Preset::OptionalPhone, "12345").as_deref(),
            Some("Phone number must be at least 10 digits")
        );
    }

    #[test]
    fn test_pincode() {
        assert_eq!(check("pincode", Preset::Pincode, "560102"), None);
        assert_eq!(
            check("pincode", Preset::Pincode, "12a456").as_deref(),
            Some("Pincode format is invalid")
        );
        assert_eq!(
            check("pincode", Preset::Pincode, "12345").as_deref(),
            Some("Pincode must be exactly 6 digits")
        );
        assert_eq!(
            check("pincode", Preset::Pincode, "1234567").as_deref(),
            Some("Pincode must be exactly 6 digits")
        );
        assert_eq!(check("pincode", Preset::Pincode, 560102), None);
    }

    #[test]
    fn test_amount() {
        assert_eq!(check("amount", Preset::Amount, "1500.50"), None);
        assert_eq!(check("amount", Preset::Amount, 0), None);
        assert_eq!(check("amount", Preset::Amount, ""), None);
        assert_eq!(
            check("amount", Preset::Amount, "-1").as_deref(),
            Some("Amount cannot be negative")
        );
        assert_eq!(
            check("amount", Preset::Amount, "12,000").as_deref(),
            Some("Amount must be a valid number")
        );
    }

    #[test]
    fn test_percentage() {
        assert_eq!(check("gstRate", Preset::Percentage, 18), None);
        assert_eq!(check("gstRate", Preset::Percentage, "0"), None);
        assert_eq!(check("gstRate", Preset::Percentage, 100), None);
        assert_eq!(
            check("gstRate", Preset::Percentage, 100.5).as_deref(),
            Some("Percentage must be between 0 and 100")
        );
        assert_eq!(
            check("gstRate", Preset::Percentage, "abc").as_deref(),
            Some("Percentage must be a valid number")
        );
    }
}
