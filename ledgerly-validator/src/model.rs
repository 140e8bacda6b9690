//! 静态声明的表单模型
//!
//! 通过 `#[derive(FormModel)]` 从结构体字段生成规则集与值袋，
//! 字段名和规则在编译期绑定。

use crate::rule::RuleSet;
use crate::session::FormSession;
use crate::value::ValueBag;

/// 表单模型
pub trait FormModel {
    /// 表单的规则集
    fn rule_set() -> RuleSet;

    /// 当前字段值
    fn values(&self) -> ValueBag;

    /// 新建该表单的校验会话
    fn session() -> FormSession
    where
        Self: Sized,
    {
        FormSession::new(Self::rule_set())
    }
}

/// 表单注册信息，由 `#[form(name = "...")]` 自动提交
pub struct FormRegistration {
    pub name: &'static str,
    pub rules: fn() -> RuleSet,
}

inventory::collect!(FormRegistration);

/// 遍历所有已注册的表单
pub fn registered_forms() -> impl Iterator<Item = &'static FormRegistration> {
    inventory::iter::<FormRegistration>.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldValue, Validate};

    fn no_test_clients(value: &FieldValue) -> Option<String> {
        value
            .as_text()
            .filter(|name| name.to_lowercase().starts_with("test"))
            .map(|_| "Client name looks like test data".to_string())
    }

    #[derive(Debug, Clone, crate::FormModel)]
    #[form(name = "test-client")]
    struct ClientForm {
        #[rule(required, max_length = 60, custom = no_test_clients)]
        first_name: String,
        last_name: Option<String>,
        #[rule(email)]
        email: String,
        #[rule(optional_phone)]
        alternate_phone: Option<String>,
        #[rule(pincode, name = "zip")]
        pincode: String,
        #[rule(pattern = "^[A-Z]{5}[0-9]{4}[A-Z]$")]
        pan: String,
        #[rule(skip)]
        #[allow(dead_code)]
        internal_id: u64,
    }

    #[derive(crate::FormModel)]
    struct InvoiceLine {
        #[rule(amount)]
        rate: f64,
        #[rule(percentage)]
        gst_rate: Option<u32>,
        #[rule(required, min_length = 3)]
        description: String,
    }

    fn client() -> ClientForm {
        ClientForm {
            first_name: "Jane".into(),
            last_name: None,
            email: "jane@firm.in".into(),
            alternate_phone: None,
            pincode: "560102".into(),
            pan: "ABCDE1234F".into(),
            internal_id: 42,
        }
    }

    #[test]
    fn test_derived_rule_set() {
        let rules = ClientForm::rule_set();
        let mut fields: Vec<_> = rules.fields().collect();
        fields.sort();
        assert_eq!(fields, vec!["alternatePhone", "email", "firstName", "pan", "zip"]);

        let first_name = rules.get("firstName").unwrap();
        assert!(first_name.required);
        assert_eq!(first_name.max_length, Some(60));
        assert!(first_name.custom.is_some());
        assert!(!rules.get("alternatePhone").unwrap().required);
        assert!(!rules.get("pan").unwrap().required);
    }

    #[test]
    fn test_derived_values() {
        let values = client().values();
        assert_eq!(values.len(), 6);
        assert_eq!(values["firstName"], FieldValue::from("Jane"));
        assert_eq!(values["lastName"], FieldValue::Null);
        assert_eq!(values["zip"], FieldValue::from("560102"));
        assert!(!values.contains_key("internalId"));
    }

    #[test]
    fn test_derived_validate() {
        assert!(client().validate().is_ok());

        let mut form = client();
        form.first_name = "Test Account".into();
        form.pincode = "5601".into();
        form.pan = "abcde1234f".into();

        let err = form.validate().unwrap_err();
        let errors = err.field_errors();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["firstName"], "Client name looks like test data");
        assert_eq!(errors["zip"], "Pincode must be exactly 6 digits");
        assert_eq!(errors["pan"], "Pan format is invalid");
    }

    #[test]
    fn test_numeric_fields() {
        let line = InvoiceLine {
            rate: -10.0,
            gst_rate: Some(118),
            description: "GST".into(),
        };
        let mut session = InvoiceLine::session();
        assert!(!session.validate_all(&line.values()));
        assert_eq!(session.error("rate"), Some("Amount cannot be negative"));
        assert_eq!(session.error("gstRate"), Some("Percentage must be between 0 and 100"));
        assert_eq!(session.error("description"), None);

        let line = InvoiceLine {
            rate: 2500.0,
            gst_rate: None,
            description: "Audit fee".into(),
        };
        assert!(line.validate().is_ok());
    }

    #[test]
    fn test_registration_is_collected() {
        let registration = registered_forms()
            .find(|r| r.name == "test-client")
            .expect("test-client should be registered");
        assert_eq!((registration.rules)().len(), 5);
    }
}
