//! Ledgerly Validator - 表单校验模块
//!
//! 每个新建/编辑表单使用的规则驱动校验器：
//! - 规则集（必填、长度、正则、自定义函数）
//! - 预设规则（email、phone、pincode、amount 等）
//! - 表单会话（错误表、整体校验、清除错误、服务端错误）
//! - `#[derive(FormModel)]` 在编译期绑定字段名与规则

// 派生宏生成的代码通过 ::ledgerly_validator 路径引用本 crate
extern crate self as ledgerly_validator;

pub mod error;
pub mod model;
pub mod presets;
pub mod registry;
pub mod rule;
pub mod session;
pub mod validator;
pub mod value;

pub use error::*;
pub use model::{registered_forms, FormModel, FormRegistration};
pub use presets::Preset;
pub use registry::{rule_from_spec, FormRegistry};
pub use rule::{CustomCheck, Rule, RuleSet};
pub use session::FormSession;
pub use validator::{field_label, validate_field, FieldValidator, Validate};
pub use value::{FieldValue, ValueBag};

pub use ledgerly_core::LabelStyle;

// 重新导出宏
pub use ledgerly_validator_macros::FormModel;

// 供宏生成的代码使用
#[doc(hidden)]
pub use inventory;
#[doc(hidden)]
pub use regex;
