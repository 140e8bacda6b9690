use crate::error::RuleConfigError;
use crate::value::FieldValue;
use regex::Regex;
use std::collections::hash_map::{self, HashMap};

/// 自定义校验函数：返回 `Some(message)` 表示失败
///
/// 必须是纯函数，不做 I/O。
pub type CustomCheck = fn(&FieldValue) -> Option<String>;

/// 单个字段的校验规则
#[derive(Clone, Default)]
pub struct Rule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub custom: Option<CustomCheck>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl Rule {
    /// 空规则：任何值都通过
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn require(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// 编译并设置正则
    pub fn pattern(mut self, pattern: &str) -> Result<Self, RuleConfigError> {
        let regex = Regex::new(pattern).map_err(|source| RuleConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.pattern = Some(regex);
        Ok(self)
    }

    pub fn regex(mut self, regex: Regex) -> Self {
        self.pattern = Some(regex);
        self
    }

    pub fn custom(mut self, check: CustomCheck) -> Self {
        self.custom = Some(check);
        self
    }

    /// 检查长度上下限是否自洽
    pub fn check_bounds(&self, field: &str) -> Result<(), RuleConfigError> {
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min > max => Err(RuleConfigError::InvalidLengthBounds {
                field: field.to_string(),
                min,
                max,
            }),
            _ => Ok(()),
        }
    }
}

/// 规则集：字段名 -> 规则，每个表单构造一次
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: HashMap<String, Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式添加规则
    pub fn with(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.insert(field, rule);
        self
    }

    /// 添加或替换规则，返回被替换的旧规则
    pub fn insert(&mut self, field: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(field.into(), rule)
    }

    pub fn remove(&mut self, field: &str) -> Option<Rule> {
        self.rules.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 合并另一规则集，同名字段以 other 为准
    pub fn merge(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }
}

impl FromIterator<(String, Rule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (String, Rule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RuleSet {
    type Item = (String, Rule);
    type IntoIter = hash_map::IntoIter<String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = (&'a String, &'a Rule);
    type IntoIter = hash_map::Iter<'a, String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
