//! 规则表校验
//!
//! 每个字段对应一组按顺序执行的检查，单个字段遇到第一个失败即停止，
//! 所有失败字段统一收集到 [`ValidationErrors`] 中。

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

/// 单项检查
pub type Check = fn(&Value) -> Result<(), ValidationError>;

/// 单个字段的规则
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub checks: &'static [Check],
}

/// 按字段查找待校验的值，`None` 表示未提供
pub trait Attributes {
    fn get(&self, field: &str) -> Option<&Value>;
}

/// 一次操作使用的规则集合
#[derive(Clone, Copy)]
pub struct RuleSet(pub &'static [FieldRule]);

impl RuleSet {
    pub fn validate<A: Attributes>(&self, attributes: &A) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for rule in self.0 {
            match attributes.get(rule.field) {
                None if rule.required => {
                    errors.add(rule.field, ValidationError::new("required"));
                }
                None => {}
                Some(value) => {
                    if let Some(err) = rule.checks.iter().find_map(|check| check(value).err()) {
                        errors.add(rule.field, err);
                    }
                }
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// 必须是字符串
pub fn string(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::String(_) => Ok(()),
        _ => Err(ValidationError::new("string")),
    }
}

/// 去掉首尾空白后不能为空
pub fn filled(value: &Value) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::new("filled")),
    }
}

/// 去掉首尾空白后最多 `N` 个字符
pub fn max_length<const N: usize>(value: &Value) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(s) if s.trim().chars().count() <= N => Ok(()),
        _ => Err(ValidationError::new("length")),
    }
}

/// 数字或数字字符串
pub fn numeric(value: &Value) -> Result<(), ValidationError> {
    parse_decimal(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("numeric"))
}

/// 不小于 0，非数字同样视为失败
pub fn non_negative(value: &Value) -> Result<(), ValidationError> {
    match parse_decimal(value) {
        Some(n) if n >= Decimal::ZERO => Ok(()),
        _ => Err(ValidationError::new("min")),
    }
}

/// 把 JSON 数字或数字字符串解析为十进制数
pub fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s.trim()),
        _ => None,
    }
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    // rust_decimal 接受 `1_000` 这类分隔符写法
    if s.is_empty() || s.contains('_') {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct Map(HashMap<&'static str, Value>);

    impl Attributes for Map {
        fn get(&self, field: &str) -> Option<&Value> {
            self.0.get(field)
        }
    }

    const RULES: RuleSet = RuleSet(&[
        FieldRule {
            field: "title",
            required: true,
            checks: &[string, filled],
        },
        FieldRule {
            field: "amount",
            required: false,
            checks: &[numeric, non_negative],
        },
    ]);

    #[test]
    fn test_missing_required_field() {
        let attrs = Map(HashMap::new());
        let errors = RULES.validate(&attrs).unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.values().next().unwrap()[0].code, "required");
    }

    #[test]
    fn test_optional_field_skipped_when_absent() {
        let attrs = Map(HashMap::from([("title", json!("x"))]));
        assert!(RULES.validate(&attrs).is_ok());
    }

    #[test]
    fn test_stops_at_first_failing_check() {
        let attrs = Map(HashMap::from([
            ("title", json!("x")),
            ("amount", json!("abc")),
        ]));
        let errors = RULES.validate(&attrs).unwrap_err();
        let codes: Vec<_> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter().map(|e| e.code.to_string()))
            .collect();
        assert_eq!(codes, vec!["numeric"]);
    }

    #[test]
    fn test_collects_every_failing_field() {
        let attrs = Map(HashMap::from([("title", json!("  ")), ("amount", json!(-1))]));
        let errors = RULES.validate(&attrs).unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(parse_decimal(&json!("9.5")), Some(Decimal::new(95, 1)));
        assert_eq!(parse_decimal(&json!(" 23.30 ")), Some(Decimal::new(2330, 2)));
        assert_eq!(parse_decimal(&json!(10)), Some(Decimal::from(10)));
        assert_eq!(parse_decimal(&json!(1.25)), Some(Decimal::new(125, 2)));
        assert_eq!(parse_decimal(&json!("1e2")), Some(Decimal::from(100)));
        assert_eq!(parse_decimal(&json!("Not a number")), None);
        assert_eq!(parse_decimal(&json!("")), None);
        assert_eq!(parse_decimal(&json!("1_000")), None);
        assert_eq!(parse_decimal(&json!("1_000.50")), None);
        assert_eq!(parse_decimal(&json!(true)), None);
        assert_eq!(parse_decimal(&json!(null)), None);
    }

    #[test]
    fn test_max_length_counts_trimmed_chars() {
        assert!(max_length::<3>(&json!("abc")).is_ok());
        assert!(max_length::<3>(&json!("  abc  ")).is_ok());
        assert!(max_length::<3>(&json!("äöü")).is_ok());
        assert!(max_length::<3>(&json!("abcd")).is_err());
    }

    #[test]
    fn test_non_negative_allows_zero() {
        assert!(non_negative(&json!("0")).is_ok());
        assert!(non_negative(&json!(0.01)).is_ok());
        assert!(non_negative(&json!("-10")).is_err());
    }
}
