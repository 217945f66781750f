//! 产品字段校验规则

use serde::Deserialize;
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use super::model::{price_fits, NewProduct, ProductChanges, NAME_MAX_CHARS};
use crate::core::validation::{
    filled, max_length, non_negative, numeric, parse_decimal, string, Attributes, FieldRule,
    RuleSet,
};

/// 请求中携带的原始属性
///
/// 字段保持为任意 JSON，类型错误交给规则表判断；显式 `null` 与未提供等同。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAttributes {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl Attributes for RawAttributes {
    fn get(&self, field: &str) -> Option<&Value> {
        match field {
            "name" => self.name.as_ref(),
            "price" => self.price.as_ref(),
            _ => None,
        }
    }
}

pub const CREATE_RULES: RuleSet = RuleSet(&[
    FieldRule {
        field: "name",
        required: true,
        checks: &[string, filled, max_length::<NAME_MAX_CHARS>],
    },
    FieldRule {
        field: "price",
        required: true,
        checks: &[numeric, non_negative, storable_price],
    },
]);

pub const UPDATE_RULES: RuleSet = RuleSet(&[
    FieldRule {
        field: "name",
        required: false,
        checks: &[string, filled, max_length::<NAME_MAX_CHARS>],
    },
    FieldRule {
        field: "price",
        required: false,
        checks: &[numeric, non_negative, storable_price],
    },
]);

/// 舍入到两位小数后仍能放进价格列
fn storable_price(value: &Value) -> Result<(), ValidationError> {
    match parse_decimal(value) {
        Some(price) if price_fits(price) => Ok(()),
        _ => Err(ValidationError::new("max")),
    }
}

/// 取出已通过规则表的字段，未提供的为 `None`
fn changes_of(attributes: &RawAttributes) -> ProductChanges {
    ProductChanges {
        name: attributes
            .name
            .as_ref()
            .and_then(Value::as_str)
            .map(|name| name.trim().to_string()),
        price: attributes.price.as_ref().and_then(parse_decimal),
    }
}

/// 校验新建请求
///
/// `CREATE_RULES` 中两个字段均为必填，规则表通过后二者都已提供且可解析。
pub fn validate_create(attributes: &RawAttributes) -> Result<NewProduct, ValidationErrors> {
    CREATE_RULES.validate(attributes)?;

    match changes_of(attributes) {
        ProductChanges {
            name: Some(name),
            price: Some(price),
        } => Ok(NewProduct::new(name, price)),
        changes => {
            let mut errors = ValidationErrors::new();
            if changes.name.is_none() {
                errors.add("name", ValidationError::new("required"));
            }
            if changes.price.is_none() {
                errors.add("price", ValidationError::new("required"));
            }
            Err(errors)
        }
    }
}

/// 校验部分更新，只检查提供了的字段
pub fn validate_update(attributes: &RawAttributes) -> Result<ProductChanges, ValidationErrors> {
    UPDATE_RULES.validate(attributes)?;
    Ok(changes_of(attributes))
}
