//! 产品数据模型

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// 价格保留的小数位数
pub const PRICE_SCALE: u32 = 2;

/// 名称最大字符数，与 `VARCHAR(255)` 列一致
pub const NAME_MAX_CHARS: usize = 255;

/// 价格整数部分最多 10 位，与 `NUMERIC(12, 2)` 列一致
pub const PRICE_INTEGER_DIGITS: u32 = 10;

/// 已持久化的产品
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }
}

/// 通过校验的新建请求
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price: normalize_price(price),
        }
    }
}

/// 通过校验的部分更新，`None` 表示保留原值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = normalize_price(price);
        }
    }
}

/// 与 `DECIMAL(n,2)` 列一致：四舍五入到两位并固定标度
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut price =
        price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    price.rescale(PRICE_SCALE);
    if price.is_zero() {
        price.set_sign_positive(true);
    }
    price
}

/// 舍入后的价格能否按两位小数存入价格列
pub fn price_fits(price: Decimal) -> bool {
    normalize_price(price) < Decimal::from(10_i64.pow(PRICE_INTEGER_DIGITS))
}

pub fn format_price(price: Decimal) -> String {
    normalize_price(price).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(dec("9.5")), "9.50");
        assert_eq!(format_price(dec("100")), "100.00");
        assert_eq!(format_price(dec("23.30")), "23.30");
        assert_eq!(format_price(dec("0")), "0.00");
        assert_eq!(format_price(dec("-0")), "0.00");
    }

    #[test]
    fn test_normalize_rounds_half_away_from_zero() {
        assert_eq!(format_price(dec("1.005")), "1.01");
        assert_eq!(format_price(dec("1.004")), "1.00");
        assert_eq!(format_price(dec("2.675")), "2.68");
    }

    #[test]
    fn test_price_fits_column() {
        assert!(price_fits(dec("0")));
        assert!(price_fits(dec("9999999999.99")));
        assert!(price_fits(dec("9999999999.994")));
        // 舍入后进位到 11 位整数
        assert!(!price_fits(dec("9999999999.995")));
        assert!(!price_fits(dec("10000000000")));
        assert!(!price_fits(dec("70000000000000000000000000000")));
        assert!(!price_fits(dec("1234567890123456789012345678.9")));
    }

    #[test]
    fn test_apply_changes_keeps_unsupplied_fields() {
        let now = Utc::now();
        let mut product = Product {
            id: 1,
            name: "Product name".to_string(),
            price: dec("100.30"),
            created_at: now,
            updated_at: now,
        };

        ProductChanges {
            name: Some("Updated Product name".to_string()),
            price: None,
        }
        .apply_to(&mut product);
        assert_eq!(product.name, "Updated Product name");
        assert_eq!(product.formatted_price(), "100.30");

        ProductChanges {
            name: None,
            price: Some(dec("7")),
        }
        .apply_to(&mut product);
        assert_eq!(product.name, "Updated Product name");
        assert_eq!(product.formatted_price(), "7.00");
    }

    #[test]
    fn test_empty_changes() {
        assert!(ProductChanges::default().is_empty());
        assert!(!ProductChanges {
            name: None,
            price: Some(Decimal::ONE),
        }
        .is_empty());
    }
}
