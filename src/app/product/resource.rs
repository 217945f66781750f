//! 产品资源的两种 JSON 表示
//!
//! 一次部署只使用其中一种：路由在启动时按配置对 [`ResponseShape`]
//! 单态化，处理器内部不做运行时分派。

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::model::Product;
use super::rules::RawAttributes;
use crate::core::response::{Document, RequestDocument};

pub const RESOURCE_TYPE: &str = "products";

/// 产品详情的规范地址
pub fn show_url(base_url: &str, id: i64) -> String {
    format!("{}/products/{}", base_url.trim_end_matches('/'), id)
}

pub trait ResponseShape: Send + Sync + 'static {
    /// 新建、更新请求体
    type Payload: DeserializeOwned + Send + 'static;
    type One: Serialize + Send;
    type Many: Serialize + Send;

    fn attributes(payload: Self::Payload) -> RawAttributes;

    fn one(product: Product, base_url: &str) -> Self::One;

    fn many(products: Vec<Product>, base_url: &str) -> Self::Many;
}

/// 扁平表示：`{id, name, price}`，集合为裸数组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatProduct {
    pub id: i64,
    pub name: String,
    pub price: String,
}

impl From<Product> for FlatProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            price: product.formatted_price(),
            name: product.name,
        }
    }
}

pub struct Flat;

impl ResponseShape for Flat {
    type Payload = RawAttributes;
    type One = FlatProduct;
    type Many = Vec<FlatProduct>;

    fn attributes(payload: RawAttributes) -> RawAttributes {
        payload
    }

    fn one(product: Product, _base_url: &str) -> FlatProduct {
        product.into()
    }

    fn many(products: Vec<Product>, _base_url: &str) -> Vec<FlatProduct> {
        products.into_iter().map(FlatProduct::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// JSON:API 风格的资源对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub attributes: ProductAttributes,
    pub links: ResourceLinks,
}

impl ProductResource {
    pub fn new(product: Product, base_url: &str) -> Self {
        Self {
            kind: RESOURCE_TYPE.to_string(),
            id: product.id,
            links: ResourceLinks {
                self_link: show_url(base_url, product.id),
            },
            attributes: ProductAttributes {
                price: product.formatted_price(),
                name: product.name,
            },
        }
    }
}

/// 请求体中的 `data` 对象，只读取 `attributes`
#[derive(Debug, Default, Deserialize)]
pub struct ResourceObject {
    #[serde(default)]
    pub attributes: RawAttributes,
}

pub struct JsonApi;

impl ResponseShape for JsonApi {
    type Payload = RequestDocument<ResourceObject>;
    type One = Document<ProductResource>;
    type Many = Document<Vec<ProductResource>>;

    fn attributes(payload: Self::Payload) -> RawAttributes {
        payload.data.attributes
    }

    fn one(product: Product, base_url: &str) -> Self::One {
        Document::new(ProductResource::new(product, base_url))
    }

    fn many(products: Vec<Product>, base_url: &str) -> Self::Many {
        Document::new(
            products
                .into_iter()
                .map(|product| ProductResource::new(product, base_url))
                .collect(),
        )
    }
}
