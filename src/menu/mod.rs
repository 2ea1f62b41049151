//! 菜单资源：模型、内存存储与只读 REST 路由
//!
//! 模型同时派生 serde 与 schemars：前者用于 HTTP 响应，后者用于生成描述符表里的 schema。
//! 持久化与写操作不在本 crate 范围内，存储只在启动时按种子数据构建。

#[cfg(feature = "web")]
pub mod routes;
pub mod store;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use store::MenuStore;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Size {
    pub id: i64,
    pub size: String,
    pub base_price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Sauce {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Crust {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ToppingCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Topping {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub categories: Vec<ToppingCategory>,
}

/// 招牌披萨：嵌套完整的尺寸、酱料、饼底与配料
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub sizes: Vec<Size>,
    pub sauce: Sauce,
    pub crust: Crust,
    #[serde(default)]
    pub toppings: Vec<Topping>,
}

fn default_available() -> bool {
    true
}
