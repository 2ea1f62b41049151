//! 描述符表：路由表 + Schema 表
//!
//! 启动时构建一次，之后只读，以 `Arc<Catalog>` 在所有并发对话间共享，无需加锁。
//! 下标按构建顺序分配，并且会写进模型的系统提示词（"0-indexed"），因此调整顺序属于破坏性变更。
//! 越界下标来自不可信的模型输出，必须是可恢复的 `CatalogError::NotFound`，而不是 panic。

mod builtin;
pub mod route;
pub mod schema;

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use route::{HttpMethod, RouteDescriptor};
pub use schema::SchemaDescriptor;

/// 两张表之一
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Routes,
    Schemas,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Routes => f.write_str("route"),
            Table::Schemas => f.write_str("schema"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("No {table} at index {index} (valid range: 0..{len})")]
    NotFound { table: Table, index: i64, len: usize },
}

/// 属性查找结果：Found(null) 与 Unknown 必须可区分
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Found(Value),
    Unknown { available: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct Catalog {
    routes: Vec<RouteDescriptor>,
    schemas: Vec<SchemaDescriptor>,
}

impl Catalog {
    /// 以给定顺序构建；index 字段按位置重写，保证 `route_at(i).index == i`
    pub fn new(mut routes: Vec<RouteDescriptor>, mut schemas: Vec<SchemaDescriptor>) -> Self {
        for (i, r) in routes.iter_mut().enumerate() {
            r.index = i;
        }
        for (i, s) in schemas.iter_mut().enumerate() {
            s.index = i;
        }
        Self { routes, schemas }
    }

    /// 菜单服务的内置表
    pub fn menu() -> Self {
        Self::new(builtin::menu_routes(), builtin::menu_schemas())
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn schemas(&self) -> &[SchemaDescriptor] {
        &self.schemas
    }

    pub fn route_at(&self, index: i64) -> Result<&RouteDescriptor, CatalogError> {
        lookup(&self.routes, index).ok_or(CatalogError::NotFound {
            table: Table::Routes,
            index,
            len: self.routes.len(),
        })
    }

    pub fn schema_at(&self, index: i64) -> Result<&SchemaDescriptor, CatalogError> {
        lookup(&self.schemas, index).ok_or(CatalogError::NotFound {
            table: Table::Schemas,
            index,
            len: self.schemas.len(),
        })
    }

    pub fn route_attribute(&self, index: i64, name: &str) -> Result<Attribute, CatalogError> {
        let route = self.route_at(index)?;
        Ok(attribute_of(route, name))
    }

    pub fn schema_attribute(&self, index: i64, name: &str) -> Result<Attribute, CatalogError> {
        let schema = self.schema_at(index)?;
        Ok(attribute_of(schema, name))
    }

    /// 白名单：返回与 (method, path) 匹配的第一条路由
    pub fn find_route(&self, method: HttpMethod, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.matches(method, path))
    }
}

fn lookup<T>(items: &[T], index: i64) -> Option<&T> {
    usize::try_from(index).ok().and_then(|i| items.get(i))
}

/// 按序列化后的字段名取值，与直接访问字段得到的值一致
fn attribute_of<T: Serialize>(item: &T, name: &str) -> Attribute {
    let value = serde_json::to_value(item).unwrap_or(Value::Null);
    match value {
        Value::Object(map) => match map.get(name) {
            Some(v) => Attribute::Found(v.clone()),
            None => Attribute::Unknown {
                available: map.keys().cloned().collect(),
            },
        },
        _ => Attribute::Unknown { available: Vec::new() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_menu_tables_indices_match_positions() {
        let c = Catalog::menu();
        assert_eq!(c.routes().len(), 12);
        assert_eq!(c.schemas().len(), 6);
        for i in 0..c.routes().len() {
            let r = c.route_at(i as i64).unwrap();
            assert_eq!(r.index, i);
            assert_eq!(r, &c.routes()[i]);
        }
        for i in 0..c.schemas().len() {
            assert_eq!(c.schema_at(i as i64).unwrap().index, i);
        }
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        let c = Catalog::menu();
        for bad in [12_i64, 13, 1000, -1, i64::MIN, i64::MAX] {
            assert_eq!(
                c.route_at(bad),
                Err(CatalogError::NotFound { table: Table::Routes, index: bad, len: 12 })
            );
        }
        assert!(matches!(
            c.schema_at(6),
            Err(CatalogError::NotFound { table: Table::Schemas, len: 6, .. })
        ));
    }

    #[test]
    fn test_route_attribute_matches_field() {
        let c = Catalog::menu();
        let r = c.route_at(0).unwrap();
        assert_eq!(
            c.route_attribute(0, "route").unwrap(),
            Attribute::Found(json!(r.path_template))
        );
        assert_eq!(
            c.route_attribute(0, "parameters").unwrap(),
            Attribute::Found(json!(r.parameter_names))
        );
        assert_eq!(
            c.route_attribute(0, "response").unwrap(),
            Attribute::Found(r.response_shape.clone())
        );
    }

    #[test]
    fn test_empty_field_is_found_not_unknown() {
        let c = Catalog::menu();
        // 1 = 全部尺寸，无参数
        assert_eq!(
            c.route_attribute(1, "parameters").unwrap(),
            Attribute::Found(json!([]))
        );
        match c.route_attribute(1, "colour").unwrap() {
            Attribute::Unknown { available } => {
                assert!(available.contains(&"route".to_string()));
                assert!(available.contains(&"method".to_string()));
            }
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_attribute() {
        let c = Catalog::menu();
        match c.schema_attribute(0, "properties").unwrap() {
            Attribute::Found(v) => assert!(v.get("base_price").is_some()),
            other => panic!("expected Found, got {:?}", other),
        }
        assert!(matches!(
            c.schema_attribute(0, "nope").unwrap(),
            Attribute::Unknown { .. }
        ));
        assert!(c.schema_attribute(99, "title").is_err());
    }

    #[test]
    fn test_find_route_whitelist() {
        let c = Catalog::menu();
        let r = c.find_route(HttpMethod::Get, "/pizza/get_pizza_sizes").unwrap();
        assert_eq!(r.index, 1);
        let r = c.find_route(HttpMethod::Get, "/pizza/get_designer_pizza/2").unwrap();
        assert_eq!(r.index, 10);
        assert!(c.find_route(HttpMethod::Delete, "/pizza/delete_pizza/1").is_none());
        assert!(c.find_route(HttpMethod::Post, "/pizza/get_pizza_sizes").is_none());
        assert!(c.find_route(HttpMethod::Get, "/chat").is_none());
    }

    #[test]
    fn test_new_rewrites_indices() {
        let mut routes = Catalog::menu().routes().to_vec();
        routes.reverse();
        let c = Catalog::new(routes, Vec::new());
        assert_eq!(c.route_at(0).unwrap().index, 0);
        assert_eq!(c.route_at(0).unwrap().path_template, "/pizza/get_designer_pizzas");
    }
}
