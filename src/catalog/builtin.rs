//! 菜单服务内置的路由表与 Schema 表

use serde_json::{json, Value};

use crate::catalog::route::{placeholder_names, HttpMethod, RouteDescriptor};
use crate::catalog::schema::{stripped_schema, SchemaDescriptor};
use crate::menu::{Crust, Pizza, Sauce, Size, Topping, ToppingCategory};

fn get_route(path: &str, description: &str, response: Value) -> RouteDescriptor {
    RouteDescriptor {
        index: 0,
        path_template: path.to_string(),
        method: HttpMethod::Get,
        description: description.to_string(),
        parameter_names: placeholder_names(path),
        response_shape: json!({ "type": "object", "properties": response }),
    }
}

/// 顺序即下标：按 (单个, 全部) 成对排列
pub(super) fn menu_routes() -> Vec<RouteDescriptor> {
    vec![
        get_route(
            "/pizza/get_pizza_size/{size_id}",
            "Get a specific pizza size by ID",
            stripped_schema::<Size>(),
        ),
        get_route(
            "/pizza/get_pizza_sizes",
            "Get all pizza sizes",
            stripped_schema::<Size>(),
        ),
        get_route(
            "/pizza/get_pizza_sauce/{sauce_id}",
            "Get a specific pizza sauce by ID",
            stripped_schema::<Sauce>(),
        ),
        get_route(
            "/pizza/get_pizza_sauces",
            "Get all pizza sauces",
            stripped_schema::<Sauce>(),
        ),
        get_route(
            "/pizza/get_pizza_crust/{crust_id}",
            "Get a specific pizza crust by ID",
            stripped_schema::<Crust>(),
        ),
        get_route(
            "/pizza/get_pizza_crusts",
            "Get all pizza crusts",
            stripped_schema::<Crust>(),
        ),
        get_route(
            "/pizza/get_pizza_topping/{topping_id}",
            "Get a specific pizza topping by ID",
            stripped_schema::<Topping>(),
        ),
        get_route(
            "/pizza/get_pizza_toppings",
            "Get all pizza toppings",
            stripped_schema::<Topping>(),
        ),
        get_route(
            "/pizza/get_pizza_topping_category/{category_id}",
            "Get a specific pizza topping category by ID",
            stripped_schema::<ToppingCategory>(),
        ),
        get_route(
            "/pizza/get_pizza_topping_categories",
            "Get all pizza topping categories",
            stripped_schema::<ToppingCategory>(),
        ),
        get_route(
            "/pizza/get_designer_pizza/{pizza_id}",
            "Get a specific designer pizza by ID",
            stripped_schema::<Pizza>(),
        ),
        get_route(
            "/pizza/get_designer_pizzas",
            "Get all designer pizzas",
            stripped_schema::<Pizza>(),
        ),
    ]
}

pub(super) fn menu_schemas() -> Vec<SchemaDescriptor> {
    vec![
        SchemaDescriptor::of::<Size>(0),
        SchemaDescriptor::of::<Sauce>(1),
        SchemaDescriptor::of::<Crust>(2),
        SchemaDescriptor::of::<Topping>(3),
        SchemaDescriptor::of::<ToppingCategory>(4),
        SchemaDescriptor::of::<Pizza>(5),
    ]
}
