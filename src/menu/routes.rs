//! 菜单只读路由：路由表里每一条都对应这里的一个 handler
//!
//! 这些路由不经过对话准入限制，`invoke_route` 的回环调用总能被服务。

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::menu::MenuStore;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn not_found(what: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": format!("{} not found", what) })),
    )
}

fn found<T: Serialize + Clone>(item: Option<&T>, what: &str) -> ApiResult<T> {
    item.cloned().map(Json).ok_or_else(|| not_found(what))
}

pub fn router(store: Arc<MenuStore>) -> Router {
    Router::new()
        .route("/pizza/get_pizza_size/:size_id", get(get_size))
        .route("/pizza/get_pizza_sizes", get(get_sizes))
        .route("/pizza/get_pizza_sauce/:sauce_id", get(get_sauce))
        .route("/pizza/get_pizza_sauces", get(get_sauces))
        .route("/pizza/get_pizza_crust/:crust_id", get(get_crust))
        .route("/pizza/get_pizza_crusts", get(get_crusts))
        .route("/pizza/get_pizza_topping/:topping_id", get(get_topping))
        .route("/pizza/get_pizza_toppings", get(get_toppings))
        .route(
            "/pizza/get_pizza_topping_category/:category_id",
            get(get_topping_category),
        )
        .route(
            "/pizza/get_pizza_topping_categories",
            get(get_topping_categories),
        )
        .route("/pizza/get_designer_pizza/:pizza_id", get(get_pizza))
        .route("/pizza/get_designer_pizzas", get(get_pizzas))
        .with_state(store)
}

async fn get_size(State(m): State<Arc<MenuStore>>, Path(id): Path<i64>) -> ApiResult<crate::menu::Size> {
    found(m.size(id), "Size")
}

async fn get_sizes(State(m): State<Arc<MenuStore>>) -> Json<Vec<crate::menu::Size>> {
    Json(m.sizes().to_vec())
}

async fn get_sauce(State(m): State<Arc<MenuStore>>, Path(id): Path<i64>) -> ApiResult<crate::menu::Sauce> {
    found(m.sauce(id), "Sauce")
}

async fn get_sauces(State(m): State<Arc<MenuStore>>) -> Json<Vec<crate::menu::Sauce>> {
    Json(m.sauces().to_vec())
}

async fn get_crust(State(m): State<Arc<MenuStore>>, Path(id): Path<i64>) -> ApiResult<crate::menu::Crust> {
    found(m.crust(id), "Crust")
}

async fn get_crusts(State(m): State<Arc<MenuStore>>) -> Json<Vec<crate::menu::Crust>> {
    Json(m.crusts().to_vec())
}

async fn get_topping(State(m): State<Arc<MenuStore>>, Path(id): Path<i64>) -> ApiResult<crate::menu::Topping> {
    found(m.topping(id), "Topping")
}

async fn get_toppings(State(m): State<Arc<MenuStore>>) -> Json<Vec<crate::menu::Topping>> {
    Json(m.toppings().to_vec())
}

async fn get_topping_category(
    State(m): State<Arc<MenuStore>>,
    Path(id): Path<i64>,
) -> ApiResult<crate::menu::ToppingCategory> {
    found(m.topping_category(id), "Topping category")
}

async fn get_topping_categories(
    State(m): State<Arc<MenuStore>>,
) -> Json<Vec<crate::menu::ToppingCategory>> {
    Json(m.topping_categories().to_vec())
}

async fn get_pizza(State(m): State<Arc<MenuStore>>, Path(id): Path<i64>) -> ApiResult<crate::menu::Pizza> {
    found(m.pizza(id), "Pizza")
}

async fn get_pizzas(State(m): State<Arc<MenuStore>>) -> Json<Vec<crate::menu::Pizza>> {
    Json(m.pizzas().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_sizes() {
        let app = router(Arc::new(MenuStore::seeded()));
        let (status, body) = get_json(app, "/pizza/get_pizza_sizes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);
        assert_eq!(body[0]["size"], "Small");
    }

    #[tokio::test]
    async fn test_missing_item_is_404_json() {
        let app = router(Arc::new(MenuStore::seeded()));
        let (status, body) = get_json(app, "/pizza/get_designer_pizza/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Pizza not found");
    }

    #[tokio::test]
    async fn test_every_catalog_route_is_served() {
        let store = Arc::new(MenuStore::seeded());
        for route in Catalog::menu().routes() {
            let uri = route
                .parameter_names
                .iter()
                .fold(route.path_template.clone(), |acc, p| {
                    acc.replace(&format!("{{{}}}", p), "1")
                });
            let (status, _) = get_json(router(store.clone()), &uri).await;
            assert_eq!(status, StatusCode::OK, "route {} not served", uri);
        }
    }
}
