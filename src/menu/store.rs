//! 内存菜单存储（种子数据）

use crate::menu::{Crust, Pizza, Sauce, Size, Topping, ToppingCategory};

/// 只读菜单：构建后不再修改，可直接 `Arc` 共享
#[derive(Debug, Clone, Default)]
pub struct MenuStore {
    sizes: Vec<Size>,
    sauces: Vec<Sauce>,
    crusts: Vec<Crust>,
    categories: Vec<ToppingCategory>,
    toppings: Vec<Topping>,
    pizzas: Vec<Pizza>,
}

impl MenuStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 默认菜单：4 种尺寸、3 种酱料、5 种饼底、2 个配料分类、19 种配料、3 款招牌披萨
    pub fn seeded() -> Self {
        let sizes: Vec<Size> = [
            ("Small", 10.0),
            ("Medium", 15.0),
            ("Large", 20.0),
            ("Extra Large", 25.0),
        ]
        .iter()
        .zip(1..)
        .map(|((size, base_price), id)| Size {
            id,
            size: size.to_string(),
            base_price: *base_price,
        })
        .collect();

        let sauces: Vec<Sauce> = [("Tomato", 1.0), ("Alfredo", 2.0), ("Barbecue", 2.0)]
            .iter()
            .zip(1..)
            .map(|((name, price), id)| Sauce {
                id,
                name: name.to_string(),
                price: *price,
            })
            .collect();

        let crusts: Vec<Crust> = [
            ("Thin", 1.0),
            ("Thick", 2.0),
            ("Deep Dish", 3.0),
            ("Gluten Free", 3.0),
            ("Stuffed", 3.0),
        ]
        .iter()
        .zip(1..)
        .map(|((name, price), id)| Crust {
            id,
            name: name.to_string(),
            price: *price,
        })
        .collect();

        let meat = ToppingCategory {
            id: 1,
            name: "Meat".to_string(),
            description: Some("Meat toppings".to_string()),
        };
        let vegetable = ToppingCategory {
            id: 2,
            name: "Vegetable".to_string(),
            description: Some("Vegetable toppings".to_string()),
        };

        let toppings: Vec<Topping> = [
            ("Pepperoni", 1.50, &meat),
            ("Mushrooms", 1.50, &vegetable),
            ("Onions", 1.00, &vegetable),
            ("Bell Peppers", 1.00, &vegetable),
            ("Spinach", 1.00, &vegetable),
            ("Anchovies", 1.00, &meat),
            ("Pineapple", 1.00, &vegetable),
            ("Ham", 1.50, &meat),
            ("Sausage", 1.50, &meat),
            ("Chicken", 1.50, &meat),
            ("Bacon", 1.50, &meat),
            ("Artichoke", 1.00, &vegetable),
            ("Jalapenos", 1.00, &vegetable),
            ("Olives", 1.00, &vegetable),
            ("Tomatoes", 1.00, &vegetable),
            ("Garlic", 1.00, &vegetable),
            ("Red Onions", 1.00, &vegetable),
            ("Green Onions", 1.00, &vegetable),
            ("Red Peppers", 1.00, &vegetable),
        ]
        .iter()
        .zip(1..)
        .map(|((name, price, category), id)| Topping {
            id,
            name: name.to_string(),
            price: *price,
            categories: vec![(*category).clone()],
        })
        .collect();

        let pick = |names: &[&str]| -> Vec<Topping> {
            toppings
                .iter()
                .filter(|t| names.contains(&t.name.as_str()))
                .cloned()
                .collect()
        };
        let tomato = sauces[0].clone();
        let thick = crusts[1].clone();
        let designer = |id: i64, name: &str, description: &str, image: &str, toppings: Vec<Topping>| Pizza {
            id,
            name: name.to_string(),
            description: Some(description.to_string()),
            image_url: Some(image.to_string()),
            is_available: true,
            sizes: sizes.clone(),
            sauce: tomato.clone(),
            crust: thick.clone(),
            toppings,
        };
        let vegetarian_toppings: Vec<Topping> = toppings
            .iter()
            .filter(|t| t.categories.iter().any(|c| c.id == vegetable.id))
            .cloned()
            .collect();
        let pizzas = vec![
            designer(
                1,
                "Margherita",
                "A classic pizza with tomato sauce, mozzarella, and basil",
                "https://example.com/margherita.jpg",
                pick(&["Onions", "Bell Peppers", "Spinach"]),
            ),
            designer(
                2,
                "Pepperoni",
                "A pizza with pepperoni, mozzarella, and tomato sauce",
                "https://example.com/pepperoni.jpg",
                pick(&["Pepperoni"]),
            ),
            designer(
                3,
                "Vegetarian",
                "A pizza with vegetables, mozzarella, and tomato sauce",
                "https://example.com/vegetarian.jpg",
                vegetarian_toppings,
            ),
        ];

        Self {
            sizes,
            sauces,
            crusts,
            categories: vec![meat, vegetable],
            toppings,
            pizzas,
        }
    }

    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    pub fn size(&self, id: i64) -> Option<&Size> {
        self.sizes.iter().find(|s| s.id == id)
    }

    pub fn sauces(&self) -> &[Sauce] {
        &self.sauces
    }

    pub fn sauce(&self, id: i64) -> Option<&Sauce> {
        self.sauces.iter().find(|s| s.id == id)
    }

    pub fn crusts(&self) -> &[Crust] {
        &self.crusts
    }

    pub fn crust(&self, id: i64) -> Option<&Crust> {
        self.crusts.iter().find(|c| c.id == id)
    }

    pub fn topping_categories(&self) -> &[ToppingCategory] {
        &self.categories
    }

    pub fn topping_category(&self, id: i64) -> Option<&ToppingCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn toppings(&self) -> &[Topping] {
        &self.toppings
    }

    pub fn topping(&self, id: i64) -> Option<&Topping> {
        self.toppings.iter().find(|t| t.id == id)
    }

    pub fn pizzas(&self) -> &[Pizza] {
        &self.pizzas
    }

    pub fn pizza(&self, id: i64) -> Option<&Pizza> {
        self.pizzas.iter().find(|p| p.id == id)
    }
}
