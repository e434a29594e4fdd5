use crate::ingredient::IngredientKind;

/// One buildable burger: a display name, a recipe, and a price.
///
/// `recipe` never exceeds 10 ingredients and `name` never exceeds 50
/// characters, matching the dispenser/order wire limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurgerType {
    pub name: &'static str,
    pub recipe: &'static [IngredientKind],
    pub price_cents: u32,
}

impl BurgerType {
    pub fn recipe(&self) -> &'static [IngredientKind] {
        self.recipe
    }
}

/// The built-in six-item menu. A real deployment could load a different
/// menu from configuration, but no more than [`MAX_BURGER_TYPES`] types may
/// ever be active at once.
pub const MAX_BURGER_TYPES: usize = 6;

pub const DEFAULT_MENU: [BurgerType; MAX_BURGER_TYPES] = [
    BurgerType {
        name: "Classic",
        recipe: &[
            IngredientKind::BottomBun,
            IngredientKind::Patty,
            IngredientKind::Lettuce,
            IngredientKind::Tomato,
            IngredientKind::TopBun,
        ],
        price_cents: 850,
    },
    BurgerType {
        name: "Cheeseburger",
        recipe: &[
            IngredientKind::BottomBun,
            IngredientKind::Patty,
            IngredientKind::Cheese,
            IngredientKind::Lettuce,
            IngredientKind::Tomato,
            IngredientKind::TopBun,
        ],
        price_cents: 925,
    },
    BurgerType {
        name: "BBQ Bacon",
        recipe: &[
            IngredientKind::BottomBun,
            IngredientKind::Patty,
            IngredientKind::Bacon,
            IngredientKind::Cheese,
            IngredientKind::Onion,
            IngredientKind::BbqSauce,
            IngredientKind::TopBun,
        ],
        price_cents: 1175,
    },
    BurgerType {
        name: "Veggie",
        recipe: &[
            IngredientKind::BottomBun,
            IngredientKind::VeggiePatty,
            IngredientKind::Lettuce,
            IngredientKind::Tomato,
            IngredientKind::Avocado,
            IngredientKind::Mayo,
            IngredientKind::TopBun,
        ],
        price_cents: 1025,
    },
    BurgerType {
        name: "Deluxe",
        recipe: &[
            IngredientKind::BottomBun,
            IngredientKind::Patty,
            IngredientKind::Cheese,
            IngredientKind::Bacon,
            IngredientKind::Lettuce,
            IngredientKind::Tomato,
            IngredientKind::Onion,
            IngredientKind::Mayo,
            IngredientKind::TopBun,
        ],
        price_cents: 1350,
    },
    BurgerType {
        name: "Spicy Mexican",
        recipe: &[
            IngredientKind::BottomBun,
            IngredientKind::Patty,
            IngredientKind::Cheese,
            IngredientKind::Jalapenos,
            IngredientKind::Tomato,
            IngredientKind::Onion,
            IngredientKind::SpicySauce,
            IngredientKind::TopBun,
        ],
        price_cents: 1200,
    },
];

/// Prints the menu in the format the `-m/--menu` CLI flag needs.
pub fn format_menu() -> String {
    let mut out = String::new();
    for burger in &DEFAULT_MENU {
        out.push_str(&format!(
            "{:<16} ${:>5.2}  {}\n",
            burger.name,
            burger.price_cents as f64 / 100.0,
            burger
                .recipe()
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_stays_within_documented_limits() {
        assert_eq!(DEFAULT_MENU.len(), MAX_BURGER_TYPES);
        for burger in &DEFAULT_MENU {
            assert!(burger.name.len() <= 50);
            assert!(burger.recipe().len() <= 10);
            assert!(!burger.recipe().is_empty());
        }
    }

    #[test]
    fn format_menu_lists_every_burger() {
        let rendered = format_menu();
        for burger in &DEFAULT_MENU {
            assert!(rendered.contains(burger.name));
        }
    }
}
