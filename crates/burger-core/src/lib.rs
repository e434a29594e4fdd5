//! Plain data types shared between the burger-plant engine and its CLI:
//! ingredients, the burger menu, orders, and per-lane dispensers.

#![forbid(unsafe_code)]
#![deny(unreachable_pub)]

mod catalogue;
mod dispenser;
mod error;
mod ingredient;
mod order;

pub use catalogue::{format_menu, BurgerType, DEFAULT_MENU, MAX_BURGER_TYPES};
pub use dispenser::{Dispenser, DEFAULT_CAPACITY};
pub use error::CatalogueError;
pub use ingredient::IngredientKind;
pub use order::{next_order_id, Order};
