use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::catalogue::BurgerType;
use crate::ingredient::IngredientKind;

static NEXT_ORDER_ID: AtomicU64 = AtomicU64::new(1);

/// A unique, process-wide order id. Ids are never reused.
pub fn next_order_id() -> u64 {
    NEXT_ORDER_ID.fetch_add(1, Ordering::Relaxed)
}

/// A single customer order moving through the plant.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: u64,
    pub burger_name: &'static str,
    pub recipe: &'static [IngredientKind],
    pub created_at: Instant,
    /// How many of the recipe's ingredients have been dispensed so far.
    pub progress_step: usize,
    /// How many times the dispatcher has tried to hand this order to a lane.
    pub assignment_attempts: u32,
    /// The lane currently (or most recently) working this order, if any.
    pub assigned_lane: Option<usize>,
}

impl Order {
    /// Builds a fresh order for the given burger type, stamped with a new id
    /// and the current time.
    pub fn new(burger: &BurgerType) -> Order {
        Order {
            id: next_order_id(),
            burger_name: burger.name,
            recipe: burger.recipe(),
            created_at: Instant::now(),
            progress_step: 0,
            assignment_attempts: 0,
            assigned_lane: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress_step >= self.recipe.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::DEFAULT_MENU;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = Order::new(&DEFAULT_MENU[0]);
        let b = Order::new(&DEFAULT_MENU[0]);
        assert!(b.id > a.id);
    }

    #[test]
    fn fresh_order_is_not_complete() {
        let order = Order::new(&DEFAULT_MENU[0]);
        assert!(!order.is_complete());
        assert_eq!(order.progress_step, 0);
    }

    #[test]
    fn order_completes_after_full_recipe() {
        let mut order = Order::new(&DEFAULT_MENU[0]);
        order.progress_step = order.recipe.len();
        assert!(order.is_complete());
    }
}
