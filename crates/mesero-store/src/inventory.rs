//! # Inventory Decrement Engine
//!
//! Applies a completed sale's line items against supply stock.
//!
//! ## The "sale never blocks on stock" rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  per line item (product, sale_qty):                                 │
//! │    per ingredient (supply_name, usage_per_unit):                    │
//! │      find supply by name (first match)                              │
//! │        found   → decrement by usage_per_unit once per sold unit,    │
//! │                  each step only while stock > 0, floor at zero      │
//! │        missing → warn and move on; the sale still completes        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no up-front check of total availability: a sale
//! can drive stock to zero and everything past zero is silently skipped.
//! This is the established business rule - recording the sale always wins
//! over inventory bookkeeping. Do not add a hard stock check here.

use tracing::{debug, warn};

use mesero_core::{OrderItem, Supply};

/// Applies every line item of a sale against the supply list, mutating
/// stock in place. Never fails; misses are logged.
pub fn apply_sale(supplies: &mut [Supply], items: &[OrderItem]) {
    for item in items {
        for ingredient in &item.product.ingredients {
            let Some(supply) = supplies.iter_mut().find(|s| s.name == ingredient.supply) else {
                warn!(
                    product = %item.product.name,
                    supply = %ingredient.supply,
                    "sale consumes an unregistered supply; stock not adjusted"
                );
                continue;
            };

            for _ in 0..item.quantity {
                // Clamped per decrement step, not against the total request:
                // once stock hits zero the remaining steps are skipped.
                if supply.quantity == 0 {
                    break;
                }
                supply.quantity = supply.quantity.saturating_sub(ingredient.quantity);
            }

            debug!(
                supply = %supply.name,
                remaining = supply.quantity,
                "stock decremented"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesero_core::{Ingredient, Product};

    fn cola() -> Product {
        Product::new(1, "Cola", vec![Ingredient::new("Hielo", 3)], 500.0)
    }

    #[test]
    fn test_decrement_per_sold_unit() {
        let mut supplies = vec![Supply::new("Hielo", 10, "unidades")];
        apply_sale(&mut supplies, &[OrderItem::new(cola(), 2)]);
        // 10 - 3 - 3 = 4
        assert_eq!(supplies[0].quantity, 4);
    }

    #[test]
    fn test_decrement_clamps_at_zero() {
        // Stock 2, usage 5: one sold unit drives it to zero, no underflow.
        let mut supplies = vec![Supply::new("Hielo", 2, "unidades")];
        let product = Product::new(1, "Granizado", vec![Ingredient::new("Hielo", 5)], 800.0);
        apply_sale(&mut supplies, &[OrderItem::new(product, 1)]);
        assert_eq!(supplies[0].quantity, 0);
    }

    #[test]
    fn test_zero_stock_steps_are_skipped() {
        let mut supplies = vec![Supply::new("Hielo", 3, "unidades")];
        apply_sale(&mut supplies, &[OrderItem::new(cola(), 5)]);
        // First step: 3 → 0. Remaining four steps skip.
        assert_eq!(supplies[0].quantity, 0);
    }

    #[test]
    fn test_missing_supply_is_skipped() {
        let mut supplies = vec![Supply::new("Azucar", 10, "gramos")];
        apply_sale(&mut supplies, &[OrderItem::new(cola(), 2)]);
        // "Hielo" is unregistered: nothing changes, nothing panics.
        assert_eq!(supplies[0].quantity, 10);
    }

    #[test]
    fn test_first_match_wins() {
        // Two supplies with the same name (the store prevents this, the
        // engine does not assume it): only the first is touched.
        let mut supplies = vec![
            Supply::new("Hielo", 10, "unidades"),
            Supply::new("Hielo", 10, "bolsas"),
        ];
        apply_sale(&mut supplies, &[OrderItem::new(cola(), 1)]);
        assert_eq!(supplies[0].quantity, 7);
        assert_eq!(supplies[1].quantity, 10);
    }
}
