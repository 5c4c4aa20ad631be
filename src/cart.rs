//! Cart
//!
//! A cart belongs to exactly one checkout session. It is a plain value: whoever
//! owns it mutates it, and checkout borrows it mutably so it can be cleared once
//! the sale has been recorded.

use smallvec::SmallVec;
use uuid::Uuid;

use crate::products::{Category, ProductSnapshot};

/// One product line in a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product identifier
    pub product_id: Uuid,

    /// Product name when the line was created
    pub name: String,

    /// Product category when the line was created
    pub category: Category,

    /// Unit price in minor units when the line was created
    pub price: u64,

    /// Always at least one
    pub quantity: u32,
}

impl CartLine {
    /// Price multiplied by quantity, saturating.
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Shopping cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// An existing line keeps its original snapshot and gains one unit. Catalog
    /// stock is not consulted.
    pub fn add_item(&mut self, product: &ProductSnapshot) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);

            return;
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category,
            price: product.price,
            quantity: 1,
        });
    }

    /// Set the quantity for a product. Zero or negative removes the line.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);

            return;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove a product's line, if present.
    pub fn remove_item(&mut self, product_id: Uuid) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price x quantity across lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0_u64, |total, line| total.saturating_add(line.subtotal()))
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if any.
    pub fn line(&self, product_id: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: Uuid) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(n: u128, price: u64) -> ProductSnapshot {
        ProductSnapshot {
            id: Uuid::from_u128(n),
            name: format!("Product {n}"),
            barcode: format!("{n:013}"),
            category: Category::Beer,
            price,
        }
    }

    #[test]
    fn adding_a_new_product_inserts_one_unit() {
        let mut cart = Cart::new();
        let tusker = product(1, 250);

        cart.add_item(&tusker);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(tusker.id).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn adding_an_existing_product_increments_quantity() {
        let mut cart = Cart::new();
        let tusker = product(1, 250);

        cart.add_item(&tusker);
        cart.add_item(&tusker);
        cart.add_item(&tusker);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(tusker.id).map(|l| l.quantity), Some(3));
    }

    #[test]
    fn existing_line_keeps_price_snapshot() {
        let mut cart = Cart::new();
        let mut tusker = product(1, 250);

        cart.add_item(&tusker);

        tusker.price = 999;
        cart.add_item(&tusker);

        assert_eq!(cart.total(), 500);
    }

    #[test]
    fn zero_and_negative_quantities_remove_the_line() {
        let mut cart = Cart::new();
        let a = product(1, 250);
        let b = product(2, 450);

        cart.add_item(&a);
        cart.add_item(&b);

        cart.update_quantity(a.id, 0);
        cart.update_quantity(b.id, -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn re_adding_a_removed_product_starts_at_one() {
        let mut cart = Cart::new();
        let a = product(1, 250);

        cart.add_item(&a);
        cart.update_quantity(a.id, 5);
        cart.update_quantity(a.id, 0);
        cart.add_item(&a);

        assert_eq!(cart.line(a.id).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn updating_an_unknown_product_is_a_no_op() {
        let mut cart = Cart::new();

        cart.add_item(&product(1, 250));
        cart.update_quantity(Uuid::from_u128(99), 4);

        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn remove_item_deletes_unconditionally() {
        let mut cart = Cart::new();
        let a = product(1, 250);

        cart.add_item(&a);
        cart.update_quantity(a.id, 7);
        cart.remove_item(a.id);
        cart.remove_item(a.id);

        assert!(cart.line(a.id).is_none());
    }

    #[test]
    fn total_and_item_count_follow_any_operation_sequence() {
        let mut cart = Cart::new();
        let products: Vec<ProductSnapshot> =
            (1..=6).map(|n| product(n, u64::try_from(n).unwrap_or(0) * 110)).collect();

        for (step, p) in products.iter().cycle().take(40).enumerate() {
            match step % 5 {
                0 | 1 => cart.add_item(p),
                2 => cart.update_quantity(p.id, i64::try_from(step % 4).unwrap_or(0) - 1),
                3 => cart.update_quantity(p.id, i64::try_from(step).unwrap_or(0)),
                _ => cart.remove_item(p.id),
            }

            let expected_total: u64 = cart
                .lines()
                .iter()
                .map(|l| l.price * u64::from(l.quantity))
                .sum();

            let expected_count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();

            assert_eq!(cart.total(), expected_total, "total after step {step}");
            assert_eq!(cart.item_count(), expected_count, "count after step {step}");
            assert!(
                cart.lines().iter().all(|l| l.quantity > 0),
                "no empty lines after step {step}"
            );
        }
    }

    #[test]
    fn item_count_sums_quantities_not_lines() {
        let mut cart = Cart::new();
        let a = product(1, 250);
        let b = product(2, 450);

        cart.add_item(&a);
        cart.add_item(&a);
        cart.add_item(&b);

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 950);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();

        cart.add_item(&product(1, 250));
        cart.add_item(&product(2, 450));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.item_count(), 0);
    }
}
