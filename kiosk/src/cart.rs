use serde::{Deserialize, Serialize};

use crate::machines::Machine;

/// Flat fee per selected add-on (detergent, softener, ...).
pub const ADDON_PRICE: f64 = 1.50;
pub const TAX_RATE: f64 = 0.08;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CartItem {
    pub name: String,
    pub price: f64,
    pub duration: String,
    pub addons: Vec<String>,
}

impl CartItem {
    pub fn for_machine(machine: &Machine) -> Self {
        Self {
            name: machine.name.clone(),
            price: machine.price,
            duration: machine.kind.default_cycle().to_owned(),
            addons: Vec::new(),
        }
    }

    pub fn with_addons(mut self, addons: Vec<String>) -> Self {
        self.addons = addons;
        self
    }

    pub fn line_total(&self) -> f64 {
        self.price + self.addons.len() as f64 * ADDON_PRICE
    }
}

/// The cart persists as a bare array of items, matching the profile layout
/// the original app wrote under the `cart` key.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn iter(&self) -> std::slice::Iter<CartItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * TAX_RATE
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    /// Simulated payment: produces an itemized receipt and empties the cart.
    pub fn checkout(&mut self) -> Receipt {
        Receipt {
            subtotal: self.subtotal(),
            tax: self.tax(),
            total: self.total(),
            items: std::mem::take(&mut self.items),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Receipt {
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machines::Roster;

    fn washer_item(addons: &[&str]) -> CartItem {
        let roster = Roster::builtin();
        CartItem::for_machine(roster.find(1).unwrap())
            .with_addons(addons.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn item_from_machine_uses_price_and_cycle() {
        let item = washer_item(&[]);
        assert_eq!(item.name, "Washer 99");
        assert_eq!(item.price, 4.99);
        assert_eq!(item.duration, "10 mins");
    }

    #[test]
    fn line_total_includes_addons() {
        assert_eq!(washer_item(&[]).line_total(), 4.99);
        assert!((washer_item(&["Detergent", "Softener"]).line_total() - 7.99).abs() < 1e-9);
    }

    #[test]
    fn totals_apply_eight_percent_tax() {
        let mut cart = Cart::default();
        cart.add(washer_item(&["Detergent"]));
        cart.add(washer_item(&[]));

        let subtotal = 6.49 + 4.99;
        assert!((cart.subtotal() - subtotal).abs() < 1e-9);
        assert!((cart.tax() - subtotal * 0.08).abs() < 1e-9);
        assert!((cart.total() - subtotal * 1.08).abs() < 1e-9);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut cart = Cart::default();
        cart.add(washer_item(&[]));
        assert!(cart.remove(1).is_none());
        assert_eq!(cart.remove(0).unwrap().name, "Washer 99");
        assert!(cart.is_empty());
    }

    #[test]
    fn checkout_empties_the_cart() {
        let mut cart = Cart::default();
        cart.add(washer_item(&["Detergent"]));
        let receipt = cart.checkout();
        assert_eq!(receipt.items.len(), 1);
        assert!((receipt.total - 6.49 * 1.08).abs() < 1e-9);
        assert!(cart.is_empty());
    }

    #[test]
    fn persisted_shape_is_a_bare_array() {
        let mut cart = Cart::default();
        cart.add(washer_item(&[]));
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Washer 99");
        assert_eq!(json[0]["duration"], "10 mins");
    }
}
