//! Merchants
//!
//! Thin glue over the session's gold and pack: a fixed stock, a single
//! exchange rate, and front-of-list buy/sell semantics.

use crate::item::{self, Item};

/// A merchant with a fixed stock.
///
/// Stock is a catalog, not an inventory - buying never depletes it.
#[derive(Debug, Clone)]
pub struct Merchant {
    pub name: &'static str,
    /// Exchange rate: buy at `ceil(value / rate)`, sell at
    /// `floor(value * rate)`
    pub rate: f64,
    pub stock: Vec<Item>,
}

impl Merchant {
    pub fn buy_price(&self, item: &Item) -> i32 {
        (item.value as f64 / self.rate).ceil() as i32
    }

    pub fn sell_price(&self, item: &Item) -> i32 {
        (item.value as f64 * self.rate).floor() as i32
    }
}

/// The one merchant of the prototype
pub fn ragpicker_king() -> Merchant {
    Merchant {
        name: "Ragpicker King",
        rate: 0.7,
        stock: vec![
            Item::new("lockpicks", "Lockpicks", "Opens simple gates.", 10),
            Item::new("map-scrap", "Map Scrap", "Reveals a short path.", 6),
            item::mending_salve(),
        ],
    }
}
