//! Items and the party pack
//!
//! The pack is an ordered list: the front item is the default sell
//! candidate, and the first salve found is the battle heal.

use serde::{Deserialize, Serialize};

/// Item id of the mending salve, the one consumable the battle engine uses
pub const SALVE_ID: &str = "salve";

/// An inventory item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub value: i32,
}

impl Item {
    pub fn new(id: &str, name: &str, desc: &str, value: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            desc: desc.to_string(),
            value,
        }
    }
}

pub fn ragpickers_hook() -> Item {
    Item::new("ragpicker-hook", "Ragpicker's Hook", "Pull distant levers.", 15)
}

pub fn lantern_of_stolen_sparks() -> Item {
    Item::new(
        "lantern-stolen-sparks",
        "Lantern of Stolen Sparks",
        "Light puzzles raise max lantern charge.",
        60,
    )
}

pub fn mending_salve() -> Item {
    Item::new(SALVE_ID, "Mending Salve", "Restore 8 HP.", 8)
}

/// The pack a new session starts with
pub fn starting_inventory() -> Vec<Item> {
    vec![ragpickers_hook()]
}
