//! Narration
//!
//! The one place where the core's structured events become prose. The
//! engine stays UI-agnostic; the lines live here.

use lantern_core::Happening;
use lantern_core::battle::BattleEvent;

/// Text for a session happening, if it narrates at all.
///
/// Turning and plain movement are silent; the last narrated happening
/// of a tick becomes the hint line.
pub fn happening_text(happening: &Happening) -> Option<String> {
    let text = match happening {
        Happening::Turned | Happening::Moved => return None,
        Happening::BlockedAhead => "A wall interrupts your intentions.".to_string(),
        Happening::BlockedBehind => "Something resists your retreat.".to_string(),
        Happening::BattleStarted => "Something stirs in the dark ahead!".to_string(),
        Happening::MerchantOpened => "The Ragpicker King spreads his wares.".to_string(),
        Happening::ShrineFound => "Warm light gathers. Small scars loosen their hold.".to_string(),
        Happening::WispAppears => "A sinuous silhouette coils into being.".to_string(),
        Happening::WispWatches => {
            "You sense soft paws in the dark. Wisp is watching.".to_string()
        }
        Happening::WispGift { .. } => {
            "Wisp vanishes. The air smells faintly of warm dust and secrets.".to_string()
        }
        Happening::GateHint => "A heavy gate. Perhaps a lever nearby?".to_string(),
        Happening::AlcoveHint => {
            "Lantern glyphs ring this alcove. Press L to cast a familiar silhouette.".to_string()
        }
        Happening::SecretOpened => {
            "Your lantern throws a feline shadow. Somewhere, a hidden gate purrs open.".to_string()
        }
        Happening::WispNearby => "A slithering shade-cat pads nearby...".to_string(),
        Happening::SecretAlreadyOpen => {
            "Only a thin outline of the cat remains. The secret is already awake.".to_string()
        }
        Happening::LanternNothing => {
            "Lantern light pools and recedes, revealing nothing new.".to_string()
        }
        Happening::ShrineRested => "You feel steadier. The way ahead clarifies.".to_string(),
        Happening::MenuOpened | Happening::MenuClosed | Happening::MerchantLeft => return None,
        Happening::Bought { item, .. } => format!("Bought {item}."),
        Happening::NotEnoughCoin => "Not enough coin.".to_string(),
        Happening::Sold { item, .. } => format!("Sold {item}."),
        Happening::NothingToSell => "You have nothing to sell.".to_string(),
        Happening::Victory { gold } => {
            format!("You prevail. Something clinks in the dark (+{gold}g).")
        }
        Happening::SlippedAway => "You slip away, bruised and breathless.".to_string(),
        Happening::PartyWiped => return None,
        Happening::ShrineAwakening => {
            "You awaken at a shrine, the lantern dimmed but intact.".to_string()
        }
    };
    Some(text)
}

/// Text for a battle log record
pub fn battle_event_text(event: &BattleEvent) -> String {
    match event {
        BattleEvent::Encounter => "An enemy approaches!".to_string(),
        BattleEvent::PartyAttack { damage } => {
            format!("Your party attacks for {damage} damage.")
        }
        BattleEvent::EmberEcho { damage } => {
            format!("Cartomancer's Ember Echo flares for {damage}.")
        }
        BattleEvent::FlashDebuff { amount } => {
            format!("Lightbinder flashes; enemy defense -{amount} this round.")
        }
        BattleEvent::LanternBlind => {
            "Lantern glare blinds the foe. Their attack misses.".to_string()
        }
        BattleEvent::LanternFizzle => "Light wavers uselessly.".to_string(),
        BattleEvent::SalveUsed { target } => {
            format!("You use a Mending Salve on {target} (+8).")
        }
        BattleEvent::NoSalve => "You fumble for an item you don't have.".to_string(),
        BattleEvent::FleeFailed => "You fail to escape!".to_string(),
        BattleEvent::EnemyDown => "Enemy collapses.".to_string(),
        BattleEvent::EnemyHit {
            enemy,
            target,
            damage,
        } => format!("{enemy} hits {target} for {damage}."),
        BattleEvent::Falls { name } => format!("{name} falls!"),
        BattleEvent::Engulfed => "The dark folds around you...".to_string(),
    }
}
