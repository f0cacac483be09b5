//! The game session
//!
//! One explicitly owned object holds everything mutable: player pose,
//! flags, party, pack, gold, and the active battle. Components receive
//! it by reference; nothing lives in process-wide state. Operations
//! return the happenings they emitted and leave drawing to the caller.

use serde::{Deserialize, Serialize};

use crate::action::{Command, Direction};
use crate::battle::{Battle, BattleAction, Phase, RoundOutcome, pick_encounter};
use crate::grid::{TileGrid, TileKind};
use crate::item::{self, Item};
use crate::merchant::{Merchant, ragpicker_king};
use crate::party::Party;
use crate::view::{DepthFrame, Viewport, build_frame};
use crate::{GameRng, STARTING_GOLD, StoryFlags, VICTORY_GOLD};

/// Map identity, supplied by the map data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMeta {
    pub id: String,
    pub name: String,
}

/// Where a map drops the party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPose {
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
}

/// Player pose on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
}

/// Which input context is active. Exactly one at a time; everything
/// except `Explore` rejects exploration commands outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Explore,
    Battle,
    Merchant,
    Shrine,
    Story,
    Menu,
}

/// A structured record of something the session did, for the
/// presentation layer to narrate
#[derive(Debug, Clone, PartialEq)]
pub enum Happening {
    /// Orientation changed; nothing to narrate, but a redraw is due
    Turned,
    Moved,
    /// A forward step hit something solid
    BlockedAhead,
    /// A backward step hit something solid
    BlockedBehind,
    BattleStarted,
    MerchantOpened,
    ShrineFound,
    /// First contact with Wisp; the story overlay is open
    WispAppears,
    /// Wisp already met; just a soft presence
    WispWatches,
    /// Wisp's gift joined the pack
    WispGift { item: String },
    GateHint,
    AlcoveHint,
    /// Lantern on the alcove: the hidden gates open
    SecretOpened,
    /// A shade-cat stirs somewhere close
    WispNearby,
    /// Lantern on the alcove a second time
    SecretAlreadyOpen,
    /// Lantern anywhere else
    LanternNothing,
    ShrineRested,
    MenuOpened,
    MenuClosed,
    Bought { item: String, price: i32 },
    NotEnoughCoin,
    Sold { item: String, price: i32 },
    NothingToSell,
    MerchantLeft,
    /// Battle won; spoils awarded
    Victory { gold: i32 },
    /// Fled a battle
    SlippedAway,
    /// The party is down; the caller owes a recovery call after the
    /// narration delay
    PartyWiped,
    /// Woke at the shrine after a wipe
    ShrineAwakening,
}

/// Full recoverable state, the persistence contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub map_id: String,
    pub tiles: TileGrid,
    pub player: Player,
    pub flags: StoryFlags,
    pub inventory: Vec<Item>,
    pub gold: i32,
    pub party: Party,
}

/// The live game session
#[derive(Debug, Clone)]
pub struct Session {
    pub map: MapMeta,
    pub grid: TileGrid,
    pub start: StartPose,
    pub player: Player,
    pub flags: StoryFlags,
    pub inventory: Vec<Item>,
    pub gold: i32,
    pub party: Party,
    pub rng: GameRng,
    battle: Option<Battle>,
    merchant: Option<Merchant>,
    modal: Modal,
}

impl Session {
    /// Start a fresh session on the given map
    pub fn new(map: MapMeta, grid: TileGrid, start: StartPose, rng: GameRng) -> Self {
        Self {
            map,
            grid,
            start,
            player: Player {
                x: start.x,
                y: start.y,
                dir: start.dir,
            },
            flags: StoryFlags::default(),
            inventory: item::starting_inventory(),
            gold: STARTING_GOLD,
            party: Party::lantern_bearers(),
            rng,
            battle: None,
            merchant: None,
            modal: Modal::Explore,
        }
    }

    /// Rebuild a session from a snapshot plus the map identity the
    /// caller resolved for `snapshot.map_id`
    pub fn restore(snapshot: Snapshot, map: MapMeta, start: StartPose, rng: GameRng) -> Self {
        Self {
            map,
            grid: snapshot.tiles,
            start,
            player: snapshot.player,
            flags: snapshot.flags,
            inventory: snapshot.inventory,
            gold: snapshot.gold,
            party: snapshot.party,
            rng,
            battle: None,
            merchant: None,
            modal: Modal::Explore,
        }
    }

    /// The persistence-contract view of this session. An active battle
    /// is deliberately not part of it.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            map_id: self.map.id.clone(),
            tiles: self.grid.clone(),
            player: self.player,
            flags: self.flags,
            inventory: self.inventory.clone(),
            gold: self.gold,
            party: self.party.clone(),
        }
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn merchant(&self) -> Option<&Merchant> {
        self.merchant.as_ref()
    }

    /// Build the corridor frame for the current pose
    pub fn depth_frame(&self, viewport: Viewport) -> DepthFrame {
        build_frame(
            &self.grid,
            &self.flags,
            self.player.x,
            self.player.y,
            self.player.dir,
            viewport,
        )
    }

    /// Apply one exploration command.
    ///
    /// Rejected entirely - no movement, no turning - while any overlay
    /// is active; the empty result tells the caller nothing happened.
    pub fn tick(&mut self, command: Command) -> Vec<Happening> {
        if self.modal != Modal::Explore {
            return Vec::new();
        }

        match command {
            Command::TurnLeft => {
                self.player.dir = self.player.dir.left();
                vec![Happening::Turned]
            }
            Command::TurnRight => {
                self.player.dir = self.player.dir.right();
                vec![Happening::Turned]
            }
            Command::StepForward => self.step(false),
            Command::StepBack => self.step(true),
            Command::Lantern => self.use_lantern(),
            Command::OpenMenu => {
                self.modal = Modal::Menu;
                vec![Happening::MenuOpened]
            }
        }
    }

    fn step(&mut self, backward: bool) -> Vec<Happening> {
        let dir = if backward {
            self.player.dir.reverse()
        } else {
            self.player.dir
        };
        let (dx, dy) = dir.delta();
        let nx = self.player.x + dx;
        let ny = self.player.y + dy;
        let tile = self.grid.tile_at(nx, ny, &self.flags);

        if !tile.is_passable() {
            return vec![if backward {
                Happening::BlockedBehind
            } else {
                Happening::BlockedAhead
            }];
        }

        self.player.x = nx;
        self.player.y = ny;
        let mut happenings = vec![Happening::Moved];
        happenings.extend(self.enter_tile(tile));
        happenings
    }

    /// Tile-entry dispatch, exhaustive over the tile alphabet
    fn enter_tile(&mut self, tile: TileKind) -> Vec<Happening> {
        match tile {
            TileKind::Battle => {
                let template = pick_encounter(&mut self.rng);
                self.battle = Some(Battle::open(template));
                self.modal = Modal::Battle;
                vec![Happening::BattleStarted]
            }
            TileKind::Merchant => {
                self.flags.ragpicker_visited = true;
                self.merchant = Some(ragpicker_king());
                self.modal = Modal::Merchant;
                vec![Happening::MerchantOpened]
            }
            TileKind::Shrine => {
                self.modal = Modal::Shrine;
                vec![Happening::ShrineFound]
            }
            TileKind::Event => {
                if self.flags.met_wisp {
                    vec![Happening::WispWatches]
                } else {
                    self.flags.met_wisp = true;
                    self.modal = Modal::Story;
                    vec![Happening::WispAppears]
                }
            }
            TileKind::Gate => vec![Happening::GateHint],
            TileKind::Alcove => vec![Happening::AlcoveHint],
            TileKind::Wall | TileKind::Floor | TileKind::SecretDoor => Vec::new(),
        }
    }

    fn use_lantern(&mut self) -> Vec<Happening> {
        let here = self
            .grid
            .tile_at(self.player.x, self.player.y, &self.flags);
        if here != TileKind::Alcove {
            return vec![Happening::LanternNothing];
        }
        if self.flags.cat_door_open {
            return vec![Happening::SecretAlreadyOpen];
        }
        self.flags.cat_door_open = true;
        let mut happenings = vec![Happening::SecretOpened];
        if !self.flags.met_wisp {
            happenings.push(Happening::WispNearby);
        }
        happenings
    }

    /// Resolve one battle action. Only valid in the battle modal; the
    /// wipe latch additionally freezes input until the caller finishes
    /// recovery.
    pub fn battle_act(&mut self, action: BattleAction) -> Vec<Happening> {
        if self.modal != Modal::Battle {
            return Vec::new();
        }
        let Some(battle) = self.battle.as_mut() else {
            return Vec::new();
        };
        if battle.phase() == Phase::Wiped {
            return Vec::new();
        }

        let outcome = battle.act(action, &mut self.party, &mut self.inventory, &mut self.rng);
        match outcome {
            RoundOutcome::Continue => Vec::new(),
            RoundOutcome::Won => {
                self.gold += VICTORY_GOLD;
                self.battle = None;
                self.modal = Modal::Explore;
                vec![Happening::Victory {
                    gold: VICTORY_GOLD,
                }]
            }
            RoundOutcome::Fled => {
                self.battle = None;
                self.modal = Modal::Explore;
                vec![Happening::SlippedAway]
            }
            RoundOutcome::Wiped => vec![Happening::PartyWiped],
        }
    }

    /// Close out a wipe after the narration delay: back to the start
    /// pose, everyone weakly revived, battle gone. A soft fail - the
    /// session always survives.
    pub fn finish_wipe_recovery(&mut self) -> Vec<Happening> {
        if !matches!(
            self.battle.as_ref().map(Battle::phase),
            Some(Phase::Wiped)
        ) {
            return Vec::new();
        }
        self.battle = None;
        self.modal = Modal::Explore;
        self.player = Player {
            x: self.start.x,
            y: self.start.y,
            dir: self.start.dir,
        };
        self.party.revive_weakened();
        vec![Happening::ShrineAwakening]
    }

    /// Rest at the shrine: the whole party back to full
    pub fn shrine_rest(&mut self) -> Vec<Happening> {
        if self.modal != Modal::Shrine {
            return Vec::new();
        }
        self.party.full_heal();
        self.modal = Modal::Explore;
        vec![Happening::ShrineRested]
    }

    /// Dismiss the Wisp overlay, collecting the gift on first meeting
    pub fn story_continue(&mut self) -> Vec<Happening> {
        if self.modal != Modal::Story {
            return Vec::new();
        }
        self.modal = Modal::Explore;
        let gift = item::lantern_of_stolen_sparks();
        if !self.inventory.iter().any(|i| i.id == gift.id) {
            let name = gift.name.clone();
            self.inventory.push(gift);
            vec![Happening::WispGift { item: name }]
        } else {
            Vec::new()
        }
    }

    /// Buy the front stock item, if the coin stretches. Any transaction
    /// closes the stall.
    pub fn merchant_buy(&mut self) -> Vec<Happening> {
        if self.modal != Modal::Merchant {
            return Vec::new();
        }
        let Some(merchant) = self.merchant.as_ref() else {
            return Vec::new();
        };
        let item = merchant.stock[0].clone();
        let price = merchant.buy_price(&item);

        let happening = if self.gold >= price {
            self.gold -= price;
            let name = item.name.clone();
            self.inventory.push(item);
            Happening::Bought { item: name, price }
        } else {
            Happening::NotEnoughCoin
        };

        self.merchant = None;
        self.modal = Modal::Explore;
        vec![happening]
    }

    /// Sell the front pack item. Any transaction closes the stall.
    pub fn merchant_sell(&mut self) -> Vec<Happening> {
        if self.modal != Modal::Merchant {
            return Vec::new();
        }
        let Some(merchant) = self.merchant.as_ref() else {
            return Vec::new();
        };

        let happening = if self.inventory.is_empty() {
            Happening::NothingToSell
        } else {
            let item = self.inventory.remove(0);
            let price = merchant.sell_price(&item);
            self.gold += price;
            Happening::Sold {
                item: item.name,
                price,
            }
        };

        self.merchant = None;
        self.modal = Modal::Explore;
        vec![happening]
    }

    pub fn merchant_leave(&mut self) -> Vec<Happening> {
        if self.modal != Modal::Merchant {
            return Vec::new();
        }
        self.merchant = None;
        self.modal = Modal::Explore;
        vec![Happening::MerchantLeft]
    }

    pub fn close_menu(&mut self) -> Vec<Happening> {
        if self.modal != Modal::Menu {
            return Vec::new();
        }
        self.modal = Modal::Explore;
        vec![Happening::MenuClosed]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sewer_session() -> Session {
        let grid = TileGrid::from_rows(&[
            "#######", //
            "#..M..#", //
            "#.###T#", //
            "#.B.P.#", //
            "#.#S#E#", //
            "#.....#", //
            "#######", //
        ])
        .unwrap();
        Session::new(
            MapMeta {
                id: "test-sewer".to_string(),
                name: "Test Sewer".to_string(),
            },
            grid,
            StartPose {
                x: 1,
                y: 5,
                dir: Direction::North,
            },
            GameRng::new(11),
        )
    }

    #[test]
    fn test_forward_then_back_is_identity_on_floor() {
        let mut session = sewer_session();
        let before = session.player;
        let before_flags = session.flags;
        let before_gold = session.gold;
        let before_pack = session.inventory.clone();

        let out = session.tick(Command::StepForward);
        assert!(out.contains(&Happening::Moved));
        let out = session.tick(Command::StepBack);
        assert!(out.contains(&Happening::Moved));

        assert_eq!(session.player, before);
        assert_eq!(session.flags, before_flags);
        assert_eq!(session.gold, before_gold);
        assert_eq!(session.inventory, before_pack);
        assert!(session.battle().is_none());
    }

    #[test]
    fn test_blocked_steps_distinct_and_stateless() {
        let mut session = sewer_session();
        // Face west into the outer wall
        session.player.dir = Direction::West;
        let before = session.player;

        assert_eq!(
            session.tick(Command::StepForward),
            vec![Happening::BlockedAhead]
        );
        assert_eq!(session.player, before);

        assert_eq!(
            session.tick(Command::StepBack),
            vec![Happening::BlockedBehind]
        );
        assert_eq!(session.player, before);
    }

    #[test]
    fn test_secret_door_blocks_until_lantern() {
        let mut session = sewer_session();
        // (5,2) is the secret door; stand south of it at (5,3) facing north
        session.player = Player {
            x: 5,
            y: 3,
            dir: Direction::North,
        };
        assert_eq!(
            session.tick(Command::StepForward),
            vec![Happening::BlockedAhead]
        );

        // Light the lantern on the alcove at (4,3)
        session.player = Player {
            x: 4,
            y: 3,
            dir: Direction::North,
        };
        let out = session.tick(Command::Lantern);
        assert!(out.contains(&Happening::SecretOpened));
        assert!(session.flags.cat_door_open);

        session.player = Player {
            x: 5,
            y: 3,
            dir: Direction::North,
        };
        let out = session.tick(Command::StepForward);
        assert!(out.contains(&Happening::Moved));
        assert_eq!((session.player.x, session.player.y), (5, 2));
    }

    #[test]
    fn test_lantern_off_alcove_reveals_nothing() {
        let mut session = sewer_session();
        assert_eq!(
            session.tick(Command::Lantern),
            vec![Happening::LanternNothing]
        );
        assert!(!session.flags.cat_door_open);
    }

    #[test]
    fn test_lantern_second_use_narrates_already_open() {
        let mut session = sewer_session();
        session.player = Player {
            x: 4,
            y: 3,
            dir: Direction::North,
        };
        let first = session.tick(Command::Lantern);
        assert!(first.contains(&Happening::SecretOpened));
        assert!(first.contains(&Happening::WispNearby));
        assert_eq!(
            session.tick(Command::Lantern),
            vec![Happening::SecretAlreadyOpen]
        );
    }

    #[test]
    fn test_battle_tile_opens_battle_and_gates_input() {
        let mut session = sewer_session();
        // Step onto the battle tile at (2,3) from (1,3)
        session.player = Player {
            x: 1,
            y: 3,
            dir: Direction::East,
        };
        let out = session.tick(Command::StepForward);
        assert!(out.contains(&Happening::BattleStarted));
        assert_eq!(session.modal(), Modal::Battle);
        assert!(session.battle().is_some());

        // Exploration input is rejected entirely while the battle is up
        let pose = session.player;
        assert!(session.tick(Command::StepForward).is_empty());
        assert!(session.tick(Command::TurnLeft).is_empty());
        assert_eq!(session.player, pose);
    }

    #[test]
    fn test_flee_eventually_returns_to_exploring() {
        let mut session = sewer_session();
        session.player = Player {
            x: 1,
            y: 3,
            dir: Direction::East,
        };
        let _ = session.tick(Command::StepForward);
        // Keep trying to flee; party defaults survive a few failures
        for _ in 0..50 {
            let out = session.battle_act(BattleAction::Flee);
            if out.contains(&Happening::SlippedAway) {
                assert_eq!(session.modal(), Modal::Explore);
                assert!(session.battle().is_none());
                return;
            }
        }
        panic!("flee never succeeded in 50 attempts");
    }

    #[test]
    fn test_shrine_full_heal() {
        let mut session = sewer_session();
        for member in session.party.members_mut() {
            member.hp = 1;
        }
        // Step onto the shrine at (3,4) from (3,5)
        session.player = Player {
            x: 3,
            y: 5,
            dir: Direction::North,
        };
        let out = session.tick(Command::StepForward);
        assert!(out.contains(&Happening::ShrineFound));
        assert_eq!(session.modal(), Modal::Shrine);

        let out = session.shrine_rest();
        assert!(out.contains(&Happening::ShrineRested));
        assert_eq!(session.modal(), Modal::Explore);
        assert!(session.party.members().iter().all(|m| m.hp == m.hp_max));
    }

    #[test]
    fn test_wisp_event_grants_gift_once() {
        let mut session = sewer_session();
        // Step onto the event tile at (5,4) from (5,5)
        session.player = Player {
            x: 5,
            y: 5,
            dir: Direction::North,
        };
        let out = session.tick(Command::StepForward);
        assert!(out.contains(&Happening::WispAppears));
        assert_eq!(session.modal(), Modal::Story);
        assert!(session.flags.met_wisp);

        let out = session.story_continue();
        assert!(matches!(out.as_slice(), [Happening::WispGift { .. }]));
        assert!(
            session
                .inventory
                .iter()
                .any(|i| i.id == "lantern-stolen-sparks")
        );

        // Walking back in only narrates the presence
        session.player = Player {
            x: 5,
            y: 5,
            dir: Direction::North,
        };
        let out = session.tick(Command::StepForward);
        assert!(out.contains(&Happening::WispWatches));
        assert_eq!(session.modal(), Modal::Explore);
    }

    #[test]
    fn test_merchant_buy_and_sell_math() {
        let mut session = sewer_session();
        // Step onto the stall at (3,1) from (2,1)
        session.player = Player {
            x: 2,
            y: 1,
            dir: Direction::East,
        };
        let out = session.tick(Command::StepForward);
        assert!(out.contains(&Happening::MerchantOpened));
        assert!(session.flags.ragpicker_visited);

        // Lockpicks front of stock: ceil(10 / 0.7) = 15
        let out = session.merchant_buy();
        assert!(matches!(
            out.as_slice(),
            [Happening::Bought { price: 15, .. }]
        ));
        assert_eq!(session.gold, STARTING_GOLD - 15);
        assert!(session.inventory.iter().any(|i| i.id == "lockpicks"));
        assert_eq!(session.modal(), Modal::Explore);

        // Re-enter and sell the front of the pack (the hook, value 15):
        // floor(15 * 0.7) = 10
        session.player = Player {
            x: 2,
            y: 1,
            dir: Direction::East,
        };
        let _ = session.tick(Command::StepForward);
        let out = session.merchant_sell();
        assert!(matches!(
            out.as_slice(),
            [Happening::Sold { price: 10, .. }]
        ));
        assert_eq!(session.gold, STARTING_GOLD - 15 + 10);
        assert!(!session.inventory.iter().any(|i| i.id == "ragpicker-hook"));
    }

    #[test]
    fn test_merchant_insufficient_gold() {
        let mut session = sewer_session();
        session.gold = 3;
        session.player = Player {
            x: 2,
            y: 1,
            dir: Direction::East,
        };
        let _ = session.tick(Command::StepForward);
        let pack_before = session.inventory.clone();
        let out = session.merchant_buy();
        assert_eq!(out, vec![Happening::NotEnoughCoin]);
        assert_eq!(session.gold, 3);
        assert_eq!(session.inventory, pack_before);
    }

    #[test]
    fn test_wipe_recovery_relocates_and_revives() {
        let mut session = sewer_session();
        // Enter a battle, then put the party on the brink
        session.player = Player {
            x: 1,
            y: 3,
            dir: Direction::East,
        };
        let _ = session.tick(Command::StepForward);
        for member in session.party.members_mut() {
            member.hp = 0;
        }
        session.party.members_mut()[0].hp = 1;

        // No bestiary entry dies to one swing, and every entry's weakest
        // counterblow downs a 1 hp member, so the first attack wipes
        let out = session.battle_act(BattleAction::Attack);
        assert!(out.contains(&Happening::PartyWiped));
        assert_eq!(session.modal(), Modal::Battle);

        // Input stays frozen while the wipe is latched
        assert!(session.battle_act(BattleAction::Attack).is_empty());
        assert!(session.tick(Command::StepForward).is_empty());

        let out = session.finish_wipe_recovery();
        assert_eq!(out, vec![Happening::ShrineAwakening]);
        assert_eq!(session.modal(), Modal::Explore);
        assert!(session.battle().is_none());
        assert_eq!(
            (session.player.x, session.player.y, session.player.dir),
            (session.start.x, session.start.y, session.start.dir)
        );
        for member in session.party.members() {
            assert_eq!(member.hp, (member.hp_max * 3 / 5).max(1));
        }

        // A second recovery call is a no-op
        assert!(session.finish_wipe_recovery().is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut session = sewer_session();
        session.gold = 77;
        session.flags.cat_door_open = true;
        session.party.members_mut()[2].hp = 9;
        session.player = Player {
            x: 4,
            y: 3,
            dir: Direction::South,
        };

        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
        let restored = Session::restore(
            snapshot,
            session.map.clone(),
            session.start,
            GameRng::new(0),
        );

        assert_eq!(restored.grid, session.grid);
        assert_eq!(restored.player, session.player);
        assert_eq!(restored.flags, session.flags);
        assert_eq!(restored.inventory, session.inventory);
        assert_eq!(restored.gold, session.gold);
        assert_eq!(restored.party, session.party);
        assert_eq!(restored.modal(), Modal::Explore);
    }
}
