//! The party
//!
//! Four fixed adventurers. The battle engine and shrine rest are the
//! only mutators of their hit points.

use serde::{Deserialize, Serialize};

use crate::PARTY_SIZE;

/// A named combat stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Atk,
    Def,
    Focus,
    Wonder,
}

/// One party member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adventurer {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub hp_max: i32,
    pub atk: i32,
    pub def: i32,
    pub focus: i32,
    pub wonder: i32,
    pub skills: Vec<String>,
}

impl Adventurer {
    fn new(
        id: &str,
        name: &str,
        hp_max: i32,
        atk: i32,
        def: i32,
        focus: i32,
        wonder: i32,
        skill: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            hp: hp_max,
            hp_max,
            atk,
            def,
            focus,
            wonder,
            skills: vec![skill.to_string()],
        }
    }

    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Focus => self.focus,
            Stat::Wonder => self.wonder,
        }
    }

    /// Down means out of the fight; hp may sit below zero until healed
    pub fn is_down(&self) -> bool {
        self.hp <= 0
    }

    /// Heal, capped at hp_max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.hp_max);
        self.hp - before
    }
}

/// The ordered party of four
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party {
    members: Vec<Adventurer>,
}

impl Party {
    /// The fixed roster of the prototype
    pub fn lantern_bearers() -> Self {
        Self {
            members: vec![
                Adventurer::new("lightbinder", "Lightbinder", 24, 5, 2, 6, 6, "flash"),
                Adventurer::new("cartomancer", "Cartomancer", 18, 3, 1, 8, 7, "ember-echo"),
                Adventurer::new("veilrunner", "Veilrunner", 20, 4, 2, 6, 3, "fade"),
                Adventurer::new("echo-knight", "Echo Knight", 26, 6, 3, 5, 2, "riposte"),
            ],
        }
    }

    /// Build a party from exactly [`PARTY_SIZE`] members
    pub fn from_members(members: Vec<Adventurer>) -> Option<Self> {
        (members.len() == PARTY_SIZE).then_some(Self { members })
    }

    pub fn members(&self) -> &[Adventurer] {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut [Adventurer] {
        &mut self.members
    }

    /// Party-average stat, rounded half-up
    pub fn avg_stat(&self, stat: Stat) -> i32 {
        let sum: i32 = self.members.iter().map(|m| m.stat(stat)).sum();
        let n = self.members.len() as i32;
        (2 * sum + n) / (2 * n)
    }

    /// Indices of members still standing
    pub fn standing(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| !m.is_down())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn all_down(&self) -> bool {
        self.members.iter().all(Adventurer::is_down)
    }

    /// Shrine rest: everyone back to full
    pub fn full_heal(&mut self) {
        for member in &mut self.members {
            member.hp = member.hp_max;
        }
    }

    /// Wipe recovery: everyone back to `max(1, floor(hp_max * 0.6))`
    pub fn revive_weakened(&mut self) {
        for member in &mut self.members {
            member.hp = (member.hp_max * 3 / 5).max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_shape() {
        let party = Party::lantern_bearers();
        assert_eq!(party.members().len(), PARTY_SIZE);
        assert!(party.members().iter().all(|m| m.hp == m.hp_max));
    }

    #[test]
    fn test_avg_stat_rounds_half_up() {
        let party = Party::lantern_bearers();
        // atk 5+3+4+6 = 18, avg 4.5 → 5
        assert_eq!(party.avg_stat(Stat::Atk), 5);
        // def 2+1+2+3 = 8, avg 2
        assert_eq!(party.avg_stat(Stat::Def), 2);
        // focus 6+8+6+5 = 25, avg 6.25 → 6
        assert_eq!(party.avg_stat(Stat::Focus), 6);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut party = Party::lantern_bearers();
        let member = &mut party.members_mut()[0];
        member.hp = member.hp_max - 3;
        assert_eq!(member.heal(8), 3);
        assert_eq!(member.hp, member.hp_max);
    }

    #[test]
    fn test_revive_weakened_values() {
        let mut party = Party::lantern_bearers();
        for member in party.members_mut() {
            member.hp = -5;
        }
        assert!(party.all_down());
        party.revive_weakened();
        // floor(0.6 * hp_max): 24→14, 18→10, 20→12, 26→15
        let hps: Vec<i32> = party.members().iter().map(|m| m.hp).collect();
        assert_eq!(hps, vec![14, 10, 12, 15]);
        assert!(!party.all_down());
    }

    #[test]
    fn test_revive_weakened_floors_at_one() {
        let mut party = Party::lantern_bearers();
        party.members_mut()[0].hp_max = 1;
        party.members_mut()[0].hp = 0;
        party.revive_weakened();
        assert_eq!(party.members()[0].hp, 1);
    }

    #[test]
    fn test_standing_excludes_downed() {
        let mut party = Party::lantern_bearers();
        party.members_mut()[1].hp = 0;
        party.members_mut()[3].hp = -2;
        assert_eq!(party.standing(), vec![0, 2]);
    }
}
