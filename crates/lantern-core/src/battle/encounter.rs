//! Encounter selection
//!
//! Uniform-random choice over the fixed bestiary.

use crate::GameRng;

/// An enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: i32,
    pub atk: i32,
    pub def: i32,
    pub skill: &'static str,
}

/// Everything that prowls the sewers
pub const BESTIARY: &[EnemyTemplate] = &[
    EnemyTemplate {
        id: "scavenger",
        name: "Crazed Scavenger",
        hp: 14,
        atk: 4,
        def: 1,
        skill: "rust-fling",
    },
    EnemyTemplate {
        id: "pipe-larva",
        name: "Pipe Larva",
        hp: 10,
        atk: 3,
        def: 0,
        skill: "split",
    },
];

/// Pick a random encounter from the bestiary
pub fn pick_encounter(rng: &mut GameRng) -> &'static EnemyTemplate {
    // BESTIARY is non-empty by construction
    rng.choose(BESTIARY).unwrap_or(&BESTIARY[0])
}

/// A live enemy, transient for the lifetime of one battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub hp: i32,
    pub hp_max: i32,
    pub atk: i32,
    pub def: i32,
    pub skill: String,
}

impl From<&EnemyTemplate> for Enemy {
    fn from(template: &EnemyTemplate) -> Self {
        Self {
            name: template.name.to_string(),
            hp: template.hp,
            hp_max: template.hp,
            atk: template.atk,
            def: template.def,
            skill: template.skill.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_is_from_bestiary() {
        let mut rng = GameRng::new(7);
        for _ in 0..50 {
            let template = pick_encounter(&mut rng);
            assert!(BESTIARY.iter().any(|t| t.id == template.id));
        }
    }

    #[test]
    fn test_enemy_instance_copies_template() {
        let enemy = Enemy::from(&BESTIARY[0]);
        assert_eq!(enemy.name, "Crazed Scavenger");
        assert_eq!(enemy.hp, enemy.hp_max);
        assert_eq!(enemy.hp, 14);
    }
}
