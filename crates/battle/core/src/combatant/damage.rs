//! Damage resolution against shield and armor pools.

use super::{AttackType, Combatant};

impl Combatant {
    /// Adjusts nominal damage for the defender's current pools.
    ///
    /// Firepower doubles against shields and halves against bare armor,
    /// Chemical does the opposite and Ballistics is unchanged. The matching
    /// flat shield or armor modifier is added afterwards and the result
    /// floors at zero.
    pub fn modify_damage(&self, amount: i64, attack_type: AttackType) -> i64 {
        let shielded = self.shields > 0;
        let scaled = match (attack_type, shielded) {
            (AttackType::Firepower, true) | (AttackType::Chemical, false) => amount.saturating_mul(2),
            (AttackType::Firepower, false) | (AttackType::Chemical, true) => amount.div_euclid(2),
            (AttackType::Ballistics, _) => amount,
        };

        let table = if shielded {
            &self.shield_modifiers
        } else {
            &self.armor_modifiers
        };
        let flat = table.get(&attack_type).copied().map_or(0, i64::from);

        scaled.saturating_add(flat).max(0)
    }

    /// Applies damage to shields while they are up, otherwise to armor.
    ///
    /// Returns the actual pool reduction, which may be less than the
    /// modified damage when a pool bottoms out.
    pub fn apply_damage(&mut self, amount: i64, attack_type: AttackType) -> u32 {
        let damage = u32::try_from(self.modify_damage(amount, attack_type)).unwrap_or(u32::MAX);

        let pool = if self.shields > 0 {
            &mut self.shields
        } else {
            &mut self.armor
        };
        let before = *pool;
        *pool = before.saturating_sub(damage);
        before - *pool
    }

    /// Losing shields never ends a fight; only armor does.
    pub const fn is_dead(&self) -> bool {
        self.armor == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::BaseStats;

    fn target(armor: u32, shields: u32) -> Combatant {
        Combatant::new("Target", BaseStats::new(armor, shields, 0, 0, 0, 0))
    }

    #[test]
    fn shields_absorb_before_armor() {
        let mut combatant = target(100, 50);

        assert_eq!(combatant.apply_damage(30, AttackType::Ballistics), 30);
        assert_eq!((combatant.shields, combatant.armor), (20, 100));

        // a hit that breaks shields does not spill into armor
        assert_eq!(combatant.apply_damage(30, AttackType::Ballistics), 20);
        assert_eq!((combatant.shields, combatant.armor), (0, 100));

        assert_eq!(combatant.apply_damage(30, AttackType::Ballistics), 30);
        assert_eq!((combatant.shields, combatant.armor), (0, 70));

        assert_eq!(combatant.apply_damage(9999, AttackType::Ballistics), 70);
        assert_eq!((combatant.shields, combatant.armor), (0, 0));
        assert!(combatant.is_dead());
    }

    #[test]
    fn firepower_favours_shields() {
        let mut combatant = target(100, 50);
        combatant.apply_damage(10, AttackType::Firepower);
        assert_eq!(combatant.shields, 30);

        let mut combatant = target(100, 0);
        combatant.apply_damage(11, AttackType::Firepower);
        assert_eq!(combatant.armor, 95);
    }

    #[test]
    fn chemical_favours_armor() {
        let mut combatant = target(100, 50);
        combatant.apply_damage(11, AttackType::Chemical);
        assert_eq!(combatant.shields, 45);

        let mut combatant = target(100, 0);
        combatant.apply_damage(10, AttackType::Chemical);
        assert_eq!(combatant.armor, 80);
    }

    #[test]
    fn flat_modifiers_follow_active_pool() {
        let combatant = target(100, 50)
            .with_shield_modifier(AttackType::Ballistics, 5)
            .with_armor_modifier(AttackType::Ballistics, -60);
        assert_eq!(combatant.modify_damage(10, AttackType::Ballistics), 15);

        let mut stripped = combatant.clone();
        stripped.shields = 0;
        assert_eq!(stripped.modify_damage(10, AttackType::Ballistics), 0);
        assert_eq!(stripped.apply_damage(10, AttackType::Ballistics), 0);
        assert_eq!(stripped.armor, 100);
    }

    #[test]
    fn negative_damage_is_clamped() {
        let mut combatant = target(10, 10);
        assert_eq!(combatant.apply_damage(-50, AttackType::Ballistics), 0);
        assert_eq!(combatant.stats(), BaseStats::new(10, 10, 0, 0, 0, 0));
    }

    #[test]
    fn shields_down_does_not_kill() {
        let combatant = target(1, 0);
        assert!(!combatant.is_dead());
    }
}
