//! Signals broadcast by the state machine and the payloads hooks may rewrite.
//!
//! A payload is a mutable buffer: every hook listening on a signal sees the
//! values written by the hooks that ran before it, and the engine reads the
//! buffer back once dispatch is over.

use strum::{Display, EnumString};

use crate::combatant::{AttackType, Side};

/// Base hit threshold. A roll hits when
/// `roll + attack_mod - defense_mod >= HIT_THRESHOLD - hit_chance`.
pub const HIT_THRESHOLD: i64 = 500;

/// Observation points emitted while a battle transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SignalType {
    BattleStart,
    RoundStart,
    PreVelocityRoll,
    PostVelocityRoll,
    TurnStart,
    PreAttack,
    PostHitRoll,
    PostDmgCalc,
    PostDmgApplication,
    PostAttack,
    TurnEnd,
    RoundEnd,
    BattleEnd,
}

/// Initiative roll for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VelocityRollData {
    pub roll_a: i64,
    pub roll_b: i64,
    pub total_a: i64,
    pub total_b: i64,
    pub a_is_attacking: bool,
}

impl VelocityRollData {
    /// Builds the payload from the raw rolls and each side's velocity.
    pub fn new(roll_a: u32, roll_b: u32, velocity_a: u32, velocity_b: u32) -> Self {
        let total_a = i64::from(roll_a) + i64::from(velocity_a);
        let total_b = i64::from(roll_b) + i64::from(velocity_b);
        Self {
            roll_a: i64::from(roll_a),
            roll_b: i64::from(roll_b),
            total_a,
            total_b,
            a_is_attacking: total_a >= total_b,
        }
    }

    /// Ties favour side A.
    pub const fn evaluate(&self) -> bool {
        self.total_a >= self.total_b
    }

    /// Reads the decision back after dispatch.
    ///
    /// A flag that differs from `announced` was flipped by a hook and wins;
    /// otherwise the decision is recomputed from the (possibly edited) totals.
    pub const fn resolve(&self, announced: bool) -> bool {
        if self.a_is_attacking != announced {
            self.a_is_attacking
        } else {
            self.evaluate()
        }
    }
}

/// Hit roll of one attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRollData {
    pub attacker: Side,
    pub attack_type: AttackType,
    /// Uniform draw in `[0, 1000]`.
    pub roll: i64,
    /// `(attacker.velocity - defender.velocity)` floor-divided by two.
    pub hit_chance: i64,
    pub attack_mod: i64,
    pub defense_mod: i64,
    pub does_hit: bool,
}

impl HitRollData {
    pub fn new(
        attacker: Side,
        attack_type: AttackType,
        roll: u32,
        hit_chance: i64,
        attack_mod: i32,
        defense_mod: i32,
    ) -> Self {
        let mut data = Self {
            attacker,
            attack_type,
            roll: i64::from(roll),
            hit_chance,
            attack_mod: i64::from(attack_mod),
            defense_mod: i64::from(defense_mod),
            does_hit: false,
        };
        data.does_hit = data.evaluate();
        data
    }

    pub const fn evaluate(&self) -> bool {
        self.roll + self.attack_mod - self.defense_mod >= HIT_THRESHOLD - self.hit_chance
    }

    /// Shifts the roll and re-evaluates `does_hit`, so hooks later in the
    /// same dispatch see the outcome the engine will read back.
    pub fn adjust_roll(&mut self, delta: i64) {
        self.roll += delta;
        self.does_hit = self.evaluate();
    }

    /// Same read-back rule as [`VelocityRollData::resolve`].
    pub const fn resolve(&self, announced: bool) -> bool {
        if self.does_hit != announced {
            self.does_hit
        } else {
            self.evaluate()
        }
    }

    pub const fn defender(&self) -> Side {
        self.attacker.other()
    }
}

/// Velocity advantage of the attacker, floor-divided by two (may be negative).
pub fn hit_chance(attacker_velocity: u32, defender_velocity: u32) -> i64 {
    (i64::from(attacker_velocity) - i64::from(defender_velocity)).div_euclid(2)
}

/// Damage of one landed attack.
///
/// `pre_damage_armor` and `pre_damage_shields` are the defender's pools
/// captured before the damage was applied, so hooks listening on
/// `POST_DMG_APPLICATION` can tell what the hit just broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageData {
    pub attacker: Side,
    pub attack_type: AttackType,
    /// Nominal damage before the defender's shield/armor rules.
    pub damage: i64,
    pub pre_damage_armor: u32,
    pub pre_damage_shields: u32,
    /// Actual pool reduction. Zero until the damage is applied.
    pub applied: u32,
}

impl DamageData {
    pub const fn defender(&self) -> Side {
        self.attacker.other()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalPayload {
    VelocityRoll(VelocityRollData),
    HitRoll(HitRollData),
    Damage(DamageData),
}

/// A typed event with an optional mutable payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signal {
    pub kind: SignalType,
    pub data: Option<SignalPayload>,
}

impl Signal {
    pub const fn new(kind: SignalType) -> Self {
        Self { kind, data: None }
    }

    pub const fn with_payload(kind: SignalType, payload: SignalPayload) -> Self {
        Self {
            kind,
            data: Some(payload),
        }
    }

    pub const fn velocity_roll(&self) -> Option<&VelocityRollData> {
        match &self.data {
            Some(SignalPayload::VelocityRoll(data)) => Some(data),
            _ => None,
        }
    }

    pub fn velocity_roll_mut(&mut self) -> Option<&mut VelocityRollData> {
        match &mut self.data {
            Some(SignalPayload::VelocityRoll(data)) => Some(data),
            _ => None,
        }
    }

    pub const fn hit_roll(&self) -> Option<&HitRollData> {
        match &self.data {
            Some(SignalPayload::HitRoll(data)) => Some(data),
            _ => None,
        }
    }

    pub fn hit_roll_mut(&mut self) -> Option<&mut HitRollData> {
        match &mut self.data {
            Some(SignalPayload::HitRoll(data)) => Some(data),
            _ => None,
        }
    }

    pub const fn damage(&self) -> Option<&DamageData> {
        match &self.data {
            Some(SignalPayload::Damage(data)) => Some(data),
            _ => None,
        }
    }

    pub fn damage_mut(&mut self) -> Option<&mut DamageData> {
        match &mut self.data {
            Some(SignalPayload::Damage(data)) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_chance_floors_toward_negative_infinity() {
        assert_eq!(hit_chance(10, 3), 3);
        assert_eq!(hit_chance(3, 10), -4);
        assert_eq!(hit_chance(0, 1000), -500);
    }

    #[test]
    fn hit_roll_applies_modifiers() {
        // 450 + 30 - (-20) = 500 >= 500 - 0
        let hit = HitRollData::new(Side::A, AttackType::Ballistics, 450, 0, 30, -20);
        assert!(hit.does_hit);

        let miss = HitRollData::new(Side::B, AttackType::Ballistics, 450, 0, 0, 0);
        assert!(!miss.does_hit);
        assert_eq!(miss.defender(), Side::A);
    }

    #[test]
    fn perturbed_roll_is_recomputed() {
        let mut data = HitRollData::new(Side::A, AttackType::Ballistics, 490, 0, 0, 0);
        assert!(!data.does_hit);

        data.roll += 20;
        assert!(data.resolve(false));
    }

    #[test]
    fn adjusted_roll_keeps_the_flag_current() {
        let mut data = HitRollData::new(Side::A, AttackType::Ballistics, 490, 0, 0, 0);

        data.adjust_roll(20);
        assert_eq!(data.roll, 510);
        assert!(data.does_hit);
        assert!(data.resolve(false));

        data.adjust_roll(-40);
        assert!(!data.does_hit);
        assert!(!data.resolve(false));
    }

    #[test]
    fn explicit_flip_wins_over_recomputation() {
        let mut data = HitRollData::new(Side::A, AttackType::Chemical, 999, 0, 0, 0);
        assert!(data.does_hit);

        data.does_hit = false;
        assert!(!data.resolve(true));
    }

    #[test]
    fn velocity_ties_favour_a() {
        let data = VelocityRollData::new(500, 500, 10, 10);
        assert!(data.a_is_attacking);

        let mut data = VelocityRollData::new(1, 1000, 0, 0);
        assert!(!data.a_is_attacking);
        data.total_a += 2000;
        assert!(data.resolve(false));
    }

    #[test]
    fn typed_accessors_match_payload_variant() {
        let mut signal = Signal::with_payload(
            SignalType::PostDmgCalc,
            SignalPayload::Damage(DamageData {
                attacker: Side::A,
                attack_type: AttackType::Firepower,
                damage: 10,
                pre_damage_armor: 5,
                pre_damage_shields: 5,
                applied: 0,
            }),
        );

        assert!(signal.hit_roll().is_none());
        if let Some(data) = signal.damage_mut() {
            data.damage += 20;
        }
        assert_eq!(signal.damage().map(|d| d.damage), Some(30));
        assert_eq!(SignalType::PostDmgApplication.to_string(), "POST_DMG_APPLICATION");
    }
}
