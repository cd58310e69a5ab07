//! Built-in terrain hazards.

use battle_core::{
    ATTACK_HIT_CHANCE_MOD, AttackType, Hook, HookContext, HookError, HookInfo, Side, Signal,
    SignalType,
};

/// A hit costing 10% or more of the defender's original armor deals an
/// extra 40 Ballistics.
pub struct Hela;

impl Hook for Hela {
    fn should_trigger(&self, _info: &HookInfo<'_>, _ctx: &HookContext<'_>, signal: &Signal) -> bool {
        signal.kind == SignalType::PostDmgApplication
    }

    fn apply(
        &self,
        _info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        signal: &mut Signal,
    ) -> Result<(), HookError> {
        let damage = signal
            .damage()
            .copied()
            .ok_or_else(|| HookError::unexpected_payload(signal.kind))?;

        let defender = ctx.combatant_mut(damage.defender());
        if damage.damage.saturating_mul(10) >= i64::from(defender.original().armor) {
            defender.apply_damage(40, AttackType::Ballistics);
        }
        Ok(())
    }
}

/// A hit roll below 100 costs the attacker 100 Ballistics and up to 50 velocity.
pub struct LakeTampua;

impl Hook for LakeTampua {
    fn should_trigger(&self, _info: &HookInfo<'_>, _ctx: &HookContext<'_>, signal: &Signal) -> bool {
        signal.kind == SignalType::PostHitRoll
    }

    fn apply(
        &self,
        _info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        signal: &mut Signal,
    ) -> Result<(), HookError> {
        let hit = signal
            .hit_roll()
            .copied()
            .ok_or_else(|| HookError::unexpected_payload(signal.kind))?;

        if hit.roll < 100 {
            let attacker = ctx.combatant_mut(hit.attacker);
            attacker.apply_damage(100, AttackType::Ballistics);
            attacker.velocity = attacker.velocity.saturating_sub(50);
        }
        Ok(())
    }
}

/// Ballistics hit rolls and damage are increased by 20.
pub struct Malvinas;

impl Hook for Malvinas {
    fn should_trigger(&self, _info: &HookInfo<'_>, ctx: &HookContext<'_>, signal: &Signal) -> bool {
        matches!(signal.kind, SignalType::PostHitRoll | SignalType::PostDmgCalc)
            && ctx.attack_type() == Some(AttackType::Ballistics)
    }

    fn apply(
        &self,
        _info: &HookInfo<'_>,
        _ctx: &mut HookContext<'_>,
        signal: &mut Signal,
    ) -> Result<(), HookError> {
        let kind = signal.kind;
        if let Some(hit) = signal.hit_roll_mut() {
            hit.adjust_roll(20);
        } else if let Some(damage) = signal.damage_mut() {
            damage.damage += 20;
        } else {
            return Err(HookError::unexpected_payload(kind));
        }
        Ok(())
    }
}

/// Both combatants' hit rolls are reduced by 20 for the whole battle.
pub struct RuthenianGrasses;

impl Hook for RuthenianGrasses {
    fn should_trigger(&self, _info: &HookInfo<'_>, _ctx: &HookContext<'_>, signal: &Signal) -> bool {
        signal.kind == SignalType::BattleStart
    }

    fn apply(
        &self,
        _info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        _signal: &mut Signal,
    ) -> Result<(), HookError> {
        for side in [Side::A, Side::B] {
            let combatant = ctx.combatant_mut(side);
            for attack_type in AttackType::ALL {
                combatant.adjust_modifier(ATTACK_HIT_CHANCE_MOD, attack_type, -20);
            }
        }
        Ok(())
    }
}

/// Taking Ballistics damage costs up to 4 velocity.
pub struct Badaxsan;

impl Hook for Badaxsan {
    fn should_trigger(&self, _info: &HookInfo<'_>, ctx: &HookContext<'_>, signal: &Signal) -> bool {
        signal.kind == SignalType::PostDmgApplication
            && ctx.attack_type() == Some(AttackType::Ballistics)
    }

    fn apply(
        &self,
        _info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        signal: &mut Signal,
    ) -> Result<(), HookError> {
        let damage = signal
            .damage()
            .copied()
            .ok_or_else(|| HookError::unexpected_payload(signal.kind))?;

        if damage.damage > 0 {
            let defender = ctx.combatant_mut(damage.defender());
            defender.velocity = defender.velocity.saturating_sub(4);
        }
        Ok(())
    }
}
