//! Built-in combatant abilities.

use battle_core::{AttackType, Hook, HookContext, HookError, HookInfo, Signal, SignalType};

/// Swaps the owner's chemical and firepower pools the first time the
/// opponent's shields are down.
pub struct Switcharoo;

impl Hook for Switcharoo {
    fn should_trigger(&self, info: &HookInfo<'_>, ctx: &HookContext<'_>, _signal: &Signal) -> bool {
        info.trigger_count == 0
            && info.side.is_some_and(|side| ctx.opponent(side).shields == 0)
    }

    fn apply(
        &self,
        info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        _signal: &mut Signal,
    ) -> Result<(), HookError> {
        let owner = ctx.combatant_mut(info.owner()?);
        std::mem::swap(&mut owner.chemical, &mut owner.firepower);
        Ok(())
    }
}

/// Every landed Ballistics attack by the owner adds 60 chemical.
pub struct Extra;

impl Hook for Extra {
    fn should_trigger(&self, info: &HookInfo<'_>, _ctx: &HookContext<'_>, signal: &Signal) -> bool {
        signal.kind == SignalType::PostHitRoll
            && signal.hit_roll().is_some_and(|hit| {
                hit.does_hit
                    && hit.attack_type == AttackType::Ballistics
                    && Some(hit.attacker) == info.side
            })
    }

    fn apply(
        &self,
        info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        _signal: &mut Signal,
    ) -> Result<(), HookError> {
        let owner = ctx.combatant_mut(info.owner()?);
        owner.chemical = owner.chemical.saturating_add(60);
        Ok(())
    }
}

/// Once per battle, an owner reduced to zero armor is brought back to 1.
pub struct LastStand;

impl Hook for LastStand {
    fn should_trigger(&self, info: &HookInfo<'_>, ctx: &HookContext<'_>, _signal: &Signal) -> bool {
        info.trigger_count == 0 && info.side.is_some_and(|side| ctx.combatant(side).armor == 0)
    }

    fn apply(
        &self,
        info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        _signal: &mut Signal,
    ) -> Result<(), HookError> {
        ctx.combatant_mut(info.owner()?).armor = 1;
        Ok(())
    }
}

/// Once per battle, broken shields are restored to 1.
pub struct ShieldPlates;

impl Hook for ShieldPlates {
    fn should_trigger(&self, info: &HookInfo<'_>, ctx: &HookContext<'_>, _signal: &Signal) -> bool {
        info.trigger_count == 0
            && info.side.is_some_and(|side| ctx.combatant(side).shields == 0)
    }

    fn apply(
        &self,
        info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        _signal: &mut Signal,
    ) -> Result<(), HookError> {
        ctx.combatant_mut(info.owner()?).shields = 1;
        Ok(())
    }
}

/// Deals 15 firepower to the opponent at the start of each of the first ten rounds.
pub struct FlareKnives;

impl FlareKnives {
    pub const DAMAGE: i64 = 15;
    pub const CHARGES: u32 = 10;
}

impl Hook for FlareKnives {
    fn should_trigger(&self, info: &HookInfo<'_>, _ctx: &HookContext<'_>, signal: &Signal) -> bool {
        signal.kind == SignalType::RoundStart && info.trigger_count < Self::CHARGES
    }

    fn apply(
        &self,
        info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        _signal: &mut Signal,
    ) -> Result<(), HookError> {
        ctx.opponent_mut(info.owner()?)
            .apply_damage(Self::DAMAGE, AttackType::Firepower);
        Ok(())
    }
}

/// A firepower hit that breaks the opponent's shields is followed by a
/// 200 firepower blast.
pub struct TandemDemo;

impl TandemDemo {
    pub const DAMAGE: i64 = 200;
}

impl Hook for TandemDemo {
    fn should_trigger(&self, info: &HookInfo<'_>, ctx: &HookContext<'_>, signal: &Signal) -> bool {
        if signal.kind != SignalType::PostDmgApplication
            || ctx.attack_type() != Some(AttackType::Firepower)
        {
            return false;
        }
        let Some(owner) = info.side else {
            return false;
        };
        signal.damage().is_some_and(|damage| {
            damage.attacker == owner
                && damage.pre_damage_shields > 0
                && ctx.opponent(owner).shields == 0
        })
    }

    fn apply(
        &self,
        info: &HookInfo<'_>,
        ctx: &mut HookContext<'_>,
        _signal: &mut Signal,
    ) -> Result<(), HookError> {
        ctx.opponent_mut(info.owner()?)
            .apply_damage(Self::DAMAGE, AttackType::Firepower);
        Ok(())
    }
}
