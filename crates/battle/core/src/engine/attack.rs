//! Attack resolution shared by the three attack phases.

use tracing::debug;

use super::{BattleState, TurnFlags};
use crate::combatant::{ATTACK_HIT_CHANCE_MOD, AttackType, DEFENSE_HIT_CHANCE_MOD};
use crate::error::BattleError;
use crate::signal::{DamageData, HitRollData, Signal, SignalPayload, SignalType, hit_chance};

/// Resolves one attack of `attack_type` by the side `flags` marks as attacking.
///
/// Signals, in order: `PRE_ATTACK`, `POST_HIT_ROLL`, then on a hit
/// `POST_DMG_CALC` and `POST_DMG_APPLICATION`, and finally `POST_ATTACK`
/// carrying the resolved hit roll.
pub(super) fn process_attack(
    state: &mut BattleState,
    attack_type: AttackType,
    flags: TurnFlags,
) -> Result<(), BattleError> {
    state.emit(SignalType::PreAttack)?;

    let attacker_side = flags.attacker();
    let defender_side = flags.defender();

    let roll = state.rng.range(0, 1000);
    let rolled = {
        let attacker = state.snapshot.combatant(attacker_side);
        let defender = state.snapshot.combatant(defender_side);
        HitRollData::new(
            attacker_side,
            attack_type,
            roll,
            hit_chance(attacker.velocity, defender.velocity),
            attacker.modifier(ATTACK_HIT_CHANCE_MOD, attack_type),
            defender.modifier(DEFENSE_HIT_CHANCE_MOD, attack_type),
        )
    };

    let mut signal = Signal::with_payload(SignalType::PostHitRoll, SignalPayload::HitRoll(rolled));
    state.dispatch(&mut signal)?;
    let mut hit = signal.hit_roll().copied().unwrap_or(rolled);
    hit.does_hit = hit.resolve(rolled.does_hit);

    if hit.does_hit {
        let defender = state.snapshot.combatant(defender_side);
        let calculated = DamageData {
            attacker: attacker_side,
            attack_type,
            damage: i64::from(state.snapshot.combatant(attacker_side).get_damage(attack_type)),
            pre_damage_armor: defender.armor,
            pre_damage_shields: defender.shields,
            applied: 0,
        };

        let mut signal = Signal::with_payload(SignalType::PostDmgCalc, SignalPayload::Damage(calculated));
        state.dispatch(&mut signal)?;
        let mut damage = signal.damage().copied().unwrap_or(calculated);

        damage.applied = state
            .snapshot
            .combatant_mut(defender_side)
            .apply_damage(damage.damage, attack_type);
        debug!(
            target: "battle::engine",
            round = state.snapshot.round_count,
            attacker = %attacker_side,
            attack_type = %attack_type,
            damage = damage.damage,
            applied = damage.applied,
            "attack hit"
        );

        let mut signal = Signal::with_payload(SignalType::PostDmgApplication, SignalPayload::Damage(damage));
        state.dispatch(&mut signal)?;
    } else {
        debug!(
            target: "battle::engine",
            round = state.snapshot.round_count,
            attacker = %attacker_side,
            attack_type = %attack_type,
            roll = hit.roll,
            "attack missed"
        );
    }

    let mut signal = Signal::with_payload(SignalType::PostAttack, SignalPayload::HitRoll(hit));
    state.dispatch(&mut signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{BaseStats, Combatant, Side};
    use crate::config::EngineConfig;
    use crate::engine::{BattleSetup, Phase};
    use crate::hooks::{Effect, hook_fn};

    fn recorder() -> Effect {
        // encodes each observed attack signal as one digit of `ballistics`
        Effect::new(
            "Recorder",
            hook_fn(
                |_, ctx, _| ctx.attack_type().is_some(),
                |_, ctx, signal| {
                    let digit = match signal.kind {
                        SignalType::PreAttack => 1,
                        SignalType::PostHitRoll => 2,
                        SignalType::PostDmgCalc => 3,
                        SignalType::PostDmgApplication => 4,
                        SignalType::PostAttack => 5,
                        _ => 9,
                    };
                    let b = ctx.combatant_mut(Side::B);
                    b.ballistics = b.ballistics * 10 + digit;
                    Ok(())
                },
            ),
        )
    }

    fn force_hit(hit: bool) -> Effect {
        Effect::new(
            "Fate",
            hook_fn(
                |_, _, signal| signal.kind == SignalType::PostHitRoll,
                move |_, _, signal| {
                    if let Some(data) = signal.hit_roll_mut() {
                        data.does_hit = hit;
                    }
                    Ok(())
                },
            ),
        )
    }

    fn attacking_state(a: Combatant, b: Combatant) -> BattleState {
        let mut state = BattleState::start(BattleSetup::new(a, b, 1), EngineConfig::strict());
        state.snapshot.phase = Phase::FirepowerAttack(TurnFlags::new(true));
        state
    }

    #[test]
    fn signal_order_on_hit_and_miss() {
        let a = Combatant::new("A", BaseStats::new(100, 100, 0, 0, 10, 0));
        let b = Combatant::new("B", BaseStats::new(100, 100, 0, 0, 0, 0));

        let mut state = attacking_state(a.clone().with_effect(force_hit(true)), b.clone().with_effect(recorder()));
        process_attack(&mut state, AttackType::Firepower, TurnFlags::new(true)).unwrap();
        assert_eq!(state.snapshot.combatant(Side::B).ballistics, 12345);

        let mut state = attacking_state(a.with_effect(force_hit(false)), b.with_effect(recorder()));
        process_attack(&mut state, AttackType::Firepower, TurnFlags::new(true)).unwrap();
        assert_eq!(state.snapshot.combatant(Side::B).ballistics, 125);
    }

    #[test]
    fn damage_rewrite_is_applied() {
        let boost = Effect::new(
            "Boost",
            hook_fn(
                |_, _, signal| signal.kind == SignalType::PostDmgCalc,
                |_, _, signal| {
                    if let Some(data) = signal.damage_mut() {
                        data.damage += 20;
                    }
                    Ok(())
                },
            ),
        );
        let a = Combatant::new("A", BaseStats::new(100, 0, 10, 0, 0, 0))
            .with_effect(force_hit(true))
            .with_effect(boost);
        let b = Combatant::new("B", BaseStats::new(100, 0, 0, 0, 0, 0));

        let mut state = attacking_state(a, b);
        process_attack(&mut state, AttackType::Ballistics, TurnFlags::new(true)).unwrap();

        assert_eq!(state.snapshot.combatant(Side::B).armor, 70);
    }

    #[test]
    fn application_payload_keeps_pre_damage_pools() {
        let watcher = Effect::new(
            "ShieldBreakWatcher",
            hook_fn(
                |_, ctx, signal| {
                    signal.kind == SignalType::PostDmgApplication
                        && signal.damage().is_some_and(|d| d.pre_damage_shields > 0)
                        && ctx.combatant(Side::B).shields == 0
                },
                |_, ctx, _| {
                    ctx.combatant_mut(Side::A).velocity = 77;
                    Ok(())
                },
            ),
        );
        let a = Combatant::new("A", BaseStats::new(100, 0, 0, 0, 50, 0))
            .with_effect(force_hit(true))
            .with_effect(watcher);
        let b = Combatant::new("B", BaseStats::new(100, 30, 0, 0, 0, 0));

        let mut state = attacking_state(a, b);
        process_attack(&mut state, AttackType::Firepower, TurnFlags::new(true)).unwrap();

        assert_eq!(state.snapshot.combatant(Side::B).shields, 0);
        assert_eq!(state.snapshot.combatant(Side::A).velocity, 77);
    }

    #[test]
    fn death_after_firepower_skips_to_turn_end() {
        let a = Combatant::new("A", BaseStats::new(100, 0, 10, 10, 1000, 0)).with_effect(force_hit(true));
        let b = Combatant::new("B", BaseStats::new(10, 0, 0, 0, 0, 0));

        let state = attacking_state(a, b).transition().unwrap();

        assert!(state.combatant(Side::B).is_dead());
        assert_eq!(state.phase(), &Phase::TurnEnd(TurnFlags::new(true)));
    }
}
