//! Signal dispatch over the terrain and both sides' effects.

use tracing::{debug, error};

use super::{HookContext, HookCriticality};
use crate::combatant::Side;
use crate::engine::BattleSnapshot;
use crate::error::{BattleError, ErrorContext, HookError};
use crate::signal::Signal;

/// Broadcasts `signal` to every hook of the snapshot.
///
/// Order: terrain, side A's effects, side B's effects. While a side is being
/// dispatched its effect list is detached from the combatant; effects a hook
/// appends in the meantime are kept after the detached list.
pub(crate) fn apply_effects(
    snapshot: &mut BattleSnapshot,
    signal: &mut Signal,
    criticality: HookCriticality,
) -> Result<(), BattleError> {
    let BattleSnapshot {
        setup,
        phase,
        round_count,
        combatant_a,
        combatant_b,
        terrain,
    } = snapshot;
    let base = ErrorContext::new(phase.kind(), *round_count, setup.seed);
    let mut ctx = HookContext::new(&**setup, phase, *round_count, combatant_a, combatant_b);

    if let Some(terrain) = terrain.as_mut() {
        let outcome = terrain.evaluate(&mut ctx, signal);
        settle(&terrain.name, outcome, base.clone(), signal, criticality)?;
    }

    for side in [Side::A, Side::B] {
        let mut effects = std::mem::take(&mut ctx.combatant_mut(side).effects);

        let mut failure = None;
        for effect in effects.iter_mut() {
            let outcome = effect.evaluate(side, &mut ctx, signal);
            let context = base.clone().with_side(side);
            if let Err(e) = settle(&effect.name, outcome, context, signal, criticality) {
                failure = Some(e);
                break;
            }
        }

        let slot = &mut ctx.combatant_mut(side).effects;
        let appended = std::mem::replace(slot, effects);
        slot.extend(appended);

        if let Some(e) = failure {
            return Err(e);
        }
    }

    Ok(())
}

/// Logs the outcome of one hook and decides whether a failure propagates.
fn settle(
    hook: &str,
    outcome: Result<bool, HookError>,
    context: ErrorContext,
    signal: &Signal,
    criticality: HookCriticality,
) -> Result<(), BattleError> {
    match outcome {
        Ok(false) => Ok(()),
        Ok(true) => {
            debug!(
                target: "battle::hooks",
                hook,
                side = ?context.side,
                signal = %signal.kind,
                round = context.round,
                phase = %context.phase,
                "executed effect"
            );
            Ok(())
        }
        Err(source) => {
            error!(
                target: "battle::hooks",
                hook,
                side = ?context.side,
                signal = %signal.kind,
                round = context.round,
                phase = %context.phase,
                seed = context.seed,
                criticality = criticality.as_str(),
                error = %source,
                "hook failed"
            );
            match criticality {
                HookCriticality::Critical => Err(BattleError::hook_failed(hook, context, source)),
                HookCriticality::Important => Ok(()),
            }
        }
    }
}
