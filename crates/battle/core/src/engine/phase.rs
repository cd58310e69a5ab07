use strum::{Display, EnumString};

use crate::combatant::{AttackType, Side};

/// Turn bookkeeping shared by every phase of the turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnFlags {
    pub a_is_attacking: bool,
    pub has_a_finished_their_turn: bool,
    pub has_b_finished_their_turn: bool,
}

impl TurnFlags {
    pub const fn new(a_is_attacking: bool) -> Self {
        Self {
            a_is_attacking,
            has_a_finished_their_turn: false,
            has_b_finished_their_turn: false,
        }
    }

    pub const fn attacker(&self) -> Side {
        if self.a_is_attacking { Side::A } else { Side::B }
    }

    pub const fn defender(&self) -> Side {
        self.attacker().other()
    }

    /// Marks the acting side's turn as finished.
    #[must_use]
    pub const fn finish_turn(mut self) -> Self {
        match self.attacker() {
            Side::A => self.has_a_finished_their_turn = true,
            Side::B => self.has_b_finished_their_turn = true,
        }
        self
    }

    /// Hands the turn to the other side.
    #[must_use]
    pub const fn swap(mut self) -> Self {
        self.a_is_attacking = !self.a_is_attacking;
        self
    }

    pub const fn both_finished(&self) -> bool {
        self.has_a_finished_their_turn && self.has_b_finished_their_turn
    }
}

/// A step of the battle state machine.
///
/// Turn-cycle phases carry their [`TurnFlags`]; attack phases additionally
/// fix the attack type through the variant itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Start,
    RoundStart,
    VelocityRoll,
    TurnStart(TurnFlags),
    FirepowerAttack(TurnFlags),
    BallisticsAttack(TurnFlags),
    ChemicalAttack(TurnFlags),
    TurnEnd(TurnFlags),
    RoundEnd,
    End,
}

impl Phase {
    /// The attack phase for `attack_type`.
    pub const fn attack(attack_type: AttackType, flags: TurnFlags) -> Self {
        match attack_type {
            AttackType::Firepower => Self::FirepowerAttack(flags),
            AttackType::Ballistics => Self::BallisticsAttack(flags),
            AttackType::Chemical => Self::ChemicalAttack(flags),
        }
    }

    pub const fn kind(&self) -> PhaseKind {
        match self {
            Self::Start => PhaseKind::Start,
            Self::RoundStart => PhaseKind::RoundStart,
            Self::VelocityRoll => PhaseKind::VelocityRoll,
            Self::TurnStart(_) => PhaseKind::TurnStart,
            Self::FirepowerAttack(_) => PhaseKind::FirepowerAttack,
            Self::BallisticsAttack(_) => PhaseKind::BallisticsAttack,
            Self::ChemicalAttack(_) => PhaseKind::ChemicalAttack,
            Self::TurnEnd(_) => PhaseKind::TurnEnd,
            Self::RoundEnd => PhaseKind::RoundEnd,
            Self::End => PhaseKind::End,
        }
    }

    pub const fn turn(&self) -> Option<TurnFlags> {
        match self {
            Self::TurnStart(flags)
            | Self::FirepowerAttack(flags)
            | Self::BallisticsAttack(flags)
            | Self::ChemicalAttack(flags)
            | Self::TurnEnd(flags) => Some(*flags),
            _ => None,
        }
    }

    pub const fn attack_type(&self) -> Option<AttackType> {
        match self {
            Self::FirepowerAttack(_) => Some(AttackType::Firepower),
            Self::BallisticsAttack(_) => Some(AttackType::Ballistics),
            Self::ChemicalAttack(_) => Some(AttackType::Chemical),
            _ => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::End)
    }
}

/// Discriminant of [`Phase`], used for filters and error context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseKind {
    Start,
    RoundStart,
    VelocityRoll,
    TurnStart,
    FirepowerAttack,
    BallisticsAttack,
    ChemicalAttack,
    TurnEnd,
    RoundEnd,
    End,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_flags_track_both_sides() {
        let flags = TurnFlags::new(false);
        assert_eq!(flags.attacker(), Side::B);

        let flags = flags.finish_turn();
        assert!(flags.has_b_finished_their_turn);
        assert!(!flags.both_finished());

        let flags = flags.swap();
        assert_eq!(flags.attacker(), Side::A);
        assert!(flags.finish_turn().both_finished());
    }

    #[test]
    fn attack_phases_carry_their_type() {
        let flags = TurnFlags::new(true);
        for attack_type in AttackType::ALL {
            let phase = Phase::attack(attack_type, flags);
            assert_eq!(phase.attack_type(), Some(attack_type));
            assert_eq!(phase.turn(), Some(flags));
        }
        assert_eq!(Phase::RoundEnd.turn(), None);
        assert_eq!("TurnEnd".parse::<PhaseKind>(), Ok(PhaseKind::TurnEnd));
    }
}
