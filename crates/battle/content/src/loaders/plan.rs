//! Battle plan loader.

use std::path::Path;

use crate::loaders::{LoadResult, load_as, save_as};
use crate::specs::BattlePlan;

/// Loader for battle plans (`[[battles]]` records run in listed order).
pub struct PlanLoader;

impl PlanLoader {
    pub fn load(path: &Path) -> LoadResult<BattlePlan> {
        let plan: BattlePlan = load_as(path, "battle plan")?;
        if let Some(battle) = plan.battles.iter().find(|b| b.name.trim().is_empty()) {
            return Err(anyhow::anyhow!(
                "Battle plan {} has an unnamed battle ({} vs {})",
                path.display(),
                battle.combatant_a,
                battle.combatant_b
            ));
        }
        Ok(plan)
    }

    pub fn save(path: &Path, plan: &BattlePlan) -> LoadResult<()> {
        save_as(path, plan, "battle plan")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::BattleSpec;

    #[test]
    fn plan_keeps_listed_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battles.toml");
        std::fs::write(
            &path,
            r#"
[[battles]]
name = "Opening"
combatant_a = "LCEnzo"
combatant_b = "Suit"
terrain = "hela"

[[battles]]
name = "Rematch"
combatant_a = "Suit"
combatant_b = "LCEnzo"
seed = 7
"#,
        )
        .unwrap();

        let plan = PlanLoader::load(&path).unwrap();
        let names: Vec<&str> = plan.battles.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Opening", "Rematch"]);
        assert_eq!(plan.battles[0].terrain.as_deref(), Some("hela"));
        assert_eq!(plan.battles[1].terrain, None);
        assert_eq!(plan.battles[1].seed, Some(7));
    }

    #[test]
    fn ron_plan_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battles.ron");
        let plan = BattlePlan {
            battles: vec![BattleSpec {
                name: "Skirmish".into(),
                combatant_a: "Shinigami".into(),
                combatant_b: "Suit".into(),
                terrain: Some("malvinas".into()),
                adds_a: vec!["Suit".into()],
                adds_b: Vec::new(),
                seed: None,
            }],
        };

        PlanLoader::save(&path, &plan).unwrap();
        assert_eq!(PlanLoader::load(&path).unwrap(), plan);
    }

    #[test]
    fn unnamed_battles_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battles.toml");
        std::fs::write(
            &path,
            "[[battles]]\nname = \" \"\ncombatant_a = \"Suit\"\ncombatant_b = \"Suit\"\n",
        )
        .unwrap();

        assert!(PlanLoader::load(&path).is_err());
    }
}
