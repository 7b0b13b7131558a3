//! Commit staged decisions into the character record.

use chrono::{DateTime, Utc};

use super::pending::PendingChanges;
use super::steps::{gained_features, spell_slots_change};
use crate::aggregates::{Character, LevelAdvanced};
use crate::entities::{AbilityIncrease, CharacterFeature, ClassData, FeatBenefit, FeatureSource};
use crate::error::DomainError;
use crate::value_objects::Ability;

/// Apply one level's worth of staged decisions to `character`.
///
/// Every precondition is checked before the first mutation, so on error the
/// character is untouched. Changes are applied in a fixed order: level, hit
/// points, subclass, ability scores, feat, spell slots, class features.
pub fn apply_level_up(
    character: &mut Character,
    class: &ClassData,
    pending: &PendingChanges,
    now: DateTime<Utc>,
) -> Result<LevelAdvanced, DomainError> {
    if !pending.has_hit_points() {
        return Err(DomainError::validation("hit point gain has not been decided"));
    }
    if pending.subclass().is_some() && character.subclass().is_some() {
        return Err(DomainError::invalid_state_transition(
            "character already has a subclass",
        ));
    }
    let feat_ability = resolve_feat_ability(pending)?;

    let old_level = character.level();
    let new_level = old_level.saturating_add(1);
    // Read before the subclass may be set below.
    let gained = gained_features(class, new_level, character.subclass());

    // 1. Level and hit-dice bookkeeping
    let advanced = character.advance_level();

    // 2. Hit points
    character.gain_hit_points(pending.hit_point_increase());

    // 3. Subclass
    if let Some(subclass) = pending.subclass() {
        character.set_subclass(subclass);
        for feature in pending.subclass_features() {
            character.add_feature(
                CharacterFeature::new(
                    &feature.name,
                    FeatureSource::Subclass(subclass.to_string()),
                    feature.level,
                )
                .with_description(&feature.description),
            );
        }
    }

    // 4. Ability score improvement
    for (ability, delta) in pending.ability_deltas() {
        character.increase_ability(ability, delta);
    }

    // 5. Feat
    if let Some(feat) = pending.feat() {
        character.add_feature(
            CharacterFeature::new(&feat.name, FeatureSource::Feat, new_level)
                .with_description(&feat.description),
        );
        if let Some((ability, amount)) = feat_ability {
            character.increase_ability(ability, amount);
        }
        for benefit in &feat.benefits {
            match benefit {
                FeatBenefit::InitiativeBonus { value } => character.add_initiative_bonus(*value),
                FeatBenefit::SpeedIncrease { value } => character.add_speed(*value),
                FeatBenefit::ArmorClassBonus { value } => character.add_armor_class(*value),
                FeatBenefit::BonusHitPoints { fixed, per_level } => {
                    let bonus = fixed
                        .unwrap_or(0)
                        .saturating_add(per_level.unwrap_or(0).saturating_mul(i32::from(new_level)));
                    character.gain_hit_points(bonus);
                }
                FeatBenefit::StatIncrease { .. }
                | FeatBenefit::StatChoice { .. }
                | FeatBenefit::Custom { .. } => {}
            }
        }
    }

    // 6. Spell slots
    if let Some(spellcasting) = &class.spellcasting {
        if spell_slots_change(class, old_level, new_level) {
            let slots = class.slots_at(new_level);
            let spells = character.ensure_spellcasting(spellcasting.ability);
            for (spell_level, count) in slots.iter() {
                spells.set_slot_max(spell_level, count);
            }
        }
    }

    // 7. Class features (and features of an existing subclass)
    for feature in gained {
        character.add_feature(feature);
    }

    // 8. Stamp
    character.touch(now);

    Ok(advanced)
}

/// The ability and amount a staged feat raises, if any.
fn resolve_feat_ability(pending: &PendingChanges) -> Result<Option<(Ability, i32)>, DomainError> {
    let Some(feat) = pending.feat() else {
        return Ok(None);
    };
    match feat.ability_increase() {
        None => Ok(None),
        Some(AbilityIncrease::Fixed { ability, amount }) => Ok(Some((ability, amount))),
        Some(AbilityIncrease::Choice { options, amount }) => match pending.feat_ability() {
            Some(ability) if options.contains(&ability) => Ok(Some((ability, amount))),
            Some(ability) => Err(DomainError::validation(format!(
                "{} cannot raise {}",
                feat.name, ability
            ))),
            None => Err(DomainError::validation(format!(
                "{} needs an ability choice",
                feat.name
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::HitPoints;
    use crate::entities::{CharacterSpells, Feat};
    use crate::game_systems::{srd_classes, srd_feats};
    use crate::value_objects::{AbilityScores, CharacterName};
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn committed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
    }

    fn class(name: &str) -> ClassData {
        srd_classes()
            .into_iter()
            .find(|c| c.name == name)
            .unwrap()
    }

    fn feat(id: &str) -> Feat {
        srd_feats().into_iter().find(|f| f.id == id).unwrap()
    }

    fn character(class_name: &str, level: u8, abilities: AbilityScores, hp: i32) -> Character {
        Character::new(
            CharacterName::new("Test Subject").unwrap(),
            class_name,
            abilities,
            hp,
            created(),
        )
        .with_level(level)
    }

    fn with_hp(amount: i32) -> PendingChanges {
        let mut pending = PendingChanges::new();
        pending.set_hit_point_increase(amount);
        pending
    }

    #[test]
    fn fighter_one_to_two_gains_hit_points_and_level() {
        let fighter = class("Fighter");
        let mut pc = character("Fighter", 1, AbilityScores::uniform(14), 12);

        let advanced = apply_level_up(&mut pc, &fighter, &with_hp(8), committed()).unwrap();

        assert_eq!(advanced, LevelAdvanced { from: 1, to: 2 });
        assert_eq!(pc.level(), 2);
        assert_eq!(pc.hit_dice_total(), 2);
        assert_eq!(pc.hit_points(), HitPoints { max: 20, current: 20 });
        assert_eq!(pc.updated_at(), committed());
        let names: Vec<_> = pc.features().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Action Surge"]);
    }

    #[test]
    fn strength_plus_two_only_changes_strength() {
        let fighter = class("Fighter");
        let abilities = AbilityScores::new(14, 12, 14, 10, 10, 8);
        let mut pc = character("Fighter", 3, abilities, 28).with_subclass("Champion");
        let mut pending = with_hp(8);
        pending.set_ability_delta(Ability::Str, 2);

        apply_level_up(&mut pc, &fighter, &pending, committed()).unwrap();

        assert_eq!(pc.abilities(), &abilities.with(Ability::Str, 16));
    }

    #[test]
    fn deltas_never_exceed_cap() {
        let fighter = class("Fighter");
        let mut pc = character("Fighter", 3, AbilityScores::uniform(19), 28);
        let mut pending = with_hp(1);
        pending.set_ability_delta(Ability::Str, 2);

        apply_level_up(&mut pc, &fighter, &pending, committed()).unwrap();

        assert_eq!(pc.abilities().get(Ability::Str), 20);
    }

    #[test]
    fn subclass_and_its_features_are_applied() {
        let fighter = class("Fighter");
        let champion = fighter.find_subclass("Champion").cloned().unwrap();
        let mut pc = character("Fighter", 2, AbilityScores::uniform(12), 20);
        let mut pending = with_hp(6);
        pending.set_subclass(&champion.name, champion.features_up_to(3));

        apply_level_up(&mut pc, &fighter, &pending, committed()).unwrap();

        assert_eq!(pc.subclass(), Some("Champion"));
        assert_eq!(pc.features().len(), 1);
        assert_eq!(pc.features()[0].name(), "Improved Critical");
        assert_eq!(
            pc.features()[0].source(),
            &FeatureSource::Subclass("Champion".to_string())
        );
    }

    #[test]
    fn wizard_gets_spellcasting_record_and_slots() {
        let wizard = class("Wizard");
        let mut pc = character("Wizard", 1, AbilityScores::uniform(10), 6);

        apply_level_up(&mut pc, &wizard, &with_hp(4), committed()).unwrap();

        let spells = pc.spellcasting().unwrap();
        assert_eq!(spells.spellcasting_ability(), Ability::Int);
        assert_eq!(spells.slot(1).unwrap().max(), 3);
        assert_eq!(spells.slot(1).unwrap().current(), 3);
        assert!(spells.slot(2).is_none());
    }

    #[test]
    fn existing_subclass_features_are_appended_after_class_features() {
        let fighter = class("Fighter");
        let mut pc = character("Fighter", 6, AbilityScores::uniform(12), 50).with_subclass("Champion");

        apply_level_up(&mut pc, &fighter, &with_hp(6), committed()).unwrap();

        let names: Vec<_> = pc.features().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Martial Archetype Feature", "Remarkable Athlete"]);
    }

    #[test]
    fn feat_with_choice_applies_resolved_ability() {
        let fighter = class("Fighter");
        let mut pc = character("Fighter", 3, AbilityScores::uniform(13), 28);
        let mut pending = with_hp(7);
        pending.set_feat(feat("resilient"), Some(Ability::Con));

        apply_level_up(&mut pc, &fighter, &pending, committed()).unwrap();

        assert_eq!(pc.abilities().get(Ability::Con), 14);
        assert_eq!(pc.features()[0].name(), "Resilient");
        assert_eq!(pc.features()[0].source(), &FeatureSource::Feat);
    }

    #[test]
    fn unresolved_feat_choice_leaves_character_untouched() {
        let fighter = class("Fighter");
        let mut pc = character("Fighter", 3, AbilityScores::uniform(13), 28);
        let before = pc.clone();
        let mut pending = with_hp(7);
        pending.set_feat(feat("resilient"), None);

        let result = apply_level_up(&mut pc, &fighter, &pending, committed());

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(pc, before);
    }

    #[test]
    fn undecided_hit_points_is_rejected() {
        let fighter = class("Fighter");
        let mut pc = character("Fighter", 1, AbilityScores::uniform(10), 10);
        let before = pc.clone();

        assert!(apply_level_up(&mut pc, &fighter, &PendingChanges::new(), committed()).is_err());
        assert_eq!(pc, before);
    }

    #[test]
    fn level_past_slot_table_keeps_existing_pools() {
        let wizard = class("Wizard");
        let mut spells = CharacterSpells::new(Ability::Int);
        for (spell_level, count) in wizard.slots_at(20).iter() {
            spells.set_slot_max(spell_level, count);
        }
        let mut pc = character("Wizard", 20, AbilityScores::uniform(10), 80)
            .with_subclass("School of Evocation")
            .with_spellcasting(spells.clone());

        apply_level_up(&mut pc, &wizard, &with_hp(4), committed()).unwrap();

        assert_eq!(pc.level(), 21);
        assert_eq!(pc.spellcasting(), Some(&spells));
        assert_eq!(pc.spellcasting().unwrap().slot(9).unwrap().max(), 1);
    }

    #[test]
    fn oversized_per_level_bonus_saturates() {
        let fighter = class("Fighter");
        let mut pc = character("Fighter", 3, AbilityScores::uniform(10), 28);
        let mut pending = with_hp(6);
        let absurd = Feat::new("colossus", "Colossus").with_benefit(FeatBenefit::BonusHitPoints {
            fixed: Some(i32::MAX),
            per_level: Some(i32::MAX),
        });
        pending.set_feat(absurd, None);

        apply_level_up(&mut pc, &fighter, &pending, committed()).unwrap();

        assert_eq!(pc.hit_points().max, i32::MAX);
    }

    #[test]
    fn flat_feat_bonuses_are_applied() {
        let fighter = class("Fighter");
        let mut pc = character("Fighter", 3, AbilityScores::uniform(10), 28);
        let mut pending = with_hp(6);
        let hardy = feat("tough")
            .with_benefit(FeatBenefit::BonusHitPoints {
                fixed: Some(1),
                per_level: None,
            })
            .with_benefit(FeatBenefit::InitiativeBonus { value: 5 })
            .with_benefit(FeatBenefit::SpeedIncrease { value: 10 })
            .with_benefit(FeatBenefit::ArmorClassBonus { value: 1 });
        pending.set_feat(hardy, None);

        apply_level_up(&mut pc, &fighter, &pending, committed()).unwrap();

        // 28 + 6 gain + 2 * 4 per level + 1 fixed
        assert_eq!(pc.hit_points().max, 43);
        assert_eq!(pc.initiative_bonus(), 5);
        assert_eq!(pc.speed(), 40);
        assert_eq!(pc.armor_class(), 11);
    }
}
