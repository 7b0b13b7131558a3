//! D&D 5th Edition reference data.
//!
//! Bundled class tables, subclass tables and spell slot progressions for the
//! classes the engine ships with, plus a small feat list. Used when no
//! external data directory is configured.

use crate::entities::{
    ClassData, ClassFeature, Feat, FeatBenefit, SpellSlotTable, Spellcasting, Subclass,
    ABILITY_SCORE_IMPROVEMENT,
};
use crate::value_objects::Ability;

const ASI: &str = ABILITY_SCORE_IMPROVEMENT;

/// Every bundled class, in display order.
pub fn srd_classes() -> Vec<ClassData> {
    vec![fighter(), rogue(), wizard(), cleric(), paladin()]
}

/// Bundled feats, in display order.
pub fn srd_feats() -> Vec<Feat> {
    vec![
        Feat::new("actor", "Actor")
            .with_description("Skilled at mimicry and dramatics.")
            .with_source("PHB p.165")
            .with_benefit(FeatBenefit::StatIncrease {
                stat: Ability::Cha,
                value: 1,
            }),
        Feat::new("alert", "Alert")
            .with_description("Always on the lookout for danger.")
            .with_source("PHB p.165")
            .with_benefit(FeatBenefit::InitiativeBonus { value: 5 }),
        Feat::new("defensive_duelist", "Defensive Duelist")
            .with_source("PHB p.165")
            .with_benefit(FeatBenefit::Custom {
                description: "Use your reaction to add your proficiency bonus to AC against one melee attack."
                    .to_string(),
            }),
        Feat::new("grappler", "Grappler")
            .with_description("You've developed the skills necessary to hold your own in close-quarters grappling.")
            .with_source("SRD 5.1")
            .with_benefit(FeatBenefit::Custom {
                description: "Advantage on attack rolls against a creature you are grappling.".to_string(),
            }),
        Feat::new("heavy_armor_master", "Heavy Armor Master")
            .with_source("PHB p.167")
            .with_benefit(FeatBenefit::StatChoice {
                options: vec![Ability::Str],
                value: 1,
            }),
        Feat::new("mobile", "Mobile")
            .with_description("You are exceptionally speedy and agile.")
            .with_source("PHB p.168")
            .with_benefit(FeatBenefit::SpeedIncrease { value: 10 }),
        Feat::new("observant", "Observant")
            .with_description("Quick to notice details of your environment.")
            .with_source("PHB p.168")
            .with_benefit(FeatBenefit::StatChoice {
                options: vec![Ability::Int, Ability::Wis],
                value: 1,
            }),
        Feat::new("resilient", "Resilient")
            .with_source("PHB p.168")
            .with_benefit(FeatBenefit::StatChoice {
                options: Ability::ALL.to_vec(),
                value: 1,
            }),
        Feat::new("tough", "Tough")
            .with_description("Your hit point maximum increases by 2 for every level you have.")
            .with_source("PHB p.170")
            .with_benefit(FeatBenefit::BonusHitPoints {
                fixed: None,
                per_level: Some(2),
            }),
    ]
}

// Class tables

fn fighter() -> ClassData {
    ClassData::new("Fighter", "d10")
        .with_features(features(&[
            (1, "Fighting Style"),
            (1, "Second Wind"),
            (2, "Action Surge"),
            (3, "Martial Archetype"),
            (4, ASI),
            (5, "Extra Attack"),
            (6, ASI),
            (7, "Martial Archetype Feature"),
            (8, ASI),
            (9, "Indomitable"),
            (10, "Martial Archetype Feature"),
            (11, "Extra Attack (2)"),
            (12, ASI),
            (13, "Indomitable (two uses)"),
            (14, ASI),
            (15, "Martial Archetype Feature"),
            (16, ASI),
            (17, "Action Surge (two uses)"),
            (17, "Indomitable (three uses)"),
            (18, "Martial Archetype Feature"),
            (19, ASI),
            (20, "Extra Attack (3)"),
        ]))
        .with_subclass(Subclass::new(
            "Champion",
            features(&[
                (3, "Improved Critical"),
                (7, "Remarkable Athlete"),
                (10, "Additional Fighting Style"),
                (15, "Superior Critical"),
                (18, "Survivor"),
            ]),
        ))
        .with_subclass(Subclass::new(
            "Battle Master",
            features(&[
                (3, "Combat Superiority"),
                (3, "Student of War"),
                (7, "Know Your Enemy"),
                (10, "Improved Combat Superiority"),
                (15, "Relentless"),
            ]),
        ))
}

fn rogue() -> ClassData {
    ClassData::new("Rogue", "d8")
        .with_features(features(&[
            (1, "Expertise"),
            (1, "Sneak Attack"),
            (1, "Thieves' Cant"),
            (2, "Cunning Action"),
            (3, "Roguish Archetype"),
            (4, ASI),
            (5, "Uncanny Dodge"),
            (6, "Expertise"),
            (7, "Evasion"),
            (8, ASI),
            (9, "Roguish Archetype Feature"),
            (10, ASI),
            (11, "Reliable Talent"),
            (12, ASI),
            (13, "Roguish Archetype Feature"),
            (14, "Blindsense"),
            (15, "Slippery Mind"),
            (16, ASI),
            (17, "Roguish Archetype Feature"),
            (18, "Elusive"),
            (19, ASI),
            (20, "Stroke of Luck"),
        ]))
        .with_subclass(Subclass::new(
            "Thief",
            features(&[
                (3, "Fast Hands"),
                (3, "Second-Story Work"),
                (9, "Supreme Sneak"),
                (13, "Use Magic Device"),
                (17, "Thief's Reflexes"),
            ]),
        ))
}

fn wizard() -> ClassData {
    ClassData::new("Wizard", "d6")
        .with_features(features(&[
            (1, "Spellcasting"),
            (1, "Arcane Recovery"),
            (2, "Arcane Tradition"),
            (4, ASI),
            (6, "Arcane Tradition Feature"),
            (8, ASI),
            (10, "Arcane Tradition Feature"),
            (12, ASI),
            (14, "Arcane Tradition Feature"),
            (16, ASI),
            (18, "Spell Mastery"),
            (19, ASI),
            (20, "Signature Spells"),
        ]))
        .with_subclass(Subclass::new(
            "School of Evocation",
            features(&[
                (2, "Evocation Savant"),
                (2, "Sculpt Spells"),
                (6, "Potent Cantrip"),
                (10, "Empowered Evocation"),
                (14, "Overchannel"),
            ]),
        ))
        .with_spellcasting(Spellcasting::new(Ability::Int, full_caster_slots()))
}

fn cleric() -> ClassData {
    ClassData::new("Cleric", "d8")
        .with_features(features(&[
            (1, "Spellcasting"),
            (1, "Divine Domain"),
            (2, "Channel Divinity (1/rest)"),
            (2, "Divine Domain Feature"),
            (4, ASI),
            (5, "Destroy Undead (CR 1/2)"),
            (6, "Channel Divinity (2/rest)"),
            (6, "Divine Domain Feature"),
            (8, ASI),
            (8, "Destroy Undead (CR 1)"),
            (8, "Divine Domain Feature"),
            (10, "Divine Intervention"),
            (11, "Destroy Undead (CR 2)"),
            (12, ASI),
            (14, "Destroy Undead (CR 3)"),
            (16, ASI),
            (17, "Destroy Undead (CR 4)"),
            (17, "Divine Domain Feature"),
            (18, "Channel Divinity (3/rest)"),
            (19, ASI),
            (20, "Divine Intervention Improvement"),
        ]))
        .with_subclass(Subclass::new(
            "Life Domain",
            features(&[
                (1, "Bonus Proficiency"),
                (1, "Disciple of Life"),
                (2, "Channel Divinity: Preserve Life"),
                (6, "Blessed Healer"),
                (8, "Divine Strike"),
                (17, "Supreme Healing"),
            ]),
        ))
        .with_spellcasting(Spellcasting::new(Ability::Wis, full_caster_slots()))
}

fn paladin() -> ClassData {
    ClassData::new("Paladin", "d10")
        .with_features(features(&[
            (1, "Divine Sense"),
            (1, "Lay on Hands"),
            (2, "Fighting Style"),
            (2, "Spellcasting"),
            (2, "Divine Smite"),
            (3, "Divine Health"),
            (3, "Sacred Oath"),
            (4, ASI),
            (5, "Extra Attack"),
            (6, "Aura of Protection"),
            (7, "Sacred Oath Feature"),
            (8, ASI),
            (10, "Aura of Courage"),
            (11, "Improved Divine Smite"),
            (12, ASI),
            (14, "Cleansing Touch"),
            (15, "Sacred Oath Feature"),
            (16, ASI),
            (18, "Aura Improvements"),
            (19, ASI),
            (20, "Sacred Oath Feature"),
        ]))
        .with_subclass(Subclass::new(
            "Oath of Devotion",
            features(&[
                (3, "Oath Spells"),
                (3, "Channel Divinity"),
                (7, "Aura of Devotion"),
                (15, "Purity of Spirit"),
                (20, "Holy Nimbus"),
            ]),
        ))
        .with_spellcasting(Spellcasting::new(Ability::Cha, half_caster_slots()))
}

fn features(table: &[(u8, &str)]) -> Vec<ClassFeature> {
    table
        .iter()
        .map(|(level, name)| ClassFeature::new(*name, *level))
        .collect()
}

// Spell slot progression tables

/// Wizard, cleric, druid, bard and sorcerer progression.
pub fn full_caster_slots() -> SpellSlotTable {
    slot_table(&[
        &[2],
        &[3],
        &[4, 2],
        &[4, 3],
        &[4, 3, 2],
        &[4, 3, 3],
        &[4, 3, 3, 1],
        &[4, 3, 3, 2],
        &[4, 3, 3, 3, 1],
        &[4, 3, 3, 3, 2],
        &[4, 3, 3, 3, 2, 1],
        &[4, 3, 3, 3, 2, 1],
        &[4, 3, 3, 3, 2, 1, 1],
        &[4, 3, 3, 3, 2, 1, 1],
        &[4, 3, 3, 3, 2, 1, 1, 1],
        &[4, 3, 3, 3, 2, 1, 1, 1],
        &[4, 3, 3, 3, 2, 1, 1, 1, 1],
        &[4, 3, 3, 3, 3, 1, 1, 1, 1],
        &[4, 3, 3, 3, 3, 2, 1, 1, 1],
        &[4, 3, 3, 3, 3, 2, 2, 1, 1],
    ])
}

/// Paladin and ranger progression; no slots at level 1.
pub fn half_caster_slots() -> SpellSlotTable {
    slot_table(&[
        &[],
        &[2],
        &[3],
        &[3],
        &[4, 2],
        &[4, 2],
        &[4, 3],
        &[4, 3],
        &[4, 3, 2],
        &[4, 3, 2],
        &[4, 3, 3],
        &[4, 3, 3],
        &[4, 3, 3, 1],
        &[4, 3, 3, 1],
        &[4, 3, 3, 2],
        &[4, 3, 3, 2],
        &[4, 3, 3, 3, 1],
        &[4, 3, 3, 3, 1],
        &[4, 3, 3, 3, 2],
        &[4, 3, 3, 3, 2],
    ])
}

fn slot_table(rows: &[&[u8]]) -> SpellSlotTable {
    SpellSlotTable::new(rows.iter().map(|row| row.to_vec()).collect())
}
