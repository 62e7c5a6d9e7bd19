//! The built-in core catalog.
//!
//! Covered by `core_catalog_is_valid_and_clean` in the parent module, which
//! rebuilds it through [`Catalog::new`].

use super::Catalog;
use crate::entities::{
    ClassDef, ClassPicks, FeatDef, FeatTier, FeatureDef, FeatureKind, FeatureUsage, KinDef,
    KinPower, KinPowerUsage, RulesHook,
};

impl Catalog {
    /// The core rule tables: 13 kin, 9 classes and their features and feats.
    pub fn core() -> Self {
        Self {
            kin: core_kin(),
            classes: core_classes(),
            features: core_features(),
            feats: core_feats(),
        }
    }
}

fn single(id: &str, name: &str, power: KinPower) -> KinDef {
    KinDef::new(id, name, 1).with_power(power)
}

fn core_kin() -> Vec<KinDef> {
    use KinPowerUsage::{OncePerBattle, Passive};

    vec![
        KinDef::new("human", "Human", 1)
            .with_power(
                KinPower::new("human-resourceful", "Resourceful", Passive)
                    .with_summary("Humans pick up an extra feat.")
                    .with_effect("Gain one additional feat at the highest tier you qualify for.")
                    .with_rules_hook(RulesHook::BonusFeatSlotAtHighestTier),
            )
            .with_power(
                KinPower::new("human-quick-to-fight", "Quick to Fight", Passive)
                    .with_summary("Roll initiative twice, take the best.")
                    .with_effect("At the start of each battle, roll initiative twice and use the higher result.")
                    .with_feat(
                        FeatTier::Adventurer,
                        "If your initiative beats every enemy's, gain +2 to all defenses during the first round.",
                    )
                    .with_rules_hook(RulesHook::InitiativeBestOfTwo),
            )
            .with_power(
                KinPower::new("human-push-it", "Push It", OncePerBattle)
                    .with_summary("Turn a near miss into a hit.")
                    .with_trigger("You miss with an attack by 2 or less.")
                    .with_effect("Add +2 to the attack roll; it hits if that is enough.")
                    .with_feat(FeatTier::Champion, "The bonus becomes +3.")
                    .with_feat(FeatTier::Epic, "Usable twice per battle."),
            ),
        KinDef::new("dwarf", "Dwarf", 1).with_power(
            KinPower::new("dwarf-stubborn", "That's Your Best Shot?", OncePerBattle)
                .with_summary("Shrug off a heavy blow.")
                .with_trigger("You are hit by an attack.")
                .with_effect("Heal using a free recovery.")
                .with_feat(FeatTier::Champion, "Also gain +1 to saves against ongoing damage until the end of the battle."),
        ),
        single(
            "high-elf",
            "High Elf",
            KinPower::new("high-elf-teleport-shield", "Highblood Teleport", OncePerBattle)
                .with_summary("Short-range teleport.")
                .with_effect("Teleport to a nearby location you can see.")
                .with_feat(FeatTier::Champion, "Deal damage to one enemy engaged with you before you vanish."),
        ),
        single(
            "silver-elf",
            "Silver Elf",
            KinPower::new("silver-elf-liminal", "Liminal Grace", OncePerBattle)
                .with_summary("Slip between the edges of the world.")
                .with_effect("Reroll a failed save; use the better result."),
        ),
        single(
            "wood-elf",
            "Wood Elf",
            KinPower::new("wood-elf-woodcraft", "Elven Grace", Passive)
                .with_summary("Woodland agility.")
                .with_effect("At the start of each of your turns, roll a die to see if you get an extra standard action.")
                .with_feat(FeatTier::Adventurer, "Roll a larger die; the chance of an extra action improves."),
        ),
        single(
            "gnome",
            "Gnome",
            KinPower::new("gnome-illusion", "Minor Illusions", OncePerBattle)
                .with_summary("A knack for glamours.")
                .with_effect("Create a small illusion that distracts one nearby enemy."),
        ),
        single(
            "half-elf",
            "Half-elf",
            KinPower::new("half-elf-surprising", "Surprising", OncePerBattle)
                .with_summary("Twist fate at the last moment.")
                .with_effect("Subtract one from the natural result of one of your d20 rolls."),
        ),
        single(
            "halfling",
            "Halfling",
            KinPower::new("halfling-luck", "Evasive", OncePerBattle)
                .with_summary("Small and hard to pin down.")
                .with_trigger("An enemy hits you with an attack.")
                .with_effect("Force the enemy to reroll the attack with a -2 penalty."),
        ),
        single(
            "troll-kin",
            "Troll-kin",
            KinPower::new("troll-kin-regen", "Regeneration", Passive)
                .with_summary("Wounds knit between fights.")
                .with_effect("After a battle, regain a small amount of hit points without spending a recovery."),
        ),
        single(
            "dragonic",
            "Dragonic",
            KinPower::new("dragonic-breath", "Breath Weapon", OncePerBattle)
                .with_summary("Exhale elemental fury.")
                .with_effect("Make a close-quarters attack against up to two nearby enemies in a group."),
        ),
        single(
            "forgeborn",
            "Forgeborn",
            KinPower::new("forgeborn-construct", "Never Say Die", Passive)
                .with_summary("Built to endure.")
                .with_effect("The first time each battle you drop to 0 hit points, roll a save to stay on your feet."),
        ),
        single(
            "holy-one",
            "Holy One",
            KinPower::new("holy-one-sanctity", "Halo", Passive)
                .with_summary("Divine favor made visible.")
                .with_effect("When you are staggered, roll a die; on a high result an attack against you misses."),
        ),
        single(
            "tiefling",
            "Tiefling",
            KinPower::new("tiefling-curse", "Curse of Chaos", OncePerBattle)
                .with_summary("Bend bad luck toward your foes.")
                .with_trigger("An enemy near you rolls a natural 1 or 2.")
                .with_effect("Describe a chaotic twist that turns the roll against them."),
        ),
    ]
}

fn picks(talents: u8, powers: u8, spells: u8, maneuvers: u8) -> ClassPicks {
    ClassPicks {
        talents,
        powers,
        spells,
        maneuvers,
    }
}

fn core_classes() -> Vec<ClassDef> {
    vec![
        ClassDef::new("barbarian", "Barbarian", picks(3, 0, 0, 0)).with_blurb("Smash and rage."),
        ClassDef::new("bard", "Bard", picks(3, 0, 2, 0)).with_blurb("Songs, spells, and support."),
        ClassDef::new("cleric", "Cleric", picks(3, 0, 2, 0)).with_blurb("Divine magic and blessings."),
        ClassDef::new("fighter", "Fighter", picks(3, 0, 0, 2)).with_blurb("Steel and maneuvers."),
        ClassDef::new("paladin", "Paladin", picks(3, 1, 0, 0)).with_blurb("Holy warrior."),
        ClassDef::new("ranger", "Ranger", picks(3, 2, 0, 0)).with_blurb("Arrows and animal grit."),
        ClassDef::new("rogue", "Rogue", picks(3, 2, 0, 0)).with_blurb("Sneak and stab."),
        ClassDef::new("sorcerer", "Sorcerer", picks(3, 0, 2, 0)).with_blurb("Innate arcane power."),
        ClassDef::new("wizard", "Wizard", picks(3, 0, 3, 0)).with_blurb("Prepared arcane spells."),
    ]
}

fn core_features() -> Vec<FeatureDef> {
    use FeatureKind::{Maneuver, Power, Spell, Talent};
    use FeatureUsage::{AtWill, Battle, Daily, Encounter, Passive, Recharge};

    let f = |id: &str, class_id: &str, kind: FeatureKind, name: &str, usage: FeatureUsage| {
        FeatureDef::new(id, class_id, kind, name, usage)
    };

    vec![
        // Barbarian
        f("barb-rage", "barbarian", Talent, "Rage", Encounter),
        f("barb-strong", "barbarian", Talent, "Strongheart", Passive),
        f("barb-whirlwind", "barbarian", Talent, "Whirlwind", AtWill),
        f("barb-unstoppable", "barbarian", Talent, "Unstoppable", Battle),
        f("barb-crush", "barbarian", Power, "Crushing Blow", Battle),
        // Bard
        f("bard-balladeer", "bard", Talent, "Balladeer", Passive),
        f("bard-battle-skald", "bard", Talent, "Battle Skald", Passive),
        f("bard-jack-of-spells", "bard", Talent, "Jack of Spells", Passive),
        f("bard-storyteller", "bard", Talent, "Storyteller", Passive),
        f("bard-song-of-heroes", "bard", Spell, "Song of Heroes", Battle),
        f("bard-soundburst", "bard", Spell, "Soundburst", Daily),
        f("bard-vicious-mockery", "bard", Spell, "Vicious Mockery", AtWill),
        // Cleric
        f("clr-healing", "cleric", Talent, "Healing", Passive),
        f("clr-protection", "cleric", Talent, "Protection", Passive),
        f("clr-strength", "cleric", Talent, "Strength", Passive),
        f("clr-war", "cleric", Talent, "War", Passive),
        f("clr-bless", "cleric", Spell, "Bless", Daily),
        f("clr-javelin-of-faith", "cleric", Spell, "Javelin of Faith", AtWill),
        f("clr-shield-of-faith", "cleric", Spell, "Shield of Faith", Daily),
        // Fighter
        f("ftr-weapon-mastery", "fighter", Talent, "Weapon Mastery", Passive)
            .with_description("Proficiency boosts."),
        f("ftr-armor-master", "fighter", Talent, "Armor Master", Passive),
        f("ftr-cleave", "fighter", Talent, "Cleave", Battle),
        f("ftr-heavy-warrior", "fighter", Talent, "Heavy Warrior", Encounter),
        f("ftr-power-cleave", "fighter", Maneuver, "Power Attack", Encounter),
        f("ftr-defend", "fighter", Maneuver, "Defensive Fighting", Battle),
        f("ftr-brace-for-it", "fighter", Maneuver, "Brace for It", Battle),
        // Paladin
        f("pal-bastion", "paladin", Talent, "Bastion", Passive),
        f("pal-divine-domain", "paladin", Talent, "Divine Domain", Passive),
        f("pal-fearless", "paladin", Talent, "Fearless", Passive),
        f("pal-implacable", "paladin", Talent, "Implacable", Passive),
        f("pal-smite-evil", "paladin", Power, "Smite Evil", Battle),
        f("pal-lay-on-hands", "paladin", Power, "Lay on Hands", Battle),
        // Ranger
        f("rgr-archery", "ranger", Talent, "Archery", Passive),
        f("rgr-double-melee", "ranger", Talent, "Double Melee Attack", Passive),
        f("rgr-tracker", "ranger", Talent, "Tracker", Passive),
        f("rgr-animal-companion", "ranger", Talent, "Animal Companion", Passive),
        f("rgr-hunters-mark", "ranger", Power, "Hunter's Mark", Battle),
        f("rgr-volley", "ranger", Power, "Volley", Daily),
        f("rgr-lethal-hunter", "ranger", Power, "Lethal Hunter", Recharge),
        // Rogue
        f("rog-cunning", "rogue", Talent, "Cunning", Passive),
        f("rog-shadow-walk", "rogue", Talent, "Shadow Walk", AtWill),
        f("rog-swashbuckle", "rogue", Talent, "Swashbuckle", Daily),
        f("rog-thievery", "rogue", Talent, "Thievery", Passive),
        f("rog-deadly-thrust", "rogue", Power, "Deadly Thrust", AtWill),
        f("rog-evasive-strike", "rogue", Power, "Evasive Strike", AtWill),
        f("rog-sure-cut", "rogue", Power, "Sure Cut", Encounter),
        // Sorcerer
        f("sor-arcane-heritage", "sorcerer", Talent, "Arcane Heritage", Passive),
        f("sor-chromatic-destroyer", "sorcerer", Talent, "Chromatic Destroyer", Passive),
        f("sor-infernal-heritage", "sorcerer", Talent, "Infernal Heritage", Passive),
        f("sor-spell-fist", "sorcerer", Talent, "Spell Fist", Passive),
        f("sor-breath-of-the-black", "sorcerer", Spell, "Breath of the Black", Daily),
        f("sor-chaos-bolt", "sorcerer", Spell, "Chaos Bolt", AtWill),
        f("sor-lightning-fork", "sorcerer", Spell, "Lightning Fork", Recharge),
        // Wizard
        f("wiz-book", "wizard", Talent, "Bookish Wizard", Passive),
        f("wiz-evoker", "wizard", Talent, "Evocation", Passive),
        f("wiz-cantrip-mastery", "wizard", Talent, "Cantrip Mastery", Passive),
        f("wiz-abjuration", "wizard", Talent, "Abjuration", Passive),
        f("wiz-magic-missile", "wizard", Spell, "Magic Missile", AtWill),
        f("wiz-fireball", "wizard", Spell, "Fireball", Daily),
        f("wiz-shield", "wizard", Spell, "Shield", Encounter),
        f("wiz-ray-of-frost", "wizard", Spell, "Ray of Frost", AtWill),
    ]
}

fn core_feats() -> Vec<FeatDef> {
    use FeatTier::{Adventurer, Champion, Epic};

    vec![
        // Wizard
        FeatDef::new("feat-wiz-bookish-a", Adventurer, "Bookish Wizard (A)")
            .for_class("wizard")
            .with_description("Small bonus to a bookish talent.")
            .requires_feature("wiz-book"),
        FeatDef::new("feat-wiz-evoker-a", Adventurer, "Evocation (A)")
            .for_class("wizard")
            .with_description("Improve damage and targets on evocation effects.")
            .requires_feature("wiz-evoker"),
        FeatDef::new("feat-wiz-cantrip-a", Adventurer, "Cantrip Mastery (A)")
            .for_class("wizard")
            .with_description("More flexible cantrips.")
            .requires_feature("wiz-cantrip-mastery"),
        FeatDef::new("feat-wiz-missile-a", Adventurer, "Magic Missile (A)")
            .for_class("wizard")
            .with_description("Enhance the at-will missile.")
            .requires_feature("wiz-magic-missile"),
        FeatDef::new("feat-wiz-fireball-c", Champion, "Fireball (C)")
            .for_class("wizard")
            .with_description("Bigger boom.")
            .requires_feature("wiz-fireball"),
        FeatDef::new("feat-wiz-shield-c", Champion, "Shield (C)")
            .for_class("wizard")
            .with_description("Improved protection.")
            .requires_feature("wiz-shield"),
        FeatDef::new("feat-wiz-evoker-e", Epic, "Evocation (E)")
            .for_class("wizard")
            .with_description("Top-tier evocation bonus.")
            .requires_feature("wiz-evoker"),
        // Fighter
        FeatDef::new("feat-ftr-weapon-a", Adventurer, "Weapon Mastery (A)")
            .for_class("fighter")
            .requires_feature("ftr-weapon-mastery"),
        FeatDef::new("feat-ftr-power-c", Champion, "Power Attack (C)")
            .for_class("fighter")
            .requires_feature("ftr-power-cleave"),
        // Generic
        FeatDef::new("feat-toughness", Adventurer, "Toughness")
            .with_description("Increase your maximum hit points."),
        FeatDef::new("feat-linguist", Adventurer, "Linguist")
            .with_description("Speak and read several additional languages."),
        FeatDef::new("feat-strong-recovery", Champion, "Strong Recovery")
            .with_description("Reroll one of your recovery dice and keep the better result."),
        FeatDef::new("feat-epic-presence", Epic, "Epic Presence")
            .with_description("Your reputation precedes you; icons take notice."),
    ]
}
