//! Reference catalog - the read-only rule tables the wizard draws from
//!
//! A [`Catalog`] holds four tables: kin, classes, features and feats. It is
//! valid by construction: [`Catalog::new`] and deserialization both reject
//! duplicate ids and dangling class references. Softer problems that do not
//! break lookups are reported by [`Catalog::lint`].

mod builtin;

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::{ClassDef, FeatDef, FeatTier, FeatureDef, FeatureKind, KinDef, KinPower};

/// Hard catalog inconsistencies. A catalog with any of these cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate {table} id: {id}")]
    DuplicateId { table: &'static str, id: String },

    #[error("Kin power id {id} is used by more than one kin")]
    DuplicateKinPower { id: String },

    #[error("{table} {id} references unknown class {class_id}")]
    UnknownClass {
        table: &'static str,
        id: String,
        class_id: String,
    },

    #[error("Kin {kin_id} requires {required} picks but only offers {available} powers")]
    RequiredPicksExceedPowers {
        kin_id: String,
        required: u8,
        available: usize,
    },
}

/// Soft catalog problems: lookups still work, but some content is unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// A feat requires a feature that does not exist, so it can never be offered
    UnknownRequiredFeature { feat_id: String, feature_id: String },
    /// A class needs more features of a kind than the catalog offers it
    UnfulfillableClassPicks {
        class_id: String,
        kind: FeatureKind,
        required: u8,
        available: usize,
    },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::UnknownRequiredFeature {
                feat_id,
                feature_id,
            } => write!(
                f,
                "Feat {} requires unknown feature {} and can never be selected",
                feat_id, feature_id
            ),
            CatalogWarning::UnfulfillableClassPicks {
                class_id,
                kind,
                required,
                available,
            } => write!(
                f,
                "Class {} requires {} {} but only {} exist",
                class_id,
                required,
                kind.bucket_name(),
                available
            ),
        }
    }
}

/// Wire shape of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    #[serde(default)]
    pub kin: Vec<KinDef>,
    #[serde(default)]
    pub classes: Vec<ClassDef>,
    #[serde(default)]
    pub features: Vec<FeatureDef>,
    #[serde(default)]
    pub feats: Vec<FeatDef>,
}

/// The validated reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogData", into = "CatalogData")]
pub struct Catalog {
    kin: Vec<KinDef>,
    classes: Vec<ClassDef>,
    features: Vec<FeatureDef>,
    feats: Vec<FeatDef>,
}

impl Catalog {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Build a catalog, checking id uniqueness and cross-references.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn new(
        kin: Vec<KinDef>,
        classes: Vec<ClassDef>,
        features: Vec<FeatureDef>,
        feats: Vec<FeatDef>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            kin,
            classes,
            features,
            feats,
        };
        catalog.check()?;
        Ok(catalog)
    }

    fn check(&self) -> Result<(), CatalogError> {
        ensure_unique("kin", self.kin.iter().map(|k| k.id.as_str()))?;
        ensure_unique("class", self.classes.iter().map(|c| c.id.as_str()))?;
        ensure_unique("feature", self.features.iter().map(|f| f.id.as_str()))?;
        ensure_unique("feat", self.feats.iter().map(|f| f.id.as_str()))?;

        let mut power_ids = HashSet::new();
        for kin in &self.kin {
            for power in &kin.powers {
                if !power_ids.insert(power.id.as_str()) {
                    return Err(CatalogError::DuplicateKinPower {
                        id: power.id.clone(),
                    });
                }
            }
            if usize::from(kin.required_picks) > kin.powers.len() {
                return Err(CatalogError::RequiredPicksExceedPowers {
                    kin_id: kin.id.clone(),
                    required: kin.required_picks,
                    available: kin.powers.len(),
                });
            }
        }

        for feature in &self.features {
            if self.class(&feature.class_id).is_none() {
                return Err(CatalogError::UnknownClass {
                    table: "feature",
                    id: feature.id.clone(),
                    class_id: feature.class_id.clone(),
                });
            }
        }

        for feat in &self.feats {
            if let Some(class_id) = &feat.class_id {
                if self.class(class_id).is_none() {
                    return Err(CatalogError::UnknownClass {
                        table: "feat",
                        id: feat.id.clone(),
                        class_id: class_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Report content that is well-formed but unreachable.
    pub fn lint(&self) -> Vec<CatalogWarning> {
        let mut warnings = Vec::new();

        for feat in &self.feats {
            if let Some(feature_id) = &feat.requires_feature_id {
                if self.feature(feature_id).is_none() {
                    warnings.push(CatalogWarning::UnknownRequiredFeature {
                        feat_id: feat.id.clone(),
                        feature_id: feature_id.clone(),
                    });
                }
            }
        }

        for class in &self.classes {
            for kind in class.picks.required_kinds() {
                let required = class.picks.required(kind);
                let available = self.features_for(&class.id, kind).count();
                if available < usize::from(required) {
                    warnings.push(CatalogWarning::UnfulfillableClassPicks {
                        class_id: class.id.clone(),
                        kind,
                        required,
                        available,
                    });
                }
            }
        }

        warnings
    }

    // =========================================================================
    // Tables
    // =========================================================================

    pub fn kin_list(&self) -> &[KinDef] {
        &self.kin
    }

    pub fn classes(&self) -> &[ClassDef] {
        &self.classes
    }

    pub fn features(&self) -> &[FeatureDef] {
        &self.features
    }

    pub fn feats(&self) -> &[FeatDef] {
        &self.feats
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn kin(&self, id: &str) -> Option<&KinDef> {
        self.kin.iter().find(|k| k.id == id)
    }

    pub fn class(&self, id: &str) -> Option<&ClassDef> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn feature(&self, id: &str) -> Option<&FeatureDef> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn feat(&self, id: &str) -> Option<&FeatDef> {
        self.feats.iter().find(|f| f.id == id)
    }

    /// Find a kin power by id along with the kin that owns it.
    pub fn kin_power(&self, power_id: &str) -> Option<(&KinDef, &KinPower)> {
        self.kin
            .iter()
            .find_map(|kin| kin.power(power_id).map(|power| (kin, power)))
    }

    /// Features a class may pick for one bucket.
    pub fn features_for<'a>(
        &'a self,
        class_id: &'a str,
        kind: FeatureKind,
    ) -> impl Iterator<Item = &'a FeatureDef> + 'a {
        self.features
            .iter()
            .filter(move |f| f.class_id == class_id && f.kind == kind)
    }

    /// Feats of the given tiers that belong to the class or are generic.
    ///
    /// Prerequisites are not checked here; see the feat validator for that.
    pub fn feats_for<'a, 'q>(
        &'a self,
        class_id: Option<&'q str>,
        tiers: &'q BTreeSet<FeatTier>,
    ) -> impl Iterator<Item = &'a FeatDef> + 'q
    where
        'a: 'q,
    {
        self.feats
            .iter()
            .filter(move |f| tiers.contains(&f.tier) && f.is_available_to(class_id))
    }
}

impl TryFrom<CatalogData> for Catalog {
    type Error = CatalogError;

    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        Self::new(data.kin, data.classes, data.features, data.feats)
    }
}

impl From<Catalog> for CatalogData {
    fn from(catalog: Catalog) -> Self {
        Self {
            kin: catalog.kin,
            classes: catalog.classes,
            features: catalog.features,
            feats: catalog.feats,
        }
    }
}

fn ensure_unique<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ClassPicks, FeatureUsage, KinPowerUsage};

    fn wizard() -> ClassDef {
        ClassDef::new(
            "wizard",
            "Wizard",
            ClassPicks {
                talents: 1,
                ..ClassPicks::default()
            },
        )
    }

    fn book() -> FeatureDef {
        FeatureDef::new(
            "wiz-book",
            "wizard",
            FeatureKind::Talent,
            "Bookish Wizard",
            FeatureUsage::Passive,
        )
    }

    #[test]
    fn core_catalog_is_valid_and_clean() {
        let core = Catalog::core();
        let rebuilt = Catalog::new(
            core.kin_list().to_vec(),
            core.classes().to_vec(),
            core.features().to_vec(),
            core.feats().to_vec(),
        );
        assert!(rebuilt.is_ok());
        assert!(core.lint().is_empty(), "{:?}", core.lint());
        assert_eq!(core.kin_list().len(), 13);
        assert_eq!(core.classes().len(), 9);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = Catalog::new(vec![], vec![wizard(), wizard()], vec![], vec![]);
        assert_eq!(
            result,
            Err(CatalogError::DuplicateId {
                table: "class",
                id: "wizard".into()
            })
        );
    }

    #[test]
    fn rejects_kin_power_shared_between_kin() {
        let power = KinPower::new("shared", "Shared", KinPowerUsage::Passive);
        let a = KinDef::new("a", "A", 1).with_power(power.clone());
        let b = KinDef::new("b", "B", 1).with_power(power);
        let result = Catalog::new(vec![a, b], vec![], vec![], vec![]);
        assert!(matches!(result, Err(CatalogError::DuplicateKinPower { .. })));
    }

    #[test]
    fn rejects_feature_of_unknown_class() {
        let result = Catalog::new(vec![], vec![], vec![book()], vec![]);
        assert!(matches!(
            result,
            Err(CatalogError::UnknownClass { table: "feature", .. })
        ));
    }

    #[test]
    fn rejects_kin_requiring_more_picks_than_powers() {
        let kin = KinDef::new("lonely", "Lonely", 2)
            .with_power(KinPower::new("only", "Only", KinPowerUsage::Passive));
        let result = Catalog::new(vec![kin], vec![], vec![], vec![]);
        assert!(matches!(
            result,
            Err(CatalogError::RequiredPicksExceedPowers { .. })
        ));
    }

    #[test]
    fn lint_reports_dangling_prerequisite_and_short_pool() {
        let feat = FeatDef::new("feat-x", FeatTier::Adventurer, "X")
            .for_class("wizard")
            .requires_feature("wiz-missing");
        let catalog = Catalog::new(vec![], vec![wizard()], vec![], vec![feat]).unwrap();

        let warnings = catalog.lint();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.contains(&CatalogWarning::UnknownRequiredFeature {
            feat_id: "feat-x".into(),
            feature_id: "wiz-missing".into(),
        }));
        assert!(warnings.contains(&CatalogWarning::UnfulfillableClassPicks {
            class_id: "wizard".into(),
            kind: FeatureKind::Talent,
            required: 1,
            available: 0,
        }));
    }

    #[test]
    fn deserialization_validates() {
        let duplicate = r#"{
            "classes": [
                {"id": "wizard", "name": "Wizard", "picks": {}},
                {"id": "wizard", "name": "Wizard again", "picks": {}}
            ]
        }"#;
        assert!(serde_json::from_str::<Catalog>(duplicate).is_err());

        let unknown_class = r#"{
            "features": [
                {"id": "f", "classId": "bard", "kind": "talent", "name": "F", "usage": "passive"}
            ]
        }"#;
        assert!(serde_json::from_str::<Catalog>(unknown_class).is_err());

        let fine = r#"{
            "classes": [{"id": "bard", "name": "Bard", "picks": {"talents": 1}}],
            "features": [
                {"id": "f", "classId": "bard", "kind": "talent", "name": "F", "usage": "Passive"}
            ],
            "feats": [
                {"id": "feat-f", "classId": "bard", "tier": "Adventurer", "name": "F feat", "requiresFeatureId": "f"}
            ]
        }"#;
        let catalog: Catalog = serde_json::from_str(fine).unwrap();
        assert!(catalog.lint().is_empty());
    }

    #[test]
    fn features_for_filters_by_class_and_kind() {
        let core = Catalog::core();
        let maneuvers: Vec<_> = core
            .features_for("fighter", FeatureKind::Maneuver)
            .map(|f| f.id.as_str())
            .collect();
        assert!(maneuvers.contains(&"ftr-power-cleave"));
        assert!(core
            .features_for("fighter", FeatureKind::Maneuver)
            .all(|f| f.class_id == "fighter" && f.kind == FeatureKind::Maneuver));
    }

    #[test]
    fn kin_power_lookup_returns_owner() {
        let core = Catalog::core();
        let (kin, power) = core.kin_power("human-resourceful").unwrap();
        assert_eq!(kin.id, "human");
        assert_eq!(power.id, "human-resourceful");
        assert!(core.kin_power("nope").is_none());
    }
}
