//! Catalog entities - kin, classes, features and feats
//!
//! These are plain data records. Cross-table consistency is checked when a
//! [`Catalog`](crate::catalog::Catalog) is assembled from them.

mod class;
mod feat;
mod feature;
mod kin;

pub use class::{ClassDef, ClassPicks};
pub use feat::{FeatDef, FeatTier};
pub use feature::{FeatureDef, FeatureKind, FeatureUsage};
pub use kin::{KinDef, KinFeatGrant, KinPower, KinPowerUsage, RulesHook};
