//! Subscription plan catalog and entitlement queries
//!
//! The catalog is a closed set of six tiers ordered by ascending duration.
//! It is built once at startup (compiled defaults or a TOML override) and
//! never mutated afterwards; concurrent reads need no locking. Replacing
//! the catalog means building a new registry, never editing in place.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Feature carried by every tier
pub const FEATURE_LYRIC_GENERATION: &str = "lyric_generation";
/// Feature gating the richer generation path (quarterly and longer)
pub const FEATURE_ADVANCED_GENERATION: &str = "advanced_generation";
/// Support feature for the annual tiers
pub const FEATURE_PRIORITY_SUPPORT: &str = "priority_support";

/// Subscription tier identifier
///
/// Closed set; there is no dynamic tier creation. Serialized snake_case
/// to match the wire format (`bi_weekly`, `monthly`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    BiWeekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    BiAnnually,
}

impl PlanId {
    /// All tiers in ascending duration order
    pub const ALL: [PlanId; 6] = [
        PlanId::BiWeekly,
        PlanId::Monthly,
        PlanId::Quarterly,
        PlanId::SemiAnnually,
        PlanId::Annually,
        PlanId::BiAnnually,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::BiWeekly => "bi_weekly",
            PlanId::Monthly => "monthly",
            PlanId::Quarterly => "quarterly",
            PlanId::SemiAnnually => "semi_annually",
            PlanId::Annually => "annually",
            PlanId::BiAnnually => "bi_annually",
        }
    }

    pub fn parse(s: &str) -> Option<PlanId> {
        PlanId::ALL.iter().copied().find(|id| id.as_str() == s)
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subscription tier: price, duration, and unlocked features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDefinition {
    pub id: PlanId,
    pub price_cents: u32,
    pub duration_days: u32,
    pub features: BTreeSet<String>,
}

impl PlanDefinition {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

/// Immutable plan catalog
///
/// Owns the `PlanDefinition` catalog for the process lifetime and answers
/// entitlement queries. `grants` fails closed: unknown plan ids grant
/// nothing and never error.
#[derive(Debug, Clone)]
pub struct PlanRegistry {
    plans: Vec<PlanDefinition>,
}

impl PlanRegistry {
    /// Build a registry from a catalog override
    ///
    /// The catalog must contain each of the six tiers exactly once; it is
    /// reordered to the canonical ascending-duration order.
    pub fn from_catalog(mut plans: Vec<PlanDefinition>) -> Result<Self> {
        if plans.len() != PlanId::ALL.len() {
            return Err(Error::Config(format!(
                "plan catalog must define exactly {} tiers, got {}",
                PlanId::ALL.len(),
                plans.len()
            )));
        }

        plans.sort_by_key(|p| p.duration_days);

        for expected in PlanId::ALL {
            if !plans.iter().any(|p| p.id == expected) {
                return Err(Error::Config(format!(
                    "plan catalog is missing tier '{}'",
                    expected
                )));
            }
        }

        Ok(Self { plans })
    }

    /// Plans in fixed ascending-duration order (stable)
    pub fn list(&self) -> &[PlanDefinition] {
        &self.plans
    }

    /// Look up a plan by its wire id
    pub fn get(&self, id: &str) -> Result<&PlanDefinition> {
        PlanId::parse(id)
            .and_then(|parsed| self.plans.iter().find(|p| p.id == parsed))
            .ok_or_else(|| Error::PlanNotFound(id.to_string()))
    }

    /// Does the named plan include the named feature?
    ///
    /// Returns false for unknown plan ids (fails closed).
    pub fn grants(&self, id: &str, feature: &str) -> bool {
        self.get(id).map(|p| p.has_feature(feature)).unwrap_or(false)
    }
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self {
            plans: default_catalog(),
        }
    }
}

fn features(advanced: bool, priority: bool) -> BTreeSet<String> {
    let mut set = BTreeSet::new();
    set.insert(FEATURE_LYRIC_GENERATION.to_string());
    if advanced {
        set.insert(FEATURE_ADVANCED_GENERATION.to_string());
    }
    if priority {
        set.insert(FEATURE_PRIORITY_SUPPORT.to_string());
    }
    set
}

/// Compiled-in catalog: six tiers, ascending duration
fn default_catalog() -> Vec<PlanDefinition> {
    vec![
        PlanDefinition {
            id: PlanId::BiWeekly,
            price_cents: 1500,
            duration_days: 14,
            features: features(false, false),
        },
        PlanDefinition {
            id: PlanId::Monthly,
            price_cents: 3000,
            duration_days: 30,
            features: features(false, false),
        },
        PlanDefinition {
            id: PlanId::Quarterly,
            price_cents: 8000,
            duration_days: 90,
            features: features(true, false),
        },
        PlanDefinition {
            id: PlanId::SemiAnnually,
            price_cents: 15000,
            duration_days: 180,
            features: features(true, false),
        },
        PlanDefinition {
            id: PlanId::Annually,
            price_cents: 28000,
            duration_days: 365,
            features: features(true, true),
        },
        PlanDefinition {
            id: PlanId::BiAnnually,
            price_cents: 50000,
            duration_days: 730,
            features: features(true, true),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_six_tiers_ascending() {
        let registry = PlanRegistry::default();
        let plans = registry.list();

        assert_eq!(plans.len(), 6);

        let ids: Vec<PlanId> = plans.iter().map(|p| p.id).collect();
        assert_eq!(ids, PlanId::ALL);

        let durations: Vec<u32> = plans.iter().map(|p| p.duration_days).collect();
        assert_eq!(durations, vec![14, 30, 90, 180, 365, 730]);
    }

    #[test]
    fn get_known_plan() {
        let registry = PlanRegistry::default();
        let plan = registry.get("quarterly").unwrap();
        assert_eq!(plan.id, PlanId::Quarterly);
        assert_eq!(plan.price_cents, 8000);
    }

    #[test]
    fn get_unknown_plan_fails() {
        let registry = PlanRegistry::default();
        match registry.get("weekly") {
            Err(Error::PlanNotFound(id)) => assert_eq!(id, "weekly"),
            other => panic!("expected PlanNotFound, got {other:?}"),
        }
    }

    #[test]
    fn grants_fails_closed_for_unknown_plan() {
        let registry = PlanRegistry::default();
        assert!(!registry.grants("nonexistent_plan", FEATURE_LYRIC_GENERATION));
        assert!(!registry.grants("", FEATURE_ADVANCED_GENERATION));
    }

    #[test]
    fn advanced_generation_gated_by_tier() {
        let registry = PlanRegistry::default();
        assert!(!registry.grants("bi_weekly", FEATURE_ADVANCED_GENERATION));
        assert!(!registry.grants("monthly", FEATURE_ADVANCED_GENERATION));
        assert!(registry.grants("quarterly", FEATURE_ADVANCED_GENERATION));
        assert!(registry.grants("semi_annually", FEATURE_ADVANCED_GENERATION));
        assert!(registry.grants("annually", FEATURE_ADVANCED_GENERATION));
        assert!(registry.grants("bi_annually", FEATURE_ADVANCED_GENERATION));
    }

    #[test]
    fn every_tier_grants_lyric_generation() {
        let registry = PlanRegistry::default();
        for id in PlanId::ALL {
            assert!(registry.grants(id.as_str(), FEATURE_LYRIC_GENERATION));
        }
    }

    #[test]
    fn catalog_override_reordered_to_ascending_duration() {
        let mut plans = default_catalog();
        plans.reverse();
        let registry = PlanRegistry::from_catalog(plans).unwrap();
        let ids: Vec<PlanId> = registry.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, PlanId::ALL);
    }

    #[test]
    fn catalog_override_rejects_missing_tier() {
        let mut plans = default_catalog();
        plans.pop();
        assert!(PlanRegistry::from_catalog(plans).is_err());
    }

    #[test]
    fn catalog_override_rejects_duplicate_tier() {
        let mut plans = default_catalog();
        plans[0] = plans[1].clone();
        assert!(PlanRegistry::from_catalog(plans).is_err());
    }

    #[test]
    fn plan_id_wire_format() {
        assert_eq!(PlanId::parse("semi_annually"), Some(PlanId::SemiAnnually));
        assert_eq!(PlanId::parse("SemiAnnually"), None);
        assert_eq!(
            serde_json::to_string(&PlanId::BiAnnually).unwrap(),
            "\"bi_annually\""
        );
    }
}
