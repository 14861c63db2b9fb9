//! Vintage identifiers and descriptors.
//!
//! A vintage is one historical source regime. Everything that differs between
//! regimes (code tables, drop lists, scale factors, table shape) is carried by
//! its [`VintageDescriptor`] so the pipeline itself stays regime-agnostic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::{bea, statcan};
use crate::domain::CodeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VintageId {
    /// Industry productivity accounts, 1961-2019.
    CanProductivity,
    /// Make/use tables with free-text industry names, 1961-2008.
    CanMakeUse1961,
    /// Symmetric IO tables with 4-character codes, 1997-2008.
    CanSymmetric1997,
    CanSymmetric2009,
    CanSymmetric2010,
    /// Supply-use flows with bracketed `BS` codes, 2013-2019.
    CanSupplyUse2013,
    /// US value added by 1972 SIC industry titles, 1947-1987.
    UsValueAdded1947,
    /// US summary make/use tables before redefinitions, 1963-1996.
    UsMakeUse1963,
}

impl VintageId {
    pub const ALL: [VintageId; 8] = [
        VintageId::CanProductivity,
        VintageId::CanMakeUse1961,
        VintageId::CanSymmetric1997,
        VintageId::CanSymmetric2009,
        VintageId::CanSymmetric2010,
        VintageId::CanSupplyUse2013,
        VintageId::UsValueAdded1947,
        VintageId::UsMakeUse1963,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VintageId::CanProductivity => "can-productivity",
            VintageId::CanMakeUse1961 => "can-make-use-1961",
            VintageId::CanSymmetric1997 => "can-symmetric-1997",
            VintageId::CanSymmetric2009 => "can-symmetric-2009",
            VintageId::CanSymmetric2010 => "can-symmetric-2010",
            VintageId::CanSupplyUse2013 => "can-supply-use-2013",
            VintageId::UsValueAdded1947 => "us-value-added-1947",
            VintageId::UsMakeUse1963 => "us-make-use-1963",
        }
    }

    pub fn descriptor(self) -> &'static VintageDescriptor {
        match self {
            VintageId::CanProductivity => &statcan::PRODUCTIVITY,
            VintageId::CanMakeUse1961 => &statcan::MAKE_USE_1961,
            VintageId::CanSymmetric1997 => &statcan::SYMMETRIC_1997,
            VintageId::CanSymmetric2009 => &statcan::SYMMETRIC_2009,
            VintageId::CanSymmetric2010 => &statcan::SYMMETRIC_2010,
            VintageId::CanSupplyUse2013 => &statcan::SUPPLY_USE_2013,
            VintageId::UsValueAdded1947 => &bea::VALUE_ADDED_1947,
            VintageId::UsMakeUse1963 => &bea::MAKE_USE_1963,
        }
    }
}

impl fmt::Display for VintageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a crosswalk table entry resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Industry(&'static str),
    /// The raw category spans several canonical codes; the whole value is
    /// booked to `assigned`.
    Split {
        assigned: &'static str,
        also: &'static [&'static str],
    },
    /// A make/use pseudo-industry that is removed or reallocated later.
    Fictive(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeExtraction {
    /// Use the raw label verbatim (after trimming).
    AsIs,
    /// Use the text inside the last `[...]` of the label.
    BracketSuffix,
}

/// Label -> canonical code rules, applied in field order.
#[derive(Debug)]
pub struct CrosswalkRules {
    pub extract: CodeExtraction,
    /// Codes outside the business-sector universe are dropped.
    pub universe_prefix: Option<&'static str>,
    /// Parent aggregates and out-of-scope rows, matched on the raw code.
    pub drop_exact: &'static [&'static str],
    pub drop_prefix: &'static [&'static str],
    /// Keep `code[start..end]` before the table lookup.
    pub truncate: Option<(usize, usize)>,
    pub table: &'static [(&'static str, Target)],
    /// A (truncated) code that is already canonical maps to itself.
    pub passthrough: bool,
}

/// Source variable names for one industry accounts vintage.
#[derive(Debug)]
pub struct VariableMap {
    pub value_added: &'static str,
    pub accounts: Option<AccountVariables>,
}

#[derive(Debug)]
pub struct AccountVariables {
    pub tfp: &'static str,
    pub capital: &'static str,
    pub labor: &'static str,
    pub capital_cost: &'static str,
    pub labor_cost: &'static str,
    pub gross_output: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FictiveTreatment {
    /// Drop the pseudo-industry from both tables.
    Remove,
    /// Spread every purchase of its output commodity over its own inputs.
    Reallocate,
}

#[derive(Debug)]
pub struct FictiveRule {
    pub label: &'static str,
    pub treatment: FictiveTreatment,
}

/// Commodity-side preprocessing for make/use vintages.
#[derive(Debug)]
pub struct MakeUseRules {
    pub drop_commodities: &'static [&'static str],
    /// `(from, to)` recodes applied to the use table only, then re-summed.
    pub use_recodes: &'static [(&'static str, &'static str)],
    /// Processed in order.
    pub fictive: &'static [FictiveRule],
    /// Drop commodities present in only one table (otherwise zero-fill).
    pub drop_unmatched_commodities: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// Industry x year x variable accounts.
    IndustryAccounts,
    /// Supplier x user flows.
    Flows,
    /// Separate make and use tables.
    MakeUse,
}

#[derive(Debug)]
pub struct VintageDescriptor {
    pub id: VintageId,
    pub first_year: i32,
    pub last_year: i32,
    pub scheme: &'static CodeSet,
    pub shape: TableShape,
    pub crosswalk: CrosswalkRules,
    /// Factor costs and sales are multiplied by this to match flow units.
    pub cost_scale: f64,
    pub variables: Option<VariableMap>,
    pub make_use: Option<MakeUseRules>,
}

impl VintageDescriptor {
    pub fn covers(&self, year: i32) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first_year..=self.last_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors_agree_with_their_ids() {
        for id in VintageId::ALL {
            let d = id.descriptor();
            assert_eq!(d.id, id);
            assert!(d.first_year <= d.last_year, "{id}");
            assert!(d.cost_scale > 0.0);
            assert_eq!(d.make_use.is_some(), d.shape == TableShape::MakeUse, "{id}");
        }
    }

    #[test]
    fn every_table_target_is_canonical_or_fictive() {
        for id in VintageId::ALL {
            let d = id.descriptor();
            for (label, target) in d.crosswalk.table {
                match target {
                    Target::Industry(code) => {
                        assert!(d.scheme.lookup(code).is_some(), "{id}: {label} -> {code}")
                    }
                    Target::Split { assigned, also } => {
                        assert!(d.scheme.lookup(assigned).is_some(), "{id}: {label}");
                        assert!(!also.is_empty());
                    }
                    Target::Fictive(_) => assert_eq!(d.shape, TableShape::MakeUse, "{id}"),
                }
            }
        }
    }

    #[test]
    fn ids_serialize_in_kebab_case() {
        assert_eq!(VintageId::CanSupplyUse2013.to_string(), "can-supply-use-2013");
        assert!(VintageId::CanSymmetric1997.descriptor().covers(2008));
        assert!(!VintageId::CanSymmetric1997.descriptor().covers(2009));
    }
}
