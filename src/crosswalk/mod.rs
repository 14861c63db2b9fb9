//! Classification crosswalk: raw source labels -> canonical industry codes.
//!
//! Resolution follows the vintage's [`CrosswalkRules`] in a fixed order:
//!
//! 1. extract the code from the label (verbatim or from a `[...]` suffix)
//! 2. drop codes outside the business-sector universe prefix
//! 3. drop codes on the exact / prefix drop lists (raw code, before aggregation)
//! 4. truncate to the aggregation level
//! 5. look the key up in the vintage table, or pass it through if it is
//!    already a canonical code and the vintage allows that
//!
//! Anything left over is an [`DecompError::UnmappedCode`]: nothing is dropped
//! silently.

use std::collections::HashMap;
use std::fmt;

use log::warn;

use crate::data::{CodeExtraction, CrosswalkRules, Target, VintageDescriptor, VintageId};
use crate::domain::IndustryCode;
use crate::error::{DecompError, Result};

/// Outcome of resolving one raw label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    Industry(IndustryCode),
    /// A make/use pseudo-industry, handled by the make/use preprocessing.
    Fictive(&'static str),
    Dropped(DropReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    OutsideUniverse,
    DropList,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::OutsideUniverse => f.write_str("outside business-sector universe"),
            DropReason::DropList => f.write_str("on drop list"),
        }
    }
}

/// A one-to-many table entry. The whole value is booked to `assigned`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitEntry {
    pub label: &'static str,
    pub assigned: &'static str,
    pub also: &'static [&'static str],
}

/// Resolve a single raw label for `vintage`.
pub fn canonicalize(raw: &str, vintage: VintageId) -> Result<Mapping> {
    resolve(raw, vintage.descriptor())
}

/// Per-vintage resolver that memoizes labels, so each distinct label is
/// looked up (and any split warning logged) once per table.
#[derive(Debug)]
pub struct Crosswalk {
    descriptor: &'static VintageDescriptor,
    resolved: HashMap<String, Mapping>,
}

impl Crosswalk {
    pub fn new(vintage: VintageId) -> Self {
        Self {
            descriptor: vintage.descriptor(),
            resolved: HashMap::new(),
        }
    }

    pub fn vintage(&self) -> VintageId {
        self.descriptor.id
    }

    pub fn resolve(&mut self, raw: &str) -> Result<Mapping> {
        if let Some(mapping) = self.resolved.get(raw) {
            return Ok(*mapping);
        }
        let mapping = resolve(raw, self.descriptor)?;
        self.resolved.insert(raw.to_string(), mapping);
        Ok(mapping)
    }

    /// Like [`Crosswalk::resolve`] but only accepts real industries; fictive
    /// pseudo-industries are an error outside make/use tables.
    pub fn resolve_industry(&mut self, raw: &str) -> Result<Option<IndustryCode>> {
        match self.resolve(raw)? {
            Mapping::Industry(code) => Ok(Some(code)),
            Mapping::Dropped(_) => Ok(None),
            Mapping::Fictive(label) => Err(DecompError::invalid(format!(
                "fictive industry {label} ('{raw}') in a {} table that cannot carry it",
                self.descriptor.id
            ))),
        }
    }

    /// Distinct labels dropped so far, with the reason.
    pub fn dropped(&self) -> Vec<(&str, DropReason)> {
        let mut out: Vec<_> = self
            .resolved
            .iter()
            .filter_map(|(label, m)| match m {
                Mapping::Dropped(reason) => Some((label.as_str(), *reason)),
                _ => None,
            })
            .collect();
        out.sort_unstable_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// The vintage's one-to-many approximations.
    pub fn splits(&self) -> Vec<SplitEntry> {
        splits(self.descriptor.id)
    }
}

pub fn splits(vintage: VintageId) -> Vec<SplitEntry> {
    vintage
        .descriptor()
        .crosswalk
        .table
        .iter()
        .filter_map(|(label, target)| match *target {
            Target::Split { assigned, also } => Some(SplitEntry {
                label: *label,
                assigned,
                also,
            }),
            _ => None,
        })
        .collect()
}

fn resolve(raw: &str, descriptor: &VintageDescriptor) -> Result<Mapping> {
    let rules = &descriptor.crosswalk;
    let unmapped = || DecompError::UnmappedCode {
        vintage: descriptor.id,
        code: raw.to_string(),
    };

    let code = extract(raw.trim(), rules.extract);

    if let Some(prefix) = rules.universe_prefix {
        if !code.starts_with(prefix) {
            return Ok(Mapping::Dropped(DropReason::OutsideUniverse));
        }
    }
    if is_dropped(code, rules) {
        return Ok(Mapping::Dropped(DropReason::DropList));
    }

    let key = match rules.truncate {
        Some((start, end)) => code.get(start..end).ok_or_else(unmapped)?,
        None => code,
    };

    if let Some((_, target)) = rules.table.iter().find(|(k, _)| *k == key) {
        return match *target {
            Target::Industry(canonical) => canonical_code(descriptor, canonical).map(Mapping::Industry),
            Target::Split { assigned, also } => {
                warn!(
                    "{}: '{}' spans {} and {:?}; booking the whole value to {}",
                    descriptor.id, raw, assigned, also, assigned
                );
                canonical_code(descriptor, assigned).map(Mapping::Industry)
            }
            Target::Fictive(label) => Ok(Mapping::Fictive(label)),
        };
    }

    if rules.passthrough {
        if let Some(code) = descriptor.scheme.lookup(key) {
            return Ok(Mapping::Industry(code));
        }
    }

    Err(unmapped())
}

fn extract(label: &str, how: CodeExtraction) -> &str {
    match how {
        CodeExtraction::AsIs => label,
        CodeExtraction::BracketSuffix => label
            .rfind('[')
            .and_then(|open| {
                let inner = &label[open + 1..];
                inner.find(']').map(|close| inner[..close].trim())
            })
            .unwrap_or(label),
    }
}

fn is_dropped(code: &str, rules: &CrosswalkRules) -> bool {
    rules.drop_exact.iter().any(|d| *d == code) || rules.drop_prefix.iter().any(|p| code.starts_with(p))
}

fn canonical_code(descriptor: &VintageDescriptor, code: &str) -> Result<IndustryCode> {
    descriptor.scheme.lookup(code).ok_or_else(|| {
        DecompError::invalid(format!(
            "{} table targets '{code}', which is not in {}",
            descriptor.id, descriptor.scheme.name
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn industry(raw: &str, vintage: VintageId) -> &'static str {
        match canonicalize(raw, vintage).unwrap() {
            Mapping::Industry(code) => code.as_str(),
            other => panic!("{raw}: expected an industry, got {other:?}"),
        }
    }

    #[test]
    fn productivity_labels_map_verbatim() {
        let v = VintageId::CanProductivity;
        assert_eq!(industry("Retail trade [44-45]", v), "44-45");
        assert_eq!(industry("  Crop and animal production ", v), "111-112");
        assert_eq!(
            canonicalize("Manufacturing [31-33]", v).unwrap(),
            Mapping::Dropped(DropReason::DropList)
        );
    }

    #[test]
    fn bs_codes_truncate_then_aggregate_or_pass_through() {
        let v = VintageId::CanSymmetric2010;
        assert_eq!(industry("BS441000", v), "44-45");
        assert_eq!(industry("BS211110", v), "211");
        assert_eq!(
            canonicalize("BS551113", v).unwrap(),
            Mapping::Dropped(DropReason::DropList)
        );
        assert_eq!(
            canonicalize("GS911000", v).unwrap(),
            Mapping::Dropped(DropReason::OutsideUniverse)
        );
    }

    #[test]
    fn supply_use_labels_use_the_bracketed_code() {
        let v = VintageId::CanSupplyUse2013;
        assert_eq!(industry("Retail trade [BS4A0000]", v), "44-45");
        assert_eq!(
            canonicalize("Education services [BS610000]", v).unwrap(),
            Mapping::Dropped(DropReason::DropList)
        );
        assert_eq!(
            canonicalize("Government sector [GS000000]", v).unwrap(),
            Mapping::Dropped(DropReason::OutsideUniverse)
        );
    }

    #[test]
    fn unknown_codes_are_errors_not_drops() {
        let err = canonicalize("9999", VintageId::CanSymmetric1997).unwrap_err();
        assert!(matches!(
            err,
            DecompError::UnmappedCode { vintage: VintageId::CanSymmetric1997, ref code } if code == "9999"
        ));
        assert!(canonicalize("BS999000", VintageId::CanSymmetric2009).is_err());
    }

    #[test]
    fn fictive_industries_resolve_to_their_label() {
        let m = canonicalize("Transportation margins", VintageId::CanMakeUse1961).unwrap();
        assert_eq!(m, Mapping::Fictive("FC2"));

        let mut cw = Crosswalk::new(VintageId::CanMakeUse1961);
        assert!(cw.resolve_industry("Transportation margins").is_err());
        assert_eq!(
            cw.resolve_industry("Government education services").unwrap(),
            None
        );
        assert_eq!(cw.dropped().len(), 1);
    }

    #[test]
    fn splits_book_everything_to_the_assigned_code() {
        assert_eq!(
            industry("Business services", VintageId::UsValueAdded1947),
            "54"
        );
        let us_splits = splits(VintageId::UsValueAdded1947);
        assert_eq!(us_splits.len(), 4);
        assert!(us_splits.iter().any(|s| s.label == "Printing and publishing" && s.also == ["51"]));
        assert!(splits(VintageId::CanProductivity).is_empty());
    }

    #[test]
    fn every_table_key_resolves() {
        for id in VintageId::ALL {
            let d = id.descriptor();
            let mut cw = Crosswalk::new(id);
            for (key, _) in d.crosswalk.table {
                // Rebuild a raw label that yields `key` after extraction/truncation.
                let raw = match (d.crosswalk.universe_prefix, d.crosswalk.extract) {
                    (Some(prefix), CodeExtraction::BracketSuffix) => format!("Label [{prefix}{key}000]"),
                    (Some(prefix), CodeExtraction::AsIs) => format!("{prefix}{key}000"),
                    (None, _) => key.to_string(),
                };
                let mapping = cw.resolve(&raw).unwrap();
                assert!(
                    !matches!(mapping, Mapping::Dropped(_)),
                    "{id}: {raw} dropped"
                );
            }
        }
    }
}
