//! Supplier x user flow tables at the canonical level.

use std::collections::BTreeMap;

use log::debug;

use crate::crosswalk::Crosswalk;
use crate::data::{RawFlow, VintageId};
use crate::domain::IndustryCode;
use crate::error::Result;

/// Nominal inter-industry flows for one year, summed to canonical codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowTable {
    pub year: i32,
    pub flows: BTreeMap<(IndustryCode, IndustryCode), f64>,
}

impl FlowTable {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            flows: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, supplier: IndustryCode, user: IndustryCode, value: f64) {
        *self.flows.entry((supplier, user)).or_default() += value;
    }

    pub fn get(&self, supplier: IndustryCode, user: IndustryCode) -> f64 {
        self.flows.get(&(supplier, user)).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.flows.values().sum()
    }
}

/// Canonicalize a raw flow table and sum it to one [`FlowTable`] per year.
///
/// Drop rules apply to each raw code before aggregation, so a dropped parent
/// never takes its children with it. Blank cells count as zero.
pub fn aggregate_flows(raw: &[RawFlow], vintage: VintageId) -> Result<Vec<FlowTable>> {
    let descriptor = vintage.descriptor();
    let mut crosswalk = Crosswalk::new(vintage);
    let mut by_year: BTreeMap<i32, FlowTable> = BTreeMap::new();
    let (mut dropped, mut out_of_range) = (0usize, 0usize);

    for flow in raw {
        if !descriptor.covers(flow.year) {
            out_of_range += 1;
            continue;
        }
        let supplier = crosswalk.resolve_industry(&flow.supplier)?;
        let user = crosswalk.resolve_industry(&flow.user)?;
        let (Some(supplier), Some(user)) = (supplier, user) else {
            dropped += 1;
            continue;
        };
        by_year
            .entry(flow.year)
            .or_insert_with(|| FlowTable::new(flow.year))
            .add(supplier, user, flow.value.unwrap_or(0.0));
    }

    debug!(
        "{vintage}: dropped {dropped} flow cells ({} distinct labels), {out_of_range} outside {}-{}",
        crosswalk.dropped().len(),
        descriptor.first_year,
        descriptor.last_year
    );
    Ok(by_year.into_values().collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::domain::CANADA_BUSINESS_SECTOR;
    use crate::error::DecompError;

    fn code(s: &str) -> IndustryCode {
        CANADA_BUSINESS_SECTOR.lookup(s).unwrap()
    }

    #[test]
    fn many_to_one_codes_are_summed() {
        let raw = vec![
            RawFlow::new("BS441000", "BS23A000", 2011, 1.0),
            RawFlow::new("BS452000", "BS23B000", 2011, 2.0),
            RawFlow::new("BS4A0000", "BS23C000", 2011, 3.0),
            RawFlow::new("BS441000", "BS551113", 2011, 100.0),
            RawFlow::new("GS911000", "BS441000", 2011, 100.0),
            RawFlow::new("BS441000", "BS441000", 2012, 5.0),
        ];
        let tables = aggregate_flows(&raw, VintageId::CanSymmetric2010).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].year, 2011);
        assert_abs_diff_eq!(tables[0].get(code("44-45"), code("23")), 6.0);
        assert_abs_diff_eq!(tables[0].total(), 6.0);
        assert_abs_diff_eq!(tables[1].get(code("44-45"), code("44-45")), 5.0);
    }

    #[test]
    fn blank_cells_are_zero_and_unknown_codes_fail() {
        let mut blank = RawFlow::new("1130", "1140", 2000, 0.0);
        blank.value = None;
        let tables = aggregate_flows(&[blank], VintageId::CanSymmetric1997).unwrap();
        assert_eq!(tables[0].total(), 0.0);

        let err = aggregate_flows(
            &[RawFlow::new("1130", "ZZZZ", 2000, 1.0)],
            VintageId::CanSymmetric1997,
        )
        .unwrap_err();
        assert!(matches!(err, DecompError::UnmappedCode { .. }));
    }
}
