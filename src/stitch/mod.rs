//! Concatenating per-vintage outputs into one continuous series.
//!
//! Each year is taken from exactly one vintage. Where vintages overlap the
//! newer one (later first year) wins; ties fall back to the later last year,
//! then the vintage name. Values are never summed or averaged across
//! vintages. A vintage supplying the same year and key twice, within one
//! part or across two parts, is an error.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use log::info;

use crate::data::VintageId;
use crate::domain::{DecompositionRow, DomarWeightVector, IndustryCode, IndustryObservation};
use crate::error::{DecompError, Result};

/// A record that belongs to one year and, within it, sorts by a key.
pub trait Stitchable {
    type Key: Ord;

    fn year(&self) -> i32;
    fn key(&self) -> Self::Key;
}

impl Stitchable for IndustryObservation {
    type Key = IndustryCode;

    fn year(&self) -> i32 {
        self.year
    }

    fn key(&self) -> IndustryCode {
        self.industry
    }
}

impl Stitchable for DomarWeightVector {
    type Key = ();

    fn year(&self) -> i32 {
        self.year
    }

    fn key(&self) {}
}

impl Stitchable for DecompositionRow {
    type Key = ();

    fn year(&self) -> i32 {
        self.year
    }

    fn key(&self) {}
}

/// Output of one vintage run.
#[derive(Debug, Clone)]
pub struct VintagePart<T> {
    pub vintage: VintageId,
    pub items: Vec<T>,
}

impl<T> VintagePart<T> {
    pub fn new(vintage: VintageId, items: Vec<T>) -> Self {
        Self { vintage, items }
    }
}

/// A stitched series and the vintage each year came from.
#[derive(Debug, Clone)]
pub struct Stitched<T> {
    pub items: Vec<T>,
    pub provenance: BTreeMap<i32, VintageId>,
}

impl<T> Stitched<T> {
    pub fn source(&self, year: i32) -> Option<VintageId> {
        self.provenance.get(&year).copied()
    }
}

/// Stitch parts into one series ordered by year, then key.
pub fn stitch<T: Stitchable>(parts: Vec<VintagePart<T>>) -> Result<Stitched<T>> {
    let mut parts: Vec<(usize, VintagePart<T>)> = parts.into_iter().enumerate().collect();
    parts.sort_by_key(|(_, p)| {
        let d = p.vintage.descriptor();
        (Reverse(d.first_year), Reverse(d.last_year), p.vintage.as_str())
    });

    // year -> (vintage, part index)
    let mut claimed: BTreeMap<i32, (VintageId, usize)> = BTreeMap::new();
    let mut items = Vec::new();
    let mut overridden: BTreeMap<VintageId, usize> = BTreeMap::new();

    for (index, part) in parts {
        let mut seen = BTreeSet::new();
        for item in &part.items {
            if !seen.insert((item.year(), item.key())) {
                return Err(DecompError::VintageCollision {
                    year: item.year(),
                    vintage: part.vintage,
                });
            }
        }
        let years: BTreeSet<i32> = seen.into_iter().map(|(year, _)| year).collect();
        let mut fresh = BTreeSet::new();
        for year in years {
            match claimed.get(&year) {
                Some(&(vintage, other)) if vintage == part.vintage && other != index => {
                    return Err(DecompError::VintageCollision { year, vintage });
                }
                Some(_) => *overridden.entry(part.vintage).or_default() += 1,
                None => {
                    claimed.insert(year, (part.vintage, index));
                    fresh.insert(year);
                }
            }
        }
        items.extend(part.items.into_iter().filter(|i| fresh.contains(&i.year())));
    }

    for (vintage, years) in &overridden {
        info!("stitch: {years} overlapping years of {vintage} superseded by newer vintages");
    }

    items.sort_by(|a, b| a.year().cmp(&b.year()).then_with(|| a.key().cmp(&b.key())));
    Ok(Stitched {
        items,
        provenance: claimed.into_iter().map(|(y, (v, _))| (y, v)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(years: std::ops::RangeInclusive<i32>, capital: f64) -> Vec<DomarWeightVector> {
        years
            .map(|year| DomarWeightVector {
                year,
                industries: Vec::new(),
                capital,
                labor: 1.0 - capital,
                wedge: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn newer_vintage_wins_overlap() {
        let stitched = stitch(vec![
            VintagePart::new(VintageId::CanSymmetric1997, weights(1997..=2008, 0.4)),
            VintagePart::new(VintageId::CanMakeUse1961, weights(1961..=2008, 0.3)),
            VintagePart::new(VintageId::CanSymmetric2009, weights(2009..=2009, 0.5)),
        ])
        .unwrap();

        assert_eq!(stitched.items.len(), 2009 - 1961 + 1);
        assert!(stitched.items.windows(2).all(|w| w[1].year == w[0].year + 1));
        assert_eq!(stitched.source(1996), Some(VintageId::CanMakeUse1961));
        assert_eq!(stitched.source(1997), Some(VintageId::CanSymmetric1997));
        assert_eq!(stitched.source(2009), Some(VintageId::CanSymmetric2009));
        let y2000 = stitched.items.iter().find(|w| w.year == 2000).unwrap();
        assert_eq!(y2000.capital, 0.4);
    }

    #[test]
    fn same_vintage_twice_is_a_collision() {
        let err = stitch(vec![
            VintagePart::new(VintageId::CanSymmetric2010, weights(2010..=2011, 0.4)),
            VintagePart::new(VintageId::CanSymmetric2010, weights(2011..=2012, 0.4)),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            DecompError::VintageCollision {
                year: 2011,
                vintage: VintageId::CanSymmetric2010
            }
        ));
    }

    #[test]
    fn repeated_year_within_one_part_is_a_collision() {
        let mut items = weights(2010..=2012, 0.3);
        items.insert(2, weights(2011..=2011, 0.9).remove(0));
        let err = stitch(vec![VintagePart::new(VintageId::CanSymmetric2010, items)]).unwrap_err();
        assert!(matches!(
            err,
            DecompError::VintageCollision {
                year: 2011,
                vintage: VintageId::CanSymmetric2010
            }
        ));
    }

    #[test]
    fn observations_sort_by_year_then_industry() {
        use crate::panel::fixtures::obs;

        let stitched = stitch(vec![VintagePart::new(
            VintageId::CanProductivity,
            vec![
                obs("312", 2001, 1.0, 1.0),
                obs("311", 2001, 1.0, 1.0),
                obs("312", 2000, 1.0, 1.0),
            ],
        )])
        .unwrap();
        let order: Vec<(i32, &str)> = stitched
            .items
            .iter()
            .map(|o| (o.year, o.industry.as_str()))
            .collect();
        assert_eq!(order, vec![(2000, "312"), (2001, "311"), (2001, "312")]);
    }
}
