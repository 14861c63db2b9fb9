//! Raw long-format tables as handed over by the retrieval layer.
//!
//! Nothing here is canonicalized yet: labels are whatever the source printed,
//! values may be missing (non-numeric cells), and dates may be full dates or
//! bare years.

use chrono::{Datelike, NaiveDate};

/// The time stamp of a raw observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Year(i32),
    Date(NaiveDate),
}

impl Period {
    pub fn year(self) -> i32 {
        match self {
            Period::Year(y) => y,
            Period::Date(d) => d.year(),
        }
    }
}

impl From<NaiveDate> for Period {
    fn from(date: NaiveDate) -> Self {
        Period::Date(date)
    }
}

impl From<i32> for Period {
    fn from(year: i32) -> Self {
        Period::Year(year)
    }
}

/// One `(label, period, variable, value)` cell of an industry accounts table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    pub label: String,
    pub period: Period,
    pub variable: String,
    pub value: Option<f64>,
}

impl RawObservation {
    pub fn new(
        label: impl Into<String>,
        period: impl Into<Period>,
        variable: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            label: label.into(),
            period: period.into(),
            variable: variable.into(),
            value: Some(value),
        }
    }
}

/// One supplier -> user cell of a symmetric or supply-use flow table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFlow {
    pub supplier: String,
    pub user: String,
    pub year: i32,
    /// `None` for blank or non-numeric cells; treated as a zero flow.
    pub value: Option<f64>,
}

impl RawFlow {
    pub fn new(supplier: impl Into<String>, user: impl Into<String>, year: i32, value: f64) -> Self {
        Self {
            supplier: supplier.into(),
            user: user.into(),
            year,
            value: Some(value),
        }
    }
}

/// One industry x commodity cell of a make (output) or use (input) table.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMakeUseCell {
    pub industry: String,
    pub commodity: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl RawMakeUseCell {
    pub fn new(
        industry: impl Into<String>,
        commodity: impl Into<String>,
        year: i32,
        value: f64,
    ) -> Self {
        Self {
            industry: industry.into(),
            commodity: commodity.into(),
            year,
            value: Some(value),
        }
    }
}

/// Raw inter-industry data for one IO vintage, in whichever shape it ships.
#[derive(Debug, Clone, PartialEq)]
pub enum RawIoTables {
    Flows(Vec<RawFlow>),
    MakeUse {
        make: Vec<RawMakeUseCell>,
        uses: Vec<RawMakeUseCell>,
    },
}
