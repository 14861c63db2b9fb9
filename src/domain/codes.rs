//! Canonical industry codes.
//!
//! Every vintage is harmonized onto one closed code set (a NAICS-based
//! business-sector classification). A code can only be obtained by looking it
//! up in its [`CodeSet`], so holding an [`IndustryCode`] proves membership.

use std::fmt;

use serde::Serialize;

/// A member of a canonical code set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct IndustryCode(&'static str);

impl IndustryCode {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for IndustryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A row/column of an input-output matrix: a real industry or one of the two
/// synthetic primary factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Industry(IndustryCode),
    Capital,
    Labor,
}

impl Node {
    pub fn industry(self) -> Option<IndustryCode> {
        match self {
            Node::Industry(code) => Some(code),
            Node::Capital | Node::Labor => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Industry(code) => write!(f, "{code}"),
            Node::Capital => f.write_str("capital"),
            Node::Labor => f.write_str("labor"),
        }
    }
}

/// A closed, lexicographically sorted set of canonical codes.
#[derive(Debug)]
pub struct CodeSet {
    pub name: &'static str,
    codes: &'static [&'static str],
}

impl CodeSet {
    pub fn lookup(&self, code: &str) -> Option<IndustryCode> {
        self.codes
            .binary_search_by(|probe| (*probe).cmp(code))
            .ok()
            .map(|idx| IndustryCode(self.codes[idx]))
    }

    pub fn contains(&self, code: IndustryCode) -> bool {
        self.lookup(code.as_str()).is_some()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in canonical (sorted) order.
    pub fn codes(&self) -> impl Iterator<Item = IndustryCode> + '_ {
        self.codes.iter().map(|c| IndustryCode(*c))
    }

    /// Position of `code` in canonical order.
    pub fn index_of(&self, code: IndustryCode) -> Option<usize> {
        self.codes
            .binary_search_by(|probe| (*probe).cmp(code.as_str()))
            .ok()
    }

    /// Matrix axis: every code in order, then `capital`, then `labor`.
    pub fn nodes(&self) -> Vec<Node> {
        self.codes()
            .map(Node::Industry)
            .chain([Node::Capital, Node::Labor])
            .collect()
    }
}

/// The 39-industry Canadian business sector used by every Canadian vintage.
pub static CANADA_BUSINESS_SECTOR: CodeSet = CodeSet {
    name: "canada-39",
    codes: &[
        "111-112", "113", "114", "115", "211", "212", "213", "221", "23", "311", "312", "313-314",
        "315-316", "321", "322", "323", "324", "325", "326", "327", "331", "332", "333", "334",
        "335", "336", "337", "339", "41", "44-45", "48-49", "51", "52-53", "54", "56", "62", "71",
        "72", "81",
    ],
};

/// The coarser US business sector used by the BEA vintages.
pub static US_BUSINESS_SECTOR: CodeSet = CodeSet {
    name: "us-38",
    codes: &[
        "111-112", "113-115", "211", "212", "213", "221", "23", "311-312", "313-314", "315-316",
        "321", "322", "323", "324", "325", "326", "327", "331", "332", "333", "334", "335", "336",
        "337", "339", "41", "44-45", "48-49", "51", "52-53", "54", "55", "56", "61", "62", "71",
        "72", "81",
    ],
};
