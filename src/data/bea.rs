//! BEA vintages for the US companion run.

use crate::data::vintage::{
    CodeExtraction, CrosswalkRules, MakeUseRules, TableShape, Target, VariableMap,
    VintageDescriptor, VintageId,
};
use crate::domain::US_BUSINESS_SECTOR;

use Target::{Industry, Split};

pub static VALUE_ADDED_1947: VintageDescriptor = VintageDescriptor {
    id: VintageId::UsValueAdded1947,
    first_year: 1947,
    last_year: 1987,
    scheme: &US_BUSINESS_SECTOR,
    shape: TableShape::IndustryAccounts,
    crosswalk: CrosswalkRules {
        extract: CodeExtraction::AsIs,
        universe_prefix: None,
        drop_exact: SIC72_PARENTS,
        drop_prefix: &["Government", "Federal", "State and local", "Statistical discrepancy"],
        truncate: None,
        table: SIC72_TITLES,
        passthrough: false,
    },
    cost_scale: 1.0,
    variables: Some(VariableMap {
        value_added: "VA",
        accounts: None,
    }),
    make_use: None,
};

pub static MAKE_USE_1963: VintageDescriptor = VintageDescriptor {
    id: VintageId::UsMakeUse1963,
    first_year: 1963,
    last_year: 1996,
    scheme: &US_BUSINESS_SECTOR,
    shape: TableShape::MakeUse,
    crosswalk: CrosswalkRules {
        extract: CodeExtraction::AsIs,
        universe_prefix: None,
        drop_exact: &[
            "622HO", "GFGD", "GFGN", "GFE", "GSLG", "GSLE", "HS", "ORE", "Used", "Other", "T001",
            "T005", "T006", "T007", "T008", "T017",
        ],
        drop_prefix: &[],
        truncate: None,
        table: SUMMARY_CODES,
        passthrough: false,
    },
    cost_scale: 1.0,
    variables: None,
    make_use: Some(MakeUseRules {
        drop_commodities: &[
            "622HO", "GFG", "GFE", "GSLG", "GSLE", "Used", "Other", "T008", "T005", "T006",
        ],
        use_recodes: &[],
        fictive: &[],
        drop_unmatched_commodities: false,
    }),
};

/// Sector subtotals printed between the detailed 1972 SIC rows.
const SIC72_PARENTS: &[&str] = &[
    "Gross domestic product",
    "Private industries",
    "Agriculture, forestry, and fishing",
    "Mining",
    "Manufacturing",
    "Durable goods",
    "Nondurable goods",
    "Transportation and public utilities",
    "Transportation",
    "Finance, insurance, and real estate",
    "Services",
    "Educational services",
];

const SIC72_TITLES: &[(&str, Target)] = &[
    ("Farms", Industry("111-112")),
    (
        "Agricultural services, forestry, and fishing",
        Industry("113-115"),
    ),
    ("Metal mining", Industry("212")),
    ("Coal mining", Industry("212")),
    ("Oil and gas extraction", Industry("211")),
    ("Nonmetallic minerals, except fuels", Industry("212")),
    ("Construction", Industry("23")),
    ("Lumber and wood products", Industry("321")),
    ("Furniture and fixtures", Industry("337")),
    ("Stone, clay, and glass products", Industry("327")),
    ("Primary metal industries", Industry("331")),
    ("Fabricated metal products", Industry("332")),
    ("Machinery, except electrical", Industry("333")),
    (
        "Electric and electronic equipment",
        Split {
            assigned: "334",
            also: &["335"],
        },
    ),
    ("Motor vehicles and equipment", Industry("336")),
    ("Other transportation equipment", Industry("336")),
    (
        "Instruments and related products",
        Split {
            assigned: "334",
            also: &["339"],
        },
    ),
    ("Miscellaneous manufacturing industries", Industry("339")),
    ("Food and kindred products", Industry("311-312")),
    ("Tobacco products", Industry("311-312")),
    ("Textile mill products", Industry("313-314")),
    ("Apparel and other textile products", Industry("315-316")),
    ("Paper and allied products", Industry("322")),
    (
        "Printing and publishing",
        Split {
            assigned: "323",
            also: &["51"],
        },
    ),
    ("Chemicals and allied products", Industry("325")),
    ("Petroleum and coal products", Industry("324")),
    ("Rubber and miscellaneous plastics products", Industry("326")),
    ("Leather and leather products", Industry("315-316")),
    ("Railroad transportation", Industry("48-49")),
    ("Local and interurban passenger transit", Industry("48-49")),
    ("Trucking and warehousing", Industry("48-49")),
    ("Water transportation", Industry("48-49")),
    ("Transportation by air", Industry("48-49")),
    ("Pipelines, except natural gas", Industry("48-49")),
    ("Transportation services", Industry("48-49")),
    ("Communications", Industry("51")),
    ("Telephone and telegraph", Industry("51")),
    ("Radio and television", Industry("51")),
    ("Electric, gas, and sanitary services", Industry("221")),
    ("Wholesale trade", Industry("41")),
    ("Retail trade", Industry("44-45")),
    ("Banking", Industry("52-53")),
    ("Credit agencies other than banks", Industry("52-53")),
    ("Security and commodity brokers", Industry("52-53")),
    ("Insurance carriers", Industry("52-53")),
    ("Insurance agents, brokers, and service", Industry("52-53")),
    ("Real estate /2/", Industry("52-53")),
    ("Holding and other investment offices", Industry("52-53")),
    ("Hotels and other lodging places", Industry("72")),
    ("Personal services", Industry("81")),
    (
        "Business services",
        Split {
            assigned: "54",
            also: &["56"],
        },
    ),
    ("Auto repair, services, and parking", Industry("81")),
    ("Miscellaneous repair services", Industry("81")),
    ("Motion pictures", Industry("71")),
    ("Amusement and recreation services", Industry("71")),
    ("Health services", Industry("62")),
    ("Legal services", Industry("54")),
    ("Social services", Industry("62")),
    ("Membership organizations", Industry("81")),
    ("Miscellaneous professional services", Industry("54")),
    ("Private households", Industry("81")),
];

/// BEA summary industry codes (before redefinitions).
const SUMMARY_CODES: &[(&str, Target)] = &[
    ("111CA", Industry("111-112")),
    ("113FF", Industry("113-115")),
    ("211", Industry("211")),
    ("212", Industry("212")),
    ("213", Industry("213")),
    ("22", Industry("221")),
    ("23", Industry("23")),
    ("321", Industry("321")),
    ("327", Industry("327")),
    ("331", Industry("331")),
    ("332", Industry("332")),
    ("333", Industry("333")),
    ("334", Industry("334")),
    ("335", Industry("335")),
    ("3361MV", Industry("336")),
    ("3364OT", Industry("336")),
    ("337", Industry("337")),
    ("339", Industry("339")),
    ("311FT", Industry("311-312")),
    ("313TT", Industry("313-314")),
    ("315AL", Industry("315-316")),
    ("322", Industry("322")),
    ("323", Industry("323")),
    ("324", Industry("324")),
    ("325", Industry("325")),
    ("326", Industry("326")),
    ("42", Industry("41")),
    ("44RT", Industry("44-45")),
    ("481", Industry("48-49")),
    ("482", Industry("48-49")),
    ("483", Industry("48-49")),
    ("484", Industry("48-49")),
    ("485", Industry("48-49")),
    ("486", Industry("48-49")),
    ("487OS", Industry("48-49")),
    ("493", Industry("48-49")),
    ("511", Industry("51")),
    ("512", Industry("51")),
    ("513", Industry("51")),
    ("514", Industry("51")),
    ("521CI", Industry("52-53")),
    ("523", Industry("52-53")),
    ("524", Industry("52-53")),
    ("525", Industry("52-53")),
    ("531", Industry("52-53")),
    ("532RL", Industry("52-53")),
    ("5411", Industry("54")),
    ("5415", Industry("54")),
    ("5412OP", Industry("54")),
    ("55", Industry("55")),
    ("561", Industry("56")),
    ("562", Industry("56")),
    ("61", Industry("61")),
    ("621", Industry("62")),
    ("624", Industry("62")),
    ("711AS", Industry("71")),
    ("713", Industry("71")),
    ("721", Industry("72")),
    ("722", Industry("72")),
    ("81", Industry("81")),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_are_the_four_known_approximations() {
        let split_titles: Vec<_> = SIC72_TITLES
            .iter()
            .filter(|(_, t)| matches!(t, Split { .. }))
            .map(|(label, _)| *label)
            .collect();
        assert_eq!(
            split_titles,
            vec![
                "Electric and electronic equipment",
                "Instruments and related products",
                "Printing and publishing",
                "Business services"
            ]
        );
    }

    #[test]
    fn summary_codes_cover_the_us_sector() {
        let mut covered: Vec<_> = SUMMARY_CODES
            .iter()
            .filter_map(|(_, t)| match t {
                Industry(code) => Some(*code),
                _ => None,
            })
            .collect();
        covered.sort_unstable();
        covered.dedup();
        assert_eq!(covered.len(), US_BUSINESS_SECTOR.len());
    }
}
