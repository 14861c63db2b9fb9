//! Statistics Canada vintages: productivity accounts and the four IO regimes.

use crate::data::vintage::{
    AccountVariables, CodeExtraction, CrosswalkRules, FictiveRule, FictiveTreatment,
    MakeUseRules, TableShape, Target, VariableMap, VintageDescriptor, VintageId,
};
use crate::domain::CANADA_BUSINESS_SECTOR;

use Target::{Fictive, Industry};

pub static PRODUCTIVITY: VintageDescriptor = VintageDescriptor {
    id: VintageId::CanProductivity,
    first_year: 1961,
    last_year: 2019,
    scheme: &CANADA_BUSINESS_SECTOR,
    shape: TableShape::IndustryAccounts,
    crosswalk: CrosswalkRules {
        extract: CodeExtraction::AsIs,
        universe_prefix: None,
        drop_exact: PRODUCTIVITY_PARENTS,
        drop_prefix: &["Business sector"],
        truncate: None,
        table: PRODUCTIVITY_LABELS,
        passthrough: false,
    },
    cost_scale: 1.0,
    variables: Some(VariableMap {
        value_added: "Gross domestic product (GDP)",
        accounts: Some(AccountVariables {
            tfp: "Multifactor productivity based on value-added",
            capital: "Capital input",
            labor: "Labour input",
            capital_cost: "Capital cost",
            labor_cost: "Labour compensation",
            gross_output: Some("Gross output"),
        }),
    }),
    make_use: None,
};

pub static MAKE_USE_1961: VintageDescriptor = VintageDescriptor {
    id: VintageId::CanMakeUse1961,
    first_year: 1961,
    last_year: 2008,
    scheme: &CANADA_BUSINESS_SECTOR,
    shape: TableShape::MakeUse,
    crosswalk: CrosswalkRules {
        extract: CodeExtraction::AsIs,
        universe_prefix: None,
        drop_exact: &[],
        drop_prefix: &[
            "Government",
            "Non-profit",
            "Educational services",
            "Hospitals",
            "Owner occupied dwellings",
            "Total",
        ],
        truncate: None,
        table: MAKE_USE_1961_LABELS,
        passthrough: false,
    },
    cost_scale: 1.0,
    variables: None,
    make_use: Some(MakeUseRules {
        drop_commodities: &["Total commodities"],
        use_recodes: &[("Transportation margins", "Other transportation and storage")],
        fictive: &[
            FictiveRule {
                label: "FC2",
                treatment: FictiveTreatment::Remove,
            },
            FictiveRule {
                label: "FC1",
                treatment: FictiveTreatment::Reallocate,
            },
            FictiveRule {
                label: "FC3",
                treatment: FictiveTreatment::Reallocate,
            },
        ],
        drop_unmatched_commodities: true,
    }),
};

pub static SYMMETRIC_1997: VintageDescriptor = VintageDescriptor {
    id: VintageId::CanSymmetric1997,
    first_year: 1997,
    last_year: 2008,
    scheme: &CANADA_BUSINESS_SECTOR,
    shape: TableShape::Flows,
    crosswalk: CrosswalkRules {
        extract: CodeExtraction::AsIs,
        universe_prefix: None,
        drop_exact: &["611A"],
        drop_prefix: &[],
        truncate: None,
        table: SYMMETRIC_1997_CODES,
        passthrough: false,
    },
    cost_scale: 1000.0,
    variables: None,
    make_use: None,
};

pub static SYMMETRIC_2009: VintageDescriptor = VintageDescriptor {
    id: VintageId::CanSymmetric2009,
    first_year: 2009,
    last_year: 2009,
    scheme: &CANADA_BUSINESS_SECTOR,
    shape: TableShape::Flows,
    crosswalk: CrosswalkRules {
        extract: CodeExtraction::AsIs,
        universe_prefix: Some("BS"),
        drop_exact: &["BS61000"],
        drop_prefix: &[],
        truncate: Some((2, 5)),
        table: BS_CODES,
        passthrough: true,
    },
    cost_scale: 1000.0,
    variables: None,
    make_use: None,
};

pub static SYMMETRIC_2010: VintageDescriptor = VintageDescriptor {
    id: VintageId::CanSymmetric2010,
    first_year: 2010,
    last_year: 2012,
    scheme: &CANADA_BUSINESS_SECTOR,
    shape: TableShape::Flows,
    crosswalk: CrosswalkRules {
        extract: CodeExtraction::AsIs,
        universe_prefix: Some("BS"),
        drop_exact: &["BS551113", "BS610000"],
        drop_prefix: &[],
        truncate: Some((2, 5)),
        table: BS_CODES,
        passthrough: true,
    },
    cost_scale: 1000.0,
    variables: None,
    make_use: None,
};

pub static SUPPLY_USE_2013: VintageDescriptor = VintageDescriptor {
    id: VintageId::CanSupplyUse2013,
    first_year: 2013,
    last_year: 2019,
    scheme: &CANADA_BUSINESS_SECTOR,
    shape: TableShape::Flows,
    crosswalk: CrosswalkRules {
        extract: CodeExtraction::BracketSuffix,
        universe_prefix: Some("BS"),
        drop_exact: &["BS551113", "BS610000"],
        drop_prefix: &[],
        truncate: Some((2, 5)),
        table: BS_CODES,
        passthrough: true,
    },
    cost_scale: 1000.0,
    variables: None,
    make_use: None,
};

/// Sector totals and sub-industries already covered by a listed parent.
const PRODUCTIVITY_PARENTS: &[&str] = &[
    "Agriculture, forestry, fishing and hunting [11]",
    "Mining and oil and gas extraction [21]",
    "Electric power generation, transmission and distribution [2211]",
    "Natural gas distribution, water and other systems",
    "Manufacturing [31-33]",
    "Air, rail, water and scenic and sightseeing transportation and support activities for transportation",
    "Truck transportation [484]",
    "Transit and ground passenger transportation [485]",
    "Pipeline transportation [486]",
    "Postal service and couriers and messengers",
    "Warehousing and storage [493]",
    "Motion picture and sound recording industries [512]",
    "Broadcasting, telecommunications, publishing industries and other information services",
    "Administrative and support services [561]",
    "Waste management and remediation services [562]",
    "Educational services (except universities)",
    "Repair and maintenance [811]",
    "Religious, grant-making, civic, and professional and similar organizations [813]",
    "Personal and laundry services and private households",
];

const PRODUCTIVITY_LABELS: &[(&str, Target)] = &[
    ("Accommodation and food services [72]", Industry("72")),
    (
        "Administrative and support, waste management and remediation services [56]",
        Industry("56"),
    ),
    ("Arts, entertainment and recreation [71]", Industry("71")),
    ("Beverage and tobacco product manufacturing [312]", Industry("312")),
    ("Chemical manufacturing [325]", Industry("325")),
    ("Clothing, Leather and allied product manufacturing", Industry("315-316")),
    ("Computer and electronic product manufacturing [334]", Industry("334")),
    ("Construction [23]", Industry("23")),
    ("Crop and animal production", Industry("111-112")),
    (
        "Electrical equipment, appliance and component manufacturing [335]",
        Industry("335"),
    ),
    ("Fabricated metal product manufacturing [332]", Industry("332")),
    (
        "Finance, insurance, real estate and renting and leasing",
        Industry("52-53"),
    ),
    ("Fishing, hunting and trapping [114]", Industry("114")),
    ("Food manufacturing [311]", Industry("311")),
    ("Forestry and logging [113]", Industry("113")),
    ("Furniture and related product manufacturing [337]", Industry("337")),
    ("Health care and social assistance (except hospitals)", Industry("62")),
    ("Information and cultural industries [51]", Industry("51")),
    ("Machinery manufacturing [333]", Industry("333")),
    ("Mining (except oil and gas) [212]", Industry("212")),
    ("Miscellaneous manufacturing [339]", Industry("339")),
    ("Non-metallic mineral product manufacturing [327]", Industry("327")),
    ("Oil and gas extraction [211]", Industry("211")),
    ("Other services (except public administration) [81]", Industry("81")),
    ("Paper manufacturing [322]", Industry("322")),
    ("Petroleum and coal products manufacturing [324]", Industry("324")),
    ("Plastics and rubber products manufacturing [326]", Industry("326")),
    ("Primary metal manufacturing [331]", Industry("331")),
    ("Printing and related support activities [323]", Industry("323")),
    ("Professional, scientific and technical services [54]", Industry("54")),
    ("Retail trade [44-45]", Industry("44-45")),
    ("Support activities for agriculture and forestry [115]", Industry("115")),
    (
        "Support activities for mining and oil and gas extraction [213]",
        Industry("213"),
    ),
    ("Textile and textile product mills", Industry("313-314")),
    ("Transportation and warehousing [48-49]", Industry("48-49")),
    ("Transportation equipment manufacturing [336]", Industry("336")),
    ("Utilities [221]", Industry("221")),
    ("Wholesale trade [41]", Industry("41")),
    ("Wood product manufacturing [321]", Industry("321")),
];

/// 3-character business-sector groups (`BSxxx...` truncated to `xxx`).
const BS_CODES: &[(&str, Target)] = &[
    ("11A", Industry("111-112")),
    ("111", Industry("111-112")),
    ("112", Industry("111-112")),
    ("23A", Industry("23")),
    ("23B", Industry("23")),
    ("23C", Industry("23")),
    ("23D", Industry("23")),
    ("23E", Industry("23")),
    ("31A", Industry("313-314")),
    ("31B", Industry("315-316")),
    ("410", Industry("41")),
    ("411", Industry("41")),
    ("412", Industry("41")),
    ("413", Industry("41")),
    ("414", Industry("41")),
    ("415", Industry("41")),
    ("416", Industry("41")),
    ("417", Industry("41")),
    ("418", Industry("41")),
    ("419", Industry("41")),
    ("4A0", Industry("44-45")),
    ("441", Industry("44-45")),
    ("442", Industry("44-45")),
    ("443", Industry("44-45")),
    ("444", Industry("44-45")),
    ("445", Industry("44-45")),
    ("446", Industry("44-45")),
    ("447", Industry("44-45")),
    ("448", Industry("44-45")),
    ("451", Industry("44-45")),
    ("452", Industry("44-45")),
    ("453", Industry("44-45")),
    ("454", Industry("44-45")),
    ("48B", Industry("48-49")),
    ("481", Industry("48-49")),
    ("482", Industry("48-49")),
    ("483", Industry("48-49")),
    ("484", Industry("48-49")),
    ("485", Industry("48-49")),
    ("486", Industry("48-49")),
    ("488", Industry("48-49")),
    ("48A", Industry("48-49")),
    ("49A", Industry("48-49")),
    ("491", Industry("48-49")),
    ("492", Industry("48-49")),
    ("493", Industry("48-49")),
    ("51A", Industry("51")),
    ("51B", Industry("51")),
    ("511", Industry("51")),
    ("512", Industry("51")),
    ("515", Industry("51")),
    ("517", Industry("51")),
    ("518", Industry("51")),
    ("519", Industry("51")),
    ("5A0", Industry("52-53")),
    ("521", Industry("52-53")),
    ("522", Industry("52-53")),
    ("524", Industry("52-53")),
    ("52A", Industry("52-53")),
    ("52B", Industry("52-53")),
    ("53A", Industry("52-53")),
    ("53B", Industry("52-53")),
    ("531", Industry("52-53")),
    ("532", Industry("52-53")),
    ("533", Industry("52-53")),
    ("541", Industry("54")),
    ("561", Industry("56")),
    ("562", Industry("56")),
    ("620", Industry("62")),
    ("621", Industry("62")),
    ("623", Industry("62")),
    ("624", Industry("62")),
    ("710", Industry("71")),
    ("713", Industry("71")),
    ("71A", Industry("71")),
    ("720", Industry("72")),
    ("721", Industry("72")),
    ("722", Industry("72")),
    ("81A", Industry("81")),
    ("811", Industry("81")),
    ("812", Industry("81")),
    ("813", Industry("81")),
    ("814", Industry("81")),
];

const SYMMETRIC_1997_CODES: &[(&str, Target)] = &[
    ("11A0", Industry("111-112")),
    ("1130", Industry("113")),
    ("1140", Industry("114")),
    ("1150", Industry("115")),
    ("2111", Industry("211")),
    ("2121", Industry("212")),
    ("2122", Industry("212")),
    ("2123", Industry("212")),
    ("2131", Industry("213")),
    ("2211", Industry("221")),
    ("221A", Industry("221")),
    ("230A", Industry("23")),
    ("230X", Industry("23")),
    ("230H", Industry("23")),
    ("230I", Industry("23")),
    ("3111", Industry("311")),
    ("3113", Industry("311")),
    ("3114", Industry("311")),
    ("3115", Industry("311")),
    ("3116", Industry("311")),
    ("3117", Industry("311")),
    ("311A", Industry("311")),
    ("312A", Industry("312")),
    ("312B", Industry("312")),
    ("312C", Industry("312")),
    ("312D", Industry("312")),
    ("3122", Industry("312")),
    ("31A0", Industry("313-314")),
    ("3150", Industry("315-316")),
    ("3160", Industry("315-316")),
    ("3210", Industry("321")),
    ("3221", Industry("322")),
    ("3222", Industry("322")),
    ("3231", Industry("323")),
    ("3241", Industry("324")),
    ("3251", Industry("325")),
    ("3252", Industry("325")),
    ("3253", Industry("325")),
    ("3254", Industry("325")),
    ("325A", Industry("325")),
    ("3261", Industry("326")),
    ("3262", Industry("326")),
    ("3273", Industry("327")),
    ("327A", Industry("327")),
    ("3310", Industry("331")),
    ("3320", Industry("332")),
    ("3330", Industry("333")),
    ("3341", Industry("334")),
    ("334A", Industry("334")),
    ("3352", Industry("335")),
    ("335A", Industry("335")),
    ("3361", Industry("336")),
    ("3362", Industry("336")),
    ("3363", Industry("336")),
    ("3364", Industry("336")),
    ("3365", Industry("336")),
    ("3366", Industry("336")),
    ("3369", Industry("336")),
    ("3370", Industry("337")),
    ("3390", Industry("339")),
    ("4100", Industry("41")),
    ("4A00", Industry("44-45")),
    ("4810", Industry("48-49")),
    ("4820", Industry("48-49")),
    ("4830", Industry("48-49")),
    ("4840", Industry("48-49")),
    ("4850", Industry("48-49")),
    ("4860", Industry("48-49")),
    ("48B0", Industry("48-49")),
    ("49A0", Industry("48-49")),
    ("4930", Industry("48-49")),
    ("5120", Industry("51")),
    ("5131", Industry("51")),
    ("513A", Industry("51")),
    ("51A0", Industry("51")),
    ("51B0", Industry("51")),
    ("5A01", Industry("52-53")),
    ("5A02", Industry("52-53")),
    ("5A03", Industry("52-53")),
    ("5A04", Industry("52-53")),
    ("5A05", Industry("52-53")),
    ("5A06", Industry("52-53")),
    ("5418", Industry("54")),
    ("541A", Industry("54")),
    ("541B", Industry("54")),
    ("5610", Industry("56")),
    ("5620", Industry("56")),
    ("62A0", Industry("62")),
    ("7100", Industry("71")),
    ("7200", Industry("72")),
    ("8110", Industry("81")),
    ("813A", Industry("81")),
    ("81A0", Industry("81")),
];

const MAKE_USE_1961_LABELS: &[(&str, Target)] = &[
    ("Accommodation and food services", Industry("72")),
    ("Administrative and support services", Industry("56")),
    (
        "Air, rail, water and scenic and sightseeing transportation and support activities for transportation",
        Industry("48-49"),
    ),
    ("Arts, entertainment and recreation", Industry("71")),
    ("Beverage and tobacco product manufacturing", Industry("312")),
    ("Broadcasting and telecommunications", Industry("51")),
    ("Chemical manufacturing", Industry("325")),
    ("Clothing manufacturing", Industry("315-316")),
    ("Computer and electronic product manufacturing", Industry("334")),
    ("Construction", Industry("23")),
    ("Crop and animal production", Industry("111-112")),
    (
        "Electric power generation, transmission and distribution",
        Industry("221"),
    ),
    (
        "Electrical equipment, appliance and component manufacturing",
        Industry("335"),
    ),
    ("Fabricated metal product manufacturing", Industry("332")),
    (
        "Finance, insurance, real estate and rental and leasing",
        Industry("52-53"),
    ),
    ("Fishing, hunting and trapping", Industry("114")),
    ("Food manufacturing", Industry("311")),
    ("Forestry and logging", Industry("113")),
    ("Furniture and related product manufacturing", Industry("337")),
    ("Health care and social assistance", Industry("62")),
    ("Leather and allied product manufacturing", Industry("315-316")),
    ("Machinery manufacturing", Industry("333")),
    ("Mining (except oil and gas)", Industry("212")),
    ("Miscellaneous manufacturing", Industry("339")),
    ("Motion picture and sound recording industries", Industry("51")),
    (
        "Natural gas distribution, water and other systems",
        Industry("221"),
    ),
    ("Non-metallic mineral product manufacturing", Industry("327")),
    ("Oil and gas extraction", Industry("211")),
    (
        "Operating, office, cafeteria and laboratory supplies",
        Fictive("FC1"),
    ),
    ("Paper manufacturing", Industry("322")),
    (
        "Personal and laundry services and private households",
        Industry("81"),
    ),
    ("Petroleum and coal products manufacturing", Industry("324")),
    ("Pipeline transportation", Industry("48-49")),
    ("Plastics and rubber products manufacturing", Industry("326")),
    ("Postal service and couriers and messengers", Industry("48-49")),
    ("Primary metal manufacturing", Industry("331")),
    ("Printing and related support activities", Industry("323")),
    ("Professional, scientific and technical services", Industry("54")),
    (
        "Publishing industries, information services and data processing services",
        Industry("51"),
    ),
    (
        "Publishing, broadcasting, telecommunications, and other information services",
        Industry("51"),
    ),
    ("Repair and maintenance", Industry("81")),
    ("Retail trade", Industry("44-45")),
    ("Support activities for agriculture and forestry", Industry("115")),
    (
        "Support activities for mining and oil and gas extraction",
        Industry("213"),
    ),
    ("Textile and textile product mills", Industry("313-314")),
    ("Transit and ground passenger transportation", Industry("48-49")),
    ("Transportation equipment manufacturing", Industry("336")),
    ("Transportation margins", Fictive("FC2")),
    ("Travel, entertainment, advertising and promotion", Fictive("FC3")),
    ("Truck transportation", Industry("48-49")),
    ("Warehousing and storage", Industry("48-49")),
    ("Waste management and remediation services", Industry("56")),
    ("Wholesale trade", Industry("41")),
    ("Wood product manufacturing", Industry("321")),
];
