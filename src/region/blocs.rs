//! Static political/economic blocs.
//!
//! Bloc membership is policy, not geography: these lists are version-pinned
//! literals and are never recomputed from the scraped region sources, which
//! do not reliably encode them. Display names are the title-cased canonical
//! forms ("Oecd" included).

/// A named bloc with its member iso3 codes.
pub struct Bloc {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

const EUROPEAN_UNION: &[&str] = &[
    "AUT", "BEL", "BGR", "CYP", "CZE", "DEU", "DNK", "EST",
    "ESP", "FIN", "FRA", "GRC", "HRV", "HUN", "IRL", "ITA",
    "LTU", "LUX", "LVA", "MLT", "NLD", "POL", "PRT", "ROU",
    "SWE", "SVN", "SVK",
];

const G7: &[&str] = &["DEU", "CAN", "USA", "FRA", "ITA", "JPN", "GBR"];

const G8: &[&str] = &["DEU", "CAN", "USA", "FRA", "ITA", "JPN", "GBR", "RUS"];

// The 19 member states plus the European Union's members.
const G20: &[&str] = &[
    "ZAF", "SAU", "ARG", "AUS", "BRA", "CAN", "CHN", "KOR", "USA",
    "IND", "IDN", "JPN", "MEX", "GBR", "RUS", "TUR",
    "AUT", "BEL", "BGR", "CYP", "CZE", "DEU", "DNK", "EST",
    "ESP", "FIN", "FRA", "GRC", "HRV", "HUN", "IRL", "ITA",
    "LTU", "LUX", "LVA", "MLT", "NLD", "POL", "PRT", "ROU",
    "SWE", "SVN", "SVK",
];

const OECD: &[&str] = &[
    "DEU", "AUS", "AUT", "BEL", "CAN", "CHL", "COL", "KOR", "DNK",
    "ESP", "EST", "USA", "FIN", "FRA", "GRC", "HUN", "IRL", "ISL", "ISR",
    "ITA", "JPN", "LVA", "LTU", "LUX", "MEX", "NOR", "NZL", "NLD", "POL",
    "PRT", "SVK", "SVN", "SWE", "CHE", "GBR", "CZE", "TUR",
];

const G77: &[&str] = &[
    "AFG", "DZA", "AGO", "ATG", "ARG", "AZE", "BHS", "BHR", "BGD", "BRB", "BLZ",
    "BEN", "BTN", "BOL", "BWA", "BRA", "BRN", "BFA", "BDI", "CPV", "KHM", "CMR",
    "CAF", "TCD", "CHL", "CHN", "COL", "COM", "COG", "CRI", "CIV", "CUB", "PRK",
    "COD", "DJI", "DMA", "DOM", "ECU", "EGY", "SLV", "GNQ", "ERI", "SWZ", "ETH",
    "FJI", "GAB", "GMB", "GHA", "GRD", "GTM", "GIN", "GNB", "GUY", "HTI", "HND",
    "IND", "IDN", "IRN", "IRQ", "JAM", "JOR", "KEN", "KIR", "KWT", "LAO", "LBN",
    "LSO", "LBR", "LBY", "MDG", "MWI", "MYS", "MDV", "MLI", "MHL", "MRT", "MUS",
    "FSM", "MNG", "MAR", "MOZ", "MMR", "NAM", "NRU", "NPL", "NIC", "NER", "NGA",
    "OMN", "PAK", "PAN", "PNG", "PRY", "PER", "PHL", "QAT", "RWA", "KNA", "LCA",
    "VCT", "WSM", "STP", "SAU", "SEN", "SYC", "SLE", "SGP", "SLB", "SOM", "ZAF",
    "SSD", "LKA", "PSE", "SDN", "SUR", "SYR", "TJK", "THA", "TLS", "TGO", "TON",
    "TTO", "TUN", "TKM", "UGA", "ARE", "TZA", "URY", "VUT", "VEN", "VNM", "YEM",
    "ZMB", "ZWE",
];

pub const BLOCS: &[Bloc] = &[
    Bloc { name: "European Union", members: EUROPEAN_UNION },
    Bloc { name: "G7", members: G7 },
    Bloc { name: "G8", members: G8 },
    Bloc { name: "G20", members: G20 },
    Bloc { name: "Oecd", members: OECD },
    Bloc { name: "G77", members: G77 },
];

/// The bloc with the given canonical display name, if any.
pub fn find(name: &str) -> Option<&'static Bloc> {
    BLOCS.iter().find(|b| b.name == name)
}
