//! Authoritative country catalogue (ISO 3166-1).
//!
//! Compiled-in equivalent of an external naming standard: every country with
//! its alpha-2, alpha-3 and zero-padded numeric code, display name, continent
//! and common aliases. Immutable for the process lifetime.
//!
//! Lookup is two-tiered: `lookup` for exact (case-insensitive) matches on any
//! code, name or alias, and `search_fuzzy` for ranked approximate matches.

/// Continent assignment for the derived-from-code fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Continent {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Africa => "AF",
            Self::Antarctica => "AN",
            Self::Asia => "AS",
            Self::Europe => "EU",
            Self::NorthAmerica => "NA",
            Self::Oceania => "OC",
            Self::SouthAmerica => "SA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::Antarctica => "Antarctica",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::Oceania => "Oceania",
            Self::SouthAmerica => "South America",
        }
    }
}

/// One authoritative naming entry.
#[derive(Debug, Clone, Copy)]
pub struct CountryRecord {
    pub iso2: &'static str,
    pub iso3: &'static str,
    /// ISO 3166-1 numeric, zero-padded to three digits.
    pub numeric: &'static str,
    pub name: &'static str,
    pub continent: Continent,
    pub aliases: &'static [&'static str],
}

use Continent::{Africa as AF, Antarctica as AN, Asia as AS, Europe as EU};
use Continent::{NorthAmerica as NA, Oceania as OC, SouthAmerica as SA};

const fn rec(
    iso2: &'static str,
    iso3: &'static str,
    numeric: &'static str,
    name: &'static str,
    continent: Continent,
    aliases: &'static [&'static str],
) -> CountryRecord {
    CountryRecord { iso2, iso3, numeric, name, continent, aliases }
}

#[rustfmt::skip]
const COUNTRIES: &[CountryRecord] = &[
    rec("AF", "AFG", "004", "Afghanistan", AS, &[]),
    rec("AX", "ALA", "248", "Åland Islands", EU, &["Aland Islands"]),
    rec("AL", "ALB", "008", "Albania", EU, &[]),
    rec("DZ", "DZA", "012", "Algeria", AF, &[]),
    rec("AS", "ASM", "016", "American Samoa", OC, &[]),
    rec("AD", "AND", "020", "Andorra", EU, &[]),
    rec("AO", "AGO", "024", "Angola", AF, &[]),
    rec("AI", "AIA", "660", "Anguilla", NA, &[]),
    rec("AQ", "ATA", "010", "Antarctica", AN, &[]),
    rec("AG", "ATG", "028", "Antigua and Barbuda", NA, &["Antigua & Barbuda"]),
    rec("AR", "ARG", "032", "Argentina", SA, &[]),
    rec("AM", "ARM", "051", "Armenia", AS, &[]),
    rec("AW", "ABW", "533", "Aruba", NA, &[]),
    rec("AU", "AUS", "036", "Australia", OC, &[]),
    rec("AT", "AUT", "040", "Austria", EU, &[]),
    rec("AZ", "AZE", "031", "Azerbaijan", AS, &[]),
    rec("BS", "BHS", "044", "Bahamas", NA, &["The Bahamas"]),
    rec("BH", "BHR", "048", "Bahrain", AS, &[]),
    rec("BD", "BGD", "050", "Bangladesh", AS, &[]),
    rec("BB", "BRB", "052", "Barbados", NA, &[]),
    rec("BY", "BLR", "112", "Belarus", EU, &[]),
    rec("BE", "BEL", "056", "Belgium", EU, &[]),
    rec("BZ", "BLZ", "084", "Belize", NA, &[]),
    rec("BJ", "BEN", "204", "Benin", AF, &[]),
    rec("BM", "BMU", "060", "Bermuda", NA, &[]),
    rec("BT", "BTN", "064", "Bhutan", AS, &[]),
    rec("BO", "BOL", "068", "Bolivia, Plurinational State of", SA, &["Bolivia"]),
    rec("BQ", "BES", "535", "Bonaire, Sint Eustatius and Saba", NA,
        &["Caribbean Netherlands", "Bonaire Sint Eustatius And Saba"]),
    rec("BA", "BIH", "070", "Bosnia and Herzegovina", EU, &["Bosnia"]),
    rec("BW", "BWA", "072", "Botswana", AF, &[]),
    rec("BV", "BVT", "074", "Bouvet Island", AN, &[]),
    rec("BR", "BRA", "076", "Brazil", SA, &[]),
    rec("IO", "IOT", "086", "British Indian Ocean Territory", AS, &[]),
    rec("BN", "BRN", "096", "Brunei Darussalam", AS, &["Brunei"]),
    rec("BG", "BGR", "100", "Bulgaria", EU, &[]),
    rec("BF", "BFA", "854", "Burkina Faso", AF, &[]),
    rec("BI", "BDI", "108", "Burundi", AF, &[]),
    rec("CV", "CPV", "132", "Cabo Verde", AF, &["Cape Verde"]),
    rec("KH", "KHM", "116", "Cambodia", AS, &[]),
    rec("CM", "CMR", "120", "Cameroon", AF, &[]),
    rec("CA", "CAN", "124", "Canada", NA, &[]),
    rec("KY", "CYM", "136", "Cayman Islands", NA, &[]),
    rec("CF", "CAF", "140", "Central African Republic", AF, &[]),
    rec("TD", "TCD", "148", "Chad", AF, &[]),
    rec("CL", "CHL", "152", "Chile", SA, &[]),
    rec("CN", "CHN", "156", "China", AS, &["Mainland China"]),
    rec("CX", "CXR", "162", "Christmas Island", AS, &[]),
    rec("CC", "CCK", "166", "Cocos (Keeling) Islands", AS, &[]),
    rec("CO", "COL", "170", "Colombia", SA, &[]),
    rec("KM", "COM", "174", "Comoros", AF, &[]),
    rec("CG", "COG", "178", "Congo", AF,
        &["Republic of the Congo", "Congo-Brazzaville"]),
    rec("CD", "COD", "180", "Congo, The Democratic Republic of the", AF,
        &["Democratic Republic of the Congo", "DR Congo", "Congo-Kinshasa"]),
    rec("CK", "COK", "184", "Cook Islands", OC, &[]),
    rec("CR", "CRI", "188", "Costa Rica", NA, &[]),
    rec("CI", "CIV", "384", "Côte d'Ivoire", AF, &["Ivory Coast", "Cote d'Ivoire"]),
    rec("HR", "HRV", "191", "Croatia", EU, &[]),
    rec("CU", "CUB", "192", "Cuba", NA, &[]),
    rec("CW", "CUW", "531", "Curaçao", NA, &["Curacao"]),
    rec("CY", "CYP", "196", "Cyprus", AS, &[]),
    rec("CZ", "CZE", "203", "Czechia", EU, &["Czech Republic"]),
    rec("DK", "DNK", "208", "Denmark", EU, &[]),
    rec("DJ", "DJI", "262", "Djibouti", AF, &[]),
    rec("DM", "DMA", "212", "Dominica", NA, &[]),
    rec("DO", "DOM", "214", "Dominican Republic", NA, &[]),
    rec("EC", "ECU", "218", "Ecuador", SA, &[]),
    rec("EG", "EGY", "818", "Egypt", AF, &[]),
    rec("SV", "SLV", "222", "El Salvador", NA, &[]),
    rec("GQ", "GNQ", "226", "Equatorial Guinea", AF, &[]),
    rec("ER", "ERI", "232", "Eritrea", AF, &[]),
    rec("EE", "EST", "233", "Estonia", EU, &[]),
    rec("SZ", "SWZ", "748", "Eswatini", AF, &["Swaziland"]),
    rec("ET", "ETH", "231", "Ethiopia", AF, &[]),
    rec("FK", "FLK", "238", "Falkland Islands (Malvinas)", SA, &["Falkland Islands"]),
    rec("FO", "FRO", "234", "Faroe Islands", EU, &["Faeroe Islands"]),
    rec("FJ", "FJI", "242", "Fiji", OC, &[]),
    rec("FI", "FIN", "246", "Finland", EU, &[]),
    rec("FR", "FRA", "250", "France", EU, &[]),
    rec("GF", "GUF", "254", "French Guiana", SA, &[]),
    rec("PF", "PYF", "258", "French Polynesia", OC, &[]),
    rec("TF", "ATF", "260", "French Southern Territories", AN, &[]),
    rec("GA", "GAB", "266", "Gabon", AF, &[]),
    rec("GM", "GMB", "270", "Gambia", AF, &["The Gambia"]),
    rec("GE", "GEO", "268", "Georgia", AS, &[]),
    rec("DE", "DEU", "276", "Germany", EU, &[]),
    rec("GH", "GHA", "288", "Ghana", AF, &[]),
    rec("GI", "GIB", "292", "Gibraltar", EU, &[]),
    rec("GR", "GRC", "300", "Greece", EU, &[]),
    rec("GL", "GRL", "304", "Greenland", NA, &[]),
    rec("GD", "GRD", "308", "Grenada", NA, &[]),
    rec("GP", "GLP", "312", "Guadeloupe", NA, &[]),
    rec("GU", "GUM", "316", "Guam", OC, &[]),
    rec("GT", "GTM", "320", "Guatemala", NA, &[]),
    rec("GG", "GGY", "831", "Guernsey", EU, &[]),
    rec("GN", "GIN", "324", "Guinea", AF, &[]),
    rec("GW", "GNB", "624", "Guinea-Bissau", AF, &[]),
    rec("GY", "GUY", "328", "Guyana", SA, &[]),
    rec("HT", "HTI", "332", "Haiti", NA, &[]),
    rec("HM", "HMD", "334", "Heard Island and McDonald Islands", AN, &[]),
    rec("VA", "VAT", "336", "Holy See (Vatican City State)", EU, &["Vatican", "Vatican City"]),
    rec("HN", "HND", "340", "Honduras", NA, &[]),
    rec("HK", "HKG", "344", "Hong Kong", AS, &[]),
    rec("HU", "HUN", "348", "Hungary", EU, &[]),
    rec("IS", "ISL", "352", "Iceland", EU, &[]),
    rec("IN", "IND", "356", "India", AS, &[]),
    rec("ID", "IDN", "360", "Indonesia", AS, &[]),
    rec("IR", "IRN", "364", "Iran, Islamic Republic of", AS, &["Iran"]),
    rec("IQ", "IRQ", "368", "Iraq", AS, &[]),
    rec("IE", "IRL", "372", "Ireland", EU, &[]),
    rec("IM", "IMN", "833", "Isle of Man", EU, &[]),
    rec("IL", "ISR", "376", "Israel", AS, &[]),
    rec("IT", "ITA", "380", "Italy", EU, &[]),
    rec("JM", "JAM", "388", "Jamaica", NA, &[]),
    rec("JP", "JPN", "392", "Japan", AS, &[]),
    rec("JE", "JEY", "832", "Jersey", EU, &["Channel Islands"]),
    rec("JO", "JOR", "400", "Jordan", AS, &[]),
    rec("KZ", "KAZ", "398", "Kazakhstan", AS, &[]),
    rec("KE", "KEN", "404", "Kenya", AF, &[]),
    rec("KI", "KIR", "296", "Kiribati", OC, &[]),
    rec("KP", "PRK", "408", "Korea, Democratic People's Republic of", AS,
        &["North Korea", "Korea, North"]),
    rec("KR", "KOR", "410", "Korea, Republic of", AS, &["South Korea", "Korea, South"]),
    rec("KW", "KWT", "414", "Kuwait", AS, &[]),
    rec("KG", "KGZ", "417", "Kyrgyzstan", AS, &[]),
    rec("LA", "LAO", "418", "Lao People's Democratic Republic", AS, &["Laos"]),
    rec("LV", "LVA", "428", "Latvia", EU, &[]),
    rec("LB", "LBN", "422", "Lebanon", AS, &[]),
    rec("LS", "LSO", "426", "Lesotho", AF, &[]),
    rec("LR", "LBR", "430", "Liberia", AF, &[]),
    rec("LY", "LBY", "434", "Libya", AF, &[]),
    rec("LI", "LIE", "438", "Liechtenstein", EU, &[]),
    rec("LT", "LTU", "440", "Lithuania", EU, &[]),
    rec("LU", "LUX", "442", "Luxembourg", EU, &[]),
    rec("MO", "MAC", "446", "Macao", AS, &["Macau"]),
    rec("MG", "MDG", "450", "Madagascar", AF, &[]),
    rec("MW", "MWI", "454", "Malawi", AF, &[]),
    rec("MY", "MYS", "458", "Malaysia", AS, &[]),
    rec("MV", "MDV", "462", "Maldives", AS, &[]),
    rec("ML", "MLI", "466", "Mali", AF, &[]),
    rec("MT", "MLT", "470", "Malta", EU, &[]),
    rec("MH", "MHL", "584", "Marshall Islands", OC, &[]),
    rec("MQ", "MTQ", "474", "Martinique", NA, &[]),
    rec("MR", "MRT", "478", "Mauritania", AF, &[]),
    rec("MU", "MUS", "480", "Mauritius", AF, &[]),
    rec("YT", "MYT", "175", "Mayotte", AF, &[]),
    rec("MX", "MEX", "484", "Mexico", NA, &[]),
    rec("FM", "FSM", "583", "Micronesia, Federated States of", OC, &["Micronesia"]),
    rec("MD", "MDA", "498", "Moldova, Republic of", EU, &["Moldova"]),
    rec("MC", "MCO", "492", "Monaco", EU, &[]),
    rec("MN", "MNG", "496", "Mongolia", AS, &[]),
    rec("ME", "MNE", "499", "Montenegro", EU, &[]),
    rec("MS", "MSR", "500", "Montserrat", NA, &[]),
    rec("MA", "MAR", "504", "Morocco", AF, &[]),
    rec("MZ", "MOZ", "508", "Mozambique", AF, &[]),
    rec("MM", "MMR", "104", "Myanmar", AS, &["Burma"]),
    rec("NA", "NAM", "516", "Namibia", AF, &[]),
    rec("NR", "NRU", "520", "Nauru", OC, &[]),
    rec("NP", "NPL", "524", "Nepal", AS, &[]),
    rec("NL", "NLD", "528", "Netherlands", EU, &["The Netherlands", "Holland"]),
    rec("NC", "NCL", "540", "New Caledonia", OC, &[]),
    rec("NZ", "NZL", "554", "New Zealand", OC, &[]),
    rec("NI", "NIC", "558", "Nicaragua", NA, &[]),
    rec("NE", "NER", "562", "Niger", AF, &[]),
    rec("NG", "NGA", "566", "Nigeria", AF, &[]),
    rec("NU", "NIU", "570", "Niue", OC, &[]),
    rec("NF", "NFK", "574", "Norfolk Island", OC, &[]),
    rec("MK", "MKD", "807", "North Macedonia", EU, &["Macedonia"]),
    rec("MP", "MNP", "580", "Northern Mariana Islands", OC, &[]),
    rec("NO", "NOR", "578", "Norway", EU, &[]),
    rec("OM", "OMN", "512", "Oman", AS, &[]),
    rec("PK", "PAK", "586", "Pakistan", AS, &[]),
    rec("PW", "PLW", "585", "Palau", OC, &[]),
    rec("PS", "PSE", "275", "Palestine, State of", AS,
        &["Palestine", "West Bank and Gaza"]),
    rec("PA", "PAN", "591", "Panama", NA, &[]),
    rec("PG", "PNG", "598", "Papua New Guinea", OC, &[]),
    rec("PY", "PRY", "600", "Paraguay", SA, &[]),
    rec("PE", "PER", "604", "Peru", SA, &[]),
    rec("PH", "PHL", "608", "Philippines", AS, &["The Philippines"]),
    rec("PN", "PCN", "612", "Pitcairn", OC, &["Pitcairn Islands"]),
    rec("PL", "POL", "616", "Poland", EU, &[]),
    rec("PT", "PRT", "620", "Portugal", EU, &[]),
    rec("PR", "PRI", "630", "Puerto Rico", NA, &[]),
    rec("QA", "QAT", "634", "Qatar", AS, &[]),
    rec("RE", "REU", "638", "Réunion", AF, &["Reunion"]),
    rec("RO", "ROU", "642", "Romania", EU, &[]),
    rec("RU", "RUS", "643", "Russian Federation", EU, &["Russia"]),
    rec("RW", "RWA", "646", "Rwanda", AF, &[]),
    rec("BL", "BLM", "652", "Saint Barthélemy", NA, &["Saint Barthelemy"]),
    rec("SH", "SHN", "654", "Saint Helena, Ascension and Tristan da Cunha", AF,
        &["Saint Helena"]),
    rec("KN", "KNA", "659", "Saint Kitts and Nevis", NA, &["Saint Kitts & Nevis"]),
    rec("LC", "LCA", "662", "Saint Lucia", NA, &[]),
    rec("MF", "MAF", "663", "Saint Martin (French part)", NA, &["Saint Martin"]),
    rec("PM", "SPM", "666", "Saint Pierre and Miquelon", NA, &["Saint Pierre & Miquelon"]),
    rec("VC", "VCT", "670", "Saint Vincent and the Grenadines", NA,
        &["Saint Vincent", "St. Vincent & Grenadines"]),
    rec("WS", "WSM", "882", "Samoa", OC, &[]),
    rec("SM", "SMR", "674", "San Marino", EU, &[]),
    rec("ST", "STP", "678", "Sao Tome and Principe", AF,
        &["São Tomé and Príncipe", "Sao Tome & Principe"]),
    rec("SA", "SAU", "682", "Saudi Arabia", AS, &[]),
    rec("SN", "SEN", "686", "Senegal", AF, &[]),
    rec("RS", "SRB", "688", "Serbia", EU, &[]),
    rec("SC", "SYC", "690", "Seychelles", AF, &[]),
    rec("SL", "SLE", "694", "Sierra Leone", AF, &[]),
    rec("SG", "SGP", "702", "Singapore", AS, &[]),
    rec("SX", "SXM", "534", "Sint Maarten (Dutch part)", NA, &["Sint Maarten"]),
    rec("SK", "SVK", "703", "Slovakia", EU, &[]),
    rec("SI", "SVN", "705", "Slovenia", EU, &[]),
    rec("SB", "SLB", "090", "Solomon Islands", OC, &[]),
    rec("SO", "SOM", "706", "Somalia", AF, &[]),
    rec("ZA", "ZAF", "710", "South Africa", AF, &[]),
    rec("GS", "SGS", "239", "South Georgia and the South Sandwich Islands", AN, &[]),
    rec("SS", "SSD", "728", "South Sudan", AF, &[]),
    rec("ES", "ESP", "724", "Spain", EU, &[]),
    rec("LK", "LKA", "144", "Sri Lanka", AS, &[]),
    rec("SD", "SDN", "729", "Sudan", AF, &[]),
    rec("SR", "SUR", "740", "Suriname", SA, &[]),
    rec("SJ", "SJM", "744", "Svalbard and Jan Mayen", EU, &[]),
    rec("SE", "SWE", "752", "Sweden", EU, &[]),
    rec("CH", "CHE", "756", "Switzerland", EU, &[]),
    rec("SY", "SYR", "760", "Syrian Arab Republic", AS, &["Syria"]),
    rec("TW", "TWN", "158", "Taiwan, Province of China", AS, &["Taiwan"]),
    rec("TJ", "TJK", "762", "Tajikistan", AS, &[]),
    rec("TZ", "TZA", "834", "Tanzania, United Republic of", AF, &["Tanzania"]),
    rec("TH", "THA", "764", "Thailand", AS, &[]),
    rec("TL", "TLS", "626", "Timor-Leste", AS, &["East Timor"]),
    rec("TG", "TGO", "768", "Togo", AF, &[]),
    rec("TK", "TKL", "772", "Tokelau", OC, &[]),
    rec("TO", "TON", "776", "Tonga", OC, &[]),
    rec("TT", "TTO", "780", "Trinidad and Tobago", NA, &["Trinidad & Tobago"]),
    rec("TN", "TUN", "788", "Tunisia", AF, &[]),
    rec("TR", "TUR", "792", "Turkey", AS, &["Türkiye", "Turkiye"]),
    rec("TM", "TKM", "795", "Turkmenistan", AS, &[]),
    rec("TC", "TCA", "796", "Turks and Caicos Islands", NA, &[]),
    rec("TV", "TUV", "798", "Tuvalu", OC, &[]),
    rec("UG", "UGA", "800", "Uganda", AF, &[]),
    rec("UA", "UKR", "804", "Ukraine", EU, &[]),
    rec("AE", "ARE", "784", "United Arab Emirates", AS, &["UAE"]),
    rec("GB", "GBR", "826", "United Kingdom", EU,
        &["UK", "Great Britain", "England"]),
    rec("US", "USA", "840", "United States", NA, &["United States of America", "America"]),
    rec("UM", "UMI", "581", "United States Minor Outlying Islands", OC, &[]),
    rec("UY", "URY", "858", "Uruguay", SA, &[]),
    rec("UZ", "UZB", "860", "Uzbekistan", AS, &[]),
    rec("VU", "VUT", "548", "Vanuatu", OC, &[]),
    rec("VE", "VEN", "862", "Venezuela, Bolivarian Republic of", SA, &["Venezuela"]),
    rec("VN", "VNM", "704", "Viet Nam", AS, &["Vietnam"]),
    rec("VG", "VGB", "092", "Virgin Islands, British", NA, &["British Virgin Islands"]),
    rec("VI", "VIR", "850", "Virgin Islands, U.S.", NA,
        &["U.S. Virgin Islands", "United States Virgin Islands"]),
    rec("WF", "WLF", "876", "Wallis and Futuna", OC, &["Wallis & Futuna"]),
    rec("EH", "ESH", "732", "Western Sahara", AF, &[]),
    rec("YE", "YEM", "887", "Yemen", AS, &[]),
    rec("ZM", "ZMB", "894", "Zambia", AF, &[]),
    rec("ZW", "ZWE", "716", "Zimbabwe", AF, &[]),
];

/// The full catalogue, in defined order.
pub fn all() -> &'static [CountryRecord] {
    COUNTRIES
}

/// Exact lookup by any code, display name or alias. Case-insensitive.
pub fn lookup(query: &str) -> Option<&'static CountryRecord> {
    let q = query.trim();
    if q.is_empty() {
        return None;
    }
    COUNTRIES.iter().find(|r| {
        r.iso2.eq_ignore_ascii_case(q)
            || r.iso3.eq_ignore_ascii_case(q)
            || r.numeric == q
            || r.name.eq_ignore_ascii_case(q)
            || r.aliases.iter().any(|a| a.eq_ignore_ascii_case(q))
    })
}

/// Lookup by alpha-2 code only (used by the augmenter's derived fields).
pub fn by_iso2(code: &str) -> Option<&'static CountryRecord> {
    COUNTRIES.iter().find(|r| r.iso2.eq_ignore_ascii_case(code))
}

/// Compute edit distance between two strings (Levenshtein).
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

/// Approximate search: substring containment first, then edit distance <= 2
/// against names and aliases. Returns candidates ranked best-first; ties keep
/// catalogue order, so the first-ranked pick is deterministic.
pub fn search_fuzzy(query: &str) -> Vec<&'static CountryRecord> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, usize, &'static CountryRecord)> = Vec::new();
    for (idx, r) in COUNTRIES.iter().enumerate() {
        let mut best: Option<usize> = None;
        for name in std::iter::once(r.name).chain(r.aliases.iter().copied()) {
            let n = name.to_lowercase();
            // Containment only for queries long enough not to match noise.
            let rank = if n == q {
                Some(0)
            } else if q.len() >= 4 && (n.contains(&q) || q.contains(&n)) {
                Some(1)
            } else {
                let dist = edit_distance(&q, &n);
                if dist <= 2 { Some(2 + dist) } else { None }
            };
            if let Some(rank) = rank {
                best = Some(best.map_or(rank, |b: usize| b.min(rank)));
            }
        }
        if let Some(rank) = best {
            scored.push((rank, idx, r));
        }
    }

    scored.sort_by_key(|(rank, idx, _)| (*rank, *idx));
    scored.into_iter().map(|(_, _, r)| r).collect()
}
