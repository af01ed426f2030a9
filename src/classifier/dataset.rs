use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Selects which fixed mock dataset a chart renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetTag {
    Sales,
    Revenue,
    Production,
    Oee,
    Quality,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetParseError(pub String);

impl fmt::Display for DatasetParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown dataset tag: {}", self.0)
    }
}

impl Error for DatasetParseError {}

/// A single point of a mock chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub label: &'static str,
    pub value: u32,
}

// Scanned in order, first hit wins. Keep in sync with the SQL in the rule table;
// the tests check every template against this list.
// Production must precede Revenue: "product" is a substring of "production".
const SQL_KEYWORDS: &[(DatasetTag, &[&str])] = &[
    (DatasetTag::Sales, &["sales", "satış"]),
    (DatasetTag::Production, &["production", "üretim", "uretim"]),
    (DatasetTag::Revenue, &["revenue", "product", "gelir", "ürün"]),
    (DatasetTag::Oee, &["oee"]),
    (DatasetTag::Quality, &["scrap", "hurda", "quality", "kalite"]),
];

const WEEKLY_PRODUCTION: &[(&str, u32)] = &[
    ("01 Eyl", 920),
    ("02 Eyl", 1040),
    ("03 Eyl", 980),
    ("04 Eyl", 1125),
    ("05 Eyl", 1200),
    ("06 Eyl", 1080),
    ("07 Eyl", 1250),
];

const DAILY_PRODUCTION: &[(&str, u32)] = &[
    ("01/09", 920),
    ("02/09", 1040),
    ("03/09", 980),
    ("04/09", 1125),
    ("05/09", 1200),
    ("06/09", 1080),
    ("07/09", 1250),
];

const OEE_BY_SHIFT: &[(&str, u32)] = &[("V1", 76), ("V2", 81), ("V3", 73)];

const SCRAP_REASONS: &[(&str, u32)] = &[
    ("Boyutsal Hata", 420),
    ("Yüzey Kusuru", 260),
    ("Montaj Hatası", 180),
    ("Hammadde", 140),
];

impl DatasetTag {
    pub const ALL: [DatasetTag; 6] = [
        DatasetTag::Sales,
        DatasetTag::Revenue,
        DatasetTag::Production,
        DatasetTag::Oee,
        DatasetTag::Quality,
        DatasetTag::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetTag::Sales => "sales",
            DatasetTag::Revenue => "revenue",
            DatasetTag::Production => "production",
            DatasetTag::Oee => "oee",
            DatasetTag::Quality => "quality",
            DatasetTag::Default => "default",
        }
    }

    /// Derives a tag by scanning SQL text for domain keywords.
    ///
    /// Only needed for SQL that arrives without a tag (e.g. from the webhook backend);
    /// the rule classifier returns its tag directly.
    pub fn from_sql(sql: &str) -> DatasetTag {
        let sql = sql.to_lowercase();
        SQL_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| sql.contains(kw)))
            .map(|(tag, _)| *tag)
            .unwrap_or(DatasetTag::Default)
    }

    /// The mock series rendered for this tag. Sales and revenue have no dedicated
    /// series yet and share the weekly production data with `Default`.
    pub fn series(&self) -> Vec<DataPoint> {
        let points = match self {
            DatasetTag::Production => DAILY_PRODUCTION,
            DatasetTag::Oee => OEE_BY_SHIFT,
            DatasetTag::Quality => SCRAP_REASONS,
            DatasetTag::Sales | DatasetTag::Revenue | DatasetTag::Default => WEEKLY_PRODUCTION,
        };

        points
            .iter()
            .map(|&(label, value)| DataPoint { label, value })
            .collect()
    }
}

impl fmt::Display for DatasetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetTag {
    type Err = DatasetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| DatasetParseError(s.to_string()))
    }
}
