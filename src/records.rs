use serde::Serialize;

/// One configured `url;category` line of the source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub url: String,
    pub category: String,
}

/// Fields pulled out of a single product page. Missing anchors stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub product_name: String,
    pub unit_price: String,
    pub comparison_price: String,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_empty() && self.unit_price.is_empty() && self.comparison_price.is_empty()
    }
}

/// One record per source entry, exactly as captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub timestamp: String,
    pub chain_id: String,
    pub category: String,
    pub product_name: String,
    pub unit_price: String,
    pub comparison_price: String,
}

/// A validated record, serialized as one row of the snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "ChainID")]
    pub chain_id: String,
    #[serde(rename = "ProductClass")]
    pub category: String,
    #[serde(rename = "ProductID")]
    pub product_name: String,
    #[serde(rename = "ProductPrice")]
    pub unit_price: String,
    #[serde(rename = "ProductComparisonPrice")]
    pub comparison_price: String,
}

pub const SNAPSHOT_HEADERS: [&str; 6] = [
    "Timestamp",
    "ChainID",
    "ProductClass",
    "ProductID",
    "ProductPrice",
    "ProductComparisonPrice",
];
