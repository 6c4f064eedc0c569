//! The product record: the single entity flowing through every stage.

use serde::{Deserialize, Serialize};

/// One product's normalized attributes.
///
/// Every field is a plain string; an empty string means the value was
/// absent from the spreadsheet. The JSON layout (camelCase keys, `sn` for
/// the serial column) is what the catalog frontend reads from
/// `public/data/products.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    /// URL-safe identifier, unique within one normalizer run.
    pub id: String,
    /// Source sequence label (the `SN` column).
    #[serde(rename = "sn")]
    pub serial: String,
    /// Never empty for an emitted record.
    pub name: String,
    pub label: String,
    pub category: String,
    /// Category derived from the CSV file name the record came from.
    pub category_file: String,
    pub image_link: String,
    pub photo: String,
    pub processes: String,
    pub weight: String,
    pub cost_price: String,
    pub hs_code: String,
    pub description: String,
    pub variations: String,
    pub tags: String,
    pub website_link: String,
    pub drive_link: String,
    pub attributes: String,
    pub additional_category: String,
    pub occasion: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub stock: String,
}

impl ProductRecord {
    /// The image URL to show as the primary picture, if any.
    pub fn primary_image(&self) -> Option<&str> {
        let link = self.image_link.trim();
        (!link.is_empty()).then_some(link)
    }
}
