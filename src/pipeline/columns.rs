//! Column mapping: spreadsheet headers → record fields.
//!
//! The exports come from several hand-maintained sheets, so the same
//! column appears under different spellings (with or without an embedded
//! line break, a stray space before `(gm)`, and so on). Each [`Field`]
//! lists its accepted spellings in priority order; matching is exact after
//! header cleanup, never fuzzy. Columns that match no field are ignored.

use super::normalize::clean_field;

const FIELD_COUNT: usize = 20;

/// A record field sourced from a spreadsheet column.
///
/// `id` and `categoryFile` are derived, so they have no column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Serial,
    Name,
    Label,
    Category,
    ImageLink,
    Photo,
    Processes,
    Weight,
    CostPrice,
    HsCode,
    Description,
    Variations,
    Tags,
    WebsiteLink,
    DriveLink,
    Attributes,
    AdditionalCategory,
    Occasion,
    Type,
    Stock,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Serial,
        Field::Name,
        Field::Label,
        Field::Category,
        Field::ImageLink,
        Field::Photo,
        Field::Processes,
        Field::Weight,
        Field::CostPrice,
        Field::HsCode,
        Field::Description,
        Field::Variations,
        Field::Tags,
        Field::WebsiteLink,
        Field::DriveLink,
        Field::Attributes,
        Field::AdditionalCategory,
        Field::Occasion,
        Field::Type,
        Field::Stock,
    ];

    /// Accepted header spellings, highest priority first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Field::Serial => &["SN"],
            Field::Name => &["Product Name"],
            Field::Label => &[
                "Product label\n(3-5 Characters)",
                "Product label (3-5 Characters)",
            ],
            Field::Category => &["Category Name"],
            Field::ImageLink => &["Image Link"],
            Field::Photo => &["Photo"],
            Field::Processes => &["Processes"],
            Field::Weight => &["Weight \n(gm)", "Weight (gm)"],
            Field::CostPrice => &["Cost Price\n(Nrs)", "Cost Price (Nrs)"],
            Field::HsCode => &["HS CODE"],
            Field::Description => &["Description"],
            Field::Variations => &["Variations\nColor Code", "Variations Color Code"],
            Field::Tags => &["Tags"],
            Field::WebsiteLink => &[
                "Product Image\nWebsite Link",
                "Product Image Website Link",
            ],
            Field::DriveLink => &[
                "Product_image\n(Drive Link)",
                "Product_image (Drive Link)",
            ],
            Field::Attributes => &["Attributes"],
            Field::AdditionalCategory => &["Additional Category"],
            Field::Occasion => &["Occassion", "Occasion"],
            Field::Type => &["Type"],
            Field::Stock => &["stock"],
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Header cleanup applied before matching: drop carriage returns, a UTF-8
/// BOM, and surrounding whitespace.
pub fn clean_header(header: &str) -> String {
    clean_field(header.trim_start_matches('\u{feff}'))
}

/// Candidate column indices for every [`Field`], resolved once per file.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    columns: [Vec<usize>; FIELD_COUNT],
}

impl ColumnMap {
    /// Resolve each field's candidate spellings against a header row.
    ///
    /// The column list for a field keeps candidate priority order; when a
    /// spelling appears twice, its leftmost column comes first.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let cleaned: Vec<String> = headers.iter().map(|h| clean_header(h.as_ref())).collect();
        let mut map = ColumnMap::default();
        for field in Field::ALL {
            let slot = &mut map.columns[field.slot()];
            for candidate in field.candidates() {
                slot.extend(
                    cleaned
                        .iter()
                        .enumerate()
                        .filter(|(_, h)| h.as_str() == *candidate)
                        .map(|(i, _)| i),
                );
            }
        }
        map
    }

    /// Whether any column of the header row maps to `field`.
    pub fn has(&self, field: Field) -> bool {
        !self.columns[field.slot()].is_empty()
    }

    /// The first non-empty cleaned value among the field's columns, or `""`.
    ///
    /// Cells past the end of a short row read as empty.
    pub fn value<S: AsRef<str>>(&self, row: &[S], field: Field) -> String {
        self.columns[field.slot()]
            .iter()
            .filter_map(|&i| row.get(i))
            .map(|cell| clean_field(cell.as_ref()))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }
}
