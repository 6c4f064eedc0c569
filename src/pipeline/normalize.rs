//! Row normalization: CSV file → ordered [`ProductRecord`]s.
//!
//! A file is parsed completely before any of its rows are turned into
//! records, so a file that fails half-way contributes nothing and draws no
//! ids from the run's [`IdSequence`]. Rows without a product name are not
//! errors; they are simply not records.

use super::columns::{ColumnMap, Field};
use super::ids::IdSequence;
use crate::record::ProductRecord;
use tracing::debug;

/// Prefix every spreadsheet export carries in its file name.
pub const CATEGORY_FILE_PREFIX: &str = "Products for New ERP - ";

/// Trim surrounding whitespace and drop every carriage return.
pub fn clean_field(value: &str) -> String {
    value.trim().replace('\r', "")
}

/// Category label derived from an export's file name.
///
/// `"Products for New ERP - Scarves.csv"` → `"Scarves"`.
pub fn category_from_file_name(file_name: &str) -> String {
    let stem = file_name.strip_prefix(CATEGORY_FILE_PREFIX).unwrap_or(file_name);
    let stem = stem.strip_suffix(".csv").unwrap_or(stem);
    stem.trim().to_string()
}

/// A parsed CSV file: header row plus data rows, cells as raw strings.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse a whole CSV file.
///
/// Rows may be shorter or longer than the header. Bytes that are not valid
/// UTF-8 are decoded lossily instead of failing the file.
pub fn read_csv_rows(bytes: &[u8]) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

/// Turn one row into a record, or `None` when its name is blank.
///
/// The row's own category wins; `category_file` fills in when it is empty.
/// Exactly one id is drawn from `ids` per returned record.
pub fn normalize_row<S: AsRef<str>>(
    row: &[S],
    columns: &ColumnMap,
    category_file: &str,
    ids: &mut IdSequence,
) -> Option<ProductRecord> {
    let name = columns.value(row, Field::Name);
    if name.is_empty() {
        return None;
    }

    let label = columns.value(row, Field::Label);
    let category = match columns.value(row, Field::Category) {
        c if c.is_empty() => category_file.to_string(),
        c => c,
    };
    let id = ids.next_id(&category, &label, &name);

    Some(ProductRecord {
        id,
        serial: columns.value(row, Field::Serial),
        name,
        label,
        category,
        category_file: category_file.to_string(),
        image_link: columns.value(row, Field::ImageLink),
        photo: columns.value(row, Field::Photo),
        processes: columns.value(row, Field::Processes),
        weight: columns.value(row, Field::Weight),
        cost_price: columns.value(row, Field::CostPrice),
        hs_code: columns.value(row, Field::HsCode),
        description: columns.value(row, Field::Description),
        variations: columns.value(row, Field::Variations),
        tags: columns.value(row, Field::Tags),
        website_link: columns.value(row, Field::WebsiteLink),
        drive_link: columns.value(row, Field::DriveLink),
        attributes: columns.value(row, Field::Attributes),
        additional_category: columns.value(row, Field::AdditionalCategory),
        occasion: columns.value(row, Field::Occasion),
        kind: columns.value(row, Field::Type),
        stock: columns.value(row, Field::Stock),
    })
}

/// Normalize every valid row of one CSV file, in row order.
pub fn normalize_table(
    table: &RawTable,
    category_file: &str,
    ids: &mut IdSequence,
) -> Vec<ProductRecord> {
    let columns = ColumnMap::from_headers(&table.headers);
    if !columns.has(Field::Name) {
        debug!("No product name column in '{}' sheet", category_file);
    }

    table
        .rows
        .iter()
        .filter_map(|row| normalize_row(row, &columns, category_file, ids))
        .collect()
}

/// Parse and normalize one CSV file given its name and contents.
pub fn normalize_file(
    file_name: &str,
    bytes: &[u8],
    ids: &mut IdSequence,
) -> Result<Vec<ProductRecord>, csv::Error> {
    let table = read_csv_rows(bytes)?;
    let category_file = category_from_file_name(file_name);
    Ok(normalize_table(&table, &category_file, ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "SN,Product Name,Category Name,\"Product label\n(3-5 Characters)\",Image Link,\"Product Image\nWebsite Link\"\n";

    #[test]
    fn category_from_export_name() {
        assert_eq!(category_from_file_name("Products for New ERP - Scarves.csv"), "Scarves");
        assert_eq!(category_from_file_name("Products for New ERP -  Felt Balls .csv"), "Felt Balls");
        assert_eq!(category_from_file_name("Misc.csv"), "Misc");
    }

    #[test]
    fn clean_field_strips_cr_and_whitespace() {
        assert_eq!(clean_field("  a\r\nb\r  "), "a\nb");
        assert_eq!(clean_field("\r"), "");
    }

    #[test]
    fn red_scarf_scenario() {
        let csv = format!("{HEADER}1,Red Scarf,Scarves,RS01,,\n");
        let mut ids = IdSequence::new();
        let records =
            normalize_file("Products for New ERP - Scarves.csv", csv.as_bytes(), &mut ids).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "scarves-rs01-1");
        assert_eq!(r.category, "Scarves");
        assert_eq!(r.category_file, "Scarves");
        assert_eq!(r.label, "RS01");
        assert_eq!(r.serial, "1");
        assert_eq!(r.image_link, "");
    }

    #[test]
    fn nameless_rows_are_dropped_without_drawing_ids() {
        let csv = format!("{HEADER}1,,Scarves,RS01,,\n2,   ,Scarves,RS02,,\n3,Blue Scarf,,BS01,,\n");
        let mut ids = IdSequence::new();
        let records =
            normalize_file("Products for New ERP - Scarves.csv", csv.as_bytes(), &mut ids).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "scarves-bs01-1");
        assert_eq!(ids.issued(), 1);
    }

    #[test]
    fn empty_category_falls_back_to_file_category() {
        let csv = format!("{HEADER}1,Owl,,,,\n");
        let mut ids = IdSequence::new();
        let records =
            normalize_file("Products for New ERP - Felt Animals.csv", csv.as_bytes(), &mut ids)
                .unwrap();
        assert_eq!(records[0].category, "Felt Animals");
        assert_eq!(records[0].id, "felt-animals-owl-1");
    }

    #[test]
    fn counter_continues_across_files() {
        let mut ids = IdSequence::new();
        let a = normalize_file("a.csv", format!("{HEADER}1,Hat,Hats,H1,,\n").as_bytes(), &mut ids)
            .unwrap();
        let b = normalize_file("b.csv", format!("{HEADER}1,Hat,Hats,H1,,\n").as_bytes(), &mut ids)
            .unwrap();
        assert_eq!(a[0].id, "hats-h1-1");
        assert_eq!(b[0].id, "hats-h1-2");
    }

    #[test]
    fn crlf_file_and_short_rows() {
        let csv = "Product Name,Tags,stock\r\nMug,\"kitchen\r\n\",4\r\nCup\r\n";
        let mut ids = IdSequence::new();
        let records = normalize_file("Kitchen.csv", csv.as_bytes(), &mut ids).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tags, "kitchen");
        assert_eq!(records[0].stock, "4");
        assert_eq!(records[1].name, "Cup");
        assert_eq!(records[1].tags, "");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut bytes = b"Product Name,Description\nRug,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"\n");
        let mut ids = IdSequence::new();
        let records = normalize_file("Rugs.csv", &bytes, &mut ids).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].description.contains('\u{fffd}'));
    }

    #[test]
    fn file_without_name_column_yields_nothing() {
        let mut ids = IdSequence::new();
        let records = normalize_file("x.csv", b"Title,Tags\nHat,wool\n", &mut ids).unwrap();
        assert!(records.is_empty());
        assert_eq!(ids.peek(), 1);
    }

    #[test]
    fn empty_file_yields_nothing() {
        let mut ids = IdSequence::new();
        assert!(normalize_file("empty.csv", b"", &mut ids).unwrap().is_empty());
    }
}
