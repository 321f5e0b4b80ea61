use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Listing, ListingTable, Table, LISTING_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a dataset could not be loaded. Any of these is fatal at startup:
/// no partial table is ever handed to the UI.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected {expected} fields but found {found}")]
    ColumnCount { line: u64, expected: u64, found: u64 },

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        message: String,
    },

    #[error("malformed CSV")]
    Csv(#[source] csv::Error),

    #[error("malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet file")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("unreadable arrow column")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                pos,
                expected_len,
                len,
            } => LoadError::ColumnCount {
                line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                expected: *expected_len,
                found: *len,
            },
            _ => LoadError::Csv(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the listings table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the sixteen listing columns
/// * `.json` – `[{ "id": 2539, "name": "...", ... }, ...]` (`orient='records'`)
pub fn load_listings(path: &Path) -> Result<ListingTable, LoadError> {
    let listings = match extension(path).as_str() {
        "csv" => read_listings_csv(path)?,
        "json" => read_listings_json(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    for (row, listing) in listings.iter().enumerate() {
        validate_listing(row, listing)?;
    }

    log::debug!("parsed {} listings from {}", listings.len(), path.display());
    Ok(ListingTable::from_listings(listings))
}

/// Load a generic table (students dataset and friends).  Dispatch by extension.
///
/// * `.csv`             – header row, cell types inferred per value
/// * `.json`            – records array; columns are the sorted union of keys
/// * `.parquet` / `.pq` – any flat schema written by Pandas or Polars
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let table = match extension(path).as_str() {
        "csv" => load_table_csv(path)?,
        "json" => load_table_json(path)?,
        "parquet" | "pq" => load_table_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };
    log::debug!(
        "parsed {} rows x {} columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

fn read_listings_csv(path: &Path) -> Result<Vec<Listing>, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);

    let headers: BTreeSet<String> = reader.headers()?.iter().map(str::to_string).collect();
    if let Some(missing) = LISTING_COLUMNS.iter().find(|c| !headers.contains(**c)) {
        return Err(LoadError::MissingColumn(missing.to_string()));
    }

    reader
        .deserialize::<Listing>()
        .map(|record| record.map_err(LoadError::from))
        .collect()
}

fn read_listings_json(path: &Path) -> Result<Vec<Listing>, LoadError> {
    let reader = BufReader::new(open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn validate_listing(row: usize, listing: &Listing) -> Result<(), LoadError> {
    let invalid = |column, message: &str| LoadError::InvalidValue {
        row,
        column,
        message: message.to_string(),
    };

    if !listing.price.is_finite() || listing.price < 0.0 {
        return Err(invalid("price", "must be a finite non-negative number"));
    }
    if !listing.latitude.is_finite() {
        return Err(invalid("latitude", "must be a finite number"));
    }
    if !listing.longitude.is_finite() {
        return Err(invalid("longitude", "must be a finite number"));
    }
    if listing.minimum_nights == 0 {
        return Err(invalid("minimum_nights", "must be at least 1"));
    }
    if listing.availability_365 > 365 {
        return Err(invalid("availability_365", "must be within 0..=365"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Generic CSV loader
// ---------------------------------------------------------------------------

fn load_table_csv(path: &Path) -> Result<Table, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::infer).collect());
    }

    Ok(Table { columns, rows })
}

// ---------------------------------------------------------------------------
// Generic JSON loader
// ---------------------------------------------------------------------------

fn load_table_json(path: &Path) -> Result<Table, LoadError> {
    let reader = BufReader::new(open(path)?);
    let records: Vec<serde_json::Map<String, JsonValue>> = serde_json::from_reader(reader)?;

    let columns: Vec<String> = records
        .iter()
        .flat_map(|rec| rec.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = records
        .iter()
        .map(|rec| {
            columns
                .iter()
                .map(|col| rec.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Table { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Generic Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_table_parquet(path: &Path) -> Result<Table, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| extract_cell(col, row))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
    }

    Ok(Table { columns, rows })
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<CellValue, LoadError> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };

    match cell {
        Some(cell) => Ok(cell),
        // Dates, dictionaries, decimals…: fall back to Arrow's own rendering.
        None => Ok(CellValue::Text(array_value_to_string(col.as_ref(), row)?)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "id,name,host_id,host_name,neighbourhood_group,neighbourhood,latitude,longitude,room_type,price,minimum_nights,number_of_reviews,last_review,reviews_per_month,calculated_host_listings_count,availability_365";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_listings_csv_in_file_order() {
        let file = write_temp(
            ".csv",
            &format!(
                "{HEADER}\n\
                 2539,Clean & quiet apt home by the park,2787,John,Brooklyn,Kensington,40.64749,-73.97237,Private room,149,1,9,2018-10-19,0.21,6,365\n\
                 3647,THE VILLAGE OF HARLEM....NEW YORK !,4632,Elisabeth,Manhattan,Harlem,40.80902,-73.9419,Private room,150,3,0,,,1,365\n"
            ),
        );

        let table = load_listings(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        let first = &table.listings()[0];
        assert_eq!(first.id, 2539);
        assert_eq!(first.last_review.as_deref(), Some("2018-10-19"));
        assert_eq!(first.reviews_per_month, Some(0.21));

        let second = &table.listings()[1];
        assert_eq!(second.id, 3647);
        assert_eq!(second.last_review, None);
        assert_eq!(second.reviews_per_month, None);
        assert_eq!(table.price_bounds(), (149.0, 150.0));
    }

    #[test]
    fn blank_names_load_as_empty_text() {
        let file = write_temp(
            ".csv",
            &format!(
                "{HEADER}\n1,,2,,Queens,Astoria,40.7,-73.9,Shared room,40,1,0,,,1,0\n"
            ),
        );
        let table = load_listings(file.path()).unwrap();
        assert_eq!(table.listings()[0].name, "");
        assert_eq!(table.listings()[0].host_name, "");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_listings(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "{err:?}");
    }

    #[test]
    fn row_with_extra_field_is_column_count_error() {
        let file = write_temp(
            ".csv",
            &format!(
                "{HEADER}\n1,a,2,b,Queens,Astoria,40.7,-73.9,Shared room,40,1,0,,,1,0,extra\n"
            ),
        );
        let err = load_listings(file.path()).unwrap_err();
        match err {
            LoadError::ColumnCount {
                expected, found, ..
            } => {
                assert_eq!(expected, 16);
                assert_eq!(found, 17);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_header_column_is_reported_by_name() {
        let header = HEADER.replace(",availability_365", "");
        let file = write_temp(
            ".csv",
            &format!("{header}\n1,a,2,b,Queens,Astoria,40.7,-73.9,Shared room,40,1,0,,,1\n"),
        );
        let err = load_listings(file.path()).unwrap_err();
        assert!(
            matches!(&err, LoadError::MissingColumn(c) if c == "availability_365"),
            "{err:?}"
        );
    }

    #[test]
    fn non_numeric_price_is_csv_error() {
        let file = write_temp(
            ".csv",
            &format!("{HEADER}\n1,a,2,b,Queens,Astoria,40.7,-73.9,Shared room,cheap,1,0,,,1,0\n"),
        );
        let err = load_listings(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "{err:?}");
    }

    #[test]
    fn availability_above_year_is_rejected() {
        let file = write_temp(
            ".csv",
            &format!("{HEADER}\n1,a,2,b,Queens,Astoria,40.7,-73.9,Shared room,40,1,0,,,1,366\n"),
        );
        let err = load_listings(file.path()).unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::InvalidValue {
                    row: 0,
                    column: "availability_365",
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let cases = [
            ("inf", "40.7", "price"),
            ("NaN", "40.7", "price"),
            ("40", "inf", "latitude"),
        ];
        for (price, latitude, expected) in cases {
            let file = write_temp(
                ".csv",
                &format!(
                    "{HEADER}\n1,a,2,b,Queens,Astoria,{latitude},-73.9,Shared room,{price},1,0,,,1,10\n"
                ),
            );
            let err = load_listings(file.path()).unwrap_err();
            assert!(
                matches!(err, LoadError::InvalidValue { row: 0, column, .. } if column == expected),
                "{price}/{latitude}: {err:?}"
            );
        }
    }

    #[test]
    fn loads_listings_json_records() {
        let file = write_temp(
            ".json",
            r#"[{"id":1,"name":null,"host_id":2,"host_name":"Ann","neighbourhood_group":"Bronx",
                 "neighbourhood":"Mott Haven","latitude":40.8,"longitude":-73.92,
                 "room_type":"Entire home/apt","price":120,"minimum_nights":2,
                 "number_of_reviews":4,"last_review":null,"reviews_per_month":null,
                 "calculated_host_listings_count":1,"availability_365":200}]"#,
        );
        let table = load_listings(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.listings()[0].name, "");
        assert_eq!(table.listings()[0].price, 120.0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        let err = load_listings(file.path()).unwrap_err();
        assert!(matches!(&err, LoadError::UnsupportedExtension(e) if e == "xlsx"));
    }

    #[test]
    fn generic_csv_keeps_column_order_and_infers_types() {
        let file = write_temp(
            ".csv",
            "gender,test preparation course,math score\nfemale,none,72\nmale,completed,69\n",
        );
        let table = load_table(file.path()).unwrap();
        assert_eq!(
            table.columns,
            ["gender", "test preparation course", "math score"]
        );
        assert_eq!(table.rows[0][0], CellValue::Text("female".into()));
        assert_eq!(table.rows[1][2], CellValue::Integer(69));
    }

    #[test]
    fn generic_json_fills_missing_keys_with_null() {
        let file = write_temp(".json", r#"[{"a": 1, "b": "x"}, {"a": 2.5}]"#);
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.columns, ["a", "b"]);
        assert_eq!(table.rows[1][0], CellValue::Float(2.5));
        assert_eq!(table.rows[1][1], CellValue::Null);
    }
}
