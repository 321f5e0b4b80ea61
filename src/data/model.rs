use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Listing – one row of the listings file
// ---------------------------------------------------------------------------

/// A single rental unit (one row of the NYC listings file).
///
/// Field names match the header of the source CSV so the row can be
/// deserialized directly by `csv` / `serde_json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name: String,
    pub host_id: u64,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub host_name: String,
    pub neighbourhood_group: String,
    pub neighbourhood: String,
    pub latitude: f64,
    pub longitude: f64,
    pub room_type: String,
    pub price: f64,
    pub minimum_nights: u32,
    pub number_of_reviews: u32,
    /// Date of the last review, kept as text (`YYYY-MM-DD` in the source).
    pub last_review: Option<String>,
    pub reviews_per_month: Option<f64>,
    pub calculated_host_listings_count: u32,
    /// Days per year the listing can be booked, in `0..=365`.
    pub availability_365: u16,
}

/// Listing and host names are blank for some rows (empty CSV field, JSON `null`).
fn empty_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Header names of the listings file, in file order.
pub const LISTING_COLUMNS: [&str; 16] = [
    "id",
    "name",
    "host_id",
    "host_name",
    "neighbourhood_group",
    "neighbourhood",
    "latitude",
    "longitude",
    "room_type",
    "price",
    "minimum_nights",
    "number_of_reviews",
    "last_review",
    "reviews_per_month",
    "calculated_host_listings_count",
    "availability_365",
];

// ---------------------------------------------------------------------------
// ListingTable – the immutable base table
// ---------------------------------------------------------------------------

/// The full parsed listings table with option lists computed once at load.
///
/// Never mutated after construction; filtering produces a
/// [`ListingView`](super::filter::ListingView) of row indices instead.
#[derive(Debug, Clone)]
pub struct ListingTable {
    listings: Vec<Listing>,
    room_types: Vec<String>,
    neighbourhood_groups: Vec<String>,
    price_bounds: (f64, f64),
}

impl ListingTable {
    /// Build the table and its option lists from rows in file order.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let room_types = unique_in_order(listings.iter().map(|l| l.room_type.as_str()));
        let neighbourhood_groups =
            unique_in_order(listings.iter().map(|l| l.neighbourhood_group.as_str()));

        let price_bounds = listings
            .iter()
            .map(|l| l.price)
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
            .unwrap_or((0.0, 0.0));

        ListingTable {
            listings,
            room_types,
            neighbourhood_groups,
            price_bounds,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, index: usize) -> Option<&Listing> {
        self.listings.get(index)
    }

    /// Distinct room types in first-seen order.
    pub fn room_types(&self) -> &[String] {
        &self.room_types
    }

    /// Distinct neighbourhood groups in first-seen order.
    pub fn neighbourhood_groups(&self) -> &[String] {
        &self.neighbourhood_groups
    }

    /// Global `(min, max)` price over every row; `(0, 0)` for an empty table.
    pub fn price_bounds(&self) -> (f64, f64) {
        self.price_bounds
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Distinct values, keeping the position of their first occurrence.
pub(crate) fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut out = Vec::new();
    for v in values {
        if seen.insert(v) {
            out.push(v.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// CellValue – a single cell in a generic table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Infer the type of a raw text field (CSV has no dtype information).
    pub fn infer(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" => CellValue::Bool(true),
            "false" | "False" => CellValue::Bool(false),
            _ => CellValue::Text(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – generic ordered-column table
// ---------------------------------------------------------------------------

/// A loaded table with named columns in file order.
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Replace cells of `column` equal to `from` by `to`, leaving others as-is.
    pub fn replace_values(&mut self, column: &str, replacements: &[(CellValue, CellValue)]) {
        let Some(idx) = self.column_index(column) else {
            return;
        };
        for row in &mut self.rows {
            if let Some((_, to)) = replacements.iter().find(|(from, _)| *from == row[idx]) {
                row[idx] = to.clone();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::listing;

    #[test]
    fn table_options_keep_first_seen_order() {
        let table = ListingTable::from_listings(vec![
            listing(1, "Manhattan", "Harlem", "Private room", 80.0),
            listing(2, "Brooklyn", "Kensington", "Entire home/apt", 150.0),
            listing(3, "Manhattan", "Midtown", "Private room", 40.0),
        ]);
        assert_eq!(table.room_types(), ["Private room", "Entire home/apt"]);
        assert_eq!(table.neighbourhood_groups(), ["Manhattan", "Brooklyn"]);
        assert_eq!(table.price_bounds(), (40.0, 150.0));
    }

    #[test]
    fn empty_table_has_zero_bounds() {
        let table = ListingTable::from_listings(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.price_bounds(), (0.0, 0.0));
    }

    #[test]
    fn cell_value_inference() {
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("72"), CellValue::Integer(72));
        assert_eq!(CellValue::infer("0.5"), CellValue::Float(0.5));
        assert_eq!(CellValue::infer("true"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("none"), CellValue::Text("none".into()));
    }

    #[test]
    fn replace_values_only_touches_matches() {
        let mut table = Table {
            columns: vec!["prep".into(), "score".into()],
            rows: vec![
                vec![CellValue::Text("none".into()), CellValue::Integer(70)],
                vec![CellValue::Text("completed".into()), CellValue::Integer(90)],
                vec![CellValue::Text("unknown".into()), CellValue::Integer(50)],
            ],
        };
        table.replace_values(
            "prep",
            &[
                (CellValue::Text("none".into()), CellValue::Bool(false)),
                (CellValue::Text("completed".into()), CellValue::Bool(true)),
            ],
        );
        assert_eq!(table.rows[0][0], CellValue::Bool(false));
        assert_eq!(table.rows[1][0], CellValue::Bool(true));
        assert_eq!(table.rows[2][0], CellValue::Text("unknown".into()));
        assert_eq!(table.rows[0][1], CellValue::Integer(70));
    }
}
