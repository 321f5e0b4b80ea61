use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::EmptySetPolicy;

/// Listings browser command line.
#[derive(Parser, Debug)]
#[command(name = "rusty-bnb", version, about = "Browse the New York City Airbnb listings")]
pub struct ListingsCli {
    /// Listings file (.csv or .json records)
    #[arg(short, long, default_value = "NYC-airbnb-2019.csv")]
    pub data: PathBuf,

    /// What an empty multiselect filter matches
    #[arg(long, value_enum, default_value_t = EmptySetPolicy::MatchNone)]
    pub empty_filter: EmptySetPolicy,

    /// Text file shown under the title (e.g. the dataset README)
    #[arg(long)]
    pub description: Option<PathBuf>,
}

/// Students table command line.
#[derive(Parser, Debug)]
#[command(name = "students", version, about = "Students performance table")]
pub struct StudentsCli {
    /// Students file (.csv, .json records or .parquet)
    #[arg(short, long, default_value = "StudentsPerformance.csv")]
    pub data: PathBuf,
}

/// Native window settings shared by both viewers.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl ViewerConfig {
    pub fn listings() -> Self {
        ViewerConfig {
            title: "New York City Airbnb Open Data".into(),
            ..Default::default()
        }
    }

    pub fn students() -> Self {
        ViewerConfig {
            title: "Students Performance".into(),
            inner_size: [1100.0, 700.0],
            ..Default::default()
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            title: "Rusty BnB".into(),
            inner_size: [1200.0, 800.0],
            min_inner_size: [600.0, 400.0],
        }
    }
}
