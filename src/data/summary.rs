use std::collections::BTreeSet;

use thiserror::Error;

use super::filter::ListingView;
use super::model::{Listing, ListingTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SummaryError {
    #[error("select at least one listing")]
    EmptySelection,
}

// ---------------------------------------------------------------------------
// Aggregate baselines over a selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean_price: f64,
    pub min_minimum_nights: u32,
}

/// Mean price and smallest minimum stay over `rows`, in one pass.
pub fn summarize<'a, I>(rows: I) -> Result<SummaryStats, SummaryError>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut count = 0usize;
    let mut price_sum = 0.0f64;
    let mut min_nights = u32::MAX;

    for row in rows {
        count += 1;
        price_sum += row.price;
        min_nights = min_nights.min(row.minimum_nights);
    }

    if count == 0 {
        return Err(SummaryError::EmptySelection);
    }

    Ok(SummaryStats {
        count,
        mean_price: price_sum / count as f64,
        min_minimum_nights: min_nights,
    })
}

// ---------------------------------------------------------------------------
// Per-row deltas
// ---------------------------------------------------------------------------

/// How a delta should be coloured when lower values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaTone {
    /// Below the baseline (green).
    Favourable,
    /// Above the baseline (red).
    Unfavourable,
    Neutral,
}

impl DeltaTone {
    pub fn inverse(delta: f64) -> Self {
        if delta < 0.0 {
            DeltaTone::Favourable
        } else if delta > 0.0 {
            DeltaTone::Unfavourable
        } else {
            DeltaTone::Neutral
        }
    }
}

/// A row compared against the selection's baselines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingDelta {
    pub price_delta: f64,
    /// Never negative: the baseline is the minimum over the selection.
    pub nights_delta: u32,
}

impl ListingDelta {
    pub fn of(listing: &Listing, stats: &SummaryStats) -> Self {
        ListingDelta {
            price_delta: listing.price - stats.mean_price,
            nights_delta: listing.minimum_nights.saturating_sub(stats.min_minimum_nights),
        }
    }

    pub fn price_tone(&self) -> DeltaTone {
        DeltaTone::inverse(self.price_delta)
    }

    pub fn nights_tone(&self) -> DeltaTone {
        DeltaTone::inverse(self.nights_delta as f64)
    }
}

// ---------------------------------------------------------------------------
// Details for a selection of the current view
// ---------------------------------------------------------------------------

/// One detail card: the row's index in the base table and its deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailCard {
    pub index: usize,
    pub delta: ListingDelta,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Details {
    pub stats: SummaryStats,
    pub cards: Vec<DetailCard>,
}

/// Resolve `selected_ids` against `view` and compute stats plus one card per
/// selected row, in view order. Identifiers that are not in the view are
/// ignored.
pub fn details(
    table: &ListingTable,
    view: &ListingView,
    selected_ids: &BTreeSet<u64>,
) -> Result<Details, SummaryError> {
    let selected: Vec<(usize, &Listing)> = view
        .indices()
        .iter()
        .filter_map(|&i| table.get(i).map(|l| (i, l)))
        .filter(|(_, l)| selected_ids.contains(&l.id))
        .collect();

    let stats = summarize(selected.iter().map(|(_, l)| *l))?;
    let cards = selected
        .iter()
        .map(|&(index, listing)| DetailCard {
            index,
            delta: ListingDelta::of(listing, &stats),
        })
        .collect();

    Ok(Details { stats, cards })
}
