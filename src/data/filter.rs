use std::collections::BTreeSet;

use super::model::{unique_in_order, Listing, ListingTable};

// ---------------------------------------------------------------------------
// Empty-set policy
// ---------------------------------------------------------------------------

/// What an empty multiselect means for the membership predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EmptySetPolicy {
    /// Membership in an empty set is false for every row: nothing matches.
    #[default]
    MatchNone,
    /// An empty set puts no constraint on the column.
    MatchAll,
}

impl EmptySetPolicy {
    fn admits(self, selected: &BTreeSet<String>, value: &str) -> bool {
        if selected.is_empty() {
            return self == EmptySetPolicy::MatchAll;
        }
        selected.contains(value)
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The user's current filter choices.
///
/// `neighbourhoods` is always a subset of
/// [`neighbourhood_options`] for `neighbourhood_groups`; use
/// [`FilterCriteria::set_neighbourhood_groups`] to change the groups.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub room_types: BTreeSet<String>,
    neighbourhood_groups: BTreeSet<String>,
    neighbourhoods: BTreeSet<String>,
    min_price: f64,
    max_price: f64,
    bounds: (f64, f64),
}

impl FilterCriteria {
    /// Initial criteria: nothing selected, price range spanning the whole table.
    pub fn new(table: &ListingTable) -> Self {
        let bounds = table.price_bounds();
        FilterCriteria {
            room_types: BTreeSet::new(),
            neighbourhood_groups: BTreeSet::new(),
            neighbourhoods: BTreeSet::new(),
            min_price: bounds.0,
            max_price: bounds.1,
            bounds,
        }
    }

    pub fn neighbourhood_groups(&self) -> &BTreeSet<String> {
        &self.neighbourhood_groups
    }

    pub fn neighbourhoods(&self) -> &BTreeSet<String> {
        &self.neighbourhoods
    }

    pub fn price_range(&self) -> (f64, f64) {
        (self.min_price, self.max_price)
    }

    /// Replace the group selection and drop neighbourhoods that are no
    /// longer offered for it.
    pub fn set_neighbourhood_groups(&mut self, table: &ListingTable, groups: BTreeSet<String>) {
        self.neighbourhood_groups = groups;
        let legal: BTreeSet<String> = neighbourhood_options(table, &self.neighbourhood_groups)
            .into_iter()
            .collect();
        self.neighbourhoods.retain(|n| legal.contains(n));
    }

    /// Toggle one group in or out of the selection.
    pub fn toggle_neighbourhood_group(&mut self, table: &ListingTable, group: &str) {
        let mut groups = self.neighbourhood_groups.clone();
        if !groups.remove(group) {
            groups.insert(group.to_string());
        }
        self.set_neighbourhood_groups(table, groups);
    }

    /// Select a neighbourhood. Returns `false` (and changes nothing) when it
    /// is not an option for the selected groups.
    pub fn select_neighbourhood(&mut self, table: &ListingTable, neighbourhood: &str) -> bool {
        let legal = neighbourhood_options(table, &self.neighbourhood_groups)
            .iter()
            .any(|n| n == neighbourhood);
        if legal {
            self.neighbourhoods.insert(neighbourhood.to_string());
        }
        legal
    }

    pub fn deselect_neighbourhood(&mut self, neighbourhood: &str) {
        self.neighbourhoods.remove(neighbourhood);
    }

    pub fn clear_neighbourhoods(&mut self) {
        self.neighbourhoods.clear();
    }

    pub fn toggle_room_type(&mut self, room_type: &str) {
        if !self.room_types.remove(room_type) {
            self.room_types.insert(room_type.to_string());
        }
    }

    /// Set the inclusive price range, clamped to the table's bounds.
    /// A reversed pair is swapped.
    pub fn set_price_range(&mut self, min: f64, max: f64) {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.min_price = lo.clamp(self.bounds.0, self.bounds.1);
        self.max_price = hi.clamp(self.bounds.0, self.bounds.1);
    }

    /// Whether a single row passes every predicate.
    pub fn matches(&self, listing: &Listing, policy: EmptySetPolicy) -> bool {
        policy.admits(&self.room_types, &listing.room_type)
            && self.admits_area(listing, policy)
            && listing.price >= self.min_price
            && listing.price <= self.max_price
    }

    /// Neighbourhoods are scoped by the groups they belong to, so an
    /// unconstrained neighbourhood set still falls back to the group set.
    fn admits_area(&self, listing: &Listing, policy: EmptySetPolicy) -> bool {
        if !self.neighbourhoods.is_empty() {
            return self.neighbourhoods.contains(&listing.neighbourhood);
        }
        match policy {
            EmptySetPolicy::MatchNone => false,
            EmptySetPolicy::MatchAll => {
                policy.admits(&self.neighbourhood_groups, &listing.neighbourhood_group)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Derived neighbourhood options
// ---------------------------------------------------------------------------

/// Neighbourhoods whose group is in `groups`, in first-seen order.
///
/// Recomputed on every call so the options can never lag behind the group
/// selection.
pub fn neighbourhood_options(table: &ListingTable, groups: &BTreeSet<String>) -> Vec<String> {
    unique_in_order(
        table
            .listings()
            .iter()
            .filter(|l| groups.contains(&l.neighbourhood_group))
            .map(|l| l.neighbourhood.as_str()),
    )
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Row indices into the base table that passed the filter, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingView {
    indices: Vec<usize>,
}

impl ListingView {
    /// A view over every row of the table.
    pub fn all(table: &ListingTable) -> Self {
        ListingView {
            indices: (0..table.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Iterate the visible rows in table order.
    pub fn rows<'a>(&'a self, table: &'a ListingTable) -> impl Iterator<Item = &'a Listing> + 'a {
        self.indices.iter().filter_map(move |&i| table.get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// `true` means "no results" must be reported instead of a table.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Apply `criteria` to every row of `table`.
pub fn filter(table: &ListingTable, criteria: &FilterCriteria, policy: EmptySetPolicy) -> ListingView {
    let indices = table
        .listings()
        .iter()
        .enumerate()
        .filter(|(_, listing)| criteria.matches(listing, policy))
        .map(|(i, _)| i)
        .collect();
    ListingView { indices }
}
