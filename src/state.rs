use std::collections::BTreeSet;
use std::sync::Arc;

use crate::color::RoomTypeColors;
use crate::data::filter::{filter, EmptySetPolicy, FilterCriteria, ListingView};
use crate::data::model::ListingTable;
use crate::data::summary::{details, Details, SummaryError};

// ---------------------------------------------------------------------------
// Interaction state
// ---------------------------------------------------------------------------

/// Where the current interaction stands.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Initial state, default criteria.
    NoSelection,
    /// Filters or selection changed since the last details request.
    Filtered,
    /// Details were requested with nothing selected.
    EmptySelectionWarning,
    DetailsShown(Details),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultTab {
    #[default]
    List,
    Map,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full listings browser state, independent of rendering.
pub struct AppState {
    /// Base table, read-only and shareable between sessions.
    pub table: Arc<ListingTable>,

    pub criteria: FilterCriteria,

    pub policy: EmptySetPolicy,

    /// Rows passing the current criteria (recomputed on every filter change).
    pub view: ListingView,

    /// Identifiers of the rows ticked in the list.
    pub selected: BTreeSet<u64>,

    pub interaction: Interaction,

    pub tab: ResultTab,

    pub colors: RoomTypeColors,

    /// Optional text shown under the title.
    pub description: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(table: Arc<ListingTable>, policy: EmptySetPolicy) -> Self {
        let criteria = FilterCriteria::new(&table);
        let view = filter(&table, &criteria, policy);
        let colors = RoomTypeColors::new(table.room_types());
        AppState {
            table,
            criteria,
            policy,
            view,
            selected: BTreeSet::new(),
            interaction: Interaction::NoSelection,
            tab: ResultTab::default(),
            colors,
            description: None,
            status_message: None,
        }
    }

    /// Swap in a newly loaded table and reset every filter.
    pub fn set_table(&mut self, table: Arc<ListingTable>) {
        let description = self.description.take();
        *self = AppState::new(table, self.policy);
        self.description = description;
    }

    /// Re-run the filter after a criteria change.
    ///
    /// Selected ids that left the view are dropped.
    pub fn refilter(&mut self) {
        self.view = filter(&self.table, &self.criteria, self.policy);
        let visible: BTreeSet<u64> = self.view.rows(&self.table).map(|l| l.id).collect();
        self.selected.retain(|id| visible.contains(id));
        self.interaction = Interaction::Filtered;
        log::debug!("filter matched {} of {} listings", self.view.len(), self.table.len());
    }

    /// `true` when the criteria match no rows and "no results" must be shown.
    pub fn no_results(&self) -> bool {
        self.view.is_empty()
    }

    pub fn neighbourhood_options(&self) -> Vec<String> {
        crate::data::filter::neighbourhood_options(&self.table, self.criteria.neighbourhood_groups())
    }

    pub fn toggle_room_type(&mut self, room_type: &str) {
        self.criteria.toggle_room_type(room_type);
        self.refilter();
    }

    pub fn toggle_neighbourhood_group(&mut self, group: &str) {
        self.criteria.toggle_neighbourhood_group(&self.table, group);
        self.refilter();
    }

    pub fn toggle_neighbourhood(&mut self, neighbourhood: &str) {
        if self.criteria.neighbourhoods().contains(neighbourhood) {
            self.criteria.deselect_neighbourhood(neighbourhood);
        } else {
            self.criteria.select_neighbourhood(&self.table, neighbourhood);
        }
        self.refilter();
    }

    /// Select every neighbourhood currently offered.
    pub fn select_all_neighbourhoods(&mut self) {
        for n in self.neighbourhood_options() {
            self.criteria.select_neighbourhood(&self.table, &n);
        }
        self.refilter();
    }

    pub fn clear_neighbourhoods(&mut self) {
        self.criteria.clear_neighbourhoods();
        self.refilter();
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        if (min, max) == self.criteria.price_range() {
            return;
        }
        self.criteria.set_price_range(min, max);
        self.refilter();
    }

    /// Tick or untick a row of the current view.
    pub fn toggle_selected(&mut self, id: u64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.interaction = Interaction::Filtered;
    }

    /// "See details": summarise the ticked rows of the current view.
    pub fn request_details(&mut self) {
        self.interaction = match details(&self.table, &self.view, &self.selected) {
            Ok(details) => {
                log::info!(
                    "details for {} listings, mean price {:.2}",
                    details.stats.count,
                    details.stats.mean_price
                );
                Interaction::DetailsShown(details)
            }
            Err(SummaryError::EmptySelection) => {
                log::debug!("details requested with an empty selection");
                Interaction::EmptySelectionWarning
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::three_rows;

    fn state() -> AppState {
        AppState::new(Arc::new(three_rows()), EmptySetPolicy::MatchNone)
    }

    /// Select every room type, group and neighbourhood.
    fn open_all(state: &mut AppState) {
        for r in state.table.clone().room_types() {
            state.toggle_room_type(r);
        }
        for g in state.table.clone().neighbourhood_groups() {
            state.toggle_neighbourhood_group(g);
        }
        state.select_all_neighbourhoods();
    }

    #[test]
    fn starts_with_no_selection_and_no_results() {
        let state = state();
        assert_eq!(state.interaction, Interaction::NoSelection);
        assert!(state.no_results());
        assert_eq!(state.criteria.price_range(), (50.0, 150.0));
    }

    #[test]
    fn filter_change_moves_to_filtered() {
        let mut state = state();
        open_all(&mut state);
        assert_eq!(state.interaction, Interaction::Filtered);
        assert_eq!(state.view.len(), 3);
    }

    #[test]
    fn details_without_selection_warns() {
        let mut state = state();
        open_all(&mut state);
        state.request_details();
        assert_eq!(state.interaction, Interaction::EmptySelectionWarning);
        assert_eq!(state.view.len(), 3);
    }

    #[test]
    fn details_with_selection_are_shown() {
        let mut state = state();
        open_all(&mut state);
        state.toggle_selected(1);
        state.toggle_selected(3);
        state.request_details();
        match &state.interaction {
            Interaction::DetailsShown(details) => {
                assert_eq!(details.stats.mean_price, 100.0);
                assert_eq!(details.cards.len(), 2);
            }
            other => panic!("unexpected state: {other:?}"),
        }

        state.toggle_selected(3);
        assert_eq!(state.interaction, Interaction::Filtered);
    }

    #[test]
    fn selection_is_pruned_to_the_view() {
        let mut state = state();
        open_all(&mut state);
        state.toggle_selected(1);
        state.toggle_selected(2);
        state.set_price_range(100.0, 150.0);
        assert_eq!(state.selected, BTreeSet::from([2]));
    }

    #[test]
    fn match_all_group_choice_narrows_the_view() {
        let mut state = AppState::new(Arc::new(three_rows()), EmptySetPolicy::MatchAll);
        assert_eq!(state.view.len(), 3);
        state.toggle_neighbourhood_group("Manhattan");
        let ids: Vec<u64> = state.view.rows(&state.table).map(|l| l.id).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn deselecting_a_group_clears_its_neighbourhoods() {
        let mut state = state();
        open_all(&mut state);
        state.toggle_neighbourhood_group("Manhattan");
        assert_eq!(state.neighbourhood_options(), ["Kensington"]);
        let ids: Vec<u64> = state.view.rows(&state.table).map(|l| l.id).collect();
        assert_eq!(ids, [1]);
    }

    #[test]
    fn replacing_the_table_resets_criteria() {
        let mut state = state();
        open_all(&mut state);
        state.description = Some("about".into());
        state.set_table(Arc::new(three_rows()));
        assert_eq!(state.interaction, Interaction::NoSelection);
        assert!(state.criteria.room_types.is_empty());
        assert_eq!(state.description.as_deref(), Some("about"));
    }
}
