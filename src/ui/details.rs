use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::tone_color;
use crate::data::model::Listing;
use crate::data::summary::{DeltaTone, ListingDelta};
use crate::state::{AppState, Interaction};
use crate::ui::panels::WARNING;

/// Warning or detail cards, depending on the last "See details" request.
pub fn details_section(ui: &mut Ui, state: &AppState) {
    match &state.interaction {
        Interaction::EmptySelectionWarning => {
            ui.label(
                RichText::new("Please select at least one airbnb")
                    .color(WARNING)
                    .strong(),
            );
        }
        Interaction::DetailsShown(details) => {
            egui::CollapsingHeader::new(format!("Details ({})", details.stats.count))
                .id_salt("details")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ScrollArea::vertical()
                        .id_salt("details_scroll")
                        .auto_shrink([false, true])
                        .show(ui, |ui: &mut Ui| {
                            for card in &details.cards {
                                if let Some(listing) = state.table.get(card.index) {
                                    detail_card(ui, listing, &card.delta);
                                    ui.separator();
                                }
                            }
                        });
                });
        }
        Interaction::NoSelection | Interaction::Filtered => {}
    }
}

fn detail_card(ui: &mut Ui, listing: &Listing, delta: &ListingDelta) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(
            RichText::new(&listing.name)
                .heading()
                .color(Color32::LIGHT_BLUE),
        );
        ui.label(RichText::new(format!("- {}", listing.host_name)).italics());
    });
    ui.label(
        RichText::new(format!(
            "{} located in {}, {}",
            listing.room_type, listing.neighbourhood, listing.neighbourhood_group
        ))
        .italics(),
    );

    ui.columns(3, |cols| {
        metric(
            &mut cols[0],
            "Price",
            &format!("$ {}", listing.price),
            Some((
                delta.price_delta,
                format!("{:.2}", delta.price_delta),
                delta.price_tone(),
            )),
        );
        metric(
            &mut cols[1],
            "Minimum nights number",
            &listing.minimum_nights.to_string(),
            Some((
                f64::from(delta.nights_delta),
                delta.nights_delta.to_string(),
                delta.nights_tone(),
            )),
        );
        metric(
            &mut cols[2],
            "Host's number of listings",
            &listing.calculated_host_listings_count.to_string(),
            None,
        );
    });

    ui.columns(3, |cols| {
        metric(
            &mut cols[0],
            "Number of reviews",
            &listing.number_of_reviews.to_string(),
            None,
        );
        metric(
            &mut cols[1],
            "Date of last review",
            listing.last_review.as_deref().unwrap_or("-"),
            None,
        );
        let per_month = listing
            .reviews_per_month
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        metric(&mut cols[2], "Review per month", &per_month, None);
    });
}

/// Label, large value and an optional coloured delta underneath.
fn metric(ui: &mut Ui, label: &str, value: &str, delta: Option<(f64, String, DeltaTone)>) {
    ui.label(RichText::new(label).small().weak());
    ui.label(RichText::new(value).size(22.0));
    if let Some((amount, text, tone)) = delta {
        let arrow = delta_arrow(amount, tone);
        ui.label(RichText::new(format!("{arrow}{text}")).color(tone_color(tone)));
    }
}

fn delta_arrow(amount: f64, tone: DeltaTone) -> &'static str {
    match tone {
        DeltaTone::Neutral => "",
        _ if amount < 0.0 => "↓ ",
        _ if amount > 0.0 => "↑ ",
        _ => "",
    }
}
