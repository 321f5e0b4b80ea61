//! Shared row builders for unit tests.

use super::model::{Listing, ListingTable};

pub(crate) fn listing(id: u64, group: &str, hood: &str, room: &str, price: f64) -> Listing {
    Listing {
        id,
        name: format!("Listing {id}"),
        host_id: id * 10,
        host_name: "Host".into(),
        neighbourhood_group: group.into(),
        neighbourhood: hood.into(),
        latitude: 40.7,
        longitude: -73.9,
        room_type: room.into(),
        price,
        minimum_nights: 1,
        number_of_reviews: 0,
        last_review: None,
        reviews_per_month: None,
        calculated_host_listings_count: 1,
        availability_365: 100,
    }
}

/// Three rows priced 50 / 100 / 150 with minimum nights 1 / 2 / 3.
pub(crate) fn three_rows() -> ListingTable {
    let rows = [
        (1, "Brooklyn", "Kensington", "Private room", 50.0, 1),
        (2, "Manhattan", "Midtown", "Entire home/apt", 100.0, 2),
        (3, "Manhattan", "Harlem", "Private room", 150.0, 3),
    ];
    ListingTable::from_listings(
        rows.into_iter()
            .map(|(id, group, hood, room, price, nights)| Listing {
                minimum_nights: nights,
                ..listing(id, group, hood, room, price)
            })
            .collect(),
    )
}
