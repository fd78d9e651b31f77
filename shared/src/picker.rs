use serde::{Deserialize, Serialize};

use crate::catalog::Place;

/// Which draft slot a picker writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickerTarget {
    Pickup,
    Destination,
}

impl PickerTarget {
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Pickup => "Pickup Location",
            Self::Destination => "Drop Location",
        }
    }
}

/// Places whose title or city contains `query`, ignoring case, in catalog order.
pub fn filter_places<'a>(places: &'a [Place], query: &str) -> Vec<&'a Place> {
    let needle = query.to_lowercase();
    places
        .iter()
        .filter(|place| {
            place.title.to_lowercase().contains(&needle)
                || place.city.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPicker {
    pub target: PickerTarget,
    pub query: String,
}

impl LocationPicker {
    /// The query starts out as the current selection's title, if any.
    #[must_use]
    pub fn open(target: PickerTarget, current: Option<&Place>) -> Self {
        Self {
            target,
            query: current.map(|p| p.title.clone()).unwrap_or_default(),
        }
    }

    pub fn results<'a>(&self, places: &'a [Place]) -> Vec<&'a Place> {
        filter_places(places, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, PlaceId};
    use proptest::prelude::*;

    fn ids(places: &[&Place]) -> Vec<u32> {
        places.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn empty_query_returns_whole_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(filter_places(&catalog.places, "").len(), 11);
    }

    #[test]
    fn matches_title_or_city_case_insensitively() {
        let catalog = Catalog::builtin();

        assert_eq!(ids(&filter_places(&catalog.places, "TEMPLE")), vec![3, 5]);
        assert_eq!(ids(&filter_places(&catalog.places, "patan")), vec![9]);
        // "Durbar" hits two titles.
        assert_eq!(ids(&filter_places(&catalog.places, "durbar")), vec![4, 9]);
        // every city is in Kathmandu
        assert_eq!(filter_places(&catalog.places, "kathmandu").len(), 11);
    }

    #[test]
    fn no_match_is_empty() {
        let catalog = Catalog::builtin();
        assert!(filter_places(&catalog.places, "Pokhara").is_empty());
    }

    #[test]
    fn open_prefills_current_title() {
        let catalog = Catalog::builtin();
        let current = catalog.place(PlaceId(11));

        let picker = LocationPicker::open(PickerTarget::Pickup, current);
        assert_eq!(picker.query, "Leapfrog Technology Inc.");
        assert_eq!(ids(&picker.results(&catalog.places)), vec![11]);

        let picker = LocationPicker::open(PickerTarget::Destination, None);
        assert!(picker.query.is_empty());
        assert_eq!(picker.results(&catalog.places).len(), 11);
    }

    proptest! {
        #[test]
        fn filter_is_exact_and_ordered(query in "[a-zA-Z .',]{0,8}") {
            let catalog = Catalog::builtin();
            let needle = query.to_lowercase();
            let found = filter_places(&catalog.places, &query);

            let expected: Vec<&Place> = catalog
                .places
                .iter()
                .filter(|p| {
                    p.title.to_lowercase().contains(&needle)
                        || p.city.to_lowercase().contains(&needle)
                })
                .collect();

            prop_assert_eq!(ids(&found), ids(&expected));
        }

        #[test]
        fn any_title_fragment_finds_its_place(
            index in 0usize..11,
            start in 0usize..30,
            len in 1usize..10,
            upper in any::<bool>(),
        ) {
            let catalog = Catalog::builtin();
            let place = &catalog.places[index];
            let chars: Vec<char> = place.title.chars().collect();
            let start = start.min(chars.len() - 1);
            let end = (start + len).min(chars.len());
            let mut fragment: String = chars[start..end].iter().collect();
            if upper {
                fragment = fragment.to_uppercase();
            }

            let found = filter_places(&catalog.places, &fragment);
            prop_assert!(found.iter().any(|p| p.id == place.id));
        }
    }
}
