//! Built-in mock data: places, promo offers, trip history, cancellation
//! reasons and the assigned driver. Nothing here is ever mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::cancel::{CancelReason, CancelReasonId};
use crate::history::{ActivityId, ActivityRecord, ActivityStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(pub u32);

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is out of valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is out of valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Coordinate value is not finite (NaN or Infinity)")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub title: String,
    pub city: String,
    pub coordinate: Coordinate,
}

impl Place {
    fn new(
        id: u32,
        title: &str,
        city: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, CoordinateError> {
        Ok(Self {
            id: PlaceId(id),
            title: title.to_string(),
            city: city.to_string(),
            coordinate: Coordinate::new(latitude, longitude)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoOffer {
    pub code: String,
    pub description: String,
}

/// The driver shown once a ride has been "found".
#[derive(Debug, Clone, PartialEq)]
pub struct MockDriver {
    pub name: &'static str,
    pub distance_text: &'static str,
    pub rating: f32,
    pub eta_text: &'static str,
}

pub const MOCK_DRIVER: MockDriver = MockDriver {
    name: "John Doe",
    distance_text: "800m (5 mins away)",
    rating: 4.5,
    eta_text: "1:00",
};

/// A canned polyline between two catalog places, as `[longitude, latitude]`.
pub struct MockRoute {
    pub from: PlaceId,
    pub to: PlaceId,
    pub path: &'static [[f64; 2]],
}

#[allow(clippy::unreadable_literal)]
pub const DEMO_ROUTE: MockRoute = MockRoute {
    from: PlaceId(11),
    to: PlaceId(1),
    path: &[
        [85.327246, 27.707435],
        [85.327215, 27.707302],
        [85.327208, 27.707278],
        [85.327168, 27.707064],
        [85.327162, 27.70704],
        [85.327025, 27.706492],
        [85.326924, 27.706166],
        [85.326849, 27.705877],
        [85.326845, 27.705858],
        [85.326776, 27.705362],
        [85.326521, 27.705349],
        [85.326287, 27.705371],
        [85.326156, 27.705388],
        [85.325535, 27.705472],
        [85.325132, 27.705511],
        [85.32461, 27.705566],
        [85.324199, 27.705632],
        [85.324148, 27.705628],
        [85.324061, 27.705618],
        [85.323962, 27.705621],
        [85.32287, 27.705647],
        [85.322824, 27.705021],
        [85.322758, 27.704648],
        [85.322746, 27.704572],
        [85.322662, 27.703998],
        [85.322609, 27.703692],
        [85.322516, 27.703087],
        [85.322485, 27.70282],
        [85.322427, 27.702414],
        [85.322393, 27.70217],
        [85.322382, 27.702091],
        [85.32237, 27.702006],
        [85.322352, 27.701879],
        [85.322301, 27.701606],
        [85.322182, 27.700999],
        [85.322174, 27.700839],
        [85.322132, 27.700648],
        [85.322074, 27.700379],
        [85.321923, 27.699683],
        [85.32179, 27.699086],
        [85.321719, 27.698769],
        [85.32169, 27.69863],
        [85.321662, 27.69849],
        [85.321643, 27.698409],
        [85.321543, 27.69809],
        [85.321412, 27.69751],
        [85.3212, 27.696566],
        [85.321048, 27.695921],
        [85.320957, 27.695485],
        [85.320876, 27.695132],
        [85.320863, 27.695065],
        [85.320846, 27.69499],
        [85.320737, 27.694546],
        [85.320722, 27.6945],
        [85.320687, 27.694418],
        [85.320645, 27.694353],
        [85.320597, 27.694304],
        [85.320545, 27.694269],
        [85.320491, 27.694246],
        [85.320437, 27.694233],
        [85.320385, 27.694228],
        [85.320336, 27.694229],
        [85.320293, 27.694234],
        [85.320256, 27.694241],
        [85.320229, 27.694249],
        [85.320213, 27.694256],
        [85.31998, 27.694362],
        [85.31996, 27.69437],
        [85.319948, 27.694375],
        [85.319935, 27.694379],
        [85.319917, 27.694385],
        [85.319892, 27.694392],
        [85.319863, 27.694397],
        [85.319828, 27.6944],
        [85.319789, 27.694399],
        [85.319746, 27.694392],
        [85.319766, 27.69438],
        [85.319793, 27.694338],
        [85.319815, 27.694303],
        [85.319867, 27.694256],
        [85.319931, 27.694181],
        [85.320178, 27.69392],
        [85.320312, 27.693798],
        [85.320457, 27.693664],
        [85.320464, 27.693635],
        [85.320473, 27.693608],
        [85.320425, 27.69346],
        [85.320448, 27.693423],
        [85.320463, 27.693398],
        [85.320593, 27.693335],
        [85.320714, 27.693283],
        [85.320871, 27.693262],
        [85.320921, 27.693241],
    ],
};

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub places: Vec<Place>,
    pub offers: Vec<PromoOffer>,
    pub activities: Vec<ActivityRecord>,
    pub cancel_reasons: Vec<CancelReason>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            places: builtin_places(),
            offers: builtin_offers(),
            activities: builtin_activities(),
            cancel_reasons: builtin_cancel_reasons(),
        }
    }

    #[must_use]
    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    /// Looks up an offer by code, ignoring surrounding whitespace and case.
    #[must_use]
    pub fn offer(&self, code: &str) -> Option<&PromoOffer> {
        let wanted = code.trim();
        if wanted.is_empty() {
            return None;
        }
        self.offers
            .iter()
            .find(|o| o.code.eq_ignore_ascii_case(wanted))
    }

    #[must_use]
    pub fn cancel_reason(&self, id: CancelReasonId) -> Option<&CancelReason> {
        self.cancel_reasons.iter().find(|r| r.id == id)
    }
}

#[allow(clippy::unreadable_literal)]
fn builtin_places() -> Vec<Place> {
    [
        (1, "St. Xavier's College", "Maitighar, Kathmandu", 27.6933113, 85.3211291),
        (2, "Boudhanath Stupa", "Boudha, Kathmandu", 27.721816, 85.361514),
        (3, "Swayambhunath Temple", "Swayambhu, Kathmandu", 27.714035, 85.290685),
        (4, "Durbar Square", "Hanuman Dhoka, Kathmandu", 27.7045, 85.3076),
        (5, "Pashupatinath Temple", "Pashupati, Kathmandu", 27.7109, 85.3483),
        (6, "Thamel Market", "Thamel, Kathmandu", 27.7162, 85.3132),
        (7, "Garden of Dreams", "Keshar Mahal, Kathmandu", 27.7127, 85.3205),
        (8, "Nagarkot Viewpoint", "Nagarkot, Kathmandu", 27.7154, 85.5241),
        (9, "Patan Durbar Square", "Patan, Kathmandu", 27.6644, 85.3188),
        (10, "Kopan Monastery", "Kopan, Kathmandu", 27.7654, 85.3666),
        (11, "Leapfrog Technology Inc.", "Charkhal Rd, Kathmandu", 27.7074128, 85.3273696),
    ]
    .into_iter()
    .filter_map(|(id, title, city, lat, lon)| match Place::new(id, title, city, lat, lon) {
        Ok(place) => Some(place),
        Err(e) => {
            tracing::error!(id, title, error = %e, "dropping place with bad coordinate");
            None
        }
    })
    .collect()
}

fn builtin_offers() -> Vec<PromoOffer> {
    [
        ("SAVE10", "10% off your next ride"),
        ("FIRST50", "Rs. 50 off your first ride"),
        ("BIKE20", "20% off bike rides"),
        ("WEEKEND15", "15% off rides on Saturday"),
    ]
    .into_iter()
    .map(|(code, description)| PromoOffer {
        code: code.to_string(),
        description: description.to_string(),
    })
    .collect()
}

fn builtin_activities() -> Vec<ActivityRecord> {
    use ActivityStatus::{Cancelled, Completed, Upcoming};

    [
        (1, Upcoming, "2024-11-02T09:30:00", "Leapfrog Technology Inc.", "St. Xavier's College", "Ram Shrestha", "Honda Dio"),
        (2, Completed, "2024-10-28T18:15:00", "Thamel Market", "Boudhanath Stupa", "Sita Gurung", "Hyundai i10"),
        (3, Cancelled, "2024-10-25T07:45:00", "Patan Durbar Square", "Garden of Dreams", "Hari Tamang", "Bajaj Pulsar"),
        (4, Completed, "2024-10-20T12:00:00", "Durbar Square", "Swayambhunath Temple", "Gita Rai", "Suzuki Alto"),
        (5, Upcoming, "2024-11-05T16:20:00", "Kopan Monastery", "Pashupatinath Temple", "Bikash Thapa", "Yamaha FZ"),
        (6, Cancelled, "2024-10-18T08:10:00", "Nagarkot Viewpoint", "Thamel Market", "Anita Magar", "Tata Tiago"),
        (7, Completed, "2024-10-15T20:40:00", "St. Xavier's College", "Leapfrog Technology Inc.", "Suresh Karki", "TVS Ntorq"),
        (8, Upcoming, "2024-11-10T06:00:00", "Boudhanath Stupa", "Nagarkot Viewpoint", "Maya Lama", "Kia Picanto"),
        (9, Completed, "2024-10-12T14:35:00", "Garden of Dreams", "Patan Durbar Square", "Kiran Basnet", "Honda Shine"),
    ]
    .into_iter()
    .map(
        |(id, status, date_time, pick, drop, rider, vehicle)| ActivityRecord {
            id: ActivityId(id),
            status,
            date_time: date_time.to_string(),
            pick_location: pick.to_string(),
            drop_location: drop.to_string(),
            rider_name: rider.to_string(),
            vehicle_name: vehicle.to_string(),
        },
    )
    .collect()
}

fn builtin_cancel_reasons() -> Vec<CancelReason> {
    [
        (1, "Waiting for a long time"),
        (2, "Unable to contact driver"),
        (3, "Driver denied going to destination"),
        (4, "Driver denied coming to pickup"),
        (5, "Wrong address shown"),
        (6, "The price is not reasonable"),
    ]
    .into_iter()
    .map(|(id, title)| CancelReason {
        id: CancelReasonId(id),
        title: title.to_string(),
    })
    .collect()
}
