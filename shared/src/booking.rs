//! The three-panel booking sheet: location pick, payment method, ride found.
//!
//! Panel changes are two-phase. `BookingFlow::begin` validates and parks a
//! `PendingTransition`; the app then waits out the simulated latency and
//! calls `BookingFlow::complete` with the same ticket. Only one transition
//! can be pending at a time.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{Catalog, PlaceId, PromoOffer};
use crate::model::FlowTimings;
use crate::picker::PickerTarget;
use crate::{
    DEFAULT_PICKUP_PLACE_ID, DEFAULT_PRICE_OFFER, LOCATION_PICKER_SHEET_HEIGHT,
    PAYMENT_METHOD_SHEET_HEIGHT, RIDE_FOUND_SHEET_HEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ServiceType {
    #[default]
    Bike,
    Car,
    Delivery,
}

impl ServiceType {
    pub const ALL: [Self; 3] = [Self::Bike, Self::Car, Self::Delivery];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bike => "Bike",
            Self::Car => "Car",
            Self::Delivery => "Delivery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Khalti,
    Business,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::Cash, Self::Khalti, Self::Business];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Khalti => "Khalti/eSewa",
            Self::Business => "Business",
        }
    }
}

/// Which secondary input sheet is open on the payment panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotePromo {
    Note,
    Promo,
}

impl NotePromo {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Note => "Add a Note",
            Self::Promo => "Add a Promo Code",
        }
    }

    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Promo => "Promo Code",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BookingPanel {
    #[default]
    LocationPicker,
    PaymentMethod,
    RideFound,
}

impl BookingPanel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocationPicker => "location_picker",
            Self::PaymentMethod => "payment_method",
            Self::RideFound => "ride_found",
        }
    }

    #[must_use]
    pub const fn sheet_height(self) -> u32 {
        match self {
            Self::LocationPicker => LOCATION_PICKER_SHEET_HEIGHT,
            Self::PaymentMethod => PAYMENT_METHOD_SHEET_HEIGHT,
            Self::RideFound => RIDE_FOUND_SHEET_HEIGHT,
        }
    }
}

impl fmt::Display for BookingPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Correlates log lines for one booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

impl BookingId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub id: BookingId,
    pub service_type: ServiceType,
    pub pickup: Option<PlaceId>,
    pub destination: Option<PlaceId>,
    pub price_offer: String,
    pub payment_method: PaymentMethod,
    pub note: String,
    pub promo_code: String,
}

impl BookingDraft {
    /// Pickup starts at the "current location" place when the catalog has it.
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            id: BookingId::generate(),
            service_type: ServiceType::default(),
            pickup: catalog.place(DEFAULT_PICKUP_PLACE_ID).map(|p| p.id),
            destination: None,
            price_offer: DEFAULT_PRICE_OFFER.to_string(),
            payment_method: PaymentMethod::default(),
            note: String::new(),
            promo_code: String::new(),
        }
    }

    pub fn reset(&mut self, catalog: &Catalog) {
        *self = Self::new(catalog);
    }

    #[must_use]
    pub const fn location(&self, target: PickerTarget) -> Option<PlaceId> {
        match target {
            PickerTarget::Pickup => self.pickup,
            PickerTarget::Destination => self.destination,
        }
    }

    pub fn set_location(&mut self, target: PickerTarget, place: PlaceId) {
        match target {
            PickerTarget::Pickup => self.pickup = Some(place),
            PickerTarget::Destination => self.destination = Some(place),
        }
    }

    fn check_locations(&self) -> Result<(), BookingError> {
        match (self.pickup, self.destination) {
            (Some(pickup), Some(destination)) if pickup == destination => {
                Err(BookingError::SameLocation(pickup))
            }
            (Some(_), Some(_)) => Ok(()),
            (pickup, destination) => Err(BookingError::MissingLocations {
                pickup: pickup.is_none(),
                destination: destination.is_none(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelTransition {
    /// "Book Ride" on the location panel.
    ConfirmLocations,
    /// "Book Ride" on the payment panel.
    ConfirmPayment,
    Back,
    CancelRide,
}

impl PanelTransition {
    #[must_use]
    pub const fn source(self) -> BookingPanel {
        match self {
            Self::ConfirmLocations => BookingPanel::LocationPicker,
            Self::ConfirmPayment | Self::Back => BookingPanel::PaymentMethod,
            Self::CancelRide => BookingPanel::RideFound,
        }
    }

    #[must_use]
    pub const fn target(self) -> BookingPanel {
        match self {
            Self::ConfirmLocations => BookingPanel::PaymentMethod,
            Self::ConfirmPayment => BookingPanel::RideFound,
            Self::Back | Self::CancelRide => BookingPanel::LocationPicker,
        }
    }

    #[must_use]
    pub const fn latency_ms(self, timings: &FlowTimings) -> u64 {
        match self {
            Self::ConfirmLocations => timings.confirm_locations_ms,
            Self::ConfirmPayment => timings.confirm_payment_ms,
            Self::Back => timings.back_ms,
            Self::CancelRide => timings.cancel_ride_ms,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfirmLocations => "confirm_locations",
            Self::ConfirmPayment => "confirm_payment",
            Self::Back => "back",
            Self::CancelRide => "cancel_ride",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub ticket: u64,
    pub transition: PanelTransition,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Please select pickup and drop location")]
    MissingLocations { pickup: bool, destination: bool },

    #[error("Pickup and drop location must be different")]
    SameLocation(PlaceId),

    #[error("'{code}' is not a valid promo code")]
    InvalidPromo { code: String },

    #[error("expected panel {expected}, booking is on {actual}")]
    InvalidState {
        expected: BookingPanel,
        actual: BookingPanel,
    },

    #[error("a panel transition is already in flight (ticket {0})")]
    TransitionInFlight(u64),

    #[error("transition ticket {0} is not pending")]
    StaleTransition(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingFlow {
    pub panel: BookingPanel,
    pub draft: BookingDraft,
    pub note_promo: Option<NotePromo>,
    pending: Option<PendingTransition>,
    next_ticket: u64,
}

impl BookingFlow {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            panel: BookingPanel::default(),
            draft: BookingDraft::new(catalog),
            note_promo: None,
            pending: None,
            next_ticket: 1,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ensure_panel(&self, expected: BookingPanel) -> Result<(), BookingError> {
        if self.panel == expected {
            Ok(())
        } else {
            Err(BookingError::InvalidState {
                expected,
                actual: self.panel,
            })
        }
    }

    /// Like `ensure_panel`, but also refuses while a transition is pending:
    /// the draft was validated when it began and must not change under it.
    pub fn ensure_editable(&self, expected: BookingPanel) -> Result<(), BookingError> {
        if let Some(pending) = self.pending {
            return Err(BookingError::TransitionInFlight(pending.ticket));
        }
        self.ensure_panel(expected)
    }

    /// Validates `transition` against the current panel and draft and parks
    /// it until `complete` is called with the returned ticket.
    pub fn begin(
        &mut self,
        transition: PanelTransition,
        catalog: &Catalog,
    ) -> Result<PendingTransition, BookingError> {
        self.ensure_editable(transition.source())?;
        match transition.source() {
            BookingPanel::LocationPicker => self.draft.check_locations()?,
            BookingPanel::PaymentMethod => self.settle_promo(catalog)?,
            BookingPanel::RideFound => {}
        }

        let pending = PendingTransition {
            ticket: self.next_ticket,
            transition,
        };
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(pending);
        Ok(pending)
    }

    /// Applies the pending transition if `ticket` is still the pending one.
    pub fn complete(&mut self, ticket: u64, catalog: &Catalog) -> Result<BookingPanel, BookingError> {
        let pending = match self.pending {
            Some(pending) if pending.ticket == ticket => pending,
            _ => return Err(BookingError::StaleTransition(ticket)),
        };
        self.pending = None;

        let transition = pending.transition;
        if transition.source() == BookingPanel::PaymentMethod {
            self.note_promo = None;
        }
        if transition == PanelTransition::CancelRide {
            self.draft.reset(catalog);
        }
        self.panel = transition.target();
        Ok(self.panel)
    }

    pub fn open_note_promo(&mut self, kind: NotePromo) -> Result<(), BookingError> {
        self.ensure_editable(BookingPanel::PaymentMethod)?;
        self.note_promo = Some(kind);
        Ok(())
    }

    /// Closes the note/promo sheet and checks any promo code against the
    /// offer catalog. An unknown code is cleared; a known one is stored in
    /// its catalog spelling. Closing an already closed sheet does nothing.
    pub fn close_note_promo(&mut self, catalog: &Catalog) -> Result<Option<PromoOffer>, BookingError> {
        if self.note_promo.take().is_none() {
            return Ok(None);
        }
        if self.draft.promo_code.trim().is_empty() {
            self.draft.promo_code.clear();
            return Ok(None);
        }

        match catalog.offer(&self.draft.promo_code) {
            Some(offer) => {
                self.draft.promo_code.clone_from(&offer.code);
                Ok(Some(offer.clone()))
            }
            None => Err(BookingError::InvalidPromo {
                code: std::mem::take(&mut self.draft.promo_code),
            }),
        }
    }

    /// Closes the note/promo sheet on the way out of PAYMENT_METHOD. A code
    /// left in the draft must still match an offer or the transition is
    /// refused and the code cleared.
    fn settle_promo(&mut self, catalog: &Catalog) -> Result<(), BookingError> {
        self.close_note_promo(catalog)?;
        if self.draft.promo_code.trim().is_empty() {
            self.draft.promo_code.clear();
            return Ok(());
        }
        match catalog.offer(&self.draft.promo_code) {
            Some(offer) => {
                self.draft.promo_code.clone_from(&offer.code);
                Ok(())
            }
            None => Err(BookingError::InvalidPromo {
                code: std::mem::take(&mut self.draft.promo_code),
            }),
        }
    }
}
