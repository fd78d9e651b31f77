#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod booking;
pub mod cancel;
pub mod capabilities;
pub mod catalog;
pub mod event;
pub mod history;
pub mod map;
pub mod model;
pub mod picker;
pub mod settings;
pub mod view;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::booking::BookingError;
use crate::cancel::CancelError;
use crate::catalog::PlaceId;
use crate::history::HistoryError;
use crate::map::MapError;
use crate::settings::SettingsError;
use crate::view::AlertView;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use model::Model;
pub use view::ViewModel;

pub const CONFIRM_LOCATIONS_LATENCY_MS: u64 = 500;
pub const CONFIRM_PAYMENT_LATENCY_MS: u64 = 1000;
pub const BACK_LATENCY_MS: u64 = 500;
pub const CANCEL_RIDE_LATENCY_MS: u64 = 1000;
pub const MAP_DRAG_DEBOUNCE_MS: u64 = 200;

pub const LOCATION_PICKER_SHEET_HEIGHT: u32 = 340;
pub const PAYMENT_METHOD_SHEET_HEIGHT: u32 = 400;
pub const RIDE_FOUND_SHEET_HEIGHT: u32 = 320;
pub const PRICE_FOCUSED_SHEET_HEIGHT: u32 = 660;
pub const MAP_TOUCHED_SHEET_HEIGHT: u32 = 0;
pub const NOTE_PROMO_OPEN_HEIGHT: u32 = 200;
pub const NOTE_PROMO_COLLAPSED_HEIGHT: u32 = 1;

pub const DEFAULT_PICKUP_PLACE_ID: PlaceId = PlaceId(11);
pub const DEFAULT_PRICE_OFFER: &str = "200";

pub const INITIAL_CAMERA_LATITUDE: f64 = 27.693_311_3;
pub const INITIAL_CAMERA_LONGITUDE: f64 = 85.321_129_1;
pub const DEFAULT_MAP_ZOOM: f64 = 15.0;
pub const FIT_EDGE_PADDING: u32 = 100;
pub const ROUTE_STROKE_WIDTH: u32 = 12;
pub const ROUTE_STROKE_COLOR: &str = "#4595ff";
pub const PICKUP_MARKER_COLOR: &str = "#ed4297";

/// Stored under the `settings` namespace, i.e. `settings:language`.
pub const LANGUAGE_STORAGE_KEY: &str = "language";

/// Exclusive upper bound of the fake driver phone number.
pub const DIALER_NUMBER_BOUND: u64 = 10_000_000_000;

pub const CANCEL_ACK_TITLE: &str = "We're so sad about your cancellation";
pub const CANCEL_ACK_MESSAGE: &str =
    "We will continue to improve our service & satisfy you on the next trip.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    InvalidPromoCode,
    InvalidState,
    Storage,
    Serialization,
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::InvalidPromoCode => "INVALID_PROMO_CODE",
            Self::InvalidState => "INVALID_STATE",
            Self::Storage => "STORAGE_ERROR",
            Self::Serialization => "SERIALIZATION_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// Only these interrupt the rider with a blocking alert.
    #[must_use]
    pub const fn is_user_facing(self) -> bool {
        matches!(self, Self::Validation | Self::InvalidPromoCode)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub internal_message: Option<String>,
    pub context: HashMap<String, String>,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            internal_message: None,
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_internal(mut self, internal: impl Into<String>) -> Self {
        self.internal_message = Some(internal.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.kind {
            ErrorKind::Validation => "Error",
            ErrorKind::InvalidPromoCode => "Invalid Promo Code",
            ErrorKind::InvalidState
            | ErrorKind::Storage
            | ErrorKind::Serialization
            | ErrorKind::Internal => "Something went wrong",
        }
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self.kind {
            ErrorKind::Validation => self.message.clone(),
            ErrorKind::InvalidPromoCode => {
                "The promo code you entered is not valid. Please check it and try again.".into()
            }
            ErrorKind::InvalidState => {
                "That action isn't available right now. Please try again.".into()
            }
            ErrorKind::Storage => "Unable to save your preferences on this device.".into(),
            ErrorKind::Serialization | ErrorKind::Internal => {
                "An unexpected error occurred. Please try again.".into()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(internal) = &self.internal_message {
            write!(f, " ({internal})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let kind = match &err {
            BookingError::MissingLocations { .. } | BookingError::SameLocation(_) => {
                ErrorKind::Validation
            }
            BookingError::InvalidPromo { .. } => ErrorKind::InvalidPromoCode,
            BookingError::InvalidState { .. }
            | BookingError::TransitionInFlight(_)
            | BookingError::StaleTransition(_) => ErrorKind::InvalidState,
        };
        let error = Self::new(kind, err.to_string());
        match err {
            BookingError::InvalidPromo { code } => error.with_context("promo_code", code),
            BookingError::SameLocation(place) => error.with_context("place_id", place.to_string()),
            _ => error,
        }
    }
}

impl From<CancelError> for AppError {
    fn from(err: CancelError) -> Self {
        let kind = match err {
            CancelError::UnknownReason(_) => ErrorKind::Validation,
            CancelError::NotOpen => ErrorKind::InvalidState,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        let kind = match &err {
            SettingsError::Storage(capabilities::KvError::Serialization { .. }) => {
                ErrorKind::Serialization
            }
            SettingsError::Storage(_) => ErrorKind::Storage,
            SettingsError::UnexpectedReply(_) => ErrorKind::Internal,
        };
        Self::new(kind, "language preference unavailable").with_internal(err.to_string())
    }
}

impl From<MapError> for AppError {
    fn from(err: MapError) -> Self {
        Self::new(ErrorKind::Serialization, "route unavailable").with_internal(err.to_string())
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        Self::new(ErrorKind::Serialization, "invalid trip date").with_internal(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    Error,
    Info,
}

/// A blocking dialog. Stays up until `Event::AlertDismissed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
}

impl Alert {
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self {
            title: error.title().to_string(),
            message: error.user_facing_message(),
            kind: AlertKind::Error,
        }
    }

    #[must_use]
    pub fn cancellation_ack() -> Self {
        Self {
            title: CANCEL_ACK_TITLE.to_string(),
            message: CANCEL_ACK_MESSAGE.to_string(),
            kind: AlertKind::Info,
        }
    }

    #[must_use]
    pub fn to_view(&self) -> AlertView {
        AlertView {
            title: self.title.clone(),
            message: self.message.clone(),
            kind: self.kind,
        }
    }
}

pub mod app {
    use super::*;
    use rand::Rng;

    use crate::booking::{BookingPanel, NotePromo, PanelTransition};
    use crate::capabilities::{Capabilities, Route};
    use crate::catalog::MOCK_DRIVER;
    use crate::event::Event;
    use crate::history;
    use crate::history::ActivityStatus;
    use crate::map;
    use crate::model::Model;
    use crate::picker::LocationPicker;
    use crate::settings::{self, Language};
    use crate::view::{
        CancelReasonRow, CancelView, DriverView, HistoryTabView, HistoryView, HomeView,
        LanguageOption, NotePromoEditor, NotePromoSheetView, PaymentOption, PickerResults,
        PickerView, PlaceRow, ServiceOption, SettingsView, SheetView, ViewModel,
    };

    #[derive(Default)]
    pub struct App;

    impl App {
        /// Logs and drops events aimed at a hidden panel or arriving while a
        /// transition is pending.
        fn on_panel(model: &Model, expected: BookingPanel, event_name: &'static str) -> bool {
            match model.booking.ensure_editable(expected) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(event = event_name, error = %e, "ignoring event");
                    false
                }
            }
        }

        fn editor_open(model: &Model, kind: NotePromo, event_name: &'static str) -> bool {
            if !Self::on_panel(model, BookingPanel::PaymentMethod, event_name) {
                return false;
            }
            if model.booking.note_promo == Some(kind) {
                true
            } else {
                tracing::warn!(event = event_name, open = ?model.booking.note_promo, "editor not open");
                false
            }
        }

        fn handle_error(model: &mut Model, caps: &Capabilities, error: AppError) {
            if error.kind.is_user_facing() {
                tracing::warn!(code = error.code(), message = %error.message, "showing alert");
                model.show_alert(Alert::from_error(&error));
                caps.render.render();
            } else {
                tracing::debug!(code = error.code(), error = %error, "dropped");
            }
        }

        fn begin_transition(transition: PanelTransition, model: &mut Model, caps: &Capabilities) -> bool {
            match model.booking.begin(transition, &model.catalog) {
                Ok(pending) => {
                    model.location_picker = None;
                    let millis = transition.latency_ms(&model.timings);
                    tracing::info!(
                        transition = transition.as_str(),
                        ticket = pending.ticket,
                        millis,
                        "panel transition started"
                    );
                    caps.delay.start(
                        millis,
                        Event::TransitionElapsed {
                            ticket: pending.ticket,
                        },
                    );
                    caps.render.render();
                    true
                }
                Err(e) => {
                    Self::handle_error(model, caps, e.into());
                    false
                }
            }
        }

        fn sheet_height(model: &Model) -> u32 {
            if model.map_touched {
                MAP_TOUCHED_SHEET_HEIGHT
            } else if model.price_focused && model.booking.panel == BookingPanel::PaymentMethod {
                PRICE_FOCUSED_SHEET_HEIGHT
            } else {
                model.booking.panel.sheet_height()
            }
        }

        fn build_sheet(model: &Model) -> SheetView {
            let draft = &model.booking.draft;
            let pickup_title = model.pickup().map(|p| p.title.clone());
            let destination_title = model.destination().map(|p| p.title.clone());

            match model.booking.panel {
                BookingPanel::LocationPicker => SheetView::LocationPicker {
                    services: booking::ServiceType::ALL
                        .into_iter()
                        .map(|service_type| ServiceOption {
                            service_type,
                            label: service_type.label().to_string(),
                            selected: service_type == draft.service_type,
                        })
                        .collect(),
                    pickup_title,
                    destination_title,
                    pickup_placeholder: picker::PickerTarget::Pickup.placeholder().to_string(),
                    destination_placeholder: picker::PickerTarget::Destination
                        .placeholder()
                        .to_string(),
                },
                BookingPanel::PaymentMethod => SheetView::PaymentMethod {
                    pickup_title,
                    destination_title,
                    service_label: draft.service_type.label().to_string(),
                    price_offer: draft.price_offer.clone(),
                    payment_options: booking::PaymentMethod::ALL
                        .into_iter()
                        .map(|method| PaymentOption {
                            method,
                            label: method.label().to_string(),
                            selected: method == draft.payment_method,
                        })
                        .collect(),
                    note_label: Self::checked_label("Note", &draft.note),
                    promo_label: Self::checked_label("Promo", &draft.promo_code),
                    note_promo: Self::build_note_promo(model),
                },
                BookingPanel::RideFound => SheetView::RideFound {
                    driver: DriverView {
                        name: MOCK_DRIVER.name.to_string(),
                        distance_text: MOCK_DRIVER.distance_text.to_string(),
                        rating: MOCK_DRIVER.rating,
                        eta_text: MOCK_DRIVER.eta_text.to_string(),
                    },
                    service_label: draft.service_type.label().to_string(),
                    price_label: format!("Rs. {}", draft.price_offer),
                    payment_label: draft.payment_method.label().to_string(),
                },
            }
        }

        fn checked_label(label: &str, value: &str) -> String {
            if value.is_empty() {
                label.to_string()
            } else {
                format!("{label} ✓")
            }
        }

        fn build_note_promo(model: &Model) -> NotePromoSheetView {
            let draft = &model.booking.draft;
            match model.booking.note_promo {
                Some(kind) => NotePromoSheetView {
                    sheet_height: NOTE_PROMO_OPEN_HEIGHT,
                    editor: Some(NotePromoEditor {
                        kind,
                        title: kind.title().to_string(),
                        placeholder: kind.placeholder().to_string(),
                        value: match kind {
                            NotePromo::Note => draft.note.clone(),
                            NotePromo::Promo => draft.promo_code.clone(),
                        },
                    }),
                },
                None => NotePromoSheetView {
                    sheet_height: NOTE_PROMO_COLLAPSED_HEIGHT,
                    editor: None,
                },
            }
        }

        fn build_picker(model: &Model) -> Option<PickerView> {
            let picker = model.location_picker.as_ref()?;
            let places: Vec<PlaceRow> = picker
                .results(&model.catalog.places)
                .into_iter()
                .map(|p| PlaceRow {
                    id: p.id,
                    title: p.title.clone(),
                    city: p.city.clone(),
                })
                .collect();

            Some(PickerView {
                target: picker.target,
                query: picker.query.clone(),
                placeholder: picker.target.placeholder().to_string(),
                results: if places.is_empty() {
                    PickerResults::NoPlacesFound
                } else {
                    PickerResults::Places { places }
                },
            })
        }

        fn build_cancel(model: &Model) -> Option<CancelView> {
            let form = &model.cancel_form;
            if !form.is_open {
                return None;
            }
            Some(CancelView {
                reasons: model
                    .catalog
                    .cancel_reasons
                    .iter()
                    .map(|r| CancelReasonRow {
                        id: r.id,
                        title: r.title.clone(),
                        selected: form.selected == Some(r.id),
                    })
                    .collect(),
                details: form.details.clone(),
            })
        }

        fn build_history(model: &Model) -> HistoryView {
            HistoryView {
                selected: model.history_tab,
                tabs: ActivityStatus::ALL
                    .into_iter()
                    .map(|status| HistoryTabView {
                        status,
                        label: status.as_str().to_string(),
                        selected: status == model.history_tab,
                    })
                    .collect(),
                cards: history::cards(&model.catalog.activities, model.history_tab),
            }
        }

        fn build_settings(model: &Model) -> SettingsView {
            let current = model.settings.language;
            SettingsView {
                language: current,
                language_index: current.index(),
                options: Language::ALL
                    .into_iter()
                    .map(|language| LanguageOption {
                        language,
                        label: language.label().to_string(),
                        selected: language == current,
                    })
                    .collect(),
            }
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            let span = tracing::debug_span!(
                "update",
                event = event.name(),
                booking_id = %model.booking.draft.id
            );
            let _entered = span.enter();

            if event.is_user_initiated() {
                tracing::trace!("user action");
            }

            match event {
                Event::AppStarted => {
                    match settings::load_language_op() {
                        Ok(op) => caps
                            .key_value
                            .execute(op, |result| Event::LanguageRestored(Box::new(result))),
                        Err(e) => {
                            tracing::error!(error = %e, "cannot read language preference");
                            model.settings.restored = true;
                        }
                    }
                    caps.render.render();
                }

                Event::TabSelected(tab) => {
                    model.tab = tab;
                    caps.render.render();
                }

                Event::ServiceTypeSelected(service_type) => {
                    if Self::on_panel(model, BookingPanel::LocationPicker, "service_type_selected") {
                        model.booking.draft.service_type = service_type;
                        caps.render.render();
                    }
                }

                Event::LocationPickerOpened(target) => {
                    if !Self::on_panel(model, BookingPanel::LocationPicker, "location_picker_opened") {
                        return;
                    }
                    let current = model
                        .booking
                        .draft
                        .location(target)
                        .and_then(|id| model.catalog.place(id));
                    model.location_picker = Some(LocationPicker::open(target, current));
                    caps.render.render();
                }

                Event::LocationQueryChanged(query) => match model.location_picker.as_mut() {
                    Some(picker) => {
                        picker.query = query;
                        caps.render.render();
                    }
                    None => tracing::debug!("query change with no picker open"),
                },

                Event::LocationPickerDismissed => {
                    model.location_picker = None;
                    caps.render.render();
                }

                Event::PlaceSelected(place_id) => {
                    if !Self::on_panel(model, BookingPanel::LocationPicker, "place_selected") {
                        return;
                    }
                    let Some(picker) = model.location_picker.take() else {
                        tracing::warn!(%place_id, "place selected with no picker open");
                        return;
                    };
                    if model.catalog.place(place_id).is_none() {
                        tracing::warn!(%place_id, "unknown place");
                        model.location_picker = Some(picker);
                        return;
                    }
                    model.booking.draft.set_location(picker.target, place_id);
                    tracing::info!(slot = ?picker.target, %place_id, "location set");
                    caps.render.render();
                }

                Event::BookRidePressed => {
                    let transition = match model.booking.panel {
                        BookingPanel::LocationPicker => PanelTransition::ConfirmLocations,
                        BookingPanel::PaymentMethod => PanelTransition::ConfirmPayment,
                        BookingPanel::RideFound => {
                            tracing::debug!("ride already found");
                            return;
                        }
                    };
                    Self::begin_transition(transition, model, caps);
                }

                Event::BackPressed => {
                    Self::begin_transition(PanelTransition::Back, model, caps);
                }

                Event::TransitionElapsed { ticket } => {
                    match model.booking.complete(ticket, &model.catalog) {
                        Ok(panel) => {
                            tracing::info!(%panel, ticket, "booking panel changed");
                            if panel != BookingPanel::PaymentMethod {
                                model.price_focused = false;
                            }
                            if panel != BookingPanel::RideFound {
                                model.cancel_form.reset();
                            }
                            caps.render.render();
                        }
                        Err(e) => tracing::debug!(error = %e, "dropping transition timer"),
                    }
                }

                Event::PriceOfferChanged(price) => {
                    if Self::on_panel(model, BookingPanel::PaymentMethod, "price_offer_changed") {
                        model.booking.draft.price_offer = price;
                        caps.render.render();
                    }
                }

                Event::PriceInputFocused(focused) => {
                    if focused
                        && !Self::on_panel(model, BookingPanel::PaymentMethod, "price_input_focused")
                    {
                        return;
                    }
                    model.price_focused = focused;
                    caps.render.render();
                }

                Event::PaymentMethodSelected(method) => {
                    if Self::on_panel(model, BookingPanel::PaymentMethod, "payment_method_selected") {
                        model.booking.draft.payment_method = method;
                        caps.render.render();
                    }
                }

                Event::NotePromoOpened(kind) => match model.booking.open_note_promo(kind) {
                    Ok(()) => caps.render.render(),
                    Err(e) => Self::handle_error(model, caps, e.into()),
                },

                Event::NoteChanged(note) => {
                    if Self::editor_open(model, NotePromo::Note, "note_changed") {
                        model.booking.draft.note = note;
                        caps.render.render();
                    }
                }

                Event::PromoCodeChanged(code) => {
                    if Self::editor_open(model, NotePromo::Promo, "promo_code_changed") {
                        model.booking.draft.promo_code = code;
                        caps.render.render();
                    }
                }

                Event::NotePromoClosed => {
                    match model.booking.close_note_promo(&model.catalog) {
                        Ok(Some(offer)) => {
                            tracing::info!(code = %offer.code, "promo code accepted");
                        }
                        Ok(None) => {}
                        Err(e) => Self::handle_error(model, caps, e.into()),
                    }
                    caps.render.render();
                }

                Event::CancelRidePressed => {
                    if Self::on_panel(model, BookingPanel::RideFound, "cancel_ride_pressed") {
                        model.cancel_form.open();
                        caps.render.render();
                    }
                }

                Event::CancelReasonToggled(reason) => {
                    match model.cancel_form.toggle(reason, &model.catalog) {
                        Ok(()) => caps.render.render(),
                        Err(e) => {
                            let error = AppError::from(e);
                            tracing::warn!(%reason, code = error.code(), error = %error, "ignoring reason toggle");
                        }
                    }
                }

                Event::CancelDetailsChanged(details) => match model.cancel_form.set_details(details) {
                    Ok(()) => caps.render.render(),
                    Err(e) => {
                        let error = AppError::from(e);
                        tracing::warn!(code = error.code(), error = %error, "ignoring cancel details");
                    }
                },

                Event::CancelModalDismissed => {
                    model.cancel_form.dismiss();
                    caps.render.render();
                }

                Event::CancelSubmitted => {
                    if !model.cancel_form.is_open {
                        tracing::warn!("cancel submitted with the form closed");
                        return;
                    }
                    if !Self::begin_transition(PanelTransition::CancelRide, model, caps) {
                        return;
                    }
                    match model.cancel_form.submit(&model.catalog) {
                        Ok(submission) => {
                            tracing::info!(
                                reason = submission.reason.as_ref().map_or("none", |r| r.title.as_str()),
                                has_details = !submission.details.is_empty(),
                                "ride cancelled"
                            );
                        }
                        Err(e) => tracing::warn!(error = %e, "cancel form rejected submit"),
                    }
                    model.show_alert(Alert::cancellation_ack());
                    caps.render.render();
                }

                Event::CallDriverPressed => {
                    if Self::on_panel(model, BookingPanel::RideFound, "call_driver_pressed") {
                        let number = rand::thread_rng().gen_range(0..DIALER_NUMBER_BOUND);
                        tracing::info!("dialing driver");
                        caps.linking.open_url(format!("tel:{number}"));
                    }
                }

                Event::ChatPressed => {
                    if Self::on_panel(model, BookingPanel::RideFound, "chat_pressed") {
                        caps.linking.navigate(Route::Chat);
                    }
                }

                Event::MapDragged => {
                    model.map_touched = true;
                    model.price_focused = false;
                    model.map_drag_generation = model.map_drag_generation.wrapping_add(1);
                    caps.delay.start(
                        model.timings.map_drag_debounce_ms,
                        Event::MapDragSettled {
                            generation: model.map_drag_generation,
                        },
                    );
                    caps.render.render();
                }

                Event::MapDragSettled { generation } => {
                    if generation == model.map_drag_generation {
                        model.map_touched = false;
                        caps.render.render();
                    } else {
                        tracing::trace!(generation, latest = model.map_drag_generation, "superseded drag");
                    }
                }

                Event::HistoryTabSelected(status) => {
                    model.history_tab = status;
                    caps.render.render();
                }

                Event::LanguageSelected(language) => {
                    model.settings.language = language;
                    model.settings.restored = true;
                    match settings::save_language_op(language) {
                        Ok(op) => caps
                            .key_value
                            .execute(op, |result| Event::LanguagePersisted(Box::new(result))),
                        Err(e) => tracing::warn!(error = %e, "cannot persist language"),
                    }
                    caps.render.render();
                }

                Event::LanguageRestored(result) => {
                    if model.settings.restored {
                        tracing::debug!("language already chosen, ignoring stored value");
                        return;
                    }
                    model.settings.restored = true;
                    match settings::decode_language(*result) {
                        Ok(Some(language)) => {
                            tracing::info!(?language, "language restored");
                            model.settings.language = language;
                        }
                        Ok(None) => tracing::debug!("no stored language"),
                        Err(e) => {
                            let error = AppError::from(e);
                            tracing::warn!(code = error.code(), error = %error, "keeping default language");
                        }
                    }
                    caps.render.render();
                }

                Event::LanguagePersisted(result) => {
                    if let Err(e) = settings::confirm_write(*result) {
                        let error = AppError::from(e);
                        tracing::warn!(code = error.code(), error = %error, "language not saved");
                    }
                }

                Event::AlertDismissed => {
                    model.alert = None;
                    caps.render.render();
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            let draft = &model.booking.draft;
            let home = HomeView {
                map: map::map_view(&model.catalog, draft.pickup, draft.destination),
                panel: model.booking.panel,
                sheet_height: Self::sheet_height(model),
                is_loading: model.booking.is_loading(),
                sheet: Self::build_sheet(model),
                picker: Self::build_picker(model),
                cancel: Self::build_cancel(model),
            };

            ViewModel {
                tab: model.tab,
                home,
                history: Self::build_history(model),
                settings: Self::build_settings(model),
                alert: model.alert.as_ref().map(Alert::to_view),
            }
        }
    }
}
