use serde::{Deserialize, Serialize};

use crate::booking::BookingFlow;
use crate::cancel::CancelForm;
use crate::catalog::{Catalog, Place};
use crate::history::ActivityStatus;
use crate::picker::LocationPicker;
use crate::settings::Settings;
use crate::{
    Alert, BACK_LATENCY_MS, CANCEL_RIDE_LATENCY_MS, CONFIRM_LOCATIONS_LATENCY_MS,
    CONFIRM_PAYMENT_LATENCY_MS, MAP_DRAG_DEBOUNCE_MS,
};

#[derive(Default, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    History,
    Settings,
}

/// Simulated latencies, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlowTimings {
    pub confirm_locations_ms: u64,
    pub confirm_payment_ms: u64,
    pub back_ms: u64,
    pub cancel_ride_ms: u64,
    pub map_drag_debounce_ms: u64,
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self {
            confirm_locations_ms: CONFIRM_LOCATIONS_LATENCY_MS,
            confirm_payment_ms: CONFIRM_PAYMENT_LATENCY_MS,
            back_ms: BACK_LATENCY_MS,
            cancel_ride_ms: CANCEL_RIDE_LATENCY_MS,
            map_drag_debounce_ms: MAP_DRAG_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    pub catalog: Catalog,
    pub booking: BookingFlow,
    pub location_picker: Option<LocationPicker>,
    pub cancel_form: CancelForm,

    pub map_touched: bool,
    /// Bumped on every drag; only the newest settle timer clears `map_touched`.
    pub map_drag_generation: u64,
    pub price_focused: bool,

    pub tab: Tab,
    pub history_tab: ActivityStatus,
    pub settings: Settings,

    pub alert: Option<Alert>,
    pub timings: FlowTimings,
}

impl Default for Model {
    fn default() -> Self {
        let catalog = Catalog::builtin();
        let booking = BookingFlow::new(&catalog);
        Self {
            catalog,
            booking,
            location_picker: None,
            cancel_form: CancelForm::default(),
            map_touched: false,
            map_drag_generation: 0,
            price_focused: false,
            tab: Tab::default(),
            history_tab: ActivityStatus::default(),
            settings: Settings::default(),
            alert: None,
            timings: FlowTimings::default(),
        }
    }
}

impl Model {
    #[must_use]
    pub fn pickup(&self) -> Option<&Place> {
        self.booking.draft.pickup.and_then(|id| self.catalog.place(id))
    }

    #[must_use]
    pub fn destination(&self) -> Option<&Place> {
        self.booking.draft.destination.and_then(|id| self.catalog.place(id))
    }

    pub fn show_alert(&mut self, alert: Alert) {
        if let Some(previous) = self.alert.replace(alert) {
            tracing::debug!(title = %previous.title, "replacing unacknowledged alert");
        }
    }
}
