use serde::{Deserialize, Serialize};

use crate::booking::{BookingPanel, NotePromo, PaymentMethod, ServiceType};
use crate::cancel::CancelReasonId;
use crate::catalog::PlaceId;
use crate::history::{ActivityCard, ActivityStatus};
use crate::map::MapView;
use crate::model::Tab;
use crate::picker::PickerTarget;
use crate::settings::Language;
use crate::AlertKind;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub tab: Tab,
    pub home: HomeView,
    pub history: HistoryView,
    pub settings: SettingsView,
    pub alert: Option<AlertView>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HomeView {
    pub map: MapView,
    pub panel: BookingPanel,
    pub sheet_height: u32,
    /// A panel transition is waiting on its simulated latency.
    pub is_loading: bool,
    pub sheet: SheetView,
    pub picker: Option<PickerView>,
    pub cancel: Option<CancelView>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum SheetView {
    LocationPicker {
        services: Vec<ServiceOption>,
        pickup_title: Option<String>,
        destination_title: Option<String>,
        pickup_placeholder: String,
        destination_placeholder: String,
    },
    PaymentMethod {
        pickup_title: Option<String>,
        destination_title: Option<String>,
        service_label: String,
        price_offer: String,
        payment_options: Vec<PaymentOption>,
        note_label: String,
        promo_label: String,
        note_promo: NotePromoSheetView,
    },
    RideFound {
        driver: DriverView,
        service_label: String,
        price_label: String,
        payment_label: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ServiceOption {
    pub service_type: ServiceType,
    pub label: String,
    pub selected: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PaymentOption {
    pub method: PaymentMethod,
    pub label: String,
    pub selected: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NotePromoSheetView {
    pub sheet_height: u32,
    pub editor: Option<NotePromoEditor>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NotePromoEditor {
    pub kind: NotePromo,
    pub title: String,
    pub placeholder: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DriverView {
    pub name: String,
    pub distance_text: String,
    pub rating: f32,
    pub eta_text: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PickerView {
    pub target: PickerTarget,
    pub query: String,
    pub placeholder: String,
    pub results: PickerResults,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum PickerResults {
    Places { places: Vec<PlaceRow> },
    NoPlacesFound,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlaceRow {
    pub id: PlaceId,
    pub title: String,
    pub city: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CancelView {
    pub reasons: Vec<CancelReasonRow>,
    pub details: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CancelReasonRow {
    pub id: CancelReasonId,
    pub title: String,
    pub selected: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HistoryView {
    pub selected: ActivityStatus,
    pub tabs: Vec<HistoryTabView>,
    pub cards: Vec<ActivityCard>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HistoryTabView {
    pub status: ActivityStatus,
    pub label: String,
    pub selected: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SettingsView {
    pub language: Language,
    pub language_index: usize,
    pub options: Vec<LanguageOption>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LanguageOption {
    pub language: Language,
    pub label: String,
    pub selected: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AlertView {
    pub title: String,
    pub message: String,
    pub kind: AlertKind,
}
