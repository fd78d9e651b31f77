use serde::{Deserialize, Serialize};

use crate::booking::{NotePromo, PaymentMethod, ServiceType};
use crate::cancel::CancelReasonId;
use crate::capabilities::KvResult;
use crate::catalog::PlaceId;
use crate::history::ActivityStatus;
use crate::model::Tab;
use crate::picker::PickerTarget;
use crate::settings::Language;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    AppStarted,
    TabSelected(Tab),

    // Location panel
    ServiceTypeSelected(ServiceType),
    LocationPickerOpened(PickerTarget),
    LocationQueryChanged(String),
    LocationPickerDismissed,
    PlaceSelected(PlaceId),
    BookRidePressed,

    // Payment panel
    BackPressed,
    PriceOfferChanged(String),
    PriceInputFocused(bool),
    PaymentMethodSelected(PaymentMethod),
    NotePromoOpened(NotePromo),
    NoteChanged(String),
    PromoCodeChanged(String),
    NotePromoClosed,

    // Ride found / cancellation
    CancelRidePressed,
    CancelReasonToggled(CancelReasonId),
    CancelDetailsChanged(String),
    CancelModalDismissed,
    CancelSubmitted,
    CallDriverPressed,
    ChatPressed,

    // Map
    MapDragged,

    HistoryTabSelected(ActivityStatus),
    LanguageSelected(Language),
    AlertDismissed,

    // Internal: only the core raises these.
    #[serde(skip)]
    TransitionElapsed { ticket: u64 },
    #[serde(skip)]
    MapDragSettled { generation: u64 },
    #[serde(skip)]
    LanguageRestored(Box<KvResult>),
    #[serde(skip)]
    LanguagePersisted(Box<KvResult>),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AppStarted => "app_started",
            Self::TabSelected(_) => "tab_selected",
            Self::ServiceTypeSelected(_) => "service_type_selected",
            Self::LocationPickerOpened(_) => "location_picker_opened",
            Self::LocationQueryChanged(_) => "location_query_changed",
            Self::LocationPickerDismissed => "location_picker_dismissed",
            Self::PlaceSelected(_) => "place_selected",
            Self::BookRidePressed => "book_ride_pressed",
            Self::BackPressed => "back_pressed",
            Self::PriceOfferChanged(_) => "price_offer_changed",
            Self::PriceInputFocused(_) => "price_input_focused",
            Self::PaymentMethodSelected(_) => "payment_method_selected",
            Self::NotePromoOpened(_) => "note_promo_opened",
            Self::NoteChanged(_) => "note_changed",
            Self::PromoCodeChanged(_) => "promo_code_changed",
            Self::NotePromoClosed => "note_promo_closed",
            Self::CancelRidePressed => "cancel_ride_pressed",
            Self::CancelReasonToggled(_) => "cancel_reason_toggled",
            Self::CancelDetailsChanged(_) => "cancel_details_changed",
            Self::CancelModalDismissed => "cancel_modal_dismissed",
            Self::CancelSubmitted => "cancel_submitted",
            Self::CallDriverPressed => "call_driver_pressed",
            Self::ChatPressed => "chat_pressed",
            Self::MapDragged => "map_dragged",
            Self::HistoryTabSelected(_) => "history_tab_selected",
            Self::LanguageSelected(_) => "language_selected",
            Self::AlertDismissed => "alert_dismissed",
            Self::TransitionElapsed { .. } => "transition_elapsed",
            Self::MapDragSettled { .. } => "map_drag_settled",
            Self::LanguageRestored(_) => "language_restored",
            Self::LanguagePersisted(_) => "language_persisted",
        }
    }

    /// Raised by a tap or keystroke rather than by a capability reply.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::AppStarted
                | Self::TransitionElapsed { .. }
                | Self::MapDragSettled { .. }
                | Self::LanguageRestored(_)
                | Self::LanguagePersisted(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::KvOutput;

    #[test]
    fn capability_replies_are_not_user_initiated() {
        assert!(!Event::AppStarted.is_user_initiated());
        assert!(!Event::TransitionElapsed { ticket: 1 }.is_user_initiated());
        assert!(!Event::LanguagePersisted(Box::new(Ok(KvOutput::Written))).is_user_initiated());
        assert!(Event::BookRidePressed.is_user_initiated());
        assert!(Event::PlaceSelected(PlaceId(3)).is_user_initiated());
    }

    #[test]
    fn shell_events_deserialize() {
        let event: Event = serde_json::from_str(r#"{"LocationQueryChanged":"thamel"}"#).unwrap();
        assert_eq!(event, Event::LocationQueryChanged("thamel".into()));

        let event: Event = serde_json::from_str(r#""BookRidePressed""#).unwrap();
        assert_eq!(event.name(), "book_ride_pressed");
    }

    #[test]
    fn internal_events_cannot_come_from_the_shell() {
        assert!(serde_json::from_str::<Event>(r#"{"TransitionElapsed":{"ticket":1}}"#).is_err());
    }
}
