use crux_core::testing::AppTester;
use shared::booking::BookingPanel;
use shared::cancel::CancelReasonId;
use shared::capabilities::{DelayOutput, LinkingOperation, Route};
use shared::catalog::PlaceId;
use shared::picker::PickerTarget;
use shared::{AlertKind, App, Effect, Event, Model};

/// Drives a fresh model all the way to the ride-found panel.
fn ride_found(app: &AppTester<App, Effect>) -> Model {
    let mut model = Model::default();
    app.update(Event::LocationPickerOpened(PickerTarget::Destination), &mut model);
    app.update(Event::PlaceSelected(PlaceId(7)), &mut model);

    for _ in 0..2 {
        let update = app.update(Event::BookRidePressed, &mut model);
        for effect in update.effects {
            if let Effect::Delay(mut request) = effect {
                let resolved = app
                    .resolve(&mut request, DelayOutput::Elapsed)
                    .expect("delay should resolve");
                for event in resolved.events {
                    app.update(event, &mut model);
                }
            }
        }
    }
    assert_eq!(model.booking.panel, BookingPanel::RideFound);
    model
}

fn linking_ops(effects: Vec<Effect>) -> Vec<LinkingOperation> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Linking(request) => Some(request.operation),
            _ => None,
        })
        .collect()
}

#[test]
fn reason_toggles_off_when_selected_twice() {
    let app = AppTester::<App, Effect>::default();
    let mut model = ride_found(&app);
    app.update(Event::CancelRidePressed, &mut model);

    app.update(Event::CancelReasonToggled(CancelReasonId(4)), &mut model);
    let cancel = app.view(&model).home.cancel.expect("modal open");
    assert_eq!(
        cancel.reasons.iter().filter(|r| r.selected).map(|r| r.id).collect::<Vec<_>>(),
        vec![CancelReasonId(4)]
    );

    app.update(Event::CancelReasonToggled(CancelReasonId(4)), &mut model);
    let cancel = app.view(&model).home.cancel.expect("modal open");
    assert!(cancel.reasons.iter().all(|r| !r.selected));
    assert_eq!(cancel.reasons.len(), 6);
}

#[test]
fn dismissing_the_modal_keeps_the_ride() {
    let app = AppTester::<App, Effect>::default();
    let mut model = ride_found(&app);

    app.update(Event::CancelRidePressed, &mut model);
    app.update(Event::CancelDetailsChanged("changed my mind".into()), &mut model);
    let update = app.update(Event::CancelModalDismissed, &mut model);

    assert!(!update.effects.iter().any(|e| matches!(e, Effect::Delay(_))));
    assert!(app.view(&model).home.cancel.is_none());
    assert_eq!(model.booking.panel, BookingPanel::RideFound);
    assert!(model.alert.is_none());
}

#[test]
fn submit_without_a_reason_still_cancels() {
    let app = AppTester::<App, Effect>::default();
    let mut model = ride_found(&app);
    app.update(Event::CancelRidePressed, &mut model);

    let update = app.update(Event::CancelSubmitted, &mut model);
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Delay(_))));

    let alert = app.view(&model).alert.expect("acknowledgement");
    assert_eq!(alert.kind, AlertKind::Info);
    assert_eq!(
        alert.message,
        "We will continue to improve our service & satisfy you on the next trip."
    );
}

#[test]
fn call_driver_opens_a_tel_url() {
    let app = AppTester::<App, Effect>::default();
    let mut model = ride_found(&app);

    let ops = linking_ops(app.update(Event::CallDriverPressed, &mut model).effects);
    assert_eq!(ops.len(), 1);
    match &ops[0] {
        LinkingOperation::OpenUrl { url } => {
            let number: u64 = url
                .strip_prefix("tel:")
                .expect("tel scheme")
                .parse()
                .expect("numeric");
            assert!(number < 10_000_000_000);
        }
        LinkingOperation::Navigate { .. } => panic!("expected a tel: url"),
    }

    let ops = linking_ops(app.update(Event::ChatPressed, &mut model).effects);
    assert_eq!(ops, vec![LinkingOperation::Navigate { route: Route::Chat }]);
}

#[test]
fn driver_contact_needs_a_found_ride() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    assert!(linking_ops(app.update(Event::CallDriverPressed, &mut model).effects).is_empty());
    assert!(linking_ops(app.update(Event::ChatPressed, &mut model).effects).is_empty());

    app.update(Event::CancelRidePressed, &mut model);
    assert!(!model.cancel_form.is_open);
}

#[test]
fn modal_cannot_reopen_while_the_cancel_is_pending() {
    let app = AppTester::<App, Effect>::default();
    let mut model = ride_found(&app);
    app.update(Event::CancelRidePressed, &mut model);
    app.update(Event::CancelReasonToggled(CancelReasonId(2)), &mut model);

    let first: Vec<_> = app
        .update(Event::CancelSubmitted, &mut model)
        .effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Delay(request) => Some(request),
            _ => None,
        })
        .collect();
    assert_eq!(first.len(), 1);

    app.update(Event::CancelRidePressed, &mut model);
    assert!(app.view(&model).home.cancel.is_none());
    let again = app.update(Event::CancelSubmitted, &mut model);
    assert!(!again.effects.iter().any(|e| matches!(e, Effect::Delay(_))));
    assert!(linking_ops(app.update(Event::CallDriverPressed, &mut model).effects).is_empty());

    for mut request in first {
        let resolved = app
            .resolve(&mut request, DelayOutput::Elapsed)
            .expect("delay should resolve");
        for event in resolved.events {
            app.update(event, &mut model);
        }
    }
    assert_eq!(model.booking.panel, BookingPanel::LocationPicker);
    assert!(app.view(&model).home.cancel.is_none());
    assert_eq!(model.cancel_form.selected, None);
}
