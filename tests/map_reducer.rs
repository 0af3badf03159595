mod common;

use common::{place, poi, reducer, region};
use nearby::location::{AuthorizationStatus, LocationEvent};
use nearby::map::{
    AlertKind, AppState, CancelId, Category, Coordinate, MapEffect, MapIntent, SearchFailed,
    SearchId, Span,
};
use nearby::mvi::Reducer;

fn search_id(effects: &[MapEffect]) -> SearchId {
    match effects {
        [MapEffect::Search { id, .. }] => *id,
        other => panic!("expected exactly one search effect, got {:?}", other),
    }
}

fn with_category_and_region(category: Category) -> AppState {
    AppState {
        category: Some(category),
        region: Some(region(40.0, -74.0)),
        ..AppState::default()
    }
}

#[test]
fn category_without_region_defers_search() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let (state, effects) = r.reduce(
        AppState::default(),
        MapIntent::CategorySelected(Category::Park),
    );
    assert_eq!(state.category, Some(Category::Park));
    assert!(effects.is_empty());
    assert!(!state.is_searching());
}

#[test]
fn category_with_region_searches_once() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let start = AppState {
        region: Some(region(40.0, -74.0)),
        ..AppState::default()
    };
    let (state, effects) = r.reduce(start, MapIntent::CategorySelected(Category::Park));

    assert_eq!(effects.len(), 1);
    match &effects[0] {
        MapEffect::Search {
            region: searched,
            category,
            id,
        } => {
            assert_eq!(*searched, region(40.0, -74.0));
            assert_eq!(*category, Category::Park);
            assert_eq!(state.in_flight_search, Some(*id));
        }
        other => panic!("expected search, got {:?}", other),
    }
}

#[test]
fn deferred_search_fires_when_region_arrives() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let (state, _) = r.reduce(
        AppState::default(),
        MapIntent::CategorySelected(Category::Museum),
    );
    let (_, effects) = r.reduce(state, MapIntent::RegionChanged(region(1.0, 2.0)));
    assert!(matches!(
        effects.as_slice(),
        [MapEffect::Search { category: Category::Museum, .. }]
    ));
}

#[test]
fn region_change_without_category_only_moves_viewport() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let (state, effects) = r.reduce(AppState::default(), MapIntent::RegionChanged(region(1.0, 2.0)));
    assert_eq!(state.region, Some(region(1.0, 2.0)));
    assert!(effects.is_empty());
}

#[test]
fn toggling_same_category_twice_clears_results() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let start = AppState {
        region: Some(region(40.0, -74.0)),
        ..AppState::default()
    };

    let (state, effects) = r.reduce(start, MapIntent::CategorySelected(Category::Cafe));
    let id = search_id(&effects);
    let (state, _) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id,
            result: Ok(vec![place("A", "1 St", 40.0, -74.0)]),
        },
    );
    assert_eq!(state.points_of_interest.len(), 1);

    let (state, effects) = r.reduce(state, MapIntent::CategorySelected(Category::Cafe));
    assert_eq!(effects, vec![MapEffect::Cancel(CancelId::Search)]);
    assert_eq!(state.category, None);
    assert!(state.points_of_interest.is_empty());
}

#[test]
fn late_result_after_toggle_off_is_dropped() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let start = AppState {
        region: Some(region(40.0, -74.0)),
        ..AppState::default()
    };

    let (state, effects) = r.reduce(start, MapIntent::CategorySelected(Category::Cafe));
    let id = search_id(&effects);
    let (state, _) = r.reduce(state, MapIntent::CategorySelected(Category::Cafe));
    let (state, _) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id,
            result: Ok(vec![place("A", "1 St", 40.0, -74.0)]),
        },
    );

    assert_eq!(state.category, None);
    assert!(state.points_of_interest.is_empty());
}

#[test]
fn switching_category_replaces_search() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let (state, first) = r.reduce(
        with_category_and_region(Category::Cafe),
        MapIntent::CategorySelected(Category::Park),
    );
    assert_eq!(state.category, Some(Category::Park));
    assert!(matches!(
        first.as_slice(),
        [MapEffect::Search { category: Category::Park, .. }]
    ));
}

#[test]
fn out_of_order_results_keep_latest_region() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let state = with_category_and_region(Category::Restaurant);

    let (state, effects) = r.reduce(state, MapIntent::RegionChanged(region(1.0, 1.0)));
    let first = search_id(&effects);
    let (state, effects) = r.reduce(state, MapIntent::RegionChanged(region(2.0, 2.0)));
    let second = search_id(&effects);
    assert_ne!(first, second);

    // Second search answers first.
    let (state, _) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id: second,
            result: Ok(vec![place("Second", "2 St", 2.0, 2.0)]),
        },
    );
    let (state, effects) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id: first,
            result: Ok(vec![place("First", "1 St", 1.0, 1.0)]),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.points_of_interest, vec![poi("Second", "2 St", 2.0, 2.0)]);
    assert_eq!(state.region, Some(region(2.0, 2.0)));
}

#[test]
fn stale_failure_raises_no_alert() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let state = with_category_and_region(Category::Cafe);
    let (state, effects) = r.reduce(state, MapIntent::RegionChanged(region(1.0, 1.0)));
    let first = search_id(&effects);
    let (state, _) = r.reduce(state, MapIntent::RegionChanged(region(2.0, 2.0)));

    let (state, _) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id: first,
            result: Err(SearchFailed),
        },
    );
    assert!(state.alert.is_none());
    assert!(state.is_searching());
}

#[test]
fn search_failure_keeps_previous_results() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let state = with_category_and_region(Category::Cafe);

    let (state, effects) = r.reduce(state, MapIntent::RegionChanged(region(1.0, 1.0)));
    let (state, _) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id: search_id(&effects),
            result: Ok(vec![place("Kept", "1 St", 1.0, 1.0)]),
        },
    );
    let (state, effects) = r.reduce(state, MapIntent::RegionChanged(region(1.5, 1.5)));
    let (state, _) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id: search_id(&effects),
            result: Err(SearchFailed),
        },
    );

    assert_eq!(state.points_of_interest, vec![poi("Kept", "1 St", 1.0, 1.0)]);
    assert_eq!(state.alert.as_ref().map(|a| a.kind), Some(AlertKind::SearchFailed));
    assert!(!state.is_searching());
}

#[test]
fn results_keep_provider_order() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let (state, effects) = r.reduce(
        AppState {
            region: Some(region(0.0, 0.0)),
            ..AppState::default()
        },
        MapIntent::CategorySelected(Category::Nightlife),
    );
    let (state, _) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id: search_id(&effects),
            result: Ok(vec![
                place("B", "2 St", 0.0, 0.0),
                place("A", "1 St", 0.0, 0.0),
                place("B", "2 St", 0.0, 0.0),
            ]),
        },
    );
    let titles: Vec<_> = state
        .points_of_interest
        .iter()
        .filter_map(|p| p.title.as_deref())
        .collect();
    assert_eq!(titles, vec!["B", "A", "B"]);
}

#[test]
fn denied_status_alerts_without_flag() {
    let r = reducer(AuthorizationStatus::Denied);
    let (state, effects) = r.reduce(AppState::default(), MapIntent::CurrentLocationRequested);
    assert_eq!(
        state.alert.as_ref().map(|a| a.kind),
        Some(AlertKind::AuthorizationDenied)
    );
    assert!(!state.is_requesting_current_location);
    assert!(effects.is_empty());
}

#[test]
fn undetermined_status_requests_authorization() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let (state, effects) = r.reduce(AppState::default(), MapIntent::CurrentLocationRequested);
    assert!(state.is_requesting_current_location);
    assert!(state.alert.is_none());
    assert_eq!(effects, vec![MapEffect::RequestAuthorization]);
}

#[test]
fn authorized_status_requests_location() {
    for status in [
        AuthorizationStatus::AuthorizedAlways,
        AuthorizationStatus::AuthorizedWhenInUse,
    ] {
        let r = reducer(status);
        let (state, effects) = r.reduce(AppState::default(), MapIntent::CurrentLocationRequested);
        assert_eq!(effects, vec![MapEffect::RequestLocation]);
        assert!(state.alert.is_none());
    }
}

#[test]
fn granted_while_requesting_asks_for_fix() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let requesting = AppState {
        is_requesting_current_location: true,
        ..AppState::default()
    };
    let (_, effects) = r.reduce(
        requesting,
        MapIntent::LocationProviderEvent(LocationEvent::AuthorizationChanged(
            AuthorizationStatus::AuthorizedWhenInUse,
        )),
    );
    assert_eq!(effects, vec![MapEffect::RequestLocation]);
}

#[test]
fn granted_while_idle_is_ignored() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let (state, effects) = r.reduce(
        AppState::default(),
        MapIntent::LocationProviderEvent(LocationEvent::AuthorizationChanged(
            AuthorizationStatus::AuthorizedAlways,
        )),
    );
    assert_eq!(state, AppState::default());
    assert!(effects.is_empty());
}

#[test]
fn denied_while_requesting_alerts_and_clears_flag() {
    let r = reducer(AuthorizationStatus::NotDetermined);
    let requesting = AppState {
        is_requesting_current_location: true,
        ..AppState::default()
    };
    let (state, effects) = r.reduce(
        requesting,
        MapIntent::LocationProviderEvent(LocationEvent::AuthorizationChanged(
            AuthorizationStatus::Denied,
        )),
    );
    assert!(!state.is_requesting_current_location);
    assert_eq!(
        state.alert.map(|a| a.kind),
        Some(AlertKind::LocationDeclined)
    );
    assert!(effects.is_empty());
}

#[test]
fn location_fix_centers_region_and_clears_flag() {
    let r = reducer(AuthorizationStatus::AuthorizedWhenInUse);
    let requesting = AppState {
        is_requesting_current_location: true,
        ..AppState::default()
    };
    let fix = Coordinate::new(40.65, -73.95);
    let (state, effects) = r.reduce(
        requesting,
        MapIntent::LocationProviderEvent(LocationEvent::LocationsUpdated(vec![
            fix,
            Coordinate::new(0.0, 0.0),
        ])),
    );

    let region = state.region.expect("region set from fix");
    assert_eq!(region.center, fix);
    assert_eq!(region.span, Span::new(0.05, 0.05));
    assert!(!state.is_requesting_current_location);
    assert!(effects.is_empty());
}

/// A fix moves the viewport but does not search on its own, even with a
/// category active. Results refresh only once the host reports the new
/// region through `RegionChanged`.
#[test]
fn location_fix_does_not_trigger_search() {
    let r = reducer(AuthorizationStatus::AuthorizedWhenInUse);
    let state = with_category_and_region(Category::Park);
    let (state, effects) = r.reduce(
        state,
        MapIntent::LocationProviderEvent(LocationEvent::LocationsUpdated(vec![Coordinate::new(
            10.0, 10.0,
        )])),
    );
    assert!(effects.is_empty());
    assert!(!state.is_searching());

    let region = state.region.expect("region");
    let (_, effects) = r.reduce(state, MapIntent::RegionChanged(region));
    assert!(matches!(
        effects.as_slice(),
        [MapEffect::Search { category: Category::Park, .. }]
    ));
}

#[test]
fn provider_failures_are_ignored() {
    let r = reducer(AuthorizationStatus::AuthorizedWhenInUse);
    let requesting = AppState {
        is_requesting_current_location: true,
        ..AppState::default()
    };
    let (state, effects) = r.reduce(
        requesting.clone(),
        MapIntent::LocationProviderEvent(LocationEvent::Failed("gps off".into())),
    );
    assert_eq!(state, requesting);
    assert!(effects.is_empty());
}

#[test]
fn empty_category_never_holds_results() {
    let r = reducer(AuthorizationStatus::AuthorizedWhenInUse);
    let intents = vec![
        MapIntent::ViewBecameActive,
        MapIntent::CategorySelected(Category::Cafe),
        MapIntent::RegionChanged(region(1.0, 1.0)),
        MapIntent::SearchCompleted {
            id: SearchId(1),
            result: Ok(vec![place("A", "1 St", 1.0, 1.0)]),
        },
        MapIntent::RegionChanged(region(2.0, 2.0)),
        MapIntent::CategorySelected(Category::Cafe),
        MapIntent::SearchCompleted {
            id: SearchId(2),
            result: Ok(vec![place("B", "2 St", 2.0, 2.0)]),
        },
        MapIntent::CategorySelected(Category::Park),
        MapIntent::CategorySelected(Category::Park),
        MapIntent::SearchCompleted {
            id: SearchId(3),
            result: Ok(vec![place("C", "3 St", 2.0, 2.0)]),
        },
        MapIntent::SearchCompleted {
            id: SearchId(3),
            result: Err(SearchFailed),
        },
        MapIntent::CurrentLocationRequested,
        MapIntent::LocationProviderEvent(LocationEvent::LocationsUpdated(vec![Coordinate::new(
            3.0, 3.0,
        )])),
        MapIntent::AlertDismissed,
        MapIntent::ViewBecameInactive,
    ];

    let mut state = AppState::default();
    for intent in intents {
        let (next, _) = r.reduce(state, intent);
        state = next;
        if state.category.is_none() {
            assert!(state.points_of_interest.is_empty(), "state: {:?}", state);
        }
    }
}

#[test]
fn locate_then_search_scenario() {
    let r = reducer(AuthorizationStatus::AuthorizedWhenInUse);

    let (state, effects) = r.reduce(AppState::default(), MapIntent::CurrentLocationRequested);
    assert_eq!(effects, vec![MapEffect::RequestLocation]);

    let fix = Coordinate::new(40.65, -73.95);
    let (state, _) = r.reduce(
        state,
        MapIntent::LocationProviderEvent(LocationEvent::LocationsUpdated(vec![fix])),
    );
    assert_eq!(state.region.map(|r| r.center), Some(fix));
    assert!(!state.is_requesting_current_location);

    let (state, effects) = r.reduce(state, MapIntent::CategorySelected(Category::Cafe));
    let id = match effects.as_slice() {
        [MapEffect::Search {
            id,
            region,
            category: Category::Cafe,
        }] => {
            assert_eq!(region.center, fix);
            *id
        }
        other => panic!("expected cafe search, got {:?}", other),
    };

    let (state, _) = r.reduce(
        state,
        MapIntent::SearchCompleted {
            id,
            result: Ok(vec![place("Joe's Cafe", "123 Main St", 40.65, -73.95)]),
        },
    );
    assert_eq!(
        state.points_of_interest,
        vec![poi("Joe's Cafe", "123 Main St", 40.65, -73.95)]
    );
}
