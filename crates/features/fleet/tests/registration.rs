mod common;

use common::{drone, fleet_with, medication};
use dhub_domain::drone::{Drone, Model, State};
use dhub_fleet::FleetError;
use dhub_fleet::dto::RegisterDroneRequest;
use dhub_store::FleetStore;

#[tokio::test]
async fn registered_drone_is_idle_and_empty() {
    let (fleet, store) = fleet_with(Vec::<Drone>::new());

    let drone = fleet
        .register(RegisterDroneRequest::new("12345", Model::Lightweight, 200, 55))
        .await
        .unwrap();
    assert_eq!(drone.state, State::Idle);
    assert!(drone.medications.is_empty());
    assert_eq!(store.find_by_serial("12345").await.unwrap(), Some(drone));
}

#[tokio::test]
async fn duplicate_registration_leaves_the_first_record_untouched() {
    let (fleet, store) = fleet_with([drone("12345", 300, 90, State::Delivering)]);

    let err = fleet
        .register(RegisterDroneRequest::new("12345", Model::Lightweight, 100, 10))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Entity with such key already exists : drone with serial number 12345"
    );
    assert!(err.is_client_error());

    let kept = store.find_by_serial("12345").await.unwrap().unwrap();
    assert_eq!(kept.weight_limit, 300);
    assert_eq!(kept.state, State::Delivering);
}

#[tokio::test]
async fn out_of_range_registration_is_malformed() {
    let (fleet, store) = fleet_with(Vec::<Drone>::new());

    let err = fleet
        .register(RegisterDroneRequest::new("12345", Model::Lightweight, 501, 55))
        .await
        .unwrap_err();
    assert!(matches!(err, FleetError::MalformedInput { .. }));
    assert_eq!(
        err.to_string(),
        "Request is not valid: weightLimit: Weight limit can't be more than 500 gr; "
    );
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn medications_and_battery_of_a_known_drone() {
    let loaded = drone("s1", 300, 47, State::Loaded)
        .with_medications(vec![medication("Name-1", 50), medication("Name-2", 150)]);
    let (fleet, _) = fleet_with([loaded]);

    let names: Vec<_> =
        fleet.medications_of("s1").await.unwrap().into_iter().map(|m| m.name).collect();
    assert_eq!(names, ["Name-1", "Name-2"]);
    assert_eq!(fleet.battery_of("s1").await.unwrap(), 47);
}

#[tokio::test]
async fn lookups_of_unknown_drones_are_not_found() {
    let (fleet, _) = fleet_with(Vec::<Drone>::new());

    let err = fleet.medications_of("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Can't find drone with serial number: nope");
    assert!(err.is_rejection());

    assert!(matches!(
        fleet.battery_of("nope").await.unwrap_err(),
        FleetError::NotFound { serial } if serial == "nope"
    ));
}

#[tokio::test]
async fn availability_lists_idle_drones_with_enough_battery() {
    let (fleet, _) = fleet_with([
        drone("a", 300, 75, State::Idle),
        drone("b", 300, 24, State::Idle),
        drone("c", 300, 25, State::Idle),
        drone("d", 300, 99, State::Loaded),
        drone("e", 300, 99, State::Returning),
    ]);

    let mut serials: Vec<_> = fleet
        .available_for_loading()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.serial_number)
        .collect();
    serials.sort();
    assert_eq!(serials, ["a", "c"]);
}

#[tokio::test]
async fn availability_of_an_empty_fleet_is_empty() {
    let (fleet, _) = fleet_with(Vec::<Drone>::new());
    assert!(fleet.available_for_loading().await.unwrap().is_empty());
}

#[test]
fn slice_registers_under_its_name() {
    let (fleet, store) = fleet_with(Vec::<Drone>::new());
    assert_eq!(dhub_fleet::Fleet::NAME, "Fleet");
    drop(fleet);

    let slice = dhub_fleet::init(std::sync::Arc::new(store)).unwrap();
    assert_eq!(slice.name, "Fleet");
}
