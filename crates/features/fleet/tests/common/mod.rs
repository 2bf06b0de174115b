#![allow(dead_code, unreachable_pub)]

use dhub_domain::drone::{Drone, Medication, Model, State};
use dhub_fleet::Fleet;
use dhub_store::MemoryFleetStore;
use std::sync::Arc;
use std::time::Duration;

pub fn medication(name: &str, weight: u32) -> Medication {
    Medication {
        name: name.to_owned(),
        weight,
        code: "CODE_01".to_owned(),
        image: "http://localhost/image1".to_owned(),
    }
}

pub fn drone(serial: &str, weight_limit: u16, battery: u8, state: State) -> Drone {
    Drone::new(serial, Model::Middleweight, weight_limit, battery).with_state(state)
}

pub fn fleet_with(drones: impl IntoIterator<Item = Drone>) -> (Fleet, MemoryFleetStore) {
    let store = MemoryFleetStore::builder()
        .lock_timeout(Duration::from_secs(5))
        .seed(drones)
        .build();
    (Fleet::with_store(Arc::new(store.clone())), store)
}
