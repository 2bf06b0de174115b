//! The slice of the drone lifecycle this service drives.
//!
//! Only `IDLE -> LOADED` happens here. Delivery transitions are owned elsewhere;
//! any drone not `IDLE` is simply not loadable.

use crate::error::FleetError;
use dhub_domain::drone::State;

/// State a drone must be in to accept a payload.
pub const LOADABLE: State = State::Idle;

/// State a drone is left in after a successful load.
pub const AFTER_LOAD: State = State::Loaded;

#[must_use]
pub const fn can_load(state: State) -> bool {
    matches!(state, LOADABLE)
}

/// State a drone moves to when a payload is accepted.
///
/// # Errors
///
/// [`FleetError::InvalidState`] naming the current and the required state.
pub const fn load_transition(current: State) -> Result<State, FleetError> {
    if can_load(current) {
        Ok(AFTER_LOAD)
    } else {
        Err(FleetError::InvalidState { current, required: LOADABLE })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_idle_is_loadable() {
        for state in State::iter() {
            assert_eq!(can_load(state), state == State::Idle, "{state}");
        }
    }

    #[test]
    fn idle_transitions_to_loaded() {
        assert_eq!(load_transition(State::Idle).unwrap(), State::Loaded);
    }

    #[test]
    fn rejection_names_both_states() {
        let err = load_transition(State::Delivering).unwrap_err();
        assert_eq!(err.to_string(), "Can't load drone in state: DELIVERING, it should be IDLE");
    }

    #[test]
    fn every_accepted_load_ends_loaded() {
        let targets: Vec<_> = State::iter().filter_map(|s| load_transition(s).ok()).collect();
        assert_eq!(targets, [AFTER_LOAD]);
    }
}
