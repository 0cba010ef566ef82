//! Builds the slot portion of a decisioning call
//!
//! Pure construction: every slot in one call carries the caller's address
//! and the same fixed profile attributes.

use std::collections::BTreeMap;

use crate::types::{Slot, SlotRequest};
use crate::PROFILE_COUNTRY;

/// Caller address as the decisioning service expects it: host plus the
/// original path-and-query
pub fn caller_address(host: &str, path_and_query: &str) -> String {
    format!("{host}{path_and_query}")
}

/// Build a decisioning request naming one or more slots
pub fn build_slot_request(route: &str, address: &str, slot_names: &[&str]) -> SlotRequest {
    let profile = BTreeMap::from([("country".to_string(), PROFILE_COUNTRY.to_string())]);

    SlotRequest {
        route: route.to_string(),
        slots: slot_names
            .iter()
            .enumerate()
            .map(|(index, name)| Slot {
                index,
                name: name.to_string(),
                address: address.to_string(),
                profile: profile.clone(),
            })
            .collect(),
    }
}
