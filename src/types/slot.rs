//! Slot request model
//!
//! A slot (mbox) is a named placeholder in a page whose content is decided
//! externally per visitor. One request names every slot a route needs,
//! built fresh per incoming request and consumed exactly once.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single content slot named in a decisioning call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub index: usize,
    pub name: String,
    /// Caller address: host plus original path-and-query
    pub address: String,
    pub profile: BTreeMap<String, String>,
}

/// One decisioning call: a route asking for one or more slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRequest {
    pub route: String,
    pub slots: Vec<Slot>,
}

impl SlotRequest {
    /// Names of the requested slots, in request order
    pub fn slot_names(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.name.as_str()).collect()
    }
}
