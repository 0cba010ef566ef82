//! Decisioning response model
//!
//! The response shape is validated once, at the gateway boundary. Every
//! slot's content and labels are modeled present-or-absent so routes never
//! chase optional chains through raw JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tokens::RefreshedTokens;

/// What the service decided for one slot
///
/// A slot with no content is a valid outcome: the visitor is simply not in
/// a tested audience for it. Labels can be absent independently of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotDecision {
    pub content: Option<Value>,
    pub experience: Option<String>,
    pub activity: Option<String>,
}

/// Full result of one decisioning call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub tokens: RefreshedTokens,
    pub slots: BTreeMap<String, SlotDecision>,
    /// Raw response body, surfaced on the demo pages' debug panel
    pub raw: Value,
}

impl DecisionResult {
    pub fn slot(&self, name: &str) -> Option<&SlotDecision> {
        self.slots.get(name)
    }

    /// Decided content for a slot, if the visitor got any
    pub fn content(&self, name: &str) -> Option<&Value> {
        self.slot(name).and_then(|s| s.content.as_ref())
    }

    /// Experience label for a slot, if the response carried one
    pub fn experience(&self, name: &str) -> Option<&str> {
        self.slot(name).and_then(|s| s.experience.as_deref())
    }

    /// Activity label for a slot, if the response carried one
    pub fn activity(&self, name: &str) -> Option<&str> {
        self.slot(name).and_then(|s| s.activity.as_deref())
    }
}
