//! Opaque continuity tokens round-tripped through cookies
//!
//! Token values are never parsed or validated here; a malformed value is
//! carried verbatim and the decisioning service decides what to do with it.

use serde::{Deserialize, Serialize};

/// A token value paired with the cookie lifetime the service asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCookie {
    pub value: String,
    pub max_age_secs: u64,
}

impl TokenCookie {
    pub fn new(value: impl Into<String>, max_age_secs: u64) -> Self {
        Self {
            value: value.into(),
            max_age_secs,
        }
    }
}

/// The three tokens read off an incoming request; missing cookies are `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub visitor: Option<String>,
    pub session: Option<String>,
    pub location_hint: Option<String>,
}

impl SessionTokens {
    /// True when the request carried none of the three cookies
    pub fn is_empty(&self) -> bool {
        self.visitor.is_none() && self.session.is_none() && self.location_hint.is_none()
    }
}

/// Tokens the decisioning service handed back with a response
///
/// Every present entry must be written onto the outgoing response, otherwise
/// the next request desynchronizes from the assigned experience.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshedTokens {
    pub visitor: Option<TokenCookie>,
    pub session: Option<TokenCookie>,
    pub location_hint: Option<TokenCookie>,
}
