//! Lockstep: session-continuity relay for server-side personalization
//!
//! A demo web server that asks an opaque decisioning service which content
//! to render into each page slot, and round-trips three continuity tokens
//! through client cookies so a visitor stays in the experience the service
//! assigned them.

pub mod core;
pub mod types;

// =============================================================================
// COOKIE NAMES - fixed by the decisioning service's wire contract
// =============================================================================

/// Session token cookie
pub const SESSION_COOKIE_NAME: &str = "mbox";

/// Edge-cluster location hint cookie
pub const LOCATION_HINT_COOKIE_NAME: &str = "mboxEdgeCluster";

/// Visitor cookie prefix; the full name is keyed by the organization id
pub const VISITOR_COOKIE_PREFIX: &str = "AMCV_";

// =============================================================================
// COOKIE LIFETIMES (seconds)
// =============================================================================

/// The service keeps a session pinned for ~31 minutes
pub const SESSION_MAX_AGE_SECS: u64 = 1860;

/// Location hint expires with the session
pub const LOCATION_HINT_MAX_AGE_SECS: u64 = 1860;

// =============================================================================
// SLOT NAMES - one per demo route, as configured in the decisioning service
// =============================================================================

pub const LANDER_SLOT: &str = "lander-ssr-1";
pub const REPLACEMENT_SLOT: &str = "singleQuestion";
pub const REMOVAL_SLOT: &str = "removeQuestion";
pub const ADDITION_SLOT: &str = "addQuestion";
pub const MAGIC_HERO_SLOT: &str = "magic-hero";
pub const MAGIC_CTA_SLOT: &str = "magic-cta";

// =============================================================================
// STATIC FALLBACKS - rendered when a slot comes back without content
// =============================================================================

/// Lander logo when the visitor is not in a tested audience
pub const DEFAULT_LANDER_IMAGE: &str = "rocketlogo.png";

/// Magic page hero copy
pub const DEFAULT_MAGIC_HERO: &str = "Welcome to the magic test";

/// Magic page call-to-action copy
pub const DEFAULT_MAGIC_CTA: &str = "See what you qualify for";

/// Profile attribute sent with every slot
pub const PROFILE_COUNTRY: &str = "usa";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
