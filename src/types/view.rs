//! View models handed to the template layer

use serde::Serialize;

use super::question::Question;

/// Lander page view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanderView {
    pub title: String,
    /// Image reference under /public
    pub src: String,
    pub experience: Option<String>,
    pub response_json: String,
}

/// Questions page view, shared by the replacement/removal/addition routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionsView {
    pub heading: String,
    pub questions: Vec<Question>,
    pub experience: Option<String>,
    pub response_json: String,
    /// Show the raw-response panel
    pub debug: bool,
}

/// Magic page view: two slots decided in one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagicView {
    pub hero: String,
    pub cta: String,
    pub experience: Option<String>,
    pub response_json: String,
}
