//! Core types for lockstep

mod decision;
mod question;
mod slot;
mod tokens;
mod view;

pub use decision::{DecisionResult, SlotDecision};
pub use question::{base_questions, default_fourth_question, Question};
pub use slot::{Slot, SlotRequest};
pub use tokens::{RefreshedTokens, SessionTokens, TokenCookie};
pub use view::{LanderView, MagicView, QuestionsView};
