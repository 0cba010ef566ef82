//! Maps decisioning results into the view models the templates consume
//!
//! Every adapter here is a pure function: the same result yields the same
//! view, and absent content or labels select the static fallback instead of
//! failing the request.

use serde_json::Value;

use crate::types::{
    base_questions, default_fourth_question, DecisionResult, LanderView, MagicView, Question,
    QuestionsView,
};
use crate::{DEFAULT_LANDER_IMAGE, DEFAULT_MAGIC_CTA, DEFAULT_MAGIC_HERO};

/// Does this experience label name a variant?
///
/// Case-insensitive substring test; an absent label means control.
pub fn is_variant(label: Option<&str>) -> bool {
    label
        .map(|l| l.to_lowercase().contains("variant"))
        .unwrap_or(false)
}

/// Assign 0-based display ids by position
pub fn number_questions(questions: &mut [Question]) {
    for (idx, question) in questions.iter_mut().enumerate() {
        question.id = Some(idx);
    }
}

/// Lander page: decided logo with a static fallback
///
/// `None` covers the no-referrer path where no decisioning call was made.
pub fn lander_view(result: Option<&DecisionResult>, slot: &str) -> LanderView {
    let src = result
        .and_then(|r| r.content(slot))
        .and_then(content_src)
        .unwrap_or_else(|| DEFAULT_LANDER_IMAGE.to_string());

    LanderView {
        title: "rocket lander".to_string(),
        src,
        experience: experience_of(result, slot),
        response_json: raw_json(result),
    }
}

/// Replacement flavor: a variant experience supplies the fourth question,
/// control gets the static default
pub fn replacement_view(result: &DecisionResult, slot: &str) -> QuestionsView {
    let mut questions = base_questions();

    let decided = if is_variant(result.experience(slot)) {
        result
            .content(slot)
            .and_then(|c| serde_json::from_value::<Question>(c.clone()).ok())
    } else {
        None
    };
    questions.push(decided.unwrap_or_else(default_fourth_question));
    number_questions(&mut questions);

    QuestionsView {
        heading: "Single question replacement".to_string(),
        questions,
        experience: experience_of(Some(result), slot),
        response_json: raw_json(Some(result)),
        debug: false,
    }
}

/// Removal flavor: the slot content names a 0-based question to drop
///
/// Absent or out-of-range content keeps the full set.
pub fn removal_view(result: &DecisionResult, slot: &str) -> QuestionsView {
    let mut questions = full_question_set();

    if let Some(idx) = result.content(slot).and_then(content_index) {
        if idx < questions.len() {
            questions.remove(idx);
        }
    }
    number_questions(&mut questions);

    QuestionsView {
        heading: "Remove a question".to_string(),
        questions,
        experience: experience_of(Some(result), slot),
        response_json: raw_json(Some(result)),
        debug: false,
    }
}

/// Addition flavor: every gateway-provided question is appended
pub fn addition_view(result: &DecisionResult, slot: &str) -> QuestionsView {
    let mut questions = full_question_set();

    if let Some(extra) = result.content(slot).and_then(content_questions) {
        questions.extend(extra);
    }
    number_questions(&mut questions);

    QuestionsView {
        heading: "Add a question".to_string(),
        questions,
        experience: experience_of(Some(result), slot),
        response_json: raw_json(Some(result)),
        debug: false,
    }
}

/// Magic page: two slots decided in one call, each with its own fallback
pub fn magic_view(result: &DecisionResult, hero_slot: &str, cta_slot: &str) -> MagicView {
    MagicView {
        hero: result
            .content(hero_slot)
            .and_then(content_text)
            .unwrap_or_else(|| DEFAULT_MAGIC_HERO.to_string()),
        cta: result
            .content(cta_slot)
            .and_then(content_text)
            .unwrap_or_else(|| DEFAULT_MAGIC_CTA.to_string()),
        experience: experience_of(Some(result), hero_slot),
        response_json: raw_json(Some(result)),
    }
}

/// Base questions plus the default fourth: the starting set for the
/// removal/addition pages
fn full_question_set() -> Vec<Question> {
    let mut questions = base_questions();
    questions.push(default_fourth_question());
    questions
}

/// Slot content for the lander: a bare string or `{"src": "..."}`
fn content_src(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("src").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Slot content naming a question index: a bare number or `{"remove": n}`
fn content_index(content: &Value) -> Option<usize> {
    match content {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::Object(map) => map.get("remove").and_then(Value::as_u64).map(|n| n as usize),
        _ => None,
    }
}

/// Slot content carrying one or more questions
fn content_questions(content: &Value) -> Option<Vec<Question>> {
    match content {
        Value::Array(_) => serde_json::from_value(content.clone()).ok(),
        Value::Object(_) => serde_json::from_value::<Question>(content.clone())
            .ok()
            .map(|q| vec![q]),
        _ => None,
    }
}

/// Copy content for the magic slots: a bare string or `{"text": "..."}`
fn content_text(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("text").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn experience_of(result: Option<&DecisionResult>, slot: &str) -> Option<String> {
    result
        .and_then(|r| r.experience(slot))
        .map(str::to_string)
}

fn raw_json(result: Option<&DecisionResult>) -> String {
    result
        .map(|r| serde_json::to_string_pretty(&r.raw).unwrap_or_default())
        .unwrap_or_else(|| "{}".to_string())
}
