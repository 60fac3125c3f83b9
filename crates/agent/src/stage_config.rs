//! Per-stage descriptor table
//!
//! Each stage carries an optional profile field it collects, an optional
//! validator gating storage of that field, and the directive handed to the
//! prompt builder when a reply is generated for that stage. Keeping the
//! association in one immutable table avoids scattering stage conditionals
//! through the turn handler.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use hiring_agent_core::{InterviewStage, ProfileField};

/// Validation gate for a collected field. `check` never panics; a failed
/// check surfaces `error_message` verbatim as the assistant reply.
pub struct StageValidator {
    pub check: fn(&str) -> bool,
    pub error_message: &'static str,
}

/// Descriptor for a single stage of the screening protocol
pub struct StageDescriptor {
    /// Profile field collected while this stage is active
    pub field: Option<ProfileField>,
    /// Validator applied to the utterance before the field is stored
    pub validator: Option<StageValidator>,
    /// Stage directive embedded in the system instruction
    pub task: &'static str,
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.+-]+@[\w-]+(?:\.[\w-]+)*\.[A-Za-z]{2,}$").expect("valid email pattern")
});

/// Email validity: a single "@", non-empty local part, dot-separated domain
/// suffix of at least two letters
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_RE.is_match(text.trim())
}

/// Phone validity: after stripping whitespace, hyphens, parentheses and a
/// leading plus, the remainder must be 7 to 15 digits
pub fn is_valid_phone(text: &str) -> bool {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '+' | '(' | ')'))
        .collect();
    !stripped.is_empty()
        && stripped.chars().all(|c| c.is_ascii_digit())
        && (7..=15).contains(&stripped.len())
}

const EMAIL_ERROR: &str =
    "That email address doesn't look right. Please use a format like name@example.com.";
const PHONE_ERROR: &str =
    "That phone number doesn't look right. Please enter 7 to 15 digits.";

static STAGE_TABLE: Lazy<HashMap<InterviewStage, StageDescriptor>> = Lazy::new(|| {
    HashMap::from([
        (
            InterviewStage::Greeting,
            StageDescriptor {
                field: None,
                validator: None,
                task: "Greet the candidate in exactly two short sentences: welcome them to \
                       TalentScout, then ask for their full name.",
            },
        ),
        (
            InterviewStage::FullName,
            StageDescriptor {
                field: Some(ProfileField::FullName),
                validator: None,
                task: "Ask for the candidate's full name in one warm sentence.",
            },
        ),
        (
            InterviewStage::Email,
            StageDescriptor {
                field: Some(ProfileField::Email),
                validator: Some(StageValidator {
                    check: is_valid_email,
                    error_message: EMAIL_ERROR,
                }),
                task: "Acknowledge their name warmly. Ask for their email address in one sentence.",
            },
        ),
        (
            InterviewStage::Phone,
            StageDescriptor {
                field: Some(ProfileField::Phone),
                validator: Some(StageValidator {
                    check: is_valid_phone,
                    error_message: PHONE_ERROR,
                }),
                task: "Thank them briefly. Ask for their phone number in one sentence.",
            },
        ),
        (
            InterviewStage::Experience,
            StageDescriptor {
                field: Some(ProfileField::Experience),
                validator: None,
                task: "Acknowledge. Ask how many years of professional tech experience they have.",
            },
        ),
        (
            InterviewStage::Position,
            StageDescriptor {
                field: Some(ProfileField::DesiredPosition),
                validator: None,
                task: "Respond positively. Ask what tech role or roles they are looking for.",
            },
        ),
        (
            InterviewStage::Location,
            StageDescriptor {
                field: Some(ProfileField::Location),
                validator: None,
                task: "Note their desired role. Ask for their current city and country.",
            },
        ),
        (
            InterviewStage::TechStack,
            StageDescriptor {
                field: Some(ProfileField::TechStack),
                validator: None,
                task: "Acknowledge their location. Ask for their full tech stack: languages, \
                       frameworks, databases, and tools.",
            },
        ),
        (
            InterviewStage::TechnicalQuestions,
            StageDescriptor {
                field: None,
                validator: None,
                task: "Technical assessment phase. Give one brief encouraging sentence after \
                       each answer, then ask the next question. Do NOT ask the candidate to \
                       write code; conceptual and scenario questions only.",
            },
        ),
        (
            InterviewStage::Closing,
            StageDescriptor {
                field: None,
                validator: None,
                task: "Thank the candidate warmly, by name if known. Tell them TalentScout \
                       will review their responses and be in touch within 3-5 business days. \
                       Three sentences maximum.",
            },
        ),
    ])
});

/// Look up the descriptor for a stage. Every stage has an entry.
pub fn descriptor(stage: InterviewStage) -> &'static StageDescriptor {
    STAGE_TABLE.get(&stage).expect("descriptor for every stage")
}
