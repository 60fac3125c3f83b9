//! Candidate profile: the structured record assembled during screening
//!
//! A field, once set, is never silently overwritten by extracted data;
//! user-confirmed values outrank resume-extracted ones. Email and phone are
//! masked before any value crosses the process boundary (prompts, exports,
//! logs).

use serde::{Deserialize, Serialize};

use crate::conversation::InterviewStage;

/// Fixed set of profile field keys, in canonical collection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    Email,
    Phone,
    Experience,
    DesiredPosition,
    Location,
    TechStack,
}

/// Canonical field order used by the pre-fill reconciler when computing the
/// first genuinely unknown field.
pub const FIELD_ORDER: [ProfileField; 7] = [
    ProfileField::FullName,
    ProfileField::Email,
    ProfileField::Phone,
    ProfileField::Experience,
    ProfileField::DesiredPosition,
    ProfileField::Location,
    ProfileField::TechStack,
];

impl ProfileField {
    /// Wire/export key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::FullName => "full_name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Experience => "experience",
            ProfileField::DesiredPosition => "desired_position",
            ProfileField::Location => "location",
            ProfileField::TechStack => "tech_stack",
        }
    }

    /// The stage during which this field is collected
    pub fn collection_stage(&self) -> InterviewStage {
        match self {
            ProfileField::FullName => InterviewStage::FullName,
            ProfileField::Email => InterviewStage::Email,
            ProfileField::Phone => InterviewStage::Phone,
            ProfileField::Experience => InterviewStage::Experience,
            ProfileField::DesiredPosition => InterviewStage::Position,
            ProfileField::Location => InterviewStage::Location,
            ProfileField::TechStack => InterviewStage::TechStack,
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The candidate record being assembled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<String>,
}

impl CandidateProfile {
    /// Create a new empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field value
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set a field, overwriting any previous value.
    ///
    /// Used when the *current* stage collects this field, i.e. the value is
    /// a fresh user-confirmed answer. Stage regression is unsupported, so a
    /// confirmed value can only ever be replaced by another confirmed answer
    /// given at the same stage.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Set a field only if it has no value yet. The reconciler's only write
    /// path: extracted data must not clobber confirmed data.
    pub fn set_if_absent(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = self.slot_mut(field);
        if slot.is_none() {
            *slot = Some(value.into());
        }
    }

    /// Number of filled fields
    pub fn filled_count(&self) -> usize {
        FIELD_ORDER.iter().filter(|f| self.get(**f).is_some()).count()
    }

    /// First field in canonical order that is still absent
    pub fn first_missing(&self) -> Option<ProfileField> {
        FIELD_ORDER.iter().copied().find(|f| self.get(*f).is_none())
    }

    /// Copy of the profile with email and phone obfuscated. This is the only
    /// form ever exposed outside the process boundary.
    pub fn masked_view(&self) -> CandidateProfile {
        let mut masked = self.clone();
        if let Some(ref email) = masked.email {
            masked.email = Some(mask_email(email));
        }
        if let Some(ref phone) = masked.phone {
            masked.phone = Some(mask_phone(phone));
        }
        masked
    }

    /// Masked profile as a JSON value, for prompts and export
    pub fn masked_json(&self) -> serde_json::Value {
        serde_json::to_value(self.masked_view()).unwrap_or(serde_json::Value::Null)
    }

    fn slot(&self, field: ProfileField) -> &Option<String> {
        match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Experience => &self.experience,
            ProfileField::DesiredPosition => &self.desired_position,
            ProfileField::Location => &self.location,
            ProfileField::TechStack => &self.tech_stack,
        }
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::FullName => &mut self.full_name,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Experience => &mut self.experience,
            ProfileField::DesiredPosition => &mut self.desired_position,
            ProfileField::Location => &mut self.location,
            ProfileField::TechStack => &mut self.tech_stack,
        }
    }
}

/// Partial field mapping produced by the resume field-extraction capability.
///
/// Deserialized leniently from LLM output: any field may be absent or null.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExtractedFields {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub desired_position: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tech_stack: Option<String>,
}

impl ExtractedFields {
    /// Iterate over fields with non-empty values, in canonical order.
    /// The literal string "null" is treated as absent, matching the lenient
    /// handling of model output.
    pub fn present(&self) -> impl Iterator<Item = (ProfileField, &str)> {
        FIELD_ORDER.iter().filter_map(move |field| {
            let value = match field {
                ProfileField::FullName => &self.full_name,
                ProfileField::Email => &self.email,
                ProfileField::Phone => &self.phone,
                ProfileField::Experience => &self.experience,
                ProfileField::DesiredPosition => &self.desired_position,
                ProfileField::Location => &self.location,
                ProfileField::TechStack => &self.tech_stack,
            };
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty() && *v != "null")
                .map(|v| (*field, v))
        })
    }

    /// Whether extraction yielded zero usable fields
    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Mask an email address: first and last character of the local part kept,
/// interior replaced with asterisks. Local parts of two characters or fewer,
/// or strings without a single "@", mask to a literal "***".
pub fn mask_email(email: &str) -> String {
    let mut parts = email.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) if !local.is_empty() && !domain.is_empty() => (local, domain),
        _ => return "***".to_string(),
    };

    let chars: Vec<char> = local.chars().collect();
    if chars.len() <= 2 {
        return "***".to_string();
    }
    let masked: String = std::iter::once(chars[0])
        .chain(std::iter::repeat('*').take(chars.len() - 2))
        .chain(std::iter::once(chars[chars.len() - 1]))
        .collect();
    format!("{}@{}", masked, domain)
}

/// Mask a phone number: only the last four digits kept, all preceding digits
/// replaced with asterisks. Fewer than four digits masks to "****".
pub fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return "****".to_string();
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(digits.len() - 4), tail)
}
