//! Pre-fill reconciler
//!
//! Merges resume-extracted fields into the profile and fast-forwards the
//! stage to the first field still genuinely unknown. Extracted values never
//! overwrite confirmed ones, and the stage never moves backward, so running
//! the reconciler twice with the same data is a no-op the second time.

use hiring_agent_core::{CandidateProfile, ExtractedFields, InterviewStage};

/// What a reconciliation pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Fields newly filled from extracted data
    pub merged: usize,
    pub stage_before: InterviewStage,
    pub stage_after: InterviewStage,
}

impl ReconcileOutcome {
    pub fn fast_forwarded(&self) -> bool {
        self.stage_after != self.stage_before
    }
}

/// Merge extracted fields and compute the fast-forward target.
///
/// The target is the collection stage of the first field in canonical order
/// still absent after merging; with all seven present it is the technical
/// assessment. Zero usable extracted fields leaves both profile and stage
/// untouched.
pub fn reconcile(
    profile: &mut CandidateProfile,
    stage: InterviewStage,
    extracted: &ExtractedFields,
) -> ReconcileOutcome {
    if extracted.is_empty() {
        return ReconcileOutcome {
            merged: 0,
            stage_before: stage,
            stage_after: stage,
        };
    }

    let mut merged = 0;
    for (field, value) in extracted.present() {
        if profile.get(field).is_none() {
            merged += 1;
        }
        profile.set_if_absent(field, value);
    }

    let target = profile
        .first_missing()
        .map(|field| field.collection_stage())
        .unwrap_or(InterviewStage::TechnicalQuestions);
    let stage_after = stage.fast_forward(target);

    tracing::info!(merged, from = %stage, to = %stage_after, "Reconciled extracted fields");
    ReconcileOutcome {
        merged,
        stage_before: stage,
        stage_after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiring_agent_core::ProfileField;

    fn extracted(full_name: Option<&str>, email: Option<&str>) -> ExtractedFields {
        ExtractedFields {
            full_name: full_name.map(String::from),
            email: email.map(String::from),
            ..ExtractedFields::default()
        }
    }

    #[test]
    fn fast_forwards_to_first_missing_field() {
        let mut profile = CandidateProfile::new();
        let outcome = reconcile(
            &mut profile,
            InterviewStage::Greeting,
            &extracted(Some("Asha Rao"), Some("asha@x.com")),
        );

        assert_eq!(outcome.merged, 2);
        assert_eq!(outcome.stage_after, InterviewStage::Phone);
        assert_eq!(profile.get(ProfileField::FullName), Some("Asha Rao"));
        assert_eq!(profile.get(ProfileField::Email), Some("asha@x.com"));
    }

    #[test]
    fn idempotent_under_repetition() {
        let mut profile = CandidateProfile::new();
        let data = extracted(Some("Asha Rao"), Some("asha@x.com"));

        let first = reconcile(&mut profile, InterviewStage::Greeting, &data);
        let snapshot = profile.clone();
        let second = reconcile(&mut profile, first.stage_after, &data);

        assert_eq!(profile, snapshot);
        assert_eq!(second.stage_after, first.stage_after);
        assert_eq!(second.merged, 0);
    }

    #[test]
    fn confirmed_values_are_never_clobbered() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::FullName, "Confirmed Name");

        reconcile(
            &mut profile,
            InterviewStage::Email,
            &extracted(Some("Extracted Name"), None),
        );
        assert_eq!(profile.get(ProfileField::FullName), Some("Confirmed Name"));
    }

    #[test]
    fn empty_extraction_is_a_noop() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::FullName, "Asha Rao");

        let outcome = reconcile(&mut profile, InterviewStage::Greeting, &ExtractedFields::default());
        assert_eq!(outcome.merged, 0);
        assert!(!outcome.fast_forwarded());
        assert_eq!(outcome.stage_after, InterviewStage::Greeting);
    }

    #[test]
    fn full_extraction_targets_technical_questions() {
        let mut profile = CandidateProfile::new();
        let data = ExtractedFields {
            full_name: Some("Asha Rao".into()),
            email: Some("asha@x.com".into()),
            phone: Some("5551234567".into()),
            experience: Some("5 years".into()),
            desired_position: Some("Backend Engineer".into()),
            location: Some("Bengaluru, India".into()),
            tech_stack: Some("Rust, PostgreSQL".into()),
        };

        let outcome = reconcile(&mut profile, InterviewStage::Greeting, &data);
        assert_eq!(outcome.merged, 7);
        assert_eq!(outcome.stage_after, InterviewStage::TechnicalQuestions);
    }

    #[test]
    fn never_moves_the_stage_backward() {
        let mut profile = CandidateProfile::new();
        let outcome = reconcile(
            &mut profile,
            InterviewStage::Experience,
            &extracted(Some("Asha Rao"), None),
        );
        // first missing after merge is email, which precedes experience
        assert_eq!(outcome.stage_after, InterviewStage::Experience);
    }
}
