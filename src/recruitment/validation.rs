use super::domain::{Candidate, JobDraft, ResumeSubmission};

const JOB_NAME_MAX_CHARS: usize = 250;
const STAGE_SCORE_MAX: f32 = 9.9;
const ASSESSMENT_SCORE_MAX: f32 = 99.9;

/// Form-level problems found before anything reaches the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{record}: `{field}` is required")]
    MissingField { record: String, field: &'static str },
    #[error("{record}: `{field}` exceeds {max} characters")]
    TooLong {
        record: String,
        field: &'static str,
        max: usize,
    },
    #[error("{record}: `{value}` is not a valid email address")]
    InvalidEmail { record: String, value: String },
    #[error("{record}: `{field}` must be between 0.0 and {max:.1} (found {value})")]
    ScoreOutOfRange {
        record: String,
        field: &'static str,
        value: f32,
        max: f32,
    },
    #[error("{action} requires at least one selected record")]
    EmptySelection { action: &'static str },
}

pub(crate) fn job_draft(draft: &JobDraft) -> Result<(), ValidationError> {
    let record = "job".to_string();
    if draft.name.trim().is_empty() {
        return Err(ValidationError::MissingField {
            record,
            field: "name",
        });
    }
    if draft.name.chars().count() > JOB_NAME_MAX_CHARS {
        return Err(ValidationError::TooLong {
            record,
            field: "name",
            max: JOB_NAME_MAX_CHARS,
        });
    }
    Ok(())
}

pub(crate) fn resume_submission(submission: &ResumeSubmission) -> Result<(), ValidationError> {
    let record = "resume".to_string();
    if submission.username.trim().is_empty() {
        return Err(ValidationError::MissingField {
            record,
            field: "username",
        });
    }
    email(&record, &submission.email)
}

pub(crate) fn candidate(candidate: &Candidate) -> Result<(), ValidationError> {
    let record = if candidate.username.trim().is_empty() {
        format!("candidate {}", candidate.id)
    } else {
        format!("candidate \"{}\"", candidate.username)
    };

    if candidate.username.trim().is_empty() {
        return Err(ValidationError::MissingField {
            record,
            field: "username",
        });
    }
    email(&record, &candidate.email)?;

    let assessment = [
        (
            "test_score_of_general_ability",
            candidate.test_score_of_general_ability,
        ),
        ("paper_score", candidate.paper_score),
    ];
    let stages = [
        ("first_score", candidate.first.score),
        ("first_learning_ability", candidate.first.learning_ability),
        (
            "first_professional_competency",
            candidate.first.professional_competency,
        ),
        ("second_score", candidate.second.score),
        ("second_learning_ability", candidate.second.learning_ability),
        (
            "second_professional_competency",
            candidate.second.professional_competency,
        ),
        (
            "second_pursue_of_excellence",
            candidate.second.pursue_of_excellence,
        ),
        (
            "second_communication_ability",
            candidate.second.communication_ability,
        ),
        ("second_pressure_score", candidate.second.pressure_score),
    ];

    for (field, value) in assessment {
        score(&record, field, value, ASSESSMENT_SCORE_MAX)?;
    }
    for (field, value) in stages {
        score(&record, field, value, STAGE_SCORE_MAX)?;
    }
    Ok(())
}

fn email(record: &str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidEmail {
            record: record.to_string(),
            value: value.to_string(),
        }),
    }
}

fn score(
    record: &str,
    field: &'static str,
    value: Option<f32>,
    max: f32,
) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.is_finite() || !(0.0..=max).contains(&value) => {
            Err(ValidationError::ScoreOutOfRange {
                record: record.to_string(),
                field,
                value,
                max,
            })
        }
        _ => Ok(()),
    }
}
