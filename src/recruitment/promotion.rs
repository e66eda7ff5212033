//! Resume-to-candidate promotion.
//!
//! Promotion copies the fields a resume shares with the interview pipeline onto a
//! fresh candidate record. The source resume is never modified, and nothing stops
//! the same resume from being promoted more than once unless the service is
//! configured to refuse it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    Candidate, CandidateId, FirstInterview, HrInterview, Resume, SecondInterview, StaffRef,
};

/// Separator placed after every promoted name in the confirmation message.
pub const NAME_SEPARATOR: char = ',';

/// Result of a successful promotion request.
#[derive(Debug, Clone, Serialize)]
pub struct PromotionOutcome {
    pub message: String,
    pub candidates: Vec<Candidate>,
}

/// Map a resume onto a new candidate. The destructuring is exhaustive so a field
/// added to `Resume` must be explicitly copied or explicitly left behind.
pub fn candidate_from_resume(
    id: CandidateId,
    resume: &Resume,
    creator: &StaffRef,
    promoted_at: DateTime<Utc>,
) -> Candidate {
    let Resume {
        id: resume_id,
        username,
        applicant: _,
        city,
        phone,
        email,
        apply_position,
        born_address,
        gender,
        bachelor_school,
        master_school,
        doctor_school,
        major,
        degree,
        candidate_introduction: _,
        work_experience: _,
        project_experience: _,
        created_date: _,
        modified_date: _,
    } = resume.clone();

    Candidate {
        id,
        userid: None,
        username,
        city,
        telephone: phone,
        email,
        born_address,
        gender,
        apply_position,
        candidate_remark: String::new(),
        bachelor_school,
        master_school,
        doctor_school,
        major,
        degree,
        test_score_of_general_ability: None,
        paper_score: None,
        first: FirstInterview::default(),
        second: SecondInterview::default(),
        hr: HrInterview::default(),
        source_resume: Some(resume_id),
        creator: creator.clone(),
        last_editor: None,
        created_date: promoted_at,
        modified_date: promoted_at,
    }
}

/// Confirmation shown to staff. Each name is prepended, so names read in reverse
/// selection order and every name carries a trailing separator.
pub fn confirmation_message<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let listed = names.into_iter().fold(String::new(), |listed, name| {
        format!("{name}{NAME_SEPARATOR}{listed}")
    });
    format!("Candidates: {listed} have entered the interview process")
}
