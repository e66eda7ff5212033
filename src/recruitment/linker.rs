use serde::Serialize;
use tracing::debug;

use super::domain::{Candidate, ResumeId};
use super::repository::{RepositoryError, ResumeRepository};

/// Pointer from a candidate to the resume detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeLink {
    pub resume_id: ResumeId,
    pub href: String,
}

impl ResumeLink {
    pub fn to(resume_id: ResumeId) -> Self {
        Self {
            resume_id,
            href: format!("/api/v1/resumes/{}", resume_id.0),
        }
    }
}

/// Find the resume behind a candidate.
///
/// The explicit `source_resume` reference wins when it still resolves. Otherwise
/// the candidate's telephone is matched exactly against resume phone numbers and
/// the first match in store order is used. A blank telephone never links.
pub fn resume_link<R>(
    resumes: &R,
    candidate: &Candidate,
) -> Result<Option<ResumeLink>, RepositoryError>
where
    R: ResumeRepository + ?Sized,
{
    if let Some(source) = candidate.source_resume {
        if resumes.fetch_resume(source)?.is_some() {
            return Ok(Some(ResumeLink::to(source)));
        }
        debug!(candidate = %candidate.id, resume = %source, "source resume no longer resolves");
    }

    if candidate.telephone.trim().is_empty() {
        return Ok(None);
    }

    let link = resumes
        .resumes_by_phone(&candidate.telephone)?
        .first()
        .map(|resume| ResumeLink::to(resume.id));
    debug!(candidate = %candidate.id, linked = link.is_some(), "resume lookup by telephone");
    Ok(link)
}
