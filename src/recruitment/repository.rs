use std::cmp::Ordering;

use serde::Deserialize;

use super::domain::{
    Candidate, CandidateId, HrRating, Job, JobId, Resume, ResumeId, StaffRef,
};

/// Storage abstraction for postings.
pub trait JobRepository: Send + Sync {
    fn next_job_id(&self) -> Result<JobId, RepositoryError>;
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError>;
    fn update_job(&self, job: Job) -> Result<(), RepositoryError>;
    fn fetch_job(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;
    fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError>;
}

/// Storage abstraction for submitted resumes. Listings come back in id order.
pub trait ResumeRepository: Send + Sync {
    fn next_resume_id(&self) -> Result<ResumeId, RepositoryError>;
    fn insert_resume(&self, resume: Resume) -> Result<Resume, RepositoryError>;
    fn fetch_resume(&self, id: ResumeId) -> Result<Option<Resume>, RepositoryError>;
    fn list_resumes(&self, query: &ResumeQuery) -> Result<Vec<Resume>, RepositoryError>;
    fn resumes_by_phone(&self, phone: &str) -> Result<Vec<Resume>, RepositoryError>;
}

/// Storage abstraction for interview pipeline records.
pub trait CandidateRepository: Send + Sync {
    fn next_candidate_id(&self) -> Result<CandidateId, RepositoryError>;
    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError>;
    /// Store every record or none of them.
    fn insert_candidates(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<Candidate>, RepositoryError>;
    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError>;
    fn fetch_candidate(&self, id: CandidateId) -> Result<Option<Candidate>, RepositoryError>;
    fn query_candidates(&self, query: &CandidateQuery)
        -> Result<Vec<Candidate>, RepositoryError>;
    fn candidates_from_resume(&self, resume: ResumeId) -> Result<Vec<Candidate>, RepositoryError>;
}

/// Everything the recruitment service needs from a backing store.
pub trait RecordStore: JobRepository + ResumeRepository + CandidateRepository {}

impl<T> RecordStore for T where T: JobRepository + ResumeRepository + CandidateRepository {}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Resume list filter. `search` is a case-insensitive substring match over
/// username, phone, email and bachelor school.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResumeQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    pub apply_position: Option<String>,
}

impl ResumeQuery {
    pub fn matches(&self, resume: &Resume) -> bool {
        if !field_equals(self.city.as_deref(), &resume.city) {
            return false;
        }
        if !field_equals(self.apply_position.as_deref(), &resume.apply_position) {
            return false;
        }
        search_hits(
            self.search.as_deref(),
            [
                resume.username.as_str(),
                resume.phone.as_str(),
                resume.email.as_str(),
                resume.bachelor_school.as_str(),
            ],
        )
    }
}

/// Candidate list filter mirroring the admin console: a search box, per-column
/// filters, and a fixed ordering by HR, second and first score. The HR filters
/// also accept the console's `HR_score` / `HR_interviewer` parameter names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CandidateQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    pub first_score: Option<f32>,
    pub second_score: Option<f32>,
    #[serde(alias = "HR_score")]
    pub hr_score: Option<HrRating>,
    pub first_interviewer: Option<String>,
    pub second_interviewer: Option<String>,
    #[serde(alias = "HR_interviewer")]
    pub hr_interviewer: Option<String>,
}

impl CandidateQuery {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        if !field_equals(self.city.as_deref(), &candidate.city) {
            return false;
        }
        if self.first_score.is_some() && self.first_score != candidate.first.score {
            return false;
        }
        if self.second_score.is_some() && self.second_score != candidate.second.score {
            return false;
        }
        if self.hr_score.is_some() && self.hr_score != candidate.hr.score {
            return false;
        }
        let interviewers = [
            (&self.first_interviewer, &candidate.first.interviewer),
            (&self.second_interviewer, &candidate.second.interviewer),
            (&self.hr_interviewer, &candidate.hr.interviewer),
        ];
        for (wanted, actual) in interviewers {
            if !interviewer_matches(wanted.as_deref(), actual.as_ref()) {
                return false;
            }
        }
        search_hits(
            self.search.as_deref(),
            [
                candidate.username.as_str(),
                candidate.telephone.as_str(),
                candidate.email.as_str(),
                candidate.bachelor_school.as_str(),
            ],
        )
    }

    /// Order by HR score, then second score, then first score; unscored records
    /// sort first and the id breaks remaining ties.
    pub fn sort(candidates: &mut [Candidate]) {
        candidates.sort_by(|left, right| {
            left.hr
                .score
                .cmp(&right.hr.score)
                .then_with(|| compare_scores(left.second.score, right.second.score))
                .then_with(|| compare_scores(left.first.score, right.first.score))
                .then_with(|| left.id.cmp(&right.id))
        });
    }
}

fn compare_scores(left: Option<f32>, right: Option<f32>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.total_cmp(&right),
        (left, right) => left.is_some().cmp(&right.is_some()),
    }
}

fn field_equals(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim).filter(|value| !value.is_empty()) {
        Some(wanted) => wanted == actual.trim(),
        None => true,
    }
}

fn interviewer_matches(wanted: Option<&str>, actual: Option<&StaffRef>) -> bool {
    match wanted.map(str::trim).filter(|value| !value.is_empty()) {
        Some(wanted) => actual.is_some_and(|staff| staff.username == wanted),
        None => true,
    }
}

fn search_hits<'a>(needle: Option<&str>, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = match needle.map(str::trim).filter(|value| !value.is_empty()) {
        Some(needle) => needle.to_lowercase(),
        None => return true,
    };
    haystacks
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
}
