//! Recruitment pipeline: job postings, resume intake, and the staged candidate
//! interview process.
//!
//! Resumes are promoted into candidates in bulk, candidates are scored through
//! the first, second and HR rounds, and selected candidates can be exported as a
//! CSV report. Storage sits behind the repository traits so the service and the
//! HTTP router can run against any backing store.

pub mod domain;
pub mod export;
pub mod identity;
pub mod linker;
pub mod memory;
pub mod promotion;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Candidate, CandidateForm, CandidateId, Degree, FirstInterview, Gender, HrInterview,
    HrRating, InterviewResult, Job, JobCity, JobDraft, JobId, JobType, RecordKind, Resume,
    ResumeId, ResumeSubmission, SecondInterview, StaffRef, UserId,
};
pub use export::{CandidateField, CsvExport, ExportError};
pub use identity::ActingUser;
pub use linker::ResumeLink;
pub use memory::InMemoryRecordStore;
pub use promotion::PromotionOutcome;
pub use repository::{
    CandidateQuery, CandidateRepository, JobRepository, RecordStore, RepositoryError,
    ResumeQuery, ResumeRepository,
};
pub use router::recruitment_router;
pub use service::{CandidateView, RecruitmentError, RecruitmentService};
pub use validation::ValidationError;
