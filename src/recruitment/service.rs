use std::sync::Arc;

use chrono::{Local, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    Candidate, CandidateForm, CandidateId, Job, JobDraft, JobId, RecordKind, Resume, ResumeId,
    ResumeSubmission, StaffRef,
};
use super::export::{export_filename, write_candidates_csv, CsvExport, ExportError};
use super::linker::{resume_link, ResumeLink};
use super::promotion::{candidate_from_resume, confirmation_message, PromotionOutcome};
use super::repository::{CandidateQuery, RecordStore, RepositoryError, ResumeQuery};
use super::validation::{self, ValidationError};
use crate::config::RecruitmentConfig;

/// Candidate record paired with its resume link for list and detail views.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub resume_link: Option<ResumeLink>,
}

/// Facade applying validation, system-managed fields and the promotion, export
/// and lookup workflows on top of a record store.
pub struct RecruitmentService<S> {
    store: Arc<S>,
    config: RecruitmentConfig,
}

impl<S> RecruitmentService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>, config: RecruitmentConfig) -> Self {
        Self { store, config }
    }

    /// Publish a posting; the acting user becomes its permanent creator.
    pub fn create_job(&self, draft: JobDraft, creator: &StaffRef) -> Result<Job, RecruitmentError> {
        validation::job_draft(&draft)?;
        let now = Utc::now();
        let JobDraft {
            name,
            job_type,
            city,
            responsibility,
            requirement,
        } = draft;

        let job = Job {
            id: self.store.next_job_id()?,
            name,
            job_type,
            city,
            responsibility,
            requirement,
            creator: creator.clone(),
            created_date: now,
            modified_date: now,
        };
        Ok(self.store.insert_job(job)?)
    }

    /// Edit a posting in place. Creator and creation time are kept.
    pub fn update_job(&self, id: JobId, draft: JobDraft) -> Result<Job, RecruitmentError> {
        validation::job_draft(&draft)?;
        let mut job = self.job(id)?;
        job.name = draft.name;
        job.job_type = draft.job_type;
        job.city = draft.city;
        job.responsibility = draft.responsibility;
        job.requirement = draft.requirement;
        job.modified_date = Utc::now();

        self.store.update_job(job.clone())?;
        Ok(job)
    }

    pub fn job(&self, id: JobId) -> Result<Job, RecruitmentError> {
        self.store
            .fetch_job(id)?
            .ok_or_else(|| RecruitmentError::not_found(RecordKind::Job, [id.0]))
    }

    pub fn jobs(&self) -> Result<Vec<Job>, RecruitmentError> {
        Ok(self.store.list_jobs()?)
    }

    /// Store a resume from the public submission flow.
    pub fn submit_resume(
        &self,
        submission: ResumeSubmission,
        applicant: &StaffRef,
    ) -> Result<Resume, RecruitmentError> {
        validation::resume_submission(&submission)?;
        let now = Utc::now();
        let ResumeSubmission {
            username,
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
            candidate_introduction,
            work_experience,
            project_experience,
        } = submission;

        let resume = Resume {
            id: self.store.next_resume_id()?,
            username,
            applicant: applicant.clone(),
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
            candidate_introduction,
            work_experience,
            project_experience,
            created_date: now,
            modified_date: now,
        };
        Ok(self.store.insert_resume(resume)?)
    }

    pub fn resume(&self, id: ResumeId) -> Result<Resume, RecruitmentError> {
        self.store
            .fetch_resume(id)?
            .ok_or_else(|| RecruitmentError::not_found(RecordKind::Resume, [id.0]))
    }

    pub fn resumes(&self, query: &ResumeQuery) -> Result<Vec<Resume>, RecruitmentError> {
        Ok(self.store.list_resumes(query)?)
    }

    /// Enter a candidate directly, without a source resume.
    pub fn create_candidate(
        &self,
        form: CandidateForm,
        creator: &StaffRef,
    ) -> Result<CandidateView, RecruitmentError> {
        let candidate = Candidate::from_form(
            self.store.next_candidate_id()?,
            form,
            creator.clone(),
            Utc::now(),
        );
        validation::candidate(&candidate)?;
        let stored = self.store.insert_candidate(candidate)?;
        self.view(stored)
    }

    /// Record interview progress. System-managed fields survive the edit.
    pub fn update_candidate(
        &self,
        id: CandidateId,
        form: CandidateForm,
        editor: &StaffRef,
    ) -> Result<CandidateView, RecruitmentError> {
        let mut candidate = self.fetch_candidate(id)?;
        candidate.apply_form(form);
        candidate.last_editor = Some(editor.clone());
        candidate.modified_date = Utc::now();
        validation::candidate(&candidate)?;

        self.store.update_candidate(candidate.clone())?;
        self.view(candidate)
    }

    pub fn candidate(&self, id: CandidateId) -> Result<CandidateView, RecruitmentError> {
        let candidate = self.fetch_candidate(id)?;
        self.view(candidate)
    }

    pub fn candidates(&self, query: &CandidateQuery) -> Result<Vec<CandidateView>, RecruitmentError> {
        self.store
            .query_candidates(query)?
            .into_iter()
            .map(|candidate| self.view(candidate))
            .collect()
    }

    pub fn resume_link(&self, candidate: &Candidate) -> Result<Option<ResumeLink>, RecruitmentError> {
        Ok(resume_link(self.store.as_ref(), candidate)?)
    }

    /// Promote the selected resumes into the interview pipeline.
    ///
    /// All selected resumes are resolved and every new candidate validated before
    /// anything is written, and the batch is stored through a single
    /// all-or-nothing insert.
    pub fn promote(
        &self,
        resume_ids: &[ResumeId],
        actor: &StaffRef,
    ) -> Result<PromotionOutcome, RecruitmentError> {
        if resume_ids.is_empty() {
            return Err(ValidationError::EmptySelection {
                action: "promotion",
            }
            .into());
        }

        let mut resumes = Vec::with_capacity(resume_ids.len());
        let mut missing = Vec::new();
        for id in resume_ids {
            match self.store.fetch_resume(*id)? {
                Some(resume) => resumes.push(resume),
                None => missing.push(id.0),
            }
        }
        if !missing.is_empty() {
            return Err(RecruitmentError::not_found(RecordKind::Resume, missing));
        }

        if !self.config.allow_repromotion {
            let mut promoted = Vec::new();
            for resume in &resumes {
                if !self.store.candidates_from_resume(resume.id)?.is_empty() {
                    promoted.push(resume.id.0);
                }
            }
            if !promoted.is_empty() {
                warn!(actor = %actor, resumes = ?promoted, "rejected repeated promotion");
                return Err(RecruitmentError::AlreadyPromoted { ids: promoted });
            }
        }

        let promoted_at = Utc::now();
        let mut batch = Vec::with_capacity(resumes.len());
        for resume in &resumes {
            let id = self.store.next_candidate_id()?;
            let candidate = candidate_from_resume(id, resume, actor, promoted_at);
            validation::candidate(&candidate)?;
            batch.push(candidate);
        }

        let candidates = self.store.insert_candidates(batch)?;
        let message =
            confirmation_message(candidates.iter().map(|candidate| candidate.username.as_str()));

        info!(actor = %actor, promoted = candidates.len(), "resumes entered interview process");
        Ok(PromotionOutcome {
            message,
            candidates,
        })
    }

    /// Render the selected candidates as a CSV download, in selection order.
    pub fn export(
        &self,
        candidate_ids: &[CandidateId],
        actor: &StaffRef,
    ) -> Result<CsvExport, RecruitmentError> {
        let mut candidates = Vec::with_capacity(candidate_ids.len());
        let mut missing = Vec::new();
        for id in candidate_ids {
            match self.store.fetch_candidate(*id)? {
                Some(candidate) => candidates.push(candidate),
                None => missing.push(id.0),
            }
        }
        if !missing.is_empty() {
            return Err(RecruitmentError::not_found(RecordKind::Candidate, missing));
        }

        let mut body = Vec::new();
        write_candidates_csv(&mut body, &candidates)?;

        info!(actor = %actor, count = candidates.len(), "exported candidate records");
        Ok(CsvExport {
            filename: export_filename(&self.config.export_prefix, &Local::now()),
            rows: candidates.len(),
            body,
        })
    }

    fn fetch_candidate(&self, id: CandidateId) -> Result<Candidate, RecruitmentError> {
        self.store
            .fetch_candidate(id)?
            .ok_or_else(|| RecruitmentError::not_found(RecordKind::Candidate, [id.0]))
    }

    fn view(&self, candidate: Candidate) -> Result<CandidateView, RecruitmentError> {
        let resume_link = self.resume_link(&candidate)?;
        Ok(CandidateView {
            candidate,
            resume_link,
        })
    }
}

/// Error raised by the recruitment service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{kind} not found: {}", join_ids(.ids))]
    NotFound { kind: RecordKind, ids: Vec<u64> },
    #[error("resumes already promoted: {}", join_ids(.ids))]
    AlreadyPromoted { ids: Vec<u64> },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl RecruitmentError {
    fn not_found(kind: RecordKind, ids: impl IntoIterator<Item = u64>) -> Self {
        Self::NotFound {
            kind,
            ids: ids.into_iter().collect(),
        }
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(", ")
}
