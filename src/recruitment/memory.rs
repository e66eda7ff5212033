use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{Candidate, CandidateId, Job, JobId, Resume, ResumeId};
use super::repository::{
    CandidateQuery, CandidateRepository, JobRepository, RepositoryError, ResumeQuery,
    ResumeRepository,
};

/// Mutex-guarded record store backed by ordered maps, so every listing comes
/// back in id (insertion) order.
#[derive(Default, Clone)]
pub struct InMemoryRecordStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    jobs: BTreeMap<JobId, Job>,
    resumes: BTreeMap<ResumeId, Resume>,
    candidates: BTreeMap<CandidateId, Candidate>,
    job_sequence: u64,
    resume_sequence: u64,
    candidate_sequence: u64,
}

impl InMemoryRecordStore {
    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store lock poisoned".to_string()))
    }

    pub fn candidate_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.tables()?.candidates.len())
    }
}

impl JobRepository for InMemoryRecordStore {
    fn next_job_id(&self) -> Result<JobId, RepositoryError> {
        let mut tables = self.tables()?;
        tables.job_sequence += 1;
        Ok(JobId(tables.job_sequence))
    }

    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.jobs.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        tables.jobs.insert(job.id, job.clone());
        Ok(job)
    }

    fn update_job(&self, job: Job) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        match tables.jobs.get_mut(&job.id) {
            Some(slot) => {
                *slot = job;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_job(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.tables()?.jobs.get(&id).cloned())
    }

    fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.tables()?.jobs.values().cloned().collect())
    }
}

impl ResumeRepository for InMemoryRecordStore {
    fn next_resume_id(&self) -> Result<ResumeId, RepositoryError> {
        let mut tables = self.tables()?;
        tables.resume_sequence += 1;
        Ok(ResumeId(tables.resume_sequence))
    }

    fn insert_resume(&self, resume: Resume) -> Result<Resume, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.resumes.contains_key(&resume.id) {
            return Err(RepositoryError::Conflict);
        }
        tables.resumes.insert(resume.id, resume.clone());
        Ok(resume)
    }

    fn fetch_resume(&self, id: ResumeId) -> Result<Option<Resume>, RepositoryError> {
        Ok(self.tables()?.resumes.get(&id).cloned())
    }

    fn list_resumes(&self, query: &ResumeQuery) -> Result<Vec<Resume>, RepositoryError> {
        Ok(self
            .tables()?
            .resumes
            .values()
            .filter(|resume| query.matches(resume))
            .cloned()
            .collect())
    }

    fn resumes_by_phone(&self, phone: &str) -> Result<Vec<Resume>, RepositoryError> {
        Ok(self
            .tables()?
            .resumes
            .values()
            .filter(|resume| resume.phone == phone)
            .cloned()
            .collect())
    }
}

impl CandidateRepository for InMemoryRecordStore {
    fn next_candidate_id(&self) -> Result<CandidateId, RepositoryError> {
        let mut tables = self.tables()?;
        tables.candidate_sequence += 1;
        Ok(CandidateId(tables.candidate_sequence))
    }

    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.candidates.contains_key(&candidate.id) {
            return Err(RepositoryError::Conflict);
        }
        tables.candidates.insert(candidate.id, candidate.clone());
        Ok(candidate)
    }

    fn insert_candidates(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<Vec<Candidate>, RepositoryError> {
        let mut tables = self.tables()?;
        let mut seen = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            if tables.candidates.contains_key(&candidate.id) || seen.contains(&candidate.id) {
                return Err(RepositoryError::Conflict);
            }
            seen.push(candidate.id);
        }
        for candidate in &candidates {
            tables.candidates.insert(candidate.id, candidate.clone());
        }
        Ok(candidates)
    }

    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        match tables.candidates.get_mut(&candidate.id) {
            Some(slot) => {
                *slot = candidate;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_candidate(&self, id: CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        Ok(self.tables()?.candidates.get(&id).cloned())
    }

    fn query_candidates(
        &self,
        query: &CandidateQuery,
    ) -> Result<Vec<Candidate>, RepositoryError> {
        let mut matched: Vec<Candidate> = self
            .tables()?
            .candidates
            .values()
            .filter(|candidate| query.matches(candidate))
            .cloned()
            .collect();
        CandidateQuery::sort(&mut matched);
        Ok(matched)
    }

    fn candidates_from_resume(&self, resume: ResumeId) -> Result<Vec<Candidate>, RepositoryError> {
        Ok(self
            .tables()?
            .candidates
            .values()
            .filter(|candidate| candidate.source_resume == Some(resume))
            .cloned()
            .collect())
    }
}
