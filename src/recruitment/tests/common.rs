use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::RecruitmentConfig;
use crate::recruitment::domain::{
    Candidate, CandidateForm, CandidateId, Degree, Gender, Job, JobId, Resume, ResumeId,
    ResumeSubmission, StaffRef, UserId,
};
use crate::recruitment::identity::{STAFF_ID_HEADER, STAFF_NAME_HEADER};
use crate::recruitment::memory::InMemoryRecordStore;
use crate::recruitment::repository::{
    CandidateQuery, CandidateRepository, JobRepository, RepositoryError, ResumeQuery,
    ResumeRepository,
};
use crate::recruitment::service::RecruitmentService;

pub(super) fn staff() -> StaffRef {
    StaffRef::new(UserId(7), "hr-lead")
}

pub(super) fn interviewer(name: &str) -> StaffRef {
    StaffRef::new(UserId(100 + name.len() as u64), name)
}

pub(super) fn old_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5)
        .single()
        .expect("valid timestamp")
}

pub(super) fn submission(username: &str, phone: &str) -> ResumeSubmission {
    ResumeSubmission {
        username: username.to_string(),
        city: "Shanghai".to_string(),
        phone: phone.to_string(),
        email: format!("{}@example.com", username.to_lowercase()),
        apply_position: "Backend Engineer".to_string(),
        born_address: "Hangzhou".to_string(),
        gender: Some(Gender::Female),
        bachelor_school: "Fudan University".to_string(),
        master_school: "Zhejiang University".to_string(),
        doctor_school: String::new(),
        major: "Computer Science".to_string(),
        degree: Some(Degree::Master),
        candidate_introduction: "Enjoys distributed systems".to_string(),
        work_experience: "3 years at a payments company".to_string(),
        project_experience: "Rewrote the settlement pipeline".to_string(),
    }
}

/// Resume as it would look if stored long ago, for timestamp assertions.
pub(super) fn stored_resume(id: u64, username: &str, phone: &str) -> Resume {
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
    } = submission(username, phone);

    Resume {
        id: ResumeId(id),
        username,
        applicant: StaffRef::new(UserId(900 + id), "applicant"),
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
        created_date: old_timestamp(),
        modified_date: old_timestamp(),
    }
}

pub(super) fn candidate_form(username: &str, telephone: &str) -> CandidateForm {
    CandidateForm {
        username: username.to_string(),
        city: "Beijing".to_string(),
        telephone: telephone.to_string(),
        bachelor_school: "Tsinghua University".to_string(),
        degree: Some(Degree::Bachelor),
        ..CandidateForm::default()
    }
}

pub(super) fn direct_candidate(id: u64, username: &str, telephone: &str) -> Candidate {
    Candidate::from_form(
        CandidateId(id),
        candidate_form(username, telephone),
        staff(),
        old_timestamp(),
    )
}

pub(super) fn build_service() -> (
    RecruitmentService<InMemoryRecordStore>,
    Arc<InMemoryRecordStore>,
) {
    build_service_with(RecruitmentConfig::default())
}

pub(super) fn build_service_with(
    config: RecruitmentConfig,
) -> (
    RecruitmentService<InMemoryRecordStore>,
    Arc<InMemoryRecordStore>,
) {
    let store = Arc::new(InMemoryRecordStore::default());
    let service = RecruitmentService::new(store.clone(), config);
    (service, store)
}

pub(super) fn submit(
    service: &RecruitmentService<InMemoryRecordStore>,
    username: &str,
    phone: &str,
) -> Resume {
    service
        .submit_resume(submission(username, phone), &staff())
        .expect("resume stored")
}

pub(super) fn staff_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(STAFF_ID_HEADER, "7")
        .header(STAFF_NAME_HEADER, "hr-lead");

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&body).expect("serialize body"),
            ))
            .expect("request builds"),
        None => builder.body(Body::empty()).expect("request builds"),
    }
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_slice(&body).expect("json payload")
}

/// Store that accepts everything except batch candidate inserts.
#[derive(Default)]
pub(super) struct BatchRejectingStore {
    pub(super) inner: InMemoryRecordStore,
}

impl JobRepository for BatchRejectingStore {
    fn next_job_id(&self) -> Result<JobId, RepositoryError> {
        self.inner.next_job_id()
    }

    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.inner.insert_job(job)
    }

    fn update_job(&self, job: Job) -> Result<(), RepositoryError> {
        self.inner.update_job(job)
    }

    fn fetch_job(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        self.inner.fetch_job(id)
    }

    fn list_jobs(&self) -> Result<Vec<Job>, RepositoryError> {
        self.inner.list_jobs()
    }
}

impl ResumeRepository for BatchRejectingStore {
    fn next_resume_id(&self) -> Result<ResumeId, RepositoryError> {
        self.inner.next_resume_id()
    }

    fn insert_resume(&self, resume: Resume) -> Result<Resume, RepositoryError> {
        self.inner.insert_resume(resume)
    }

    fn fetch_resume(&self, id: ResumeId) -> Result<Option<Resume>, RepositoryError> {
        self.inner.fetch_resume(id)
    }

    fn list_resumes(&self, query: &ResumeQuery) -> Result<Vec<Resume>, RepositoryError> {
        self.inner.list_resumes(query)
    }

    fn resumes_by_phone(&self, phone: &str) -> Result<Vec<Resume>, RepositoryError> {
        self.inner.resumes_by_phone(phone)
    }
}

impl CandidateRepository for BatchRejectingStore {
    fn next_candidate_id(&self) -> Result<CandidateId, RepositoryError> {
        self.inner.next_candidate_id()
    }

    fn insert_candidate(&self, candidate: Candidate) -> Result<Candidate, RepositoryError> {
        self.inner.insert_candidate(candidate)
    }

    fn insert_candidates(
        &self,
        _candidates: Vec<Candidate>,
    ) -> Result<Vec<Candidate>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_candidate(&self, candidate: Candidate) -> Result<(), RepositoryError> {
        self.inner.update_candidate(candidate)
    }

    fn fetch_candidate(&self, id: CandidateId) -> Result<Option<Candidate>, RepositoryError> {
        self.inner.fetch_candidate(id)
    }

    fn query_candidates(
        &self,
        query: &CandidateQuery,
    ) -> Result<Vec<Candidate>, RepositoryError> {
        self.inner.query_candidates(query)
    }

    fn candidates_from_resume(&self, resume: ResumeId) -> Result<Vec<Candidate>, RepositoryError> {
        self.inner.candidates_from_resume(resume)
    }
}
