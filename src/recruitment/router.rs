use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{
    CandidateForm, CandidateId, JobDraft, JobId, ResumeId, ResumeSubmission,
};
use super::identity::ActingUser;
use super::repository::{CandidateQuery, RecordStore, ResumeQuery};
use super::service::{RecruitmentError, RecruitmentService};

type SharedService<S> = State<Arc<RecruitmentService<S>>>;

/// Router exposing the admin API for jobs, resumes and candidates, including the
/// promotion and export bulk actions.
pub fn recruitment_router<S>(service: Arc<RecruitmentService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api/v1/jobs", get(list_jobs::<S>).post(create_job::<S>))
        .route(
            "/api/v1/jobs/:job_id",
            get(job_detail::<S>).put(update_job::<S>),
        )
        .route(
            "/api/v1/resumes",
            get(list_resumes::<S>).post(submit_resume::<S>),
        )
        .route("/api/v1/resumes/:resume_id", get(resume_detail::<S>))
        .route("/api/v1/promotions", post(promote_resumes::<S>))
        .route(
            "/api/v1/candidates",
            get(list_candidates::<S>).post(create_candidate::<S>),
        )
        .route(
            "/api/v1/candidates/:candidate_id",
            get(candidate_detail::<S>).put(update_candidate::<S>),
        )
        .route("/api/v1/candidate-exports", post(export_candidates::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PromotionRequest {
    pub(crate) resume_ids: Vec<ResumeId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PromotionResponse {
    pub(crate) message: String,
    pub(crate) candidate_ids: Vec<CandidateId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportRequest {
    #[serde(default)]
    pub(crate) candidate_ids: Vec<CandidateId>,
}

pub(crate) async fn list_jobs<S>(State(service): SharedService<S>) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.jobs()?).into_response())
}

pub(crate) async fn create_job<S>(
    State(service): SharedService<S>,
    ActingUser(actor): ActingUser,
    Json(draft): Json<JobDraft>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    let job = service.create_job(draft, &actor)?;
    Ok((StatusCode::CREATED, Json(job)).into_response())
}

pub(crate) async fn job_detail<S>(
    State(service): SharedService<S>,
    Path(job_id): Path<u64>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.job(JobId(job_id))?).into_response())
}

pub(crate) async fn update_job<S>(
    State(service): SharedService<S>,
    Path(job_id): Path<u64>,
    ActingUser(_actor): ActingUser,
    Json(draft): Json<JobDraft>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.update_job(JobId(job_id), draft)?).into_response())
}

pub(crate) async fn list_resumes<S>(
    State(service): SharedService<S>,
    Query(query): Query<ResumeQuery>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.resumes(&query)?).into_response())
}

pub(crate) async fn submit_resume<S>(
    State(service): SharedService<S>,
    ActingUser(applicant): ActingUser,
    Json(submission): Json<ResumeSubmission>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    let resume = service.submit_resume(submission, &applicant)?;
    Ok((StatusCode::CREATED, Json(resume)).into_response())
}

pub(crate) async fn resume_detail<S>(
    State(service): SharedService<S>,
    Path(resume_id): Path<u64>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.resume(ResumeId(resume_id))?).into_response())
}

pub(crate) async fn promote_resumes<S>(
    State(service): SharedService<S>,
    ActingUser(actor): ActingUser,
    Json(request): Json<PromotionRequest>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    let outcome = service.promote(&request.resume_ids, &actor)?;
    let response = PromotionResponse {
        message: outcome.message,
        candidate_ids: outcome
            .candidates
            .iter()
            .map(|candidate| candidate.id)
            .collect(),
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

pub(crate) async fn list_candidates<S>(
    State(service): SharedService<S>,
    Query(query): Query<CandidateQuery>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.candidates(&query)?).into_response())
}

pub(crate) async fn create_candidate<S>(
    State(service): SharedService<S>,
    ActingUser(actor): ActingUser,
    Json(form): Json<CandidateForm>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    let view = service.create_candidate(form, &actor)?;
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

pub(crate) async fn candidate_detail<S>(
    State(service): SharedService<S>,
    Path(candidate_id): Path<u64>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    Ok(Json(service.candidate(CandidateId(candidate_id))?).into_response())
}

pub(crate) async fn update_candidate<S>(
    State(service): SharedService<S>,
    Path(candidate_id): Path<u64>,
    ActingUser(editor): ActingUser,
    Json(form): Json<CandidateForm>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    let view = service.update_candidate(CandidateId(candidate_id), form, &editor)?;
    Ok(Json(view).into_response())
}

pub(crate) async fn export_candidates<S>(
    State(service): SharedService<S>,
    ActingUser(actor): ActingUser,
    Json(request): Json<ExportRequest>,
) -> Result<Response, RecruitmentError>
where
    S: RecordStore + 'static,
{
    let export = service.export(&request.candidate_ids, &actor)?;
    let headers = [
        (header::CONTENT_TYPE, export.content_type().to_string()),
        (header::CONTENT_DISPOSITION, export.content_disposition()),
    ];
    Ok((StatusCode::OK, headers, export.body).into_response())
}

impl IntoResponse for RecruitmentError {
    fn into_response(self) -> Response {
        let status = match &self {
            RecruitmentError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RecruitmentError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecruitmentError::AlreadyPromoted { .. } => StatusCode::CONFLICT,
            RecruitmentError::Repository(_) | RecruitmentError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "recruitment request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
