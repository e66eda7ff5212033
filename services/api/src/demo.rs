use clap::Args;
use recruitment::config::RecruitmentConfig;
use recruitment::error::AppError;
use recruitment::recruitment::{
    Candidate, CandidateForm, Degree, Gender, HrRating, InMemoryRecordStore, InterviewResult, JobCity,
    JobDraft, JobType, RecordStore, RecruitmentService, ResumeSubmission, StaffRef, UserId,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the candidate CSV export to this path instead of stdout.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryRecordStore::default());
    let service = RecruitmentService::new(store, RecruitmentConfig::default());
    let hr_lead = StaffRef::new(UserId(1), "hr-lead");
    let interviewer = StaffRef::new(UserId(2), "li.wei");

    // Progress goes to stderr; stdout carries only the CSV.
    eprintln!("Recruitment pipeline demo");
    let job = service.create_job(demo_job(), &hr_lead)?;
    eprintln!(
        "- Published job {} \"{}\" ({}, {})",
        job.id,
        job.name,
        job.job_type.label(),
        job.city.label()
    );

    let mut resume_ids = Vec::new();
    for (name, phone) in [("Zhang San", "13800000001"), ("Li Si", "13800000002")] {
        let resume = service.submit_resume(demo_resume(name, phone, &job.name), &hr_lead)?;
        eprintln!(
            "- Received resume {} from {} ({})",
            resume.id,
            resume.username,
            resume.gender.map_or("n/a", |gender| gender.label())
        );
        resume_ids.push(resume.id);
    }

    let outcome = service.promote(&resume_ids, &hr_lead)?;
    eprintln!("- {}", outcome.message);

    let Some(first) = outcome.candidates.first() else {
        return Ok(());
    };
    let view = service.update_candidate(first.id, scored_form(first, &interviewer), &interviewer)?;
    eprintln!(
        "- Recorded interviews for {} (first {}, HR {})",
        view.candidate.username,
        view.candidate
            .first
            .result
            .map_or("n/a", |result| result.label()),
        view.candidate.hr.score.map_or("n/a", |score| score.label()),
    );

    report_links(&service, &outcome.candidates)?;

    let candidate_ids: Vec<_> = outcome
        .candidates
        .iter()
        .map(|candidate| candidate.id)
        .collect();
    let export = service.export(&candidate_ids, &hr_lead)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &export.body)
                .map_err(AppError::export_output(path.display().to_string()))?;
            eprintln!(
                "- Exported {} candidates to {} (suggested name {})",
                export.rows,
                path.display(),
                export.filename
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&export.body)
                .and_then(|()| stdout.flush())
                .map_err(AppError::export_output("stdout"))?;
        }
    }

    Ok(())
}

fn report_links<S>(
    service: &RecruitmentService<S>,
    candidates: &[Candidate],
) -> Result<(), AppError>
where
    S: RecordStore + 'static,
{
    for candidate in candidates {
        match service.resume_link(candidate)? {
            Some(link) => eprintln!("  {} -> {}", candidate.username, link.href),
            None => eprintln!("  {} -> no resume on file", candidate.username),
        }
    }
    Ok(())
}

fn demo_job() -> JobDraft {
    JobDraft {
        name: "Backend Engineer".to_string(),
        job_type: JobType::Technical,
        city: JobCity::Shanghai,
        responsibility: "Build and operate the order platform services".to_string(),
        requirement: "Three years of server-side development".to_string(),
    }
}

fn demo_resume(name: &str, phone: &str, position: &str) -> ResumeSubmission {
    ResumeSubmission {
        username: name.to_string(),
        city: "Shanghai".to_string(),
        phone: phone.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        apply_position: position.to_string(),
        gender: Some(Gender::Male),
        bachelor_school: "Tongji University".to_string(),
        major: "Software Engineering".to_string(),
        degree: Some(Degree::Bachelor),
        work_experience: "Four years building payment services".to_string(),
        ..ResumeSubmission::default()
    }
}

fn scored_form(
    candidate: &Candidate,
    interviewer: &StaffRef,
) -> CandidateForm {
    let mut form = CandidateForm {
        username: candidate.username.clone(),
        city: candidate.city.clone(),
        telephone: candidate.telephone.clone(),
        email: candidate.email.clone(),
        born_address: candidate.born_address.clone(),
        gender: candidate.gender,
        apply_position: candidate.apply_position.clone(),
        bachelor_school: candidate.bachelor_school.clone(),
        master_school: candidate.master_school.clone(),
        doctor_school: candidate.doctor_school.clone(),
        major: candidate.major.clone(),
        degree: candidate.degree,
        test_score_of_general_ability: Some(86.5),
        paper_score: Some(78.0),
        ..CandidateForm::default()
    };

    form.first.score = Some(8.6);
    form.first.result = Some(InterviewResult::Pass);
    form.first.interviewer = Some(interviewer.clone());
    form.second.score = Some(8.1);
    form.second.result = Some(InterviewResult::Pass);
    form.second.interviewer = Some(interviewer.clone());
    form.hr.score = Some(HrRating::A);
    form.hr.result = Some(InterviewResult::Pending);
    form.hr.interviewer = Some(interviewer.clone());
    form.hr.remark = "Salary expectations under review".to_string();
    form
}
