use super::common::*;
use crate::config::RecruitmentConfig;
use crate::recruitment::domain::{CandidateId, RecordKind, ResumeId};
use crate::recruitment::memory::InMemoryRecordStore;
use crate::recruitment::promotion::{candidate_from_resume, confirmation_message};
use crate::recruitment::repository::{CandidateRepository, RepositoryError, ResumeRepository};
use crate::recruitment::service::{RecruitmentError, RecruitmentService};
use crate::recruitment::validation::ValidationError;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

#[test]
fn mapping_copies_shared_fields_and_leaves_resume_only_fields() {
    let resume = stored_resume(3, "Alice", "13800000001");
    let promoted_at = Utc
        .with_ymd_and_hms(2025, 10, 1, 9, 30, 0)
        .single()
        .expect("valid");

    let candidate = candidate_from_resume(CandidateId(11), &resume, &staff(), promoted_at);

    assert_eq!(candidate.id, CandidateId(11));
    assert_eq!(candidate.username, resume.username);
    assert_eq!(candidate.telephone, resume.phone);
    assert_eq!(candidate.email, resume.email);
    assert_eq!(candidate.bachelor_school, resume.bachelor_school);
    assert_eq!(candidate.master_school, resume.master_school);
    assert_eq!(candidate.degree, resume.degree);
    assert_eq!(candidate.gender, resume.gender);
    assert_eq!(candidate.source_resume, Some(ResumeId(3)));
    assert_eq!(candidate.creator, staff());
    assert!(candidate.candidate_remark.is_empty());
    assert!(candidate.first.result.is_none());
    assert_eq!(candidate.created_date, promoted_at);
    assert_eq!(candidate.modified_date, promoted_at);
}

#[test]
fn confirmation_lists_names_in_reverse_with_trailing_separator() {
    let message = confirmation_message(["Alice", "Bob"]);

    assert_eq!(
        message,
        "Candidates: Bob,Alice, have entered the interview process"
    );
}

#[test]
fn promotion_creates_one_candidate_per_resume_without_touching_resumes() {
    let (service, store) = build_service();
    let alice = submit(&service, "Alice", "13800000001");
    let bob = submit(&service, "Bob", "13800000002");
    let carol = submit(&service, "Carol", "13800000003");

    let outcome = service
        .promote(&[alice.id, bob.id, carol.id], &staff())
        .expect("promotion succeeds");

    assert_eq!(outcome.candidates.len(), 3);
    assert_eq!(store.candidate_count().expect("count"), 3);
    assert_eq!(
        outcome.message,
        "Candidates: Carol,Bob,Alice, have entered the interview process"
    );
    for resume in [&alice, &bob, &carol] {
        let stored = store
            .fetch_resume(resume.id)
            .expect("fetch succeeds")
            .expect("resume kept");
        assert_eq!(&stored, resume);
    }
}

#[test]
fn promoted_candidates_take_the_promotion_time() {
    let (service, store) = build_service();
    store
        .insert_resume(stored_resume(40, "Alice", "13800000001"))
        .expect("seed resume");

    let before = Utc::now();
    let outcome = service
        .promote(&[ResumeId(40)], &staff())
        .expect("promotion succeeds");
    let after = Utc::now();

    let candidate = &outcome.candidates[0];
    assert!(candidate.created_date >= before && candidate.created_date <= after);
    assert_eq!(candidate.created_date, candidate.modified_date);
    assert_ne!(candidate.created_date, old_timestamp());
}

#[test]
fn repeated_promotion_creates_distinct_candidates() {
    let (service, store) = build_service();
    let alice = submit(&service, "Alice", "13800000001");

    let first = service.promote(&[alice.id], &staff()).expect("first run");
    let second = service.promote(&[alice.id], &staff()).expect("second run");

    assert_ne!(first.candidates[0].id, second.candidates[0].id);
    assert_eq!(
        store
            .candidates_from_resume(alice.id)
            .expect("query succeeds")
            .len(),
        2
    );
}

#[test]
fn repromotion_can_be_refused_by_config() {
    let (service, store) = build_service_with(RecruitmentConfig {
        allow_repromotion: false,
        ..RecruitmentConfig::default()
    });
    let alice = submit(&service, "Alice", "13800000001");
    let bob = submit(&service, "Bob", "13800000002");
    service.promote(&[alice.id], &staff()).expect("first run");

    match service.promote(&[bob.id, alice.id], &staff()) {
        Err(RecruitmentError::AlreadyPromoted { ids }) => assert_eq!(ids, vec![alice.id.0]),
        other => panic!("expected already promoted error, got {other:?}"),
    }
    assert_eq!(store.candidate_count().expect("count"), 1);
}

#[test]
fn empty_selection_is_rejected() {
    let (service, _) = build_service();

    match service.promote(&[], &staff()) {
        Err(RecruitmentError::Validation(ValidationError::EmptySelection { action })) => {
            assert_eq!(action, "promotion")
        }
        other => panic!("expected empty selection error, got {other:?}"),
    }
}

#[test]
fn missing_resume_aborts_before_any_insert() {
    let (service, store) = build_service();
    let alice = submit(&service, "Alice", "13800000001");

    match service.promote(&[alice.id, ResumeId(99), ResumeId(100)], &staff()) {
        Err(RecruitmentError::NotFound { kind, ids }) => {
            assert_eq!(kind, RecordKind::Resume);
            assert_eq!(ids, vec![99, 100]);
        }
        other => panic!("expected not found error, got {other:?}"),
    }
    assert_eq!(store.candidate_count().expect("count"), 0);
}

#[test]
fn invalid_resume_data_aborts_the_whole_batch() {
    let (service, store) = build_service();
    let alice = submit(&service, "Alice", "13800000001");
    let mut broken = stored_resume(50, "  ", "13800000009");
    broken.email = "not-an-address".to_string();
    store.insert_resume(broken).expect("seed resume");

    let err = service
        .promote(&[alice.id, ResumeId(50)], &staff())
        .expect_err("batch rejected");

    assert!(matches!(
        err,
        RecruitmentError::Validation(ValidationError::MissingField {
            field: "username",
            ..
        })
    ));
    assert_eq!(store.candidate_count().expect("count"), 0);
}

#[test]
fn store_failure_surfaces_as_repository_error() {
    let store = Arc::new(BatchRejectingStore::default());
    let service = RecruitmentService::new(store.clone(), RecruitmentConfig::default());
    let resume = service
        .submit_resume(submission("Alice", "13800000001"), &staff())
        .expect("resume stored");

    match service.promote(&[resume.id], &staff()) {
        Err(RecruitmentError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository error, got {other:?}"),
    }
    let untouched: &InMemoryRecordStore = &store.inner;
    assert_eq!(untouched.candidate_count().expect("count"), 0);
}
