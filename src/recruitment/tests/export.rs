use super::common::*;
use crate::recruitment::domain::{CandidateId, InterviewResult, RecordKind};
use crate::recruitment::export::{
    export_filename, title_case, write_candidates_csv, CandidateField, UTF8_BOM,
};
use crate::recruitment::service::RecruitmentError;
use chrono::{FixedOffset, TimeZone};

const HEADER_ROW: &str = "Name,City,Telephone,Bachelor School,Master School,Degree,\
First Interview Result,First Interviewer,Second Interview Result,Second Interviewer,\
Hr Interview Result,Hr Interviewer,Hr Remark";

fn parse_rows(body: &[u8]) -> Vec<Vec<String>> {
    let text = body.strip_prefix(UTF8_BOM).expect("body starts with BOM");
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text)
        .records()
        .map(|record| {
            record
                .expect("valid csv row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[test]
fn schema_lists_the_fixed_column_order() {
    let names: Vec<&str> = CandidateField::EXPORTABLE
        .iter()
        .map(|field| field.name())
        .collect();

    assert_eq!(
        names,
        vec![
            "username",
            "city",
            "telephone",
            "bachelor_school",
            "master_school",
            "degree",
            "first_result",
            "first_interviewer",
            "second_result",
            "second_interviewer",
            "HR_result",
            "HR_interviewer",
            "HR_remark",
        ]
    );
    assert_eq!(CandidateField::FirstResult.position(), 7);
    assert_eq!(CandidateField::HrRemark.position(), 13);
}

#[test]
fn title_case_capitalises_each_word() {
    assert_eq!(title_case("bachelor school"), "Bachelor School");
    assert_eq!(title_case("HR remark"), "Hr Remark");
    assert_eq!(title_case("first_result"), "First_Result");
}

#[test]
fn empty_selection_writes_only_the_header() {
    let mut body = Vec::new();
    write_candidates_csv(&mut body, &[]).expect("export writes");

    assert!(body.starts_with(UTF8_BOM));
    let text = std::str::from_utf8(&body[UTF8_BOM.len()..]).expect("utf-8");
    assert_eq!(text, format!("{HEADER_ROW}\n"));
}

#[test]
fn body_rows_follow_the_column_order() {
    let mut candidate = direct_candidate(1, "Alice", "13800000001");
    candidate.first.result = Some(InterviewResult::Pass);
    candidate.first.interviewer = Some(interviewer("zhang"));
    candidate.hr.result = Some(InterviewResult::Pending);
    candidate.hr.remark = "Strong candidate".to_string();

    let mut body = Vec::new();
    write_candidates_csv(&mut body, &[candidate]).expect("export writes");
    let rows = parse_rows(&body);

    assert_eq!(rows.len(), 2);
    let row = &rows[1];
    assert_eq!(row.len(), 13);
    assert_eq!(row[0], "Alice");
    assert_eq!(row[2], "13800000001");
    assert_eq!(row[5], "Bachelor");
    assert_eq!(row[6], "Pass");
    assert_eq!(row[7], "zhang");
    assert_eq!(row[8], "");
    assert_eq!(row[10], "Pending");
    assert_eq!(row[12], "Strong candidate");
}

#[test]
fn embedded_separators_are_quoted() {
    let mut candidate = direct_candidate(1, "Alice", "13800000001");
    candidate.hr.remark = "Solid, but \"quiet\"\nfollow up".to_string();

    let mut body = Vec::new();
    write_candidates_csv(&mut body, &[candidate]).expect("export writes");

    let text = std::str::from_utf8(&body[UTF8_BOM.len()..]).expect("utf-8");
    assert!(text.contains("\"Solid, but \"\"quiet\"\"\nfollow up\""));
    assert_eq!(parse_rows(&body)[1][12], "Solid, but \"quiet\"\nfollow up");
}

#[test]
fn filename_carries_a_second_resolution_timestamp() {
    let offset = FixedOffset::east_opt(8 * 3600).expect("valid offset");
    let at = offset
        .with_ymd_and_hms(2025, 10, 1, 9, 5, 7)
        .single()
        .expect("valid");

    assert_eq!(
        export_filename("recruitment-candidates-list", &at),
        "recruitment-candidates-list-2025-10-01-09-05-07.csv"
    );
}

#[test]
fn service_export_keeps_selection_order() {
    let (service, _) = build_service();
    let alice = service
        .create_candidate(candidate_form("Alice", "1"), &staff())
        .expect("created");
    let bob = service
        .create_candidate(candidate_form("Bob", "2"), &staff())
        .expect("created");

    let export = service
        .export(&[bob.candidate.id, alice.candidate.id], &staff())
        .expect("export succeeds");

    assert_eq!(export.rows, 2);
    assert!(export
        .filename
        .starts_with("recruitment-candidates-list-"));
    assert!(export.filename.ends_with(".csv"));
    let rows = parse_rows(&export.body);
    assert_eq!(rows[1][0], "Bob");
    assert_eq!(rows[2][0], "Alice");
}

#[test]
fn service_export_fails_fast_on_unknown_ids() {
    let (service, _) = build_service();
    let alice = service
        .create_candidate(candidate_form("Alice", "1"), &staff())
        .expect("created");

    match service.export(&[alice.candidate.id, CandidateId(404)], &staff()) {
        Err(RecruitmentError::NotFound { kind, ids }) => {
            assert_eq!(kind, RecordKind::Candidate);
            assert_eq!(ids, vec![404]);
        }
        other => panic!("expected not found error, got {other:?}"),
    }
}
