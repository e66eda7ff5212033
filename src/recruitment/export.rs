//! Candidate CSV export.
//!
//! Columns come from the static [`CandidateField`] schema. The document starts
//! with a UTF-8 byte-order mark and is offered as a timestamped attachment.

use std::borrow::Cow;
use std::io::Write;

use chrono::{DateTime, TimeZone};

use super::domain::{Candidate, InterviewResult, StaffRef};

/// Byte-order mark written ahead of the CSV so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const DEFAULT_EXPORT_PREFIX: &str = "recruitment-candidates-list";

/// Static schema of the exportable candidate columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateField {
    Username,
    City,
    Telephone,
    BachelorSchool,
    MasterSchool,
    Degree,
    FirstResult,
    FirstInterviewer,
    SecondResult,
    SecondInterviewer,
    HrResult,
    HrInterviewer,
    HrRemark,
}

impl CandidateField {
    /// Export columns in output order.
    pub const EXPORTABLE: [CandidateField; 13] = [
        CandidateField::Username,
        CandidateField::City,
        CandidateField::Telephone,
        CandidateField::BachelorSchool,
        CandidateField::MasterSchool,
        CandidateField::Degree,
        CandidateField::FirstResult,
        CandidateField::FirstInterviewer,
        CandidateField::SecondResult,
        CandidateField::SecondInterviewer,
        CandidateField::HrResult,
        CandidateField::HrInterviewer,
        CandidateField::HrRemark,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            CandidateField::Username => "username",
            CandidateField::City => "city",
            CandidateField::Telephone => "telephone",
            CandidateField::BachelorSchool => "bachelor_school",
            CandidateField::MasterSchool => "master_school",
            CandidateField::Degree => "degree",
            CandidateField::FirstResult => "first_result",
            CandidateField::FirstInterviewer => "first_interviewer",
            CandidateField::SecondResult => "second_result",
            CandidateField::SecondInterviewer => "second_interviewer",
            CandidateField::HrResult => "HR_result",
            CandidateField::HrInterviewer => "HR_interviewer",
            CandidateField::HrRemark => "HR_remark",
        }
    }

    pub const fn verbose_name(self) -> &'static str {
        match self {
            CandidateField::Username => "name",
            CandidateField::City => "city",
            CandidateField::Telephone => "telephone",
            CandidateField::BachelorSchool => "bachelor school",
            CandidateField::MasterSchool => "master school",
            CandidateField::Degree => "degree",
            CandidateField::FirstResult => "first interview result",
            CandidateField::FirstInterviewer => "first interviewer",
            CandidateField::SecondResult => "second interview result",
            CandidateField::SecondInterviewer => "second interviewer",
            CandidateField::HrResult => "HR interview result",
            CandidateField::HrInterviewer => "HR interviewer",
            CandidateField::HrRemark => "HR remark",
        }
    }

    /// 1-based column position in the export.
    pub fn position(self) -> usize {
        Self::EXPORTABLE
            .iter()
            .position(|field| *field == self)
            .map_or(0, |index| index + 1)
    }

    pub fn header(self) -> String {
        title_case(self.verbose_name())
    }

    pub fn value(self, candidate: &Candidate) -> Cow<'_, str> {
        match self {
            CandidateField::Username => Cow::Borrowed(&candidate.username),
            CandidateField::City => Cow::Borrowed(&candidate.city),
            CandidateField::Telephone => Cow::Borrowed(&candidate.telephone),
            CandidateField::BachelorSchool => Cow::Borrowed(&candidate.bachelor_school),
            CandidateField::MasterSchool => Cow::Borrowed(&candidate.master_school),
            CandidateField::Degree => {
                Cow::Borrowed(candidate.degree.map_or("", |degree| degree.label()))
            }
            CandidateField::FirstResult => result_label(candidate.first.result),
            CandidateField::FirstInterviewer => staff_name(candidate.first.interviewer.as_ref()),
            CandidateField::SecondResult => result_label(candidate.second.result),
            CandidateField::SecondInterviewer => {
                staff_name(candidate.second.interviewer.as_ref())
            }
            CandidateField::HrResult => result_label(candidate.hr.result),
            CandidateField::HrInterviewer => staff_name(candidate.hr.interviewer.as_ref()),
            CandidateField::HrRemark => Cow::Borrowed(&candidate.hr.remark),
        }
    }
}

fn result_label(result: Option<InterviewResult>) -> Cow<'static, str> {
    Cow::Borrowed(result.map_or("", |result| result.label()))
}

fn staff_name(staff: Option<&StaffRef>) -> Cow<'_, str> {
    Cow::Borrowed(staff.map_or("", |staff| staff.display_name()))
}

/// Word-wise title casing: the first letter of every alphabetic run is upper-cased
/// and the rest lower-cased, so "HR remark" becomes "Hr Remark".
pub fn title_case(raw: &str) -> String {
    let mut titled = String::with_capacity(raw.len());
    let mut previous_alphabetic = false;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                titled.extend(ch.to_lowercase());
            } else {
                titled.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            titled.push(ch);
            previous_alphabetic = false;
        }
    }
    titled
}

/// Download file name, e.g. `recruitment-candidates-list-2025-10-01-09-30-00.csv`.
pub fn export_filename<Tz>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}-{}.csv", at.format("%Y-%m-%d-%H-%M-%S"))
}

/// Write the BOM, the header row and one row per candidate.
pub fn write_candidates_csv<W: Write>(
    mut writer: W,
    candidates: &[Candidate],
) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CandidateField::EXPORTABLE.iter().map(|field| field.header()))?;
    for candidate in candidates {
        let row: Vec<Cow<'_, str>> = CandidateField::EXPORTABLE
            .iter()
            .map(|field| field.value(candidate))
            .collect();
        csv_writer.write_record(row.iter().map(|value| value.as_bytes()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// An export ready to be offered as a download.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub rows: usize,
    pub body: Vec<u8>,
}

impl CsvExport {
    pub fn content_type(&self) -> mime::Mime {
        mime::TEXT_CSV_UTF_8
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// Raised when the export document cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write candidate export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write candidate export: {0}")]
    Io(#[from] std::io::Error),
}
