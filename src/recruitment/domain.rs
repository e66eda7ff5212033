use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

record_id!(
    /// Store-assigned identifier for job postings.
    JobId
);
record_id!(
    /// Store-assigned identifier for submitted resumes.
    ResumeId
);
record_id!(
    /// Store-assigned identifier for interview pipeline records.
    CandidateId
);
record_id!(
    /// Identifier issued by the upstream identity provider for staff accounts.
    UserId
);

/// The three record kinds held by the store, used to label lookups in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Job,
    Resume,
    Candidate,
}

impl RecordKind {
    pub const fn label(self) -> &'static str {
        match self {
            RecordKind::Job => "job",
            RecordKind::Resume => "resume",
            RecordKind::Candidate => "candidate",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to a staff account. Every "who acted" field stores one of these so
/// display strings are always derived from the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffRef {
    pub id: UserId,
    pub username: String,
}

impl StaffRef {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for StaffRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Technical,
    Product,
    Operations,
    Design,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            JobType::Technical => "Technical",
            JobType::Product => "Product",
            JobType::Operations => "Operations",
            JobType::Design => "Design",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobCity {
    Beijing,
    Shanghai,
    Shenzhen,
}

impl JobCity {
    pub const fn label(self) -> &'static str {
        match self {
            JobCity::Beijing => "Beijing",
            JobCity::Shanghai => "Shanghai",
            JobCity::Shenzhen => "Shenzhen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Degree {
    Bachelor,
    Master,
    Doctorate,
    Other,
}

impl Degree {
    pub const fn label(self) -> &'static str {
        match self {
            Degree::Bachelor => "Bachelor",
            Degree::Master => "Master",
            Degree::Doctorate => "Doctorate",
            Degree::Other => "Other",
        }
    }
}

/// Outcome recorded at the end of an interview stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewResult {
    Pass,
    Pending,
    Fail,
}

impl InterviewResult {
    pub const fn label(self) -> &'static str {
        match self {
            InterviewResult::Pass => "Pass",
            InterviewResult::Pending => "Pending",
            InterviewResult::Fail => "Fail",
        }
    }
}

/// Letter grade used throughout the HR round. Declaration order is rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HrRating {
    S,
    A,
    B,
    C,
}

impl HrRating {
    pub const fn label(self) -> &'static str {
        match self {
            HrRating::S => "S",
            HrRating::A => "A",
            HrRating::B => "B",
            HrRating::C => "C",
        }
    }
}

/// A published posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub job_type: JobType,
    pub city: JobCity,
    pub responsibility: String,
    pub requirement: String,
    pub creator: StaffRef,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

/// Staff-editable part of a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub name: String,
    pub job_type: JobType,
    pub city: JobCity,
    #[serde(default)]
    pub responsibility: String,
    #[serde(default)]
    pub requirement: String,
}

/// An application as stored after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: ResumeId,
    pub username: String,
    pub applicant: StaffRef,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub apply_position: String,
    pub born_address: String,
    pub gender: Option<Gender>,
    pub bachelor_school: String,
    pub master_school: String,
    pub doctor_school: String,
    pub major: String,
    pub degree: Option<Degree>,
    pub candidate_introduction: String,
    pub work_experience: String,
    pub project_experience: String,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

/// Fields an applicant fills in; the applicant identity and timestamps are never
/// accepted from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeSubmission {
    pub username: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub apply_position: String,
    pub born_address: String,
    pub gender: Option<Gender>,
    pub bachelor_school: String,
    pub master_school: String,
    pub doctor_school: String,
    pub major: String,
    pub degree: Option<Degree>,
    pub candidate_introduction: String,
    pub work_experience: String,
    pub project_experience: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstInterview {
    pub score: Option<f32>,
    pub learning_ability: Option<f32>,
    pub professional_competency: Option<f32>,
    pub advantage: String,
    pub disadvantage: String,
    pub result: Option<InterviewResult>,
    pub recommend_position: String,
    pub interviewer: Option<StaffRef>,
    pub remark: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondInterview {
    pub score: Option<f32>,
    pub learning_ability: Option<f32>,
    pub professional_competency: Option<f32>,
    pub pursue_of_excellence: Option<f32>,
    pub communication_ability: Option<f32>,
    pub pressure_score: Option<f32>,
    pub advantage: String,
    pub disadvantage: String,
    pub result: Option<InterviewResult>,
    pub recommend_position: String,
    pub interviewer: Option<StaffRef>,
    pub remark: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrInterview {
    pub score: Option<HrRating>,
    pub responsibility: Option<HrRating>,
    pub communication_ability: Option<HrRating>,
    pub logic_ability: Option<HrRating>,
    pub potential: Option<HrRating>,
    pub stability: Option<HrRating>,
    pub advantage: String,
    pub disadvantage: String,
    pub result: Option<InterviewResult>,
    pub interviewer: Option<StaffRef>,
    pub remark: String,
}

/// Interview pipeline record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub userid: Option<u64>,
    pub username: String,
    pub city: String,
    pub telephone: String,
    pub email: String,
    pub born_address: String,
    pub gender: Option<Gender>,
    pub apply_position: String,
    pub candidate_remark: String,
    pub bachelor_school: String,
    pub master_school: String,
    pub doctor_school: String,
    pub major: String,
    pub degree: Option<Degree>,
    pub test_score_of_general_ability: Option<f32>,
    pub paper_score: Option<f32>,
    pub first: FirstInterview,
    pub second: SecondInterview,
    pub hr: HrInterview,
    pub source_resume: Option<ResumeId>,
    pub creator: StaffRef,
    pub last_editor: Option<StaffRef>,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
}

/// Editable candidate fields. `creator`, `source_resume`, `last_editor` and the
/// timestamps are system-managed and deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateForm {
    pub userid: Option<u64>,
    pub username: String,
    pub city: String,
    pub telephone: String,
    pub email: String,
    pub born_address: String,
    pub gender: Option<Gender>,
    pub apply_position: String,
    pub candidate_remark: String,
    pub bachelor_school: String,
    pub master_school: String,
    pub doctor_school: String,
    pub major: String,
    pub degree: Option<Degree>,
    pub test_score_of_general_ability: Option<f32>,
    pub paper_score: Option<f32>,
    pub first: FirstInterview,
    pub second: SecondInterview,
    pub hr: HrInterview,
}

impl Candidate {
    /// Build a staff-entered record from the editable form.
    pub fn from_form(
        id: CandidateId,
        form: CandidateForm,
        creator: StaffRef,
        now: DateTime<Utc>,
    ) -> Self {
        let mut candidate = Self {
            id,
            userid: None,
            username: String::new(),
            city: String::new(),
            telephone: String::new(),
            email: String::new(),
            born_address: String::new(),
            gender: None,
            apply_position: String::new(),
            candidate_remark: String::new(),
            bachelor_school: String::new(),
            master_school: String::new(),
            doctor_school: String::new(),
            major: String::new(),
            degree: None,
            test_score_of_general_ability: None,
            paper_score: None,
            first: FirstInterview::default(),
            second: SecondInterview::default(),
            hr: HrInterview::default(),
            source_resume: None,
            creator,
            last_editor: None,
            created_date: now,
            modified_date: now,
        };
        candidate.apply_form(form);
        candidate
    }

    /// Overwrite every editable field, leaving system-managed ones untouched.
    pub fn apply_form(&mut self, form: CandidateForm) {
        let CandidateForm {
            userid,
            username,
            city,
            telephone,
            email,
            born_address,
            gender,
            apply_position,
            candidate_remark,
            bachelor_school,
            master_school,
            doctor_school,
            major,
            degree,
            test_score_of_general_ability,
            paper_score,
            first,
            second,
            hr,
        } = form;

        self.userid = userid;
        self.username = username;
        self.city = city;
        self.telephone = telephone;
        self.email = email;
        self.born_address = born_address;
        self.gender = gender;
        self.apply_position = apply_position;
        self.candidate_remark = candidate_remark;
        self.bachelor_school = bachelor_school;
        self.master_school = master_school;
        self.doctor_school = doctor_school;
        self.major = major;
        self.degree = degree;
        self.test_score_of_general_ability = test_score_of_general_ability;
        self.paper_score = paper_score;
        self.first = first;
        self.second = second;
        self.hr = hr;
    }
}
