//! Field-name variants accumulated by stored CV documents over time.
//!
//! The first name in every table is the canonical (serialized) one, which keeps
//! normalization idempotent: a normalized document reads back through the
//! canonical names first.

use serde_json::{Map, Value};

pub mod section {
    pub const TEMPLATE_ID: &[&str] = &["templateId", "template_id"];
    pub const PERSONAL_INFO: &[&str] = &["personalInfo", "personal_info"];
    pub const EXPERIENCES: &[&str] = &["experiences", "experience", "workExperience", "work_experience"];
    pub const EDUCATION: &[&str] = &["education", "educations"];
    pub const SKILLS: &[&str] = &["skills"];
    pub const CERTIFICATIONS: &[&str] = &["certifications", "certificates"];
    pub const PROJECTS: &[&str] = &["projects"];
    pub const LANGUAGES: &[&str] = &["languages"];
    pub const REFERENCES: &[&str] = &["references"];
    pub const SETTINGS: &[&str] = &["settings"];
    pub const ALLOW_THREE_PAGES: &[&str] = &["allowThreePages", "allow_three_pages"];
    /// Top-level document name, used when the personal info has no name.
    pub const NAME: &[&str] = &["name"];
}

pub mod personal {
    pub const FULL_NAME: &[&str] = &["fullName", "full_name", "name"];
    pub const EMAIL: &[&str] = &["email"];
    pub const PHONE: &[&str] = &["phone", "phoneNumber", "phone_number"];
    pub const LOCATION: &[&str] = &["location", "address", "city"];
    pub const LINKEDIN: &[&str] = &["linkedin", "linkedIn", "linkedinUrl", "linkedin_url"];
    pub const WEBSITE: &[&str] = &["website", "portfolio", "url"];
    pub const SUMMARY: &[&str] = &["summary", "profile", "objective", "about"];
}

pub mod experience {
    pub const COMPANY: &[&str] = &["company", "employer", "organization"];
    pub const POSITION: &[&str] = &["position", "title", "role", "jobTitle", "job_title"];
    pub const LOCATION: &[&str] = &["location", "city"];
    pub const START_DATE: &[&str] = &["startDate", "start_date", "start", "from"];
    pub const END_DATE: &[&str] = &["endDate", "end_date", "end", "to"];
    pub const CURRENT: &[&str] = &["current", "isCurrent", "is_current"];
    pub const DESCRIPTION: &[&str] = &["description", "details", "responsibilities"];
}

pub mod education {
    pub const INSTITUTION: &[&str] = &["institution", "school", "university", "college"];
    pub const DEGREE: &[&str] = &["degree", "qualification"];
    pub const FIELD: &[&str] = &["field", "fieldOfStudy", "field_of_study", "major"];
    pub const START_DATE: &[&str] = &["startDate", "start_date", "start", "from"];
    pub const END_DATE: &[&str] = &["endDate", "end_date", "end", "to", "graduationDate"];
    pub const GPA: &[&str] = &["gpa", "grade"];
    pub const DESCRIPTION: &[&str] = &["description", "details", "achievements"];
}

pub mod skill {
    pub const NAME: &[&str] = &["name", "skill", "title"];
    pub const LEVEL: &[&str] = &["level", "proficiency"];
}

pub mod certification {
    pub const NAME: &[&str] = &["name", "title", "certification"];
    pub const ISSUER: &[&str] = &["issuer", "issuingOrganization", "organization", "authority"];
    pub const DATE: &[&str] = &["date", "issueDate", "issue_date", "year"];
    pub const DESCRIPTION: &[&str] = &["description", "details"];
}

pub mod language {
    pub const NAME: &[&str] = &["name", "language"];
    pub const PROFICIENCY: &[&str] = &["proficiency", "level", "fluency"];
}

pub mod reference {
    pub const NAME: &[&str] = &["name", "fullName"];
    pub const TITLE: &[&str] = &["title", "position", "role"];
    pub const COMPANY: &[&str] = &["company", "organization"];
    pub const EMAIL: &[&str] = &["email"];
    pub const PHONE: &[&str] = &["phone", "phoneNumber"];
    pub const RELATIONSHIP: &[&str] = &["relationship", "relation"];
}

pub mod project {
    pub const NAME: &[&str] = &["name", "title"];
    pub const DESCRIPTION: &[&str] = &["description", "summary", "details"];
    pub const TECHNOLOGIES: &[&str] = &["technologies", "techStack", "tech_stack", "stack", "tools"];
    pub const LINK: &[&str] = &["link", "url", "website", "github"];
}

// ────────────────────────────────────────────────────────────────────────────
// Lookups
// ────────────────────────────────────────────────────────────────────────────

/// Scalar text: strings as-is, numbers in their JSON spelling.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First alias holding non-blank scalar text. A blank canonical key falls
/// through to the older spellings.
pub fn text_field(entry: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|key| entry.get(*key).and_then(as_text).filter(|text| !is_blank(text)))
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn text_or_empty(entry: &Map<String, Value>, aliases: &[&str]) -> String {
    text_field(entry, aliases).unwrap_or_default()
}

/// Like [`text_field`], but a list of bullet strings is joined one per line.
pub fn long_text_or_empty(entry: &Map<String, Value>, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|key| entry.get(*key))
        .find_map(|value| {
            let text = match value {
                Value::Array(lines) => lines
                    .iter()
                    .filter_map(as_text)
                    .collect::<Vec<_>>()
                    .join("\n"),
                other => as_text(other)?,
            };
            (!is_blank(&text)).then_some(text)
        })
        .unwrap_or_default()
}

/// A list of strings given either as an array or a comma-separated string.
/// Empty lists fall through to the next alias.
pub fn string_list(entry: &Map<String, Value>, aliases: &[&str]) -> Vec<String> {
    aliases
        .iter()
        .filter_map(|key| entry.get(*key))
        .find_map(|value| {
            let items: Vec<String> = match value {
                Value::Array(items) => items.iter().filter_map(as_text).collect(),
                Value::String(csv) => csv
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect(),
                _ => return None,
            };
            (!items.is_empty()).then_some(items)
        })
        .unwrap_or_default()
}

pub fn bool_field(entry: &Map<String, Value>, aliases: &[&str]) -> Option<bool> {
    aliases
        .iter()
        .find_map(|key| entry.get(*key).and_then(Value::as_bool))
}

/// First alias holding an array. Absent or non-array sections are empty.
pub fn list_field<'a>(doc: &'a Map<String, Value>, aliases: &[&str]) -> &'a [Value] {
    aliases
        .iter()
        .find_map(|key| entry_array(doc.get(*key)))
        .unwrap_or(&[])
}

fn entry_array(value: Option<&Value>) -> Option<&[Value]> {
    value.and_then(Value::as_array).map(Vec::as_slice)
}

pub fn object_field<'a>(
    doc: &'a Map<String, Value>,
    aliases: &[&str],
) -> Option<&'a Map<String, Value>> {
    aliases
        .iter()
        .find_map(|key| doc.get(*key).and_then(Value::as_object))
}
