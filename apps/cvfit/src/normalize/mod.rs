//! CV normalizer: reconciles every stored/transmitted CV shape into one
//! [`CvDocument`].
//!
//! Total and pure: malformed or missing input degrades to an empty-but-valid
//! document, never an error. Field-name aliasing is resolved here and nowhere
//! else (see [`aliases`]).

pub mod aliases;
pub mod unwrap;

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::layout::templates::DEFAULT_TEMPLATE_ID;
use crate::models::cv::{
    Certification, CvDocument, CvSettings, Education, Experience, Language, PersonalInfo,
    Project, Reference, Skill,
};

use aliases::{
    bool_field, list_field, long_text_or_empty, object_field, string_list, text_field,
    text_or_empty,
};

pub use unwrap::unwrap_builder;

/// End date shown for a role flagged as current without an explicit end date.
const CURRENT_END_DATE: &str = "Present";

/// Normalizes any raw CV payload into the canonical document.
///
/// `normalize(&to_value(normalize(x)))` equals `normalize(x)` for every `x`.
pub fn normalize(raw: &Value) -> CvDocument {
    let unwrapped = unwrap_builder(raw);
    let empty = Map::new();
    let doc = unwrapped.as_object().unwrap_or(&empty);

    let template_id = resolve_document_template(doc, raw);

    let allow_three_pages = object_field(doc, aliases::section::SETTINGS)
        .and_then(|settings| bool_field(settings, aliases::section::ALLOW_THREE_PAGES))
        .unwrap_or(false);

    let document = CvDocument {
        settings: CvSettings::for_template(&template_id, allow_three_pages),
        template_id,
        personal_info: personal_info(doc),
        experiences: entries(doc, aliases::section::EXPERIENCES, experience),
        education: entries(doc, aliases::section::EDUCATION, education),
        skills: dedup_skills(named_entries(doc, aliases::section::SKILLS, skill)),
        certifications: named_entries(doc, aliases::section::CERTIFICATIONS, certification),
        projects: named_entries(doc, aliases::section::PROJECTS, project),
        languages: named_entries(doc, aliases::section::LANGUAGES, language),
        references: named_entries(doc, aliases::section::REFERENCES, reference),
    };

    debug!(
        template_id = %document.template_id,
        experiences = document.experiences.len(),
        education = document.education.len(),
        skills = document.skills.len(),
        "normalized CV document"
    );

    document
}

/// `templateId` on the document, then `template_id` beside it, then on the
/// outer payload, then the default template.
fn resolve_document_template(doc: &Map<String, Value>, raw: &Value) -> String {
    let outer = unwrap::try_parse(raw.clone());
    text_field(doc, aliases::section::TEMPLATE_ID)
        .filter(|id| !id.trim().is_empty())
        .or_else(|| {
            outer
                .as_object()
                .and_then(|outer| text_field(outer, aliases::section::TEMPLATE_ID))
                .filter(|id| !id.trim().is_empty())
        })
        .unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string())
}

fn personal_info(doc: &Map<String, Value>) -> PersonalInfo {
    let empty = Map::new();
    let pi = object_field(doc, aliases::section::PERSONAL_INFO).unwrap_or(&empty);

    PersonalInfo {
        full_name: text_field(pi, aliases::personal::FULL_NAME)
            .or_else(|| text_field(doc, aliases::section::NAME))
            .unwrap_or_default(),
        email: text_or_empty(pi, aliases::personal::EMAIL),
        phone: text_or_empty(pi, aliases::personal::PHONE),
        location: text_or_empty(pi, aliases::personal::LOCATION),
        linkedin: text_or_empty(pi, aliases::personal::LINKEDIN),
        website: text_or_empty(pi, aliases::personal::WEBSITE),
        summary: long_text_or_empty(pi, aliases::personal::SUMMARY),
    }
}

/// Builds one section from its object entries; anything else is dropped.
fn entries<T>(
    doc: &Map<String, Value>,
    section: &[&str],
    build: fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    list_field(doc, section)
        .iter()
        .filter_map(|item| item.as_object().map(build))
        .collect()
}

/// Like [`entries`], but a bare string is taken as the entry's name
/// (`"skills": ["Rust"]`).
fn named_entries<T>(
    doc: &Map<String, Value>,
    section: &[&str],
    build: fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    list_field(doc, section)
        .iter()
        .filter_map(|item| match item {
            Value::Object(entry) => Some(build(entry)),
            Value::String(name) => {
                let mut entry = Map::new();
                entry.insert("name".to_string(), Value::String(name.clone()));
                Some(build(&entry))
            }
            _ => None,
        })
        .collect()
}

fn experience(entry: &Map<String, Value>) -> Experience {
    use aliases::experience as f;

    let mut end_date = text_or_empty(entry, f::END_DATE);
    if end_date.is_empty() && bool_field(entry, f::CURRENT).unwrap_or(false) {
        end_date = CURRENT_END_DATE.to_string();
    }

    Experience {
        company: text_or_empty(entry, f::COMPANY),
        position: text_or_empty(entry, f::POSITION),
        location: text_or_empty(entry, f::LOCATION),
        start_date: text_or_empty(entry, f::START_DATE),
        end_date,
        description: long_text_or_empty(entry, f::DESCRIPTION),
    }
}

fn education(entry: &Map<String, Value>) -> Education {
    use aliases::education as f;

    Education {
        institution: text_or_empty(entry, f::INSTITUTION),
        degree: text_or_empty(entry, f::DEGREE),
        field: text_or_empty(entry, f::FIELD),
        start_date: text_or_empty(entry, f::START_DATE),
        end_date: text_or_empty(entry, f::END_DATE),
        gpa: text_or_empty(entry, f::GPA),
        description: long_text_or_empty(entry, f::DESCRIPTION),
    }
}

fn skill(entry: &Map<String, Value>) -> Skill {
    Skill {
        name: text_or_empty(entry, aliases::skill::NAME),
        level: text_or_empty(entry, aliases::skill::LEVEL),
    }
}

fn certification(entry: &Map<String, Value>) -> Certification {
    use aliases::certification as f;

    Certification {
        name: text_or_empty(entry, f::NAME),
        issuer: text_or_empty(entry, f::ISSUER),
        date: text_or_empty(entry, f::DATE),
        description: long_text_or_empty(entry, f::DESCRIPTION),
    }
}

fn language(entry: &Map<String, Value>) -> Language {
    Language {
        name: text_or_empty(entry, aliases::language::NAME),
        proficiency: text_or_empty(entry, aliases::language::PROFICIENCY),
    }
}

fn reference(entry: &Map<String, Value>) -> Reference {
    use aliases::reference as f;

    Reference {
        name: text_or_empty(entry, f::NAME),
        title: text_or_empty(entry, f::TITLE),
        company: text_or_empty(entry, f::COMPANY),
        email: text_or_empty(entry, f::EMAIL),
        phone: text_or_empty(entry, f::PHONE),
        relationship: text_or_empty(entry, f::RELATIONSHIP),
    }
}

fn project(entry: &Map<String, Value>) -> Project {
    use aliases::project as f;

    Project {
        name: text_or_empty(entry, f::NAME),
        description: long_text_or_empty(entry, f::DESCRIPTION),
        technologies: string_list(entry, f::TECHNOLOGIES),
        link: text_or_empty(entry, f::LINK),
    }
}

/// Skills are a set keyed by name (case-insensitive). First occurrence wins,
/// unnamed skills are dropped.
fn dedup_skills(skills: Vec<Skill>) -> Vec<Skill> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter(|skill| {
            let key = skill.name.trim().to_lowercase();
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}
