//! Canonical CV document: the one shape the normalizer produces and the
//! page-fit engine consumes.
//!
//! Serialized in camelCase, which is the shape the builder UI reads and writes.
//! Every field has a default so a deserialized document is always fully populated.

use serde::{Deserialize, Serialize};

use crate::layout::templates::{is_harvard_template, max_pages_allowed, DEFAULT_TEMPLATE_ID};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvDocument {
    pub template_id: String,
    pub personal_info: PersonalInfo,
    /// Most recent first. Trimming removes from the tail.
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub languages: Vec<Language>,
    pub references: Vec<Reference>,
    pub settings: CvSettings,
}

impl Default for CvDocument {
    fn default() -> Self {
        CvDocument {
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            personal_info: PersonalInfo::default(),
            experiences: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            certifications: Vec::new(),
            projects: Vec::new(),
            languages: Vec::new(),
            references: Vec::new(),
            settings: CvSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub name: String,
    pub title: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Fit settings
// ────────────────────────────────────────────────────────────────────────────

/// Page-fit configuration carried on the document.
///
/// Only `allow_three_pages` is user state. Everything else is derived from the
/// template on every normalize/fit and is never trusted from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvSettings {
    pub max_pages_allowed: u32,
    pub allow_three_pages: bool,
    pub is_harvard_template: bool,
    pub show_page_limit_warning: bool,
    pub trimmed_items: TrimmedItems,
}

impl Default for CvSettings {
    fn default() -> Self {
        CvSettings {
            max_pages_allowed: 2,
            allow_three_pages: false,
            is_harvard_template: false,
            show_page_limit_warning: false,
            trimmed_items: TrimmedItems::default(),
        }
    }
}

impl CvSettings {
    /// Fresh settings for `template_id` with cleared fit output.
    pub fn for_template(template_id: &str, allow_three_pages: bool) -> Self {
        CvSettings {
            max_pages_allowed: max_pages_allowed(template_id, allow_three_pages),
            allow_three_pages,
            is_harvard_template: is_harvard_template(template_id),
            show_page_limit_warning: false,
            trimmed_items: TrimmedItems::default(),
        }
    }
}

/// Entries removed per section by the most recent fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrimmedItems {
    pub experiences: usize,
    pub education: usize,
    pub certifications: usize,
    pub references: usize,
}

impl TrimmedItems {
    pub fn any(&self) -> bool {
        self.total() > 0
    }

    pub fn total(&self) -> usize {
        self.experiences + self.education + self.certifications + self.references
    }

    /// Human-readable list of what was trimmed, e.g. "2 experiences, 1 education entry".
    /// `None` when nothing was trimmed.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            (self.experiences, "experience", "experiences"),
            (self.education, "education entry", "education entries"),
            (self.certifications, "certification", "certifications"),
            (self.references, "reference", "references"),
        ]
        .into_iter()
        .filter(|(count, _, _)| *count > 0)
        .map(|(count, one, many)| format!("{count} {}", if count == 1 { one } else { many }))
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
