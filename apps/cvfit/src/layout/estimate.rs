//! Content length estimator: a weighted word count, not a typographic simulation.
//!
//! Each section contributes a fixed base weight per entry plus the word count of
//! its free text. The page estimate divides by a single words-per-page constant.

use serde::{Deserialize, Serialize};

use crate::models::cv::CvDocument;

pub const DEFAULT_WORDS_PER_PAGE: usize = 300;

pub const EXPERIENCE_WEIGHT: usize = 50;
pub const EDUCATION_WEIGHT: usize = 30;
pub const SKILL_WEIGHT: usize = 5;
pub const CERTIFICATION_WEIGHT: usize = 20;
pub const LANGUAGE_WEIGHT: usize = 10;
pub const REFERENCE_WEIGHT: usize = 30;
pub const PROJECT_WEIGHT: usize = 40;

/// Page-fit tuning shared by estimation, the trim target and the over-limit advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitConfig {
    /// Weighted units that fill one rendered page. Always > 0.
    pub words_per_page: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig {
            words_per_page: DEFAULT_WORDS_PER_PAGE,
        }
    }
}

impl FitConfig {
    /// Weighted length a document may reach within `max_pages`. Saturates
    /// rather than overflowing for very large `words_per_page`.
    pub fn target_length(&self, max_pages: u32) -> usize {
        (max_pages as usize).saturating_mul(self.words_per_page)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEstimate {
    pub content_length: usize,
    pub estimated_pages: u32,
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Weighted length of every section of `doc`.
pub fn estimate_content_length(doc: &CvDocument) -> usize {
    let summary = word_count(&doc.personal_info.summary);

    let experiences: usize = doc
        .experiences
        .iter()
        .map(|exp| EXPERIENCE_WEIGHT + word_count(&exp.description))
        .sum();

    let education: usize = doc
        .education
        .iter()
        .map(|edu| EDUCATION_WEIGHT + word_count(&edu.description))
        .sum();

    let skills = doc.skills.len() * SKILL_WEIGHT;

    let certifications: usize = doc
        .certifications
        .iter()
        .map(|cert| CERTIFICATION_WEIGHT + word_count(&cert.description))
        .sum();

    let languages = doc.languages.len() * LANGUAGE_WEIGHT;
    let references = doc.references.len() * REFERENCE_WEIGHT;

    let projects: usize = doc
        .projects
        .iter()
        .map(|project| PROJECT_WEIGHT + word_count(&project.description))
        .sum();

    summary + experiences + education + skills + certifications + languages + references + projects
}

pub fn estimate_pages(doc: &CvDocument, config: &FitConfig) -> PageEstimate {
    let content_length = estimate_content_length(doc);
    PageEstimate {
        content_length,
        estimated_pages: pages_for(content_length, config),
    }
}

/// Pages needed for `content_length` weighted units (ceil division).
pub fn pages_for(content_length: usize, config: &FitConfig) -> u32 {
    let per_page = config.words_per_page.max(1);
    content_length.div_ceil(per_page) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{Certification, Education, Experience, Language, Project, Reference, Skill};

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_empty_document_has_zero_length() {
        let doc = CvDocument::default();
        assert_eq!(estimate_content_length(&doc), 0);
        assert_eq!(estimate_pages(&doc, &FitConfig::default()).estimated_pages, 0);
    }

    #[test]
    fn test_word_count_ignores_extra_whitespace() {
        assert_eq!(word_count("  built   the\nthing "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_section_weights() {
        let mut doc = CvDocument::default();
        doc.personal_info.summary = words(12);
        doc.experiences = vec![Experience {
            description: words(50),
            ..Default::default()
        }];
        doc.education = vec![Education {
            description: words(5),
            ..Default::default()
        }];
        doc.skills = vec![Skill::default(); 4];
        doc.certifications = vec![Certification::default()];
        doc.languages = vec![Language::default(); 2];
        doc.references = vec![Reference::default()];
        doc.projects = vec![Project {
            description: words(10),
            ..Default::default()
        }];

        // 12 + (50+50) + (30+5) + 20 + 20 + 20 + 30 + (40+10)
        assert_eq!(estimate_content_length(&doc), 287);
    }

    #[test]
    fn test_pages_round_up() {
        let config = FitConfig::default();
        assert_eq!(pages_for(1, &config), 1);
        assert_eq!(pages_for(300, &config), 1);
        assert_eq!(pages_for(301, &config), 2);
        assert_eq!(pages_for(700, &config), 3);
    }

    #[test]
    fn test_target_length_scales_with_pages() {
        let config = FitConfig { words_per_page: 250 };
        assert_eq!(config.target_length(1), 250);
        assert_eq!(config.target_length(3), 750);
    }

    #[test]
    fn test_target_length_saturates() {
        let config = FitConfig {
            words_per_page: usize::MAX,
        };
        assert_eq!(config.target_length(3), usize::MAX);
        assert_eq!(config.target_length(0), 0);
    }
}
