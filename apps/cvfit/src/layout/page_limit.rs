//! Page-fit engine: trims lower-priority CV content until the estimated length
//! fits the template's page budget.
//!
//! # Trimming policy (over budget only, in priority order)
//! 1. Experiences: on a 2-page budget keep the 5 most recent; otherwise, while
//!    over target, keep max(4, 80%).
//! 2. Education: while over target, keep max(1, 80%).
//! 3. Certifications: while over target, keep max(2, 80%).
//! 4. References: while over target, keep max(2, 80%).
//!
//! Sections are ordered most relevant first, so trimming always cuts the tail.
//! Skills, languages and projects are never trimmed. Fitting is best-effort: a
//! document may still be over budget afterwards, which raises the warning flag.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::estimate::{estimate_content_length, estimate_pages, pages_for, FitConfig};
use crate::layout::templates::{is_harvard_template, max_pages_allowed};
use crate::models::cv::{CvDocument, CvSettings, TrimmedItems};

const TWO_PAGE_BUDGET: u32 = 2;
const TWO_PAGE_EXPERIENCE_CAP: usize = 5;

const MIN_EXPERIENCES: usize = 4;
const MIN_EDUCATION: usize = 1;
const MIN_CERTIFICATIONS: usize = 2;
const MIN_REFERENCES: usize = 2;

// ────────────────────────────────────────────────────────────────────────────
// Warnings
// ────────────────────────────────────────────────────────────────────────────

/// Advisory shown next to the page-limit settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLimitWarning {
    /// Harvard templates are always held to one page.
    HarvardOnePage,
    /// Over the default 2-page budget with 3 pages still disabled.
    OverTwoPages,
    /// Over budget even with 3 pages enabled.
    OverThreePages,
}

impl PageLimitWarning {
    pub fn message(&self) -> &'static str {
        match self {
            PageLimitWarning::HarvardOnePage => {
                "Harvard templates are limited to 1 page for academic standards."
            }
            PageLimitWarning::OverTwoPages => {
                "Your CV exceeds the 2-page limit. Consider enabling 3 pages or trimming content for better recruiter engagement."
            }
            PageLimitWarning::OverThreePages => {
                "Your CV exceeds the 3-page limit. Longer CVs may reduce your chances with recruiters."
            }
        }
    }
}

impl fmt::Display for PageLimitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Fits `doc` to the page budget of `template_id`.
///
/// Returns a new document whose `settings` describe this fit only: budget,
/// Harvard flag, per-section trim counts and the warning flag. Within budget
/// the content is returned untouched with all trim counts at zero.
pub fn apply_page_limit(doc: &CvDocument, template_id: &str, config: &FitConfig) -> CvDocument {
    let mut settings = CvSettings::for_template(template_id, doc.settings.allow_three_pages);
    let max_pages = settings.max_pages_allowed;
    let estimate = estimate_pages(doc, config);

    debug!(
        template_id,
        content_length = estimate.content_length,
        estimated_pages = estimate.estimated_pages,
        max_pages,
        experiences = doc.experiences.len(),
        education = doc.education.len(),
        "estimated CV length"
    );

    if estimate.estimated_pages <= max_pages {
        return CvDocument {
            settings,
            ..doc.clone()
        };
    }

    let (mut fitted, trimmed) = trim_content_to_fit(doc, max_pages, config);
    let remaining_pages = pages_for(estimate_content_length(&fitted), config);

    debug!(
        template_id,
        trimmed_experiences = trimmed.experiences,
        trimmed_education = trimmed.education,
        trimmed_certifications = trimmed.certifications,
        trimmed_references = trimmed.references,
        remaining_pages,
        "trimmed CV to page limit"
    );

    settings.trimmed_items = trimmed;
    settings.show_page_limit_warning = trimmed.any() || remaining_pages > max_pages;
    fitted.settings = settings;
    fitted
}

/// Applies the trimming policy against a `max_pages` budget.
///
/// Each section is evaluated once, in priority order, against the length left
/// by the sections before it. Returns the trimmed copy and the removed counts.
pub fn trim_content_to_fit(
    doc: &CvDocument,
    max_pages: u32,
    config: &FitConfig,
) -> (CvDocument, TrimmedItems) {
    let target = config.target_length(max_pages);
    let over_target = |doc: &CvDocument| estimate_content_length(doc) > target;

    let mut fitted = doc.clone();
    let mut trimmed = TrimmedItems::default();

    if max_pages == TWO_PAGE_BUDGET && fitted.experiences.len() > TWO_PAGE_EXPERIENCE_CAP {
        trimmed.experiences = truncate_tail(&mut fitted.experiences, TWO_PAGE_EXPERIENCE_CAP);
    } else if over_target(&fitted) {
        trimmed.experiences = trim_section(&mut fitted.experiences, MIN_EXPERIENCES);
    }

    if over_target(&fitted) {
        trimmed.education = trim_section(&mut fitted.education, MIN_EDUCATION);
    }

    if over_target(&fitted) {
        trimmed.certifications = trim_section(&mut fitted.certifications, MIN_CERTIFICATIONS);
    }

    if over_target(&fitted) {
        trimmed.references = trim_section(&mut fitted.references, MIN_REFERENCES);
    }

    (fitted, trimmed)
}

/// True when `doc` is estimated to exceed the budget of `template_id`.
pub fn is_content_over_limit(doc: &CvDocument, template_id: &str, config: &FitConfig) -> bool {
    let max_pages = max_pages_allowed(template_id, doc.settings.allow_three_pages);
    estimate_pages(doc, config).estimated_pages > max_pages
}

/// Advisory for the page-limit settings panel, if any applies.
pub fn page_limit_warning(
    doc: &CvDocument,
    template_id: &str,
    config: &FitConfig,
) -> Option<PageLimitWarning> {
    if is_harvard_template(template_id) {
        return Some(PageLimitWarning::HarvardOnePage);
    }

    if !is_content_over_limit(doc, template_id, config) {
        return None;
    }

    if doc.settings.allow_three_pages {
        Some(PageLimitWarning::OverThreePages)
    } else {
        Some(PageLimitWarning::OverTwoPages)
    }
}

/// Budget label for the settings badge.
pub fn max_pages_label(template_id: &str, allow_three_pages: bool) -> &'static str {
    if is_harvard_template(template_id) {
        "1 page (Harvard standard)"
    } else if allow_three_pages {
        "3 pages"
    } else {
        "2 pages"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

/// Keeps max(`floor`, 80% rounded down) entries. Sections at or below the floor
/// are left alone.
fn trim_section<T>(entries: &mut Vec<T>, floor: usize) -> usize {
    if entries.len() <= floor {
        return 0;
    }
    let keep = floor.max(entries.len() * 4 / 5);
    truncate_tail(entries, keep)
}

fn truncate_tail<T>(entries: &mut Vec<T>, keep: usize) -> usize {
    let removed = entries.len().saturating_sub(keep);
    entries.truncate(keep);
    removed
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
