//! Template registry: template ids, back-compat aliases and page budgets.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPLATE_ID: &str = "minimal-clean";

/// Templates held to a single page regardless of user preference.
pub const HARVARD_TEMPLATES: &[&str] = &[
    "harvard-classic",
    "harvard-elite",
    "harvard-modern",
    "academic-research",
    "research-scientist",
];

pub const STANDARD_TEMPLATES: &[&str] = &[
    "minimal-clean",
    "modern-professional",
    "professional-simple",
    "two-column-executive",
];

/// Old slugs still found in saved documents.
const TEMPLATE_ALIASES: &[(&str, &str)] = &[
    ("modern", "modern-professional"),
    ("professional", "professional-simple"),
    ("minimal", "minimal-clean"),
    ("basic-modern", "modern-professional"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Harvard,
    Standard,
}

/// One row of the registry listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: &'static str,
    pub kind: TemplateKind,
    pub max_pages: u32,
    pub max_pages_extended: u32,
}

pub fn is_harvard_template(template_id: &str) -> bool {
    HARVARD_TEMPLATES.contains(&template_id)
}

pub fn template_kind(template_id: &str) -> TemplateKind {
    if is_harvard_template(template_id) {
        TemplateKind::Harvard
    } else {
        TemplateKind::Standard
    }
}

/// Page budget for a template. Harvard templates ignore `allow_three_pages`.
pub fn max_pages_allowed(template_id: &str, allow_three_pages: bool) -> u32 {
    match template_kind(template_id) {
        TemplateKind::Harvard => 1,
        TemplateKind::Standard if allow_three_pages => 3,
        TemplateKind::Standard => 2,
    }
}

/// Maps a stored template id to a registered one. Unknown or missing ids fall
/// back to [`DEFAULT_TEMPLATE_ID`].
pub fn resolve_template_id(template_id: Option<&str>) -> &'static str {
    let Some(id) = template_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return DEFAULT_TEMPLATE_ID;
    };

    if let Some(known) = STANDARD_TEMPLATES
        .iter()
        .chain(HARVARD_TEMPLATES.iter())
        .copied()
        .find(|known| *known == id)
    {
        return known;
    }

    TEMPLATE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == id)
        .map(|(_, target)| *target)
        .unwrap_or(DEFAULT_TEMPLATE_ID)
}

/// Every registered template, standard first.
pub fn list_templates() -> Vec<TemplateInfo> {
    STANDARD_TEMPLATES
        .iter()
        .chain(HARVARD_TEMPLATES.iter())
        .copied()
        .map(|id| TemplateInfo {
            id,
            kind: template_kind(id),
            max_pages: max_pages_allowed(id, false),
            max_pages_extended: max_pages_allowed(id, true),
        })
        .collect()
}
