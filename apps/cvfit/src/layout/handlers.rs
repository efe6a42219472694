//! Axum route handlers for the CV page-fit API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::layout::estimate::{estimate_pages, FitConfig, PageEstimate};
use crate::layout::page_limit::{
    apply_page_limit, is_content_over_limit, max_pages_label, page_limit_warning,
    PageLimitWarning,
};
use crate::layout::templates::{
    is_harvard_template, list_templates, max_pages_allowed, TemplateInfo, DEFAULT_TEMPLATE_ID,
};
use crate::models::cv::CvDocument;
use crate::normalize::normalize;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitRequest {
    /// Raw CV payload in any supported shape.
    pub document: Value,
    /// Template to fit against. Defaults to the document's own template.
    #[serde(default)]
    pub template_id: Option<String>,
    /// Overrides the document's own three-page preference.
    #[serde(default)]
    pub allow_three_pages: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningBody {
    pub code: PageLimitWarning,
    pub message: &'static str,
}

impl From<PageLimitWarning> for WarningBody {
    fn from(warning: PageLimitWarning) -> Self {
        WarningBody {
            code: warning,
            message: warning.message(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResponse {
    pub document: CvDocument,
    pub template_id: String,
    pub original_estimate: PageEstimate,
    pub estimate: PageEstimate,
    pub max_pages_label: &'static str,
    pub trimmed_summary: Option<String>,
    pub warning: Option<WarningBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLimitResponse {
    pub template_id: String,
    pub max_pages_allowed: u32,
    pub is_harvard_template: bool,
    pub over_limit: bool,
    pub estimate: PageEstimate,
    pub max_pages_label: &'static str,
    pub warning: Option<WarningBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesResponse {
    pub default_template_id: &'static str,
    pub templates: Vec<TemplateInfo>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        default_template_id: DEFAULT_TEMPLATE_ID,
        templates: list_templates(),
    })
}

/// POST /api/v1/cv/normalize
///
/// Accepts any stored or uploaded CV shape and returns the canonical document.
pub async fn handle_normalize(Json(raw): Json<Value>) -> Json<CvDocument> {
    Json(normalize(&raw))
}

/// POST /api/v1/cv/fit
///
/// Normalizes the payload and fits it to the template's page budget. Used for
/// preview and export only; the stored document stays untrimmed.
pub async fn handle_fit(
    State(state): State<AppState>,
    Json(request): Json<FitRequest>,
) -> Result<Json<FitResponse>, AppError> {
    let requested_template = validated_template(request.template_id.as_deref())?;
    let fit_config = state.fit_config;

    // CPU-bound fit; spawn_blocking to avoid blocking the async executor.
    let response = tokio::task::spawn_blocking(move || {
        let (document, template_id) =
            prepare(&request.document, requested_template, request.allow_three_pages);
        fit_document(document, template_id, &fit_config)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in page fit: {e}")))?;

    Ok(Json(response))
}

/// POST /api/v1/cv/page-limit
///
/// Reports the page budget and advisory for a document without trimming it.
pub async fn handle_page_limit(
    State(state): State<AppState>,
    Json(request): Json<FitRequest>,
) -> Result<Json<PageLimitResponse>, AppError> {
    let requested_template = validated_template(request.template_id.as_deref())?;
    let (document, template_id) =
        prepare(&request.document, requested_template, request.allow_three_pages);
    let config = &state.fit_config;
    let allow_three_pages = document.settings.allow_three_pages;

    Ok(Json(PageLimitResponse {
        max_pages_allowed: max_pages_allowed(&template_id, allow_three_pages),
        is_harvard_template: is_harvard_template(&template_id),
        over_limit: is_content_over_limit(&document, &template_id, config),
        estimate: estimate_pages(&document, config),
        max_pages_label: max_pages_label(&template_id, allow_three_pages),
        warning: page_limit_warning(&document, &template_id, config).map(WarningBody::from),
        template_id,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// An explicitly supplied template id must not be blank.
fn validated_template(template_id: Option<&str>) -> Result<Option<String>, AppError> {
    match template_id.map(str::trim) {
        Some("") => Err(AppError::Validation(
            "templateId cannot be empty".to_string(),
        )),
        Some(id) => Ok(Some(id.to_string())),
        None => Ok(None),
    }
}

fn prepare(
    raw: &Value,
    template_id: Option<String>,
    allow_three_pages: Option<bool>,
) -> (CvDocument, String) {
    let mut document = normalize(raw);
    if let Some(allow) = allow_three_pages {
        document.settings.allow_three_pages = allow;
    }
    let template_id = template_id.unwrap_or_else(|| document.template_id.clone());
    (document, template_id)
}

fn fit_document(document: CvDocument, template_id: String, config: &FitConfig) -> FitResponse {
    let original_estimate = estimate_pages(&document, config);
    let fitted = apply_page_limit(&document, &template_id, config);

    FitResponse {
        original_estimate,
        estimate: estimate_pages(&fitted, config),
        max_pages_label: max_pages_label(&template_id, fitted.settings.allow_three_pages),
        trimmed_summary: fitted.settings.trimmed_items.summary(),
        warning: page_limit_warning(&document, &template_id, config).map(WarningBody::from),
        template_id,
        document: fitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_template_rejected() {
        assert!(matches!(
            validated_template(Some("  ")),
            Err(AppError::Validation(_))
        ));
        assert_eq!(validated_template(None).unwrap(), None);
        assert_eq!(
            validated_template(Some(" harvard-classic ")).unwrap().as_deref(),
            Some("harvard-classic")
        );
    }

    #[test]
    fn test_prepare_defaults_to_document_template() {
        let raw = json!({ "templateId": "harvard-elite", "personalInfo": {} });
        let (document, template_id) = prepare(&raw, None, Some(true));
        assert_eq!(template_id, "harvard-elite");
        assert!(document.settings.allow_three_pages);
    }

    #[test]
    fn test_fit_document_reports_trim_summary() {
        let experiences: Vec<Value> = (0..7)
            .map(|i| json!({ "company": format!("C{i}"), "description": vec!["w"; 50].join(" ") }))
            .collect();
        let (document, template_id) = prepare(
            &json!({ "experiences": experiences }),
            Some("modern-professional".to_string()),
            None,
        );
        let response = fit_document(document, template_id, &FitConfig::default());

        assert_eq!(response.document.experiences.len(), 5);
        assert_eq!(response.trimmed_summary.as_deref(), Some("2 experiences"));
        assert_eq!(response.original_estimate.estimated_pages, 3);
        assert_eq!(response.estimate.estimated_pages, 2);
        assert_eq!(response.warning.map(|w| w.code), Some(PageLimitWarning::OverTwoPages));
    }
}
