//! CV normalization and page-fit engine, plus the HTTP preview service around it.
//!
//! Data flow: raw payload → [`normalize`] → canonical [`CvDocument`] → [`fit`] →
//! fitted document for rendering or export. Persist the normalized document,
//! never the fitted one, so it can be re-fitted for another template later.

pub mod config;
pub mod errors;
pub mod layout;
pub mod models;
pub mod normalize;
pub mod routes;
pub mod state;

pub use layout::{apply_page_limit, FitConfig};
pub use models::cv::CvDocument;
pub use normalize::normalize;

/// Fits `document` to `template_id` with the default words-per-page constant.
pub fn fit(document: &CvDocument, template_id: &str) -> CvDocument {
    apply_page_limit(document, template_id, &FitConfig::default())
}
