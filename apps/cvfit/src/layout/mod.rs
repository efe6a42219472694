// CV page-fit system: template registry, content length estimation and
// priority-ordered trimming to the template's page budget.
// CPU-bound fitting runs inside tokio::task::spawn_blocking when served over HTTP.

pub mod estimate;
pub mod handlers;
pub mod page_limit;
pub mod templates;

// Re-export the public API consumed by other modules (handlers, lib users).
pub use estimate::{estimate_content_length, estimate_pages, FitConfig, PageEstimate};
pub use page_limit::{
    apply_page_limit, is_content_over_limit, page_limit_warning, trim_content_to_fit,
    PageLimitWarning,
};
pub use templates::{is_harvard_template, max_pages_allowed, resolve_template_id, TemplateKind};
