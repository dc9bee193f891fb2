// Page payloads. Every page carries the template context (navigation, languages,
// active locale) so the renderer never has to reach back into the database.

pub mod context;
pub mod pages;

pub use context::{build_template_context, TemplateContext};
