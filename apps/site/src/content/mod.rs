// Admin-editable site content: sections, settings, the resume builder tree,
// navigation links and language options.
// Store functions take the pool explicitly; handlers.rs maps them onto HTTP.

pub mod handlers;
pub mod navigation;
pub mod ordering;
pub mod resume;
pub mod sections;
pub mod settings;
pub mod validation;
