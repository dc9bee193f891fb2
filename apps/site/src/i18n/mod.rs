// Per-request locale selection.
// Translation catalogs are rendered elsewhere; this module only decides which code is active.

pub mod middleware;
pub mod resolver;

pub use middleware::{attach_locale, LANG_COOKIE};
pub use resolver::{AcceptLanguageResolver, Locale, LocaleHints, LocaleResolver};
