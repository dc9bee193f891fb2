//! Named endpoints. Navigation links store these names; pages resolve them to paths.

pub const MAIN_HOME: &str = "main.home";
pub const PUBLIC_RESUME: &str = "public.resume";
pub const ADMIN_SECTIONS: &str = "admin.manage_sections";
pub const ADMIN_SETTINGS: &str = "admin.manage_settings";
pub const ADMIN_BUILDER: &str = "admin.resume_builder";
pub const ADMIN_NAVIGATION: &str = "admin.manage_navigation";
pub const ADMIN_LANGUAGES: &str = "admin.manage_languages";

const ENDPOINTS: &[(&str, &str)] = &[
    (MAIN_HOME, "/"),
    (PUBLIC_RESUME, "/resume"),
    (ADMIN_SECTIONS, "/admin/sections"),
    (ADMIN_SETTINGS, "/admin/settings"),
    (ADMIN_BUILDER, "/admin/builder"),
    (ADMIN_NAVIGATION, "/admin/navigation"),
    (ADMIN_LANGUAGES, "/admin/languages"),
];

pub fn endpoint_path(name: &str) -> Option<&'static str> {
    ENDPOINTS
        .iter()
        .find(|(endpoint, _)| *endpoint == name)
        .map(|(_, path)| *path)
}

pub fn endpoint_names() -> impl Iterator<Item = &'static str> {
    ENDPOINTS.iter().map(|(name, _)| *name)
}
