pub mod resume;
pub mod section;
pub mod setting;
pub mod site;
