pub mod editor;
pub mod handlers;
pub mod section;
pub mod sessions;
