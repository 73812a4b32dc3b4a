pub mod manifest_source;
pub mod menu_source;
pub mod scene;
