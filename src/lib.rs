pub mod app;
pub mod domain;
pub mod integrations;
pub mod logging;
pub mod storage;
pub mod ui;
