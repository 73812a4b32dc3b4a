pub mod command;
pub mod host;
pub mod input;
pub mod matcher;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod view;
