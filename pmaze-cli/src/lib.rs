pub mod commands;
pub mod constants;
pub mod logging;
pub mod settings;
