pub mod cli;
pub mod data_paths;
pub mod errors;
pub mod history;
pub mod logging;
pub mod portfolio;
