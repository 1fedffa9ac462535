pub mod config;
pub mod console;
pub mod entities;
pub mod error;
pub mod form;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use error::{AppError, AppResult};
