#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod loader;
pub mod picker;
pub mod quiz_controller;

pub use quiz_core::Clock;

pub use app_services::{AppServices, QuizOptions};
pub use error::{LoadError, QuizServiceError};
pub use loader::DatasetLoader;
pub use picker::RngPicker;
pub use quiz_controller::QuizController;
