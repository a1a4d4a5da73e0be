pub mod service;

pub use service::{BatchFailure, BatchReport, BatchRunner};
