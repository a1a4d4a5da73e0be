pub mod service;

pub use service::{DispatchOutcome, OutputDispatcher};
