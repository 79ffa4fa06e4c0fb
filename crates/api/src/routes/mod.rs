//! HTTP Routes

pub mod dashboard;
pub mod options;
pub mod predictions;
