//! Business logic services
//!
//! Services coordinate the pure calculator with external collaborators.

pub mod assessment;

pub use assessment::AssessmentService;
