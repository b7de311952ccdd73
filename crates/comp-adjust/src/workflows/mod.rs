pub mod appraisal;
pub mod extraction;
