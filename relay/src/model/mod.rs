pub mod opportunity;
pub mod person;
pub mod result;
pub mod source;
pub mod submission;
