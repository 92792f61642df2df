pub mod config;
pub mod courses;
pub mod form;
pub mod gpa;
