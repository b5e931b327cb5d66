//! Request and response data transfer objects

pub mod format;
pub mod people;
