pub mod catalog;
pub mod response;
pub mod service;
