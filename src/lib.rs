// Library for tests to access modules

pub mod cadvisor_repo;
pub mod collector;
pub mod config;
pub mod error;
pub mod job;
pub mod models;
pub mod report;
pub mod rollup;
pub mod scheduler;
pub mod selector;
pub mod version;
