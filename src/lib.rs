// Library for tests to access modules

pub mod config;
pub mod controls;
pub mod models;
pub mod panel;
pub mod routes;
pub mod scheduler;
pub mod sysinfo_repo;
pub mod timer;
