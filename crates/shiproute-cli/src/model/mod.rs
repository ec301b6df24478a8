pub mod route_report;
pub mod run_config;
