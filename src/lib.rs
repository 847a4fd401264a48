pub mod config;
pub mod dashboard;
pub mod debts;
pub mod demo;
pub mod error;
pub mod export;
pub mod locale;
pub mod logging;
pub mod model;
pub mod ordered;
pub mod partition;
pub mod report;
pub mod store;
pub mod summary;
