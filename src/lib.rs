pub mod arguments;
pub mod config;
pub mod database;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod rates;
pub mod run;
pub mod webserver;
