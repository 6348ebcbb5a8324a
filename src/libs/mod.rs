pub mod artifacts;
pub mod config;
pub mod error;
pub mod explore;
pub mod genes;
pub mod io;
pub mod logger;
pub mod loops;
pub mod query;
pub mod region;
pub mod render;
pub mod schema;
pub mod session;
pub mod signal;
pub mod store;
pub mod tracks;
