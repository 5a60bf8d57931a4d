pub mod badge;
pub mod cli;
pub mod error;
pub mod github;
pub mod models;
pub mod resolver;
pub mod retry;
pub mod server;
pub mod timeout;
pub mod types;
