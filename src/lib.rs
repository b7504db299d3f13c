pub mod api_football;
pub mod config;
pub mod error;
pub mod expected_goals;
pub mod http_client;
pub mod market;
pub mod pipeline;
pub mod poisson;
pub mod recommend;
pub mod report;
pub mod strength;
pub mod telegram;
