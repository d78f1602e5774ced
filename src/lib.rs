//! InvestWise onboarding — client-side orchestration of the investment
//! onboarding wizard.

pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod profile;
pub mod render;
pub mod wizard;
