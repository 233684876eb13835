//! Scripts for deploying and administering the credit station contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod chain;
pub mod cli;
mod commands;
pub mod constants;
pub mod deployer;
pub mod errors;
pub mod ownership;
pub mod recorder;
pub mod roles;
pub mod sequencer;
pub mod types;
pub mod utils;
