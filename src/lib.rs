#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

mod app;
pub mod cli;
pub mod fees;
pub mod ledger;
pub mod primitives;
mod tracing;
pub mod wallet;
