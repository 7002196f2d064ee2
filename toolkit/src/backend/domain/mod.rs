//! # Domain Module
//!
//! Contains the calculators and worksheet logic of the toolkit. Everything in
//! here is synchronous; the estimators and aggregators are pure functions of
//! their inputs and hold nothing but configuration.
//!
//! ## Module Organization
//!
//! - **child_support**: Ohio child support worksheet estimate
//! - **spousal_support**: spousal support amount and duration estimate
//! - **equitable_distribution**: checks a proposed asset division against an equal split
//! - **budget**: monthly budget totals and ratios
//! - **settlement**: asset and debt totals for the settlement overview
//! - **toolkit_service**: persisted worksheet state bound to the calculators
//! - **export_service**: text, CSV and JSON exports
//!
//! ## Business Rules
//!
//! - Every estimate is labeled as an estimate; none is authoritative
//! - Invalid calculator input is an error, advisory conditions are warnings
//! - Derived figures are never stored, only recomputed

pub mod budget;
pub mod child_support;
pub mod equitable_distribution;
pub mod errors;
pub mod export_service;
pub mod settlement;
pub mod spousal_support;
pub mod toolkit_service;

pub use budget::*;
pub use child_support::*;
pub use equitable_distribution::*;
pub use errors::*;
pub use export_service::*;
pub use settlement::*;
pub use spousal_support::*;
pub use toolkit_service::*;
