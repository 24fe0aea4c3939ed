//! Core data types for the Vociform voice form service.
//!
//! This crate provides the foundation data types shared across the
//! Vociform workspace: forms and their fields, submitted responses,
//! usage accounts/events for metering, and billing-period arithmetic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod form;
mod period;
mod plan;
mod response;
mod usage;

pub use form::{FieldKind, Form, FormField, NewForm};
pub use period::{advance_period, initial_period_end};
pub use plan::PlanTier;
pub use response::{FormResponse, NewResponse};
pub use usage::{NewUsageEvent, UsageAccount, UsageEvent};
