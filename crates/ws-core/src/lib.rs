//! # ws-core
//!
//! Core types and the member-matching policy for wsreg.
//!
//! This crate has no I/O. It provides:
//! - Identity normalization (case folding, diacritic stripping, phone digits)
//! - The member matcher that decides the price tier of a registrant
//! - Roster and submission types shared with the spreadsheet adapter
//! - Registration form, sheet row, and member status types
//! - Cross-cutting error types

pub mod errors;
pub mod matcher;
pub mod member;
pub mod normalize;
pub mod registration;

pub use errors::CoreError;
pub use matcher::{MatchResult, MatchRule, match_by_email_only, match_member};
pub use member::{RosterEntry, Submission, SubmissionName};
pub use registration::{InvoiceType, MemberStatus, PriceTier, RegistrationForm, RegistrationRow};
