//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question about SMA
//! - [`question::ConversationId`]: identifier grouping turns of one conversation
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod question;
