//! Types and rules shared by the contact form client and the submission server.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod validation;
