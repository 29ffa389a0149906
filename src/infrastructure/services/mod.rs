//! Application services coordinating the credential store

mod admin;
mod issuance;
mod revocation;

pub use admin::AdminService;
pub use issuance::{IssuanceRequest, IssuanceService};
pub use revocation::{Revocation, RevocationService};
