//! Admin domain

mod entity;

pub use entity::{Admin, AdminId, NewAdmin};
