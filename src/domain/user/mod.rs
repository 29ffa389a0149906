//! User domain

mod entity;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use validation::{validate_email, validate_first_name, UserValidationError};
