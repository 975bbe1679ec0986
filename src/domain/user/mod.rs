//! User domain
//!
//! Domain types for the user entity: the entity itself, field validation
//! rules, and the repository trait storage backends implement.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::{UserFilter, UserRepository};
pub use validation::{
    validate_email, validate_new_user, validate_password, validate_user_update,
    validate_username, UserFieldError, ValidationErrors,
};
