//! Users module - registration and credential lookup.

mod users_model;
mod users_service;
#[cfg(test)]
mod users_service_tests;
mod users_traits;

pub use users_model::{normalize_username, NewUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
