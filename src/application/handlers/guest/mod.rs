//! Guest identity handlers.

mod sign_in_guest;

pub use sign_in_guest::SignInGuestHandler;
