//! Data models for the task tracking backend.
//!
//! Domain rows, request payloads and the response shapes handed to clients.

mod category;
mod task;
mod user;

pub use category::*;
pub use task::*;
pub use user::*;

/// Text format used for every stored and rendered timestamp (UTC).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ownership predicate shared by every user-scoped resource.
///
/// A resource without an owner is global: visible to everyone, owned by nobody.
pub trait Owned {
    fn owner_id(&self) -> Option<&str>;

    fn owned_by(&self, user_id: &str) -> bool {
        self.owner_id() == Some(user_id)
    }

    fn visible_to(&self, user_id: &str) -> bool {
        match self.owner_id() {
            None => true,
            Some(owner) => owner == user_id,
        }
    }
}

/// Length of a string in characters rather than bytes.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
