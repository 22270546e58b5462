//! Contact message statuses.
//!
//! A message starts `unread`, becomes `read` when its receiver first opens
//! it and `replied` once either participant answers. Only the receiver may
//! set a status directly.

/// Message not yet opened by its receiver.
pub const CONTACT_UNREAD: &str = "unread";

/// Message opened by its receiver.
pub const CONTACT_READ: &str = "read";

/// Message with at least one reply.
pub const CONTACT_REPLIED: &str = "replied";

/// Message filed away by its receiver.
pub const CONTACT_ARCHIVED: &str = "archived";

/// All valid contact status values.
pub const VALID_CONTACT_STATUSES: &[&str] =
    &[CONTACT_UNREAD, CONTACT_READ, CONTACT_REPLIED, CONTACT_ARCHIVED];

/// Validate that a status string is one of the accepted values.
pub fn validate_contact_status(status: &str) -> Result<(), String> {
    if VALID_CONTACT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid contact status '{status}'. Must be one of: {}",
            VALID_CONTACT_STATUSES.join(", ")
        ))
    }
}

/// Whether opening a message should flip it to `read`.
pub fn marks_read_on_view(viewer_is_receiver: bool, status: &str) -> bool {
    viewer_is_receiver && status == CONTACT_UNREAD
}
