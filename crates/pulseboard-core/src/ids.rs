use std::sync::atomic::{AtomicU64, Ordering};

static SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Allocate the next notification id.
///
/// Strictly increasing for the life of the process. Wall-clock ids
/// collide when several toasts fire in the same millisecond (track and
/// game changes often arrive in one frame), so a plain counter it is.
pub fn next_notification_id() -> u64 {
    SEQUENCE.fetch_add(1, Ordering::Relaxed)
}
