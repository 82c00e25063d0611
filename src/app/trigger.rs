//! Search trigger: a logical clock for "search requested".
//!
//! Typing never fetches. Only an advance of this counter does, and the
//! counter carries no payload: the query is read fresh when the advance is
//! observed.

/// Strictly increasing counter of search intents, starting at 0.
///
/// Value 0 stands for the initial mount. Each explicit submit adds exactly
/// one; repeated submits are never merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTrigger(u64);

impl SearchTrigger {
    /// The trigger value observed at mount.
    pub const MOUNT: Self = Self(0);

    /// Advances the counter by one and returns the new value.
    pub fn request_search(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    #[must_use]
    pub const fn current(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_mount_value() {
        assert_eq!(SearchTrigger::default(), SearchTrigger::MOUNT);
        assert_eq!(SearchTrigger::default().current(), 0);
    }

    #[test]
    fn every_request_advances_by_one() {
        let mut trigger = SearchTrigger::default();
        assert_eq!(trigger.request_search(), 1);
        assert_eq!(trigger.request_search(), 2);
        assert_eq!(trigger.request_search(), 3);
        assert_eq!(trigger.current(), 3);
    }
}
