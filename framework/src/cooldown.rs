use chrono::{DateTime, TimeDelta, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use twilight_model::id::{marker::UserMarker, Id};

/// Per-user re-invocation gate for command-like handlers.
///
/// A user with no recorded invocation is never gated. Checking is the
/// dispatcher's job and happens before the handler runs; running stamps the
/// user regardless of how the handler exits.
#[derive(Debug)]
pub struct Cooldown {
    cool_time: TimeDelta,
    last_invocation: DashMap<Id<UserMarker>, DateTime<Utc>>,
}

impl Cooldown {
    pub fn from_millis(millis: u64) -> Self {
        Self {
            cool_time: TimeDelta::milliseconds(i64::try_from(millis).unwrap_or(i64::MAX)),
            last_invocation: DashMap::new(),
        }
    }

    pub fn cool_time(&self) -> TimeDelta {
        self.cool_time
    }

    pub fn last_invocation(&self, user: Id<UserMarker>) -> Option<DateTime<Utc>> {
        self.last_invocation.get(&user).map(|entry| *entry)
    }

    /// Time since the user last ran the handler. A user who never ran it
    /// counts as having run it at the Unix epoch.
    pub fn elapsed(&self, user: Id<UserMarker>) -> TimeDelta {
        Utc::now() - self.last_invocation(user).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Whether the user is inside their window. Expired entries are dropped
    /// on the way, the map only ever holds gated users.
    pub fn is_in_cool_time(&self, user: Id<UserMarker>) -> bool {
        let cool_time = self.cool_time;
        self.last_invocation
            .remove_if(&user, |_, last| Utc::now() - *last >= cool_time);
        self.last_invocation.contains_key(&user)
    }

    /// Time left until the user may run the handler again, while gated.
    pub fn remaining(&self, user: Id<UserMarker>) -> Option<TimeDelta> {
        let left = self.cool_time - (Utc::now() - self.last_invocation(user)?);
        (left > TimeDelta::zero()).then_some(left)
    }

    /// Forget the user's last invocation, lifting any active gate.
    pub fn reset(&self, user: Id<UserMarker>) {
        self.last_invocation.remove(&user);
    }

    /// Record an invocation at the current instant.
    pub fn stamp(&self, user: Id<UserMarker>) {
        self.last_invocation.insert(user, Utc::now());
    }

    /// Gate and stamp in one step, under the entry lock, so two
    /// near-simultaneous dispatches for the same user cannot both pass.
    /// Returns the remaining wait while gated.
    pub fn claim(&self, user: Id<UserMarker>) -> Result<(), TimeDelta> {
        match self.last_invocation.entry(user) {
            Entry::Occupied(mut entry) => {
                let since = Utc::now() - *entry.get();
                if since < self.cool_time {
                    Err(self.cool_time - since)
                } else {
                    entry.insert(Utc::now());
                    Ok(())
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(Utc::now());
                Ok(())
            }
        }
    }
}
