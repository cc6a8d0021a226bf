use chrono::{DateTime, Utc};

#[derive(Clone, Debug)]
pub struct Services {
    pub started: DateTime<Utc>,
}
