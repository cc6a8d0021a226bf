use serde::{Deserialize, Serialize};
use serde_envfile::Error;
use twilight_model::id::{marker::GuildMarker, Id};

#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    pub discord_token: String,
    pub interactions_path: String,

    /// Register commands into this guild instead of globally, handy while
    /// developing since guild commands update without the propagation delay.
    pub guild_id: Option<Id<GuildMarker>>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        serde_envfile::from_env()
    }
}
