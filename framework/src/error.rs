use std::path::PathBuf;

use chrono::TimeDelta;
use thiserror::Error;
use twilight_model::application::interaction::InteractionType;

use crate::definition::InteractionKind;

/// Why an inbound interaction was not routed to completion.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler is registered under the interaction's key.
    #[error("not loaded: no {kind} handler for {key:?}")]
    NotLoaded { kind: InteractionKind, key: String },

    /// The handler exists but is gated for the invoking user. Nothing ran.
    #[error("{kind} {name:?} is in cool time for another {remaining:?}")]
    CoolTimeActive {
        kind: InteractionKind,
        name: String,
        remaining: TimeDelta,
    },

    /// The interaction is not one of the six shapes the registry routes.
    #[error("unsupported interaction type {0:?}")]
    Unsupported(InteractionType),

    /// The handler ran and returned an error.
    #[error("handler failed: {0}")]
    Handler(#[source] crate::Error),
}

/// Why a load pass failed. Any failing file aborts the whole pass.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read definition file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse definition file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not walk definition directory")]
    Walk(#[from] walkdir::Error),
}
