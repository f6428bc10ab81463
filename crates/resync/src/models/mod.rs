//! Value types exchanged between the controller and its collaborators

mod app;
mod error;
mod request;

pub use app::{AppExternalId, AppId, AppMethod, AppSnapshot, EnvironmentId};
pub use error::{CodedError, SyncErrorCode};
pub use request::{AppRef, ResyncOutcome, ResyncRequest, ResyncResponse};
