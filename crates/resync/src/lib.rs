//! Resync crate - controller for user-initiated app resyncs
//!
//! This crate holds the state-transition logic behind a "resync app" dialog:
//! - Input resolution (original URL vs. a user-entered override)
//! - The resync invoker and its three-way outcome classification
//! - A presentation snapshot for whatever UI hosts the dialog
//! - Seams for the remote operation, cache invalidation and notifications
//!
//! The crate has no UI dependencies. Hosts supply a [`ResyncClient`], a
//! [`CacheInvalidator`] and a [`Notifier`], then drive a
//! [`ResyncController`] from their event callbacks.

pub mod cache;
pub mod client;
pub mod config;
pub mod controller;
pub mod models;
pub mod notify;

pub use cache::{CacheInvalidator, CacheTag, InMemoryTagCache, NoopInvalidator};
pub use client::{ClientError, GraphqlResyncClient, ResyncClient};
pub use crate::config::ApiConfig;
pub use controller::{
    Attempt, ControllerDeps, OverrideInput, ResyncController, ResyncSignal, ResyncView,
};
pub use models::{
    AppExternalId, AppId, AppMethod, AppRef, AppSnapshot, CodedError, EnvironmentId,
    ResyncOutcome, ResyncRequest, ResyncResponse, SyncErrorCode,
};
pub use notify::{LogNotifier, Notification, NotificationKind, Notifier, RecordingNotifier};
