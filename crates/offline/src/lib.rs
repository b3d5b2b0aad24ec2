//! Client-side offline cache worker model.
//!
//! Models the browser service worker that fronts the Vakans web client as
//! an explicit state machine instead of scattered event callbacks, so the
//! cache-generation invalidation behaviour is independently testable:
//!
//! ```text
//! Installing --install()--> ActiveStale --activate()--> ActiveCurrent
//!                                                            |
//!                                      terminate() ----> Terminated
//! ```
//!
//! - [`CacheWorker`] — network-first fetch interception with
//!   cache-fallback-on-failure and a synthesized offline placeholder.
//! - [`CacheStore`] — generation-keyed response cache; a single generation
//!   is retained after activation.
//! - [`push`] — push-payload parsing and click-target resolution.
//! - [`sync`] — explicitly unimplemented offline form-submission seam.

pub mod fetch;
pub mod push;
pub mod store;
pub mod sync;
pub mod worker;

pub use fetch::{Fetch, FetchError, FetchRequest, FetchResponse};
pub use store::CacheStore;
pub use worker::{CacheWorker, WorkerError, WorkerState, CACHE_GENERATION};
