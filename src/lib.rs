//! arenda client SDK
//! ------------------
//! Async client for a cookie-session apartment-listing backend.
//!
//! The pieces, leaf-first:
//! - [`transport`]: the HTTP boundary. Error classification happens here, once.
//! - [`session`]: the authentication state machine; sole writer of session state.
//! - [`refresh`]: background token renewal with abort-on-drop cancellation.
//! - [`gate`]: pure render gating for protected views.
//! - [`pager`]: opaque-cursor window over the remote collection.
//! - [`filter`]: page-local, non-authoritative filtering.
//! - [`cli`]: the interactive terminal shell built on top of all of the above.

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod gate;
pub mod model;
pub mod pager;
pub mod refresh;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use filter::{FilterCriteria, ListFilter};
pub use gate::{GateDecision, evaluate};
pub use model::{Apartment, ApartmentDraft, Identity, ListQuery, Page, PageLocator};
pub use pager::ResourcePager;
pub use refresh::RefreshScheduler;
pub use session::{SessionStatus, SessionStore};
pub use transport::{HttpTransport, Transport};
