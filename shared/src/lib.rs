//! Platform-neutral core of the Times Roman front-end.
//!
//! Data model, backend contracts, the query cache, browser preference maps,
//! the auth state machine and the data orchestration behind every page.
//! Nothing here touches the DOM, so the whole crate is tested natively
//! against [`memory::MemoryBackend`] and [`preferences::MemoryStorage`].

pub mod article;
pub mod articles;
pub mod cache;
pub mod category;
pub mod engagement;
pub mod error;
pub mod forms;
pub mod latch;
pub mod memory;
pub mod meta;
pub mod preferences;
pub mod profile;
pub mod query;
pub mod remote;
pub mod session;

pub use article::{Article, ArticleRow};
pub use category::Category;
pub use error::BackendError;
pub use remote::{AuthClient, RemoteClient, TableClient};
pub use session::{AuthStatus, Session, User};
