//! Domain models shared by storage, search, and the HTTP layer.

pub mod book;
pub mod pagination;
pub mod review;
pub mod session;
pub mod user;

pub use book::{Book, BookAttributes, BookSummary, BookUpdate, NewBook};
pub use pagination::{Page, PageRequest};
pub use review::{RatingSummary, Review, ReviewDraft};
pub use session::SessionRecord;
pub use user::{Credentials, User};
