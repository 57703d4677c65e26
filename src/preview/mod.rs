//! Draft-mode preview: a signed token in the `payload-token` cookie unlocks
//! rendering of unpublished documents.

mod draft;
pub mod routes;
pub mod token;

pub use draft::DraftMode;
pub use routes::routes;
pub use token::{Claims, PreviewAuth, TokenError};
