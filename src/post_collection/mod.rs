//! Posts collection: entity rules, actions and errors.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::PostClient;
use crate::framework::CollectionActor;
use crate::model::Post;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new posts actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Post>, PostClient) {
    let post_id_counter = Arc::new(AtomicU64::new(1));
    let next_post_id = move || {
        let id = post_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("post_{}", id)
    };

    let (actor, generic_client) = CollectionActor::new(buffer_size, next_post_id);
    (actor, PostClient::new(generic_client))
}
