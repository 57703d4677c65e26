//! # Mock Collections
//!
//! Utilities for testing collection clients without spawning a [`CollectionActor`].
//!
//! Two styles are available:
//!
//! - [`MockCollection`]: queue canned responses up front, hand out a client, then
//!   [`verify`](MockCollection::verify) that every expectation was consumed.
//! - [`create_mock_client`] plus the `expect_*` helpers: receive each raw request,
//!   inspect its payload and answer it by hand.
//!
//! [`CollectionActor`]: crate::framework::CollectionActor

use crate::framework::{
    CollectionClient, CollectionRequest, DocumentEntity, FindArgs, PaginatedDocs, StoreError,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: DocumentEntity> {
    Get(Result<Option<T>, StoreError>),
    Create(Result<T, StoreError>),
    Find(Result<PaginatedDocs<T>, StoreError>),
    Count(Result<u64, StoreError>),
    Update(Result<T, StoreError>),
    Delete(Result<T, StoreError>),
    Action(Result<(T::ActionResult, T), StoreError>),
}

impl<T: DocumentEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get",
            Expectation::Create(_) => "create",
            Expectation::Find(_) => "find",
            Expectation::Count(_) => "count",
            Expectation::Update(_) => "update",
            Expectation::Delete(_) => "delete",
            Expectation::Action(_) => "action",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock collection answering requests from a queue of expectations, in order.
///
/// # Example
/// ```ignore
/// let mock = MockCollection::<Post>::new();
/// mock.expect_get().return_ok(Some(post));
/// let client = PostClient::new(mock.client());
/// // exercise the client...
/// mock.verify();
/// ```
///
/// A request that does not match the next expectation is answered with
/// [`StoreError::ActorDropped`] and recorded; `verify` then panics with the mismatch.
pub struct MockCollection<T: DocumentEntity> {
    client: CollectionClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: DocumentEntity> MockCollection<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CollectionRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let seen = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (CollectionRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Find { respond_to, .. }, Some(Expectation::Find(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Count { respond_to, .. }, Some(Expectation::Count(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (CollectionRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (request, expected) => {
                        let expected = expected.map_or("nothing", |e| e.name());
                        seen.lock()
                            .unwrap()
                            .push(format!("got {request:?}, expected {expected}"));
                        // Dropping the request drops its responder: the caller sees ActorDropped.
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn expect_get(&self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, Expectation::Get)
    }

    pub fn expect_create(&self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Create)
    }

    pub fn expect_find(&self) -> ExpectationBuilder<'_, T, PaginatedDocs<T>> {
        ExpectationBuilder::new(self, Expectation::Find)
    }

    pub fn expect_count(&self) -> ExpectationBuilder<'_, T, u64> {
        ExpectationBuilder::new(self, Expectation::Count)
    }

    pub fn expect_update(&self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Update)
    }

    pub fn expect_delete(&self) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, Expectation::Delete)
    }

    pub fn expect_action(&self) -> ExpectationBuilder<'_, T, (T::ActionResult, T)> {
        ExpectationBuilder::new(self, Expectation::Action)
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {}", mismatches.join("; "));
        }
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl<T: DocumentEntity> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Completes an expectation with the response the mock should return.
pub struct ExpectationBuilder<'a, T: DocumentEntity, R> {
    mock: &'a MockCollection<T>,
    wrap: fn(Result<R, StoreError>) -> Expectation<T>,
}

impl<'a, T: DocumentEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(mock: &'a MockCollection<T>, wrap: fn(Result<R, StoreError>) -> Expectation<T>) -> Self {
        Self { mock, wrap }
    }

    pub fn return_ok(self, value: R) {
        self.mock.push((self.wrap)(Ok(value)));
    }

    pub fn return_err(self, error: StoreError) {
        self.mock.push((self.wrap)(Err(error)));
    }
}

// =============================================================================
// RAW REQUEST HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Use this when a test needs to assert on the request payload itself (the where
/// clause of a `find`, the action variant, ...) before answering.
pub fn create_mock_client<T: DocumentEntity>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

type Responder<R> = oneshot::Sender<Result<R, StoreError>>;

/// Next request, if it is a `Create`.
pub async fn expect_create<T: DocumentEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::CreateParams, Responder<T>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a `Find`.
pub async fn expect_find<T: DocumentEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(FindArgs, Responder<PaginatedDocs<T>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Find { args, respond_to }) => Some((args, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an `Update`.
pub async fn expect_update<T: DocumentEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, T::UpdateParams, Responder<T>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an `Action`.
pub async fn expect_action<T: DocumentEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<(T::ActionResult, T)>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
