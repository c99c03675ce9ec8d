//! # Mock Clients
//!
//! Test doubles that speak the same channel protocol as a real [`ResourceActor`](crate::ResourceActor),
//! so any code holding a [`ResourceClient`] can be exercised without the real actor.
//!
//! | | `MockClient` | `create_mock_client` | Real actor |
//! |---|---|---|---|
//! | Answers | Scripted, in order | Hand-written in the test | Real state |
//! | Asserts | Ids + call order, checked by `verify()` | Whatever the test inspects | State afterwards |
//! | Best for | Injecting faults (e.g. a store that refuses writes) | Inspecting payloads | End-to-end flows |
//!
//! ## Scripted expectations
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Ticket { id: u32 }
//! #[derive(Debug)] struct TicketCreate;
//! #[derive(Debug, thiserror::Error)] #[error("ticket")] struct TicketError;
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = (); type Action = ();
//!     type ActionResult = (); type Context = (); type Error = TicketError;
//!     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, TicketError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TicketError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TicketError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Ticket>::new();
//!     mock.expect_get(7).return_ok(Some(Ticket { id: 7 }));
//!     mock.expect_create().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(7).await.unwrap(), Some(Ticket { id: 7 }));
//!     assert!(client.create(TicketCreate).await.unwrap_err().is_unavailable());
//!     mock.verify();
//! }
//! ```
//!
//! ## Channel-level inspection
//!
//! [`create_mock_client`] hands back the raw receiver; the `expect_*` free functions
//! pull the next request off it so the test can assert on the payload and answer
//! through the responder.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Create(Result<T, FrameworkError>),
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List(Result<Vec<T>, FrameworkError>),
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Create(_) => "Create",
            Expectation::Get { .. } => "Get",
            Expectation::List(_) => "List",
            Expectation::Update { .. } => "Update",
            Expectation::Delete { .. } => "Delete",
            Expectation::Action { .. } => "Action",
        }
    }
}

fn request_name<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "Create",
        ResourceRequest::Get { .. } => "Get",
        ResourceRequest::List { .. } => "List",
        ResourceRequest::Update { .. } => "Update",
        ResourceRequest::Delete { .. } => "Delete",
        ResourceRequest::Action { .. } => "Action",
    }
}

struct Script<T: ActorEntity> {
    pending: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type Shared<T> = Arc<Mutex<Script<T>>>;

fn lock<T: ActorEntity>(script: &Shared<T>) -> std::sync::MutexGuard<'_, Script<T>> {
    // A poisoned lock only means another test thread panicked; the script is still usable.
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn answer<T: ActorEntity, R>(
    script: &Shared<T>,
    respond_to: oneshot::Sender<Result<R, FrameworkError>>,
    expected_id: Option<String>,
    actual_id: Option<String>,
    response: Result<R, FrameworkError>,
) {
    if expected_id != actual_id {
        lock(script).failures.push(format!(
            "expected id {:?}, got {:?}",
            expected_id.unwrap_or_default(),
            actual_id.unwrap_or_default()
        ));
        // Recorded first, so verify() sees it once the caller observes ActorDropped.
        drop(respond_to);
        return;
    }
    let _ = respond_to.send(response);
}

/// A scripted stand-in for a resource actor.
///
/// Expectations are consumed strictly in the order they were registered. A request
/// that does not match the next expectation (wrong kind or wrong id) is answered
/// with a dropped responder and recorded; [`MockClient::verify`] panics with every
/// recorded mismatch and with any expectation left unconsumed.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    script: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with an empty script. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let script: Shared<T> = Arc::new(Mutex::new(Script {
            pending: VecDeque::new(),
            failures: Vec::new(),
        }));
        let background = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&background).pending.pop_front();
                match (request, next) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(response))) => {
                        answer(&background, respond_to, None, None, response)
                    }
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        answer(&background, respond_to, Some(want.to_string()), Some(id.to_string()), response)
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(response))) => {
                        answer(&background, respond_to, None, None, response)
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => answer(&background, respond_to, Some(want.to_string()), Some(id.to_string()), response),
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        answer(&background, respond_to, Some(want.to_string()), Some(id.to_string()), response)
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => answer(&background, respond_to, Some(want.to_string()), Some(id.to_string()), response),
                    (request, next) => {
                        let failure = match next {
                            Some(expectation) => format!(
                                "expected {} request, got {}",
                                expectation.name(),
                                request_name(&request)
                            ),
                            None => format!("unexpected {} request", request_name(&request)),
                        };
                        lock(&background).failures.push(failure);
                        drop(request);
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            script: self.script.clone(),
            make: Box::new(make),
            _response: PhantomData,
        }
    }

    /// Panics if any request mismatched or any expectation is still pending.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.failures.is_empty() {
            panic!("Mock received unexpected requests: {:?}", script.failures);
        }
        if !script.pending.is_empty() {
            let left: Vec<_> = script.pending.iter().map(Expectation::name).collect();
            panic!("Not all expectations were met. Remaining: {:?}", left);
        }
    }
}

/// Completes one registered expectation with the answer the mock will give.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    script: Shared<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    _response: PhantomData<fn() -> R>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Answer with a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        lock(&self.script).pending.push_back(expectation);
    }
}

/// Creates a client and the raw receiver behind it.
///
/// The test plays the actor: pull requests with the `expect_*` helpers below and
/// answer them through the returned responders.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Takes the next request if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Bin {
        id: u32,
        units: u32,
    }

    #[derive(Debug)]
    struct BinCreate {
        units: u32,
    }

    #[derive(Debug)]
    enum BinAction {
        Take(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("bin error")]
    struct BinError;

    #[async_trait]
    impl ActorEntity for Bin {
        type Id = u32;
        type Create = BinCreate;
        type Update = ();
        type Action = BinAction;
        type ActionResult = u32;
        type Context = ();
        type Error = BinError;

        fn from_create_params(id: u32, params: BinCreate) -> Result<Self, BinError> {
            Ok(Self {
                id,
                units: params.units,
            })
        }

        async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), BinError> {
            Ok(())
        }

        async fn handle_action(&mut self, action: BinAction, _ctx: &()) -> Result<u32, BinError> {
            match action {
                BinAction::Take(n) => Ok(self.units.saturating_sub(n)),
            }
        }
    }

    #[tokio::test]
    async fn test_channel_level_create() {
        let (client, mut receiver) = create_mock_client::<Bin>(10);

        let create_task = tokio::spawn(async move { client.create(BinCreate { units: 4 }).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.units, 4);
        responder.send(Ok(Bin { id: 1, units: 4 })).unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_scripted_expectations_in_order() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_create().return_ok(Bin { id: 1, units: 4 });
        mock.expect_action(1).return_ok(3);
        mock.expect_list().return_ok(vec![Bin { id: 1, units: 3 }]);

        let client = mock.client();
        assert_eq!(client.create(BinCreate { units: 4 }).await.unwrap().id, 1);
        assert_eq!(client.perform_action(1, BinAction::Take(1)).await.unwrap(), 3);
        assert_eq!(client.list().await.unwrap().len(), 1);

        mock.verify();
    }

    #[tokio::test]
    async fn test_injected_fault() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_update(2).return_err(FrameworkError::ActorClosed);

        let result = mock.client().update(2, ()).await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "expected id")]
    async fn test_wrong_id_is_reported() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_unconsumed_expectation_is_reported() {
        let mut mock = MockClient::<Bin>::new();
        mock.expect_delete(1).return_ok(());
        mock.verify();
    }
}
