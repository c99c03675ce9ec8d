//! # Product Client
//!
//! Typed access to the product actor: catalog edits, snapshots and the stock ledger.
use crate::model::{Product, ProductCreate, ProductId, ProductSnapshot, ProductUpdate, ReservationId, VariantKey};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, ReserveOutcome, SettleOutcome};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    /// Entity errors come back typed; anything else means the actor is unreachable.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<ProductError>() {
            Ok(domain) => domain,
            Err(other) => ProductError::Unavailable(other.to_string()),
        }
    }
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    fn map_for(id: ProductId) -> impl Fn(FrameworkError) -> ProductError {
        move |e| match e {
            FrameworkError::NotFound(_) => ProductError::NotFound(id),
            other => Self::map_error(other),
        }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_for(id))
    }

    /// The catalog view of a product, or `None` if it does not exist.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, id: ProductId) -> Result<Option<ProductSnapshot>, ProductError> {
        let product = self.inner.get(id).await.map_err(Self::map_error)?;
        Ok(product.map(|p| p.snapshot()))
    }

    /// Takes stock for one cart line. Shortfalls come back as a [`ReserveOutcome`].
    #[instrument(skip(self))]
    pub async fn reserve(
        &self,
        id: ProductId,
        variant: VariantKey,
        quantity: u32,
    ) -> Result<ReserveOutcome, ProductError> {
        debug!("Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::Reserve { variant, quantity })
            .await
            .map_err(Self::map_for(id))?
        {
            ProductActionResult::Reserve(outcome) => Ok(outcome),
            other => Err(unexpected("Reserve", other)),
        }
    }

    /// Gives a reservation's units back. Safe to repeat.
    #[instrument(skip(self))]
    pub async fn release(
        &self,
        id: ProductId,
        reservation: ReservationId,
    ) -> Result<SettleOutcome, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::Release(reservation))
            .await
            .map_err(Self::map_for(id))?
        {
            ProductActionResult::Release(outcome) => Ok(outcome),
            other => Err(unexpected("Release", other)),
        }
    }

    /// Settles a reservation for shipped goods. Safe to repeat.
    #[instrument(skip(self))]
    pub async fn commit(
        &self,
        id: ProductId,
        reservation: ReservationId,
    ) -> Result<SettleOutcome, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::Commit(reservation))
            .await
            .map_err(Self::map_for(id))?
        {
            ProductActionResult::Commit(outcome) => Ok(outcome),
            other => Err(unexpected("Commit", other)),
        }
    }

    /// Available units of one variant.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId, variant: VariantKey) -> Result<u32, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock(variant))
            .await
            .map_err(Self::map_for(id))?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected("CheckStock", other)),
        }
    }
}

fn unexpected(action: &str, reply: ProductActionResult) -> ProductError {
    ProductError::Unavailable(format!("unexpected reply to {action}: {reply:?}"))
}
