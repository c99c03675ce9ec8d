//! # Order Client
//!
//! The storefront's order operations: placing orders, reading them under the
//! ownership rule, and advancing their status.
//!
//! Reads and transitions check the caller before the order store is consulted, so
//! a customer learns nothing about orders that are not theirs.
use crate::admission::{AdmissionError, AdmissionPipeline};
use crate::clients::ProductClient;
use crate::config::PaymentSettings;
use crate::model::{Caller, Order, OrderId, OrderStatus, PaymentStatus, PlaceOrder};
use crate::order_actor::{OrderAction, OrderError};
use crate::pricing::Pricing;
use actor_framework::{FrameworkError, ResourceClient};
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    admission: AdmissionPipeline,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        products: ProductClient,
        payment: watch::Receiver<PaymentSettings>,
        pricing: Pricing,
    ) -> Self {
        let admission = AdmissionPipeline::new(products, inner.clone(), payment, pricing);
        Self { inner, admission }
    }

    fn map_error(e: FrameworkError) -> OrderError {
        match e.into_entity_error::<OrderError>() {
            Ok(domain) => domain,
            Err(other) => OrderError::StorageUnavailable(other.to_string()),
        }
    }

    fn map_for(id: OrderId) -> impl Fn(FrameworkError) -> OrderError {
        move |e| match e {
            FrameworkError::NotFound(_) => OrderError::NotFound(id),
            other => Self::map_error(other),
        }
    }

    /// Reserves stock for every line and persists the order, or fails with nothing held.
    pub async fn place_order(&self, request: PlaceOrder) -> Result<Order, AdmissionError> {
        self.admission.admit(request).await
    }

    /// Owners and admins may read an order. Anyone else gets `AccessDenied`, including
    /// for ids that do not exist.
    #[instrument(skip(self, caller), fields(caller = %caller.id))]
    pub async fn get_order(&self, id: OrderId, caller: &Caller) -> Result<Order, OrderError> {
        debug!("Sending request");
        match self.inner.get(id).await.map_err(Self::map_error)? {
            Some(order) if caller.can_read(&order.user_id) => Ok(order),
            Some(_) => Err(OrderError::AccessDenied),
            None if caller.is_admin() => Err(OrderError::NotFound(id)),
            None => Err(OrderError::AccessDenied),
        }
    }

    /// A customer's own orders, or every order for an admin, oldest first.
    #[instrument(skip(self, caller), fields(caller = %caller.id))]
    pub async fn list_orders(&self, caller: &Caller) -> Result<Vec<Order>, OrderError> {
        let orders = self.inner.list().await.map_err(Self::map_error)?;
        Ok(orders
            .into_iter()
            .filter(|order| caller.can_read(&order.user_id))
            .collect())
    }

    #[instrument(skip(self, caller), fields(caller = %caller.id))]
    pub async fn advance_order_status(
        &self,
        id: OrderId,
        target: OrderStatus,
        caller: &Caller,
        tracking_number: Option<String>,
    ) -> Result<Order, OrderError> {
        if !caller.is_admin() {
            return Err(OrderError::AccessDenied);
        }
        let action = OrderAction::AdvanceOrderStatus {
            target,
            actor: caller.clone(),
            tracking_number,
        };
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_for(id))
    }

    #[instrument(skip(self, caller), fields(caller = %caller.id))]
    pub async fn advance_payment_status(
        &self,
        id: OrderId,
        target: PaymentStatus,
        caller: &Caller,
    ) -> Result<Order, OrderError> {
        if !caller.is_admin() {
            return Err(OrderError::AccessDenied);
        }
        let action = OrderAction::AdvancePaymentStatus {
            target,
            actor: caller.clone(),
        };
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_for(id))
    }
}
