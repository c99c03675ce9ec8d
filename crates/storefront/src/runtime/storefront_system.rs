use crate::clients::{OrderClient, ProductClient};
use crate::config::{PaymentSettings, StorefrontConfig};
use crate::pricing::Pricing;
use crate::{order_actor, product_actor};
use tokio::sync::watch;
use tracing::{error, info};

/// A running storefront: the product and order actors plus their clients.
///
/// # Example
///
/// ```rust
/// use storefront::config::StorefrontConfig;
/// use storefront::runtime::StorefrontSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = StorefrontSystem::new(&StorefrontConfig::default());
///     // ... use system.product_client and system.order_client ...
///     system.shutdown().await
/// }
/// ```
pub struct StorefrontSystem {
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    payment_settings: watch::Sender<PaymentSettings>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Spawns both actors. Must be called inside a Tokio runtime.
    pub fn new(config: &StorefrontConfig) -> Self {
        let buffer_size = config.actors.buffer_size;
        let pricing = Pricing::new(config.pricing.minor_units);

        let (product_actor, product_resource_client) = product_actor::new(buffer_size);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run(pricing));

        let (order_actor, order_resource_client) = order_actor::new(buffer_size);
        let order_handle = tokio::spawn(order_actor.run(product_client.clone()));

        let (payment_settings, payment_rx) = watch::channel(config.payment);
        let order_client = OrderClient::new(
            order_resource_client,
            product_client.clone(),
            payment_rx,
            pricing,
        );

        info!(buffer_size, minor_units = config.pricing.minor_units, "Storefront started");
        Self {
            product_client,
            order_client,
            payment_settings,
            handles: vec![order_handle, product_handle],
        }
    }

    /// Publishes new payment settings; admissions that start afterwards see them.
    pub fn set_payment_settings(&self, settings: PaymentSettings) {
        info!(?settings, "Payment settings updated");
        self.payment_settings.send_replace(settings);
    }

    /// Drops the clients and waits for both actors to drain their queues and stop.
    ///
    /// Clients cloned elsewhere keep their actor alive, so drop those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront");
        drop(self.order_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }
        info!("Storefront shutdown complete");
        Ok(())
    }
}
