//! Cart service wiring the reducer to its sinks.

use cart_store::{CartSnapshot, CartStore};
use common::SessionId;
use serde_json::json;
use tracing::{debug, warn};

use crate::cart::{CART_NOTICE, CART_UPDATED, CartAction, CartEffect, CartState, reduce};
use crate::catalog::{Product, VariantSelection};
use crate::notify::{ConnectivityStatus, NotificationSink};
use crate::value_objects::ProductId;

/// Owns a session's cart and runs post-transition effects.
///
/// The service applies every mutation to its in-memory state before any
/// I/O, so callers observe the new snapshot regardless of what the sink
/// does. Snapshot writes are best effort: a failed save is logged and
/// the in-memory state stays authoritative for the rest of the session.
///
/// Intended to be owned by the application's composition root and handed
/// to whatever layer needs it; there is no ambient global instance.
pub struct CartService<S, N> {
    session_id: SessionId,
    store: S,
    notifier: N,
    connectivity: ConnectivityStatus,
    state: CartState,
}

impl<S: CartStore, N: NotificationSink> CartService<S, N> {
    /// Restores a session's cart from the store, or starts empty.
    ///
    /// An absent snapshot, a load failure, and a snapshot whose state no
    /// longer deserializes all fall back to the empty cart; none of them
    /// error the caller. Restored totals are recomputed from the line
    /// items rather than trusted from the persisted document.
    #[tracing::instrument(skip(store, notifier, connectivity))]
    pub async fn restore(
        session_id: SessionId,
        store: S,
        notifier: N,
        connectivity: ConnectivityStatus,
    ) -> Self {
        let state = match store.load(session_id).await {
            Ok(Some(snapshot)) => match snapshot.into_state::<CartState>() {
                Ok(restored) => {
                    let state = CartState::from_items(restored.into_items());
                    debug!(item_count = state.item_count(), "cart restored");
                    state
                }
                Err(error) => {
                    warn!(%error, "discarding malformed cart snapshot");
                    CartState::empty()
                }
            },
            Ok(None) => CartState::empty(),
            Err(error) => {
                warn!(%error, "cart snapshot load failed, starting empty");
                CartState::empty()
            }
        };

        let service = Self {
            session_id,
            store,
            notifier,
            connectivity,
            state,
        };
        service.broadcast_state();
        service
    }

    /// Returns the session this cart belongs to.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the current read model.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Returns the shared connectivity handle.
    pub fn connectivity(&self) -> &ConnectivityStatus {
        &self.connectivity
    }

    /// Adds a product to the cart, merging with an existing line when
    /// the product + selection already has one.
    #[tracing::instrument(skip(self, product, selected_variants), fields(product_id = %product.id))]
    pub async fn add(
        &mut self,
        product: Product,
        quantity: i64,
        selected_variants: VariantSelection,
    ) -> &CartState {
        self.dispatch(CartAction::Add {
            product,
            quantity,
            selected_variants,
        })
        .await
    }

    /// Removes every line carrying the given product.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&mut self, product_id: ProductId) -> &CartState {
        self.dispatch(CartAction::Remove { product_id }).await
    }

    /// Sets the quantity on every line carrying the given product;
    /// a quantity of 0 or less removes them.
    #[tracing::instrument(skip(self))]
    pub async fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> &CartState {
        self.dispatch(CartAction::SetQuantity {
            product_id,
            quantity,
        })
        .await
    }

    /// Empties the cart.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&mut self) -> &CartState {
        self.dispatch(CartAction::Clear).await
    }

    async fn dispatch(&mut self, action: CartAction) -> &CartState {
        metrics::counter!("cart_actions_total", "action" => action.kind()).increment(1);

        let (next, effects) = reduce(&self.state, action);
        self.state = next;
        self.run_effects(effects).await;

        &self.state
    }

    async fn run_effects(&self, effects: Vec<CartEffect>) {
        for effect in effects {
            match effect {
                CartEffect::Persist => self.persist().await,
                CartEffect::Notice(notice) => self.notifier.notify(
                    CART_NOTICE,
                    Some(json!({
                        "message": notice.message,
                        "ttl_ms": notice.ttl.as_millis() as u64,
                    })),
                ),
                CartEffect::Broadcast { event, detail } => {
                    if self.connectivity.is_online() {
                        self.notifier.notify(event, Some(detail));
                    }
                }
            }
        }
    }

    async fn persist(&self) {
        let snapshot = match CartSnapshot::from_state(self.session_id, &self.state) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "failed to serialize cart snapshot");
                return;
            }
        };

        if let Err(error) = self.store.save(snapshot).await {
            metrics::counter!("cart_snapshot_save_failures_total").increment(1);
            warn!(
                session_id = %self.session_id,
                %error,
                "cart snapshot save failed; keeping in-memory state"
            );
        }
    }

    fn broadcast_state(&self) {
        if !self.connectivity.is_online() {
            return;
        }
        self.notifier.notify(
            CART_UPDATED,
            Some(json!({
                "item_count": self.state.item_count(),
                "total_cents": self.state.total().cents(),
            })),
        );
    }
}
