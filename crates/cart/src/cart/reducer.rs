//! The pure cart reducer.
//!
//! Every operation is a function from the previous snapshot and an
//! action to a fresh snapshot plus the effects the surrounding service
//! should carry out. The reducer itself never touches I/O and never
//! fails: invalid input degrades to a logged no-op.

use serde_json::json;
use tracing::{debug, warn};

use crate::catalog::{Product, VariantSelection};
use crate::value_objects::ProductId;

use super::action::CartAction;
use super::effect::{CART_UPDATED, CartEffect, Notice};
use super::line::{LineId, LineItem};
use super::state::CartState;

/// Applies an action to the cart, producing the next snapshot and the
/// post-transition effect list.
pub fn reduce(state: &CartState, action: CartAction) -> (CartState, Vec<CartEffect>) {
    match action {
        CartAction::Add {
            product,
            quantity,
            selected_variants,
        } => add(state, product, quantity, selected_variants),
        CartAction::Remove { product_id } => remove(state, &product_id),
        CartAction::SetQuantity {
            product_id,
            quantity,
        } => set_quantity(state, &product_id, quantity),
        CartAction::Clear => finish(CartState::empty(), None),
    }
}

fn add(
    state: &CartState,
    product: Product,
    quantity: i64,
    selected_variants: VariantSelection,
) -> (CartState, Vec<CartEffect>) {
    if let Err(error) = product.validate() {
        warn!(%error, "ignoring add of invalid product");
        return finish(state.clone(), None);
    }

    let quantity = clamp_quantity(quantity);
    let line_id = LineId::derive(&product.id, &selected_variants);
    let notice = Notice::item_added(&product, &selected_variants);

    let mut items = state.items().to_vec();
    if let Some(line) = items.iter_mut().find(|line| line.line_id == line_id) {
        line.quantity = line.quantity.saturating_add(quantity);
    } else {
        items.push(LineItem::new(product, quantity, selected_variants));
    }

    finish(CartState::from_items(items), Some(notice))
}

fn remove(state: &CartState, product_id: &ProductId) -> (CartState, Vec<CartEffect>) {
    if !state.has_product(product_id) {
        debug!(%product_id, "remove matched no line");
        return finish(state.clone(), None);
    }

    // Coarse on purpose: every variant line of the product goes at once.
    let items = state
        .items()
        .iter()
        .filter(|line| &line.product.id != product_id)
        .cloned()
        .collect();

    finish(CartState::from_items(items), None)
}

fn set_quantity(
    state: &CartState,
    product_id: &ProductId,
    quantity: i64,
) -> (CartState, Vec<CartEffect>) {
    if quantity <= 0 {
        return remove(state, product_id);
    }

    if !state.has_product(product_id) {
        debug!(%product_id, "set_quantity matched no line");
        return finish(state.clone(), None);
    }

    let quantity = clamp_quantity(quantity);
    let items = state
        .items()
        .iter()
        .cloned()
        .map(|mut line| {
            if &line.product.id == product_id {
                line.quantity = quantity;
            }
            line
        })
        .collect();

    finish(CartState::from_items(items), None)
}

/// Quantities below 1 are clamped up rather than rejected.
fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(1, i64::from(u32::MAX)) as u32
}

fn finish(next: CartState, notice: Option<Notice>) -> (CartState, Vec<CartEffect>) {
    let mut effects = Vec::with_capacity(3);
    effects.push(CartEffect::Persist);
    if let Some(notice) = notice {
        effects.push(CartEffect::Notice(notice));
    }
    effects.push(CartEffect::Broadcast {
        event: CART_UPDATED,
        detail: json!({
            "item_count": next.item_count(),
            "total_cents": next.total().cents(),
        }),
    });

    (next, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{Money, VariantId};

    fn widget() -> Product {
        Product::new("p-a", "Widget", Money::from_cents(1000))
    }

    fn selection(pairs: &[(&str, &str)]) -> VariantSelection {
        pairs
            .iter()
            .map(|(kind, id)| (kind.to_string(), VariantId::new(*id)))
            .collect()
    }

    fn apply(state: CartState, action: CartAction) -> CartState {
        reduce(&state, action).0
    }

    fn add_action(product: Product, quantity: i64) -> CartAction {
        CartAction::Add {
            product,
            quantity,
            selected_variants: VariantSelection::new(),
        }
    }

    #[test]
    fn add_appends_new_line() {
        let state = apply(CartState::empty(), add_action(widget(), 2));

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.item_count(), 2);
        assert_eq!(state.total(), Money::from_cents(2000));
    }

    #[test]
    fn repeated_add_merges_into_one_line() {
        let state = apply(CartState::empty(), add_action(widget(), 2));
        let state = apply(state, add_action(widget(), 1));

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 3);
        assert_eq!(state.item_count(), 3);
        assert_eq!(state.total(), Money::from_cents(3000));
    }

    #[test]
    fn distinct_selections_open_distinct_lines() {
        let product = widget();
        let state = apply(
            CartState::empty(),
            CartAction::Add {
                product: product.clone(),
                quantity: 1,
                selected_variants: selection(&[("size", "v-s")]),
            },
        );
        let state = apply(
            state,
            CartAction::Add {
                product,
                quantity: 1,
                selected_variants: selection(&[("size", "v-m")]),
            },
        );

        assert_eq!(state.items().len(), 2);
        assert_eq!(state.item_count(), 2);
    }

    #[test]
    fn add_clamps_non_positive_quantity_to_one() {
        let state = apply(CartState::empty(), add_action(widget(), 0));
        assert_eq!(state.items()[0].quantity, 1);

        let state = apply(CartState::empty(), add_action(widget(), -5));
        assert_eq!(state.items()[0].quantity, 1);
    }

    #[test]
    fn add_of_invalid_product_is_noop_but_still_persists() {
        let invalid = Product::new("", "Nameless", Money::from_cents(100));
        let (state, effects) = reduce(&CartState::empty(), add_action(invalid, 1));

        assert!(state.is_empty());
        assert!(effects.contains(&CartEffect::Persist));
        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, CartEffect::Notice(_)))
        );
    }

    #[test]
    fn add_emits_persist_notice_and_broadcast() {
        let (state, effects) = reduce(&CartState::empty(), add_action(widget(), 2));

        assert_eq!(effects[0], CartEffect::Persist);
        assert!(matches!(&effects[1], CartEffect::Notice(n) if n.message == "Widget added to cart"));
        match &effects[2] {
            CartEffect::Broadcast { event, detail } => {
                assert_eq!(*event, CART_UPDATED);
                assert_eq!(detail["item_count"], 2);
                assert_eq!(detail["total_cents"], state.total().cents());
            }
            other => panic!("expected broadcast, got {other:?}"),
        }
    }

    #[test]
    fn remove_takes_every_variant_line_of_the_product() {
        let product = widget();
        let state = apply(
            CartState::empty(),
            CartAction::Add {
                product: product.clone(),
                quantity: 1,
                selected_variants: selection(&[("size", "v-s")]),
            },
        );
        let state = apply(
            state,
            CartAction::Add {
                product: product.clone(),
                quantity: 1,
                selected_variants: selection(&[("size", "v-m")]),
            },
        );
        let state = apply(
            state,
            CartAction::Add {
                product: Product::new("p-b", "Gadget", Money::from_cents(500)),
                quantity: 1,
                selected_variants: VariantSelection::new(),
            },
        );

        let state = apply(
            state,
            CartAction::Remove {
                product_id: product.id,
            },
        );

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].product.id, ProductId::new("p-b"));
        assert_eq!(state.total(), Money::from_cents(500));
    }

    #[test]
    fn remove_of_absent_product_is_noop() {
        let state = apply(CartState::empty(), add_action(widget(), 1));
        let next = apply(
            state.clone(),
            CartAction::Remove {
                product_id: ProductId::new("missing"),
            },
        );

        assert_eq!(next, state);
    }

    #[test]
    fn set_quantity_updates_matching_lines() {
        let state = apply(CartState::empty(), add_action(widget(), 2));
        let state = apply(
            state,
            CartAction::SetQuantity {
                product_id: ProductId::new("p-a"),
                quantity: 5,
            },
        );

        assert_eq!(state.items()[0].quantity, 5);
        assert_eq!(state.total(), Money::from_cents(5000));
    }

    #[test]
    fn set_quantity_zero_or_negative_removes_the_line() {
        for quantity in [0, -5] {
            let state = apply(CartState::empty(), add_action(widget(), 2));
            let state = apply(
                state,
                CartAction::SetQuantity {
                    product_id: ProductId::new("p-a"),
                    quantity,
                },
            );

            assert!(state.is_empty());
            assert_eq!(state.total(), Money::zero());
            assert_eq!(state.item_count(), 0);
        }
    }

    #[test]
    fn set_quantity_on_absent_product_is_noop() {
        let state = apply(CartState::empty(), add_action(widget(), 2));
        let next = apply(
            state.clone(),
            CartAction::SetQuantity {
                product_id: ProductId::new("missing"),
                quantity: 7,
            },
        );

        assert_eq!(next, state);
    }

    #[test]
    fn clear_is_idempotent() {
        let empty = apply(CartState::empty(), CartAction::Clear);
        assert!(empty.is_empty());

        let state = apply(CartState::empty(), add_action(widget(), 3));
        let cleared = apply(state, CartAction::Clear);
        assert!(cleared.is_empty());
        assert_eq!(cleared.total(), Money::zero());
        assert_eq!(cleared.item_count(), 0);
    }

    #[test]
    fn merge_then_zero_quantity_scenario() {
        // add(A, 2) -> 2 items, $20; add(A, 1) -> merged 3 items, $30;
        // set_quantity(A, 0) -> empty.
        let state = apply(CartState::empty(), add_action(widget(), 2));
        assert_eq!(state.item_count(), 2);
        assert_eq!(state.total(), Money::from_cents(2000));

        let state = apply(state, add_action(widget(), 1));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.item_count(), 3);
        assert_eq!(state.total(), Money::from_cents(3000));

        let state = apply(
            state,
            CartAction::SetQuantity {
                product_id: ProductId::new("p-a"),
                quantity: 0,
            },
        );
        assert!(state.is_empty());
        assert_eq!(state.item_count(), 0);
        assert_eq!(state.total(), Money::zero());
    }
}
