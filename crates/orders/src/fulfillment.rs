//! Shipment planning: turn an order's eligible lines into provider payloads.

use dzcart_delivery::ShipmentRequest;

use crate::order::{Order, OrderLineItem};

/// Grams per provider weight unit (the provider declares weight in kg).
const GRAMS_PER_UNIT: u64 = 1000;

/// A line with no recorded weight counts as one gram per unit.
const DEFAULT_UNIT_WEIGHT_GRAMS: u64 = 1;

/// Plan new shipments for an order.
///
/// Only lines that are flagged ready and carry no tracking number are
/// considered; lines already tracked are excluded entirely so a line is
/// submitted to the provider at most once. All eligible lines collapse into a
/// single untracked bucket, so the result is zero or one request per order.
///
/// A missing order address produces a sentinel-built request rather than an
/// error; `ShipmentRequest::is_submittable` gates what may actually be sent.
pub fn plan_shipments(order: &Order) -> Vec<ShipmentRequest> {
    let eligible: Vec<&OrderLineItem> = order
        .lines()
        .iter()
        .filter(|line| line.awaiting_dispatch())
        .collect();

    if eligible.is_empty() {
        tracing::debug!(order = %order.id_typed(), "no lines awaiting dispatch");
        return Vec::new();
    }

    let address = order.delivery_address();
    let mut request = ShipmentRequest::for_destination(order.id_typed().to_string(), &address);

    request.montant = eligible.iter().map(|line| line.line_total()).sum::<u64>()
        + order.shipping_price();
    request.poids = total_weight_units(&eligible);
    request.produit = describe_lines(&eligible);

    vec![request]
}

/// Σ(per-unit grams × quantity), converted to provider units, rounded up so a
/// shipment is never under-declared.
fn total_weight_units(lines: &[&OrderLineItem]) -> u32 {
    let grams: u64 = lines
        .iter()
        .map(|line| {
            let unit = line
                .weight_grams
                .map(u64::from)
                .unwrap_or(DEFAULT_UNIT_WEIGHT_GRAMS);
            unit * u64::from(line.quantity)
        })
        .sum();

    grams.div_ceil(GRAMS_PER_UNIT) as u32
}

/// `"Name (x2), Other (x1)"`.
fn describe_lines(lines: &[&OrderLineItem]) -> String {
    lines
        .iter()
        .map(|line| format!("{} (x{})", line.name, line.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dzcart_catalog::ProductId;
    use dzcart_core::EntityId;
    use dzcart_delivery::Address;

    use crate::order::OrderId;

    fn address() -> Address {
        Address::home("Amina B", "0550000000", "16", "Alger", "Bab El Oued", "12 rue", 400)
    }

    fn line(name: &str, quantity: u32, unit_price: u64) -> OrderLineItem {
        OrderLineItem::new(ProductId::new(EntityId::new()), quantity, unit_price, name)
            .unwrap()
            .ready_for_dispatch()
    }

    fn order(lines: Vec<OrderLineItem>) -> Order {
        Order::new(
            OrderId::new(EntityId::new()),
            None,
            Some(address()),
            None,
            400,
            lines,
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn eligible_lines_collapse_into_one_request() {
        let plan = plan_shipments(&order(vec![
            line("Bag", 2, 1000),
            line("Scarf", 1, 500),
        ]));

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].produit, "Bag (x2), Scarf (x1)");
        // 2×1000 + 1×500 + 400 shipping
        assert_eq!(plan[0].montant, 2900);
        assert!(plan[0].is_submittable());
    }

    #[test]
    fn weight_is_summed_in_grams_and_rounded_up_to_kg() {
        let plan = plan_shipments(&order(vec![
            line("Bag", 2, 1000).with_weight_grams(600),
            line("Scarf", 1, 500).with_weight_grams(700),
        ]));

        // 600×2 + 700×1 = 1900 g ⇒ 2 kg
        assert_eq!(plan[0].poids, 2);
    }

    #[test]
    fn missing_weight_defaults_to_one_gram_per_unit() {
        let plan = plan_shipments(&order(vec![line("Bag", 3, 1000)]));
        // 3 g rounds up to 1 kg
        assert_eq!(plan[0].poids, 1);
    }

    #[test]
    fn tracked_lines_are_excluded_from_the_description_and_amount() {
        let plan = plan_shipments(&order(vec![
            line("Bag", 1, 1000),
            line("Scarf", 1, 500).with_tracking("TRK-001"),
        ]));

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].produit, "Bag (x1)");
        assert_eq!(plan[0].montant, 1400);
    }

    #[test]
    fn all_tracked_yields_no_requests() {
        let plan = plan_shipments(&order(vec![
            line("Bag", 1, 1000).with_tracking("TRK-001"),
            line("Scarf", 1, 500).with_tracking("TRK-002"),
        ]));
        assert!(plan.is_empty());
    }

    #[test]
    fn not_ready_lines_yield_no_requests() {
        let not_ready = OrderLineItem::new(ProductId::new(EntityId::new()), 1, 1000, "Bag").unwrap();
        let plan = plan_shipments(&order(vec![not_ready]));
        assert!(plan.is_empty());
    }

    #[test]
    fn missing_address_yields_unsubmittable_request() {
        let order = Order::new(
            OrderId::new(EntityId::new()),
            None,
            None,
            None,
            400,
            vec![line("Bag", 1, 1000)],
            Utc::now(),
        )
        .unwrap();

        let plan = plan_shipments(&order);
        assert_eq!(plan.len(), 1);
        assert!(!plan[0].is_submittable());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn declared_weight_is_never_under_the_raw_sum(
                weights in prop::collection::vec((1u32..5000, 1u32..10), 1..8),
            ) {
                let lines: Vec<OrderLineItem> = weights
                    .iter()
                    .enumerate()
                    .map(|(n, (grams, quantity))| {
                        line(&format!("item-{n}"), *quantity, 100).with_weight_grams(*grams)
                    })
                    .collect();

                let raw_grams: u64 = weights
                    .iter()
                    .map(|(grams, quantity)| u64::from(*grams) * u64::from(*quantity))
                    .sum();

                let plan = plan_shipments(&order(lines));
                prop_assert_eq!(plan.len(), 1);
                prop_assert!(u64::from(plan[0].poids) * 1000 >= raw_grams);
                // And tight: one unit less would under-declare.
                prop_assert!((u64::from(plan[0].poids) - 1) * 1000 < raw_grams);
            }
        }
    }
}
