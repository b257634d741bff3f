use crate::models::Order;
use serde::Serialize;
use std::collections::HashSet;

/// Per-seller figures derived from stored orders on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SellerStats {
    /// Distinct orders holding at least one of the seller's line items.
    pub total_orders: u64,
    /// Sum of quantity x snapshot price over the seller's line items only.
    pub total_earnings: f64,
}

/// Single pass over every line item of `orders`.
///
/// The order count deduplicates by parent order id; earnings do not, so an
/// order carrying three of the seller's items counts once but earns thrice.
pub fn seller_stats<'a, I>(orders: I, seller_id: &str) -> SellerStats
where
    I: IntoIterator<Item = &'a Order>,
{
    let (order_ids, total_earnings) = orders
        .into_iter()
        .flat_map(|order| {
            order
                .items
                .iter()
                .map(move |item| (order.id.as_str(), item))
        })
        .filter(|(_, item)| item.seller == seller_id)
        .fold(
            (HashSet::new(), 0.0_f64),
            |(mut order_ids, earnings), (order_id, item)| {
                order_ids.insert(order_id);
                (order_ids, earnings + item.line_total())
            },
        );

    SellerStats {
        total_orders: order_ids.len() as u64,
        total_earnings,
    }
}
