//! Price comparison ranking.
//!
//! Offers arrive joined with their owning shop; this module orders them by
//! price ascending and flags every offer tied at the minimum price as the
//! best deal. Ties are not broken: multiple badges may appear at once.

use crate::models::ProductOffer;

/// An offer with its best-deal flag, as rendered in the compare table.
#[derive(Debug, Clone)]
pub struct RankedOffer {
    pub offer: ProductOffer,
    /// True for every offer at the minimum price in the result set.
    pub best_deal: bool,
}

/// Sort offers ascending by price and flag the cheapest.
///
/// The sort is stable: offers with equal prices keep their input order. An
/// empty input produces an empty output with no flags.
#[must_use]
pub fn rank_by_price(mut offers: Vec<ProductOffer>) -> Vec<RankedOffer> {
    offers.sort_by(|a, b| a.price.cmp(&b.price));

    let best = offers.first().map(|offer| offer.price);

    offers
        .into_iter()
        .map(|offer| RankedOffer {
            best_deal: Some(offer.price) == best,
            offer,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pricelens_core::{Price, ProductId, ShopId};
    use rust_decimal::Decimal;

    fn offer(name: &str, price: i64, shop_name: &str) -> ProductOffer {
        ProductOffer {
            id: ProductId::generate(),
            name: name.to_owned(),
            category: "Smartphone".to_owned(),
            price: Price::new(Decimal::from(price)).unwrap(),
            shop_id: ShopId::generate(),
            shop_name: shop_name.to_owned(),
            shop_address: format!("{shop_name} Road, Supela"),
            shop_location: None,
        }
    }

    #[test]
    fn test_sorted_ascending_with_single_best_deal() {
        let offers = vec![
            offer("iPhone 15", 80_000, "Shop A"),
            offer("iPhone 15", 75_000, "Shop B"),
        ];
        let ranked = rank_by_price(offers);

        assert_eq!(ranked[0].offer.shop_name, "Shop B");
        assert!(ranked[0].best_deal);
        assert_eq!(ranked[1].offer.shop_name, "Shop A");
        assert!(!ranked[1].best_deal);
    }

    #[test]
    fn test_tied_minimum_flags_all() {
        let offers = vec![
            offer("Charger", 499, "Shop A"),
            offer("Charger", 499, "Shop B"),
            offer("Charger", 599, "Shop C"),
        ];
        let ranked = rank_by_price(offers);

        assert!(ranked[0].best_deal);
        assert!(ranked[1].best_deal);
        assert!(!ranked[2].best_deal);
        // Stable: ties keep input order.
        assert_eq!(ranked[0].offer.shop_name, "Shop A");
        assert_eq!(ranked[1].offer.shop_name, "Shop B");
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_by_price(Vec::new()).is_empty());
    }

    #[test]
    fn test_ranking_is_total_order_by_price() {
        let offers = vec![
            offer("Case", 300, "A"),
            offer("Case", 100, "B"),
            offer("Case", 200, "C"),
        ];
        let ranked = rank_by_price(offers);
        let prices: Vec<_> = ranked.iter().map(|r| r.offer.price).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
    }
}
