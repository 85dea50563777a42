//! Broker Order Domain Services
//!
//! Stateless pricing logic used while normalizing orders.

mod price_resolution;

pub use price_resolution::{
    ResolvedLegPrices, calculate_prices_with_possible_legs,
    resolve_multi_leg_price_to_single_price,
};
