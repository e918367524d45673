//! # Quote Selection
//!
//! Picks the winning quote out of a batch.
//!
//! Selection is by lowest total fee, with ties resolved in favour of the
//! quote that arrived first. Channel listings come back from the vendor in
//! its preference order, so holding the first of two equal prices keeps
//! that preference.

use crate::domain::entities::FeeQuote;

/// Returns the cheapest quote, or `None` when there are no quotes.
///
/// Ties keep the earliest quote in iteration order.
#[must_use]
pub fn cheapest<'a, I>(quotes: I) -> Option<&'a FeeQuote>
where
    I: IntoIterator<Item = &'a FeeQuote>,
{
    quotes.into_iter().fold(None, |best, quote| match best {
        Some(current) if quote.total() < current.total() => Some(quote),
        Some(current) => Some(current),
        None => Some(quote),
    })
}
