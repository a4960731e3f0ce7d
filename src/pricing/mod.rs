//! Token pricing module.
//!
//! Maps free-form model identifiers to USD-per-million-token rates and turns
//! raw token counts into cost estimates. Pricing data is hardcoded and must
//! be manually updated when providers change their pricing.
//!
//! The table is a load-time constant: build it once with
//! [`RateTable::default_table`] and pass it by reference wherever pricing is
//! needed. It is safe for unsynchronized concurrent reads.
//!
//! ## Lookup strategy
//!
//! 1. Exact key match on the lowercased model name
//! 2. First table key (in declaration order) contained in the name
//! 3. Legacy fixed-size aliases for older GPT naming schemes
//! 4. Flat default rate ([`DEFAULT_RATE`]) - pricing never hard-fails
//!
//! ## Example
//!
//! ```rust
//! use tokenlens::pricing::{multiplier, RateQuery, RateTable, TokenClass};
//!
//! let table = RateTable::default_table();
//! let m = multiplier(
//!     &table,
//!     RateQuery::ForModel {
//!         model: "gpt-4o-mini",
//!         endpoint: None,
//!         class: TokenClass::Prompt,
//!     },
//! );
//! assert_eq!(m.rate, 0.15);
//! ```

pub mod lookup;
pub mod resolver;
pub mod table;

pub use lookup::{
    multiplier, EndpointOverrides, Multiplier, RateQuery, Resolution, TokenClass, DEFAULT_RATE,
    NEUTRAL_RATE,
};
pub use resolver::{resolve, MatchKind, ResolvedKey};
pub use table::{RateEntry, RateTable};
