//! Duplicate cluster review: ranks a cluster's candidates against its
//! representative and drives the list/compare view.

mod error;
pub use error::ReviewError;

pub mod compare;
pub mod rank;
pub mod session;

pub use compare::{Comparison, DimensionScore};
pub use rank::{RankedCandidate, rank_candidates, ranking_order};
pub use session::{ReviewEvent, ReviewScreen, ReviewSession, ReviewView};
