mod keys;
mod order;
mod query;

pub(super) use keys::{RankedCandidate, compute_rank_keys};
pub(super) use order::order_candidates;
pub(super) use query::{SortField, SortKey, resolve_request};

#[cfg(test)] pub(super) use keys::click_boost;
