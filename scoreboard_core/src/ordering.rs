//! Summary ordering for active matches.

use crate::live_match::Match;
use std::cmp::Ordering;

/// Highest total score first; equal totals keep start order (earliest first).
pub fn summary_order(a: &Match, b: &Match) -> Ordering {
    b.total_score()
        .cmp(&a.total_score())
        .then_with(|| a.sequence().cmp(&b.sequence()))
}

/// Sort matches in place into summary order.
pub fn sort_for_summary(matches: &mut [Match]) {
    matches.sort_by(summary_order);
}
