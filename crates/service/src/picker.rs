//! # Candidate Picker
//!
//! Randomised selection of reviewers from a team roster. Pure: callers
//! inject the RNG, production uses [`rand::rng`], tests use a seeded
//! generator.
//!
//! A member is eligible when it is active and not in the exclusion set.
//! Selection happens over the filtered eligible subset, which keeps both
//! operations deterministic O(N).

use std::collections::HashSet;

use domain::TeamMember;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Pick up to two distinct reviewers from `candidates`.
///
/// Returns zero, one or two user ids depending on how many eligible
/// members exist. The order of the result is not meaningful.
pub fn pick_two<R: Rng + ?Sized>(
    candidates: &[TeamMember],
    exclude: &HashSet<String>,
    rng: &mut R,
) -> Vec<String> {
    let eligible = eligible_ids(candidates, exclude);
    eligible
        .choose_multiple(rng, 2)
        .map(|id| (*id).to_string())
        .collect()
}

/// Pick a single replacement reviewer, or `None` when no eligible member
/// remains outside the exclusion set.
pub fn pick_one_replacement<R: Rng + ?Sized>(
    candidates: &[TeamMember],
    exclude: &HashSet<String>,
    rng: &mut R,
) -> Option<String> {
    let eligible = eligible_ids(candidates, exclude);
    eligible.choose(rng).map(|id| (*id).to_string())
}

fn eligible_ids<'a>(candidates: &'a [TeamMember], exclude: &HashSet<String>) -> Vec<&'a str> {
    candidates
        .iter()
        .filter(|member| member.is_active && !exclude.contains(&member.user_id))
        .map(|member| member.user_id.as_str())
        .collect()
}
