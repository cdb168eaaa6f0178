//! Pure ranking helpers shared by the intervention variants.
//!
//! Every sort here is stable, so ties keep the order in which indices or
//! agents were supplied.

use rw_agent::Population;
use rw_core::{AgentId, SeverityBand};

/// Behavior indices ordered by ascending odds ratio.
///
/// `[2.2, 1.1, 4.4, 3.3]` ranks as `[1, 0, 3, 2]`; ties stay in index order.
pub fn risk_factor_ranks(odds_ratios: &[f64]) -> Vec<usize> {
    let mut ranks: Vec<usize> = (0..odds_ratios.len()).collect();
    ranks.sort_by(|&a, &b| odds_ratios[a].total_cmp(&odds_ratios[b]));
    ranks
}

/// The slice `ranks[round(lo·n) .. round(hi·n)]` of [`risk_factor_ranks`].
pub fn target_behaviors(odds_ratios: &[f64], band: SeverityBand) -> Vec<usize> {
    let ranks = risk_factor_ranks(odds_ratios);
    let (lo, hi) = band.ranks(ranks.len());
    ranks[lo..hi].to_vec()
}

/// How many behaviors an individual treatment may address:
/// `round(hi·n) - round(lo·n)`.
pub fn treatable_count(n_beh: usize, band: SeverityBand) -> usize {
    let (lo, hi) = band.ranks(n_beh);
    hi - lo
}

/// `Σ OR_i · b_i`.
pub fn risk_score(behavior: &[bool], odds_ratios: &[f64]) -> f64 {
    odds_ratios
        .iter()
        .zip(behavior)
        .filter(|&(_, &b)| b)
        .map(|(or, _)| or)
        .sum()
}

/// All agents by descending [`risk_score`]; equal scores keep id order.
pub fn prioritize_agents(population: &Population, odds_ratios: &[f64]) -> Vec<AgentId> {
    let scores: Vec<f64> = population
        .iter()
        .map(|a| risk_score(&a.behavior, odds_ratios))
        .collect();
    let mut ranked: Vec<AgentId> = population.ids().collect();
    ranked.sort_by(|a, b| scores[b.index()].total_cmp(&scores[a.index()]));
    ranked
}

/// An agent's active behaviors, most severe first.
///
/// This is the ascending [`risk_factor_ranks`] restricted to active indices
/// and then reversed, so among equal odds ratios the higher index comes
/// first: ORs `[2, 12, 11, 3, 3]` with behavior `[1, 0, 1, 1, 1]` give
/// `[2, 4, 3, 0]`.
pub fn priority_behaviors(behavior: &[bool], odds_ratios: &[f64]) -> Vec<usize> {
    let mut active: Vec<usize> = risk_factor_ranks(odds_ratios)
        .into_iter()
        .filter(|&i| behavior.get(i).copied().unwrap_or(false))
        .collect();
    active.reverse();
    active
}
