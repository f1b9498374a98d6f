//! Side-bet settlement against the stopper card.
//!
//! Number bets are paid card by card while dealing; everything else is
//! decided here, exactly once, when the stopper lands.

use serde::{Deserialize, Serialize};

use crate::bets::{BetCatalog, BetTarget, BetType};
use crate::cards::Card;
use crate::ledger::{Units, Wager};

/// What a winning side bet credits.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SideBetReturn {
    /// `payout × stake` plus the stake back
    #[default]
    StakeAndProfit,
    /// `payout × stake` only; the stake stays consumed
    ProfitOnly,
}

/// How a count bet with a finite upper bound matches.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountMatch {
    /// Wins only when the count equals `max`
    #[default]
    ExactAtMax,
    /// Wins when `min <= count <= max`
    Range,
}

/// Which running counter a count bet is judged on.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountBasis {
    /// Every card drawn, stopper included
    #[default]
    TotalCards,
    /// Non-stopper cards only
    NonStopper,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SideBetRules {
    #[serde(default)]
    pub stake_return: SideBetReturn,
    #[serde(default)]
    pub count_match: CountMatch,
    #[serde(default)]
    pub count_basis: CountBasis,
}

/// Running counters of the round in progress.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundContext {
    pub non_stopper_count: u32,
    pub total_cards: u32,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SideBetPayout {
    pub key: String,
    pub payout: Units,
}

/// Whether a side-bet target wins on `stopper`. Number targets never win here.
pub fn wins(target: &BetTarget, stopper: &Card, ctx: &RoundContext, rules: &SideBetRules) -> bool {
    match *target {
        BetTarget::Number(_) => false,
        BetTarget::BustSuit(suit) => !stopper.is_joker() && stopper.suit == Some(suit),
        BetTarget::BustRank(face) => stopper.rank == face,
        BetTarget::BustJoker => stopper.is_joker(),
        BetTarget::Count { min, max } => {
            let drawn = match rules.count_basis {
                CountBasis::TotalCards => ctx.total_cards,
                CountBasis::NonStopper => ctx.non_stopper_count,
            };
            match (max, rules.count_match) {
                (None, _) => drawn >= min,
                (Some(max), CountMatch::ExactAtMax) => drawn == max,
                (Some(max), CountMatch::Range) => (min..=max).contains(&drawn),
            }
        }
    }
}

/// Evaluates every non-number wager; returns only the winners with the
/// amount to credit.
pub fn settle(
    stopper: &Card,
    ctx: &RoundContext,
    wagers: &[Wager],
    catalog: &BetCatalog,
    rules: &SideBetRules,
) -> Vec<SideBetPayout> {
    wagers
        .iter()
        .filter(|w| w.bet_type != BetType::Number)
        .filter(|w| wins(&w.target, stopper, ctx, rules))
        .filter_map(|w| {
            let def = catalog.get(&w.key)?;
            let profit = def.payout * w.units;
            let payout = match rules.stake_return {
                SideBetReturn::StakeAndProfit => profit + w.units,
                SideBetReturn::ProfitOnly => profit,
            };
            (payout > 0).then(|| SideBetPayout {
                key: w.key.clone(),
                payout,
            })
        })
        .collect()
}
