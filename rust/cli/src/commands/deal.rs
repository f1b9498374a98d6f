//! `deal`: shuffle one deck and show it up to and including the first stopper.

use crate::error::CliError;
use std::io::Write;
use stopper_engine::cards::DeckConfig;
use stopper_engine::deck::{ChaChaSource, Deck};

pub fn handle_deal_command(
    seed: Option<u64>,
    ace_stopper: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let config = if ace_stopper {
        DeckConfig::ace_stopper()
    } else {
        DeckConfig::standard()
    };
    let mut deck = Deck::shuffled(&config, &mut ChaChaSource::new_with_seed(base_seed));

    let mut drawn = Vec::new();
    let stopper = loop {
        let card = deck
            .deal_card()
            .ok_or_else(|| CliError::Engine("deck exhausted before a stopper".into()))?;
        drawn.push(card.to_string());
        if card.stopper {
            break card;
        }
    };

    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(out, "Cards: {}", drawn.join(" "))?;
    writeln!(out, "Stopper: {} after {} card(s)", stopper, drawn.len())?;
    Ok(())
}
