//! `rng`: uniform samples from the seeded ChaCha20 source the shuffle uses.
//! Same seed, same samples.

use crate::error::CliError;
use std::io::Write;
use stopper_engine::deck::{ChaChaSource, RandomSource};

pub fn handle_rng_command(
    seed: Option<u64>,
    count: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if count == 0 {
        return Err(CliError::InvalidInput("count must be >= 1".to_string()));
    }
    let s = seed.unwrap_or_else(rand::random);
    let mut source = ChaChaSource::new_with_seed(s);
    let vals: Vec<String> = (0..count)
        .map(|_| format!("{:.6}", source.uniform()))
        .collect();
    writeln!(out, "Seed: {}", s)?;
    writeln!(out, "RNG sample: [{}]", vals.join(", "))?;
    Ok(())
}
