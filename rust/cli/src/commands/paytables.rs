//! `paytables`: the built-in ladders.

use crate::error::CliError;
use std::io::Write;
use stopper_engine::paytable::{DEFAULT_PAYTABLE_ID, Paytable};

pub fn handle_paytables_command(out: &mut dyn Write) -> Result<(), CliError> {
    for p in Paytable::builtin() {
        let marker = if p.id == DEFAULT_PAYTABLE_ID { "*" } else { " " };
        writeln!(out, "{} {:<12} {:<12} {}", marker, p.id, p.name, p.summary())?;
    }
    Ok(())
}
