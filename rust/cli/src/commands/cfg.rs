//! `cfg`: resolved configuration with the source of every value.
//!
//! ```json
//! {
//!   "paytable": { "value": "paytable-1", "source": "default" },
//!   "bankroll": { "value": 1000, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(e.to_string()));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": { "value": config.seed, "source": sources.seed },
        "paytable": { "value": config.paytable, "source": sources.paytable },
        "advanced": { "value": config.advanced, "source": sources.advanced },
        "bankroll": { "value": config.bankroll, "source": sources.bankroll },
        "deal_delay_ms": { "value": config.deal_delay_ms, "source": sources.deal_delay_ms },
        "side_bet_return": { "value": config.side_bet_return, "source": sources.side_bet_return },
        "count_match": { "value": config.count_match, "source": sources.count_match },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn cfg_prints_every_value_with_its_source() {
        unsafe {
            std::env::remove_var("STOPPER_CONFIG");
            std::env::remove_var("STOPPER_PAYTABLE");
            std::env::set_var("STOPPER_BANKROLL", "250");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut out, &mut err);
        unsafe {
            std::env::remove_var("STOPPER_BANKROLL");
        }

        assert!(result.is_ok());
        assert!(err.is_empty(), "should not write to stderr on success");
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["bankroll"]["value"], 250);
        assert_eq!(json["bankroll"]["source"], "env");
        assert_eq!(json["paytable"]["value"], "paytable-1");
        assert_eq!(json["paytable"]["source"], "default");
        assert_eq!(json["side_bet_return"]["value"], "stake-and-profit");
        assert_eq!(json["count_match"]["value"], "exact-at-max");
    }

    #[test]
    #[serial]
    fn cfg_reports_invalid_configuration() {
        unsafe {
            std::env::set_var("STOPPER_SEED", "not-a-number");
        }
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut out, &mut err);
        unsafe {
            std::env::remove_var("STOPPER_SEED");
        }

        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(String::from_utf8(err).unwrap().contains("Invalid seed"));
    }
}
