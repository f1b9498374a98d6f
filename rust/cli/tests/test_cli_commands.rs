use stopper_cli::run;

use once_cell::sync::Lazy;
use std::sync::Mutex;

static ENV_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct TempEnvVar {
    key: &'static str,
    previous: Option<String>,
}

impl TempEnvVar {
    fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, previous }
    }

    fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for TempEnvVar {
    fn drop(&mut self) {
        unsafe {
            if let Some(prev) = &self.previous {
                std::env::set_var(self.key, prev);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut argv = vec!["stopper"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn help_lists_expected_commands() {
    let _env = ENV_GUARD.lock().unwrap();

    let (code, stdout, _) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    for cmd in [
        "play", "sim", "stats", "verify", "deal", "cfg", "rng", "paytables",
    ] {
        assert!(
            stdout.contains(cmd),
            "help should list subcommand `{}`",
            cmd
        );
    }
}

#[test]
fn cfg_shows_default_settings() {
    let _env = ENV_GUARD.lock().unwrap();
    let _config = TempEnvVar::unset("STOPPER_CONFIG");
    let _seed = TempEnvVar::unset("STOPPER_SEED");
    let _paytable = TempEnvVar::unset("STOPPER_PAYTABLE");
    let _bankroll = TempEnvVar::unset("STOPPER_BANKROLL");

    let (code, stdout, _) = run_cli(&["cfg"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["paytable"]["value"], "paytable-1");
    assert_eq!(json["bankroll"]["value"], 1000);
    assert_eq!(json["deal_delay_ms"]["value"], 420);
    assert_eq!(json["seed"]["source"], "default");
}

#[test]
fn cfg_reads_file_then_env() {
    let _env = ENV_GUARD.lock().unwrap();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("stopper.toml");
    std::fs::write(&path, "paytable = \"paytable-2\"\nbankroll = 500\n").unwrap();
    let _config = TempEnvVar::set("STOPPER_CONFIG", &path.to_string_lossy());
    let _bankroll = TempEnvVar::set("STOPPER_BANKROLL", "750");
    let _paytable = TempEnvVar::unset("STOPPER_PAYTABLE");

    let (code, stdout, _) = run_cli(&["cfg"]);
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["paytable"]["value"], "paytable-2");
    assert_eq!(json["paytable"]["source"], "file");
    assert_eq!(json["bankroll"]["value"], 750);
    assert_eq!(json["bankroll"]["source"], "env");
}

#[test]
fn invalid_config_exits_with_error() {
    let _env = ENV_GUARD.lock().unwrap();
    let _config = TempEnvVar::unset("STOPPER_CONFIG");
    let _paytable = TempEnvVar::set("STOPPER_PAYTABLE", "paytable-9");

    let (code, _, stderr) = run_cli(&["cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("unknown paytable paytable-9"));
}

#[test]
fn deal_is_deterministic_per_seed() {
    let _env = ENV_GUARD.lock().unwrap();

    let (code, first, _) = run_cli(&["deal", "--seed", "42"]);
    let (_, second, _) = run_cli(&["deal", "--seed", "42"]);
    assert_eq!(code, 0);
    assert_eq!(first, second);
    assert!(first.contains("Seed: 42"));
    assert!(first.contains("Stopper: "));
}

#[test]
fn rng_is_deterministic_per_seed() {
    let _env = ENV_GUARD.lock().unwrap();

    let (code, first, _) = run_cli(&["rng", "--seed", "9", "--count", "3"]);
    let (_, second, _) = run_cli(&["rng", "--seed", "9", "--count", "3"]);
    assert_eq!(code, 0);
    assert_eq!(first, second);
    assert!(first.contains("RNG sample: ["));
}

#[test]
fn paytables_lists_builtins() {
    let _env = ENV_GUARD.lock().unwrap();

    let (code, stdout, _) = run_cli(&["paytables"]);
    assert_eq!(code, 0);
    for id in ["paytable-1", "paytable-2", "paytable-3"] {
        assert!(stdout.contains(id));
    }
    assert!(stdout.contains("2×, 6×, 36×, 100×"));
}

#[test]
fn sim_interrupt_exits_130() {
    let _env = ENV_GUARD.lock().unwrap();
    let _config = TempEnvVar::unset("STOPPER_CONFIG");
    let _break = TempEnvVar::set("STOPPER_SIM_BREAK_AFTER", "2");

    let (code, stdout, stderr) = run_cli(&["sim", "--rounds", "5", "--seed", "1"]);
    assert_eq!(code, 130);
    assert!(stdout.contains("Interrupted: saved 2/5"));
    assert!(!stderr.contains("Error:"));
}

#[test]
fn sim_with_unknown_bet_fails() {
    let _env = ENV_GUARD.lock().unwrap();
    let _config = TempEnvVar::unset("STOPPER_CONFIG");

    let (code, _, stderr) = run_cli(&["sim", "--rounds", "5", "--bet", "11:10"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Unknown bet: 11"));
}

#[test]
fn side_bets_need_advanced_flag() {
    let _env = ENV_GUARD.lock().unwrap();
    let _config = TempEnvVar::unset("STOPPER_CONFIG");
    let _advanced = TempEnvVar::unset("STOPPER_ADVANCED");

    let (code, _, stderr) = run_cli(&["sim", "--rounds", "1", "--bet", "bust-joker:5"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Enable advanced mode to place bust-joker"));

    let (code, stdout, _) = run_cli(&[
        "sim",
        "--rounds",
        "1",
        "--bet",
        "bust-joker:5",
        "--advanced",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Simulated: 1 rounds"));
}

#[test]
fn unknown_flag_exits_2() {
    let _env = ENV_GUARD.lock().unwrap();

    let (code, _, stderr) = run_cli(&["deal", "--hands", "3"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Usage: stopper <command> [options]"));
}
