//! Command handlers, one module per subcommand.
//!
//! Each module exposes `handle_COMMAND_command(...) -> Result<(), CliError>`
//! and takes its output streams as `&mut dyn Write`.

pub mod cfg;
pub mod deal;
pub mod paytables;
pub mod play;
pub mod rng;
pub mod sim;
pub mod stats;
pub mod verify;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use paytables::handle_paytables_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
pub use verify::handle_verify_command;
