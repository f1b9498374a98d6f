use std::io;

fn main() {
    stopper_cli::logging::init_logging_or_warn(&mut io::stderr());
    let code = stopper_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
