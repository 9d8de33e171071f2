mod cli;
mod commands;

use tracing_subscriber::EnvFilter;

use cli::{CompileParams, DumpParams, ExecParams, build_cli};

fn main() {
    // Library events go to stderr, filtered by PCRELIFT_LOG (e.g. `debug`).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("PCRELIFT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("exec", m)) => {
            let params = ExecParams::from_matches(m);
            commands::exec::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
