use anyhow::{Context, Result};
use gcode_machine::config::Config;
use gcode_machine::machine::StateMachine;
use gcode_machine::replay::{replay, ReplayOptions};
use std::fs::File;
use std::io::{self, BufReader};

fn main() -> Result<()> {
    // Parse configuration from command line and profile file
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(path) = &config.profile_path {
        log::info!("Loaded machine profile {:?}", path);
    }

    let mut machine = StateMachine::with_home_position(config.profile.home_position.clone());
    let options = ReplayOptions {
        on_error: config.on_error,
        parse_only: config.parse_only,
    };

    let summary = if config.reads_stdin() {
        replay(io::stdin().lock(), &mut machine, options)?
    } else {
        let file = File::open(&config.program)
            .with_context(|| format!("failed to open {}", config.program.display()))?;
        replay(BufReader::new(file), &mut machine, options)?
    };

    for failure in &summary.failures {
        eprintln!("line {}: {} ({:?})", failure.line, failure.error, failure.text);
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(machine.state())?);
    } else {
        println!("{:#?}", machine.state());
    }

    if !summary.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}
