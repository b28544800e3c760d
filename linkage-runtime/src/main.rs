// Copyright (C) 2024 Laixer Equipment B.V.
// All rights reserved.
//
// This software may be modified and distributed under the terms
// of the included license.  See the LICENSE file for details.

use clap::{Parser, ValueHint};

use linkage::{
    input::{Command, Outcome},
    trace::{CsvTracer, NullTracer, TraceWriter, Tracer},
    ArmConfig, Canvas, GlobalConfig, Preset, Session,
};

#[derive(Parser)]
#[command(author = "Copyright (C) 2024 Laixer Equipment B.V.")]
#[command(version, propagate_version = true)]
#[command(about = "Interactive planar arm forward kinematics", long_about = None)]
struct Args {
    /// Arm preset.
    #[arg(short, long, value_enum, default_value_t = Preset::TwoLink)]
    preset: Preset,
    /// Arm configuration file, overrides the preset.
    #[arg(
        short = 'c',
        long = "config",
        alias = "conf",
        value_name = "FILE",
        value_hint = ValueHint::FilePath
    )]
    config: Option<std::path::PathBuf>,
    /// Record every pose to a CSV trace in this directory.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    trace: Option<std::path::PathBuf>,
    /// Canvas width in columns.
    #[arg(
        short,
        long,
        default_value_t = linkage::consts::DEFAULT_CANVAS_WIDTH,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(
            linkage::consts::MIN_CANVAS_WIDTH as u64..=linkage::consts::MAX_CANVAS_WIDTH as u64
        )
    )]
    width: usize,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
    /// Draw the initial pose and exit.
    #[arg(long)]
    once: bool,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    use log::LevelFilter;

    let args = Args::parse();

    let arm: ArmConfig = match &args.config {
        Some(path) => linkage::from_file(path)?,
        None => args.preset.config(),
    };

    let config = GlobalConfig {
        bin_name: env!("CARGO_BIN_NAME").to_string(),
        color: !args.no_color,
        canvas_width: args.width,
        trace: args.trace.clone(),
    };

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_time_level(LevelFilter::Off);
    log_config.set_thread_level(LevelFilter::Off);
    log_config.set_target_level(LevelFilter::Off);
    log_config.set_location_level(LevelFilter::Off);

    let log_level = match args.verbose {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let color_choice = if config.color {
        simplelog::ColorChoice::Auto
    } else {
        simplelog::ColorChoice::Never
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Stderr,
        color_choice,
    )?;

    log::trace!("{:#?}", config);
    log::trace!("{:#?}", arm);

    match &config.trace {
        Some(path) => {
            let tracer = CsvTracer::from_path(path);
            log::info!("Recording trace to {}", tracer.file_path(&config.bin_name).display());

            run(&config, &arm, tracer.instance(&config.bin_name)?, args.once).await
        }
        None => {
            let tracer = NullTracer::from_path("");

            run(&config, &arm, tracer.instance(&config.bin_name)?, args.once).await
        }
    }
}

async fn run<T: TraceWriter>(
    config: &GlobalConfig,
    arm: &ArmConfig,
    tracer: T,
    once: bool,
) -> anyhow::Result<()> {
    use tokio::io::AsyncBufReadExt;

    let canvas = Canvas::new(std::io::stdout(), arm, config.canvas_width).with_color(config.color);
    log::debug!("Viewport: {:?}", canvas.viewport());

    let mut session = Session::new(arm, canvas, tracer)?;

    log::info!("Starting {}", config.bin_name);
    log::debug!("Runtime version: {}", linkage::consts::VERSION);

    session.start()?;

    if once {
        return Ok(());
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                log::info!("Termination requested");
                break;
            }
        };

        let Some(line) = line else {
            log::debug!("Input closed");
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                log::trace!("{:?}", command);

                match command.apply(&mut session) {
                    Ok(Outcome::Continue) => {}
                    Ok(Outcome::Usage(usage)) => println!("{}", usage),
                    Ok(Outcome::Quit) => break,
                    Err(e) => log::error!("{}", e),
                }
            }
            Err(e) => log::warn!("{}, try 'help'", e),
        }
    }

    log::info!("{} was shutdown gracefully", config.bin_name);

    Ok(())
}
