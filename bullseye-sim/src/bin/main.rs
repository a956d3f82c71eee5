//! Bullseye simulator
//!
//! Starts the face on a simulated host, runs a number of one-tick frames
//! and optionally writes the last frame as a PPM image.
//!
//! ```text
//! RUST_LOG=debug bullseye-sim --round --time 03:30:45 --day 7 --ppm face.ppm
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bullseye_core::config::{FaceConfig, HourHandMode, Platform, TickUnit};
use bullseye_core::state::WallClock;
use bullseye_sim::{
    dump_face_config, load_face_config, ClockSource, ConfigError, SimError, Simulator,
};
use clap::Parser;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};
use env_logger::Env;
use log::{error, info};

#[derive(Debug, Parser)]
#[command(name = "bullseye-sim", version, about = "Run the Bullseye watch face on a simulated host")]
struct Args {
    /// Use the 180x180 round panel
    #[arg(long, conflicts_with = "rect")]
    round: bool,

    /// Use the 144x168 rectangular panel (default)
    #[arg(long)]
    rect: bool,

    /// Subscribe to minute ticks instead of second ticks
    #[arg(long)]
    minute_ticks: bool,

    /// Advance the hour hand with the minutes
    #[arg(long)]
    sweep_hour: bool,

    /// Frames to run, one tick each
    #[arg(long, default_value_t = 3)]
    frames: u32,

    /// Fixed time as HH:MM:SS instead of the system clock
    #[arg(long)]
    time: Option<String>,

    /// Day of month used with --time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=31))]
    day: u8,

    /// Drop the companion link before this frame
    #[arg(long)]
    disconnect_at: Option<u32>,

    /// TOML file with face overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the resolved face configuration as a --config file and exit
    #[arg(long)]
    dump_config: bool,

    /// Write the last frame to this PPM file
    #[arg(long)]
    ppm: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid --time '{0}', expected HH:MM:SS")]
    Time(String),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;
    if args.dump_config {
        print!("{}", dump_face_config(&config)?);
        return Ok(());
    }

    let clock = match &args.time {
        Some(time) => ClockSource::Fixed(parse_time(time, args.day)?),
        None => ClockSource::System,
    };

    let mut sim = Simulator::new(config, clock);
    sim.start()?;

    for frame in 0..args.frames {
        if args.disconnect_at == Some(frame) {
            info!("Dropping companion link");
            sim.set_connected(false)?;
        }
        if frame > 0 {
            sim.tick()?;
        }
        let report = sim.render_frame()?;
        let roles: Vec<_> = report
            .redrawn
            .iter()
            .filter_map(|&layer| sim.role_of(layer))
            .collect();
        info!("Frame {}: redrew {:?}", frame, roles);
    }
    sim.log_summary();

    if let Some(path) = &args.ppm {
        let size = sim.host().bounds().size;
        write_ppm(path, size.width, size.height, sim.raw_pixels())?;
        info!("Wrote {}", path.display());
    }

    sim.shutdown()?;
    info!("Resources still held after shutdown: {}", sim.host().live_resources());
    Ok(())
}

fn resolve_config(args: &Args) -> Result<FaceConfig, AppError> {
    let platform = if args.round {
        Platform::ROUND
    } else {
        Platform::RECTANGULAR
    };
    let mut config = FaceConfig::for_platform(&platform);

    if let Some(path) = &args.config {
        config = load_face_config(path, config)?;
    }
    if args.minute_ticks {
        config.tick_unit = TickUnit::Minute;
    }
    if args.sweep_hour {
        config.hour_hand = HourHandMode::Sweeping;
    }
    Ok(config)
}

fn parse_time(input: &str, day: u8) -> Result<WallClock, AppError> {
    let invalid = || AppError::Time(input.to_string());
    let fields: Vec<u8> = input
        .split(':')
        .map(|field| field.parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<_, _>>()?;

    match fields.as_slice() {
        &[hour, minute, second] if hour < 24 && minute < 60 && second < 60 => {
            Ok(WallClock::new(hour, minute, second, day))
        }
        _ => Err(invalid()),
    }
}

fn write_ppm(path: &Path, width: u32, height: u32, pixels: &[u16]) -> Result<(), std::io::Error> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{} {}\n255\n", width, height)?;
    for &raw in pixels {
        let color = Rgb888::from(Rgb565::from(RawU16::new(raw)));
        out.write_all(&[color.r(), color.g(), color.b()])?;
    }
    out.flush()
}
