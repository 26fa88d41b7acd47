use crate::{
    banner::BannerGenerator,
    birth_date::BirthDate,
    config::Config,
    hero::{hero_for_month, HEROES},
    navigation::{NavigationEvent, Navigator, Screen},
    progress::{ProgressPlan, ProgressState},
    render::{Terminal, TerminalGuard},
    scene::{DrawCommand, SceneParams, Size},
    screens::{
        prompt_birth_date, LoadingOutcome, LoadingScene, LoadingScreen, ResultAction, ResultView, MAX_SPEED,
    },
};
use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use serde::Serialize;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod animation;
mod banner;
mod birth_date;
mod config;
mod hero;
mod navigation;
mod progress;
mod render;
mod scene;
mod screens;

/// Discover your inner superhero from your birth date
#[derive(Parser, Debug)]
#[command(name = "heroscope", version, about)]
struct Cli {
    /// Birth date as DD/MM/YYYY, skips the prompt
    #[arg(long, value_name = "DD/MM/YYYY")]
    birth_date: Option<BirthDate>,

    /// Path to the configuration file
    #[arg(short, long, env = "HEROSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Playback speed of the loading screen, up to 100
    #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
    speed: f32,

    /// Print the draw commands for the loading screen at this many milliseconds as JSON and exit
    #[arg(long, value_name = "MS")]
    dump_frame: Option<u64>,

    /// Canvas size used by --dump-frame, in logical units
    #[arg(long, value_name = "WxH", default_value = "1080x1920", value_parser = parse_size)]
    size: Size,

    /// Print the hero of every month and exit
    #[arg(long)]
    list_heroes: bool,
}

fn parse_speed(input: &str) -> Result<f32, String> {
    let speed: f32 = input.parse().map_err(|e| format!("invalid speed '{input}': {e}"))?;
    if speed.is_finite() && speed > 0.0 && speed <= MAX_SPEED {
        Ok(speed)
    } else {
        Err(format!("speed must be within (0, {MAX_SPEED}], got {input}"))
    }
}

fn parse_size(input: &str) -> Result<Size, String> {
    let (width, height) = input.split_once(['x', 'X']).ok_or_else(|| format!("expected WxH, got '{input}'"))?;
    let parse = |value: &str| -> Result<f32, String> {
        match value.trim().parse::<f32>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            _ => Err(format!("invalid dimension '{value}' in '{input}'")),
        }
    };
    Ok(Size::new(parse(width)?, parse(height)?))
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "heroscope=warn".into()));
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
            registry.with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false)).init();
        }
        None => registry.with(fmt::layer().with_writer(io::stderr)).init(),
    }
    Ok(())
}

/// A single loading screen frame, as printed by --dump-frame
#[derive(Serialize)]
struct FrameDump<'a> {
    elapsed_ms: u64,
    canvas: Size,
    progress: ProgressState,
    label: &'a str,
    params: SceneParams,
    commands: Vec<DrawCommand>,
}

fn dump_frame<W: Write>(
    scene: &LoadingScene,
    plan: &ProgressPlan,
    elapsed_ms: u64,
    canvas: Size,
    out: W,
) -> anyhow::Result<()> {
    let elapsed = Duration::from_millis(elapsed_ms);
    let progress = plan.state_at(elapsed);
    let params = scene.params(elapsed, &progress);
    let dump = FrameDump {
        elapsed_ms,
        canvas,
        progress,
        label: plan.label(progress.phase_index),
        params,
        commands: scene.commands(&params, canvas),
    };
    serde_json::to_writer_pretty(out, &dump).context("writing frame")?;
    Ok(())
}

fn list_heroes() -> String {
    HEROES
        .iter()
        .map(|hero| format!("{:<10} {:<15} {:<14} {}", hero.month, hero.name, hero.icon, hero.short_description))
        .join("\n")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;
    if cli.list_heroes {
        println!("{}", list_heroes());
        return Ok(());
    }

    let palette = config.palette.palette();
    let clock = config.animation_clock().context("building animations")?;
    let plan = config.progress_plan().context("building loading phases")?;
    let scene = LoadingScene::new(clock, palette.clone(), config.render.logical_width);
    if let Some(elapsed_ms) = cli.dump_frame {
        let mut stdout = io::stdout().lock();
        dump_frame(&scene, &plan, elapsed_ms, cli.size, &mut stdout)?;
        writeln!(stdout)?;
        return Ok(());
    }

    let banners = match BannerGenerator::new() {
        Ok(generator) => Some(generator),
        Err(e) => {
            warn!("hero names will be shown as plain text: {e}");
            None
        }
    };

    let mut navigator = Navigator::default();
    let mut preset = cli.birth_date;
    let mut terminal = Terminal::new(BufWriter::new(io::stdout()));
    let mut guard: Option<TerminalGuard> = None;
    loop {
        let event = match navigator.current() {
            Screen::Input => {
                // the prompt runs on the regular screen
                guard = None;
                let date = match preset.take() {
                    Some(date) => Some(date),
                    None => prompt_birth_date(&mut io::stdin().lock(), &mut io::stdout())?,
                };
                match date {
                    Some(date) => NavigationEvent::DateConfirmed(date.month() as i32),
                    None => NavigationEvent::Abandon,
                }
            }
            Screen::Loading(month) => {
                if guard.is_none() {
                    guard = Some(TerminalGuard::acquire()?);
                    terminal.invalidate();
                }
                let screen = LoadingScreen::new(&scene, config.frame_interval(), cli.speed);
                match screen.run(&mut terminal, plan.clone(), month)? {
                    LoadingOutcome::Finished(month) => NavigationEvent::LoadingFinished(month),
                    LoadingOutcome::Abandoned => NavigationEvent::Abandon,
                }
            }
            Screen::Result(month) => {
                if guard.is_none() {
                    guard = Some(TerminalGuard::acquire()?);
                    terminal.invalidate();
                }
                let view = ResultView::new(hero_for_month(month), &palette, banners.as_ref());
                match view.run(&mut terminal)? {
                    ResultAction::Restart => NavigationEvent::Restart,
                    ResultAction::Exit => NavigationEvent::Abandon,
                }
            }
            Screen::Exited => break,
        };
        navigator.dispatch(event);
    }
    drop(guard);
    info!("bye");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        animation::AnimationClock,
        progress::{default_phases, PhaseTimings},
        scene::Palette,
    };
    use rstest::rstest;

    #[rstest]
    #[case::portrait("1080x1920", Size::new(1080.0, 1920.0))]
    #[case::uppercase(" 400X300 ", Size::new(400.0, 300.0))]
    fn sizes(#[case] input: &str, #[case] expected: Size) {
        assert_eq!(parse_size(input.trim()), Ok(expected));
    }

    #[rstest]
    #[case::no_separator("1080")]
    #[case::zero("0x100")]
    #[case::negative("100x-1")]
    #[case::words("wide x tall")]
    fn bad_sizes(#[case] input: &str) {
        assert!(parse_size(input).is_err());
    }

    #[rstest]
    #[case::normal("1", true)]
    #[case::fast("2.5", true)]
    #[case::zero("0", false)]
    #[case::negative("-1", false)]
    #[case::infinite("inf", false)]
    #[case::max("100", true)]
    #[case::huge("1e30", false)]
    fn speeds(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(parse_speed(input).is_ok(), valid);
    }

    #[test]
    fn cli_arguments() {
        let cli = Cli::try_parse_from(["heroscope", "--birth-date", "24/12/1999", "--speed", "4", "--list-heroes"])
            .expect("parse failed");
        assert_eq!(cli.birth_date.map(|date| date.month()), Some(12));
        assert_eq!(cli.speed, 4.0);
        assert!(cli.list_heroes);
        assert!(Cli::try_parse_from(["heroscope", "--birth-date", "31/02/1999"]).is_err());
    }

    #[test]
    fn frame_dump_is_json() {
        let scene = LoadingScene::new(AnimationClock::default(), Palette::default(), 1080.0);
        let plan = ProgressPlan::new(default_phases(), PhaseTimings::default()).expect("invalid plan");
        let mut out = Vec::new();
        dump_frame(&scene, &plan, 1400, Size::new(1080.0, 1920.0), &mut out).expect("dump failed");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("invalid json");
        assert_eq!(value["elapsed_ms"], 1400);
        assert_eq!(value["label"], "Processing data...");
        assert_eq!(value["commands"][0]["op"], "fill_rect");
        assert_eq!(value["commands"][0]["brush"]["kind"], "radial_gradient");
    }

    #[test]
    fn hero_listing() {
        let listing = list_heroes();
        assert_eq!(listing.lines().count(), 12);
        assert!(listing.starts_with("January    Iron Man"));
    }
}
