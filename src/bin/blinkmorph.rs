use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use blinkmorph::{
    BlinkFrame, BlinkSettings, EyeRig, EyeStyle, Player, PlayerEvent, Pose, RunOpts, RunOutcome,
    ShapeLibrary, StyleProfile, SystemClock, Timeline,
};
use clap::{Parser, Subcommand, ValueEnum};

const CANVAS_WIDTH: f64 = 190.0;
const CANVAS_HEIGHT: f64 = 80.0;
const EYE_SPACING: f64 = 60.0;

#[derive(Parser, Debug)]
#[command(name = "blinkmorph", version)]
struct Cli {
    /// Settings JSON (defaults when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the eye style from the settings.
    #[arg(long, global = true)]
    style: Option<StyleArg>,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dump sampled pose outlines as JSON.
    Shapes(ShapesArgs),
    /// Export the eye pair at one instant as SVG.
    Frame(FrameArgs),
    /// Print the timeline as JSON lines at a fixed rate.
    Trace(TraceArgs),
    /// Print the total run length in seconds.
    Duration,
    /// Play the script in real time, logging state changes.
    Play(PlayArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    V1,
    V2,
}

impl From<StyleArg> for EyeStyle {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::V1 => EyeStyle::V1,
            StyleArg::V2 => EyeStyle::V2,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    V1,
    V2,
    V2High,
}

impl From<ProfileArg> for StyleProfile {
    fn from(p: ProfileArg) -> Self {
        match p {
            ProfileArg::V1 => StyleProfile::V1,
            ProfileArg::V2 => StyleProfile::V2,
            ProfileArg::V2High => StyleProfile::V2_HIGH,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PoseArg {
    Open,
    Sore,
    Closed,
}

impl From<PoseArg> for Pose {
    fn from(p: PoseArg) -> Self {
        match p {
            PoseArg::Open => Pose::Open,
            PoseArg::Sore => Pose::Sore,
            PoseArg::Closed => Pose::Closed,
        }
    }
}

#[derive(Parser, Debug)]
struct ShapesArgs {
    /// Sampling profile (the style's standard profile when omitted).
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,

    /// Only dump this pose.
    #[arg(long, value_enum)]
    pose: Option<PoseArg>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Seconds after playback start.
    #[arg(long)]
    at: f64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Samples per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Cancel the run after this many seconds.
    #[arg(long)]
    cancel_after: Option<f64>,

    /// Multiply every duration (overrides the settings).
    #[arg(long)]
    time_scale: Option<f64>,

    /// Also publish frames at this rate between checkpoints.
    #[arg(long)]
    fps: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = match &cli.config {
        Some(path) => BlinkSettings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => BlinkSettings::default(),
    };
    if let Some(style) = cli.style {
        settings.style = style.into();
    }

    match cli.cmd {
        Command::Shapes(args) => cmd_shapes(&settings, args),
        Command::Frame(args) => cmd_frame(&settings, args),
        Command::Trace(args) => cmd_trace(&settings, args),
        Command::Duration => cmd_duration(&settings),
        Command::Play(args) => cmd_play(settings, args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_shapes(settings: &BlinkSettings, args: ShapesArgs) -> anyhow::Result<()> {
    let profile = args
        .profile
        .map_or_else(|| StyleProfile::standard(settings.style), StyleProfile::from);
    let library = ShapeLibrary::new();
    let shapes = library.shapes_for(&profile);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.pose {
        Some(pose) => serde_json::to_writer_pretty(&mut out, shapes.get(pose.into()))?,
        None => serde_json::to_writer_pretty(&mut out, shapes.as_ref())?,
    }
    writeln!(out)?;
    Ok(())
}

fn cmd_frame(settings: &BlinkSettings, args: FrameArgs) -> anyhow::Result<()> {
    let script = settings.script()?;
    let frame = blinkmorph::sample_at(&script, args.at);
    let rig = EyeRig::with_policy(
        Arc::new(ShapeLibrary::new()),
        settings.style,
        settings.policy(),
    );
    let svg = render_svg(&rig, &frame)?;

    write_file(&args.out, svg.as_bytes())?;
    eprintln!(
        "wrote {} ({} at {:.3}s)",
        args.out.display(),
        frame.state.as_str(),
        args.at
    );
    Ok(())
}

fn render_svg(rig: &EyeRig, frame: &BlinkFrame) -> anyhow::Result<String> {
    let size = rig.reference_size();
    let [left, right] = rig.pair(frame);
    let pair_width = size.width * 2.0 + EYE_SPACING;
    let x0 = (CANVAS_WIDTH - pair_width) / 2.0;
    let y0 = (CANVAS_HEIGHT - size.height) / 2.0 + frame.offset_y;
    let (cx, cy) = (CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" viewBox="0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}">"#
    )?;
    writeln!(
        svg,
        r#"  <g fill="white" opacity="{:.4}" transform="translate({cx} {cy}) scale({:.4}) translate({} {})">"#,
        frame.opacity,
        frame.scale,
        -cx,
        -cy
    )?;
    for (geom, dx) in [(left, x0), (right, x0 + size.width + EYE_SPACING)] {
        writeln!(
            svg,
            r#"    <path transform="translate({dx} {y0})" d="{}"/>"#,
            geom.to_bez_path().to_svg()
        )?;
    }
    writeln!(svg, "  </g>")?;
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

fn cmd_trace(settings: &BlinkSettings, args: TraceArgs) -> anyhow::Result<()> {
    if !args.fps.is_finite() || args.fps <= 0.0 {
        anyhow::bail!("--fps must be > 0 (got {})", args.fps);
    }
    let script = settings.script()?;
    let total = script.total_duration();
    let mut timeline = Timeline::new(&script);
    timeline.start(0.0);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let steps = (total * args.fps).ceil() as u64;
    for i in 0..=steps {
        let t = (i as f64 / args.fps).min(total);
        let frame = timeline.advance(t);
        let line = serde_json::json!({ "t": t, "frame": frame });
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn cmd_duration(settings: &BlinkSettings) -> anyhow::Result<()> {
    let script = settings.script()?;
    println!("{}", script.total_duration());
    Ok(())
}

fn cmd_play(mut settings: BlinkSettings, args: PlayArgs) -> anyhow::Result<()> {
    if let Some(scale) = args.time_scale {
        settings.time_scale = scale;
    }
    let script = settings.script()?;
    let cancel_after = args.cancel_after.map(cancel_delay).transpose()?;
    let opts = RunOpts {
        frame_interval: args.fps.filter(|f| *f > 0.0).map(|f| 1.0 / f),
    };

    let (mut player, rx) = Player::new(Arc::new(SystemClock::new()), opts);
    let session = player.play(&script)?;
    tracing::info!(%session, total = script.total_duration(), "playing");

    let mut cancel_at = cancel_after.and_then(|delay| Instant::now().checked_add(delay));
    let mut last_state = None;
    let outcome = loop {
        let event = match cancel_at {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    tracing::info!(%session, "cancel requested");
                    player.stop();
                    cancel_at = None;
                    continue;
                }
                match rx.recv_timeout(deadline - now) {
                    Ok(event) => event,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break None,
                }
            }
            None => match rx.recv() {
                Ok(event) => event,
                Err(_) => break None,
            },
        };

        match event {
            PlayerEvent::Frame { at, frame, .. } => {
                if last_state != Some(frame.state) {
                    eprintln!("{at:8.3}s  {}", frame.state.as_str());
                    last_state = Some(frame.state);
                }
            }
            PlayerEvent::Finished { outcome, .. } => break Some(outcome),
        }
    };

    match outcome {
        Some(RunOutcome::Completed { at }) => eprintln!("completed at {at:.3}s"),
        Some(RunOutcome::Cancelled { state, at }) => {
            eprintln!("cancelled at {at:.3}s in {}", state.as_str())
        }
        None => anyhow::bail!("playback ended without an outcome"),
    }
    Ok(())
}

fn cancel_delay(secs: f64) -> anyhow::Result<Duration> {
    if !secs.is_finite() || secs < 0.0 {
        anyhow::bail!("--cancel-after must be finite and >= 0 (got {secs})");
    }
    Duration::try_from_secs_f64(secs)
        .with_context(|| format!("--cancel-after {secs} is out of range"))
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write svg '{}'", path.display()))
}
