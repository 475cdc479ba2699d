use std::{fs, path::PathBuf};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use framepick::{
    FfmpegLogLevel, FrameSelection, SamplePolicy, VideoSource, save_selected_frames,
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::SmallRng};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framepick -v input.mp4 -o frames\n  framepick -v input.mp4 -o frames -n 50 -t random --seed 7\n  framepick -v input.mp4 -o frames --progress --json\n  framepick --completions zsh > _framepick";

#[derive(Debug, Parser)]
#[command(
    name = "framepick",
    version,
    about = "Sample still frames from a video and save them as JPEG images",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video path.
    #[arg(short = 'v', long, required_unless_present = "completions")]
    video: Option<PathBuf>,

    /// Output directory for the sampled frames (created if missing).
    #[arg(short = 'o', long, required_unless_present = "completions")]
    output: Option<PathBuf>,

    /// Number of frames to sample.
    #[arg(short = 'n', long, default_value_t = 200)]
    number: u64,

    /// Sampling policy: normal (evenly spaced) or random.
    #[arg(short = 't', long = "type", default_value = "normal", value_name = "POLICY")]
    sample_type: String,

    /// Seed for random sampling. When omitted, a seed is drawn from the OS
    /// and printed so the run can be reproduced. Has no effect with -t normal.
    #[arg(long)]
    seed: Option<u64>,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    /// Print each saved frame path.
    #[arg(long)]
    verbose: bool,

    /// Print a machine-readable JSON summary instead of the normal output.
    #[arg(long)]
    json: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    /// Generate shell completion scripts and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn parse_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "panic" => Some(FfmpegLogLevel::Panic),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" | "warn" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "verbose" => Some(FfmpegLogLevel::Verbose),
        "debug" => Some(FfmpegLogLevel::Debug),
        "trace" => Some(FfmpegLogLevel::Trace),
        _ => None,
    }
}

/// The seed to run with: the requested one (or a fresh draw) for random
/// sampling, none for evenly spaced sampling. Warns when a requested seed
/// is ignored.
fn resolve_seed(policy: SamplePolicy, requested: Option<u64>) -> Option<u64> {
    match policy {
        SamplePolicy::Random => Some(requested.unwrap_or_else(rand::random)),
        SamplePolicy::Even => {
            if requested.is_some() {
                eprintln!(
                    "{} {}",
                    "warning:".yellow().bold(),
                    "--seed has no effect with -t normal".yellow()
                );
            }
            None
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "framepick", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let parsed = parse_log_level(level).ok_or(format!("unsupported --log-level: {level}"))?;
        framepick::set_ffmpeg_log_level(parsed);
    } else {
        // Keep FFmpeg's codec chatter out of normal runs.
        framepick::set_ffmpeg_log_level(FfmpegLogLevel::Error);
    }

    let video = cli.video.as_ref().ok_or("missing required --video")?;
    let output = cli.output.as_ref().ok_or("missing required --output")?;
    let policy: SamplePolicy = cli.sample_type.parse()?;

    fs::create_dir_all(output)?;

    let mut source = VideoSource::open(video)?;
    let total_frames = source.metadata().frame_count;

    if !cli.json {
        println!("Total Frames: {total_frames}");
    }

    let seed = resolve_seed(policy, cli.seed);

    let selection = match seed {
        Some(seed) => {
            eprintln!("Using seed: {seed}");
            let mut rng = SmallRng::seed_from_u64(seed);
            FrameSelection::random(total_frames, cli.number, &mut rng)?
        }
        None => FrameSelection::evenly_spaced(total_frames, cli.number)?,
    };

    let progress_bar = if cli.progress {
        let pb = ProgressBar::new(selection.len() as u64);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        pb.set_style(style.progress_chars("##-"));
        Some(pb)
    } else {
        None
    };

    let written = save_selected_frames(&mut source, &selection, output, |frame_index, path| {
        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
        if cli.verbose {
            eprintln!("saved frame {} -> {}", frame_index, path.display());
        }
    })?;

    if let Some(pb) = progress_bar {
        pb.finish_with_message("done");
    }

    if cli.json {
        let payload = json!({
            "video": video.display().to_string(),
            "output": output.display().to_string(),
            "policy": policy.to_string(),
            "seed": seed,
            "total_frames": total_frames,
            "selected": selection.len(),
            "written": written,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!("Saved {written} frame(s) to {}", output.display()).green()
        );
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use framepick::SamplePolicy;

    use super::{Cli, parse_log_level, resolve_seed};

    #[test]
    fn parse_log_level_aliases() {
        assert!(parse_log_level("quiet").is_some());
        assert!(parse_log_level("WARN").is_some());
        assert!(parse_log_level("warning").is_some());
        assert!(parse_log_level("trace").is_some());
        assert!(parse_log_level("loud").is_none());
    }

    #[test]
    fn short_flags_cover_the_full_contract() {
        let cli = Cli::try_parse_from([
            "framepick", "-v", "in.mp4", "-o", "out", "-n", "50", "-t", "random",
        ])
        .unwrap();
        assert_eq!(cli.video.as_deref(), Some(Path::new("in.mp4")));
        assert_eq!(cli.output.as_deref(), Some(Path::new("out")));
        assert_eq!(cli.number, 50);
        assert_eq!(cli.sample_type, "random");
    }

    #[test]
    fn seed_is_ignored_for_the_even_policy() {
        assert_eq!(resolve_seed(SamplePolicy::Even, Some(7)), None);
        assert_eq!(resolve_seed(SamplePolicy::Random, Some(7)), Some(7));
        assert!(resolve_seed(SamplePolicy::Random, None).is_some());
    }

    #[test]
    fn number_and_type_defaults() {
        let cli = Cli::try_parse_from(["framepick", "-v", "in.mp4", "-o", "out"]).unwrap();
        assert_eq!(cli.number, 200);
        assert_eq!(cli.sample_type, "normal");
        assert!(cli.seed.is_none());
    }

    #[test]
    fn completions_does_not_require_video() {
        let cli = Cli::try_parse_from(["framepick", "--completions", "bash"]).unwrap();
        assert!(cli.video.is_none());
        assert!(cli.completions.is_some());
    }

    #[test]
    fn video_is_required_without_completions() {
        assert!(Cli::try_parse_from(["framepick", "-o", "out"]).is_err());
    }
}
