#![deny(unsafe_code)]
//! CLI binary for the backdrop decorative animation system.
//!
//! Subcommands:
//! - `render <animation>` — run an animation N frames, write PNG
//! - `replay <seed-file>` — re-render a run captured in a seed record
//! - `list` — print available animations and palettes

mod error;

use backdrop_animations::{snapshot, AnimationKind};
use backdrop_core::{Animation, Palette, Rgba, Seed, Srgb, Surface};
use clap::{Parser, Subcommand};
use error::CliError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Page mist, cleared under every frame unless overridden.
const DEFAULT_BACKGROUND: &str = "#f5f7fa";

#[derive(Parser)]
#[command(name = "backdrop", about = "Decorative canvas animation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an animation for N frames and write a PNG snapshot.
    Render {
        /// Animation name (e.g. "flow-field").
        animation: String,

        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 560)]
        width: usize,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 560)]
        height: usize,

        /// Number of frames to run.
        #[arg(long, default_value_t = 300)]
        frames: u64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Palette name override (carnival, twilight, ember, mono).
        #[arg(short, long)]
        palette: Option<String>,

        /// Animation parameters as a JSON object string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Also write a numbered snapshot every N frames.
        #[arg(long)]
        every: Option<u64>,

        /// Background cleared under every frame: a hex color or "none".
        #[arg(long, default_value = DEFAULT_BACKGROUND)]
        background: String,
    },
    /// Re-render a run captured in a seed record.
    Replay {
        /// Seed record path (JSON).
        seed_file: PathBuf,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List available animations and palettes.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let animations = AnimationKind::list_animations();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "animations": animations,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Animations:");
                for name in animations {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Render {
            animation,
            width,
            height,
            frames,
            seed,
            palette,
            params,
            output,
            every,
            background,
        } => {
            let mut params: Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            if !params.is_object() {
                return Err(CliError::Input("--params must be a JSON object".into()));
            }
            if let Some(name) = palette {
                Palette::from_name(&name).map_err(|e| CliError::Input(e.to_string()))?;
                if let Value::Object(map) = &mut params {
                    map.insert("palette".to_string(), Value::String(name));
                }
            }
            let background = parse_background(&background)?;
            if every == Some(0) {
                return Err(CliError::Input("--every must be at least 1".into()));
            }

            let mut anim = AnimationKind::from_name(&animation, width, height, seed, &params)?;
            render_frames(&mut anim, width, height, frames, background, every, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "animation": animation,
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {animation} ({width}x{height}, {frames} frames, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
        Command::Replay { seed_file, output } => {
            let text = fs::read_to_string(&seed_file)
                .map_err(|e| CliError::Io(format!("cannot read {}: {e}", seed_file.display())))?;
            let record: Seed = serde_json::from_str(&text)
                .map_err(|e| CliError::Input(format!("invalid seed record: {e}")))?;
            record.validate()?;

            let mut anim = AnimationKind::from_name(
                &record.animation,
                record.width,
                record.height,
                record.seed,
                &record.params,
            )?;
            let background = parse_background(DEFAULT_BACKGROUND)?;
            render_frames(
                &mut anim,
                record.width,
                record.height,
                record.frames,
                background,
                None,
                &output,
            )?;

            if cli.json {
                let info = serde_json::json!({
                    "animation": record.animation,
                    "width": record.width,
                    "height": record.height,
                    "frames": record.frames,
                    "seed": record.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "replayed {} ({}x{}, {} frames, seed {}) -> {}",
                    record.animation,
                    record.width,
                    record.height,
                    record.frames,
                    record.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

/// Runs `frames` frames, clearing the background under each, and writes the
/// final frame as a PNG. With `every = Some(n)`, also writes a numbered
/// snapshot at every n-th frame.
fn render_frames(
    animation: &mut AnimationKind,
    width: usize,
    height: usize,
    frames: u64,
    background: Rgba,
    every: Option<u64>,
    output: &Path,
) -> Result<(), CliError> {
    let mut surface = Surface::new(width, height)?;
    surface.clear(background);
    for frame in 0..frames {
        surface.clear(background);
        animation.tick(&mut surface, frame)?;
        if let Some(n) = every {
            if frame % n == 0 {
                snapshot::write_png(&surface, &numbered_path(output, frame))?;
            }
        }
    }
    snapshot::write_png(&surface, output)?;
    Ok(())
}

/// Inserts the frame number before the extension: `out.png` -> `out_000120.png`.
fn numbered_path(path: &Path, frame: u64) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("frame");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_{frame:06}.{ext}"),
        None => format!("{stem}_{frame:06}"),
    };
    path.with_file_name(name)
}

/// Parses the `--background` flag: a hex color, or "none" for transparent.
fn parse_background(value: &str) -> Result<Rgba, CliError> {
    if value == "none" {
        return Ok(Rgba::TRANSPARENT);
    }
    let color = Srgb::from_hex(value)
        .map_err(|e| CliError::Input(format!("invalid --background: {e}")))?;
    Ok(Rgba::from(color))
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
