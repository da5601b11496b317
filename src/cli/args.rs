/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

use crate::invocation::RawRequest;
use crate::invocation::command::{DEFAULT_EXECUTABLE, DEFAULT_MASK_SCALE};

/// deface-wrap — anonymize faces in a video by delegating to `deface`.
#[derive(Debug, Parser)]
#[command(
    name = "deface-wrap",
    about = "Run the deface face-anonymization tool and relay its result",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub positionals: PositionalArgs,

    /// Path or name of the deface executable.
    #[arg(
        long,
        env = "DEFACE_BIN",
        value_name = "PATH",
        default_value = DEFAULT_EXECUTABLE
    )]
    pub executable: PathBuf,

    /// Scale factor for the mask drawn over each detected face.
    #[arg(
        long,
        value_name = "SCALE",
        default_value_t = DEFAULT_MASK_SCALE,
        value_parser = parse_mask_scale,
        allow_negative_numbers = true
    )]
    pub mask_scale: f64,

    /// Face detection threshold passed as `--thresh` (tool default when omitted).
    #[arg(long, value_name = "T", value_parser = parse_finite)]
    pub thresh: Option<f64>,

    /// Kill the tool if it runs longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the resolved invocation plan without running the tool.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the dry-run plan and errors. Auto-detects: table when TTY, json when piped.
    #[arg(long, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Log verbosity on stderr (-d info, -dd debug, -ddd trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,
}

/// The six required positionals, in order.
#[derive(Debug, Args)]
pub struct PositionalArgs {
    /// Input video path.
    #[arg(value_name = "INPUT")]
    pub input_path: String,

    /// Output video path.
    #[arg(value_name = "OUTPUT")]
    pub output_path: String,

    /// Replacement style passed to --replacewith (blur, solid, none, img, mosaic).
    #[arg(value_name = "MASK_TYPE")]
    pub mask_type: String,

    /// "true" (any case) keeps the audio track; anything else drops it.
    #[arg(value_name = "KEEP_AUDIO")]
    pub keep_audio: String,

    /// Output frame rate (integer).
    #[arg(value_name = "FPS", allow_negative_numbers = true)]
    pub fps: String,

    /// Target resolution. Accepted but not forwarded to the tool.
    #[arg(value_name = "RESOLUTION")]
    pub resolution: String,
}

impl PositionalArgs {
    /// Borrow the positionals for request parsing.
    #[must_use]
    pub fn as_raw(&self) -> RawRequest<'_> {
        RawRequest {
            input_path: &self.input_path,
            output_path: &self.output_path,
            mask_style: &self.mask_type,
            keep_audio: &self.keep_audio,
            fps: &self.fps,
            resolution: &self.resolution,
        }
    }
}

/// A finite floating-point number (rejects `NaN` and infinities).
fn parse_finite(value: &str) -> Result<f64, String> {
    let n: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if n.is_finite() {
        Ok(n)
    } else {
        Err(format!("'{value}' is not a finite number"))
    }
}

/// A finite, strictly positive mask scale.
fn parse_mask_scale(value: &str) -> Result<f64, String> {
    let n = parse_finite(value)?;
    if n > 0.0 {
        Ok(n)
    } else {
        Err(format!("mask scale must be greater than 0, got '{value}'"))
    }
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// Pretty-printed JSON.
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Aligned table (human-readable).
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    const SIX: [&str; 7] = [
        "deface-wrap",
        "in.mp4",
        "out.mp4",
        "blur",
        "true",
        "25",
        "720p",
    ];

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_six_positionals_parse() {
        let cli = Cli::try_parse_from(SIX).unwrap();
        assert_eq!(cli.positionals.input_path, "in.mp4");
        assert_eq!(cli.positionals.resolution, "720p");
        assert!((cli.mask_scale - 1.3).abs() < f64::EPSILON);
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_five_positionals_rejected() {
        let err = Cli::try_parse_from(&SIX[..6]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_seven_positionals_rejected() {
        let mut args = SIX.to_vec();
        args.push("extra");
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_finite() {
        assert!(parse_finite("0.19").is_ok_and(|t| (t - 0.19).abs() < f64::EPSILON));
        for bad in ["NaN", "nan", "inf", "-inf", "infinity", "abc", ""] {
            assert!(parse_finite(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_parse_mask_scale() {
        assert!(parse_mask_scale("1.5").is_ok_and(|s| (s - 1.5).abs() < f64::EPSILON));
        for bad in ["-1.3", "0", "NaN", "inf"] {
            assert!(parse_mask_scale(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_non_finite_options_rejected_by_clap() {
        for (flag, value) in [
            ("--mask-scale", "NaN"),
            ("--mask-scale", "-1"),
            ("--thresh", "inf"),
        ] {
            let mut args = SIX.to_vec();
            args.extend([flag, value]);
            let err = Cli::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{flag} {value}");
        }
    }

    #[test]
    fn test_options_mix_with_positionals() {
        let mut args = SIX.to_vec();
        args.extend(["--dry-run", "--thresh", "0.19", "-dd"]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.dry_run);
        assert!(cli.thresh.is_some_and(|t| (t - 0.19).abs() < f64::EPSILON));
        assert_eq!(cli.debug, 2);
    }
}
