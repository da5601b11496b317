/// Assembly of the external `deface` command line.
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use super::errors::WrapError;
use super::request::InvocationRequest;

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_EXECUTABLE: &str = "deface";

/// Default `--mask-scale` value.
pub const DEFAULT_MASK_SCALE: f64 = 1.3;

/// Settings for the external invocation that do not come from the positionals.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOptions {
    pub executable: PathBuf,
    pub mask_scale: f64,
    /// Detection threshold; `--thresh` is only passed when set.
    pub threshold: Option<f64>,
    /// Upper bound on the child's run time; unbounded when `None`.
    pub timeout: Option<Duration>,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            mask_scale: DEFAULT_MASK_SCALE,
            threshold: None,
            timeout: None,
        }
    }
}

/// A fully assembled external command: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Build the command for `request`.
    ///
    /// Grammar:
    /// `<exe> <input> -o <output> [-k] --replacewith <style> --mask-scale <scale> [--thresh <t>] --ffmpeg-config <json>`
    ///
    /// # Errors
    ///
    /// Returns `WrapError::Serialize` if the ffmpeg config cannot be encoded.
    pub fn build(request: &InvocationRequest, opts: &ToolOptions) -> Result<Self, WrapError> {
        let mut args = vec![
            request.input_path.clone(),
            "-o".to_owned(),
            request.output_path.clone(),
        ];

        if request.keep_audio {
            args.push("-k".to_owned());
        }

        args.extend([
            "--replacewith".to_owned(),
            request.mask_style.clone(),
            "--mask-scale".to_owned(),
            opts.mask_scale.to_string(),
        ]);

        if let Some(thresh) = opts.threshold {
            args.extend(["--thresh".to_owned(), thresh.to_string()]);
        }

        args.extend([
            "--ffmpeg-config".to_owned(),
            request.ffmpeg_config().to_json()?,
        ]);

        Ok(Self {
            program: opts.executable.to_string_lossy().into_owned(),
            args,
        })
    }
}

/// Program and arguments joined by single spaces, unquoted.
impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
