use std::path::PathBuf;

use thiserror::Error;

use super::gameplay::Variant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CliOptions {
    pub(crate) config: Option<PathBuf>,
    pub(crate) level: Option<PathBuf>,
    pub(crate) variant: Option<Variant>,
    pub(crate) script: Option<PathBuf>,
    pub(crate) quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CliCommand {
    Run(CliOptions),
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CliError {
    #[error("missing value for {flag}")]
    MissingValue { flag: &'static str },
    #[error("invalid --variant value '{value}' (expected bounded_camera, torus or bounded_static)")]
    UnknownVariant { value: String },
    #[error("unknown argument '{arg}'")]
    UnknownArgument { arg: String },
}

pub(crate) fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: IntoIterator<Item = String>,
{
    let args = args.into_iter().collect::<Vec<_>>();
    let mut options = CliOptions::default();
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "--config" => {
                options.config = Some(PathBuf::from(flag_value(&args, index, "--config")?));
                index += 2;
            }
            "--level" => {
                options.level = Some(PathBuf::from(flag_value(&args, index, "--level")?));
                index += 2;
            }
            "--script" => {
                options.script = Some(PathBuf::from(flag_value(&args, index, "--script")?));
                index += 2;
            }
            "--variant" => {
                let value = flag_value(&args, index, "--variant")?;
                let variant = Variant::parse(value).ok_or_else(|| CliError::UnknownVariant {
                    value: value.to_string(),
                })?;
                options.variant = Some(variant);
                index += 2;
            }
            "--quiet" => {
                options.quiet = true;
                index += 1;
            }
            other => {
                return Err(CliError::UnknownArgument {
                    arg: other.to_string(),
                })
            }
        }
    }
    Ok(CliCommand::Run(options))
}

fn flag_value<'a>(
    args: &'a [String],
    index: usize,
    flag: &'static str,
) -> Result<&'a str, CliError> {
    args.get(index + 1)
        .map(String::as_str)
        .ok_or(CliError::MissingValue { flag })
}

pub(crate) fn usage_text() -> String {
    [
        "tilewalk - headless tile movement demo",
        "",
        "Usage:",
        "  tilewalk [--config <file>] [--level <file>] [--variant <name>] [--script <file>] [--quiet]",
        "",
        "Variants:",
        "  bounded_camera  fixed edges, camera follows the player (default)",
        "  torus           wrap-around map, camera follows the player",
        "  bounded_static  fixed edges, no camera",
        "",
        "Input (one frame per line, from --script or stdin):",
        "  w/up/k  s/down/j  a/left/h  d/right/l  q/quit",
        "",
        "Environment:",
        "  TILEWALK_ROOT  project root holding assets/levels/map.txt",
        "  RUST_LOG       log filter (default info)",
    ]
    .join("\n")
}
