//! Run configuration from command-line flags.

use std::time::Duration;

use tern_eval::EvalLimits;
use thiserror::Error;

/// How the driver evaluates programs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub limits: EvalLimits,
    /// Evaluate several files on a thread pool.
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            limits: EvalLimits::UNLIMITED,
            parallel: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("option `{option}` needs a value, as in `{option}=N`")]
    MissingValue { option: &'static str },

    #[error("invalid value `{value}` for `{option}`: expected a non-negative integer")]
    InvalidValue { option: &'static str, value: String },
}

impl RunConfig {
    /// Split `args` into a configuration and the remaining positional
    /// arguments, in order.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<(RunConfig, Vec<String>), ConfigError> {
        let mut config = RunConfig::default();
        let mut positional = Vec::new();

        for arg in args {
            let arg = arg.as_ref();
            if !arg.starts_with("--") {
                positional.push(arg.to_string());
                continue;
            }

            let (option, value) = match arg.split_once('=') {
                Some((option, value)) => (option, Some(value)),
                None => (arg, None),
            };
            match option {
                "--max-depth" => {
                    let depth = numeric("--max-depth", value)?;
                    config.limits = config
                        .limits
                        .with_max_call_depth(usize::try_from(depth).unwrap_or(usize::MAX));
                }
                "--budget" => {
                    config.limits = config.limits.with_call_budget(numeric("--budget", value)?);
                }
                "--timeout-ms" => {
                    let millis = numeric("--timeout-ms", value)?;
                    config.limits = config.limits.with_timeout(Duration::from_millis(millis));
                }
                "--no-parallel" if value.is_none() => config.parallel = false,
                _ => return Err(ConfigError::UnknownOption(arg.to_string())),
            }
        }

        Ok((config, positional))
    }
}

fn numeric(option: &'static str, value: Option<&str>) -> Result<u64, ConfigError> {
    let value = value.ok_or(ConfigError::MissingValue { option })?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        option,
        value: value.to_string(),
    })
}
