//! Runner configuration.
//!
//! Settings come from environment variables first, then command-line arguments
//! override them:
//!
//! - `SPLT_MOVES`: comma/space separated tile indices (negative counts from the end)
//! - `SPLT_AUTO`: play this many turns with the automatic player instead
//! - `SPLT_SEED`: seed for the automatic player (default 1)
//! - `SPLT_REFILL`: `off` (default) or `top-row`
//! - `SPLT_FORMAT`: `text` (default) or `json`
//!
//! Arguments: `--auto N`, `--seed S`, `--refill POLICY`, `--json`, `--text`;
//! anything else is a move.

use anyhow::{anyhow, bail, Context, Result};

use crate::core::{BoardConfig, RefillPolicy};
use crate::engine::{parse_moves, TileRef, DEMO_MOVES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Where the moves come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveSource {
    List(Vec<TileRef>),
    Auto { turns: usize, seed: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub moves: MoveSource,
    pub board: BoardConfig,
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            moves: MoveSource::List(DEMO_MOVES.to_vec()),
            board: BoardConfig::default(),
            format: OutputFormat::Text,
        }
    }
}

impl RunConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let mut config = Self::default();

        if let Some(moves) = get("SPLT_MOVES") {
            config.moves = MoveSource::List(parse_moves(&moves).context("SPLT_MOVES")?);
        }
        let seed = match get("SPLT_SEED") {
            Some(s) => s.parse().context("SPLT_SEED must be a number")?,
            None => 1,
        };
        if let Some(turns) = get("SPLT_AUTO") {
            let turns = turns.parse().context("SPLT_AUTO must be a number")?;
            config.moves = MoveSource::Auto { turns, seed };
        }
        if let Some(refill) = get("SPLT_REFILL") {
            config.board.refill = parse_refill(&refill)?;
        }
        if let Some(format) = get("SPLT_FORMAT") {
            config.format = OutputFormat::from_str(&format)
                .ok_or_else(|| anyhow!("SPLT_FORMAT must be text or json, got {format:?}"))?;
        }
        Ok(config)
    }

    /// Apply command-line arguments (without the program name)
    pub fn apply_args<I>(mut self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut moves = Vec::new();
        let mut auto: Option<usize> = None;
        let mut seed: Option<u32> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => self.format = OutputFormat::Json,
                "--text" => self.format = OutputFormat::Text,
                "--auto" => {
                    let value = args.next().context("--auto needs a turn count")?;
                    auto = Some(value.parse().context("--auto must be a number")?);
                }
                "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    seed = Some(value.parse().context("--seed must be a number")?);
                }
                "--refill" => {
                    let value = args.next().context("--refill needs a policy")?;
                    self.board.refill = parse_refill(&value)?;
                }
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                _ => moves.extend(parse_moves(&arg)?),
            }
        }

        let env_seed = match self.moves {
            MoveSource::Auto { seed, .. } => seed,
            MoveSource::List(_) => 1,
        };
        if let Some(turns) = auto {
            self.moves = MoveSource::Auto {
                turns,
                seed: seed.unwrap_or(env_seed),
            };
        } else if !moves.is_empty() {
            self.moves = MoveSource::List(moves);
        } else if let (Some(s), MoveSource::Auto { seed, .. }) = (seed, &mut self.moves) {
            *seed = s;
        }
        Ok(self)
    }
}

fn parse_refill(value: &str) -> Result<RefillPolicy> {
    RefillPolicy::from_str(value)
        .ok_or_else(|| anyhow!("refill policy must be off or top-row, got {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_play_the_demo() {
        let config = RunConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.moves, MoveSource::List(DEMO_MOVES.to_vec()));
    }

    #[test]
    fn env_values_are_read() {
        let config = RunConfig::from_lookup(lookup(&[
            ("SPLT_MOVES", "0,1,-2"),
            ("SPLT_REFILL", "top-row"),
            ("SPLT_FORMAT", "JSON"),
            ("SPLT_SEED", " "),
        ]))
        .unwrap();
        assert_eq!(
            config.moves,
            MoveSource::List(vec![TileRef::Index(0), TileRef::Index(1), TileRef::FromEnd(2)])
        );
        assert_eq!(config.board.refill, RefillPolicy::TopRow);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn bad_env_values_are_errors() {
        assert!(RunConfig::from_lookup(lookup(&[("SPLT_REFILL", "sideways")])).is_err());
        assert!(RunConfig::from_lookup(lookup(&[("SPLT_MOVES", "a,b")])).is_err());
        assert!(RunConfig::from_lookup(lookup(&[("SPLT_AUTO", "many")])).is_err());
    }

    #[test]
    fn args_override_env() {
        let config = RunConfig::from_lookup(lookup(&[("SPLT_AUTO", "10"), ("SPLT_SEED", "4")]))
            .unwrap()
            .apply_args(args(&["--json", "2", "-1"]))
            .unwrap();
        assert_eq!(
            config.moves,
            MoveSource::List(vec![TileRef::Index(2), TileRef::FromEnd(1)])
        );
        assert_eq!(config.format, OutputFormat::Json);

        let config = RunConfig::default()
            .apply_args(args(&["--auto", "25", "--seed", "8", "--refill", "top-row"]))
            .unwrap();
        assert_eq!(config.moves, MoveSource::Auto { turns: 25, seed: 8 });
        assert_eq!(config.board.refill, RefillPolicy::TopRow);
    }

    #[test]
    fn seed_arg_reseeds_env_autoplay() {
        let config = RunConfig::from_lookup(lookup(&[("SPLT_AUTO", "10")]))
            .unwrap()
            .apply_args(args(&["--seed", "77"]))
            .unwrap();
        assert_eq!(config.moves, MoveSource::Auto { turns: 10, seed: 77 });
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(RunConfig::default().apply_args(args(&["--fast"])).is_err());
        assert!(RunConfig::default().apply_args(args(&["--auto"])).is_err());
    }
}
