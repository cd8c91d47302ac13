//! Interpreter configuration, loadable from TOML (mirrors the
//! teacher's `core-config` crate pattern). Values default to the
//! standard Scratch stage (480x360) run at 40 Hz.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Upper bound on `tick` calls per second. Not enforced by the
    /// interpreter itself — the caller drives `tick`; kept here
    /// so a host can read it out of the same config file.
    pub frame_rate_hz: u32,
    pub stage_width: f64,
    pub stage_height: f64,
    /// Seed for `pick random` / random list index. `None` uses
    /// `rand`'s default thread-local source.
    pub rng_seed: Option<u64>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self { frame_rate_hz: 40, stage_width: 480.0, stage_height: 360.0, rng_seed: None }
    }
}

impl InterpreterConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_stage_dimensions() {
        let cfg = InterpreterConfig::default();
        assert_eq!(cfg.frame_rate_hz, 40);
        assert_eq!(cfg.stage_width, 480.0);
        assert_eq!(cfg.stage_height, 360.0);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg = InterpreterConfig::from_toml_str("rng_seed = 7\n").unwrap();
        assert_eq!(cfg.rng_seed, Some(7));
        assert_eq!(cfg.frame_rate_hz, 40);
    }
}
