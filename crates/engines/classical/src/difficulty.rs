//! Difficulty presets.
//!
//! A level bundles a move-time budget, a depth cap and an evaluation noise
//! level. Ten levels are built in; a table in the same shape can be loaded
//! from TOML:
//!
//! ```toml
//! [[level]]
//! level = 1
//! name = "Blitz - Novice"
//! description = "Policy-eval only"
//! max_time_ms = 8
//! max_depth = 2
//! risk = 0.7
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use chess_core::SearchConfig;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Swing toward the engine, in centipawns, that counts as an opponent blunder.
pub const BLUNDER_SWING: i32 = 200;
/// Swing toward the opponent that eases the engine's stress.
pub const RECOVERY_SWING: i32 = -100;
/// Upper bound of the adaptive risk.
pub const MAX_ADAPTIVE_RISK: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyLevel {
    pub level: u8,
    pub name: String,
    pub description: String,
    pub max_time_ms: u64,
    pub max_depth: u8,
    #[serde(default)]
    pub risk: f64,
    /// Risk follows the opponent's play through [`AdaptiveRisk`].
    #[serde(default)]
    pub adaptive: bool,
}

impl DifficultyLevel {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::depth_and_time(self.max_depth, Duration::from_millis(self.max_time_ms))
            .with_risk(self.risk)
    }

    fn validate(&self) -> EngineResult<()> {
        let invalid = |reason: &str| EngineError::InvalidLevel {
            level: self.level,
            reason: reason.to_string(),
        };
        if !(0.0..=1.0).contains(&self.risk) {
            return Err(invalid("risk must be within [0, 1]"));
        }
        if self.max_depth == 0 {
            return Err(invalid("max_depth must be at least 1"));
        }
        if self.max_time_ms == 0 {
            return Err(invalid("max_time_ms must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    #[serde(rename = "level")]
    levels: Vec<DifficultyLevel>,
}

impl DifficultyTable {
    pub fn builtin() -> Self {
        let level = |level, name: &str, description: &str, max_time_ms, max_depth, risk| {
            DifficultyLevel {
                level,
                name: name.to_string(),
                description: description.to_string(),
                max_time_ms,
                max_depth,
                risk,
                adaptive: false,
            }
        };
        let mut levels = vec![
            level(1, "Blitz - Novice", "Policy-eval only (~5ms)", 8, 2, 0.7),
            level(2, "Blitz - Casual", "Fast micro-search (~8ms)", 15, 2, 0.4),
            level(3, "Blitz - Strong", "Tactical threat detection", 30, 3, 0.2),
            level(4, "Intermediate", "Respectable club player", 500, 3, 0.1),
            level(5, "Advanced", "Strong club player", 700, 4, 0.0),
            level(6, "Expert", "Very strong, deliberate play", 1000, 4, 0.0),
            level(7, "Master", "Near professional level", 1500, 5, 0.0),
            level(8, "Grandmaster", "Exceptional strategic depth", 2000, 5, 0.0),
            level(9, "Stockfish-Lite", "Max engine strength", 3000, 6, 0.0),
            level(10, "Divine", "Adaptive \"Divine\" mode (AdaptX)", 5000, 8, 0.0),
        ];
        if let Some(divine) = levels.last_mut() {
            divine.adaptive = true;
        }
        Self { levels }
    }

    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let table: Self = toml::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn levels(&self) -> &[DifficultyLevel] {
        &self.levels
    }

    pub fn get(&self, level: u8) -> EngineResult<&DifficultyLevel> {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .ok_or(EngineError::UnknownLevel(level))
    }

    fn validate(&self) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for level in &self.levels {
            level.validate()?;
            if !seen.insert(level.level) {
                return Err(EngineError::InvalidLevel {
                    level: level.level,
                    reason: "defined more than once".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Opponent-tracking risk for adaptive levels.
///
/// Fed the engine's score after each of its searches. A jump of more than
/// [`BLUNDER_SWING`] since the previous search is taken as an opponent
/// blunder and raises stress; a drop below [`RECOVERY_SWING`] lowers it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdaptiveRisk {
    pub blunders: u32,
    pub stress: f64,
}

impl AdaptiveRisk {
    /// Registers the swing from `last` to `current` and returns the new risk.
    pub fn update(&mut self, last: i32, current: i32) -> f64 {
        let swing = current - last;
        if swing > BLUNDER_SWING {
            self.blunders += 1;
            self.stress += 0.2;
        } else if swing < RECOVERY_SWING {
            self.stress = (self.stress - 0.1).max(0.0);
        }
        self.risk()
    }

    pub fn risk(&self) -> f64 {
        (self.stress * 0.5).min(MAX_ADAPTIVE_RISK)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "difficulty_tests.rs"]
mod difficulty_tests;
