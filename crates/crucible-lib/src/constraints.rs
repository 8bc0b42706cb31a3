use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Run-length bounds applied during a search.
///
/// A mover must take at least `min_run` steps in a heading before it may turn
/// or stop, and must turn after `max_run` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RunConstraints {
    min_run: u32,
    max_run: u32,
}

impl RunConstraints {
    /// Validate and build a constraint pair.
    pub fn new(min_run: u32, max_run: u32) -> Result<Self> {
        let constraints = Self { min_run, max_run };
        constraints.validate()?;
        Ok(constraints)
    }

    /// At most three steps per heading, turning allowed at any time.
    pub const fn normal() -> Self {
        Self {
            min_run: 1,
            max_run: 3,
        }
    }

    /// Four to ten steps per heading.
    pub const fn ultra() -> Self {
        Self {
            min_run: 4,
            max_run: 10,
        }
    }

    pub fn min_run(&self) -> u32 {
        self.min_run
    }

    pub fn max_run(&self) -> u32 {
        self.max_run
    }

    /// Fail with [`Error::Configuration`] unless `1 <= min_run <= max_run`.
    pub fn validate(&self) -> Result<()> {
        if self.min_run == 0 || self.min_run > self.max_run {
            return Err(Error::Configuration {
                min_run: self.min_run,
                max_run: self.max_run,
            });
        }
        Ok(())
    }

    /// Whether a walk of `run` steps may end here (turn or stop).
    pub fn may_turn(&self, run: u32) -> bool {
        run >= self.min_run
    }

    /// Whether a walk of `run` steps may take one more step straight ahead.
    pub fn may_continue(&self, run: u32) -> bool {
        run < self.max_run
    }

    /// True when every path legal under `other` is also legal under `self`.
    pub fn is_at_least_as_loose_as(&self, other: &RunConstraints) -> bool {
        self.min_run <= other.min_run && self.max_run >= other.max_run
    }

    /// Preset name, if these bounds match one.
    pub fn preset_name(&self) -> Option<&'static str> {
        if *self == Self::normal() {
            Some("normal")
        } else if *self == Self::ultra() {
            Some("ultra")
        } else {
            None
        }
    }
}

impl Default for RunConstraints {
    fn default() -> Self {
        Self::normal()
    }
}

impl fmt::Display for RunConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.preset_name() {
            Some(name) => write!(f, "{name} (runs {}..={})", self.min_run, self.max_run),
            None => write!(f, "runs {}..={}", self.min_run, self.max_run),
        }
    }
}

impl FromStr for RunConstraints {
    type Err = String;

    /// Accepts a preset name (`normal`, `ultra`) or `MIN..=MAX` / `MIN-MAX`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => return Ok(Self::normal()),
            "ultra" => return Ok(Self::ultra()),
            _ => {}
        }

        let (min, max) = s
            .split_once("..=")
            .or_else(|| s.split_once('-'))
            .ok_or_else(|| format!("unknown run constraints '{s}'"))?;
        let min_run = min
            .trim()
            .parse()
            .map_err(|_| format!("invalid minimum run in '{s}'"))?;
        let max_run = max
            .trim()
            .parse()
            .map_err(|_| format!("invalid maximum run in '{s}'"))?;
        RunConstraints::new(min_run, max_run).map_err(|err| err.to_string())
    }
}
