use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::common::Color;
use crate::error::{IsoPathError, IsoPathResult};

/// Ordered sequence of colors a path's vertices must match in traversal
/// order. Immutable for the duration of a run; colors may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorPattern(Vec<Color>);

impl ColorPattern {
    pub fn new(colors: Vec<Color>) -> Self {
        Self(colors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    /// Task-private copy. Each dispatched task works on its own sequence so
    /// no search can observe another task's state.
    pub fn to_local(&self) -> Vec<Color> {
        self.0.clone()
    }

    pub fn import_json<P: AsRef<Path>>(path: P) -> IsoPathResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let pattern = serde_json::from_reader(reader)?;
        Ok(pattern)
    }
}

impl Display for ColorPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

impl FromStr for ColorPattern {
    type Err = IsoPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(IsoPathError::Pattern("pattern must not be empty".into()));
        }
        let colors = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<Color>()
                    .map_err(|e| IsoPathError::Pattern(format!("bad color {part:?}: {e}")))
            })
            .collect::<IsoPathResult<Vec<_>>>()?;
        Ok(Self(colors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let pattern: ColorPattern = "0, 1,0".parse().unwrap();
        assert_eq!(pattern.colors(), &[0, 1, 0]);
        assert_eq!(pattern.to_string(), "0,1,0");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!("".parse::<ColorPattern>().is_err());
        assert!("1,x".parse::<ColorPattern>().is_err());
    }

    #[test]
    fn test_local_copy_is_independent() {
        let pattern = ColorPattern::new(vec![1, 1, 1]);
        let mut local = pattern.to_local();
        local.pop();
        assert_eq!(pattern.len(), 3);
    }
}
