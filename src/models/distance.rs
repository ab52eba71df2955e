use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::pace::codec::ONE_MILE;

pub const MIN_DISTANCE_M: f64 = 1.0;
pub const MAX_DISTANCE_M: f64 = 100_000_000.0;
pub const MAX_LABEL_LEN: usize = 20;

/// A row in the pace table: the pace is shown as time over `distance_m`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub id: String,
    pub label: String,
    pub distance_m: f64,
    #[serde(default)]
    pub show_ms: bool,
}

impl Distance {
    pub fn new(id: &str, label: &str, distance_m: f64, show_ms: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            distance_m,
            show_ms,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            bail!("Distance id must not be empty");
        }
        let label_len = self.label.chars().count();
        if label_len == 0 || label_len > MAX_LABEL_LEN {
            bail!(
                "Label '{}' must be between 1 and {} characters",
                self.label,
                MAX_LABEL_LEN
            );
        }
        if !(MIN_DISTANCE_M..=MAX_DISTANCE_M).contains(&self.distance_m) {
            bail!(
                "Distance {} is out of range ({}–{} m)",
                self.distance_m,
                MIN_DISTANCE_M,
                MAX_DISTANCE_M
            );
        }
        Ok(())
    }

    pub fn defaults() -> Vec<Distance> {
        vec![
            Distance::new("100m", "100m", 100.0, true),
            Distance::new("1km", "min/km", 1000.0, false),
            Distance::new("1500m", "1500m", 1500.0, false),
            Distance::new("mile", "min/mile", ONE_MILE, false),
            Distance::new("3000m", "3000m", 3000.0, false),
            Distance::new("5km", "5k", 5000.0, false),
            Distance::new("10km", "10k", 10_000.0, false),
            Distance::new("15km", "15k", 15_000.0, false),
        ]
    }

    /// Common race distances offered when adding a row.
    pub fn presets() -> Vec<Distance> {
        vec![
            Distance::new("400m", "400m", 400.0, true),
            Distance::new("800m", "800m", 800.0, true),
            Distance::new("mile-race", "Mile", 1609.0, false),
            Distance::new("half", "Half marathon", 21_097.0, false),
            Distance::new("marathon", "Marathon", 42_195.0, false),
        ]
    }

    pub fn find_preset(name: &str) -> Option<Distance> {
        let wanted = name.to_lowercase();
        Self::presets()
            .into_iter()
            .find(|d| d.id == wanted || d.label.to_lowercase() == wanted)
    }
}

/// Turn a label into an id that doesn't collide with `taken`.
pub fn unique_id(label: &str, taken: &[Distance]) -> String {
    let slug: String = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let base = if slug.is_empty() { "distance".to_string() } else { slug };

    let mut candidate = base.clone();
    let mut n = 2;
    while taken.iter().any(|d| d.id == candidate) {
        candidate = format!("{}-{}", base, n);
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        for d in Distance::defaults() {
            d.validate().unwrap();
        }
        for d in Distance::presets() {
            d.validate().unwrap();
        }
    }

    #[test]
    fn rejects_out_of_range_rows() {
        assert!(Distance::new("x", "x", 0.5, false).validate().is_err());
        assert!(Distance::new("x", "", 100.0, false).validate().is_err());
        assert!(
            Distance::new("x", "a label that is far too long", 100.0, false)
                .validate()
                .is_err()
        );
        assert!(Distance::new("x", "x", 100_000_001.0, false).validate().is_err());
    }

    #[test]
    fn unique_id_appends_a_suffix_on_collision() {
        let taken = Distance::defaults();
        assert_eq!(unique_id("Half Marathon", &taken), "half-marathon");
        assert_eq!(unique_id("100m", &taken), "100m-2");
        assert_eq!(unique_id("!!", &taken), "distance");
    }

    #[test]
    fn presets_match_by_label_or_id() {
        assert_eq!(Distance::find_preset("marathon").unwrap().distance_m, 42_195.0);
        assert_eq!(Distance::find_preset("Half marathon").unwrap().id, "half");
        assert!(Distance::find_preset("ultra").is_none());
    }
}
