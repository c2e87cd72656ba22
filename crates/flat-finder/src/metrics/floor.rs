use crate::listing::UnitRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Tier thresholds are empirically tuned; confirm with product before changing.

/// Buildings whose occupied levels span at most this many floors are all mid tier.
pub const MIN_TIERED_SPREAD: u32 = 2;
/// Walk-ups up to this height only tier their lowest and highest floor.
pub const LOW_RISE_MAX_LEVEL: u32 = 5;
/// Blocks up to this height use [`MID_RISE_BAND`].
pub const MID_RISE_MAX_LEVEL: u32 = 15;
/// Share of the level range at each end counted as low/high for mid-rise blocks.
pub const MID_RISE_BAND: f64 = 0.30;
/// Share of the level range at each end counted as low/high for taller blocks.
pub const HIGH_RISE_BAND: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorTier {
    Low,
    Mid,
    High,
}

impl FloorTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Mid, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Floor",
            Self::Mid => "Mid Floor",
            Self::High => "High Floor",
        }
    }
}

/// Lowest and highest listed level within one block, plus the block height
/// that picks the threshold bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingSpan {
    pub min_level: u32,
    pub max_level: u32,
    /// Declared storey count when the export carries one, never below `max_level`.
    pub height: u32,
}

impl BuildingSpan {
    pub fn spread(&self) -> u32 {
        self.max_level.saturating_sub(self.min_level)
    }

    /// Tier of `level` relative to this block rather than in absolute terms.
    pub fn tier(&self, level: u32) -> FloorTier {
        let spread = self.spread();
        if spread <= MIN_TIERED_SPREAD {
            return FloorTier::Mid;
        }

        if self.height <= LOW_RISE_MAX_LEVEL {
            return if level <= self.min_level {
                FloorTier::Low
            } else if level >= self.max_level {
                FloorTier::High
            } else {
                FloorTier::Mid
            };
        }

        let band_share = if self.height <= MID_RISE_MAX_LEVEL {
            MID_RISE_BAND
        } else {
            HIGH_RISE_BAND
        };
        let band = f64::from(spread) * band_share;
        let level = f64::from(level);

        if level <= f64::from(self.min_level) + band {
            FloorTier::Low
        } else if level >= f64::from(self.max_level) - band {
            FloorTier::High
        } else {
            FloorTier::Mid
        }
    }
}

/// Level spans per (project, block), built from a reference record set.
#[derive(Debug, Clone, Default)]
pub struct FloorTierIndex {
    spans: HashMap<(String, String), BuildingSpan>,
}

impl FloorTierIndex {
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a UnitRecord>,
    {
        let mut spans: HashMap<(String, String), BuildingSpan> = HashMap::new();
        for record in records {
            let Some(level) = record.floor_level else {
                continue;
            };
            let height = record.max_floor_level.unwrap_or(level).max(level);
            spans
                .entry(building_key(record))
                .and_modify(|span| {
                    span.min_level = span.min_level.min(level);
                    span.max_level = span.max_level.max(level);
                    span.height = span.height.max(height);
                })
                .or_insert(BuildingSpan {
                    min_level: level,
                    max_level: level,
                    height,
                });
        }
        Self { spans }
    }

    pub fn span_of(&self, record: &UnitRecord) -> Option<BuildingSpan> {
        self.spans.get(&building_key(record)).copied()
    }

    /// `None` when the record has no level or its block is not in the index.
    pub fn tier_of(&self, record: &UnitRecord) -> Option<FloorTier> {
        let level = record.floor_level?;
        self.span_of(record).map(|span| span.tier(level))
    }
}

fn building_key(record: &UnitRecord) -> (String, String) {
    (
        record.project.trim().to_string(),
        record.block.trim().to_string(),
    )
}
