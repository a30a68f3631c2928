//! Asset manifest and load tracking
//!
//! The host loads every image and reports each one as loaded or failed.
//! A failure is only a warning: the game still starts, just with a broken
//! sprite. Once every asset has settled the game becomes ready.

use crate::sim::RockVariant;

/// Flower sprites used as scenery
pub const FLOWER_ASSETS: [&str; 2] = ["Assets/flower 1.png", "Assets/flower 2.png"];

/// Everything else the page displays
pub const SCENERY_ASSETS: [&str; 7] = [
    "Assets/Platform.png",
    "Assets/cloud 1.png",
    "Assets/cloud 2.png",
    "Assets/cloud 3.png",
    "Assets/cloud-catball.png",
    "Assets/Cloud-liquina.png",
    "Character Sprites /run.gif",
];

/// Full preload list, rocks first
pub fn manifest() -> Vec<&'static str> {
    RockVariant::ALL
        .iter()
        .map(|v| v.asset())
        .chain(FLOWER_ASSETS)
        .chain(SCENERY_ASSETS)
        .collect()
}

/// How an individual asset settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed,
}

/// Tracks per-asset completion
#[derive(Debug, Clone)]
pub struct AssetTracker {
    assets: Vec<(String, AssetStatus)>,
}

impl AssetTracker {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            assets: sources
                .into_iter()
                .map(|s| (s.into(), AssetStatus::Pending))
                .collect(),
        }
    }

    /// Tracker for the game's own manifest
    pub fn for_manifest() -> Self {
        Self::new(manifest())
    }

    /// Record a successful load. Returns true if this completed the set.
    pub fn mark_loaded(&mut self, src: &str) -> bool {
        self.settle(src, AssetStatus::Loaded)
    }

    /// Record a failed load. Returns true if this completed the set.
    pub fn mark_failed(&mut self, src: &str) -> bool {
        self.settle(src, AssetStatus::Failed)
    }

    fn settle(&mut self, src: &str, status: AssetStatus) -> bool {
        let was_settled = self.all_settled();
        match self
            .assets
            .iter_mut()
            .find(|(s, st)| s == src && *st == AssetStatus::Pending)
        {
            Some(entry) => {
                if status == AssetStatus::Failed {
                    log::warn!("Failed to load: {}", src);
                }
                entry.1 = status;
            }
            None => {
                log::debug!("Ignoring settle for unknown or already settled asset {}", src);
                return false;
            }
        }
        let now_settled = self.all_settled();
        if now_settled && !was_settled {
            log::info!("All assets loaded! Game ready to start.");
        }
        now_settled && !was_settled
    }

    pub fn status(&self, src: &str) -> Option<AssetStatus> {
        self.assets.iter().find(|(s, _)| s == src).map(|(_, st)| *st)
    }

    pub fn settled(&self) -> usize {
        self.assets
            .iter()
            .filter(|(_, st)| *st != AssetStatus::Pending)
            .count()
    }

    pub fn total(&self) -> usize {
        self.assets.len()
    }

    pub fn failed(&self) -> usize {
        self.assets
            .iter()
            .filter(|(_, st)| *st == AssetStatus::Failed)
            .count()
    }

    /// Loading-bar fill, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        if self.assets.is_empty() {
            return 1.0;
        }
        self.settled() as f32 / self.total() as f32
    }

    pub fn all_settled(&self) -> bool {
        self.settled() == self.total()
    }

    /// Asset paths, in manifest order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|(s, _)| s.as_str())
    }
}
