//! Map stages
//!
//! The map changes shape as the match goes on. A stage is active from its
//! `min_time` until the next stage begins.

/// A map layout threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapStage {
    /// Seconds into the match when this stage begins
    pub min_time: u32,
    pub label: &'static str,
}

pub const MAP_STAGES: [MapStage; 6] = [
    MapStage { min_time: 0, label: "0:00 Match Start" },
    MapStage { min_time: 2 * 60, label: "2:00 Easy Camps & Crates" },
    MapStage { min_time: 5 * 60, label: "5:00 Powerups" },
    MapStage { min_time: 6 * 60, label: "6:00 Medium Camps" },
    MapStage { min_time: 8 * 60, label: "8:00 Hard & Vault Camps" },
    MapStage { min_time: 10 * 60, label: "10:00 Mid-Boss & Soul Urn" },
];

/// Index of the last stage whose `min_time` has been reached
pub fn stage_index(elapsed: f64) -> usize {
    MAP_STAGES
        .iter()
        .rposition(|stage| elapsed >= f64::from(stage.min_time))
        .unwrap_or(0)
}

pub fn current_stage(elapsed: f64) -> &'static MapStage {
    &MAP_STAGES[stage_index(elapsed)]
}
