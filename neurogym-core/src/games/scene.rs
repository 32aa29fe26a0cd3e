//! Scene memory — memorize a scene, answer presence probes.
//!
//! A scene of `objects` distinct items is shown during the preview window.
//! Afterwards the player answers was-it-present probes: every scene object
//! appears once, interleaved with an equal number of absent lures from the
//! same vocabulary. Terminal condition: all probes answered.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::session::GameRules;
use crate::types::{Judgment, ModuleKind};

/// Smallest supported scene size.
pub const MIN_OBJECTS: u32 = 3;
/// Largest supported scene size.
pub const MAX_OBJECTS: u32 = 8;

/// Default memorization window.
const MEMORIZE_MS: u64 = 3000;

/// Object vocabulary scenes are drawn from. Twice [`MAX_OBJECTS`], so a
/// maximum-size scene still has enough absent lures.
const VOCAB: &[&str] = &[
    "lamp", "clock", "vase", "book", "plant", "mug", "mirror", "candle",
    "radio", "globe", "kettle", "frame", "basket", "pillow", "bottle", "brush",
];

/// One presence probe.
#[derive(Debug, Clone, Copy)]
struct Probe {
    object: &'static str,
    present: bool,
}

/// Rules for one scene-memory session.
#[derive(Debug, Clone)]
pub struct SceneRules {
    objects: u32,
    scene: Vec<&'static str>,
    probes: Vec<Probe>,
    pos: usize,
    memorize_ms: u64,
}

impl SceneRules {
    /// Build a scene of `objects ∈ 3..=8` items, deterministic under `seed`.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::InvalidDifficulty`] for an out-of-range
    /// scene size.
    pub fn new(objects: u32, seed: u64) -> Result<Self> {
        super::check_difficulty(ModuleKind::SceneMemory, objects, MIN_OBJECTS, MAX_OBJECTS)?;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut vocab: Vec<&'static str> = VOCAB.to_vec();
        vocab.shuffle(&mut rng);
        let scene: Vec<&'static str> = vocab[..objects as usize].to_vec();
        let lures = &vocab[objects as usize..2 * objects as usize];

        let mut probes: Vec<Probe> = scene
            .iter()
            .map(|&object| Probe {
                object,
                present: true,
            })
            .chain(lures.iter().map(|&object| Probe {
                object,
                present: false,
            }))
            .collect();
        probes.shuffle(&mut rng);

        Ok(Self {
            objects,
            scene,
            probes,
            pos: 0,
            memorize_ms: MEMORIZE_MS,
        })
    }

    /// Override the memorization window (from `TimingConfig`).
    #[must_use]
    pub fn with_memorize_ms(mut self, memorize_ms: u64) -> Self {
        self.memorize_ms = memorize_ms;
        self
    }

    /// The objects shown during the preview.
    #[must_use]
    pub fn scene(&self) -> &[&'static str] {
        &self.scene
    }

    /// The object named by the current probe, if any remain.
    #[must_use]
    pub fn current_probe(&self) -> Option<&'static str> {
        self.probes.get(self.pos).map(|p| p.object)
    }

    /// Whether the current probe's object was in the scene.
    #[must_use]
    pub fn current_expected(&self) -> Option<bool> {
        self.probes.get(self.pos).map(|p| p.present)
    }
}

impl GameRules for SceneRules {
    /// Whether the player believes the probed object was present.
    type Input = bool;

    fn kind(&self) -> ModuleKind {
        ModuleKind::SceneMemory
    }

    fn difficulty(&self) -> u32 {
        self.objects
    }

    fn total_items(&self) -> usize {
        self.probes.len()
    }

    fn preview(&self) -> Option<Duration> {
        Some(Duration::from_millis(self.memorize_ms))
    }

    fn judge(&mut self, answer: &bool, _metrics: &mut SessionMetrics) -> Judgment {
        let Some(expected) = self.current_expected() else {
            return Judgment::Ignored;
        };
        self.pos += 1;
        if *answer == expected {
            Judgment::Correct
        } else {
            Judgment::Wrong
        }
    }

    fn finished(&self, _metrics: &SessionMetrics) -> bool {
        self.pos >= self.probes.len()
    }

    fn details(&self, _metrics: &SessionMetrics) -> serde_json::Map<String, serde_json::Value> {
        let mut map = serde_json::Map::new();
        map.insert("objects".into(), self.objects.into());
        map.insert("probes".into(), (self.probes.len() as u32).into());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::types::Phase;

    #[test]
    fn out_of_range_scene_size_rejected() {
        assert!(SceneRules::new(2, 0).is_err());
        assert!(SceneRules::new(9, 0).is_err());
    }

    #[test]
    fn probes_are_half_present_half_absent() {
        let rules = SceneRules::new(5, 3).expect("rules");
        let present = rules.probes.iter().filter(|p| p.present).count();
        assert_eq!(rules.probes.len(), 10);
        assert_eq!(present, 5);
    }

    #[test]
    fn scene_objects_are_distinct() {
        let rules = SceneRules::new(8, 3).expect("rules");
        let mut names = rules.scene().to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn perfect_recall_completes_with_full_accuracy() {
        let rules = SceneRules::new(4, 19).expect("rules");
        let mut session = Session::new(rules).expect("session");
        session.begin();
        session.reveal();
        while session.phase() == Phase::Active {
            let expected = session.rules().current_expected().expect("probe");
            session.submit(&expected);
        }
        assert_eq!(session.phase(), Phase::Complete);
        assert!((session.outcome().expect("outcome").accuracy - 1.0).abs() < 1e-9);
    }
}
