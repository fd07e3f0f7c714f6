//! Falling-petal particle field.
//!
//! A fixed pool of petals drifting down through the stage for atmosphere.
//! No physics, no collisions, no interaction with the visual groups: each
//! petal falls at its own speed, tumbles, sways on a per-petal clock, and
//! wraps back to the top once it drops below the floor. The pool is seeded
//! deterministically, so a given seed always produces the same field.

use glam::Vec3;
use serde::{Deserialize, Serialize};

fn default_count() -> usize {
    300
}
fn default_seed() -> u64 {
    0
}

/// Tuning for the petal field. Speeds are per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetalConfig {
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Half-extents of the spawn volume around the origin.
    #[serde(default = "PetalConfig::default_spread")]
    pub spread: Vec3,
    /// Fall speed range [min, max] in world units per second.
    #[serde(default = "PetalConfig::default_fall_speed")]
    pub fall_speed: [f32; 2],
    /// Maximum tumble rate magnitude in radians per second.
    #[serde(default = "PetalConfig::default_spin")]
    pub spin: f32,
    /// Lateral sway displacement amplitude.
    #[serde(default = "PetalConfig::default_sway_amplitude")]
    pub sway_amplitude: f32,
    /// Sway clock rate in radians per second.
    #[serde(default = "PetalConfig::default_sway_rate")]
    pub sway_rate: f32,
    /// Petals wrap to this height...
    #[serde(default = "PetalConfig::default_ceiling")]
    pub ceiling: f32,
    /// ...once they fall below this one.
    #[serde(default = "PetalConfig::default_floor")]
    pub floor: f32,
}

impl PetalConfig {
    fn default_spread() -> Vec3 {
        Vec3::new(10.0, 15.0, 5.0)
    }
    fn default_fall_speed() -> [f32; 2] {
        [1.2, 4.2]
    }
    fn default_spin() -> f32 {
        3.0
    }
    fn default_sway_amplitude() -> f32 {
        0.5
    }
    fn default_sway_rate() -> f32 {
        0.6
    }
    fn default_ceiling() -> f32 {
        15.0
    }
    fn default_floor() -> f32 {
        -15.0
    }
}

impl Default for PetalConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            seed: default_seed(),
            spread: Self::default_spread(),
            fall_speed: Self::default_fall_speed(),
            spin: Self::default_spin(),
            sway_amplitude: Self::default_sway_amplitude(),
            sway_rate: Self::default_sway_rate(),
            ceiling: Self::default_ceiling(),
            floor: Self::default_floor(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Petal {
    /// Drift anchor; only y mutates as the petal falls.
    anchor: Vec3,
    fall_speed: f32,
    spin_speed: f32,
    rotation: Vec3,
    sway_clock: f32,
}

/// Render-ready petal state for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetalInstance {
    pub position: Vec3,
    pub rotation: Vec3,
}

/// The petal pool. Count is fixed for the lifetime of the field.
#[derive(Debug, Clone)]
pub struct PetalField {
    config: PetalConfig,
    petals: Vec<Petal>,
}

impl PetalField {
    pub fn new(config: PetalConfig) -> Self {
        let mut rng = XorShift64::new(config.seed);
        let petals = (0..config.count)
            .map(|_| {
                let anchor = Vec3::new(
                    (rng.next_f32() - 0.5) * 2.0 * config.spread.x,
                    (rng.next_f32() - 0.5) * 2.0 * config.spread.y,
                    (rng.next_f32() - 0.5) * 2.0 * config.spread.z,
                );
                let fall_speed = config.fall_speed[0]
                    + rng.next_f32() * (config.fall_speed[1] - config.fall_speed[0]);
                let spin_speed = (rng.next_f32() - 0.5) * 2.0 * config.spin;
                Petal {
                    anchor,
                    fall_speed,
                    spin_speed,
                    rotation: Vec3::ZERO,
                    sway_clock: rng.next_f32() * 100.0,
                }
            })
            .collect();
        Self { config, petals }
    }

    pub fn len(&self) -> usize {
        self.petals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.petals.is_empty()
    }

    /// Rebuild the field from its seed, restoring the initial layout.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Advance every petal by `dt` seconds: fall, tumble, tick the sway
    /// clock, wrap at the floor. A skipped frame costs nothing but a
    /// visual hitch.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        for petal in &mut self.petals {
            petal.sway_clock += self.config.sway_rate * dt;
            petal.anchor.y -= petal.fall_speed * dt;
            if petal.anchor.y < self.config.floor {
                petal.anchor.y = self.config.ceiling;
            }
            petal.rotation += Vec3::splat(petal.spin_speed * dt);
        }
    }

    /// Current render instances. Sway is a read-out of the sway clock, not
    /// accumulated state: calling this twice gives identical results.
    pub fn instances(&self) -> Vec<PetalInstance> {
        self.petals
            .iter()
            .map(|petal| {
                let sway_x = petal.sway_clock.sin() * self.config.sway_amplitude;
                let sway_z = (petal.sway_clock * 0.8).cos() * self.config.sway_amplitude;
                PetalInstance {
                    position: Vec3::new(
                        petal.anchor.x + sway_x,
                        petal.anchor.y,
                        petal.anchor.z + sway_z,
                    ),
                    rotation: petal.rotation,
                }
            })
            .collect()
    }
}

/// xorshift64; seed 0 is degenerate (all zeros forever) so it falls back to
/// a fixed non-zero seed.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x5DEECE66D } else { seed },
        }
    }

    fn next_f32(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        (self.state as f32) / (u64::MAX as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_is_constant() {
        let mut field = PetalField::new(PetalConfig::default());
        assert_eq!(field.len(), 300);

        for _ in 0..1000 {
            field.update(1.0 / 60.0);
        }
        assert_eq!(field.len(), 300);
    }

    #[test]
    fn test_petals_stay_in_vertical_band() {
        let config = PetalConfig::default();
        let mut field = PetalField::new(config);

        for _ in 0..2000 {
            field.update(1.0 / 60.0);
            for instance in field.instances() {
                assert!(
                    instance.position.y >= config.floor && instance.position.y <= config.ceiling,
                    "petal escaped the band: y = {}",
                    instance.position.y
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = PetalConfig {
            seed: 42,
            ..Default::default()
        };
        let mut a = PetalField::new(config);
        let mut b = PetalField::new(config);

        for _ in 0..60 {
            a.update(1.0 / 60.0);
            b.update(1.0 / 60.0);
        }
        assert_eq!(a.instances(), b.instances());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = PetalField::new(PetalConfig {
            seed: 1,
            ..Default::default()
        });
        let b = PetalField::new(PetalConfig {
            seed: 2,
            ..Default::default()
        });
        assert_ne!(a.instances(), b.instances());
    }

    #[test]
    fn test_seed_zero_is_not_degenerate() {
        let field = PetalField::new(PetalConfig {
            seed: 0,
            count: 2,
            ..Default::default()
        });
        let instances = field.instances();
        assert_ne!(instances[0].position.x, instances[1].position.x);
    }

    #[test]
    fn test_instances_readout_is_pure() {
        let mut field = PetalField::new(PetalConfig::default());
        field.update(0.3);
        assert_eq!(field.instances(), field.instances());
    }

    #[test]
    fn test_reset_restores_initial_layout() {
        let mut field = PetalField::new(PetalConfig {
            seed: 7,
            ..Default::default()
        });
        let initial = field.instances();

        for _ in 0..100 {
            field.update(1.0 / 60.0);
        }
        assert_ne!(field.instances(), initial);

        field.reset();
        assert_eq!(field.instances(), initial);
    }
}
