//! Level entities and the procedural generator
//!
//! A level is a fixed-width strip: a ground row with periodic pits, clusters
//! of elevated platforms, patrolling monsters, floating pickups, and one
//! goal near the far right end. The whole level is regenerated on every game
//! start; randomness is threaded through an explicit RNG so tests can seed
//! it deterministically.

use rand::Rng;

use super::aabb::Aabb;
use crate::consts::*;

/// A monster walking back and forth over a fixed patrol span.
///
/// Patrollers never react to the player; from the player's point of view
/// each one is just a lethal box at a new position every frame.
#[derive(Debug, Clone)]
pub struct Patroller {
    pub aabb: Aabb,
    /// Left edge of the patrol span
    pub start_x: f32,
    /// Span length; the patroller stays within [start_x, start_x + range]
    pub range: f32,
    pub speed: f32,
    /// +1 walking right, -1 walking left
    pub dir: f32,
}

impl Patroller {
    /// Spawn a patroller anchored at `x` with the given patrol span.
    ///
    /// Speed, initial direction and initial offset are randomized so
    /// patrollers on similar platforms don't move in lockstep.
    pub fn new(rng: &mut impl Rng, x: f32, y: f32, range: f32) -> Self {
        let offset = rng.random_range(0.0..range);
        Self {
            aabb: Aabb::new(x + offset, y, MONSTER_SIZE, MONSTER_SIZE),
            start_x: x,
            range,
            speed: rng.random_range(1.5..3.0),
            dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
        }
    }

    /// Advance one frame, reflecting at the patrol boundaries.
    pub fn step(&mut self) {
        self.aabb.x += self.speed * self.dir;
        if self.aabb.x >= self.start_x + self.range {
            self.aabb.x = self.start_x + self.range;
            self.dir = -1.0;
        } else if self.aabb.x <= self.start_x {
            self.aabb.x = self.start_x;
            self.dir = 1.0;
        }
    }

    #[inline]
    pub fn moving_left(&self) -> bool {
        self.dir < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectibleKind {
    Bean,
    Milk,
}

impl CollectibleKind {
    #[inline]
    pub fn score(self) -> u32 {
        match self {
            CollectibleKind::Bean => BEAN_SCORE,
            CollectibleKind::Milk => MILK_SCORE,
        }
    }

    #[inline]
    pub fn size(self) -> f32 {
        match self {
            CollectibleKind::Bean => BEAN_SIZE,
            CollectibleKind::Milk => MILK_SIZE,
        }
    }
}

/// A pickup hovering over a platform. Removed exactly once, on contact
/// with the player.
#[derive(Debug, Clone)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub aabb: Aabb,
    float_offset: f32,
    float_dir: f32,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            aabb: Aabb::new(x, y, kind.size(), kind.size()),
            float_offset: 0.0,
            float_dir: 1.0,
        }
    }

    /// Advance the bob one frame: a bounded triangle wave.
    pub fn step(&mut self) {
        self.float_offset += FLOAT_STEP * self.float_dir;
        if self.float_offset.abs() > FLOAT_AMPLITUDE {
            self.float_dir = -self.float_dir;
        }
    }

    /// Vertical offset applied at draw time only. The collision box stays
    /// at the base position.
    #[inline]
    pub fn bob(&self) -> f32 {
        self.float_offset
    }
}

/// The playable strip: platforms, monsters, pickups and the goal.
#[derive(Debug, Clone)]
pub struct Level {
    pub platforms: Vec<Aabb>,
    pub patrollers: Vec<Patroller>,
    pub collectibles: Vec<Collectible>,
    pub goal: Aabb,
    pub width: f32,
}

impl Level {
    /// Generate a fresh level for the given viewport height.
    ///
    /// Structure is deterministic (ground row, cluster walk, goal
    /// placement); content is drawn from `rng`. Tests seed a `Pcg32` and
    /// assert structural invariants rather than exact coordinates.
    pub fn generate(rng: &mut impl Rng, viewport_h: f32) -> Self {
        let width = LEVEL_WIDTH;
        let mut platforms = Vec::new();
        let mut patrollers = Vec::new();
        let mut collectibles = Vec::new();

        // Ground row with a pit every PIT_PERIOD tiles
        for i in 0..LEVEL_TILES {
            if i % PIT_PERIOD == 0 {
                continue;
            }
            platforms.push(Aabb::new(
                i as f32 * TILE_SIZE,
                viewport_h - TILE_SIZE,
                TILE_SIZE,
                TILE_SIZE,
            ));
        }

        // Clusters of elevated platforms, walked left to right
        let mut cursor = 500.0;
        while cursor < width - 500.0 {
            cursor += rng.random_range(150.0..350.0);

            let stack_count = rng.random_range(1..=4);
            let cluster_y_offset = rng.random_range(-50.0..50.0);

            for j in 0..stack_count {
                let y = viewport_h - TILE_SIZE - j as f32 * 140.0 - 80.0 + cluster_y_offset;
                if y < 50.0 {
                    break; // rest of the stack would be off-screen
                }

                let w = TILE_SIZE * rng.random_range(2..=5) as f32;
                // Wide scatter keeps stacked platforms from aligning vertically
                let x = cursor + rng.random_range(-150.0..150.0);
                platforms.push(Aabb::new(x, y, w, PLATFORM_HEIGHT));

                if rng.random_bool(0.4) {
                    patrollers.push(Patroller::new(rng, x, y - MONSTER_SIZE, w - MONSTER_SIZE));
                }

                // Milk or a bean run, never both on one platform
                if rng.random_bool(0.2) {
                    let milk_x = x + rng.random_range(0.0..(w - MILK_SIZE));
                    collectibles.push(Collectible::new(CollectibleKind::Milk, milk_x, y - 50.0));
                } else if rng.random_bool(0.7) {
                    let spacing = 40.0;
                    let max_beans = ((w - 20.0) / spacing) as u32;
                    let count = rng.random_range(1..=5).min(max_beans.max(1));
                    let start = x + rng.random_range(0.0..(w - count as f32 * spacing));
                    for b in 0..count {
                        collectibles.push(Collectible::new(
                            CollectibleKind::Bean,
                            start + b as f32 * spacing,
                            y - 50.0,
                        ));
                    }
                }
            }

            // Fixed advance so neighboring clusters never overlap
            cursor += 300.0;
        }

        let goal = Aabb::new(
            width - 100.0,
            viewport_h - TILE_SIZE - GOAL_HEIGHT,
            GOAL_WIDTH,
            GOAL_HEIGHT,
        );

        log::info!(
            "level generated: {} platforms, {} patrollers, {} collectibles",
            platforms.len(),
            patrollers.len(),
            collectibles.len()
        );

        Self {
            platforms,
            patrollers,
            collectibles,
            goal,
            width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEWPORT_H: f32 = 720.0;

    fn generate(seed: u64) -> Level {
        let mut rng = Pcg32::seed_from_u64(seed);
        Level::generate(&mut rng, VIEWPORT_H)
    }

    #[test]
    fn test_ground_row_has_eighty_tiles() {
        let level = generate(1);
        let ground = level
            .platforms
            .iter()
            .filter(|p| p.y == VIEWPORT_H - TILE_SIZE && p.h == TILE_SIZE)
            .count();
        assert_eq!(ground, 80); // 100 tiles minus one pit per 5
    }

    #[test]
    fn test_platforms_stay_on_screen_and_in_bounds() {
        for seed in 0..20 {
            let level = generate(seed);
            for p in &level.platforms {
                assert!(p.y >= 50.0, "seed {seed}: platform above off-screen guard");
                assert!(p.x >= 0.0 && p.x < level.width, "seed {seed}: platform x out of level");
            }
        }
    }

    #[test]
    fn test_goal_sits_on_the_ground_line() {
        let level = generate(3);
        assert_eq!(level.goal.x, LEVEL_WIDTH - 100.0);
        assert_eq!(level.goal.bottom(), VIEWPORT_H - TILE_SIZE);
        assert_eq!(level.goal.w, GOAL_WIDTH);
        assert_eq!(level.goal.h, GOAL_HEIGHT);
    }

    #[test]
    fn test_same_seed_reproduces_the_level() {
        let a = generate(99);
        let b = generate(99);
        assert_eq!(a.platforms.len(), b.platforms.len());
        assert_eq!(a.patrollers.len(), b.patrollers.len());
        assert_eq!(a.collectibles.len(), b.collectibles.len());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_patroller_starts_inside_span_and_stays_there() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut patroller = Patroller::new(&mut rng, 1000.0, 300.0, 120.0);
        assert!(patroller.aabb.x >= 1000.0 && patroller.aabb.x < 1120.0);

        for _ in 0..500 {
            patroller.step();
            assert!(
                patroller.aabb.x >= 1000.0 && patroller.aabb.x <= 1120.0,
                "patroller escaped its span"
            );
        }
    }

    #[test]
    fn test_patroller_reverses_at_boundaries() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut patroller = Patroller::new(&mut rng, 0.0, 0.0, 50.0);
        patroller.aabb.x = 49.0;
        patroller.dir = 1.0;
        patroller.speed = 3.0;

        patroller.step();
        assert_eq!(patroller.aabb.x, 50.0);
        assert_eq!(patroller.dir, -1.0);
    }

    #[test]
    fn test_collectible_bob_is_a_bounded_triangle_wave() {
        let mut bean = Collectible::new(CollectibleKind::Bean, 0.0, 0.0);
        let base = bean.aabb;
        let mut seen_negative = false;
        for _ in 0..100 {
            bean.step();
            assert!(bean.bob().abs() <= FLOAT_AMPLITUDE + FLOAT_STEP);
            seen_negative |= bean.bob() < 0.0;
        }
        assert!(seen_negative, "bob never reversed");
        // The bob never moves the collision box
        assert_eq!(bean.aabb, base);
    }

    #[test]
    fn test_collectible_scores() {
        assert_eq!(CollectibleKind::Bean.score(), 10);
        assert_eq!(CollectibleKind::Milk.score(), 50);
    }
}
