pub mod macros;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use swimbots_core::body::build_body;
use swimbots_core::config::SimConfig;
use swimbots_data::{
    Body, CommonGene, Food, Goal, Pond, SegmentGene, Swimbot, Vec2, SEGMENT_SLOTS,
};

/// Builds a hand-placed pond with an otherwise default configuration.
#[allow(dead_code)]
pub struct PondBuilder {
    config: SimConfig,
    width: f64,
    swimbots: Vec<Option<Swimbot>>,
    food: Vec<Food>,
}

#[allow(dead_code)]
impl PondBuilder {
    pub fn new() -> Self {
        let mut config = SimConfig::default();
        config.pond.initial_population = 0;
        config.pond.initial_food = 0;
        // Keep food drops out of the way unless a test asks for them.
        config.pond.food_frequency = u64::MAX;
        Self {
            config,
            width: 1000.0,
            swimbots: Vec::new(),
            food: Vec::new(),
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self.config.pond.width = width;
        self
    }

    /// Adds a swimbot. Its family is reset to its own index.
    pub fn with_swimbot(mut self, mut bot: Swimbot) -> Self {
        bot.family = vec![self.swimbots.len()];
        self.swimbots.push(Some(bot));
        self
    }

    pub fn with_dead_slot(mut self) -> Self {
        self.swimbots.push(None);
        self
    }

    pub fn with_food(mut self, x: f64, y: f64) -> Self {
        self.food.push(Food::new(x, y));
        self
    }

    pub fn build(self) -> (Pond, SimConfig) {
        let mut pond = Pond::new(self.width);
        pond.swimbots = self.swimbots;
        for food in self.food {
            pond.push_food(food);
        }
        (pond, self.config)
    }
}

/// Builds a single swimbot with a real body.
#[allow(dead_code)]
pub struct SwimbotBuilder {
    position: Vec2,
    velocity: Vec2,
    energy: f64,
    age: f64,
    goal: Goal,
    common: CommonGene,
    genes: [SegmentGene; SEGMENT_SLOTS],
    seed: u64,
}

#[allow(dead_code)]
impl SwimbotBuilder {
    pub fn new() -> Self {
        Self {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(1.0, 0.0),
            energy: 75.0,
            age: 0.0,
            goal: Goal::NoGoal,
            common: CommonGene {
                angular_movement: 0.5,
                translational_movement: 1.0,
                num_segments: 3,
            },
            genes: [SegmentGene::new([128.0, 128.0, 128.0, 0.3, 10.0, 1.0]); SEGMENT_SLOTS],
            seed: 0,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Sets the speed and points the velocity along +x.
    pub fn speed(mut self, speed: f64) -> Self {
        self.common.translational_movement = speed;
        self.velocity = Vec2::new(speed, 0.0);
        self
    }

    pub fn energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    pub fn age(mut self, age: f64) -> Self {
        self.age = age;
        self
    }

    pub fn goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn segments(mut self, count: usize) -> Self {
        self.common.num_segments = count;
        self
    }

    pub fn main_segment_length(mut self, length: f64) -> Self {
        self.genes[0].set_length(length);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Swimbot {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let body = build_body(
            self.position,
            &self.velocity,
            &self.common,
            &self.genes,
            &mut rng,
        )
        .expect("test swimbot body");
        Swimbot {
            goal: self.goal,
            age: self.age,
            energy: self.energy,
            position: self.position,
            velocity: self.velocity,
            acceleration: Vec2::default(),
            mass: 10.0 * self.common.num_segments as f64,
            family: Vec::new(),
            common_gene: self.common,
            segment_genes: self.genes,
            body,
        }
    }
}

/// A small but busy configuration for whole-run tests.
#[allow(dead_code)]
pub fn crowded_config(seed: u64, generations: usize) -> SimConfig {
    let mut config = SimConfig::default();
    config.run.seed = seed;
    config.run.generations = generations;
    config.pond.width = 1200.0;
    config.pond.initial_population = 80;
    config.pond.initial_food = 120;
    config.pond.spawn_margin = 200.0;
    config.pond.food_margin = 100.0;
    config
}

/// Relative tolerance for comparing floats read back from golden files.
#[allow(dead_code)]
pub const GOLDEN_TOLERANCE: f64 = 1e-9;

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64, what: &str) {
    let tolerance = GOLDEN_TOLERANCE * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{}: got {}, expected {}",
        what,
        actual,
        expected
    );
}

/// Same tree shape and gene indices, poses equal within tolerance.
#[allow(dead_code)]
pub fn assert_body_matches(actual: &Body, expected: &Body, context: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: segment count", context);
    for (i, (a, e)) in actual.segments.iter().zip(&expected.segments).enumerate() {
        assert_eq!(a.gene_index, e.gene_index, "{}: gene index of segment {}", context, i);
        assert_eq!(a.children, e.children, "{}: children of segment {}", context, i);
        assert_close(a.position.x, e.position.x, &format!("{}: segment {} x", context, i));
        assert_close(a.position.y, e.position.y, &format!("{}: segment {} y", context, i));
        assert_close(a.angle, e.angle, &format!("{}: segment {} angle", context, i));
    }
}

#[allow(dead_code)]
pub fn assert_swimbot_matches(actual: &Swimbot, expected: &Swimbot, context: &str) {
    assert_eq!(actual.goal, expected.goal, "{}: goal", context);
    assert_eq!(actual.family, expected.family, "{}: family", context);
    assert_eq!(actual.common_gene, expected.common_gene, "{}: common gene", context);
    assert_eq!(actual.segment_genes, expected.segment_genes, "{}: segment genes", context);

    let scalars = [
        ("age", actual.age, expected.age),
        ("energy", actual.energy, expected.energy),
        ("mass", actual.mass, expected.mass),
        ("position.x", actual.position.x, expected.position.x),
        ("position.y", actual.position.y, expected.position.y),
        ("velocity.x", actual.velocity.x, expected.velocity.x),
        ("velocity.y", actual.velocity.y, expected.velocity.y),
        ("acceleration.x", actual.acceleration.x, expected.acceleration.x),
        ("acceleration.y", actual.acceleration.y, expected.acceleration.y),
    ];
    for (name, a, e) in scalars {
        assert_close(a, e, &format!("{}: {}", context, name));
    }
    assert_body_matches(&actual.body, &expected.body, context);
}
