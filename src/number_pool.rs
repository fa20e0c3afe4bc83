use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::FPS;

/// Which family of numbers a round's target is drawn from
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum PoolMode {
    #[default]
    #[strum(serialize = "Integers")]
    Integers,
    #[strum(serialize = "Square Roots")]
    SquareRoots,
    #[strum(serialize = "Cube Roots")]
    CubeRoots,
    #[strum(serialize = "Base-2 Logarithm")]
    Log2,
    #[strum(serialize = "Famous Constants")]
    FamousConstants,
    #[strum(serialize = "Random Float")]
    RandomFloat,
}

impl PoolMode {
    pub const ALL: [PoolMode; 6] = [
        PoolMode::Integers,
        PoolMode::SquareRoots,
        PoolMode::CubeRoots,
        PoolMode::Log2,
        PoolMode::FamousConstants,
        PoolMode::RandomFloat,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    /// Next mode in menu order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous mode in menu order, wrapping around
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FamousConstant {
    pub symbol: &'static str,
    pub full_name: &'static str,
    pub value: f64,
}

pub const FAMOUS_CONSTANTS: [FamousConstant; 4] = [
    FamousConstant {
        symbol: "e",
        full_name: "Euler's number",
        value: std::f64::consts::E,
    },
    FamousConstant {
        symbol: "π",
        full_name: "Pi",
        value: std::f64::consts::PI,
    },
    FamousConstant {
        symbol: "φ",
        full_name: "the golden ratio",
        // (sqrt(5) + 1) / 2
        value: 1.618_033_988_749_895,
    },
    FamousConstant {
        symbol: "g",
        full_name: "the standard acceleration of gravity",
        value: 9.80665,
    },
];

/// The raw value drawn for a round, before it is turned into seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Draw {
    Integer(u32),
    SquareRoot(u32),
    CubeRoot(u32),
    Log2(u32),
    /// Index into [`FAMOUS_CONSTANTS`]
    Constant(usize),
    Float(f64),
}

/// A fully evaluated round target
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub draw: Draw,
    /// Target duration in seconds, rounded to three decimals
    pub number_value: f64,
    pub target_frames: u32,
    pub display_text: String,
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Draw a raw value for `mode`. Famous constants listed in `used` are not drawn again
/// unless every entry of the catalog has already been shown.
pub fn draw<R: Rng + ?Sized>(mode: PoolMode, used: &[usize], rng: &mut R) -> Draw {
    match mode {
        PoolMode::Integers => Draw::Integer(rng.gen_range(1..=10)),
        PoolMode::SquareRoots => Draw::SquareRoot(rng.gen_range(1..=100)),
        PoolMode::CubeRoots => Draw::CubeRoot(rng.gen_range(1..=1000)),
        PoolMode::Log2 => {
            // pick the octave first so every magnitude is equally likely
            let k: u32 = rng.gen_range(1..=9);
            Draw::Log2(rng.gen_range(1u32 << k..=1u32 << (k + 1)))
        }
        PoolMode::FamousConstants => {
            let unused: Vec<usize> = (0..FAMOUS_CONSTANTS.len())
                .filter(|idx| !used.contains(idx))
                .collect();
            let idx = if unused.is_empty() {
                rng.gen_range(0..FAMOUS_CONSTANTS.len())
            } else {
                *unused.choose(rng).unwrap_or(&0)
            };
            Draw::Constant(idx)
        }
        PoolMode::RandomFloat => Draw::Float(rng.gen_range(1.0..10.0)),
    }
}

impl Draw {
    /// Unrounded target duration in seconds
    pub fn seconds(&self) -> f64 {
        match *self {
            Draw::Integer(n) => n as f64,
            Draw::SquareRoot(n) => (n as f64).sqrt(),
            Draw::CubeRoot(n) => (n as f64).cbrt(),
            Draw::Log2(n) => (n as f64).log2(),
            Draw::Constant(idx) => FAMOUS_CONSTANTS[idx % FAMOUS_CONSTANTS.len()].value,
            Draw::Float(x) => x,
        }
    }

    pub fn describe(&self) -> String {
        match *self {
            Draw::Integer(n) => n.to_string(),
            Draw::SquareRoot(n) => format!("the square root of {n}"),
            Draw::CubeRoot(n) => format!("the cube root of {n}"),
            Draw::Log2(n) => format!("log2 of {n}"),
            Draw::Constant(idx) => {
                let c = &FAMOUS_CONSTANTS[idx % FAMOUS_CONSTANTS.len()];
                format!("{} ({})", c.symbol, c.full_name)
            }
            Draw::Float(x) => format!("{}", round_to(x, 3)),
        }
    }

    pub fn evaluate(self) -> Round {
        let number_value = round_to(self.seconds(), 3);
        let target_frames = ((number_value * FPS as f64).floor() as u32).max(1);
        Round {
            draw: self,
            number_value,
            target_frames,
            display_text: self.describe(),
        }
    }
}

pub fn generate<R: Rng + ?Sized>(mode: PoolMode, used: &[usize], rng: &mut R) -> Round {
    draw(mode, used, rng).evaluate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn integer_five_is_three_hundred_frames() {
        let round = Draw::Integer(5).evaluate();
        assert_eq!(round.number_value, 5.0);
        assert_eq!(round.target_frames, 300);
        assert_eq!(round.display_text, "5");
    }

    #[test]
    fn log2_of_twelve() {
        let round = Draw::Log2(12).evaluate();
        assert_eq!(round.number_value, 3.585);
        assert_eq!(round.target_frames, 215);
        assert_eq!(round.display_text, "log2 of 12");
    }

    #[test]
    fn root_texts() {
        assert_eq!(
            Draw::SquareRoot(49).evaluate().display_text,
            "the square root of 49"
        );
        assert_eq!(Draw::SquareRoot(49).evaluate().target_frames, 420);
        let cube = Draw::CubeRoot(1000).evaluate();
        assert_eq!(cube.display_text, "the cube root of 1000");
        assert_eq!(cube.number_value, 10.0);
        assert_eq!(cube.target_frames, 600);
    }

    #[test]
    fn constant_text_includes_symbol_and_name() {
        let round = Draw::Constant(1).evaluate();
        assert_eq!(round.display_text, "π (Pi)");
        assert_eq!(round.number_value, 3.142);
        assert_eq!(round.target_frames, 188);
    }

    #[test]
    fn float_text_is_rounded_value() {
        let round = Draw::Float(2.718_281).evaluate();
        assert_eq!(round.display_text, "2.718");
        assert_eq!(round.number_value, 2.718);
    }

    #[test]
    fn every_legal_draw_has_positive_target() {
        let draws = (1..=10)
            .map(Draw::Integer)
            .chain((1..=100).map(Draw::SquareRoot))
            .chain((1..=1000).map(Draw::CubeRoot))
            .chain((2..=1024).map(Draw::Log2))
            .chain((0..FAMOUS_CONSTANTS.len()).map(Draw::Constant))
            .chain([Draw::Float(1.0), Draw::Float(9.9999)]);
        for d in draws {
            let round = d.evaluate();
            assert!(round.number_value > 0.0, "{d:?}");
            assert!(round.target_frames >= 1, "{d:?}");
        }
    }

    #[test]
    fn random_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            match draw(PoolMode::Integers, &[], &mut rng) {
                Draw::Integer(n) => assert!((1..=10).contains(&n)),
                other => panic!("unexpected draw {other:?}"),
            }
            match draw(PoolMode::Log2, &[], &mut rng) {
                Draw::Log2(n) => assert!((2..=1024).contains(&n)),
                other => panic!("unexpected draw {other:?}"),
            }
            match draw(PoolMode::RandomFloat, &[], &mut rng) {
                Draw::Float(x) => assert!((1.0..10.0).contains(&x)),
                other => panic!("unexpected draw {other:?}"),
            }
            let round = generate(PoolMode::CubeRoots, &[], &mut rng);
            assert!(round.target_frames >= 60);
        }
    }

    #[test]
    fn constants_are_drawn_without_replacement() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut used = Vec::new();
            for _ in 0..FAMOUS_CONSTANTS.len() {
                match draw(PoolMode::FamousConstants, &used, &mut rng) {
                    Draw::Constant(idx) => {
                        assert!(!used.contains(&idx), "seed {seed} repeated {idx}");
                        used.push(idx);
                    }
                    other => panic!("unexpected draw {other:?}"),
                }
            }
            used.sort_unstable();
            assert_eq!(used, vec![0, 1, 2, 3]);
        }
    }

    #[test]
    fn exhausted_catalog_still_draws() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = draw(PoolMode::FamousConstants, &[0, 1, 2, 3], &mut rng);
        assert!(matches!(d, Draw::Constant(idx) if idx < 4));
    }

    #[test]
    fn mode_cycling_wraps() {
        assert_eq!(PoolMode::Integers.prev(), PoolMode::RandomFloat);
        assert_eq!(PoolMode::RandomFloat.next(), PoolMode::Integers);
        assert_eq!(PoolMode::Log2.to_string(), "Base-2 Logarithm");
    }
}
