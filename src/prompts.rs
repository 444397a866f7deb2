//! Prompt catalogs and the seeded prompt generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::PROMPT_SUFFIX;

/// Scene descriptions the daily artwork is drawn from.
pub const SCENES: [&str; 20] = [
    "A surreal landscape with floating islands and crystalline waterfalls under a starlit sky",
    "An abstract composition of geometric shapes in vibrant neon colors against a dark background",
    "A peaceful zen garden with cherry blossoms and a traditional stone pagoda at sunset",
    "A futuristic cyberpunk cityscape with glowing neon signs and flying vehicles",
    "An underwater coral reef scene with exotic fish and bioluminescent plants",
    "A magical forest with glowing mushrooms and ethereal creatures in moonlight",
    "A minimalist still life with elegant pottery and soft natural lighting",
    "A cosmic nebula with swirling colors and distant stars in deep space",
    "An art deco inspired cityscape with golden geometric patterns and elegant architecture",
    "A whimsical fairy tale cottage surrounded by enchanted flowers and butterflies",
    "A dramatic mountain landscape with eagles soaring above misty peaks",
    "An elegant ballet dancer captured in motion with flowing fabric and dramatic lighting",
    "A steampunk mechanical garden with brass flowers and clockwork butterflies",
    "A serene lake reflection with autumn trees and a small wooden dock",
    "An ancient temple ruins overgrown with vines in a mystical jungle setting",
    "A modern abstract expressionist painting with bold brushstrokes and vibrant colors",
    "A cozy library scene with floating books and warm golden light streaming through windows",
    "A desert oasis with palm trees and crystal clear water under a purple twilight sky",
    "An ethereal cloud city floating above the earth with bridges made of rainbow light",
    "A vintage train station with steam and warm amber lighting in a nostalgic scene",
];

/// Art styles.
pub const STYLES: [&str; 10] = [
    "oil painting",
    "watercolor",
    "digital art",
    "impressionist style",
    "art nouveau",
    "minimalist",
    "photorealistic",
    "abstract expressionist",
    "surrealist",
    "pop art style",
];

/// Quality adjectives.
pub const ADJECTIVES: [&str; 6] = [
    "stunning",
    "beautiful",
    "masterpiece",
    "highly detailed",
    "award-winning",
    "breathtaking",
];

/// One pick from each catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArtPrompt {
    /// Scene description
    pub scene: &'static str,
    /// Art style
    pub style: &'static str,
    /// Quality adjective
    pub adjective: &'static str,
}

impl ArtPrompt {
    /// The full prompt text sent to the provider.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ArtPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.scene, self.style, self.adjective, PROMPT_SUFFIX
        )
    }
}

/// Picks prompts uniformly from the catalogs. Seed it for reproducible output.
#[derive(Debug)]
pub struct PromptGenerator {
    rng: StdRng,
}

impl PromptGenerator {
    /// Deterministic generator; the same seed yields the same prompt sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when a seed is given, OS-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_os_rng(),
        }
    }

    /// Draws the next prompt.
    pub fn next_prompt(&mut self) -> ArtPrompt {
        ArtPrompt {
            scene: self.pick(&SCENES),
            style: self.pick(&STYLES),
            adjective: self.pick(&ADJECTIVES),
        }
    }

    fn pick(&mut self, catalog: &[&'static str]) -> &'static str {
        catalog[self.rng.random_range(0..catalog.len())]
    }
}
