//! Particle Decoration - Randomized floating particles.
//!
//! Fills the `.particles` container with square particle elements whose
//! position, size and animation timing are randomized inline styles; the
//! stylesheet owns the actual float animation. A seeded generator makes
//! the layout reproducible.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::page::Page;
use crate::types::Cleanup;

/// Class of the container to fill.
pub const CONTAINER_CLASS: &str = "particles";

/// Class applied to every generated particle.
pub const PARTICLE_CLASS: &str = "particle";

// =============================================================================
// Config
// =============================================================================

/// Particle tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Number of particles to generate.
    pub count: usize,
    /// Seed for the style randomizer. None draws from thread-local entropy.
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 20,
            seed: None,
        }
    }
}

// =============================================================================
// Initialization
// =============================================================================

/// Generate particles into the container. Returns None when no
/// `.particles` element exists; the cleanup removes the generated
/// elements.
pub fn init_particles(page: &Page, config: ParticleConfig) -> Option<Cleanup> {
    let container = page
        .elements_with_class(CONTAINER_CLASS)
        .into_iter()
        .next()?;
    debug!(container, count = config.count, "particle behavior wired");

    let mut rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let mut created = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let particle = page.create_element("div");
        page.add_class(particle, PARTICLE_CLASS);
        page.append_child(container, particle);

        let size = 2.0 + rng.f64() * 4.0;
        page.set_style(particle, "left", &format!("{:.2}%", rng.f64() * 100.0));
        page.set_style(
            particle,
            "animation-duration",
            &format!("{:.2}s", 8.0 + rng.f64() * 12.0),
        );
        page.set_style(
            particle,
            "animation-delay",
            &format!("{:.2}s", rng.f64() * 10.0),
        );
        page.set_style(particle, "width", &format!("{size:.2}px"));
        page.set_style(particle, "height", &format!("{size:.2}px"));
        created.push(particle);
    }

    let page = page.clone();
    Some(Box::new(move || {
        for particle in created {
            page.remove_element(particle);
        }
    }))
}

// =============================================================================
// Tests
// =============================================================================
