//! Random (re)initialization of the particle store

use glam::{Vec2, Vec4};
use particle_physics::{Particle, SPAWN_BLUE_MAX, SPAWN_GREEN_MAX, SPAWN_SPEED, WORLD_MAX, WORLD_MIN};
use rand::Rng;

use crate::store::ParticleStore;

/// Random position anywhere in the domain, a red-ish color and a slow random velocity.
pub fn random_particle<R: Rng + ?Sized>(rng: &mut R) -> Particle {
    let position = Vec2::new(
        rng.random_range(WORLD_MIN..=WORLD_MAX),
        rng.random_range(WORLD_MIN..=WORLD_MAX),
    );

    // Red at full intensity, a little green/blue for variation
    let color = Vec4::new(
        1.0,
        rng.random_range(0.0..SPAWN_GREEN_MAX),
        rng.random_range(0.0..SPAWN_BLUE_MAX),
        1.0,
    );

    let velocity = Vec2::new(
        rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
        rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
    );

    Particle::new(position, velocity, color)
}

/// Overwrite every particle in the store.
pub fn randomize<R: Rng + ?Sized>(store: &mut ParticleStore, rng: &mut R) {
    for particle in store.as_mut_slice() {
        *particle = random_particle(rng);
    }
    log::debug!("Randomized {} particles", store.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_randomize_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut store = ParticleStore::new(10_000);
        randomize(&mut store, &mut rng);

        for p in store.iter() {
            let [x, y] = p.position;
            let [dx, dy] = p.velocity;
            let [r, g, b, a] = p.color;

            assert!((-1.0..=1.0).contains(&x) && (-1.0..=1.0).contains(&y));
            assert!((-0.2..=0.2).contains(&dx) && (-0.2..=0.2).contains(&dy));
            assert_eq!(r, 1.0);
            assert_eq!(a, 1.0);
            assert!((0.0..0.4).contains(&g));
            assert!((0.0..0.2).contains(&b));
        }
    }

    #[test]
    fn test_randomize_overwrites_everything() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut store = ParticleStore::new(64);
        randomize(&mut store, &mut rng);

        // Zeroed particles have alpha 0, randomized ones never do
        assert!(store.iter().all(|p| p.color[3] == 1.0));
    }

    #[test]
    fn test_same_seed_same_particles() {
        let mut a = ParticleStore::new(32);
        let mut b = ParticleStore::new(32);
        randomize(&mut a, &mut StdRng::seed_from_u64(42));
        randomize(&mut b, &mut StdRng::seed_from_u64(42));

        assert_eq!(a.as_slice(), b.as_slice());
    }
}
