//! Procedural particle population generator.
//!
//! [`generate`] produces the whole population in one call: one photo particle
//! per supplied photo reference (in input order, always first), then `count`
//! ornamental particles with randomly drawn kinds, scales, and targets.
//!
//! Regeneration is wholesale: calling the generator again (e.g. after a photo
//! upload) yields an entirely new population with fresh ids — no continuity
//! of identity or position is attempted across regenerations.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::particle::{
    LiveTransform, Particle, ParticleId, ParticleKind,
    DEEP_RED, GOLD, MATTE_GREEN, ORNAMENT_WHITE,
};

// ════════════════════════════════════════════════════════════════════════════
// Geometry constants
// ════════════════════════════════════════════════════════════════════════════

/// Vertical extent of the cone; particles sit in y ∈ [−H/2, H/2].
pub const TREE_HEIGHT: f32 = 15.0;
/// Cone radius at the bottom; narrows linearly to 0 at the top.
pub const BASE_RADIUS: f32 = 6.0;
/// Half-extent of the scatter cube on each axis.
pub const SCATTER_SPREAD: f32 = 25.0;
/// Fixed visual scale of photo particles.
pub const PHOTO_SCALE: f32 = 1.5;

// ════════════════════════════════════════════════════════════════════════════
// generate
// ════════════════════════════════════════════════════════════════════════════

/// Generate `count + photos.len()` particles.
///
/// The first `photos.len()` particles are kind [`ParticleKind::Photo`], one
/// per entry, positionally bound to `photos`.  Remaining kinds are drawn
/// independently: 10 % candy cane, 20 % accent cube, 10 % white ornament
/// sphere, 60 % matte green sphere.
///
/// A `count` of 0 with no photos is legal and yields an empty population.
pub fn generate<R: Rng + ?Sized>(count: usize, photos: &[String], rng: &mut R) -> Vec<Particle> {
    let total = count + photos.len();
    let mut particles = Vec::with_capacity(total);

    for i in 0..total {
        let tree_target = cone_point(rng);
        let scatter_target = Vec3::new(
            rng.random_range(-SCATTER_SPREAD..SCATTER_SPREAD),
            rng.random_range(-SCATTER_SPREAD..SCATTER_SPREAD),
            rng.random_range(-SCATTER_SPREAD..SCATTER_SPREAD),
        );
        let base_rotation = Vec3::new(
            rng.random_range(0.0..PI),
            rng.random_range(0.0..PI),
            0.0,
        );

        let mut kind  = ParticleKind::OrnamentSphere;
        let mut color = MATTE_GREEN;
        let mut scale = rng.random_range(0.2..0.5);
        let mut photo = None;

        if i < photos.len() {
            kind  = ParticleKind::Photo;
            scale = PHOTO_SCALE;
            photo = Some(photos[i].clone());
        } else {
            let roll: f32 = rng.random();
            if roll > 0.9 {
                kind  = ParticleKind::CandyCane;
                color = DEEP_RED;
                scale = rng.random_range(0.3..0.6);
            } else if roll > 0.7 {
                kind  = ParticleKind::AccentCube;
                color = GOLD;
                scale = rng.random_range(0.3..0.6);
            } else if roll > 0.6 {
                color = ORNAMENT_WHITE;
            }
        }

        particles.push(Particle {
            id: ParticleId::fresh(),
            kind,
            color,
            visual_scale: scale,
            base_rotation,
            tree_target,
            scatter_target,
            photo,
            // Everything starts assembled on the tree.
            live: LiveTransform {
                position: tree_target,
                rotation: base_rotation,
                scale,
            },
        });
    }

    particles
}

/// Convenience wrapper seeding a [`StdRng`] — deterministic populations for
/// demos and tests.
pub fn generate_seeded(count: usize, photos: &[String], seed: u64) -> Vec<Particle> {
    generate(count, photos, &mut StdRng::seed_from_u64(seed))
}

// ════════════════════════════════════════════════════════════════════════════
// Cone sampling
// ════════════════════════════════════════════════════════════════════════════

/// Sample a point inside the cone.
///
/// Height is uniform; at each height slice the radial distance uses √U so
/// density is uniform per disk area rather than clustering at the axis.
fn cone_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let y_norm: f32 = rng.random();
    let y = y_norm * TREE_HEIGHT - TREE_HEIGHT / 2.0;
    let ring = BASE_RADIUS * (1.0 - y_norm);
    let angle = rng.random::<f32>() * TAU;
    let r = rng.random::<f32>().sqrt() * ring;
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_list(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("photo://upload-{}", i)).collect()
    }

    #[test]
    fn population_size_is_count_plus_photos() {
        let pop = generate_seeded(150, &photo_list(3), 7);
        assert_eq!(pop.len(), 153);
    }

    #[test]
    fn photos_come_first_in_input_order() {
        let photos = photo_list(4);
        let pop = generate_seeded(20, &photos, 7);
        for (i, url) in photos.iter().enumerate() {
            assert_eq!(pop[i].kind, ParticleKind::Photo);
            assert_eq!(pop[i].photo.as_deref(), Some(url.as_str()));
            assert_eq!(pop[i].visual_scale, PHOTO_SCALE);
        }
        for p in &pop[photos.len()..] {
            assert_ne!(p.kind, ParticleKind::Photo);
            assert!(p.photo.is_none());
        }
    }

    #[test]
    fn empty_input_yields_empty_population() {
        assert!(generate_seeded(0, &[], 7).is_empty());
    }

    #[test]
    fn tree_targets_stay_inside_cone() {
        for p in generate_seeded(500, &[], 11) {
            let t = p.tree_target;
            assert!(t.y.abs() <= TREE_HEIGHT / 2.0 + 1e-4);
            // Recover the height fraction and check the radius bound there.
            let y_norm = (t.y + TREE_HEIGHT / 2.0) / TREE_HEIGHT;
            let allowed = BASE_RADIUS * (1.0 - y_norm);
            let radial = (t.x * t.x + t.z * t.z).sqrt();
            assert!(radial <= allowed + 1e-4, "r={} allowed={}", radial, allowed);
        }
    }

    #[test]
    fn scatter_targets_stay_inside_cube() {
        for p in generate_seeded(500, &[], 13) {
            let s = p.scatter_target;
            for c in [s.x, s.y, s.z] {
                assert!(c.abs() <= SCATTER_SPREAD);
            }
        }
    }

    #[test]
    fn scales_within_expected_ranges() {
        for p in generate_seeded(500, &[], 17) {
            match p.kind {
                ParticleKind::CandyCane | ParticleKind::AccentCube => {
                    assert!(p.visual_scale >= 0.3 && p.visual_scale < 0.6);
                }
                ParticleKind::OrnamentSphere => {
                    assert!(p.visual_scale >= 0.2 && p.visual_scale < 0.5);
                }
                ParticleKind::Photo => unreachable!(),
            }
        }
    }

    #[test]
    fn base_rotation_third_axis_fixed() {
        for p in generate_seeded(100, &[], 19) {
            assert!(p.base_rotation.x >= 0.0 && p.base_rotation.x < PI);
            assert!(p.base_rotation.y >= 0.0 && p.base_rotation.y < PI);
            assert_eq!(p.base_rotation.z, 0.0);
        }
    }

    #[test]
    fn live_transform_starts_on_tree() {
        for p in generate_seeded(50, &photo_list(1), 23) {
            assert_eq!(p.live.position, p.tree_target);
            assert_eq!(p.live.rotation, p.base_rotation);
            assert_eq!(p.live.scale, p.visual_scale);
        }
    }

    #[test]
    fn ids_unique_within_population() {
        let pop = generate_seeded(300, &photo_list(2), 29);
        for (i, a) in pop.iter().enumerate() {
            for b in &pop[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn regeneration_never_reuses_ids() {
        let first = generate_seeded(50, &[], 31);
        let second = generate_seeded(50, &[], 31);
        for a in &first {
            assert!(second.iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn kind_mix_roughly_matches_draw_probabilities() {
        let pop = generate_seeded(4000, &[], 37);
        let canes = pop.iter().filter(|p| p.kind == ParticleKind::CandyCane).count();
        let cubes = pop.iter().filter(|p| p.kind == ParticleKind::AccentCube).count();
        // 10% and 20% nominal; allow a generous band for a seeded draw.
        assert!(canes > 200 && canes < 600, "canes={}", canes);
        assert!(cubes > 500 && cubes < 1100, "cubes={}", cubes);
    }
}
