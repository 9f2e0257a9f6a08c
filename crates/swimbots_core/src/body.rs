//! Body builder: turns an expressed genome into a segment tree.
//!
//! Pose convention: the x offset of a segment uses `cos(PI - angle)` while the
//! y offset uses `sin(angle)`. Stored snapshots and fixtures depend on the
//! exact coordinates this produces.

use crate::error::{Result, SimError};
use rand::Rng;
use std::f64::consts::PI;
use swimbots_data::{Body, CommonGene, Segment, SegmentGene, Vec2, SEGMENT_SLOTS};

/// Heading of the main segment derived from a velocity vector.
///
/// `atan(vy / vx)`, shifted by PI when `vx` is negative.
#[must_use]
pub fn root_heading(velocity: &Vec2) -> f64 {
    let angle = (velocity.y / velocity.x).atan();
    if velocity.x < 0.0 {
        angle + PI
    } else {
        angle
    }
}

/// Offset from a segment's center to its attachment point, half its length out.
fn half_extent(angle: f64, length: f64) -> Vec2 {
    Vec2::new(0.5 * length * (PI - angle).cos(), 0.5 * length * angle.sin())
}

/// Pose of a segment with gene `child_gene` attached to `parent`.
///
/// Returns the child's center and absolute angle.
pub fn compute_child_pose(
    parent: &Segment,
    child_gene: usize,
    genes: &[SegmentGene; SEGMENT_SLOTS],
) -> Result<(Vec2, f64)> {
    let parent_gene = genes
        .get(parent.gene_index)
        .ok_or_else(|| SimError::invalid_genome(format!("no gene slot {}", parent.gene_index)))?;
    let gene = genes
        .get(child_gene)
        .ok_or_else(|| SimError::invalid_genome(format!("no gene slot {}", child_gene)))?;

    let angle = parent.angle + gene.angle_to_parent();
    let near = half_extent(parent.angle, parent_gene.length());
    let far = half_extent(angle, gene.length());
    let position = Vec2::new(
        parent.position.x + near.x + far.x,
        parent.position.y + near.y + far.y,
    );

    if position.is_nan() {
        return Err(SimError::non_finite("segment position"));
    }
    Ok((position, angle))
}

/// Builds the segment tree for a swimbot at `position` moving with `velocity`.
///
/// Each segment after the root is attached by a random walk from the root: at
/// a segment with children a coin is drawn (`1` descends into a uniformly
/// drawn child, `0` stops); a leaf always stops.
pub fn build_body<R: Rng>(
    position: Vec2,
    velocity: &Vec2,
    common: &CommonGene,
    genes: &[SegmentGene; SEGMENT_SLOTS],
    rng: &mut R,
) -> Result<Body> {
    if common.num_segments > SEGMENT_SLOTS {
        return Err(SimError::invalid_genome(format!(
            "{} segments requested, only {} gene slots",
            common.num_segments, SEGMENT_SLOTS
        )));
    }

    let mut body = Body::with_root(Segment::new(position, root_heading(velocity), 0));

    for gene_index in 1..common.num_segments {
        let mut current = 0usize;
        loop {
            let children = body.children_of(current);
            if children.is_empty() || rng.gen_range(0..2) == 0 {
                break;
            }
            current = children[rng.gen_range(0..children.len())];
        }

        let (child_position, child_angle) =
            compute_child_pose(&body.segments[current], gene_index, genes)?;
        body.attach(
            current,
            Segment::new(child_position, child_angle, gene_index),
        );
    }

    Ok(body)
}

/// Recomputes every non-root pose from its parent, top-down.
///
/// The root pose must already be up to date.
pub fn reposition_body(body: &mut Body, genes: &[SegmentGene; SEGMENT_SLOTS]) -> Result<()> {
    let mut stack: Vec<usize> = body.children_of(0).iter().rev().copied().collect();
    // Root children start out mapped to 0, which is already their parent.
    let mut parents = vec![0usize; body.len()];

    while let Some(index) = stack.pop() {
        let parent = parents[index];
        let gene_index = body.segments[index].gene_index;
        let (position, angle) = compute_child_pose(&body.segments[parent], gene_index, genes)?;
        let segment = &mut body.segments[index];
        segment.position = position;
        segment.angle = angle;

        for &child in segment.children.iter().rev() {
            parents[child] = index;
            stack.push(child);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat_genes(length: f64, angle: f64) -> [SegmentGene; SEGMENT_SLOTS] {
        [SegmentGene::new([0.0, 0.0, 0.0, angle, length, 1.0]); SEGMENT_SLOTS]
    }

    fn common(num_segments: usize) -> CommonGene {
        CommonGene {
            angular_movement: 0.1,
            translational_movement: 1.0,
            num_segments,
        }
    }

    #[test]
    fn test_root_heading_quadrants() {
        assert!((root_heading(&Vec2::new(1.0, 1.0)) - PI / 4.0).abs() < 1e-12);
        assert!((root_heading(&Vec2::new(-1.0, 1.0)) - 3.0 * PI / 4.0).abs() < 1e-12);
        assert!((root_heading(&Vec2::new(-1.0, -1.0)) - 5.0 * PI / 4.0).abs() < 1e-12);
        assert!((root_heading(&Vec2::new(1.0, -1.0)) + PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_child_pose_uses_mirrored_x() {
        let genes = flat_genes(10.0, 0.0);
        let parent = Segment::new(Vec2::new(100.0, 100.0), 0.0, 0);
        let (position, angle) = compute_child_pose(&parent, 1, &genes).unwrap();
        // cos(PI - 0) = -1, so a heading of zero extends towards -x.
        assert_eq!(angle, 0.0);
        assert!((position.x - 90.0).abs() < 1e-12);
        assert!((position.y - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_child_pose_adds_angle_to_parent() {
        let genes = flat_genes(4.0, PI / 2.0);
        let parent = Segment::new(Vec2::new(0.0, 0.0), 0.0, 0);
        let (position, angle) = compute_child_pose(&parent, 1, &genes).unwrap();
        assert!((angle - PI / 2.0).abs() < 1e-12);
        // parent half: (-2, 0); child half: (0, 2)
        assert!((position.x + 2.0).abs() < 1e-12);
        assert!((position.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_pose_is_fatal() {
        let genes = flat_genes(10.0, 0.0);
        let parent = Segment::new(Vec2::new(0.0, 0.0), f64::NAN, 0);
        assert!(matches!(
            compute_child_pose(&parent, 1, &genes),
            Err(SimError::NonFiniteState { .. })
        ));
    }

    #[test]
    fn test_build_body_has_one_node_per_expressed_gene() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let genes = flat_genes(8.0, 0.3);
        for n in 2..=SEGMENT_SLOTS {
            let body = build_body(
                Vec2::new(50.0, 50.0),
                &Vec2::new(1.0, 0.5),
                &common(n),
                &genes,
                &mut rng,
            )
            .unwrap();
            assert_eq!(body.len(), n);
            let mut indices = body.gene_indices();
            indices.sort_unstable();
            assert_eq!(indices, (0..n).collect::<Vec<_>>());
            assert_eq!(body.root().unwrap().gene_index, 0);
            assert_eq!(body.preorder().len(), n);
        }
    }

    #[test]
    fn test_single_segment_body_is_root_only() {
        let genes = flat_genes(8.0, 0.3);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let body = build_body(
                Vec2::new(1.0, 2.0),
                &Vec2::new(-1.0, 0.0),
                &common(1),
                &genes,
                &mut rng,
            )
            .unwrap();
            assert_eq!(body.len(), 1);
            assert!(!body.root().unwrap().has_children());
            assert_eq!(body.root().unwrap().position, Vec2::new(1.0, 2.0));
        }
    }

    #[test]
    fn test_too_many_segments_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let result = build_body(
            Vec2::default(),
            &Vec2::new(1.0, 0.0),
            &common(SEGMENT_SLOTS + 1),
            &flat_genes(5.0, 0.0),
            &mut rng,
        );
        assert!(matches!(result, Err(SimError::InvalidGenome(_))));
    }

    #[test]
    fn test_reposition_matches_fresh_build() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let (c, genes) = crate::genome::random_genome(&mut rng);
        let mut body = build_body(
            Vec2::new(10.0, 10.0),
            &Vec2::new(2.0, 1.0),
            &c,
            &genes,
            &mut rng,
        )
        .unwrap();
        let expected = body.clone();

        for segment in body.segments.iter_mut().skip(1) {
            segment.position = Vec2::new(-1.0, -1.0);
            segment.angle = 0.0;
        }
        reposition_body(&mut body, &genes).unwrap();
        assert_eq!(body, expected);
    }

    #[test]
    fn test_reposition_follows_translated_root() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let (c, genes) = crate::genome::random_genome(&mut rng);
        let mut body = build_body(
            Vec2::new(10.0, 10.0),
            &Vec2::new(2.0, 1.0),
            &c,
            &genes,
            &mut rng,
        )
        .unwrap();
        let before = body.clone();

        body.root_mut().unwrap().position = Vec2::new(15.0, 7.0);
        reposition_body(&mut body, &genes).unwrap();
        for (old, new) in before.segments.iter().zip(body.segments.iter()) {
            assert!((new.position.x - old.position.x - 5.0).abs() < 1e-9);
            assert!((new.position.y - old.position.y + 3.0).abs() < 1e-9);
            assert_eq!(old.angle, new.angle);
        }
    }
}
