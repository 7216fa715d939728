//! Mesh primitives for the scene viewer: a procedurally generated capped
//! cylinder plus the static carton, table-pane, and cube shapes.
//!
//! All meshes share one vertex layout (interleaved, tightly packed):
//!   00 : f32[3]  position (model space)
//!   0C : f32[4]  color (RGBA, each channel in [0,1])
//! and index their vertices with u16 triangle lists, three indices per
//! triangle, referencing vertices by insertion order.
//!
//! Invariant: every index is < vertex count. Meshes are built once at
//! startup and never mutated; the viewer uploads them to GPU buffers as-is.

use rand::Rng;

/// One interleaved vertex. Layout must match the pipelines' vertex buffers.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// An immutable triangle mesh in the shared vertex layout.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Index count as the u32 the draw call wants.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Color of the two cap-center vertices; the rims get random per-cap colors.
const CAP_CENTER_COLOR: [f32; 4] = [0.8, 0.9, 0.8, 1.0];

/// Builds a watertight capped cylinder.
///
/// The axis is Z; the caps sit at `z = -length / 2` and `z = +length / 2`.
/// Each cap contributes one center vertex followed by `sectors` rim vertices
/// at `theta_i = 2*pi*i / sectors`, positioned `(r*sin, -r*cos, z)`, so the
/// mesh has exactly `2 * (sectors + 1)` vertices. Rim vertices of a cap all
/// share one random RGB color drawn from `rng`; callers wanting reproducible
/// output pass a seeded generator.
///
/// Indices are emitted as the cap-1 fan, the cap-2 fan, then the lateral
/// ring: `sectors` triangles per fan and `sectors` quads (two triangles
/// each) for the sides, every ring closed by wrapping back to its first rim
/// vertex. Total: `4 * sectors` triangles, all indices in range.
pub fn capped_cylinder<R: Rng + ?Sized>(
    radius: f32,
    length: f32,
    sectors: u16,
    rng: &mut R,
) -> Mesh {
    assert!(sectors >= 3, "a cylinder needs at least 3 sectors");
    assert!(
        2 * (sectors as usize + 1) <= u16::MAX as usize + 1,
        "sector count overflows u16 indices"
    );

    let mut vertices = Vec::with_capacity(2 * (sectors as usize + 1));

    for cap in 0..2u16 {
        let z = -length / 2.0 + cap as f32 * length;
        let rim_color = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>(), 1.0];

        vertices.push(Vertex {
            position: [0.0, 0.0, z],
            color: CAP_CENTER_COLOR,
        });

        for i in 0..sectors {
            let angle = std::f32::consts::TAU * i as f32 / sectors as f32;
            vertices.push(Vertex {
                position: [radius * angle.sin(), -radius * angle.cos(), z],
                color: rim_color,
            });
        }
    }

    let mut indices = Vec::with_capacity(12 * sectors as usize);

    // Cap fans. Rim vertices of cap 1 are 1..=sectors, of cap 2 are
    // sectors+2..=2*sectors+1; the last triangle of each fan wraps back to
    // the cap's first rim vertex.
    for cap in 0..2u16 {
        let center = cap * (sectors + 1);
        for i in 1..=sectors {
            let next = if i == sectors { 1 } else { i + 1 };
            indices.extend_from_slice(&[center, center + i, center + next]);
        }
    }

    // Lateral ring: one quad per sector between corresponding rim vertices,
    // split along the (k1_next, k2) diagonal. The last quad wraps both
    // running indices.
    for i in 0..sectors {
        let k1 = 1 + i;
        let k2 = sectors + 2 + i;
        let (k1_next, k2_next) = if i == sectors - 1 {
            (1, sectors + 2)
        } else {
            (k1 + 1, k2 + 1)
        };

        indices.extend_from_slice(&[k1, k1_next, k2]);
        indices.extend_from_slice(&[k1_next, k2_next, k2]);
    }

    Mesh { vertices, indices }
}

/// The milk-carton body: a pyramid top over a box, with two angled planes
/// and a folded spout. Hand-authored data; positions and colors are fixed.
pub fn carton() -> Mesh {
    #[rustfmt::skip]
    let vertices = vec![
        // Pyramid
        Vertex { position: [ 0.6, -0.5,  -1.1], color: [1.0, 0.0, 0.0, 1.0] },
        Vertex { position: [ 0.6, -0.5,   0.1], color: [0.0, 1.0, 0.0, 1.0] },
        Vertex { position: [-0.6, -0.5,  -1.1], color: [0.0, 0.0, 1.0, 1.0] },
        Vertex { position: [-0.6, -0.5,   0.1], color: [0.5, 0.2, 0.0, 1.0] },
        Vertex { position: [ 0.0, -0.2,  -0.5], color: [0.2, 0.3, 1.0, 1.0] },
        // Box below; shares 0..=3 with the pyramid base
        Vertex { position: [ 0.6, -2.5,  -1.1], color: [0.5, 0.5, 0.8, 1.0] },
        Vertex { position: [ 0.6, -2.5,   0.1], color: [0.9, 1.0, 0.8, 1.0] },
        Vertex { position: [-0.6, -2.5,  -1.1], color: [0.6, 0.9, 0.0, 1.0] },
        Vertex { position: [-0.6, -2.5,   0.2], color: [1.0, 0.8, 0.2, 1.0] },
        // Ridge shared between the two top planes
        Vertex { position: [ 0.5, -0.2,  -0.5], color: [0.2, 0.3, 0.0, 1.0] },
        Vertex { position: [-0.5, -0.2,  -0.5], color: [0.0, 0.2, 0.3, 1.0] },
        // Spout fold
        Vertex { position: [ 0.5, -0.02, -0.5], color: [0.8, 0.4, 0.2, 1.0] },
        Vertex { position: [-0.5, -0.02, -0.5], color: [0.2, 1.0, 1.0, 1.0] },
    ];

    #[rustfmt::skip]
    let indices = vec![
        // Pyramid
        0, 1, 2,
        2, 3, 1,
        1, 4, 3,
        0, 1, 4,
        0, 2, 4,
        2, 3, 4,
        // Box
        8, 6, 3,
        3, 1, 6,
        5, 6, 1,
        1, 0, 5,
        7, 5, 0,
        0, 2, 7,
        8, 7, 2,
        2, 3, 8,
        8, 6, 5,
        5, 7, 8,
        // Planes up to the ridge
        1, 4, 9,
        3, 4, 10,
        0, 4, 9,
        2, 4, 10,
        // Spout
        9, 11, 12,
        10, 12, 9,
    ];

    Mesh { vertices, indices }
}

/// A unit quad in the XY plane, centered at the origin. The table surfaces
/// are two instances of this pane under large anisotropic scales.
pub fn table_pane() -> Mesh {
    #[rustfmt::skip]
    let vertices = vec![
        Vertex { position: [-0.5, -0.5, 0.0], color: [0.45, 0.30, 0.18, 1.0] },
        Vertex { position: [ 0.5, -0.5, 0.0], color: [0.50, 0.34, 0.20, 1.0] },
        Vertex { position: [ 0.5,  0.5, 0.0], color: [0.45, 0.30, 0.18, 1.0] },
        Vertex { position: [-0.5,  0.5, 0.0], color: [0.40, 0.27, 0.16, 1.0] },
    ];

    let indices = vec![0, 1, 2, 2, 3, 0];

    Mesh { vertices, indices }
}

/// A unit cube centered at the origin; the viewer draws it flat white as
/// the light-position marker.
pub fn unit_cube() -> Mesh {
    let white = [1.0, 1.0, 1.0, 1.0];
    let mut vertices = Vec::with_capacity(8);
    for z in [-0.5f32, 0.5] {
        for y in [-0.5f32, 0.5] {
            for x in [-0.5f32, 0.5] {
                vertices.push(Vertex {
                    position: [x, y, z],
                    color: white,
                });
            }
        }
    }

    // Corner index = x-bit + 2*y-bit + 4*z-bit.
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 3,  3, 2, 0, // -z
        4, 6, 7,  7, 5, 4, // +z
        0, 4, 5,  5, 1, 0, // -y
        2, 3, 7,  7, 6, 2, // +y
        0, 2, 6,  6, 4, 0, // -x
        1, 5, 7,  7, 3, 1, // +x
    ];

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    const EPS: f32 = 1e-5;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn assert_indices_in_range(mesh: &Mesh) {
        let n = mesh.vertex_count() as u16;
        for &i in &mesh.indices {
            assert!(i < n, "index {i} out of range for {n} vertices");
        }
    }

    #[test]
    fn cylinder_vertex_and_triangle_counts() {
        for sectors in [3u16, 4, 7, 100] {
            let mesh = capped_cylinder(0.2, 0.2, sectors, &mut rng());
            assert_eq!(mesh.vertex_count(), 2 * (sectors as usize + 1));
            assert_eq!(mesh.triangle_count(), 4 * sectors as usize);
        }
    }

    #[test]
    fn cylinder_counts_for_four_sectors() {
        let mesh = capped_cylinder(1.0, 2.0, 4, &mut rng());
        // 4 triangles per cap fan, then 4 side quads of 2 triangles.
        assert_eq!(mesh.vertex_count(), 10);
        let cap_triangles = 2 * 4;
        let side_triangles = 2 * 4;
        assert_eq!(mesh.triangle_count(), cap_triangles + side_triangles);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn cylinder_indices_all_in_range() {
        let mesh = capped_cylinder(0.2, 0.2, 100, &mut rng());
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn cylinder_rim_vertices_lie_on_the_radius() {
        let radius = 0.35f32;
        let sectors = 100u16;
        let mesh = capped_cylinder(radius, 0.2, sectors, &mut rng());

        for cap in 0..2usize {
            let base = cap * (sectors as usize + 1);
            for i in 1..=sectors as usize {
                let [x, y, z] = mesh.vertices[base + i].position;
                assert!(
                    (x * x + y * y - radius * radius).abs() < EPS,
                    "rim vertex {i} of cap {cap} off the radius"
                );
                let expect_z = if cap == 0 { -0.1 } else { 0.1 };
                assert!((z - expect_z).abs() < EPS);
            }
        }
    }

    #[test]
    fn cylinder_is_watertight() {
        // A closed 2-manifold has every edge shared by exactly two
        // triangles; an open fan or a mis-split quad breaks this.
        let mesh = capped_cylinder(0.2, 0.2, 12, &mut rng());

        let mut edges: HashMap<(u16, u16), u32> = HashMap::new();
        for tri in mesh.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                *edges.entry(key).or_default() += 1;
            }
        }

        for (edge, count) in edges {
            assert_eq!(count, 2, "edge {edge:?} shared by {count} triangles");
        }
    }

    #[test]
    fn cylinder_is_reproducible_for_a_fixed_seed() {
        let a = capped_cylinder(0.2, 0.2, 16, &mut StdRng::seed_from_u64(42));
        let b = capped_cylinder(0.2, 0.2, 16, &mut StdRng::seed_from_u64(42));

        assert_eq!(a.indices, b.indices);
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.position, vb.position);
            assert_eq!(va.color, vb.color);
        }
    }

    #[test]
    fn cylinder_cap_colors_are_uniform_per_cap() {
        let sectors = 8u16;
        let mesh = capped_cylinder(0.2, 0.2, sectors, &mut rng());

        for cap in 0..2usize {
            let base = cap * (sectors as usize + 1);
            assert_eq!(mesh.vertices[base].color, CAP_CENTER_COLOR);
            let rim_color = mesh.vertices[base + 1].color;
            assert_eq!(rim_color[3], 1.0);
            for i in 1..=sectors as usize {
                assert_eq!(mesh.vertices[base + i].color, rim_color);
            }
        }
    }

    #[test]
    fn static_meshes_are_well_formed() {
        for mesh in [carton(), table_pane(), unit_cube()] {
            assert!(mesh.indices.len() % 3 == 0);
            assert_indices_in_range(&mesh);
        }

        assert_eq!(carton().vertex_count(), 13);
        assert_eq!(carton().triangle_count(), 22);
        assert_eq!(table_pane().triangle_count(), 2);
        assert_eq!(unit_cube().triangle_count(), 12);
    }
}
