//! Procedural terrain: Gaussian bump field plus a boundary wall term
//!
//! Height is analytic and total over (x, y). Normals come from the
//! discretized mesh rather than the analytic gradient so the physics
//! response matches what the renderer draws.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A radially symmetric Gaussian height contribution
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bump {
    pub center: Vec2,
    pub height: f32,
    pub spread: f32,
}

/// Interleaved vertex for renderer upload
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Discretized terrain surface: N×N grid vertices, two triangles per cell
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
}

impl TerrainMesh {
    /// Interleave positions and normals for a single GPU vertex buffer
    pub fn vertex_buffer(&self) -> Vec<TerrainVertex> {
        self.positions
            .iter()
            .zip(self.normals.iter())
            .map(|(p, n)| TerrainVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }

    /// Flattened triangle indices for the GPU index buffer
    pub fn index_buffer(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }
}

/// Evaluate the height field at (x, y) for a given bump configuration.
///
/// Sum of Gaussian bumps plus `1 / (edge_distance + eps)` where edge_distance
/// is how close (u, v) is to the domain border. The wall term grows without
/// bound toward the edges and fences the playable area.
pub fn height_at(x: f32, y: f32, length: f32, bumps: &[Bump]) -> f32 {
    let p = Vec2::new(x, y);
    let mut z = 0.0;
    for bump in bumps {
        let s = (p - bump.center).length() / bump.spread;
        z += bump.height * (-s * s).exp();
    }

    let u = x / length + 0.5;
    let v = y / length + 0.5;
    let edge = u.min(v).min(1.0 - u).min(1.0 - v);

    z + 1.0 / (edge + BOUNDARY_EPS)
}

/// Procedural heightfield with a discretized mesh for normal lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    /// Side length of the square domain, centered at the origin
    pub length: f32,
    /// Samples per axis of the discretized mesh
    pub resolution: usize,
    pub bumps: Vec<Bump>,
    mesh: TerrainMesh,
}

impl Terrain {
    /// Build a terrain with `n_bumps` random bumps drawn from `rng`.
    pub fn generate(resolution: usize, length: f32, n_bumps: usize, rng: &mut impl Rng) -> Self {
        let mut terrain = Self {
            length,
            resolution,
            bumps: Vec::new(),
            mesh: TerrainMesh::default(),
        };
        terrain.regenerate(n_bumps, rng);
        terrain
    }

    /// Redraw the bump configuration and rebuild the mesh.
    pub fn regenerate(&mut self, n_bumps: usize, rng: &mut impl Rng) {
        let span = self.length * BUMP_MARGIN;
        self.bumps = (0..n_bumps)
            .map(|_| Bump {
                center: Vec2::new(rng.random_range(-span..=span), rng.random_range(-span..=span)),
                height: rng.random_range(BUMP_HEIGHT_MIN..BUMP_HEIGHT_MAX),
                spread: rng.random_range(BUMP_SPREAD_MIN..BUMP_SPREAD_MAX),
            })
            .collect();
        self.mesh = build_mesh(self.resolution, self.length, &self.bumps);
        log::debug!(
            "terrain rebuilt: {} bumps, {} vertices",
            self.bumps.len(),
            self.mesh.positions.len()
        );
    }

    /// Analytic height at (x, y); defined for all real inputs.
    #[inline]
    pub fn height(&self, x: f32, y: f32) -> f32 {
        height_at(x, y, self.length, &self.bumps)
    }

    /// Nearest-sample normal lookup on the discretized mesh.
    ///
    /// Rounds (x, y) to the closest grid vertex and uses the fractional
    /// remainder to pick which of the two cell triangles owns the lookup.
    /// Outside the sampled grid this falls back to a flat upward normal, so
    /// the normal field is discontinuous near the domain border.
    pub fn normal(&self, x: f32, y: f32) -> Vec3 {
        let n = self.resolution;
        let u0 = (x / self.length + 0.5) * (n - 1) as f32;
        let v0 = (y / self.length + 0.5) * (n - 1) as f32;
        let ku0 = u0.round();
        let kv0 = v0.round();
        let ru0 = u0 - ku0;
        let rv0 = v0 - kv0;

        let mut idx = kv0 as i64 + n as i64 * ku0 as i64;
        if ru0 + rv0 >= 1.0 {
            idx += 1;
        }

        if idx < 0 || idx >= (n * n) as i64 {
            return Vec3::Z;
        }
        self.mesh.normals[idx as usize]
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    /// Rejection-sample `n` positions on the surface with a minimum pairwise
    /// distance, for scattering decorations.
    pub fn scatter_positions(&self, n: usize, min_dist: f32, rng: &mut impl Rng) -> Vec<Vec3> {
        let mut positions: Vec<Vec3> = Vec::with_capacity(n);
        for _ in 0..n {
            let (mut x, mut y);
            loop {
                x = (rng.random_range(0.0..1.0f32) - 0.5) * self.length;
                y = (rng.random_range(0.0..1.0f32) - 0.5) * self.length;
                let clear = positions
                    .iter()
                    .all(|p| (Vec2::new(x, y) - Vec2::new(p.x, p.y)).length() >= min_dist);
                if clear {
                    break;
                }
            }
            positions.push(Vec3::new(x, y, self.height(x, y)));
        }
        positions
    }
}

/// Sample the height field on an N×N grid over [-length/2, length/2]² and
/// derive per-vertex normals from the resulting triangle mesh.
pub fn build_mesh(n: usize, length: f32, bumps: &[Bump]) -> TerrainMesh {
    let mut positions = vec![Vec3::ZERO; n * n];

    for ku in 0..n {
        for kv in 0..n {
            let u = ku as f32 / (n - 1) as f32;
            let v = kv as f32 / (n - 1) as f32;
            let x = (u - 0.5) * length;
            let y = (v - 0.5) * length;
            positions[kv + n * ku] = Vec3::new(x, y, height_at(x, y, length, bumps));
        }
    }

    // Two triangles per grid cell, consistent upward winding
    let stride = n as u32;
    let mut indices = Vec::with_capacity(2 * (n - 1) * (n - 1));
    for ku in 0..n - 1 {
        for kv in 0..n - 1 {
            let idx = (kv + n * ku) as u32;
            indices.push([idx, idx + 1 + stride, idx + 1]);
            indices.push([idx, idx + stride, idx + 1 + stride]);
        }
    }

    // Area-weighted face normal accumulation, then per-vertex normalization
    let mut normals = vec![Vec3::ZERO; n * n];
    for tri in &indices {
        let [a, b, c] = tri.map(|i| positions[i as usize]);
        let face = (b - a).cross(c - a);
        for &i in tri {
            normals[i as usize] += face;
        }
    }
    for normal in &mut normals {
        *normal = normal.try_normalize().unwrap_or(Vec3::Z);
    }

    TerrainMesh {
        positions,
        normals,
        indices,
    }
}
