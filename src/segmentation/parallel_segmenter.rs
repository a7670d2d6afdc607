use crate::math::{Real, UnitVector};
use crate::segmentation::error::checked_len;
use crate::segmentation::union_find::TriangleUnionFind;
use crate::segmentation::{
    is_connected, segment_union_to_obj, NormalClassifier, Segmentation, SegmentationDiagnostic,
    SegmentationError, Segmenter,
};
use crate::shape::{Triangle, TriangleMesh};
use crate::utils::hashmap::HashMap;
use crate::utils::VertexKey;
use core::ops::Range;
use smallvec::SmallVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What to do with triangles that have no defined normal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum DegenerateTriangles {
    /// Output every degenerate triangle as its own segment.
    #[default]
    Isolate,
    /// Leave degenerate triangles out of the output.
    Skip,
}

/// Parameters of a [`ParallelSegmenter`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SegmentationParameters {
    /// The maximum angle, in radians, between the normal of a triangle and the key
    /// normal of its class. See [`NormalClassifier`].
    pub tolerance: Real,
    /// The number of consecutive triangles processed by each worker during the
    /// merge phase.
    pub region_size: usize,
    /// What to do with triangles that have no defined normal.
    pub degenerate_triangles: DegenerateTriangles,
}

impl SegmentationParameters {
    /// Default parameters with the given normal tolerance.
    pub fn with_tolerance(tolerance: Real) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

impl Default for SegmentationParameters {
    fn default() -> Self {
        Self {
            tolerance: 0.0,
            region_size: 4096,
            degenerate_triangles: DegenerateTriangles::Isolate,
        }
    }
}

/// The partition of the triangles of a mesh computed by [`ParallelSegmenter::segment_union`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentUnion {
    /// `roots[i]` is the representative triangle of the segment containing the `i`-th
    /// triangle. Two triangles are in the same segment iff they have the same root,
    /// and `roots[roots[i]] == roots[i]`.
    pub roots: Vec<u32>,
    /// The normal class of every triangle, or `None` for degenerate triangles.
    pub normal_classes: Vec<Option<u32>>,
    /// The number of distinct normal classes.
    pub num_normal_classes: usize,
    /// Non-fatal anomalies detected while computing the partition.
    pub diagnostics: Vec<SegmentationDiagnostic>,
}

/// Splits a triangle mesh into segments of edge-connected triangles with the same
/// normal class, using multiple threads.
///
/// The segmentation runs in four phases:
/// 1. The normal of every triangle is computed, in parallel.
/// 2. A [`NormalClassifier`] is populated with all the normals, in triangle order,
///    then every triangle is assigned the class of its normal, in parallel.
/// 3. The triangles are split into regions of consecutive indices. Each worker merges
///    the adjacent triangles of its region sharing the same class into a private
///    union-find, and collects the merges involving triangles of later regions.
/// 4. The local roots of every region and the cross-region merges are applied to a
///    global union-find, which is then resolved into the final partition.
///
/// Two triangles are adjacent if they share at least two vertex positions (see
/// [`is_connected`]). The result only depends on the mesh and the tolerance, not on
/// the number of threads or the region size.
///
/// Parallelism requires the `parallel` feature. Without it, the same phases run
/// sequentially.
#[derive(Copy, Clone, Debug)]
pub struct ParallelSegmenter<'a> {
    mesh: &'a TriangleMesh,
    params: SegmentationParameters,
}

struct RegionUnions {
    local_roots: Vec<u32>,
    boundary: Vec<(u32, u32)>,
}

impl<'a> ParallelSegmenter<'a> {
    /// Creates a segmenter for `mesh`, merging normals up to `tolerance` radians apart.
    pub fn new(mesh: &'a TriangleMesh, tolerance: Real) -> Self {
        Self::with_parameters(mesh, SegmentationParameters::with_tolerance(tolerance))
    }

    /// Creates a segmenter for `mesh` with custom parameters.
    pub fn with_parameters(mesh: &'a TriangleMesh, params: SegmentationParameters) -> Self {
        Self { mesh, params }
    }

    /// The mesh being segmented.
    pub fn mesh(&self) -> &'a TriangleMesh {
        self.mesh
    }

    /// The parameters of this segmenter.
    pub fn parameters(&self) -> &SegmentationParameters {
        &self.params
    }

    /// Computes the partition of the triangles of the mesh, without building the
    /// segment meshes.
    pub fn segment_union(&self) -> Result<SegmentUnion, SegmentationError> {
        let triangles: Vec<Triangle> = self.mesh.triangles().collect();
        self.compute_segment_union(&triangles)
    }

    fn compute_segment_union(
        &self,
        triangles: &[Triangle],
    ) -> Result<SegmentUnion, SegmentationError> {
        let num_triangles = checked_len("triangles", triangles.len())?;

        let normals: Vec<Option<UnitVector<Real>>> = par_map(triangles, Triangle::normal);
        let classifier =
            NormalClassifier::from_normals(normals.iter().flatten(), self.params.tolerance)?;
        let normal_classes: Vec<Option<u32>> = par_map(&normals, |n| {
            n.as_ref().and_then(|n| classifier.classify(n))
        });

        log::debug!(
            "Classified {} triangles into {} normal classes (tolerance: {}).",
            num_triangles,
            classifier.num_classes(),
            classifier.tolerance()
        );

        let mut diagnostics = vec![];

        for (i, class) in normal_classes.iter().enumerate() {
            if class.is_none() {
                log::warn!(
                    "Triangle {} has no defined normal and will not be merged ({:?}).",
                    i,
                    self.params.degenerate_triangles
                );
                diagnostics.push(SegmentationDiagnostic::DegenerateTriangle {
                    triangle: i as u32,
                    handling: self.params.degenerate_triangles,
                });
            }
        }

        let vertex_triangles = vertex_to_triangles(triangles, &normal_classes);
        let region_size = self.params.region_size.clamp(1, u32::MAX as usize) as u32;
        let regions: Vec<Range<u32>> = (0..num_triangles)
            .step_by(region_size as usize)
            .map(|start| start..start.saturating_add(region_size).min(num_triangles))
            .collect();

        let region_unions = par_map(&regions, |region| {
            unite_region(region.clone(), triangles, &normal_classes, &vertex_triangles)
        });

        let mut ufind = TriangleUnionFind::new(num_triangles);
        let mut num_boundary_unions = 0;

        for (region, unions) in regions.iter().zip(region_unions.iter()) {
            for (i, local_root) in region.clone().zip(unions.local_roots.iter()) {
                if i != *local_root {
                    ufind.union(i, *local_root);
                }
            }

            for (a, b) in &unions.boundary {
                ufind.union(*a, *b);
            }

            num_boundary_unions += unions.boundary.len();
        }

        let roots = ufind.into_roots();

        log::debug!(
            "Merged {} triangles over {} regions ({} cross-region merges).",
            num_triangles,
            regions.len(),
            num_boundary_unions
        );

        Ok(SegmentUnion {
            roots,
            normal_classes,
            num_normal_classes: classifier.num_classes(),
            diagnostics,
        })
    }
}

impl Segmenter for ParallelSegmenter<'_> {
    fn do_segmentation(&self) -> Result<Segmentation, SegmentationError> {
        let triangles: Vec<Triangle> = self.mesh.triangles().collect();
        let union = self.compute_segment_union(&triangles)?;

        let meshes = match self.params.degenerate_triangles {
            DegenerateTriangles::Isolate => segment_union_to_obj(&union.roots, &triangles)?,
            DegenerateTriangles::Skip => {
                let (roots, kept) =
                    without_unclassified(&union.roots, &union.normal_classes, &triangles);
                segment_union_to_obj(&roots, &kept)?
            }
        };

        log::debug!(
            "Segmentation produced {} segments with {} diagnostics.",
            meshes.len(),
            union.diagnostics.len()
        );

        Ok(Segmentation {
            meshes,
            diagnostics: union.diagnostics,
        })
    }
}

/// Maps every vertex position to the classified triangles incident to it, in
/// increasing order.
fn vertex_to_triangles(
    triangles: &[Triangle],
    normal_classes: &[Option<u32>],
) -> HashMap<VertexKey, SmallVec<[u32; 8]>> {
    let mut result: HashMap<VertexKey, SmallVec<[u32; 8]>> = HashMap::default();

    for (i, (tri, class)) in triangles.iter().zip(normal_classes.iter()).enumerate() {
        // Degenerate triangles are never merged.
        if class.is_some() {
            for pt in &tri.vertex {
                result
                    .entry(VertexKey::new(*pt))
                    .or_insert_with(SmallVec::new)
                    .push(i as u32);
            }
        }
    }

    result
}

fn unite_region(
    region: Range<u32>,
    triangles: &[Triangle],
    normal_classes: &[Option<u32>],
    vertex_triangles: &HashMap<VertexKey, SmallVec<[u32; 8]>>,
) -> RegionUnions {
    let mut ufind = TriangleUnionFind::new(region.end - region.start);
    let mut boundary = vec![];
    let mut candidates: SmallVec<[u32; 16]> = SmallVec::new();

    for i in region.clone() {
        let Some(class) = normal_classes[i as usize] else {
            continue;
        };
        let tri = &triangles[i as usize];

        // Only the triangles sharing at least one vertex with `tri` can be connected to
        // it. Each pair is handled once, by the region of its smallest triangle.
        candidates.clear();
        for pt in &tri.vertex {
            if let Some(incident) = vertex_triangles.get(&VertexKey::new(*pt)) {
                candidates.extend(incident.iter().copied().filter(|j| *j > i));
            }
        }
        candidates.sort_unstable();
        candidates.dedup();

        for j in &candidates {
            if normal_classes[*j as usize] == Some(class)
                && is_connected(tri, &triangles[*j as usize])
            {
                if *j < region.end {
                    ufind.union(i - region.start, *j - region.start);
                } else {
                    boundary.push((i, *j));
                }
            }
        }
    }

    let local_roots = ufind
        .into_roots()
        .into_iter()
        .map(|root| root + region.start)
        .collect();

    RegionUnions {
        local_roots,
        boundary,
    }
}

/// Removes the triangles without normal class from a partition, re-indexing the roots.
fn without_unclassified(
    roots: &[u32],
    normal_classes: &[Option<u32>],
    triangles: &[Triangle],
) -> (Vec<u32>, Vec<Triangle>) {
    let mut new_index = vec![u32::MAX; triangles.len()];
    let mut kept = Vec::with_capacity(triangles.len());

    for (i, (tri, class)) in triangles.iter().zip(normal_classes.iter()).enumerate() {
        if class.is_some() {
            new_index[i] = kept.len() as u32;
            kept.push(*tri);
        }
    }

    // Unclassified triangles are singletons, so the root of a kept triangle is kept too.
    let kept_roots = roots
        .iter()
        .zip(normal_classes.iter())
        .filter(|(_, class)| class.is_some())
        .map(|(root, _)| new_index[*root as usize])
        .collect();

    (kept_roots, kept)
}

#[cfg(feature = "parallel")]
fn par_map<T: Sync, U: Send>(items: &[T], f: impl Fn(&T) -> U + Sync + Send) -> Vec<U> {
    items.par_iter().map(f).collect()
}

#[cfg(not(feature = "parallel"))]
fn par_map<T, U>(items: &[T], f: impl Fn(&T) -> U) -> Vec<U> {
    items.iter().map(f).collect()
}
