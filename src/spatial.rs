use glam::DVec3;

const EMPTY: usize = usize::MAX;

/// Uniform-grid cell list over the cubic box `[-half_extent, half_extent]^3`.
///
/// Each cell holds an intrusive singly-linked list of particle indices:
/// `head[cell]` is the first particle, `next[i]` the one after `i`.
/// Cells are at least `cutoff + skin` wide, so any pair within the cutoff
/// sits in the same or an adjacent cell as long as no particle has drifted
/// more than `skin / 2` along any axis since the last rebuild.
#[derive(Debug, Clone)]
pub struct CellList {
    pub cell_size: f64,
    pub inv_cell_size: f64,
    pub dims: [usize; 3],
    pub min_p: DVec3,
    head: Vec<usize>,
    next: Vec<usize>,
    last_positions: Vec<DVec3>,
    threshold: f64,
}

impl CellList {
    /// Lays out an empty grid for `n` particles. Call [`rebuild`](Self::rebuild)
    /// before querying.
    pub fn new(n: usize, half_extent: f64, cutoff: f64, skin: f64) -> Self {
        let span = 2.0 * half_extent;
        let min_cell = cutoff + skin;
        let d = ((span / min_cell).floor() as usize).max(1);
        let cell_size = span / d as f64;

        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            dims: [d, d, d],
            min_p: DVec3::splat(-half_extent),
            head: vec![EMPTY; d * d * d],
            next: vec![EMPTY; n],
            last_positions: Vec::new(),
            threshold: 0.5 * skin,
        }
    }

    pub fn num_cells(&self) -> usize {
        self.head.len()
    }

    /// Displacement (per axis) that forces a rebuild.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Integer cell coordinates of a point, clamped into the grid.
    #[inline]
    pub fn cell_coords(&self, p: DVec3) -> [usize; 3] {
        let rel = (p - self.min_p) * self.inv_cell_size;
        [
            clamp_axis(rel.x, self.dims[0]),
            clamp_axis(rel.y, self.dims[1]),
            clamp_axis(rel.z, self.dims[2]),
        ]
    }

    #[inline]
    fn flat_index(&self, c: [usize; 3]) -> usize {
        c[0] + c[1] * self.dims[0] + c[2] * self.dims[0] * self.dims[1]
    }

    /// Recomputes all cell membership in one pass and snapshots positions.
    pub fn rebuild(&mut self, positions: &[DVec3]) {
        self.head.fill(EMPTY);
        self.next.clear();
        self.next.resize(positions.len(), EMPTY);

        for (i, &p) in positions.iter().enumerate() {
            let c = self.flat_index(self.cell_coords(p));
            self.next[i] = self.head[c];
            self.head[c] = i;
        }

        self.last_positions.clear();
        self.last_positions.extend_from_slice(positions);
        log::debug!("cell list rebuilt: {} particles in {} cells", positions.len(), self.head.len());
    }

    /// True iff any particle moved more than the threshold along any axis
    /// since the last rebuild, or the particle count changed.
    pub fn needs_rebuild(&self, positions: &[DVec3]) -> bool {
        if positions.len() != self.last_positions.len() {
            return true;
        }
        positions
            .iter()
            .zip(&self.last_positions)
            .any(|(p, last)| (*p - *last).abs().max_element() > self.threshold)
    }

    /// Calls `visit(j)` for every particle `j > i` registered in the same or
    /// an adjacent cell as `i`. Across all `i` each unordered pair is visited
    /// exactly once. Distances are not filtered here.
    ///
    /// # Panics
    ///
    /// If `i` was not covered by the last [`rebuild`](Self::rebuild); a
    /// freshly created list has to be rebuilt before its first query.
    pub fn for_each_neighbor<F: FnMut(usize)>(&self, i: usize, mut visit: F) {
        // Use the position `i` was binned with so both ends of a pair agree
        // on the cell layout.
        let c = self.cell_coords(self.last_positions[i]);

        for dz in -1i64..=1 {
            let Some(z) = offset(c[2], dz, self.dims[2]) else { continue };
            for dy in -1i64..=1 {
                let Some(y) = offset(c[1], dy, self.dims[1]) else { continue };
                for dx in -1i64..=1 {
                    let Some(x) = offset(c[0], dx, self.dims[0]) else { continue };
                    let mut j = self.head[self.flat_index([x, y, z])];
                    while j != EMPTY {
                        if j > i {
                            visit(j);
                        }
                        j = self.next[j];
                    }
                }
            }
        }
    }

    /// Particle indices currently binned in the cell containing `p`.
    #[cfg(test)]
    fn cell_members(&self, p: DVec3) -> Vec<usize> {
        let mut members = Vec::new();
        let mut j = self.head[self.flat_index(self.cell_coords(p))];
        while j != EMPTY {
            members.push(j);
            j = self.next[j];
        }
        members
    }
}

#[inline]
fn clamp_axis(rel: f64, dim: usize) -> usize {
    if rel <= 0.0 {
        0
    } else {
        (rel as usize).min(dim - 1)
    }
}

#[inline]
fn offset(c: usize, d: i64, dim: usize) -> Option<usize> {
    let v = c as i64 + d;
    if v < 0 || v >= dim as i64 {
        None
    } else {
        Some(v as usize)
    }
}
