//! Deterministic centroid-based clustering.
//!
//! Lloyd's algorithm over standardized feature rows with a seeded xorshift
//! generator: same input and seed always produce the same assignment. Multiple
//! seeded restarts keep the lowest-inertia solution; empty clusters re-seed
//! from the point farthest from its centroid.

use stakeout_core::constants::{KMEANS_MAX_ITER, KMEANS_RESTARTS, KMEANS_TOLERANCE};

/// Xorshift64 generator. Deterministic: same seed, same sequence.
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    pub fn next_index(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// Standardize rows per dimension: zero mean, unit variance.
///
/// Zero-variance dimensions are left centered rather than divided.
pub fn standardize(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if rows.is_empty() {
        return Vec::new();
    }
    let dims = rows[0].len();
    let n = rows.len() as f64;

    let mut means = vec![0.0; dims];
    for row in rows {
        for (d, &v) in row.iter().enumerate() {
            means[d] += v;
        }
    }
    for mean in &mut means {
        *mean /= n;
    }

    let mut stds = vec![0.0; dims];
    for row in rows {
        for (d, &v) in row.iter().enumerate() {
            stds[d] += (v - means[d]).powi(2);
        }
    }
    for std in &mut stds {
        *std = (*std / n).sqrt();
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(d, &v)| {
                    let centered = v - means[d];
                    if stds[d] > 1e-12 {
                        centered / stds[d]
                    } else {
                        centered
                    }
                })
                .collect()
        })
        .collect()
}

/// Result of one clustering run.
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Cluster index per input row.
    pub assignments: Vec<usize>,
    /// Sum of squared distances to assigned centroids.
    pub inertia: f64,
}

/// Cluster rows into `k` groups.
///
/// `k` is clamped to the row count. Runs a fixed number of seeded restarts
/// and keeps the lowest-inertia assignment.
pub fn cluster(rows: &[Vec<f64>], k: usize, seed: u64) -> KMeansResult {
    let n = rows.len();
    let k = k.min(n);
    if n == 0 || k == 0 {
        return KMeansResult {
            assignments: Vec::new(),
            inertia: 0.0,
        };
    }

    let mut best: Option<KMeansResult> = None;
    for restart in 0..KMEANS_RESTARTS {
        let mut rng = SeededRng::new(seed.wrapping_add(restart as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let result = lloyd(rows, k, &mut rng);
        match &best {
            Some(current) if current.inertia <= result.inertia => {}
            _ => best = Some(result),
        }
    }
    best.unwrap_or(KMeansResult {
        assignments: vec![0; n],
        inertia: 0.0,
    })
}

fn lloyd(rows: &[Vec<f64>], k: usize, rng: &mut SeededRng) -> KMeansResult {
    let n = rows.len();
    let dims = rows[0].len();

    // Seed centroids from k distinct rows.
    let mut chosen: Vec<usize> = Vec::with_capacity(k);
    while chosen.len() < k {
        let candidate = rng.next_index(n);
        if !chosen.contains(&candidate) {
            chosen.push(candidate);
        }
    }
    let mut centroids: Vec<Vec<f64>> = chosen.iter().map(|&i| rows[i].clone()).collect();
    let mut assignments = vec![0usize; n];

    for _ in 0..KMEANS_MAX_ITER {
        // Assignment step
        for (i, row) in rows.iter().enumerate() {
            assignments[i] = nearest_centroid(row, &centroids);
        }

        // Update step
        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (i, row) in rows.iter().enumerate() {
            counts[assignments[i]] += 1;
            for (d, &v) in row.iter().enumerate() {
                sums[assignments[i]][d] += v;
            }
        }

        let mut movement = 0.0f64;
        for c in 0..k {
            if counts[c] == 0 {
                // Re-seed an empty cluster from the farthest point.
                let far = farthest_point(rows, &centroids, &assignments);
                movement = movement.max(distance_sq(&centroids[c], &rows[far]).sqrt());
                centroids[c] = rows[far].clone();
                continue;
            }
            let mut moved = 0.0;
            for d in 0..dims {
                let updated = sums[c][d] / counts[c] as f64;
                moved += (updated - centroids[c][d]).powi(2);
                centroids[c][d] = updated;
            }
            movement = movement.max(moved.sqrt());
        }

        if movement < KMEANS_TOLERANCE {
            break;
        }
    }

    // Final assignment and inertia against converged centroids.
    let mut inertia = 0.0;
    for (i, row) in rows.iter().enumerate() {
        assignments[i] = nearest_centroid(row, &centroids);
        inertia += distance_sq(row, &centroids[assignments[i]]);
    }

    KMeansResult {
        assignments,
        inertia,
    }
}

fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let dist = distance_sq(row, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    best
}

fn farthest_point(rows: &[Vec<f64>], centroids: &[Vec<f64>], assignments: &[usize]) -> usize {
    let mut far = 0;
    let mut far_dist = -1.0;
    for (i, row) in rows.iter().enumerate() {
        let dist = distance_sq(row, &centroids[assignments[i]]);
        if dist > far_dist {
            far_dist = dist;
            far = i;
        }
    }
    far
}

fn distance_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}
