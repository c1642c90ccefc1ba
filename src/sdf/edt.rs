//! Exact Euclidean distance transform.
//!
//! Separable lower-envelope-of-parabolas algorithm (Felzenszwalb and
//! Huttenlocher): one 1-D pass down every column, then one along every row,
//! on squared distances. The result is exact, not a chamfer approximation.

/// Distance from every `true` cell to the nearest `false` cell.
///
/// `false` cells get `0.0`. If the grid has no `false` cell at all every
/// distance is `f64::INFINITY`.
pub fn distance_transform(mask: &[bool], width: usize, height: usize) -> Vec<f64> {
    debug_assert_eq!(mask.len(), width * height);

    let mut grid: Vec<f64> = mask
        .iter()
        .map(|&inside| if inside { f64::INFINITY } else { 0.0 })
        .collect();

    let n = width.max(height);
    let mut scratch = Scratch::new(n);
    let mut column = vec![0.0; height];
    let mut out = vec![0.0; n];

    for x in 0..width {
        for y in 0..height {
            column[y] = grid[y * width + x];
        }
        squared_distance_1d(&column, &mut out[..height], &mut scratch);
        for y in 0..height {
            grid[y * width + x] = out[y];
        }
    }

    for y in 0..height {
        let row = &mut grid[y * width..(y + 1) * width];
        squared_distance_1d(row, &mut out[..width], &mut scratch);
        row.copy_from_slice(&out[..width]);
    }

    grid.iter_mut().for_each(|d| *d = d.sqrt());
    grid
}

/// Reusable envelope buffers.
struct Scratch {
    /// Parabola vertex positions.
    v: Vec<usize>,
    /// Boundaries between neighbouring parabolas (`v.len() + 1` entries).
    z: Vec<f64>,
}

impl Scratch {
    fn new(n: usize) -> Self {
        Self {
            v: vec![0; n],
            z: vec![0.0; n + 1],
        }
    }
}

/// `d[q] = min_p ((q - p)^2 + f[p])`, skipping infinite samples.
fn squared_distance_1d(f: &[f64], d: &mut [f64], scratch: &mut Scratch) {
    let n = f.len();
    let v = &mut scratch.v;
    let z = &mut scratch.z;
    let mut len = 0_usize;

    for q in 0..n {
        let fq = f[q];
        if fq.is_infinite() {
            continue;
        }
        let qf = q as f64;

        let mut boundary = f64::NEG_INFINITY;
        while len > 0 {
            let p = v[len - 1];
            let pf = p as f64;
            let s = ((fq + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf));
            if s <= z[len - 1] {
                len -= 1;
            } else {
                boundary = s;
                break;
            }
        }

        v[len] = q;
        z[len] = boundary;
        z[len + 1] = f64::INFINITY;
        len += 1;
    }

    if len == 0 {
        d.fill(f64::INFINITY);
        return;
    }

    let mut k = 0;
    for (q, out) in d.iter_mut().enumerate() {
        let qf = q as f64;
        while z[k + 1] < qf {
            k += 1;
        }
        let p = v[k];
        let dx = qf - p as f64;
        *out = dx * dx + f[p];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// O(n^2) reference: nearest `false` cell by exhaustive search.
    fn brute_force(mask: &[bool], width: usize, height: usize) -> Vec<f64> {
        let mut out = vec![f64::INFINITY; mask.len()];
        for y in 0..height {
            for x in 0..width {
                if !mask[y * width + x] {
                    out[y * width + x] = 0.0;
                    continue;
                }
                for by in 0..height {
                    for bx in 0..width {
                        if !mask[by * width + bx] {
                            let dx = x as f64 - bx as f64;
                            let dy = y as f64 - by as f64;
                            let d = (dx * dx + dy * dy).sqrt();
                            if d < out[y * width + x] {
                                out[y * width + x] = d;
                            }
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_single_background_pixel() {
        let (w, h) = (5, 4);
        let mut mask = vec![true; w * h];
        mask[0] = false;
        let dist = distance_transform(&mask, w, h);

        assert_eq!(dist[0], 0.0);
        assert_eq!(dist[1], 1.0);
        assert_eq!(dist[w], 1.0);
        assert!((dist[w + 1] - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((dist[3 * w + 4] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_background_is_infinite() {
        let dist = distance_transform(&[true; 6], 3, 2);
        assert!(dist.iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn test_all_background_is_zero() {
        let dist = distance_transform(&[false; 6], 2, 3);
        assert!(dist.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_matches_brute_force_on_random_masks() {
        for seed in 0_u64..24 {
            let (w, h) = (13, 9);
            let mut rng = Lcg::new(seed.wrapping_mul(2_654_435_761).wrapping_add(11));
            let mask: Vec<bool> = (0..w * h).map(|_| rng.next_u32() % 100 < 80).collect();

            let fast = distance_transform(&mask, w, h);
            let slow = brute_force(&mask, w, h);
            for (i, (a, b)) in fast.iter().zip(&slow).enumerate() {
                if a.is_infinite() || b.is_infinite() {
                    assert_eq!(a.is_infinite(), b.is_infinite(), "seed={seed} i={i}");
                } else {
                    assert!((a - b).abs() < 1e-9, "seed={seed} i={i}: {a} vs {b}");
                }
            }
        }
    }

    struct Lcg {
        state: u64,
    }

    impl Lcg {
        fn new(seed: u64) -> Self {
            Self { state: seed }
        }

        fn next_u32(&mut self) -> u32 {
            self.state = self
                .state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            (self.state >> 32) as u32
        }
    }
}
