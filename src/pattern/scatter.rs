use std::collections::VecDeque;

use rand::{Rng, rngs::StdRng};

use crate::foundation::core::Grid;

/// Independent random steps for every cell of the grid plus its border ring.
#[derive(Clone, Debug)]
pub(crate) struct RandomTable {
    steps: Vec<u32>,
}

impl RandomTable {
    pub(crate) fn new(grid: Grid, range: u32, rng: &mut StdRng) -> Self {
        let (h, w) = grid.ringed_dims();
        let steps = (0..h * w).map(|_| rng.random_range(0..range)).collect();
        Self { steps }
    }

    pub(crate) fn get(&self, grid: Grid, row: i64, col: i64) -> f64 {
        grid.ringed_index(row, col)
            .and_then(|i| self.steps.get(i))
            .map_or(f64::NAN, |&s| f64::from(s))
    }
}

/// Multi-source flood fill from randomly seeded cells.
///
/// Seeds sit at step 0 and every other cell gets its BFS wavefront index,
/// 4-connected and bounded to the grid plus its border ring.
#[derive(Clone, Debug)]
pub(crate) struct InfectTable {
    steps: Vec<Option<u32>>,
    max_wavefront: u32,
}

impl InfectTable {
    pub(crate) fn new(grid: Grid, density: f64, rng: &mut StdRng) -> Self {
        let (h, w) = grid.ringed_dims();
        let len = h * w;
        let mut steps = vec![None; len];
        let mut queue = VecDeque::new();

        for (i, slot) in steps.iter_mut().enumerate() {
            if rng.random_bool(density) {
                *slot = Some(0);
                queue.push_back(i);
            }
        }
        if queue.is_empty() {
            let i = rng.random_range(0..len);
            steps[i] = Some(0);
            queue.push_back(i);
        }
        let seeds = queue.len();

        let mut max_wavefront = 0;
        while let Some(i) = queue.pop_front() {
            let Some(step) = steps[i] else {
                continue;
            };
            max_wavefront = max_wavefront.max(step);

            let (y, x) = (i / w, i % w);
            let neighbors = [
                (y > 0).then(|| i - w),
                (y + 1 < h).then(|| i + w),
                (x > 0).then(|| i - 1),
                (x + 1 < w).then(|| i + 1),
            ];
            for n in neighbors.into_iter().flatten() {
                if steps[n].is_none() {
                    steps[n] = Some(step + 1);
                    queue.push_back(n);
                }
            }
        }

        tracing::debug!(seeds, max_wavefront, "infect flood fill complete");
        Self {
            steps,
            max_wavefront,
        }
    }

    pub(crate) fn max_wavefront(&self) -> u32 {
        self.max_wavefront
    }

    pub(crate) fn get(&self, grid: Grid, row: i64, col: i64) -> f64 {
        grid.ringed_index(row, col)
            .and_then(|i| self.steps.get(i).copied().flatten())
            .map_or(f64::NAN, f64::from)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/scatter.rs"]
mod tests;
