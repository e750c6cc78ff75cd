use rand::SeedableRng;

use super::*;

fn grid(rows: u32, cols: u32) -> Grid {
    Grid::new(rows, cols).unwrap()
}

#[test]
fn random_steps_stay_in_range_and_cover_the_ring() {
    let g = grid(4, 6);
    let table = RandomTable::new(g, 5, &mut StdRng::seed_from_u64(3));
    for r in -1..=4 {
        for c in -1..=6 {
            let v = table.get(g, r, c);
            assert!((0.0..5.0).contains(&v), "({r},{c}) -> {v}");
            assert_eq!(v.fract(), 0.0);
        }
    }
}

#[test]
fn random_table_is_reproducible_from_seed() {
    let g = grid(5, 5);
    let a = RandomTable::new(g, 10, &mut StdRng::seed_from_u64(42));
    let b = RandomTable::new(g, 10, &mut StdRng::seed_from_u64(42));
    assert_eq!(a.steps, b.steps);
}

#[test]
fn infect_reaches_every_cell_with_manhattan_wavefronts() {
    let g = grid(9, 13);
    for seed in 0..8 {
        let table = InfectTable::new(g, 0.03, &mut StdRng::seed_from_u64(seed));
        let (h, w) = g.ringed_dims();

        let seeds: Vec<(i64, i64)> = (0..h * w)
            .filter(|&i| table.steps[i] == Some(0))
            .map(|i| ((i / w) as i64, (i % w) as i64))
            .collect();
        assert!(!seeds.is_empty());

        let mut expected_max = 0;
        for i in 0..h * w {
            let (y, x) = ((i / w) as i64, (i % w) as i64);
            let expected = seeds
                .iter()
                .map(|&(sy, sx)| ((sy - y).abs() + (sx - x).abs()) as u32)
                .min()
                .unwrap();
            assert_eq!(table.steps[i], Some(expected));
            expected_max = expected_max.max(expected);
        }
        assert_eq!(table.max_wavefront(), expected_max);
    }
}

#[test]
fn infect_full_density_seeds_everything() {
    let g = grid(3, 4);
    let table = InfectTable::new(g, 1.0, &mut StdRng::seed_from_u64(0));
    assert_eq!(table.max_wavefront(), 0);
    assert!(table.steps.iter().all(|s| *s == Some(0)));
}

#[test]
fn infect_guarantees_a_seed_at_tiny_density() {
    let g = grid(2, 2);
    let table = InfectTable::new(g, 1e-9, &mut StdRng::seed_from_u64(9));
    assert!(table.steps.iter().all(Option::is_some));
    assert_eq!(table.steps.iter().filter(|s| **s == Some(0)).count(), 1);
}
