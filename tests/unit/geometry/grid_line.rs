use rand::{Rng, SeedableRng, rngs::StdRng};

use super::*;

fn cells(start: (f64, f64), end: (f64, f64)) -> Vec<(i64, i64)> {
    GridLine::new(Point::new(start.0, start.1), Point::new(end.0, end.1))
        .map(|c| (c.x, c.y))
        .collect()
}

#[test]
fn zero_length_yields_start_cell_only() {
    let out: Vec<_> = GridLine::new(Point::new(2.3, 4.7), Point::new(2.3, 4.7)).collect();
    assert_eq!(out.len(), 1);
    assert_eq!((out[0].x, out[0].y), (2, 4));
    assert_eq!(out[0].t, 0.0);
}

#[test]
fn horizontal_and_vertical_runs() {
    assert_eq!(
        cells((0.5, 0.5), (3.5, 0.5)),
        vec![(0, 0), (1, 0), (2, 0), (3, 0)]
    );
    assert_eq!(cells((0.5, 2.5), (0.5, -0.5)), vec![(0, 2), (0, 1), (0, 0), (0, -1)]);
}

#[test]
fn shallow_slope_visits_crossed_cells_in_order() {
    assert_eq!(
        cells((0.5, 0.5), (3.5, 1.9)),
        vec![(0, 0), (1, 0), (1, 1), (2, 1), (3, 1)]
    );
}

#[test]
fn exact_diagonal_steps_x_first_at_lattice_points() {
    assert_eq!(
        cells((0.5, 0.5), (2.5, 2.5)),
        vec![(0, 0), (1, 0), (1, 1), (2, 1), (2, 2)]
    );
}

#[test]
fn all_octants_end_at_end_cell() {
    let center = (5.25, 5.75);
    for (dx, dy) in [
        (3.1, 1.2),
        (1.2, 3.1),
        (-1.2, 3.1),
        (-3.1, 1.2),
        (-3.1, -1.2),
        (-1.2, -3.1),
        (1.2, -3.1),
        (3.1, -1.2),
    ] {
        let end = (center.0 + dx, center.1 + dy);
        let out = cells(center, end);
        assert_eq!(out.first().copied(), Some((5, 5)));
        assert_eq!(
            out.last().copied(),
            Some((end.0.floor() as i64, end.1.floor() as i64)),
            "dx={dx} dy={dy}"
        );
    }
}

#[test]
fn successive_cells_are_4_connected_and_t_is_monotonic() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let a = Point::new(rng.random_range(-8.0..8.0), rng.random_range(-8.0..8.0));
        let b = Point::new(rng.random_range(-8.0..8.0), rng.random_range(-8.0..8.0));
        let out: Vec<_> = GridLine::new(a, b).collect();
        for w in out.windows(2) {
            let step = (w[1].x - w[0].x).abs() + (w[1].y - w[0].y).abs();
            assert_eq!(step, 1);
            assert!(w[1].t >= w[0].t);
        }
        let mut uniq = out.iter().map(|c| (c.x, c.y)).collect::<Vec<_>>();
        uniq.sort_unstable();
        uniq.dedup();
        assert_eq!(uniq.len(), out.len(), "a cell was visited twice");
    }
}

#[test]
fn no_cell_along_the_segment_is_omitted() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..100 {
        let a = Point::new(rng.random_range(-6.0..6.0), rng.random_range(-6.0..6.0));
        let b = Point::new(rng.random_range(-6.0..6.0), rng.random_range(-6.0..6.0));
        let visited: Vec<(i64, i64)> = GridLine::new(a, b).map(|c| (c.x, c.y)).collect();
        for i in 0..=997 {
            let t = f64::from(i) / 997.0;
            let p = a.lerp(b, t);
            let cell = (p.x.floor() as i64, p.y.floor() as i64);
            assert!(visited.contains(&cell), "missing {cell:?} for {a:?} -> {b:?}");
        }
    }
}

#[test]
fn clone_restarts_from_clone_point() {
    let mut line = GridLine::new(Point::new(0.5, 0.5), Point::new(4.5, 0.5));
    line.next();
    let rest: Vec<_> = line.clone().collect();
    assert_eq!(rest.len(), 4);
    assert_eq!(line.len(), 4);
    assert_eq!(line.collect::<Vec<_>>(), rest);
}

#[test]
fn entry_parameter_matches_crossing_position() {
    let out: Vec<_> = GridLine::new(Point::new(0.5, 0.5), Point::new(4.5, 0.5)).collect();
    let ts: Vec<f64> = out.iter().map(|c| c.t).collect();
    assert_eq!(ts, vec![0.0, 0.125, 0.375, 0.625, 0.875]);
}
