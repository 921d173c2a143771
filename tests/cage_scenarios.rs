use cage_rust::{BoundingBox, CageMode, CageModel, CoefficientSolver, PointD};

fn clockwise_square() -> CageModel {
    let mut cage = CageModel::new();
    cage.add_point(0.0, 0.0);
    cage.add_point(10.0, 0.0);
    cage.add_point(10.0, 10.0);
    cage.add_point(0.0, 10.0);
    cage
}

/// Convex cage whose vertices sit off the integer grid, so that no pixel
/// of its bounding box lies on an edge line.
fn pentagon() -> CageModel {
    CageModel::from_points(&[
        (2.5, 1.5),
        (30.5, 3.5),
        (35.5, 25.5),
        (15.5, 33.5),
        (0.5, 21.5),
    ])
}

fn coords(cage: &CageModel) -> Vec<(f64, f64)> {
    cage.vertices().map(|p| (p.x, p.y)).collect()
}

#[test]
fn winding_normalization_is_idempotent() {
    for mut cage in [clockwise_square(), pentagon()] {
        cage.normalize_winding_and_bounding_box();
        let order = coords(&cage);
        let bb = cage.bounding_box();

        assert!(!cage.normalize_winding_and_bounding_box());
        assert_eq!(coords(&cage), order);
        assert_eq!(cage.bounding_box(), bb);
    }
}

#[test]
fn scaling_tracks_deformed_edges() {
    let mut cage = pentagon();
    for s in cage.edge_scalings() {
        assert!((s - 1.0).abs() < 1e-12);
    }

    // Double edge 0 by pushing point 1 along it.
    let v0 = cage.vertex(0).unwrap();
    let v1 = cage.vertex(1).unwrap();
    let target = v0 + (v1 - v0) * 2.0;
    cage.move_deformed_point(1, target.x, target.y).unwrap();
    let k = cage.edge_scaling(0).unwrap();
    assert!((k - 2.0).abs() / 2.0 < 1e-9);
}

#[test]
fn hit_test_square() {
    let cage = clockwise_square();
    for (i, p) in cage.vertices().enumerate() {
        assert_eq!(cage.hit_test_original(p.x, p.y, 4), Some(i));
    }
    assert_eq!(cage.hit_test_original(-40.0, 70.0, 4), None);
    assert_eq!(CageModel::new().hit_test_original(0.0, 0.0, 1000), None);
}

#[test]
fn vertex_coefficients_partition_unity() {
    let mut cage = pentagon();
    let field = CoefficientSolver::new().solve(&mut cage).unwrap();
    assert_eq!(field.non_finite_count(), 0);

    let (x0, y0) = field.origin();
    let mut inside = 0;
    for y in y0..y0 + field.height() as i32 {
        for x in x0..x0 + field.width() as i32 {
            let sum: f32 = field.vertex_coefs_at(x, y).unwrap().iter().sum();
            if cage.point_inside(CageMode::Edit, x as f64, y as f64) {
                inside += 1;
                assert!((sum - 1.0).abs() < 1e-3, "sum at ({x}, {y}) = {sum}");
            } else {
                assert!(sum.abs() < 1e-3, "sum at ({x}, {y}) = {sum}");
            }
        }
    }
    assert!(inside > 500);
}

#[test]
fn bounding_box_covers_vertices_after_edits() {
    let mut cage = pentagon();
    cage.add_point(-7.25, 12.0);
    cage.move_point(2, 41.0, 40.0).unwrap();
    cage.insert_point(1, 18.0, -3.5).unwrap();
    cage.remove_last_point();
    cage.move_deformed_point(0, 100.0, 100.0).unwrap();
    cage.normalize_winding_and_bounding_box();

    let bb = cage.bounding_box();
    for p in cage.vertices() {
        assert!(bb.contains(p.x, p.y), "{p:?} outside {bb:?}");
    }
}

#[test]
fn square_end_to_end() {
    let mut cage = clockwise_square();
    let field = CoefficientSolver::new().solve(&mut cage).unwrap();

    // Reversed to counter-clockwise, pairs kept together.
    assert_eq!(
        coords(&cage),
        vec![(0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]
    );
    assert_eq!(
        cage.deformed_vertices().collect::<Vec<_>>(),
        cage.vertices().collect::<Vec<_>>()
    );
    assert_eq!(cage.bounding_box(), BoundingBox::new(0.0, 0.0, 10.0, 10.0));

    assert_eq!(field.width(), 10);
    assert_eq!(field.height(), 10);
    assert_eq!(field.vertex_count(), 4);
    assert_eq!(field.vertex_coef_buffer().len(), 10 * 10 * 4);
    assert_eq!(field.edge_coef_buffer().len(), 10 * 10 * 4);

    for y in 0..10 {
        for x in 0..10 {
            let finite = field
                .vertex_coefs_at(x, y)
                .unwrap()
                .iter()
                .chain(field.edge_coefs_at(x, y).unwrap())
                .all(|v| v.is_finite());
            if x > 0 && y > 0 {
                assert!(finite, "non-finite coefficient at ({x}, {y})");
            }
        }
    }

    // The left column lies on edge 3, (0,0) -> (0,10).
    assert!(field.edge_coef(3, 0, 5).unwrap().is_nan());

    // Center pixel weighs every corner equally.
    for v in field.vertex_coefs_at(5, 5).unwrap() {
        assert!((v - 0.25).abs() < 1e-5);
    }
}

#[test]
fn resolve_replaces_previous_field() {
    let mut cage = clockwise_square();
    let solver = CoefficientSolver::new();
    let first = solver.solve(&mut cage).unwrap();

    cage.add_point(-5.0, 5.0);
    let second = solver.solve(&mut cage).unwrap();

    assert_eq!(first.vertex_count(), 4);
    assert_eq!(second.vertex_count(), 5);
    assert_eq!(second.origin(), (-5, 0));
    assert_eq!(second.width(), 15);
    // The earlier field is untouched.
    assert_eq!(first.vertex_coef_buffer().len(), 400);
}

#[test]
fn edge_normals_follow_deformed_polygon() {
    let mut cage = clockwise_square();
    cage.normalize_winding_and_bounding_box();
    // Edge 0 is now (0,10) -> (10,10).
    let n = cage.edge_normal(0).unwrap();
    assert!((n - PointD::new(0.0, 1.0)).length() < 1e-12);

    cage.move_deformed_point(1, 0.0, 20.0).unwrap();
    let n = cage.edge_normal(0).unwrap();
    assert!((n - PointD::new(-1.0, 0.0)).length() < 1e-12);
}
