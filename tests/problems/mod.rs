use lshaped::*;

const EPS: f64 = 0.00000001;

pub fn assert_optimal(result: &SolverResult, expected_obj: f64, expected_x: &[f64]) {
    let sol = assert_optimal_obj(result, expected_obj);
    let x = sol.x();

    assert_eq!(x.len(), expected_x.len());

    for (x1, x2) in x.iter().zip(expected_x) {
        assert!((x1 - x2).abs() < EPS, "x_i: {}, expected: {}", x1, x2);
    }
}

pub fn assert_optimal_obj(result: &SolverResult, expected_obj: f64) -> &Solution {
    match result {
        SolverResult::Optimal(sol) => {
            assert!(
                (sol.obj() - expected_obj).abs() < EPS,
                "obj: {}, expected: {}",
                sol.obj(),
                expected_obj
            );

            sol
        }

        _ => panic!("not optimal: {:?}", result),
    }
}

pub fn assert_duals(result: &SolverResult, rows: &[ConstraintId], expected: &[f64]) {
    match result {
        SolverResult::Optimal(sol) => {
            assert_eq!(sol.duals().len(), rows.len());

            for (id, expected) in rows.iter().zip(expected) {
                let dual = sol.dual(*id).unwrap();
                assert!(
                    (dual - expected).abs() < 1e-6,
                    "dual of {:?}: {}, expected: {}",
                    id,
                    dual,
                    expected
                );
            }
        }

        _ => panic!("not optimal: {:?}", result),
    }
}

pub fn assert_infeasible(result: &SolverResult) {
    match result {
        SolverResult::Infeasible => (),
        _ => panic!("not infeasible: {:?}", result),
    }
}

pub fn assert_unbounded(result: &SolverResult) {
    match result {
        SolverResult::Unbounded => (),
        _ => panic!("not unbounded: {:?}", result),
    }
}

pub struct TestProblem {
    pub prob: Problem,
    pub check_result: Box<dyn FnOnce(&SolverResult)>,
}

impl TestProblem {
    fn new<F: FnOnce(&SolverResult) + 'static>(prob: Problem, check_result: F) -> Self {
        Self {
            prob,
            check_result: Box::new(check_result),
        }
    }
}

fn var(prob: &mut Problem, obj_coeff: f64, bound: Bound, name: &str) -> VariableId {
    prob.add_var(obj_coeff, bound, Some(name.to_string()))
        .unwrap()
}

pub fn empty_problem() -> TestProblem {
    TestProblem::new(Problem::new(), |result: &SolverResult| {
        assert_optimal(result, 0., &[])
    })
}

pub fn one_variable_no_constraints() -> TestProblem {
    let mut prob = Problem::new();
    var(&mut prob, 2., Bound::TwoSided(-1., 1.), "x1");

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(result, -2., &[-1.])
    })
}

pub fn one_variable_infeasible() -> TestProblem {
    let mut prob = Problem::new();
    let x1 = var(&mut prob, 2., Bound::Upper(0.), "x1");

    prob.add_constraint(vec![(x1, 1.)], ConstraintOp::Gte, 1.)
        .unwrap();

    TestProblem::new(prob, |result: &SolverResult| assert_infeasible(result))
}

pub fn one_variable_unbounded_free() -> TestProblem {
    let mut prob = Problem::new();
    var(&mut prob, 2., Bound::Free, "x1");

    TestProblem::new(prob, |result: &SolverResult| assert_unbounded(result))
}

pub fn two_variables_infeasible_free() -> TestProblem {
    let mut prob = Problem::new();
    let x1 = var(&mut prob, 2., Bound::Free, "x1");
    let x2 = var(&mut prob, 2., Bound::Free, "x2");

    prob.add_constraint(vec![(x1, 1.), (x2, 1.)], ConstraintOp::Eq, -1.)
        .unwrap();

    prob.add_constraint(vec![(x1, 2.), (x2, 2.)], ConstraintOp::Eq, 1.)
        .unwrap();

    TestProblem::new(prob, |result: &SolverResult| assert_infeasible(result))
}

pub fn feasible_constraint_without_coeffs() -> TestProblem {
    let mut prob = Problem::new();
    var(&mut prob, 2., Bound::Lower(3.), "x1");

    prob.add_constraint(vec![], ConstraintOp::Eq, 0.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(result, 6., &[3.])
    })
}

pub fn infeasible_constraint_without_coeffs() -> TestProblem {
    let mut prob = Problem::new();
    var(&mut prob, 2., Bound::Free, "x1");

    prob.add_constraint(vec![], ConstraintOp::Eq, 1.).unwrap();

    TestProblem::new(prob, |result: &SolverResult| assert_infeasible(result))
}

pub fn linear_system_3d() -> TestProblem {
    let mut prob = Problem::new();
    let x = var(&mut prob, 0., Bound::Free, "x");
    let y = var(&mut prob, 0., Bound::Free, "y");
    let z = var(&mut prob, 0., Bound::Free, "z");

    prob.add_constraint(vec![(x, 1.), (y, 2.), (z, 4.)], ConstraintOp::Eq, 1.)
        .unwrap();

    prob.add_constraint(vec![(x, 3.), (y, 4.), (z, 8.)], ConstraintOp::Eq, 2.)
        .unwrap();

    prob.add_constraint(vec![(x, 5.), (y, 6.), (z, 13.)], ConstraintOp::Eq, 5.)
        .unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(result, 0., &[0., -3.5, 2.])
    })
}

pub fn mixed_bounds() -> TestProblem {
    let mut prob = Problem::new();
    let x1 = var(&mut prob, 2., Bound::TwoSided(-1., 1.), "x1");
    let x2 = var(&mut prob, 10., Bound::Upper(6.), "x2");
    let x3 = var(&mut prob, 0., Bound::Lower(0.), "x3");
    let x4 = var(&mut prob, 1., Bound::Fixed(0.), "x4");
    let x5 = var(&mut prob, 0., Bound::Free, "x5");

    let rows = vec![
        prob.add_constraint(vec![(x1, 2.5), (x2, 3.5)], ConstraintOp::Gte, 5.)
            .unwrap(),
        prob.add_constraint(vec![(x2, 2.5), (x1, 4.5)], ConstraintOp::Lte, 1.)
            .unwrap(),
        prob.add_constraint(vec![(x3, -1.), (x4, -3.), (x5, -4.)], ConstraintOp::Eq, 2.)
            .unwrap(),
    ];

    TestProblem::new(prob, move |result: &SolverResult| {
        assert_optimal(
            result,
            19.1578947368421,
            &[-0.94736842105, 2.105263157894, 0., 0., -0.5],
        );

        assert_duals(result, &rows, &[80. / 19., -36. / 19., 0.]);
    })
}

pub fn production_plan() -> TestProblem {
    let mut prob = Problem::new();
    let x = var(&mut prob, -5., Bound::Lower(0.), "x");
    let y = var(&mut prob, -4., Bound::Lower(0.), "y");

    let rows = vec![
        prob.add_constraint(vec![(x, 1.)], ConstraintOp::Lte, 6.)
            .unwrap(),
        prob.add_constraint(vec![(x, 0.25), (y, 1.)], ConstraintOp::Lte, 6.)
            .unwrap(),
        prob.add_constraint(vec![(x, 3.), (y, 2.)], ConstraintOp::Lte, 22.)
            .unwrap(),
    ];

    TestProblem::new(prob, move |result: &SolverResult| {
        assert_optimal(result, -40., &[4., 5.]);
        assert_duals(result, &rows, &[0., -0.8, -1.6]);
    })
}

pub fn negative_rhs_rows() -> TestProblem {
    let mut prob = Problem::new();
    let x = var(&mut prob, 3., Bound::Lower(0.), "x");
    let y = var(&mut prob, -6., Bound::Lower(0.), "y");

    prob.add_constraint(vec![(x, 1.), (y, 2.)], ConstraintOp::Gte, -1.)
        .unwrap();

    prob.add_constraint(vec![(x, 2.), (y, 1.)], ConstraintOp::Gte, 0.)
        .unwrap();

    prob.add_constraint(vec![(x, 1.), (y, -1.)], ConstraintOp::Gte, -1.)
        .unwrap();

    prob.add_constraint(vec![(x, 1.), (y, -4.)], ConstraintOp::Gte, -13.)
        .unwrap();

    prob.add_constraint(vec![(x, -4.), (y, 1.)], ConstraintOp::Gte, -23.)
        .unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(result, -15., &[3., 4.])
    })
}

pub fn multiple_optima() -> TestProblem {
    let mut prob = Problem::new();
    let x = var(&mut prob, -1., Bound::Lower(0.), "x");
    let y = var(&mut prob, -1., Bound::Lower(0.), "y");
    let z = var(&mut prob, -1., Bound::Lower(0.), "z");

    prob.add_constraint(vec![(x, 1.), (y, -1.), (z, 1.)], ConstraintOp::Gte, -2.)
        .unwrap();

    prob.add_constraint(vec![(x, -1.), (y, 1.), (z, 1.)], ConstraintOp::Gte, -3.)
        .unwrap();

    prob.add_constraint(vec![(x, 1.), (y, 1.), (z, -1.)], ConstraintOp::Gte, -1.)
        .unwrap();

    prob.add_constraint(vec![(x, -1.), (y, -1.), (z, -1.)], ConstraintOp::Gte, -4.)
        .unwrap();

    //only the objective value is unique
    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal_obj(result, -4.);
    })
}

pub fn free_variable_with_equality() -> TestProblem {
    let mut prob = Problem::new();
    let x = var(&mut prob, 2., Bound::Lower(0.), "x");
    let y = var(&mut prob, -1., Bound::Lower(0.), "y");
    let z = var(&mut prob, 1., Bound::Free, "z");

    prob.add_constraint(vec![(x, 1.), (y, -1.), (z, 4.)], ConstraintOp::Gte, -1.)
        .unwrap();

    prob.add_constraint(vec![(x, 1.), (y, -1.), (z, -1.)], ConstraintOp::Gte, 2.)
        .unwrap();

    prob.add_constraint(vec![(x, 1.), (y, 3.), (z, 2.)], ConstraintOp::Eq, 3.)
        .unwrap();

    TestProblem::new(prob, |result: &SolverResult| {
        assert_optimal(result, 2.9, &[2.1, 0.7, -0.6])
    })
}

pub fn unbounded_ray() -> TestProblem {
    let mut prob = Problem::new();
    let x = var(&mut prob, -2., Bound::Lower(0.), "x");
    let y = var(&mut prob, -3., Bound::Lower(0.), "y");
    let z = var(&mut prob, 1., Bound::Lower(0.), "z");

    prob.add_constraint(vec![(x, 1.), (y, 1.), (z, 1.)], ConstraintOp::Gte, -3.)
        .unwrap();

    prob.add_constraint(vec![(x, -1.), (y, 1.), (z, -1.)], ConstraintOp::Gte, -4.)
        .unwrap();

    prob.add_constraint(vec![(x, 1.), (y, -1.), (z, -2.)], ConstraintOp::Gte, -1.)
        .unwrap();

    TestProblem::new(prob, |result: &SolverResult| assert_unbounded(result))
}

pub fn beale_cycle() -> TestProblem {
    let mut prob = Problem::new();
    let x = var(&mut prob, -10., Bound::Lower(0.), "x");
    let y = var(&mut prob, 57., Bound::Lower(0.), "y");
    let z = var(&mut prob, 9., Bound::Lower(0.), "z");
    let w = var(&mut prob, 24., Bound::Lower(0.), "w");

    let rows = vec![
        prob.add_constraint(
            vec![(x, -0.5), (y, 5.5), (z, 2.5), (w, -9.)],
            ConstraintOp::Gte,
            0.,
        )
        .unwrap(),
        prob.add_constraint(
            vec![(x, -0.5), (y, 1.5), (z, 0.5), (w, -1.)],
            ConstraintOp::Gte,
            0.,
        )
        .unwrap(),
        prob.add_constraint(vec![(x, -1.)], ConstraintOp::Gte, -1.)
            .unwrap(),
    ];

    TestProblem::new(prob, move |result: &SolverResult| {
        assert_optimal(result, -1., &[1., 0., 1., 0.]);
        assert_duals(result, &rows, &[0., 18., 1.]);
    })
}

/// Recourse problem of the high demand scenario of the farm planning instance at
/// x = (40, 20).
pub fn recourse_high_demand() -> TestProblem {
    let mut prob = Problem::new();
    let y1 = var(&mut prob, -28., Bound::Lower(0.), "y1");
    let y2 = var(&mut prob, -32., Bound::Lower(0.), "y2");

    let rows = vec![
        prob.add_named_constraint(
            "capacity_1".to_string(),
            vec![(y1, 6.), (y2, 10.)],
            ConstraintOp::Lte,
            2400.,
        )
        .unwrap(),
        prob.add_named_constraint(
            "capacity_2".to_string(),
            vec![(y1, 8.), (y2, 5.)],
            ConstraintOp::Lte,
            1600.,
        )
        .unwrap(),
        prob.add_named_constraint(
            "demand_1".to_string(),
            vec![(y1, 1.)],
            ConstraintOp::Lte,
            300.,
        )
        .unwrap(),
        prob.add_named_constraint(
            "demand_2".to_string(),
            vec![(y2, 1.)],
            ConstraintOp::Lte,
            300.,
        )
        .unwrap(),
    ];

    TestProblem::new(prob, move |result: &SolverResult| {
        assert_optimal(result, -8384., &[80., 192.]);
        assert_duals(result, &rows, &[-2.32, -1.76, 0., 0.]);
    })
}
