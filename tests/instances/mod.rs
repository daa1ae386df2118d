use lshaped::*;

/// Farm planning instance: buy capacity x1, x2 at costs 100 and 150, then produce y1, y2
/// under capacity limits and an uncertain demand.
///
/// min 100 x1 + 150 x2 + E[q1 y1 + q2 y2]
/// s.t. x1 + x2 ≤ 120, x1 ≥ 40, x2 ≥ 20
///      6 y1 + 10 y2 ≤ 60 x1, 8 y1 + 5 y2 ≤ 80 x2, y1 ≤ d1, y2 ≤ d2, y ≥ 0
///
/// with (d1, d2, q1, q2) = (500, 100, -24, -28) at p = 0.4 and (300, 300, -28, -32)
/// at p = 0.6.
pub fn farm_planning() -> ProblemData {
    let mut first_stage = Problem::new();

    let x1 = first_stage
        .add_var(100., Bound::Lower(40.), Some("x1".to_string()))
        .unwrap();

    let x2 = first_stage
        .add_var(150., Bound::Lower(20.), Some("x2".to_string()))
        .unwrap();

    first_stage
        .add_named_constraint(
            "land".to_string(),
            vec![(x1, 1.), (x2, 1.)],
            ConstraintOp::Lte,
            120.,
        )
        .unwrap();

    let recourse = Recourse::new(
        vec![
            vec![6., 10.],
            vec![8., 5.],
            vec![1., 0.],
            vec![0., 1.],
        ],
        vec![ConstraintOp::Lte; 4],
    )
    .unwrap();

    let technology = vec![
        vec![-60., 0.],
        vec![0., -80.],
        vec![0., 0.],
        vec![0., 0.],
    ];

    let scenarios = vec![
        Scenario::new(
            0.4,
            vec![-24., -28.],
            vec![0., 0., 500., 100.],
            technology.clone(),
        )
        .unwrap()
        .with_name("low demand for y2"),
        Scenario::new(0.6, vec![-28., -32.], vec![0., 0., 300., 300.], technology)
            .unwrap()
            .with_name("balanced demand"),
    ];

    ProblemData::new(first_stage, recourse, scenarios).unwrap()
}

pub const FARM_PLANNING_X: [f64; 2] = [46.666666666666664, 36.25];
pub const FARM_PLANNING_OBJ: f64 = -855.8333333333333;

/// The recourse y must cover a demand of 5 but cannot exceed x, so every x < 5 has
/// infeasible recourse.
///
/// min x + E[y]  s.t.  x ≤ 10, x ≥ 0,  y ≥ 5, y ≤ x, y ≥ 0
pub fn induced_constraint() -> ProblemData {
    let mut first_stage = Problem::new();

    let x = first_stage
        .add_var(1., Bound::Lower(0.), Some("x".to_string()))
        .unwrap();

    first_stage
        .add_constraint(vec![(x, 1.)], ConstraintOp::Lte, 10.)
        .unwrap();

    let recourse = Recourse::new(vec![vec![-1.], vec![1.]], vec![ConstraintOp::Lte; 2]).unwrap();

    let scenario = Scenario::new(1., vec![1.], vec![-5., 0.], vec![vec![0.], vec![-1.]]).unwrap();

    ProblemData::new(first_stage, recourse, vec![scenario]).unwrap()
}

/// The recourse needs `x >= min_x`, which the first stage caps at 10. A loose
/// second capacity row brings a right-hand side of 1e6 into the master.
pub fn unreachable_demand(min_x: f64) -> ProblemData {
    let mut first_stage = Problem::new();

    let x = first_stage
        .add_var(1., Bound::Lower(0.), Some("x".to_string()))
        .unwrap();

    first_stage
        .add_constraint(vec![(x, 1.)], ConstraintOp::Lte, 10.)
        .unwrap();

    first_stage
        .add_constraint(vec![(x, 1.)], ConstraintOp::Lte, 1e6)
        .unwrap();

    let recourse = Recourse::new(vec![vec![-1.], vec![1.]], vec![ConstraintOp::Lte; 2]).unwrap();

    let scenario =
        Scenario::new(1., vec![1.], vec![-min_x, 0.], vec![vec![0.], vec![-1.]]).unwrap();

    ProblemData::new(first_stage, recourse, vec![scenario]).unwrap()
}

/// Selling y at a profit without any limit.
pub fn unbounded_recourse() -> ProblemData {
    let mut first_stage = Problem::new();

    first_stage
        .add_var(1., Bound::TwoSided(0., 1.), Some("x".to_string()))
        .unwrap();

    let recourse = Recourse::new(vec![vec![-1.]], vec![ConstraintOp::Lte]).unwrap();
    let scenario = Scenario::new(1., vec![-1.], vec![0.], vec![vec![1.]]).unwrap();

    ProblemData::new(first_stage, recourse, vec![scenario]).unwrap()
}
