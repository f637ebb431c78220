use ropy::{BakedCurve, ChainSolver, NoCollision, NoOpStepObserver, Rope, RopeConfig, RopeHandle, Vec2};

fn step(rope: &mut Rope<f32>, dt: f32) -> bool {
    ChainSolver::new().step(rope, dt, &NoCollision, &mut NoOpStepObserver)
}

fn rope_with_velocity(points: Vec<Vec2<f32>>, old: Vec<Vec2<f32>>, config: RopeConfig<f32>) -> Rope<f32> {
    let lengths = points.windows(2).map(|w| w[0].distance(w[1])).collect();
    Rope::with_state(points, old, lengths, config).unwrap()
}

fn length_error(rope: &Rope<f32>) -> f32 {
    rope.points()
        .windows(2)
        .zip(rope.segment_lengths())
        .map(|(w, &rest)| (w[0].distance(w[1]) - rest).abs())
        .sum()
}

#[test]
fn three_point_rope_at_rest_is_unchanged() {
    let points = vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(0.0, 2.0)];
    let mut rope = Rope::new(points.clone(), RopeConfig::still());
    assert_eq!(rope.segment_lengths(), &[1.0, 1.0]);

    assert!(step(&mut rope, 0.1));

    assert_eq!(rope.points(), points.as_slice());
    assert_eq!(rope.old_points(), points.as_slice());
}

#[test]
fn anchor_pins_first_point() {
    let config = RopeConfig::new().with_gravity(100.0).with_iterations(3);
    let mut rope = Rope::straight(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), 5, config).unwrap();
    rope.set_anchor(Vec2::new(5.0, 5.0));

    for _ in 0..10 {
        step(&mut rope, 1.0 / 60.0);
        assert_eq!(rope.points()[0], Vec2::new(5.0, 5.0));
    }
}

#[test]
fn relaxation_converges_with_more_iterations() {
    let layout = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.5, 0.0),
        Vec2::new(2.0, 0.5),
        Vec2::new(4.0, 0.0),
        Vec2::new(4.0, 2.0),
    ];
    let errors: Vec<f32> = [1usize, 4, 16, 200]
        .iter()
        .map(|&iterations| {
            let config = RopeConfig::still().with_iterations(iterations);
            let mut rope = Rope::with_state(layout.clone(), layout.clone(), vec![1.0; 4], config).unwrap();
            step(&mut rope, 1.0 / 60.0);
            length_error(&rope)
        })
        .collect();

    for pair in errors.windows(2) {
        assert!(pair[1] < pair[0], "errors: {:?}", errors);
    }
    assert!(errors[3] < 1e-3, "error after 200 iterations: {}", errors[3]);
}

#[test]
fn zero_iterations_leave_points_unconstrained() {
    let config = RopeConfig::still().with_iterations(0);
    let mut rope = rope_with_velocity(
        vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
        vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)],
        config,
    );
    rope.set_anchor(Vec2::new(-3.0, 0.0));
    step(&mut rope, 0.1);
    assert_eq!(rope.points(), &[Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0)]);
}

#[test]
fn short_ropes_are_idle() {
    let config = RopeConfig::new().with_gravity(50.0).with_stiffness(3.0).with_collisions(true);

    let mut empty: Rope<f32> = Rope::new(vec![], config);
    assert!(!step(&mut empty, 0.5));
    assert!(empty.points().is_empty());

    let mut single = Rope::with_state(
        vec![Vec2::new(3.0, 4.0)],
        vec![Vec2::new(1.0, 1.0)],
        vec![],
        config,
    )
    .unwrap();
    single.set_anchor(Vec2::new(-7.0, 2.0));
    assert!(!step(&mut single, 0.5));
    assert_eq!(single.points(), &[Vec2::new(3.0, 4.0)]);
    assert_eq!(single.old_points(), &[Vec2::new(1.0, 1.0)]);
}

#[test]
fn undamped_velocity_carries_over() {
    let config = RopeConfig::still().with_iterations(0);
    let mut rope = rope_with_velocity(
        vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
        vec![Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0)],
        config,
    );

    step(&mut rope, 1.0 / 30.0);
    assert_eq!(rope.points()[1], Vec2::new(1.5, 0.0));
    assert_eq!(rope.old_points()[1], Vec2::new(1.0, 0.0));

    step(&mut rope, 1.0 / 30.0);
    assert_eq!(rope.points()[1], Vec2::new(2.0, 0.0));
}

#[test]
fn gravity_pulls_towards_positive_y() {
    let config = RopeConfig::still().with_iterations(0).with_gravity(10.0);
    let mut rope = Rope::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)], config);

    step(&mut rope, 0.5);
    assert_eq!(rope.points()[1], Vec2::new(1.0, 5.0));
    assert_eq!(rope.old_points()[1], Vec2::new(1.0, 0.0));
}

#[test]
fn damping_decays_exponentially() {
    let config = RopeConfig::still().with_iterations(0).with_damping(2.0);
    let mut rope = rope_with_velocity(
        vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
        vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)],
        config,
    );

    step(&mut rope, 0.5);
    let expected = 1.0 + (-1.0f32).exp();
    assert!((rope.points()[1].x - expected).abs() < 1e-6, "x = {}", rope.points()[1].x);
}

#[test]
fn damping_curve_scales_along_the_rope() {
    let config = RopeConfig::still().with_iterations(0).with_damping(2.0);
    let mut rope = rope_with_velocity(
        vec![Vec2::new(0.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(0.0, 2.0)],
        vec![Vec2::new(-1.0, 0.0), Vec2::new(-1.0, 1.0), Vec2::new(-1.0, 2.0)],
        config,
    )
    .with_damping_curve(BakedCurve::linear(0.0, 1.0));

    step(&mut rope, 0.5);
    // anchor untouched by integration, middle damped by half, tip fully
    assert_eq!(rope.points()[0], Vec2::new(0.0, 0.0));
    assert!((rope.points()[1].x - (-0.5f32).exp()).abs() < 1e-6);
    assert!((rope.points()[2].x - (-1.0f32).exp()).abs() < 1e-6);
}

#[test]
fn rope_along_reference_down_feels_no_bend() {
    let config = RopeConfig::still().with_iterations(0).with_stiffness(5.0);
    let mut rope = Rope::hanging(Vec2::new(0.0, 0.0), 3.0, 3, config).unwrap();
    let before = rope.points().to_vec();

    step(&mut rope, 1.0 / 60.0);
    assert_eq!(rope.points(), before.as_slice());
}

#[test]
fn bend_force_accumulates_down_the_chain() {
    let config = RopeConfig::still().with_iterations(0).with_stiffness(1.0);
    let mut rope = Rope::straight(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), 2, config).unwrap();

    step(&mut rope, 1.0 / 60.0);
    let p1 = rope.points()[1];
    let p2 = rope.points()[2];
    // a quarter turn away from down pushes the first joint by about half the
    // stiffness, back towards down
    assert_eq!(p1.x, 1.0);
    assert!((p1.y - 0.5).abs() < 1e-3, "p1 = {:?}", p1);
    // the tip carries the first joint's push plus its own
    assert!(p2.y > p1.y + 0.1, "p1 = {:?}, p2 = {:?}", p1, p2);
    assert!(p2.x > 2.0, "p2 = {:?}", p2);
}

#[test]
fn reference_down_drives_the_first_bend() {
    let config = RopeConfig::still().with_iterations(0).with_stiffness(1.0);
    let mut rope = Rope::straight(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), 2, config).unwrap();
    rope.set_reference_down(Vec2::new(3.0, 0.0));

    let before = rope.points().to_vec();
    step(&mut rope, 1.0 / 60.0);
    assert_eq!(rope.points(), before.as_slice());
}

#[test]
fn horizontal_rope_swings_under_gravity() {
    let config = RopeConfig::new().with_gravity(100.0).with_damping(1.0).with_iterations(10);
    let mut rope = Rope::straight(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 10, config).unwrap();

    for _ in 0..120 {
        step(&mut rope, 1.0 / 60.0);
    }

    let tip = rope.tip().unwrap();
    assert!(tip.y > 90.0, "tip should swing down below the anchor, got {:?}", tip);
    assert_eq!(rope.points()[0], Vec2::new(0.0, 0.0));
    let stretch = (rope.current_length() - rope.rope_length()).abs() / rope.rope_length();
    assert!(stretch < 0.1, "rope stretched by {:.1}%", stretch * 100.0);
}
