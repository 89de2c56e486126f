use crate::error::ClassificationError;
use crate::geometry::{ApproxEq, Vector2, Vector3};
use crate::model::{LineKind, Labeled, ProjectionKind, Role};
use crate::monge::ProjectionValidator;
use crate::naming::{Label, View};
use crate::reconstruct::{Construction, LineBuilder, Subtype};
use crate::registry::Repository;

const H: f64 = 10.0;

fn v(x: f64, y: f64) -> Vector2 {
    Vector2::new(x, y)
}

fn cube() -> Vector3 {
    Vector3::new(H, H, H)
}

fn draw(repo: &mut Repository, name: &str, view: View, p1: Vector2, p2: Vector2) {
    ProjectionValidator::new(repo)
        .validate_line(&Label::latin(name), p1, p2, view)
        .unwrap();
}

fn end_on(repo: &mut Repository, name: &str, view: View, at: Vector2) {
    ProjectionValidator::new(repo)
        .create_line_point_projection(&Label::latin(name), at, view)
        .unwrap();
}

fn build(repo: &mut Repository, name: &str) -> Result<Construction<crate::model::Line3D>, ClassificationError> {
    LineBuilder::new(repo, cube()).build(&Label::latin(name))
}

fn assert_vec(actual: &Vector3, expected: Vector3) {
    assert!(
        actual.approx_eq(&expected),
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_oblique_line_round_trip() {
    // tan(a) = 2 in the horizontal view, tan(b) = 0.5 in the frontal view
    let expected = Vector3::new(2.0, -0.5, 1.0).normalize();
    for horizontal_first in [true, false] {
        let mut repo = Repository::new("lines", H);
        let horizontal = (View::Horizontal, v(0.0, -1.0), v(1.0, 1.0));
        let frontal = (View::Frontal, v(0.0, 1.0), v(2.0, 2.0));
        let order = if horizontal_first { [horizontal, frontal] } else { [frontal, horizontal] };
        for (view, p1, p2) in order {
            draw(&mut repo, "r", view, p1, p2);
        }

        let line = build(&mut repo, "r").unwrap().into_created().unwrap();
        assert_eq!(line.kind, LineKind::Oblique);
        assert_vec(&line.direction, expected);
        assert_vec(&line.endpoints[0], Vector3::new(10.0, -1.25, 4.5));
        assert_vec(&line.endpoints[1], Vector3::new(-10.0, 3.75, -5.5));
        assert_vec(&line.position, Vector3::new(0.0, 1.25, -0.5));
        assert!(line.length.approx_eq(&(line.endpoints[1] - line.endpoints[0]).norm()));
    }
}

#[test]
fn test_line_projects_back_onto_its_drawing() {
    let mut repo = Repository::new("lines", H);
    draw(&mut repo, "r", View::Horizontal, v(0.0, -1.0), v(1.0, 1.0));
    draw(&mut repo, "r", View::Frontal, v(0.0, 1.0), v(2.0, 2.0));
    let line = build(&mut repo, "r").unwrap().into_created().unwrap();

    // Horizontal projection: x = 1 + 2z; frontal projection: y = 1 - z / 2
    for p in line.endpoints {
        assert!((p.x - (1.0 + 2.0 * p.z)).abs() < 1e-2);
        assert!((p.y - (1.0 - 0.5 * p.z)).abs() < 1e-2);
    }
    let horizontal = line.horizontal.as_line().unwrap();
    let frontal = line.frontal.as_line().unwrap();
    assert!(horizontal.endpoints.iter().all(|p| p.y == 0.0));
    assert!(frontal.endpoints.iter().all(|p| p.x == 0.0));
}

#[test]
fn test_frontal_line() {
    let mut repo = Repository::new("lines", H);
    draw(&mut repo, "r", View::Horizontal, v(-4.0, -2.0), v(4.0, -2.0));
    draw(&mut repo, "r", View::Frontal, v(0.0, 1.0), v(2.0, 2.0));
    let line = build(&mut repo, "r").unwrap().into_created().unwrap();
    assert_eq!(line.kind, LineKind::Frontal);
    assert_vec(&line.direction, Vector3::new(0.0, -0.5, 1.0).normalize());
    assert!(line.endpoints.iter().all(|p| p.x == 2.0));
}

#[test]
fn test_horizontal_line() {
    let mut repo = Repository::new("lines", H);
    draw(&mut repo, "r", View::Horizontal, v(0.0, -1.0), v(1.0, 1.0));
    draw(&mut repo, "r", View::Frontal, v(-4.0, 3.0), v(4.0, 3.0));
    let line = build(&mut repo, "r").unwrap().into_created().unwrap();
    assert_eq!(line.kind, LineKind::Horizontal);
    assert_vec(&line.direction, Vector3::new(2.0, 0.0, 1.0).normalize());
    assert!(line.endpoints.iter().all(|p| p.y == 3.0));
}

#[test]
fn test_frontal_horizontal_line() {
    let mut repo = Repository::new("lines", H);
    draw(&mut repo, "r", View::Horizontal, v(-4.0, -2.0), v(4.0, -2.0));
    draw(&mut repo, "r", View::Frontal, v(-1.0, 3.0), v(1.0, 3.0));
    let line = build(&mut repo, "r").unwrap().into_created().unwrap();
    assert_eq!(line.kind, LineKind::FrontalHorizontal);
    assert_eq!(line.direction, Vector3::z());
    assert_vec(&line.endpoints[0], Vector3::new(2.0, 3.0, -H));
    assert_vec(&line.endpoints[1], Vector3::new(2.0, 3.0, H));
    assert!(line.length.approx_eq(&(2.0 * H)));
}

#[test]
fn test_profile_line_is_not_built() {
    let mut repo = Repository::new("lines", H);
    draw(&mut repo, "r", View::Horizontal, v(1.0, -1.0), v(1.0, -4.0));
    draw(&mut repo, "r", View::Frontal, v(1.0, 1.0), v(1.0, 4.0));
    assert_eq!(
        build(&mut repo, "r").unwrap(),
        Construction::Unsupported(Subtype::Line(LineKind::Profile))
    );
    assert!(repo.lines.is_empty());
}

#[test]
fn test_vertical_line() {
    let mut repo = Repository::new("lines", H);
    end_on(&mut repo, "r", View::Horizontal, v(2.0, -3.0));
    draw(&mut repo, "r", View::Frontal, v(2.0, 1.0), v(2.0, 4.0));
    let line = build(&mut repo, "r").unwrap().into_created().unwrap();
    assert_eq!(line.kind, LineKind::Vertical);
    assert_eq!(line.direction, Vector3::new(0.0, -1.0, 0.0));
    assert_vec(&line.endpoints[0], Vector3::new(3.0, H, -2.0));
    assert_vec(&line.endpoints[1], Vector3::new(3.0, -H, -2.0));
    assert_vec(&line.position, Vector3::new(3.0, 0.0, -2.0));
    assert_eq!(repo.line_at(&line.position, &line.direction).map(|l| l.id), Some(line.id));
    match &line.horizontal {
        ProjectionKind::Point(p) => assert_vec(&p.position, Vector3::new(3.0, 0.0, -2.0)),
        other => panic!("expected an end-on point, got {:?}", other),
    }
}

#[test]
fn test_top_line() {
    let mut repo = Repository::new("lines", H);
    draw(&mut repo, "r", View::Horizontal, v(2.0, -1.0), v(2.0, -4.0));
    end_on(&mut repo, "r", View::Frontal, v(2.0, 3.0));
    let line = build(&mut repo, "r").unwrap().into_created().unwrap();
    assert_eq!(line.kind, LineKind::Top);
    assert_eq!(line.direction, Vector3::new(-1.0, 0.0, 0.0));
    assert_vec(&line.endpoints[0], Vector3::new(H, 3.0, -2.0));
    assert_vec(&line.endpoints[1], Vector3::new(-H, 3.0, -2.0));
    assert!(line.frontal.as_point().is_some());
}

#[test]
fn test_end_on_depth_mismatch() {
    // Bypass the validator to store an inconsistent pair
    let mut repo = Repository::new("lines", H);
    repo.submit_point_projection("(r1)".parse().unwrap(), v(2.0, -3.0), View::Horizontal);
    repo.submit_line_projection("r2".parse().unwrap(), &v(3.0, 1.0), &v(3.0, 4.0), View::Frontal, Role::Line);
    assert_eq!(
        build(&mut repo, "r"),
        Err(ClassificationError::DepthMismatch { label: Label::latin("r") })
    );

    repo.submit_line_projection("s1".parse().unwrap(), &v(5.0, -1.0), &v(6.0, -4.0), View::Horizontal, Role::Line);
    repo.submit_point_projection("(s2)".parse().unwrap(), v(5.0, 3.0), View::Frontal);
    assert!(matches!(build(&mut repo, "s"), Err(ClassificationError::DepthMismatch { .. })));
    assert!(repo.lines.is_empty());
}

#[test]
fn test_end_on_point_outside_scene_fails_to_clip() {
    let mut repo = Repository::new("lines", H);
    repo.submit_point_projection("(r1)".parse().unwrap(), v(2.0, -12.0), View::Horizontal);
    repo.submit_line_projection("r2".parse().unwrap(), &v(2.0, 1.0), &v(2.0, 4.0), View::Frontal, Role::Line);
    assert!(matches!(build(&mut repo, "r"), Err(ClassificationError::Clip(_))));

    repo.submit_line_projection("s1".parse().unwrap(), &v(2.0, -1.0), &v(2.0, -4.0), View::Horizontal, Role::Line);
    repo.submit_point_projection("(s2)".parse().unwrap(), v(2.0, 12.0), View::Frontal);
    assert!(matches!(build(&mut repo, "s"), Err(ClassificationError::Clip(_))));
    assert!(repo.lines.is_empty());
}

#[test]
fn test_invalid_angle_combination() {
    let mut repo = Repository::new("lines", H);
    repo.submit_line_projection("r1".parse().unwrap(), &v(1.0, -1.0), &v(1.0, -4.0), View::Horizontal, Role::Line);
    repo.submit_line_projection("r2".parse().unwrap(), &v(0.0, 1.0), &v(2.0, 2.0), View::Frontal, Role::Line);
    assert!(matches!(
        build(&mut repo, "r"),
        Err(ClassificationError::InvalidCombination { .. })
    ));
}

#[test]
fn test_same_line_under_two_labels_merges() {
    let mut repo = Repository::new("lines", H);
    for name in ["r", "s"] {
        draw(&mut repo, name, View::Horizontal, v(0.0, -1.0), v(1.0, 1.0));
        draw(&mut repo, name, View::Frontal, v(0.0, 1.0), v(2.0, 2.0));
    }
    let id = build(&mut repo, "r").unwrap().created().unwrap().id;
    assert_eq!(build(&mut repo, "s").unwrap(), Construction::Merged { into: id });
    assert_eq!(repo.lines.len(), 1);
    let line = repo.line(&Label::latin("s")).unwrap();
    assert_eq!(line.labels(), &[Label::latin("r"), Label::latin("s")]);
}

#[test]
fn test_incomplete_line() {
    let mut repo = Repository::new("lines", H);
    draw(&mut repo, "r", View::Horizontal, v(0.0, -1.0), v(1.0, 1.0));
    assert_eq!(build(&mut repo, "r").unwrap(), Construction::Incomplete);
}
