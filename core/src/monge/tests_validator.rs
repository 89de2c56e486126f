use crate::error::ValidationError;
use crate::geometry::Vector2;
use crate::model::Labeled;
use crate::monge::ProjectionValidator;
use crate::naming::{GreekLetter, Label, View};
use crate::registry::{Repository, Submission};

fn repo() -> Repository {
    Repository::new("validator", 10.0)
}

fn v(x: f64, y: f64) -> Vector2 {
    Vector2::new(x, y)
}

fn r() -> Label {
    Label::latin("r")
}

fn alpha() -> Label {
    Label::greek(GreekLetter::Alpha)
}

#[test]
fn test_first_projection_is_accepted_unconditionally() {
    let mut repo = repo();
    let result = ProjectionValidator::new(&mut repo).validate_line(&r(), v(-2.0, -3.0), v(4.0, -1.0), View::Horizontal);
    let created = result.unwrap();
    let line = created.created().unwrap();
    assert_eq!(line.labels(), &[Label::latin("r").in_view(View::Horizontal)]);
    assert_eq!(line.view, Some(View::Horizontal));
}

#[test]
fn test_profile_pair_must_share_abscissa() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    validator
        .validate_line(&r(), v(1.0, -1.0), v(1.0, -4.0), View::Horizontal)
        .unwrap();

    // Perpendicular and at the same depth
    assert!(validator
        .validate_line(&r(), v(1.0, 2.0), v(1.0, 5.0), View::Frontal)
        .is_ok());

    let s = Label::latin("s");
    validator
        .validate_line(&s, v(3.0, -1.0), v(3.0, -4.0), View::Horizontal)
        .unwrap();
    let err = validator
        .validate_line(&s, v(2.0, 1.0), v(3.0, 4.0), View::Frontal)
        .unwrap_err();
    assert!(matches!(err, ValidationError::NotAlignedWithProfile { .. }));
}

#[test]
fn test_general_line_rejects_perpendicular_partner() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    validator
        .validate_line(&r(), v(-2.0, -3.0), v(4.0, -1.0), View::Horizontal)
        .unwrap();
    let err = validator
        .validate_line(&r(), v(1.0, 1.0), v(1.0, 4.0), View::Frontal)
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::PerpendicularToGroundLine {
            label: "r2".parse().unwrap(),
            opposite: "r1".parse().unwrap(),
        }
    );
    assert!(validator
        .validate_line(&r(), v(-2.0, 1.0), v(3.0, 4.0), View::Frontal)
        .is_ok());
}

#[test]
fn test_rejection_leaves_repository_untouched() {
    let mut repo = repo();
    ProjectionValidator::new(&mut repo)
        .validate_line(&r(), v(-2.0, -3.0), v(4.0, -1.0), View::Horizontal)
        .unwrap();
    let before = repo.line_projections.len();
    let _ = ProjectionValidator::new(&mut repo).validate_line(&r(), v(1.0, 1.0), v(1.0, 4.0), View::Frontal);
    assert_eq!(repo.line_projections.len(), before);
    assert!(repo.line_projection(&"r2".parse().unwrap()).is_none());
}

#[test]
fn test_duplicate_and_degenerate_lines() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    validator
        .validate_line(&r(), v(0.0, -1.0), v(1.0, -2.0), View::Horizontal)
        .unwrap();
    assert!(matches!(
        validator.validate_line(&r(), v(5.0, -1.0), v(6.0, -2.0), View::Horizontal),
        Err(ValidationError::AlreadyExists { .. })
    ));
    assert!(matches!(
        validator.validate_line(&Label::latin("s"), v(1.0, 1.0), v(1.0, 1.0), View::Frontal),
        Err(ValidationError::DegenerateSegment { .. })
    ));
}

#[test]
fn test_same_segment_under_two_names_merges() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    let first = validator
        .validate_line(&r(), v(0.0, -1.0), v(1.0, -2.0), View::Horizontal)
        .unwrap();
    let id = first.created().unwrap().id;
    let second = validator
        .validate_line(&Label::latin("s"), v(1.0, -2.0), v(0.0, -1.0), View::Horizontal)
        .unwrap();
    assert_eq!(second, Submission::Merged { into: id });
    assert_eq!(repo.line_projections.len(), 1);
}

#[test]
fn test_line_against_end_on_point() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    validator
        .create_line_point_projection(&r(), v(2.0, -3.0), View::Horizontal)
        .unwrap();

    let err = validator
        .validate_line(&r(), v(3.0, 1.0), v(3.0, 4.0), View::Frontal)
        .unwrap_err();
    assert!(matches!(err, ValidationError::EndOnMismatch { .. }));

    assert!(validator
        .validate_line(&r(), v(2.0, 1.0), v(2.0, 4.0), View::Frontal)
        .is_ok());

    // The end-on view itself cannot also be drawn as a line
    assert!(matches!(
        validator.validate_line(&r(), v(0.0, -1.0), v(1.0, -2.0), View::Horizontal),
        Err(ValidationError::AlreadyExists { .. })
    ));
}

#[test]
fn test_point_projection_abscissa() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    let a = Label::latin("A");
    validator.create_point_projection(&a, v(2.0, 3.0), View::Horizontal).unwrap();

    let err = validator
        .create_point_projection(&a, v(2.5, -1.0), View::Frontal)
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::AbscissaMismatch {
            label: "A2".parse().unwrap(),
            opposite: "A1".parse().unwrap(),
        }
    );
    assert!(validator.create_point_projection(&a, v(2.0, -1.0), View::Frontal).is_ok());
    assert!(matches!(
        validator.create_point_projection(&a, v(2.0, 3.0), View::Horizontal),
        Err(ValidationError::AlreadyExists { .. })
    ));
}

#[test]
fn test_point_projections_merge_per_view() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    validator
        .create_point_projection(&Label::latin("A"), v(2.0, 3.0), View::Horizontal)
        .unwrap();
    let merged = validator
        .create_point_projection(&Label::latin("B"), v(2.0, 3.0), View::Horizontal)
        .unwrap();
    assert!(matches!(merged, Submission::Merged { .. }));
    // Same coordinates in the other view are a different record
    let other = validator
        .create_point_projection(&Label::latin("C"), v(2.0, 3.0), View::Frontal)
        .unwrap();
    assert!(other.created().is_some());
    assert_eq!(repo.point_projections.len(), 2);
}

#[test]
fn test_line_point_projection_rules() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    validator
        .validate_line(&r(), v(2.0, 1.0), v(2.0, 4.0), View::Frontal)
        .unwrap();

    let err = validator
        .create_line_point_projection(&r(), v(3.0, -3.0), View::Horizontal)
        .unwrap_err();
    assert!(matches!(err, ValidationError::NotOnOppositeProjection { .. }));

    let ok = validator
        .create_line_point_projection(&r(), v(2.0, -3.0), View::Horizontal)
        .unwrap();
    assert_eq!(ok.created().unwrap().labels, vec!["(r1)".parse::<Label>().unwrap()]);

    // A line cannot be end-on in both views
    let s = Label::latin("s");
    validator
        .create_line_point_projection(&s, v(1.0, -1.0), View::Horizontal)
        .unwrap();
    assert!(matches!(
        validator.create_line_point_projection(&s, v(1.0, 1.0), View::Frontal),
        Err(ValidationError::ConflictingPointProjection { .. })
    ));
}

#[test]
fn test_plane_traces_meet_on_ground_line() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    validator
        .validate_plane_trace(&alpha(), v(2.0, 0.0), v(4.0, -2.0), View::Horizontal, false)
        .unwrap();

    let err = validator
        .validate_plane_trace(&alpha(), v(3.0, 0.0), v(1.0, 3.0), View::Frontal, false)
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::InterceptMismatch {
            label: "fα".parse().unwrap(),
            expected: 2.0,
            found: 3.0,
        }
    );

    let ok = validator
        .validate_plane_trace(&alpha(), v(2.0, 0.0), v(0.0, 3.0), View::Frontal, false)
        .unwrap();
    assert_eq!(ok.created().unwrap().labels, vec!["fα".parse::<Label>().unwrap()]);
}

#[test]
fn test_parallel_trace_requires_parallel_partner() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    validator
        .validate_plane_trace(&alpha(), v(-3.0, -2.0), v(3.0, -2.0), View::Horizontal, false)
        .unwrap();
    assert!(matches!(
        validator.validate_plane_trace(&alpha(), v(0.0, 1.0), v(1.0, 3.0), View::Frontal, false),
        Err(ValidationError::TraceNotParallel { .. })
    ));
    assert!(validator
        .validate_plane_trace(&alpha(), v(-3.0, 4.0), v(3.0, 4.0), View::Frontal, false)
        .is_ok());
}

#[test]
fn test_single_trace_planes() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    assert!(matches!(
        validator.validate_plane_trace(&alpha(), v(0.0, -1.0), v(1.0, -3.0), View::Horizontal, true),
        Err(ValidationError::TraceNotParallel { .. })
    ));

    let stored = validator
        .validate_plane_trace(&alpha(), v(-3.0, -2.0), v(3.0, -2.0), View::Horizontal, true)
        .unwrap();
    assert_eq!(stored.created().unwrap().labels, vec!["(hα)".parse::<Label>().unwrap()]);

    // The plane is complete; no frontal trace can be added
    assert!(matches!(
        validator.validate_plane_trace(&alpha(), v(-3.0, 2.0), v(3.0, 2.0), View::Frontal, false),
        Err(ValidationError::FamilyConflict { .. })
    ));
    assert!(matches!(
        validator.validate_plane_trace(&alpha(), v(-3.0, -2.0), v(3.0, -2.0), View::Horizontal, false),
        Err(ValidationError::AlreadyExists { .. })
    ));
}

#[test]
fn test_label_alphabet_per_entity() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    assert!(matches!(
        validator.validate_line(&alpha(), v(0.0, 1.0), v(1.0, 2.0), View::Frontal),
        Err(ValidationError::InvalidLabel { .. })
    ));
    assert!(matches!(
        validator.validate_plane_trace(&r(), v(0.0, 1.0), v(1.0, 2.0), View::Frontal, false),
        Err(ValidationError::InvalidLabel { .. })
    ));
    assert!(matches!(
        validator.create_point_projection(&"A1".parse().unwrap(), v(0.0, 1.0), View::Frontal),
        Err(ValidationError::InvalidLabel { .. })
    ));
}

#[test]
fn test_names_must_read_back() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    for name in ["", "r 1", "r2", "mu"] {
        assert!(
            matches!(
                validator.validate_line(&Label::latin(name), v(0.0, 1.0), v(1.0, 2.0), View::Frontal),
                Err(ValidationError::InvalidLabel { .. })
            ),
            "{name:?} accepted"
        );
    }
    assert!(matches!(
        validator.create_point_projection(&Label::latin(""), v(0.0, 1.0), View::Horizontal),
        Err(ValidationError::InvalidLabel { .. })
    ));
    assert!(repo.line_projections.is_empty());
    assert!(repo.point_projections.is_empty());
}

#[test]
fn test_line_cannot_reuse_point_projection_label() {
    let mut repo = repo();
    let mut validator = ProjectionValidator::new(&mut repo);
    let a = Label::latin("A");
    validator.create_point_projection(&a, v(2.0, -3.0), View::Horizontal).unwrap();
    match validator.validate_line(&a, v(0.0, -1.0), v(1.0, -2.0), View::Horizontal) {
        Err(ValidationError::AlreadyExists { label }) => assert_eq!(label, a.in_view(View::Horizontal)),
        other => panic!("expected a label clash, got {:?}", other),
    }
    assert_eq!(repo.line_projections.len(), 0);
}
