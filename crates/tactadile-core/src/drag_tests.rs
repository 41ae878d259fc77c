use super::*;
use crate::testing::{FakeDesktop, monitor};
use crate::window::ShowState;

fn setup(rect: Rect, work: Rect) -> WindowManipulator<FakeDesktop> {
    let desktop = FakeDesktop::with_monitors(vec![monitor(1, work)]);
    desktop.add_window(7, rect);
    WindowManipulator::new(desktop)
}

#[test]
fn move_follows_cursor_delta() {
    // Arrange
    let mut m = setup(Rect::new(100, 100, 400, 300), Rect::new(0, 0, 1920, 1040));
    m.desktop().set_cursor(500, 500);
    let mut drag = DragMachine::new();

    // Act
    let started = drag.start(DragMode::Move, 7, &mut m).unwrap();
    m.desktop().set_cursor(560, 470);
    drag.tick(&mut m).unwrap();

    // Assert
    assert!(started);
    assert_eq!(drag.state(), DragState::Moving);
    assert_eq!(m.desktop().rect(7), Rect::new(160, 70, 400, 300));
}

#[test]
fn resize_clamps_at_work_area_edge_and_rebases() {
    // Arrange
    let mut m = setup(Rect::new(0, 0, 800, 600), Rect::new(0, 0, 1000, 1000));
    m.desktop().set_cursor(500, 500);
    let mut drag = DragMachine::new();
    drag.start(DragMode::Resize, 7, &mut m).unwrap();

    // Act
    m.desktop().set_cursor(1000, 500);
    drag.tick(&mut m).unwrap();
    let clamped = m.desktop().rect(7);
    m.desktop().set_cursor(990, 500);
    drag.tick(&mut m).unwrap();

    // Assert
    assert_eq!(clamped.width, 1000);
    assert_eq!(clamped.right(), 1000);
    assert_eq!(m.desktop().rect(7).width, 990);
}

#[test]
fn clamp_resize_reports_rebase_for_overshoot() {
    // Arrange
    let origin = Rect::new(0, 0, 800, 600);
    let work = Rect::new(0, 0, 1000, 1000);

    // Act
    let step = clamp_resize(&origin, Point::new(500, 0), &work);

    // Assert
    assert_eq!(step.width, 1000);
    assert_eq!(step.height, 600);
    assert_eq!(step.rebase, Point::new(300, 0));
}

#[test]
fn resize_floors_at_minimum_size() {
    // Arrange
    let origin = Rect::new(100, 100, 300, 300);
    let work = Rect::new(0, 0, 1920, 1040);

    // Act
    let step = clamp_resize(&origin, Point::new(-1000, -250), &work);

    // Assert
    assert_eq!(step.width, MIN_WINDOW_SIZE);
    assert_eq!(step.height, MIN_WINDOW_SIZE);
    assert_eq!(step.rebase, Point::new(-800, -50));
}

#[test]
fn key_release_ends_drag() {
    // Arrange
    let mut m = setup(Rect::new(100, 100, 400, 300), Rect::new(0, 0, 1920, 1040));
    let mut drag = DragMachine::new();
    drag.start(DragMode::Move, 7, &mut m).unwrap();

    // Act
    let ignored = drag.on_key(true);
    let ended = drag.on_key(false);

    // Assert
    assert!(!ignored);
    assert!(ended);
    assert_eq!(drag.state(), DragState::Idle);
    assert!(drag.session().is_none());
}

#[test]
fn key_release_while_idle_is_ignored() {
    let mut drag = DragMachine::new();
    assert!(!drag.on_key(false));
}

#[test]
fn switching_mode_recaptures_origin_without_jump() {
    // Arrange
    let mut m = setup(Rect::new(100, 100, 400, 300), Rect::new(0, 0, 1920, 1040));
    m.desktop().set_cursor(500, 500);
    let mut drag = DragMachine::new();
    drag.start(DragMode::Move, 7, &mut m).unwrap();
    m.desktop().set_cursor(600, 500);
    drag.tick(&mut m).unwrap();

    // Act
    let restarted = drag.start(DragMode::Resize, 99, &mut m).unwrap();
    drag.tick(&mut m).unwrap();

    // Assert
    assert!(!restarted);
    assert_eq!(drag.state(), DragState::Resizing);
    let session = drag.session().unwrap();
    assert_eq!(session.target, 7);
    assert_eq!(session.origin_cursor, Point::new(600, 500));
    assert_eq!(m.desktop().rect(7), Rect::new(200, 100, 400, 300));
}

#[test]
fn repeated_start_in_same_mode_is_ignored() {
    // Arrange
    let mut m = setup(Rect::new(100, 100, 400, 300), Rect::new(0, 0, 1920, 1040));
    m.desktop().set_cursor(500, 500);
    let mut drag = DragMachine::new();
    drag.start(DragMode::Move, 7, &mut m).unwrap();
    m.desktop().set_cursor(520, 500);

    // Act
    drag.start(DragMode::Move, 7, &mut m).unwrap();

    // Assert
    assert_eq!(drag.session().unwrap().origin_cursor, Point::new(500, 500));
}

#[test]
fn start_restores_maximized_window() {
    // Arrange
    let normal = Rect::new(100, 100, 400, 300);
    let mut m = setup(normal, Rect::new(0, 0, 1920, 1040));
    m.desktop().show(7, ShowState::Maximize).unwrap();
    let mut drag = DragMachine::new();

    // Act
    drag.start(DragMode::Move, 7, &mut m).unwrap();

    // Assert
    assert!(!m.desktop().is_maximized(7));
    assert_eq!(drag.session().unwrap().origin_rect, normal);
}

#[test]
fn tick_ends_drag_when_window_closes() {
    // Arrange
    let mut m = setup(Rect::new(100, 100, 400, 300), Rect::new(0, 0, 1920, 1040));
    let mut drag = DragMachine::new();
    drag.start(DragMode::Resize, 7, &mut m).unwrap();
    m.desktop().close(7);

    // Act
    let result = drag.tick(&mut m);

    // Assert
    assert!(result.is_ok());
    assert_eq!(drag.state(), DragState::Idle);
}

#[test]
fn start_on_closed_window_stays_idle() {
    // Arrange
    let mut m = setup(Rect::new(100, 100, 400, 300), Rect::new(0, 0, 1920, 1040));
    m.desktop().close(7);
    let mut drag = DragMachine::new();

    // Act
    let result = drag.start(DragMode::Move, 7, &mut m);

    // Assert
    assert!(result.is_err());
    assert_eq!(drag.state(), DragState::Idle);
}

#[test]
fn drag_can_be_undone_with_restore() {
    // Arrange
    let original = Rect::new(100, 100, 400, 300);
    let mut m = setup(original, Rect::new(0, 0, 1920, 1040));
    m.desktop().set_cursor(0, 0);
    let mut drag = DragMachine::new();
    drag.start(DragMode::Move, 7, &mut m).unwrap();
    m.desktop().set_cursor(300, 200);
    drag.tick(&mut m).unwrap();
    drag.on_key(false);

    // Act
    m.restore(7).unwrap();

    // Assert
    assert_eq!(m.desktop().rect(7), original);
}
