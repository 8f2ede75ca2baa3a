use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use surface_wm::design::SelectionOp;
use surface_wm::{
    Bounds, Capabilities, DisplayKey, EventDispatcher, Notification, SurfaceId, SurfaceKey,
    SurfaceKind, WindowManager, WmConfig,
};

struct Canvas {
    wm: WindowManager,
    display: DisplayKey,
    root: SurfaceKey,
    dispatcher: EventDispatcher,
}

fn canvas(grid: f64) -> Canvas {
    let mut wm = WindowManager::new().with_config(WmConfig::default().with_design_grid(grid));
    let display = wm.create_display("main").unwrap();
    let desk = wm
        .create_desktop(display, Bounds::new(0.0, 0.0, 120.0, 40.0))
        .unwrap();
    let root = wm
        .create_surface(display, SurfaceId::new(1), SurfaceKind::Workspace)
        .unwrap();
    wm.set_parent(root, Some(desk)).unwrap();
    wm.set_bounds(root, Bounds::new(0.0, 0.0, 120.0, 40.0)).unwrap();
    wm.set_design_mode(root, true).unwrap();
    let mut dispatcher = EventDispatcher::new(display);
    dispatcher.start(&wm).unwrap();
    Canvas {
        wm,
        display,
        root,
        dispatcher,
    }
}

fn part(c: &mut Canvas, id: i64, bounds: Bounds) -> SurfaceKey {
    let s = c
        .wm
        .create_surface(c.display, SurfaceId::new(id), SurfaceKind::Control(Capabilities::SELECTABLE))
        .unwrap();
    c.wm.set_parent(s, Some(c.root)).unwrap();
    c.wm.set_bounds(s, bounds).unwrap();
    c.wm.set_design_mode(s, true).unwrap();
    s
}

fn mouse(kind: MouseEventKind, column: u16, row: u16, modifiers: KeyModifiers) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers,
    })
}

fn send(c: &mut Canvas, events: &[Event]) {
    for ev in events {
        c.dispatcher.dispatch(&mut c.wm, ev).unwrap();
    }
}

#[test]
fn pointer_drag_snaps_to_the_grid() {
    let mut c = canvas(8.0);
    let a = part(&mut c, 2, Bounds::new(16.0, 8.0, 10.0, 4.0));
    c.wm.design_surface(c.root).unwrap();
    c.wm.take_notifications();

    let none = KeyModifiers::NONE;
    send(
        &mut c,
        &[
            mouse(MouseEventKind::Down(MouseButton::Left), 17, 9, none),
            // 16 + 3 = 19 snaps back to 16.
            mouse(MouseEventKind::Drag(MouseButton::Left), 20, 9, none),
        ],
    );
    assert_eq!(c.wm.design_selection(c.root), vec![a]);
    assert_eq!(c.wm.bounds(a).x, 16.0);

    // 16 + 5 = 21 snaps forward to 24.
    send(
        &mut c,
        &[
            mouse(MouseEventKind::Drag(MouseButton::Left), 22, 9, none),
            mouse(MouseEventKind::Up(MouseButton::Left), 22, 9, none),
        ],
    );
    assert_eq!(c.wm.bounds(a), Bounds::new(24.0, 8.0, 10.0, 4.0));
    assert!(c.wm.design_dragging().is_none());
    let notes = c.wm.take_notifications();
    assert!(notes.contains(&Notification::DesignSelectionChanged { root: c.root }));
    assert!(notes.contains(&Notification::DesignMoved {
        root: c.root,
        surface: a
    }));
}

#[test]
fn ctrl_click_toggles_and_same_parent_rule_applies() {
    let mut c = canvas(8.0);
    let a = part(&mut c, 2, Bounds::new(8.0, 8.0, 6.0, 2.0));
    let b = part(&mut c, 3, Bounds::new(24.0, 8.0, 6.0, 2.0));
    c.wm.design_surface(c.root).unwrap();

    let none = KeyModifiers::NONE;
    let ctrl = KeyModifiers::CONTROL;
    send(
        &mut c,
        &[
            mouse(MouseEventKind::Down(MouseButton::Left), 9, 8, none),
            mouse(MouseEventKind::Up(MouseButton::Left), 9, 8, none),
            mouse(MouseEventKind::Down(MouseButton::Left), 25, 8, ctrl),
            mouse(MouseEventKind::Up(MouseButton::Left), 25, 8, ctrl),
        ],
    );
    assert_eq!(c.wm.design_selection(c.root), vec![a, b]);

    send(
        &mut c,
        &[
            mouse(MouseEventKind::Down(MouseButton::Left), 9, 8, ctrl),
            mouse(MouseEventKind::Up(MouseButton::Left), 9, 8, ctrl),
        ],
    );
    assert_eq!(c.wm.design_selection(c.root), vec![b]);

    // Selecting the root alone replaces everything.
    c.wm.set_design_selection(c.root, Some(c.root), SelectionOp::SELECT)
        .unwrap();
    assert_eq!(c.wm.design_selection(c.root), vec![c.root]);
}

#[test]
fn design_targets_never_see_ordinary_input() {
    let mut c = canvas(8.0);
    let a = part(&mut c, 2, Bounds::new(8.0, 8.0, 6.0, 2.0));
    // Not designing yet: the part is in design mode, so the press is dropped.
    c.wm.take_notifications();
    let consumed = c
        .dispatcher
        .dispatch(
            &mut c.wm,
            &mouse(MouseEventKind::Down(MouseButton::Left), 9, 8, KeyModifiers::NONE),
        )
        .unwrap();
    assert!(!consumed);
    assert!(
        !c.wm
            .take_notifications()
            .iter()
            .any(|n| matches!(n, Notification::Input(ev) if ev.target == a))
    );
}
