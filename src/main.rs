use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use indoc::indoc;
use tracing::Level;

use surface_wm::design::SelectionOp;
use surface_wm::drivers::InputDriver;
use surface_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use surface_wm::event_loop::{ControlFlow, EventLoop};
use surface_wm::menu::MenuItem;
use surface_wm::render::paint::paint;
use surface_wm::window::decorator::OpenStepDecorator;
use surface_wm::{
    Bounds, Capabilities, DisplayKey, EventDispatcher, MenuId, MenuKey, Notification, SurfaceEventKind,
    SurfaceId, SurfaceKey, SurfaceKind, WindowManager, WindowStyle, WmConfig, tracing_sub,
};

const HELP: &str = indoc! {"
    Drag captions to move windows, borders or the corner grip to resize.
    Tab / Shift+Tab cycle fields, Alt+` cycles windows, Esc closes.
    Right-click the desktop for a menu. Ctrl+D toggles design mode on the
    active window's canvas. Ctrl+Q quits.
"};

#[derive(Parser, Debug)]
#[command(version, about = "Floating-window desktop demo", long_about = HELP)]
struct Args {
    /// Number of demo windows to open.
    #[arg(long, default_value_t = 3)]
    windows: usize,

    /// Grid size used when moving and resizing in design mode.
    #[arg(long, default_value_t = 2.0)]
    grid: f64,

    /// Upper bound on how long to wait for input between redraws.
    #[arg(long, default_value_t = 16)]
    poll_ms: u64,

    /// Write logs here instead of discarding them.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value_t = Level::DEBUG)]
    log_level: Level,
}

struct Demo {
    wm: WindowManager,
    display: DisplayKey,
    dispatcher: EventDispatcher,
    menu: MenuKey,
    canvases: Vec<SurfaceKey>,
    next_id: i64,
}

impl Demo {
    fn new(args: &Args, area: Bounds) -> surface_wm::Result<Self> {
        let config = WmConfig {
            design_handle_size: 1.0,
            resize_grip: 1.0,
            ..WmConfig::default()
        }
        .with_design_grid(args.grid);
        let mut wm = WindowManager::new().with_config(config);
        let display = wm.create_display("console")?;
        wm.create_desktop(display, area)?;

        let menu = wm.create_menu(display, MenuId::new(1))?;
        if let Some(m) = wm.menu_mut(menu) {
            m.items.push(MenuItem::new("New window"));
            m.items.push(MenuItem::separator());
            m.items.push(MenuItem::new("Close all"));
        }

        let mut dispatcher = EventDispatcher::new(display);
        dispatcher.start(&wm)?;
        let mut demo = Self {
            wm,
            display,
            dispatcher,
            menu,
            canvases: Vec::new(),
            next_id: 1,
        };
        for _ in 0..args.windows {
            demo.open_window()?;
        }
        Ok(demo)
    }

    fn id(&mut self) -> SurfaceId {
        let id = SurfaceId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn control(&mut self, parent: SurfaceKey, caps: Capabilities, text: &str, b: Bounds) -> surface_wm::Result<SurfaceKey> {
        let id = self.id();
        let s = self
            .wm
            .create_surface(self.display, id, SurfaceKind::Control(caps))?;
        self.wm.set_parent(s, Some(parent))?;
        self.wm.set_bounds(s, b)?;
        self.wm.set_text(s, text)?;
        Ok(s)
    }

    /// A framed window with a small form and a design canvas.
    fn open_window(&mut self) -> surface_wm::Result<SurfaceKey> {
        let Some(desk) = self.wm.desktop(self.display) else {
            return Err(surface_wm::DisplayError::InvalidState("display has no desktop"));
        };
        let n = self.canvases.len() as f64;
        let id = self.id();
        let w = self
            .wm
            .create_surface(self.display, id, SurfaceKind::Window(WindowStyle::framed()))?;
        self.wm.set_parent(w, Some(desk))?;
        self.wm
            .set_bounds(w, Bounds::new(2.0 + n * 6.0, 1.0 + n * 3.0, 40.0, 14.0))?;
        self.wm.set_text(w, &format!("Window {}", id.get()))?;

        self.control(w, Capabilities::empty(), "Name:", Bounds::new(1.0, 0.0, 6.0, 1.0))?;
        self.control(w, Capabilities::SELECTABLE, "[ first  ]", Bounds::new(8.0, 0.0, 12.0, 1.0))?;
        self.control(w, Capabilities::SELECTABLE, "[ second ]", Bounds::new(21.0, 0.0, 12.0, 1.0))?;

        let cid = self.id();
        let canvas = self
            .wm
            .create_surface(self.display, cid, SurfaceKind::Workspace)?;
        self.wm.set_parent(canvas, Some(w))?;
        self.wm.set_bounds(canvas, Bounds::new(1.0, 2.0, 36.0, 8.0))?;
        self.control(canvas, Capabilities::SELECTABLE, "[ OK ]", Bounds::new(2.0, 1.0, 6.0, 1.0))?;
        self.control(canvas, Capabilities::SELECTABLE, "[ Cancel ]", Bounds::new(10.0, 1.0, 10.0, 1.0))?;
        self.canvases.push(canvas);
        tracing::info!(window = ?w, "opened demo window");
        Ok(w)
    }

    fn toggle_design(&mut self) -> surface_wm::Result<()> {
        let Some(active) = self.wm.active_window() else {
            return Ok(());
        };
        let Some(canvas) = self
            .canvases
            .iter()
            .copied()
            .find(|c| self.wm.parent(*c) == Some(active))
        else {
            return Ok(());
        };
        let on = !self.wm.is_designing(canvas);
        if !on {
            self.wm.stop_design(canvas)?;
        }
        self.wm.set_design_mode(canvas, on)?;
        for child in self.wm.children(canvas) {
            self.wm.set_design_mode(child, on)?;
        }
        if on {
            self.wm.design_surface(canvas)?;
            self.wm
                .set_design_selection(canvas, None, SelectionOp::SELECT | SelectionOp::CLEAR)?;
        }
        Ok(())
    }

    fn handle_notifications(&mut self) -> surface_wm::Result<()> {
        for n in self.wm.take_notifications() {
            match n {
                Notification::Input(ev) => match ev.kind {
                    SurfaceEventKind::ContextAction if Some(ev.target) == self.wm.desktop(self.display) => {
                        self.wm.show_menu(self.menu, ev.screen)?;
                    }
                    SurfaceEventKind::Click if self.wm.any_menus_open(self.display) => {
                        self.menu_click(ev.screen)?;
                    }
                    _ => {}
                },
                Notification::Destroyed { surface, .. } => {
                    self.canvases.retain(|c| *c != surface);
                }
                other => tracing::trace!(notification = ?other, "unhandled"),
            }
        }
        Ok(())
    }

    fn menu_click(&mut self, at: surface_wm::Point) -> surface_wm::Result<()> {
        let Some(origin) = self.wm.menu(self.menu).and_then(|m| m.shown_at()) else {
            return Ok(());
        };
        self.wm.dismiss_menus(self.display);
        let row = (at.y - origin.y).floor();
        if at.x < origin.x || row < 0.0 {
            return Ok(());
        }
        match row as usize {
            0 => {
                self.open_window()?;
            }
            2 => {
                if let Some(desk) = self.wm.desktop(self.display) {
                    for w in self.wm.children(desk) {
                        self.wm.close(w)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if args.log_file.is_some() {
        tracing_sub::init(args.log_level, args.log_file.as_deref())?;
    }

    let mut output = ConsoleOutputDriver::new()?;
    let area = output.area()?;
    let mut demo = Demo::new(
        &args,
        Bounds::new(0.0, 0.0, f64::from(area.width), f64::from(area.height)),
    )
    .map_err(io::Error::other)?;
    output.enter()?;

    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;
    let mut event_loop = EventLoop::new(input, Duration::from_millis(args.poll_ms));
    let decorator = OpenStepDecorator;

    let result = event_loop.run(|_driver, event| {
        let Some(event) = event else {
            demo.wm.run_deferred(Instant::now());
            demo.handle_notifications().map_err(io::Error::other)?;
            output.draw(|frame| {
                let area = frame.area();
                paint(&demo.wm, demo.display, area, frame.buffer_mut(), &decorator);
            })?;
            return Ok(match demo.wm.next_deadline() {
                Some(due) => ControlFlow::WaitUntil(due),
                None => ControlFlow::Continue,
            });
        };
        if let Event::Key(key) = &event
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            match key.code {
                KeyCode::Char('q') => return Ok(ControlFlow::Quit),
                KeyCode::Char('d') => {
                    demo.toggle_design().map_err(io::Error::other)?;
                    return Ok(ControlFlow::Continue);
                }
                _ => {}
            }
        }
        if let Err(err) = demo.dispatcher.dispatch(&mut demo.wm, &event) {
            tracing::warn!(%err, "event not dispatched");
        }
        Ok(ControlFlow::Continue)
    });

    event_loop.driver().set_mouse_capture(false)?;
    output.exit()?;
    result
}
