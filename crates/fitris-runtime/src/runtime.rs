use std::{io, time::Duration};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};

use crate::{
    App,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Runs an [`App`] in the terminal.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
///
/// use crossterm::event::Event;
/// use fitris_runtime::{App, RenderMode, Runtime};
/// use ratatui::Frame;
///
/// struct Counter {
///     elapsed: Duration,
/// }
///
/// impl App for Counter {
///     fn init(&mut self, runtime: &mut Runtime) {
///         runtime.set_tick_rate(Some(60.0));
///         runtime.set_render_mode(RenderMode::throttled_from_rate(30.0));
///     }
///
///     fn should_exit(&self) -> bool {
///         self.elapsed >= Duration::from_secs(3)
///     }
///
///     fn handle_event(&mut self, _runtime: &mut Runtime, _event: Event) {}
///
///     fn draw(&self, frame: &mut Frame) {
///         frame.render_widget(format!("{:.1}s", self.elapsed.as_secs_f32()), frame.area());
///     }
///
///     fn update(&mut self, _runtime: &mut Runtime, dt: Duration) {
///         self.elapsed += dt;
///     }
/// }
///
/// Runtime::new().run(&mut Counter { elapsed: Duration::ZERO }).unwrap();
/// ```
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
    mouse_capture: bool,
}

/// Keeps mouse reporting enabled while alive.
struct MouseCapture;

impl MouseCapture {
    fn enable() -> io::Result<Self> {
        execute!(io::stdout(), EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for MouseCapture {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture);
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick rate in ticks per second. `None` disables ticks.
    pub fn set_tick_rate(&mut self, rate: Option<f64>) {
        self.set_tick_interval(rate.map(|rate| Duration::from_secs_f64(1.0 / rate)));
    }

    pub fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.events.set_tick_interval(interval);
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Enables mouse button and motion events. Takes effect on [`run`](Self::run).
    pub fn set_mouse_capture(&mut self, enabled: bool) {
        self.mouse_capture = enabled;
    }

    /// Runs `app` until it asks to exit.
    ///
    /// 1. `app.init()`
    /// 2. Loop until `app.should_exit()`:
    ///    - tick: `app.update(dt)`
    ///    - render: `app.draw()`
    ///    - terminal event: `app.handle_event()`
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            let _mouse = self
                .mouse_capture
                .then(MouseCapture::enable)
                .transpose()?;
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Tick { dt } => app.update(&mut self, dt),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
