use std::path::PathBuf;

use crate::assistant::{Assistant, Task, TextGenerator};
use crate::map::GlobeViewport;
use crate::scene::{Globe, MarkerHandle, MarkerStyle, Scene};
use crate::session::{Session, View};

pub type DynAssistant = Assistant<Box<dyn TextGenerator>>;

/// Which pane fills the main area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Text,
    Globe,
}

/// Application state
pub struct App {
    pub session: Session,
    assistant: Option<DynAssistant>,
    pub globe: Globe,
    pub scene: Scene,
    pub markers: MarkerHandle,
    pub viewport: GlobeViewport,
    pub tab: Tab,
    /// Text pane scroll offset in lines
    pub scroll: u16,
    /// Request to run once the "thinking" frame has been drawn
    pub pending: Option<Task>,
    pub out_dir: PathBuf,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
}

impl App {
    pub fn new(
        globe: Globe,
        assistant: Option<DynAssistant>,
        out_dir: PathBuf,
        width: usize,
        height: usize,
    ) -> Self {
        let (scene, markers) = globe.build();
        let (pw, ph) = pixel_size(width, height);
        Self {
            session: Session::new(),
            assistant,
            globe,
            scene,
            markers,
            viewport: GlobeViewport::fit(12.5, 41.9, pw, ph),
            tab: Tab::Text,
            scroll: 0,
            pending: None,
            out_dir,
            should_quit: false,
            last_mouse: None,
        }
    }

    /// Show the given points on the globe with default marker styling.
    pub fn set_markers(&mut self, lons: &[f64], lats: &[f64]) -> anyhow::Result<()> {
        self.globe
            .update_markers(&mut self.scene, self.markers, lons, lats, &MarkerStyle::default())?;
        Ok(())
    }

    pub fn load_document(&mut self, name: &str, text: String) {
        if self.session.load_document(name, text) {
            self.scroll = 0;
            self.tab = Tab::Text;
        }
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: usize, height: usize) {
        let (pw, ph) = pixel_size(width, height);
        self.viewport.set_size(pw, ph);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn show_original(&mut self) {
        self.session.show_original();
        self.tab = Tab::Text;
        self.scroll = 0;
    }

    pub fn show_globe(&mut self) {
        self.tab = Tab::Globe;
    }

    /// Queue an assistant request; the main loop runs it after the next draw.
    pub fn request(&mut self, task: Task) {
        if self.assistant.is_none() {
            self.session.status = "No model configured (set GOOGLE_API_KEY)".to_string();
            return;
        }
        let cached = match task {
            Task::Summarize => self.session.summary.is_some(),
            Task::Translate => self.session.translation.is_some(),
        };
        if !cached {
            self.session.status = "Assistant is thinking...".to_string();
        }
        self.pending = Some(task);
        self.tab = Tab::Text;
    }

    /// Run the queued request, if any. Blocks until the model answers.
    pub fn run_pending(&mut self) {
        let Some(task) = self.pending.take() else {
            return;
        };
        let Some(assistant) = self.assistant.as_ref() else {
            return;
        };
        let result = match task {
            Task::Summarize => self.session.summarize(assistant),
            Task::Translate => self.session.translate(assistant),
        };
        self.session.status = match result {
            Ok(()) => match self.session.file_name.as_deref() {
                Some(name) => format!("{}: {}", name, self.view_title()),
                None => self.view_title().to_string(),
            },
            Err(e) => {
                tracing::error!(error = %e, "assistant request failed");
                format!("Error: {e:#}")
            }
        };
        self.scroll = 0;
    }

    pub fn download(&mut self) {
        self.session.status = match self.session.download(&self.out_dir) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => format!("Error: {e:#}"),
        };
    }

    pub fn view_title(&self) -> &'static str {
        self.session.viewing.map(View::title).unwrap_or("No document")
    }

    pub fn scroll_by(&mut self, lines: i32) {
        self.scroll = (self.scroll as i32 + lines).clamp(0, u16::MAX as i32) as u16;
    }

    /// hjkl / arrows: scroll text by lines, or spin the globe in 10 degree steps.
    pub fn navigate(&mut self, dx: i32, dy: i32) {
        match self.tab {
            Tab::Text => self.scroll_by(dy),
            Tab::Globe => self
                .viewport
                .rotate_degrees(dx as f64 * 10.0, -(dy as f64) * 10.0),
        }
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = (x as i32 - last_x as i32) * 2;
            let dy = (y as i32 - last_y as i32) * 4;
            match self.tab {
                Tab::Globe => self.viewport.rotate_drag(dx, dy),
                Tab::Text => self.scroll_by(-(dy / 4)),
            }
        }
        self.last_mouse = Some((x, y));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn center_coords(&self) -> String {
        let (lon, lat) = self.viewport.center_lonlat();
        format!(
            "{:.1}°{}, {:.1}°{}",
            lat.abs(),
            if lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" }
        )
    }
}

/// Braille pixel size of the main pane for a terminal of `width` x `height` cells
/// (one border cell each side, plus tab and status rows).
fn pixel_size(width: usize, height: usize) -> (usize, usize) {
    let inner_width = width.saturating_sub(2);
    let inner_height = height.saturating_sub(4);
    (inner_width * 2, inner_height * 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::tests::Recorder;
    use crate::data::LandPolygon;
    use crate::scene::GlobeConfig;
    use std::rc::Rc;

    struct Shared(Rc<Recorder>);

    impl TextGenerator for Shared {
        fn generate(&self, instructions: &str, input: &str) -> anyhow::Result<String> {
            self.0.generate(instructions, input)
        }
    }

    fn app_with(recorder: Option<Rc<Recorder>>) -> App {
        let land = vec![LandPolygon::new(vec![(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 0.0)])];
        let globe = Globe::from_polygons(GlobeConfig::default(), land);
        let assistant = recorder.map(|r| Assistant::new(Box::new(Shared(r)) as Box<dyn TextGenerator>));
        App::new(globe, assistant, std::env::temp_dir(), 80, 24)
    }

    #[test]
    fn test_request_is_deferred_until_run() {
        let recorder = Rc::new(Recorder::default());
        let mut app = app_with(Some(recorder.clone()));
        app.load_document("essay.txt", "Cogito".to_string());

        app.request(Task::Summarize);
        assert_eq!(app.session.status, "Assistant is thinking...");
        assert!(recorder.calls.borrow().is_empty());

        app.run_pending();
        assert_eq!(recorder.calls.borrow().len(), 1);
        assert_eq!(app.session.viewing, Some(View::Summary));
        assert_eq!(app.session.status, "essay.txt: Summary");
        assert!(app.pending.is_none());
    }

    #[test]
    fn test_request_without_model() {
        let mut app = app_with(None);
        app.load_document("essay.txt", "Cogito".to_string());
        app.request(Task::Translate);
        assert!(app.pending.is_none());
        assert!(app.session.status.contains("No model"));
    }

    #[test]
    fn test_request_without_document_reports_error() {
        let recorder = Rc::new(Recorder::default());
        let mut app = app_with(Some(recorder));
        app.request(Task::Summarize);
        app.run_pending();
        assert!(app.session.status.starts_with("Error:"));
    }

    #[test]
    fn test_markers_and_navigation() {
        let mut app = app_with(None);
        app.set_markers(&[12.5], &[41.9]).unwrap();
        assert_eq!(app.scene.markers(app.markers).unwrap().points.len(), 1);
        assert!(app.set_markers(&[1.0], &[]).is_err());

        app.show_globe();
        let before = app.viewport.center_lon();
        app.navigate(1, 0);
        assert!(app.viewport.center_lon() > before + 1.0);

        app.tab = Tab::Text;
        app.navigate(0, 3);
        assert_eq!(app.scroll, 3);
        app.navigate(0, -10);
        assert_eq!(app.scroll, 0);
    }
}
