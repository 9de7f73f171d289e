//! Gesture state machine: turns pointer and keyboard events into graph edits.

use crate::algorithms::invariants::check_graph;
use crate::config::EditorConfig;
use crate::diagnostics::{DiagnosticsHost, EventLog, LogEntry};
use crate::error::{check_coord, Result, WireError};
use crate::frame::{draw_frame, Frame, Renderer};
use crate::geometry::math::{grid_round, is_octilinear};
use crate::model::{Hit, PointId};
use crate::Graph;
use tracing::{debug, error, warn};

pub const ALERT_MESSAGE: &str = "An error has happened, check the console for logs and report them.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging(PointId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Draw, branch, split
    Primary,
    /// Erase
    Secondary,
    /// Middle, back, forward: logged and otherwise ignored
    Other(u8),
}

impl PointerButton {
    /// DOM `MouseEvent.button` numbering
    pub fn from_dom(button: u8) -> Result<Self> {
        match button {
            0 => Ok(PointerButton::Primary),
            2 => Ok(PointerButton::Secondary),
            1 | 3 | 4 => Ok(PointerButton::Other(button)),
            b => Err(WireError::InvalidButton(b)),
        }
    }
}

/// One editing session: owns the graph, the gesture state and the diagnostic log.
pub struct EditorSession<H: DiagnosticsHost> {
    graph: Graph,
    state: DragState,
    config: EditorConfig,
    log: EventLog,
    host: H,
    cursor: Option<(f64, f64)>,
    last_drag: Option<(f64, f64)>,
    last_move: Option<(f64, f64)>,
    alerted: bool,
    seen_ver: u64,
    hover_dirty: bool,
}

impl<H: DiagnosticsHost> EditorSession<H> {
    pub fn new(host: H) -> Self {
        Self::build(host, EditorConfig::default())
    }
    /// Fails without building anything if `config` does not validate.
    pub fn with_config(host: H, config: EditorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(host, config))
    }
    fn build(host: H, config: EditorConfig) -> Self {
        EditorSession {
            graph: Graph::new(),
            state: DragState::Idle,
            config,
            log: EventLog::new(),
            host,
            cursor: None,
            last_drag: None,
            last_move: None,
            alerted: false,
            seen_ver: 0,
            hover_dirty: false,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }
    /// Direct graph access for scripted setup. Edits made here bypass the event log.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }
    pub fn state(&self) -> DragState {
        self.state
    }
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }
    pub fn set_config(&mut self, config: EditorConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
    pub fn log(&self) -> &EventLog {
        &self.log
    }
    pub fn host(&self) -> &H {
        &self.host
    }
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
    pub fn dragging(&self) -> Option<PointId> {
        match self.state {
            DragState::Dragging(id) => Some(id),
            DragState::Idle => None,
        }
    }

    fn snap(&self, v: f64) -> f64 {
        grid_round(v, self.config.grid)
    }

    // Pointer events
    pub fn pointer_down(&mut self, x: f64, y: f64, modifier: bool, button: u8) -> Result<()> {
        check_coord("x", x)?;
        check_coord("y", y)?;
        let pressed = PointerButton::from_dom(button)?;
        let time = self.log.now();
        self.log.push(LogEntry::MouseDown { time, x, y, shift: modifier, button });
        if self.dragging().is_some() {
            self.finish_drag();
        }
        let hit = self.graph.pick(x, y, self.config.pick_radius);
        debug!(x, y, modifier, button, ?hit, "pointer down");
        match pressed {
            PointerButton::Primary => self.primary_down(x, y, modifier, hit),
            PointerButton::Secondary => self.secondary_down(modifier, hit),
            PointerButton::Other(_) => {}
        }
        self.verify();
        Ok(())
    }

    fn primary_down(&mut self, x: f64, y: f64, modifier: bool, hit: Option<Hit>) {
        let (sx, sy) = (self.snap(x), self.snap(y));
        let g = &mut self.graph;
        let grabbed = match hit {
            Some(Hit::Point { id, .. }) if modifier => Some(id),
            Some(Hit::Point { id, .. }) => {
                // Pull a new wire out of the point without disturbing it
                g.position(id).map(|(px, py)| {
                    let dup = g.create_point(px, py);
                    g.connect(id, dup);
                    dup
                })
            }
            Some(Hit::Segment { a, b, .. }) => {
                let joint = g.create_point(sx, sy);
                match g.insert_point_on_edge(joint, a, b) {
                    Some(j) if modifier => Some(j),
                    Some(j) => {
                        let dup = g.create_point(sx, sy);
                        g.connect(j, dup);
                        Some(dup)
                    }
                    None => {
                        g.drop_point(joint);
                        None
                    }
                }
            }
            None if modifier => {
                let anchor = g.create_point(sx, sy);
                let tip = g.create_point(sx, sy);
                g.connect(anchor, tip);
                Some(tip)
            }
            None => None,
        };
        if let Some(id) = grabbed {
            self.state = DragState::Dragging(id);
            self.last_drag = None;
        }
    }

    fn secondary_down(&mut self, modifier: bool, hit: Option<Hit>) {
        let g = &mut self.graph;
        match hit {
            Some(Hit::Point { id, .. }) if modifier => {
                g.remove_component(id);
            }
            Some(Hit::Point { id, .. }) => {
                g.remove_point(id, true);
            }
            Some(Hit::Segment { a, .. }) if modifier => {
                g.remove_component(a);
            }
            Some(Hit::Segment { a, b, .. }) => {
                g.disconnect(a, b, true);
            }
            None => {}
        }
    }

    /// Hover tracking only; never edits the graph.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<()> {
        check_coord("x", x)?;
        check_coord("y", y)?;
        self.cursor = Some((x, y));
        self.hover_dirty = true;
        let rounded = (self.snap(x), self.snap(y));
        if self.last_move != Some(rounded) {
            let time = self.log.now();
            self.log.push(LogEntry::MouseMove { time, x: rounded.0, y: rounded.1 });
            self.last_move = Some(rounded);
        }
        Ok(())
    }

    /// Move the dragged point to the grid spot under the cursor. The move is only taken if
    /// every edge of the point stays at a multiple of 45 degrees. Returns whether the drag
    /// was consumed; `false` means the caller may pan instead.
    pub fn pointer_drag(&mut self, x: f64, y: f64) -> Result<bool> {
        check_coord("x", x)?;
        check_coord("y", y)?;
        let (x, y) = (self.snap(x), self.snap(y));
        if self.last_drag != Some((x, y)) {
            let time = self.log.now();
            self.log.push(LogEntry::MouseDrag { time, x, y });
        }
        self.last_drag = Some((x, y));
        let Some(id) = self.dragging() else { return Ok(false) };
        if !self.graph.contains(id) {
            warn!(id, "dragged point vanished");
            self.state = DragState::Idle;
            return Ok(false);
        }
        let aligned = self
            .graph
            .neighbors(id)
            .iter()
            .filter_map(|&c| self.graph.position(c))
            .all(|(cx, cy)| is_octilinear(x - cx, y - cy));
        if aligned {
            self.graph.move_point(id, x, y);
        }
        Ok(true)
    }

    pub fn pointer_up(&mut self) {
        let time = self.log.now();
        self.log.push(LogEntry::MouseUp { time });
        self.finish_drag();
        self.verify();
    }

    /// The pointer left the surface; an open drag resolves as if released.
    pub fn pointer_leave(&mut self) {
        self.cursor = None;
        self.hover_dirty = true;
        if self.dragging().is_some() {
            self.pointer_up();
        }
    }

    fn finish_drag(&mut self) {
        if let DragState::Dragging(id) = self.state {
            debug!(id, "drag released");
            self.graph.simplify(id);
        }
        self.state = DragState::Idle;
        self.last_drag = None;
    }

    // Keyboard
    pub fn key_down(&mut self, key: &str) {
        let time = self.log.now();
        self.log.push(LogEntry::KeyDown { time, key: key.to_string() });
        match key {
            "p" => {
                let dump = self.graph.adjacency_list();
                self.host.console(&dump);
            }
            "l" => {
                let last = self.host.load(&self.config.storage_key);
                let text = match last {
                    Some(json) => format!("lastLog: {}", json),
                    None => "lastLog: null".to_string(),
                };
                self.host.console(&text);
            }
            _ => {}
        }
    }

    // Diagnostics
    /// Run the invariant checker when enabled. Violations are logged and persisted; the
    /// first one in a session also raises an alert. Returns the number of violations.
    pub fn verify(&mut self) -> usize {
        if !self.config.check_invariants {
            return 0;
        }
        self.verify_now()
    }

    pub fn verify_now(&mut self) -> usize {
        let violations = check_graph(&self.graph);
        if violations.is_empty() {
            return 0;
        }
        for v in &violations {
            error!(kind = ?v.kind(), "{}", v);
            self.host.console(&v.to_string());
            self.log.record_violation(v);
        }
        self.persist_log();
        if !self.alerted {
            self.alerted = true;
            self.host.alert(ALERT_MESSAGE, self.config.alert_delay_ms);
        }
        violations.len()
    }

    pub fn persist_log(&mut self) {
        match self.log.to_json() {
            Ok(json) => self.host.persist(&self.config.storage_key, &json),
            Err(e) => error!("failed to serialize event log: {}", e),
        }
    }

    // Rendering
    pub fn frame(&self) -> Frame {
        Frame::build(&self.graph, self.dragging(), self.cursor, self.config.hover_radius, self.config.grid)
    }
    pub fn render<R: Renderer + ?Sized>(&self, r: &mut R) {
        draw_frame(&self.frame(), r);
    }
    /// True once per change: geometry edits or cursor movement since the last call.
    pub fn take_dirty(&mut self) -> bool {
        let ver = self.graph.geom_version();
        let dirty = ver != self.seen_ver || self.hover_dirty;
        self.seen_ver = ver;
        self.hover_dirty = false;
        dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemoryHost;
    use tracing_test::traced_test;

    fn session() -> EditorSession<MemoryHost> {
        let config = EditorConfig { check_invariants: true, ..EditorConfig::default() };
        EditorSession::with_config(MemoryHost::default(), config).unwrap()
    }

    fn corrupt(s: &mut EditorSession<MemoryHost>) {
        let g = s.graph_mut();
        let a = g.create_point(0.0, 0.0);
        let b = g.create_point(1.0, 0.0);
        g.connect(a, b);
        // Leave a dangling reference behind
        g.points[b as usize] = None;
    }

    #[traced_test]
    #[test]
    fn violations_are_logged_persisted_and_alerted_once() {
        let mut s = session();
        corrupt(&mut s);
        assert_eq!(s.verify(), 1);
        assert!(logs_contain("ghost point detected"));
        assert_eq!(s.host().alerts, vec![ALERT_MESSAGE.to_string()]);
        let stored = s.host().storage.get("lastLog").cloned().unwrap();
        assert!(stored.contains("ghost_reference"));

        // Second violation: logged again, no second alert
        s.pointer_up();
        assert_eq!(s.host().alerts.len(), 1);
        let errors = s.log().entries().iter().filter(|e| matches!(e, LogEntry::Error { .. })).count();
        assert_eq!(errors, 2);
        // Graph is left exactly as it was
        assert_eq!(s.graph().check().len(), 1);
    }

    #[test]
    fn disabled_checker_stays_quiet() {
        let mut s = session();
        s.set_config(EditorConfig { check_invariants: false, ..EditorConfig::default() }).unwrap();
        corrupt(&mut s);
        s.pointer_up();
        assert!(s.host().alerts.is_empty());
        assert!(s.host().storage.is_empty());
        assert_eq!(s.verify_now(), 1);
    }

    #[test]
    fn key_dumps_go_to_console() {
        let mut s = session();
        s.key_down("l");
        let g = s.graph_mut();
        let a = g.create_point(0.0, 0.0);
        let b = g.create_point(0.0, 1.0);
        g.connect(a, b);
        s.key_down("p");
        s.persist_log();
        s.key_down("l");
        s.key_down("x");
        let console = &s.host().console;
        assert_eq!(console.len(), 3);
        assert_eq!(console[0], "lastLog: null");
        assert_eq!(console[1], "0   -   1\n1   -   0");
        assert!(console[2].starts_with("lastLog: ["));
        assert_eq!(s.log().len(), 4);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        for grid in [0.0, -1.0, f64::NAN] {
            let config = EditorConfig { grid, ..EditorConfig::default() };
            let r = EditorSession::with_config(MemoryHost::default(), config);
            assert!(matches!(r, Err(WireError::OutOfRange { param: "grid", .. }) | Err(WireError::NonFinite { param: "grid" })));
        }
        let config = EditorConfig { pick_radius: -0.5, ..EditorConfig::default() };
        assert!(EditorSession::with_config(MemoryHost::default(), config).is_err());
    }

    #[test]
    fn bad_parameters_fail_before_logging() {
        let mut s = session();
        assert!(matches!(s.pointer_down(f64::NAN, 0.0, false, 0), Err(WireError::NonFinite { param: "x" })));
        assert!(matches!(s.pointer_down(0.0, 0.0, false, 9), Err(WireError::InvalidButton(9))));
        assert!(matches!(s.pointer_drag(0.0, 1e12), Err(WireError::OutOfRange { param: "y", .. })));
        assert!(s.log().is_empty());
    }
}
