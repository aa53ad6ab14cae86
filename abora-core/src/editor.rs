//! Pointer/keyboard state machine for drawing linesegs.
//!
//! The editor is either idle or extending one lineseg. Clicks on empty canvas start a
//! new lineseg, clicks on an existing one select and extend it, ctrl-clicks add points
//! while extending and a plain click finishes. Handlers return `true` when the model
//! changed and needs a redraw.

use crate::config::EditorConfig;
use crate::lineseg::{Geometry, Lineseg, LinesegId};
use crate::transform::Transform;
use crate::types::{Colour, Point};
use crate::view::ViewState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Extending(LinesegId),
}

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorKey {
    Delete,
    Backspace,
}

impl EditorKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Delete" => Some(EditorKey::Delete),
            "Backspace" => Some(EditorKey::Backspace),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Editor {
    linesegs: Vec<Lineseg>,
    selected: Option<LinesegId>,
    extending: Option<LinesegId>,
    transform: Option<Transform>,
    next_id: u32,
    last_pointer: Point,
    geometry: Geometry,
    always_forward: bool,
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            linesegs: Vec::new(),
            selected: None,
            extending: None,
            transform: None,
            next_id: 0,
            last_pointer: Point::new(0.0, 0.0),
            geometry: config.geometry(),
            always_forward: config.always_forward,
        }
    }

    pub fn mode(&self) -> Mode {
        match self.extending {
            Some(id) => Mode::Extending(id),
            None => Mode::Idle,
        }
    }

    /// Linesegs in creation order; later ones are drawn on top.
    pub fn linesegs(&self) -> &[Lineseg] {
        &self.linesegs
    }

    pub fn selected(&self) -> Option<LinesegId> {
        self.selected
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Current pixel-to-domain map, identity until metadata has arrived.
    pub fn transform(&self) -> Transform {
        self.transform.unwrap_or(Transform::IDENTITY)
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    fn get_mut(&mut self, id: LinesegId) -> Option<&mut Lineseg> {
        self.linesegs.iter_mut().find(|s| s.id() == id)
    }

    /// Topmost lineseg under (x, y).
    fn hit(&self, x: f64, y: f64) -> Option<LinesegId> {
        self.linesegs
            .iter()
            .rev()
            .find(|s| s.hit_test(x, y, &self.geometry))
            .map(|s| s.id())
    }

    fn select(&mut self, id: LinesegId) {
        if let Some(prev) = self.selected.take() {
            if let Some(s) = self.get_mut(prev) {
                s.set_unselected();
            }
        }
        if let Some(s) = self.get_mut(id) {
            s.set_selected();
            self.selected = Some(id);
        }
    }

    fn create(&mut self, x: f64, y: f64) -> LinesegId {
        let id = LinesegId(self.next_id);
        self.next_id += 1;
        self.linesegs
            .push(Lineseg::new(id, x, y, self.always_forward));
        log::debug!("created lineseg {:?}; {} total", id, self.linesegs.len());
        id
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, ctrl: bool) -> bool {
        self.last_pointer = Point::new(x, y);

        if let Some(id) = self.extending {
            if ctrl {
                if let Some(s) = self.get_mut(id) {
                    s.add_point(x, y);
                }
                return true;
            }
            // Finish: drop back to idle with nothing selected.
            if let Some(s) = self.get_mut(id) {
                s.set_unselected();
            }
            if let Some(prev) = self.selected.take() {
                if let Some(s) = self.get_mut(prev) {
                    s.set_unselected();
                }
            }
            self.extending = None;
            return true;
        }

        let id = match self.hit(x, y) {
            Some(id) => {
                self.select(id);
                if let Some(s) = self.get_mut(id) {
                    s.add_point(x, y);
                }
                id
            }
            None => self.create(x, y),
        };
        self.extending = Some(id);
        true
    }

    /// Live drag of the extending lineseg's endpoint.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.last_pointer = Point::new(x, y);
        let Some(id) = self.extending else {
            return false;
        };
        match self.get_mut(id) {
            Some(s) => {
                s.set_endpoint(x, y);
                true
            }
            None => false,
        }
    }

    pub fn key_down(&mut self, key: EditorKey) -> bool {
        match key {
            EditorKey::Delete => {
                let Some(id) = self.selected.take() else {
                    return false;
                };
                self.linesegs.retain(|s| s.id() != id);
                self.extending = None;
                log::debug!("removed lineseg {:?}; {} remain", id, self.linesegs.len());
                true
            }
            EditorKey::Backspace => {
                if let Some(id) = self.selected {
                    if let Some(s) = self.get_mut(id) {
                        s.remove_last_point();
                    }
                    self.extending = None;
                    return true;
                }
                if let Some(id) = self.extending {
                    let Point { x, y } = self.last_pointer;
                    if let Some(s) = self.get_mut(id) {
                        s.remove_last_point();
                        s.set_endpoint(x, y);
                    }
                    return true;
                }
                false
            }
        }
    }

    /// Switch to a new view transform, keeping every lineseg at the same
    /// (time, freq). The first transform has nothing to map from.
    pub fn set_transform(&mut self, new: Transform) {
        if let Some(old) = self.transform {
            for s in &mut self.linesegs {
                s.set_transformation(&old, &new);
            }
        }
        self.transform = Some(new);
    }

    /// Apply a transform built from metadata requested for `requested`. Responses
    /// can arrive out of order; one for a view the user has already left is dropped.
    pub fn set_transform_for_view(
        &mut self,
        requested: &ViewState,
        current: &ViewState,
        new: Transform,
    ) -> bool {
        if requested != current {
            log::debug!(
                "dropping transform for t={} (view now at t={})",
                requested.offset,
                current.offset
            );
            return false;
        }
        self.set_transform(new);
        true
    }

    /// One line per lineseg, in creation order.
    pub fn dump(&self) -> String {
        let trans = self.transform();
        self.linesegs
            .iter()
            .map(|s| s.to_string_form(&trans))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// (time, freq) under a pixel position.
    pub fn pointer_domain(&self, x: f64, y: f64) -> (f64, f64) {
        self.transform().to_domain(Point::new(x, y))
    }

    pub fn colour_of(&self, id: LinesegId) -> Option<Colour> {
        self.linesegs
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.colour())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SpectrogramMetadata;

    fn points(ed: &Editor, idx: usize) -> Vec<(f64, f64)> {
        ed.linesegs()[idx]
            .points()
            .iter()
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn click_on_empty_canvas_starts_lineseg() {
        let mut ed = Editor::default();
        assert_eq!(ed.mode(), Mode::Idle);
        assert!(ed.pointer_down(100.0, 50.0, false));

        assert_eq!(ed.linesegs().len(), 1);
        let id = ed.linesegs()[0].id();
        assert_eq!(ed.mode(), Mode::Extending(id));
        assert_eq!(ed.colour_of(id), Some(Colour::Drawing));
        assert_eq!(ed.selected(), None);
    }

    #[test]
    fn move_drags_endpoint_while_extending() {
        let mut ed = Editor::default();
        assert!(!ed.pointer_move(10.0, 10.0));
        ed.pointer_down(100.0, 50.0, false);
        assert!(ed.pointer_move(180.0, 70.0));
        assert_eq!(points(&ed, 0), vec![(100.0, 50.0), (180.0, 70.0)]);

        // Dragging behind the anchor clamps.
        ed.pointer_move(20.0, 90.0);
        assert_eq!(points(&ed, 0), vec![(100.0, 50.0), (100.0, 90.0)]);
    }

    #[test]
    fn ctrl_click_appends_and_plain_click_finishes() {
        let mut ed = Editor::default();
        ed.pointer_down(100.0, 50.0, false);
        ed.pointer_move(150.0, 60.0);
        ed.pointer_down(150.0, 60.0, true);
        ed.pointer_move(200.0, 40.0);
        assert_eq!(ed.linesegs()[0].len(), 3);

        let id = ed.linesegs()[0].id();
        ed.pointer_down(500.0, 500.0, false);
        assert_eq!(ed.mode(), Mode::Idle);
        assert_eq!(ed.colour_of(id), Some(Colour::Unselected));
        assert_eq!(ed.linesegs().len(), 1);

        // Moving while idle leaves the shape alone.
        assert!(!ed.pointer_move(300.0, 300.0));
        assert_eq!(points(&ed, 0)[2], (200.0, 40.0));
    }

    #[test]
    fn click_on_existing_selects_and_extends() {
        let mut ed = Editor::default();
        ed.pointer_down(100.0, 100.0, false);
        ed.pointer_move(200.0, 100.0);
        ed.pointer_down(200.0, 100.0, false);

        ed.pointer_down(150.0, 102.0, false);
        let id = ed.linesegs()[0].id();
        assert_eq!(ed.linesegs().len(), 1);
        assert_eq!(ed.selected(), Some(id));
        assert_eq!(ed.colour_of(id), Some(Colour::Selected));
        assert_eq!(ed.mode(), Mode::Extending(id));
        // The new point is clamped forward of the old endpoint.
        assert_eq!(points(&ed, 0)[2], (200.0, 102.0));
    }

    #[test]
    fn selecting_another_unselects_previous() {
        let mut ed = Editor::default();
        ed.pointer_down(10.0, 10.0, false);
        ed.pointer_down(10.0, 10.0, false);
        ed.pointer_down(10.0, 300.0, false);
        ed.pointer_down(10.0, 300.0, false);
        let (a, b) = (ed.linesegs()[0].id(), ed.linesegs()[1].id());

        ed.pointer_down(10.0, 10.0, false);
        ed.key_down(EditorKey::Backspace);
        assert_eq!(ed.selected(), Some(a));
        assert_eq!(ed.mode(), Mode::Idle);

        ed.pointer_down(10.0, 300.0, false);
        assert_eq!(ed.selected(), Some(b));
        assert_eq!(ed.colour_of(a), Some(Colour::Unselected));
        assert_eq!(ed.colour_of(b), Some(Colour::Selected));
    }

    #[test]
    fn delete_removes_selected_only() {
        let mut ed = Editor::default();
        ed.pointer_down(10.0, 10.0, false);
        // Nothing selected yet: an in-progress lineseg survives Delete.
        assert!(!ed.key_down(EditorKey::Delete));
        ed.pointer_down(10.0, 10.0, false);

        ed.pointer_down(10.0, 10.0, false);
        assert!(ed.key_down(EditorKey::Delete));
        assert!(ed.linesegs().is_empty());
        assert_eq!(ed.selected(), None);
        assert_eq!(ed.mode(), Mode::Idle);
    }

    #[test]
    fn backspace_on_selected_pops_and_stops_extending() {
        let mut ed = Editor::default();
        ed.pointer_down(0.0, 0.0, false);
        ed.pointer_move(50.0, 0.0);
        ed.pointer_down(50.0, 0.0, false);
        ed.pointer_down(25.0, 0.0, false);
        assert_eq!(ed.linesegs()[0].len(), 3);

        assert!(ed.key_down(EditorKey::Backspace));
        assert_eq!(ed.linesegs()[0].len(), 2);
        assert_eq!(ed.mode(), Mode::Idle);

        // Floor reached.
        ed.key_down(EditorKey::Backspace);
        assert_eq!(ed.linesegs()[0].len(), 2);
    }

    #[test]
    fn backspace_while_drawing_moves_endpoint_to_pointer() {
        let mut ed = Editor::default();
        ed.pointer_down(0.0, 0.0, false);
        ed.pointer_move(40.0, 0.0);
        ed.pointer_down(40.0, 0.0, true);
        ed.pointer_move(90.0, 30.0);
        assert_eq!(ed.linesegs()[0].len(), 3);

        assert!(ed.key_down(EditorKey::Backspace));
        assert_eq!(points(&ed, 0), vec![(0.0, 0.0), (90.0, 30.0)]);
        assert!(matches!(ed.mode(), Mode::Extending(_)));
    }

    #[test]
    fn backspace_with_nothing_active() {
        let mut ed = Editor::default();
        assert!(!ed.key_down(EditorKey::Backspace));
    }

    #[test]
    fn key_names() {
        assert_eq!(EditorKey::from_key("Delete"), Some(EditorKey::Delete));
        assert_eq!(EditorKey::from_key("Backspace"), Some(EditorKey::Backspace));
        assert_eq!(EditorKey::from_key("Enter"), None);
    }

    #[test]
    fn view_change_reprojects_and_dump_is_stable() {
        let meta = SpectrogramMetadata {
            time_resolution: 100.0,
            low_frequency: 500.0,
            high_frequency: 5000.0,
            frequency_buckets: 450,
        };
        let mut ed = Editor::default();
        ed.set_transform(Transform::from_metadata(0.0, &meta).unwrap());

        ed.pointer_down(300.0, 100.0, false);
        ed.pointer_move(400.0, 200.0);
        ed.pointer_down(400.0, 200.0, false);
        ed.pointer_down(900.0, 50.0, false);
        ed.pointer_move(950.0, 60.0);
        ed.pointer_down(950.0, 60.0, false);

        let before = ed.dump();
        assert_eq!(before.lines().count(), 2);
        assert!(before.starts_with("3:4000-4:3000"));

        ed.set_transform(Transform::from_metadata(2.0, &meta).unwrap());
        let (x, y) = points(&ed, 0)[0];
        assert!((x - 100.0).abs() < 1e-9 && (y - 100.0).abs() < 1e-9);

        let after = ed.dump();
        for (a, b) in before.lines().zip(after.lines()) {
            let parse = |l: &str| -> Vec<f64> {
                l.split(['-', ':']).map(|v| v.parse().unwrap()).collect()
            };
            for (x, y) in parse(a).iter().zip(parse(b)) {
                assert!((x - y).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn late_response_for_old_view_is_dropped() {
        let meta = SpectrogramMetadata {
            time_resolution: 100.0,
            low_frequency: 500.0,
            high_frequency: 5000.0,
            frequency_buckets: 450,
        };
        let mut view = ViewState::new(1000.0);
        view.step_forward(2.0);
        let first = view;
        view.step_forward(2.0);
        let second = view;

        let mut ed = Editor::default();
        ed.pointer_down(100.0, 100.0, false);

        // The newer request answers first, then the older one straggles in.
        let newer = Transform::from_metadata(second.offset, &meta).unwrap();
        let older = Transform::from_metadata(first.offset, &meta).unwrap();
        assert!(ed.set_transform_for_view(&second, &view, newer));
        assert!(!ed.set_transform_for_view(&first, &view, older));

        assert_eq!(ed.transform().x_add, view.offset);
        let (t, _) = ed.pointer_domain(0.0, 0.0);
        assert!((t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn dump_before_metadata_is_in_pixels() {
        let mut ed = Editor::default();
        assert!(!ed.has_transform());
        ed.pointer_down(3.0, 4.0, false);
        assert_eq!(ed.dump(), "3:4-3:4");
        assert_eq!(ed.pointer_domain(7.0, 8.0), (7.0, 8.0));
    }
}
