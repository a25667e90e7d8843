//! Handedness-keyed controller cells

use trellis_reactive::Observable;

/// Which hand a controller is associated with
///
/// `None` covers gaze-driven and screen-based input sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
    None,
}

/// A connected XR input device
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    pub handedness: Handedness,
    /// Input profile identifiers, most specific first
    pub profiles: Vec<String>,
}

impl Controller {
    pub fn new(handedness: Handedness) -> Self {
        Self {
            handedness,
            profiles: Vec::new(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profiles.push(profile.into());
        self
    }
}

/// The session's current controllers, one observable cell per
/// handedness
///
/// The session owns one instance; consumers look cells up by
/// handedness and subscribe for connect/disconnect changes. Writes
/// are last-write-wins: a new controller for an occupied slot simply
/// replaces it.
pub struct ControllerCells {
    left: Observable<Option<Controller>>,
    right: Observable<Option<Controller>>,
    gaze: Observable<Option<Controller>>,
}

impl Default for ControllerCells {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerCells {
    pub fn new() -> Self {
        Self {
            left: Observable::new(None),
            right: Observable::new(None),
            gaze: Observable::new(None),
        }
    }

    /// The cell tracking the given handedness
    pub fn cell(&self, handedness: Handedness) -> &Observable<Option<Controller>> {
        match handedness {
            Handedness::Left => &self.left,
            Handedness::Right => &self.right,
            Handedness::None => &self.gaze,
        }
    }

    /// Record a controller as current for its handedness
    pub fn connect(&self, controller: Controller) {
        self.cell(controller.handedness).set(Some(controller));
    }

    /// Clear the cell for the given handedness
    pub fn disconnect(&self, handedness: Handedness) {
        self.cell(handedness).set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_cells_start_empty() {
        let cells = ControllerCells::new();
        assert_eq!(cells.cell(Handedness::Left).get(), None);
        assert_eq!(cells.cell(Handedness::Right).get(), None);
        assert_eq!(cells.cell(Handedness::None).get(), None);
    }

    #[test]
    fn test_connect_fills_matching_cell() {
        let cells = ControllerCells::new();
        cells.connect(Controller::new(Handedness::Left));

        assert!(cells.cell(Handedness::Left).get().is_some());
        assert_eq!(cells.cell(Handedness::Right).get(), None);
    }

    #[test]
    fn test_none_maps_to_gaze_cell() {
        let cells = ControllerCells::new();
        cells.connect(Controller::new(Handedness::None));

        assert!(cells.cell(Handedness::None).get().is_some());
        assert_eq!(cells.cell(Handedness::Left).get(), None);
        assert_eq!(cells.cell(Handedness::Right).get(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let cells = ControllerCells::new();
        cells.connect(Controller::new(Handedness::Right).with_profile("generic-trigger"));
        cells.connect(Controller::new(Handedness::Right).with_profile("oculus-touch"));

        let current = cells.cell(Handedness::Right).get().unwrap();
        assert_eq!(current.profiles, vec!["oculus-touch".to_string()]);
    }

    #[test]
    fn test_disconnect_clears_cell() {
        let cells = ControllerCells::new();
        cells.connect(Controller::new(Handedness::Left));
        cells.disconnect(Handedness::Left);

        assert_eq!(cells.cell(Handedness::Left).get(), None);
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let cells = ControllerCells::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = Rc::clone(&seen);
        let _sub = cells.cell(Handedness::Left).subscribe(move |value| {
            seen_clone.borrow_mut().push(value.is_some());
        });

        cells.connect(Controller::new(Handedness::Left));
        cells.disconnect(Handedness::Left);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }
}
