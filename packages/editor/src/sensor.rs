//! Pointer sensor with an activation distance.
//!
//! A press only becomes a drag once the pointer has travelled at least the
//! activation distance. Releasing earlier is a click, which the session uses
//! for selection.

/// Pointer position in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationConstraint {
    /// Minimum pointer travel before a drag starts
    pub distance: f32,
}

impl Default for ActivationConstraint {
    fn default() -> Self {
        Self { distance: 10.0 }
    }
}

/// Events the sensor emits for the drag resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorEvent {
    /// Travel crossed the activation distance
    DragStart { source: String },
    /// Released before activation
    Click { source: String },
    /// Released after activation
    DragEnd { source: String },
}

#[derive(Debug, Clone)]
struct Press {
    source: String,
    origin: Point,
    activated: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PointerSensor {
    constraint: ActivationConstraint,
    press: Option<Press>,
}

impl PointerSensor {
    pub fn new(constraint: ActivationConstraint) -> Self {
        Self {
            constraint,
            press: None,
        }
    }

    /// Source of the press in progress, once it has become a drag
    pub fn active_source(&self) -> Option<&str> {
        self.press
            .as_ref()
            .filter(|press| press.activated)
            .map(|press| press.source.as_str())
    }

    pub fn press(&mut self, source: impl Into<String>, at: Point) {
        self.press = Some(Press {
            source: source.into(),
            origin: at,
            activated: false,
        });
    }

    /// Report pointer motion; yields `DragStart` once, when the press first
    /// reaches the activation distance
    pub fn motion(&mut self, at: Point) -> Option<SensorEvent> {
        let press = self.press.as_mut()?;
        if press.activated || press.origin.distance_to(at) < self.constraint.distance {
            return None;
        }

        press.activated = true;
        Some(SensorEvent::DragStart {
            source: press.source.clone(),
        })
    }

    pub fn release(&mut self) -> Option<SensorEvent> {
        let press = self.press.take()?;
        Some(if press.activated {
            SensorEvent::DragEnd {
                source: press.source,
            }
        } else {
            SensorEvent::Click {
                source: press.source,
            }
        })
    }

    /// Forget any press without emitting events
    pub fn reset(&mut self) {
        self.press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_travel_is_a_click() {
        let mut sensor = PointerSensor::default();
        sensor.press("a", Point::new(0.0, 0.0));

        assert_eq!(sensor.motion(Point::new(3.0, 4.0)), None);
        assert_eq!(sensor.active_source(), None);
        assert_eq!(
            sensor.release(),
            Some(SensorEvent::Click {
                source: "a".to_string()
            })
        );
    }

    #[test]
    fn test_threshold_starts_drag_once() {
        let mut sensor = PointerSensor::new(ActivationConstraint { distance: 10.0 });
        sensor.press("a", Point::new(0.0, 0.0));

        assert_eq!(
            sensor.motion(Point::new(6.0, 8.0)),
            Some(SensorEvent::DragStart {
                source: "a".to_string()
            })
        );
        assert_eq!(sensor.motion(Point::new(60.0, 80.0)), None);
        assert_eq!(sensor.active_source(), Some("a"));
        assert_eq!(
            sensor.release(),
            Some(SensorEvent::DragEnd {
                source: "a".to_string()
            })
        );
        assert_eq!(sensor.release(), None);
    }

    #[test]
    fn test_motion_without_press() {
        let mut sensor = PointerSensor::default();
        assert_eq!(sensor.motion(Point::new(100.0, 0.0)), None);
    }
}
