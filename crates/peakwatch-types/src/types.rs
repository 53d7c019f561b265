use serde::{Deserialize, Serialize};

/// A point in pixels. Global or display-local depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in global screen coordinates.
///
/// Corners are free-form while a selection drag is in progress; call
/// [`Rect::normalized`] to establish the x1<=x2, y1<=y2 invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Corner pair from two points, in the order given.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Swap x's and y's independently so that x1<=x2 and y1<=y2.
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).unsigned_abs()
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).unsigned_abs()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// One physical display in the shared global coordinate space.
///
/// Origins are offsets into the virtual desktop; descriptors never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorDescriptor {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
}

impl MonitorDescriptor {
    /// Translate a display-local point into global coordinates.
    pub fn to_global(&self, local: Point) -> Point {
        Point::new(self.x + local.x, self.y + local.y)
    }

    /// Translate a global point into this display's local space.
    pub fn to_local(&self, global: Point) -> Point {
        Point::new(global.x - self.x, global.y - self.y)
    }

    /// Whether the rect lies fully inside this display.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        let r = rect.normalized();
        r.x1 >= self.x
            && r.y1 >= self.y
            && r.x2 <= self.x + self.width as i32
            && r.y2 <= self.y + self.height as i32
    }
}

/// One recognized value together with the raw text it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericReading {
    pub value: f64,
    pub raw_text: String,
}

impl NumericReading {
    pub fn empty() -> Self {
        Self {
            value: 0.0,
            raw_text: String::new(),
        }
    }
}

/// Answer to an alert prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertDecision {
    Continue,
    Stop,
}

/// How a reading is chosen when recognition yields several candidates.
///
/// `Max` matches the original peak-value monitoring behavior and is the
/// default; the others exist for readouts where the interesting number is
/// positional or additive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingPolicy {
    #[default]
    Max,
    First,
    Last,
    Sum,
}

impl std::str::FromStr for ReadingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "max" => Ok(Self::Max),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "sum" => Ok(Self::Sum),
            other => Err(format!("unknown reading policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_normalizes_in_every_drag_direction() {
        let cases = [
            Rect::new(10, 10, 50, 40),
            Rect::new(50, 10, 10, 40),
            Rect::new(10, 40, 50, 10),
            Rect::new(50, 40, 10, 10),
        ];
        for rect in cases {
            let n = rect.normalized();
            assert_eq!((n.x1, n.y1, n.x2, n.y2), (10, 10, 50, 40));
        }
    }

    #[test]
    fn descriptor_round_trips_local_and_global() {
        let mon = MonitorDescriptor {
            id: 2,
            x: -1920,
            y: 200,
            width: 1920,
            height: 1080,
            is_primary: false,
        };
        let local = Point::new(15, 30);
        let global = mon.to_global(local);
        assert_eq!(global, Point::new(-1905, 230));
        assert_eq!(mon.to_local(global), local);
    }

    #[test]
    fn contains_rect_checks_full_containment() {
        let mon = MonitorDescriptor {
            id: 0,
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
            is_primary: true,
        };
        assert!(mon.contains_rect(&Rect::new(0, 0, 1920, 1080)));
        assert!(mon.contains_rect(&Rect::new(100, 100, 50, 50)));
        assert!(!mon.contains_rect(&Rect::new(1900, 100, 1950, 200)));
        assert!(!mon.contains_rect(&Rect::new(-10, 0, 100, 100)));
    }
}
