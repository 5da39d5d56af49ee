// Host document seam: the core only reads and writes a handful of control
// properties and looks elements up by id or class.

use crate::error::{Error, Result};

pub trait Control {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn checked(&self) -> bool;
    fn set_checked(&self, checked: bool);
    fn disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
    fn required(&self) -> bool;
    fn set_required(&self, required: bool);
    fn display(&self) -> String;
    fn set_display(&self, display: &str);
}

pub trait Page {
    type Control: Control;

    fn by_id(&self, id: &str) -> Option<Self::Control>;
    fn by_class(&self, class: &str) -> Vec<Self::Control>;

    fn require(&self, id: &str) -> Result<Self::Control> {
        self.by_id(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }
}

/// Form inputs owned by the host page that survive a server round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Latitude,
    Longitude,
    Radius,
}

impl Field {
    pub fn id(self) -> &'static str {
        match self {
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Radius => "radius",
        }
    }
}
