use crate::page::{Control, Page};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

/// Any form element on the page; properties missing on its element type read
/// as empty/false and writes to them are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct DomControl(pub Element);

impl DomControl {
    fn input(&self) -> Option<&HtmlInputElement> {
        self.0.dyn_ref::<HtmlInputElement>()
    }
    fn select(&self) -> Option<&HtmlSelectElement> {
        self.0.dyn_ref::<HtmlSelectElement>()
    }
    fn textarea(&self) -> Option<&HtmlTextAreaElement> {
        self.0.dyn_ref::<HtmlTextAreaElement>()
    }
    fn button(&self) -> Option<&HtmlButtonElement> {
        self.0.dyn_ref::<HtmlButtonElement>()
    }
}

impl Control for DomControl {
    fn value(&self) -> String {
        if let Some(i) = self.input() {
            i.value()
        } else if let Some(s) = self.select() {
            s.value()
        } else if let Some(t) = self.textarea() {
            t.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(i) = self.input() {
            i.set_value(value);
        } else if let Some(s) = self.select() {
            s.set_value(value);
        } else if let Some(t) = self.textarea() {
            t.set_value(value);
        }
    }

    fn checked(&self) -> bool {
        self.input().map_or(false, |i| i.checked())
    }

    fn set_checked(&self, checked: bool) {
        if let Some(i) = self.input() {
            i.set_checked(checked);
        }
    }

    fn disabled(&self) -> bool {
        if let Some(i) = self.input() {
            i.disabled()
        } else if let Some(b) = self.button() {
            b.disabled()
        } else if let Some(s) = self.select() {
            s.disabled()
        } else {
            self.textarea().map_or(false, |t| t.disabled())
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(i) = self.input() {
            i.set_disabled(disabled);
        } else if let Some(b) = self.button() {
            b.set_disabled(disabled);
        } else if let Some(s) = self.select() {
            s.set_disabled(disabled);
        } else if let Some(t) = self.textarea() {
            t.set_disabled(disabled);
        }
    }

    fn required(&self) -> bool {
        if let Some(i) = self.input() {
            i.required()
        } else if let Some(s) = self.select() {
            s.required()
        } else {
            self.textarea().map_or(false, |t| t.required())
        }
    }

    fn set_required(&self, required: bool) {
        if let Some(i) = self.input() {
            i.set_required(required);
        } else if let Some(s) = self.select() {
            s.set_required(required);
        } else if let Some(t) = self.textarea() {
            t.set_required(required);
        }
    }

    fn display(&self) -> String {
        self.0
            .dyn_ref::<HtmlElement>()
            .and_then(|e| e.style().get_property_value("display").ok())
            .unwrap_or_default()
    }

    fn set_display(&self, display: &str) {
        if let Some(e) = self.0.dyn_ref::<HtmlElement>() {
            if let Err(err) = e.style().set_property("display", display) {
                log::warn!("could not set display on #{}: {err:?}", self.0.id());
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Page for DomPage {
    type Control = DomControl;

    fn by_id(&self, id: &str) -> Option<DomControl> {
        self.document.get_element_by_id(id).map(DomControl)
    }

    fn by_class(&self, class: &str) -> Vec<DomControl> {
        let found = self.document.get_elements_by_class_name(class);
        (0..found.length())
            .filter_map(|i| found.item(i))
            .map(DomControl)
            .collect()
    }
}
