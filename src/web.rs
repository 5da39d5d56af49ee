//! Browser entry points.
//!
//! Wires the core widgets to the real page: Leaflet for the map, `web-sys` for
//! the document. The exported names are the ones page templates call from
//! their event attributes.
//!
//! This module only compiles for the wasm32 target.

pub mod dom;
pub mod leaflet;

use crate::config::MapConfig;
use crate::error::Error;
use crate::forms;
use crate::table::{SortRow, TableSorter, TextOrder};
use crate::ui::{show_event_location, Msg, RadiusWidget};
use dom::DomPage;
use leaflet::{GeocoderOptions, LeafletMap};
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

const CONFIG_SELECTOR: &str = "[data-map-config]";

thread_local! {
    static SORTER: RefCell<TableSorter<Element, BrowserCollation>> =
        RefCell::new(TableSorter::with_order(BrowserCollation));
    static RADIUS_APP: OnceCell<Rc<RefCell<RadiusApp>>> = OnceCell::new();
}

/// Set up panic reporting and console logging
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // the host page may already have installed a logger
    let _ = console_log::init_with_level(log::Level::Debug);
}

fn js_error(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window found"))?
        .document()
        .ok_or_else(|| JsValue::from_str("No document found"))
}

fn page() -> Result<DomPage, JsValue> {
    Ok(DomPage::new(document()?))
}

fn read_config(document: &Document) -> MapConfig {
    let raw = document
        .query_selector(CONFIG_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("data-map-config"));
    let Some(raw) = raw else {
        return MapConfig::default();
    };
    MapConfig::from_json(&raw).unwrap_or_else(|e| {
        log::warn!("{e}, using defaults");
        MapConfig::default()
    })
}

/// `String.prototype.localeCompare` with the page's default locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCollation;

impl TextOrder for BrowserCollation {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        js_sys::JsString::from(a)
            .locale_compare(b, &js_sys::Array::new(), &js_sys::Object::new())
            .cmp(&0)
    }
}

struct DomRow {
    element: Element,
    cells: Vec<String>,
}

impl DomRow {
    fn read(element: Element) -> Self {
        let children = element.children();
        let cells = (0..children.length())
            .filter_map(|i| children.item(i))
            .map(|cell| {
                let inner = cell
                    .dyn_ref::<HtmlElement>()
                    .map(HtmlElement::inner_text)
                    .unwrap_or_default();
                if inner.is_empty() {
                    cell.text_content().unwrap_or_default()
                } else {
                    inner
                }
            })
            .collect();
        Self { element, cells }
    }
}

impl SortRow for DomRow {
    fn cell_text(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

fn header_index(th: &Element) -> usize {
    let Some(parent) = th.parent_element() else {
        return 0;
    };
    let siblings = parent.children();
    (0..siblings.length())
        .position(|i| siblings.item(i).as_ref() == Some(th))
        .unwrap_or(0)
}

/// Sort the body rows of the header's table by the header's column.
#[wasm_bindgen(js_name = sortTable)]
pub fn sort_table(th: &Element) -> Result<(), JsValue> {
    let table = th
        .closest("table")?
        .ok_or_else(|| JsValue::from_str("header is not inside a table"))?;
    let tbody = table
        .query_selector("tbody")?
        .ok_or_else(|| JsValue::from_str("table has no tbody"))?;
    let column = header_index(th);

    let found = tbody.query_selector_all("tr")?;
    let mut rows: Vec<DomRow> = (0..found.length())
        .filter_map(|i| found.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(DomRow::read)
        .collect();

    SORTER.with(|s| {
        let mut sorter = s.borrow_mut();
        // headers of removed or replaced tables release their flags
        sorter.state_mut().retain(|h| h.is_connected());
        sorter.activate(th.clone(), column, &mut rows)
    });

    // appending an attached row moves it, so the rows keep their identity
    for row in &rows {
        tbody.append_child(&row.element)?;
    }
    Ok(())
}

struct RadiusApp {
    widget: RadiusWidget<LeafletMap>,
    map: LeafletMap,
    page: DomPage,
}

impl RadiusApp {
    fn dispatch(&mut self, msg: Msg) {
        let RadiusApp { widget, map, page } = self;
        if let Err(e) = widget.update(map, page, msg) {
            log::warn!("{e}");
        }
    }
}

/// Location search map with an adjustable radius circle.
#[wasm_bindgen(js_name = initRadiusMap)]
pub fn init_radius_map() -> Result<(), JsValue> {
    let document = document()?;
    let config = read_config(&document);
    let base = leaflet::base_map(&config).map_err(js_error)?;

    let app = Rc::new(RefCell::new(RadiusApp {
        widget: RadiusWidget::new(&config),
        map: LeafletMap::new(base, document.clone()),
        page: DomPage::new(document),
    }));

    let weak = Rc::downgrade(&app);
    app.borrow_mut().map.set_radius_handler(move |raw| {
        if let Some(app) = weak.upgrade() {
            app.borrow_mut().dispatch(Msg::RadiusInput(raw));
        }
    });

    let weak = Rc::downgrade(&app);
    let on_geocode = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
        let Some(at) = leaflet::resolved_center(&event) else {
            log::warn!("markgeocode event without a center");
            return;
        };
        if let Some(app) = weak.upgrade() {
            app.borrow_mut().dispatch(Msg::LocationResolved(at));
        }
    });
    // our own marker replaces the geocoder's
    let options = leaflet::to_js(&GeocoderOptions {
        default_mark_geocode: false,
    })
    .map_err(js_error)?;
    leaflet::geocoder(&options)
        .on("markgeocode", on_geocode.as_ref().unchecked_ref())
        .add_to_map(app.borrow().map.map());
    // lives as long as the page
    on_geocode.forget();

    {
        let mut guard = app.borrow_mut();
        let RadiusApp { widget, map, page } = &mut *guard;
        match widget.bootstrap(map, page) {
            Ok(true) => log::info!("restored location from form fields"),
            Ok(false) => {}
            Err(e) => log::warn!("skipping restore: {e}"),
        }
    }

    RADIUS_APP.with(|cell| {
        if cell.set(app).is_err() {
            log::warn!("radius map already initialised; keeping the first one");
        }
    });
    Ok(())
}

/// Read-only map marking the location stored in the form fields.
#[wasm_bindgen(js_name = initEventLocationMap)]
pub fn init_event_location_map() -> Result<(), JsValue> {
    let document = document()?;
    let config = read_config(&document);
    let base = leaflet::base_map(&config).map_err(js_error)?;
    let mut map = LeafletMap::new(base, document.clone());
    let page = DomPage::new(document);
    show_event_location(&mut map, &page, config.location_zoom).map_err(js_error)?;
    Ok(())
}

#[wasm_bindgen(js_name = toggleCheckboxGroup)]
pub fn toggle_checkbox_group(source: &HtmlInputElement, class: &str) -> Result<(), JsValue> {
    forms::toggle_checkbox_group(&page()?, source.checked(), class);
    Ok(())
}

#[wasm_bindgen(js_name = toggleSubmitButton)]
pub fn toggle_submit_button() -> Result<(), JsValue> {
    forms::toggle_submit_button(&page()?).map_err(js_error)
}

#[wasm_bindgen(js_name = toggleSubmitButtonInput)]
pub fn toggle_submit_button_input(input_id: &str, button_id: &str) -> Result<(), JsValue> {
    forms::toggle_submit_button_input(&page()?, input_id, button_id).map_err(js_error)
}

#[wasm_bindgen(js_name = toggleInput)]
pub fn toggle_input(
    select: &HtmlSelectElement,
    selected_option: &str,
    input_id: &str,
) -> Result<(), JsValue> {
    forms::toggle_input(&page()?, &select.value(), selected_option, input_id).map_err(js_error)
}

#[wasm_bindgen(js_name = toggleRelatedCheckbox)]
pub fn toggle_related_checkbox(
    checkbox: &HtmlInputElement,
    related_id: &str,
) -> Result<(), JsValue> {
    forms::toggle_related_checkbox(&page()?, checkbox.checked(), related_id).map_err(js_error)
}
