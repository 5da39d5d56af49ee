// Bindings to the subset of Leaflet (and the Leaflet geocoder control) the
// widgets use, plus the `MapSurface` implementation over them.

use crate::error::{Error, Result};
use crate::geo::{LatLng, LatLngBounds};
use crate::ui::map::{MapSurface, PopupOptions, RadiusControl};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement};

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn new_map(container_id: &str, options: &JsValue) -> Map;

    #[wasm_bindgen(method, js_name = fitWorld)]
    pub fn fit_world(this: &Map) -> Map;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &Map, bounds: &Bounds) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &Map, center: &JsValue, zoom: f64) -> Map;

    #[derive(Debug, Clone)]
    pub type Layer;

    // accepts a map or a layer group
    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, target: &JsValue) -> Layer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    pub fn layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = clearLayers)]
    pub fn clear_layers(this: &LayerGroup) -> LayerGroup;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type Marker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    pub fn marker(at: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    pub fn bind_popup(this: &Marker, content: &web_sys::Element, options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = openPopup)]
    pub fn open_popup(this: &Marker) -> Marker;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type Circle;

    #[wasm_bindgen(js_namespace = L, js_name = circle)]
    pub fn circle(at: &JsValue, options: &JsValue) -> Circle;

    #[wasm_bindgen(method, js_name = setRadius)]
    pub fn set_radius(this: &Circle, meters: f64) -> Circle;

    #[wasm_bindgen(method, js_name = getBounds)]
    pub fn get_bounds(this: &Circle) -> Bounds;

    #[derive(Debug, Clone)]
    pub type Bounds;

    #[wasm_bindgen(js_namespace = L, js_name = latLngBounds)]
    pub fn lat_lng_bounds(south_west: &JsValue, north_east: &JsValue) -> Bounds;

    #[wasm_bindgen(method, js_name = getSouth)]
    pub fn get_south(this: &Bounds) -> f64;
    #[wasm_bindgen(method, js_name = getWest)]
    pub fn get_west(this: &Bounds) -> f64;
    #[wasm_bindgen(method, js_name = getNorth)]
    pub fn get_north(this: &Bounds) -> f64;
    #[wasm_bindgen(method, js_name = getEast)]
    pub fn get_east(this: &Bounds) -> f64;

    #[derive(Debug, Clone)]
    pub type Geocoder;

    #[wasm_bindgen(js_namespace = ["L", "Control"], js_name = geocoder)]
    pub fn geocoder(options: &JsValue) -> Geocoder;

    #[wasm_bindgen(method)]
    pub fn on(this: &Geocoder, event: &str, handler: &js_sys::Function) -> Geocoder;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to_map(this: &Geocoder, map: &Map) -> Geocoder;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    max_zoom: u8,
    attribution: &'a str,
}

#[derive(Serialize)]
struct CircleOptions {
    radius: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeocoderOptions {
    pub default_mark_geocode: bool,
}

/// Turn a serde value into a plain JS object for Leaflet's option arguments.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value).map_err(|e| Error::Map(e.to_string()))?;
    js_sys::JSON::parse(&json).map_err(|e| Error::Map(format!("{e:?}")))
}

pub(crate) fn lat_lng(at: LatLng) -> JsValue {
    js_sys::Array::of2(&JsValue::from_f64(at.lat), &JsValue::from_f64(at.lng)).into()
}

/// `e.geocode.center` of a `markgeocode` event.
pub(crate) fn resolved_center(event: &JsValue) -> Option<LatLng> {
    let center = js_sys::Reflect::get(event, &"geocode".into())
        .and_then(|g| js_sys::Reflect::get(&g, &"center".into()))
        .ok()?;
    let lat = js_sys::Reflect::get(&center, &"lat".into()).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&center, &"lng".into()).ok()?.as_f64()?;
    Some(LatLng::new(lat, lng))
}

/// Base map with tiles, fitted to the whole world.
pub fn base_map(config: &crate::config::MapConfig) -> Result<Map> {
    let map = new_map(&config.container_id, &js_sys::Object::new().into());
    map.fit_world();
    let options = TileOptions {
        max_zoom: config.max_zoom,
        attribution: &config.attribution,
    };
    tile_layer(&config.tile_url, &to_js(&options)?).add_to(&map);
    Ok(map)
}

type RadiusHandler = Rc<dyn Fn(String)>;

/// Leaflet map with a clearable overlay group.
pub struct LeafletMap {
    map: Map,
    overlay: LayerGroup,
    document: Document,
    on_radius_input: Option<RadiusHandler>,
    // listeners of the popup inputs currently on the overlay
    popup_listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl LeafletMap {
    pub fn new(map: Map, document: Document) -> Self {
        let overlay = layer_group();
        overlay.add_to(&map);
        Self {
            map,
            overlay,
            document,
            on_radius_input: None,
            popup_listeners: Vec::new(),
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Called with the raw control text on every popup input event.
    pub fn set_radius_handler(&mut self, handler: impl Fn(String) + 'static) {
        self.on_radius_input = Some(Rc::new(handler));
    }

    fn popup_content(
        &mut self,
        control: &RadiusControl,
    ) -> std::result::Result<web_sys::Element, JsValue> {
        let input: HtmlInputElement = self.document.create_element("input")?.dyn_into()?;
        input.set_id(control.id);
        input.set_type("number");
        input.set_min(&control.min.to_string());
        input.set_max(&control.max.to_string());
        input.set_step(&control.step.to_string());
        input.set_value(&control.value_text());
        input.set_autocomplete(if control.autocomplete { "on" } else { "off" });

        if let Some(handler) = self.on_radius_input.clone() {
            let target = input.clone();
            let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                handler(target.value());
            });
            input.add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())?;
            self.popup_listeners.push(listener);
        }

        let div = self.document.create_element("div")?;
        div.append_child(&input)?;
        div.append_with_str_1(&format!(" {}", control.unit_label))?;
        Ok(div)
    }
}

impl MapSurface for LeafletMap {
    type Marker = Marker;
    type Circle = Circle;

    fn clear_overlay(&mut self) {
        self.overlay.clear_layers();
        self.popup_listeners.clear();
    }

    fn add_marker(&mut self, at: LatLng) -> Marker {
        let m = marker(&lat_lng(at));
        m.add_to(&self.overlay);
        m
    }

    fn add_circle(&mut self, center: LatLng, radius_m: f64) -> Circle {
        let options = CircleOptions { radius: radius_m };
        let options = to_js(&options).unwrap_or_else(|e| {
            log::warn!("circle options: {e}");
            js_sys::Object::new().into()
        });
        let c = circle(&lat_lng(center), &options);
        c.add_to(&self.overlay);
        c
    }

    fn set_circle_radius(&mut self, circle: &Circle, radius_m: f64) {
        circle.set_radius(radius_m);
    }

    fn circle_bounds(&self, circle: &Circle) -> LatLngBounds {
        let b = circle.get_bounds();
        LatLngBounds::new(
            LatLng::new(b.get_south(), b.get_west()),
            LatLng::new(b.get_north(), b.get_east()),
        )
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        let b = lat_lng_bounds(&lat_lng(bounds.south_west), &lat_lng(bounds.north_east));
        self.map.fit_bounds(&b);
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.map.set_view(&lat_lng(center), f64::from(zoom));
    }

    fn open_popup(&mut self, marker: &Marker, control: &RadiusControl, options: PopupOptions) {
        let content = match self.popup_content(control) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("could not build radius popup: {e:?}");
                return;
            }
        };
        match to_js(&options) {
            Ok(opts) => {
                marker.bind_popup(&content, &opts).open_popup();
            }
            Err(e) => log::warn!("popup options: {e}"),
        }
    }
}
