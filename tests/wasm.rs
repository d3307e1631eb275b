//! Browser-side smoke tests, run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use gridview::widget::parse_columns_js;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn version_is_exposed() {
    assert!(!gridview::version().is_empty());
}

#[wasm_bindgen_test]
fn parse_columns_accepts_valid_config() {
    let result = parse_columns_js(r#"[{"name": "age", "cell": "integer"}]"#);
    assert!(result.is_ok());
}

#[wasm_bindgen_test]
fn parse_columns_throws_on_unknown_kind() {
    let result = parse_columns_js(r#"[{"name": "age", "cell": "sparkline"}]"#);
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn dom_surface_drives_a_real_cell() {
    use gridview::surface::{CellSurface, DomSurface};

    let document = web_sys::window().unwrap().document().unwrap();
    let td: web_sys::HtmlElement = document
        .create_element("td")
        .unwrap()
        .dyn_into()
        .unwrap();
    document.body().unwrap().append_child(&td).unwrap();

    let mut surface = DomSurface::attach(td).unwrap();
    surface.set_text("42");
    surface.add_class("number-cell");
    assert!(surface.has_class("number-cell"));
    assert_eq!(surface.input_value(), "");

    surface.show_input("42");
    assert_eq!(surface.input_value(), "42");
    surface.set_input_value("43");
    assert_eq!(surface.input_value(), "43");
    surface.hide_input();
    assert_eq!(surface.input_value(), "");
}
