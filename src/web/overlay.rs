// overlay.rs - Start gate
//
// Browsers only allow audio after a user gesture, so nothing runs until the
// button is pressed.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub const TITLE: &str = "Listen, the rain is falling";
pub const SUBTITLE: &str = "A visual poem recreation";
pub const BUTTON: &str = "Start Experience";

const OVERLAY_STYLE: &str = "position:fixed;inset:0;display:flex;flex-direction:column;\
    align-items:center;justify-content:center;background:#f8f7f4;color:#021CBC;\
    font-family:'Courier Prime','Courier New',monospace;z-index:10;";
const NOTICE_STYLE: &str = "position:fixed;bottom:12px;left:50%;transform:translateX(-50%);\
    padding:6px 12px;background:#f8f7f4;color:#010E5E;border:1px solid #021CBC;\
    font-family:'Courier Prime','Courier New',monospace;font-size:13px;z-index:20;";

pub struct Overlay {
    root: HtmlElement,
    _on_click: Closure<dyn FnMut()>,
}

impl Overlay {
    /// Show the gate inside `container`; `on_start` runs once on click
    pub fn mount(
        document: &Document,
        container: &Element,
        on_start: impl FnOnce() + 'static,
    ) -> Result<Self, JsValue> {
        let root = document.create_element("div")?.dyn_into::<HtmlElement>()?;
        root.set_class_name("overlay");
        root.set_attribute("style", OVERLAY_STYLE)?;

        let title = document.create_element("h1")?;
        title.set_text_content(Some(TITLE));
        let subtitle = document.create_element("p")?;
        subtitle.set_text_content(Some(SUBTITLE));
        let button = document.create_element("button")?.dyn_into::<HtmlElement>()?;
        button.set_text_content(Some(BUTTON));

        root.append_child(&title)?;
        root.append_child(&subtitle)?;
        root.append_child(&button)?;
        container.append_child(&root)?;

        let mut on_start = Some(on_start);
        let gate = root.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            if let Some(start) = on_start.take() {
                gate.remove();
                start();
            }
        });
        button.set_onclick(Some(on_click.as_ref().unchecked_ref()));

        Ok(Self { root, _on_click: on_click })
    }

    pub fn hide(&self) {
        self.root.remove();
    }
}

/// Non-fatal message pinned to the bottom of the page
pub fn notice(document: &Document, container: &Element, msg: &str) -> Result<Element, JsValue> {
    let el = document.create_element("div")?;
    el.set_class_name("notice");
    el.set_attribute("style", NOTICE_STYLE)?;
    el.set_text_content(Some(msg));
    container.append_child(&el)?;
    Ok(el)
}
