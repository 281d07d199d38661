//! Typed wrappers around browser APIs via web-sys.
//!
//! The legacy site drove this page with one untyped script; these helpers
//! cover the same surface (fetch, stat slots, smooth scrolling, section
//! measurement, iframe fallbacks) as typed calls. Every DOM lookup
//! degrades silently when its element is missing, so pages that only
//! include part of the markup keep working.

use vmg_core::error::LoadError;
use vmg_core::nav::SectionBounds;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlElement, Response};

/// Fetch a URL and return the response body as text.
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let window = web_sys::window()
        .ok_or_else(|| LoadError::Network("window not available".to_string()))?;
    let response_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| LoadError::Network(format!("{:?}", e)))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| LoadError::Network("fetch did not return a Response".to_string()))?;
    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }
    let text_promise = response
        .text()
        .map_err(|e| LoadError::Network(format!("{:?}", e)))?;
    let text_value = JsFuture::from(text_promise)
        .await
        .map_err(|e| LoadError::Network(format!("{:?}", e)))?;
    text_value
        .as_string()
        .ok_or_else(|| LoadError::Parse("response body was not text".to_string()))
}

/// Resolve after `ms` milliseconds using a window timeout.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(promise).await;
}

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

fn slot(id: &str) -> Option<HtmlElement> {
    document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Write text into a stat slot immediately, without the fade.
pub fn set_slot_text(id: &str, text: &str) {
    if let Some(el) = slot(id) {
        el.set_text_content(Some(text));
    }
}

/// Write text into a stat slot with the site's fade transition: dim the
/// slot, swap the text mid-transition, restore full opacity.
pub fn fade_slot_text(id: String, text: String) {
    wasm_bindgen_futures::spawn_local(async move {
        let Some(el) = slot(&id) else {
            return;
        };
        let style = el.style();
        let _ = style.set_property("transition", "all 0.3s ease");
        let _ = style.set_property("opacity", "0.5");
        sleep_ms(150).await;
        el.set_text_content(Some(&text));
        let _ = style.set_property("opacity", "1");
    });
}

/// Stamp a slot with the current local time rendered for French readers.
pub fn stamp_slot_with_time(id: &str) {
    let stamp: String = js_sys::Date::new_0()
        .to_locale_string("fr-FR", &JsValue::UNDEFINED)
        .into();
    set_slot_text(id, &stamp);
}

/// Current vertical scroll offset of the page.
pub fn page_y_offset() -> f64 {
    web_sys::window()
        .and_then(|w| w.page_y_offset().ok())
        .unwrap_or(0.0)
}

/// Smooth-scroll the window to an absolute vertical offset.
pub fn smooth_scroll_to(top: f64) {
    if let Some(window) = web_sys::window() {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// Document offset of the top of the element with this id.
pub fn section_top(id: &str) -> Option<f64> {
    slot(id).map(|el| el.offset_top() as f64)
}

/// Measure every `section[id]` on the page, in document order.
pub fn measure_sections() -> Vec<SectionBounds> {
    let mut sections = Vec::new();
    let Some(doc) = document() else {
        return sections;
    };
    let Ok(nodes) = doc.query_selector_all("section[id]") else {
        return sections;
    };
    for index in 0..nodes.length() {
        let Some(node) = nodes.item(index) else {
            continue;
        };
        let Ok(el) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        let id = el.id();
        if id.is_empty() {
            continue;
        }
        sections.push(SectionBounds {
            id,
            top: el.offset_top() as f64,
            height: el.client_height() as f64,
        });
    }
    sections
}

/// Run `callback` on every window scroll event for the page lifetime.
pub fn on_window_scroll(callback: impl FnMut() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
    if window
        .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
        .is_ok()
    {
        // Listener lives as long as the page, so leaking it is fine.
        closure.forget();
    }
}

/// Watch every iframe on the page and swap in a warning panel when one
/// fails to load. The panel text matches what the site has always shown.
pub fn install_frame_fallbacks() {
    let Some(doc) = document() else {
        return;
    };
    let Ok(frames) = doc.query_selector_all("iframe") else {
        return;
    };
    for index in 0..frames.length() {
        let Some(node) = frames.item(index) else {
            continue;
        };
        let Ok(frame) = node.dyn_into::<Element>() else {
            continue;
        };
        let target = frame.clone();
        let closure = Closure::wrap(Box::new(move || {
            replace_with_warning(&target);
        }) as Box<dyn FnMut()>);
        if frame
            .add_event_listener_with_callback("error", closure.as_ref().unchecked_ref())
            .is_ok()
        {
            closure.forget();
        }
    }
}

fn replace_with_warning(frame: &Element) {
    log::error!("Embedded frame failed to load, swapping in the warning panel");
    let Some(doc) = document() else {
        return;
    };
    let Ok(panel) = doc.create_element("div") else {
        return;
    };
    panel.set_class_name("alert alert-warning text-center p-4");
    panel.set_inner_html(
        "<i class=\"fas fa-exclamation-triangle me-2\"></i>\
         Contenu temporairement indisponible\
         <br><small class=\"text-muted\">Actualisez la page ou essayez plus tard</small>",
    );
    if let Some(parent) = frame.parent_node() {
        let _ = parent.replace_child(&panel, frame);
    }
}
