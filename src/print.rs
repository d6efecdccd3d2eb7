//! Report printing through a popup window.

use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue};

/// Write `html` into a new window and open the print dialog
pub fn print_html(html: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "No browser window".to_string())?;
    let popup = window
        .open_with_url_and_target("", "_blank")
        .ok()
        .flatten()
        .ok_or_else(|| {
            warn!(event = "print.popup_blocked");
            "Pop-up blocked. Allow pop-ups for this site to print reports.".to_string()
        })?;
    let document = popup
        .document()
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or_else(|| "Report window has no document".to_string())?;

    document
        .write(&js_sys::Array::of1(&JsValue::from_str(html)))
        .map_err(|e| format!("Could not write report: {:?}", e))?;
    document.close().map_err(|e| format!("Could not finish report: {:?}", e))?;
    let _ = popup.focus();
    popup.print().map_err(|e| format!("Could not open print dialog: {:?}", e))?;
    info!(event = "print.opened", bytes = html.len());
    Ok(())
}
