// The page path picks the demo, e.g. https://host/lamp

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::route::Demo;

pub(crate) fn main_wasm() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No global `window`"))?;
    let path = window.location().pathname()?;
    let demo = Demo::from_route(&path).map_err(|err| JsValue::from_str(&err.to_string()))?;
    console::log_1(&format!("Starting {demo} for {path}").into());
    demo.run();
    Ok(())
}
