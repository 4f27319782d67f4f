mod route;

#[cfg(target_arch = "wasm32")]
mod main_wasm;

#[cfg(target_arch = "wasm32")]
fn main() -> Result<(), wasm_bindgen::prelude::JsValue> {
    main_wasm::main_wasm()
}

// Usage: demo_launcher [tile_grid|lamp|carousel|shiny]
#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), route::RouteError> {
    let demo = match std::env::args().nth(1) {
        Some(name) => route::Demo::from_route(&name)?,
        None => route::Demo::default(),
    };
    demo.run();
    Ok(())
}
