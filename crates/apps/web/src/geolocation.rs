use foundation::geo::LatLng;
use session::{LocationError, LocationOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Geolocation, Position, PositionError, PositionOptions};

/// The browser geolocation service, if the page exposes one.
pub fn geolocation() -> Option<Geolocation> {
    let navigator = web_sys::window()?.navigator();
    let has = js_sys::Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false);
    if !has {
        return None;
    }
    navigator.geolocation().ok()
}

fn position_options(opts: &LocationOptions) -> PositionOptions {
    let options = PositionOptions::new();
    options.set_enable_high_accuracy(opts.high_accuracy);
    options.set_maximum_age(opts.maximum_age_ms);
    options.set_timeout(opts.timeout_ms);
    options
}

/// Start a continuous position watch. Callbacks live as long as the page.
pub fn watch_position(
    geo: &Geolocation,
    opts: &LocationOptions,
    mut on_fix: impl FnMut(LatLng) + 'static,
    mut on_error: impl FnMut(LocationError) + 'static,
) -> Result<i32, JsValue> {
    let success = Closure::<dyn FnMut(Position)>::new(move |pos: Position| {
        let coords = pos.coords();
        on_fix(LatLng::new(coords.latitude(), coords.longitude()));
    });
    let failure = Closure::<dyn FnMut(PositionError)>::new(move |err: PositionError| {
        on_error(LocationError::from_code(err.code()));
    });
    let id = geo.watch_position_with_error_callback_and_options(
        success.as_ref().unchecked_ref(),
        Some(failure.as_ref().unchecked_ref()),
        &position_options(opts),
    )?;
    success.forget();
    failure.forget();
    Ok(id)
}
