//! Randomness that works both natively and in the browser, for
//! [`Tracking::fail_with_probability`](crate::tracking::Tracking::fail_with_probability).

#[cfg(not(feature = "wasm"))]
use rand::Rng;

/// uniform in `[0, 1)`; compared against the configured failure probability
#[cfg(feature = "wasm")]
pub fn random_number_between_0_and_1() -> f64 {
    js_sys::Math::random()
}

#[cfg(not(feature = "wasm"))]
pub fn random_number_between_0_and_1() -> f64 {
    rand::thread_rng().gen::<f64>()
}
