use wasm_bindgen::prelude::*;

use crate::data_structures::bounded_copy;
use crate::Queue;

/// A [`Queue`] for JavaScript hosts. Failures surface as `false` or `undefined`.
#[wasm_bindgen]
pub struct JsQueue {
    inner: Queue,
}

#[wasm_bindgen]
impl JsQueue {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsQueue {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        JsQueue {
            inner: Queue::new(),
        }
    }

    #[wasm_bindgen(js_name = insertHead)]
    pub fn insert_head(&mut self, text: &str) -> bool {
        self.inner.insert_front(text).is_ok()
    }

    #[wasm_bindgen(js_name = insertTail)]
    pub fn insert_tail(&mut self, text: &str) -> bool {
        self.inner.insert_back(text).is_ok()
    }

    /// Removes the head and returns at most `buffer_size - 1` bytes of it.
    #[wasm_bindgen(js_name = removeHead)]
    pub fn remove_head(&mut self, buffer_size: usize) -> Option<String> {
        let mut buffer = vec![0u8; buffer_size];
        self.inner.remove_front(Some(&mut buffer[..])).ok()?;
        let bytes = bounded_copy::terminated(&buffer);
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub fn reverse(&mut self) {
        self.inner.reverse();
    }

    /// the values as a JS array of strings, head first
    pub fn contents(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.contents()).map_err(Into::into)
    }
}

impl Default for JsQueue {
    fn default() -> Self {
        JsQueue::new()
    }
}
