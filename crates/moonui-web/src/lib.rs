//! Browser bindings for the MoonUI navigation shell.
//!
//! Built with `wasm-pack build --target web`. The page bootstrap script
//! calls `mount()` once the module loads; the returned handle can
//! `unmount()` the shell again.
//!
//! The state machines live in `moonui-shell`; this crate only measures the
//! viewport, forwards DOM events and writes attributes back.

pub mod error;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod copy;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod listener;
#[cfg(target_arch = "wasm32")]
mod shell;

pub use error::MountError;

#[cfg(target_arch = "wasm32")]
pub use shell::{mount, ShellHandle};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
