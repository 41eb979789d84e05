#![allow(non_snake_case)]

mod components;
#[cfg(target_family = "wasm")]
mod eth;

fn main() {
    dioxus::launch(components::app::App);
}
