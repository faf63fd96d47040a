use dioxus::prelude::*;

mod components;
mod diagnostics;
mod playback;

use components::RadioPlayer;

const APP_CSS: Asset = asset!("/assets/styling/app.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "DeskRadio" }
        document::Meta { name: "theme-color", content: "#262626" }

        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        RadioPlayer {}
    }
}
