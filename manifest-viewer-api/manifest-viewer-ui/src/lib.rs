use leptos::*;
use leptos_meta::*;
use wasm_bindgen::prelude::wasm_bindgen;

mod api;
mod components;
mod pages;
pub mod utils;

use pages::ViewerPage;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (app_name, set_app_name) = create_signal(String::from("OpenShift Manifest Viewer"));
    let (description, set_description) = create_signal(String::new());

    spawn_local(async move {
        if let Ok(config) = api::get_config().await {
            set_app_name.set(config.app.name);
            set_description.set(config.app.description);
        }
    });

    view! {
        <Title text=move || app_name.get()/>
        <Meta name="description" content="Read-only viewer for cluster manifests"/>

        <nav class="navbar">
            <div class="navbar-brand">
                <h1>{move || app_name.get()}</h1>
                <span class="tagline">{move || description.get()}</span>
            </div>
        </nav>

        <main class="container">
            <ViewerPage/>
        </main>
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
