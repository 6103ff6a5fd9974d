//! Detail panel for one selected resource

use leptos::*;
use manifest_viewer_common::ResourceDocument;

use crate::utils::{detail_sections, download_yaml};

#[component]
pub fn ResourceDetails(resource: ResourceDocument) -> impl IntoView {
    let (export_error, set_export_error) = create_signal::<Option<String>>(None);

    let title = resource.name().unwrap_or("(unnamed)").to_string();
    let sections = detail_sections(&resource);

    let export = move |_| match download_yaml(&resource) {
        Ok(()) => set_export_error.set(None),
        Err(e) => set_export_error.set(Some(e)),
    };

    view! {
        <div class="bg-white rounded-lg shadow p-4 space-y-4">
            <div class="flex justify-between items-center">
                <h2 class="text-lg font-semibold text-gray-900">{title}</h2>
                <button
                    on:click=export
                    class="px-3 py-1 bg-blue-600 text-white rounded-lg hover:bg-blue-700"
                >
                    "Export YAML"
                </button>
            </div>

            {move || export_error.get().map(|err| view! {
                <p class="text-sm text-red-700">{err}</p>
            })}

            {sections
                .into_iter()
                .map(|(heading, body)| view! {
                    <section>
                        <h3 class="text-sm font-medium text-gray-700 mb-1">{heading}</h3>
                        <pre class="bg-gray-50 border border-gray-200 rounded p-2 text-xs overflow-auto">
                            {body}
                        </pre>
                    </section>
                })
                .collect_view()}
        </div>
    }
}
