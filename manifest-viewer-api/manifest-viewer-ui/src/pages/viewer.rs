//! Manifest viewer page
//!
//! Namespace, kind and view-mode selectors over a resource list, with a
//! detail panel for the selected item. Any selector change re-fetches.

use leptos::*;
use manifest_viewer_common::{NamespaceSummary, ResourceDocument, ResourceKind};

use crate::api;
use crate::components::ResourceDetails;
use crate::utils::{phase_class, same_resource};

/// Namespace to preselect: the configured default when listed, else the first
pub fn initial_namespace(
    namespaces: &[NamespaceSummary],
    preferred: Option<&str>,
) -> Option<String> {
    preferred
        .and_then(|p| namespaces.iter().find(|ns| ns.name == p))
        .or_else(|| namespaces.first())
        .map(|ns| ns.name.clone())
}

#[component]
pub fn ViewerPage() -> impl IntoView {
    let (namespaces, set_namespaces) = create_signal::<Vec<NamespaceSummary>>(vec![]);
    let (namespace, set_namespace) = create_signal::<Option<String>>(None);
    let (kind, set_kind) = create_signal(ResourceKind::Pods);
    let (simplified, set_simplified) = create_signal(true);

    let (resources, set_resources) = create_signal::<Vec<ResourceDocument>>(vec![]);
    let (selected, set_selected) = create_signal::<Option<ResourceDocument>>(None);
    let (loading, set_loading) = create_signal(false);
    let (error, set_error) = create_signal::<Option<String>>(None);

    // Load namespaces once, preselecting the configured default
    spawn_local(async move {
        let preferred = api::get_config().await.ok().map(|c| c.default_namespace);
        match api::get_namespaces().await {
            Ok(list) => {
                set_namespace.set(initial_namespace(&list, preferred.as_deref()));
                set_namespaces.set(list);
            }
            Err(e) => set_error.set(Some(e.message)),
        }
    });

    let load_resources = move || {
        let Some(ns) = namespace.get_untracked() else {
            return;
        };
        let kind = kind.get_untracked();
        let simplified = simplified.get_untracked();

        set_loading.set(true);
        set_selected.set(None);
        spawn_local(async move {
            match api::get_resources(&ns, kind, simplified).await {
                Ok(data) => {
                    set_resources.set(data);
                    set_error.set(None);
                }
                Err(e) => {
                    set_resources.set(vec![]);
                    set_error.set(Some(e.message));
                }
            }
            set_loading.set(false);
        });
    };

    // Re-fetch whenever a selector changes
    create_effect(move |_| {
        let _ = (namespace.get(), kind.get(), simplified.get());
        load_resources();
    });

    view! {
        <div class="p-6 space-y-6">
            <div class="bg-white p-4 rounded-lg shadow">
                <div class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end">
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-2">"Namespace"</label>
                        <select
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg"
                            on:change=move |ev| set_namespace.set(Some(event_target_value(&ev)))
                        >
                            {move || namespaces.get()
                                .into_iter()
                                .map(|ns| {
                                    let is_selected = namespace.get().as_deref() == Some(ns.name.as_str());
                                    view! {
                                        <option value=ns.name.clone() selected=is_selected>{ns.name.clone()}</option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-2">"Resource"</label>
                        <select
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg"
                            on:change=move |ev| {
                                if let Ok(k) = event_target_value(&ev).parse::<ResourceKind>() {
                                    set_kind.set(k);
                                }
                            }
                        >
                            {ResourceKind::ALL
                                .into_iter()
                                .map(|k| view! {
                                    <option value=k.plural() selected=move || kind.get() == k>{k.display_name()}</option>
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div>
                        <label class="block text-sm font-medium text-gray-700 mb-2">"View"</label>
                        <select
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg"
                            on:change=move |ev| set_simplified.set(event_target_value(&ev) != "full")
                        >
                            <option value="simplified" selected=move || simplified.get()>"Simplified"</option>
                            <option value="full" selected=move || !simplified.get()>"Full"</option>
                        </select>
                    </div>
                    <button
                        on:click=move |_| load_resources()
                        disabled=loading
                        class="px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 disabled:opacity-50 disabled:cursor-not-allowed"
                    >
                        {move || if loading.get() { "Loading..." } else { "Refresh" }}
                    </button>
                </div>
            </div>

            // Error display
            {move || error.get().map(|err| view! {
                <div class="bg-red-50 border border-red-200 rounded-lg p-4">
                    <h3 class="text-sm font-medium text-red-800">"Error"</h3>
                    <p class="mt-2 text-sm text-red-700">{err}</p>
                </div>
            })}

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div class="bg-white rounded-lg shadow divide-y divide-gray-200">
                    {move || {
                        let items = resources.get();
                        if loading.get() {
                            view! { <p class="p-4 text-sm text-gray-500">"Loading..."</p> }.into_view()
                        } else if items.is_empty() {
                            view! { <p class="p-4 text-sm text-gray-500">"No resources"</p> }.into_view()
                        } else {
                            items
                                .into_iter()
                                .map(|doc| view! { <ResourceRow doc=doc selected=selected on_select=set_selected/> })
                                .collect_view()
                        }
                    }}
                </div>

                <div>
                    {move || match selected.get() {
                        Some(doc) => view! { <ResourceDetails resource=doc/> }.into_view(),
                        None => view! {
                            <p class="text-sm text-gray-500">"Select a resource to see its details"</p>
                        }
                        .into_view(),
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn ResourceRow(
    doc: ResourceDocument,
    selected: ReadSignal<Option<ResourceDocument>>,
    on_select: WriteSignal<Option<ResourceDocument>>,
) -> impl IntoView {
    let row = doc.clone();
    let row_class = move || {
        let highlighted = selected.with(|s| s.as_ref().is_some_and(|s| same_resource(s, &row)));
        if highlighted {
            "p-3 cursor-pointer hover:bg-gray-50 bg-blue-50"
        } else {
            "p-3 cursor-pointer hover:bg-gray-50"
        }
    };
    let name = doc.name().unwrap_or("(unnamed)").to_string();
    let phase = doc.phase().map(str::to_string);
    let badge = phase_class(phase.as_deref());
    let labels = doc.labels();

    view! {
        <div
            class=row_class
            on:click=move |_| on_select.set(Some(doc.clone()))
        >
            <div class="flex justify-between items-center">
                <span class="font-medium text-gray-900">{name}</span>
                {phase.map(|p| view! {
                    <span class=format!("px-2 py-0.5 rounded text-xs {}", badge)>{p}</span>
                })}
            </div>
            <div class="mt-1 flex flex-wrap gap-1">
                {labels
                    .into_iter()
                    .map(|(key, value)| view! {
                        <span class="px-2 py-0.5 bg-gray-100 text-gray-700 rounded text-xs">
                            {format!("{}={}", key, value)}
                        </span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
