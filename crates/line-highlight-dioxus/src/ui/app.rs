use dioxus::prelude::*;
use line_highlight_config::{Config, DefaultView};
use line_highlight_engine::interaction::MarkerRequest;
use line_highlight_engine::{DocumentRef, DocumentStore, EditOutcome, FileStore, io, set_line_marker};

use super::components::{DocumentView, ErrorScreen, FileList};

const APP_CSS: &str = include_str!("../assets/app.css");

#[component]
pub fn App(config: Config) -> Element {
    let documents = use_signal({
        let notes_path = config.notes_path.clone();
        move || io::list_documents(&notes_path)
    });

    let mut selected = use_signal(|| None::<DocumentRef>);
    let mut source = use_signal(|| None::<String>);
    let mut view = use_signal(|| config.default_view);
    let mut status = use_signal(|| None::<String>);

    let store = FileStore::new(&config.notes_path);

    let mut open_document = {
        let store = store.clone();
        move |document: DocumentRef| match store.read(&document) {
            Ok(text) => {
                source.set(Some(text));
                selected.set(Some(document));
                status.set(None);
            }
            Err(e) => {
                log::error!("Error reading {}: {e}", document.relative_path());
                status.set(Some(format!("Could not open {}: {e}", document.display_path())));
            }
        }
    };

    let on_marker_request = {
        let store = store.clone();
        let mut open_document = open_document.clone();
        move |request: MarkerRequest| {
            let active = selected.read().clone();
            match set_line_marker(&store, &active, request.line_index, request.color) {
                Ok(EditOutcome::Applied) => {
                    if let Some(document) = active {
                        open_document(document);
                    }
                }
                Ok(outcome) => log::debug!("Marker request left document as is: {outcome:?}"),
                Err(e) => {
                    log::error!("Failed to update marker: {e}");
                    status.set(Some(format!("Could not save: {e}")));
                }
            }
        }
    };

    let documents = match &*documents.read() {
        Ok(documents) => documents.clone(),
        Err(e) => {
            return rsx! {
                ErrorScreen {
                    title: "Cannot read notes".to_string(),
                    message: format!("{}", config.notes_path.display()),
                    details: Some(e.to_string()),
                }
            };
        }
    };

    rsx! {
        style { {APP_CSS} }
        div {
            class: "app-container",
            div {
                class: "sidebar",
                h2 { "Notes" }
                FileList {
                    documents,
                    selected: selected.read().clone(),
                    on_select: move |document: DocumentRef| open_document(document),
                }
            }
            div {
                class: "main-content",
                if let Some(message) = status.read().as_ref() {
                    div { class: "status", "{message}" }
                }
                if let (Some(document), Some(text)) = (selected.read().as_ref(), source.read().as_ref()) {
                    DocumentView {
                        document: document.clone(),
                        source: text.clone(),
                        view: *view.read(),
                        grace: config.palette_grace(),
                        on_view_change: move |next: DefaultView| view.set(next),
                        on_marker_request,
                    }
                } else {
                    div {
                        class: "welcome",
                        h1 { "line-highlight" }
                        p { "Select a note from the sidebar to view it" }
                    }
                }
            }
        }
    }
}
