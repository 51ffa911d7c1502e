//! Drop target with a hidden file picker and live image preview.

use dioxus::html::HasFileData;
use dioxus::prelude::*;
use picdrop_core::{
    AcceptPolicy, DropTargetState, SelectError, SelectOutcome, Selection, UploadConfig,
    UploadEffect, UploadView,
};
use wasm_bindgen::JsCast;

use crate::console;
use crate::object_url::ObjectUrlStore;
use crate::read;

/// Props for the [`UploadArea`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadAreaProps {
    /// Accept list, drop validation, and size limit.
    config: UploadConfig,
}

/// A bounded drop target that holds one image and previews it.
///
/// Drop a file onto the area, or click anywhere in it to open the file
/// picker. The first file of a drop or pick replaces the current one;
/// extra files are ignored. The preview is contain-fit to the area.
#[component]
pub fn UploadArea(props: UploadAreaProps) -> Element {
    let config = props.config;
    let mut selection = use_signal(move || new_selection(&config));
    let mut read_error = use_signal(|| Option::<String>::None);
    let mut picker = use_signal(|| Option::<web_sys::HtmlElement>::None);

    // Revoke the final preview URL when the widget is torn down.
    use_drop(move || {
        if let Ok(mut selection) = selection.try_write() {
            selection.clear();
        }
    });

    let handle_files = move |evt: FormEvent| async move {
        let ticket = selection.write().begin_read();
        read_error.set(None);
        let read = read::read_first(evt.files()).await;
        // A newer pick or drop started while this file was being read.
        if !selection.peek().is_current(ticket) {
            return;
        }
        match read {
            Ok(file) => report(selection.write().on_file_picker_change(file)),
            Err(e) => {
                console::warn(&e.to_string());
                read_error.set(Some(e.to_string()));
            }
        }
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        // End the drag now; reading the file may take a while.
        let ticket = {
            let mut selection = selection.write();
            selection.on_drag_leave();
            selection.begin_read()
        };
        read_error.set(None);
        let read = read::read_first(evt.files()).await;
        if !selection.peek().is_current(ticket) {
            return;
        }
        match read {
            Ok(file) => report(selection.write().on_drop(file)),
            Err(e) => {
                console::warn(&e.to_string());
                read_error.set(Some(e.to_string()));
            }
        }
    };

    let handle_click = move |_: MouseEvent| match selection.peek().on_area_click() {
        UploadEffect::OpenPicker => {
            if let Some(input) = picker.peek().as_ref() {
                input.click();
            } else {
                console::warn("file picker is not mounted");
            }
        }
    };

    // Copy what the markup needs out of the signal so no borrow is held
    // across event handlers.
    let (area_class, accept, preview, error) = {
        let state = selection.read();
        let preview = match state.view() {
            UploadView::Preview { url, file } => Some((url.clone(), file.name().to_owned())),
            UploadView::Placeholder => None,
        };
        let error = read_error()
            .or_else(|| state.last_error().map(ToString::to_string));
        (
            target_class(state.drop_target_state()),
            state.policy().to_attribute(),
            preview,
            error,
        )
    };

    rsx! {
        div { class: "upload",
            input {
                r#type: "file",
                accept: "{accept}",
                class: "hidden",
                onmounted: move |evt: MountedEvent| {
                    let input = evt
                        .data()
                        .downcast::<web_sys::Element>()
                        .and_then(|el| el.clone().dyn_into::<web_sys::HtmlElement>().ok());
                    picker.set(input);
                },
                onchange: handle_files,
            }

            div {
                class: "{area_class}",
                role: "button",
                aria_label: "Upload an image",
                ondragenter: move |evt: DragEvent| {
                    evt.prevent_default();
                    selection.write().on_drag_enter();
                },
                ondragover: move |evt: DragEvent| {
                    evt.prevent_default();
                    selection.write().on_drag_over();
                },
                ondragleave: move |_| {
                    selection.write().on_drag_leave();
                },
                ondrop: handle_drop,
                onclick: handle_click,

                if let Some((url, name)) = preview {
                    img {
                        src: "{url}",
                        alt: "Preview of {name}",
                        class: "upload-area__preview",
                    }
                } else {
                    p { class: "upload-area__placeholder",
                        "Drag a file here or click to upload."
                    }
                }
            }

            if let Some(err) = error {
                p { class: "upload__error", "{err}" }
            }
        }
    }
}

/// Build the widget's selection, falling back to an image-only policy if
/// the configured accept list is malformed.
fn new_selection(config: &UploadConfig) -> Selection<ObjectUrlStore> {
    Selection::from_config(ObjectUrlStore, config).unwrap_or_else(|e| {
        console::warn(&format!("{e}; accepting images only"));
        Selection::new(ObjectUrlStore, AcceptPolicy::images())
            .with_drop_validation(config.validate_drops)
            .with_max_bytes(config.max_bytes)
    })
}

/// CSS classes for the drop target in the given state.
const fn target_class(state: DropTargetState) -> &'static str {
    match state {
        DropTargetState::Active => "upload-area upload-area--active",
        DropTargetState::Inactive => "upload-area",
    }
}

/// Log rejected selections; the message itself is rendered from
/// `Selection::last_error`.
fn report(outcome: Result<SelectOutcome, SelectError>) {
    match outcome {
        Ok(SelectOutcome::Selected | SelectOutcome::NoFiles) => {}
        Err(SelectError::Preview(e)) => console::warn(&format!("preview unavailable: {e}")),
        Err(e) => console::warn(&format!("upload rejected: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_class_reflects_drag_state() {
        assert_eq!(target_class(DropTargetState::Inactive), "upload-area");
        assert!(target_class(DropTargetState::Active).contains("upload-area--active"));
    }
}
