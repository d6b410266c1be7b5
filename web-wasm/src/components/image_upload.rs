//! 画像アップロード（手の写真・ネイル柄）

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileReader, HtmlInputElement};

#[component]
pub fn ImageUpload<F>(
    /// input 要素のID（label の for 用）
    id: &'static str,
    label: &'static str,
    on_image: F,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_change = {
        let on_image = on_image.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                read_data_url(file, on_image.clone());
            }
            // 同じファイルを選び直しても change が発火するように
            input.set_value("");
        }
    };

    let on_drop = {
        let on_image = on_image.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);
            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                read_data_url(file, on_image.clone());
            }
        }
    };

    view! {
        <label
            for=id
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                set_is_dragover.set(true);
            }
            on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
        >
            <span>{label}</span>
            <input type="file" id=id accept="image/*" class="visually-hidden" on:change=on_change />
        </label>
    }
}

/// 画像ファイルを Data URL として読み込む
fn read_data_url<F>(file: File, on_loaded: F)
where
    F: Fn(String) + 'static,
{
    if !file.type_().starts_with("image/") {
        web_sys::console::warn_1(&format!("Ignoring non-image file: {}", file.name()).into());
        return;
    }
    let Ok(reader) = FileReader::new() else {
        return;
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Some(data_url) = reader_clone.result().ok().and_then(|r| r.as_string()) {
            on_loaded(data_url);
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        web_sys::console::warn_2(&"Failed to read file:".into(), &e);
    }
}
