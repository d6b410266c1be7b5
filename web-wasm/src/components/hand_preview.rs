//! 手のプレビュー（写真・5枚のネイル・ドラッグ調整）

use crate::tryon::TryOn;
use leptos::html;
use leptos::prelude::*;
use nail_studio_common::render::nail_style;
use nail_studio_common::{DesignState, NailId, PlacementSet, PointerSample, Size};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, PointerEvent};

fn sample(ev: &PointerEvent) -> PointerSample {
    PointerSample::new(ev.pointer_id(), ev.client_x() as f64, ev.client_y() as f64)
}

fn container_size(container: NodeRef<html::Div>) -> Size {
    container
        .get_untracked()
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            Size::new(rect.width(), rect.height())
        })
        .unwrap_or_default()
}

#[component]
pub fn HandPreview<L, A>(
    design: RwSignal<DesignState>,
    placements: RwSignal<PlacementSet>,
    tryon: Rc<TryOn>,
    container_ref: NodeRef<html::Div>,
    photo_ref: NodeRef<html::Img>,
    /// 写真の読み込み完了
    on_photo_loaded: L,
    /// ネイルのクリックによるアクセント選択
    on_accent: A,
) -> impl IntoView
where
    L: Fn(()) + 'static + Clone,
    A: Fn(NailId) + 'static + Clone,
{
    let nails = NailId::ALL
        .iter()
        .map(|&nail| {
            let on_pointer_down = {
                let tryon = tryon.clone();
                move |ev: PointerEvent| {
                    let editing = design.with_untracked(|d| d.drag_enabled());
                    let started = tryon.drag.borrow_mut().pointer_down(
                        nail,
                        sample(&ev),
                        container_size(container_ref),
                        editing,
                        &tryon.store.borrow(),
                    );
                    if !started {
                        return;
                    }
                    ev.prevent_default();
                    if let Some(el) = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
                        let _ = el.set_pointer_capture(ev.pointer_id());
                    }
                }
            };

            let on_pointer_move = {
                let tryon = tryon.clone();
                move |ev: PointerEvent| {
                    let moved = tryon
                        .drag
                        .borrow_mut()
                        .pointer_move(nail, sample(&ev), &mut tryon.store.borrow_mut());
                    if let Some(placement) = moved {
                        placements.update(|set| {
                            set.insert(nail, placement);
                        });
                    }
                }
            };

            let on_pointer_up = {
                let tryon = tryon.clone();
                move |ev: PointerEvent| {
                    tryon.drag.borrow_mut().pointer_up(nail, sample(&ev), &tryon.store.borrow());
                }
            };

            let on_pointer_cancel = {
                let tryon = tryon.clone();
                move |ev: PointerEvent| {
                    tryon.drag.borrow_mut().pointer_cancel(nail, sample(&ev), &tryon.store.borrow());
                }
            };

            let on_click = {
                let on_accent = on_accent.clone();
                move |_| on_accent(nail)
            };

            let on_keydown = {
                let on_accent = on_accent.clone();
                move |ev: KeyboardEvent| {
                    if ev.key() == "Enter" || ev.key() == " " {
                        ev.prevent_default();
                        on_accent(nail);
                    }
                }
            };

            let style = move || {
                let placement = placements.with(|set| set.get(nail).copied().unwrap_or_default());
                let look = design.with(|d| nail_style(d, nail).to_css());
                format!(
                    "left: {:.2}%; top: {:.2}%; transform: {}; {}",
                    placement.left_percent(),
                    placement.top_percent(),
                    placement.css_transform(),
                    look
                )
            };

            let class = move || {
                let mut class = String::from("nail");
                if design.with(|d| d.is_accent(nail)) {
                    class.push_str(" accent");
                }
                if design.with(|d| d.drag_enabled()) {
                    class.push_str(" draggable");
                }
                class
            };

            view! {
                <div
                    id=nail.element_id()
                    class=class
                    style=style
                    tabindex="0"
                    role="button"
                    aria-label=nail.as_str()
                    on:pointerdown=on_pointer_down
                    on:pointermove=on_pointer_move
                    on:pointerup=on_pointer_up
                    on:pointercancel=on_pointer_cancel
                    on:click=on_click
                    on:keydown=on_keydown
                />
            }
        })
        .collect_view();

    let container_class = move || {
        let mut class = String::from("hand-container");
        if design.with(|d| d.photo_visible()) {
            class.push_str(" photo-mode");
        }
        if design.with(|d| d.drag_enabled()) {
            class.push_str(" align-mode");
        }
        class
    };

    view! {
        <div class=container_class node_ref=container_ref>
            <img
                class=move || if design.with(|d| d.photo_visible()) { "hand-photo" } else { "hand-photo hidden" }
                src=move || design.with(|d| d.try_on_photo.clone().unwrap_or_default())
                alt="Hand photo"
                node_ref=photo_ref
                on:load=move |_| {
                    if design.with_untracked(|d| d.try_on_enabled) {
                        on_photo_loaded(());
                    }
                }
            />
            <div class="hand-silhouette" />
            {nails}
        </div>
    }
}
