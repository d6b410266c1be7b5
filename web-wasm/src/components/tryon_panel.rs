//! 試着コントロール（有効化・写真・位置合わせ）

use crate::components::image_upload::ImageUpload;
use leptos::prelude::*;
use nail_studio_common::DesignState;

#[component]
pub fn TryOnPanel<T, P, C, E, A, R>(
    design: RwSignal<DesignState>,
    /// 自動位置合わせの検出待ち
    aligning: RwSignal<bool>,
    on_toggle: T,
    on_photo: P,
    on_clear: C,
    on_edit: E,
    on_auto_align: A,
    on_reset_positions: R,
) -> impl IntoView
where
    T: Fn(bool) + 'static + Clone,
    P: Fn(String) + 'static + Clone,
    C: Fn(()) + 'static + Clone,
    E: Fn(bool) + 'static + Clone,
    A: Fn(()) + 'static + Clone,
    R: Fn(()) + 'static + Clone,
{
    let enabled = move || design.with(|d| d.try_on_enabled);

    view! {
        <section class="tryon-panel">
            <label class="switch">
                <input
                    type="checkbox"
                    id="tryon-toggle"
                    prop:checked=enabled
                    on:change=move |ev| on_toggle(event_target_checked(&ev))
                />
                <span>"Try on my hand"</span>
            </label>

            <div class=move || if enabled() { "tryon-controls" } else { "tryon-controls hidden" }>
                <ImageUpload id="hand-photo-upload" label="Upload hand photo" on_image=on_photo />

                <button
                    type="button"
                    class="btn btn-text"
                    disabled=move || design.with(|d| d.try_on_photo.is_none())
                    on:click={
                        let on_clear = on_clear.clone();
                        move |_| on_clear(())
                    }
                >
                    "Clear photo"
                </button>

                <label class="switch">
                    <input
                        type="checkbox"
                        id="tryon-edit"
                        prop:checked=move || design.with(|d| d.try_on_edit)
                        on:change=move |ev| on_edit(event_target_checked(&ev))
                    />
                    <span>"Adjust positions"</span>
                </label>

                <div class="tryon-actions">
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || aligning.get() || design.with(|d| !d.photo_visible())
                        on:click={
                            let on_auto_align = on_auto_align.clone();
                            move |_| on_auto_align(())
                        }
                    >
                        {move || if aligning.get() { "Detecting..." } else { "Auto align" }}
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        on:click={
                            let on_reset_positions = on_reset_positions.clone();
                            move |_| on_reset_positions(())
                        }
                    >
                        "Reset positions"
                    </button>
                </div>

                <p class="text-muted">
                    {move || if design.with(|d| d.drag_enabled()) {
                        "Drag a nail to move it."
                    } else {
                        "Turn on adjust to drag nails."
                    }}
                </p>
            </div>
        </section>
    }
}
