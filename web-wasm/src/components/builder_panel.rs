//! デザイン編集パネル（形・長さ・色・仕上げ・柄・アクセント・ネイル柄・オプション）

use crate::components::image_upload::ImageUpload;
use leptos::prelude::*;
use nail_studio_common::design::available_addons;
use nail_studio_common::{DesignState, DesignUpdate, ExtensionType, Finish, NailLength, Pattern, Shape, SWATCHES};

#[component]
pub fn BuilderPanel<F>(design: RwSignal<DesignState>, on_update: F) -> impl IntoView
where
    F: Fn(DesignUpdate) + 'static + Clone,
{
    let shapes = Shape::ALL
        .iter()
        .map(|&shape| {
            let on_update = on_update.clone();
            view! {
                <label class="radio-pill">
                    <input
                        type="radio"
                        name="shape"
                        value=shape.as_str()
                        prop:checked=move || design.with(|d| d.shape == shape)
                        on:change=move |_| on_update(DesignUpdate::Shape(shape))
                    />
                    <span>{shape.as_str()}</span>
                </label>
            }
        })
        .collect_view();

    let swatches = SWATCHES
        .iter()
        .map(|&color| {
            let on_update = on_update.clone();
            view! {
                <button
                    type="button"
                    class=move || if design.with(|d| d.color == color) { "swatch active" } else { "swatch" }
                    style=format!("background-color: {}", color)
                    aria-label=color
                    on:click=move |_| on_update(DesignUpdate::Color(color.to_string()))
                />
            }
        })
        .collect_view();

    let finishes = Finish::ALL
        .iter()
        .map(|&finish| {
            let on_update = on_update.clone();
            view! {
                <button
                    type="button"
                    class=move || if design.with(|d| d.finish == finish) { "toggle-btn active" } else { "toggle-btn" }
                    on:click=move |_| on_update(DesignUpdate::Finish(finish))
                >
                    {finish.as_str()}
                </button>
            }
        })
        .collect_view();

    let addons = available_addons()
        .into_iter()
        .map(|addon| {
            let on_update = on_update.clone();
            let name = addon.name.clone();
            let checked_name = addon.name.clone();
            let label = format!("{} (+${})", addon.name, addon.price);
            view! {
                <label class="addon">
                    <input
                        type="checkbox"
                        class="addon-check"
                        prop:checked=move || design.with(|d| d.addons.iter().any(|a| a.name == checked_name))
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            let current = design.get_untracked().addons;
                            // 画面上の並び順で選択中のものを集める
                            let selected = available_addons()
                                .into_iter()
                                .filter(|a| {
                                    if a.name == name {
                                        checked
                                    } else {
                                        current.iter().any(|c| c.name == a.name)
                                    }
                                })
                                .collect();
                            on_update(DesignUpdate::Addons(selected));
                        }
                    />
                    <span>{label}</span>
                </label>
            }
        })
        .collect_view();

    let on_length = {
        let on_update = on_update.clone();
        move |ev| {
            let level = event_target_value(&ev).parse::<u8>().ok();
            if let Some(length) = level.and_then(|l| NailLength::try_from(l).ok()) {
                on_update(DesignUpdate::Length(length));
            }
        }
    };

    let on_color = {
        let on_update = on_update.clone();
        move |ev| on_update(DesignUpdate::Color(event_target_value(&ev)))
    };

    let on_pattern = {
        let on_update = on_update.clone();
        move |ev| {
            let value = event_target_value(&ev);
            if let Some(&pattern) = Pattern::ALL.iter().find(|p| p.as_str() == value) {
                on_update(DesignUpdate::Pattern(pattern));
            }
        }
    };

    let on_accent_toggle = {
        let on_update = on_update.clone();
        move |ev| on_update(DesignUpdate::AccentEnabled(event_target_checked(&ev)))
    };

    let on_accent_color = {
        let on_update = on_update.clone();
        move |ev| on_update(DesignUpdate::AccentColor(event_target_value(&ev)))
    };

    let on_texture = {
        let on_update = on_update.clone();
        move |data_url: String| on_update(DesignUpdate::NailTexture(Some(data_url)))
    };

    let on_clear_texture = {
        let on_update = on_update.clone();
        move |_| on_update(DesignUpdate::NailTexture(None))
    };

    let on_ext_type = {
        let on_update = on_update.clone();
        move |ev| {
            let value = event_target_value(&ev);
            if let Some(&ext) = ExtensionType::ALL.iter().find(|e| e.as_str() == value) {
                on_update(DesignUpdate::ExtType(ext));
            }
        }
    };

    let on_reset = {
        let on_update = on_update.clone();
        move |_| on_update(DesignUpdate::Reset)
    };

    view! {
        <section id="builder" class="builder-panel">
            <div class="control-group">
                <h3>"Shape"</h3>
                <div class="radio-row">{shapes}</div>
            </div>

            <div class="control-group">
                <h3>"Length"</h3>
                <input
                    type="range"
                    id="length-slider"
                    min="1"
                    max="3"
                    step="1"
                    prop:value=move || design.with(|d| d.length.level().to_string())
                    on:input=on_length
                />
                <span class="length-label">{move || design.with(|d| d.length.label())}</span>
            </div>

            <div class="control-group">
                <h3>"Color"</h3>
                <div class="swatches">{swatches}</div>
                <input
                    type="color"
                    id="custom-color"
                    prop:value=move || design.with(|d| d.color.clone())
                    on:input=on_color
                />
            </div>

            <div class="control-group">
                <h3>"Finish"</h3>
                <div class="toggle-row">{finishes}</div>
            </div>

            <div class="control-group">
                <h3>"Pattern"</h3>
                <select id="pattern-select" on:change=on_pattern>
                    {Pattern::ALL
                        .iter()
                        .map(|&pattern| view! {
                            <option value=pattern.as_str() selected=move || design.with(|d| d.pattern == pattern)>
                                {pattern.as_str()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="control-group">
                <label class="switch">
                    <input
                        type="checkbox"
                        id="accent-toggle"
                        prop:checked=move || design.with(|d| d.accent_enabled)
                        on:change=on_accent_toggle
                    />
                    <span>"Accent nail"</span>
                </label>
                <div class=move || if design.with(|d| d.accent_enabled) { "accent-controls" } else { "accent-controls hidden" }>
                    <input
                        type="color"
                        id="accent-color"
                        prop:value=move || design.with(|d| d.accent_color.clone())
                        on:input=on_accent_color
                    />
                    <p class="text-muted">"Tap a nail to choose the accent."</p>
                </div>
            </div>

            <div class="control-group">
                <h3>"Nail art image"</h3>
                <ImageUpload id="nail-texture-upload" label="Upload nail art" on_image=on_texture />
                <button
                    type="button"
                    class="btn btn-text"
                    disabled=move || design.with(|d| d.nail_texture.is_none())
                    on:click=on_clear_texture
                >
                    "Clear"
                </button>
            </div>

            <div class="control-group">
                <h3>"Extension type"</h3>
                <select id="ext-type" on:change=on_ext_type>
                    {ExtensionType::ALL
                        .iter()
                        .map(|&ext| view! {
                            <option value=ext.as_str() selected=move || design.with(|d| d.ext_type == ext)>
                                {ext.as_str()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="control-group">
                <h3>"Add-ons"</h3>
                <div class="addons">{addons}</div>
            </div>

            <button type="button" class="btn btn-secondary" on:click=on_reset>
                "Reset"
            </button>
        </section>
    }
}
