//! メインアプリケーションコンポーネント

use crate::components::{
    builder_panel::BuilderPanel,
    design_cards::DesignCards,
    hand_preview::HandPreview,
    header::Header,
    price_panel::PricePanel,
    toast::{Toast, Toaster},
    tryon_panel::TryOnPanel,
};
use crate::local_storage::LocalStore;
use crate::tryon::{DomLayout, DomPhoto, SignalView, TryOn};
use leptos::html;
use leptos::prelude::*;
use nail_studio_common::wishlist::{dispatch_card_action, library_cards, wishlist_cards};
use nail_studio_common::{CardAction, DesignState, DesignUpdate, NailId, Wishlist};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

fn wishlist() -> Wishlist<LocalStore> {
    Wishlist::new(LocalStore::open())
}

/// 保存日（YYYY-MM-DD）
fn today() -> String {
    let now = js_sys::Date::new_0();
    format!("{:04}-{:02}-{:02}", now.get_full_year(), now.get_month() + 1, now.get_date())
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let tryon = Rc::new(TryOn::new());

    // アプリケーション状態
    let design = RwSignal::new(DesignState::default());
    let placements = RwSignal::new(tryon.shown());
    let entries = RwSignal::new(wishlist().load());
    let aligning = RwSignal::new(false);
    let toaster = Toaster::new();

    let container_ref = NodeRef::<html::Div>::new();
    let photo_ref = NodeRef::<html::Img>::new();

    let quote = Memo::new(move |_| design.with(|d| nail_studio_common::quote(d)));
    let total = Memo::new(move |_| quote.with(|q| q.total));

    let apply = move |update: DesignUpdate| {
        design.update(|d| *d = std::mem::take(d).apply(update));
    };

    // デザイン編集
    let on_update = move |update: DesignUpdate| {
        let reset = matches!(update, DesignUpdate::Reset);
        apply(update);
        if reset {
            toaster.show("Reset to default");
        }
    };

    // 自動位置合わせ（検出待ちの間もUIは操作できる）
    let on_auto_align = {
        let tryon = tryon.clone();
        move |_: ()| {
            let tryon = tryon.clone();
            let (enabled, visible) = design.with_untracked(|d| (d.try_on_enabled, d.photo_visible()));
            aligning.set(true);
            spawn_local(async move {
                let photo = DomPhoto::new(photo_ref.get_untracked(), visible);
                let layout = DomLayout::new(container_ref.get_untracked().map(Into::into));
                let view = SignalView::new(placements, toaster);
                if let Err(e) = tryon.aligner.invoke(enabled, &photo, &layout, &tryon.store, &view).await {
                    web_sys::console::log_1(&format!("Auto-align: {}", e).into());
                }
                aligning.set(tryon.aligner.is_busy());
            });
        }
    };

    let on_toggle = {
        let tryon = tryon.clone();
        move |enabled: bool| {
            apply(DesignUpdate::TryOnEnabled(enabled));
            // 保存済みの配置は起動時に一度だけ読む。ここではメモリ上の配置を表示し直す
            if enabled {
                placements.set(tryon.shown());
            }
            toaster.show(if enabled { "Try-on enabled" } else { "Try-on disabled" });
        }
    };

    let on_photo = move |data_url: String| {
        apply(DesignUpdate::TryOnPhoto(Some(data_url)));
        toaster.show("Hand photo loaded");
    };

    let on_clear_photo = move |_: ()| {
        apply(DesignUpdate::TryOnPhoto(None));
        toaster.show("Hand photo cleared");
    };

    let on_edit = move |edit: bool| {
        apply(DesignUpdate::TryOnEdit(edit));
        toaster.show(if edit { "Alignment edit enabled" } else { "Alignment locked" });
    };

    let on_reset_positions = {
        let tryon = tryon.clone();
        move |_: ()| {
            let shown = tryon.store.borrow_mut().reset_to_base();
            placements.set(shown);
            toaster.show("Nail positions reset");
        }
    };

    let on_accent = move |nail: NailId| {
        let next = design.with_untracked(|d| d.clone().select_accent(nail));
        if let Some(next) = next {
            design.set(next);
            toaster.show("Accent nail selected");
        }
    };

    let on_card_action = move |action: CardAction| {
        let is_preset = matches!(action, CardAction::ApplyPreset(_));
        let wishlist = wishlist();
        let outcome = dispatch_card_action(action, design.get_untracked(), &wishlist);
        design.set(outcome.design);
        if outcome.wishlist_changed {
            entries.set(wishlist.load());
        }
        toaster.show(outcome.message);
        if is_preset {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_hash("builder");
            }
        }
    };

    let on_save = move |name: String| {
        let wishlist = wishlist();
        let id = js_sys::Date::now() as i64;
        let saved = design.with_untracked(|d| wishlist.save(&name, d, id, &today()));
        match saved {
            Ok(_) => {
                entries.set(wishlist.load());
                toaster.show("Look saved to Wishlist!");
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("Failed to save look: {}", e).into());
                toaster.show("Could not save look");
            }
        }
    };

    view! {
        <div class="container">
            <Header total=total />

            <main class="studio">
                <div class="preview-column">
                    <HandPreview
                        design=design
                        placements=placements
                        tryon=tryon.clone()
                        container_ref=container_ref
                        photo_ref=photo_ref
                        on_photo_loaded=on_auto_align.clone()
                        on_accent=on_accent
                    />
                    <TryOnPanel
                        design=design
                        aligning=aligning
                        on_toggle=on_toggle
                        on_photo=on_photo
                        on_clear=on_clear_photo
                        on_edit=on_edit
                        on_auto_align=on_auto_align
                        on_reset_positions=on_reset_positions
                    />
                </div>

                <div class="controls-column">
                    <BuilderPanel design=design on_update=on_update />
                    <PricePanel quote=quote on_save=on_save />
                </div>
            </main>

            <DesignCards
                id="library"
                title="Design Library"
                cards=Signal::derive(library_cards)
                empty_text="No presets available."
                on_action=on_card_action
            />
            <DesignCards
                id="wishlist"
                title="Wishlist"
                cards=Signal::derive(move || entries.with(|e| wishlist_cards(e)))
                empty_text="No saved looks yet."
                on_action=on_card_action
            />

            <Toast toaster=toaster />
        </div>
    }
}
