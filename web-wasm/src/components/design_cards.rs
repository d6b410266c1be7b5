//! デザインカード一覧（ライブラリ・ウィッシュリスト共用）

use leptos::prelude::*;
use nail_studio_common::{CardAction, DesignCard};

fn mini_nail_style(card: &DesignCard) -> String {
    format!(
        "background-color: {}; border-radius: {}; clip-path: {};",
        card.color,
        card.border_radius,
        card.clip_path.unwrap_or("none")
    )
}

#[component]
pub fn DesignCards<F>(
    id: &'static str,
    title: &'static str,
    #[prop(into)] cards: Signal<Vec<DesignCard>>,
    /// カードが無いときの表示
    empty_text: &'static str,
    on_action: F,
) -> impl IntoView
where
    F: Fn(CardAction) + Send + Sync + Clone + 'static,
{
    view! {
        <section id=id class="card-section">
            <h2>{title}</h2>
            <p class=move || if cards.with(|c| c.is_empty()) { "text-muted" } else { "text-muted hidden" }>
                {empty_text}
            </p>
            <div class="card-grid">
                <For
                    each=move || cards.get()
                    key=|card| card.key.clone()
                    children=move |card| {
                        let apply = card.apply.clone();
                        let remove = card.remove.clone();
                        let on_apply = on_action.clone();
                        let on_remove = on_action.clone();
                        view! {
                            <div class="design-card">
                                <div class="mini-nail" style=mini_nail_style(&card) />
                                <h4>{card.name.clone()}</h4>
                                <div class="tags">
                                    {card.tags.iter().map(|tag| view! { <span class="tag">{tag.clone()}</span> }).collect_view()}
                                </div>
                                <div class="card-actions">
                                    <button type="button" class="btn btn-primary" on:click=move |_| on_apply(apply.clone())>
                                        "Apply"
                                    </button>
                                    {remove.map(|action| view! {
                                        <button type="button" class="btn btn-text" on:click=move |_| on_remove(action.clone())>
                                            "Remove"
                                        </button>
                                    })}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </section>
    }
}
