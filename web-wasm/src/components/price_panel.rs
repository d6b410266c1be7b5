//! 見積もり表示と「ウィッシュリストに保存」

use leptos::prelude::*;
use nail_studio_common::Quote;

#[component]
pub fn PricePanel<F>(quote: Memo<Quote>, on_save: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone,
{
    let (show_form, set_show_form) = signal(false);
    let (name, set_name) = signal(String::new());

    let submit = move || {
        on_save(name.get_untracked());
        set_name.set(String::new());
        set_show_form.set(false);
    };
    let submit_on_enter = submit.clone();

    view! {
        <section class="price-panel">
            <h3>"Estimate"</h3>
            <ul class="price-breakdown">
                {move || quote.with(|q| {
                    q.breakdown
                        .iter()
                        .map(|line| view! {
                            <li>
                                <span>{line.label.clone()}</span>
                                <span>{line.amount_text()}</span>
                            </li>
                        })
                        .collect_view()
                })}
            </ul>
            <div class="price-total">
                <span>"Total"</span>
                <span id="total-price">{move || format!("${}", quote.with(|q| q.total))}</span>
            </div>
            <p class="text-muted">{move || format!("Approx. {} min", quote.with(|q| q.minutes))}</p>

            <button type="button" class="btn btn-primary" on:click=move |_| set_show_form.update(|v| *v = !*v)>
                "Save to Wishlist"
            </button>

            <div class=move || if show_form.get() { "save-form" } else { "save-form hidden" }>
                <input
                    type="text"
                    placeholder="My Custom Look"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    on:keydown={
                        let submit = submit_on_enter.clone();
                        move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                submit();
                            }
                        }
                    }
                />
                <button type="button" class="btn btn-primary" on:click={
                    let submit = submit.clone();
                    move |_| submit()
                }>
                    "Save"
                </button>
                <button type="button" class="btn btn-text" on:click=move |_| set_show_form.set(false)>
                    "Cancel"
                </button>
            </div>
        </section>
    }
}
