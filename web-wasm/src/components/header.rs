//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(total: Memo<u32>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Nail Studio"</h1>
            <nav class="nav">
                <a href="#builder">"Builder"</a>
                <a href="#library">"Library"</a>
                <a href="#wishlist">"Wishlist"</a>
            </nav>
            <span class="header-price">{move || format!("${}", total.get())}</span>
        </header>
    }
}
