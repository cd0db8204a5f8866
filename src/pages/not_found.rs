use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Page not found"</h1>
		<p>
			<a href="/">"Attack graph"</a>
			" | "
			<a href="/model">"Network zones"</a>
		</p>
	}
}
