use crate::auth::{submit, use_auth};
use habit_tracker::auth::AuthMode;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (mode, set_mode) = signal(AuthMode::Login);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let is_register = move || mode.get() == AuthMode::Register;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = submit(
                auth,
                mode.get_untracked(),
                username.get_untracked(),
                password.get_untracked(),
                email.get_untracked(),
            )
            .await;
            if let Err(message) = result {
                set_error_msg.set(Some(message));
            }
            set_is_submitting.set(false);
        });
    };

    let toggle_mode = move |_| {
        set_mode.update(|m| *m = m.toggled());
        set_error_msg.set(None);
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Habit Tracker"</h1>
                    <p class="text-base-content/70">
                        {move || if is_register() { "Create an account to start tracking" } else { "Sign in to continue" }}
                    </p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                            />
                        </div>

                        <Show when=is_register>
                            <div class="form-control">
                                <label class="label" for="email">
                                    <span class="label-text">"Email"</span>
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    autocomplete="email"
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    prop:value=email
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <div class="join w-full">
                                <input
                                    id="password"
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered join-item w-full"
                                />
                                <button
                                    type="button"
                                    class="btn join-item"
                                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() { "Hide" } else { "Show" }}
                                </button>
                            </div>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || match (is_submitting.get(), is_register()) {
                                    (true, _) => view! { <span class="loading loading-spinner"></span> "Please wait..." }.into_any(),
                                    (false, true) => "Sign up".into_any(),
                                    (false, false) => "Sign in".into_any(),
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm mt-2">
                            {move || if is_register() { "Already have an account? " } else { "No account yet? " }}
                            <a class="link link-primary" on:click=toggle_mode>
                                {move || if is_register() { "Sign in" } else { "Sign up" }}
                            </a>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
