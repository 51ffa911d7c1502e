//! Login/sign-up form.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdLock, LdLogIn, LdMail, LdUserPlus};
use picdrop_core::{AuthForm, AuthMode, AuthOutcome, MessageKind};

use crate::auth::Authenticator;
use crate::console;

/// Login/sign-up card.
///
/// Validates the fields locally, then sends the request to the
/// [`Authenticator`] provided as context by the app root. Inputs and
/// buttons are disabled while a request is in flight.
#[component]
pub fn AuthPanel() -> Element {
    let authenticator: Rc<dyn Authenticator> = use_context();
    let mut form = use_signal(AuthForm::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match form.write().submit() {
            Ok(Some(request)) => request,
            Ok(None) => return,
            Err(e) => {
                console::log(&format!("auth form incomplete: {e}"));
                return;
            }
        };
        let authenticator = Rc::clone(&authenticator);
        spawn(async move {
            let result = authenticator.authenticate(request).await;
            match &result {
                Ok(AuthOutcome::LoggedIn { email }) => console::log(&format!("logged in: {email}")),
                Ok(AuthOutcome::Registered { email }) => {
                    console::log(&format!("signed up: {email}"));
                }
                Ok(AuthOutcome::Rejected | AuthOutcome::AlreadyRegistered { .. }) => {}
                Err(e) => console::warn(&format!("auth request failed: {e}")),
            }
            form.write().complete(result);
        });
    };

    let state = form.read().clone();
    let mode = state.mode();
    let loading = state.is_loading();

    rsx! {
        div { class: "auth",
            div { class: "auth__card",
                h1 { class: "auth__title", "{mode}" }
                p { class: "auth__subtitle", "Use your account to get started." }

                if let Some(message) = state.message() {
                    div {
                        class: "auth__message {message_class(message.kind)}",
                        role: "alert",
                        "{message.text}"
                    }
                }

                form { class: "auth__form", onsubmit: on_submit,
                    label { class: "auth__field",
                        Icon { class: "auth__icon", width: 20, height: 20, icon: LdMail }
                        input {
                            r#type: "email",
                            placeholder: "Email address",
                            required: true,
                            value: "{state.email()}",
                            disabled: loading,
                            oninput: move |evt| form.write().set_email(evt.value()),
                        }
                    }
                    label { class: "auth__field",
                        Icon { class: "auth__icon", width: 20, height: 20, icon: LdLock }
                        input {
                            r#type: "password",
                            placeholder: "Password",
                            required: true,
                            value: "{state.password()}",
                            disabled: loading,
                            oninput: move |evt| form.write().set_password(evt.value()),
                        }
                    }
                    button { class: "auth__submit", r#type: "submit", disabled: loading,
                        if loading {
                            span { class: "auth__spinner", aria_hidden: "true" }
                            "Please wait..."
                        } else {
                            if mode == AuthMode::Login {
                                Icon { width: 20, height: 20, icon: LdLogIn }
                            } else {
                                Icon { width: 20, height: 20, icon: LdUserPlus }
                            }
                            span { "{mode}" }
                        }
                    }
                }

                div { class: "auth__switch",
                    button {
                        class: "auth__link",
                        disabled: loading,
                        onclick: move |_| form.write().toggle_mode(),
                        "{mode.switch_prompt()}"
                    }
                }
            }

            button {
                class: "auth__home",
                disabled: loading,
                onclick: move |_| {
                    form.write().go_home();
                    console::log("home requested");
                },
                "Home"
            }
        }
    }
}

/// CSS modifier class for a status message.
const fn message_class(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Success => "auth__message--success",
        MessageKind::Failure => "auth__message--failure",
        MessageKind::Info => "auth__message--info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_message_kind_has_its_own_class() {
        let classes = [
            message_class(MessageKind::Success),
            message_class(MessageKind::Failure),
            message_class(MessageKind::Info),
        ];
        assert_ne!(classes[0], classes[1]);
        assert_ne!(classes[1], classes[2]);
        assert_ne!(classes[0], classes[2]);
    }
}
