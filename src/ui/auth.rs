//! Sign-in and registration forms

use dioxus::prelude::*;

use crate::controller::UiEvent;
use crate::forms::{Forms, LoginField, RegisterField};
use crate::ui::Dispatcher;

#[component]
pub fn AuthView(forms: Forms, dispatcher: Dispatcher) -> Element {
    let login = forms.login;
    let register = forms.register;

    let d = dispatcher.clone();
    let on_login = move |evt: FormEvent| {
        evt.prevent_default();
        d.send(UiEvent::SubmitLogin);
    };
    let d = dispatcher.clone();
    let on_register = move |evt: FormEvent| {
        evt.prevent_default();
        d.send(UiEvent::SubmitRegister);
    };

    let d_login_email = dispatcher.clone();
    let d_login_password = dispatcher.clone();
    let d_name = dispatcher.clone();
    let d_email = dispatcher.clone();
    let d_password = dispatcher;

    rsx! {
        div {
            class: "auth",

            form {
                id: "login-form",
                onsubmit: on_login,
                h2 { "Login" }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    required: true,
                    value: "{login.email}",
                    oninput: move |evt| d_login_email.send(UiEvent::LoginFieldChanged(LoginField::Email, evt.value())),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    required: true,
                    value: "{login.password}",
                    oninput: move |evt| d_login_password.send(UiEvent::LoginFieldChanged(LoginField::Password, evt.value())),
                }
                button { class: "btn btn-primary", r#type: "submit", "Login" }
            }

            form {
                id: "register-form",
                onsubmit: on_register,
                h2 { "Register" }
                input {
                    r#type: "text",
                    placeholder: "Full name",
                    required: true,
                    value: "{register.name}",
                    oninput: move |evt| d_name.send(UiEvent::RegisterFieldChanged(RegisterField::Name, evt.value())),
                }
                input {
                    r#type: "email",
                    placeholder: "Email",
                    required: true,
                    value: "{register.email}",
                    oninput: move |evt| d_email.send(UiEvent::RegisterFieldChanged(RegisterField::Email, evt.value())),
                }
                input {
                    r#type: "password",
                    placeholder: "Password (min. 6 characters)",
                    required: true,
                    value: "{register.password}",
                    oninput: move |evt| d_password.send(UiEvent::RegisterFieldChanged(RegisterField::Password, evt.value())),
                }
                button { class: "btn btn-primary", r#type: "submit", "Register" }
            }
        }
    }
}
