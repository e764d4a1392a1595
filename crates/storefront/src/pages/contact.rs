//! Contact page with a simulated form submission.

use std::time::Duration;

use dioxus::prelude::*;
use storefront_core::{ContactForm, ThemeId};
use tracing::info;

use crate::state::use_theme;

use super::{Hero, HeroCopy};

/// Simulated round trip for a submitted message.
const SUBMIT_DELAY: Duration = Duration::from_secs(2);

/// How long the confirmation toast stays up.
const TOAST_DURATION: Duration = Duration::from_secs(4);

fn hero_copy(theme: ThemeId) -> HeroCopy {
    match theme {
        ThemeId::Theme1 => HeroCopy {
            title: "Get in Touch",
            subtitle: "We'd love to hear from you",
            description: "Have a question, suggestion, or just want to say hello? Drop us a message and we'll get back to you promptly.",
        },
        ThemeId::Theme2 => HeroCopy {
            title: "Connect With Us",
            subtitle: "Distinguished service awaits",
            description: "We take pride in providing exceptional customer service. Allow us the privilege of assisting you with your inquiries.",
        },
        ThemeId::Theme3 => HeroCopy {
            title: "Let's Chat! 💬",
            subtitle: "We love making new friends!",
            description: "Got something awesome to share? Want to say hi? Or need help with something? We're all ears and super excited to hear from you!",
        },
    }
}

fn toast_title(theme: ThemeId) -> &'static str {
    match theme {
        ThemeId::Theme3 => "Woohoo! Message sent! 🎉",
        _ => "Message sent successfully!",
    }
}

const CONTACT_INFO: [(&str, &str, &[&str]); 4] = [
    (
        "📍",
        "Visit Us",
        &["123 Design Street", "Creative District", "New York, NY 10001"],
    ),
    ("📞", "Call Us", &["+1 (555) 123-4567", "+1 (555) 987-6543"]),
    (
        "✉",
        "Email Us",
        &["hello@multi-theme-switcher.com", "support@multi-theme-switcher.com"],
    ),
    (
        "🕘",
        "Office Hours",
        &["Mon - Fri: 9:00 AM - 6:00 PM", "Sat: 10:00 AM - 4:00 PM", "Sun: Closed"],
    ),
];

#[component]
pub fn Contact() -> Element {
    let theme = use_theme().current();
    let mut form = use_signal(ContactForm::default);
    let mut errors = use_signal(Vec::<String>::new);
    let mut submitting = use_signal(|| false);
    let mut toast = use_signal(|| None::<&'static str>);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }

        if let Err(problems) = form.read().validate() {
            errors.set(problems.iter().map(ToString::to_string).collect());
            return;
        }
        errors.set(Vec::new());
        submitting.set(true);

        spawn(async move {
            tokio::time::sleep(SUBMIT_DELAY).await;
            info!(subject = %form.read().subject, "Contact message sent");

            form.write().clear();
            submitting.set(false);
            toast.set(Some(toast_title(theme)));

            tokio::time::sleep(TOAST_DURATION).await;
            toast.set(None);
        });
    };

    let current = form.read().clone();
    let problems = errors.read().clone();
    let send_label = if theme == ThemeId::Theme3 {
        "Send Message! 🚀"
    } else {
        "Send Message"
    };

    rsx! {
        div { class: "page animate-fade-in",
            Hero { theme, copy: hero_copy(theme) }

            if let Some(title) = toast() {
                div { class: "toast",
                    strong { "{title}" }
                    p { "We'll get back to you as soon as possible." }
                }
            }

            section { class: "contact-grid",
                div { class: "card contact-form-card",
                    h2 { class: "card-title", "💬 Send us a Message" }

                    form { class: "contact-form", onsubmit: submit,
                        div { class: "form-row",
                            div { class: "form-field",
                                label { r#for: "name", "Name" }
                                input {
                                    id: "name",
                                    value: "{current.name}",
                                    placeholder: "Your full name",
                                    oninput: move |evt| form.write().name = evt.value(),
                                }
                            }
                            div { class: "form-field",
                                label { r#for: "email", "Email" }
                                input {
                                    id: "email",
                                    r#type: "email",
                                    value: "{current.email}",
                                    placeholder: "your.email@example.com",
                                    oninput: move |evt| form.write().email = evt.value(),
                                }
                            }
                        }

                        div { class: "form-field",
                            label { r#for: "subject", "Subject" }
                            input {
                                id: "subject",
                                value: "{current.subject}",
                                placeholder: "What's this about?",
                                oninput: move |evt| form.write().subject = evt.value(),
                            }
                        }

                        div { class: "form-field",
                            label { r#for: "message", "Message" }
                            textarea {
                                id: "message",
                                rows: "5",
                                value: "{current.message}",
                                placeholder: "Tell us more...",
                                oninput: move |evt| form.write().message = evt.value(),
                            }
                        }

                        if !problems.is_empty() {
                            ul { class: "form-errors",
                                for error in problems.iter() {
                                    li { key: "{error}", "{error}" }
                                }
                            }
                        }

                        button {
                            class: "button-primary",
                            r#type: "submit",
                            disabled: submitting(),
                            if submitting() {
                                span { class: "spinner small" }
                                "Sending..."
                            } else {
                                "{send_label}"
                            }
                        }
                    }
                }

                div { class: "contact-info",
                    for (icon, title, details) in CONTACT_INFO {
                        div { key: "{title}", class: "card contact-info-card",
                            div { class: "contact-info-icon", "{icon}" }
                            div {
                                h3 { "{title}" }
                                for line in details.iter() {
                                    p { key: "{line}", class: "muted", "{line}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
