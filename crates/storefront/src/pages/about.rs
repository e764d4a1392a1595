//! About page.

use dioxus::prelude::*;
use storefront_core::ThemeId;

use crate::state::use_theme;

use super::{Hero, HeroCopy};

fn hero_copy(theme: ThemeId) -> HeroCopy {
    match theme {
        ThemeId::Theme1 => HeroCopy {
            title: "About Multi-Theme Switcher",
            subtitle: "Building the future of e-commerce",
            description: "We are a modern e-commerce platform dedicated to providing exceptional shopping experiences through innovative technology and thoughtful design.",
        },
        ThemeId::Theme2 => HeroCopy {
            title: "Our Distinguished Legacy",
            subtitle: "Crafting excellence since 2008",
            description: "With over a decade of experience in premium retail, we have established ourselves as a trusted curator of exceptional products for discerning customers worldwide.",
        },
        ThemeId::Theme3 => HeroCopy {
            title: "Hey There! Welcome to Our Story! 🌟",
            subtitle: "Where passion meets creativity",
            description: "We are a fun-loving team of dreamers and doers who believe shopping should be an adventure filled with joy, discovery, and amazing surprises!",
        },
    }
}

fn mission(theme: ThemeId) -> &'static str {
    match theme {
        ThemeId::Theme1 => "To democratize access to high-quality products through innovative technology and exceptional user experience. We believe that great design and functionality should be accessible to everyone.",
        ThemeId::Theme2 => "To curate and deliver the finest selection of premium products to discerning customers who appreciate craftsmanship, heritage, and timeless elegance. Excellence is not just our standard, it is our promise.",
        ThemeId::Theme3 => "To spread joy and creativity through amazing products that inspire, delight, and bring color to people's lives! We believe shopping should be fun, and life should be full of wonderful surprises! 🎈",
    }
}

fn team(theme: ThemeId) -> &'static str {
    match theme {
        ThemeId::Theme1 => "We are a diverse team of passionate individuals united by our commitment to excellence and innovation.",
        ThemeId::Theme2 => "Our distinguished team combines decades of expertise with an unwavering dedication to craftsmanship and service.",
        ThemeId::Theme3 => "We are a colorful bunch of creative minds who love what we do and put our hearts into everything we create! 💖",
    }
}

const STATS: [(&str, &str, &str); 4] = [
    ("👥", "10,000+", "Happy Customers"),
    ("🌍", "50+", "Countries Served"),
    ("🏆", "25", "Awards Won"),
    ("🎯", "15", "Years Experience"),
];

const VALUES: [(&str, &str); 4] = [
    (
        "Quality First",
        "We never compromise on quality and ensure every product meets our high standards.",
    ),
    (
        "Customer Centric",
        "Our customers are at the heart of everything we do, driving our innovation and service.",
    ),
    (
        "Sustainability",
        "We are committed to sustainable practices and reducing our environmental impact.",
    ),
    (
        "Innovation",
        "We constantly evolve and innovate to bring you the latest and greatest products.",
    ),
];

#[component]
pub fn About() -> Element {
    let theme = use_theme().current();
    let mission_text = mission(theme);
    let team_text = team(theme);

    rsx! {
        div { class: "page animate-fade-in",
            Hero { theme, copy: hero_copy(theme) }

            section { class: "stat-grid",
                for (icon, value, label) in STATS {
                    div { key: "{label}", class: "card stat-card",
                        div { class: "stat-icon", "{icon}" }
                        div { class: "stat-value", "{value}" }
                        div { class: "muted", "{label}" }
                    }
                }
            }

            section { class: "mission",
                h2 { class: "section-title", "Our Mission" }
                p { "{mission_text}" }
            }

            section {
                h2 { class: "section-title", "Our Values" }
                div { class: "value-grid",
                    for (index, (title, description)) in VALUES.into_iter().enumerate() {
                        {
                            let number = format!("{:02}", index + 1);
                            rsx! {
                                div { key: "{title}", class: "card value-card",
                                    h3 {
                                        span { class: "value-badge", "{number}" }
                                        "{title}"
                                    }
                                    p { class: "muted", "{description}" }
                                }
                            }
                        }
                    }
                }
            }

            section { class: "team",
                h2 { class: "section-title", "Meet Our Team" }
                p { class: "muted", "{team_text}" }
                div { class: "team-mark", "👥" }
            }
        }
    }
}
