use crate::finance::{PORTFOLIO_VALUE_CENTS, TRANSACTIONS, format_eur, running_balance, total_balance};
use crate::views::shared::{ChartLine, LineChart, short_day, sleep};
use dioxus::prelude::*;
use std::time::Duration;

const ROTATE_EVERY: Duration = Duration::from_secs(5);

struct Tip {
    title: &'static str,
    description: &'static str,
    tone: &'static str,
    link: Option<&'static str>,
}

static TIPS: [Tip; 5] = [
    Tip {
        title: "Investment Tips",
        description: "Learn how to maximize your returns with these expert tips",
        tone: "tone-blue",
        link: Some("https://support.traderepublic.com/en-nl/1687-The-Basics-of-Trading-and-Financial-Markets"),
    },
    Tip {
        title: "Market News",
        description: "Stay updated with the latest market trends and news",
        tone: "tone-green",
        link: None,
    },
    Tip {
        title: "Save More",
        description: "Effective strategies to increase your savings",
        tone: "tone-purple",
        link: Some("https://traderepublic.com/de-de#save-now"),
    },
    Tip {
        title: "Tipp of the Day",
        description: "Let your personal assistant guide you with a tipp of the day",
        tone: "tone-orange",
        link: None,
    },
    Tip {
        title: "Learn Prompt Engineering",
        description: "Absolve the offical Trade Republic program to learn how to interact with your assistant",
        tone: "tone-indigo",
        link: Some("https://learn-prompt-engineering.traderepublic.com"),
    },
];

fn cash_line() -> (Vec<ChartLine>, Vec<String>) {
    let points = running_balance(&TRANSACTIONS);
    let line = ChartLine {
        name: "Cash".to_string(),
        color: "#33C3F0",
        values: points.iter().map(|p| p.balance_cents as f64 / 100.0).collect(),
    };
    let labels = points.iter().map(|p| short_day(p.date)).collect();
    (vec![line], labels)
}

#[component]
pub fn ForYouView() -> Element {
    let mut active = use_signal(|| 0usize);

    use_future(move || async move {
        loop {
            sleep(ROTATE_EVERY).await;
            active.with_mut(|i| *i = (*i + 1) % TIPS.len());
        }
    });

    let (lines, labels) = cash_line();
    let total_cash = format_eur(total_balance(&TRANSACTIONS));
    let total_wealth = format_eur(PORTFOLIO_VALUE_CENTS);
    let tip = &TIPS[active() % TIPS.len()];

    rsx! {
        div { class: "screen for-you",
            div { class: "summary-grid",
                section { class: "card summary",
                    p { class: "text-muted", "Total Wealth" }
                    h2 { "{total_wealth}" }
                }
                section { class: "card summary",
                    p { class: "text-muted", "Total Cash" }
                    h2 { "{total_cash}" }
                    span { class: "badge", "Available" }
                    LineChart { lines, labels, legend: false, class: "line-chart mini" }
                }
            }

            section { class: "carousel",
                div { class: "slide {tip.tone}",
                    h3 { "{tip.title}" }
                    p { "{tip.description}" }
                    if let Some(link) = tip.link {
                        a { href: link, target: "_blank", rel: "noopener", "Learn more" }
                    }
                }
                div { class: "carousel-controls",
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| active.with_mut(|i| *i = (*i + TIPS.len() - 1) % TIPS.len()),
                        "‹"
                    }
                    for i in 0..TIPS.len() {
                        span { key: "{i}", class: if i == active() { "dot active" } else { "dot" } }
                    }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| active.with_mut(|i| *i = (*i + 1) % TIPS.len()),
                        "›"
                    }
                }
            }
        }
    }
}
