use crate::finance::tax::{generate_tax_number, professional_expenses, professional_total};
use crate::finance::{TRANSACTIONS, TaxStatementFlow, TaxStatementState, format_eur};
use crate::views::shared::{amount_class, sleep, use_toaster};
use dioxus::prelude::*;

#[component]
pub fn TaxStatementView(on_back: EventHandler<()>) -> Element {
    let toaster = use_toaster();
    let tax_number = use_hook(|| generate_tax_number(&mut rand::thread_rng()));
    let mut flow = use_signal(TaxStatementFlow::new);
    // The flow is worked on a copy while its delay runs.
    let mut pending = use_signal(|| Option::<TaxStatementState>::None);

    let expenses = professional_expenses(&TRANSACTIONS);
    let expenses_total = format_eur(professional_total(&expenses));

    let retrieve = move |_| {
        if pending().is_some() {
            return;
        }
        spawn(async move {
            let mut working = flow.peek().clone();
            pending.set(Some(TaxStatementState::Retrieving));
            let toast = working.retrieve(&TRANSACTIONS, sleep).await;
            flow.set(working);
            pending.set(None);
            toaster.show(toast);
        });
    };

    let submit = move |_| {
        if pending().is_some() || !flow.peek().can_submit() {
            return;
        }
        spawn(async move {
            let mut working = flow.peek().clone();
            let net_income_cents = working.net_income().unwrap_or_default();
            pending.set(Some(TaxStatementState::Submitting { net_income_cents }));
            let toast = working.submit(sleep).await;
            flow.set(working);
            pending.set(None);
            if let Some(toast) = toast {
                toaster.show(toast);
            }
        });
    };

    let state = pending().unwrap_or_else(|| flow().state());
    let retrieving = state == TaxStatementState::Retrieving;
    let submitting = matches!(state, TaxStatementState::Submitting { .. });
    let net_income = flow().net_income();

    rsx! {
        div { class: "screen tax-statement",
            div { class: "screen-header",
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| on_back.call(()),
                    "‹ Back"
                }
                h1 { "Tax Statement" }
            }

            section { class: "tax-number",
                p { class: "text-muted", "Your Tax Number" }
                p { class: "tax-number-value", "{tax_number}" }
            }

            button {
                class: "btn btn-light wide",
                r#type: "button",
                disabled: retrieving,
                onclick: retrieve,
                if retrieving { "Retrieving tax information..." } else { "Retrieve Tax Information" }
            }

            section { class: "card",
                div { class: "card-header",
                    h3 { "Professional Expenditures" }
                    div { class: "avatar", "CL" }
                }
                if expenses.is_empty() {
                    p { class: "text-muted center", "No professional expenses found" }
                } else {
                    table { class: "expense-table",
                        thead {
                            tr {
                                th { "Item" }
                                th { class: "right", "Amount" }
                            }
                        }
                        tbody {
                            for tx in expenses.iter() {
                                tr { key: "{tx.id}",
                                    td { "{tx.name}" }
                                    td { class: "right amount negative", "{format_eur(tx.amount_cents.abs())}" }
                                }
                            }
                            tr { class: "total-row",
                                td { "Total" }
                                td { class: "right", "{expenses_total}" }
                            }
                        }
                    }
                }
            }

            if let Some(net) = net_income {
                section { class: "card",
                    h3 { "Tax Summary" }
                    div { class: "summary-row",
                        span { class: "text-muted", "Net Income:" }
                        span { class: amount_class(net), "{format_eur(net)}" }
                    }
                    div { class: "summary-row",
                        span { class: "text-muted", "Tax Year:" }
                        span { "2025" }
                    }
                    div { class: "summary-row",
                        span { class: "text-muted", "Status:" }
                        span { class: "badge success",
                            if matches!(state, TaxStatementState::Submitted { .. }) { "Submitted" } else { "Processed" }
                        }
                    }
                }
                button {
                    class: "btn btn-success wide",
                    r#type: "button",
                    disabled: submitting,
                    onclick: submit,
                    if submitting { "Submitting..." } else { "Submit Tax Statement" }
                }
            }

            div { class: "footnote text-muted",
                p { "Note: This is a demonstration of the tax statement feature." }
                p { "In a real application, this would connect to an actual tax service API." }
            }
        }
    }
}
