//! The searchable transaction list.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    endpoints::format_endpoint,
    html::{
        BUTTON_DELETE_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, format_currency, format_date, link,
    },
    transaction::Transaction,
};

use super::aggregation::subtotal_abs;

/// The max number of graphemes to display for a description before
/// truncating and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 48;

/// The transactions panel: heading, search box and the filtered list.
///
/// `transactions_exist` refers to the whole collection, not the filtered
/// view: when nothing has been recorded yet the search box is pointless, so
/// an onboarding message is shown instead of it and the list.
pub(super) fn transaction_panel(
    transactions_exist: bool,
    filtered: &[&Transaction],
    search_term: &str,
) -> Markup {
    html! {
        section class="w-full"
        {
            header class="flex justify-between items-center mb-4"
            {
                h2 class="text-xl font-semibold" { "Transactions" }

                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                {
                    "Add Transaction"
                }
            }

            @if !transactions_exist {
                (no_transactions_view())
            } @else {
                input
                    type="search"
                    name="search"
                    value=(search_term)
                    placeholder="Search transactions..."
                    hx-get=(endpoints::SEARCH_TRANSACTIONS)
                    hx-trigger="input changed"
                    hx-target="#transaction-list"
                    hx-swap="innerHTML"
                    class=(FORM_TEXT_INPUT_STYLE);

                div id="transaction-list" class="space-y-3 mt-4"
                {
                    (transaction_list_view(filtered))
                }
            }
        }
    }
}

/// The list fragment that is swapped in as the search term changes:
/// the matching rows plus a count and subtotal footer, or a message when
/// nothing matches.
pub(super) fn transaction_list_view(filtered: &[&Transaction]) -> Markup {
    if filtered.is_empty() {
        return html! {
            p class="text-center text-gray-500 py-8" { "No transactions match your search." }
        };
    }

    let subtotal = subtotal_abs(filtered);

    html! {
        @for transaction in filtered {
            (transaction_row(transaction))
        }

        footer class="border-t border-gray-200 dark:border-gray-700 pt-4 flex justify-between items-center text-sm"
        {
            span class="text-gray-600 dark:text-gray-400"
            {
                (filtered.len())
                " transaction"
                @if filtered.len() != 1 { "s" }
            }

            span class="font-semibold"
            {
                "Total: " (format_currency(subtotal))
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (description, tooltip) = format_description(&transaction.description);
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, &transaction.id);
    let delete_url = format_endpoint(endpoints::TRANSACTION, &transaction.id);

    html! {
        article
            data-transaction-row="true"
            class="bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 \
                rounded-lg p-4 shadow-sm flex items-center justify-between"
        {
            div class="flex-1 min-w-0"
            {
                div class="flex items-center gap-3 mb-1"
                {
                    span class="text-xs border border-gray-300 dark:border-gray-600 rounded-full px-2 py-0.5 text-gray-600 dark:text-gray-400"
                    {
                        time datetime=(transaction.date) { (format_date(transaction.date)) }
                    }

                    span class="text-lg font-semibold text-emerald-600"
                    {
                        (format_currency(transaction.amount))
                    }
                }

                p class="text-sm font-medium truncate" title=[tooltip] { (description) }

                p class="text-xs text-gray-500"
                {
                    "Added " (format_date(transaction.created_at.date()))
                }
            }

            div class="flex gap-4 ml-4"
            {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
    }
}

/// Truncate long descriptions for the row, returning the full text as a
/// tooltip when truncation happened.
fn format_description(description: &str) -> (String, Option<&str>) {
    let graphemes: Vec<&str> = description.graphemes(true).collect();

    if graphemes.len() <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        (
            format!("{}…", graphemes[..MAX_DESCRIPTION_GRAPHEMES].concat()),
            Some(description),
        )
    }
}

fn no_transactions_view() -> Markup {
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding your first transaction");

    html! {
        div class="text-center py-12" data-empty-state="true"
        {
            h3 class="text-lg font-semibold mb-2" { "No transactions yet" }

            p class="text-gray-600 dark:text-gray-400 max-w-sm mx-auto"
            {
                "Start tracking your finances by " (new_transaction_link) "."
            }
        }
    }
}

#[cfg(test)]
mod list_tests {
    use scraper::{Html, Selector};
    use time::macros::{date, datetime};

    use crate::transaction::Transaction;

    use super::{transaction_list_view, transaction_panel};

    fn test_transaction(id: &str, amount: f64, description: &str) -> Transaction {
        Transaction {
            id: id.to_owned(),
            amount,
            date: date!(2024 - 01 - 15),
            description: description.to_owned(),
            created_at: datetime!(2024-01-16 9:30 UTC),
        }
    }

    #[test]
    fn shows_empty_state_when_no_transactions_exist() {
        let markup = transaction_panel(false, &[], "");
        let html = Html::parse_fragment(&markup.into_string());

        assert!(
            html.select(&Selector::parse("[data-empty-state='true']").unwrap())
                .next()
                .is_some(),
            "want an empty-state element when the collection is empty"
        );
        assert!(
            html.select(&Selector::parse("input[type=search]").unwrap())
                .next()
                .is_none(),
            "the search box is pointless with no transactions"
        );
    }

    #[test]
    fn shows_message_when_no_transactions_match_search() {
        let markup = transaction_list_view(&[]);
        let text: String = Html::parse_fragment(&markup.into_string())
            .root_element()
            .text()
            .collect();

        assert!(text.contains("No transactions match your search."));
    }

    #[test]
    fn renders_rows_with_links_and_audit_line() {
        let transaction = test_transaction("1705310000000", 45.50, "Groceries");
        let filtered = [&transaction];

        let markup = transaction_list_view(&filtered);
        let html = Html::parse_fragment(&markup.into_string());

        let row = html
            .select(&Selector::parse("[data-transaction-row='true']").unwrap())
            .next()
            .expect("want a transaction row");
        let text: String = row.text().collect();
        assert!(text.contains("$45.50"));
        assert!(text.contains("Jan 15, 2024"));
        assert!(text.contains("Added Jan 16, 2024"));

        let edit_link = row
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("want an edit link");
        assert_eq!(
            edit_link.value().attr("href"),
            Some("/transactions/1705310000000/edit")
        );

        let delete_button = row
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .next()
            .expect("want a delete button");
        assert_eq!(
            delete_button.value().attr("hx-delete"),
            Some("/api/transactions/1705310000000")
        );
        assert_eq!(
            delete_button.value().attr("hx-confirm"),
            None,
            "deletion must not prompt for confirmation"
        );
    }

    #[test]
    fn footer_shows_count_and_subtotal() {
        let first = test_transaction("1", 45.50, "Groceries");
        let second = test_transaction("2", -4.50, "Refund");
        let filtered = [&first, &second];

        let markup = transaction_list_view(&filtered);
        let text: String = Html::parse_fragment(&markup.into_string())
            .root_element()
            .text()
            .collect();

        assert!(text.contains("2 transactions"));
        assert!(text.contains("Total: $50.00"));
    }

    #[test]
    fn singular_count_has_no_plural_s() {
        let transaction = test_transaction("1", 45.50, "Groceries");
        let filtered = [&transaction];

        let markup = transaction_list_view(&filtered);
        let text: String = Html::parse_fragment(&markup.into_string())
            .root_element()
            .text()
            .collect();

        assert!(text.contains("1 transaction"));
        assert!(!text.contains("1 transactions"));
    }

    #[test]
    fn long_descriptions_are_truncated_with_a_tooltip() {
        let long_description = "a".repeat(100);
        let transaction = test_transaction("1", 10.0, &long_description);
        let filtered = [&transaction];

        let markup = transaction_list_view(&filtered);
        let html = Html::parse_fragment(&markup.into_string());

        let description = html
            .select(&Selector::parse("p[title]").unwrap())
            .next()
            .expect("want a truncated description with a title attribute");
        assert_eq!(
            description.value().attr("title"),
            Some(long_description.as_str())
        );

        let shown: String = description.text().collect();
        assert!(shown.len() < long_description.len());
        assert!(shown.ends_with('…'));
    }
}
