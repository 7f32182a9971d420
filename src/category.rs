//! The suggested income and expense categories and the category field of the
//! new transaction form.
//!
//! The catalog only drives the form. Any non-empty text is accepted as a
//! category when a transaction is stored.

use axum::response::IntoResponse;
// axum_extra's Query treats an empty string as `None`, which is what the
// "Select an option" placeholder sends.
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::TransactionType,
};

/// A suggested category as shown in a drop down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryOption {
    /// The text shown to the user.
    pub label: &'static str,
    /// The text stored in the database.
    pub value: &'static str,
}

const fn option(label: &'static str, value: &'static str) -> CategoryOption {
    CategoryOption { label, value }
}

const INCOME_CATEGORIES: [CategoryOption; 6] = [
    option("💼 Bonus", "Bonus"),
    option("🎁 Gift", "Gift"),
    option("💻 Freelance", "Freelance"),
    option("📈 Investment Return", "Investment Return"),
    option("💰 Salary", "Salary"),
    option("📅 Daily earnings", "Daily earnings"),
];

const EXPENSE_CATEGORIES: [CategoryOption; 11] = [
    option("🛠️ Car Maintenance/Repairs", "Car Maintenance/Repairs"),
    option("🎮 Entertainment", "Entertainment"),
    option("⛽ Gas", "Gas"),
    option("🛒 Groceries", "Groceries"),
    option("🏥 Health", "Health"),
    option("🏠 Rent", "Rent"),
    option("🍽️ Restaurant", "Restaurant"),
    option("🛍️ Shopping", "Shopping"),
    option("📺 Subscriptions", "Subscriptions"),
    option("🚌 Transport", "Transport"),
    option("💡 Utilities", "Utilities"),
];

/// The form value of the "Other" choice.
pub const OTHER_VALUE: &str = "__other__";

/// The "Other" choice that lets the user type their own category.
pub fn other_option(type_: TransactionType) -> CategoryOption {
    match type_ {
        TransactionType::Income => option("➕ Other", OTHER_VALUE),
        TransactionType::Expense => option("➖ Other", OTHER_VALUE),
    }
}

/// The suggested categories for `type_`, sorted by stored value with the
/// "Other" choice last.
pub fn category_options(type_: TransactionType) -> Vec<CategoryOption> {
    let mut options = match type_ {
        TransactionType::Income => INCOME_CATEGORIES.to_vec(),
        TransactionType::Expense => EXPENSE_CATEGORIES.to_vec(),
    };

    options.sort_by(|a, b| a.value.cmp(b.value));
    options.push(other_option(type_));

    options
}

/// Get the category to store from the drop down choice and the free text
/// field.
///
/// Returns an empty string if the user chose "Other" and left the free text
/// empty.
pub fn resolve_category(choice: &str, custom_category: &str) -> String {
    if choice == OTHER_VALUE {
        custom_category.trim().to_owned()
    } else {
        choice.trim().to_owned()
    }
}

fn custom_category_placeholder(type_: TransactionType) -> &'static str {
    match type_ {
        TransactionType::Income => "Enter Custom Income Category",
        TransactionType::Expense => "Enter Custom Expense Category",
    }
}

/// The category drop down for the new transaction form.
///
/// The field re-renders itself through htmx when the choice changes so the
/// free text input appears only for "Other".
pub fn category_field(type_: Option<TransactionType>, selected: Option<&str>) -> Markup {
    html! {
        div id="category-field" class="space-y-2"
        {
            label for="category" class=(FORM_LABEL_STYLE) { "🏷️ Category" }

            @match type_ {
                None => {
                    select
                        name="category"
                        id="category"
                        disabled
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "Select a transaction type first" }
                    }
                }
                Some(type_) => {
                    select
                        name="category"
                        id="category"
                        required
                        hx-get=(endpoints::CATEGORY_OPTIONS)
                        hx-trigger="change"
                        hx-target="#category-field"
                        hx-swap="outerHTML"
                        hx-include="#type_"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for choice in category_options(type_) {
                            option
                                value=(choice.value)
                                selected[selected == Some(choice.value)]
                            {
                                (choice.label)
                            }
                        }
                    }

                    @if selected == Some(OTHER_VALUE) {
                        input
                            name="custom_category"
                            id="custom_category"
                            type="text"
                            required
                            placeholder=(custom_category_placeholder(type_))
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }
            }
        }
    }
}

/// The query parameters for the category field partial.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// The transaction type picked in the form.
    pub type_: Option<TransactionType>,
    /// The category choice currently selected.
    pub category: Option<String>,
}

/// A route handler that renders the category field for the chosen transaction type.
pub async fn get_category_field(Query(query): Query<CategoryQuery>) -> impl IntoResponse {
    category_field(query.type_, query.category.as_deref())
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use axum_extra::extract::Query;
    use scraper::{Html, Selector};

    use crate::{
        test_utils::parse_html_fragment,
        transaction::TransactionType,
    };

    use super::{
        CategoryQuery, OTHER_VALUE, category_field, category_options, get_category_field,
        resolve_category,
    };

    #[test]
    fn options_are_sorted_by_value_with_other_last() {
        for type_ in [TransactionType::Income, TransactionType::Expense] {
            let options = category_options(type_);
            let (other, suggested) = options.split_last().unwrap();

            assert_eq!(other.value, OTHER_VALUE);
            assert!(
                suggested.windows(2).all(|pair| pair[0].value < pair[1].value),
                "want suggestions sorted by value, got {suggested:?}"
            );
        }
    }

    #[test]
    fn income_options_match_catalog() {
        let labels: Vec<_> = category_options(TransactionType::Income)
            .into_iter()
            .map(|option| option.label)
            .collect();

        assert_eq!(
            labels,
            vec![
                "💼 Bonus",
                "📅 Daily earnings",
                "💻 Freelance",
                "🎁 Gift",
                "📈 Investment Return",
                "💰 Salary",
                "➕ Other",
            ]
        );
    }

    #[test]
    fn expense_options_end_with_other() {
        let options = category_options(TransactionType::Expense);

        assert_eq!(options.len(), 12);
        assert_eq!(options[0].value, "Car Maintenance/Repairs");
        assert_eq!(options[11].label, "➖ Other");
    }

    #[test]
    fn resolve_category_uses_custom_text_for_other() {
        assert_eq!(resolve_category(OTHER_VALUE, "  Pet care "), "Pet care");
        assert_eq!(resolve_category("Groceries", "ignored"), "Groceries");
        assert_eq!(resolve_category(OTHER_VALUE, "   "), "");
    }

    #[test]
    fn field_is_disabled_without_type() {
        let fragment = render(category_field(None, None));

        let select = fragment
            .select(&Selector::parse("select[name=category]").unwrap())
            .next()
            .expect("category select missing");
        assert!(select.value().attr("disabled").is_some());
    }

    #[test]
    fn other_choice_shows_custom_input() {
        let fragment = render(category_field(
            Some(TransactionType::Expense),
            Some(OTHER_VALUE),
        ));

        let input = fragment
            .select(&Selector::parse("input[name=custom_category]").unwrap())
            .next()
            .expect("custom category input missing");
        assert_eq!(
            input.value().attr("placeholder"),
            Some("Enter Custom Expense Category")
        );
    }

    #[test]
    fn suggested_choice_hides_custom_input() {
        let fragment = render(category_field(
            Some(TransactionType::Income),
            Some("Salary"),
        ));

        let custom_inputs = fragment
            .select(&Selector::parse("input[name=custom_category]").unwrap())
            .count();
        assert_eq!(custom_inputs, 0);
        let selected = fragment
            .select(&Selector::parse("option[selected]").unwrap())
            .next()
            .and_then(|option| option.value().attr("value"));
        assert_eq!(selected, Some("Salary"));
    }

    #[tokio::test]
    async fn handler_renders_options_for_type() {
        let response = get_category_field(Query(CategoryQuery {
            type_: Some(TransactionType::Income),
            category: None,
        }))
        .await
        .into_response();

        let fragment = parse_html_fragment(response).await;
        let option_count = fragment
            .select(&Selector::parse("option").unwrap())
            .count();
        assert_eq!(option_count, 7);
    }

    fn render(markup: maud::Markup) -> Html {
        Html::parse_fragment(&markup.into_string())
    }
}
