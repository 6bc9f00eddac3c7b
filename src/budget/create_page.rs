//! The page with the form for creating a budget.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        base},
    navigation::NavBar,
};

/// Render the page for creating a new budget.
pub async fn get_new_budget_page() -> Response {
    new_budget_view().into_response()
}

fn new_budget_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_BUDGET_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-md space-y-4"
            {
                h1 class="text-xl font-bold" { "New Budget" }

                form hx-post=(endpoints::BUDGETS_API) hx-target="#alert-container" class="space-y-4"
                {
                    div
                    {
                        label for="name" class=(FORM_LABEL_STYLE) { "Name" }
                        input
                            type="text"
                            name="name"
                            id="name"
                            placeholder="e.g. Groceries"
                            class=(FORM_TEXT_INPUT_STYLE)
                            required
                            autofocus;
                    }

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create" }
                }
            }
        }
    );

    base("New Budget", &content)
}

#[cfg(test)]
mod new_budget_page_tests {
    use axum::http::StatusCode;
    use scraper::Selector;

    use crate::{
        endpoints,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::get_new_budget_page;

    #[tokio::test]
    async fn renders_the_create_form() {
        let response = get_new_budget_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form_selector = Selector::parse("form").unwrap();
        let form = html
            .select(&form_selector)
            .next()
            .expect("Could not find form");
        assert_eq!(form.attr("hx-post"), Some(endpoints::BUDGETS_API));

        let input_selector = Selector::parse("input[name='name']").unwrap();
        assert!(html.select(&input_selector).next().is_some());
    }
}
