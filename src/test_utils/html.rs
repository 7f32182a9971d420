use axum::{body::Body, response::Response};
use scraper::{ElementRef, Html, Selector};

async fn response_text(response: Response<Body>) -> String {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");

    String::from_utf8_lossy(&body).to_string()
}

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    Html::parse_document(&response_text(response).await)
}

pub(crate) async fn parse_html_fragment(response: Response<Body>) -> Html {
    Html::parse_fragment(&response_text(response).await)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// Assert that `html` contains an alert of `alert_type`, e.g. "error".
#[track_caller]
pub(crate) fn assert_alert(html: &Html, alert_type: &str) {
    let alert = html
        .select(&Selector::parse("[role=alert]").unwrap())
        .next()
        .expect("No alert found");

    assert_eq!(
        alert.value().attr("data-alert-type"),
        Some(alert_type),
        "want {alert_type} alert, got {:?}",
        alert.value().attr("data-alert-type")
    );
}

/// The text of each cell of the body rows in the table matched by `selector`.
#[track_caller]
pub(crate) fn table_rows(html: &Html, selector: &str) -> Vec<Vec<String>> {
    let table = html
        .select(&Selector::parse(selector).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No table found for {selector}"));

    table
        .select(&Selector::parse("tbody tr").unwrap())
        .map(|row| {
            row.select(&Selector::parse("td, th").unwrap())
                .map(|cell: ElementRef<'_>| cell.text().collect::<String>().trim().to_owned())
                .collect()
        })
        .collect()
}
