//! Single-page UI, rendered once at startup

use crate::utils::dataset::DatasetRows;

const TEMPLATE: &str = include_str!("index.html");

/// Fill the template with the dataset and the prefilled service URL
pub fn render(dataset: &DatasetRows, default_service_url: &str) -> String {
    // `</` inside a script block would end it early
    let dataset_json = serde_json::to_string(dataset)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/");

    TEMPLATE
        .replace("__DATASET_JSON__", &dataset_json)
        .replace("__DEFAULT_SERVICE_URL__", &escape_attr(default_service_url))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
