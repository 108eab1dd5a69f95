use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};

use crate::prelude::*;

/// One `name: value` pair scraped from the settings-export page.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PortalValue {
    pub name: String,
    pub value: String,
    pub unit: Option<String>,
}

/// Extract the values from the settings-export page.
///
/// The page lays out three `col-3` navigation columns; the last one holds
/// the browse objects, one per value, with the name in an `h5` header and
/// the value in the node's own text.
pub fn extract_values(body: &str) -> Result<Vec<PortalValue>> {
    let document = Html::parse_document(body);
    let columns = document.select(&selector("div.col-3")?).collect_vec();
    ensure!(columns.len() == 3, "expected 3 navigation columns, found {}", columns.len());

    let name_selector = selector("h5")?;
    let mut values = Vec::new();
    for node in columns[2].select(&selector("div.nav-link.browseobj")?) {
        let name = node
            .select(&name_selector)
            .next()
            .context("a browse object is missing its name header")?
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        let Some(raw) = own_text(node) else {
            warn!(name = name.as_str(), "a browse object carries no value");
            continue;
        };
        let (value, unit) = split_unit(&raw);
        values.push(PortalValue { name, value, unit });
    }
    Ok(values)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|error| anyhow!("`{css}` is an invalid selector: {error}"))
}

/// First non-blank text node that belongs to the element itself, skipping
/// the text of nested elements such as the name header.
fn own_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Split a trailing unit off a numeric value: `"32.5 °C"` becomes
/// `("32.5", Some("°C"))`, a bare word passes through unchanged.
fn split_unit(raw: &str) -> (String, Option<String>) {
    match raw.split_once(' ') {
        Some((value, unit)) if !unit.trim().is_empty() => {
            (value.to_string(), Some(unit.trim().to_string()))
        }
        _ => (raw.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // language=html
    const EXPORT_PAGE: &str = r##"
        <html>
        <body>
        <div class="row">
            <div class="col-3"><a class="nav-link" href="#"><h5>Info</h5></a></div>
            <div class="col-3"><a class="nav-link" href="#"><h5>Heizkreis</h5></a></div>
            <div class="col-3">
                <div class="nav-link browseobj">
                    <h5>Außentemperatur</h5>
                    2.0 °C
                </div>
                <div class="nav-link browseobj">
                    <h5>Vorlauftemperatur</h5>
                    32.5 °C
                </div>
                <div class="nav-link browseobj">
                    <h5>Betriebsart</h5>
                    Automatik
                </div>
            </div>
        </div>
        </body>
        </html>
    "##;

    #[test]
    fn extracts_the_values() -> Result {
        let values = extract_values(EXPORT_PAGE)?;
        assert_eq!(
            values,
            [
                PortalValue {
                    name: "Außentemperatur".to_string(),
                    value: "2.0".to_string(),
                    unit: Some("°C".to_string()),
                },
                PortalValue {
                    name: "Vorlauftemperatur".to_string(),
                    value: "32.5".to_string(),
                    unit: Some("°C".to_string()),
                },
                PortalValue {
                    name: "Betriebsart".to_string(),
                    value: "Automatik".to_string(),
                    unit: None,
                },
            ],
        );
        Ok(())
    }

    #[test]
    fn rejects_an_unexpected_page_structure() {
        assert!(extract_values("<html><body><div class='col-3'></div></body></html>").is_err());
    }

    #[test]
    fn splits_the_unit_off() {
        assert_eq!(split_unit("32.5 °C"), ("32.5".to_string(), Some("°C".to_string())));
        assert_eq!(split_unit("Automatik"), ("Automatik".to_string(), None));
    }
}
