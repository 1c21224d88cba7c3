//! Extracts a [`Sentiment`] from the HTML fragment the sentiment service returns.

use scraper::{ElementRef, Html};

use crate::widget::enrichment::{EnrichError, Sentiment};

/// Id of the element carrying the sentiment.
pub const SENTIMENT_ID: &str = "sentiment";

/// Finds the first element with id `sentiment` anywhere in `body`.
///
/// Its trimmed text becomes the label and its `class` attribute, when present
/// and not blank, the category.
pub fn parse_sentiment(body: &str) -> Result<Sentiment, EnrichError> {
    let fragment = Html::parse_fragment(body);

    let element = fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().id() == Some(SENTIMENT_ID))
        .ok_or(EnrichError::MissingSentiment)?;

    let label = element.text().collect::<String>().trim().to_string();
    let category = element
        .value()
        .attr("class")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Ok(Sentiment { label, category })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_sentiment_element() {
        let s = parse_sentiment(r#"<div id="sentiment" class="positive">Bullish</div>"#).unwrap();
        assert_eq!(s.label, "Bullish");
        assert_eq!(s.category.as_deref(), Some("positive"));
    }

    #[test]
    fn test_nested_element_and_whitespace() {
        let body = r#"
            <html><body>
              <section class="chart">
                <p id="sentiment" class=" negative ">
                  Bearish <b>today</b>
                </p>
              </section>
            </body></html>"#;
        let s = parse_sentiment(body).unwrap();
        assert_eq!(s.label, "Bearish today");
        assert_eq!(s.category.as_deref(), Some("negative"));
    }

    #[test]
    fn test_missing_class_means_no_category() {
        let s = parse_sentiment(r#"<span id="sentiment">Flat</span>"#).unwrap();
        assert_eq!(s.label, "Flat");
        assert!(s.category.is_none());
    }

    #[test]
    fn test_missing_element_is_an_error() {
        let res = parse_sentiment(r#"<div class="positive">Bullish</div>"#);
        assert!(matches!(res, Err(EnrichError::MissingSentiment)));
        assert!(matches!(parse_sentiment(""), Err(EnrichError::MissingSentiment)));
    }

    #[test]
    fn test_first_match_wins() {
        let body = r#"<i id="sentiment" class="neutral">Hold</i><i id="sentiment" class="positive">Buy</i>"#;
        assert_eq!(parse_sentiment(body).unwrap().label, "Hold");
    }
}
