use crate::domain::model::ProfileDetails;
use crate::parser::element_text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

/// `City (Country)`
static LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^()]+)\s*\(([^()]+)\)").expect("location pattern"));

static NAME: Lazy<Selector> = Lazy::new(|| selector("h2.sezione-head"));
static LOCATION_BLOCK: Lazy<Selector> = Lazy::new(|| selector("div.col-12"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
static INSTRUMENT: Lazy<Selector> = Lazy::new(|| selector("big"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("profile selector")
}

/// Parse the musician profile fragment returned by the profile endpoint.
pub fn parse_profile(fragment: &str) -> ProfileDetails {
    let document = Html::parse_fragment(fragment);

    let name = document.select(&NAME).next().map(element_text);

    // 只看第一個 col-12 區塊裡的段落
    let location = document
        .select(&LOCATION_BLOCK)
        .next()
        .and_then(|block| block.select(&PARAGRAPH).next())
        .map(element_text);
    let (city, country) = location
        .as_deref()
        .map(split_location)
        .unwrap_or((None, None));

    let instrument = document.select(&INSTRUMENT).next().map(element_text);

    ProfileDetails {
        name: non_empty(name),
        city,
        country,
        instrument: non_empty(instrument),
    }
}

/// Split `"Manchester (United Kingdom)"` into city and country. Text without a
/// parenthesised country is taken as the city alone.
pub fn split_location(location: &str) -> (Option<String>, Option<String>) {
    if location.trim().is_empty() {
        return (None, None);
    }

    match LOCATION.captures(location) {
        Some(caps) => (
            Some(caps[1].trim().to_string()),
            Some(caps[2].trim().to_string()),
        ),
        None => (Some(location.to_string()), None),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
<div class="container">
  <h2 class="sezione-head text-center">Alice Smith</h2>
  <div class="row">
    <div class="col-12 text-center">
      <p>Manchester (United Kingdom)</p>
      <p>Joined 2019</p>
    </div>
  </div>
  <big>Electric guitar</big>
</div>
"#;

    #[test]
    fn test_parse_profile() {
        let profile = parse_profile(PROFILE);

        assert_eq!(
            profile,
            ProfileDetails {
                name: Some("Alice Smith".to_string()),
                city: Some("Manchester".to_string()),
                country: Some("United Kingdom".to_string()),
                instrument: Some("Electric guitar".to_string()),
            }
        );
    }

    #[test]
    fn test_location_without_country() {
        let profile = parse_profile(r#"<div class="col-12"><p>Bologna</p></div>"#);

        assert_eq!(profile.city.as_deref(), Some("Bologna"));
        assert_eq!(profile.country, None);
        assert_eq!(profile.name, None);
        assert_eq!(profile.instrument, None);
    }

    #[test]
    fn test_missing_location_block() {
        let profile = parse_profile(r#"<h2 class="sezione-head">Bob</h2><p>Leeds (UK)</p>"#);

        assert_eq!(profile.name.as_deref(), Some("Bob"));
        assert_eq!(profile.city, None);
        assert_eq!(profile.country, None);
    }

    #[test]
    fn test_location_must_be_inside_first_col_12() {
        let profile = parse_profile(
            r#"<div class="col-12"><span>Location hidden</span></div>
               <div class="bio"><p>Loves jazz (and blues)</p></div>"#,
        );

        assert_eq!(profile.city, None);
        assert_eq!(profile.country, None);
    }

    #[test]
    fn test_entities_are_decoded() {
        let profile = parse_profile(
            r#"<h2 class="sezione-head">Zo&euml; &amp; Friends</h2>
               <div class="col-12"><p>Li&egrave;ge (Belgium)</p></div>"#,
        );

        assert_eq!(profile.name.as_deref(), Some("Zoë & Friends"));
        assert_eq!(profile.city.as_deref(), Some("Liège"));
        assert_eq!(profile.country.as_deref(), Some("Belgium"));
    }

    #[test]
    fn test_split_location() {
        assert_eq!(
            split_location("Cesena  ( Italy )"),
            (Some("Cesena".to_string()), Some("Italy".to_string()))
        );
        assert_eq!(
            split_location("Reggio (RE) (Italy)"),
            (Some("Reggio".to_string()), Some("RE".to_string()))
        );
        assert_eq!(split_location("   "), (None, None));
    }
}
