//! Source location: URL template, date token and element path.
//!
//! The publisher names each daily page after its business date written as
//! `dd` + Portuguese month abbreviation + `yyyy` (`14ago2026`). The month
//! table is fixed here so the token never depends on the host locale.

use serde::{Deserialize, Serialize};
use teto_core::{BusinessDate, TetoError, TetoResult};

/// Placeholder substituted with the date token.
pub const DATE_PLACEHOLDER: &str = "{date}";

/// Published NTN-B secondary market page.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://www.anbima.com.br/informacoes/merc-sec/resultados/msec_{date}_ntn-b.asp";

/// Location of the rate table within the rendered page.
pub const DEFAULT_ELEMENT_PATH: &str = "/html/body/table/tbody/tr/td/div/table[2]";

/// Lowercase Portuguese month abbreviations, January first.
pub const MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Abbreviation for a 1-based month number.
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTHS.get(index).copied()
}

/// Formats `date` as the page's date token, e.g. `14ago2026`.
pub fn date_token(date: BusinessDate) -> String {
    // BusinessDate wraps a valid NaiveDate, so the month is always 1..=12.
    let month = month_abbreviation(date.month()).unwrap_or(MONTHS[0]);
    format!("{:02}{}{:04}", date.day(), month, date.year())
}

/// Substitutes the date token into `template`.
pub fn source_url(template: &str, date: BusinessDate) -> String {
    template.replace(DATE_PLACEHOLDER, &date_token(date))
}

/// Where the rate table is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Page URL with a `{date}` placeholder.
    pub url_template: String,
    /// Absolute element path of the table region.
    pub element_path: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            element_path: DEFAULT_ELEMENT_PATH.to_string(),
        }
    }
}

impl SourceSettings {
    /// URL of the page for `date`.
    pub fn url_for(&self, date: BusinessDate) -> String {
        source_url(&self.url_template, date)
    }

    /// Checks the template carries the placeholder and the path parses.
    ///
    /// # Errors
    ///
    /// Returns `TetoError::InvalidInput` naming the offending field.
    pub fn validate(&self) -> TetoResult<()> {
        if !self.url_template.contains(DATE_PLACEHOLDER) {
            return Err(TetoError::invalid_input(
                "source.url_template",
                format!("must contain {DATE_PLACEHOLDER}"),
            ));
        }
        teto_html::ElementPath::parse(&self.element_path)
            .map_err(|e| TetoError::invalid_input("source.element_path", e.reason))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> BusinessDate {
        BusinessDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    #[test]
    fn test_date_token() {
        assert_eq!(date_token(date(2026, 8, 14)), "14ago2026");
        assert_eq!(date_token(date(2026, 2, 2)), "02fev2026");
        assert_eq!(date_token(date(2025, 12, 31)), "31dez2025");
    }

    #[test]
    fn test_every_month_abbreviation() {
        let tokens: Vec<_> = (1..=12).filter_map(month_abbreviation).collect();
        assert_eq!(tokens, MONTHS);
        assert_eq!(month_abbreviation(0), None);
        assert_eq!(month_abbreviation(13), None);
    }

    #[test]
    fn test_default_url() {
        assert_eq!(
            SourceSettings::default().url_for(date(2026, 8, 14)),
            "https://www.anbima.com.br/informacoes/merc-sec/resultados/msec_14ago2026_ntn-b.asp"
        );
    }

    #[test]
    fn test_validate() {
        assert!(SourceSettings::default().validate().is_ok());

        let no_placeholder = SourceSettings {
            url_template: "https://example.com/fixed.asp".into(),
            ..SourceSettings::default()
        };
        assert!(matches!(
            no_placeholder.validate(),
            Err(TetoError::InvalidInput { field, .. }) if field == "source.url_template"
        ));

        let bad_path = SourceSettings {
            element_path: "table[2]".into(),
            ..SourceSettings::default()
        };
        assert!(bad_path.validate().is_err());
    }
}
