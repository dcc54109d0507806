//! Static labels and help dialog text for both languages

use serde::Serialize;

use crate::config::DebtConfig;
use crate::format::Formatter;
use crate::language::Language;
use crate::projection::InterestPeriod;

/// Column headers of the interest table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableHeaders {
    pub period: &'static str,
    pub total: &'static str,
    pub per_capita: &'static str,
    pub per_household: &'static str,
}

/// Every static caption of the page in one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub title: &'static str,
    pub interest_title: &'static str,
    pub interest_label: &'static str,
    pub per_capita: &'static str,
    pub per_household: &'static str,
    pub per_second: &'static str,
    pub per_day: &'static str,
    pub table: TableHeaders,
    /// Year, month and day row captions
    pub rows: [&'static str; 3],
    /// Caption of the language button, naming the language it switches to
    pub language_button: &'static str,
    /// Flag shown on the language button
    pub flag_icon: &'static str,
    pub flag_alt: &'static str,
}

impl Labels {
    pub fn row_label(&self, period: InterestPeriod) -> &'static str {
        match period {
            InterestPeriod::Year => self.rows[0],
            InterestPeriod::Month => self.rows[1],
            InterestPeriod::Day => self.rows[2],
        }
    }
}

static FRENCH: Labels = Labels {
    title: "Dette publique française en temps réel",
    interest_title: "Coût de la charge de la dette (intérêts payés)",
    interest_label: "Taux d'intérêt moyen sur la dette française",
    per_capita: "Dette par habitant",
    per_household: "Dette par foyer fiscal imposable",
    per_second: "Augmentation par seconde",
    per_day: "Augmentation par jour",
    table: TableHeaders {
        period: "Par période",
        total: "Total",
        per_capita: "Par habitant",
        per_household: "Par foyer fiscal",
    },
    rows: ["Année", "Mois", "Jour"],
    language_button: "English",
    flag_icon: "images/flag-us.svg",
    flag_alt: "FR",
};

static ENGLISH: Labels = Labels {
    title: "French Public Debt in Real Time",
    interest_title: "Cost of the debt (interest paid)",
    interest_label: "Average interest rate on French debt",
    per_capita: "Debt per capita",
    per_household: "Debt per taxpayer",
    per_second: "Increase per second",
    per_day: "Increase per day",
    table: TableHeaders {
        period: "Per period",
        total: "Total",
        per_capita: "Per capita",
        per_household: "Per taxpayer",
    },
    rows: ["Year", "Month", "Day"],
    language_button: "Français",
    flag_icon: "images/flag-fr.svg",
    flag_alt: "EN",
};

/// Labels for a language
pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::French => &FRENCH,
        Language::English => &ENGLISH,
    }
}

/// Content of the help dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpContent {
    pub title: String,
    /// What the page shows and where the figures come from
    pub intro: Vec<String>,
    pub data_heading: String,
    /// One line per baseline figure
    pub data: Vec<String>,
}

const SOURCE_NAME: &str = "Agence France Trésor";

/// Build the help dialog text for a language from the configured baseline
pub fn help_content(config: &DebtConfig, formatter: &Formatter, language: Language) -> HelpContent {
    let value = formatter.currency(config.baseline_value, language);
    let growth = formatter.currency(config.monthly_growth, language);
    let date = Formatter::date(config.baseline_date, language);
    let population = formatter.integer(config.population as f64, language);
    let households = formatter.integer(config.household_count as f64, language);

    match language {
        Language::French => HelpContent {
            title: "Information sur la dette publique française".to_string(),
            intro: vec![
                "Ce site suit la dette publique française en temps réel et son coût pour les citoyens.".to_string(),
                format!(
                    "Les chiffres sont basés sur des données gouvernementales officielles publiées par l'{SOURCE_NAME} \
                     (https://www.aft.gouv.fr/fr) et actualisées lorsque de nouvelles données sont disponibles."
                ),
            ],
            data_heading: "Dernières données disponibles sur la dette".to_string(),
            data: vec![
                format!("Montant totale de la dette publique : {value} en date du {date}"),
                format!("Augmentation mensuelle moyenne de la dette : {growth} par mois"),
                format!("Population française: {population}"),
                format!("Foyers fiscaux imposables : {households}"),
            ],
        },
        Language::English => {
            let mut data = vec![format!("Total public debt amount: {value} at the date of {date}")];
            if let Some(rate) = formatter.exchange_rate_label() {
                data.push(format!("EUR/USD exchange rate: {rate}"));
            }
            data.push(format!("Average monthly debt increase: {growth} per month"));
            data.push(format!("French population: {population}"));
            data.push(format!("Taxpaying households: {households}"));

            HelpContent {
                title: "Information about French Public Debt".to_string(),
                intro: vec![
                    "This site tracks French public debt in real time and its cost to citizens.".to_string(),
                    format!(
                        "The figures are based on official government data published by the {SOURCE_NAME} \
                         (https://www.aft.gouv.fr/en) and updated when new data becomes available."
                    ),
                ],
                data_heading: "Latest available debt data".to_string(),
                data,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_names_the_other_language() {
        assert_eq!(labels(Language::French).language_button, "English");
        assert_eq!(labels(Language::English).language_button, "Français");
        assert_eq!(labels(Language::French).flag_icon, "images/flag-us.svg");
    }

    #[test]
    fn test_row_labels() {
        let fr = labels(Language::French);
        assert_eq!(fr.row_label(InterestPeriod::Year), "Année");
        assert_eq!(fr.row_label(InterestPeriod::Day), "Jour");
        assert_eq!(labels(Language::English).row_label(InterestPeriod::Month), "Month");
    }

    #[test]
    fn test_help_content_quotes_baseline() {
        let config = DebtConfig::default_france();
        let formatter = Formatter::from_config(&config);

        let en = help_content(&config, &formatter, Language::English);
        assert_eq!(en.title, "Information about French Public Debt");
        assert!(en.data[0].contains("3/31/2025"), "{}", en.data[0]);
        assert!(en.data[0].starts_with("Total public debt amount: $3,906,089,040,000"), "{}", en.data[0]);
        assert!(en.data.iter().any(|line| line == "EUR/USD exchange rate: $1.1676"));
        assert!(en.data.iter().any(|line| line == "French population: 68,520,000"));

        let fr = help_content(&config, &formatter, Language::French);
        assert!(fr.data[0].contains("31/03/2025"));
        assert!(fr.data[0].contains("3\u{202F}345\u{202F}400\u{202F}000\u{202F}000\u{A0}€"));
        assert_eq!(fr.data.len(), 4);
    }

    #[test]
    fn test_help_without_conversion_omits_exchange_rate() {
        let config = DebtConfig {
            exchange_rate: None,
            ..DebtConfig::default_france()
        };
        let formatter = Formatter::from_config(&config);

        let en = help_content(&config, &formatter, Language::English);
        assert_eq!(en.data.len(), 4);
        assert!(en.data[0].contains("€3,345,400,000,000"));
    }
}
