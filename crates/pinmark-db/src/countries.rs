use pinmark_types::Country;
use uuid::Uuid;

/// (name, code, languages, default latitude, default longitude)
const CATALOG: &[(&str, &str, &[&str], f64, f64)] = &[
    ("United States", "US", &["English"], 37.0902, -95.7129),
    ("China", "CN", &["Mandarin"], 35.8617, 104.1954),
    ("India", "IN", &["Hindi", "English"], 20.5937, 78.9629),
    ("Indonesia", "ID", &["Indonesian"], -0.7893, 113.9213),
    ("Pakistan", "PK", &["Urdu", "English"], 30.3753, 69.3451),
    ("Brazil", "BR", &["Portuguese"], -14.2350, -51.9253),
    ("Nigeria", "NG", &["English"], 9.0820, 8.6753),
    ("Bangladesh", "BD", &["Bengali"], 23.6850, 90.3563),
    ("Russia", "RU", &["Russian"], 61.5240, 105.3188),
    ("Mexico", "MX", &["Spanish"], 23.6345, -102.5528),
    ("Japan", "JP", &["Japanese"], 36.2048, 138.2529),
    ("Ethiopia", "ET", &["Amharic"], 9.1450, 40.4897),
    ("Philippines", "PH", &["Filipino", "English"], 12.8797, 121.7740),
    ("Egypt", "EG", &["Arabic"], 26.8206, 30.8025),
    ("Vietnam", "VN", &["Vietnamese"], 14.0583, 108.2772),
    ("Turkey", "TR", &["Turkish"], 38.9637, 35.2433),
    ("Iran", "IR", &["Persian"], 32.4279, 53.6880),
    ("Germany", "DE", &["German"], 51.1657, 10.4515),
    ("Thailand", "TH", &["Thai"], 15.8700, 100.9925),
    ("United Kingdom", "GB", &["English"], 55.3781, -3.4360),
    ("France", "FR", &["French"], 46.2276, 2.2137),
    ("Italy", "IT", &["Italian"], 41.8719, 12.5674),
    ("South Africa", "ZA", &["Afrikaans", "English", "Zulu"], -30.5595, 22.9375),
    ("South Korea", "KR", &["Korean"], 35.9078, 127.7669),
    ("Spain", "ES", &["Spanish"], 40.4637, -3.7492),
    ("Canada", "CA", &["English", "French"], 56.1304, -106.3468),
    ("Australia", "AU", &["English"], -25.2744, 133.7751),
];

/// Static country list. Ids are minted once when the catalog is built.
pub struct CountryCatalog {
    countries: Vec<Country>,
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CountryCatalog {
    pub fn builtin() -> Self {
        let countries = CATALOG
            .iter()
            .map(|&(name, code, languages, lat, lng)| Country {
                id: Uuid::new_v4(),
                name: name.to_string(),
                code: code.to_string(),
                language: languages.iter().map(|l| l.to_string()).collect(),
                default_latitude: lat,
                default_longitude: lng,
            })
            .collect();
        Self { countries }
    }

    pub fn all(&self) -> &[Country] {
        &self.countries
    }

    /// Case-insensitive lookup by ISO code.
    pub fn by_code(&self, code: &str) -> Option<&Country> {
        let code = code.trim();
        self.countries.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_unique_codes() {
        let catalog = CountryCatalog::builtin();
        let mut codes: Vec<&str> = catalog.all().iter().map(|c| c.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), catalog.all().len());
        assert_eq!(catalog.all().len(), 27);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let catalog = CountryCatalog::builtin();
        let za = catalog.by_code(" za ").unwrap();
        assert_eq!(za.name, "South Africa");
        assert_eq!(za.language, vec!["Afrikaans", "English", "Zulu"]);
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(CountryCatalog::builtin().by_code("XX").is_none());
    }
}
