//! Country, currency and conversion-rate tables
//!
//! All rates are hardcoded and expressed as the value of one unit of a
//! currency in the reference currency (USD). Every lookup is total: unknown
//! codes resolve to an explicit default entry instead of failing.

use tracing::debug;

/// The currency every conversion rate is expressed against.
pub const REFERENCE_CURRENCY: &str = "USD";

/// Rate used for currency codes missing from [`RATES`].
pub const DEFAULT_RATE: f64 = 1.0;

/// Currency used for country codes missing from [`COUNTRIES`].
pub const DEFAULT_CURRENCY: Currency = Currency {
    code: "USD",
    symbol: "$",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub currency: Currency,
}

const fn entry(
    code: &'static str,
    name: &'static str,
    region: &'static str,
    currency_code: &'static str,
    symbol: &'static str,
) -> Country {
    Country {
        code,
        name,
        region,
        currency: Currency {
            code: currency_code,
            symbol,
        },
    }
}

pub const COUNTRIES: &[Country] = &[
    entry("US", "United States", "North America", "USD", "$"),
    entry("CA", "Canada", "North America", "CAD", "C$"),
    entry("MX", "Mexico", "North America", "MXN", "Mex$"),
    entry("HN", "Honduras", "Central America", "HNL", "L"),
    entry("GT", "Guatemala", "Central America", "GTQ", "Q"),
    entry("DO", "Dominican Republic", "Caribbean", "DOP", "RD$"),
    entry("SV", "El Salvador", "Central America", "USD", "$"),
    entry("CR", "Costa Rica", "Central America", "CRC", "₡"),
    entry("JM", "Jamaica", "Caribbean", "JMD", "J$"),
    entry("TT", "Trinidad and Tobago", "Caribbean", "TTD", "TT$"),
    entry("CO", "Colombia", "South America", "COP", "Col$"),
    entry("PE", "Peru", "South America", "PEN", "S/"),
    entry("EC", "Ecuador", "South America", "USD", "$"),
    entry("BO", "Bolivia", "South America", "BOB", "Bs."),
    entry("PY", "Paraguay", "South America", "PYG", "₲"),
    entry("AR", "Argentina", "South America", "ARS", "AR$"),
    entry("GB", "United Kingdom", "Europe", "GBP", "£"),
    entry("FR", "France", "Europe", "EUR", "€"),
    entry("DE", "Germany", "Europe", "EUR", "€"),
    entry("PL", "Poland", "Europe", "PLN", "zł"),
    entry("UA", "Ukraine", "Europe", "UAH", "₴"),
    entry("RO", "Romania", "Europe", "RON", "lei"),
    entry("TR", "Turkey", "Europe", "TRY", "₺"),
    entry("RU", "Russia", "Europe", "RUB", "₽"),
    entry("AE", "United Arab Emirates", "Middle East", "AED", "د.إ"),
    entry("SA", "Saudi Arabia", "Middle East", "SAR", "﷼"),
    entry("QA", "Qatar", "Middle East", "QAR", "ر.ق"),
    entry("KW", "Kuwait", "Middle East", "KWD", "د.ك"),
    entry("JO", "Jordan", "Middle East", "JOD", "JD"),
    entry("IL", "Israel", "Middle East", "ILS", "₪"),
    entry("LB", "Lebanon", "Middle East", "LBP", "L£"),
    entry("IN", "India", "Asia", "INR", "₹"),
    entry("CN", "China", "Asia", "CNY", "¥"),
    entry("PH", "Philippines", "Asia", "PHP", "₱"),
    entry("PK", "Pakistan", "Asia", "PKR", "₨"),
    entry("BD", "Bangladesh", "Asia", "BDT", "৳"),
    entry("VN", "Vietnam", "Asia", "VND", "₫"),
    entry("KR", "South Korea", "Asia", "KRW", "₩"),
    entry("LK", "Sri Lanka", "Asia", "LKR", "Rs"),
    entry("NP", "Nepal", "Asia", "NPR", "रू"),
    entry("ID", "Indonesia", "Asia", "IDR", "Rp"),
    entry("MM", "Myanmar", "Asia", "MMK", "K"),
    entry("EG", "Egypt", "Africa", "EGP", "E£"),
    entry("NG", "Nigeria", "Africa", "NGN", "₦"),
    entry("GH", "Ghana", "Africa", "GHS", "GH₵"),
    entry("KE", "Kenya", "Africa", "KES", "KSh"),
    entry("DZ", "Algeria", "Africa", "DZD", "دج"),
    entry("MA", "Morocco", "Africa", "MAD", "MAD"),
    entry("AU", "Australia", "Oceania", "AUD", "A$"),
];

/// Value of one unit of each currency in USD.
pub const RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("CAD", 0.74),
    ("MXN", 0.059),
    ("HNL", 0.041),
    ("GTQ", 0.128),
    ("DOP", 0.017),
    ("CRC", 0.0019),
    ("JMD", 0.0065),
    ("TTD", 0.148),
    ("COP", 0.00025),
    ("PEN", 0.27),
    ("BOB", 0.145),
    ("PYG", 0.00014),
    ("ARS", 0.0012),
    ("GBP", 1.27),
    ("EUR", 1.08),
    ("PLN", 0.25),
    ("UAH", 0.026),
    ("RON", 0.22),
    ("TRY", 0.031),
    ("RUB", 0.011),
    ("AED", 0.27),
    ("SAR", 0.27),
    ("QAR", 0.27),
    ("KWD", 3.25),
    ("JOD", 1.41),
    ("ILS", 0.27),
    ("LBP", 0.000011),
    ("INR", 0.012),
    ("CNY", 0.14),
    ("PHP", 0.018),
    ("PKR", 0.0036),
    ("BDT", 0.0091),
    ("VND", 0.000041),
    ("KRW", 0.00076),
    ("LKR", 0.0031),
    ("NPR", 0.0075),
    ("IDR", 0.000064),
    ("MMK", 0.00048),
    ("EGP", 0.032),
    ("NGN", 0.0011),
    ("GHS", 0.083),
    ("KES", 0.0064),
    ("DZD", 0.0074),
    ("MAD", 0.099),
    ("AUD", 0.66),
];

/// Symbols an en-US number formatter uses. Other ISO codes are printed as the
/// code followed by a non-breaking space.
const EN_US_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("CAD", "CA$"),
    ("MXN", "MX$"),
    ("AUD", "A$"),
    ("NZD", "NZ$"),
    ("HKD", "HK$"),
    ("TWD", "NT$"),
    ("BRL", "R$"),
    ("GBP", "£"),
    ("EUR", "€"),
    ("ILS", "₪"),
    ("INR", "₹"),
    ("JPY", "¥"),
    ("CNY", "CN¥"),
    ("PHP", "₱"),
    ("VND", "₫"),
    ("KRW", "₩"),
];

pub fn countries() -> &'static [Country] {
    COUNTRIES
}

pub fn country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Currency used in `country_code`, or [`DEFAULT_CURRENCY`] for unsupported codes.
pub fn currency_for(country_code: &str) -> Currency {
    match country(country_code) {
        Some(c) => c.currency,
        None => {
            debug!(country_code, "Unknown country, using default currency");
            DEFAULT_CURRENCY
        }
    }
}

/// Value of one unit of `currency_code` in the reference currency.
pub fn rate_to_reference(currency_code: &str) -> f64 {
    RATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(currency_code))
        .map(|(_, rate)| *rate)
        .unwrap_or_else(|| {
            debug!(currency_code, "Unknown currency, using default rate");
            DEFAULT_RATE
        })
}

pub fn to_reference(amount: f64, currency_code: &str) -> f64 {
    amount * rate_to_reference(currency_code)
}

/// Every supported country except `from`, in table order.
pub fn destinations(from: &str) -> impl Iterator<Item = &'static Country> + '_ {
    COUNTRIES
        .iter()
        .filter(move |c| !c.code.eq_ignore_ascii_case(from))
}

/// Regional indicator flag for a two letter country code.
pub fn flag(country_code: &str) -> String {
    if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return "🌍".to_string();
    }
    country_code
        .to_ascii_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(0x1F1A5 + c as u32))
        .collect()
}

/// Formats `amount` with two fraction digits the way an en-US currency
/// formatter does. Codes that are not ISO 4217 shaped fall back to the local
/// symbol followed by the fixed-point amount.
pub fn format_money(amount: f64, currency_code: &str) -> String {
    if currency_code.len() != 3 || !currency_code.chars().all(|c| c.is_ascii_alphabetic()) {
        debug!(
            currency_code,
            "Unsupported currency code, using fallback format"
        );
        let symbol = COUNTRIES
            .iter()
            .find(|c| c.currency.code == currency_code)
            .map_or(DEFAULT_CURRENCY.symbol, |c| c.currency.symbol);
        return format!("{symbol}{amount:.2}");
    }

    let code = currency_code.to_ascii_uppercase();
    let prefix = EN_US_SYMBOLS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or_else(|| format!("{code}\u{a0}"), |(_, s)| s.to_string());
    let sign = if amount < 0.0 && format!("{:.2}", amount.abs()) != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{prefix}{}", group_thousands(amount.abs()))
}

fn group_thousands(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_for_known_country() {
        assert_eq!(
            currency_for("GB"),
            Currency {
                code: "GBP",
                symbol: "£"
            }
        );
        assert_eq!(currency_for("mx").code, "MXN");
        assert_eq!(currency_for("SV").code, "USD");
    }

    #[test]
    fn test_currency_for_unknown_country_falls_back() {
        assert_eq!(currency_for("ZZ"), DEFAULT_CURRENCY);
        assert_eq!(currency_for(""), DEFAULT_CURRENCY);
    }

    #[test]
    fn test_rate_lookup() {
        assert_eq!(rate_to_reference("USD"), 1.0);
        assert_eq!(rate_to_reference("EUR"), 1.08);
        assert_eq!(rate_to_reference("XYZ"), DEFAULT_RATE);
        assert!((to_reference(1000.0, "INR") - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_every_country_currency_has_a_rate() {
        for c in countries() {
            assert!(
                RATES.iter().any(|(code, _)| *code == c.currency.code),
                "missing rate for {}",
                c.currency.code
            );
        }
    }

    #[test]
    fn test_country_codes_are_unique() {
        for (i, a) in COUNTRIES.iter().enumerate() {
            assert!(COUNTRIES[i + 1..].iter().all(|b| b.code != a.code));
        }
    }

    #[test]
    fn test_destinations_exclude_source() {
        let dests: Vec<_> = destinations("US").collect();
        assert_eq!(dests.len(), COUNTRIES.len() - 1);
        assert!(dests.iter().all(|c| c.code != "US"));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(105.0, "USD"), "$105.00");
        assert_eq!(format_money(1234567.891, "EUR"), "€1,234,567.89");
        assert_eq!(format_money(10000.0, "usd"), "$10,000.00");
        assert_eq!(format_money(-3.5, "GBP"), "-£3.50");
        assert_eq!(format_money(0.0, "CAD"), "CA$0.00");
        assert_eq!(format_money(999.999, "USD"), "$1,000.00");
        assert_eq!(format_money(1500.0, "NGN"), "NGN\u{a0}1,500.00");
    }

    #[test]
    fn test_format_money_fallback() {
        assert_eq!(format_money(12.3, "??"), "$12.30");
        assert_eq!(format_money(1234.5, ""), "$1234.50");
    }

    #[test]
    fn test_flag() {
        assert_eq!(flag("us"), "🇺🇸");
        assert_eq!(flag(""), "🌍");
        assert_eq!(flag("EU1"), "🌍");
    }
}
