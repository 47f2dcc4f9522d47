// Turns a free-text car description into structured attributes
use crate::model::{AttributeRecord, ModelList, ReferenceTable};
use crate::utils::capitalize;
use regex::Regex;
use std::sync::LazyLock;

const COLOURS: &[&str] = &[
    "red", "blue", "black", "white", "silver", "gray", "grey", "green", "yellow", "brown",
    "orange", "beige", "gold", "purple", "pink", "maroon", "navy", "bronze", "burgundy",
    "turquoise", "teal", "lavender", "charcoal", "ivory",
];

const BODY_TYPES: &[(&str, &str)] = &[
    ("convertible", "Convertible/Cabriolet"),
    ("cabriolet", "Convertible/Cabriolet"),
    ("coupe", "Coupe"),
    ("estate", "Estate Car/Station Wagon"),
    ("wagon", "Estate Car/Station Wagon"),
    ("hatchback", "Hatchback"),
    ("saloon", "Saloon"),
    ("sedan", "Saloon"),
    ("suv", "SUV"),
    ("mpv", "MPV"),
    ("pickup", "Pickup Truck"),
    ("truck", "Pickup Truck"),
];

const FUELS: &[&str] = &["diesel", "electric", "electricity", "hybrid", "petrol", "hydrogen"];

// Word boundaries and digits are ASCII-only: a year is a whole run of
// [A-Za-z0-9_] that reads 19xx or 20xx.
static WORD_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("word run pattern compiles"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:19|20)[0-9]{2}$").expect("year pattern compiles"));

static ENGINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(l|cc)").expect("engine size pattern compiles")
});

pub fn deduce(description: &str, table: &ReferenceTable) -> AttributeRecord {
    let lowered = description.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut record = AttributeRecord::default();

    if let Some((make, model)) = find_make_and_model(&words, table) {
        record.make = make;
        if let Some(model) = model {
            record.model = model;
        }
    }

    if let Some(colour) = words.iter().find(|w| COLOURS.contains(*w)) {
        record.colour = capitalize(colour);
    }

    if let Some(body) = words
        .iter()
        .find_map(|w| BODY_TYPES.iter().find(|(k, _)| k == w).map(|(_, v)| *v))
    {
        record.body_type = body.to_string();
    }

    if let Some(fuel) = words.iter().find(|w| FUELS.contains(*w)) {
        record.fuel = capitalize(fuel);
    }

    if let Some(year) = WORD_RUN_RE
        .find_iter(description)
        .find(|run| YEAR_RE.is_match(run.as_str()))
    {
        record.reg_year = year.as_str().to_string();
    }

    if words.contains(&"automatic") || words.contains(&"auto") {
        record.transmission = "Automatic".into();
    } else if words.contains(&"manual") {
        record.transmission = "Manual".into();
    }

    if let Some(size) = engine_size(description) {
        record.engine_size = size;
    }

    record
}

/// First make in table order found as a token, plus its first model that is.
fn find_make_and_model(words: &[&str], table: &ReferenceTable) -> Option<(String, Option<String>)> {
    let has_token = |name: &str| {
        let name = name.to_lowercase();
        words.iter().any(|w| *w == name)
    };

    let entry = table.makes().iter().find(|entry| has_token(&entry.name))?;

    let model = match &entry.models {
        ModelList::Listed(models) => models
            .iter()
            .find(|m| has_token(m))
            .map(|m| m.to_uppercase()),
        ModelList::Unlisted(_) => None,
    };

    Some((entry.name.clone(), model))
}

fn engine_size(description: &str) -> Option<String> {
    let caps = ENGINE_RE.captures(description)?;
    let size = caps.get(1)?.as_str();
    let unit = caps.get(2)?.as_str();

    if unit.eq_ignore_ascii_case("cc") {
        match size.parse::<f64>() {
            Ok(cc) if cc >= 1000.0 => Some(format!("{}L", to_one_decimal(cc / 1000.0))),
            _ => Some(format!("{}cc", size)),
        }
    } else {
        Some(format!("{}L", size))
    }
}

/// One decimal place, with exact ties rounded up (1.25 -> "1.3").
fn to_one_decimal(x: f64) -> String {
    // Wide enough to print any fractional part of an f64 >= 1 exactly.
    let exact = format!("{:.60}", x);
    if let Some((whole, frac)) = exact.split_once('.') {
        let mut digits = frac.chars();
        let tenth = digits.next().and_then(|d| d.to_digit(10));
        let is_tie = digits.next() == Some('5') && digits.all(|d| d == '0');
        if let (true, Some(tenth), Ok(whole)) = (is_tie, tenth, whole.parse::<u64>()) {
            let tenths = whole * 10 + u64::from(tenth) + 1;
            return format!("{}.{}", tenths / 10, tenths % 10);
        }
    }
    format!("{:.1}", x)
}
