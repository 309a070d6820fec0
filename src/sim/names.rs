use rand::Rng;
use rand::RngCore;

const FIRST_PREFIXES: &[&str] = &[
    "Al", "Ar", "Bal", "Bel", "Bor", "Cal", "Cor", "Dar", "Del", "Dor",
    "El", "Er", "Fal", "Fen", "Gar", "Gil", "Hal", "Ith", "Kal", "Kel",
    "Lor", "Mal", "Mar", "Mor", "Nar", "Nor", "Or", "Pel", "Ral", "Ren",
];

const FIRST_SUFFIXES: &[&str] = &[
    "an", "ar", "as", "en", "er", "ia", "id", "il", "in", "ion",
    "is", "na", "on", "or", "ra", "ren", "ric", "rin", "us", "wen",
];

const TITLES: &[&str] = &[
    "King", "Queen", "Emperor", "Empress", "High Chief", "Consul", "Archon", "Prince",
];

const GOVERNMENTS: &[&str] = &[
    "Monarchy",
    "Republic",
    "Theocracy",
    "Oligarchy",
    "Tribal Council",
    "Empire",
    "Confederation",
    "Merchant Guild",
];

/// Names given to cities founded during the simulation.
pub const CITY_NAMES: &[&str] = &[
    "Newtown",
    "Riverdale",
    "Oakville",
    "Westport",
    "Eastfield",
    "Southbridge",
    "Northpoint",
    "Hillcrest",
    "Valleyforge",
    "Lakeside",
    "Harborview",
    "Foresthill",
    "Meadowbrook",
    "Stonewall",
    "Brookside",
];

const CAPITAL_ROOTS: &[&str] = &[
    "Aster", "Caer", "Dun", "Eld", "Hal", "Kor", "Mir", "Os", "Tal", "Vel",
];

const CAPITAL_ENDINGS: &[&str] = &["ad", "heim", "ia", "mont", "opolis", "oria", "grad", "haven"];

fn pick<'a>(table: &[&'a str], rng: &mut dyn RngCore) -> &'a str {
    table[rng.random_range(0..table.len())]
}

/// Display name for the civilization at `index`.
pub fn civilization_name(index: usize) -> String {
    format!("Civilization {}", index + 1)
}

/// A titled ruler, e.g. "Queen Belwen".
pub fn generate_ruler_name(rng: &mut dyn RngCore) -> String {
    let title = pick(TITLES, rng);
    let prefix = pick(FIRST_PREFIXES, rng);
    let suffix = pick(FIRST_SUFFIXES, rng);
    format!("{title} {prefix}{suffix}")
}

pub fn generate_government(rng: &mut dyn RngCore) -> String {
    pick(GOVERNMENTS, rng).to_string()
}

pub fn generate_city_name(rng: &mut dyn RngCore) -> String {
    pick(CITY_NAMES, rng).to_string()
}

pub fn generate_capital_name(rng: &mut dyn RngCore) -> String {
    let root = pick(CAPITAL_ROOTS, rng);
    let ending = pick(CAPITAL_ENDINGS, rng);
    format!("{root}{ending}")
}
