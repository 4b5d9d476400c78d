use serde::Serialize;

/// Average lifespan in years assumed when no breed profile is available.
pub const DEFAULT_AVERAGE_LIFESPAN: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifeExpectancy {
    pub low: u32,
    pub mid: f64,
    pub high: u32,
}

impl LifeExpectancy {
    const fn fixed(low: u32, mid: f64, high: u32) -> Self {
        Self { low, mid, high }
    }

    fn from_range(low: u32, high: u32) -> Self {
        // mid rounded to one decimal
        let mid = ((f64::from(low + high) / 2.0) * 10.0).round() / 10.0;
        Self { low, mid, high }
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.low, self.high)
    }
}

const SMALL: LifeExpectancy = LifeExpectancy::fixed(12, 14.0, 16);
const MEDIUM: LifeExpectancy = LifeExpectancy::fixed(10, 12.0, 14);
const LARGE: LifeExpectancy = LifeExpectancy::fixed(8, 10.0, 12);
const GIANT: LifeExpectancy = LifeExpectancy::fixed(6, 8.0, 10);

// keys are already normalized
const OVERRIDES: &[(&str, u32, u32)] = &[
    ("goldenretriever", 10, 12),
    ("chihuahua", 14, 16),
    ("greatdane", 7, 10),
    ("bernesemountaindog", 7, 10),
    ("australiancattledog", 12, 16),
    ("labradorretriever", 10, 12),
    ("labrador", 10, 12),
    ("poodle", 12, 15),
    ("germanshepherd", 9, 13),
    ("bulldog", 8, 10),
    ("beagle", 10, 15),
    ("boxer", 10, 12),
    ("rottweiler", 8, 10),
    ("dachshund", 12, 16),
    ("shihtzu", 10, 18),
    ("siberianhusky", 12, 14),
    ("husky", 12, 14),
    ("pomeranian", 12, 16),
    ("frenchbulldog", 10, 12),
    ("bordercollie", 12, 15),
    ("cockerspaniel", 10, 14),
    ("cavalierkingcharlesspaniel", 9, 14),
    ("maltese", 12, 15),
    ("yorkshireterrier", 11, 15),
    ("dobermanpinscher", 10, 12),
    ("doberman", 10, 12),
    ("mastiff", 6, 10),
    ("saintbernard", 8, 10),
    ("newfoundland", 8, 10),
    ("irishwolfhound", 6, 8),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
    Giant,
}

impl SizeClass {
    pub fn life_expectancy(self) -> LifeExpectancy {
        match self {
            SizeClass::Small => SMALL,
            SizeClass::Medium => MEDIUM,
            SizeClass::Large => LARGE,
            SizeClass::Giant => GIANT,
        }
    }
}

// normalized breed name -> size class
const BREED_SIZES: &[(&str, SizeClass)] = &[
    // small
    ("affenpinscher", SizeClass::Small),
    ("americaneskimodogminiature", SizeClass::Small),
    ("americaneskimodogtoy", SizeClass::Small),
    ("australianterrier", SizeClass::Small),
    ("biewerterrier", SizeClass::Small),
    ("bichonfrise", SizeClass::Small),
    ("bolognese", SizeClass::Small),
    ("borderterrier", SizeClass::Small),
    ("bostonterrier", SizeClass::Small),
    ("brusselsgriffon", SizeClass::Small),
    ("cairnterrier", SizeClass::Small),
    ("cavalierkingcharlesspaniel", SizeClass::Small),
    ("chinesecrested", SizeClass::Small),
    ("chihuahua", SizeClass::Small),
    ("cotondetulear", SizeClass::Small),
    ("dachshund", SizeClass::Small),
    ("dandiedinmontterrier", SizeClass::Small),
    ("englishtoyspaniel", SizeClass::Small),
    ("havanese", SizeClass::Small),
    ("italiangreyhound", SizeClass::Small),
    ("japanesechin", SizeClass::Small),
    ("lakelandterrier", SizeClass::Small),
    ("lhasaapso", SizeClass::Small),
    ("lowchen", SizeClass::Small),
    ("maltese", SizeClass::Small),
    ("manchesterterriertoy", SizeClass::Small),
    ("miniaturepinscher", SizeClass::Small),
    ("miniatureschnauzer", SizeClass::Small),
    ("norfolkterrier", SizeClass::Small),
    ("norwichterrier", SizeClass::Small),
    ("papillon", SizeClass::Small),
    ("parsonrussellterrier", SizeClass::Small),
    ("pekingese", SizeClass::Small),
    ("pomeranian", SizeClass::Small),
    ("poodletoy", SizeClass::Small),
    ("poodleminiature", SizeClass::Small),
    ("pug", SizeClass::Small),
    ("ratterrier", SizeClass::Small),
    ("schipperke", SizeClass::Small),
    ("scottishterrier", SizeClass::Small),
    ("sealyhamterrier", SizeClass::Small),
    ("shihtzu", SizeClass::Small),
    ("silkyterrier", SizeClass::Small),
    ("skyeterrier", SizeClass::Small),
    ("toyfoxterrier", SizeClass::Small),
    ("westhighlandwhiteterrier", SizeClass::Small),
    ("wirefoxterrier", SizeClass::Small),
    ("yorkshireterrier", SizeClass::Small),
    ("miniatureamericanshepherd", SizeClass::Small),
    ("morkie", SizeClass::Small),
    ("shorkie", SizeClass::Small),
    ("maltipoo", SizeClass::Small),
    ("yorkipoo", SizeClass::Small),
    ("pomsky", SizeClass::Small),
    ("puggle", SizeClass::Small),
    ("cavapoo", SizeClass::Small),
    ("cockapoosmall", SizeClass::Small),
    ("aussiedoodlemini", SizeClass::Small),
    ("alaskankleekai", SizeClass::Small),
    ("bieweryorkshireterrier", SizeClass::Small),
    ("bohemianterrier", SizeClass::Small),
    ("ceskyterrier", SizeClass::Small),
    ("englishcocker", SizeClass::Small),
    ("japanesespitz", SizeClass::Small),
    ("lancashireheeler", SizeClass::Small),
    ("miniaturedachshund", SizeClass::Small),
    ("miniaturepoodle", SizeClass::Small),
    ("miniaturesheepadoodle", SizeClass::Small),
    ("miniaturegoldendoodle", SizeClass::Small),
    ("norwichdoodle", SizeClass::Small),
    ("russiantoy", SizeClass::Small),
    ("toypoodle", SizeClass::Small),
    ("toymaltipoo", SizeClass::Small),
    ("mixedbreedsmall", SizeClass::Small),
    // medium
    ("americaneskimodogstandard", SizeClass::Medium),
    ("americanhairlessterrier", SizeClass::Medium),
    ("americanstaffordshireterrier", SizeClass::Medium),
    ("australiancattledog", SizeClass::Medium),
    ("australianshepherd", SizeClass::Medium),
    ("basenji", SizeClass::Medium),
    ("bassethound", SizeClass::Medium),
    ("beagle", SizeClass::Medium),
    ("bedlingtonterrier", SizeClass::Medium),
    ("belgianlaekenois", SizeClass::Medium),
    ("brittany", SizeClass::Medium),
    ("bulldog", SizeClass::Medium),
    ("bullterrier", SizeClass::Medium),
    ("cardiganwelshcorgi", SizeClass::Medium),
    ("cockerspaniel", SizeClass::Medium),
    ("collie", SizeClass::Medium),
    ("dalmatian", SizeClass::Medium),
    ("englishcockerspaniel", SizeClass::Medium),
    ("englishspringerspaniel", SizeClass::Medium),
    ("finnishspitz", SizeClass::Medium),
    ("frenchbulldog", SizeClass::Medium),
    ("germanpinscher", SizeClass::Medium),
    ("harrier", SizeClass::Medium),
    ("icelandicsheepdog", SizeClass::Medium),
    ("irishterrier", SizeClass::Medium),
    ("keeshond", SizeClass::Medium),
    ("kerryblueterrier", SizeClass::Medium),
    ("lagottoromagnolo", SizeClass::Medium),
    ("miniaturebullterrier", SizeClass::Medium),
    ("novascotiaducktollingretriever", SizeClass::Medium),
    ("pembrokewelshcorgi", SizeClass::Medium),
    ("portuguesewaterdog", SizeClass::Medium),
    ("puli", SizeClass::Medium),
    ("samoyed", SizeClass::Medium),
    ("shetlandsheepdog", SizeClass::Medium),
    ("shibainu", SizeClass::Medium),
    ("softcoatedwheatenterrier", SizeClass::Medium),
    ("spanishwaterdog", SizeClass::Medium),
    ("standardschnauzer", SizeClass::Medium),
    ("staffordshirebullterrier", SizeClass::Medium),
    ("vizsla", SizeClass::Medium),
    ("whippet", SizeClass::Medium),
    ("wirehairedpointinggriffon", SizeClass::Medium),
    ("bordercollie", SizeClass::Medium),
    ("australiankelpie", SizeClass::Medium),
    ("boykinspaniel", SizeClass::Medium),
    ("fieldspaniel", SizeClass::Medium),
    ("finnishlapphund", SizeClass::Medium),
    ("kooikerhondje", SizeClass::Medium),
    ("labradoodle", SizeClass::Medium),
    ("goldendoodle", SizeClass::Medium),
    ("bernedoodlemini", SizeClass::Medium),
    ("aussiedoodle", SizeClass::Medium),
    ("sheprador", SizeClass::Medium),
    ("boxador", SizeClass::Medium),
    ("chiweenie", SizeClass::Medium),
    ("americanwaterspaniel", SizeClass::Medium),
    ("barbet", SizeClass::Medium),
    ("bluetickcoonhound", SizeClass::Medium),
    ("englishfoxhound", SizeClass::Medium),
    ("finnishhound", SizeClass::Medium),
    ("kaiken", SizeClass::Medium),
    ("karelianbeardog", SizeClass::Medium),
    ("mudi", SizeClass::Medium),
    ("polishlowlandsheepdog", SizeClass::Medium),
    ("schapendoes", SizeClass::Medium),
    ("treeingtennesseebrindle", SizeClass::Medium),
    ("uplandpointer", SizeClass::Medium),
    ("wirehairedvizsla", SizeClass::Medium),
    ("americanleopardhound", SizeClass::Medium),
    ("bergamascosheepdog", SizeClass::Medium),
    ("mixedbreedmedium", SizeClass::Medium),
    // large
    ("airedaleterrier", SizeClass::Large),
    ("akita", SizeClass::Large),
    ("alaskanmalamute", SizeClass::Large),
    ("americanbulldog", SizeClass::Large),
    ("anatolianshepherddog", SizeClass::Large),
    ("belgianmalinois", SizeClass::Large),
    ("belgiansheepdog", SizeClass::Large),
    ("belgiantervuren", SizeClass::Large),
    ("bernesemountaindog", SizeClass::Large),
    ("blackandtancoonhound", SizeClass::Large),
    ("bloodhound", SizeClass::Large),
    ("boerboel", SizeClass::Large),
    ("borzoi", SizeClass::Large),
    ("boxer", SizeClass::Large),
    ("briard", SizeClass::Large),
    ("bullmastiff", SizeClass::Large),
    ("canecorso", SizeClass::Large),
    ("chesapeakebayretriever", SizeClass::Large),
    ("chinook", SizeClass::Large),
    ("curlycoatedretriever", SizeClass::Large),
    ("dobermanpinscher", SizeClass::Large),
    ("englishsetter", SizeClass::Large),
    ("flatcoatedretriever", SizeClass::Large),
    ("germanshepherd", SizeClass::Large),
    ("germanshorthairedpointer", SizeClass::Large),
    ("germanwirehairedpointer", SizeClass::Large),
    ("goldenretriever", SizeClass::Large),
    ("gordonsetter", SizeClass::Large),
    ("greyhound", SizeClass::Large),
    ("irishsetter", SizeClass::Large),
    ("kuvasz", SizeClass::Large),
    ("labradorretriever", SizeClass::Large),
    ("leonberger", SizeClass::Large),
    ("newfoundland", SizeClass::Large),
    ("oldenglishsheepdog", SizeClass::Large),
    ("pointer", SizeClass::Large),
    ("rhodesianridgeback", SizeClass::Large),
    ("rottweiler", SizeClass::Large),
    ("saluki", SizeClass::Large),
    ("siberianhusky", SizeClass::Large),
    ("spinoneitaliano", SizeClass::Large),
    ("standardpoodle", SizeClass::Large),
    ("treeingwalkercoonhound", SizeClass::Large),
    ("weimaraner", SizeClass::Large),
    ("americanfoxhound", SizeClass::Large),
    ("azawakh", SizeClass::Large),
    ("blackrussianterrier", SizeClass::Large),
    ("bouvierdesflandres", SizeClass::Large),
    ("clumberspaniel", SizeClass::Large),
    ("dutchshepherd", SizeClass::Large),
    ("englishpointer", SizeClass::Large),
    ("giantschnauzer", SizeClass::Large),
    ("irishredandwhitesetter", SizeClass::Large),
    ("komondorlarge", SizeClass::Large),
    ("otterhound", SizeClass::Large),
    ("pharaohhound", SizeClass::Large),
    ("plotthound", SizeClass::Large),
    ("portuguesepodengogrande", SizeClass::Large),
    ("redbonecoonhound", SizeClass::Large),
    ("sloughi", SizeClass::Large),
    ("tornjak", SizeClass::Large),
    ("xoloitzcuintlistandard", SizeClass::Large),
    ("mixedbreedlarge", SizeClass::Large),
    // giant
    ("greatdane", SizeClass::Giant),
    ("greatpyrenees", SizeClass::Giant),
    ("irishwolfhound", SizeClass::Giant),
    ("mastiff", SizeClass::Giant),
    ("neapolitanmastiff", SizeClass::Giant),
    ("saintbernard", SizeClass::Giant),
    ("scottishdeerhound", SizeClass::Giant),
    ("tibetanmastiff", SizeClass::Giant),
    ("doguedebordeaux", SizeClass::Giant),
    ("englishmastiff", SizeClass::Giant),
    ("caucasianshepherd", SizeClass::Giant),
    ("centralasianshepherd", SizeClass::Giant),
    ("landseer", SizeClass::Giant),
    ("pyreneanmastiff", SizeClass::Giant),
    ("komondor", SizeClass::Giant),
    ("estrelamountaindog", SizeClass::Giant),
    ("kangalshepherddog", SizeClass::Giant),
    ("tosainu", SizeClass::Giant),
    ("boerboelgiant", SizeClass::Giant),
    ("greatswissmountaindog", SizeClass::Giant),
    ("pyreneanmountaindog", SizeClass::Giant),
    ("spanishmastiff", SizeClass::Giant),
    ("mixedbreedgiant", SizeClass::Giant),
];

pub fn size_class(breed: &str) -> Option<SizeClass> {
    let key = normalize(breed);
    BREED_SIZES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, size)| *size)
}

fn normalize(breed: &str) -> String {
    breed
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

fn by_weight(weight_lbs: f64) -> LifeExpectancy {
    if weight_lbs < 20.0 {
        SMALL
    } else if weight_lbs < 50.0 {
        MEDIUM
    } else if weight_lbs <= 100.0 {
        LARGE
    } else {
        GIANT
    }
}

/// Expected lifespan range for a breed.
///
/// Lookup order: per-breed override, the breed's size class, the dog's weight
/// class, then medium.
pub fn life_expectancy(breed: &str, weight_lbs: Option<f64>) -> LifeExpectancy {
    let key = normalize(breed);
    if let Some((_, low, high)) = OVERRIDES.iter().find(|(name, _, _)| *name == key) {
        return LifeExpectancy::from_range(*low, *high);
    }
    if let Some(size) = size_class(breed) {
        return size.life_expectancy();
    }

    match weight_lbs {
        Some(weight) if weight.is_finite() && weight > 0.0 => by_weight(weight),
        _ => MEDIUM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_lookup_ignores_case_and_punctuation() {
        let range = life_expectancy("Great Dane", None);
        assert_eq!((range.low, range.high), (7, 10));
        assert_eq!(range.mid, 8.5);
        assert_eq!(life_expectancy("shih-tzu", Some(300.0)).label(), "10-18");
    }

    #[test]
    fn test_size_class_before_weight() {
        assert_eq!(size_class("Pug"), Some(SizeClass::Small));
        assert_eq!(life_expectancy("Pug", Some(25.0)).label(), "12-16");
        assert_eq!(life_expectancy("great pyrenees", Some(45.0)).label(), "6-10");
        assert_eq!(life_expectancy("Poodle (Toy)", None), SMALL);
        assert_eq!(life_expectancy("Mixed Breed (Large)", Some(10.0)), LARGE);
    }

    #[test]
    fn test_override_wins_over_size_class() {
        // listed as giant, override is 7-10
        assert_eq!(size_class("Great Dane"), Some(SizeClass::Giant));
        assert_eq!(life_expectancy("Great Dane", Some(150.0)).label(), "7-10");
    }

    #[test]
    fn test_weight_class_fallback() {
        assert_eq!(life_expectancy("Mutt", Some(15.0)), SMALL);
        assert_eq!(life_expectancy("Mutt", Some(20.0)), MEDIUM);
        assert_eq!(life_expectancy("Mutt", Some(100.0)), LARGE);
        assert_eq!(life_expectancy("Mutt", Some(101.0)), GIANT);
    }

    #[test]
    fn test_unknown_breed_without_weight_is_medium() {
        assert_eq!(life_expectancy("Mutt", None), MEDIUM);
        assert_eq!(life_expectancy("Mutt", Some(-4.0)), MEDIUM);
        assert_eq!(life_expectancy("Mutt", Some(f64::NAN)), MEDIUM);
    }
}
