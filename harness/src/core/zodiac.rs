//! Expected-value oracle for the sexagenary (60-year) zodiac cycle.
//!
//! All tables are reordered so that index 0 corresponds to the reference year
//! 2022 (壬寅). Index arithmetic uses floor-style modulo (`rem_euclid`) so
//! years before the reference year still map to non-negative indices.

use std::fmt;

/// Year the cyclic tables are anchored to.
pub const REFERENCE_YEAR: i64 = 2022;

/// Position of the reference year within the 60-year cycle.
const REFERENCE_TURN_OFFSET: i64 = 39;

const STEMS: [char; 10] = ['壬', '癸', '甲', '乙', '丙', '丁', '戊', '己', '庚', '辛'];

const BRANCHES: [char; 12] = [
    '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥', '子', '丑',
];

const ANIMALS: [&str; 12] = [
    "Tiger", "Rabbit", "Dragon", "Snake", "Horse", "Goat", "Monkey", "Rooster", "Dog", "Pig",
    "Rat", "Ox",
];

const ELEMENTS: [&str; 10] = [
    "Water", "Water", "Wood", "Wood", "Fire", "Fire", "Earth", "Earth", "Metal", "Metal",
];

const ASPECTS: [&str; 2] = ["yang", "yin"];

/// Romanized pronunciation for a celestial stem or terrestrial branch.
///
/// The tables above cover every arm; a miss means the tables themselves are
/// incomplete.
fn pinyin(symbol: char) -> &'static str {
    match symbol {
        '甲' => "jiă",
        '乙' => "yĭ",
        '丙' => "bĭng",
        '丁' => "dīng",
        '戊' => "wù",
        '己' => "jĭ",
        '庚' => "gēng",
        '辛' => "xīn",
        '壬' => "rén",
        '癸' => "gŭi",
        '子' => "zĭ",
        '丑' => "chŏu",
        '寅' => "yín",
        '卯' => "măo",
        '辰' => "chén",
        '巳' => "sì",
        '午' => "wŭ",
        '未' => "wèi",
        '申' => "shēn",
        '酉' => "yŏu",
        '戌' => "xū",
        '亥' => "hài",
        other => unreachable!("no pinyin for {other}"),
    }
}

/// Zodiac designation for a single year.
///
/// Fully determined by the year; immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZodiacRecord {
    pub stem: char,
    pub branch: char,
    pub animal: &'static str,
    pub element: &'static str,
    pub aspect: &'static str,
    /// 1-indexed position within the 60-year cycle, in `[1, 60]`.
    pub turn: i64,
}

impl ZodiacRecord {
    /// Derive the designation for `year` from the cyclic tables.
    pub fn for_year(year: i64) -> Self {
        let diff = year - REFERENCE_YEAR;
        let turn = match (diff + REFERENCE_TURN_OFFSET).rem_euclid(60) {
            0 => 60,
            turn => turn,
        };
        Self {
            stem: STEMS[index(diff, STEMS.len())],
            branch: BRANCHES[index(diff, BRANCHES.len())],
            animal: ANIMALS[index(diff, ANIMALS.len())],
            element: ELEMENTS[index(diff, ELEMENTS.len())],
            aspect: ASPECTS[index(diff, ASPECTS.len())],
            turn,
        }
    }
}

fn index(diff: i64, len: usize) -> usize {
    diff.rem_euclid(len as i64) as usize
}

impl fmt::Display for ZodiacRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} ({}-{}, {} {}; {} - year {} of the cycle)",
            self.stem,
            self.branch,
            pinyin(self.stem),
            pinyin(self.branch),
            self.element,
            self.animal,
            self.aspect,
            self.turn
        )
    }
}

/// Expected stdout (after trimming) of a correct target for `year`.
pub fn expected_output(year: i64) -> String {
    ZodiacRecord::for_year(year).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position<T: PartialEq + Copy>(table: &[T], value: T) -> usize {
        table
            .iter()
            .position(|&entry| entry == value)
            .expect("value in table")
    }

    #[test]
    fn reference_year_identity() {
        assert_eq!(
            expected_output(2022),
            "壬寅 (rén-yín, Water Tiger; yang - year 39 of the cycle)"
        );
    }

    #[test]
    fn year_one_uses_floor_modulo() {
        assert_eq!(
            expected_output(1),
            "辛酉 (xīn-yŏu, Metal Rooster; yin - year 58 of the cycle)"
        );
    }

    #[test]
    fn year_after_reference() {
        assert_eq!(
            expected_output(2023),
            "癸卯 (gŭi-măo, Water Rabbit; yin - year 40 of the cycle)"
        );
    }

    #[test]
    fn cycle_repeats_every_60_years() {
        for year in [1, 57, 1999, 2022] {
            assert_eq!(expected_output(year), expected_output(year + 60));
            assert_eq!(
                ZodiacRecord::for_year(year),
                ZodiacRecord::for_year(year + 60)
            );
        }
    }

    #[test]
    fn turn_stays_in_range() {
        for year in 1..=600 {
            let turn = ZodiacRecord::for_year(year).turn;
            assert!((1..=60).contains(&turn), "year {year} produced turn {turn}");
        }
    }

    #[test]
    fn turn_wraps_to_60_not_0() {
        assert_eq!(ZodiacRecord::for_year(2043).turn, 60);
        assert_eq!(ZodiacRecord::for_year(2044).turn, 1);
    }

    #[test]
    fn consecutive_years_step_each_table_by_one() {
        for year in 1..=240 {
            let current = ZodiacRecord::for_year(year);
            let next = ZodiacRecord::for_year(year + 1);
            assert_eq!(
                position(&STEMS, next.stem),
                (position(&STEMS, current.stem) + 1) % STEMS.len()
            );
            assert_eq!(
                position(&BRANCHES, next.branch),
                (position(&BRANCHES, current.branch) + 1) % BRANCHES.len()
            );
            assert_eq!(
                position(&ANIMALS, next.animal),
                (position(&ANIMALS, current.animal) + 1) % ANIMALS.len()
            );
            assert_eq!(
                position(&ASPECTS, next.aspect),
                (position(&ASPECTS, current.aspect) + 1) % ASPECTS.len()
            );
            // Element values repeat, so the stepped index is recomputed
            // instead of recovered from the value.
            let next_element_index =
                (index(year - REFERENCE_YEAR, ELEMENTS.len()) + 1) % ELEMENTS.len();
            assert_eq!(next.element, ELEMENTS[next_element_index]);
            assert_eq!(next.turn, current.turn % 60 + 1);
        }
    }

    #[test]
    fn pinyin_covers_every_table_symbol() {
        for stem in STEMS {
            assert!(!pinyin(stem).is_empty());
        }
        for branch in BRANCHES {
            assert!(!pinyin(branch).is_empty());
        }
    }
}
