//! Distribution summaries over the full record set.
//!
//! Five independent single-pass groupings; nothing here filters through
//! the collapse state, the charts always describe the whole clan. Members
//! missing the relevant field are left out of a distribution rather than
//! being counted as zero, which undercounts instead of skewing.

use crate::member::{FamilyMember, Gender};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

// Chart palette, matched to the gender/status pie slices of the stats page.
const MALE_FILL: &str = "#3b82f6";
const FEMALE_FILL: &str = "#ec4899";
const UNKNOWN_FILL: &str = "#94a3b8";
const ALIVE_FILL: &str = "#22c55e";
const DECEASED_FILL: &str = "#64748b";

const AGE_BAND_LABELS: [&str; 9] = [
    "0-10岁", "11-20岁", "21-30岁", "31-40岁", "41-50岁", "51-60岁", "61-70岁", "71-80岁",
    "80岁以上",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub count: u32,
    pub fill: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenerationCount {
    pub label: String,
    pub count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AgeBucket {
    pub label: &'static str,
    pub count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct NameCharCount {
    pub character: char,
    pub count: u32,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct FamilyStatistics {
    total_members: usize,
    gender: Vec<ChartSlice>,
    generations: Vec<GenerationCount>,
    status: Vec<ChartSlice>,
    ages: Vec<AgeBucket>,
    common_name_chars: Vec<NameCharCount>,
}

impl FamilyStatistics {
    /// Aggregates the full record set. `reference_year` anchors the age
    /// bands; callers pass the current year.
    pub fn new_from_members(members: &[FamilyMember], reference_year: i32) -> Self {
        Self {
            total_members: members.len(),
            gender: Self::gender_distribution(members),
            generations: Self::generation_distribution(members),
            status: Self::status_distribution(members),
            ages: Self::age_distribution(members, reference_year),
            common_name_chars: Self::name_char_frequency(members),
        }
    }

    #[inline(always)]
    pub fn total_members(&self) -> usize {
        self.total_members
    }

    #[inline(always)]
    pub fn gender(&self) -> &[ChartSlice] {
        &self.gender
    }

    #[inline(always)]
    pub fn generations(&self) -> &[GenerationCount] {
        &self.generations
    }

    #[inline(always)]
    pub fn status(&self) -> &[ChartSlice] {
        &self.status
    }

    #[inline(always)]
    pub fn ages(&self) -> &[AgeBucket] {
        &self.ages
    }

    #[inline(always)]
    pub fn common_name_chars(&self) -> &[NameCharCount] {
        &self.common_name_chars
    }

    /// 男 and 女 are always reported, zero or not; 未知 only when some
    /// member actually lacks a usable gender.
    fn gender_distribution(members: &[FamilyMember]) -> Vec<ChartSlice> {
        let male = members
            .iter()
            .filter(|m| m.gender == Some(Gender::Male))
            .count() as u32;
        let female = members
            .iter()
            .filter(|m| m.gender == Some(Gender::Female))
            .count() as u32;
        let unknown = members.len() as u32 - male - female;

        let mut ret = vec![
            ChartSlice {
                label: "男",
                count: male,
                fill: MALE_FILL,
            },
            ChartSlice {
                label: "女",
                count: female,
                fill: FEMALE_FILL,
            },
        ];
        if unknown > 0 {
            ret.push(ChartSlice {
                label: "未知",
                count: unknown,
                fill: UNKNOWN_FILL,
            });
        }
        ret
    }

    /// Ascending by generation number, the unrecorded bucket last.
    fn generation_distribution(members: &[FamilyMember]) -> Vec<GenerationCount> {
        let mut per_generation: BTreeMap<i32, u32> = BTreeMap::new();
        let mut unknown = 0u32;
        for member in members {
            match member.generation {
                Some(generation) => *per_generation.entry(generation).or_default() += 1,
                None => unknown += 1,
            }
        }

        let mut ret: Vec<GenerationCount> = per_generation
            .into_iter()
            .map(|(generation, count)| GenerationCount {
                label: format!("第{generation}世"),
                count,
            })
            .collect();
        if unknown > 0 {
            ret.push(GenerationCount {
                label: "未知".to_string(),
                count: unknown,
            });
        }
        ret
    }

    fn status_distribution(members: &[FamilyMember]) -> Vec<ChartSlice> {
        let alive = members.iter().filter(|m| m.is_alive).count() as u32;
        vec![
            ChartSlice {
                label: "在世",
                count: alive,
                fill: ALIVE_FILL,
            },
            ChartSlice {
                label: "已故",
                count: members.len() as u32 - alive,
                fill: DECEASED_FILL,
            },
        ]
    }

    /// Living members with a recorded birth year only; everyone else is
    /// left out instead of being guessed into a band.
    fn age_distribution(members: &[FamilyMember], reference_year: i32) -> Vec<AgeBucket> {
        let mut counts = [0u32; AGE_BAND_LABELS.len()];
        for member in members.iter().filter(|m| m.is_alive) {
            if let Some(age) = member.age_in(reference_year) {
                counts[Self::age_band_index(age)] += 1;
            }
        }
        AGE_BAND_LABELS
            .iter()
            .zip(counts)
            .map(|(&label, count)| AgeBucket { label, count })
            .collect()
    }

    fn age_band_index(age: i32) -> usize {
        match age {
            ..=10 => 0,
            11..=20 => 1,
            21..=30 => 2,
            31..=40 => 3,
            41..=50 => 4,
            51..=60 => 5,
            61..=70 => 6,
            71..=80 => 7,
            _ => 8,
        }
    }

    /// The second name character traditionally carries the generation
    /// name, so its frequency sketches the clan's naming convention.
    /// Top ten, ties kept in first-encountered order.
    fn name_char_frequency(members: &[FamilyMember]) -> Vec<NameCharCount> {
        let mut counts: Vec<NameCharCount> = Vec::new();
        for member in members {
            let Some(character) = member.name.chars().nth(1) else {
                continue;
            };
            match counts.iter_mut().find(|c| c.character == character) {
                Some(entry) => entry.count += 1,
                None => counts.push(NameCharCount {
                    character,
                    count: 1,
                }),
            }
        }
        counts
            .into_iter()
            .sorted_by(|a, b| b.count.cmp(&a.count))
            .take(10)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, name: &str) -> FamilyMember {
        FamilyMember {
            id,
            uid: None,
            father_uid: None,
            father_id: None,
            generation: None,
            name: name.to_string(),
            gender: None,
            sibling_order: None,
            official_position: None,
            is_alive: true,
            spouse: None,
            bio: None,
            birth_date: None,
            death_date: None,
            residence_place: None,
        }
    }

    fn with_gender(mut m: FamilyMember, gender: Gender) -> FamilyMember {
        m.gender = Some(gender);
        m
    }

    #[test]
    fn test_gender_distribution() {
        let members = vec![
            with_gender(member(1, "刘德华"), Gender::Male),
            with_gender(member(2, "刘慧华"), Gender::Female),
            with_gender(member(3, "刘建华"), Gender::Male),
        ];
        let stats = FamilyStatistics::new_from_members(&members, 2025);
        assert_eq!(
            stats.gender(),
            &[
                ChartSlice {
                    label: "男",
                    count: 2,
                    fill: MALE_FILL
                },
                ChartSlice {
                    label: "女",
                    count: 1,
                    fill: FEMALE_FILL
                },
            ]
        );
    }

    #[test]
    fn test_gender_unknown_bucket_only_when_present() {
        let members = vec![member(1, "刘备")];
        let stats = FamilyStatistics::new_from_members(&members, 2025);
        assert_eq!(stats.gender().len(), 3);
        assert_eq!(stats.gender()[0].count, 0);
        assert_eq!(stats.gender()[1].count, 0);
        assert_eq!(stats.gender()[2].label, "未知");
        assert_eq!(stats.gender()[2].count, 1);

        let unknown_variant = vec![with_gender(member(1, "刘备"), Gender::Unknown)];
        let stats = FamilyStatistics::new_from_members(&unknown_variant, 2025);
        assert_eq!(stats.gender()[2].count, 1);
    }

    #[test]
    fn test_generation_distribution_sorted_with_unknown_last() {
        let mut a = member(1, "刘甲");
        a.generation = Some(21);
        let mut b = member(2, "刘乙");
        b.generation = Some(3);
        let mut c = member(3, "刘丙");
        c.generation = Some(21);
        let d = member(4, "刘丁");

        let stats = FamilyStatistics::new_from_members(&[a, b, c, d], 2025);
        let labels: Vec<&str> = stats
            .generations()
            .iter()
            .map(|g| g.label.as_str())
            .collect();
        assert_eq!(labels, vec!["第3世", "第21世", "未知"]);
        assert_eq!(stats.generations()[1].count, 2);
    }

    #[test]
    fn test_generation_zero_is_a_real_generation() {
        let mut a = member(1, "刘甲");
        a.generation = Some(0);
        let stats = FamilyStatistics::new_from_members(&[a], 2025);
        assert_eq!(stats.generations()[0].label, "第0世");
    }

    #[test]
    fn test_status_distribution_always_has_both() {
        let mut deceased = member(1, "刘甲");
        deceased.is_alive = false;
        let stats = FamilyStatistics::new_from_members(&[deceased], 2025);
        assert_eq!(
            stats.status(),
            &[
                ChartSlice {
                    label: "在世",
                    count: 0,
                    fill: ALIVE_FILL
                },
                ChartSlice {
                    label: "已故",
                    count: 1,
                    fill: DECEASED_FILL
                },
            ]
        );
    }

    #[test]
    fn test_age_bands_zero_without_eligible_members() {
        // A deceased member with a birth year and a living one without:
        // neither is counted anywhere.
        let mut deceased = member(1, "刘甲");
        deceased.is_alive = false;
        deceased.birth_date = Some(1900);
        let living = member(2, "刘乙");

        let stats = FamilyStatistics::new_from_members(&[deceased, living], 2025);
        assert_eq!(stats.ages().len(), 9);
        assert!(stats.ages().iter().all(|band| band.count == 0));
    }

    #[test]
    fn test_age_band_boundaries() {
        let mut ten = member(1, "刘甲");
        ten.birth_date = Some(2015); // age 10
        let mut eleven = member(2, "刘乙");
        eleven.birth_date = Some(2014); // age 11
        let mut eighty = member(3, "刘丙");
        eighty.birth_date = Some(1945); // age 80
        let mut over = member(4, "刘丁");
        over.birth_date = Some(1944); // age 81

        let stats = FamilyStatistics::new_from_members(&[ten, eleven, eighty, over], 2025);
        let count = |label: &str| {
            stats
                .ages()
                .iter()
                .find(|band| band.label == label)
                .map(|band| band.count)
        };
        assert_eq!(count("0-10岁"), Some(1));
        assert_eq!(count("11-20岁"), Some(1));
        assert_eq!(count("71-80岁"), Some(1));
        assert_eq!(count("80岁以上"), Some(1));
    }

    #[test]
    fn test_name_chars_top_ten_with_stable_ties() {
        let members = vec![
            member(1, "刘建华"),
            member(2, "刘建国"),
            member(3, "刘明华"),
            member(4, "刘志强"),
            member(5, "刘"), // single char, skipped
        ];
        let stats = FamilyStatistics::new_from_members(&members, 2025);
        let chars: Vec<char> = stats
            .common_name_chars()
            .iter()
            .map(|c| c.character)
            .collect();
        // 建 twice, then 明 and 志 once each in first-seen order.
        assert_eq!(chars, vec!['建', '明', '志']);
        assert_eq!(stats.common_name_chars()[0].count, 2);
    }

    #[test]
    fn test_name_chars_truncated_to_ten() {
        let names = [
            "刘一平", "刘二平", "刘三平", "刘四平", "刘五平", "刘六平", "刘七平", "刘八平",
            "刘九平", "刘十平", "刘百平", "刘千平",
        ];
        let members: Vec<FamilyMember> = names
            .iter()
            .enumerate()
            .map(|(i, name)| member(i as i64, name))
            .collect();
        let stats = FamilyStatistics::new_from_members(&members, 2025);
        assert_eq!(stats.common_name_chars().len(), 10);
        // All tied at one: first ten encountered survive.
        assert_eq!(stats.common_name_chars()[0].character, '一');
        assert_eq!(stats.common_name_chars()[9].character, '十');
    }

    #[test]
    fn test_total_members() {
        let stats = FamilyStatistics::new_from_members(&[], 2025);
        assert_eq!(stats.total_members(), 0);
        assert!(stats.gender()[0].count == 0);
        assert!(stats.generations().is_empty());
    }
}
