//! Chinese numerals for generation labels.

const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Renders 0..=99 as a Chinese numeral (十三, 二十, 四十七, ...).
/// Family trees rarely reach generation 100; anything outside the range
/// falls back to the decimal string.
pub fn to_chinese_num(num: i32) -> String {
    match num {
        0 => DIGITS[0].to_string(),
        1..=9 => DIGITS[num as usize].to_string(),
        10..=19 => match num % 10 {
            0 => "十".to_string(),
            digit => format!("十{}", DIGITS[digit as usize]),
        },
        20..=99 => {
            let tens = (num / 10) as usize;
            match num % 10 {
                0 => format!("{}十", DIGITS[tens]),
                digit => format!("{}十{}", DIGITS[tens], DIGITS[digit as usize]),
            }
        }
        _ => num.to_string(),
    }
}
