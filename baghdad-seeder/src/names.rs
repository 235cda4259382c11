use rand::seq::IndexedRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Ahmed", "Ali", "Hussein", "Mohammed", "Omar", "Mustafa", "Hassan", "Karrar", "Haider",
    "Yousif", "Zaid", "Abbas", "Murtadha", "Sajjad", "Ammar", "Khalid", "Fatima", "Zainab",
    "Maryam", "Noor", "Sara", "Rusul", "Huda", "Aya", "Shahad", "Duaa", "Hiba", "Layla", "Rana",
    "Tabarak",
];

const LAST_NAMES: &[&str] = &[
    "Al-Jubouri", "Al-Tamimi", "Al-Obaidi", "Al-Dulaimi", "Al-Saadi", "Al-Rubaie", "Al-Shammari",
    "Al-Hashimi", "Al-Khafaji", "Al-Zubaidi", "Al-Bayati", "Al-Azzawi", "Al-Janabi", "Al-Mosawi",
    "Al-Kubaisi", "Al-Ani", "Al-Qaisi", "Al-Timimi", "Al-Hilli", "Al-Baghdadi",
];

pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ali");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Al-Baghdadi");
    format!("{} {}", first, last)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn names_have_a_first_and_last_part() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let name = full_name(&mut rng);
            let (first, last) = name.split_once(' ').unwrap();
            assert!(FIRST_NAMES.contains(&first));
            assert!(LAST_NAMES.contains(&last));
        }
    }
}
